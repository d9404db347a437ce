//! The split tasks.
//!
//! Three tasks share the round-robin partitioner and differ only in where
//! their inventory comes from:
//!
//! - [`SplitTests`] partitions the full test-name inventory of a
//!   [`TestSource`](crate::TestSource).
//! - [`SplitGroups`] scans the same inventory for annotation groups, merges
//!   the requested ones and partitions the merged list.
//! - [`SplitFiles`] partitions test file paths from a
//!   [`FileSource`](crate::FileSource).
//!
//! Each task is configured through consuming `with_*` methods and executed
//! with `run()`, which returns a [`SplitReport`] describing the written group
//! files.

use std::path::Path;

use crate::{
    error::SplitError,
    partition::Partition,
    report::{GroupFile, SplitReport},
    reporter::SplitReporter,
    writer::GroupWriter,
};

pub use tests::SplitTests;

mod groups;
pub use groups::SplitGroups;

mod files;
pub use files::SplitFiles;

/// Default directory the inventory is taken from, relative to the project
/// root.
pub const DEFAULT_TESTS_FROM: &str = "tests";

/// Default destination prefix the 1-based group index is appended to.
pub const DEFAULT_GROUPS_TO: &str = "tests/_log/paracept_";

/// Default file name patterns for [`SplitFiles`].
pub const DEFAULT_FILE_PATTERNS: [&str; 3] = ["*Cept.php", "*Cest.php", "*Test.php"];

fn ensure_group_count(group_count: usize) -> Result<usize, SplitError> {
    match group_count {
        0 => Err(SplitError::InvalidGroupCount(group_count)),
        _ => Ok(group_count),
    }
}

// Writes are not transactional: a failure aborts the loop but leaves the
// files written so far in place.
fn write_groups(
    groups: Partition<String>,
    prefix: &Path,
    writer: &impl GroupWriter,
    reporter: &impl SplitReporter,
) -> Result<SplitReport, SplitError> {
    let mut files = Vec::with_capacity(groups.len());
    for (index, identifiers) in groups {
        let path = writer.write(index, &identifiers, prefix)?;
        reporter.group_written(index, identifiers.len(), &path);
        files.push(GroupFile {
            index,
            path,
            tests: identifiers.len(),
        });
    }
    Ok(SplitReport { files })
}

//! Inventory collaborators.
//!
//! The partitioning core never walks a filesystem or talks to a test framework
//! itself. It consumes inventories from two injected traits:
//!
//! - [`TestSource`] enumerates test cases together with their raw annotation
//!   text. There is no meaningful default for this — only an adapter around an
//!   actual test framework can provide it — so the default [`NoTestSource`]
//!   fails the run before anything is written.
//! - [`FileSource`] enumerates test files under a root. [`SuffixWalker`] is the
//!   default implementation, walking the tree with `walkdir` and matching file
//!   names against glob patterns.
//!
//! Both must enumerate in a stable order for an unchanged source, because the
//! round-robin partition is a function of that order.

use std::{
    io,
    path::{Path, PathBuf},
};

use globset::{Glob, GlobSetBuilder};
use walkdir::WalkDir;

use crate::error::SplitError;

/// One test case as reported by a [`TestSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredTest {
    /// Stable full name of the test, e.g. `"LoginCest::works"`.
    pub name: String,

    /// The raw documentation text attached to the test, scanned for group
    /// declarations by the named-group task. Empty if the test carries none.
    pub annotations: String,
}

impl DiscoveredTest {
    pub fn new(name: impl Into<String>, annotations: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: annotations.into(),
        }
    }
}

/// Enumerates the test cases below a root path, in stable order.
pub trait TestSource {
    fn tests(&self, root: &Path) -> Result<Vec<DiscoveredTest>, SplitError>;
}

/// Placeholder source that fails with [`SplitError::MissingTestSource`].
///
/// Tasks that need a test framework adapter start out with this, so running
/// them without injecting a real source aborts before any group file exists.
#[derive(Debug, Default)]
pub struct NoTestSource;

impl TestSource for NoTestSource {
    fn tests(&self, _: &Path) -> Result<Vec<DiscoveredTest>, SplitError> {
        Err(SplitError::MissingTestSource)
    }
}

/// Enumerates test files below a root path, relative to that root, in stable
/// order.
pub trait FileSource {
    fn files(&self, root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, SplitError>;
}

/// Default [`FileSource`]: a sorted `walkdir` traversal with `globset` file
/// name matching.
#[derive(Debug, Default)]
pub struct SuffixWalker;

impl FileSource for SuffixWalker {
    fn files(&self, root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, SplitError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(
                Glob::new(pattern).map_err(|source| SplitError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?,
            );
        }
        let matcher = builder.build().map_err(|source| SplitError::Pattern {
            pattern: patterns.join(", "),
            source,
        })?;

        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|err| {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                SplitError::Discover {
                    path,
                    source: err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("filesystem loop")),
                }
            })?;

            if !entry.file_type().is_file() || !matcher.is_match(entry.file_name()) {
                continue;
            }

            let path = entry.path().strip_prefix(root).unwrap_or(entry.path());
            files.push(path.to_path_buf());
        }
        Ok(files)
    }
}

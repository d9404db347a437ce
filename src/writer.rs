//! Serialization of partitioned groups to disk.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::SplitError;

/// Writes one partitioned group to its destination.
///
/// The destination is `<prefix><1-based index>` — the index is appended to the
/// prefix verbatim, no extension or separator added. A parallel runner picks
/// the file matching its worker number.
pub trait GroupWriter {
    fn write(
        &self,
        index: usize,
        identifiers: &[String],
        prefix: &Path,
    ) -> Result<PathBuf, SplitError>;
}

/// Default [`GroupWriter`]: plain files, one identifier per line.
///
/// Existing files are overwritten. The destination directory is not created;
/// a missing directory surfaces as [`SplitError::Write`] like any other
/// unwritable path.
#[derive(Debug, Default)]
pub struct FsGroupWriter;

impl GroupWriter for FsGroupWriter {
    fn write(
        &self,
        index: usize,
        identifiers: &[String],
        prefix: &Path,
    ) -> Result<PathBuf, SplitError> {
        let path = PathBuf::from(format!("{}{index}", prefix.display()));
        fs::write(&path, identifiers.join("\n")).map_err(|source| SplitError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

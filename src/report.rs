use std::path::PathBuf;

/// What a finished split task produced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SplitReport {
    /// One entry per written group file, ordered by group index.
    pub files: Vec<GroupFile>,
}

impl SplitReport {
    /// Total number of identifiers across all written groups.
    pub fn test_count(&self) -> usize {
        self.files.iter().map(|file| file.tests).sum()
    }
}

/// One written group file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GroupFile {
    /// 1-based group index, as appended to the destination prefix.
    pub index: usize,

    /// Where the group was written.
    pub path: PathBuf,

    /// How many identifiers the file holds.
    pub tests: usize,
}

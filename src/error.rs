use std::{io, path::PathBuf};

/// Failures that abort a split task.
///
/// Unknown group names are deliberately not in here: a single unknown name is a
/// diagnostic that goes through the [`SplitReporter`](crate::SplitReporter),
/// and the task keeps going with the names that did match.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SplitError {
    /// No test source was injected, so there is nothing to enumerate.
    #[error("no test source available, inject one via `with_source`")]
    MissingTestSource,

    /// The configured group count cannot produce any groups.
    #[error("group count must be at least 1, got {0}")]
    InvalidGroupCount(usize),

    /// Every requested group name was unknown.
    #[error("none of the requested groups matched any tests: {}", requested.join(", "))]
    NoMatchingGroups { requested: Vec<String> },

    /// A file name pattern could not be compiled into a matcher.
    #[error("invalid file name pattern {pattern:?}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// Discovery of tests or files failed in the collaborator.
    #[error("failed to discover test units under {path}")]
    Discover {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A group file could not be written. Files written before this one stay
    /// in place; writes are not transactional.
    #[error("failed to write group file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

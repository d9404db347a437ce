use std::path::PathBuf;

use crate::{
    error::SplitError,
    inventory::{FileSource, SuffixWalker},
    partition::partition,
    report::SplitReport,
    reporter::{SplitReporter, TracingReporter},
    task::{DEFAULT_FILE_PATTERNS, DEFAULT_GROUPS_TO, DEFAULT_TESTS_FROM, ensure_group_count, write_groups},
    writer::{FsGroupWriter, GroupWriter},
};

/// Splits discovered test files into balanced groups by round-robin.
///
/// Unlike [`SplitTests`](crate::SplitTests) this task works without any test
/// framework: the default [`SuffixWalker`] discovers files below
/// `tests_from` whose names match the configured patterns, and the written
/// identifiers are paths relative to that directory.
#[derive(Debug)]
pub struct SplitFiles<Source = SuffixWalker, Writer = FsGroupWriter, Reporter = TracingReporter> {
    pub(crate) group_count: usize,
    pub(crate) patterns: Vec<String>,
    pub(crate) tests_from: PathBuf,
    pub(crate) groups_to: PathBuf,
    pub(crate) project_root: PathBuf,
    pub(crate) source: Source,
    pub(crate) writer: Writer,
    pub(crate) reporter: Reporter,
}

impl SplitFiles {
    /// Create a task producing `group_count` groups.
    ///
    /// A count of zero fails right here with
    /// [`SplitError::InvalidGroupCount`].
    pub fn new(group_count: usize) -> Result<Self, SplitError> {
        Ok(Self {
            group_count: ensure_group_count(group_count)?,
            patterns: DEFAULT_FILE_PATTERNS.map(String::from).to_vec(),
            tests_from: DEFAULT_TESTS_FROM.into(),
            groups_to: DEFAULT_GROUPS_TO.into(),
            project_root: ".".into(),
            source: SuffixWalker,
            writer: FsGroupWriter,
            reporter: TracingReporter,
        })
    }
}

impl<Source, Writer, Reporter> SplitFiles<Source, Writer, Reporter> {
    /// The file name patterns to discover, replacing the defaults.
    pub fn with_patterns<I>(self, patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_tests_from(self, path: impl Into<PathBuf>) -> Self {
        Self {
            tests_from: path.into(),
            ..self
        }
    }

    pub fn with_groups_to(self, prefix: impl Into<PathBuf>) -> Self {
        Self {
            groups_to: prefix.into(),
            ..self
        }
    }

    pub fn with_project_root(self, path: impl Into<PathBuf>) -> Self {
        Self {
            project_root: path.into(),
            ..self
        }
    }

    pub fn with_source<WithSource: FileSource>(
        self,
        source: WithSource,
    ) -> SplitFiles<WithSource, Writer, Reporter> {
        SplitFiles {
            group_count: self.group_count,
            patterns: self.patterns,
            tests_from: self.tests_from,
            groups_to: self.groups_to,
            project_root: self.project_root,
            source,
            writer: self.writer,
            reporter: self.reporter,
        }
    }

    pub fn with_writer<WithWriter: GroupWriter>(
        self,
        writer: WithWriter,
    ) -> SplitFiles<Source, WithWriter, Reporter> {
        SplitFiles {
            group_count: self.group_count,
            patterns: self.patterns,
            tests_from: self.tests_from,
            groups_to: self.groups_to,
            project_root: self.project_root,
            source: self.source,
            writer,
            reporter: self.reporter,
        }
    }

    pub fn with_reporter<WithReporter: SplitReporter>(
        self,
        reporter: WithReporter,
    ) -> SplitFiles<Source, Writer, WithReporter> {
        SplitFiles {
            group_count: self.group_count,
            patterns: self.patterns,
            tests_from: self.tests_from,
            groups_to: self.groups_to,
            project_root: self.project_root,
            source: self.source,
            writer: self.writer,
            reporter,
        }
    }
}

impl<Source, Writer, Reporter> SplitFiles<Source, Writer, Reporter>
where
    Source: FileSource,
    Writer: GroupWriter,
    Reporter: SplitReporter,
{
    /// Discover the files, partition them and write one file per group.
    pub fn run(&self) -> Result<SplitReport, SplitError> {
        let root = self.project_root.join(&self.tests_from);
        let files = self.source.files(&root, &self.patterns)?;
        self.reporter.discovered(files.len());

        let identifiers = files.into_iter().map(|path| path.display().to_string());
        let groups = partition(identifiers, self.group_count)?;

        write_groups(
            groups,
            &self.project_root.join(&self.groups_to),
            &self.writer,
            &self.reporter,
        )
    }
}

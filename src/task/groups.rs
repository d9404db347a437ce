use std::path::PathBuf;

use crate::{
    annotation::GroupSet,
    error::SplitError,
    inventory::{NoTestSource, TestSource},
    partition::partition,
    report::SplitReport,
    reporter::{SplitReporter, TracingReporter},
    task::{DEFAULT_GROUPS_TO, DEFAULT_TESTS_FROM, ensure_group_count, write_groups},
    writer::{FsGroupWriter, GroupWriter},
};

/// Splits the tests of selected annotation groups into balanced groups.
///
/// The task scans every test's annotation text for group declarations, merges
/// the identifier lists of the requested group names (requested order,
/// first occurrence wins on duplicates) and partitions the merged inventory.
/// The partition group count is independent of how many names were requested.
///
/// Requested names that match nothing are diagnostics through the reporter;
/// the run only fails when *no* requested name matches.
#[derive(Debug)]
pub struct SplitGroups<Source = NoTestSource, Writer = FsGroupWriter, Reporter = TracingReporter> {
    pub(crate) group_count: usize,
    pub(crate) groups: Vec<String>,
    pub(crate) tests_from: PathBuf,
    pub(crate) groups_to: PathBuf,
    pub(crate) project_root: PathBuf,
    pub(crate) source: Source,
    pub(crate) writer: Writer,
    pub(crate) reporter: Reporter,
}

impl SplitGroups {
    /// Create a task producing `group_count` groups.
    ///
    /// A count of zero fails right here with
    /// [`SplitError::InvalidGroupCount`]. The group names to select are set
    /// via [`with_groups`](Self::with_groups).
    pub fn new(group_count: usize) -> Result<Self, SplitError> {
        Ok(Self {
            group_count: ensure_group_count(group_count)?,
            groups: Vec::new(),
            tests_from: DEFAULT_TESTS_FROM.into(),
            groups_to: DEFAULT_GROUPS_TO.into(),
            project_root: ".".into(),
            source: NoTestSource,
            writer: FsGroupWriter,
            reporter: TracingReporter,
        })
    }
}

impl<Source, Writer, Reporter> SplitGroups<Source, Writer, Reporter> {
    /// The annotation group names to select, in selection order.
    pub fn with_groups<I>(self, groups: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
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

    pub fn with_source<WithSource: TestSource>(
        self,
        source: WithSource,
    ) -> SplitGroups<WithSource, Writer, Reporter> {
        SplitGroups {
            group_count: self.group_count,
            groups: self.groups,
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
    ) -> SplitGroups<Source, WithWriter, Reporter> {
        SplitGroups {
            group_count: self.group_count,
            groups: self.groups,
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
    ) -> SplitGroups<Source, Writer, WithReporter> {
        SplitGroups {
            group_count: self.group_count,
            groups: self.groups,
            tests_from: self.tests_from,
            groups_to: self.groups_to,
            project_root: self.project_root,
            source: self.source,
            writer: self.writer,
            reporter,
        }
    }
}

impl<Source, Writer, Reporter> SplitGroups<Source, Writer, Reporter>
where
    Source: TestSource,
    Writer: GroupWriter,
    Reporter: SplitReporter,
{
    /// Scan, select, partition and write one file per group.
    pub fn run(&self) -> Result<SplitReport, SplitError> {
        let tests = self.source.tests(&self.project_root.join(&self.tests_from))?;
        self.reporter.discovered(tests.len());

        let set = GroupSet::scan(tests.into_iter().map(|test| (test.name, test.annotations)));
        let selection = set.select(&self.groups)?;
        if !selection.unknown.is_empty() {
            let available: Vec<&str> = set.names().collect();
            for name in &selection.unknown {
                self.reporter.unknown_group(name, &available);
            }
        }

        let groups = partition(selection.tests, self.group_count)?;

        write_groups(
            groups,
            &self.project_root.join(&self.groups_to),
            &self.writer,
            &self.reporter,
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{inventory::DiscoveredTest, reporter::NoReporter};

    struct Annotated(Vec<(&'static str, &'static str)>);

    impl TestSource for Annotated {
        fn tests(&self, _: &std::path::Path) -> Result<Vec<DiscoveredTest>, SplitError> {
            Ok(self
                .0
                .iter()
                .map(|(name, annotations)| DiscoveredTest::new(*name, *annotations))
                .collect())
        }
    }

    fn suite() -> Annotated {
        Annotated(vec![
            ("SmokeCest::login", "@group smoke"),
            ("SmokeCest::logout", "@group smoke\n@group slow"),
            ("OrderCest::checkout", "@group slow"),
            ("MiscCest::untagged", ""),
        ])
    }

    #[test]
    fn partitions_the_merged_selection() {
        let dir = tempfile::tempdir().unwrap();
        let report = SplitGroups::new(2)
            .unwrap()
            .with_groups(["smoke", "slow"])
            .with_source(suite())
            .with_project_root(dir.path())
            .with_groups_to("group_")
            .with_reporter(NoReporter)
            .run()
            .unwrap();

        // SmokeCest::logout is in both groups and must appear exactly once.
        assert_eq!(report.test_count(), 3);

        let first = std::fs::read_to_string(dir.path().join("group_1")).unwrap();
        let second = std::fs::read_to_string(dir.path().join("group_2")).unwrap();
        assert_eq!(first, "SmokeCest::login\nOrderCest::checkout");
        assert_eq!(second, "SmokeCest::logout");
    }

    #[test]
    fn unknown_names_do_not_stop_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let report = SplitGroups::new(1)
            .unwrap()
            .with_groups(["smoke", "bogus"])
            .with_source(suite())
            .with_project_root(dir.path())
            .with_groups_to("group_")
            .with_reporter(NoReporter)
            .run()
            .unwrap();

        assert_eq!(report.test_count(), 2);
        let content = std::fs::read_to_string(dir.path().join("group_1")).unwrap();
        assert_eq!(content, "SmokeCest::login\nSmokeCest::logout");
    }

    #[test]
    fn all_unknown_names_fail_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let err = SplitGroups::new(2)
            .unwrap()
            .with_groups(["x", "y"])
            .with_source(suite())
            .with_project_root(dir.path())
            .with_groups_to("group_")
            .with_reporter(NoReporter)
            .run()
            .unwrap_err();

        assert!(matches!(err, SplitError::NoMatchingGroups { .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

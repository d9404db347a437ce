use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use parashard::{
    DiscoveredTest, FsGroupWriter, GroupWriter, SplitError, SplitFiles, SplitGroups,
    SplitReporter, SplitTests, TestSource,
};
use pretty_assertions::assert_eq;

struct StaticSuite;

impl TestSource for StaticSuite {
    fn tests(&self, _: &Path) -> Result<Vec<DiscoveredTest>, SplitError> {
        Ok(vec![
            DiscoveredTest::new("LoginCest::valid", "@group smoke\n@group auth"),
            DiscoveredTest::new("LoginCest::invalid", "@group auth"),
            DiscoveredTest::new("CartCest::add", "@group smoke"),
            DiscoveredTest::new("CartCest::remove", "covered by the group smoke suite"),
            DiscoveredTest::new("AdminCest::audit", "no annotations worth a mention"),
        ])
    }
}

#[derive(Default, Clone)]
struct RecordingReporter {
    events: Arc<Mutex<Vec<String>>>,
}

impl RecordingReporter {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl SplitReporter for RecordingReporter {
    fn discovered(&self, count: usize) {
        self.events.lock().unwrap().push(format!("discovered {count}"));
    }

    fn unknown_group(&self, name: &str, available: &[&str]) {
        self.events
            .lock()
            .unwrap()
            .push(format!("unknown {name} (available: {})", available.join(", ")));
    }

    fn group_written(&self, index: usize, count: usize, _: &Path) {
        self.events
            .lock()
            .unwrap()
            .push(format!("wrote group {index} with {count}"));
    }
}

#[test]
fn split_tests_covers_the_whole_inventory() {
    let dir = tempfile::tempdir().unwrap();

    let report = SplitTests::new(3)
        .unwrap()
        .with_source(StaticSuite)
        .with_project_root(dir.path())
        .with_groups_to("unit_")
        .run()
        .unwrap();

    assert_eq!(report.files.len(), 3);
    assert_eq!(report.test_count(), 5);

    let mut lines: Vec<String> = report
        .files
        .iter()
        .flat_map(|file| {
            fs::read_to_string(&file.path)
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();
    lines.sort();
    assert_eq!(
        lines,
        [
            "AdminCest::audit",
            "CartCest::add",
            "CartCest::remove",
            "LoginCest::invalid",
            "LoginCest::valid",
        ]
    );
}

#[test]
fn split_groups_reports_unknown_names_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let reporter = RecordingReporter::default();

    let result = SplitGroups::new(2)
        .unwrap()
        .with_groups(["smoke", "bogus"])
        .with_source(StaticSuite)
        .with_project_root(dir.path())
        .with_groups_to("smoke_")
        .with_reporter(reporter.clone())
        .run()
        .unwrap();

    assert_eq!(result.test_count(), 2);
    assert_eq!(
        fs::read_to_string(dir.path().join("smoke_1")).unwrap(),
        "LoginCest::valid"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("smoke_2")).unwrap(),
        "CartCest::add"
    );

    let events = reporter.events();
    assert!(events.iter().any(|event| event.contains("unknown bogus")));
    // The loose line matching turned the "the group smoke suite" prose of
    // CartCest::remove into a group of its own.
    assert!(
        events
            .iter()
            .any(|event| event.contains("available: auth, smoke, smoke suite"))
    );
}

#[test]
fn split_groups_with_only_unknown_names_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();

    let err = SplitGroups::new(2)
        .unwrap()
        .with_groups(["nope"])
        .with_source(StaticSuite)
        .with_project_root(dir.path())
        .with_groups_to("smoke_")
        .run()
        .unwrap_err();

    assert!(matches!(err, SplitError::NoMatchingGroups { .. }));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn split_files_walks_nested_suites_in_stable_order() {
    let dir = tempfile::tempdir().unwrap();
    let tests = dir.path().join("tests");
    fs::create_dir_all(tests.join("acceptance")).unwrap();
    fs::create_dir_all(tests.join("unit")).unwrap();
    for file in [
        "acceptance/LoginCept.php",
        "acceptance/OrderCept.php",
        "unit/CartTest.php",
        "unit/CartHelper.php",
    ] {
        fs::write(tests.join(file), "").unwrap();
    }

    let report = SplitFiles::new(2)
        .unwrap()
        .with_project_root(dir.path())
        .with_groups_to("files_")
        .run()
        .unwrap();

    assert_eq!(report.test_count(), 3);
    assert_eq!(
        fs::read_to_string(dir.path().join("files_1")).unwrap(),
        format!(
            "{}\n{}",
            PathBuf::from("acceptance").join("LoginCept.php").display(),
            PathBuf::from("unit").join("CartTest.php").display(),
        )
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("files_2")).unwrap(),
        PathBuf::from("acceptance").join("OrderCept.php").display().to_string()
    );
}

struct FailAt {
    index: usize,
    inner: FsGroupWriter,
}

impl GroupWriter for FailAt {
    fn write(
        &self,
        index: usize,
        identifiers: &[String],
        prefix: &Path,
    ) -> Result<PathBuf, SplitError> {
        match index == self.index {
            true => Err(SplitError::Write {
                path: PathBuf::from(format!("{}{index}", prefix.display())),
                source: std::io::Error::other("disk full"),
            }),
            false => self.inner.write(index, identifiers, prefix),
        }
    }
}

#[test]
fn a_failed_write_keeps_already_written_group_files() {
    let dir = tempfile::tempdir().unwrap();

    let err = SplitTests::new(3)
        .unwrap()
        .with_source(StaticSuite)
        .with_project_root(dir.path())
        .with_groups_to("unit_")
        .with_writer(FailAt {
            index: 2,
            inner: FsGroupWriter,
        })
        .run()
        .unwrap_err();

    assert!(matches!(err, SplitError::Write { .. }));
    assert!(dir.path().join("unit_1").exists());
    assert!(!dir.path().join("unit_2").exists());
    assert!(!dir.path().join("unit_3").exists());
}

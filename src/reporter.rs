//! Progress and diagnostic reporting.
//!
//! Tasks never print; everything informational goes through a
//! [`SplitReporter`]. Unknown group names in particular are diagnostics, not
//! errors — the run continues, and it is up to the reporter to make them
//! visible.

use std::path::Path;

/// Side channel for progress counts and non-fatal diagnostics.
pub trait SplitReporter {
    /// The inventory has been fetched and holds `count` test units.
    fn discovered(&self, count: usize);

    /// A requested group name matched no tests. `available` lists the group
    /// names that do exist, for help output.
    fn unknown_group(&self, name: &str, available: &[&str]);

    /// A group file has been written with `count` identifiers.
    fn group_written(&self, index: usize, count: usize, path: &Path);
}

/// Silent reporter.
#[derive(Debug, Default)]
pub struct NoReporter;

impl SplitReporter for NoReporter {
    fn discovered(&self, _: usize) {}

    fn unknown_group(&self, _: &str, _: &[&str]) {}

    fn group_written(&self, _: usize, _: usize, _: &Path) {}
}

/// Default reporter, emitting `tracing` events.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl SplitReporter for TracingReporter {
    fn discovered(&self, count: usize) {
        tracing::info!(count, "discovered test units");
    }

    fn unknown_group(&self, name: &str, available: &[&str]) {
        tracing::warn!(
            name,
            available = available.join(", "),
            "requested group matches no tests"
        );
    }

    fn group_written(&self, index: usize, count: usize, path: &Path) {
        tracing::info!(group = index, tests = count, path = %path.display(), "wrote group file");
    }
}

//! Annotation group extraction and named-group selection.
//!
//! Tests declare membership in named groups through their documentation text,
//! one declaration per line (for example `@group smoke`). A [`GroupSet`] is the
//! scan result over a full inventory: every declared group name mapped to the
//! tests carrying it, in first-seen order.

use std::{
    collections::{BTreeMap, HashSet},
    sync::LazyLock,
};

use regex::Regex;

use crate::error::SplitError;

// Matches the token `group` followed by whitespace anywhere in a line, which
// also matches the word inside unrelated prose. The original annotation format
// is this loose, so callers relying on it get the same behavior here.
static GROUP_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"group\s+(\S.*)").expect("valid group line pattern"));

/// Named groups extracted from test annotations.
///
/// Keys are held sorted so [`GroupSet::names`] and diagnostics built from it
/// are deterministic. The value order is the order in which tests were seen
/// carrying that group. A key only exists once at least one test declared it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GroupSet {
    groups: BTreeMap<String, Vec<String>>,
}

/// The outcome of [`GroupSet::select`]: the merged inventory plus the
/// requested names that matched nothing.
#[derive(Debug, PartialEq, Eq)]
pub struct GroupSelection {
    /// Identifiers of all matched groups, concatenated in requested order and
    /// deduplicated keeping the first occurrence.
    pub tests: Vec<String>,

    /// Requested names with no matching tests. Diagnostic only; the selection
    /// succeeded without them.
    pub unknown: Vec<String>,
}

impl GroupSet {
    /// Build a group set by scanning `(identifier, annotation text)` pairs.
    ///
    /// Every line of the annotation text that declares a group adds the
    /// identifier to that group. A test may declare several groups, and
    /// duplicated declaration lines produce duplicated entries — the scan
    /// reflects the source as-is.
    pub fn scan<I, T, A>(annotated: I) -> Self
    where
        I: IntoIterator<Item = (T, A)>,
        T: AsRef<str>,
        A: AsRef<str>,
    {
        let mut set = Self::default();
        for (identifier, annotations) in annotated {
            for line in annotations.as_ref().lines() {
                if let Some(captures) = GROUP_LINE.captures(line) {
                    set.add(captures[1].trim(), identifier.as_ref());
                }
            }
        }
        set
    }

    /// Add `identifier` to the group called `name`.
    pub fn add(&mut self, name: impl Into<String>, identifier: impl Into<String>) {
        self.groups
            .entry(name.into())
            .or_default()
            .push(identifier.into());
    }

    /// All known group names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// The tests declared under `name`, if any test declared it.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Merge the requested groups into one flat inventory.
    ///
    /// Unknown names are collected into [`GroupSelection::unknown`] and skipped.
    /// Only when *every* requested name is unknown does selection fail, with
    /// [`SplitError::NoMatchingGroups`].
    pub fn select(&self, requested: &[String]) -> Result<GroupSelection, SplitError> {
        let mut tests = Vec::new();
        let mut unknown = Vec::new();
        let mut seen = HashSet::new();

        for name in requested {
            let Some(members) = self.groups.get(name) else {
                unknown.push(name.clone());
                continue;
            };

            for identifier in members {
                if seen.insert(identifier.as_str()) {
                    tests.push(identifier.clone());
                }
            }
        }

        // Group lists are never empty, so no tests means no name matched.
        match tests.is_empty() {
            true => Err(SplitError::NoMatchingGroups {
                requested: requested.to_vec(),
            }),
            false => Ok(GroupSelection { tests, unknown }),
        }
    }
}

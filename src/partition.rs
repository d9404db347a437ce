//! Round-robin partitioning of an ordered inventory.
//!
//! This is the one primitive every task shares. It takes an ordered sequence of
//! opaque identifiers and cycles them across a fixed number of groups, so the
//! resulting group sizes never differ by more than one.
//!
//! The input order is load-bearing: partitioning is a pure function of the
//! inventory and the group count, so a collaborator that enumerates its tests
//! in a stable order gets the same partition on every run.

use std::collections::BTreeMap;

use crate::error::SplitError;

/// Groups produced by [`partition`], keyed by 1-based group index.
///
/// Groups that received no identifiers are not present in the map, so for an
/// empty inventory the map itself is empty.
pub type Partition<T> = BTreeMap<usize, Vec<T>>;

/// Distribute `items` over `group_count` groups by round-robin.
///
/// Item `i` (zero-based) lands in group `(i % group_count) + 1`. Earlier groups
/// are never smaller than later ones.
///
/// Fails with [`SplitError::InvalidGroupCount`] for a group count of zero.
pub fn partition<T>(
    items: impl IntoIterator<Item = T>,
    group_count: usize,
) -> Result<Partition<T>, SplitError> {
    if group_count == 0 {
        return Err(SplitError::InvalidGroupCount(group_count));
    }

    let mut groups = Partition::new();
    for (i, item) in items.into_iter().enumerate() {
        groups.entry(i % group_count + 1).or_default().push(item);
    }
    Ok(groups)
}

//! parashard partitions a discovered test suite into a fixed number of
//! balanced groups, so a parallel runner can hand each group file to a
//! separate worker.
//!
//! The split is a round-robin over the inventory order, which makes it a pure
//! function of what the injected discovery collaborator enumerates: same
//! inventory, same group count, same partition. Balancing is by *count* only;
//! no test is ever executed or timed here.
//!
//! Entry points are the three tasks in [`task`]: [`SplitTests`],
//! [`SplitGroups`] and [`SplitFiles`].

mod annotation;
pub use annotation::*;

mod error;
pub use error::*;

mod inventory;
pub use inventory::*;

mod partition;
pub use partition::*;

mod report;
pub use report::*;

mod reporter;
pub use reporter::*;

pub mod task;
pub use task::*;

mod writer;
pub use writer::*;

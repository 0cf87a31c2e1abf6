//! Persistence for actors and scorecards.
//!
//! Handlers talk to the [`Store`] trait. The shipped implementation is
//! [`MemoryStore`], which keeps everything in memory and mirrors each
//! mutation to an optional JSON snapshot file.

pub mod memory;
pub mod seed;
pub mod snapshot;
pub mod store;

pub use memory::MemoryStore;
pub use snapshot::Snapshot;
pub use store::{Store, StoreError};

// Service exports
pub mod store;

pub use store::{InMemoryStore, Snapshot, SnapshotError, StoreError, SwipeOutcome};

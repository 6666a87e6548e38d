//! Station storage and the observable station catalog.
//!
//! The catalog reads from a [`StationStore`], publishes full snapshots to
//! its subscribers and seeds an empty store with Line 1 at first run.

mod catalog;
mod error;
pub mod seed;
mod store;

pub use catalog::{CatalogUpdate, SeedOutcome, Snapshot, StationCatalog, StationQuery};
pub use error::StorageError;
pub use store::{JsonFileStore, MemoryStore, StationStore};

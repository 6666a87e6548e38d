//! Domain types for the metro planner.
//!
//! Types here enforce their invariants at construction time, so code that
//! receives a `Station` can trust that it is well formed.

mod error;
mod station;

pub use error::DomainError;
pub use station::{Coordinates, LineId, Station, StationId};

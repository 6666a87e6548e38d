//! Web layer for the metro planner.
//!
//! A JSON API over the station catalog, the route planner and the alert
//! feed.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;

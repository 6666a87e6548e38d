//! Service alerts.
//!
//! Fetches alert records from the remote alerts API and keeps the latest
//! outcome available to the display layer. The route planner does not
//! consume alerts.

mod cache;
mod client;
mod error;
mod feed;
mod types;

#[cfg(test)]
mod test_server;

pub use cache::{AlertCacheConfig, CachedAlertClient};
pub use client::{AlertClient, AlertClientConfig, AlertSource, DEFAULT_BASE_URL};
pub use error::AlertError;
pub use feed::{AlertFeed, AlertsState};
pub use types::{Alert, AlertSeverity};

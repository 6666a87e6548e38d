//! Application state for the web layer.

use std::sync::Arc;

use crate::alerts::{AlertFeed, CachedAlertClient};
use crate::planner::PlannerHandle;
use crate::stations::StationCatalog;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Observable station list
    pub catalog: StationCatalog,

    /// Handle to the route planner task
    pub planner: PlannerHandle,

    /// Cached alerts API client
    pub alerts: Arc<CachedAlertClient>,

    /// Latest alert state
    pub alert_feed: AlertFeed,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        catalog: StationCatalog,
        planner: PlannerHandle,
        alerts: CachedAlertClient,
        alert_feed: AlertFeed,
    ) -> Self {
        Self {
            catalog,
            planner,
            alerts: Arc::new(alerts),
            alert_feed,
        }
    }
}

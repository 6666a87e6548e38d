//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::alerts::{Alert, AlertsState};
use crate::domain::Station;
use crate::planner::{PlannerView, RouteResult};

/// Query for listing or searching stations.
#[derive(Debug, Default, Deserialize)]
pub struct StationSearchRequest {
    /// Substring of the station name or district
    pub q: Option<String>,

    /// Restrict to one line
    pub line: Option<u16>,
}

/// A station in responses.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: u32,
    pub name: String,
    pub line: u16,
    pub district: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub hours: Option<String>,
}

impl StationResult {
    pub fn from_station(station: &Station) -> Self {
        let coordinates = station.coordinates();
        Self {
            id: station.id().0,
            name: station.name().to_string(),
            line: station.line().0,
            district: station.district().to_string(),
            latitude: coordinates.map(|c| c.latitude),
            longitude: coordinates.map(|c| c.longitude),
            hours: station.hours().map(str::to_string),
        }
    }
}

/// Response listing stations in line order.
#[derive(Debug, Serialize)]
pub struct StationListResponse {
    pub stations: Vec<StationResult>,
}

/// Request to set the origin or destination.
#[derive(Debug, Deserialize)]
pub struct SelectStationRequest {
    /// Station to select, or null to clear
    pub station_id: Option<u32>,
}

/// A step of a computed route.
#[derive(Debug, Serialize)]
pub struct StepResult {
    pub station_name: String,

    /// "first", "intermediate" or "last"
    pub position: &'static str,
}

/// Current selection and planning outcome.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub origin: Option<StationResult>,
    pub destination: Option<StationResult>,

    /// Planner state: unselected, invalid, loading, not_found,
    /// line_mismatch or computed
    pub state: &'static str,

    pub steps: Vec<StepResult>,
    pub estimated_minutes: u32,
    pub error: Option<String>,
}

impl RouteResponse {
    pub fn from_view(view: &PlannerView) -> Self {
        let steps = match &view.result {
            RouteResult::Computed(route) => route
                .positioned_steps()
                .map(|(position, step)| StepResult {
                    station_name: step.station_name.clone(),
                    position: position.as_str(),
                })
                .collect(),
            RouteResult::Unselected | RouteResult::Failed(_) => Vec::new(),
        };

        Self {
            origin: view.selection.origin().map(StationResult::from_station),
            destination: view.selection.destination().map(StationResult::from_station),
            state: view.result.state_name(),
            steps,
            estimated_minutes: view.result.estimated_minutes(),
            error: view.result.error().map(|e| e.to_string()),
        }
    }
}

/// An alert in responses.
#[derive(Debug, Serialize)]
pub struct AlertResult {
    pub id: u32,
    pub title: String,
    pub message: String,
    pub severity: &'static str,
}

impl AlertResult {
    pub fn from_alert(alert: &Alert) -> Self {
        Self {
            id: alert.id,
            title: alert.title.clone(),
            message: alert.message.clone(),
            severity: alert.severity.as_str(),
        }
    }
}

/// Alert feed state.
#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    /// "loading", "loaded" or "failed"
    pub status: &'static str,
    pub alerts: Vec<AlertResult>,
    pub fetched_at: Option<String>,
    pub error: Option<String>,
}

impl AlertsResponse {
    pub fn from_state(state: &AlertsState) -> Self {
        match state {
            AlertsState::Loading => Self {
                status: "loading",
                alerts: Vec::new(),
                fetched_at: None,
                error: None,
            },
            AlertsState::Loaded { alerts, fetched_at } => Self {
                status: "loaded",
                alerts: alerts.iter().map(AlertResult::from_alert).collect(),
                fetched_at: Some(fetched_at.to_rfc3339()),
                error: None,
            },
            AlertsState::Failed { message } => Self {
                status: "failed",
                alerts: Vec::new(),
                fetched_at: None,
                error: Some(message.clone()),
            },
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

//! Route selection and route result types.

use crate::domain::Station;

/// A station traversed by a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteStep {
    pub station_name: String,
}

impl From<&Station> for RouteStep {
    fn from(station: &Station) -> Self {
        Self {
            station_name: station.name().to_string(),
        }
    }
}

/// Where a step sits within its route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPosition {
    First,
    Intermediate,
    Last,
}

impl StepPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepPosition::First => "first",
            StepPosition::Intermediate => "intermediate",
            StepPosition::Last => "last",
        }
    }
}

/// A computed route: at least two steps, origin first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    steps: Vec<RouteStep>,
    estimated_minutes: u32,
}

impl Route {
    pub(super) fn new(steps: Vec<RouteStep>, estimated_minutes: u32) -> Self {
        Self {
            steps,
            estimated_minutes,
        }
    }

    pub fn steps(&self) -> &[RouteStep] {
        &self.steps
    }

    pub fn estimated_minutes(&self) -> u32 {
        self.estimated_minutes
    }

    /// Number of station-to-station hops.
    pub fn hops(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Steps paired with their position, for rendering.
    pub fn positioned_steps(&self) -> impl Iterator<Item = (StepPosition, &RouteStep)> {
        let last = self.steps.len().saturating_sub(1);
        self.steps.iter().enumerate().map(move |(idx, step)| {
            let position = if idx == 0 {
                StepPosition::First
            } else if idx == last {
                StepPosition::Last
            } else {
                StepPosition::Intermediate
            };
            (position, step)
        })
    }
}

/// Why no route could be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Origin and destination are the same station
    #[error("origin and destination must differ")]
    SelectionInvalid,

    /// The catalog has no stations yet (or failed to load)
    #[error("stations still loading")]
    CatalogNotReady,

    /// A selected station is not in the current catalog
    #[error("selected station no longer available")]
    StationUnavailable,

    /// Origin and destination are on different lines
    #[error("origin and destination are on different lines")]
    LineMismatch,
}

/// Outcome of planning for the current selection.
///
/// Errors only ever accompany an empty step list, and a computed route
/// never carries an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RouteResult {
    /// Origin or destination not chosen yet.
    #[default]
    Unselected,
    /// Planning failed; the error explains why.
    Failed(RouteError),
    /// A route from origin to destination.
    Computed(Route),
}

impl RouteResult {
    /// Steps to render; empty unless a route was computed.
    pub fn steps(&self) -> &[RouteStep] {
        match self {
            RouteResult::Computed(route) => route.steps(),
            RouteResult::Unselected | RouteResult::Failed(_) => &[],
        }
    }

    /// Estimated duration in minutes; zero unless a route was computed.
    pub fn estimated_minutes(&self) -> u32 {
        match self {
            RouteResult::Computed(route) => route.estimated_minutes(),
            RouteResult::Unselected | RouteResult::Failed(_) => 0,
        }
    }

    pub fn error(&self) -> Option<RouteError> {
        match self {
            RouteResult::Failed(error) => Some(*error),
            RouteResult::Unselected | RouteResult::Computed(_) => None,
        }
    }

    /// Short machine-readable name of the planner state.
    pub fn state_name(&self) -> &'static str {
        match self {
            RouteResult::Unselected => "unselected",
            RouteResult::Computed(_) => "computed",
            RouteResult::Failed(RouteError::SelectionInvalid) => "invalid",
            RouteResult::Failed(RouteError::CatalogNotReady) => "loading",
            RouteResult::Failed(RouteError::StationUnavailable) => "not_found",
            RouteResult::Failed(RouteError::LineMismatch) => "line_mismatch",
        }
    }
}

/// The user's chosen origin and destination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSelection {
    origin: Option<Station>,
    destination: Option<Station>,
}

impl RouteSelection {
    pub fn origin(&self) -> Option<&Station> {
        self.origin.as_ref()
    }

    pub fn destination(&self) -> Option<&Station> {
        self.destination.as_ref()
    }

    pub(super) fn set_origin(&mut self, station: Option<Station>) {
        self.origin = station;
    }

    pub(super) fn set_destination(&mut self, station: Option<Station>) {
        self.destination = station;
    }

    pub(super) fn swap(&mut self) {
        std::mem::swap(&mut self.origin, &mut self.destination);
    }
}

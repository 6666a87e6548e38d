//! Route construction over a line-ordered station snapshot.
//!
//! A route is the contiguous run of stations between origin and
//! destination in catalog order, reversed when the origin comes later in
//! the list, so that it always starts at the origin.

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::Station;
use crate::stations::{CatalogUpdate, Snapshot};

use super::config::PlannerConfig;
use super::route::{Route, RouteError, RouteResult, RouteSelection, RouteStep};

/// Plan a route for `selection` against `snapshot`.
///
/// Checks run in a fixed order: missing selection, identical stations,
/// empty catalog, stations absent from the catalog, then (optionally)
/// different lines.
pub fn plan_route(
    selection: &RouteSelection,
    snapshot: &Snapshot,
    config: &PlannerConfig,
) -> RouteResult {
    let (Some(origin), Some(destination)) = (selection.origin(), selection.destination()) else {
        return RouteResult::Unselected;
    };

    if origin.id() == destination.id() {
        return RouteResult::Failed(RouteError::SelectionInvalid);
    }

    if snapshot.is_empty() {
        return RouteResult::Failed(RouteError::CatalogNotReady);
    }

    let (Some(from), Some(to)) = (
        snapshot.position(origin.id()),
        snapshot.position(destination.id()),
    ) else {
        return RouteResult::Failed(RouteError::StationUnavailable);
    };

    let stations = snapshot.stations();

    // Compare the catalog's current records, not the possibly stale selection
    if config.require_same_line && stations[from].line() != stations[to].line() {
        return RouteResult::Failed(RouteError::LineMismatch);
    }

    let steps: Vec<RouteStep> = if from <= to {
        stations[from..=to].iter().map(RouteStep::from).collect()
    } else {
        stations[to..=from].iter().rev().map(RouteStep::from).collect()
    };

    let hops = u32::try_from(steps.len() - 1).unwrap_or(u32::MAX);
    let minutes = hops.saturating_mul(config.minutes_per_hop);

    RouteResult::Computed(Route::new(steps, minutes))
}

/// Holds the route selection and keeps its result current.
///
/// Every selection change and every catalog update triggers a full
/// recompute. The latest result is published on a watch channel, so
/// subscribers see the current value on subscribe and each change after.
///
/// Not meant for concurrent mutation: give it a single owner (see
/// [`spawn_planner`](super::spawn_planner)).
#[derive(Debug)]
pub struct RoutePlanner {
    config: PlannerConfig,
    selection: RouteSelection,
    snapshot: Snapshot,
    results: watch::Sender<RouteResult>,
}

impl RoutePlanner {
    /// Create a planner with no selection and an empty snapshot.
    pub fn new(config: PlannerConfig) -> Self {
        let (results, _) = watch::channel(RouteResult::Unselected);
        Self {
            config,
            selection: RouteSelection::default(),
            snapshot: Snapshot::default(),
            results,
        }
    }

    pub fn select_origin(&mut self, station: Option<Station>) -> RouteResult {
        self.selection.set_origin(station);
        self.recompute()
    }

    pub fn select_destination(&mut self, station: Option<Station>) -> RouteResult {
        self.selection.set_destination(station);
        self.recompute()
    }

    /// Exchange origin and destination.
    pub fn swap(&mut self) -> RouteResult {
        self.selection.swap();
        self.recompute()
    }

    /// Replace the cached snapshot and re-validate the selection against it.
    ///
    /// A storage failure is treated as an empty catalog.
    pub fn apply_catalog(&mut self, update: CatalogUpdate) -> RouteResult {
        self.snapshot = match update {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "catalog unavailable, treating as loading");
                Snapshot::default()
            }
        };
        self.recompute()
    }

    /// Recompute and publish the result for the current state.
    pub fn recompute(&mut self) -> RouteResult {
        let result = plan_route(&self.selection, &self.snapshot, &self.config);
        debug!(
            state = result.state_name(),
            steps = result.steps().len(),
            "route recomputed"
        );

        self.results.send_if_modified(|current| {
            if *current == result {
                false
            } else {
                *current = result.clone();
                true
            }
        });

        result
    }

    /// The latest result.
    pub fn result(&self) -> RouteResult {
        self.results.borrow().clone()
    }

    pub fn selection(&self) -> &RouteSelection {
        &self.selection
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Subscribe to result changes.
    pub fn subscribe(&self) -> watch::Receiver<RouteResult> {
        self.results.subscribe()
    }
}

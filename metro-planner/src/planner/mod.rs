//! Route planner.
//!
//! Answers "which stations do I pass between here and there, and how long
//! will it take?" for a single line-ordered station catalog. The planner
//! never fails: every problem with the selection becomes a
//! [`RouteResult::Failed`] carrying the reason.

mod config;
mod plan;
mod route;
mod service;


pub use config::{DEFAULT_MINUTES_PER_HOP, PlannerConfig};
pub use plan::{RoutePlanner, plan_route};
pub use route::{Route, RouteError, RouteResult, RouteSelection, RouteStep, StepPosition};
pub use service::{PlannerError, PlannerHandle, PlannerView, spawn_planner};

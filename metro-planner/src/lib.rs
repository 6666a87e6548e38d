//! Metro route planner server.
//!
//! Lists metro stations, relays service alerts and plans routes between
//! two stations on a line-ordered station catalog.

pub mod alerts;
pub mod config;
pub mod domain;
pub mod planner;
pub mod stations;
pub mod web;

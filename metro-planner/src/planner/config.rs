//! Route planner configuration.

/// Default travel time between two adjacent stations (minutes).
pub const DEFAULT_MINUTES_PER_HOP: u32 = 3;

/// Configuration parameters for route planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Estimated minutes per hop between adjacent stations.
    pub minutes_per_hop: u32,

    /// Reject pairs whose stations are on different lines.
    /// When off, the catalog is treated as one ordered sequence.
    pub require_same_line: bool,
}

impl PlannerConfig {
    /// Create a configuration with the given hop time.
    pub fn new(minutes_per_hop: u32) -> Self {
        Self {
            minutes_per_hop,
            require_same_line: false,
        }
    }

    /// Enable or disable the same-line check.
    pub fn with_same_line(mut self, require: bool) -> Self {
        self.require_same_line = require;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MINUTES_PER_HOP)
    }
}

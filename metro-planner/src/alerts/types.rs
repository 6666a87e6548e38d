//! Alert records as served by the alerts endpoint.

use serde::{Deserialize, Serialize};

/// How serious an alert is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertSeverity {
    #[serde(rename = "INFO")]
    Info,
    #[serde(rename = "ADVERTENCIA")]
    Warning,
    #[serde(rename = "PELIGRO")]
    Danger,
    #[default]
    #[serde(other)]
    Unknown,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Danger => "danger",
            AlertSeverity::Unknown => "unknown",
        }
    }
}

/// A service alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: u32,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(rename = "tipo", default)]
    pub severity: AlertSeverity,
}

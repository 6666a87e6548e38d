//! Alerts endpoint client.

use std::future::Future;

use tracing::debug;

use super::error::AlertError;
use super::types::Alert;

/// Default base URL of the alerts API.
pub const DEFAULT_BASE_URL: &str =
    "https://my-json-server.typicode.com/luistoledolafuente/fake-metro-api";

/// Something that can produce the current list of alerts.
///
/// Lets the alert feed run against the HTTP client or a test double.
pub trait AlertSource: Send + Sync {
    fn fetch_alerts(&self) -> impl Future<Output = Result<Vec<Alert>, AlertError>> + Send;
}

/// Configuration for the alert client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AlertClientConfig {
    /// Create a config pointing at the default endpoint.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for AlertClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the alerts API.
#[derive(Debug, Clone)]
pub struct AlertClient {
    http: reqwest::Client,
    base_url: String,
}

impl AlertClient {
    /// Create a new alert client.
    pub fn new(config: AlertClientConfig) -> Result<Self, AlertError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// URL of the alerts listing.
    pub fn endpoint(&self) -> String {
        format!("{}/alertas", self.base_url.trim_end_matches('/'))
    }

    /// Fetch all current alerts.
    pub async fn fetch_all(&self) -> Result<Vec<Alert>, AlertError> {
        let url = self.endpoint();
        debug!(%url, "fetching alerts");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AlertError::HttpStatus {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| AlertError::Unexpected {
            message: format!("invalid alerts payload: {e}"),
        })
    }
}

impl AlertSource for AlertClient {
    fn fetch_alerts(&self) -> impl Future<Output = Result<Vec<Alert>, AlertError>> + Send {
        self.fetch_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = AlertClientConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builder() {
        let config = AlertClientConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let config = AlertClientConfig::new().with_base_url("http://localhost:8080/");
        let client = AlertClient::new(config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/alertas");

        let client = AlertClient::new(AlertClientConfig::new()).unwrap();
        assert_eq!(
            client.endpoint(),
            format!("{DEFAULT_BASE_URL}/alertas")
        );
    }

    use crate::alerts::AlertSeverity;
    use crate::alerts::test_server::{AlertServer, TWO_ALERTS, closed_port};
    use axum::http::StatusCode;

    fn client_for(base_url: &str) -> AlertClient {
        AlertClient::new(AlertClientConfig::new().with_base_url(base_url).with_timeout(5)).unwrap()
    }

    #[tokio::test]
    async fn fetch_decodes_alerts() {
        let server = AlertServer::start(vec![(StatusCode::OK, TWO_ALERTS)]).await;

        let alerts = client_for(&server.base_url).fetch_all().await.unwrap();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].title, "Horario");
        assert_eq!(alerts[0].severity, AlertSeverity::Info);
        assert_eq!(alerts[1].message, "Estación Gamarra cerrada");
        assert_eq!(alerts[1].severity, AlertSeverity::Danger);
    }

    #[tokio::test]
    async fn non_json_body_is_unexpected() {
        let server = AlertServer::start(vec![(StatusCode::OK, "<html>mantenimiento</html>")]).await;

        let err = client_for(&server.base_url).fetch_all().await.unwrap_err();
        assert!(matches!(err, AlertError::Unexpected { .. }), "{err:?}");
        assert!(err.user_message().starts_with("unexpected error"));
    }

    #[tokio::test]
    async fn error_status_is_http_status() {
        let server =
            AlertServer::start(vec![(StatusCode::INTERNAL_SERVER_ERROR, "down")]).await;

        let err = client_for(&server.base_url).fetch_all().await.unwrap_err();
        assert!(
            matches!(&err, AlertError::HttpStatus { status: 500, message } if message == "down"),
            "{err:?}"
        );
        assert_eq!(err.user_message(), "alerts unavailable (HTTP 500)");
    }

    #[tokio::test]
    async fn refused_connection_is_network() {
        let base_url = closed_port().await;

        let err = client_for(&base_url).fetch_all().await.unwrap_err();
        assert!(matches!(err, AlertError::Network(_)), "{err:?}");
        assert_eq!(err.user_message(), "network error, check your connection");
    }
}

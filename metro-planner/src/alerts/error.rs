//! Alert client error types.

/// Classified failure of an alert fetch.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    /// The request never got a response (connection, DNS, timeout)
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("HTTP error {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// Anything else: undecodable body, bad client configuration
    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

impl AlertError {
    /// Short explanation suitable for showing to a rider.
    pub fn user_message(&self) -> String {
        match self {
            AlertError::Network(_) => "network error, check your connection".to_string(),
            AlertError::HttpStatus { status, .. } => format!("alerts unavailable (HTTP {status})"),
            AlertError::Unexpected { message } => format!("unexpected error: {message}"),
        }
    }
}

impl From<reqwest::Error> for AlertError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() || err.is_builder() {
            AlertError::Unexpected {
                message: err.to_string(),
            }
        } else {
            AlertError::Network(err)
        }
    }
}

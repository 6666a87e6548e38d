//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from storage and network errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Station records must carry a display name
    #[error("station name must not be empty")]
    EmptyStationName,

    /// Latitude or longitude out of range
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(&'static str),
}

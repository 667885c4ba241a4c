//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from API/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Route has no legs
    #[error("route must have at least one leg")]
    EmptyRoute,

    /// Coordinate is not a finite lat/lon within range
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

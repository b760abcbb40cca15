//! Domain error types.
//!
//! These errors represent validation failures when building trips, legs and
//! paths handed to the optimizer by the routing pipeline. Once a value has
//! been constructed the optimizer trusts it; it never returns these errors
//! from the search itself.

use super::StopIndex;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A trip schedule does not have one time per pattern stop
    #[error("trip {trip} has {actual} {kind} times, pattern has {expected} stops")]
    ScheduleLength {
        trip: String,
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Times on a trip go backwards
    #[error("trip {trip} has decreasing times at stop position {position}")]
    DecreasingTimes { trip: String, position: usize },

    /// A trip pattern needs at least two stops
    #[error("trip pattern {0} must have at least two stops")]
    PatternTooShort(String),

    /// Stop position is out of bounds for the trip
    #[error("invalid stop position {position}: trip has {number_of_stops} stops")]
    InvalidStopPosition {
        position: usize,
        number_of_stops: usize,
    },

    /// Invalid leg construction (e.g., alight before board)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// Legs are not in the order access, transit/transfer..., egress
    #[error("invalid path: {0}")]
    InvalidPath(&'static str),

    /// Consecutive legs don't meet at the same stop
    #[error("legs do not connect: leg ends at stop {0}, next leg starts at stop {1}")]
    LegsNotConnected(StopIndex, StopIndex),

    /// Path has no legs
    #[error("path must have at least one leg")]
    EmptyPath,
}

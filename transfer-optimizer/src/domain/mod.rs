//! Domain types for transfer optimization.
//!
//! This module contains the transit model the optimizer works on: stops,
//! trips, transfers between trips and the legs of a path. Types enforce
//! their invariants at construction time, so code that receives them can
//! trust their validity.

mod error;
mod leg;
mod path;
mod stop;
mod time;
mod transfer;
mod trip;
mod trip_stop_time;

pub use error::DomainError;
pub use leg::{AccessEgress, AccessLeg, EgressLeg, PathLeg, TransferLeg, TransitLeg};
pub use path::{OptimizedPath, Path};
pub use stop::{StopIndex, StopTime};
pub use time::{TimeError, format_duration, format_time, parse_time, parse_time_sequence};
pub use transfer::{Transfer, TransferConstraint, TransferPriority, TripToTripTransfer};
pub use trip::{Trip, TripPattern};
pub use trip_stop_time::TripStopTime;

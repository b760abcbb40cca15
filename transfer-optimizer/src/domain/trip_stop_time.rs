//! Arrival and departure events bound to a trip.

use std::sync::Arc;

use super::time::format_time;
use super::{StopIndex, StopTime, Trip};

/// An arrival or departure of a specific trip at a specific stop position.
///
/// The stop and time are looked up in the trip schedule, so the event stays
/// consistent with the trip it belongs to.
///
/// # Invariants
///
/// - `stop_position < trip.number_of_stops()`
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use transfer_optimizer::domain::{StopIndex, Trip, TripPattern, TripStopTime};
///
/// let pattern = Arc::new(TripPattern::new("L1", vec![StopIndex(4), StopIndex(5)]).unwrap());
/// let trip = Arc::new(Trip::from_stop_times("T1", pattern, vec![100, 200]).unwrap());
///
/// let alight = TripStopTime::arrival_at(&trip, 200, StopIndex(5));
/// assert_eq!(alight.stop_position(), 1);
/// assert!(alight.is_arrival());
/// assert_eq!(alight.time(), 200);
/// ```
#[derive(Debug, Clone)]
pub struct TripStopTime {
    trip: Arc<Trip>,
    stop_position: usize,
    departure: bool,
}

impl TripStopTime {
    /// Arrival of `trip` at `stop_position`.
    ///
    /// # Panics
    ///
    /// Panics if `stop_position` is out of range for the trip.
    pub fn arrival(trip: &Arc<Trip>, stop_position: usize) -> Self {
        Self::new(trip, stop_position, false)
    }

    /// Departure of `trip` at `stop_position`.
    ///
    /// # Panics
    ///
    /// Panics if `stop_position` is out of range for the trip.
    pub fn departure(trip: &Arc<Trip>, stop_position: usize) -> Self {
        Self::new(trip, stop_position, true)
    }

    /// Arrival of `trip` at `stop` at `time`.
    ///
    /// # Panics
    ///
    /// Panics if the trip does not arrive at `stop` at `time`.
    pub fn arrival_at(trip: &Arc<Trip>, time: i32, stop: StopIndex) -> Self {
        let position = trip
            .find_arrival_stop_position(time, stop)
            .unwrap_or_else(|| panic!("trip {trip} does not arrive at stop {stop} at {time}"));
        Self::arrival(trip, position)
    }

    /// Departure of `trip` from `stop` at `time`.
    ///
    /// # Panics
    ///
    /// Panics if the trip does not depart `stop` at `time`.
    pub fn departure_at(trip: &Arc<Trip>, time: i32, stop: StopIndex) -> Self {
        let position = trip
            .find_departure_stop_position(time, stop)
            .unwrap_or_else(|| panic!("trip {trip} does not depart stop {stop} at {time}"));
        Self::departure(trip, position)
    }

    fn new(trip: &Arc<Trip>, stop_position: usize, departure: bool) -> Self {
        assert!(
            stop_position < trip.number_of_stops(),
            "stop position {stop_position} out of range for trip {trip} with {} stops",
            trip.number_of_stops()
        );
        Self {
            trip: Arc::clone(trip),
            stop_position,
            departure,
        }
    }

    pub fn trip(&self) -> &Arc<Trip> {
        &self.trip
    }

    pub fn stop_position(&self) -> usize {
        self.stop_position
    }

    pub fn stop(&self) -> StopIndex {
        self.trip.stop(self.stop_position)
    }

    pub fn time(&self) -> i32 {
        if self.departure {
            self.trip.departure(self.stop_position)
        } else {
            self.trip.arrival(self.stop_position)
        }
    }

    pub fn stop_time(&self) -> StopTime {
        StopTime::new(self.stop(), self.time())
    }

    pub fn is_arrival(&self) -> bool {
        !self.departure
    }

    pub fn is_departure(&self) -> bool {
        self.departure
    }
}

impl PartialEq for TripStopTime {
    fn eq(&self, other: &Self) -> bool {
        // Same trip by reference, same event
        Arc::ptr_eq(&self.trip, &other.trip)
            && self.stop_position == other.stop_position
            && self.departure == other.departure
    }
}

impl Eq for TripStopTime {}

impl std::fmt::Display for TripStopTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} {} {}]",
            self.stop(),
            format_time(self.time()),
            self.trip.pattern().label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TripPattern;

    fn trip() -> Arc<Trip> {
        let pattern = Arc::new(
            TripPattern::new("L1", vec![StopIndex(1), StopIndex(2), StopIndex(3)]).unwrap(),
        );
        Arc::new(
            Trip::new("T1", pattern, vec![100, 200, 300], vec![100, 210, 300]).unwrap(),
        )
    }

    #[test]
    fn derived_stop_and_time() {
        let trip = trip();
        let arr = TripStopTime::arrival(&trip, 1);
        let dep = TripStopTime::departure(&trip, 1);

        assert_eq!(arr.stop(), StopIndex(2));
        assert_eq!(arr.time(), 200);
        assert_eq!(dep.time(), 210);
        assert_eq!(dep.stop_time(), StopTime::new(StopIndex(2), 210));
        assert!(dep.is_departure());
        assert!(!dep.is_arrival());
    }

    #[test]
    fn resolve_by_stop_and_time() {
        let trip = trip();
        assert_eq!(
            TripStopTime::departure_at(&trip, 210, StopIndex(2)),
            TripStopTime::departure(&trip, 1)
        );
        assert_eq!(
            TripStopTime::arrival_at(&trip, 300, StopIndex(3)),
            TripStopTime::arrival(&trip, 2)
        );
    }

    #[test]
    fn equality_is_by_trip_identity() {
        let a = trip();
        let b = trip();
        assert_ne!(TripStopTime::arrival(&a, 1), TripStopTime::arrival(&b, 1));
        assert_ne!(TripStopTime::arrival(&a, 1), TripStopTime::departure(&a, 1));
        assert_eq!(TripStopTime::arrival(&a, 1), TripStopTime::arrival(&a, 1));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn position_out_of_range_panics() {
        TripStopTime::arrival(&trip(), 3);
    }

    #[test]
    #[should_panic(expected = "does not depart")]
    fn unmatched_departure_panics() {
        TripStopTime::departure_at(&trip(), 200, StopIndex(2));
    }

    #[test]
    fn display() {
        let trip = trip();
        assert_eq!(
            TripStopTime::departure(&trip, 0).to_string(),
            "[1 00:01:40 L1]"
        );
    }
}

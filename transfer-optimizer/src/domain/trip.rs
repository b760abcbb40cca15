//! Trip schedules.
//!
//! A `TripPattern` is the ordered list of stops a group of trips serve. A
//! `Trip` runs one pattern with an arrival and departure time per stop
//! position. Trips are shared through `Arc` and never change once built, so
//! every leg, stop-time and transfer can refer to them cheaply.

use std::sync::Arc;

use super::{DomainError, StopIndex};

/// The ordered stops served by a group of trips.
///
/// # Invariants
///
/// - At least two stops
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripPattern {
    label: String,
    stops: Vec<StopIndex>,
    slack_index: usize,
    transit_reluctance_index: usize,
}

impl TripPattern {
    /// Creates a pattern serving `stops` in order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the pattern has fewer than two stops.
    pub fn new(label: impl Into<String>, stops: Vec<StopIndex>) -> Result<Self, DomainError> {
        let label = label.into();
        if stops.len() < 2 {
            return Err(DomainError::PatternTooShort(label));
        }
        Ok(Self {
            label,
            stops,
            slack_index: 0,
            transit_reluctance_index: 0,
        })
    }

    /// Sets the index used to look up board/alight slack for this pattern.
    pub fn with_slack_index(mut self, index: usize) -> Self {
        self.slack_index = index;
        self
    }

    /// Sets the index used to look up the transit reluctance for this pattern.
    pub fn with_transit_reluctance_index(mut self, index: usize) -> Self {
        self.transit_reluctance_index = index;
        self
    }

    /// Debug label, e.g. the route short name.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the stop at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range.
    pub fn stop_index(&self, position: usize) -> StopIndex {
        self.stops[position]
    }

    pub fn number_of_stops(&self) -> usize {
        self.stops.len()
    }

    pub fn slack_index(&self) -> usize {
        self.slack_index
    }

    pub fn transit_reluctance_index(&self) -> usize {
        self.transit_reluctance_index
    }
}

/// One scheduled run of a pattern.
///
/// # Invariants
///
/// - One arrival and one departure time per pattern stop
/// - `arrival(i) <= departure(i) <= arrival(i + 1)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    id: String,
    pattern: Arc<TripPattern>,
    arrivals: Vec<i32>,
    departures: Vec<i32>,
}

impl Trip {
    /// Creates a trip, validating the schedule against the pattern.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the number of times differs from the number of
    /// pattern stops, or if times decrease along the trip.
    pub fn new(
        id: impl Into<String>,
        pattern: Arc<TripPattern>,
        arrivals: Vec<i32>,
        departures: Vec<i32>,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        let expected = pattern.number_of_stops();

        for (kind, times) in [("arrival", &arrivals), ("departure", &departures)] {
            if times.len() != expected {
                return Err(DomainError::ScheduleLength {
                    trip: id,
                    kind,
                    expected,
                    actual: times.len(),
                });
            }
        }

        for position in 0..expected {
            let dwell_ok = arrivals[position] <= departures[position];
            let run_ok = position + 1 == expected || departures[position] <= arrivals[position + 1];
            if !dwell_ok || !run_ok {
                return Err(DomainError::DecreasingTimes { trip: id, position });
            }
        }

        Ok(Self {
            id,
            pattern,
            arrivals,
            departures,
        })
    }

    /// Creates a trip that arrives and departs at the same time at every stop.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use transfer_optimizer::domain::{StopIndex, Trip, TripPattern, parse_time_sequence};
    ///
    /// let pattern = Arc::new(TripPattern::new("L1", vec![StopIndex(0), StopIndex(1)]).unwrap());
    /// let times = parse_time_sequence("10:00 10:20").unwrap();
    /// let trip = Trip::from_stop_times("T1", pattern, times).unwrap();
    ///
    /// assert_eq!(trip.departure(0), 36_000);
    /// assert_eq!(trip.arrival(1), 37_200);
    /// ```
    pub fn from_stop_times(
        id: impl Into<String>,
        pattern: Arc<TripPattern>,
        times: Vec<i32>,
    ) -> Result<Self, DomainError> {
        Self::new(id, pattern, times.clone(), times)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pattern(&self) -> &Arc<TripPattern> {
        &self.pattern
    }

    pub fn number_of_stops(&self) -> usize {
        self.pattern.number_of_stops()
    }

    /// Stop served at `position`. Panics if out of range.
    pub fn stop(&self, position: usize) -> StopIndex {
        self.pattern.stop_index(position)
    }

    /// Arrival time at `position`. Panics if out of range.
    pub fn arrival(&self, position: usize) -> i32 {
        self.arrivals[position]
    }

    /// Departure time at `position`. Panics if out of range.
    pub fn departure(&self, position: usize) -> i32 {
        self.departures[position]
    }

    /// Finds the first stop position where the trip arrives at `stop` at `time`.
    ///
    /// The first stop position is never an arrival, so the search starts at 1.
    pub fn find_arrival_stop_position(&self, time: i32, stop: StopIndex) -> Option<usize> {
        (1..self.number_of_stops())
            .find(|&pos| self.arrivals[pos] == time && self.stop(pos) == stop)
    }

    /// Finds the first stop position where the trip departs `stop` at `time`.
    ///
    /// The last stop position is never a departure, so it is not searched.
    pub fn find_departure_stop_position(&self, time: i32, stop: StopIndex) -> Option<usize> {
        (0..self.number_of_stops() - 1)
            .find(|&pos| self.departures[pos] == time && self.stop(pos) == stop)
    }
}

impl std::fmt::Display for Trip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.pattern.label(), self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_time_sequence;

    fn pattern(stops: &[usize]) -> Arc<TripPattern> {
        Arc::new(TripPattern::new("L1", stops.iter().copied().map(StopIndex).collect()).unwrap())
    }

    #[test]
    fn pattern_needs_two_stops() {
        assert!(matches!(
            TripPattern::new("X", vec![StopIndex(1)]),
            Err(DomainError::PatternTooShort(_))
        ));
        let p = TripPattern::new("X", vec![StopIndex(1), StopIndex(2)]).unwrap();
        assert_eq!(p.number_of_stops(), 2);
        assert_eq!(p.slack_index(), 0);
        assert_eq!(p.with_slack_index(3).slack_index(), 3);
    }

    #[test]
    fn schedule_length_must_match_pattern() {
        let err = Trip::from_stop_times("T1", pattern(&[0, 1, 2]), vec![0, 10]).unwrap_err();
        assert_eq!(
            err,
            DomainError::ScheduleLength {
                trip: "T1".into(),
                kind: "arrival",
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn times_must_not_decrease() {
        let err = Trip::from_stop_times("T1", pattern(&[0, 1, 2]), vec![0, 20, 10]).unwrap_err();
        assert_eq!(
            err,
            DomainError::DecreasingTimes {
                trip: "T1".into(),
                position: 1
            }
        );

        // Dwell: departure before arrival at the same stop
        let err = Trip::new("T2", pattern(&[0, 1]), vec![0, 20], vec![0, 10]).unwrap_err();
        assert!(matches!(err, DomainError::DecreasingTimes { position: 1, .. }));
    }

    #[test]
    fn find_stop_positions() {
        // Loop: stop 1 served twice
        let times = parse_time_sequence("10:00 10:05 10:10 10:15").unwrap();
        let trip = Trip::from_stop_times("T1", pattern(&[1, 2, 3, 1]), times).unwrap();

        assert_eq!(trip.find_departure_stop_position(36_000, StopIndex(1)), Some(0));
        assert_eq!(trip.find_arrival_stop_position(36_900, StopIndex(1)), Some(3));
        assert_eq!(trip.find_arrival_stop_position(36_000, StopIndex(1)), None);
        assert_eq!(trip.find_departure_stop_position(36_900, StopIndex(1)), None);
        assert_eq!(trip.find_arrival_stop_position(36_300, StopIndex(3)), None);
    }

    #[test]
    fn display_uses_pattern_label() {
        let trip = Trip::from_stop_times("T9", pattern(&[0, 1]), vec![0, 60]).unwrap();
        assert_eq!(trip.to_string(), "L1 T9");
    }
}

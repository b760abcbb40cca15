//! Fixtures shared by the unit tests.

use std::sync::Arc;

use tracing::dispatcher::DefaultGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::domain::{
    AccessEgress, StopIndex, Transfer, TransferConstraint, TransitLeg, Trip, TripPattern,
    TripStopTime, TripToTripTransfer, parse_time_sequence,
};
use crate::optimizer::{DefaultCostCalculator, DefaultSlackProvider, TailContext, TransferGenerator};

/// Logs to the test output for the lifetime of the guard. Honors `RUST_LOG`.
pub(crate) fn init_test_logger() -> DefaultGuard {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .with(env_filter)
        .set_default()
}

/// A trip visiting `stops` at `times` ("HH:MM" separated by spaces),
/// arriving and departing at the same time.
pub(crate) fn trip(label: &str, stops: &[usize], times: &str) -> Arc<Trip> {
    trip_from_times(label, stops, parse_time_sequence(times).unwrap())
}

pub(crate) fn trip_from_times(label: &str, stops: &[usize], times: Vec<i32>) -> Arc<Trip> {
    let stops = stops.iter().copied().map(StopIndex).collect();
    let pattern = TripPattern::new(label, stops).unwrap();
    Arc::new(Trip::from_stop_times(label, Arc::new(pattern), times).unwrap())
}

pub(crate) fn leg(trip: &Arc<Trip>, board_pos: usize, alight_pos: usize) -> TransitLeg {
    TransitLeg::new(Arc::clone(trip), board_pos, alight_pos).unwrap()
}

pub(crate) fn same_stop_transfer(
    from: &Arc<Trip>,
    from_pos: usize,
    to: &Arc<Trip>,
    to_pos: usize,
) -> TripToTripTransfer {
    TripToTripTransfer::new(
        TripStopTime::arrival(from, from_pos),
        TripStopTime::departure(to, to_pos),
        None,
        None,
    )
}

pub(crate) fn walk_transfer(
    from: &Arc<Trip>,
    from_pos: usize,
    to: &Arc<Trip>,
    to_pos: usize,
    duration: i32,
    cost: i32,
) -> TripToTripTransfer {
    TripToTripTransfer::new(
        TripStopTime::arrival(from, from_pos),
        TripStopTime::departure(to, to_pos),
        Some(Transfer::new(to.stop(to_pos), duration, cost)),
        None,
    )
}

pub(crate) fn access(stop: usize, duration: i32, cost: i32) -> AccessEgress {
    AccessEgress::new(StopIndex(stop), duration, cost)
}

pub(crate) fn egress(stop: usize, duration: i32, cost: i32) -> AccessEgress {
    AccessEgress::new(StopIndex(stop), duration, cost)
}

/// No slack; 60s board cost, 120s transfer cost, all reluctances 1.
pub(crate) fn context() -> TailContext {
    TailContext::new(
        Arc::new(DefaultSlackProvider::default()),
        Arc::new(DefaultCostCalculator::new(60, 120, 1.0, &[1.0])),
    )
}

/// Generates transfers from a list of street transfers.
///
/// Between two rides it offers every same-stop change and every listed walk
/// that reaches the next trip before it departs. Constraints attach to the
/// same-stop changes they are registered for.
#[derive(Default)]
pub(crate) struct SimpleTransferGenerator {
    walks: Vec<(StopIndex, Transfer)>,
    constraints: Vec<(String, String, StopIndex, TransferConstraint)>,
}

impl SimpleTransferGenerator {
    pub(crate) fn with_walk(mut self, from: usize, to: usize, duration: i32, cost: i32) -> Self {
        self.walks
            .push((StopIndex(from), Transfer::new(StopIndex(to), duration, cost)));
        self
    }

    pub(crate) fn with_constraint(
        mut self,
        from_trip: &str,
        to_trip: &str,
        stop: usize,
        constraint: TransferConstraint,
    ) -> Self {
        self.constraints.push((
            from_trip.to_string(),
            to_trip.to_string(),
            StopIndex(stop),
            constraint,
        ));
        self
    }

    fn constraint(&self, from: &Trip, to: &Trip, stop: StopIndex) -> Option<TransferConstraint> {
        self.constraints
            .iter()
            .find(|(f, t, s, _)| f == from.id() && t == to.id() && *s == stop)
            .map(|(_, _, _, c)| *c)
    }

    fn transfers_between(&self, from: &Arc<Trip>, to: &Arc<Trip>) -> Vec<TripToTripTransfer> {
        let mut result = Vec::new();
        for from_pos in 1..from.number_of_stops() {
            let (from_stop, arrival) = (from.stop(from_pos), from.arrival(from_pos));
            for to_pos in 0..to.number_of_stops() - 1 {
                let (to_stop, departure) = (to.stop(to_pos), to.departure(to_pos));

                let transfer = if from_stop == to_stop {
                    None
                } else {
                    match self
                        .walks
                        .iter()
                        .find(|(stop, walk)| *stop == from_stop && walk.to_stop == to_stop)
                    {
                        Some((_, walk)) => Some(*walk),
                        None => continue,
                    }
                };
                let walk_time = transfer.map_or(0, |t| t.duration_in_seconds);
                if arrival + walk_time > departure {
                    continue;
                }

                let constraint = transfer
                    .is_none()
                    .then(|| self.constraint(from, to, from_stop))
                    .flatten();
                result.push(TripToTripTransfer::new(
                    TripStopTime::arrival(from, from_pos),
                    TripStopTime::departure(to, to_pos),
                    transfer,
                    constraint,
                ));
            }
        }
        result
    }
}

impl TransferGenerator for SimpleTransferGenerator {
    fn find_all_possible_transfers(
        &self,
        transit_legs: &[TransitLeg],
    ) -> Vec<Vec<TripToTripTransfer>> {
        transit_legs
            .windows(2)
            .map(|pair| self.transfers_between(pair[0].trip(), pair[1].trip()))
            .collect()
    }
}

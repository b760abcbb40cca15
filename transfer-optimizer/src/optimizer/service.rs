//! Transfer point optimization for a single path.
//!
//! The rides of a path are fixed; only the points where the passenger
//! changes between them can move. The search walks the leg boundaries from
//! the egress back to the access. At each boundary every transfer candidate
//! is prepended to every tail it can connect to, and the tails are pruned
//! before the next boundary.

use std::sync::Arc;

use tracing::{debug, trace};

use super::selector::TransitPathLegSelector;
use super::{OptimizedPathTail, PathTailFilterFactory, TailContext};
use crate::domain::{
    OptimizedPath, Path, PathLeg, Transfer, TransitLeg, TripStopTime, TripToTripTransfer,
};

/// Finds the possible transfers between the rides of a path.
///
/// This abstraction allows the optimizer to be tested with mock data.
pub trait TransferGenerator: Send + Sync {
    /// Returns, for each pair of consecutive rides, every feasible transfer
    /// from the first to the second.
    ///
    /// The result has one list per pair, so one less than `transit_legs`.
    fn find_all_possible_transfers(
        &self,
        transit_legs: &[TransitLeg],
    ) -> Vec<Vec<TripToTripTransfer>>;
}

/// Finds the best transfer points for a path.
pub struct OptimizePathService {
    transfer_generator: Arc<dyn TransferGenerator>,
    filter_factory: Arc<dyn PathTailFilterFactory>,
}

impl OptimizePathService {
    pub fn new(
        transfer_generator: Arc<dyn TransferGenerator>,
        filter_factory: Arc<dyn PathTailFilterFactory>,
    ) -> Self {
        Self {
            transfer_generator,
            filter_factory,
        }
    }

    /// Returns the best paths riding the same trips as `path`.
    ///
    /// The result is empty if some pair of rides has no transfer candidates,
    /// or if no combination of candidates connects.
    ///
    /// # Panics
    ///
    /// Panics if the transfer generator returns the wrong number of lists.
    pub fn find_best_transit_path(
        &self,
        path: &Path,
        context: &Arc<TailContext>,
    ) -> Vec<OptimizedPath> {
        let transit_legs: Vec<TransitLeg> = path.transit_legs().cloned().collect();
        let mut possible_transfers = self
            .transfer_generator
            .find_all_possible_transfers(&transit_legs);

        assert_eq!(
            possible_transfers.len() + 1,
            transit_legs.len(),
            "transfer generator must return one list per pair of rides"
        );
        if possible_transfers.iter().any(Vec::is_empty) {
            debug!(path = %path, "No transfer candidates between some rides");
            return Vec::new();
        }
        for candidates in &mut possible_transfers {
            candidates.sort_by(|a, b| {
                b.to()
                    .stop_position()
                    .cmp(&a.to().stop_position())
                    .then_with(|| b.to().time().cmp(&a.to().time()))
            });
        }

        let filter = self.filter_factory.create_filter(path);
        let last = transit_legs.len() - 1;
        let mut tails = vec![
            OptimizedPathTail::new(Arc::clone(context), path.iteration_departure_time())
                .add_transit_tail(&transit_legs[last], &path.egress().egress),
        ];

        for i in (0..last).rev() {
            let earliest_alight_time = if i == 0 {
                path.access().to_time
            } else {
                possible_transfers[i - 1]
                    .iter()
                    .map(|tx| tx.to().time())
                    .min()
                    .unwrap_or(i32::MIN)
            };

            let mut selector = TransitPathLegSelector::new(filter.as_ref(), tails);
            let mut next_tails = Vec::new();
            for tx in &possible_transfers[i] {
                if tx.from().time() <= earliest_alight_time {
                    continue;
                }
                for tail in selector.next(tx.to().stop_position()) {
                    next_tails.push(
                        tail.mutate()
                            .add_transit_and_transfer_leg(&transit_legs[i], tx),
                    );
                }
            }

            trace!(
                boundary = i,
                candidates = possible_transfers[i].len(),
                tails = next_tails.len(),
                "Expanded transfer candidates"
            );
            if next_tails.is_empty() {
                debug!(path = %path, boundary = i, "No transfer candidate connects");
                return Vec::new();
            }
            tails = next_tails;
        }

        let first_board_pos = transit_legs[0].board_pos();
        let mut selector = TransitPathLegSelector::new(filter.as_ref(), tails);
        let completed: Vec<_> = selector
            .next(first_board_pos)
            .iter()
            .map(|tail| complete(tail.mutate(), path, first_board_pos))
            .collect();

        let best = filter.filter_final_result(completed);
        debug!(
            transfers = last,
            results = best.len(),
            "Optimized transfer points"
        );
        best.iter().map(OptimizedPathTail::build).collect()
    }
}

/// Boards the head ride where `path` boards its first ride and prepends the
/// access of `path`.
fn complete(mut tail: OptimizedPathTail, path: &Path, board_pos: usize) -> OptimizedPathTail {
    tail.change_head_boarding_position(board_pos);
    if let Some(walk) = path.access_transfer() {
        tail = tail.transfer(&walk.transfer, walk.from_stop);
    }
    tail.access(&path.access().access)
}

/// Costs `path` as it is, with the transfers it already uses.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use transfer_optimizer::domain::{AccessEgress, Path, StopIndex, TransitLeg, Trip, TripPattern};
/// use transfer_optimizer::optimizer::{rebuild_path, DefaultCostCalculator, DefaultSlackProvider, TailContext};
///
/// let pattern = Arc::new(TripPattern::new("L1", vec![StopIndex(0), StopIndex(1)]).unwrap());
/// let trip = Arc::new(Trip::from_stop_times("T1", pattern, vec![36_000, 36_600]).unwrap());
/// let path = Path::from_transit_legs(
///     36_000,
///     AccessEgress::new(StopIndex(0), 0, 0),
///     vec![TransitLeg::new(trip, 0, 1).unwrap()],
///     AccessEgress::new(StopIndex(1), 0, 0),
///     |_, _| None,
/// )
/// .unwrap();
///
/// let context = Arc::new(TailContext::new(
///     Arc::new(DefaultSlackProvider::default()),
///     Arc::new(DefaultCostCalculator::new(60, 120, 1.0, &[1.0])),
/// ));
/// let optimized = rebuild_path(&path, &context);
/// // board cost + 10 minutes riding
/// assert_eq!(optimized.generalized_cost(), 6_000 + 60_000);
/// ```
pub fn rebuild_path(path: &Path, context: &Arc<TailContext>) -> OptimizedPath {
    let rides: Vec<&TransitLeg> = path.transit_legs().collect();

    // Street transfer after each ride, if any
    let mut walks: Vec<Option<Transfer>> = vec![None; rides.len()];
    let mut ride = None;
    for leg in path.legs() {
        match leg {
            PathLeg::Transit(_) => ride = Some(ride.map_or(0, |i| i + 1)),
            PathLeg::Transfer(walk) => {
                if let Some(i) = ride {
                    walks[i] = Some(walk.transfer);
                }
            }
            _ => {}
        }
    }

    let last = rides.len() - 1;
    let mut tail = OptimizedPathTail::new(Arc::clone(context), path.iteration_departure_time())
        .add_transit_tail(rides[last], &path.egress().egress);

    for i in (0..last).rev() {
        let tx = TripToTripTransfer::new(
            TripStopTime::arrival(rides[i].trip(), rides[i].alight_pos()),
            TripStopTime::departure(rides[i + 1].trip(), rides[i + 1].board_pos()),
            walks[i],
            rides[i].constraint_after().copied(),
        );
        tail = tail.add_transit_and_transfer_leg(rides[i], &tx);
    }

    complete(tail, path, rides[0].board_pos()).build()
}

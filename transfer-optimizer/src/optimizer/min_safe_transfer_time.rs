//! Adaptive safe transfer time.
//!
//! How long a transfer must be before it stops being risky depends on the
//! journey: a two minute connection is fine on a half hour trip and reckless
//! on a ten hour one. The safe transfer time is a fixed share of the
//! shortest total transit time among the paths being optimized, clamped to a
//! sane range.

use std::sync::Arc;

use tracing::debug;

use super::SlackProvider;
use crate::domain::Path;

/// Lower bound of the safe transfer time, in seconds.
pub const MIN_SAFE_TRANSFER_TIME_LOWER_BOUND: i32 = 120;

/// Upper bound of the safe transfer time, in seconds.
pub const MIN_SAFE_TRANSFER_TIME_UPPER_BOUND: i32 = 2_400;

/// Safe transfer time as a percentage of the total transit time.
const P: f64 = 100.0 / 15.0;

/// Computes the min safe transfer time for a set of paths.
pub struct MinSafeTransferTimeCalculator {
    slack: Arc<dyn SlackProvider>,
}

impl MinSafeTransferTimeCalculator {
    pub fn new(slack: Arc<dyn SlackProvider>) -> Self {
        Self { slack }
    }

    /// Min safe transfer time in seconds for `paths`.
    ///
    /// The total transit time of a path is the sum of its ride durations plus
    /// the transit slack of each ride. The shortest total across all paths
    /// sets the safe time; the result is clamped to
    /// `[MIN_SAFE_TRANSFER_TIME_LOWER_BOUND, MIN_SAFE_TRANSFER_TIME_UPPER_BOUND]`.
    /// With no paths the upper bound is returned.
    pub fn min_safe_transfer_time(&self, paths: &[Path]) -> i32 {
        let Some(min_transit_time) = paths.iter().map(|p| self.total_transit_time(p)).min() else {
            return MIN_SAFE_TRANSFER_TIME_UPPER_BOUND;
        };

        let raw = (f64::from(min_transit_time) * P / 100.0).round() as i32;
        let safe_time = raw.clamp(
            MIN_SAFE_TRANSFER_TIME_LOWER_BOUND,
            MIN_SAFE_TRANSFER_TIME_UPPER_BOUND,
        );

        debug!(paths = paths.len(), min_transit_time, safe_time, "Computed min safe transfer time");
        safe_time
    }

    fn total_transit_time(&self, path: &Path) -> i32 {
        path.transit_legs()
            .map(|leg| {
                leg.duration() + self.slack.transit_slack(leg.trip().pattern().slack_index())
            })
            .sum()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{AccessEgress, StopIndex, TransitLeg, Trip, TripPattern};
    use crate::optimizer::DefaultSlackProvider;
    use proptest::prelude::*;

    fn single_ride_path(duration: i32) -> Path {
        let pattern = TripPattern::new("L", vec![StopIndex(0), StopIndex(1)]).unwrap();
        let trip = Trip::from_stop_times("T", Arc::new(pattern), vec![0, duration]).unwrap();
        Path::from_transit_legs(
            0,
            AccessEgress::new(StopIndex(0), 0, 0),
            vec![TransitLeg::new(Arc::new(trip), 0, 1).unwrap()],
            AccessEgress::new(StopIndex(1), 0, 0),
            |_, _| None,
        )
        .unwrap()
    }

    proptest! {
        #[test]
        fn safe_time_within_bounds(
            durations in prop::collection::vec(0i32..200_000, 1..8),
            board_slack in 0i32..600,
            alight_slack in 0i32..600,
        ) {
            let calc = MinSafeTransferTimeCalculator::new(Arc::new(
                DefaultSlackProvider::new(0, board_slack, alight_slack),
            ));
            let paths: Vec<Path> = durations.into_iter().map(single_ride_path).collect();
            let safe_time = calc.min_safe_transfer_time(&paths);

            prop_assert!(
                (MIN_SAFE_TRANSFER_TIME_LOWER_BOUND..=MIN_SAFE_TRANSFER_TIME_UPPER_BOUND)
                    .contains(&safe_time),
                "safe time {} out of bounds",
                safe_time
            );
        }
    }
}

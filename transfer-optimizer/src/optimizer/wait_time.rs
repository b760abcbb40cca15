//! Wait-time cost at transfers.
//!
//! A tight transfer is easily missed, so waiting a little longer is worth
//! some extra travel time. The cost of a wait is highest at zero, falls to
//! the min safe transfer time at that wait, and keeps falling towards zero
//! for longer waits:
//!
//! ```text
//! f(t) = n * t0 / (1 + (n - 1) * t / t0)
//! ```
//!
//! where `t0` is the min safe transfer time and `n` the min safe wait time
//! factor. Guaranteed and stay-seated transfers cannot be missed, so they get
//! a fixed cost instead.

use super::cost::to_cost_f64;

/// Wait-time cost used when no wait penalty applies.
pub const ZERO_COST: i32 = 0;

/// Computes the wait-time cost of transfers, in centi-seconds.
///
/// # Invariants
///
/// - `min_safe_wait_time_factor >= 1`
/// - `min_safe_transfer_time > 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferWaitTimeCostCalculator {
    min_safe_wait_time_factor: f64,
    min_safe_transfer_time: i32,
    guaranteed_transfer_cost: i32,
    stay_seated_transfer_cost: i32,
}

impl TransferWaitTimeCostCalculator {
    /// # Panics
    ///
    /// Panics if `min_safe_wait_time_factor < 1` or
    /// `min_safe_transfer_time <= 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use transfer_optimizer::optimizer::TransferWaitTimeCostCalculator;
    ///
    /// let calc = TransferWaitTimeCostCalculator::new(5.0, 120);
    /// assert_eq!(calc.calculate_optimized_wait_cost(0), 60_000);
    /// assert_eq!(calc.calculate_optimized_wait_cost(120), 12_000);
    /// assert!(calc.calculate_optimized_wait_cost(600) < 12_000);
    /// ```
    pub fn new(min_safe_wait_time_factor: f64, min_safe_transfer_time: i32) -> Self {
        assert!(
            min_safe_wait_time_factor >= 1.0,
            "min safe wait time factor must be at least 1, was {min_safe_wait_time_factor}"
        );
        assert!(
            min_safe_transfer_time > 0,
            "min safe transfer time must be positive, was {min_safe_transfer_time}"
        );
        Self {
            min_safe_wait_time_factor,
            min_safe_transfer_time,
            guaranteed_transfer_cost: ZERO_COST,
            stay_seated_transfer_cost: ZERO_COST,
        }
    }

    /// Sets the fixed costs (centi-seconds) of facilitated transfers.
    pub fn with_facilitated_costs(mut self, guaranteed: i32, stay_seated: i32) -> Self {
        self.guaranteed_transfer_cost = guaranteed;
        self.stay_seated_transfer_cost = stay_seated;
        self
    }

    pub fn min_safe_transfer_time(&self) -> i32 {
        self.min_safe_transfer_time
    }

    /// Cost of waiting `wait_time` seconds before the next ride.
    ///
    /// Never negative and never increasing in `wait_time`. Negative waits
    /// cost the same as no wait.
    pub fn calculate_optimized_wait_cost(&self, wait_time: i32) -> i32 {
        let n = self.min_safe_wait_time_factor;
        let t0 = f64::from(self.min_safe_transfer_time);
        let t = f64::from(wait_time.max(0));

        to_cost_f64(n * t0 / (1.0 + (n - 1.0) * t / t0))
    }

    pub fn calculate_guaranteed_transfer_cost(&self) -> i32 {
        self.guaranteed_transfer_cost
    }

    pub fn calculate_stay_seated_transfer_cost(&self) -> i32 {
        self.stay_seated_transfer_cost
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cost_is_non_negative_and_non_increasing(
            factor in 1.0f64..20.0,
            safe_time in 120i32..=2400,
            wait in 0i32..20_000,
            extra in 0i32..20_000,
        ) {
            let calc = TransferWaitTimeCostCalculator::new(factor, safe_time);
            let shorter = calc.calculate_optimized_wait_cost(wait);
            let longer = calc.calculate_optimized_wait_cost(wait + extra);

            prop_assert!(longer >= 0);
            prop_assert!(
                longer <= shorter,
                "cost rose from {} to {} when waiting {}s longer",
                shorter,
                longer,
                extra
            );
        }

        #[test]
        fn safe_time_wait_costs_the_safe_time(
            factor in 1.0f64..20.0,
            safe_time in 120i32..=2400,
        ) {
            let calc = TransferWaitTimeCostCalculator::new(factor, safe_time);
            let cost = calc.calculate_optimized_wait_cost(safe_time);
            prop_assert!((cost - safe_time * 100).abs() <= 1);
        }
    }
}

//! Extra cost for transferring at low-priority stops.

use std::sync::Arc;

use crate::domain::StopIndex;

/// Adds a weighted per-stop cost when boarding or alighting at a transfer.
///
/// The per-stop costs come from the transit model (centi-seconds, indexed by
/// stop); the factor scales them for the request.
#[derive(Debug, Clone, PartialEq)]
pub struct StopPriorityCostCalculator {
    factor: f64,
    stop_board_alight_costs: Arc<[i32]>,
}

impl StopPriorityCostCalculator {
    /// # Panics
    ///
    /// Panics if `factor` is negative.
    pub fn new(factor: f64, stop_board_alight_costs: Arc<[i32]>) -> Self {
        assert!(factor >= 0.0, "stop priority cost factor must be non-negative, was {factor}");
        Self {
            factor,
            stop_board_alight_costs,
        }
    }

    /// Weighted cost of transferring at `stop`. Unknown stops cost nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use transfer_optimizer::domain::StopIndex;
    /// use transfer_optimizer::optimizer::StopPriorityCostCalculator;
    ///
    /// let calc = StopPriorityCostCalculator::new(1.5, Arc::from(vec![0, 101, 6000]));
    /// assert_eq!(calc.extra_stop_priority_cost(StopIndex(1)), 152);
    /// assert_eq!(calc.extra_stop_priority_cost(StopIndex(2)), 9000);
    /// ```
    pub fn extra_stop_priority_cost(&self, stop: StopIndex) -> i32 {
        let cost = self.stop_board_alight_costs.get(stop.0).copied().unwrap_or(0);
        (f64::from(cost) * self.factor).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_lookup() {
        let calc = StopPriorityCostCalculator::new(0.5, Arc::from(vec![0, 3, 1000]));
        assert_eq!(calc.extra_stop_priority_cost(StopIndex(0)), 0);
        assert_eq!(calc.extra_stop_priority_cost(StopIndex(1)), 2);
        assert_eq!(calc.extra_stop_priority_cost(StopIndex(2)), 500);
        assert_eq!(calc.extra_stop_priority_cost(StopIndex(7)), 0);
    }

    #[test]
    fn zero_factor_disables_cost() {
        let calc = StopPriorityCostCalculator::new(0.0, Arc::from(vec![1000]));
        assert_eq!(calc.extra_stop_priority_cost(StopIndex(0)), 0);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn negative_factor_panics() {
        StopPriorityCostCalculator::new(-1.0, Arc::from(vec![]));
    }
}

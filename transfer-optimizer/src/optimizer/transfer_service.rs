//! Batch entry point of the transfer optimizer.

use std::sync::Arc;

use tracing::debug;

use super::config::ConfigError;
use super::{
    CostCalculator, MinCostFilterChain, MinCostPathTailFilterFactory, MinSafeTransferTimeCalculator,
    OptimizePathService, PassThroughPathTailFilterFactory, PassThroughPoint, PathTailFilterFactory,
    SlackProvider, StopPriorityCostCalculator, TailContext, TransferGenerator,
    TransferOptimizationConfig, TransferWaitTimeCostCalculator, rebuild_path, to_cost,
};
use crate::domain::{OptimizedPath, Path};

/// Optimizes the transfer points of the paths found by one search.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use transfer_optimizer::domain::{AccessEgress, Path, StopIndex, TransitLeg, Trip, TripPattern, TripToTripTransfer};
/// use transfer_optimizer::optimizer::{
///     DefaultCostCalculator, DefaultSlackProvider, OptimizeTransferService, TransferGenerator,
///     TransferOptimizationConfig,
/// };
///
/// struct NoTransfers;
///
/// impl TransferGenerator for NoTransfers {
///     fn find_all_possible_transfers(&self, legs: &[TransitLeg]) -> Vec<Vec<TripToTripTransfer>> {
///         vec![Vec::new(); legs.len().saturating_sub(1)]
///     }
/// }
///
/// let service = OptimizeTransferService::new(
///     TransferOptimizationConfig::default(),
///     Arc::new(NoTransfers),
///     Arc::new(DefaultSlackProvider::default()),
///     Arc::new(DefaultCostCalculator::new(60, 120, 1.0, &[1.0])),
/// )
/// .unwrap();
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
/// let optimized = service.optimize(&[path]);
/// assert_eq!(optimized.len(), 1);
/// assert_eq!(optimized[0].path().number_of_transfers(), 0);
/// ```
pub struct OptimizeTransferService {
    config: TransferOptimizationConfig,
    transfer_generator: Arc<dyn TransferGenerator>,
    filter_factory: Arc<dyn PathTailFilterFactory>,
    slack: Arc<dyn SlackProvider>,
    cost_calculator: Arc<dyn CostCalculator>,
    stop_board_alight_costs: Option<Arc<[i32]>>,
}

impl OptimizeTransferService {
    /// Creates a service ranking paths with the default filter chain.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `config` has an out-of-range value.
    pub fn new(
        config: TransferOptimizationConfig,
        transfer_generator: Arc<dyn TransferGenerator>,
        slack: Arc<dyn SlackProvider>,
        cost_calculator: Arc<dyn CostCalculator>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let filter_factory = Arc::new(MinCostPathTailFilterFactory::new(
            MinCostFilterChain::default_chain(&config),
        ));
        Ok(Self {
            config,
            transfer_generator,
            filter_factory,
            slack,
            cost_calculator,
            stop_board_alight_costs: None,
        })
    }

    /// Sets the per-stop board/alight costs (centi-seconds, indexed by stop).
    ///
    /// They apply only if `extra_stop_board_alight_costs_factor` is positive.
    pub fn with_stop_board_alight_costs(mut self, costs: Vec<i32>) -> Self {
        self.stop_board_alight_costs = Some(costs.into());
        self
    }

    /// Requires every result to pass the given via points, in order.
    pub fn with_pass_through_points(mut self, points: Vec<PassThroughPoint>) -> Self {
        if !points.is_empty() {
            self.filter_factory = Arc::new(PassThroughPathTailFilterFactory::new(
                MinCostFilterChain::default_chain(&self.config),
                points,
            ));
        }
        self
    }

    /// Replaces the filters ranking the tails, including any via points.
    pub fn with_filter_factory(mut self, filter_factory: Arc<dyn PathTailFilterFactory>) -> Self {
        self.filter_factory = filter_factory;
        self
    }

    pub fn config(&self) -> &TransferOptimizationConfig {
        &self.config
    }

    /// Optimizes every path in `paths`.
    ///
    /// Paths without transfers are costed as they are. A path whose
    /// optimization finds nothing is kept as it is. A path may yield several
    /// results if they tie on every cost.
    pub fn optimize(&self, paths: &[Path]) -> Vec<OptimizedPath> {
        let context = Arc::new(self.tail_context(paths));
        let path_service = OptimizePathService::new(
            Arc::clone(&self.transfer_generator),
            Arc::clone(&self.filter_factory),
        );

        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            if path.number_of_transfers() == 0 {
                results.push(rebuild_path(path, &context));
                continue;
            }

            let optimized = path_service.find_best_transit_path(path, &context);
            if optimized.is_empty() {
                debug!(path = %path, "No better transfers found, keeping path");
                results.push(rebuild_path(path, &context));
            } else {
                results.extend(optimized);
            }
        }

        debug!(
            paths = paths.len(),
            results = results.len(),
            "Transfer optimization complete"
        );
        results
    }

    fn tail_context(&self, paths: &[Path]) -> TailContext {
        let mut context =
            TailContext::new(Arc::clone(&self.slack), Arc::clone(&self.cost_calculator))
                .with_transfer_priority(self.config.optimize_transfer_priority);

        if self.config.optimize_transfer_wait_time {
            let min_safe_transfer_time = MinSafeTransferTimeCalculator::new(Arc::clone(&self.slack))
                .min_safe_transfer_time(paths);
            let calculator = TransferWaitTimeCostCalculator::new(
                self.config.min_safe_wait_time_factor,
                min_safe_transfer_time,
            )
            .with_facilitated_costs(
                to_cost(self.config.guaranteed_transfer_cost),
                to_cost(self.config.stay_seated_transfer_cost),
            );
            context = context.with_wait_time_calculator(calculator);
        }

        let factor = self.config.extra_stop_board_alight_costs_factor;
        if let Some(costs) = self.stop_board_alight_costs.as_ref().filter(|_| factor > 0.0) {
            let calculator = StopPriorityCostCalculator::new(factor, Arc::clone(costs));
            context = context.with_stop_priority_calculator(calculator);
        }
        context
    }
}

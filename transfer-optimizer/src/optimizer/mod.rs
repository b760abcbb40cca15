//! Transfer point optimization.
//!
//! Given paths found by the router, this module re-chooses where the
//! passenger changes between the trips of each path. The trips themselves
//! never change. Candidates are ranked lexicographically by:
//!
//! 1. Transfer priority cost (constraints such as guaranteed or stay-seated)
//! 2. Generalized cost, plus a wait-time cost that penalizes tight transfers
//! 3. Break-tie cost, preferring earlier transfers
//!
//! The wait-time cost depends on a safe transfer time derived from the whole
//! batch of paths, see [`MinSafeTransferTimeCalculator`].

mod config;
mod cost;
mod filter;
mod min_safe_transfer_time;
mod selector;
mod service;
mod slack;
mod stop_priority;
mod tail;
mod tail_filter;
mod transfer_service;
mod wait_time;


pub use config::{ConfigError, TransferOptimizationConfig};
pub use cost::{CostCalculator, DefaultCostCalculator, to_cost, to_cost_f64};
pub use filter::{CostFn, MinCostFilterChain, TransferCostAndC2FilterChain, filter_paths};
pub use min_safe_transfer_time::{
    MIN_SAFE_TRANSFER_TIME_LOWER_BOUND, MIN_SAFE_TRANSFER_TIME_UPPER_BOUND,
    MinSafeTransferTimeCalculator,
};
pub use service::{OptimizePathService, TransferGenerator, rebuild_path};
pub use slack::{DefaultSlackProvider, SlackProvider};
pub use stop_priority::StopPriorityCostCalculator;
pub use tail::{OptimizedPathTail, TailContext};
pub use tail_filter::{
    MinCostPathTailFilter, MinCostPathTailFilterFactory, PassThroughPathTailFilter,
    PassThroughPathTailFilterFactory, PassThroughPoint, PathTailFilter, PathTailFilterFactory,
};
pub use transfer_service::OptimizeTransferService;
pub use wait_time::{TransferWaitTimeCostCalculator, ZERO_COST};

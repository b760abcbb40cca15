//! Pruning of path tails during the search.
//!
//! Every transfer candidate multiplies the number of tails, so the search
//! prunes after each step. A `PathTailFilter` is called with the candidate
//! tails for a board position before the next leg is prepended, and once
//! more with the completed tails.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::{MinCostFilterChain, OptimizedPathTail, TransferCostAndC2FilterChain};
use crate::domain::{Path, StopIndex};

/// Prunes path tails.
pub trait PathTailFilter: Send + Sync {
    /// Filters tails whose head will board at `board_stop_position`.
    fn filter_intermediate_result(
        &self,
        tails: Vec<OptimizedPathTail>,
        board_stop_position: usize,
    ) -> Vec<OptimizedPathTail>;

    /// Filters completed tails. The result is the optimizer's answer.
    fn filter_final_result(&self, tails: Vec<OptimizedPathTail>) -> Vec<OptimizedPathTail>;
}

/// Creates a filter per path to optimize.
pub trait PathTailFilterFactory: Send + Sync {
    fn create_filter(&self, path: &Path) -> Box<dyn PathTailFilter>;
}

/// Keeps the cheapest tails under a filter chain.
pub struct MinCostPathTailFilter {
    chain: Arc<MinCostFilterChain<OptimizedPathTail>>,
}

impl MinCostPathTailFilter {
    pub fn new(chain: Arc<MinCostFilterChain<OptimizedPathTail>>) -> Self {
        Self { chain }
    }
}

impl PathTailFilter for MinCostPathTailFilter {
    fn filter_intermediate_result(
        &self,
        tails: Vec<OptimizedPathTail>,
        _board_stop_position: usize,
    ) -> Vec<OptimizedPathTail> {
        self.chain.filter(tails)
    }

    fn filter_final_result(&self, tails: Vec<OptimizedPathTail>) -> Vec<OptimizedPathTail> {
        self.chain.filter(tails)
    }
}

pub struct MinCostPathTailFilterFactory {
    chain: Arc<MinCostFilterChain<OptimizedPathTail>>,
}

impl MinCostPathTailFilterFactory {
    pub fn new(chain: MinCostFilterChain<OptimizedPathTail>) -> Self {
        Self {
            chain: Arc::new(chain),
        }
    }
}

impl PathTailFilterFactory for MinCostPathTailFilterFactory {
    fn create_filter(&self, _path: &Path) -> Box<dyn PathTailFilter> {
        Box::new(MinCostPathTailFilter::new(Arc::clone(&self.chain)))
    }
}

/// A via point: the path must pass one of these stops, on board or while
/// transferring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassThroughPoint {
    name: String,
    stops: BTreeSet<StopIndex>,
}

impl PassThroughPoint {
    pub fn new(name: impl Into<String>, stops: impl IntoIterator<Item = StopIndex>) -> Self {
        Self {
            name: name.into(),
            stops: stops.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contains(&self, stop: StopIndex) -> bool {
        self.stops.contains(&stop)
    }
}

/// Keeps the cheapest tails per number of via points still to visit.
///
/// A tail that has visited fewer via points is not worse than a cheaper one
/// that has visited more; it may pick up the rest before the access. Only
/// completed tails that visit every point, in order, are returned.
pub struct PassThroughPathTailFilter {
    chain: Arc<MinCostFilterChain<OptimizedPathTail>>,
    points: Arc<[PassThroughPoint]>,
}

impl PassThroughPathTailFilter {
    pub fn new(
        chain: Arc<MinCostFilterChain<OptimizedPathTail>>,
        points: Arc<[PassThroughPoint]>,
    ) -> Self {
        Self { chain, points }
    }
}

/// Number of `points` not visited by the rides of `tail`.
///
/// Points are matched in reverse order, from the egress back to the head.
/// The head ride is taken to board at `head_board_pos` when given.
fn remaining_points(
    points: &[PassThroughPoint],
    tail: &OptimizedPathTail,
    head_board_pos: Option<usize>,
) -> i32 {
    let rides: Vec<_> = tail.transit_legs().collect();
    let mut remaining = points.len();

    for (i, ride) in rides.iter().enumerate().rev() {
        let board_pos = match head_board_pos {
            Some(pos) if i == 0 => pos,
            _ => ride.board_pos(),
        };
        for pos in (board_pos..=ride.alight_pos()).rev() {
            if remaining == 0 {
                return 0;
            }
            if points[remaining - 1].contains(ride.trip().stop(pos)) {
                remaining -= 1;
            }
        }
    }
    remaining as i32
}

impl PathTailFilter for PassThroughPathTailFilter {
    fn filter_intermediate_result(
        &self,
        tails: Vec<OptimizedPathTail>,
        board_stop_position: usize,
    ) -> Vec<OptimizedPathTail> {
        let points = Arc::clone(&self.points);
        let grouped = TransferCostAndC2FilterChain::new(
            Arc::clone(&self.chain),
            Box::new(move |tail: &OptimizedPathTail| {
                remaining_points(&points, tail, Some(board_stop_position))
            }),
        );
        grouped.filter(tails)
    }

    fn filter_final_result(&self, tails: Vec<OptimizedPathTail>) -> Vec<OptimizedPathTail> {
        let complete: Vec<_> = tails
            .into_iter()
            .filter(|tail| remaining_points(&self.points, tail, None) == 0)
            .collect();
        self.chain.filter(complete)
    }
}

pub struct PassThroughPathTailFilterFactory {
    chain: Arc<MinCostFilterChain<OptimizedPathTail>>,
    points: Arc<[PassThroughPoint]>,
}

impl PassThroughPathTailFilterFactory {
    pub fn new(
        chain: MinCostFilterChain<OptimizedPathTail>,
        points: Vec<PassThroughPoint>,
    ) -> Self {
        Self {
            chain: Arc::new(chain),
            points: points.into(),
        }
    }
}

impl PathTailFilterFactory for PassThroughPathTailFilterFactory {
    fn create_filter(&self, _path: &Path) -> Box<dyn PathTailFilter> {
        Box::new(PassThroughPathTailFilter::new(
            Arc::clone(&self.chain),
            Arc::clone(&self.points),
        ))
    }
}

//! Minimum-cost filters.
//!
//! Candidates are compared lexicographically over an ordered list of cost
//! functions: the first function decides, later ones only break its ties.
//! This is done by successive filtering of the full candidate set rather
//! than by sorting, so every candidate that ties on all functions is kept.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{OptimizedPathTail, TransferOptimizationConfig};

/// A cost function over candidates. Lower is better.
pub type CostFn<T> = Box<dyn Fn(&T) -> i32 + Send + Sync>;

/// Keeps the candidates with the lowest cost under each function in turn.
///
/// # Examples
///
/// ```
/// use transfer_optimizer::optimizer::{CostFn, MinCostFilterChain};
///
/// let by_first: CostFn<(i32, i32)> = Box::new(|e: &(i32, i32)| e.0);
/// let by_second: CostFn<(i32, i32)> = Box::new(|e: &(i32, i32)| e.1);
/// let chain = MinCostFilterChain::new(vec![by_first, by_second]);
///
/// let result = chain.filter(vec![(1, 5), (2, 0), (1, 3), (1, 3)]);
/// assert_eq!(result, vec![(1, 3), (1, 3)]);
/// ```
pub struct MinCostFilterChain<T> {
    cost_functions: Vec<CostFn<T>>,
}

impl<T> MinCostFilterChain<T> {
    pub fn new(cost_functions: Vec<CostFn<T>>) -> Self {
        Self { cost_functions }
    }

    /// Filters `elements` by each cost function in order.
    ///
    /// Returns the input unchanged if it has at most one element. The order
    /// of the kept elements is preserved.
    pub fn filter(&self, elements: Vec<T>) -> Vec<T> {
        let mut result = elements;
        for cost_function in &self.cost_functions {
            if result.len() <= 1 {
                break;
            }
            result = filter_min(result, cost_function);
        }
        result
    }
}

impl MinCostFilterChain<OptimizedPathTail> {
    /// The chain used to rank path tails:
    ///
    /// 1. Transfer priority cost, if enabled
    /// 2. Generalized cost plus wait-time cost if wait-time optimization is
    ///    enabled, else plain generalized cost
    /// 3. Break-tie cost
    pub fn default_chain(config: &TransferOptimizationConfig) -> Self {
        let mut cost_functions: Vec<CostFn<OptimizedPathTail>> = Vec::with_capacity(3);
        if config.optimize_transfer_priority {
            cost_functions.push(Box::new(OptimizedPathTail::transfer_priority_cost));
        }
        if config.optimize_transfer_wait_time {
            cost_functions.push(Box::new(OptimizedPathTail::generalized_cost_wait_time_optimized));
        } else {
            cost_functions.push(Box::new(OptimizedPathTail::generalized_cost));
        }
        cost_functions.push(Box::new(OptimizedPathTail::break_tie_cost));
        Self::new(cost_functions)
    }
}

/// Filters candidates within groups of equal `c2`, then unions the groups.
///
/// Candidates with different `c2` are not comparable, so the best of each
/// group survives. Groups come out in ascending `c2` order.
pub struct TransferCostAndC2FilterChain<T> {
    chain: Arc<MinCostFilterChain<T>>,
    get_c2: CostFn<T>,
}

impl<T> TransferCostAndC2FilterChain<T> {
    pub fn new(chain: Arc<MinCostFilterChain<T>>, get_c2: CostFn<T>) -> Self {
        Self { chain, get_c2 }
    }

    pub fn filter(&self, elements: Vec<T>) -> Vec<T> {
        let mut groups: BTreeMap<i32, Vec<T>> = BTreeMap::new();
        for element in elements {
            groups.entry((self.get_c2)(&element)).or_default().push(element);
        }
        groups
            .into_values()
            .flat_map(|group| self.chain.filter(group))
            .collect()
    }
}

/// Keeps the paths with the lowest cost.
///
/// Returns `paths` unchanged if there is no cost function or no paths.
pub fn filter_paths<T>(paths: Vec<T>, cost_function: Option<&dyn Fn(&T) -> i32>) -> Vec<T> {
    match cost_function {
        Some(f) if !paths.is_empty() => filter_min(paths, f),
        _ => paths,
    }
}

/// Keeps the elements whose cost equals the minimum, evaluating each cost once.
fn filter_min<T, F>(elements: Vec<T>, cost_function: F) -> Vec<T>
where
    F: Fn(&T) -> i32,
{
    let costs: Vec<i32> = elements.iter().map(&cost_function).collect();
    let Some(&min) = costs.iter().min() else {
        return elements;
    };
    elements
        .into_iter()
        .zip(costs)
        .filter(|&(_, cost)| cost == min)
        .map(|(element, _)| element)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    type Item = (i32, i32, i32);

    fn chain() -> MinCostFilterChain<Item> {
        let by_cost: CostFn<Item> = Box::new(|e: &Item| e.1);
        let by_tie: CostFn<Item> = Box::new(|e: &Item| e.2);
        MinCostFilterChain::new(vec![by_cost, by_tie])
    }

    #[test]
    fn first_function_decides() {
        let result = chain().filter(vec![(0, 3, 0), (0, 1, 9), (0, 2, 0)]);
        assert_eq!(result, vec![(0, 1, 9)]);
    }

    #[test]
    fn later_function_breaks_ties() {
        let result = chain().filter(vec![(0, 1, 5), (1, 1, 4), (2, 2, 0), (3, 1, 4)]);
        assert_eq!(result, vec![(1, 1, 4), (3, 1, 4)]);
    }

    #[test]
    fn small_inputs_unchanged() {
        assert!(chain().filter(vec![]).is_empty());
        assert_eq!(chain().filter(vec![(0, 9, 9)]), vec![(0, 9, 9)]);
        let no_functions: MinCostFilterChain<Item> = MinCostFilterChain::new(vec![]);
        assert_eq!(no_functions.filter(vec![(0, 2, 0), (0, 1, 0)]).len(), 2);
    }

    #[test]
    fn c2_groups_filtered_separately() {
        let grouped =
            TransferCostAndC2FilterChain::new(Arc::new(chain()), Box::new(|e: &Item| e.0));
        let result = grouped.filter(vec![(1, 5, 0), (0, 3, 0), (1, 2, 0), (0, 4, 0), (2, 9, 9)]);
        assert_eq!(result, vec![(0, 3, 0), (1, 2, 0), (2, 9, 9)]);
    }

    #[test]
    fn filter_paths_single_function() {
        let cost = |e: &Item| e.1;
        assert_eq!(
            filter_paths(vec![(0, 2, 0), (1, 1, 0), (2, 1, 0)], Some(&cost)),
            vec![(1, 1, 0), (2, 1, 0)]
        );
        assert_eq!(filter_paths(vec![(0, 2, 0), (1, 1, 0)], None).len(), 2);
        assert!(filter_paths(Vec::<Item>::new(), Some(&cost)).is_empty());
    }
}

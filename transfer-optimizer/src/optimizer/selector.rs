//! Selection of the tails a ride can connect to.

use super::{OptimizedPathTail, PathTailFilter};

/// Hands out, per board position, the tails a transfer at that position can
/// lead into.
///
/// The candidates of one leg boundary are visited in descending board
/// position. A tail qualifies once its head ride alights after the board
/// position, and stays qualified for every smaller position, so the
/// selection only grows; it is re-filtered each time new tails join.
pub(crate) struct TransitPathLegSelector<'a> {
    filter: &'a dyn PathTailFilter,
    remaining: Vec<OptimizedPathTail>,
    selected: Vec<OptimizedPathTail>,
    prev_stop_position: usize,
}

impl<'a> TransitPathLegSelector<'a> {
    pub(crate) fn new(filter: &'a dyn PathTailFilter, tails: Vec<OptimizedPathTail>) -> Self {
        Self {
            filter,
            remaining: tails,
            selected: Vec::new(),
            prev_stop_position: usize::MAX,
        }
    }

    /// Tails whose head ride can be boarded at `board_pos`.
    ///
    /// # Panics
    ///
    /// Panics if `board_pos` is greater than the position of the previous
    /// call.
    pub(crate) fn next(&mut self, board_pos: usize) -> &[OptimizedPathTail] {
        assert!(
            board_pos <= self.prev_stop_position,
            "board positions must not increase: {board_pos} after {}",
            self.prev_stop_position
        );
        self.prev_stop_position = board_pos;

        let (candidates, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut self.remaining)
            .into_iter()
            .partition(|tail| tail.head_transit().is_some_and(|t| t.alight_pos() > board_pos));
        self.remaining = remaining;

        if !candidates.is_empty() {
            let mut merged = std::mem::take(&mut self.selected);
            merged.extend(candidates);
            self.selected = self.filter.filter_intermediate_result(merged, board_pos);
        }
        &self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::test_support::{context, egress, leg, trip};

    /// Keeps everything, recording the board positions it was called with.
    #[derive(Default)]
    struct RecordingFilter {
        positions: Mutex<Vec<usize>>,
    }

    impl PathTailFilter for RecordingFilter {
        fn filter_intermediate_result(
            &self,
            tails: Vec<OptimizedPathTail>,
            board_stop_position: usize,
        ) -> Vec<OptimizedPathTail> {
            self.positions.lock().unwrap().push(board_stop_position);
            tails
        }

        fn filter_final_result(&self, tails: Vec<OptimizedPathTail>) -> Vec<OptimizedPathTail> {
            tails
        }
    }

    /// One tail per alight position 1..=3 of a four-stop ride.
    fn tails() -> Vec<OptimizedPathTail> {
        let l1 = trip("L1", &[0, 1, 2, 3], "10:00 10:10 10:20 10:30");
        let ctx = Arc::new(context());
        (1..=3)
            .map(|alight| {
                OptimizedPathTail::new(Arc::clone(&ctx), 0)
                    .add_transit_tail(&leg(&l1, 0, alight), &egress(alight, 0, 0))
            })
            .collect()
    }

    fn alight_positions(tails: &[OptimizedPathTail]) -> Vec<usize> {
        let mut positions: Vec<_> = tails
            .iter()
            .filter_map(|t| t.head_transit().map(|l| l.alight_pos()))
            .collect();
        positions.sort_unstable();
        positions
    }

    #[test]
    fn selection_grows_as_position_decreases() {
        let filter = RecordingFilter::default();
        let mut selector = TransitPathLegSelector::new(&filter, tails());

        assert_eq!(alight_positions(selector.next(3)), Vec::<usize>::new());
        assert_eq!(alight_positions(selector.next(2)), [3]);
        assert_eq!(alight_positions(selector.next(1)), [2, 3]);
        assert_eq!(alight_positions(selector.next(0)), [1, 2, 3]);
    }

    #[test]
    fn filters_only_when_new_tails_join() {
        let filter = RecordingFilter::default();
        let mut selector = TransitPathLegSelector::new(&filter, tails());

        selector.next(2);
        selector.next(2);
        assert_eq!(alight_positions(selector.next(1)), [2, 3]);
        assert_eq!(alight_positions(selector.next(1)), [2, 3]);

        assert_eq!(*filter.positions.lock().unwrap(), [2, 1]);
    }

    #[test]
    #[should_panic(expected = "must not increase")]
    fn increasing_position_panics() {
        let filter = RecordingFilter::default();
        let mut selector = TransitPathLegSelector::new(&filter, tails());
        selector.next(1);
        selector.next(2);
    }
}

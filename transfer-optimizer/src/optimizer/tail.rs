//! Path tails: partial paths built backward from the egress.
//!
//! The optimizer grows tails one transit leg at a time, from the last ride
//! towards the access. Every transfer candidate branches the search, so tails
//! are persistent lists: prepending a leg creates a new head node that points
//! at the shared rest of the tail, and cloning a tail is O(1).
//!
//! Each tail keeps the costs the filters rank it by:
//!
//! - Generalized cost: the router's cost of every leg. The head transit leg
//!   is costed provisionally (as a first boarding without waiting) until the
//!   leg before it is known.
//! - Transfer priority cost: the constraint cost of every transfer.
//! - Wait-time optimized cost: the wait-time cost of every transfer.
//! - Break-tie cost: the sum of the arrival times of all rides, computed on
//!   demand.

use std::sync::Arc;

use super::{
    CostCalculator, SlackProvider, StopPriorityCostCalculator, TransferWaitTimeCostCalculator,
};
use crate::domain::{
    AccessEgress, AccessLeg, EgressLeg, OptimizedPath, Path, PathLeg, StopIndex, Transfer,
    TransferConstraint, TransferLeg, TransitLeg, TripToTripTransfer,
};

/// Calculators shared by all tails of one optimization.
pub struct TailContext {
    slack: Arc<dyn SlackProvider>,
    cost_calculator: Arc<dyn CostCalculator>,
    wait_time_calculator: Option<TransferWaitTimeCostCalculator>,
    stop_priority_calculator: Option<StopPriorityCostCalculator>,
    optimize_transfer_priority: bool,
}

impl TailContext {
    /// Context computing generalized cost only. Transfer priority and
    /// wait-time costs stay zero until enabled.
    pub fn new(slack: Arc<dyn SlackProvider>, cost_calculator: Arc<dyn CostCalculator>) -> Self {
        Self {
            slack,
            cost_calculator,
            wait_time_calculator: None,
            stop_priority_calculator: None,
            optimize_transfer_priority: false,
        }
    }

    pub fn with_wait_time_calculator(mut self, calculator: TransferWaitTimeCostCalculator) -> Self {
        self.wait_time_calculator = Some(calculator);
        self
    }

    pub fn with_stop_priority_calculator(mut self, calculator: StopPriorityCostCalculator) -> Self {
        self.stop_priority_calculator = Some(calculator);
        self
    }

    pub fn with_transfer_priority(mut self, enabled: bool) -> Self {
        self.optimize_transfer_priority = enabled;
        self
    }

    fn alight_slack(&self, leg: &TransitLeg) -> i32 {
        self.slack.alight_slack(leg.trip().pattern().slack_index())
    }

    fn board_slack(&self, leg: &TransitLeg) -> i32 {
        self.slack.board_slack(leg.trip().pattern().slack_index())
    }

    /// Generalized cost of a ride, including stop priority costs at the
    /// transfers on either side of it.
    fn transit_cost(
        &self,
        leg: &TransitLeg,
        first_boarding: bool,
        prev_arrival_time: i32,
        constraint: Option<&TransferConstraint>,
        followed_by_transit: bool,
    ) -> i32 {
        let trip = leg.trip();
        let boarding_cost = self.cost_calculator.boarding_cost(
            first_boarding,
            prev_arrival_time,
            leg.board_stop(),
            leg.from_time(),
            trip,
            constraint,
        );
        let mut cost = self.cost_calculator.transit_arrival_cost(
            boarding_cost,
            self.alight_slack(leg),
            leg.duration(),
            trip,
            leg.alight_stop(),
        );

        if let Some(stop_priority) = &self.stop_priority_calculator {
            if !first_boarding {
                cost += stop_priority.extra_stop_priority_cost(leg.board_stop());
            }
            if followed_by_transit {
                cost += stop_priority.extra_stop_priority_cost(leg.alight_stop());
            }
        }
        cost
    }

    /// Wait-time cost of a transfer, or `None` if the legs overlap.
    fn wait_time_cost(&self, tx: &TripToTripTransfer) -> Option<i32> {
        let calculator = self.wait_time_calculator.as_ref()?;
        let wait_time = tx.to().time() - tx.from().time() - tx.transfer_duration();
        if wait_time < 0 {
            return None;
        }

        let cost = match tx.constraint() {
            Some(c) if c.is_stay_seated() => calculator.calculate_stay_seated_transfer_cost(),
            Some(c) if c.is_guaranteed() => calculator.calculate_guaranteed_transfer_cost(),
            _ => calculator.calculate_optimized_wait_cost(wait_time),
        };
        Some(cost)
    }
}

/// One leg of a tail and a link to the rest.
struct TailNode {
    leg: PathLeg,
    next: Option<Arc<TailNode>>,
    /// Generalized cost of every leg after this one.
    cost_after: i32,
    /// Whether a transit leg follows this one.
    followed_by_transit: bool,
}

impl TailNode {
    fn prepend(leg: PathLeg, next: Arc<TailNode>, next_cost: i32) -> Self {
        Self {
            cost_after: next.cost_after + next_cost,
            followed_by_transit: next.leg.is_transit() || next.followed_by_transit,
            leg,
            next: Some(next),
        }
    }

    /// Same node with a different leg.
    fn replace_leg(&self, leg: PathLeg) -> Self {
        Self {
            leg,
            next: self.next.clone(),
            cost_after: self.cost_after,
            followed_by_transit: self.followed_by_transit,
        }
    }
}

/// A partial path, from some leg to the egress.
///
/// # Invariants
///
/// - Once seeded, the tail ends with an egress leg and its legs connect
/// - The transfer priority and wait-time costs never decrease as legs are
///   prepended
#[derive(Clone)]
pub struct OptimizedPathTail {
    context: Arc<TailContext>,
    head: Option<Arc<TailNode>>,
    iteration_departure_time: i32,
    transfer_priority_cost: i32,
    wait_time_optimized_cost: i32,
}

impl OptimizedPathTail {
    /// Creates an empty tail.
    pub fn new(context: Arc<TailContext>, iteration_departure_time: i32) -> Self {
        Self {
            context,
            head: None,
            iteration_departure_time,
            transfer_priority_cost: 0,
            wait_time_optimized_cost: 0,
        }
    }

    /// Returns a copy of this tail to grow independently.
    ///
    /// The copy shares all legs with this tail; this is O(1).
    pub fn mutate(&self) -> Self {
        self.clone()
    }

    /// Seeds an empty tail with the last ride of a path and the egress.
    ///
    /// The ride boards at the first stop of its trip until a transfer
    /// before it sets the real board position.
    ///
    /// # Panics
    ///
    /// Panics if the tail is not empty.
    pub fn add_transit_tail(mut self, leg: &TransitLeg, egress: &AccessEgress) -> Self {
        assert!(self.head.is_none(), "transit tail added to a non-empty tail");

        let ctx = Arc::clone(&self.context);
        let egress_leg = EgressLeg::departing_at(*egress, leg.to_time() + ctx.alight_slack(leg));
        let egress_node = Arc::new(TailNode {
            leg: PathLeg::Egress(egress_leg),
            next: None,
            cost_after: 0,
            followed_by_transit: false,
        });

        let transit = leg.clone().with_board_pos(0);
        let head = TailNode::prepend(
            PathLeg::Transit(transit),
            egress_node,
            egress.generalized_cost,
        );
        self.head = Some(Arc::new(head));
        self
    }

    /// Prepends a ride connected to the current head by `tx`.
    ///
    /// The current head boards at `tx.to()`, a street transfer is inserted if
    /// `tx` changes stop, and the new ride alights at `tx.from()`. The new
    /// ride boards at the first stop of its trip until a transfer before it
    /// sets the real board position.
    ///
    /// # Panics
    ///
    /// Panics if the head is not a transit leg, or if `tx` does not connect
    /// `leg`'s trip to the head's trip.
    pub fn add_transit_and_transfer_leg(
        mut self,
        leg: &TransitLeg,
        tx: &TripToTripTransfer,
    ) -> Self {
        let ctx = Arc::clone(&self.context);
        let head_node = self.head_transit_node();
        let PathLeg::Transit(head) = &head_node.leg else {
            unreachable!("head_transit_node returns a transit node")
        };
        assert!(
            Arc::ptr_eq(tx.from().trip(), leg.trip()) && Arc::ptr_eq(tx.to().trip(), head.trip()),
            "transfer {tx} does not connect {} to {}",
            leg.trip(),
            head.trip()
        );

        let new_leg = TransitLeg::new(Arc::clone(leg.trip()), 0, tx.from().stop_position())
            .unwrap_or_else(|e| panic!("cannot alight at {}: {e}", tx.from()))
            .with_constraint_after(tx.constraint().copied());

        let alight_time = new_leg.to_time() + ctx.alight_slack(&new_leg);
        let walk = match tx.transfer() {
            Some(transfer) if !tx.same_stop() => Some(TransferLeg::departing_at(
                new_leg.alight_stop(),
                *transfer,
                alight_time,
            )),
            _ => None,
        };
        let prev_arrival_time = walk.map_or(alight_time, |w| w.to_time);

        let boarded = head.clone().with_board_pos(tx.to().stop_position());
        let boarded_cost = ctx.transit_cost(
            &boarded,
            false,
            prev_arrival_time,
            tx.constraint(),
            head_node.followed_by_transit,
        );
        let mut next = Arc::new(head_node.replace_leg(PathLeg::Transit(boarded)));
        let mut next_cost = boarded_cost;

        if let Some(walk) = walk {
            next = Arc::new(TailNode::prepend(PathLeg::Transfer(walk), next, next_cost));
            next_cost = walk.transfer.generalized_cost;
        }
        self.head = Some(Arc::new(TailNode::prepend(
            PathLeg::Transit(new_leg),
            next,
            next_cost,
        )));

        if ctx.optimize_transfer_priority {
            self.transfer_priority_cost += TransferConstraint::priority_cost(tx.constraint());
        }
        if let Some(cost) = ctx.wait_time_cost(tx) {
            self.wait_time_optimized_cost += cost;
        }
        self
    }

    /// Prepends the street transfer between a flex access and the first ride.
    ///
    /// The transfer arrives at the head's board stop in time to board.
    ///
    /// # Panics
    ///
    /// Panics if the head is not a transit leg.
    pub fn transfer(mut self, transfer: &Transfer, from_stop: StopIndex) -> Self {
        let ctx = Arc::clone(&self.context);
        let head_node = self.head_transit_node();
        let PathLeg::Transit(head) = &head_node.leg else {
            unreachable!("head_transit_node returns a transit node")
        };

        let walk = TransferLeg::arriving_at(
            from_stop,
            *transfer,
            head.from_time() - ctx.board_slack(head),
        );
        let head_cost =
            ctx.transit_cost(head, true, walk.to_time, None, head_node.followed_by_transit);

        self.head = Some(Arc::new(TailNode::prepend(
            PathLeg::Transfer(walk),
            Arc::clone(head_node),
            head_cost,
        )));
        self
    }

    /// Prepends the access leg, completing the tail.
    ///
    /// # Panics
    ///
    /// Panics if the head is not a transit or transfer leg.
    pub fn access(mut self, access: &AccessEgress) -> Self {
        let ctx = Arc::clone(&self.context);
        let Some(head_node) = self.head.take() else {
            panic!("access added to an empty tail");
        };

        let (to_time, head_cost) = match &head_node.leg {
            PathLeg::Transit(t) => {
                let to_time = t.from_time() - ctx.board_slack(t);
                let cost = ctx.transit_cost(t, true, to_time, None, head_node.followed_by_transit);
                (to_time, cost)
            }
            PathLeg::Transfer(w) => (
                w.from_time - ctx.slack.transfer_slack(),
                w.transfer.generalized_cost,
            ),
            other => panic!("access cannot precede {other}"),
        };

        let access_leg = AccessLeg::arriving_at(*access, to_time);
        self.head = Some(Arc::new(TailNode::prepend(
            PathLeg::Access(access_leg),
            head_node,
            head_cost,
        )));
        self
    }

    /// Moves the board position of the head ride.
    ///
    /// # Panics
    ///
    /// Panics if the head is not a transit leg or `board_pos` is not before
    /// its alight position.
    pub fn change_head_boarding_position(&mut self, board_pos: usize) {
        let head_node = self.head_transit_node();
        let PathLeg::Transit(head) = &head_node.leg else {
            unreachable!("head_transit_node returns a transit node")
        };
        let moved = head.clone().with_board_pos(board_pos);
        let node = head_node.replace_leg(PathLeg::Transit(moved));
        self.head = Some(Arc::new(node));
    }

    fn head_transit_node(&self) -> &Arc<TailNode> {
        match &self.head {
            Some(node) if node.leg.is_transit() => node,
            Some(node) => panic!("head of tail is not a transit leg: {}", node.leg),
            None => panic!("tail is empty"),
        }
    }

    pub fn iteration_departure_time(&self) -> i32 {
        self.iteration_departure_time
    }

    pub fn head(&self) -> Option<&PathLeg> {
        self.head.as_deref().map(|node| &node.leg)
    }

    /// The head leg, if it is a ride.
    pub fn head_transit(&self) -> Option<&TransitLeg> {
        self.head().and_then(PathLeg::as_transit)
    }

    /// Legs from the head to the egress.
    pub fn legs(&self) -> impl Iterator<Item = &PathLeg> {
        std::iter::successors(self.head.as_deref(), |node| node.next.as_deref())
            .map(|node| &node.leg)
    }

    pub fn transit_legs(&self) -> impl Iterator<Item = &TransitLeg> {
        self.legs().filter_map(PathLeg::as_transit)
    }

    /// Whether the tail starts with an access leg.
    pub fn is_complete(&self) -> bool {
        matches!(self.head(), Some(PathLeg::Access(_)))
    }

    /// Generalized cost of all legs, the head ride costed provisionally.
    pub fn generalized_cost(&self) -> i32 {
        let Some(node) = self.head.as_deref() else {
            return 0;
        };
        let head_cost = match &node.leg {
            PathLeg::Transit(t) => {
                self.context
                    .transit_cost(t, true, t.from_time(), None, node.followed_by_transit)
            }
            PathLeg::Transfer(w) => w.transfer.generalized_cost,
            PathLeg::Access(a) => a.access.generalized_cost,
            PathLeg::Egress(e) => e.egress.generalized_cost,
        };
        node.cost_after + head_cost
    }

    pub fn transfer_priority_cost(&self) -> i32 {
        self.transfer_priority_cost
    }

    pub fn wait_time_optimized_cost(&self) -> i32 {
        self.wait_time_optimized_cost
    }

    pub fn generalized_cost_wait_time_optimized(&self) -> i32 {
        self.generalized_cost() + self.wait_time_optimized_cost
    }

    /// Sum of the arrival times of all rides. Lower means earlier transfers.
    pub fn break_tie_cost(&self) -> i32 {
        self.transit_legs().map(TransitLeg::to_time).sum()
    }

    /// Packages the tail into a path. The tail is not changed, so building
    /// twice gives equal paths.
    ///
    /// # Panics
    ///
    /// Panics if the tail does not start with an access leg.
    pub fn build(&self) -> OptimizedPath {
        assert!(self.is_complete(), "cannot build a path from an incomplete tail");

        let legs = self.legs().cloned().collect();
        OptimizedPath::new(
            Path::new_unchecked(self.iteration_departure_time, legs),
            self.generalized_cost(),
            self.transfer_priority_cost,
            self.wait_time_optimized_cost,
            self.break_tie_cost(),
        )
    }
}

impl std::fmt::Debug for OptimizedPathTail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptimizedPathTail")
            .field(
                "legs",
                &self.legs().map(ToString::to_string).collect::<Vec<_>>(),
            )
            .field("generalized_cost", &self.generalized_cost())
            .field("transfer_priority_cost", &self.transfer_priority_cost)
            .field("wait_time_optimized_cost", &self.wait_time_optimized_cost)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StopIndex, TransferConstraint};
    use crate::test_support::{
        access, context, egress, leg, same_stop_transfer, trip, walk_transfer,
    };

    #[test]
    fn single_ride() {
        let l1 = trip("L1", &[0, 1], "10:00 10:20");
        let tail = OptimizedPathTail::new(Arc::new(context()), 35_000)
            .add_transit_tail(&leg(&l1, 0, 1), &egress(1, 0, 24_000))
            .access(&access(0, 60, 12_000));

        assert!(tail.is_complete());
        // access + board + 20 min ride + egress
        assert_eq!(tail.generalized_cost(), 12_000 + 6_000 + 120_000 + 24_000);
        assert_eq!(tail.transfer_priority_cost(), 0);
        assert_eq!(tail.wait_time_optimized_cost(), 0);
        assert_eq!(tail.break_tie_cost(), 37_200);

        let path = tail.build();
        assert_eq!(path.legs().len(), 3);
        assert_eq!(path.iteration_departure_time(), 35_000);
        assert_eq!(path.path().start_time(), 35_940);
        assert_eq!(path.generalized_cost(), 162_000);
    }

    #[test]
    fn build_is_idempotent() {
        let l1 = trip("L1", &[0, 1, 2], "10:00 10:10 10:20");
        let l2 = trip("L2", &[2, 3], "10:25 10:40");
        let tail = OptimizedPathTail::new(Arc::new(context().with_transfer_priority(true)), 0)
            .add_transit_tail(&leg(&l2, 0, 1), &egress(3, 0, 0))
            .add_transit_and_transfer_leg(&leg(&l1, 0, 2), &same_stop_transfer(&l1, 2, &l2, 0))
            .access(&access(0, 0, 0));

        let first = tail.build();
        let second = tail.build();
        assert_eq!(first, second);
        assert_eq!(first.transfer_priority_cost(), 3_000);
    }

    /// L1 0 -> 2, walk 2 -> 3, L2 3 -> 4, with wait-time optimization.
    fn walking_transfer_tail(ctx: TailContext) -> OptimizedPathTail {
        let l1 = trip("L1", &[0, 1, 2], "10:00 10:10 10:20");
        let l2 = trip("L2", &[3, 4], "10:30 10:50");
        OptimizedPathTail::new(Arc::new(ctx), 0)
            .add_transit_tail(&leg(&l2, 0, 1), &egress(4, 0, 0))
            .add_transit_and_transfer_leg(
                &leg(&l1, 0, 2),
                &walk_transfer(&l1, 2, &l2, 0, 120, 24_000),
            )
            .access(&access(0, 0, 0))
    }

    #[test]
    fn walking_transfer() {
        let ctx = context()
            .with_transfer_priority(true)
            .with_wait_time_calculator(TransferWaitTimeCostCalculator::new(5.0, 120));
        let tail = walking_transfer_tail(ctx);

        let legs: Vec<_> = tail.legs().map(ToString::to_string).collect();
        assert_eq!(
            legs,
            ["Access 0s", "L1 10:00 10:20", "Walk 2m", "L2 10:30 10:50", "Egress 0s"]
        );

        let walk = tail.legs().find_map(PathLeg::as_transfer).unwrap();
        assert_eq!((walk.from_time, walk.to_time), (37_200, 37_320));

        // L2: 480s wait + board + transfer + 20 min ride
        let l2_cost = 48_000 + 6_000 + 12_000 + 120_000;
        // L1: board + 20 min ride
        let l1_cost = 6_000 + 120_000;
        assert_eq!(tail.generalized_cost(), l2_cost + 24_000 + l1_cost);
        assert_eq!(tail.transfer_priority_cost(), 3_000);
        // 480s wait after walking: 600 / (1 + 4 * 4) seconds
        assert_eq!(tail.wait_time_optimized_cost(), 3_529);
        assert_eq!(
            tail.generalized_cost_wait_time_optimized(),
            tail.generalized_cost() + 3_529
        );
        assert_eq!(tail.break_tie_cost(), 37_200 + 39_000);
    }

    #[test]
    fn stop_priority_cost_at_both_sides_of_transfer() {
        let costs: Arc<[i32]> = Arc::from(vec![0, 0, 1_000, 2_000, 0]);
        let base = walking_transfer_tail(context()).generalized_cost();
        let ctx =
            context().with_stop_priority_calculator(StopPriorityCostCalculator::new(1.0, costs));
        let tail = walking_transfer_tail(ctx);

        assert_eq!(tail.generalized_cost(), base + 1_000 + 2_000);
    }

    #[test]
    fn same_stop_transfer_has_no_transfer_leg() {
        let l1 = trip("L1", &[0, 1], "10:00 10:10");
        let l2 = trip("L2", &[1, 2], "10:15 10:30");
        let tail = OptimizedPathTail::new(Arc::new(context()), 0)
            .add_transit_tail(&leg(&l2, 0, 1), &egress(2, 0, 0))
            .add_transit_and_transfer_leg(&leg(&l1, 0, 1), &same_stop_transfer(&l1, 1, &l2, 0));

        assert_eq!(tail.legs().count(), 3);
        assert!(tail.legs().all(|l| !l.is_transfer()));
        assert_eq!(tail.head_transit().map(TransitLeg::alight_pos), Some(1));
    }

    #[test]
    fn facilitated_transfer_uses_fixed_wait_cost() {
        let l1 = trip("L1", &[0, 1], "10:00 10:10");
        let l2 = trip("L2", &[1, 2], "10:12 10:30");
        let calculator =
            TransferWaitTimeCostCalculator::new(5.0, 120).with_facilitated_costs(500, 100);
        let ctx = Arc::new(
            context()
                .with_transfer_priority(true)
                .with_wait_time_calculator(calculator),
        );

        let tx = TripToTripTransfer::new(
            crate::domain::TripStopTime::arrival(&l1, 1),
            crate::domain::TripStopTime::departure(&l2, 0),
            None,
            Some(TransferConstraint::guaranteed()),
        );
        let tail = OptimizedPathTail::new(ctx, 0)
            .add_transit_tail(&leg(&l2, 0, 1), &egress(2, 0, 0))
            .add_transit_and_transfer_leg(&leg(&l1, 0, 1), &tx);

        assert_eq!(tail.wait_time_optimized_cost(), 500);
        assert_eq!(tail.transfer_priority_cost(), 2_000);
        assert_eq!(
            tail.head_transit().and_then(TransitLeg::constraint_after),
            Some(&TransferConstraint::guaranteed())
        );
    }

    #[test]
    fn overlapping_legs_add_no_wait_cost() {
        // Stay-seated continuation departing before the arrival
        let l1 = trip("L1", &[0, 1], "10:00 10:20");
        let l2 = trip("L2", &[1, 2], "10:19 10:40");
        let calculator =
            TransferWaitTimeCostCalculator::new(5.0, 120).with_facilitated_costs(500, 100);
        let ctx = Arc::new(context().with_wait_time_calculator(calculator));

        let tx = TripToTripTransfer::new(
            crate::domain::TripStopTime::arrival(&l1, 1),
            crate::domain::TripStopTime::departure(&l2, 0),
            None,
            Some(TransferConstraint::stay_seated()),
        );
        let tail = OptimizedPathTail::new(ctx, 0)
            .add_transit_tail(&leg(&l2, 0, 1), &egress(2, 0, 0))
            .add_transit_and_transfer_leg(&leg(&l1, 0, 1), &tx);

        assert_eq!(tail.wait_time_optimized_cost(), 0);
        assert_eq!(tail.transfer_priority_cost(), 0);
    }

    #[test]
    fn mutate_branches_without_disturbing_original() {
        let l1 = trip("L1", &[0, 1, 2], "10:00 10:10 10:20");
        let l2 = trip("L2", &[1, 2, 3], "10:15 10:25 10:40");
        let seed = OptimizedPathTail::new(Arc::new(context()), 0)
            .add_transit_tail(&leg(&l2, 0, 2), &egress(3, 0, 0));

        let at_1 = seed
            .mutate()
            .add_transit_and_transfer_leg(&leg(&l1, 0, 2), &same_stop_transfer(&l1, 1, &l2, 0));
        let at_2 = seed
            .mutate()
            .add_transit_and_transfer_leg(&leg(&l1, 0, 2), &same_stop_transfer(&l1, 2, &l2, 1));

        assert_eq!(seed.legs().count(), 2);
        assert_eq!(seed.head_transit().map(TransitLeg::board_pos), Some(0));

        let boards: Vec<_> = at_1.transit_legs().map(|l| l.board_stop()).collect();
        assert_eq!(boards, [StopIndex(0), StopIndex(1)]);
        let boards: Vec<_> = at_2.transit_legs().map(|l| l.board_stop()).collect();
        assert_eq!(boards, [StopIndex(0), StopIndex(2)]);

        assert_eq!(at_1.break_tie_cost(), 36_600 + 38_400);
        assert_eq!(at_2.break_tie_cost(), 37_200 + 38_400);
    }

    #[test]
    fn flex_access_transfer() {
        let l1 = trip("L1", &[1, 2], "10:00 10:20");
        let mut tail = OptimizedPathTail::new(Arc::new(context()), 0)
            .add_transit_tail(&leg(&l1, 0, 1), &egress(2, 0, 0));
        tail.change_head_boarding_position(0);

        let tail = tail
            .transfer(&Transfer::new(StopIndex(1), 300, 30_000), StopIndex(0))
            .access(&AccessEgress::flex(StopIndex(0), 600, 90_000));

        let path = tail.build();
        assert_eq!(path.path().access_transfer().map(|t| t.from_time), Some(35_700));
        assert_eq!(path.path().access().from_time, 35_100);
        assert_eq!(path.generalized_cost(), 90_000 + 30_000 + 6_000 + 120_000);
    }

    #[test]
    #[should_panic(expected = "not a transit leg")]
    fn transfer_after_access_panics() {
        let l1 = trip("L1", &[0, 1], "10:00 10:20");
        let mut tail = OptimizedPathTail::new(Arc::new(context()), 0)
            .add_transit_tail(&leg(&l1, 0, 1), &egress(1, 0, 0))
            .access(&access(0, 0, 0));
        tail.change_head_boarding_position(0);
    }

    #[test]
    #[should_panic(expected = "incomplete tail")]
    fn build_incomplete_panics() {
        let l1 = trip("L1", &[0, 1], "10:00 10:20");
        OptimizedPathTail::new(Arc::new(context()), 0)
            .add_transit_tail(&leg(&l1, 0, 1), &egress(1, 0, 0))
            .build();
    }
}

//! Generalized cost of transit legs.
//!
//! Costs are integers in centi-seconds: one second of unweighted travel time
//! costs 100. The optimizer never computes the cost of a ride itself; it asks
//! a `CostCalculator` so it ranks paths the same way the router does.

use crate::domain::{StopIndex, TransferConstraint, Trip};

/// Converts seconds to cost (centi-seconds).
pub fn to_cost(seconds: i32) -> i32 {
    seconds * 100
}

/// Converts fractional seconds to cost, rounding to the nearest centi-second.
pub fn to_cost_f64(seconds: f64) -> i32 {
    (seconds * 100.0).round() as i32
}

fn weighted(factor: f64, seconds: i32) -> i32 {
    (factor * f64::from(to_cost(seconds))).round() as i32
}

/// Computes the generalized cost of boarding and riding a trip.
pub trait CostCalculator: Send + Sync {
    /// Cost of waiting for and boarding a trip.
    ///
    /// `prev_arrival_time` is when the passenger arrived at the board stop
    /// (including slack). `constraint` is the transfer constraint governing
    /// the boarding, if any.
    fn boarding_cost(
        &self,
        first_boarding: bool,
        prev_arrival_time: i32,
        board_stop: StopIndex,
        board_time: i32,
        trip: &Trip,
        constraint: Option<&TransferConstraint>,
    ) -> i32;

    /// Total cost of a ride, given the cost of boarding it.
    fn transit_arrival_cost(
        &self,
        boarding_cost: i32,
        alight_slack: i32,
        transit_time: i32,
        trip: &Trip,
        to_stop: StopIndex,
    ) -> i32;
}

/// Cost calculator with board/transfer penalties and time reluctances.
///
/// - Regular boarding: wait time times the wait reluctance, plus the board
///   cost, plus the transfer cost and the stop's transfer cost unless it is
///   the first boarding.
/// - Stay-seated boarding: the wait is ridden in the vehicle, so it costs
///   like transit time and no board cost applies.
/// - Guaranteed boarding: the wait only, no board cost.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultCostCalculator {
    board_cost: i32,
    transfer_cost: i32,
    wait_reluctance: f64,
    transit_reluctances: Vec<f64>,
    stop_transfer_costs: Option<Vec<i32>>,
}

impl DefaultCostCalculator {
    /// # Arguments
    ///
    /// * `board_cost_secs` - Penalty for every boarding, in seconds
    /// * `transfer_cost_secs` - Extra penalty for boardings after the first
    /// * `wait_reluctance` - Weight of waiting time
    /// * `transit_reluctances` - Weight of in-vehicle time, indexed by the
    ///   pattern's transit reluctance index. Missing entries weigh 1.0.
    pub fn new(
        board_cost_secs: i32,
        transfer_cost_secs: i32,
        wait_reluctance: f64,
        transit_reluctances: &[f64],
    ) -> Self {
        Self {
            board_cost: to_cost(board_cost_secs),
            transfer_cost: to_cost(transfer_cost_secs),
            wait_reluctance,
            transit_reluctances: transit_reluctances.to_vec(),
            stop_transfer_costs: None,
        }
    }

    /// Sets a per-stop cost (centi-seconds) for transferring at each stop.
    pub fn with_stop_transfer_costs(mut self, costs: Vec<i32>) -> Self {
        self.stop_transfer_costs = Some(costs);
        self
    }

    fn transit_reluctance(&self, trip: &Trip) -> f64 {
        self.transit_reluctances
            .get(trip.pattern().transit_reluctance_index())
            .copied()
            .unwrap_or(1.0)
    }

    fn stop_transfer_cost(&self, stop: StopIndex) -> i32 {
        self.stop_transfer_costs
            .as_ref()
            .and_then(|costs| costs.get(stop.0).copied())
            .unwrap_or(0)
    }
}

impl CostCalculator for DefaultCostCalculator {
    fn boarding_cost(
        &self,
        first_boarding: bool,
        prev_arrival_time: i32,
        board_stop: StopIndex,
        board_time: i32,
        trip: &Trip,
        constraint: Option<&TransferConstraint>,
    ) -> i32 {
        let wait_time = board_time - prev_arrival_time;

        match constraint {
            Some(c) if c.is_stay_seated() => weighted(self.transit_reluctance(trip), wait_time),
            Some(c) if c.is_guaranteed() => weighted(self.wait_reluctance, wait_time),
            _ => {
                let mut cost = weighted(self.wait_reluctance, wait_time) + self.board_cost;
                if !first_boarding {
                    cost += self.transfer_cost + self.stop_transfer_cost(board_stop);
                }
                cost
            }
        }
    }

    fn transit_arrival_cost(
        &self,
        boarding_cost: i32,
        alight_slack: i32,
        transit_time: i32,
        trip: &Trip,
        to_stop: StopIndex,
    ) -> i32 {
        boarding_cost
            + weighted(self.transit_reluctance(trip), transit_time)
            + weighted(self.wait_reluctance, alight_slack)
            + self.stop_transfer_cost(to_stop)
    }
}

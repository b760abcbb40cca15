//! Paths through the transit network.
//!
//! A `Path` is the itinerary handed to the optimizer by the routing search.
//! An `OptimizedPath` is the same itinerary after its transfer points have
//! been chosen, together with the costs used to rank it.

use super::{
    AccessEgress, AccessLeg, DomainError, EgressLeg, PathLeg, StopIndex, Transfer, TransferLeg,
    TransitLeg,
};

/// A complete itinerary from access to egress.
///
/// # Invariants
///
/// - Shape: `Access (Transfer)? Transit ((Transfer)? Transit)* Egress`
/// - A transfer directly after the access requires a flex access (`has_rides`)
/// - Consecutive legs meet at the same stop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    iteration_departure_time: i32,
    legs: Vec<PathLeg>,
}

impl Path {
    /// Constructs a path from legs, validating its shape.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - The legs list is empty
    /// - The path does not start with access and end with egress
    /// - There is no transit leg, or two transfers follow each other
    /// - Consecutive legs do not meet at the same stop
    pub fn new(iteration_departure_time: i32, legs: Vec<PathLeg>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyPath);
        }
        let PathLeg::Access(access) = &legs[0] else {
            return Err(DomainError::InvalidPath("path must start with an access leg"));
        };
        if legs.len() < 3 || !matches!(legs.last(), Some(PathLeg::Egress(_))) {
            return Err(DomainError::InvalidPath("path must end with an egress leg"));
        }

        let inner = &legs[1..legs.len() - 1];
        let mut prev_transfer = false;
        for (i, leg) in inner.iter().enumerate() {
            match leg {
                PathLeg::Access(_) | PathLeg::Egress(_) => {
                    return Err(DomainError::InvalidPath(
                        "access and egress legs must be at the ends",
                    ));
                }
                PathLeg::Transfer(_) if prev_transfer => {
                    return Err(DomainError::InvalidPath("transfers must be separated by transit"));
                }
                PathLeg::Transfer(_) if i == 0 && !access.access.has_rides => {
                    return Err(DomainError::InvalidPath(
                        "only a flex access can be followed by a transfer",
                    ));
                }
                _ => {}
            }
            prev_transfer = leg.is_transfer();
        }
        if !inner.iter().any(PathLeg::is_transit) {
            return Err(DomainError::InvalidPath("path must have a transit leg"));
        }
        if prev_transfer {
            return Err(DomainError::InvalidPath("egress must follow a transit leg"));
        }

        for window in legs.windows(2) {
            if let (Some(to), Some(from)) = (window[0].to_stop(), window[1].from_stop()) {
                if to != from {
                    return Err(DomainError::LegsNotConnected(to, from));
                }
            }
        }

        Ok(Self {
            iteration_departure_time,
            legs,
        })
    }

    /// Legs already known to form a valid path.
    pub(crate) fn new_unchecked(iteration_departure_time: i32, legs: Vec<PathLeg>) -> Self {
        debug_assert!(Self::new(iteration_departure_time, legs.clone()).is_ok());
        Self {
            iteration_departure_time,
            legs,
        }
    }

    /// Constructs a path from transit legs, inserting street legs around them.
    ///
    /// Street legs are timed to meet the transit legs without any slack: the
    /// access arrives as the first trip departs, transfers and egress leave
    /// as the previous trip arrives. A flex access may walk to the first
    /// board stop.
    ///
    /// # Arguments
    ///
    /// * `transfer_between` - Street transfer between two stops, `None` if
    ///   there is none
    ///
    /// # Errors
    ///
    /// Returns `Err` if there are no transit legs, or if consecutive stops
    /// differ and no transfer connects them.
    pub fn from_transit_legs<F>(
        iteration_departure_time: i32,
        access: AccessEgress,
        transit_legs: Vec<TransitLeg>,
        egress: AccessEgress,
        transfer_between: F,
    ) -> Result<Self, DomainError>
    where
        F: Fn(StopIndex, StopIndex) -> Option<Transfer>,
    {
        let (Some(first), Some(last)) = (transit_legs.first(), transit_legs.last()) else {
            return Err(DomainError::InvalidPath("path must have a transit leg"));
        };
        let (board_stop, board_time) = (first.board_stop(), first.from_time());
        let (alight_stop, alight_time) = (last.alight_stop(), last.to_time());

        if egress.stop != alight_stop {
            return Err(DomainError::LegsNotConnected(alight_stop, egress.stop));
        }

        let mut legs = Vec::with_capacity(transit_legs.len() * 2 + 2);

        if access.stop == board_stop {
            legs.push(PathLeg::Access(AccessLeg::arriving_at(access, board_time)));
        } else if access.has_rides {
            let transfer = transfer_between(access.stop, board_stop)
                .ok_or(DomainError::LegsNotConnected(access.stop, board_stop))?;
            let walk = TransferLeg::arriving_at(access.stop, transfer, board_time);
            legs.push(PathLeg::Access(AccessLeg::arriving_at(access, walk.from_time)));
            legs.push(PathLeg::Transfer(walk));
        } else {
            return Err(DomainError::LegsNotConnected(access.stop, board_stop));
        }

        let mut prev_alight: Option<(StopIndex, i32)> = None;
        for leg in transit_legs {
            if let Some((stop, time)) = prev_alight {
                let next = leg.board_stop();
                if stop != next {
                    let transfer = transfer_between(stop, next)
                        .ok_or(DomainError::LegsNotConnected(stop, next))?;
                    legs.push(PathLeg::Transfer(TransferLeg::departing_at(stop, transfer, time)));
                }
            }
            prev_alight = Some((leg.alight_stop(), leg.to_time()));
            legs.push(PathLeg::Transit(leg));
        }

        legs.push(PathLeg::Egress(EgressLeg::departing_at(egress, alight_time)));
        Self::new(iteration_departure_time, legs)
    }

    /// Departure time of the search iteration that found this path.
    pub fn iteration_departure_time(&self) -> i32 {
        self.iteration_departure_time
    }

    pub fn legs(&self) -> &[PathLeg] {
        &self.legs
    }

    pub fn access(&self) -> &AccessLeg {
        match &self.legs[0] {
            PathLeg::Access(a) => a,
            _ => unreachable!("path starts with access (validated at construction)"),
        }
    }

    /// Transfer between a flex access and the first transit leg, if any.
    pub fn access_transfer(&self) -> Option<&TransferLeg> {
        self.legs.get(1).and_then(PathLeg::as_transfer)
    }

    pub fn egress(&self) -> &EgressLeg {
        match self.legs.last() {
            Some(PathLeg::Egress(e)) => e,
            _ => unreachable!("path ends with egress (validated at construction)"),
        }
    }

    /// Returns all transit legs in order.
    pub fn transit_legs(&self) -> impl Iterator<Item = &TransitLeg> {
        self.legs.iter().filter_map(PathLeg::as_transit)
    }

    pub fn number_of_transfers(&self) -> usize {
        self.transit_legs().count().saturating_sub(1)
    }

    /// Start of the access leg.
    pub fn start_time(&self) -> i32 {
        self.access().from_time
    }

    /// End of the egress leg.
    pub fn end_time(&self) -> i32 {
        self.egress().to_time
    }

    pub fn duration(&self) -> i32 {
        self.end_time() - self.start_time()
    }
}

impl std::fmt::Display for Path {
    /// Legs separated by the stops where they meet, e.g.
    /// `Access 1m ~ 0 ~ L1 10:00 10:20 ~ 1 ~ Egress 2m`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, leg) in self.legs.iter().enumerate() {
            if i > 0 {
                if let Some(stop) = leg.from_stop() {
                    write!(f, " ~ {stop} ~ ")?;
                }
            }
            write!(f, "{leg}")?;
        }
        Ok(())
    }
}

/// A path with its transfer points chosen, and the costs it was ranked by.
///
/// All costs are in centi-seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedPath {
    path: Path,
    generalized_cost: i32,
    transfer_priority_cost: i32,
    wait_time_optimized_cost: i32,
    break_tie_cost: i32,
}

impl OptimizedPath {
    pub(crate) fn new(
        path: Path,
        generalized_cost: i32,
        transfer_priority_cost: i32,
        wait_time_optimized_cost: i32,
        break_tie_cost: i32,
    ) -> Self {
        Self {
            path,
            generalized_cost,
            transfer_priority_cost,
            wait_time_optimized_cost,
            break_tie_cost,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn legs(&self) -> &[PathLeg] {
        self.path.legs()
    }

    pub fn iteration_departure_time(&self) -> i32 {
        self.path.iteration_departure_time()
    }

    pub fn generalized_cost(&self) -> i32 {
        self.generalized_cost
    }

    pub fn transfer_priority_cost(&self) -> i32 {
        self.transfer_priority_cost
    }

    pub fn wait_time_optimized_cost(&self) -> i32 {
        self.wait_time_optimized_cost
    }

    pub fn generalized_cost_wait_time_optimized(&self) -> i32 {
        self.generalized_cost + self.wait_time_optimized_cost
    }

    pub fn break_tie_cost(&self) -> i32 {
        self.break_tie_cost
    }

    pub fn into_path(self) -> Path {
        self.path
    }
}

impl std::fmt::Display for OptimizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [c1 {} tp {} wt {}]",
            self.path,
            self.generalized_cost,
            self.transfer_priority_cost,
            self.wait_time_optimized_cost
        )
    }
}

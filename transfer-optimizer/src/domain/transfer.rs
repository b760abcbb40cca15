//! Transfers between trips.
//!
//! A `Transfer` is the physical move between two stops (a walk, usually). A
//! `TransferConstraint` carries the timetable agreements that may govern a
//! transfer between two specific trips: priority, guaranteed connections and
//! stay-seated continuations. A `TripToTripTransfer` joins an arrival on one
//! trip to a departure on the next.

use super::{StopIndex, TripStopTime};

/// Cost of a transfer without any facilitation, in centi-seconds.
const NONE_FACILITATED_COST: i32 = 3_000;
const GUARANTEED_COST: i32 = 2_000;
const STAY_SEATED_COST: i32 = 1_000;

/// A street transfer from one stop to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub to_stop: StopIndex,
    pub duration_in_seconds: i32,
    /// Generalized cost of the transfer in centi-seconds.
    pub generalized_cost: i32,
}

impl Transfer {
    pub fn new(to_stop: StopIndex, duration_in_seconds: i32, generalized_cost: i32) -> Self {
        Self {
            to_stop,
            duration_in_seconds,
            generalized_cost,
        }
    }
}

/// Priority given to a constrained transfer by the timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransferPriority {
    NotAllowed,
    #[default]
    Allowed,
    Recommended,
    Preferred,
}

impl TransferPriority {
    /// Cost in centi-seconds. Lower is better; `NotAllowed` is prohibitive.
    pub fn cost(self) -> i32 {
        match self {
            TransferPriority::NotAllowed => 100_000,
            TransferPriority::Allowed => 0,
            TransferPriority::Recommended => -100,
            TransferPriority::Preferred => -200,
        }
    }
}

/// Timetable constraint on a transfer between two trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TransferConstraint {
    pub priority: TransferPriority,
    pub stay_seated: bool,
    pub guaranteed: bool,
}

impl TransferConstraint {
    /// A constraint that only sets the priority.
    pub fn with_priority(priority: TransferPriority) -> Self {
        Self {
            priority,
            ..Self::default()
        }
    }

    /// A guaranteed transfer: the departing trip waits for the arriving one.
    pub fn guaranteed() -> Self {
        Self {
            guaranteed: true,
            ..Self::default()
        }
    }

    /// A stay-seated transfer: the passenger stays on board while the
    /// vehicle continues as another trip.
    pub fn stay_seated() -> Self {
        Self {
            stay_seated: true,
            ..Self::default()
        }
    }

    pub fn is_facilitated(&self) -> bool {
        self.stay_seated || self.guaranteed
    }

    pub fn is_guaranteed(&self) -> bool {
        self.guaranteed
    }

    pub fn is_stay_seated(&self) -> bool {
        self.stay_seated
    }

    /// Cost used to rank transfers by their constraint, in centi-seconds.
    ///
    /// Stay-seated beats guaranteed, which beats an ordinary transfer; the
    /// priority then adjusts the cost within each tier. A transfer without
    /// a constraint costs the same as an ordinary allowed transfer. The
    /// result is never negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use transfer_optimizer::domain::{TransferConstraint, TransferPriority};
    ///
    /// assert_eq!(TransferConstraint::priority_cost(None), 3_000);
    /// assert_eq!(TransferConstraint::priority_cost(Some(&TransferConstraint::guaranteed())), 2_000);
    ///
    /// let preferred = TransferConstraint::with_priority(TransferPriority::Preferred);
    /// assert_eq!(TransferConstraint::priority_cost(Some(&preferred)), 2_800);
    /// ```
    pub fn priority_cost(constraint: Option<&TransferConstraint>) -> i32 {
        let Some(c) = constraint else {
            return NONE_FACILITATED_COST + TransferPriority::Allowed.cost();
        };
        let facilitation = if c.stay_seated {
            STAY_SEATED_COST
        } else if c.guaranteed {
            GUARANTEED_COST
        } else {
            NONE_FACILITATED_COST
        };
        facilitation + c.priority.cost()
    }
}

/// A feasible transfer from an arrival on one trip to a departure on the next.
///
/// # Invariants
///
/// - `from` is an arrival and `to` is a departure
/// - A transfer between different stops carries the street transfer used
/// - A street transfer ends at the stop `to` departs from
#[derive(Debug, Clone, PartialEq)]
pub struct TripToTripTransfer {
    from: TripStopTime,
    to: TripStopTime,
    transfer: Option<Transfer>,
    constraint: Option<TransferConstraint>,
}

impl TripToTripTransfer {
    /// # Panics
    ///
    /// Panics if `from` is not an arrival or `to` is not a departure. Also
    /// panics if the stops differ and no street transfer is given, or if the
    /// street transfer ends somewhere other than the stop of `to`.
    pub fn new(
        from: TripStopTime,
        to: TripStopTime,
        transfer: Option<Transfer>,
        constraint: Option<TransferConstraint>,
    ) -> Self {
        assert!(from.is_arrival(), "transfer must start at an arrival: {from}");
        assert!(to.is_departure(), "transfer must end at a departure: {to}");
        assert!(
            transfer.is_some() || from.stop() == to.stop(),
            "transfer between different stops needs a street transfer: {from} -> {to}"
        );
        if let Some(t) = &transfer {
            assert!(
                t.to_stop == to.stop(),
                "street transfer ends at {} but the next trip departs from {to}",
                t.to_stop
            );
        }
        Self {
            from,
            to,
            transfer,
            constraint,
        }
    }

    pub fn from(&self) -> &TripStopTime {
        &self.from
    }

    pub fn to(&self) -> &TripStopTime {
        &self.to
    }

    /// The street transfer, absent for same-stop transfers.
    pub fn transfer(&self) -> Option<&Transfer> {
        self.transfer.as_ref()
    }

    pub fn constraint(&self) -> Option<&TransferConstraint> {
        self.constraint.as_ref()
    }

    pub fn same_stop(&self) -> bool {
        self.from.stop() == self.to.stop()
    }

    /// Walking time in seconds; zero when the transfer stays at one stop.
    pub fn transfer_duration(&self) -> i32 {
        if self.same_stop() {
            return 0;
        }
        self.transfer.map_or(0, |t| t.duration_in_seconds)
    }
}

impl std::fmt::Display for TripToTripTransfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.from)?;
        if let Some(t) = self.transfer.filter(|_| !self.same_stop()) {
            write!(f, " ~ walk {}s", t.duration_in_seconds)?;
        }
        write!(f, " -> {}", self.to)
    }
}

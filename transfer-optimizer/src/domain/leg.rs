//! Path legs.
//!
//! A path is a sequence of legs: an access leg to the first stop, transit
//! legs connected by optional street transfers, and an egress leg from the
//! last stop. Transit legs use `Arc<Trip>` for cheap cloning while the
//! optimizer branches over transfer points.

use std::sync::Arc;

use super::time::{format_duration, format_time};
use super::{DomainError, StopIndex, Transfer, TransferConstraint, Trip};

/// Street access to (or egress from) the transit network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessEgress {
    /// Stop where the access ends (or the egress starts).
    pub stop: StopIndex,
    pub duration_in_seconds: i32,
    /// Generalized cost in centi-seconds.
    pub generalized_cost: i32,
    /// Flex access that already includes a ride; it may be followed by a
    /// transfer before the first transit leg.
    pub has_rides: bool,
}

impl AccessEgress {
    pub fn new(stop: StopIndex, duration_in_seconds: i32, generalized_cost: i32) -> Self {
        Self {
            stop,
            duration_in_seconds,
            generalized_cost,
            has_rides: false,
        }
    }

    /// Flex access or egress that includes a ride.
    pub fn flex(stop: StopIndex, duration_in_seconds: i32, generalized_cost: i32) -> Self {
        Self {
            has_rides: true,
            ..Self::new(stop, duration_in_seconds, generalized_cost)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessLeg {
    pub access: AccessEgress,
    pub from_time: i32,
    pub to_time: i32,
}

impl AccessLeg {
    /// Access arriving at its stop at `to_time`.
    pub fn arriving_at(access: AccessEgress, to_time: i32) -> Self {
        Self {
            access,
            from_time: to_time - access.duration_in_seconds,
            to_time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferLeg {
    pub from_stop: StopIndex,
    pub transfer: Transfer,
    pub from_time: i32,
    pub to_time: i32,
}

impl TransferLeg {
    /// Transfer leaving `from_stop` at `from_time`.
    pub fn departing_at(from_stop: StopIndex, transfer: Transfer, from_time: i32) -> Self {
        Self {
            from_stop,
            transfer,
            from_time,
            to_time: from_time + transfer.duration_in_seconds,
        }
    }

    /// Transfer reaching its destination at `to_time`.
    pub fn arriving_at(from_stop: StopIndex, transfer: Transfer, to_time: i32) -> Self {
        Self {
            from_stop,
            transfer,
            from_time: to_time - transfer.duration_in_seconds,
            to_time,
        }
    }

    pub fn to_stop(&self) -> StopIndex {
        self.transfer.to_stop
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EgressLeg {
    pub egress: AccessEgress,
    pub from_time: i32,
    pub to_time: i32,
}

impl EgressLeg {
    /// Egress leaving its stop at `from_time`.
    pub fn departing_at(egress: AccessEgress, from_time: i32) -> Self {
        Self {
            egress,
            from_time,
            to_time: from_time + egress.duration_in_seconds,
        }
    }
}

/// A ride on one trip from a board to an alight stop position.
///
/// # Invariants
///
/// - `board_pos < alight_pos < trip.number_of_stops()`
#[derive(Debug, Clone)]
pub struct TransitLeg {
    trip: Arc<Trip>,
    board_pos: usize,
    alight_pos: usize,
    constraint_after: Option<TransferConstraint>,
}

impl TransitLeg {
    /// # Errors
    ///
    /// Returns `Err` if `alight_pos <= board_pos` or `alight_pos` is past
    /// the last stop of the trip.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use transfer_optimizer::domain::{StopIndex, TransitLeg, Trip, TripPattern};
    ///
    /// let stops = vec![StopIndex(0), StopIndex(1), StopIndex(2)];
    /// let pattern = Arc::new(TripPattern::new("L1", stops).unwrap());
    /// let trip = Arc::new(Trip::from_stop_times("T1", pattern, vec![0, 300, 600]).unwrap());
    ///
    /// let leg = TransitLeg::new(Arc::clone(&trip), 0, 2).unwrap();
    /// assert_eq!(leg.duration(), 600);
    /// assert_eq!(leg.alight_stop(), StopIndex(2));
    ///
    /// assert!(TransitLeg::new(trip, 2, 1).is_err());
    /// ```
    pub fn new(trip: Arc<Trip>, board_pos: usize, alight_pos: usize) -> Result<Self, DomainError> {
        if alight_pos <= board_pos {
            return Err(DomainError::InvalidLeg("alight position must be after board position"));
        }
        if alight_pos >= trip.number_of_stops() {
            return Err(DomainError::InvalidStopPosition {
                position: alight_pos,
                number_of_stops: trip.number_of_stops(),
            });
        }
        Ok(Self {
            trip,
            board_pos,
            alight_pos,
            constraint_after: None,
        })
    }

    /// Sets the constraint governing the transfer after this leg.
    pub fn with_constraint_after(mut self, constraint: Option<TransferConstraint>) -> Self {
        self.constraint_after = constraint;
        self
    }

    /// Moves the board position, keeping the alight position.
    ///
    /// # Panics
    ///
    /// Panics if `board_pos` is not before the alight position.
    pub(crate) fn with_board_pos(mut self, board_pos: usize) -> Self {
        assert!(
            board_pos < self.alight_pos,
            "board position {board_pos} must be before alight position {} on {}",
            self.alight_pos,
            self.trip
        );
        self.board_pos = board_pos;
        self
    }

    pub fn trip(&self) -> &Arc<Trip> {
        &self.trip
    }

    pub fn board_pos(&self) -> usize {
        self.board_pos
    }

    pub fn alight_pos(&self) -> usize {
        self.alight_pos
    }

    pub fn board_stop(&self) -> StopIndex {
        self.trip.stop(self.board_pos)
    }

    pub fn alight_stop(&self) -> StopIndex {
        self.trip.stop(self.alight_pos)
    }

    pub fn from_time(&self) -> i32 {
        self.trip.departure(self.board_pos)
    }

    pub fn to_time(&self) -> i32 {
        self.trip.arrival(self.alight_pos)
    }

    /// In-vehicle time in seconds.
    pub fn duration(&self) -> i32 {
        self.to_time() - self.from_time()
    }

    pub fn constraint_after(&self) -> Option<&TransferConstraint> {
        self.constraint_after.as_ref()
    }
}

impl PartialEq for TransitLeg {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.trip, &other.trip)
            && self.board_pos == other.board_pos
            && self.alight_pos == other.alight_pos
            && self.constraint_after == other.constraint_after
    }
}

impl Eq for TransitLeg {}

/// One leg of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathLeg {
    Access(AccessLeg),
    Transfer(TransferLeg),
    Transit(TransitLeg),
    Egress(EgressLeg),
}

impl PathLeg {
    /// Stop the leg starts at; `None` for access (it starts on the street).
    pub fn from_stop(&self) -> Option<StopIndex> {
        match self {
            PathLeg::Access(_) => None,
            PathLeg::Transfer(t) => Some(t.from_stop),
            PathLeg::Transit(t) => Some(t.board_stop()),
            PathLeg::Egress(e) => Some(e.egress.stop),
        }
    }

    /// Stop the leg ends at; `None` for egress (it ends on the street).
    pub fn to_stop(&self) -> Option<StopIndex> {
        match self {
            PathLeg::Access(a) => Some(a.access.stop),
            PathLeg::Transfer(t) => Some(t.to_stop()),
            PathLeg::Transit(t) => Some(t.alight_stop()),
            PathLeg::Egress(_) => None,
        }
    }

    pub fn from_time(&self) -> i32 {
        match self {
            PathLeg::Access(a) => a.from_time,
            PathLeg::Transfer(t) => t.from_time,
            PathLeg::Transit(t) => t.from_time(),
            PathLeg::Egress(e) => e.from_time,
        }
    }

    pub fn to_time(&self) -> i32 {
        match self {
            PathLeg::Access(a) => a.to_time,
            PathLeg::Transfer(t) => t.to_time,
            PathLeg::Transit(t) => t.to_time(),
            PathLeg::Egress(e) => e.to_time,
        }
    }

    pub fn as_transit(&self) -> Option<&TransitLeg> {
        match self {
            PathLeg::Transit(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_transfer(&self) -> Option<&TransferLeg> {
        match self {
            PathLeg::Transfer(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_transit(&self) -> bool {
        matches!(self, PathLeg::Transit(_))
    }

    pub fn is_transfer(&self) -> bool {
        matches!(self, PathLeg::Transfer(_))
    }
}

impl std::fmt::Display for PathLeg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathLeg::Access(a) => {
                write!(f, "Access {}", format_duration(a.access.duration_in_seconds))
            }
            PathLeg::Transfer(t) => {
                write!(f, "Walk {}", format_duration(t.transfer.duration_in_seconds))
            }
            PathLeg::Transit(t) => write!(
                f,
                "{} {} {}",
                t.trip.pattern().label(),
                format_time(t.from_time()),
                format_time(t.to_time())
            ),
            PathLeg::Egress(e) => {
                write!(f, "Egress {}", format_duration(e.egress.duration_in_seconds))
            }
        }
    }
}

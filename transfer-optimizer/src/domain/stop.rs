//! Stop identity and stop-time events.
//!
//! A `StopIndex` identifies a stop in the transit model. A `StopTime` is a
//! bare (stop, time) pair that is not bound to any trip.

use super::time::format_time;

/// Index of a stop in the transit model.
///
/// Stops are referenced by index rather than by id so per-stop data (such as
/// board/alight costs) can live in flat arrays.
///
/// # Examples
///
/// ```
/// use transfer_optimizer::domain::StopIndex;
///
/// let stop = StopIndex(7);
/// assert_eq!(stop.0, 7);
/// assert_eq!(stop.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopIndex(pub usize);

impl std::fmt::Display for StopIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for StopIndex {
    fn from(value: usize) -> Self {
        StopIndex(value)
    }
}

impl From<StopIndex> for usize {
    fn from(value: StopIndex) -> Self {
        value.0
    }
}

/// An event at a stop at a given service time (seconds since service start).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StopTime {
    pub stop: StopIndex,
    pub time: i32,
}

impl StopTime {
    pub fn new(stop: StopIndex, time: i32) -> Self {
        Self { stop, time }
    }

    /// Seconds from this event to `other`. Negative if `other` is earlier.
    ///
    /// # Examples
    ///
    /// ```
    /// use transfer_optimizer::domain::{StopIndex, StopTime};
    ///
    /// let a = StopTime::new(StopIndex(1), 100);
    /// let b = StopTime::new(StopIndex(2), 160);
    /// assert_eq!(a.duration(&b), 60);
    /// assert_eq!(b.duration(&a), -60);
    /// ```
    pub fn duration(&self, other: &StopTime) -> i32 {
        other.time - self.time
    }
}

impl std::fmt::Display for StopTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} {}]", self.stop, format_time(self.time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_time_display() {
        let st = StopTime::new(StopIndex(3), 36_000);
        assert_eq!(st.to_string(), "[3 10:00]");
    }

    #[test]
    fn stop_index_conversions() {
        let idx: StopIndex = 4.into();
        assert_eq!(idx, StopIndex(4));
        assert_eq!(usize::from(idx), 4);
        assert!(StopIndex(1) < StopIndex(2));
    }
}

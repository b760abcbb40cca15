//! Board, alight and transfer slack.
//!
//! Slack is the margin the router adds around a transit ride: time to get on
//! before departure, time to get off after arrival, and time to prepare for
//! a street transfer. Slack is looked up by the pattern's slack index so
//! different modes can use different margins.

use chrono::Duration;

/// Provides slack in seconds.
///
/// Implementations must be `Send + Sync` so one provider can be shared by
/// optimizations running on different threads.
pub trait SlackProvider: Send + Sync {
    /// Time to board before a trip departs, for the given slack index.
    fn board_slack(&self, slack_index: usize) -> i32;

    /// Time to alight after a trip arrives, for the given slack index.
    fn alight_slack(&self, slack_index: usize) -> i32;

    /// Time added before a street transfer starts.
    fn transfer_slack(&self) -> i32;

    /// Total slack around one ride.
    fn transit_slack(&self, slack_index: usize) -> i32 {
        self.board_slack(slack_index) + self.alight_slack(slack_index)
    }
}

/// Slack provider with one value per kind, regardless of mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultSlackProvider {
    transfer_slack: i32,
    board_slack: i32,
    alight_slack: i32,
}

impl DefaultSlackProvider {
    pub fn new(transfer_slack: i32, board_slack: i32, alight_slack: i32) -> Self {
        Self {
            transfer_slack,
            board_slack,
            alight_slack,
        }
    }

    /// Creates a provider from durations, truncated to whole seconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Duration;
    /// use transfer_optimizer::optimizer::{DefaultSlackProvider, SlackProvider};
    ///
    /// let slack = DefaultSlackProvider::from_durations(
    ///     Duration::minutes(2),
    ///     Duration::seconds(30),
    ///     Duration::seconds(10),
    /// );
    /// assert_eq!(slack.transfer_slack(), 120);
    /// assert_eq!(slack.transit_slack(0), 40);
    /// ```
    pub fn from_durations(transfer: Duration, board: Duration, alight: Duration) -> Self {
        Self::new(seconds(transfer), seconds(board), seconds(alight))
    }
}

fn seconds(d: Duration) -> i32 {
    i32::try_from(d.num_seconds()).unwrap_or(i32::MAX)
}

impl SlackProvider for DefaultSlackProvider {
    fn board_slack(&self, _slack_index: usize) -> i32 {
        self.board_slack
    }

    fn alight_slack(&self, _slack_index: usize) -> i32 {
        self.alight_slack
    }

    fn transfer_slack(&self) -> i32 {
        self.transfer_slack
    }
}

/// Work item state definitions for tracking scrape progress
///
/// Each work item moves through
/// `Pending -> Fetching -> Extracting -> Completed` on the happy path,
/// or drops into `Failed` from `Fetching` or `Extracting`.
use std::fmt;

/// Represents the current state of a work item in the scrape process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemState {
    /// Item is waiting its turn in the worklist
    Pending,

    /// Item's URL is currently being fetched
    Fetching,

    /// Item's body is being extracted into a record
    Extracting,

    /// Item completed with a record
    Completed,

    /// Item ended with a recorded failure reason
    Failed,
}

impl ItemState {
    /// Returns true if this is a terminal state (no further processing)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns true if `next` is a legal successor of this state
    ///
    /// The pipeline drives items strictly forward; this check backs the
    /// debug assertions guarding the transitions.
    pub fn can_transition_to(&self, next: ItemState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Fetching)
                | (Self::Fetching, Self::Extracting)
                | (Self::Fetching, Self::Failed)
                | (Self::Extracting, Self::Completed)
                | (Self::Extracting, Self::Failed)
        )
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

#![forbid(unsafe_code)]

//! Lifecycle phases and operation outcomes.

use std::fmt;

/// Current phase of the dialog lifecycle.
///
/// State machine: Closed -> Opening -> Open -> Closing -> Closed
///
/// `Opening` and `Closing` last until the panel's opacity transition ends
/// (or the dialog is settled). Requests arriving in those phases are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialogPhase {
    /// Not rendered; initial state.
    #[default]
    Closed,
    /// Visible, waiting for the entrance transition to finish.
    Opening,
    /// Fully open.
    Open,
    /// Dismissed, waiting for the exit transition to finish.
    Closing,
}

impl DialogPhase {
    /// Check if the container is rendered.
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Check if a transition is in flight.
    #[inline]
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Open => "open",
            Self::Closing => "closing",
        }
    }
}

impl fmt::Display for DialogPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a `show`/`hide` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionOutcome {
    /// The transition began.
    Started,
    /// An observer canceled the pre-transition notification.
    Canceled,
    /// Not valid from the current phase (or the dialog is not mounted); nothing happened.
    Ignored,
}

impl TransitionOutcome {
    /// Only cancellation counts as failure.
    #[inline]
    pub fn is_success(self) -> bool {
        !matches!(self, Self::Canceled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_by_phase() {
        assert!(!DialogPhase::Closed.is_visible());
        assert!(DialogPhase::Opening.is_visible());
        assert!(DialogPhase::Closing.is_visible());
        assert!(DialogPhase::Closing.is_transitioning());
        assert!(!DialogPhase::Open.is_transitioning());
        assert_eq!(DialogPhase::default(), DialogPhase::Closed);
    }

    #[test]
    fn only_cancel_fails() {
        assert!(TransitionOutcome::Started.is_success());
        assert!(TransitionOutcome::Ignored.is_success());
        assert!(!TransitionOutcome::Canceled.is_success());
    }
}

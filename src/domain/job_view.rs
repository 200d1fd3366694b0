use std::fmt;
use std::sync::Arc;

use super::Entry;

/// Coarse state reported to pollers.
///
/// Variants are declared in lifecycle order, so a job polled with an
/// increasing clock only ever compares greater or equal to its previous state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VisibleState {
    Pending,
    StillComputing,
    Ready,
    Failed,
    Gone,
}

impl VisibleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisibleState::Pending => "PENDING",
            VisibleState::StillComputing => "STILL_COMPUTING",
            VisibleState::Ready => "READY",
            VisibleState::Failed => "FAILED",
            VisibleState::Gone => "GONE",
        }
    }
}

impl fmt::Display for VisibleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a poll returns: the visible state plus its payload, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobView {
    Pending,
    StillComputing,
    Ready(Arc<[Entry]>),
    Failed(String),
    Gone,
}

impl JobView {
    pub fn state(&self) -> VisibleState {
        match self {
            JobView::Pending => VisibleState::Pending,
            JobView::StillComputing => VisibleState::StillComputing,
            JobView::Ready(_) => VisibleState::Ready,
            JobView::Failed(_) => VisibleState::Failed,
            JobView::Gone => VisibleState::Gone,
        }
    }

    pub fn entries(&self) -> Option<&[Entry]> {
        match self {
            JobView::Ready(entries) => Some(&entries[..]),
            _ => None,
        }
    }
}

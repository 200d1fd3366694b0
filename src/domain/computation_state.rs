use std::fmt;
use std::sync::Arc;

use super::Entry;

/// What the background search actually did, independent of what pollers see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComputationState {
    Running,
    Completed,
    Failed,
}

impl ComputationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComputationState::Running => "RUNNING",
            ComputationState::Completed => "COMPLETED",
            ComputationState::Failed => "FAILED",
        }
    }
}

impl fmt::Display for ComputationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terminal result posted by a worker once its search has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComputationOutcome {
    Completed(Arc<[Entry]>),
    Failed(String),
}

impl ComputationOutcome {
    pub fn completed(entries: Vec<Entry>) -> Self {
        ComputationOutcome::Completed(entries.into())
    }

    pub fn state(&self) -> ComputationState {
        match self {
            ComputationOutcome::Completed(_) => ComputationState::Completed,
            ComputationOutcome::Failed(_) => ComputationState::Failed,
        }
    }
}

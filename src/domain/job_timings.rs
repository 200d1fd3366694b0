use std::time::Duration;

/// Fixed windows applied to every job at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobTimings {
    /// Minimum perceived latency before a job may be reported ready.
    pub processing_delay: Duration,
    /// How long a ready result stays visible before it is gone.
    pub result_ttl: Duration,
}

impl JobTimings {
    pub fn new(processing_delay: Duration, result_ttl: Duration) -> Self {
        Self {
            processing_delay,
            result_ttl,
        }
    }
}

impl Default for JobTimings {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_millis(500),
            result_ttl: Duration::from_secs(5 * 60),
        }
    }
}

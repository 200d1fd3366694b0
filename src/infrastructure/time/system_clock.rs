use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::application::ports::Clock;
use crate::domain::Timestamp;

/// Wall-clock time that never runs backwards.
///
/// The epoch offset is read once at construction; later readings add the
/// monotonic `Instant` elapsed since then, so NTP adjustments cannot move the
/// clock back.
#[derive(Debug, Clone)]
pub struct SystemClock {
    anchor_millis: u64,
    anchor_instant: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        let anchor_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        Self {
            anchor_millis,
            anchor_instant: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.anchor_millis).saturating_add(self.anchor_instant.elapsed())
    }
}

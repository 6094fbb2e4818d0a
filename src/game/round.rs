//! Per-round roll counting and timing

use serde::{Deserialize, Serialize};

/// Tracks one round from start until the win
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTracker {
    /// Wall clock time the round started (ms)
    pub started_at: u64,
    /// Roll commands issued this round
    pub roll_count: u32,
    /// Final duration, frozen at the first win
    pub finished_millis: Option<u64>,
}

impl RoundTracker {
    /// Start a round at `now`
    pub fn start(now: u64) -> Self {
        Self {
            started_at: now,
            roll_count: 0,
            finished_millis: None,
        }
    }

    /// Reset in place for a new round
    pub fn restart(&mut self, now: u64) {
        *self = Self::start(now);
    }

    /// Count one roll of the unheld dice
    pub fn record_roll(&mut self) {
        self.roll_count += 1;
    }

    /// Freeze the round duration.
    /// Only the first call after a start takes effect; it returns the duration.
    pub fn finish(&mut self, now: u64) -> Option<u64> {
        if self.finished_millis.is_some() {
            return None;
        }
        let duration = now.saturating_sub(self.started_at);
        self.finished_millis = Some(duration);
        Some(duration)
    }

    /// Frozen duration once finished, otherwise live time since start
    pub fn elapsed_millis(&self, now: u64) -> u64 {
        self.finished_millis
            .unwrap_or_else(|| now.saturating_sub(self.started_at))
    }
}

//! Round clock with drift-free pause/resume

use serde::{Deserialize, Serialize};

/// Remaining-time accounting for one round.
///
/// `remaining = max(0, duration - (now - start))`. Pausing snapshots the
/// remaining time; resuming moves `start` so the snapshot still holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClock {
    start_ms: u64,
    remaining_ms: u64,
    duration_ms: u64,
    paused: bool,
}

impl SessionClock {
    pub fn new(duration_ms: u64, now_ms: u64) -> Self {
        Self {
            start_ms: now_ms,
            remaining_ms: duration_ms,
            duration_ms,
            paused: false,
        }
    }

    /// Restart a full round at `now_ms`
    pub fn restart(&mut self, now_ms: u64) {
        self.start_ms = now_ms;
        self.remaining_ms = self.duration_ms;
        self.paused = false;
    }

    /// Recompute remaining time at `now_ms`; frozen while paused
    pub fn update(&mut self, now_ms: u64) -> u64 {
        if !self.paused {
            self.remaining_ms = self.remaining_at(now_ms);
        }
        self.remaining_ms
    }

    /// Remaining time at `now_ms` without storing it
    pub fn remaining_at(&self, now_ms: u64) -> u64 {
        if self.paused {
            return self.remaining_ms;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        self.duration_ms.saturating_sub(elapsed)
    }

    pub fn pause(&mut self, now_ms: u64) {
        if self.paused {
            return;
        }
        self.update(now_ms);
        self.paused = true;
    }

    pub fn resume(&mut self, now_ms: u64) {
        if !self.paused {
            return;
        }
        let elapsed = self.duration_ms - self.remaining_ms;
        self.start_ms = now_ms.saturating_sub(elapsed);
        self.paused = false;
    }

    /// Last computed remaining time
    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_ms == 0
    }

    /// Force the clock to zero (round ended)
    pub fn expire(&mut self) {
        self.remaining_ms = 0;
    }

    /// Display text, whole seconds rounded up
    pub fn time_text(&self) -> String {
        format!("Time: {}s", self.remaining_ms.div_ceil(1000))
    }
}

//! Push notifications for display collaborators

use serde::Serialize;

/// Something a HUD may want to show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    ScoreChanged { score: u32 },
    TimeChanged { remaining_ms: u64, text: String },
    Paused,
    Resumed,
    /// Round reset; drivers reattach after the grace period
    RoundReset,
    /// Grace period over, clock and spawner running
    RoundStarted,
    RoundOver { final_score: u32, high_score: Option<u32> },
}

/// Receiver of session notifications.
///
/// Called synchronously from inside the session operation that caused the
/// change; implementations must not block.
pub trait DisplaySink {
    fn notify(&mut self, event: &GameEvent);
}

impl<F> DisplaySink for F
where
    F: FnMut(&GameEvent),
{
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}

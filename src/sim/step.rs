//! Per-frame simulation step
//!
//! Advances the catcher and every live object by one tick, resolves
//! interceptions and misses, then evaluates difficulty escalation.

use super::state::{Escalation, GamePhase, GameState};

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub caught: u32,
    pub missed: u32,
    pub escalation: Escalation,
}

/// Advance the round by one tick.
///
/// `on_score` is invoked with the new score immediately after every
/// increment. Does nothing unless the phase is `Running`.
pub fn step(state: &mut GameState, mut on_score: impl FnMut(u32)) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    if state.phase != GamePhase::Running {
        return outcome;
    }

    state.time_ticks += 1;

    // Player movement
    state.catcher.steer(&state.input, state.config.field_width);

    // Objects: advance, intercept, or drop off the bottom
    let speed = state.difficulty.game_speed;
    let field_height = state.config.field_height;
    let catcher = &state.catcher;
    let score = &mut state.score;
    state.objects.retain_mut(|obj| {
        obj.y += speed;

        if obj.intercepts(catcher) {
            *score += 1;
            outcome.caught += 1;
            on_score(*score);
            return false;
        }
        if obj.is_missed(field_height) {
            outcome.missed += 1;
            return false;
        }
        true
    });

    // Difficulty follows the score as it stands after this tick
    outcome.escalation = state.difficulty.escalate(state.score, &state.config);
    if outcome.escalation.speed_raised {
        log::debug!(
            "Score {}: fall speed -> {:.1}",
            state.score,
            state.difficulty.game_speed
        );
    }
    if outcome.escalation.interval_shortened {
        log::debug!(
            "Score {}: spawn interval -> {}ms",
            state.score,
            state.difficulty.spawn_interval_ms
        );
    }

    outcome
}

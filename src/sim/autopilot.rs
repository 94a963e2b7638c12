//! Demo/idle steering
//!
//! Chases the falling object that will reach the catcher line first.

use super::state::{Direction, GameState};

/// Direction that brings the catcher under the most urgent object.
///
/// Returns `None` when already underneath it or when nothing is falling.
pub fn steer(state: &GameState) -> Option<Direction> {
    let catcher = &state.catcher;
    let target = state
        .objects
        .iter()
        .filter(|o| o.y + o.size < catcher.y + catcher.height)
        .max_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))?;

    let target_center = target.x + target.size / 2.0;
    let catcher_center = catcher.x + catcher.width / 2.0;
    // Dead zone keeps the catcher from jittering around the target
    let dead_zone = (catcher.width / 2.0 - target.size / 2.0).max(catcher.velocity);

    if target_center < catcher_center - dead_zone {
        Some(Direction::Left)
    } else if target_center > catcher_center + dead_zone {
        Some(Direction::Right)
    } else {
        None
    }
}

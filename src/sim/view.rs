//! Read-only frame view handed to render adapters

use glam::Vec2;
use serde::Serialize;

use super::state::Rect;

/// End-of-round message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOverScreen {
    pub final_score: u32,
    pub lines: [String; 3],
}

impl GameOverScreen {
    pub fn new(final_score: u32) -> Self {
        Self {
            final_score,
            lines: [
                "Game Over!".to_string(),
                format!("Your Score: {}", final_score),
                "Press R to play again".to_string(),
            ],
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    /// Playfield size
    pub field: Vec2,
    pub catcher: Rect,
    pub objects: Vec<Rect>,
    /// Next spawn indicator, absent once the round is over
    pub preview: Option<Rect>,
    pub score: u32,
    pub time_text: String,
    pub paused: bool,
    pub game_over: Option<GameOverScreen>,
}

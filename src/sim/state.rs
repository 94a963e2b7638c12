//! Game state and core simulation types
//!
//! Everything the session mutates during a round lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::SessionClock;
use crate::config::GameConfig;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Clock and spawner frozen
    Paused,
    /// Round clock expired
    Over,
}

/// Axis-aligned rectangle in field coordinates (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Horizontal travel requested for this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// The two exclusive steering signals set by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
}

impl Default for InputState {
    /// A fresh round drifts right until the player steers
    fn default() -> Self {
        Self {
            move_left: false,
            move_right: true,
        }
    }
}

impl InputState {
    /// Set one direction, clearing the other
    pub fn press(&mut self, direction: Direction) {
        self.move_left = direction == Direction::Left;
        self.move_right = direction == Direction::Right;
    }

    /// Stop steering
    pub fn release(&mut self) {
        self.move_left = false;
        self.move_right = false;
    }

    /// Signed unit direction (-1, 0, 1)
    pub fn axis(&self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self.axis() {
            a if a < 0.0 => Some(Direction::Left),
            a if a > 0.0 => Some(Direction::Right),
            _ => None,
        }
    }
}

/// The player-controlled catcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catcher {
    pub x: f32,
    /// Fixed for the whole round
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity: f32,
}

impl Catcher {
    /// Centered catcher for a fresh round
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.field_width / 2.0 - config.catcher_width / 2.0,
            y: config.catcher_y(),
            width: config.catcher_width,
            height: config.catcher_height,
            velocity: config.catcher_velocity,
        }
    }

    /// Move by one tick of input and clamp to `[0, field_width - width]`
    pub fn steer(&mut self, input: &InputState, field_width: f32) {
        self.x += input.axis() * self.velocity;
        self.x = self.x.clamp(0.0, (field_width - self.width).max(0.0));
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A scoring target descending from the top edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl FallingObject {
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self { x, y, size }
    }

    /// Bottom edge reached the catcher line and the closed horizontal spans overlap
    pub fn intercepts(&self, catcher: &Catcher) -> bool {
        self.y + self.size >= catcher.y
            && self.x + self.size >= catcher.x
            && self.x <= catcher.x + catcher.width
    }

    /// Strictly past the bottom of the field
    pub fn is_missed(&self, field_height: f32) -> bool {
        self.y > field_height
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

/// Pre-announced position of the next spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub x: f32,
    pub y: f32,
}

/// Outcome of a difficulty evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Escalation {
    pub speed_raised: bool,
    pub interval_shortened: bool,
}

/// Fall speed and spawn cadence; only ever escalates within a round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Difficulty {
    /// Pixels per tick
    pub game_speed: f32,
    pub spawn_interval_ms: u64,
    /// Last score value escalation was evaluated for
    last_evaluated_score: u32,
}

impl Difficulty {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            game_speed: config.initial_speed,
            spawn_interval_ms: config.initial_spawn_interval_ms,
            last_evaluated_score: 0,
        }
    }

    /// Escalate once for each score value as it is reached.
    ///
    /// A score that has not changed since the last call never escalates
    /// again, so a stationary score (including the initial 0) is inert.
    pub fn escalate(&mut self, score: u32, config: &GameConfig) -> Escalation {
        let mut out = Escalation::default();
        if score == self.last_evaluated_score {
            return out;
        }
        self.last_evaluated_score = score;

        if score % config.speed_every == 0 && self.game_speed < config.speed_cap {
            self.game_speed = (self.game_speed + config.speed_step).min(config.speed_cap);
            out.speed_raised = true;
        }
        if score % config.spawn_every == 0 && self.spawn_interval_ms > config.spawn_interval_floor_ms {
            self.spawn_interval_ms = self
                .spawn_interval_ms
                .saturating_sub(config.spawn_interval_step_ms)
                .max(config.spawn_interval_floor_ms);
            out.interval_shortened = true;
        }
        out
    }
}

/// Complete round state (owned and mutated only by the session)
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub phase: GamePhase,
    pub catcher: Catcher,
    /// Live objects in insertion order
    pub objects: Vec<FallingObject>,
    pub score: u32,
    pub difficulty: Difficulty,
    pub clock: SessionClock,
    pub input: InputState,
    /// Simulation steps run this round
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh round state with the clock started at `now_ms`
    pub fn new(config: GameConfig, now_ms: u64) -> Self {
        Self {
            phase: GamePhase::Running,
            catcher: Catcher::new(&config),
            objects: Vec::new(),
            score: 0,
            difficulty: Difficulty::new(&config),
            clock: SessionClock::new(config.round_duration_ms, now_ms),
            input: InputState::default(),
            time_ticks: 0,
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catcher_at(x: f32) -> Catcher {
        Catcher {
            x,
            y: 200.0,
            width: 100.0,
            height: 10.0,
            velocity: 5.0,
        }
    }

    #[test]
    fn test_press_is_exclusive() {
        let mut input = InputState::default();
        input.press(Direction::Left);
        assert!(input.move_left && !input.move_right);
        input.press(Direction::Right);
        assert!(!input.move_left && input.move_right);
        input.release();
        assert_eq!(input.axis(), 0.0);
        assert_eq!(input.direction(), None);
    }

    #[test]
    fn test_steer_clamps_both_edges() {
        let mut catcher = catcher_at(2.0);
        let mut input = InputState::default();
        input.press(Direction::Left);
        catcher.steer(&input, 800.0);
        assert_eq!(catcher.x, 0.0);

        catcher.x = 698.0;
        input.press(Direction::Right);
        catcher.steer(&input, 800.0);
        assert_eq!(catcher.x, 700.0);
    }

    #[test]
    fn test_touching_edges_count_as_interception() {
        let catcher = catcher_at(40.0);
        // Right edge of object touches left edge of catcher
        assert!(FallingObject::new(20.0, 180.0, 20.0).intercepts(&catcher));
        // Left edge of object touches right edge of catcher
        assert!(FallingObject::new(140.0, 180.0, 20.0).intercepts(&catcher));
        assert!(!FallingObject::new(140.5, 180.0, 20.0).intercepts(&catcher));
        // Above the catcher line
        assert!(!FallingObject::new(50.0, 179.0, 20.0).intercepts(&catcher));
    }

    #[test]
    fn test_miss_requires_strictly_past_bottom() {
        let obj = FallingObject::new(0.0, 600.0, 20.0);
        assert!(!obj.is_missed(600.0));
        let obj = FallingObject::new(0.0, 601.0, 20.0);
        assert!(obj.is_missed(600.0));
    }

    #[test]
    fn test_escalation_fires_once_per_score_value() {
        let config = GameConfig::default();
        let mut difficulty = Difficulty::new(&config);

        // Stationary at 0: nothing
        assert_eq!(difficulty.escalate(0, &config), Escalation::default());
        assert_eq!(difficulty.spawn_interval_ms, 1_500);

        difficulty.escalate(5, &config);
        difficulty.escalate(5, &config);
        assert_eq!(difficulty.spawn_interval_ms, 1_450);
        assert_eq!(difficulty.game_speed, 1.0);

        let esc = difficulty.escalate(10, &config);
        assert!(esc.speed_raised && esc.interval_shortened);
        assert!((difficulty.game_speed - 1.1).abs() < 1e-6);
        assert_eq!(difficulty.spawn_interval_ms, 1_400);
    }

    #[test]
    fn test_escalation_respects_cap_and_floor() {
        let config = GameConfig::default();
        let mut difficulty = Difficulty::new(&config);
        difficulty.game_speed = 9.95;
        difficulty.spawn_interval_ms = 320;

        difficulty.escalate(10, &config);
        assert_eq!(difficulty.game_speed, 10.0);
        assert_eq!(difficulty.spawn_interval_ms, 300);

        let esc = difficulty.escalate(20, &config);
        assert_eq!(esc, Escalation::default());
        assert_eq!(difficulty.game_speed, 10.0);
        assert_eq!(difficulty.spawn_interval_ms, 300);
    }
}

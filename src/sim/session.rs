//! Game session state machine
//!
//! Owns the round state, the spawner and the scheduler, and is the only
//! thing that mutates any of them. Drivers call [`GameSession::frame`] once
//! per display refresh; the spawn and clock cadences run as scheduled tasks
//! that are fired from inside that call, so everything interleaves on one
//! logical thread.
//!
//! Transitions:
//! - `Running --toggle_pause--> Paused` stops the spawn and clock tasks together
//! - `Paused --toggle_pause--> Running` restarts both from zero elapsed
//! - `Running --clock expired--> Over` (idempotent)
//! - `any --reset--> Running` after a grace period with no tasks attached

use super::autopilot;
use super::events::{DisplaySink, GameEvent};
use super::scheduler::{Scheduler, TaskKind};
use super::spawner::Spawner;
use super::state::{
    Catcher, Difficulty, Direction, FallingObject, GamePhase, GameState, InputState, Preview, Rect,
};
use super::step::{self, StepOutcome};
use super::view::{GameOverScreen, RenderFrame};
use crate::config::GameConfig;
use crate::highscores::HighScores;

pub struct GameSession {
    state: GameState,
    spawner: Spawner,
    scheduler: Scheduler,
    high_scores: HighScores,
    sinks: Vec<Box<dyn DisplaySink>>,
    autopilot: bool,
}

impl GameSession {
    /// Create a session; play begins immediately at `now_ms`
    pub fn new(config: GameConfig, seed: u64, now_ms: u64) -> Self {
        let config = config.sanitized();
        let spawner = Spawner::new(seed, config.field_width, config.object_size);
        let mut session = Self {
            state: GameState::new(config, now_ms),
            spawner,
            scheduler: Scheduler::new(),
            high_scores: HighScores::new(),
            sinks: Vec::new(),
            autopilot: false,
        };
        session.attach_drivers(now_ms);
        log::info!("Session started with seed {}", seed);
        session
    }

    /// Register a display collaborator
    pub fn subscribe(&mut self, sink: impl DisplaySink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    // === Read-only accessors ===

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.state.config
    }

    pub fn catcher(&self) -> &Catcher {
        &self.state.catcher
    }

    pub fn objects(&self) -> &[FallingObject] {
        &self.state.objects
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.state.difficulty
    }

    /// Next spawn position; `None` once the round is over
    pub fn preview(&self) -> Option<Preview> {
        (self.state.phase != GamePhase::Over).then(|| self.spawner.preview())
    }

    pub fn remaining_ms(&self) -> u64 {
        self.state.clock.remaining_ms()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// True between a reset and the moment drivers reattach
    pub fn is_getting_ready(&self) -> bool {
        !self.drivers_attached() && self.state.phase == GamePhase::Running
    }

    /// Spawn and clock tasks are attached unless a restart is pending
    fn drivers_attached(&self) -> bool {
        self.scheduler.handle_of(TaskKind::Restart).is_none()
    }

    // === Input ===

    pub fn input(&self) -> InputState {
        self.state.input
    }

    pub fn press(&mut self, direction: Direction) {
        self.state.input.press(direction);
    }

    pub fn release(&mut self) {
        self.state.input.release();
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.autopilot != enabled {
            log::info!("Autopilot: {}", enabled);
        }
        self.autopilot = enabled;
    }

    // === Drivers ===

    /// Per-frame driver: fire due tasks, check the clock, run one step
    pub fn frame(&mut self, now_ms: u64) -> StepOutcome {
        self.run_due_tasks(now_ms);

        if self.state.phase != GamePhase::Running || !self.drivers_attached() {
            return StepOutcome::default();
        }
        if self.state.clock.remaining_at(now_ms) == 0 {
            self.expire(now_ms);
            return StepOutcome::default();
        }
        if self.autopilot {
            match autopilot::steer(&self.state) {
                Some(direction) => self.state.input.press(direction),
                None => self.state.input.release(),
            }
        }
        self.step(now_ms)
    }

    /// Fire every scheduled task due at or before `now_ms`, oldest first
    pub fn run_due_tasks(&mut self, now_ms: u64) {
        while let Some(fired) = self.scheduler.pop_due(now_ms) {
            match fired.kind {
                TaskKind::Spawn => self.spawn_tick(),
                TaskKind::ClockTick => self.clock_tick(now_ms),
                TaskKind::Restart => {
                    // Play starts when a frame actually shows it
                    self.attach_drivers(now_ms);
                    log::info!("Round started");
                    self.emit(GameEvent::RoundStarted);
                }
            }
        }
    }

    /// One simulation step (no-op unless running with drivers attached)
    pub fn step(&mut self, now_ms: u64) -> StepOutcome {
        if !self.drivers_attached() {
            return StepOutcome::default();
        }

        let sinks = &mut self.sinks;
        let outcome = step::step(&mut self.state, |score| {
            notify_all(sinks, &GameEvent::ScoreChanged { score });
        });

        if outcome.escalation.interval_shortened {
            // New cadence applies from now; the old countdown is discarded
            self.scheduler.every(
                TaskKind::Spawn,
                self.state.difficulty.spawn_interval_ms,
                now_ms,
            );
        }
        outcome
    }

    /// Materialize the previewed object
    pub fn spawn_tick(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        self.spawner.spawn_into(&mut self.state.objects);
    }

    /// Refresh remaining time at `now_ms`, ending the round at zero
    pub fn clock_tick(&mut self, now_ms: u64) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        let remaining_ms = self.state.clock.update(now_ms);
        let text = self.state.clock.time_text();
        self.emit(GameEvent::TimeChanged { remaining_ms, text });
        if remaining_ms == 0 {
            self.expire(now_ms);
        }
    }

    // === Transitions ===

    /// Toggle between `Running` and `Paused`; returns the resulting phase
    pub fn toggle_pause(&mut self, now_ms: u64) -> GamePhase {
        match self.state.phase {
            GamePhase::Running if !self.drivers_attached() => {
                log::debug!("Pause ignored while getting ready");
            }
            GamePhase::Running => {
                self.state.clock.pause(now_ms);
                self.scheduler.cancel_kind(TaskKind::Spawn);
                self.scheduler.cancel_kind(TaskKind::ClockTick);
                self.state.phase = GamePhase::Paused;
                log::info!("Paused with {}ms left", self.state.clock.remaining_ms());
                self.emit(GameEvent::Paused);
            }
            GamePhase::Paused => {
                self.state.clock.resume(now_ms);
                self.schedule_drivers(now_ms);
                self.state.phase = GamePhase::Running;
                log::info!("Resumed with {}ms left", self.state.clock.remaining_ms());
                self.emit(GameEvent::Resumed);
            }
            GamePhase::Over => {
                log::debug!("Pause ignored, round is over");
            }
        }
        self.state.phase
    }

    /// End the round. Returns false if it was already over.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        if self.state.phase == GamePhase::Over {
            return false;
        }
        self.scheduler.cancel_all();

        let was_remaining = self.state.clock.remaining_ms();
        self.state.clock.expire();
        self.state.phase = GamePhase::Over;

        let final_score = self.state.score;
        if let Some(rank) = self.high_scores.add_score(final_score, now_ms) {
            log::info!("Score {} ranks #{}", final_score, rank);
        }
        log::info!("Round over, final score {}", final_score);

        if was_remaining != 0 {
            let text = self.state.clock.time_text();
            self.emit(GameEvent::TimeChanged {
                remaining_ms: 0,
                text,
            });
        }
        let high_score = self.high_scores.top_score();
        self.emit(GameEvent::RoundOver {
            final_score,
            high_score,
        });
        true
    }

    /// Reinitialize the round; drivers reattach after the grace period
    pub fn reset(&mut self, now_ms: u64) {
        self.scheduler.cancel_all();

        let config = self.state.config.clone();
        self.state = GameState::new(config, now_ms);
        self.spawner.reset();
        self.scheduler
            .after(TaskKind::Restart, self.state.config.reset_delay_ms, now_ms);

        log::info!(
            "Round reset, starting in {}ms",
            self.state.config.reset_delay_ms
        );
        self.emit(GameEvent::RoundReset);
        self.emit(GameEvent::ScoreChanged { score: 0 });
        let remaining_ms = self.state.clock.remaining_ms();
        let text = self.state.clock.time_text();
        self.emit(GameEvent::TimeChanged { remaining_ms, text });
    }

    /// Start the clock and both auxiliary tasks at `now_ms`
    fn attach_drivers(&mut self, now_ms: u64) {
        self.state.clock.restart(now_ms);
        self.schedule_drivers(now_ms);
    }

    /// Spawn and clock tasks always start and stop together
    fn schedule_drivers(&mut self, now_ms: u64) {
        self.scheduler.every(
            TaskKind::Spawn,
            self.state.difficulty.spawn_interval_ms,
            now_ms,
        );
        self.scheduler
            .every(TaskKind::ClockTick, self.state.config.clock_tick_ms, now_ms);
    }

    fn emit(&mut self, event: GameEvent) {
        notify_all(&mut self.sinks, &event);
    }

    // === Render surface ===

    /// Snapshot of everything a render adapter draws
    pub fn render_frame(&self) -> RenderFrame {
        let config = &self.state.config;
        let game_over = (self.state.phase == GamePhase::Over)
            .then(|| GameOverScreen::new(self.state.score));
        RenderFrame {
            field: glam::Vec2::new(config.field_width, config.field_height),
            catcher: self.state.catcher.rect(),
            objects: self.state.objects.iter().map(FallingObject::rect).collect(),
            preview: self.preview().map(|p| {
                let size = self.spawner.object_size();
                Rect::new(p.x, 0.0, size, size)
            }),
            score: self.state.score,
            time_text: self.state.clock.time_text(),
            paused: self.state.phase == GamePhase::Paused,
            game_over,
        }
    }
}

fn notify_all(sinks: &mut [Box<dyn DisplaySink>], event: &GameEvent) {
    for sink in sinks.iter_mut() {
        sink.notify(event);
    }
}

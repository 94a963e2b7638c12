//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters as explicit millisecond timestamps
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod events;
pub mod scheduler;
pub mod session;
pub mod spawner;
pub mod state;
pub mod step;
pub mod view;

pub use clock::SessionClock;
pub use events::{DisplaySink, GameEvent};
pub use scheduler::{Scheduler, TaskHandle, TaskKind};
pub use session::GameSession;
pub use spawner::Spawner;
pub use state::{
    Catcher, Difficulty, Direction, Escalation, FallingObject, GamePhase, GameState, InputState,
    Preview, Rect,
};
pub use step::{StepOutcome, step};
pub use view::{GameOverScreen, RenderFrame};

//! Invariants that must hold for any input sequence

use proptest::prelude::*;

use catchfall::GameConfig;
use catchfall::consts::FRAME_MS;
use catchfall::sim::{Difficulty, Direction, GamePhase, GameSession};

#[derive(Debug, Clone, Copy)]
enum Action {
    Left,
    Right,
    Release,
    Frames(u8),
    Pause,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => Just(Action::Left),
        3 => Just(Action::Right),
        1 => Just(Action::Release),
        6 => (1u8..120).prop_map(Action::Frames),
        1 => Just(Action::Pause),
    ]
}

/// Drive a session through `actions`, calling `check` after every frame
fn drive(seed: u64, actions: &[Action], mut check: impl FnMut(&GameSession)) -> GameSession {
    let mut session = GameSession::new(GameConfig::default(), seed, 0);
    let mut now = 0;
    for action in actions {
        match *action {
            Action::Left => session.press(Direction::Left),
            Action::Right => session.press(Direction::Right),
            Action::Release => session.release(),
            Action::Pause => {
                session.toggle_pause(now);
            }
            Action::Frames(n) => {
                for _ in 0..n {
                    now += FRAME_MS;
                    session.frame(now);
                    check(&session);
                }
            }
        }
    }
    session
}

proptest! {
    #[test]
    fn catcher_stays_in_bounds(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..60)) {
        drive(seed, &actions, |session| {
            let catcher = session.catcher();
            let max_x = session.config().field_width - catcher.width;
            assert!(catcher.x >= 0.0, "catcher left of field: {}", catcher.x);
            assert!(catcher.x <= max_x, "catcher right of field: {}", catcher.x);
        });
    }

    #[test]
    fn score_never_decreases_and_resets_to_zero(
        seed in any::<u64>(),
        actions in prop::collection::vec(action(), 1..60),
    ) {
        let mut last = 0;
        let mut session = drive(seed, &actions, |session| {
            assert!(session.score() >= last);
            last = session.score();
        });
        session.reset(1_000_000);
        prop_assert_eq!(session.score(), 0);
    }

    #[test]
    fn difficulty_respects_cap_and_floor(jumps in prop::collection::vec(0u32..4, 1..2_000)) {
        let config = GameConfig::default();
        let mut difficulty = Difficulty::new(&config);
        let mut score = 0;
        let mut prev_speed = difficulty.game_speed;
        let mut prev_interval = difficulty.spawn_interval_ms;
        for jump in jumps {
            score += jump;
            difficulty.escalate(score, &config);
            prop_assert!(difficulty.game_speed <= config.speed_cap);
            prop_assert!(difficulty.spawn_interval_ms >= config.spawn_interval_floor_ms);
            // Monotone within a round
            prop_assert!(difficulty.game_speed >= prev_speed);
            prop_assert!(difficulty.spawn_interval_ms <= prev_interval);
            prev_speed = difficulty.game_speed;
            prev_interval = difficulty.spawn_interval_ms;
        }
    }

    #[test]
    fn over_is_terminal_until_reset(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..40)) {
        let mut session = drive(seed, &actions, |_| {});
        session.expire(10_000_000);
        let score = session.score();
        let objects = session.objects().to_vec();
        let x = session.catcher().x;

        for i in 1..=200u64 {
            session.press(if i % 2 == 0 { Direction::Left } else { Direction::Right });
            session.toggle_pause(10_000_000 + i);
            session.frame(10_000_000 + i * FRAME_MS);
        }
        prop_assert_eq!(session.phase(), GamePhase::Over);
        prop_assert_eq!(session.score(), score);
        prop_assert_eq!(session.objects(), objects.as_slice());
        prop_assert_eq!(session.catcher().x, x);
    }
}

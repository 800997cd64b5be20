// Integration tests driving whole rounds through the public API, the way a
// host would: a scheduler hands out frames and the test delivers them.

use fall_dodge::consts::*;
use fall_dodge::platform::ManualScheduler;
use fall_dodge::sim::{EntityKind, GameEvent, GameState, tick};
use fall_dodge::{GameLoop, Playfield};
use glam::Vec2;

const FRAME_MS: f64 = 16.0;

fn field() -> Playfield {
    Playfield::new(390.0, 844.0)
}

/// Deliver frames until the loop stops or `frames` have run
fn run_frames(game: &mut GameLoop<ManualScheduler>, start_ms: f64, frames: u32) -> f64 {
    let mut now = start_ms;
    for _ in 0..frames {
        let Some(token) = game.scheduler_mut().take_pending() else {
            break;
        };
        game.on_frame(token, now);
        now += FRAME_MS;
    }
    now
}

#[test]
fn round_plays_to_completion_when_avatar_stands_still() {
    let mut game = GameLoop::new(ManualScheduler::new(), field(), 2024);
    game.start();

    // Ten simulated minutes is far more than a parked avatar survives
    run_frames(&mut game, 0.0, 60 * 60 * 10);

    let snap = game.snapshot();
    assert!(snap.terminal, "round still going after {} ticks", snap.tick);
    assert_eq!(snap.lives, 0);
    assert!(!game.is_running());
    assert_eq!(game.scheduler().pending(), None);
    assert!(snap.spawn_interval >= SPAWN_INTERVAL_FLOOR);

    let events = game.drain_events();
    assert!(matches!(events.last(), Some(GameEvent::RoundOver { .. })));
}

#[test]
fn spawns_keep_coming_while_parked_in_a_corner() {
    let mut game = GameLoop::new(ManualScheduler::new(), field(), 5);
    game.start();

    // Drag to the bottom-left corner; hazards still spawn across the width
    game.gesture_start();
    game.gesture_move(Vec2::new(-10_000.0, 10_000.0));
    game.gesture_end();
    let corner = game.snapshot().avatar.pos;
    assert_eq!(corner, Vec2::new(PLAYER_RADIUS, 844.0 - PLAYER_RADIUS));

    run_frames(&mut game, 0.0, 600);
    let events = game.drain_events();
    let spawned = events
        .iter()
        .filter(|e| matches!(e, GameEvent::Spawned { .. }))
        .count();
    // Ten seconds at an 800ms interval, unless three hazards ended it first
    assert!(spawned >= 3, "only {spawned} spawns in ten seconds");
}

#[test]
fn spawn_interval_follows_the_ramp() {
    let mut state = GameState::new(field(), 11);
    // Nothing can reach the avatar out here, so the round never ends
    state.avatar.pos = Vec2::new(-1000.0, -1000.0);
    assert_eq!(state.spawn_interval(), SPAWN_INTERVAL_START);

    // 313 * 16 = 5008, just past one difficulty period
    let window = |state: &mut GameState| {
        for _ in 0..313 {
            tick(state, FRAME_MS as f32);
        }
    };

    window(&mut state);
    assert_eq!(state.spawn_interval(), 760.0);

    for _ in 1..5 {
        window(&mut state);
    }
    assert!(!state.is_terminal());
    assert_eq!(state.spawn_interval(), 600.0);

    // 800 - 14 * 40 would be 240; the floor wins
    for _ in 5..20 {
        window(&mut state);
    }
    assert!(!state.is_terminal());
    assert_eq!(state.spawn_interval(), SPAWN_INTERVAL_FLOOR);
}

#[test]
fn restart_after_game_over_matches_fresh_round() {
    let mut game = GameLoop::new(ManualScheduler::new(), field(), 77);
    game.start();
    run_frames(&mut game, 0.0, 900);
    game.end_round();
    assert!(game.snapshot().terminal);

    game.restart(78);
    assert_eq!(game.state(), &GameState::new(field(), 78));
    assert!(game.is_running());

    // First frame after restart is a baseline, even with a big timestamp gap
    run_frames(&mut game, 1_000_000.0, 1);
    assert_eq!(game.state().elapsed_ms, 0.0);
}

#[test]
fn stop_prevents_any_further_tick() {
    let mut game = GameLoop::new(ManualScheduler::new(), field(), 3);
    game.start();
    run_frames(&mut game, 0.0, 10);
    let token = game.scheduler().pending().expect("frame pending");
    let ticks = game.state().time_ticks;

    game.focus_lost();
    // Host fires the frame it already queued before the cancel landed
    assert!(!game.on_frame(token, 1000.0));
    assert_eq!(game.state().time_ticks, ticks);
}

#[test]
fn snapshot_entities_match_state() {
    let mut game = GameLoop::new(ManualScheduler::new(), field(), 9);
    game.start();
    run_frames(&mut game, 0.0, 300);

    let snap = game.snapshot();
    let state = game.state();
    assert_eq!(snap.entities.len(), state.entities.len());
    for (view, entity) in snap.entities.iter().zip(&state.entities) {
        assert_eq!(view.id, entity.id);
        assert_eq!(view.kind, entity.kind);
        assert_eq!(view.pos, entity.pos);
        if view.kind == EntityKind::Bonus {
            assert_eq!(view.size, BONUS_SIZE);
        }
    }
}

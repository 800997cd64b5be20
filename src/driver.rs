//! Frame-driven game loop
//!
//! Owns the round and runs one simulation tick per display refresh while
//! running. Lifecycle signals (focus, pause, restart, end) and drag gestures
//! from the presentation layer all come through here, so input is only ever
//! applied between ticks.

use glam::Vec2;

use crate::Playfield;
use crate::platform::{FrameScheduler, FrameToken};
use crate::sim::{GameEvent, GameState, InputTracker, Snapshot, tick};

/// Whether the loop is scheduling frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopState {
    Stopped,
    Running {
        /// The only frame that may run next
        pending: FrameToken,
        /// Timestamp of the previous frame; `None` until the first frame
        last_frame_ms: Option<f64>,
    },
}

pub struct GameLoop<S: FrameScheduler> {
    scheduler: S,
    loop_state: LoopState,
    next_token: u64,
    state: GameState,
    input: InputTracker,
    snapshot: Snapshot,
    /// Events produced since the host last drained them
    events: Vec<GameEvent>,
    /// User pause; focus changes don't override it
    paused: bool,
}

impl<S: FrameScheduler> GameLoop<S> {
    /// Create a stopped loop with a fresh round
    pub fn new(scheduler: S, playfield: Playfield, seed: u64) -> Self {
        let state = GameState::new(playfield, seed);
        let snapshot = state.snapshot();
        log::info!(
            "New round on {}x{} playfield (seed {})",
            playfield.width(),
            playfield.height(),
            seed
        );
        Self {
            scheduler,
            loop_state: LoopState::Stopped,
            next_token: 0,
            state,
            input: InputTracker::new(),
            snapshot,
            events: Vec::new(),
            paused: false,
        }
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.loop_state, LoopState::Running { .. })
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Latest published view of the round
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Hand over the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn issue_token(&mut self) -> FrameToken {
        self.next_token += 1;
        FrameToken(self.next_token)
    }

    /// Begin scheduling frames. No-op if already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let token = self.issue_token();
        self.scheduler.request_frame(token);
        self.loop_state = LoopState::Running {
            pending: token,
            last_frame_ms: None,
        };
        log::debug!("Loop started");
    }

    /// Cancel the pending frame. No tick runs until `start` is called again.
    pub fn stop(&mut self) {
        if let LoopState::Running { pending, .. } = self.loop_state {
            self.scheduler.cancel_frame(pending);
            self.loop_state = LoopState::Stopped;
            log::debug!("Loop stopped");
        }
    }

    /// Host callback for a requested frame
    ///
    /// Returns true if a tick ran. Frames that were cancelled or superseded
    /// are ignored.
    pub fn on_frame(&mut self, token: FrameToken, timestamp_ms: f64) -> bool {
        let last_frame_ms = match self.loop_state {
            LoopState::Running {
                pending,
                last_frame_ms,
            } if pending == token => last_frame_ms,
            _ => {
                log::debug!("Ignoring stale frame {:?}", token);
                return false;
            }
        };

        let dt = match last_frame_ms {
            None => 0.0,
            Some(prev) if timestamp_ms < prev => {
                log::warn!("Frame clock went backwards ({} -> {})", prev, timestamp_ms);
                0.0
            }
            Some(prev) => timestamp_ms - prev,
        };

        let events = tick(&mut self.state, dt as f32);
        self.events.extend(events);
        self.snapshot = self.state.snapshot();

        if self.state.is_terminal() {
            // Nothing left to simulate; restart brings the loop back
            self.loop_state = LoopState::Stopped;
            log::debug!("Loop halted at round over");
        } else {
            let next = self.issue_token();
            self.scheduler.request_frame(next);
            self.loop_state = LoopState::Running {
                pending: next,
                last_frame_ms: Some(timestamp_ms),
            };
        }
        true
    }

    /// Throw away the round and start a new one
    pub fn restart(&mut self, seed: u64) {
        self.stop();
        self.state.reset(seed);
        if self.input.is_dragging() {
            self.input.begin(&self.state.avatar);
        }
        self.events.clear();
        self.paused = false;
        self.snapshot = self.state.snapshot();
        self.start();
    }

    /// View went to the background
    pub fn focus_lost(&mut self) {
        self.stop();
    }

    /// View came back; resumes unless the round is over or the user paused
    pub fn focus_gained(&mut self) {
        if !self.paused && !self.state.is_terminal() && !self.is_running() {
            self.start();
        }
    }

    /// User pause
    pub fn pause(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.paused = true;
        self.stop();
        log::info!("Paused");
    }

    /// Undo a user pause
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        if !self.state.is_terminal() {
            self.start();
        }
        log::info!("Resumed");
    }

    /// Pause button: pause if playing, resume if paused
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// End the round immediately (the "End" button)
    pub fn end_round(&mut self) {
        self.state.end_round();
        self.stop();
        self.snapshot = self.state.snapshot();
    }

    pub fn gesture_start(&mut self) {
        self.input.begin(&self.state.avatar);
    }

    /// Drag moved; `displacement` is the total since the gesture started
    pub fn gesture_move(&mut self, displacement: Vec2) {
        let Some(pos) = self.input.drag(
            displacement,
            &self.state.avatar,
            &self.state.playfield,
            self.state.is_terminal(),
        ) else {
            return;
        };
        self.state.move_avatar(pos);
        self.snapshot.avatar = self.state.avatar;
    }

    pub fn gesture_end(&mut self) {
        self.input.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::platform::ManualScheduler;

    fn new_loop() -> GameLoop<ManualScheduler> {
        GameLoop::new(ManualScheduler::new(), Playfield::new(390.0, 844.0), 42)
    }

    /// Deliver the pending frame at `t`
    fn frame(game: &mut GameLoop<ManualScheduler>, t: f64) -> bool {
        let token = game.scheduler_mut().take_pending().expect("no frame pending");
        game.on_frame(token, t)
    }

    #[test]
    fn test_start_requests_one_frame() {
        let mut game = new_loop();
        assert_eq!(game.loop_state(), LoopState::Stopped);
        game.start();
        game.start();
        assert!(game.is_running());
        assert_eq!(game.scheduler().requested(), 1);
    }

    #[test]
    fn test_first_frame_is_baseline() {
        let mut game = new_loop();
        game.start();
        assert!(frame(&mut game, 1000.0));
        assert_eq!(game.state().elapsed_ms, 0.0);
        assert_eq!(game.state().time_ticks, 1);

        assert!(frame(&mut game, 1016.0));
        assert_eq!(game.state().elapsed_ms, 16.0);
    }

    #[test]
    fn test_stale_frame_after_stop_is_ignored() {
        let mut game = new_loop();
        game.start();
        let token = game.scheduler().pending().unwrap();
        game.stop();
        assert!(!game.on_frame(token, 16.0));
        assert_eq!(game.state().time_ticks, 0);
    }

    #[test]
    fn test_stale_frame_after_restart_is_ignored() {
        let mut game = new_loop();
        game.start();
        let old = game.scheduler().pending().unwrap();
        game.restart(7);
        assert!(!game.on_frame(old, 16.0));
        assert!(frame(&mut game, 16.0));
    }

    #[test]
    fn test_backwards_clock_counts_as_zero() {
        let mut game = new_loop();
        game.start();
        frame(&mut game, 500.0);
        frame(&mut game, 400.0);
        assert_eq!(game.state().elapsed_ms, 0.0);
        frame(&mut game, 420.0);
        assert_eq!(game.state().elapsed_ms, 20.0);
    }

    #[test]
    fn test_focus_cycle() {
        let mut game = new_loop();
        game.start();
        frame(&mut game, 0.0);
        game.focus_lost();
        assert!(!game.is_running());
        assert_eq!(game.scheduler().pending(), None);

        game.focus_gained();
        assert!(game.is_running());
        // Resuming re-baselines: a long absence is not simulated
        frame(&mut game, 60_000.0);
        assert_eq!(game.state().elapsed_ms, 0.0);
    }

    #[test]
    fn test_focus_does_not_override_pause() {
        let mut game = new_loop();
        game.start();
        game.pause();
        game.focus_lost();
        game.focus_gained();
        assert!(!game.is_running());

        game.resume();
        assert!(game.is_running());
    }

    #[test]
    fn test_toggle_pause() {
        let mut game = new_loop();
        game.start();
        frame(&mut game, 0.0);

        game.toggle_pause();
        assert!(game.is_paused());
        assert!(!game.is_running());
        assert_eq!(game.scheduler().pending(), None);

        game.toggle_pause();
        assert!(!game.is_paused());
        assert!(game.is_running());
        // Resume re-baselines like a focus return
        frame(&mut game, 10_000.0);
        assert_eq!(game.state().elapsed_ms, 0.0);
    }

    #[test]
    fn test_toggle_pause_after_round_over_does_nothing() {
        let mut game = new_loop();
        game.start();
        game.end_round();
        game.toggle_pause();
        assert!(!game.is_paused());
        assert!(!game.is_running());
    }

    #[test]
    fn test_end_round_stops_and_freezes() {
        let mut game = new_loop();
        game.start();
        frame(&mut game, 0.0);
        game.end_round();
        assert!(game.snapshot().terminal);
        assert!(!game.is_running());

        game.focus_gained();
        assert!(!game.is_running());
        game.resume();
        assert!(!game.is_running());
    }

    #[test]
    fn test_round_over_halts_loop() {
        let mut game = new_loop();
        game.start();
        frame(&mut game, 0.0);

        // Stack hazards on the avatar so the next frame ends the round
        for _ in 0..MAX_LIVES {
            let id = game.state.spawner.next_entity_id();
            let pos = game.state.avatar.pos;
            game.state.entities.push(crate::sim::FallingEntity {
                id,
                kind: crate::sim::EntityKind::Hazard,
                pos,
                size: 20.0,
                fall_speed: 0.0,
            });
        }
        assert!(frame(&mut game, 16.0));
        assert!(game.snapshot().terminal);
        assert_eq!(game.snapshot().lives, 0);
        assert!(!game.is_running());
        assert_eq!(game.scheduler().pending(), None);

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::RoundOver { score: 0 }));
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_restart_resets_round() {
        let mut game = new_loop();
        game.start();
        for i in 0..300 {
            if !game.is_running() {
                break;
            }
            frame(&mut game, i as f64 * 16.0);
        }
        game.end_round();
        game.restart(9);

        assert!(game.is_running());
        assert!(!game.is_paused());
        assert_eq!(
            game.state(),
            &GameState::new(Playfield::new(390.0, 844.0), 9)
        );
        assert_eq!(game.snapshot().lives, MAX_LIVES);
        assert_eq!(game.snapshot().score, 0);
        assert!(game.snapshot().entities.is_empty());
        assert_eq!(game.snapshot().spawn_interval, SPAWN_INTERVAL_START);
    }

    #[test]
    fn test_gesture_moves_avatar_between_frames() {
        let mut game = new_loop();
        let start = game.state().avatar.pos;
        game.gesture_start();
        game.gesture_move(Vec2::new(-40.0, -100.0));
        assert_eq!(game.snapshot().avatar.pos, start + Vec2::new(-40.0, -100.0));
        game.gesture_end();

        // Moves without an active gesture do nothing
        game.gesture_move(Vec2::new(100.0, 0.0));
        assert_eq!(game.state().avatar.pos, start + Vec2::new(-40.0, -100.0));
    }

    #[test]
    fn test_gesture_ignored_after_round_over() {
        let mut game = new_loop();
        game.gesture_start();
        game.end_round();
        let before = game.state().avatar.pos;
        game.gesture_move(Vec2::new(50.0, 50.0));
        assert_eq!(game.state().avatar.pos, before);
    }
}

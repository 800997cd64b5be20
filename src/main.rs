//! Fall Dodge entry point
//!
//! The web build is driven from JS through `platform::web::WebGame`. The
//! native binary runs a headless round with a simple autopilot, which is
//! handy for eyeballing balance changes in the logs.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(seed_from_clock);

    log::info!("Fall Dodge (native, headless) starting with seed {}", seed);
    let summary = headless::run(seed);
    println!(
        "Round finished: score {} | lives {} | {:.1}s | spawn interval {}ms",
        summary.score,
        summary.lives,
        summary.elapsed_ms / 1000.0,
        summary.spawn_interval
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is WebGame, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn seed_from_clock() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use fall_dodge::platform::ManualScheduler;
    use fall_dodge::sim::{EntityKind, Snapshot};
    use fall_dodge::{GameLoop, Playfield};
    use glam::Vec2;

    /// 60 Hz display
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after two minutes of play
    const MAX_FRAMES: u32 = 60 * 120;
    /// How far the autopilot sidesteps per frame
    const DODGE_STEP: f32 = 9.0;
    /// Only hazards within this distance above the avatar are threats
    const LOOKAHEAD: f32 = 220.0;

    pub fn run(seed: u64) -> Snapshot {
        let mut game = GameLoop::new(ManualScheduler::new(), Playfield::new(390.0, 844.0), seed);
        game.start();

        let mut now = 0.0;
        for _ in 0..MAX_FRAMES {
            let Some(token) = game.scheduler_mut().take_pending() else {
                break;
            };
            game.on_frame(token, now);
            now += FRAME_MS;

            for event in game.drain_events() {
                log::debug!("{:?}", event);
            }

            let step = steer(game.snapshot());
            if step != 0.0 {
                game.gesture_start();
                game.gesture_move(Vec2::new(step, 0.0));
                game.gesture_end();
            }
        }

        game.snapshot().clone()
    }

    /// Sidestep the closest incoming hazard, otherwise drift toward a bonus
    fn steer(snap: &Snapshot) -> f32 {
        let me = snap.avatar.pos;
        let threat = snap
            .entities
            .iter()
            .filter(|e| e.kind == EntityKind::Hazard)
            .filter(|e| e.pos.y < me.y && me.y - e.pos.y < LOOKAHEAD)
            .filter(|e| (e.pos.x - me.x).abs() < snap.avatar.radius + e.size)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        if let Some(hazard) = threat {
            return if hazard.pos.x >= me.x { -DODGE_STEP } else { DODGE_STEP };
        }

        let target = snap
            .entities
            .iter()
            .filter(|e| e.kind == EntityKind::Bonus && e.pos.y < me.y)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        match target {
            Some(bonus) => (bonus.pos.x - me.x).clamp(-DODGE_STEP, DODGE_STEP),
            None => 0.0,
        }
    }
}

//! Variable timestep simulation tick
//!
//! One call per display refresh. Order within a tick is fixed:
//! difficulty, spawn, then advance-and-collide every entity.

use super::collision::collides;
use super::state::{Avatar, EntityKind, FallingEntity, GameEvent, GameState};
use crate::consts::*;

/// Advance the round by `dt_ms` of real time
///
/// Deltas above `MAX_TICK_MS` are capped. Once the round is terminal this is
/// a no-op and returns no events.
pub fn tick(state: &mut GameState, dt_ms: f32) -> Vec<GameEvent> {
    assert!(
        dt_ms.is_finite() && dt_ms >= 0.0,
        "tick delta must be finite and non-negative, got {dt_ms}"
    );

    let mut events = Vec::new();
    if state.terminal {
        return events;
    }

    let dt = dt_ms.min(MAX_TICK_MS);
    // Input is applied between ticks; the whole tick sees one avatar position
    let avatar = state.avatar;

    state.time_ticks += 1;
    state.elapsed_ms += dt as f64;

    state.difficulty.update(dt);

    let interval = state.difficulty.spawn_interval();
    if let Some(entity) = state
        .spawner
        .update(dt, interval, &state.playfield, &mut state.rng)
    {
        events.push(GameEvent::Spawned {
            id: entity.id,
            kind: entity.kind,
        });
        state.entities.push(entity);
    }

    advance_entities(state, &avatar, dt, &mut events);

    events
}

/// Move every entity down, drop the ones that left the screen, resolve hits
fn advance_entities(state: &mut GameState, avatar: &Avatar, dt: f32, events: &mut Vec<GameEvent>) {
    let removal_y = state.playfield.removal_y();
    let live = std::mem::take(&mut state.entities);
    let mut kept = Vec::with_capacity(live.len());

    for mut entity in live {
        if state.terminal {
            // World froze mid-tick: untouched entities stay where they were
            kept.push(entity);
            continue;
        }

        entity.advance(dt);
        if entity.pos.y >= removal_y {
            continue;
        }

        if !collides(avatar.pos, avatar.radius, &entity) {
            kept.push(entity);
            continue;
        }

        match entity.kind {
            EntityKind::Bonus => collect_bonus(state, &entity, events),
            EntityKind::Hazard => hit_hazard(state, &entity, events),
        }
    }

    state.entities = kept;
}

fn collect_bonus(state: &mut GameState, entity: &FallingEntity, events: &mut Vec<GameEvent>) {
    state.score += 1;
    events.push(GameEvent::BonusCollected {
        id: entity.id,
        score: state.score,
    });
    log::debug!("Bonus {} collected, score {}", entity.id, state.score);

    if state.score.is_multiple_of(HEAL_EVERY) && state.lives < MAX_LIVES {
        state.lives += 1;
        events.push(GameEvent::LifeRestored { lives: state.lives });
        log::debug!("Milestone {} restored a life ({} left)", state.score, state.lives);
    }
}

fn hit_hazard(state: &mut GameState, entity: &FallingEntity, events: &mut Vec<GameEvent>) {
    state.lives = state.lives.saturating_sub(1);
    events.push(GameEvent::HazardHit {
        id: entity.id,
        lives: state.lives,
    });
    log::debug!("Hazard {} hit, {} lives left", entity.id, state.lives);

    if state.lives == 0 {
        state.terminal = true;
        events.push(GameEvent::RoundOver { score: state.score });
        log::info!(
            "Round over: score {} after {:.1}s",
            state.score,
            state.elapsed_ms / 1000.0
        );
    }
}

//! Entity spawner
//!
//! Emits at most one new falling entity per tick once enough time has
//! accumulated. A tick with a huge delta still spawns only once.

use glam::Vec2;
use rand::Rng;

use super::state::{EntityId, EntityKind, FallingEntity};
use crate::Playfield;
use crate::consts::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    accumulator: f32,
    next_id: u32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Feed elapsed time; returns the new entity if the interval was exceeded
    pub fn update<R: Rng>(
        &mut self,
        dt_ms: f32,
        interval_ms: f32,
        playfield: &Playfield,
        rng: &mut R,
    ) -> Option<FallingEntity> {
        self.accumulator += dt_ms;
        if self.accumulator <= interval_ms {
            return None;
        }
        self.accumulator = 0.0;

        let id = self.next_entity_id();
        let entity = roll_entity(id, playfield, rng);
        log::debug!(
            "Spawned {:?} {} at x={:.1} size={:.1} speed={:.1}",
            entity.kind,
            entity.id,
            entity.pos.x,
            entity.size,
            entity.fall_speed
        );
        Some(entity)
    }
}

/// Randomize kind, size, column and speed for a new entity
pub fn roll_entity<R: Rng>(id: EntityId, playfield: &Playfield, rng: &mut R) -> FallingEntity {
    let kind = if rng.random_bool(HAZARD_CHANCE) {
        EntityKind::Hazard
    } else {
        EntityKind::Bonus
    };

    let (size, fall_speed) = match kind {
        EntityKind::Hazard => (
            rng.random_range(HAZARD_SIZE_MIN..HAZARD_SIZE_MAX),
            rng.random_range(HAZARD_SPEED_MIN..HAZARD_SPEED_MAX),
        ),
        EntityKind::Bonus => (
            BONUS_SIZE,
            rng.random_range(BONUS_SPEED_MIN..BONUS_SPEED_MAX),
        ),
    };

    let min_x = SPAWN_X_MARGIN;
    let max_x = playfield.width() - SPAWN_X_MARGIN;
    // Very narrow playfields leave no spawn band; fall back to the middle
    let x = if max_x > min_x {
        rng.random_range(min_x..=max_x)
    } else {
        playfield.width() / 2.0
    };

    FallingEntity {
        id,
        kind,
        pos: Vec2::new(x, SPAWN_Y),
        size,
        fall_speed,
    }
}

//! Immutable per-tick view of the round for the presentation layer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Avatar, EntityId, EntityKind, FallingEntity, GameState};

/// What the presentation layer needs to draw one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: f32,
}

impl From<&FallingEntity> for EntityView {
    fn from(e: &FallingEntity) -> Self {
        Self {
            id: e.id,
            kind: e.kind,
            pos: e.pos,
            size: e.size,
        }
    }
}

/// Everything visible about a round at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub avatar: Avatar,
    pub entities: Vec<EntityView>,
    pub score: u32,
    pub lives: u8,
    pub terminal: bool,
    pub spawn_interval: f32,
    pub elapsed_ms: f64,
    pub tick: u64,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            avatar: self.avatar,
            entities: self.entities.iter().map(EntityView::from).collect(),
            score: self.score,
            lives: self.lives,
            terminal: self.terminal,
            spawn_interval: self.spawn_interval(),
            elapsed_ms: self.elapsed_ms,
            tick: self.time_ticks,
        }
    }
}

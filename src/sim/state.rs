//! Game state and core simulation types
//!
//! Everything a round needs lives in `GameState`; resetting a round means
//! replacing it with a fresh one.

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyRamp;
use super::spawn::Spawner;
use crate::Playfield;
use crate::consts::*;

/// Identity of a falling entity, unique within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a falling entity does on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Costs a life
    Hazard,
    /// Adds a point
    Bonus,
}

/// Something falling down the playfield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingEntity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Center position; x never changes after spawn
    pub pos: Vec2,
    /// Bonus radius, or hazard box side
    pub size: f32,
    /// Units per second, always positive
    pub fall_speed: f32,
}

impl FallingEntity {
    /// Move down by `fall_speed * dt`
    #[inline]
    pub fn advance(&mut self, dt_ms: f32) {
        self.pos.y += self.fall_speed * dt_ms / 1000.0;
    }
}

/// The player's avatar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    pub radius: f32,
}

impl Avatar {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
        }
    }
}

/// Something noteworthy that happened during a tick
///
/// Consumed by audio/haptics layers; the simulation never reads these back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Spawned { id: EntityId, kind: EntityKind },
    BonusCollected { id: EntityId, score: u32 },
    LifeRestored { lives: u8 },
    HazardHit { id: EntityId, lives: u8 },
    RoundOver { score: u32 },
}

/// Complete round state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    /// RNG driving spawns
    pub rng: Pcg32,
    pub playfield: Playfield,
    pub avatar: Avatar,
    /// Live entities in spawn order
    pub entities: Vec<FallingEntity>,
    pub score: u32,
    pub lives: u8,
    /// Round is over; ticks are no-ops until reset
    pub terminal: bool,
    pub spawner: Spawner,
    pub difficulty: DifficultyRamp,
    /// Simulated time since round start (after delta capping)
    pub elapsed_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new round on the given playfield
    pub fn new(playfield: Playfield, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            playfield,
            avatar: Avatar::new(playfield.avatar_start()),
            entities: Vec::new(),
            score: 0,
            lives: MAX_LIVES,
            terminal: false,
            spawner: Spawner::new(),
            difficulty: DifficultyRamp::new(),
            elapsed_ms: 0.0,
            time_ticks: 0,
        }
    }

    /// Throw away the current round and start a fresh one on the same playfield
    pub fn reset(&mut self, seed: u64) {
        *self = Self::new(self.playfield, seed);
        log::info!("Round reset (seed {})", seed);
    }

    /// Current spawn interval in ms
    #[inline]
    pub fn spawn_interval(&self) -> f32 {
        self.difficulty.spawn_interval()
    }

    /// Whether the round has ended
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Place the avatar, keeping it inside the playfield. Ignored once terminal.
    pub fn move_avatar(&mut self, pos: Vec2) {
        if self.terminal {
            return;
        }
        self.avatar.pos = super::collision::clamp_to_playfield(pos, self.avatar.radius, &self.playfield);
    }

    /// End the round right away, keeping score and lives as they are
    pub fn end_round(&mut self) {
        if !self.terminal {
            self.terminal = true;
            log::info!("Round ended early with score {}", self.score);
        }
    }

    /// Look up a live entity
    pub fn entity(&self, id: EntityId) -> Option<&FallingEntity> {
        self.entities.iter().find(|e| e.id == id)
    }
}

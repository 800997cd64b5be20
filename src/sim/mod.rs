//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies
//! - Time only arrives as a delta argument

pub mod collision;
pub mod difficulty;
pub mod input;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{clamp, clamp_to_playfield, collides, effective_radius};
pub use difficulty::DifficultyRamp;
pub use input::{DragState, InputTracker};
pub use snapshot::{EntityView, Snapshot};
pub use spawn::{Spawner, roll_entity};
pub use state::{Avatar, EntityId, EntityKind, FallingEntity, GameEvent, GameState};
pub use tick::tick;

//! Collision detection for the avatar against falling entities
//!
//! Everything is circle-vs-circle. Hazards are drawn as boxes but collide as
//! a circle shrunk to `HAZARD_HITBOX_SCALE` of their size, which leaves some
//! room for near misses at the corners.

use glam::Vec2;

use super::state::{EntityKind, FallingEntity};
use crate::Playfield;
use crate::consts::HAZARD_HITBOX_SCALE;

/// Standard clamp; `min <= max` is the caller's responsibility
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    debug_assert!(min <= max, "clamp bounds inverted: {min} > {max}");
    value.max(min).min(max)
}

/// Clamp a circle center so the whole circle stays inside the playfield
pub fn clamp_to_playfield(pos: Vec2, radius: f32, playfield: &Playfield) -> Vec2 {
    Vec2::new(
        clamp(pos.x, radius, playfield.width() - radius),
        clamp(pos.y, radius, playfield.height() - radius),
    )
}

/// Radius used for collision tests against this entity
#[inline]
pub fn effective_radius(entity: &FallingEntity) -> f32 {
    match entity.kind {
        EntityKind::Bonus => entity.size,
        EntityKind::Hazard => entity.size * HAZARD_HITBOX_SCALE,
    }
}

/// Check whether the avatar circle touches an entity
///
/// Touching counts: the test is `dist² <= (r_avatar + r_entity)²`.
pub fn collides(avatar_pos: Vec2, avatar_radius: f32, entity: &FallingEntity) -> bool {
    debug_assert!(avatar_radius >= 0.0, "negative avatar radius");
    let reach = avatar_radius + effective_radius(entity);
    avatar_pos.distance_squared(entity.pos) <= reach * reach
}

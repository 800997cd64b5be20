//! Fall Dodge - A drag-to-dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, collisions, round state)
//! - `driver`: Frame-driven game loop and lifecycle handling
//! - `platform`: Host frame scheduling (requestAnimationFrame on web)
//! - `settings`: Read-only audio/haptics preferences

pub mod driver;
pub mod platform;
pub mod settings;
pub mod sim;

pub use driver::{GameLoop, LoopState};
pub use settings::Settings;

use std::fmt;

use glam::Vec2;

/// Game configuration constants
///
/// Times are in milliseconds, distances in playfield units (screen points).
pub mod consts {
    /// Largest delta fed to a single tick (protects against resume hitches)
    pub const MAX_TICK_MS: f32 = 32.0;

    /// Avatar radius
    pub const PLAYER_RADIUS: f32 = 16.0;
    /// Avatar starts horizontally centered, this fraction down the playfield
    pub const PLAYER_START_Y_FRAC: f32 = 0.8;

    /// Lives at round start, and the heal cap
    pub const MAX_LIVES: u8 = 3;
    /// Every this many points restores a life
    pub const HEAL_EVERY: u32 = 10;

    /// Spawn interval at round start
    pub const SPAWN_INTERVAL_START: f32 = 800.0;
    /// Spawn interval never drops below this
    pub const SPAWN_INTERVAL_FLOOR: f32 = 250.0;
    /// Spawn interval reduction per difficulty step
    pub const SPAWN_INTERVAL_STEP: f32 = 40.0;
    /// Real time between difficulty steps
    pub const DIFFICULTY_PERIOD: f32 = 5000.0;

    /// Entities spawn just above the visible area
    pub const SPAWN_Y: f32 = -40.0;
    /// Horizontal spawn inset from each playfield edge
    pub const SPAWN_X_MARGIN: f32 = 20.0;
    /// Entities are removed once this far below the bottom edge
    pub const OFFSCREEN_MARGIN: f32 = 80.0;

    /// Probability that a spawn is a hazard
    pub const HAZARD_CHANCE: f64 = 0.55;
    /// Hazard box side, uniform in [min, max)
    pub const HAZARD_SIZE_MIN: f32 = 16.0;
    pub const HAZARD_SIZE_MAX: f32 = 40.0;
    /// Hazard fall speed (units/s), uniform in [min, max)
    pub const HAZARD_SPEED_MIN: f32 = 250.0;
    pub const HAZARD_SPEED_MAX: f32 = 470.0;
    /// Hazards are boxes but collide as a shrunk circle
    pub const HAZARD_HITBOX_SCALE: f32 = 0.7;

    /// Bonus radius
    pub const BONUS_SIZE: f32 = 12.0;
    /// Bonus fall speed (units/s), uniform in [min, max)
    pub const BONUS_SPEED_MIN: f32 = 220.0;
    pub const BONUS_SPEED_MAX: f32 = 400.0;
}

/// Playfield dimensions (origin top-left, y grows downward)
///
/// Always large enough to hold the avatar; deserialization goes through the
/// same check as `Playfield::try_new`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "PlayfieldSize", into = "PlayfieldSize")]
pub struct Playfield {
    width: f32,
    height: f32,
}

/// Unchecked width/height pair as it appears on the wire
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct PlayfieldSize {
    pub width: f32,
    pub height: f32,
}

/// Rejected playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayfieldError {
    pub width: f32,
    pub height: f32,
}

impl fmt::Display for PlayfieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "playfield {}x{} cannot hold the avatar",
            self.width, self.height
        )
    }
}

impl std::error::Error for PlayfieldError {}

impl TryFrom<PlayfieldSize> for Playfield {
    type Error = PlayfieldError;

    fn try_from(size: PlayfieldSize) -> Result<Self, Self::Error> {
        Self::try_new(size.width, size.height)
    }
}

impl From<Playfield> for PlayfieldSize {
    fn from(field: Playfield) -> Self {
        Self {
            width: field.width,
            height: field.height,
        }
    }
}

impl Playfield {
    /// Panics on dimensions that cannot hold the avatar
    pub fn new(width: f32, height: f32) -> Self {
        match Self::try_new(width, height) {
            Ok(field) => field,
            Err(e) => panic!("{e}"),
        }
    }

    /// Finite and wider/taller than the avatar's diameter
    pub fn try_new(width: f32, height: f32) -> Result<Self, PlayfieldError> {
        let min = 2.0 * consts::PLAYER_RADIUS;
        // NaN fails every comparison, infinity fails is_finite
        if width.is_finite() && height.is_finite() && width > min && height > min {
            Ok(Self { width, height })
        } else {
            Err(PlayfieldError { width, height })
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Size as a vector
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Where the avatar sits at round start
    #[inline]
    pub fn avatar_start(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height * consts::PLAYER_START_Y_FRAC)
    }

    /// y at which a falling entity is considered gone
    #[inline]
    pub fn removal_y(&self) -> f32 {
        self.height + consts::OFFSCREEN_MARGIN
    }
}

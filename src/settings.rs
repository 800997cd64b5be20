//! Audio and haptics preferences
//!
//! The simulation never reads these. The host hands a snapshot to whatever
//! plays sounds or vibrates; toggling happens outside this crate.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Read-only preferences snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Background music
    pub music: bool,
    /// Sound effects
    pub sfx: bool,
    /// Vibration feedback
    pub haptics: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music: true,
            sfx: true,
            haptics: true,
        }
    }
}

impl Settings {
    /// Parse settings handed over by the host. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Like `from_json`, but falls back to defaults on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Whether a sound effect should play for this event
    pub fn wants_sound(&self, event: &GameEvent) -> bool {
        self.sfx && !matches!(event, GameEvent::Spawned { .. })
    }

    /// Whether the device should vibrate for this event
    pub fn wants_haptics(&self, event: &GameEvent) -> bool {
        self.haptics && matches!(event, GameEvent::HazardHit { .. } | GameEvent::RoundOver { .. })
    }
}

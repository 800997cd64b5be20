//! Difficulty ramp
//!
//! Spawns get more frequent as the round goes on: every `DIFFICULTY_PERIOD`
//! of simulated time the spawn interval drops by a fixed step, down to a floor.

use crate::consts::{
    DIFFICULTY_PERIOD, SPAWN_INTERVAL_FLOOR, SPAWN_INTERVAL_START, SPAWN_INTERVAL_STEP,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyRamp {
    accumulator: f32,
    interval: f32,
}

impl Default for DifficultyRamp {
    fn default() -> Self {
        Self::new()
    }
}

impl DifficultyRamp {
    pub fn new() -> Self {
        Self::with_interval(SPAWN_INTERVAL_START)
    }

    /// Start from a custom spawn interval (never below the floor)
    pub fn with_interval(interval: f32) -> Self {
        Self {
            accumulator: 0.0,
            interval: interval.max(SPAWN_INTERVAL_FLOOR),
        }
    }

    /// Current spawn interval in ms
    #[inline]
    pub fn spawn_interval(&self) -> f32 {
        self.interval
    }

    /// Feed elapsed time. Returns true if the interval stepped down.
    ///
    /// At most one step per call; overshoot past the period is discarded.
    pub fn update(&mut self, dt_ms: f32) -> bool {
        self.accumulator += dt_ms;
        if self.accumulator <= DIFFICULTY_PERIOD {
            return false;
        }

        self.accumulator = 0.0;
        let next = (self.interval - SPAWN_INTERVAL_STEP).max(SPAWN_INTERVAL_FLOOR);
        let stepped = next < self.interval;
        if stepped {
            log::debug!("Spawn interval {} -> {}", self.interval, next);
        }
        self.interval = next;
        stepped
    }
}

//! Drag input tracking
//!
//! A drag moves the avatar by the gesture's cumulative displacement, measured
//! from where the avatar was when the gesture began. The tracker only
//! computes positions; the caller decides when to apply them (between ticks).

use glam::Vec2;

use super::collision::clamp_to_playfield;
use super::state::Avatar;
use crate::Playfield;

/// Gesture tracking state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Avatar position captured at gesture start
    Dragging { anchor: Vec2 },
}

#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    state: DragState,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Gesture started: remember where the avatar is now
    pub fn begin(&mut self, avatar: &Avatar) {
        self.state = DragState::Dragging { anchor: avatar.pos };
    }

    /// Gesture moved by `displacement` in total since it began
    ///
    /// Returns the new avatar position, or `None` if there is no active
    /// gesture or the round is over.
    pub fn drag(
        &self,
        displacement: Vec2,
        avatar: &Avatar,
        playfield: &Playfield,
        terminal: bool,
    ) -> Option<Vec2> {
        if terminal {
            return None;
        }
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { anchor } => Some(clamp_to_playfield(
                anchor + displacement,
                avatar.radius,
                playfield,
            )),
        }
    }

    /// Gesture ended; the avatar stays where it is
    pub fn end(&mut self) {
        self.state = DragState::Idle;
    }
}

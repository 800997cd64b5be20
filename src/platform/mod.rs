//! Platform abstraction layer
//!
//! The game loop never talks to the host clock directly. It asks a
//! `FrameScheduler` for "one more frame" and the host calls back with a
//! timestamp. Handles:
//! - requestAnimationFrame on web (`web`)
//! - a pull-based scheduler for native hosts and tests (`ManualScheduler`)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Identifies one requested frame
///
/// The driver only runs a frame whose token matches the one it is waiting
/// for, so a callback that fires after a cancel is harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// Host refresh scheduling
pub trait FrameScheduler {
    /// Arrange for the host to deliver `token` on the next display refresh
    fn request_frame(&mut self, token: FrameToken);
    /// Withdraw a previously requested frame
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Scheduler that only records requests; the host pulls and delivers them
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: Option<FrameToken>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame currently waiting to be delivered
    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Take the pending frame so the host can deliver it
    pub fn take_pending(&mut self) -> Option<FrameToken> {
        self.pending.take()
    }

    /// Total frames requested so far
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total frames cancelled so far
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self, token: FrameToken) {
        self.pending = Some(token);
        self.requested += 1;
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.pending == Some(token) {
            self.pending = None;
        }
        self.cancelled += 1;
    }
}

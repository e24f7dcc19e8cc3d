//! Frame scheduling
//!
//! The front-end calls [`Scheduler::frame`] on every repaint with a
//! monotonic timestamp. The scheduler turns timestamps into deltas and feeds
//! them to the session while a game is running. Pausing or ending the game
//! cancels the clock; resuming re-arms it at the current timestamp, so the
//! paused interval never reaches the session.

use crate::rng::{PieceSource, SevenBag};
use crate::session::GameSession;
use crate::types::{Intent, Lifecycle};

/// Cancelable delta timer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    baseline_ms: Option<u64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start measuring from `now_ms`.
    pub fn arm(&mut self, now_ms: u64) {
        self.baseline_ms = Some(now_ms);
    }

    pub fn cancel(&mut self) {
        self.baseline_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.baseline_ms.is_some()
    }

    /// Milliseconds since the previous frame, or `None` when cancelled.
    /// A timestamp older than the baseline yields 0.
    pub fn advance(&mut self, now_ms: u64) -> Option<u32> {
        let base = self.baseline_ms?;
        self.baseline_ms = Some(now_ms.max(base));
        let delta = now_ms.saturating_sub(base).min(u32::MAX as u64);
        Some(delta as u32)
    }
}

/// Session plus the clock that drives it
#[derive(Debug, Clone)]
pub struct Scheduler<S: PieceSource = SevenBag> {
    session: GameSession<S>,
    clock: FrameClock,
}

impl<S: PieceSource> Scheduler<S> {
    pub fn new(session: GameSession<S>) -> Self {
        Self {
            session,
            clock: FrameClock::new(),
        }
    }

    pub fn session(&self) -> &GameSession<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession<S> {
        &mut self.session
    }

    /// Frames currently advance the session
    pub fn is_ticking(&self) -> bool {
        self.clock.is_armed()
    }

    /// Start a new game. Ignored while a game is in progress (paused
    /// included); `reset` is the way to abandon one.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.session.started() && !self.session.game_over() {
            return false;
        }
        self.session.start();
        self.sync_clock(now_ms);
        true
    }

    /// Force game over; returns the final score if a game was running.
    pub fn end(&mut self) -> Option<u32> {
        let score = self.session.end();
        self.clock.cancel();
        score
    }

    pub fn reset(&mut self, now_ms: u64) -> Option<u32> {
        let score = self.session.reset();
        self.clock.cancel();
        self.sync_clock(now_ms);
        score
    }

    /// Run a lifecycle command. Returns the final score of an ended game.
    pub fn lifecycle(&mut self, command: Lifecycle, now_ms: u64) -> Option<u32> {
        match command {
            Lifecycle::Start => {
                self.start(now_ms);
                None
            }
            Lifecycle::End => self.end(),
            Lifecycle::Reset => self.reset(now_ms),
        }
    }

    /// Forward a player intent, then re-evaluate whether the clock should run.
    pub fn dispatch(&mut self, intent: Intent, now_ms: u64) -> bool {
        let changed = self.session.apply(intent);
        self.sync_clock(now_ms);
        changed
    }

    /// Repaint callback: feed elapsed time to the session.
    pub fn frame(&mut self, now_ms: u64) -> bool {
        let Some(elapsed) = self.clock.advance(now_ms) else {
            return false;
        };
        let changed = self.session.tick(elapsed);
        self.sync_clock(now_ms);
        changed
    }

    fn sync_clock(&mut self, now_ms: u64) {
        if !self.session.running() {
            self.clock.cancel();
        } else if !self.clock.is_armed() {
            self.clock.arm(now_ms);
        }
    }
}

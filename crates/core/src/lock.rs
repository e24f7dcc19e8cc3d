//! Lock delay state machine
//!
//! ```text
//! Airborne --(move down fails / lands)--> Grounded(since)
//! Grounded --(shift/rotate, now airborne)--> Airborne
//! Grounded --(shift/rotate, still resting)--> Grounded(now)   refresh
//! Grounded --(now - since >= delay)--> lock
//! ```
//!
//! Hard drop bypasses the controller entirely. Timestamps are session
//! milliseconds, so pausing (which stops the session clock) never eats into
//! the delay.

use crate::types::Rules;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Airborne,
    Grounded { since_ms: u64 },
}

#[derive(Debug, Clone)]
pub struct LockController {
    state: LockState,
    delay_ms: u32,
    reset_limit: Option<u32>,
    /// Refreshes spent by the current piece
    resets: u32,
}

impl LockController {
    pub fn new(rules: &Rules) -> Self {
        Self {
            state: LockState::Airborne,
            delay_ms: rules.lock_delay_ms,
            reset_limit: rules.lock_reset_limit,
            resets: 0,
        }
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    pub fn is_grounded(&self) -> bool {
        matches!(self.state, LockState::Grounded { .. })
    }

    /// A downward move failed: start the timer unless it is already running.
    pub fn ground(&mut self, now_ms: u64) {
        if self.state == LockState::Airborne {
            self.state = LockState::Grounded { since_ms: now_ms };
        }
    }

    /// The piece moved successfully and now does (or does not) rest on something.
    ///
    /// A move that keeps the piece grounded refreshes the timer, unless the
    /// per-piece refresh limit is spent.
    pub fn moved(&mut self, resting: bool, now_ms: u64) {
        match (self.state, resting) {
            (_, false) => self.state = LockState::Airborne,
            (LockState::Airborne, true) => {
                self.state = LockState::Grounded { since_ms: now_ms };
            }
            (LockState::Grounded { .. }, true) => {
                if self.reset_limit.map_or(true, |limit| self.resets < limit) {
                    self.resets += 1;
                    self.state = LockState::Grounded { since_ms: now_ms };
                }
            }
        }
    }

    /// Grounded for at least the lock delay
    pub fn expired(&self, now_ms: u64) -> bool {
        match self.state {
            LockState::Airborne => false,
            LockState::Grounded { since_ms } => {
                now_ms.saturating_sub(since_ms) >= self.delay_ms as u64
            }
        }
    }

    /// Back to airborne with a fresh refresh budget (spawn, hold, lock)
    pub fn clear(&mut self) {
        self.state = LockState::Airborne;
        self.resets = 0;
    }
}

//! Core game logic - pure, deterministic, and testable
//!
//! Everything here is free of terminal and file I/O. Time enters only as
//! millisecond deltas passed to [`GameSession::tick`], and randomness only
//! through a [`PieceSource`], so the same seed and the same input script
//! always produce the same game.
//!
//! # Module Structure
//!
//! - [`catalog`]: the seven immutable shape matrices and rotation
//! - [`board`]: 10x20 grid, collision, merge, row sweep
//! - [`piece`]: the falling piece, movement and kick-table rotation
//! - [`rng`]: piece sources (seeded 7-bag, fixed sequence)
//! - [`lock`]: lock-delay state machine
//! - [`scoring`]: line points, level and gravity derivation
//! - [`session`]: the game session orchestrating all of the above
//! - [`clock`]: frame clock and scheduler driving a session
//! - [`snapshot`]: read-only render view
//! - [`event`]: session events for logging
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_core::types::{Intent, Rules};
//!
//! let mut game = GameSession::with_seed(12345, Rules::default());
//! game.start();
//!
//! game.apply(Intent::MoveRight);
//! game.apply(Intent::RotateCw);
//! game.apply(Intent::HardDrop);
//!
//! // Hard drop awards points
//! assert!(game.score() >= 20);
//! ```

pub mod board;
pub mod catalog;
pub mod clock;
pub mod event;
pub mod lock;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::{Board, Position};
pub use catalog::{instantiate, shape_of, Shape};
pub use clock::{FrameClock, Scheduler};
pub use event::SessionEvent;
pub use lock::{LockController, LockState};
pub use piece::ActivePiece;
pub use rng::{PieceSource, Sequence, SevenBag, SimpleRng};
pub use scoring::ClearAward;
pub use session::{GameSession, Phase};
pub use snapshot::{ActiveSnapshot, GameSnapshot};

//! twenty48: the classic 2048 sliding-tile game for the terminal.
//!
//! This crate provides:
//! - A `Board` type with a pure slide-merge engine (`engine` module)
//! - A session controller that owns the board and score (`session` module)
//! - A crossterm frontend for rendering and key input (`ui` module)
//!
//! Quick start:
//! ```
//! use twenty48::engine::{Board, Direction};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board setup with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let b0 = Board::EMPTY
//!     .with_random_tile(&mut rng)
//!     .and_then(|b| b.with_random_tile(&mut rng))
//!     .unwrap();
//! let out = b0.shift(Direction::Left);
//! assert_eq!(out.board.tile_sum(), b0.tile_sum());
//! ```
//!
//! The engine never mutates a board it is given: `shift` takes the board by
//! value and returns the next state in a `MoveOutcome`. Only the session
//! controller holds a live board.
pub mod engine;
pub mod session;
pub mod ui;

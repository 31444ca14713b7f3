//! twenty48-engine: a pure 4x4 2048 board engine.
//!
//! - `Board` is the 16-cell row-major state with ergonomic methods.
//! - Free functions in this crate mirror the methods when convenient
//!   (e.g. `resolve`, `spawn_random_tile`).
//! - The engine holds no state between calls and performs no I/O; the only
//!   randomness is the RNG the caller injects for tile spawning.
//!
//! Quick start:
//! ```
//! use twenty48_engine::{Board, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let b0 = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
//! let r = b0.resolve(Move::Left);
//! assert!(r.changed || r.gained == 0);
//! ```
//!
//! Note: boards are validated once at construction (`Board::try_from_cells`)
//! and are well-formed values afterwards, so every engine operation is total
//! and never fails.

mod ops;
mod state;

pub use ops::{has_available_move, resolve, spawn_random_tile};
pub use state::{Board, InvalidBoard, Move, MoveResult};

//! twenty48-host: drives the pure board engine as a game.
//!
//! - `session`: the game-session reducer (board + score + terminal status).
//! - `store`: injected persistence capability for the best-ever score.
//! - `config`: TOML configuration for the `twenty48` binary.
//!
//! The host owns every side effect the engine refuses to have: the random
//! source, score persistence, and input handling all arrive as explicit
//! capabilities rather than ambient globals.

pub mod config;
pub mod session;
pub mod store;

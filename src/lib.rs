//! slide48 is the rules engine of a sliding tile merge puzzle: a 4x4 board of powers of two where
//! equal tiles merge when pushed together and the game ends once the board locks up.
//!
//! Presentation layers drive a [`engine::Session`] with [`engine::Direction`]s and read back
//! [`engine::GameState`] snapshots.

pub mod engine;
pub mod error;

pub use error::{Error, Result};

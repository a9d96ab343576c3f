//! Falling-pair chain-puzzle simulation core.
//!
//! The engine owns a 6x12 grid, advances a falling two-cell pair, resolves
//! same-color chains with cascading gravity, tracks scoring and leveling,
//! and injects timed garbage blocks. It consumes discrete intents and emits
//! discrete results; rendering, input mapping and persistence live outside.

pub mod core;
pub mod types;

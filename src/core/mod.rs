//! Core game engine modules

pub mod chain;
pub mod garbage;
pub mod grid;
pub mod piece;
pub mod progression;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use chain::{resolve_all, resolve_once, ChainRound};
pub use garbage::GarbageScheduler;
pub use grid::Grid;
pub use piece::PuyoPair;
pub use progression::{fall_interval_ms, ProgressionTracker};
pub use rng::SimpleRng;
pub use session::{GameSession, TickResult};
pub use snapshot::{GameSnapshot, PairSnapshot};

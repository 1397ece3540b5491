//! Character snapshot, stats and progression.

pub mod progression;
pub mod stats;
pub mod types;

pub use progression::*;
pub use stats::*;
pub use types::*;

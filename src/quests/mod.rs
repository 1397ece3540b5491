//! Quest definitions and the per-character quest state machine.

pub mod tracker;
pub mod types;

pub use tracker::*;
pub use types::*;

//! Combat system: formulas, enemy generation and round resolution.

pub mod enemy;
pub mod logic;
pub mod math;
pub mod types;

pub use enemy::*;
pub use logic::*;
pub use math::*;
pub use types::*;

//! Balance constants, error taxonomy and id sources shared by every module.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{GameError, GameResult};
pub use ids::{IdSource, SequentialIds, UuidIds};

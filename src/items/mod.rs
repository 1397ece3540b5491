//! Item system: types, equipment, inventory actions and loot drops.

pub mod drops;
pub mod equipment;
pub mod inventory;
pub mod types;

pub use drops::*;
pub use equipment::*;
pub use inventory::*;
pub use types::*;

//! Item system: types, catalog generation, drops, and the inventory.

#![allow(unused_imports)]

pub mod drops;
pub mod generation;
pub mod inventory;
pub mod types;

pub use drops::*;
pub use generation::*;
pub use inventory::*;
pub use types::*;

//! Dungeon system: a fixed grid of rooms with encounters.

#![allow(unused_imports)]

pub mod generation;
pub mod logic;
pub mod types;

pub use generation::*;
pub use logic::*;
pub use types::*;

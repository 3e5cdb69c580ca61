//! Player character, abilities and status effects.

#![allow(unused_imports)]

pub mod abilities;
pub mod player;
pub mod status;

pub use abilities::*;
pub use player::*;
pub use status::*;

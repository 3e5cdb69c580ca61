//! Core game state and logic.

#![allow(unused_imports)]

pub mod combat_math;
pub mod config;
pub mod constants;
pub mod error;
pub mod game_loop;
pub mod game_state;
pub mod rng;
pub mod session;

pub use constants::*;
pub use error::*;
pub use game_loop::Game;
pub use game_state::*;
pub use session::*;

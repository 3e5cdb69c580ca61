//! Delve - a turn-based text dungeon crawler.
//!
//! This module exposes the game logic for testing and for the binary.
//! The presentation layer is reached only through [`ui::Interface`], so a
//! whole game can be driven from scripted input.

pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod dungeon;
pub mod encounter;
pub mod items;
pub mod quests;
pub mod save_manager;
pub mod shop;
pub mod ui;
pub mod utils;

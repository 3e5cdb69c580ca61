//! Shared combat math functions.
//!
//! These pure functions calculate combat outcomes without side effects.
//! Basic attacks and abilities go through the same damage formula.

use crate::core::constants::{DEFENSE_FACTOR, ENEMY_CRIT_CHANCE, ENEMY_CRIT_MULTIPLIER};
use crate::core::constants::{PLAYER_CRIT_CHANCE, PLAYER_CRIT_MULTIPLIER};
use crate::core::rng::chance;
use rand::Rng;

/// Result of an attack calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResult {
    /// Damage dealt (after crit multiplier if applicable).
    pub damage: u32,
    /// Whether this attack was a critical hit.
    pub is_crit: bool,
}

/// Damage after defense, never below 1.
///
/// `floor(attack * multiplier - defense * 0.5)`, floored at 1.
pub fn calculate_damage(attack: u32, defense: u32, multiplier: f64) -> u32 {
    let raw = attack as f64 * multiplier - defense as f64 * DEFENSE_FACTOR;
    if raw < 1.0 {
        1
    } else {
        raw.floor() as u32
    }
}

/// Rolls a crit and computes damage. A crit multiplies the attack
/// contribution before defense is subtracted.
pub fn roll_attack(
    attack: u32,
    defense: u32,
    multiplier: f64,
    crit_chance: f64,
    crit_multiplier: f64,
    rng: &mut impl Rng,
) -> AttackResult {
    let is_crit = chance(rng, crit_chance);
    let multiplier = if is_crit {
        multiplier * crit_multiplier
    } else {
        multiplier
    };
    AttackResult {
        damage: calculate_damage(attack, defense, multiplier),
        is_crit,
    }
}

/// A basic player attack: 15% crit for double attack.
pub fn player_attack(attack: u32, defense: u32, rng: &mut impl Rng) -> AttackResult {
    roll_attack(
        attack,
        defense,
        1.0,
        PLAYER_CRIT_CHANCE,
        PLAYER_CRIT_MULTIPLIER,
        rng,
    )
}

/// A basic enemy attack: 10% crit for 1.5x attack.
pub fn enemy_attack(attack: u32, defense: u32, rng: &mut impl Rng) -> AttackResult {
    roll_attack(
        attack,
        defense,
        1.0,
        ENEMY_CRIT_CHANCE,
        ENEMY_CRIT_MULTIPLIER,
        rng,
    )
}

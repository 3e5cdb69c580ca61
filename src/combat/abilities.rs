//! Per-ability combat behavior, looked up by ability id.

use crate::character::abilities::{
    DEVASTATING_BLOW, DOUBLE_SLASH, LIFE_DRAIN, POWER_STRIKE, WHIRLWIND,
};
use crate::core::constants::{ABILITY_CRIT_MULTIPLIER, LIFE_DRAIN_HEAL_FRACTION};

/// How an ability resolves. The damage multiplier always comes from the
/// ability itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbilityEffect {
    /// One hit with a chance of an extra crit multiplier
    Strike { crit_chance: f64, crit_multiplier: f64 },
    /// Several independent hits; stops once the target is down
    MultiHit { hits: u32 },
    /// One hit that heals the user by a fraction of the damage (at least 1)
    Drain { heal_fraction: f64 },
}

/// Behavior for an ability id. Unknown ids are a plain single hit.
pub fn ability_effect(id: u16) -> AbilityEffect {
    match id {
        POWER_STRIKE => AbilityEffect::Strike {
            crit_chance: 0.20,
            crit_multiplier: ABILITY_CRIT_MULTIPLIER,
        },
        DOUBLE_SLASH => AbilityEffect::MultiHit { hits: 2 },
        LIFE_DRAIN => AbilityEffect::Drain {
            heal_fraction: LIFE_DRAIN_HEAL_FRACTION,
        },
        WHIRLWIND => AbilityEffect::Strike {
            crit_chance: 0.15,
            crit_multiplier: ABILITY_CRIT_MULTIPLIER,
        },
        DEVASTATING_BLOW => AbilityEffect::Strike {
            crit_chance: 0.25,
            crit_multiplier: ABILITY_CRIT_MULTIPLIER,
        },
        _ => AbilityEffect::Strike {
            crit_chance: 0.0,
            crit_multiplier: 1.0,
        },
    }
}

/// Healing granted by a drain hit.
pub fn drain_heal(damage: u32, heal_fraction: f64) -> u32 {
    ((damage as f64 * heal_fraction) as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_abilities() {
        assert_eq!(ability_effect(DOUBLE_SLASH), AbilityEffect::MultiHit { hits: 2 });
        assert!(matches!(
            ability_effect(DEVASTATING_BLOW),
            AbilityEffect::Strike { crit_chance, .. } if crit_chance == 0.25
        ));
    }

    #[test]
    fn test_unknown_ability_is_plain_strike() {
        assert_eq!(
            ability_effect(99),
            AbilityEffect::Strike {
                crit_chance: 0.0,
                crit_multiplier: 1.0
            }
        );
    }

    #[test]
    fn test_drain_heal_minimum() {
        assert_eq!(drain_heal(1, 0.5), 1);
        assert_eq!(drain_heal(15, 0.5), 7);
    }
}

//! Ability templates and per-player ability copies.

#[derive(Debug, Clone, PartialEq)]
pub struct Ability {
    pub id: u16,
    pub name: String,
    pub description: String,
    pub unlocked_at_level: u32,
    pub damage_multiplier: f64,
    pub cooldown: u32,
    pub cooldown_remaining: u32,
}

impl Ability {
    pub fn new(
        id: u16,
        name: &str,
        description: &str,
        unlocked_at_level: u32,
        damage_multiplier: f64,
        cooldown: u32,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            unlocked_at_level,
            damage_multiplier,
            cooldown,
            cooldown_remaining: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining == 0
    }

    /// Starts the cooldown after a use.
    pub fn trigger_cooldown(&mut self) {
        self.cooldown_remaining = self.cooldown;
    }

    pub fn tick_cooldown(&mut self) {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
    }
}

pub const POWER_STRIKE: u16 = 1;
pub const DOUBLE_SLASH: u16 = 2;
pub const LIFE_DRAIN: u16 = 3;
pub const WHIRLWIND: u16 = 4;
pub const DEVASTATING_BLOW: u16 = 5;

/// The game-wide ability list. Players receive copies when they qualify.
pub fn ability_templates() -> Vec<Ability> {
    vec![
        Ability::new(
            POWER_STRIKE,
            "Power Strike",
            "A heavy blow dealing 1.5x damage with a chance to crit.",
            1,
            1.5,
            2,
        ),
        Ability::new(
            DOUBLE_SLASH,
            "Double Slash",
            "Two quick strikes in succession.",
            3,
            1.0,
            3,
        ),
        Ability::new(
            LIFE_DRAIN,
            "Life Drain",
            "Steal the life force of your foe, healing half the damage dealt.",
            4,
            1.2,
            4,
        ),
        Ability::new(
            WHIRLWIND,
            "Whirlwind",
            "A spinning assault dealing double damage.",
            6,
            2.0,
            4,
        ),
        Ability::new(
            DEVASTATING_BLOW,
            "Devastating Blow",
            "An overwhelming strike dealing triple damage.",
            8,
            3.0,
            6,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_have_unique_ids() {
        let templates = ability_templates();
        let mut ids: Vec<u16> = templates.iter().map(|a| a.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), templates.len());
    }

    #[test]
    fn test_first_ability_available_at_start() {
        let templates = ability_templates();
        assert!(templates.iter().any(|a| a.unlocked_at_level == 1));
    }

    #[test]
    fn test_cooldown_cycle() {
        let mut ability = ability_templates().remove(0);
        assert!(ability.is_ready());
        ability.trigger_cooldown();
        assert_eq!(ability.cooldown_remaining, 2);
        ability.tick_cooldown();
        ability.tick_cooldown();
        ability.tick_cooldown();
        assert_eq!(ability.cooldown_remaining, 0);
        assert!(ability.is_ready());
    }
}

use crate::character::{EffectTarget, StatusEffect, StatusEffectType, StatusEffects, TickReport};
use crate::core::error::ActionError;
use crate::items::{Item, ItemEffect, Rarity};

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: u16,
    pub name: String,
    pub base_health: u32,
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub exp_reward: u32,
    pub gold_reward: u32,
    /// Tier used to match enemies to the player level
    pub difficulty: u32,
    pub loot_rarity: Rarity,
    pub status_effects: StatusEffects,
    /// Effect this enemy may inflict when it lands a hit
    pub affliction: Option<StatusEffectType>,
    /// Effect the enemy carries into every fight
    pub opening_effect: Option<StatusEffectType>,
}

impl Enemy {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u16,
        name: &str,
        health: u32,
        attack: u32,
        defense: u32,
        exp_reward: u32,
        gold_reward: u32,
        difficulty: u32,
        loot_rarity: Rarity,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            base_health: health,
            health,
            attack,
            defense,
            exp_reward,
            gold_reward,
            difficulty,
            loot_rarity,
            status_effects: StatusEffects::new(),
            affliction: None,
            opening_effect: None,
        }
    }

    pub fn with_affliction(mut self, effect: StatusEffectType) -> Self {
        self.affliction = Some(effect);
        self
    }

    pub fn with_opening_effect(mut self, effect: StatusEffectType) -> Self {
        self.opening_effect = Some(effect);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Multiplies every combat and reward stat, flooring at 1.
    pub fn scale(&mut self, multiplier: f64) {
        let scaled = |value: u32| ((value as f64 * multiplier) as u32).max(1);
        self.base_health = scaled(self.base_health);
        self.health = scaled(self.health);
        self.attack = scaled(self.attack);
        self.defense = scaled(self.defense);
        self.exp_reward = scaled(self.exp_reward);
        self.gold_reward = scaled(self.gold_reward);
    }

    pub fn apply_status(&mut self, effect: StatusEffect) -> Result<(), ActionError> {
        let (effects, target) = self.effects_and_target();
        effects.apply(effect, target)
    }

    pub fn tick_status(&mut self) -> TickReport {
        let (effects, target) = self.effects_and_target();
        effects.tick(target)
    }

    fn effects_and_target(&mut self) -> (&mut StatusEffects, EffectTarget<'_>) {
        (
            &mut self.status_effects,
            EffectTarget {
                health: &mut self.health,
                attack: &mut self.attack,
                defense: &mut self.defense,
            },
        )
    }
}

/// The game-wide enemy list. Encounters copy and scale one of these.
pub fn enemy_templates() -> Vec<Enemy> {
    use StatusEffectType::*;
    vec![
        Enemy::new(1, "Giant Rat", 20, 6, 1, 15, 5, 1, Rarity::Common),
        Enemy::new(2, "Goblin", 30, 8, 2, 20, 10, 1, Rarity::Common),
        Enemy::new(3, "Skeleton", 35, 9, 3, 30, 12, 2, Rarity::Common).with_affliction(Weakened),
        Enemy::new(4, "Wolf", 32, 10, 2, 28, 8, 2, Rarity::Common).with_affliction(Bleed),
        Enemy::new(5, "Giant Spider", 40, 11, 3, 40, 18, 3, Rarity::Uncommon)
            .with_affliction(Poison),
        Enemy::new(6, "Orc Brute", 60, 13, 5, 55, 25, 4, Rarity::Uncommon),
        Enemy::new(7, "Troll", 80, 15, 7, 75, 35, 5, Rarity::Rare).with_opening_effect(Fortified),
        Enemy::new(8, "Dark Knight", 90, 17, 10, 95, 50, 6, Rarity::Rare)
            .with_opening_effect(Fortified),
        Enemy::new(9, "Stone Golem", 120, 18, 14, 120, 60, 7, Rarity::Rare).with_affliction(Stun),
        Enemy::new(10, "Wyvern", 130, 22, 10, 150, 80, 8, Rarity::Legendary),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatResult {
    Victory,
    Defeat,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatPhase {
    PlayerTurn,
    EnemyTurn,
    Resolved(CombatResult),
}

/// A player's choice for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    /// Index into the player's unlocked abilities
    UseAbility(usize),
    /// Inventory item id
    UseItem(u16),
    Escape,
    /// Give up the action (used while stunned)
    Pass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combatant {
    Player,
    Enemy,
}

/// Everything that happened in a round, in order, for display.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    PlayerAttack {
        damage: u32,
        critical: bool,
    },
    AbilityHit {
        name: String,
        damage: u32,
        critical: bool,
    },
    LifeDrained {
        healed: u32,
    },
    ItemUsed {
        item: Item,
        effect: ItemEffect,
    },
    EscapeFailed,
    Escaped,
    Stunned(Combatant),
    EnemyAttack {
        damage: u32,
        critical: bool,
    },
    EffectApplied {
        target: Combatant,
        effect: StatusEffectType,
    },
    EffectDamage {
        target: Combatant,
        damage: u32,
    },
    EffectExpired {
        target: Combatant,
        effect: StatusEffectType,
    },
    EnemyDefeated,
    PlayerDefeated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_cover_tiers() {
        let templates = enemy_templates();
        assert_eq!(templates.len(), crate::core::constants::MAX_ENEMIES);
        assert_eq!(templates.iter().map(|e| e.difficulty).min(), Some(1));
        assert_eq!(templates.iter().map(|e| e.difficulty).max(), Some(8));
        assert!(templates.iter().all(|e| e.health == e.base_health));
    }

    #[test]
    fn test_scale_floors_at_one() {
        let mut enemy = Enemy::new(1, "Rat", 10, 2, 1, 3, 1, 1, Rarity::Common);
        enemy.scale(0.1);
        assert_eq!(enemy.health, 1);
        assert_eq!(enemy.defense, 1);
        assert_eq!(enemy.gold_reward, 1);
    }

    #[test]
    fn test_scale_up() {
        let mut enemy = Enemy::new(1, "Rat", 20, 6, 2, 15, 5, 1, Rarity::Common);
        enemy.scale(1.5);
        assert_eq!(enemy.base_health, 30);
        assert_eq!(enemy.health, 30);
        assert_eq!(enemy.attack, 9);
        assert_eq!(enemy.defense, 3);
    }

    #[test]
    fn test_enemy_fortified_raises_defense() {
        let mut enemy = Enemy::new(8, "Dark Knight", 90, 17, 10, 95, 50, 6, Rarity::Rare);
        enemy
            .apply_status(StatusEffect::new(StatusEffectType::Fortified))
            .unwrap();
        assert_eq!(enemy.defense, 14);
        for _ in 0..3 {
            enemy.tick_status();
        }
        assert_eq!(enemy.defense, 10);
    }
}

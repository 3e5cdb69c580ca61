//! The player character: stats, trait, difficulty, progression.

use super::abilities::Ability;
use super::status::{EffectTarget, StatusEffect, StatusEffects, TickReport};
use crate::core::constants::*;
use crate::core::error::ActionError;

/// Character trait, chosen once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerTrait {
    HeavyArmour = 0,
    QuickHands = 1,
    Fortunate = 2,
    Scholarly = 3,
    BeastMaster = 4,
}

impl PlayerTrait {
    pub fn all() -> [PlayerTrait; 5] {
        [
            PlayerTrait::HeavyArmour,
            PlayerTrait::QuickHands,
            PlayerTrait::Fortunate,
            PlayerTrait::Scholarly,
            PlayerTrait::BeastMaster,
        ]
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::all().get(index as usize).copied()
    }

    pub fn index(&self) -> u32 {
        *self as u32
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerTrait::HeavyArmour => "Heavy Armour",
            PlayerTrait::QuickHands => "Quick Hands",
            PlayerTrait::Fortunate => "Fortunate",
            PlayerTrait::Scholarly => "Scholarly",
            PlayerTrait::BeastMaster => "Beast Master",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PlayerTrait::HeavyArmour => "+5 defense from the start",
            PlayerTrait::QuickHands => "+15% chance to escape from combat",
            PlayerTrait::Fortunate => "+50% gold from all sources",
            PlayerTrait::Scholarly => "+50% experience from all sources",
            PlayerTrait::BeastMaster => "Wild creatures may heed your call",
        }
    }

    /// Extra escape probability granted by the trait.
    pub fn escape_bonus(&self) -> f64 {
        match self {
            PlayerTrait::QuickHands => QUICK_HANDS_ESCAPE_BONUS,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy = 0,
    Normal = 1,
    Hard = 2,
    Insane = 3,
}

impl Difficulty {
    pub fn all() -> [Difficulty; 4] {
        [
            Difficulty::Easy,
            Difficulty::Normal,
            Difficulty::Hard,
            Difficulty::Insane,
        ]
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::all().get(index as usize).copied()
    }

    pub fn index(&self) -> u32 {
        *self as u32
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Insane => "Insane",
        }
    }

    /// (max health, defense) multipliers applied once at game start.
    pub fn stat_multipliers(&self) -> (f64, f64) {
        match self {
            Difficulty::Easy => (1.5, 1.35),
            Difficulty::Normal => (1.0, 1.0),
            Difficulty::Hard => (0.85, 0.85),
            Difficulty::Insane => (0.7, 0.7),
        }
    }

    /// Death ends the run.
    pub fn is_permadeath(&self) -> bool {
        matches!(self, Difficulty::Insane)
    }
}

/// Outcome of an experience grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExperienceGain {
    pub amount: u32,
    /// (old level, new level) when a level was gained
    pub level_up: Option<(u32, u32)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub health: u32,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub experience: u32,
    pub level: u32,
    pub gold: u32,
    pub current_room: usize,
    pub player_trait: PlayerTrait,
    pub difficulty: Difficulty,
    /// Set once the difficulty multipliers have been applied.
    pub difficulty_locked: bool,
    pub gold_multiplier: f32,
    pub exp_multiplier: f32,
    pub status_effects: StatusEffects,
    pub abilities: Vec<Ability>,
    pub can_charm_enemies: bool,
}

impl Player {
    /// Creates a level 1 character with the trait already applied.
    pub fn new(name: &str, player_trait: PlayerTrait) -> Self {
        let name: String = name.trim().chars().take(MAX_NAME_LENGTH).collect();
        let mut player = Self {
            name: if name.is_empty() {
                "Adventurer".to_string()
            } else {
                name
            },
            health: STARTING_HEALTH,
            max_health: STARTING_HEALTH,
            attack: STARTING_ATTACK,
            defense: STARTING_DEFENSE,
            experience: STARTING_XP,
            level: 1,
            gold: STARTING_GOLD,
            current_room: 0,
            player_trait,
            difficulty: Difficulty::Normal,
            difficulty_locked: false,
            gold_multiplier: 1.0,
            exp_multiplier: 1.0,
            status_effects: StatusEffects::new(),
            abilities: Vec::new(),
            can_charm_enemies: false,
        };
        player.apply_trait();
        player
    }

    fn apply_trait(&mut self) {
        match self.player_trait {
            PlayerTrait::HeavyArmour => self.defense += HEAVY_ARMOUR_DEFENSE_BONUS,
            PlayerTrait::QuickHands => {}
            PlayerTrait::Fortunate => self.gold_multiplier = FORTUNATE_GOLD_MULTIPLIER,
            PlayerTrait::Scholarly => self.exp_multiplier = SCHOLARLY_EXP_MULTIPLIER,
            PlayerTrait::BeastMaster => self.can_charm_enemies = true,
        }
    }

    /// Applies the difficulty multipliers to max health and defense.
    /// Returns false (and changes nothing) if a difficulty was already applied.
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.difficulty_locked {
            return false;
        }
        let (health_mult, defense_mult) = difficulty.stat_multipliers();
        self.max_health = ((self.max_health as f64 * health_mult) as u32).max(1);
        self.health = self.max_health;
        self.defense = (self.defense as f64 * defense_mult) as u32;
        self.difficulty = difficulty;
        self.difficulty_locked = true;
        true
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Heals up to max health. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    /// Experience needed to reach the next level.
    pub fn xp_to_next_level(&self) -> u32 {
        XP_PER_LEVEL * self.level
    }

    /// Grants experience scaled by the trait multiplier. Reaching the
    /// threshold levels up once and resets experience to zero.
    pub fn gain_experience(&mut self, base: u32) -> ExperienceGain {
        if self.level >= MAX_LEVEL {
            return ExperienceGain::default();
        }
        let amount = (base as f32 * self.exp_multiplier) as u32;
        self.experience += amount;

        let mut gain = ExperienceGain {
            amount,
            level_up: None,
        };
        if self.experience >= self.xp_to_next_level() {
            let old_level = self.level;
            self.level_up();
            gain.level_up = Some((old_level, self.level));
        }
        gain
    }

    fn level_up(&mut self) {
        self.level = (self.level + 1).min(MAX_LEVEL);
        self.experience = 0;
        self.max_health += HP_LEVEL_GAIN;
        self.attack += ATTACK_LEVEL_GAIN;
        self.defense += DEFENSE_LEVEL_GAIN;
        self.health = self.max_health;
        log::info!("{} reached level {}", self.name, self.level);
    }

    /// Grants gold scaled by the trait multiplier. Returns the amount added.
    pub fn gain_gold(&mut self, base: u32) -> u32 {
        let amount = (base as f32 * self.gold_multiplier) as u32;
        self.gold += amount;
        amount
    }

    /// Removes a fraction of current gold. Returns the amount lost.
    pub fn lose_gold_fraction(&mut self, fraction: f64) -> u32 {
        let lost = (self.gold as f64 * fraction) as u32;
        self.gold -= lost;
        lost
    }

    pub fn spend_gold(&mut self, cost: u32) -> Result<(), ActionError> {
        if self.gold < cost {
            return Err(ActionError::InsufficientGold {
                cost,
                available: self.gold,
            });
        }
        self.gold -= cost;
        Ok(())
    }

    /// Copies every template the player now qualifies for and does not own.
    /// Returns the names of newly unlocked abilities.
    pub fn unlock_abilities(&mut self, templates: &[Ability]) -> Vec<String> {
        let mut unlocked = Vec::new();
        for template in templates {
            if self.abilities.len() >= MAX_ABILITIES {
                break;
            }
            if template.unlocked_at_level <= self.level && !self.has_ability(template.id) {
                let mut ability = template.clone();
                ability.cooldown_remaining = 0;
                unlocked.push(ability.name.clone());
                self.abilities.push(ability);
            }
        }
        unlocked
    }

    pub fn has_ability(&self, id: u16) -> bool {
        self.abilities.iter().any(|a| a.id == id)
    }

    pub fn tick_cooldowns(&mut self) {
        for ability in &mut self.abilities {
            ability.tick_cooldown();
        }
    }

    /// Every ability ready again. Cooldowns only count within one fight.
    pub fn reset_cooldowns(&mut self) {
        for ability in &mut self.abilities {
            ability.cooldown_remaining = 0;
        }
    }

    pub fn escape_chance(&self) -> f64 {
        BASE_ESCAPE_CHANCE + self.player_trait.escape_bonus()
    }

    pub fn apply_status(&mut self, effect: StatusEffect) -> Result<(), ActionError> {
        let (effects, target) = self.effects_and_target();
        effects.apply(effect, target)
    }

    pub fn tick_status(&mut self) -> TickReport {
        let (effects, target) = self.effects_and_target();
        effects.tick(target)
    }

    /// Drops every effect, restoring modified stats.
    pub fn clear_status(&mut self) {
        let (effects, target) = self.effects_and_target();
        effects.clear(target);
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

//! Status effects shared by players and enemies.

use crate::core::constants::MAX_STATUS_EFFECTS;
use crate::core::error::ActionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEffectType {
    Poison,
    Bleed,
    Stun,
    Fortified,
    Weakened,
}

impl StatusEffectType {
    pub fn name(&self) -> &'static str {
        match self {
            StatusEffectType::Poison => "Poisoned",
            StatusEffectType::Bleed => "Bleeding",
            StatusEffectType::Stun => "Stunned",
            StatusEffectType::Fortified => "Fortified",
            StatusEffectType::Weakened => "Weakened",
        }
    }
}

/// An active effect. Damage-over-time types use `damage_per_turn`;
/// Fortified/Weakened use `stat_modifier` (defense bonus / attack penalty).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEffect {
    pub effect_type: StatusEffectType,
    pub duration: u32,
    pub damage_per_turn: u32,
    pub stat_modifier: u32,
    /// Amount actually added/removed on application, reversed on expiry.
    applied: u32,
}

impl StatusEffect {
    /// Standard effect for the given type.
    pub fn new(effect_type: StatusEffectType) -> Self {
        let (duration, damage_per_turn, stat_modifier) = match effect_type {
            StatusEffectType::Poison => (3, 3, 0),
            StatusEffectType::Bleed => (2, 5, 0),
            StatusEffectType::Stun => (1, 0, 0),
            StatusEffectType::Fortified => (3, 0, 4),
            StatusEffectType::Weakened => (3, 0, 3),
        };
        Self::custom(effect_type, duration, damage_per_turn, stat_modifier)
    }

    pub fn custom(
        effect_type: StatusEffectType,
        duration: u32,
        damage_per_turn: u32,
        stat_modifier: u32,
    ) -> Self {
        Self {
            effect_type,
            duration,
            damage_per_turn,
            stat_modifier,
            applied: 0,
        }
    }
}

/// Stats a status effect can touch.
pub struct EffectTarget<'a> {
    pub health: &'a mut u32,
    pub attack: &'a mut u32,
    pub defense: &'a mut u32,
}

/// Result of one tick over an effect list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub damage: u32,
    pub expired: Vec<StatusEffectType>,
    /// A Stun was active during this tick; the combatant loses its next action.
    pub stunned: bool,
}

/// Bounded list of active effects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn has(&self, effect_type: StatusEffectType) -> bool {
        self.effects.iter().any(|e| e.effect_type == effect_type)
    }

    /// Applies an effect. An already-active type only has its duration
    /// refreshed, so stat modifiers never stack.
    pub fn apply(
        &mut self,
        mut effect: StatusEffect,
        mut target: EffectTarget<'_>,
    ) -> Result<(), ActionError> {
        if let Some(active) = self
            .effects
            .iter_mut()
            .find(|e| e.effect_type == effect.effect_type)
        {
            active.duration = active.duration.max(effect.duration);
            return Ok(());
        }
        if self.effects.len() >= MAX_STATUS_EFFECTS {
            return Err(ActionError::StatusEffectLimit);
        }

        match effect.effect_type {
            StatusEffectType::Fortified => {
                *target.defense += effect.stat_modifier;
                effect.applied = effect.stat_modifier;
            }
            StatusEffectType::Weakened => {
                let penalty = effect.stat_modifier.min(target.attack.saturating_sub(1));
                *target.attack -= penalty;
                effect.applied = penalty;
            }
            StatusEffectType::Poison | StatusEffectType::Bleed | StatusEffectType::Stun => {}
        }
        self.effects.push(effect);
        Ok(())
    }

    /// Applies damage-over-time, decrements durations and reverses stat
    /// modifiers of effects that run out.
    pub fn tick(&mut self, mut target: EffectTarget<'_>) -> TickReport {
        let mut report = TickReport::default();
        for effect in &mut self.effects {
            if effect.effect_type == StatusEffectType::Stun {
                report.stunned = true;
            }
            if effect.damage_per_turn > 0 {
                let dealt = effect.damage_per_turn.min(*target.health);
                *target.health -= dealt;
                report.damage += dealt;
            }
            effect.duration = effect.duration.saturating_sub(1);
        }

        let (expired, active): (Vec<_>, Vec<_>) =
            self.effects.drain(..).partition(|e| e.duration == 0);
        self.effects = active;
        for effect in expired {
            reverse(&effect, target.attack, target.defense);
            report.expired.push(effect.effect_type);
        }
        report
    }

    /// Removes every effect, reversing stat modifiers.
    pub fn clear(&mut self, mut target: EffectTarget<'_>) {
        for effect in self.effects.drain(..) {
            reverse(&effect, target.attack, target.defense);
        }
    }
}

fn reverse(effect: &StatusEffect, attack: &mut u32, defense: &mut u32) {
    match effect.effect_type {
        StatusEffectType::Fortified => *defense = defense.saturating_sub(effect.applied),
        StatusEffectType::Weakened => *attack += effect.applied,
        StatusEffectType::Poison | StatusEffectType::Bleed | StatusEffectType::Stun => {}
    }
}

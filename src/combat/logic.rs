//! Round-by-round combat resolution and victory rewards.
//!
//! `Combat` borrows the participants for the length of one fight. Each call
//! to `resolve_round` runs a full round (player action, enemy action, status
//! ticks, cooldowns) and reports what happened as a list of events.

use super::abilities::{ability_effect, drain_heal, AbilityEffect};
use super::types::{CombatAction, CombatEvent, CombatPhase, CombatResult, Combatant, Enemy};
use crate::character::{Ability, ExperienceGain, Player, StatusEffect, TickReport};
use crate::core::combat_math::{enemy_attack, player_attack, roll_attack};
use crate::core::constants::AFFLICTION_CHANCE;
use crate::core::error::ActionError;
use crate::core::rng::chance;
use crate::core::session::GameStatistics;
use crate::items::{generate_item, roll_item_type, Inventory, Item, Rarity};
use rand::Rng;

pub struct Combat<'a> {
    pub player: &'a mut Player,
    pub enemy: &'a mut Enemy,
    pub inventory: &'a mut Inventory,
    phase: CombatPhase,
    player_stunned: bool,
    enemy_stunned: bool,
    damage_dealt: u32,
    damage_taken: u32,
}

impl<'a> Combat<'a> {
    /// Starts a fight. The enemy's opening effect (if any) is applied here.
    pub fn new(player: &'a mut Player, enemy: &'a mut Enemy, inventory: &'a mut Inventory) -> Self {
        if let Some(effect) = enemy.opening_effect {
            if let Err(e) = enemy.apply_status(StatusEffect::new(effect)) {
                log::warn!("could not apply {} to {}: {}", effect.name(), enemy.name, e);
            }
        }
        Self {
            player,
            enemy,
            inventory,
            phase: CombatPhase::PlayerTurn,
            player_stunned: false,
            enemy_stunned: false,
            damage_dealt: 0,
            damage_taken: 0,
        }
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn result(&self) -> Option<CombatResult> {
        match self.phase {
            CombatPhase::Resolved(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.result().is_some()
    }

    /// The player will lose their next action.
    pub fn player_stunned(&self) -> bool {
        self.player_stunned
    }

    pub fn damage_dealt(&self) -> u32 {
        self.damage_dealt
    }

    pub fn damage_taken(&self) -> u32 {
        self.damage_taken
    }

    /// Runs one full round. An invalid action is rejected before anything
    /// changes, so the caller can simply ask again.
    pub fn resolve_round(
        &mut self,
        action: CombatAction,
        rng: &mut impl Rng,
    ) -> Result<Vec<CombatEvent>, ActionError> {
        let mut events = Vec::new();
        if self.is_over() {
            return Ok(events);
        }

        if self.player_stunned {
            self.player_stunned = false;
            events.push(CombatEvent::Stunned(Combatant::Player));
        } else {
            self.validate(action)?;
            self.player_action(action, rng, &mut events);
            if self.is_over() {
                return Ok(events);
            }
        }

        if !self.enemy.is_alive() {
            self.finish(CombatResult::Victory, &mut events);
            return Ok(events);
        }

        self.phase = CombatPhase::EnemyTurn;
        self.enemy_action(rng, &mut events);
        if !self.player.is_alive() {
            self.finish(CombatResult::Defeat, &mut events);
            return Ok(events);
        }

        let player_report = self.player.tick_status();
        self.player_stunned = player_report.stunned;
        self.damage_taken += player_report.damage;
        push_tick_events(Combatant::Player, player_report, &mut events);

        let enemy_report = self.enemy.tick_status();
        self.enemy_stunned = enemy_report.stunned;
        self.damage_dealt += enemy_report.damage;
        push_tick_events(Combatant::Enemy, enemy_report, &mut events);

        if !self.enemy.is_alive() {
            self.finish(CombatResult::Victory, &mut events);
            return Ok(events);
        }
        if !self.player.is_alive() {
            self.finish(CombatResult::Defeat, &mut events);
            return Ok(events);
        }

        self.player.tick_cooldowns();
        self.phase = CombatPhase::PlayerTurn;
        Ok(events)
    }

    fn validate(&self, action: CombatAction) -> Result<(), ActionError> {
        match action {
            CombatAction::UseAbility(index) => {
                if self.player.abilities.is_empty() {
                    return Err(ActionError::NoAbilities);
                }
                let ability = self
                    .player
                    .abilities
                    .get(index)
                    .ok_or(ActionError::InvalidAbility(index))?;
                if !ability.is_ready() {
                    return Err(ActionError::AbilityOnCooldown {
                        name: ability.name.clone(),
                        remaining: ability.cooldown_remaining,
                    });
                }
                Ok(())
            }
            CombatAction::UseItem(id) => self
                .inventory
                .find(id)
                .map(|_| ())
                .ok_or(ActionError::ItemNotFound(id)),
            CombatAction::Attack | CombatAction::Escape | CombatAction::Pass => Ok(()),
        }
    }

    fn player_action(
        &mut self,
        action: CombatAction,
        rng: &mut impl Rng,
        events: &mut Vec<CombatEvent>,
    ) {
        match action {
            CombatAction::Attack => {
                let hit = player_attack(self.player.attack, self.enemy.defense, rng);
                self.hit_enemy(hit.damage);
                events.push(CombatEvent::PlayerAttack {
                    damage: hit.damage,
                    critical: hit.is_crit,
                });
            }
            CombatAction::UseAbility(index) => {
                let Some(ability) = self.player.abilities.get_mut(index) else {
                    return;
                };
                ability.trigger_cooldown();
                let ability = ability.clone();
                self.use_ability(&ability, rng, events);
            }
            CombatAction::UseItem(id) => match self.inventory.use_item(id, self.player) {
                Ok((item, effect)) => events.push(CombatEvent::ItemUsed { item, effect }),
                Err(e) => log::warn!("item use failed after validation: {}", e),
            },
            CombatAction::Escape => {
                if chance(rng, self.player.escape_chance()) {
                    events.push(CombatEvent::Escaped);
                    self.finish(CombatResult::Escape, events);
                } else {
                    events.push(CombatEvent::EscapeFailed);
                }
            }
            CombatAction::Pass => {}
        }
    }

    fn use_ability(&mut self, ability: &Ability, rng: &mut impl Rng, events: &mut Vec<CombatEvent>) {
        let attack = self.player.attack;
        match ability_effect(ability.id) {
            AbilityEffect::Strike {
                crit_chance,
                crit_multiplier,
            } => {
                let hit = roll_attack(
                    attack,
                    self.enemy.defense,
                    ability.damage_multiplier,
                    crit_chance,
                    crit_multiplier,
                    rng,
                );
                self.hit_enemy(hit.damage);
                events.push(CombatEvent::AbilityHit {
                    name: ability.name.clone(),
                    damage: hit.damage,
                    critical: hit.is_crit,
                });
            }
            AbilityEffect::MultiHit { hits } => {
                for _ in 0..hits {
                    if !self.enemy.is_alive() {
                        break;
                    }
                    let hit = roll_attack(
                        attack,
                        self.enemy.defense,
                        ability.damage_multiplier,
                        0.0,
                        1.0,
                        rng,
                    );
                    self.hit_enemy(hit.damage);
                    events.push(CombatEvent::AbilityHit {
                        name: ability.name.clone(),
                        damage: hit.damage,
                        critical: false,
                    });
                }
            }
            AbilityEffect::Drain { heal_fraction } => {
                let hit = roll_attack(
                    attack,
                    self.enemy.defense,
                    ability.damage_multiplier,
                    0.0,
                    1.0,
                    rng,
                );
                self.hit_enemy(hit.damage);
                let healed = self.player.heal(drain_heal(hit.damage, heal_fraction));
                events.push(CombatEvent::AbilityHit {
                    name: ability.name.clone(),
                    damage: hit.damage,
                    critical: false,
                });
                events.push(CombatEvent::LifeDrained { healed });
            }
        }
    }

    fn enemy_action(&mut self, rng: &mut impl Rng, events: &mut Vec<CombatEvent>) {
        if self.enemy_stunned {
            self.enemy_stunned = false;
            events.push(CombatEvent::Stunned(Combatant::Enemy));
            return;
        }

        let hit = enemy_attack(self.enemy.attack, self.player.defense, rng);
        self.player.take_damage(hit.damage);
        self.damage_taken += hit.damage;
        events.push(CombatEvent::EnemyAttack {
            damage: hit.damage,
            critical: hit.is_crit,
        });

        if !self.player.is_alive() {
            return;
        }
        if let Some(effect) = self.enemy.affliction {
            if chance(rng, AFFLICTION_CHANCE) {
                match self.player.apply_status(StatusEffect::new(effect)) {
                    Ok(()) => events.push(CombatEvent::EffectApplied {
                        target: Combatant::Player,
                        effect,
                    }),
                    Err(e) => log::warn!("{} not applied: {}", effect.name(), e),
                }
            }
        }
    }

    fn hit_enemy(&mut self, damage: u32) {
        self.enemy.take_damage(damage);
        self.damage_dealt += damage;
    }

    fn finish(&mut self, result: CombatResult, events: &mut Vec<CombatEvent>) {
        match result {
            CombatResult::Victory => events.push(CombatEvent::EnemyDefeated),
            CombatResult::Defeat => events.push(CombatEvent::PlayerDefeated),
            CombatResult::Escape => {}
        }
        // Modifiers and cooldowns never outlive the fight.
        self.player.clear_status();
        self.player.reset_cooldowns();
        self.player_stunned = false;
        self.enemy_stunned = false;
        self.phase = CombatPhase::Resolved(result);
        log::debug!(
            "combat with {} resolved: {:?} (dealt {}, taken {})",
            self.enemy.name,
            result,
            self.damage_dealt,
            self.damage_taken
        );
    }
}

fn push_tick_events(target: Combatant, report: TickReport, events: &mut Vec<CombatEvent>) {
    if report.damage > 0 {
        events.push(CombatEvent::EffectDamage {
            target,
            damage: report.damage,
        });
    }
    for effect in report.expired {
        events.push(CombatEvent::EffectExpired { target, effect });
    }
}

/// How the loot drop of a victory is decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LootRoll {
    /// Drop with the given probability at the given rarity
    Chance(f64, Rarity),
    /// Always drop at the given rarity
    Guaranteed(Rarity),
}

/// What a victory paid out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VictoryRewards {
    pub experience: ExperienceGain,
    pub gold: u32,
    pub item: Option<Item>,
    /// Dropped item that did not fit in the inventory
    pub discarded: Option<Item>,
    pub unlocked_abilities: Vec<String>,
}

/// Grants experience, gold and loot for a won fight and updates statistics.
#[allow(clippy::too_many_arguments)]
pub fn award_victory(
    player: &mut Player,
    inventory: &mut Inventory,
    stats: &mut GameStatistics,
    ability_templates: &[Ability],
    exp: u32,
    gold: u32,
    loot: LootRoll,
    rng: &mut impl Rng,
) -> VictoryRewards {
    let mut rewards = VictoryRewards {
        experience: player.gain_experience(exp),
        gold: player.gain_gold(gold),
        ..Default::default()
    };
    if rewards.experience.level_up.is_some() {
        rewards.unlocked_abilities = player.unlock_abilities(ability_templates);
    }
    stats.enemies_defeated += 1;
    stats.gold_earned += rewards.gold;

    let rarity = match loot {
        LootRoll::Chance(probability, rarity) => chance(rng, probability).then_some(rarity),
        LootRoll::Guaranteed(rarity) => Some(rarity),
    };
    if let Some(rarity) = rarity {
        let item = generate_item(rarity, roll_item_type(rng), rng);
        if inventory.can_accept(&item) {
            match inventory.add_item(item.clone()) {
                Ok(()) => {
                    stats.items_collected += 1;
                    rewards.item = Some(item);
                }
                Err(e) => {
                    log::warn!("loot {} lost: {}", item.name, e);
                    rewards.discarded = Some(item);
                }
            }
        } else {
            log::warn!("inventory full, {} discarded", item.name);
            rewards.discarded = Some(item);
        }
    }
    rewards
}

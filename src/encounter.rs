//! Room encounters and the interactive combat loop.
//!
//! `resolve_encounter` dispatches on the current room's encounter, applies
//! its consequences to the session and clears the room when the encounter
//! is used up. Combat rounds are resolved by [`Combat`]; this module only
//! asks the player what to do and reports what happened.

use crate::combat::{
    award_victory, CombatAction, CombatResult, Combat, Enemy, LootRoll, VictoryRewards,
};
use crate::core::constants::*;
use crate::core::error::GameResult;
use crate::core::rng::{random_index, random_range};
use crate::core::session::GameSession;
use crate::dungeon::{clear_current_encounter, return_to_entrance, EncounterType};
use crate::items::{generate_treasure, Item, Rarity};
use crate::quests::ObjectiveType;
use crate::ui::screens;
use crate::ui::{Interface, Tone};
use rand::Rng;

/// What exploring a room amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterOutcome {
    Nothing,
    Fought(CombatResult),
    Treasure,
    QuestOffer { accepted: bool },
}

/// What a lost fight cost the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefeatConsequence {
    /// Insane difficulty: the run is over
    Permadeath,
    Respawned { health: u32, gold_lost: u32 },
}

/// Picks a template whose tier lies in `[level - 1, level + 2]` (any
/// template if none does) and scales it by `1 + 0.1 * (level - tier)`.
pub fn generate_enemy_for_level(
    templates: &[Enemy],
    player_level: u32,
    rng: &mut impl Rng,
) -> Option<Enemy> {
    if templates.len() > MAX_ENEMIES {
        log::warn!("{} enemy templates, only the first {} are used", templates.len(), MAX_ENEMIES);
    }
    let templates = &templates[..templates.len().min(MAX_ENEMIES)];
    let level = player_level as i32;
    let in_window: Vec<&Enemy> = templates
        .iter()
        .filter(|e| {
            let tier = e.difficulty as i32;
            tier >= level - ENEMY_LEVEL_WINDOW_BELOW && tier <= level + ENEMY_LEVEL_WINDOW_ABOVE
        })
        .collect();
    let pool: Vec<&Enemy> = if in_window.is_empty() {
        templates.iter().collect()
    } else {
        in_window
    };
    if pool.is_empty() {
        return None;
    }

    let mut enemy = pool[random_index(rng, pool.len())].clone();
    let multiplier = 1.0 + ENEMY_LEVEL_SCALING_STEP * (level - enemy.difficulty as i32) as f64;
    enemy.scale(multiplier.max(ENEMY_LEVEL_SCALING_STEP));
    Some(enemy)
}

/// A level + 3 enemy with boss multipliers and a guaranteed legendary drop.
pub fn create_boss(templates: &[Enemy], player_level: u32, rng: &mut impl Rng) -> Option<Enemy> {
    let mut boss = generate_enemy_for_level(templates, player_level + BOSS_LEVEL_OFFSET, rng)?;
    let (health, attack, defense, exp, gold) = BOSS_MULTIPLIERS;
    let scaled = |value: u32, mult: f64| ((value as f64 * mult) as u32).max(1);
    boss.base_health = scaled(boss.base_health, health);
    boss.health = boss.base_health;
    boss.attack = scaled(boss.attack, attack);
    boss.defense = scaled(boss.defense, defense);
    boss.exp_reward = scaled(boss.exp_reward, exp);
    boss.gold_reward = scaled(boss.gold_reward, gold);
    boss.loot_rarity = Rarity::Legendary;
    boss.name = format!("Dread {}", boss.name);
    Some(boss)
}

/// Death count goes up. On Insane the session ends; otherwise the player
/// respawns at the entrance with part of their health and less gold.
pub fn apply_defeat_penalty(session: &mut GameSession, boss: bool) -> DefeatConsequence {
    session.stats.deaths += 1;
    if session.player.difficulty.is_permadeath() {
        session.permadeath = true;
        log::info!("{} fell on Insane, run over", session.player.name);
        return DefeatConsequence::Permadeath;
    }

    let (divisor, gold_loss) = if boss {
        (BOSS_DEFEAT_HEALTH_DIVISOR, BOSS_DEFEAT_GOLD_LOSS)
    } else {
        (DEFEAT_HEALTH_DIVISOR, DEFEAT_GOLD_LOSS)
    };
    let player = &mut session.player;
    player.health = (player.max_health / divisor).max(1);
    let gold_lost = player.lose_gold_fraction(gold_loss);
    return_to_entrance(player, &mut session.dungeon);
    log::info!("{} respawned at the entrance, lost {} gold", player.name, gold_lost);
    DefeatConsequence::Respawned {
        health: player.health,
        gold_lost,
    }
}

/// Resolves whatever waits in the player's current room.
pub fn resolve_encounter(
    ui: &mut impl Interface,
    rng: &mut impl Rng,
    session: &mut GameSession,
) -> GameResult<EncounterOutcome> {
    let encounter = session
        .dungeon
        .room(session.player.current_room)
        .map(|room| room.encounter)
        .unwrap_or(EncounterType::Empty);
    log::debug!(
        "resolving {:?} in room {}",
        encounter,
        session.player.current_room
    );

    match encounter {
        EncounterType::Empty => {
            ui.timed_message(Tone::Plain, "The room is quiet. Nothing happens.");
            Ok(EncounterOutcome::Nothing)
        }
        EncounterType::Enemy => resolve_enemy(ui, rng, session),
        EncounterType::Treasure => resolve_treasure(ui, rng, session),
        EncounterType::Quest => resolve_quest(ui, rng, session),
        EncounterType::Boss => resolve_boss(ui, rng, session),
    }
}

fn resolve_enemy(
    ui: &mut impl Interface,
    rng: &mut impl Rng,
    session: &mut GameSession,
) -> GameResult<EncounterOutcome> {
    let Some(mut enemy) =
        generate_enemy_for_level(&session.enemy_templates, session.player.level, rng)
    else {
        log::error!("no enemy templates, clearing encounter");
        clear_current_encounter(&session.player, &mut session.dungeon);
        return Ok(EncounterOutcome::Nothing);
    };

    ui.timed_message(Tone::Warning, &format!("A {} attacks!", enemy.name));
    let result = run_combat(ui, rng, session, &mut enemy)?;
    match result {
        CombatResult::Victory => {
            let rewards = grant_rewards(
                session,
                &enemy,
                LootRoll::Chance(LOOT_DROP_CHANCE, enemy.loot_rarity),
                rng,
            );
            screens::show_rewards(ui, &rewards);
            session
                .quest_log
                .update_progress(ObjectiveType::KillEnemies, 1);
            clear_current_encounter(&session.player, &mut session.dungeon);
        }
        CombatResult::Defeat => report_defeat(ui, apply_defeat_penalty(session, false)),
        CombatResult::Escape => {
            ui.timed_message(Tone::Info, "You slip away. The enemy still lurks here.");
        }
    }
    Ok(EncounterOutcome::Fought(result))
}

fn resolve_boss(
    ui: &mut impl Interface,
    rng: &mut impl Rng,
    session: &mut GameSession,
) -> GameResult<EncounterOutcome> {
    let Some(mut boss) = create_boss(&session.enemy_templates, session.player.level, rng) else {
        log::error!("no enemy templates, boss room left unresolved");
        return Ok(EncounterOutcome::Nothing);
    };

    ui.header("BOSS BATTLE");
    ui.timed_message(
        Tone::Error,
        &format!("The {} rises to face you!", boss.name),
    );
    let result = run_combat(ui, rng, session, &mut boss)?;
    match result {
        CombatResult::Victory => {
            let rewards = grant_rewards(
                session,
                &boss,
                LootRoll::Guaranteed(Rarity::Legendary),
                rng,
            );
            screens::show_rewards(ui, &rewards);

            let bonus_exp = (boss.exp_reward as f64 * BOSS_BONUS_REWARD_FRACTION) as u32;
            let bonus_gold = (boss.gold_reward as f64 * BOSS_BONUS_REWARD_FRACTION) as u32;
            let player = &mut session.player;
            let gain = player.gain_experience(bonus_exp);
            let gold = player.gain_gold(bonus_gold);
            session.stats.gold_earned += gold;
            ui.timed_message(
                Tone::Highlight,
                &format!("Boss bonus: {} experience and {} gold!", gain.amount, gold),
            );
            if let Some((_, level)) = gain.level_up {
                ui.timed_message(Tone::Highlight, &format!("Level up! You are now level {}.", level));
                for name in player.unlock_abilities(&session.ability_templates) {
                    ui.timed_message(Tone::Highlight, &format!("New ability learned: {}", name));
                }
            }

            session
                .quest_log
                .update_progress(ObjectiveType::KillEnemies, 1);
            clear_current_encounter(&session.player, &mut session.dungeon);
            log::info!("{} defeated the {}", session.player.name, boss.name);
        }
        CombatResult::Defeat => report_defeat(ui, apply_defeat_penalty(session, true)),
        CombatResult::Escape => {
            ui.timed_message(Tone::Info, "You flee. The boss awaits your return.");
        }
    }
    Ok(EncounterOutcome::Fought(result))
}

fn grant_rewards(
    session: &mut GameSession,
    enemy: &Enemy,
    loot: LootRoll,
    rng: &mut impl Rng,
) -> VictoryRewards {
    award_victory(
        &mut session.player,
        &mut session.inventory,
        &mut session.stats,
        &session.ability_templates,
        enemy.exp_reward,
        enemy.gold_reward,
        loot,
        rng,
    )
}

fn report_defeat(ui: &mut impl Interface, consequence: DefeatConsequence) {
    match consequence {
        DefeatConsequence::Permadeath => {
            ui.timed_message(Tone::Error, "Death is final on this path.");
        }
        DefeatConsequence::Respawned { health, gold_lost } => {
            ui.timed_message(
                Tone::Warning,
                &format!(
                    "You wake at the entrance with {} health. {} gold is gone.",
                    health, gold_lost
                ),
            );
        }
    }
}

fn resolve_treasure(
    ui: &mut impl Interface,
    rng: &mut impl Rng,
    session: &mut GameSession,
) -> GameResult<EncounterOutcome> {
    let item = generate_treasure(session.player.level, rng);
    ui.timed_message(
        Tone::Success,
        &format!(
            "You find {} ({}, {}).",
            item.name,
            item.rarity.name(),
            item.effect_text()
        ),
    );

    if session.inventory.can_accept(&item) {
        take_item(session, item);
    } else {
        ui.write_line(Tone::Warning, "Your pack is full.");
        ui.write_line(Tone::Plain, "1. Leave it behind");
        ui.write_line(Tone::Plain, "2. Swap it for something you carry");
        if ui.prompt_choice("Choose", 1, 2)? == 2 {
            let ids = screens::show_inventory(ui, &session.inventory);
            let pick = ui.prompt_choice("Drop which item (0 to keep everything)", 0, ids.len() as u32)?;
            if pick == 0 {
                ui.timed_message(Tone::Plain, &format!("You leave the {} behind.", item.name));
            } else {
                match session.inventory.remove_stack(ids[pick as usize - 1]) {
                    Ok(dropped) => {
                        ui.timed_message(
                            Tone::Info,
                            &format!("You drop the {} and take the {}.", dropped.name, item.name),
                        );
                        take_item(session, item);
                    }
                    Err(e) => ui.write_line(Tone::Warning, &e.to_string()),
                }
            }
        } else {
            ui.timed_message(Tone::Plain, &format!("You leave the {} behind.", item.name));
        }
    }

    let level = session.player.level;
    let gold = session
        .player
        .gain_gold(random_range(rng, TREASURE_GOLD_MIN, TREASURE_GOLD_MAX) * level);
    session.stats.gold_earned += gold;
    ui.timed_message(Tone::Success, &format!("You also scoop up {} gold.", gold));

    clear_current_encounter(&session.player, &mut session.dungeon);
    Ok(EncounterOutcome::Treasure)
}

fn take_item(session: &mut GameSession, item: Item) {
    match session.inventory.add_item(item) {
        Ok(()) => session.stats.items_collected += 1,
        Err(e) => log::warn!("treasure not stored: {}", e),
    }
}

fn resolve_quest(
    ui: &mut impl Interface,
    rng: &mut impl Rng,
    session: &mut GameSession,
) -> GameResult<EncounterOutcome> {
    let accepted = match session.quest_log.offer(session.player.level, rng) {
        Ok(quest) => {
            ui.write_line(Tone::Info, &format!("Quest: {}", quest.title));
            ui.write_line(Tone::Plain, &quest.description);
            ui.write_line(Tone::Plain, &format!("Reward: {} gold", quest.reward_gold));
            if ui.confirm("Accept this quest?")? {
                match session.quest_log.accept(quest) {
                    Ok(_) => {
                        ui.timed_message(Tone::Success, "Quest accepted.");
                        true
                    }
                    Err(e) => {
                        ui.write_line(Tone::Warning, &e.to_string());
                        false
                    }
                }
            } else {
                ui.timed_message(Tone::Plain, "You leave the notice where it hangs.");
                false
            }
        }
        Err(e) => {
            ui.timed_message(Tone::Warning, &format!("A notice hangs here, but {}.", e));
            false
        }
    };
    clear_current_encounter(&session.player, &mut session.dungeon);
    Ok(EncounterOutcome::QuestOffer { accepted })
}

/// Fights `enemy` until the combat resolves, asking the player for an
/// action each round. Damage totals are added to the session statistics.
pub fn run_combat(
    ui: &mut impl Interface,
    rng: &mut impl Rng,
    session: &mut GameSession,
    enemy: &mut Enemy,
) -> GameResult<CombatResult> {
    let mut combat = Combat::new(&mut session.player, enemy, &mut session.inventory);
    let outcome = loop {
        if let Some(result) = combat.result() {
            break Ok(result);
        }
        screens::show_combat_status(ui, combat.player, combat.enemy);

        let action = if combat.player_stunned() {
            CombatAction::Pass
        } else {
            match choose_action(ui, &combat) {
                Ok(Some(action)) => action,
                Ok(None) => continue,
                Err(e) => break Err(e),
            }
        };

        match combat.resolve_round(action, rng) {
            Ok(events) => {
                for event in &events {
                    let (tone, text) = screens::describe_event(event, &combat.enemy.name);
                    ui.timed_message(tone, &text);
                }
            }
            Err(e) => ui.write_line(Tone::Warning, &e.to_string()),
        }
    };

    let (dealt, taken) = (combat.damage_dealt(), combat.damage_taken());
    drop(combat);
    session.stats.damage_dealt += dealt;
    session.stats.damage_taken += taken;
    Ok(outcome?)
}

/// `None` means the player backed out of a sub-menu.
fn choose_action(
    ui: &mut impl Interface,
    combat: &Combat<'_>,
) -> std::io::Result<Option<CombatAction>> {
    screens::show_combat_menu(ui);
    match ui.prompt_choice("Your move", 1, 4)? {
        1 => Ok(Some(CombatAction::Attack)),
        2 => {
            let abilities = &combat.player.abilities;
            if abilities.is_empty() {
                ui.write_line(Tone::Warning, "You have not learned any abilities.");
                return Ok(None);
            }
            for (number, ability) in abilities.iter().enumerate() {
                let state = if ability.is_ready() {
                    "ready".to_string()
                } else {
                    format!("{} turns", ability.cooldown_remaining)
                };
                ui.write_line(
                    Tone::Plain,
                    &format!("{}. {} ({})", number + 1, ability.name, state),
                );
            }
            let pick = ui.prompt_choice("Ability (0 to go back)", 0, abilities.len() as u32)?;
            Ok((pick > 0).then(|| CombatAction::UseAbility(pick as usize - 1)))
        }
        3 => {
            let ids = screens::show_inventory(ui, combat.inventory);
            if ids.is_empty() {
                return Ok(None);
            }
            let pick = ui.prompt_choice("Item (0 to go back)", 0, ids.len() as u32)?;
            Ok((pick > 0).then(|| CombatAction::UseItem(ids[pick as usize - 1])))
        }
        _ => Ok(Some(CombatAction::Escape)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Difficulty, Player, PlayerTrait};
    use crate::combat::enemy_templates;
    use crate::items::{item_by_id, ItemType};
    use crate::ui::ScriptedInterface;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn session_in(encounter: EncounterType) -> (GameSession, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut session = GameSession::new_game(Player::new("Tess", PlayerTrait::QuickHands), &mut rng);
        session.player.current_room = 1;
        if let Some(room) = session.dungeon.room_mut(1) {
            room.encounter = encounter;
        }
        (session, rng)
    }

    fn room_encounter(session: &GameSession) -> EncounterType {
        session.dungeon.room(session.player.current_room).unwrap().encounter
    }

    #[test]
    fn test_enemy_window_and_scaling() {
        let templates = enemy_templates();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let enemy = generate_enemy_for_level(&templates, 1, &mut rng).unwrap();
            assert!(enemy.difficulty <= 3);
        }
        // Level 5, tier 4 Orc Brute is one of the candidates; scaling is +10%.
        let orc = templates.iter().find(|e| e.name == "Orc Brute").unwrap();
        let mut scaled = orc.clone();
        scaled.scale(1.1);
        assert_eq!(scaled.base_health, 66);
    }

    #[test]
    fn test_enemy_falls_back_to_all_templates() {
        let only_wyvern: Vec<Enemy> = enemy_templates()
            .into_iter()
            .filter(|e| e.name == "Wyvern")
            .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let enemy = generate_enemy_for_level(&only_wyvern, 1, &mut rng).unwrap();
        assert_eq!(enemy.name, "Wyvern");
        // 1 + 0.1 * (1 - 8) = 0.3
        assert!((38..=39).contains(&enemy.base_health));
        assert!(generate_enemy_for_level(&[], 1, &mut rng).is_none());
    }

    #[test]
    fn test_templates_past_the_cap_are_ignored() {
        let mut templates = enemy_templates();
        assert_eq!(templates.len(), MAX_ENEMIES);
        templates.push(Enemy::new(11, "Lich", 50, 10, 2, 40, 20, 1, Rarity::Rare));
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        for _ in 0..300 {
            let enemy = generate_enemy_for_level(&templates, 1, &mut rng).unwrap();
            assert_ne!(enemy.name, "Lich");
        }
    }

    #[test]
    fn test_boss_multipliers() {
        let templates = enemy_templates();
        // Lucky rng always picks the first candidate in the window.
        let mut rng = StepRng::new(0, 0);
        let base = generate_enemy_for_level(&templates, 4, &mut rng).unwrap();
        let mut rng = StepRng::new(0, 0);
        let boss = create_boss(&templates, 1, &mut rng).unwrap();
        assert_eq!(boss.name, format!("Dread {}", base.name));
        assert_eq!(boss.base_health, (base.base_health as f64 * 2.5) as u32);
        assert_eq!(boss.health, boss.base_health);
        assert_eq!(boss.exp_reward, base.exp_reward * 4);
        assert_eq!(boss.gold_reward, base.gold_reward * 5);
        assert_eq!(boss.loot_rarity, Rarity::Legendary);
    }

    #[test]
    fn test_defeat_penalty_respawns() {
        let (mut session, _) = session_in(EncounterType::Enemy);
        session.player.gold = 100;
        session.player.health = 0;
        let consequence = apply_defeat_penalty(&mut session, false);
        assert_eq!(
            consequence,
            DefeatConsequence::Respawned {
                health: 50,
                gold_lost: 25
            }
        );
        assert_eq!(session.player.current_room, 0);
        assert_eq!(session.stats.deaths, 1);

        session.player.gold = 100;
        apply_defeat_penalty(&mut session, true);
        assert_eq!(session.player.health, 33);
        assert_eq!(session.player.gold, 50);
        assert_eq!(session.stats.deaths, 2);
    }

    #[test]
    fn test_insane_defeat_is_permadeath() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut player = Player::new("Tess", PlayerTrait::QuickHands);
        player.apply_difficulty(Difficulty::Insane);
        let mut session = GameSession::new_game(player, &mut rng);
        assert_eq!(
            apply_defeat_penalty(&mut session, false),
            DefeatConsequence::Permadeath
        );
        assert!(session.permadeath);
        assert_eq!(session.status(), crate::core::session::GameStatus::Lost);
    }

    #[test]
    fn test_enemy_victory_clears_room_and_counts_kill() {
        let (mut session, mut rng) = session_in(EncounterType::Enemy);
        session.player.attack = 200;
        let mut ui = ScriptedInterface::new(["1"]);

        let outcome = resolve_encounter(&mut ui, &mut rng, &mut session).unwrap();
        assert_eq!(outcome, EncounterOutcome::Fought(CombatResult::Victory));
        assert_eq!(room_encounter(&session), EncounterType::Empty);
        assert_eq!(session.stats.enemies_defeated, 1);
        assert!(session.stats.damage_dealt > 0);
        assert!(ui.contains("is defeated"));
    }

    #[test]
    fn test_enemy_defeat_sends_player_home() {
        let (mut session, mut rng) = session_in(EncounterType::Enemy);
        session.player.health = 1;
        session.player.attack = 1;
        session.player.defense = 0;
        let mut ui = ScriptedInterface::new(["1"]);

        let outcome = resolve_encounter(&mut ui, &mut rng, &mut session).unwrap();
        assert_eq!(outcome, EncounterOutcome::Fought(CombatResult::Defeat));
        assert_eq!(session.player.current_room, 0);
        assert_eq!(session.player.health, session.player.max_health / 2);
        assert_eq!(session.stats.deaths, 1);
        assert_eq!(session.dungeon.room(1).unwrap().encounter, EncounterType::Enemy);
    }

    #[test]
    fn test_escape_keeps_encounter() {
        let (mut session, _) = session_in(EncounterType::Enemy);
        let mut rng = StepRng::new(0, 0);
        let mut ui = ScriptedInterface::new(["4"]);

        let outcome = resolve_encounter(&mut ui, &mut rng, &mut session).unwrap();
        assert_eq!(outcome, EncounterOutcome::Fought(CombatResult::Escape));
        assert_eq!(room_encounter(&session), EncounterType::Enemy);
        assert_eq!(session.stats.enemies_defeated, 0);
    }

    #[test]
    fn test_backing_out_of_empty_ability_menu_reprompts() {
        let (mut session, mut rng) = session_in(EncounterType::Enemy);
        session.player.abilities.clear();
        session.player.attack = 200;
        let mut ui = ScriptedInterface::new(["2", "1"]);

        resolve_encounter(&mut ui, &mut rng, &mut session).unwrap();
        assert!(ui.contains("not learned any abilities"));
        assert_eq!(session.stats.enemies_defeated, 1);
    }

    #[test]
    fn test_treasure_adds_item_and_gold() {
        let (mut session, mut rng) = session_in(EncounterType::Treasure);
        let gold_before = session.player.gold;
        let mut ui = ScriptedInterface::default();

        let outcome = resolve_encounter(&mut ui, &mut rng, &mut session).unwrap();
        assert_eq!(outcome, EncounterOutcome::Treasure);
        assert_eq!(session.inventory.len(), 1);
        assert_eq!(session.stats.items_collected, 1);
        let gained = session.player.gold - gold_before;
        assert!((TREASURE_GOLD_MIN..=TREASURE_GOLD_MAX).contains(&gained));
        assert_eq!(session.stats.gold_earned, gained);
        assert_eq!(room_encounter(&session), EncounterType::Empty);
    }

    fn fill_inventory(session: &mut GameSession) {
        for n in 0..MAX_INVENTORY as u16 {
            session
                .inventory
                .add_item(Item::new(1000 + n, "Pebble", ItemType::Armor, Rarity::Common, 1, 1))
                .unwrap();
        }
    }

    #[test]
    fn test_full_inventory_treasure_can_be_left() {
        let (mut session, mut rng) = session_in(EncounterType::Treasure);
        fill_inventory(&mut session);
        let mut ui = ScriptedInterface::new(["1"]);

        resolve_encounter(&mut ui, &mut rng, &mut session).unwrap();
        assert_eq!(session.inventory.len(), MAX_INVENTORY);
        assert!(session.inventory.iter().all(|i| i.name == "Pebble"));
        assert_eq!(session.stats.items_collected, 0);
        assert_eq!(room_encounter(&session), EncounterType::Empty);
    }

    #[test]
    fn test_full_inventory_treasure_swap() {
        let (mut session, mut rng) = session_in(EncounterType::Treasure);
        fill_inventory(&mut session);
        let mut ui = ScriptedInterface::new(["2", "1"]);

        resolve_encounter(&mut ui, &mut rng, &mut session).unwrap();
        assert_eq!(session.inventory.len(), MAX_INVENTORY);
        assert!(session.inventory.find(1000).is_none());
        assert_eq!(
            session.inventory.iter().filter(|i| i.name != "Pebble").count(),
            1
        );
        assert_eq!(session.stats.items_collected, 1);
    }

    #[test]
    fn test_quest_offer_accepted_and_declined() {
        let (mut session, mut rng) = session_in(EncounterType::Quest);
        let before = session.quest_log.len();
        let mut ui = ScriptedInterface::new(["y"]);
        let outcome = resolve_encounter(&mut ui, &mut rng, &mut session).unwrap();
        assert_eq!(outcome, EncounterOutcome::QuestOffer { accepted: true });
        assert_eq!(session.quest_log.len(), before + 1);
        assert_eq!(room_encounter(&session), EncounterType::Empty);

        let (mut session, mut rng) = session_in(EncounterType::Quest);
        let mut ui = ScriptedInterface::new(["n"]);
        let outcome = resolve_encounter(&mut ui, &mut rng, &mut session).unwrap();
        assert_eq!(outcome, EncounterOutcome::QuestOffer { accepted: false });
        assert_eq!(session.quest_log.len(), before);
        assert_eq!(room_encounter(&session), EncounterType::Empty);
    }

    #[test]
    fn test_quest_room_with_full_log_still_clears() {
        let (mut session, mut rng) = session_in(EncounterType::Quest);
        while !session.quest_log.is_full() {
            session.quest_log.generate(1, &mut rng).unwrap();
        }
        let mut ui = ScriptedInterface::default();
        let outcome = resolve_encounter(&mut ui, &mut rng, &mut session).unwrap();
        assert_eq!(outcome, EncounterOutcome::QuestOffer { accepted: false });
        assert!(ui.contains("quest log is full"));
        assert_eq!(room_encounter(&session), EncounterType::Empty);
    }

    #[test]
    fn test_boss_victory_wins_the_game() {
        let (mut session, mut rng) = session_in(EncounterType::Empty);
        session.player.current_room = ROOM_COUNT - 1;
        session.player.attack = 5000;
        let mut ui = ScriptedInterface::new(["1"]);

        let outcome = resolve_encounter(&mut ui, &mut rng, &mut session).unwrap();
        assert_eq!(outcome, EncounterOutcome::Fought(CombatResult::Victory));
        assert!(session.dungeon.is_boss_defeated());
        assert_eq!(session.status(), crate::core::session::GameStatus::Won);
        assert!(session
            .inventory
            .iter()
            .any(|item| item.rarity == Rarity::Legendary));
        assert!(ui.contains("Boss bonus"));
    }

    #[test]
    fn test_empty_room_changes_nothing() {
        let (mut session, mut rng) = session_in(EncounterType::Empty);
        let gold = session.player.gold;
        let mut ui = ScriptedInterface::default();
        assert_eq!(
            resolve_encounter(&mut ui, &mut rng, &mut session).unwrap(),
            EncounterOutcome::Nothing
        );
        assert_eq!(session.player.gold, gold);
    }

    #[test]
    fn test_using_a_potion_in_combat() {
        let (mut session, mut rng) = session_in(EncounterType::Enemy);
        session.inventory.add_item(item_by_id(301).unwrap()).unwrap();
        session.player.attack = 200;
        session.player.health = 50;
        let mut ui = ScriptedInterface::new(["3", "1", "1"]);

        resolve_encounter(&mut ui, &mut rng, &mut session).unwrap();
        assert!(ui.contains("You drink the Minor Healing Potion"));
        assert_eq!(session.stats.enemies_defeated, 1);
    }
}

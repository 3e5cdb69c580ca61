//! Screens and message text. Rendering only; nothing here changes state.

use super::{Interface, Tone};
use crate::character::Player;
use crate::combat::{CombatEvent, Combatant, Enemy, VictoryRewards};
use crate::core::game_state::GameOutcome;
use crate::core::session::{format_playtime, GameStatistics};
use crate::dungeon::{Direction, Dungeon, EncounterType, Room};
use crate::items::{Inventory, Item, ItemEffect};
use crate::quests::QuestLog;

pub fn show_title(ui: &mut impl Interface) {
    ui.clear();
    ui.header("D E L V E");
    ui.write_line(Tone::Plain, "A dungeon awaits below.");
    ui.write_line(Tone::Plain, "");
    ui.write_line(Tone::Plain, "1. New Game");
    ui.write_line(Tone::Plain, "2. Load Game");
    ui.write_line(Tone::Plain, "3. Quit");
}

pub fn show_room(ui: &mut impl Interface, room: &Room, exits: &[(Direction, usize)]) {
    ui.header(&format!("Room {}", room.id + 1));
    ui.write_line(Tone::Plain, &room.description);
    if room.has_shop {
        ui.write_line(Tone::Info, "A merchant has set up shop here.");
    }
    match room.encounter {
        EncounterType::Empty => {}
        EncounterType::Enemy => ui.write_line(Tone::Warning, "Something stirs in the shadows."),
        EncounterType::Treasure => ui.write_line(Tone::Success, "Something glints nearby."),
        EncounterType::Quest => ui.write_line(Tone::Info, "A notice is pinned to the wall."),
        EncounterType::Boss => ui.write_line(Tone::Error, "A terrible presence fills the room."),
    }
    let exits: Vec<&str> = exits.iter().map(|(d, _)| d.name()).collect();
    ui.write_line(Tone::Plain, &format!("Exits: {}", exits.join(", ")));
}

pub fn show_status_line(ui: &mut impl Interface, player: &Player) {
    ui.bar("Health", player.health, player.max_health, health_tone(player.health, player.max_health));
    ui.write_line(
        Tone::Plain,
        &format!(
            "Level {}  XP {}/{}  Gold {}",
            player.level,
            player.experience,
            player.xp_to_next_level(),
            player.gold
        ),
    );
}

pub fn show_game_menu(ui: &mut impl Interface) {
    ui.divider();
    for line in [
        "1. Move",
        "2. Explore the room",
        "3. Inventory",
        "4. Quest log",
        "5. Character",
        "6. Map",
        "7. Shop",
        "8. Save",
        "9. Pause",
    ] {
        ui.write_line(Tone::Plain, line);
    }
}

pub fn show_character_sheet(ui: &mut impl Interface, player: &Player, stats: &GameStatistics) {
    ui.header(&player.name);
    ui.write_line(
        Tone::Plain,
        &format!(
            "Trait: {} ({})",
            player.player_trait.name(),
            player.player_trait.description()
        ),
    );
    ui.write_line(Tone::Plain, &format!("Difficulty: {}", player.difficulty.name()));
    ui.write_line(Tone::Plain, &format!("Level: {}", player.level));
    ui.bar("Health", player.health, player.max_health, health_tone(player.health, player.max_health));
    ui.bar("XP", player.experience, player.xp_to_next_level(), Tone::Info);
    ui.write_line(
        Tone::Plain,
        &format!(
            "Attack {}  Defense {}  Gold {}",
            player.attack, player.defense, player.gold
        ),
    );
    if !player.abilities.is_empty() {
        ui.write_line(Tone::Highlight, "Abilities:");
        for ability in &player.abilities {
            ui.write_line(
                Tone::Plain,
                &format!(
                    "  {} (x{:.1}, cooldown {}) - {}",
                    ability.name, ability.damage_multiplier, ability.cooldown, ability.description
                ),
            );
        }
    }
    show_statistics(ui, stats);
}

pub fn show_statistics(ui: &mut impl Interface, stats: &GameStatistics) {
    ui.write_line(Tone::Highlight, "Statistics:");
    for line in statistics_lines(stats) {
        ui.write_line(Tone::Plain, &format!("  {}", line));
    }
}

pub fn statistics_lines(stats: &GameStatistics) -> Vec<String> {
    vec![
        format!("Enemies defeated: {}", stats.enemies_defeated),
        format!("Gold earned: {}", stats.gold_earned),
        format!("Damage dealt: {}", stats.damage_dealt),
        format!("Damage taken: {}", stats.damage_taken),
        format!("Items collected: {}", stats.items_collected),
        format!("Quests completed: {}", stats.quests_completed),
        format!("Deaths: {}", stats.deaths),
        format!("Play time: {}", format_playtime(stats.playtime_seconds)),
    ]
}

/// Lists stacks with a 1-based number. Returns the ids in that order.
pub fn show_inventory(ui: &mut impl Interface, inventory: &Inventory) -> Vec<u16> {
    ui.header("Inventory");
    if inventory.is_empty() {
        ui.write_line(Tone::Plain, "Your pack is empty.");
        return Vec::new();
    }
    let mut ids = Vec::new();
    for (number, item) in inventory.iter().enumerate() {
        ui.write_line(
            Tone::Plain,
            &format!(
                "{}. {} x{} [{}] {} (worth {})",
                number + 1,
                item.name,
                item.quantity,
                item.rarity.name(),
                item.effect_text(),
                item.cost
            ),
        );
        ids.push(item.id);
    }
    ui.write_line(
        Tone::Info,
        &format!("Total value: {} gold", inventory.total_value()),
    );
    ids
}

pub fn show_quests(ui: &mut impl Interface, quests: &QuestLog) {
    ui.header("Quest Log");
    if quests.is_empty() {
        ui.write_line(Tone::Plain, "You have no quests.");
        return;
    }
    for quest in quests.iter() {
        let (tone, state) = if quest.completed {
            (Tone::Success, "done")
        } else {
            (Tone::Plain, "open")
        };
        ui.write_line(
            tone,
            &format!(
                "#{} {} - {} [{}/{}] reward {} gold ({})",
                quest.id,
                quest.title,
                quest.description,
                quest.shown_progress(),
                quest.target,
                quest.reward_gold,
                state
            ),
        );
    }
}

/// One string per grid row. `@` is the player, `?` unexplored, otherwise
/// the room's encounter icon (`$` for a shop).
pub fn render_map(dungeon: &Dungeon, player_room: usize) -> Vec<String> {
    dungeon
        .rooms
        .chunks(dungeon.cols())
        .map(|row| {
            row.iter()
                .map(|room| {
                    let icon = if room.id == player_room {
                        '@'
                    } else if !room.explored {
                        '?'
                    } else if room.has_shop && room.encounter == EncounterType::Empty {
                        '$'
                    } else {
                        room.encounter.icon()
                    };
                    format!("[{}]", icon)
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

pub fn show_map(ui: &mut impl Interface, dungeon: &Dungeon, player_room: usize) {
    ui.header("Dungeon Map");
    for line in render_map(dungeon, player_room) {
        ui.write_line(Tone::Plain, &line);
    }
    ui.write_line(
        Tone::Info,
        &format!(
            "@ you  ? unexplored  E enemy  T treasure  Q quest  B boss  $ shop  ({} of {} explored)",
            dungeon.explored_count(),
            dungeon.total_rooms()
        ),
    );
}

pub fn show_combat_status(ui: &mut impl Interface, player: &Player, enemy: &Enemy) {
    ui.divider();
    ui.bar(&player.name, player.health, player.max_health, Tone::Success);
    ui.bar(&enemy.name, enemy.health, enemy.base_health, Tone::Error);
    let effects: Vec<&str> = player.status_effects.iter().map(|e| e.effect_type.name()).collect();
    if !effects.is_empty() {
        ui.write_line(Tone::Warning, &format!("You are {}", effects.join(", ")));
    }
    let effects: Vec<&str> = enemy.status_effects.iter().map(|e| e.effect_type.name()).collect();
    if !effects.is_empty() {
        ui.write_line(Tone::Info, &format!("{} is {}", enemy.name, effects.join(", ")));
    }
}

pub fn show_combat_menu(ui: &mut impl Interface) {
    ui.write_line(Tone::Plain, "1. Attack");
    ui.write_line(Tone::Plain, "2. Use ability");
    ui.write_line(Tone::Plain, "3. Use item");
    ui.write_line(Tone::Plain, "4. Attempt escape");
}

pub fn describe_item_use(item: &Item, effect: ItemEffect) -> String {
    match effect {
        ItemEffect::AttackRaised(n) => format!("You wield the {}. Attack +{}.", item.name, n),
        ItemEffect::DefenseRaised(n) => format!("You don the {}. Defense +{}.", item.name, n),
        ItemEffect::Healed(n) => format!("You drink the {} and recover {} health.", item.name, n),
    }
}

pub fn describe_event(event: &CombatEvent, enemy_name: &str) -> (Tone, String) {
    match event {
        CombatEvent::PlayerAttack { damage, critical } => (
            Tone::Success,
            if *critical {
                format!("Critical hit! You strike the {} for {} damage.", enemy_name, damage)
            } else {
                format!("You strike the {} for {} damage.", enemy_name, damage)
            },
        ),
        CombatEvent::AbilityHit {
            name,
            damage,
            critical,
        } => (
            Tone::Success,
            format!(
                "{}{} hits for {} damage.",
                if *critical { "Critical! " } else { "" },
                name,
                damage
            ),
        ),
        CombatEvent::LifeDrained { healed } => {
            (Tone::Success, format!("You drain {} health.", healed))
        }
        CombatEvent::ItemUsed { item, effect } => (Tone::Info, describe_item_use(item, *effect)),
        CombatEvent::EscapeFailed => (Tone::Warning, "You fail to escape!".to_string()),
        CombatEvent::Escaped => (Tone::Info, "You escape!".to_string()),
        CombatEvent::Stunned(Combatant::Player) => {
            (Tone::Warning, "You are stunned and cannot act.".to_string())
        }
        CombatEvent::Stunned(Combatant::Enemy) => (
            Tone::Info,
            format!("The {} is stunned and cannot act.", enemy_name),
        ),
        CombatEvent::EnemyAttack { damage, critical } => (
            Tone::Error,
            if *critical {
                format!("The {} lands a vicious blow for {} damage!", enemy_name, damage)
            } else {
                format!("The {} hits you for {} damage.", enemy_name, damage)
            },
        ),
        CombatEvent::EffectApplied { target, effect } => (
            Tone::Warning,
            match target {
                Combatant::Player => format!("You are {}!", effect.name().to_lowercase()),
                Combatant::Enemy => format!("The {} is {}.", enemy_name, effect.name().to_lowercase()),
            },
        ),
        CombatEvent::EffectDamage { target, damage } => (
            Tone::Warning,
            match target {
                Combatant::Player => format!("You suffer {} damage from your wounds.", damage),
                Combatant::Enemy => format!("The {} suffers {} damage.", enemy_name, damage),
            },
        ),
        CombatEvent::EffectExpired { target, effect } => (
            Tone::Plain,
            match target {
                Combatant::Player => format!("You are no longer {}.", effect.name().to_lowercase()),
                Combatant::Enemy => format!(
                    "The {} is no longer {}.",
                    enemy_name,
                    effect.name().to_lowercase()
                ),
            },
        ),
        CombatEvent::EnemyDefeated => (Tone::Success, format!("The {} is defeated!", enemy_name)),
        CombatEvent::PlayerDefeated => (Tone::Error, "You have been defeated...".to_string()),
    }
}

pub fn show_rewards(ui: &mut impl Interface, rewards: &VictoryRewards) {
    ui.write_line(
        Tone::Success,
        &format!(
            "You gain {} experience and {} gold.",
            rewards.experience.amount, rewards.gold
        ),
    );
    if let Some((_, level)) = rewards.experience.level_up {
        ui.write_line(Tone::Highlight, &format!("Level up! You are now level {}.", level));
    }
    for name in &rewards.unlocked_abilities {
        ui.write_line(Tone::Highlight, &format!("New ability learned: {}", name));
    }
    if let Some(item) = &rewards.item {
        ui.write_line(
            Tone::Success,
            &format!("You found {} ({}).", item.name, item.rarity.name()),
        );
    }
    if let Some(item) = &rewards.discarded {
        ui.write_line(
            Tone::Warning,
            &format!("Your pack is full. You leave the {} behind.", item.name),
        );
    }
}

pub fn show_game_over(
    ui: &mut impl Interface,
    outcome: GameOutcome,
    player: Option<&Player>,
    stats: &GameStatistics,
) {
    match outcome {
        GameOutcome::Victory => {
            ui.header("VICTORY");
            ui.write_line(Tone::Success, "The dungeon's master has fallen. You are victorious!");
        }
        GameOutcome::Defeat => {
            ui.header("GAME OVER");
            ui.write_line(Tone::Error, "Your journey ends here.");
        }
        GameOutcome::Quit => {
            ui.header("FAREWELL");
            ui.write_line(Tone::Plain, "You leave the dungeon for another day.");
        }
    }
    if let Some(player) = player {
        ui.write_line(
            Tone::Plain,
            &format!("{} reached level {} with {} gold.", player.name, player.level, player.gold),
        );
    }
    show_statistics(ui, stats);
}

fn health_tone(current: u32, max: u32) -> Tone {
    if current * 4 <= max {
        Tone::Error
    } else if current * 2 <= max {
        Tone::Warning
    } else {
        Tone::Success
    }
}

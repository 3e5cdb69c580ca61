//! Plain-text save files.
//!
//! Sections in fixed order: `PLAYER`, `INVENTORY`, `QUESTS`, `STATS`,
//! `DUNGEON`. Numbers are space separated, booleans are `0`/`1`, inventory
//! lines are pipe delimited (`id|name|value|rarity|type|cost|quantity`).
//! Room connections, room descriptions, item descriptions, quest titles and
//! unlocked abilities are not stored; loading rebuilds them.

use crate::character::{Difficulty, Player, PlayerTrait};
use crate::core::constants::{MAX_LEVEL, MAX_QUESTS, ROOM_COUNT};
use crate::core::session::{GameSession, GameStatistics};
use crate::dungeon::{assign_descriptions, generate_connections, Dungeon, EncounterType, Room};
use crate::items::{item_by_id, Inventory, Item, ItemType, Rarity};
use crate::quests::{ObjectiveType, Quest, QuestLog};
use crate::utils::persistence::default_save_path;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("save file is missing the {expected} section")]
    MissingSection { expected: &'static str },

    #[error("save file line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("save file has {found} rooms, expected {expected}")]
    RoomCountMismatch { expected: usize, found: usize },

    #[error("could not determine a directory for save files")]
    NoSaveDirectory,
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

/// Writes the whole session in the save format.
pub fn write_session(session: &GameSession, out: &mut impl Write) -> io::Result<()> {
    let p = &session.player;
    writeln!(out, "PLAYER")?;
    writeln!(out, "{}", p.name)?;
    writeln!(
        out,
        "{} {} {} {} {} {} {} {}",
        p.health, p.max_health, p.attack, p.defense, p.experience, p.level, p.gold, p.current_room
    )?;
    writeln!(out, "{} {}", p.player_trait.index(), p.difficulty.index())?;
    writeln!(out, "{:.2} {:.2}", p.gold_multiplier, p.exp_multiplier)?;
    writeln!(out, "{} {}", p.abilities.len(), flag(p.can_charm_enemies))?;

    writeln!(out, "INVENTORY")?;
    writeln!(out, "{}", session.inventory.len())?;
    for item in session.inventory.iter() {
        writeln!(
            out,
            "{}|{}|{}|{}|{}|{}|{}",
            item.id,
            item.name,
            item.value,
            item.rarity.index(),
            item.item_type.index(),
            item.cost,
            item.quantity
        )?;
    }

    writeln!(out, "QUESTS")?;
    writeln!(out, "{}", session.quest_log.len())?;
    for q in session.quest_log.iter() {
        writeln!(
            out,
            "{} {} {} {} {} {}",
            q.id,
            q.objective.index(),
            q.target,
            q.progress,
            q.reward_gold,
            flag(q.completed)
        )?;
    }

    let s = &session.stats;
    writeln!(out, "STATS")?;
    writeln!(
        out,
        "{} {} {} {} {} {} {} {}",
        s.enemies_defeated,
        s.gold_earned,
        s.damage_dealt,
        s.damage_taken,
        s.items_collected,
        s.quests_completed,
        s.deaths,
        s.playtime_seconds
    )?;

    writeln!(out, "DUNGEON")?;
    writeln!(out, "{}", session.dungeon.total_rooms())?;
    for room in &session.dungeon.rooms {
        writeln!(
            out,
            "{} {} {} {} {}",
            room.id,
            room.encounter.index(),
            flag(room.has_shop),
            flag(room.has_boss),
            flag(room.explored)
        )?;
    }
    Ok(())
}

/// Walks the save text line by line, keeping 1-based line numbers for errors.
struct SaveReader<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    line: usize,
}

impl<'a> SaveReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            line: 0,
        }
    }

    fn malformed(&self, reason: impl Into<String>) -> SaveError {
        SaveError::Malformed {
            line: self.line,
            reason: reason.into(),
        }
    }

    fn next_line(&mut self) -> Result<&'a str, SaveError> {
        match self.lines.next() {
            Some((index, text)) => {
                self.line = index + 1;
                Ok(text.trim_end_matches('\r'))
            }
            None => {
                self.line += 1;
                Err(self.malformed("unexpected end of file"))
            }
        }
    }

    fn section(&mut self, expected: &'static str) -> Result<(), SaveError> {
        match self.lines.next() {
            Some((index, text)) if text.trim() == expected => {
                self.line = index + 1;
                Ok(())
            }
            _ => Err(SaveError::MissingSection { expected }),
        }
    }

    /// A line of exactly `count` whitespace-separated values.
    fn fields<T: FromStr>(&mut self, count: usize) -> Result<Vec<T>, SaveError> {
        let text = self.next_line()?;
        let values = parse_fields(text.split_whitespace())
            .ok_or_else(|| self.malformed(format!("expected {} numbers", count)))?;
        if values.len() != count {
            return Err(self.malformed(format!(
                "expected {} values, found {}",
                count,
                values.len()
            )));
        }
        Ok(values)
    }

    fn count(&mut self) -> Result<usize, SaveError> {
        Ok(self.fields::<usize>(1)?[0])
    }
}

fn parse_fields<'s, T: FromStr>(parts: impl Iterator<Item = &'s str>) -> Option<Vec<T>> {
    parts.map(|part| part.trim().parse().ok()).collect()
}

fn parse_flag(reader: &SaveReader<'_>, value: u32) -> Result<bool, SaveError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(reader.malformed(format!("expected 0 or 1, found {}", other))),
    }
}

fn read_player(reader: &mut SaveReader<'_>) -> Result<(Player, usize), SaveError> {
    reader.section("PLAYER")?;
    let name = reader.next_line()?.to_string();
    let n = reader.fields::<u32>(8)?;
    if !(1..=MAX_LEVEL).contains(&n[5]) {
        return Err(reader.malformed(format!("level {} outside 1-{}", n[5], MAX_LEVEL)));
    }
    let kinds = reader.fields::<u32>(2)?;
    let player_trait = PlayerTrait::from_index(kinds[0])
        .ok_or_else(|| reader.malformed(format!("unknown trait {}", kinds[0])))?;
    let difficulty = Difficulty::from_index(kinds[1])
        .ok_or_else(|| reader.malformed(format!("unknown difficulty {}", kinds[1])))?;
    let multipliers = reader.fields::<f32>(2)?;
    let tail = reader.fields::<u32>(2)?;
    let can_charm = parse_flag(reader, tail[1])?;

    let mut player = Player::new(&name, player_trait);
    player.health = n[0];
    player.max_health = n[1].max(1);
    player.attack = n[2];
    player.defense = n[3];
    player.experience = n[4];
    player.level = n[5];
    player.gold = n[6];
    player.current_room = n[7] as usize;
    player.health = player.health.min(player.max_health);
    player.difficulty = difficulty;
    player.difficulty_locked = true;
    player.gold_multiplier = multipliers[0];
    player.exp_multiplier = multipliers[1];
    player.can_charm_enemies = can_charm;
    Ok((player, tail[0] as usize))
}

fn read_inventory(reader: &mut SaveReader<'_>) -> Result<Inventory, SaveError> {
    reader.section("INVENTORY")?;
    let count = reader.count()?;
    let mut inventory = Inventory::new();
    for _ in 0..count {
        let text = reader.next_line()?;
        let parts: Vec<&str> = text.split('|').collect();
        if parts.len() != 7 {
            return Err(reader.malformed(format!(
                "expected 7 item fields, found {}",
                parts.len()
            )));
        }
        let name = parts[1];
        let numbers: [&str; 6] = [parts[0], parts[2], parts[3], parts[4], parts[5], parts[6]];
        let n: Vec<u32> = parse_fields(numbers.into_iter())
            .ok_or_else(|| reader.malformed("item fields must be numbers"))?;
        let id = u16::try_from(n[0]).map_err(|_| reader.malformed("item id out of range"))?;
        let rarity = Rarity::from_index(n[2])
            .ok_or_else(|| reader.malformed(format!("unknown rarity {}", n[2])))?;
        let item_type = ItemType::from_index(n[3])
            .ok_or_else(|| reader.malformed(format!("unknown item type {}", n[3])))?;

        let mut item = Item::new(id, name, item_type, rarity, n[1], n[4]);
        if let Some(known) = item_by_id(id) {
            item.name = known.name;
            item.description = known.description;
        }
        item.quantity = n[5].max(1);
        inventory
            .add_item(item)
            .map_err(|e| reader.malformed(e.to_string()))?;
    }
    Ok(inventory)
}

fn read_quests(reader: &mut SaveReader<'_>) -> Result<QuestLog, SaveError> {
    reader.section("QUESTS")?;
    let count = reader.count()?;
    if count > MAX_QUESTS {
        return Err(reader.malformed(format!("{} quests, at most {} fit the log", count, MAX_QUESTS)));
    }
    let mut quests = Vec::with_capacity(count);
    for _ in 0..count {
        let n = reader.fields::<u32>(6)?;
        let objective = ObjectiveType::from_index(n[1])
            .ok_or_else(|| reader.malformed(format!("unknown objective {}", n[1])))?;
        let mut quest = Quest::new(n[0], objective, n[2], n[4]);
        quest.progress = n[3];
        quest.completed = parse_flag(reader, n[5])?;
        quests.push(quest);
    }
    Ok(QuestLog::from_quests(quests))
}

fn read_stats(reader: &mut SaveReader<'_>) -> Result<GameStatistics, SaveError> {
    reader.section("STATS")?;
    let n = reader.fields::<u32>(8)?;
    Ok(GameStatistics {
        enemies_defeated: n[0],
        gold_earned: n[1],
        damage_dealt: n[2],
        damage_taken: n[3],
        items_collected: n[4],
        quests_completed: n[5],
        deaths: n[6],
        playtime_seconds: n[7],
    })
}

fn read_dungeon(reader: &mut SaveReader<'_>) -> Result<Dungeon, SaveError> {
    reader.section("DUNGEON")?;
    let count = reader.count()?;
    if count != ROOM_COUNT {
        return Err(SaveError::RoomCountMismatch {
            expected: ROOM_COUNT,
            found: count,
        });
    }
    let mut dungeon = Dungeon::new();
    for index in 0..count {
        let n = reader.fields::<u32>(5)?;
        if n[0] as usize != index {
            return Err(reader.malformed(format!("expected room {}, found {}", index, n[0])));
        }
        let mut room = Room::new(index);
        room.encounter = EncounterType::from_index(n[1])
            .ok_or_else(|| reader.malformed(format!("unknown encounter {}", n[1])))?;
        room.has_shop = parse_flag(reader, n[2])?;
        room.has_boss = parse_flag(reader, n[3])?;
        room.explored = parse_flag(reader, n[4])?;
        dungeon.rooms.push(room);
    }
    generate_connections(&mut dungeon);
    assign_descriptions(&mut dungeon);
    Ok(dungeon)
}

/// Parses a save and rebuilds everything that is not stored.
pub fn read_session(text: &str) -> Result<GameSession, SaveError> {
    let mut reader = SaveReader::new(text);
    let (player, ability_count) = read_player(&mut reader)?;
    let inventory = read_inventory(&mut reader)?;
    let quest_log = read_quests(&mut reader)?;
    let stats = read_stats(&mut reader)?;
    let dungeon = read_dungeon(&mut reader)?;

    if player.current_room >= dungeon.total_rooms() {
        return Err(SaveError::Malformed {
            line: 3,
            reason: format!("player stands in unknown room {}", player.current_room),
        });
    }

    let mut session = GameSession::from_parts(player, dungeon, inventory, quest_log, stats);
    session.player.unlock_abilities(&session.ability_templates);
    if session.player.abilities.len() != ability_count {
        log::warn!(
            "save lists {} abilities, level {} grants {}",
            ability_count,
            session.player.level,
            session.player.abilities.len()
        );
    }
    Ok(session)
}

/// Reads and writes the save file at one path.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Uses `<data dir>/savegame.txt`.
    pub fn new() -> Result<Self, SaveError> {
        let save_path = default_save_path().ok_or(SaveError::NoSaveDirectory)?;
        Ok(Self { save_path })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    pub fn exists(&self) -> bool {
        self.save_path.exists()
    }

    /// Writes to a temporary file next to the save, then renames it over
    /// the old one so a failed write never leaves a half-written save.
    pub fn save(&self, session: &GameSession) -> Result<(), SaveError> {
        let mut buffer = Vec::new();
        write_session(session, &mut buffer)?;

        let dir = self
            .save_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        fs::create_dir_all(dir)?;
        let base = self
            .save_path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("savegame.txt");
        let tmp_path = dir.join(format!(".{}.tmp-{}", base, std::process::id()));
        {
            let mut tmp = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&tmp_path)?;
            tmp.write_all(&buffer)?;
            tmp.sync_all()?;
        }
        fs::rename(&tmp_path, &self.save_path)?;
        log::info!("game saved to {}", self.save_path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<GameSession, SaveError> {
        let text = fs::read_to_string(&self.save_path)?;
        let session = read_session(&text)?;
        log::info!(
            "loaded {} (level {}) from {}",
            session.player.name,
            session.player.level,
            self.save_path.display()
        );
        Ok(session)
    }
}

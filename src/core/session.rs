//! The live game aggregate: everything one playthrough owns.

use crate::character::{ability_templates, Ability, Difficulty, Player};
use crate::combat::{enemy_templates, Enemy};
use crate::dungeon::{generate_dungeon, Dungeon};
use crate::items::Inventory;
use crate::quests::QuestLog;
use crate::shop::Shop;
use chrono::{DateTime, Utc};
use rand::Rng;

/// Monotonic counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStatistics {
    pub enemies_defeated: u32,
    pub gold_earned: u32,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    pub items_collected: u32,
    pub quests_completed: u32,
    pub deaths: u32,
    pub playtime_seconds: u32,
}

/// Computed after every turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The final room's boss is beaten
    Won,
    /// The run is over (permadeath)
    Lost,
}

pub struct GameSession {
    pub player: Player,
    pub dungeon: Dungeon,
    pub inventory: Inventory,
    pub quest_log: QuestLog,
    /// Created on the first shop visit
    pub shop: Option<Shop>,
    pub stats: GameStatistics,
    pub enemy_templates: Vec<Enemy>,
    pub ability_templates: Vec<Ability>,
    /// Set when a permadeath defeat ends the run
    pub permadeath: bool,
    clock: DateTime<Utc>,
}

impl GameSession {
    /// Wraps loaded or prepared parts in a session. Templates are rebuilt.
    pub fn from_parts(
        player: Player,
        dungeon: Dungeon,
        inventory: Inventory,
        quest_log: QuestLog,
        stats: GameStatistics,
    ) -> Self {
        Self {
            player,
            dungeon,
            inventory,
            quest_log,
            shop: None,
            stats,
            enemy_templates: enemy_templates(),
            ability_templates: ability_templates(),
            permadeath: false,
            clock: Utc::now(),
        }
    }

    /// One-time world setup for a fresh character: dungeon, empty
    /// inventory, a starting quest and level 1 abilities.
    pub fn new_game(mut player: Player, rng: &mut impl Rng) -> Self {
        if !player.difficulty_locked {
            player.apply_difficulty(Difficulty::Normal);
        }
        player.current_room = 0;

        let mut dungeon = generate_dungeon(rng);
        if let Some(entrance) = dungeon.room_mut(0) {
            entrance.explored = true;
        }

        let mut session = Self::from_parts(
            player,
            dungeon,
            Inventory::new(),
            QuestLog::new(),
            GameStatistics::default(),
        );
        session.player.unlock_abilities(&session.ability_templates);
        if let Err(e) = session.quest_log.generate(session.player.level, rng) {
            log::warn!("no starting quest: {}", e);
        }
        log::info!(
            "new game: {} the {} on {}",
            session.player.name,
            session.player.player_trait.name(),
            session.player.difficulty.name()
        );
        session
    }

    pub fn status(&self) -> GameStatus {
        if self.permadeath || !self.player.is_alive() {
            GameStatus::Lost
        } else if self.dungeon.is_boss_defeated() {
            GameStatus::Won
        } else {
            GameStatus::Ongoing
        }
    }

    /// Adds whole seconds elapsed since the last call to the playtime.
    pub fn account_playtime(&mut self, now: DateTime<Utc>) {
        let elapsed = (now - self.clock).num_seconds();
        if elapsed <= 0 {
            return;
        }
        let elapsed = u32::try_from(elapsed).unwrap_or(u32::MAX);
        self.stats.playtime_seconds = self.stats.playtime_seconds.saturating_add(elapsed);
        self.clock = self.clock + chrono::Duration::seconds(elapsed as i64);
    }

    /// Shop for the current visit, created on first use and restocked
    /// every visit.
    pub fn visit_shop(&mut self, rng: &mut impl Rng) -> &mut Shop {
        let level = self.player.level;
        let shop = self.shop.get_or_insert_with(Shop::new);
        shop.restock(level, rng);
        shop
    }
}

/// Formats seconds as `h:mm:ss`.
pub fn format_playtime(seconds: u32) -> String {
    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::PlayerTrait;
    use crate::dungeon::EncounterType;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn session() -> GameSession {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut player = Player::new("Orin", PlayerTrait::HeavyArmour);
        player.apply_difficulty(Difficulty::Easy);
        GameSession::new_game(player, &mut rng)
    }

    #[test]
    fn test_new_game_setup() {
        let s = session();
        assert_eq!(s.player.current_room, 0);
        assert!(s.dungeon.room(0).unwrap().explored);
        assert_eq!(s.dungeon.room(0).unwrap().encounter, EncounterType::Empty);
        assert!(s.inventory.is_empty());
        assert_eq!(s.quest_log.len(), 1);
        assert!(s.shop.is_none());
        assert_eq!(s.player.abilities.len(), 1);
        assert_eq!(s.stats, GameStatistics::default());
        assert_eq!(s.status(), GameStatus::Ongoing);
    }

    #[test]
    fn test_difficulty_not_applied_twice() {
        let s = session();
        // 100 * 1.5, (5 + 5) * 1.35
        assert_eq!(s.player.max_health, 150);
        assert_eq!(s.player.defense, 13);
    }

    #[test]
    fn test_unset_difficulty_defaults_to_normal() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let s = GameSession::new_game(Player::new("Orin", PlayerTrait::Scholarly), &mut rng);
        assert_eq!(s.player.difficulty, Difficulty::Normal);
        assert!(s.player.difficulty_locked);
        assert_eq!(s.player.max_health, 100);
    }

    #[test]
    fn test_status_won_after_boss() {
        let mut s = session();
        let last = s.dungeon.total_rooms() - 1;
        s.dungeon.room_mut(last).unwrap().clear_encounter();
        assert_eq!(s.status(), GameStatus::Won);
    }

    #[test]
    fn test_status_lost_on_permadeath() {
        let mut s = session();
        s.permadeath = true;
        assert_eq!(s.status(), GameStatus::Lost);
    }

    #[test]
    fn test_playtime_accumulates_whole_seconds() {
        let mut s = session();
        let start = s.clock;
        s.account_playtime(start + chrono::Duration::milliseconds(2500));
        assert_eq!(s.stats.playtime_seconds, 2);
        s.account_playtime(start + chrono::Duration::milliseconds(3100));
        assert_eq!(s.stats.playtime_seconds, 3);
        s.account_playtime(start);
        assert_eq!(s.stats.playtime_seconds, 3);
    }

    #[test]
    fn test_shop_created_lazily() {
        let mut s = session();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let count = s.visit_shop(&mut rng).stock().len();
        assert!(count >= 5);
        assert!(s.shop.is_some());
    }

    #[test]
    fn test_format_playtime() {
        assert_eq!(format_playtime(3725), "1:02:05");
    }
}

//! Quest log: generation, progress tracking and one-time rewards.

use super::types::{ObjectiveType, Quest};
use crate::character::Player;
use crate::core::constants::{MAX_LEVEL, MAX_QUESTS, QUEST_COLLECT_THRESHOLD, QUEST_KILL_THRESHOLD};
use crate::core::error::ActionError;
use crate::core::rng::{random_range, roll};
use crate::core::session::GameStatistics;
use rand::Rng;

/// Rolls a new quest scaled to the player level.
pub fn generate_quest(id: u32, player_level: u32, rng: &mut impl Rng) -> Quest {
    let value = roll(rng);
    let objective = if value < QUEST_KILL_THRESHOLD {
        ObjectiveType::KillEnemies
    } else if value < QUEST_COLLECT_THRESHOLD {
        ObjectiveType::CollectItems
    } else {
        ObjectiveType::ReachLevel
    };

    let (target, reward) = match objective {
        ObjectiveType::KillEnemies => {
            let target = random_range(rng, 2, 4) + player_level;
            (target, 25 * target + random_range(rng, 0, 25))
        }
        ObjectiveType::CollectItems => {
            let target = random_range(rng, 2, 4) + player_level;
            (target, 20 * target + random_range(rng, 0, 25))
        }
        ObjectiveType::ReachLevel => {
            let target = (player_level + random_range(rng, 1, 2)).min(MAX_LEVEL);
            (target, 100 * target)
        }
    };
    Quest::new(id, objective, target, reward)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestLog {
    quests: Vec<Quest>,
    next_id: u32,
}

impl Default for QuestLog {
    fn default() -> Self {
        Self {
            quests: Vec::new(),
            next_id: 1,
        }
    }
}

impl QuestLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a log from stored quests; ids continue after the highest one.
    pub fn from_quests(quests: Vec<Quest>) -> Self {
        let next_id = quests.iter().map(|q| q.id).max().unwrap_or(0) + 1;
        Self { quests, next_id }
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.quests.len() >= MAX_QUESTS
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter()
    }

    pub fn active(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter().filter(|q| !q.completed)
    }

    pub fn get(&self, id: u32) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    /// Rolls a quest without adding it, so the player can decline.
    pub fn offer(&self, player_level: u32, rng: &mut impl Rng) -> Result<Quest, ActionError> {
        if self.is_full() {
            return Err(ActionError::QuestLogFull);
        }
        Ok(generate_quest(self.next_id, player_level, rng))
    }

    /// Adds a quest (typically one from `offer`).
    pub fn accept(&mut self, mut quest: Quest) -> Result<u32, ActionError> {
        if self.is_full() {
            return Err(ActionError::QuestLogFull);
        }
        quest.id = self.next_id;
        self.next_id += 1;
        log::debug!("quest {} accepted: {}", quest.id, quest.description);
        let id = quest.id;
        self.quests.push(quest);
        Ok(id)
    }

    /// Rolls and adds a quest in one step.
    pub fn generate(&mut self, player_level: u32, rng: &mut impl Rng) -> Result<u32, ActionError> {
        let quest = self.offer(player_level, rng)?;
        self.accept(quest)
    }

    /// Adds progress to every open quest with the given objective.
    pub fn update_progress(&mut self, objective: ObjectiveType, amount: u32) {
        for quest in self
            .quests
            .iter_mut()
            .filter(|q| !q.completed && q.objective == objective)
        {
            quest.progress = quest.progress.saturating_add(amount);
        }
    }

    /// Completes every quest whose objective is met and pays its reward.
    /// Rewards are raw gold. Returns the quests completed by this call.
    pub fn check_completion(&mut self, player: &mut Player, stats: &mut GameStatistics) -> Vec<Quest> {
        let mut finished = Vec::new();
        for quest in self.quests.iter_mut().filter(|q| !q.completed) {
            match quest.objective {
                ObjectiveType::KillEnemies => {}
                ObjectiveType::CollectItems => quest.progress = stats.items_collected,
                ObjectiveType::ReachLevel => quest.progress = player.level,
            }
            if quest.progress < quest.target {
                continue;
            }
            quest.completed = true;
            player.gold += quest.reward_gold;
            stats.gold_earned += quest.reward_gold;
            stats.quests_completed += 1;
            log::info!("quest {} completed, {} gold", quest.id, quest.reward_gold);
            finished.push(quest.clone());
        }
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::PlayerTrait;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_kill_quest_scenario() {
        let mut player = Player::new("Ash", PlayerTrait::Fortunate);
        let mut stats = GameStatistics::default();
        let mut log = QuestLog::new();
        log.accept(Quest::new(0, ObjectiveType::KillEnemies, 5, 150))
            .unwrap();

        for _ in 0..4 {
            log.update_progress(ObjectiveType::KillEnemies, 1);
            assert!(log.check_completion(&mut player, &mut stats).is_empty());
        }
        log.update_progress(ObjectiveType::KillEnemies, 1);
        let done = log.check_completion(&mut player, &mut stats);
        assert_eq!(done.len(), 1);
        // raw gold, trait multiplier does not apply
        assert_eq!(player.gold, 50 + 150);

        log.update_progress(ObjectiveType::KillEnemies, 1);
        assert!(log.check_completion(&mut player, &mut stats).is_empty());
        assert_eq!(player.gold, 200);
        assert_eq!(stats.quests_completed, 1);
        assert_eq!(stats.gold_earned, 150);
    }

    #[test]
    fn test_collect_quest_uses_statistic() {
        let mut player = Player::new("Ash", PlayerTrait::Scholarly);
        let mut stats = GameStatistics::default();
        let mut log = QuestLog::new();
        log.accept(Quest::new(0, ObjectiveType::CollectItems, 3, 60))
            .unwrap();

        stats.items_collected = 2;
        assert!(log.check_completion(&mut player, &mut stats).is_empty());
        assert_eq!(log.iter().next().unwrap().progress, 2);

        stats.items_collected = 3;
        assert_eq!(log.check_completion(&mut player, &mut stats).len(), 1);
    }

    #[test]
    fn test_reach_level_quest() {
        let mut player = Player::new("Ash", PlayerTrait::Scholarly);
        let mut stats = GameStatistics::default();
        let mut log = QuestLog::new();
        log.accept(Quest::new(0, ObjectiveType::ReachLevel, 2, 200))
            .unwrap();
        assert!(log.check_completion(&mut player, &mut stats).is_empty());
        player.level = 2;
        assert_eq!(log.check_completion(&mut player, &mut stats).len(), 1);
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut log = QuestLog::new();
        let a = log.generate(1, &mut rng).unwrap();
        let b = log.generate(1, &mut rng).unwrap();
        assert_eq!((a, b), (1, 2));

        let restored = QuestLog::from_quests(log.iter().cloned().collect());
        assert_eq!(restored.offer(1, &mut rng).unwrap().id, 3);
    }

    #[test]
    fn test_log_capacity() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut log = QuestLog::new();
        for _ in 0..MAX_QUESTS {
            log.generate(1, &mut rng).unwrap();
        }
        assert!(log.is_full());
        assert_eq!(log.generate(1, &mut rng), Err(ActionError::QuestLogFull));
        assert_eq!(log.len(), MAX_QUESTS);
    }

    #[test]
    fn test_generated_targets_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            let quest = generate_quest(1, 3, &mut rng);
            match quest.objective {
                ObjectiveType::KillEnemies => {
                    assert!((5..=7).contains(&quest.target));
                    assert!(quest.reward_gold >= 25 * quest.target);
                    assert!(quest.reward_gold <= 25 * quest.target + 25);
                }
                ObjectiveType::CollectItems => {
                    assert!((5..=7).contains(&quest.target));
                    assert!(quest.reward_gold <= 20 * quest.target + 25);
                }
                ObjectiveType::ReachLevel => {
                    assert!((4..=5).contains(&quest.target));
                    assert_eq!(quest.reward_gold, 100 * quest.target);
                }
            }
            assert!(!quest.completed);
            assert_eq!(quest.progress, 0);
        }
    }

    #[test]
    fn test_reach_level_capped_at_max() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..200 {
            let quest = generate_quest(1, MAX_LEVEL, &mut rng);
            if quest.objective == ObjectiveType::ReachLevel {
                assert_eq!(quest.target, MAX_LEVEL);
            }
        }
    }
}

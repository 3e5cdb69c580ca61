#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveType {
    KillEnemies = 0,
    CollectItems = 1,
    ReachLevel = 2,
}

impl ObjectiveType {
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(ObjectiveType::KillEnemies),
            1 => Some(ObjectiveType::CollectItems),
            2 => Some(ObjectiveType::ReachLevel),
            _ => None,
        }
    }

    pub fn index(&self) -> u32 {
        *self as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quest {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub objective: ObjectiveType,
    pub target: u32,
    pub progress: u32,
    pub reward_gold: u32,
    /// One-way: a completed quest never reopens
    pub completed: bool,
}

impl Quest {
    pub fn new(id: u32, objective: ObjectiveType, target: u32, reward_gold: u32) -> Self {
        let (title, description) = describe(objective, target);
        Self {
            id,
            title,
            description,
            objective,
            target,
            progress: 0,
            reward_gold,
            completed: false,
        }
    }

    /// Progress clamped to the target, for display.
    pub fn shown_progress(&self) -> u32 {
        self.progress.min(self.target)
    }
}

/// Title and description for an objective. Both are derived, never stored.
pub fn describe(objective: ObjectiveType, target: u32) -> (String, String) {
    match objective {
        ObjectiveType::KillEnemies => (
            "Monster Hunter".to_string(),
            format!("Defeat {} enemies in the dungeon", target),
        ),
        ObjectiveType::CollectItems => (
            "Treasure Seeker".to_string(),
            format!("Collect {} items", target),
        ),
        ObjectiveType::ReachLevel => (
            "Path of Growth".to_string(),
            format!("Reach level {}", target),
        ),
    }
}

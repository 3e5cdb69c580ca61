// Name and text limits
pub const MAX_NAME_LENGTH: usize = 50;

// Collection capacities
pub const MAX_ABILITIES: usize = 15;
pub const MAX_QUESTS: usize = 20;
pub const MAX_INVENTORY: usize = 50;
pub const MAX_ENEMIES: usize = 10;
pub const MAX_STATUS_EFFECTS: usize = 10;

// Dungeon grid (rows x cols = room count)
pub const DUNGEON_ROWS: usize = 7;
pub const DUNGEON_COLS: usize = 5;
pub const ROOM_COUNT: usize = DUNGEON_ROWS * DUNGEON_COLS;

// Player starting stats
pub const STARTING_HEALTH: u32 = 100;
pub const STARTING_ATTACK: u32 = 10;
pub const STARTING_DEFENSE: u32 = 5;
pub const STARTING_GOLD: u32 = 50;
pub const STARTING_XP: u32 = 0;

// Level-up
pub const XP_PER_LEVEL: u32 = 100;
pub const HP_LEVEL_GAIN: u32 = 20;
pub const ATTACK_LEVEL_GAIN: u32 = 5;
pub const DEFENSE_LEVEL_GAIN: u32 = 3;
pub const MAX_LEVEL: u32 = 10;

// Trait bonuses
pub const HEAVY_ARMOUR_DEFENSE_BONUS: u32 = 5;
pub const QUICK_HANDS_ESCAPE_BONUS: f64 = 0.15;
pub const FORTUNATE_GOLD_MULTIPLIER: f32 = 1.5;
pub const SCHOLARLY_EXP_MULTIPLIER: f32 = 1.5;

// Combat
pub const PLAYER_CRIT_CHANCE: f64 = 0.15;
pub const PLAYER_CRIT_MULTIPLIER: f64 = 2.0;
pub const ENEMY_CRIT_CHANCE: f64 = 0.10;
pub const ENEMY_CRIT_MULTIPLIER: f64 = 1.5;
pub const DEFENSE_FACTOR: f64 = 0.5;
pub const BASE_ESCAPE_CHANCE: f64 = 0.40;
pub const LOOT_DROP_CHANCE: f64 = 0.30;
pub const ABILITY_CRIT_MULTIPLIER: f64 = 1.5;
pub const LIFE_DRAIN_HEAL_FRACTION: f64 = 0.5;
pub const AFFLICTION_CHANCE: f64 = 0.25;

// Enemy selection window around the player level
pub const ENEMY_LEVEL_WINDOW_BELOW: i32 = 1;
pub const ENEMY_LEVEL_WINDOW_ABOVE: i32 = 2;
pub const ENEMY_LEVEL_SCALING_STEP: f64 = 0.1;

// Boss scaling: level offset and (health, attack, defense, exp, gold) multipliers
pub const BOSS_LEVEL_OFFSET: u32 = 3;
pub const BOSS_MULTIPLIERS: (f64, f64, f64, f64, f64) = (2.5, 1.75, 1.5, 4.0, 5.0);
pub const BOSS_BONUS_REWARD_FRACTION: f64 = 0.5;

// Defeat penalties: health divisor and gold loss fraction
pub const DEFEAT_HEALTH_DIVISOR: u32 = 2;
pub const DEFEAT_GOLD_LOSS: f64 = 0.25;
pub const BOSS_DEFEAT_HEALTH_DIVISOR: u32 = 3;
pub const BOSS_DEFEAT_GOLD_LOSS: f64 = 0.50;

// Dungeon encounter roll thresholds (cumulative)
pub const ENCOUNTER_ENEMY_THRESHOLD: f64 = 0.70;
pub const ENCOUNTER_TREASURE_THRESHOLD: f64 = 0.80;
pub const ENCOUNTER_QUEST_THRESHOLD: f64 = 0.85;
pub const ENCOUNTER_SHOP_THRESHOLD: f64 = 0.93;

// Treasure gold bonus per player level
pub const TREASURE_GOLD_MIN: u32 = 5;
pub const TREASURE_GOLD_MAX: u32 = 15;

// Shop stock size
pub const SHOP_MIN_ITEMS: usize = 5;
pub const SHOP_MAX_ITEMS: usize = 8;

// Quest objective roll thresholds (cumulative)
pub const QUEST_KILL_THRESHOLD: f64 = 0.50;
pub const QUEST_COLLECT_THRESHOLD: f64 = 0.80;

// Console pacing
pub const DEFAULT_MESSAGE_DELAY_MS: u64 = 600;

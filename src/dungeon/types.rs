//! Dungeon data structures: a fixed grid of rooms.

use crate::core::constants::{DUNGEON_COLS, DUNGEON_ROWS};

/// Event bound to a room, consumed once resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterType {
    Empty = 0,
    Enemy = 1,
    Treasure = 2,
    Quest = 3,
    Boss = 4,
}

impl EncounterType {
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(EncounterType::Empty),
            1 => Some(EncounterType::Enemy),
            2 => Some(EncounterType::Treasure),
            3 => Some(EncounterType::Quest),
            4 => Some(EncounterType::Boss),
            _ => None,
        }
    }

    pub fn index(&self) -> u32 {
        *self as u32
    }

    /// Returns the map character for this encounter
    pub fn icon(&self) -> char {
        match self {
            EncounterType::Empty => '.',
            EncounterType::Enemy => 'E',
            EncounterType::Treasure => 'T',
            EncounterType::Quest => 'Q',
            EncounterType::Boss => 'B',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ]
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::all().get(index as usize).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::East => "East",
            Direction::South => "South",
            Direction::West => "West",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: usize,
    pub description: String,
    pub encounter: EncounterType,
    /// Target room index per direction (North, East, South, West)
    pub connections: [Option<usize>; 4],
    pub has_shop: bool,
    pub has_boss: bool,
    pub explored: bool,
}

impl Room {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            description: String::new(),
            encounter: EncounterType::Empty,
            connections: [None; 4],
            has_shop: false,
            has_boss: false,
            explored: false,
        }
    }

    pub fn exit(&self, direction: Direction) -> Option<usize> {
        self.connections[direction.index()]
    }

    /// Marks the encounter as resolved. Boss rooms also lose their boss.
    pub fn clear_encounter(&mut self) {
        if self.encounter == EncounterType::Boss {
            self.has_boss = false;
        }
        self.encounter = EncounterType::Empty;
    }
}

/// Grid index for a (row, col) position.
pub fn room_index(row: usize, col: usize) -> usize {
    DUNGEON_COLS * row + col
}

/// (row, col) position of a room index.
pub fn grid_position(index: usize) -> (usize, usize) {
    (index / DUNGEON_COLS, index % DUNGEON_COLS)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dungeon {
    pub rooms: Vec<Room>,
}

impl Dungeon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> usize {
        DUNGEON_ROWS
    }

    pub fn cols(&self) -> usize {
        DUNGEON_COLS
    }

    pub fn total_rooms(&self) -> usize {
        self.rooms.len()
    }

    pub fn room(&self, index: usize) -> Option<&Room> {
        self.rooms.get(index)
    }

    pub fn room_mut(&mut self, index: usize) -> Option<&mut Room> {
        self.rooms.get_mut(index)
    }

    /// The boss room: always the last room.
    pub fn final_room(&self) -> Option<&Room> {
        self.rooms.last()
    }

    pub fn explored_count(&self) -> usize {
        self.rooms.iter().filter(|r| r.explored).count()
    }

    /// True once the final room's boss is beaten.
    pub fn is_boss_defeated(&self) -> bool {
        self.final_room().is_some_and(|room| !room.has_boss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for index in 0..DUNGEON_ROWS * DUNGEON_COLS {
            let (row, col) = grid_position(index);
            assert_eq!(room_index(row, col), index);
        }
        assert_eq!(room_index(1, 0), DUNGEON_COLS);
    }

    #[test]
    fn test_clear_boss_encounter_drops_boss_flag() {
        let mut room = Room::new(3);
        room.encounter = EncounterType::Boss;
        room.has_boss = true;
        room.clear_encounter();
        assert_eq!(room.encounter, EncounterType::Empty);
        assert!(!room.has_boss);
    }

    #[test]
    fn test_clear_regular_encounter_keeps_flags() {
        let mut room = Room::new(3);
        room.encounter = EncounterType::Treasure;
        room.has_shop = true;
        room.clear_encounter();
        assert_eq!(room.encounter, EncounterType::Empty);
        assert!(room.has_shop);
    }

    #[test]
    fn test_empty_dungeon_has_no_boss_state() {
        let dungeon = Dungeon::new();
        assert!(!dungeon.is_boss_defeated());
        assert_eq!(dungeon.explored_count(), 0);
    }

    #[test]
    fn test_encounter_index_round_trip() {
        for index in 0..5 {
            assert_eq!(EncounterType::from_index(index).unwrap().index(), index);
        }
        assert_eq!(EncounterType::from_index(5), None);
    }
}

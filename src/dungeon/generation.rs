//! Dungeon generation: room contents and grid connections.
//!
//! Connections are a pure function of grid position and are not saved, so
//! `generate_connections` and `assign_descriptions` run again after a load.

use super::types::{grid_position, room_index, Direction, Dungeon, EncounterType, Room};
use crate::core::constants::*;
use crate::core::rng::roll;
use rand::Rng;

pub const ROOM_DESCRIPTIONS: [&str; 20] = [
    "A damp stone chamber. Water drips steadily from the ceiling.",
    "Cobwebs drape every corner of this narrow hall.",
    "Faded murals of forgotten kings line the walls.",
    "The floor is littered with broken pottery and old bones.",
    "A cold draft whistles through cracks in the masonry.",
    "Torches flicker in rusted sconces, casting long shadows.",
    "Roots have split the flagstones of this overgrown room.",
    "An old altar stands in the center, stained dark.",
    "Piles of rubble half block the passages here.",
    "The air is thick with the smell of smoke and ash.",
    "Strange glowing fungus covers the walls in patches.",
    "A collapsed library. Rotten books spill from the shelves.",
    "Iron chains hang from the ceiling, swaying gently.",
    "This room was once a barracks. Cots lie overturned.",
    "A shallow pool of black water fills one corner.",
    "Claw marks score the stone door frames.",
    "An armory, long since looted. Empty racks remain.",
    "The ceiling soars into darkness above you.",
    "Scattered coins glint among the dust, most of them fake.",
    "A quiet crypt. Stone coffins line the walls.",
];

/// Builds a fresh dungeon with rooms, descriptions and connections.
pub fn generate_dungeon(rng: &mut impl Rng) -> Dungeon {
    let mut dungeon = Dungeon {
        rooms: generate_rooms(rng),
    };
    generate_connections(&mut dungeon);
    log::debug!(
        "generated dungeon with {} rooms ({} enemy, {} shop)",
        dungeon.total_rooms(),
        dungeon
            .rooms
            .iter()
            .filter(|r| r.encounter == EncounterType::Enemy)
            .count(),
        dungeon.rooms.iter().filter(|r| r.has_shop).count()
    );
    dungeon
}

/// Rolls room contents. Room 0 is the explored entrance, the last room is
/// the boss room.
pub fn generate_rooms(rng: &mut impl Rng) -> Vec<Room> {
    let last = ROOM_COUNT - 1;
    (0..ROOM_COUNT)
        .map(|index| {
            let mut room = Room::new(index);
            room.description = description_for(index).to_string();
            if index == 0 {
                room.explored = true;
            } else if index == last {
                room.encounter = EncounterType::Boss;
                room.has_boss = true;
            } else {
                let (encounter, has_shop) = roll_encounter(rng);
                room.encounter = encounter;
                room.has_shop = has_shop;
            }
            room
        })
        .collect()
}

/// Weighted encounter roll for intermediate rooms: (encounter, has_shop).
pub fn roll_encounter(rng: &mut impl Rng) -> (EncounterType, bool) {
    let value = roll(rng);
    if value < ENCOUNTER_ENEMY_THRESHOLD {
        (EncounterType::Enemy, false)
    } else if value < ENCOUNTER_TREASURE_THRESHOLD {
        (EncounterType::Treasure, false)
    } else if value < ENCOUNTER_QUEST_THRESHOLD {
        (EncounterType::Quest, false)
    } else if value < ENCOUNTER_SHOP_THRESHOLD {
        (EncounterType::Empty, true)
    } else {
        (EncounterType::Empty, false)
    }
}

pub fn description_for(index: usize) -> &'static str {
    ROOM_DESCRIPTIONS[index % ROOM_DESCRIPTIONS.len()]
}

/// Restores descriptions from the flavor pool by room index.
pub fn assign_descriptions(dungeon: &mut Dungeon) {
    for (index, room) in dungeon.rooms.iter_mut().enumerate() {
        room.description = description_for(index).to_string();
    }
}

/// Exits implied by a grid position, indexed by direction.
pub fn grid_connections(index: usize) -> [Option<usize>; 4] {
    let (row, col) = grid_position(index);
    let mut connections = [None; 4];
    if row > 0 {
        connections[Direction::North.index()] = Some(room_index(row - 1, col));
    }
    if col < DUNGEON_COLS - 1 {
        connections[Direction::East.index()] = Some(room_index(row, col + 1));
    }
    if row < DUNGEON_ROWS - 1 {
        connections[Direction::South.index()] = Some(room_index(row + 1, col));
    }
    if col > 0 {
        connections[Direction::West.index()] = Some(room_index(row, col - 1));
    }
    connections
}

/// Rewires every room to its 4-neighbour grid adjacency. Idempotent.
pub fn generate_connections(dungeon: &mut Dungeon) {
    for (index, room) in dungeon.rooms.iter_mut().enumerate() {
        room.connections = grid_connections(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn dungeon(seed: u64) -> Dungeon {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        generate_dungeon(&mut rng)
    }

    #[test]
    fn test_room_count() {
        assert_eq!(dungeon(1).total_rooms(), ROOM_COUNT);
    }

    #[test]
    fn test_entrance_and_boss_rooms() {
        let d = dungeon(2);
        let entrance = d.room(0).unwrap();
        assert_eq!(entrance.encounter, EncounterType::Empty);
        assert!(entrance.explored);
        assert!(!entrance.has_boss);

        let boss = d.final_room().unwrap();
        assert_eq!(boss.id, ROOM_COUNT - 1);
        assert_eq!(boss.encounter, EncounterType::Boss);
        assert!(boss.has_boss);
        assert!(!boss.explored);
    }

    #[test]
    fn test_no_boss_rooms_in_between() {
        let d = dungeon(3);
        for room in &d.rooms[1..ROOM_COUNT - 1] {
            assert_ne!(room.encounter, EncounterType::Boss);
            assert!(!room.has_boss);
            assert!(!room.explored);
        }
    }

    #[test]
    fn test_corner_connections() {
        let d = dungeon(4);
        let top_left = d.room(0).unwrap();
        assert_eq!(top_left.exit(Direction::North), None);
        assert_eq!(top_left.exit(Direction::West), None);
        assert_eq!(top_left.exit(Direction::East), Some(1));
        assert_eq!(top_left.exit(Direction::South), Some(DUNGEON_COLS));

        let bottom_right = d.final_room().unwrap();
        assert_eq!(bottom_right.exit(Direction::South), None);
        assert_eq!(bottom_right.exit(Direction::East), None);
        assert_eq!(bottom_right.exit(Direction::North), Some(ROOM_COUNT - 1 - DUNGEON_COLS));
        assert_eq!(bottom_right.exit(Direction::West), Some(ROOM_COUNT - 2));
    }

    #[test]
    fn test_connections_are_symmetric() {
        let d = dungeon(5);
        let opposite = [Direction::South, Direction::West, Direction::North, Direction::East];
        for room in &d.rooms {
            for direction in Direction::all() {
                if let Some(target) = room.exit(direction) {
                    let back = d.room(target).unwrap().exit(opposite[direction.index()]);
                    assert_eq!(back, Some(room.id));
                }
            }
        }
    }

    #[test]
    fn test_regenerating_connections_is_idempotent() {
        let mut d = dungeon(6);
        let before = d.clone();
        generate_connections(&mut d);
        generate_connections(&mut d);
        assert_eq!(d, before);
    }

    #[test]
    fn test_descriptions_cycle_through_pool() {
        let d = dungeon(7);
        assert_eq!(d.room(0).unwrap().description, ROOM_DESCRIPTIONS[0]);
        assert_eq!(d.room(20).unwrap().description, ROOM_DESCRIPTIONS[0]);
        assert_eq!(d.room(23).unwrap().description, ROOM_DESCRIPTIONS[3]);
    }

    #[test]
    fn test_encounter_distribution_mostly_enemies() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let enemies = (0..2000)
            .filter(|_| roll_encounter(&mut rng).0 == EncounterType::Enemy)
            .count();
        // ~70% expected
        assert!(enemies > 1300 && enemies < 1500);
    }

    proptest! {
        #[test]
        fn prop_connections_match_grid_adjacency(seed in any::<u64>()) {
            let d = dungeon(seed);
            for (index, room) in d.rooms.iter().enumerate() {
                let (row, col) = grid_position(index);
                prop_assert_eq!(room.exit(Direction::North), (row > 0).then(|| index - DUNGEON_COLS));
                prop_assert_eq!(room.exit(Direction::East), (col + 1 < DUNGEON_COLS).then(|| index + 1));
                prop_assert_eq!(room.exit(Direction::South), (row + 1 < DUNGEON_ROWS).then(|| index + DUNGEON_COLS));
                prop_assert_eq!(room.exit(Direction::West), (col > 0).then(|| index - 1));
            }
            prop_assert_eq!(d.room(0).unwrap().encounter, EncounterType::Empty);
            prop_assert!(d.final_room().unwrap().has_boss);
        }
    }
}

//! Dungeon navigation.

use super::types::{Direction, Dungeon, EncounterType};
use crate::character::Player;
use crate::core::error::ActionError;

/// Where a successful move landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub room: usize,
    /// First time the player entered this room
    pub first_visit: bool,
    pub encounter: EncounterType,
}

/// Directions with an exit from the given room, in menu order.
pub fn available_exits(dungeon: &Dungeon, room: usize) -> Vec<(Direction, usize)> {
    let Some(room) = dungeon.room(room) else {
        return Vec::new();
    };
    Direction::all()
        .into_iter()
        .filter_map(|direction| room.exit(direction).map(|target| (direction, target)))
        .collect()
}

/// Moves the player through an exit and marks the destination explored.
/// Leaves everything untouched when there is no exit that way.
pub fn move_player(
    player: &mut Player,
    dungeon: &mut Dungeon,
    direction: Direction,
) -> Result<MoveOutcome, ActionError> {
    let target = dungeon
        .room(player.current_room)
        .and_then(|room| room.exit(direction))
        .ok_or(ActionError::NoExit(direction))?;
    let room = dungeon
        .room_mut(target)
        .ok_or(ActionError::NoExit(direction))?;

    let first_visit = !room.explored;
    room.explored = true;
    player.current_room = target;
    log::debug!("moved {} to room {}", direction.name(), target);

    Ok(MoveOutcome {
        room: target,
        first_visit,
        encounter: room.encounter,
    })
}

/// Sends the player back to the entrance (after a non-fatal defeat).
pub fn return_to_entrance(player: &mut Player, dungeon: &mut Dungeon) {
    player.current_room = 0;
    if let Some(room) = dungeon.room_mut(0) {
        room.explored = true;
    }
}

/// Clears the encounter of the room the player stands in.
pub fn clear_current_encounter(player: &Player, dungeon: &mut Dungeon) {
    if let Some(room) = dungeon.room_mut(player.current_room) {
        room.clear_encounter();
    }
}

//! Top-level session lifecycle states and their transition table.

use super::session::GameStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    MainMenu,
    CharacterCreation,
    DifficultySelect,
    NewGame,
    LoadGame,
    GameLoop,
    PauseMenu,
    GameOver,
}

/// What a state handler reports back to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    ChoseNewGame,
    ChoseLoadGame,
    ChoseQuit,
    CharacterCreated,
    DifficultyChosen,
    WorldReady,
    Loaded,
    LoadFailed,
    TurnTaken(GameStatus),
    Paused,
    Resumed,
    /// Saved from the pause menu; stays paused
    Saved,
    AbandonedSession,
    SummaryShown,
    /// A handler that needs a session ran without one
    SessionMissing,
}

/// Why the run ended, for the game-over summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Victory,
    Defeat,
    Quit,
}

/// The next state, or `None` when the run loop should stop.
/// Events that make no sense in `state` leave it unchanged.
pub fn next_state(state: GameState, event: StateEvent) -> Option<GameState> {
    use GameState::*;
    use StateEvent::*;

    let next = match (state, event) {
        (MainMenu, ChoseNewGame) => CharacterCreation,
        (MainMenu, ChoseLoadGame) => LoadGame,
        (MainMenu, ChoseQuit) => return None,
        (CharacterCreation, CharacterCreated) => DifficultySelect,
        (DifficultySelect, DifficultyChosen) => NewGame,
        (NewGame, WorldReady) => GameLoop,
        (LoadGame, Loaded) => GameLoop,
        (LoadGame, LoadFailed) => MainMenu,
        (GameLoop, TurnTaken(GameStatus::Ongoing)) => GameLoop,
        (GameLoop, TurnTaken(GameStatus::Won | GameStatus::Lost)) => GameOver,
        (GameLoop, Paused) => PauseMenu,
        (PauseMenu, Resumed) => GameLoop,
        (PauseMenu, Saved) => PauseMenu,
        (PauseMenu, AbandonedSession) => MainMenu,
        (PauseMenu, ChoseQuit) => GameOver,
        (GameOver, SummaryShown) => return None,
        (_, SessionMissing) => MainMenu,
        (state, event) => {
            log::warn!("ignoring {:?} in {:?}", event, state);
            state
        }
    };
    if next != state {
        log::debug!("state {:?} -> {:?}", state, next);
    }
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_path() {
        let mut state = GameState::MainMenu;
        for event in [
            StateEvent::ChoseNewGame,
            StateEvent::CharacterCreated,
            StateEvent::DifficultyChosen,
            StateEvent::WorldReady,
        ] {
            state = next_state(state, event).unwrap();
        }
        assert_eq!(state, GameState::GameLoop);
    }

    #[test]
    fn test_load_paths() {
        assert_eq!(
            next_state(GameState::LoadGame, StateEvent::Loaded),
            Some(GameState::GameLoop)
        );
        assert_eq!(
            next_state(GameState::LoadGame, StateEvent::LoadFailed),
            Some(GameState::MainMenu)
        );
    }

    #[test]
    fn test_turn_outcomes() {
        assert_eq!(
            next_state(GameState::GameLoop, StateEvent::TurnTaken(GameStatus::Ongoing)),
            Some(GameState::GameLoop)
        );
        assert_eq!(
            next_state(GameState::GameLoop, StateEvent::TurnTaken(GameStatus::Won)),
            Some(GameState::GameOver)
        );
        assert_eq!(
            next_state(GameState::GameLoop, StateEvent::TurnTaken(GameStatus::Lost)),
            Some(GameState::GameOver)
        );
    }

    #[test]
    fn test_pause_menu() {
        assert_eq!(
            next_state(GameState::PauseMenu, StateEvent::Resumed),
            Some(GameState::GameLoop)
        );
        assert_eq!(
            next_state(GameState::PauseMenu, StateEvent::AbandonedSession),
            Some(GameState::MainMenu)
        );
        assert_eq!(
            next_state(GameState::PauseMenu, StateEvent::ChoseQuit),
            Some(GameState::GameOver)
        );
    }

    #[test]
    fn test_exits() {
        assert_eq!(next_state(GameState::MainMenu, StateEvent::ChoseQuit), None);
        assert_eq!(next_state(GameState::GameOver, StateEvent::SummaryShown), None);
    }

    #[test]
    fn test_missing_session_returns_to_menu() {
        assert_eq!(
            next_state(GameState::GameLoop, StateEvent::SessionMissing),
            Some(GameState::MainMenu)
        );
    }

    #[test]
    fn test_unexpected_event_is_ignored() {
        assert_eq!(
            next_state(GameState::CharacterCreation, StateEvent::Loaded),
            Some(GameState::CharacterCreation)
        );
    }
}

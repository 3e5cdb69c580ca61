//! The session driver: runs one handler per state and feeds the resulting
//! event through [`next_state`] until the run ends.

use super::constants::MAX_NAME_LENGTH;
use super::error::{GameError, GameResult};
use super::game_state::{next_state, GameOutcome, GameState, StateEvent};
use super::session::{GameSession, GameStatus};
use crate::character::{Difficulty, Player, PlayerTrait};
use crate::core::error::ActionError;
use crate::dungeon::{available_exits, move_player, EncounterType};
use crate::encounter::resolve_encounter;
use crate::save_manager::SaveManager;
use crate::shop::sell_price;
use crate::ui::screens;
use crate::ui::{Interface, Tone};
use chrono::Utc;
use rand::Rng;

pub struct Game<U: Interface, R: Rng> {
    ui: U,
    rng: R,
    state: GameState,
    session: Option<GameSession>,
    /// Character being created, before the world exists
    pending: Option<Player>,
    saves: SaveManager,
    outcome: Option<GameOutcome>,
}

impl<U: Interface, R: Rng> Game<U, R> {
    pub fn new(ui: U, rng: R, saves: SaveManager) -> Self {
        Self {
            ui,
            rng,
            state: GameState::MainMenu,
            session: None,
            pending: None,
            saves,
            outcome: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    /// Runs until the player quits, the game-over summary is shown, or
    /// input runs out.
    pub fn run(&mut self) -> GameResult<()> {
        loop {
            let event = match self.handle_state() {
                Ok(event) => event,
                Err(e) if e.is_end_of_input() => {
                    log::info!("input closed in {:?}", self.state);
                    return Ok(());
                }
                Err(GameError::NoActiveSession) => {
                    log::error!("{:?} needs a game session but none is active", self.state);
                    StateEvent::SessionMissing
                }
                Err(GameError::Save(e)) => {
                    self.ui.message(Tone::Error, &e.to_string());
                    continue;
                }
                Err(e) => return Err(e),
            };
            match next_state(self.state, event) {
                Some(state) => self.state = state,
                None => return Ok(()),
            }
        }
    }

    fn handle_state(&mut self) -> GameResult<StateEvent> {
        match self.state {
            GameState::MainMenu => self.main_menu(),
            GameState::CharacterCreation => self.character_creation(),
            GameState::DifficultySelect => self.difficulty_select(),
            GameState::NewGame => self.new_game(),
            GameState::LoadGame => Ok(self.load_game()),
            GameState::GameLoop => self.take_turn(),
            GameState::PauseMenu => self.pause_menu(),
            GameState::GameOver => Ok(self.game_over()),
        }
    }

    fn main_menu(&mut self) -> GameResult<StateEvent> {
        screens::show_title(&mut self.ui);
        Ok(match self.ui.prompt_choice("Choose", 1, 3)? {
            1 => StateEvent::ChoseNewGame,
            2 => StateEvent::ChoseLoadGame,
            _ => StateEvent::ChoseQuit,
        })
    }

    fn character_creation(&mut self) -> GameResult<StateEvent> {
        let ui = &mut self.ui;
        ui.header("Create Your Character");
        let name = ui.prompt_string("Enter your name", MAX_NAME_LENGTH)?;

        ui.write_line(Tone::Highlight, "Choose a trait:");
        for (number, player_trait) in PlayerTrait::all().iter().enumerate() {
            ui.write_line(
                Tone::Plain,
                &format!(
                    "{}. {} - {}",
                    number + 1,
                    player_trait.name(),
                    player_trait.description()
                ),
            );
        }
        let choice = ui.prompt_choice("Trait", 1, PlayerTrait::all().len() as u32)?;
        let player_trait = PlayerTrait::from_index(choice - 1).unwrap_or(PlayerTrait::HeavyArmour);

        self.pending = Some(Player::new(&name, player_trait));
        Ok(StateEvent::CharacterCreated)
    }

    fn difficulty_select(&mut self) -> GameResult<StateEvent> {
        let player = self.pending.as_mut().ok_or(GameError::NoActiveSession)?;
        let ui = &mut self.ui;
        ui.header("Choose Difficulty");
        loop {
            for (number, difficulty) in Difficulty::all().iter().enumerate() {
                let (health, defense) = difficulty.stat_multipliers();
                let mut line = format!(
                    "{}. {} (health x{:.2}, defense x{:.2})",
                    number + 1,
                    difficulty.name(),
                    health,
                    defense
                );
                if difficulty.is_permadeath() {
                    line.push_str(" - death is permanent");
                }
                ui.write_line(Tone::Plain, &line);
            }
            let choice = ui.prompt_choice("Difficulty", 1, Difficulty::all().len() as u32)?;
            let difficulty = Difficulty::from_index(choice - 1).unwrap_or(Difficulty::Normal);
            if ui.confirm(&format!("Play on {}?", difficulty.name()))? {
                if !player.apply_difficulty(difficulty) {
                    log::warn!("difficulty already set to {}", player.difficulty.name());
                }
                return Ok(StateEvent::DifficultyChosen);
            }
        }
    }

    fn new_game(&mut self) -> GameResult<StateEvent> {
        let player = self.pending.take().ok_or(GameError::NoActiveSession)?;
        let session = GameSession::new_game(player, &mut self.rng);
        self.ui.clear();
        self.ui.timed_message(
            Tone::Highlight,
            &format!(
                "{} descends into the dungeon. Find and defeat its master in the deepest room.",
                session.player.name
            ),
        );
        self.session = Some(session);
        self.outcome = None;
        Ok(StateEvent::WorldReady)
    }

    fn load_game(&mut self) -> StateEvent {
        if !self.saves.exists() {
            self.ui.message(Tone::Warning, "No saved game found.");
            return StateEvent::LoadFailed;
        }
        match self.saves.load() {
            Ok(session) => {
                self.ui.timed_message(
                    Tone::Success,
                    &format!(
                        "Welcome back, {} (level {}).",
                        session.player.name, session.player.level
                    ),
                );
                self.session = Some(session);
                self.outcome = None;
                StateEvent::Loaded
            }
            Err(e) => {
                log::warn!("load failed: {}", e);
                self.ui
                    .message(Tone::Error, &format!("Could not load the game: {}", e));
                StateEvent::LoadFailed
            }
        }
    }

    fn take_turn(&mut self) -> GameResult<StateEvent> {
        let session = self.session.as_mut().ok_or(GameError::NoActiveSession)?;
        let ui = &mut self.ui;
        let rng = &mut self.rng;

        if let Some(room) = session.dungeon.room(session.player.current_room) {
            let exits = available_exits(&session.dungeon, room.id);
            screens::show_room(ui, room, &exits);
        }
        screens::show_status_line(ui, &session.player);
        screens::show_game_menu(ui);

        match ui.prompt_choice("Action", 1, 9)? {
            1 => move_menu(ui, rng, session)?,
            2 => {
                resolve_encounter(ui, rng, session)?;
            }
            3 => inventory_menu(ui, session)?,
            4 => screens::show_quests(ui, &session.quest_log),
            5 => screens::show_character_sheet(ui, &session.player, &session.stats),
            6 => screens::show_map(ui, &session.dungeon, session.player.current_room),
            7 => shop_menu(ui, rng, session)?,
            8 => save_game(ui, &self.saves, session),
            _ => {
                session.account_playtime(Utc::now());
                return Ok(StateEvent::Paused);
            }
        }

        for quest in session
            .quest_log
            .check_completion(&mut session.player, &mut session.stats)
        {
            ui.timed_message(
                Tone::Success,
                &format!(
                    "Quest complete: {}! You receive {} gold.",
                    quest.title, quest.reward_gold
                ),
            );
        }
        session.account_playtime(Utc::now());

        let status = session.status();
        match status {
            GameStatus::Won => self.outcome = Some(GameOutcome::Victory),
            GameStatus::Lost => self.outcome = Some(GameOutcome::Defeat),
            GameStatus::Ongoing => {}
        }
        Ok(StateEvent::TurnTaken(status))
    }

    fn pause_menu(&mut self) -> GameResult<StateEvent> {
        let session = self.session.as_ref().ok_or(GameError::NoActiveSession)?;
        let ui = &mut self.ui;
        loop {
            ui.header("Paused");
            for line in ["1. Resume", "2. Save", "3. Return to main menu", "4. Quit"] {
                ui.write_line(Tone::Plain, line);
            }
            match ui.prompt_choice("Choose", 1, 4)? {
                1 => return Ok(StateEvent::Resumed),
                2 => {
                    save_game(ui, &self.saves, session);
                    return Ok(StateEvent::Saved);
                }
                3 => {
                    if ui.confirm("Abandon this game? Unsaved progress is lost")? {
                        log::info!("session abandoned");
                        self.session = None;
                        return Ok(StateEvent::AbandonedSession);
                    }
                }
                _ => {
                    self.outcome = Some(GameOutcome::Quit);
                    return Ok(StateEvent::ChoseQuit);
                }
            }
        }
    }

    fn game_over(&mut self) -> StateEvent {
        let outcome = self.outcome.unwrap_or(GameOutcome::Quit);
        match &self.session {
            Some(session) => {
                screens::show_game_over(&mut self.ui, outcome, Some(&session.player), &session.stats)
            }
            None => screens::show_game_over(&mut self.ui, outcome, None, &Default::default()),
        }
        log::info!("run ended: {:?}", outcome);
        StateEvent::SummaryShown
    }
}

fn save_game(ui: &mut impl Interface, saves: &SaveManager, session: &GameSession) {
    match saves.save(session) {
        Ok(()) => ui.timed_message(Tone::Success, "Game saved."),
        Err(e) => {
            log::warn!("save failed: {}", e);
            ui.message(Tone::Error, &format!("Could not save the game: {}", e));
        }
    }
}

fn move_menu(
    ui: &mut impl Interface,
    rng: &mut impl Rng,
    session: &mut GameSession,
) -> GameResult<()> {
    let exits = available_exits(&session.dungeon, session.player.current_room);
    for (number, (direction, _)) in exits.iter().enumerate() {
        ui.write_line(Tone::Plain, &format!("{}. {}", number + 1, direction.name()));
    }
    let pick = ui.prompt_choice("Go (0 to stay)", 0, exits.len() as u32)?;
    if pick == 0 {
        return Ok(());
    }
    let (direction, _) = exits[pick as usize - 1];
    match move_player(&mut session.player, &mut session.dungeon, direction) {
        Ok(outcome) => {
            if let Some(room) = session.dungeon.room(outcome.room) {
                let exits = available_exits(&session.dungeon, room.id);
                screens::show_room(ui, room, &exits);
            }
            if outcome.encounter != EncounterType::Empty {
                resolve_encounter(ui, rng, session)?;
            }
        }
        Err(e) => ui.message(Tone::Warning, &e.to_string()),
    }
    Ok(())
}

fn inventory_menu(ui: &mut impl Interface, session: &mut GameSession) -> GameResult<()> {
    let ids = screens::show_inventory(ui, &session.inventory);
    if ids.is_empty() {
        return Ok(());
    }
    let pick = ui.prompt_choice("Use which item (0 to close)", 0, ids.len() as u32)?;
    if pick == 0 {
        return Ok(());
    }
    match session
        .inventory
        .use_item(ids[pick as usize - 1], &mut session.player)
    {
        Ok((item, effect)) => {
            ui.timed_message(Tone::Info, &screens::describe_item_use(&item, effect))
        }
        Err(e) => ui.message(Tone::Warning, &e.to_string()),
    }
    Ok(())
}

fn shop_menu(
    ui: &mut impl Interface,
    rng: &mut impl Rng,
    session: &mut GameSession,
) -> GameResult<()> {
    let has_shop = session
        .dungeon
        .room(session.player.current_room)
        .is_some_and(|room| room.has_shop);
    if !has_shop {
        ui.message(Tone::Warning, &ActionError::NoShop.to_string());
        return Ok(());
    }

    session.visit_shop(rng);
    let Some(shop) = session.shop.as_mut() else {
        return Ok(());
    };
    let player = &mut session.player;
    let inventory = &mut session.inventory;

    loop {
        ui.header("Merchant");
        for (number, item) in shop.stock().iter().enumerate() {
            ui.write_line(
                Tone::Plain,
                &format!(
                    "{}. {} [{}] {} - {} gold",
                    number + 1,
                    item.name,
                    item.rarity.name(),
                    item.effect_text(),
                    item.cost
                ),
            );
        }
        ui.write_line(Tone::Info, &format!("You have {} gold.", player.gold));
        ui.write_line(Tone::Plain, "1. Buy  2. Sell  3. Leave");
        match ui.prompt_choice("Choose", 1, 3)? {
            1 => {
                if shop.is_empty() {
                    ui.message(Tone::Warning, "The merchant has nothing left to sell.");
                    continue;
                }
                let pick = ui.prompt_choice("Buy which (0 to cancel)", 0, shop.stock().len() as u32)?;
                if pick == 0 {
                    continue;
                }
                match shop.buy(pick as usize - 1, player, inventory) {
                    Ok(item) => ui.timed_message(
                        Tone::Success,
                        &format!("You buy the {} for {} gold.", item.name, item.cost),
                    ),
                    Err(e) => ui.message(Tone::Warning, &e.to_string()),
                }
            }
            2 => {
                let ids = screens::show_inventory(ui, inventory);
                if ids.is_empty() {
                    continue;
                }
                for (number, id) in ids.iter().enumerate() {
                    if let Some(item) = inventory.find(*id) {
                        ui.write_line(
                            Tone::Plain,
                            &format!("{}. sells for {} gold", number + 1, sell_price(item)),
                        );
                    }
                }
                let pick = ui.prompt_choice("Sell which (0 to cancel)", 0, ids.len() as u32)?;
                if pick == 0 {
                    continue;
                }
                match shop.sell(ids[pick as usize - 1], player, inventory) {
                    Ok((item, price)) => ui.timed_message(
                        Tone::Success,
                        &format!("You sell the {} for {} gold.", item.name, price),
                    ),
                    Err(e) => ui.message(Tone::Warning, &e.to_string()),
                }
            }
            _ => return Ok(()),
        }
    }
}

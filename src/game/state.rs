//! Game state machine
//!
//! `Playing` until the dice make tenzies, then `Won` until the next roll
//! starts a new game. Every command returns a fresh `Snapshot` for the UI.

use serde::{Deserialize, Serialize};

use super::dice::{DiceSet, Die, DieId, IdAllocator};
use super::faces::FaceSource;
use super::round::RoundTracker;
use super::win::is_win;
use crate::best_time::BestTimeStore;
use crate::platform::Clock;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Rolling and holding dice
    Playing,
    /// All dice held on one value; holds are frozen
    Won,
}

/// Read-only view of the game handed to the UI after each command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Dice in slot order
    pub dice: Vec<Die>,
    /// Source of truth for the game's state
    pub phase: GamePhase,
    /// Always `phase == GamePhase::Won`
    pub won: bool,
    pub roll_count: u32,
    /// Live elapsed time while playing, final duration once won
    pub elapsed_millis: u64,
    pub best_time_millis: Option<u64>,
}

impl Snapshot {
    /// Label for the roll button
    pub fn action_label(&self) -> &'static str {
        if self.won { "New Game" } else { "Roll" }
    }
}

/// Complete game state for one session
pub struct GameState {
    dice: DiceSet,
    round: RoundTracker,
    phase: GamePhase,
    ids: IdAllocator,
    faces: Box<dyn FaceSource>,
    clock: Box<dyn Clock>,
    best_time: BestTimeStore,
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("dice", &self.dice)
            .field("round", &self.round)
            .field("phase", &self.phase)
            .field("best_time", &self.best_time)
            .finish_non_exhaustive()
    }
}

impl GameState {
    /// Start a session with a freshly rolled set of dice
    pub fn new(
        mut faces: Box<dyn FaceSource>,
        clock: Box<dyn Clock>,
        best_time: BestTimeStore,
    ) -> Self {
        let mut ids = IdAllocator::new();
        let dice = DiceSet::create_initial(faces.as_mut(), &mut ids);
        let round = RoundTracker::start(clock.now_millis());
        Self {
            dice,
            round,
            phase: GamePhase::Playing,
            ids,
            faces,
            clock,
            best_time,
        }
    }

    /// Roll the unheld dice, or start a new game after a win
    pub fn roll(&mut self) -> Snapshot {
        match self.phase {
            GamePhase::Playing => {
                self.dice.roll_unheld(self.faces.as_mut(), &mut self.ids);
                self.round.record_roll();
                self.check_win();
            }
            GamePhase::Won => self.new_game(),
        }
        self.snapshot()
    }

    /// Toggle the hold on one die. Ignored after a win or for unknown IDs.
    pub fn toggle_hold(&mut self, id: DieId) -> Snapshot {
        if self.phase == GamePhase::Playing {
            if self.dice.toggle_held(id) {
                self.check_win();
            } else {
                log::debug!("Ignoring hold on stale die {:?}", id);
            }
        }
        self.snapshot()
    }

    /// Current view for the UI
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            dice: self.dice.as_slice().to_vec(),
            phase: self.phase,
            won: self.won(),
            roll_count: self.round.roll_count,
            elapsed_millis: self.round.elapsed_millis(self.clock.now_millis()),
            best_time_millis: self.best_time.best_millis(),
        }
    }

    pub fn won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    pub fn round(&self) -> &RoundTracker {
        &self.round
    }

    pub fn best_time_millis(&self) -> Option<u64> {
        self.best_time.best_millis()
    }

    /// Replace the dice mid-round, then run the win check like any command
    #[cfg(test)]
    fn set_dice(&mut self, dice: DiceSet) {
        if self.phase == GamePhase::Playing {
            self.dice = dice;
            self.check_win();
        }
    }

    fn check_win(&mut self) {
        if !is_win(&self.dice) {
            return;
        }

        self.phase = GamePhase::Won;
        if let Some(duration) = self.round.finish(self.clock.now_millis()) {
            log::info!(
                "Tenzies! {} rolls in {} ms",
                self.round.roll_count,
                duration
            );
            self.best_time.maybe_update(duration);
        }
    }

    fn new_game(&mut self) {
        self.dice = DiceSet::create_initial(self.faces.as_mut(), &mut self.ids);
        self.round.restart(self.clock.now_millis());
        self.phase = GamePhase::Playing;
        log::info!("New game started");
    }
}

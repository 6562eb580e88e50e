use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Idle -> Playing, on the first reveal or flag attempt
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Idle,
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Won or lost, no move changes the board anymore.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from the first click to win or loss.
///
/// A new game always means a new `Session`, nothing is carried over. Front ends only
/// ever see [`CellView`] and [`Status`], the session itself is not serializable.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    board: Board,
    state: GameState,
    flags_placed: CellCount,
    timer: SessionTimer,
    triggered_mine: Option<Coord2>,
}

impl Session {
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            state: Default::default(),
            flags_placed: 0,
            timer: SessionTimer::new(),
            triggered_mine: None,
        }
    }

    pub fn from_config(config: GameConfig, seed: u64) -> Result<Self> {
        RandomBoardGenerator::new(seed)
            .generate(config)
            .map(Self::from_board)
    }

    pub fn new_game(difficulty: Difficulty, seed: u64) -> Self {
        log::debug!("New {} game", difficulty.label());
        Self::from_config(difficulty.config(), seed).expect("difficulty presets are valid configs")
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.board.config()
    }

    pub fn grid_size(&self) -> Coord {
        self.board.grid_size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.timer.elapsed_seconds()
    }

    /// Whether a driver should be delivering ticks right now.
    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn status(&self) -> Status {
        Status {
            state: self.state,
            flags_remaining: self.board.mine_count().saturating_sub(self.flags_placed),
            elapsed_seconds: self.timer.elapsed_seconds(),
        }
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.board[coords].view(self.triggered_mine == Some(coords)))
    }

    /// Dispatches a click according to the current mode.
    pub fn click(&mut self, coords: Coord2, mode: ClickMode) -> Result<bool> {
        Ok(match mode {
            ClickMode::Reveal => self.reveal(coords)?.has_update(),
            ClickMode::Flag => self.toggle_flag(coords)?.has_update(),
        })
    }

    /// Opens a cell. Flagged, revealed and post-game targets are silently ignored.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() || !self.board[coords].is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }
        self.mark_started();

        if self.board[coords].has_mine {
            log::debug!("Hit mine at {:?}", coords);
            self.board.reveal_mines();
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return Ok(RevealOutcome::HitMine);
        }

        let opened = self.board.open_region(coords);
        log::debug!("Reveal at {:?} opened {} cells", coords, opened);

        Ok(if self.evaluate() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    /// Flags or unflags a hidden cell, never exceeding one flag per mine.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() || self.board[coords].revealed {
            return Ok(MarkOutcome::NoChange);
        }
        self.mark_started();

        let outcome = if self.board[coords].flagged {
            self.board[coords].flagged = false;
            self.flags_placed = self.flags_placed.saturating_sub(1);
            MarkOutcome::Unflagged
        } else if self.flags_placed < self.board.mine_count() {
            self.board[coords].flagged = true;
            self.flags_placed += 1;
            MarkOutcome::Flagged
        } else {
            log::debug!("Flag budget of {} used up", self.flags_placed);
            MarkOutcome::NoChange
        };

        // flags never decide a win, checked anyway to keep every move on the same path
        self.evaluate();
        Ok(outcome)
    }

    /// One driver tick, only counted while the game is in progress.
    pub fn tick(&mut self) -> bool {
        matches!(self.state, GameState::Playing) && self.timer.tick()
    }

    /// Ends the game as won once every safe cell is open.
    fn evaluate(&mut self) -> bool {
        if self.state.is_finished() || !self.board.is_cleared() {
            return false;
        }
        self.flags_placed = self.board.flag_mines();
        self.end_game(true);
        true
    }

    fn mark_started(&mut self) {
        if self.state.is_idle() {
            self.state = GameState::Playing;
            self.timer.start();
            log::debug!("Game started");
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        self.timer.stop();
        log::debug!(
            "Game ended {:?} after {}s",
            self.state,
            self.timer.elapsed_seconds()
        );
    }
}

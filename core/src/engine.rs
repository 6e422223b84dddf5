use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GamePhase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game: the board plus the phase and flag bookkeeping.
///
/// Only [`reveal`](Self::reveal) and [`toggle_flag`](Self::toggle_flag) mutate
/// a session. Once the phase is `Won` or `Lost` both become no-ops; starting
/// over means building a new session.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    board: Array2<Cell>,
    mine_count: CellCount,
    mines_left: i32,
    phase: GamePhase,
}

impl GameSession {
    pub fn initialize(config: GameConfig, generator: impl MineGenerator) -> Self {
        let session = Self::from_layout(generator.generate(config));
        log::info!(
            "New game {}x{} with {} mines",
            session.rows(),
            session.cols(),
            session.mine_count
        );
        session
    }

    pub fn from_layout(layout: MineLayout) -> Self {
        let board = Array2::from_shape_fn(layout.size().index2(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            let is_mine = layout.contains_mine(coords);
            Cell {
                is_mine,
                adjacent_mines: if is_mine {
                    0
                } else {
                    layout.adjacent_mine_count(coords)
                },
                ..Cell::default()
            }
        });

        Self {
            board,
            mine_count: layout.mine_count(),
            mines_left: i32::from(layout.mine_count()),
            phase: GamePhase::Playing,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        board_size(&self.board)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Mine count minus placed flags. Not clamped: over-flagging drives it negative.
    pub fn mines_left(&self) -> i32 {
        self.mines_left
    }

    pub fn board(&self) -> &Array2<Cell> {
        &self.board
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.board.get(coords.index2()).copied()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        coords.within(self.size())
    }

    pub fn revealed_count(&self) -> usize {
        self.board.iter().filter(|cell| cell.is_revealed).count()
    }

    pub fn flagged_count(&self) -> usize {
        self.board.iter().filter(|cell| cell.is_flagged).count()
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.accepts_moves_at(coords) {
            return RevealOutcome::NoChange;
        }

        let cell = self.board[coords.index2()];
        if !cell.can_reveal() {
            return RevealOutcome::NoChange;
        }

        self.board[coords.index2()].is_revealed = true;

        if cell.is_mine {
            self.lose(coords);
            return RevealOutcome::HitMine;
        }

        if cell.adjacent_mines == 0 {
            self.flood_fill(coords);
        }

        if self.check_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        if !self.accepts_moves_at(coords) {
            return FlagOutcome::NoChange;
        }

        let cell = &mut self.board[coords.index2()];
        if cell.is_revealed {
            return FlagOutcome::NoChange;
        }

        cell.is_flagged = !cell.is_flagged;
        self.mines_left = if cell.is_flagged {
            self.mines_left.saturating_sub(1)
        } else {
            self.mines_left.saturating_add(1)
        };

        self.check_win();
        FlagOutcome::Changed
    }

    /// Declares the game won once every cell without a mine is revealed.
    ///
    /// A lost game stays lost and reports `false`.
    pub fn check_win(&mut self) -> bool {
        if self.phase.is_playing() && self.board.iter().all(|cell| cell.is_mine || cell.is_revealed)
        {
            self.phase = GamePhase::Won;
            log::info!("Game won, {} cells revealed", self.revealed_count());
        }
        matches!(self.phase, GamePhase::Won)
    }

    pub fn snapshot(&self) -> SavedState {
        let (rows, cols) = self.size();
        SavedState {
            board_data: self.board.outer_iter().map(|row| row.to_vec()).collect(),
            game_over: self.phase.is_finished(),
            won: matches!(self.phase, GamePhase::Won),
            lost: matches!(self.phase, GamePhase::Lost),
            mines_left: self.mines_left,
            cols,
            rows,
            mines: self.mine_count,
        }
    }

    /// Rebuilds a session from a saved state, checking only that the board is
    /// `rows` rows of `cols` cells.
    pub fn restore(state: SavedState) -> Result<Self> {
        if state.rows == 0 || state.cols == 0 {
            return Err(GameError::InvalidDimensions);
        }

        let shape = (usize::from(state.rows), usize::from(state.cols));
        if state.board_data.len() != shape.0
            || state.board_data.iter().any(|row| row.len() != shape.1)
        {
            return Err(GameError::InvalidBoardShape);
        }

        let phase = match (state.lost, state.won) {
            (true, _) => GamePhase::Lost,
            (false, true) => GamePhase::Won,
            (false, false) => {
                if state.game_over {
                    log::warn!("Saved state is over but neither won nor lost, resuming play");
                }
                GamePhase::Playing
            }
        };

        let cells = state.board_data.into_iter().flatten().collect();
        let board =
            Array2::from_shape_vec(shape, cells).map_err(|_| GameError::InvalidBoardShape)?;

        Ok(Self {
            board,
            mine_count: state.mines,
            mines_left: state.mines_left,
            phase,
        })
    }

    fn accepts_moves_at(&self, coords: Coord2) -> bool {
        if !self.phase.is_playing() {
            log::debug!("Ignoring move at {:?}, game is {:?}", coords, self.phase);
            return false;
        }
        if !self.contains(coords) {
            log::debug!("Ignoring move at {:?}, outside {:?}", coords, self.size());
            return false;
        }
        true
    }

    fn lose(&mut self, coords: Coord2) {
        self.phase = GamePhase::Lost;
        for cell in self.board.iter_mut().filter(|cell| cell.is_mine) {
            cell.is_revealed = true;
        }
        log::info!("Game lost, mine hit at {:?}", coords);
    }

    /// Opens the zero region around `origin` plus its numbered border.
    ///
    /// The "already revealed" guard is the visited set: each cell opens at most once.
    fn flood_fill(&mut self, origin: Coord2) {
        let size = self.size();
        let mut to_visit: VecDeque<Coord2> = neighbors(origin, size).collect();
        let mut opened = 0usize;

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = &mut self.board[visit_coords.index2()];
            if !cell.can_reveal() || cell.is_mine {
                continue;
            }

            cell.is_revealed = true;
            opened += 1;

            if cell.adjacent_mines == 0 {
                let board = &self.board;
                to_visit.extend(
                    neighbors(visit_coords, size).filter(|&pos| board[pos.index2()].can_reveal()),
                );
            }
        }

        log::debug!("Flood fill from {:?} opened {} cells", origin, opened);
    }
}

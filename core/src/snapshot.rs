use serde::{Deserialize, Serialize};

use crate::*;

/// Full, lossless persisted form of a [`GameSession`].
///
/// Field names and order follow the stored JSON layout:
/// `{ boardData, gameOver, won, lost, minesLeft, cols, rows, mines }`, with
/// `boardData` holding `rows` arrays of `cols` cells each.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedState {
    pub board_data: Vec<Vec<Cell>>,
    pub game_over: bool,
    pub won: bool,
    pub lost: bool,
    pub mines_left: i32,
    pub cols: Coord,
    pub rows: Coord,
    pub mines: CellCount,
}

impl SavedState {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl From<&GameSession> for SavedState {
    fn from(session: &GameSession) -> Self {
        session.snapshot()
    }
}

impl TryFrom<SavedState> for GameSession {
    type Error = GameError;

    fn try_from(state: SavedState) -> Result<Self> {
        GameSession::restore(state)
    }
}

use serde::{Deserialize, Serialize};

/// One board position as tracked by the engine.
///
/// `adjacent_mines` is only meaningful for cells without a mine and is fixed
/// once the board has been generated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    /// Whether a reveal attempt would open this cell.
    pub const fn can_reveal(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }
}

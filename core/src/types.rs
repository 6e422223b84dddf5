use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`, both zero-based.
pub type Coord2 = (Coord, Coord);

pub trait CoordExt {
    /// Index into a row-major `Array2`.
    fn index2(self) -> [usize; 2];

    fn within(self, size: Coord2) -> bool;
}

impl CoordExt for Coord2 {
    fn index2(self) -> [usize; 2] {
        [usize::from(self.0), usize::from(self.1)]
    }

    fn within(self, (rows, cols): Coord2) -> bool {
        self.0 < rows && self.1 < cols
    }
}

/// Number of cells on a `rows x cols` board. Never overflows: 255 * 255 fits.
pub const fn area((rows, cols): Coord2) -> CellCount {
    rows as CellCount * cols as CellCount
}

/// Size of a board as `(rows, cols)`.
///
/// Boards are built from `Coord2` sizes, so both axes always fit.
pub(crate) fn board_size<T>(board: &Array2<T>) -> Coord2 {
    let (rows, cols) = board.dim();
    (
        rows.try_into().unwrap_or(Coord::MAX),
        cols.try_into().unwrap_or(Coord::MAX),
    )
}

/// In-bounds cells of the 8-neighborhood around `center`, row by row.
pub fn neighbors(center: Coord2, size: Coord2) -> impl Iterator<Item = Coord2> {
    let (row, col) = center;
    let (rows, cols) = size;
    let last_row = rows.saturating_sub(1).min(row.saturating_add(1));
    let last_col = cols.saturating_sub(1).min(col.saturating_add(1));

    (row.saturating_sub(1)..=last_row)
        .flat_map(move |r| (col.saturating_sub(1)..=last_col).map(move |c| (r, c)))
        .filter(move |&pos| pos != center && pos.within(size))
}

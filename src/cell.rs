use std::fmt;

pub const MINE_GLYPH: char = 'M';
pub const HIDDEN_GLYPH: char = 'X';

/// One square of the board.
///
/// Mine status and adjacency are settled while the board is built; after that
/// the only change a cell ever sees is going from hidden to revealed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    col: usize,
    is_mine: bool,
    adjacent: u8,
    revealed: bool,
}

impl Cell {
    pub(crate) fn new(row: usize, col: usize) -> Self {
        Self { row, col, is_mine: false, adjacent: 0, revealed: false }
    }

    pub(crate) fn mine(row: usize, col: usize) -> Self {
        Self { is_mine: true, ..Self::new(row, col) }
    }

    pub fn row(&self) -> usize { self.row }
    pub fn col(&self) -> usize { self.col }
    pub fn is_mine(&self) -> bool { self.is_mine }
    pub fn is_revealed(&self) -> bool { self.revealed }

    /// Number of mines among the Moore neighbors. Always 0 for a mine.
    pub fn adjacent(&self) -> u8 { self.adjacent }

    pub fn has_adjacent_mines(&self) -> bool { self.adjacent != 0 }

    pub(crate) fn reveal(&mut self) { self.revealed = true; }

    pub(crate) fn increment_adjacency(&mut self) {
        debug_assert!(!self.is_mine, "adjacency is not tracked on mines");
        self.adjacent += 1;
    }

    /// Character shown for this cell. `reveal_all` uncovers everything, mines included.
    pub fn glyph(&self, reveal_all: bool) -> char {
        if !(self.revealed || reveal_all) { return HIDDEN_GLYPH; }
        if self.is_mine { return MINE_GLYPH; }
        char::from_digit(self.adjacent as u32, 10).unwrap_or('?')
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph(false))
    }
}

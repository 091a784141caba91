use std::fmt;

use rand::Rng;
use tracing::{debug, trace};

use crate::cell::Cell;
use crate::error::BoardError;

/// Smallest side length a board may have.
pub const MIN_SIZE: usize = 2;
/// Largest side length a board may have. Keeps the grid printable and within
/// what the full-screen view can lay out.
pub const MAX_SIZE: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The target was already uncovered; nothing changed.
    AlreadyRevealed,
    /// Safe cells were uncovered and some are still hidden.
    Continue,
    /// The last hidden safe cell was uncovered.
    Win,
    /// A mine was uncovered.
    GameOver,
}

impl RevealOutcome {
    /// `Win` and `GameOver` end the game.
    pub fn is_terminal(self) -> bool {
        matches!(self, RevealOutcome::Win | RevealOutcome::GameOver)
    }
}

/// Most mines a board of the given side length can hold: one cell always stays safe.
pub fn max_mines(size: usize) -> usize {
    size.checked_mul(size).map_or(usize::MAX, |cells| cells.saturating_sub(1))
}

/// A square minefield.
///
/// Mines are laid out once, during construction, and never move. Cells live in a
/// row-major arena and are addressed by `(row, col)`.
pub struct Board {
    size: usize,
    mines: usize,
    cells: Vec<Cell>,
    revealed: usize,
}

impl Board {
    /// Builds a board with mines drawn from the thread-local RNG.
    pub fn new(size: usize, mines: usize) -> Result<Self, BoardError> {
        Self::with_rng(size, mines, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(size: usize, mines: usize, rng: &mut R) -> Result<Self, BoardError> {
        let mut board = Self::empty(size, mines)?;
        board.place_mines(rng);
        debug!(size, mines, "board ready");
        Ok(board)
    }

    /// Builds a board with mines at exactly the given positions.
    pub fn with_mines<I>(size: usize, positions: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let positions: Vec<(usize, usize)> = positions.into_iter().collect();
        let mut board = Self::empty(size, positions.len())?;
        for &(row, col) in &positions {
            let i = board.index(row, col)?;
            if board.cells[i].is_mine() { return Err(BoardError::DuplicateMine { row, col }); }
            board.place_mine_at(row, col);
        }
        debug!(size, mines = positions.len(), "board ready with fixed mines");
        Ok(board)
    }

    fn empty(size: usize, mines: usize) -> Result<Self, BoardError> {
        if size < MIN_SIZE { return Err(BoardError::InvalidSize(size)); }
        if size > MAX_SIZE { return Err(BoardError::TooLarge(size)); }
        let max = max_mines(size);
        if mines > max { return Err(BoardError::TooManyMines { size, mines, max }); }

        let cells = (0..size * size).map(|i| Cell::new(i / size, i % size)).collect();
        Ok(Self { size, mines, cells, revealed: 0 })
    }

    // Rejection sampling: redraw until an empty square comes up. Slows down as the
    // board fills but always terminates since at least one cell stays safe.
    fn place_mines<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for _ in 0..self.mines {
            let (row, col) = loop {
                let row = rng.gen_range(0..self.size);
                let col = rng.gen_range(0..self.size);
                if !self.cells[idx(self.size, row, col)].is_mine() { break (row, col); }
            };
            self.place_mine_at(row, col);
        }
    }

    fn place_mine_at(&mut self, row: usize, col: usize) {
        trace!(row, col, "mine");
        self.cells[idx(self.size, row, col)] = Cell::mine(row, col);
        for (nr, nc) in neighbors(self.size, row, col) {
            let cell = &mut self.cells[idx(self.size, nr, nc)];
            if !cell.is_mine() { cell.increment_adjacency(); }
        }
    }

    /// Uncovers `(row, col)`, flood-filling outward from cells with no adjacent mines.
    ///
    /// Hitting a mine stops the fill at once. Cells uncovered earlier in the same
    /// call stay uncovered.
    pub fn reveal(&mut self, row: usize, col: usize) -> Result<RevealOutcome, BoardError> {
        let start = self.index(row, col)?;
        if self.cells[start].is_revealed() { return Ok(RevealOutcome::AlreadyRevealed); }

        let mut stack = vec![start];
        while let Some(i) = stack.pop() {
            // may have been reached through another branch of this fill
            if self.cells[i].is_revealed() { continue; }
            self.cells[i].reveal();
            self.revealed += 1;

            if self.cells[i].is_mine() {
                debug!(row, col, revealed = self.revealed, "hit a mine");
                return Ok(RevealOutcome::GameOver);
            }
            if self.cells[i].has_adjacent_mines() { continue; }

            let (cr, cc) = (self.cells[i].row(), self.cells[i].col());
            for (nr, nc) in neighbors(self.size, cr, cc) {
                let ni = idx(self.size, nr, nc);
                if !self.cells[ni].is_mine() && !self.cells[ni].is_revealed() {
                    stack.push(ni);
                }
            }
        }

        let outcome = if self.revealed == self.safe_cells() { RevealOutcome::Win } else { RevealOutcome::Continue };
        debug!(row, col, revealed = self.revealed, ?outcome, "reveal");
        Ok(outcome)
    }

    /// In-bounds cells at Chebyshev distance 1 from `(row, col)`.
    pub fn neighbors_to(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        neighbors(self.size, row, col)
    }

    /// One line per row, one glyph per cell, no trailing newline.
    pub fn render(&self, reveal_all: bool) -> String {
        let mut s = String::with_capacity(self.size * (self.size + 1));
        for (i, row) in self.cells.chunks(self.size).enumerate() {
            if i > 0 { s.push('\n'); }
            s.extend(row.iter().map(|c| c.glyph(reveal_all)));
        }
        s
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, BoardError> {
        if row >= self.size || col >= self.size {
            return Err(BoardError::OutOfRange { row, col, size: self.size });
        }
        Ok(idx(self.size, row, col))
    }
}

fn idx(size: usize, row: usize, col: usize) -> usize { row * size + col }

fn neighbors(size: usize, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    let mut out = Vec::with_capacity(8);
    for nr in row.saturating_sub(1)..=(row + 1).min(size - 1) {
        for nc in col.saturating_sub(1)..=(col + 1).min(size - 1) {
            if nr == row && nc == col { continue; }
            out.push((nr, nc));
        }
    }
    out.into_iter()
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

impl Board {
    pub fn size(&self) -> usize { self.size }
    pub fn mines(&self) -> usize { self.mines }
    pub fn revealed_count(&self) -> usize { self.revealed }
    /// Revealed count needed to win.
    pub fn safe_cells(&self) -> usize { self.size * self.size - self.mines }
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(row, col).ok().map(|i| &self.cells[i])
    }
    pub fn cells(&self) -> impl Iterator<Item = &Cell> { self.cells.iter() }
}

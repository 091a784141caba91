use thiserror::Error;

use crate::engine::{MAX_SIZE, MIN_SIZE};

/// Errors raised by [`Board`](crate::engine::Board) construction and reveals.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size must be at least {min}, got {0}", min = MIN_SIZE)]
    InvalidSize(usize),
    #[error("board size must be at most {max}, got {0}", max = MAX_SIZE)]
    TooLarge(usize),
    #[error("a {size}x{size} board holds at most {max} mines, got {mines}")]
    TooManyMines { size: usize, mines: usize, max: usize },
    #[error("({row}, {col}) is outside the {size}x{size} board")]
    OutOfRange { row: usize, col: usize, size: usize },
    #[error("mine at ({row}, {col}) placed twice")]
    DuplicateMine { row: usize, col: usize },
}

/// Rejected player input. The message is what the player gets to see.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("You need to type a positive integer (e.g. 10):")]
    NotANumber,
    #[error("The board size needs to be at least {min}.", min = MIN_SIZE)]
    SizeTooSmall,
    #[error("The board size can be at most {max}.", max = MAX_SIZE)]
    SizeTooLarge,
    #[error("You need fewer mines than spaces on the board!")]
    TooManyMines,
    #[error("Please type in a valid row,column pair")]
    BadPosition,
    #[error("Your values must be on the board")]
    OffBoard,
    #[error("Please answer y or n")]
    BadAnswer,
}

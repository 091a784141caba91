//! Line-oriented text driver: asks for board parameters, reads `row,column`
//! guesses and reports outcomes until the player stops.

use std::io::{self, BufRead, Write};

use rand::Rng;
use tracing::{debug, info};

use crate::engine::{max_mines, Board, RevealOutcome, MAX_SIZE, MIN_SIZE};
use crate::error::InputError;

/// Board parameters fixed on the command line. `None` means ask every round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub size: Option<usize>,
    pub mines: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundEnd {
    Won,
    Lost,
}

fn is_digits(line: &str) -> bool {
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}

fn parse_number(line: &str) -> Result<usize, InputError> {
    let line = line.trim();
    if !is_digits(line) { return Err(InputError::NotANumber); }
    line.parse().map_err(|_| InputError::NotANumber)
}

pub fn parse_size(line: &str) -> Result<usize, InputError> {
    let digits = line.trim();
    if !is_digits(digits) { return Err(InputError::NotANumber); }
    // digit runs too long for usize are still sizes, just far too large ones
    let size = digits.parse::<usize>().unwrap_or(usize::MAX);
    if size < MIN_SIZE { return Err(InputError::SizeTooSmall); }
    if size > MAX_SIZE { return Err(InputError::SizeTooLarge); }
    Ok(size)
}

pub fn parse_mines(line: &str, size: usize) -> Result<usize, InputError> {
    let mines = parse_number(line)?;
    if mines > max_mines(size) { return Err(InputError::TooManyMines); }
    Ok(mines)
}

/// Parses a 1-based `row,column` pair into 0-based board coordinates.
pub fn parse_position(line: &str, size: usize) -> Result<(usize, usize), InputError> {
    let (row, col) = line.trim().split_once(',').ok_or(InputError::BadPosition)?;
    let row = parse_number(row).map_err(|_| InputError::BadPosition)?;
    let col = parse_number(col).map_err(|_| InputError::BadPosition)?;
    if row == 0 || col == 0 || row > size || col > size { return Err(InputError::OffBoard); }
    Ok((row - 1, col - 1))
}

pub fn parse_answer(line: &str) -> Result<bool, InputError> {
    match line.trim() {
        "y" => Ok(true),
        "n" => Ok(false),
        _ => Err(InputError::BadAnswer),
    }
}

pub struct Prompt<R, W> {
    input: R,
    output: W,
    line: String,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output, line: String::new() }
    }

    pub fn into_output(self) -> W { self.output }

    fn read_line(&mut self) -> io::Result<&str> {
        self.output.flush()?;
        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(self.line.trim_end_matches(['\n', '\r']))
    }

    /// Prints `question` and keeps reading until `parse` accepts a line.
    fn ask<T>(&mut self, question: &str, parse: impl Fn(&str) -> Result<T, InputError>) -> io::Result<T> {
        writeln!(self.output, "{}", question)?;
        loop {
            let line = self.read_line()?;
            match parse(line) {
                Ok(v) => return Ok(v),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    pub fn board_size(&mut self) -> io::Result<usize> {
        self.ask("Please enter the size of the board you want to play:", parse_size)
    }

    pub fn mine_count(&mut self, size: usize) -> io::Result<usize> {
        self.ask("How many mines do you want to have?", |l| parse_mines(l, size))
    }

    pub fn position(&mut self, size: usize) -> io::Result<(usize, usize)> {
        self.ask("Type a row and a column to reveal (row,column):", |l| parse_position(l, size))
    }

    /// Repeats the question itself until the answer is `y` or `n`.
    pub fn play_again(&mut self) -> io::Result<bool> {
        loop {
            writeln!(self.output, "Would you like to play again? (y/n)")?;
            if let Ok(again) = parse_answer(self.read_line()?) { return Ok(again); }
        }
    }

    fn show(&mut self, board: &Board, reveal_all: bool) -> io::Result<()> {
        let border = "-".repeat(board.size());
        writeln!(self.output, "\n{}\n{}\n{}\n", border, board.render(reveal_all), border)
    }

    /// Plays one board until it is won or lost.
    pub fn play_round(&mut self, board: &mut Board) -> io::Result<RoundEnd> {
        loop {
            self.show(board, false)?;
            let (row, col) = self.position(board.size())?;
            let outcome = board.reveal(row, col).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            match outcome {
                RevealOutcome::AlreadyRevealed => writeln!(self.output, "You've already looked there!")?,
                RevealOutcome::Continue => {}
                RevealOutcome::GameOver => {
                    writeln!(self.output, "You hit a mine! Game over!")?;
                    writeln!(self.output, "{}", board.render(true))?;
                    return Ok(RoundEnd::Lost);
                }
                RevealOutcome::Win => {
                    writeln!(self.output, "Congratulations! You win!")?;
                    writeln!(self.output, "{}", board.render(true))?;
                    return Ok(RoundEnd::Won);
                }
            }
        }
    }

    /// Runs rounds until the player declines another one or the input ends.
    pub fn run<G: Rng + ?Sized>(&mut self, settings: Settings, rng: &mut G) -> io::Result<()> {
        writeln!(self.output, "Welcome to Minesweeper!")?;
        match self.session(settings, rng) {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                debug!("input closed, leaving");
                writeln!(self.output)?;
                Ok(())
            }
            other => other,
        }
    }

    fn session<G: Rng + ?Sized>(&mut self, settings: Settings, rng: &mut G) -> io::Result<()> {
        loop {
            let size = match settings.size {
                Some(size) => size,
                None => self.board_size()?,
            };
            let mines = match settings.mines {
                Some(mines) if mines <= max_mines(size) => mines,
                Some(_) => {
                    writeln!(self.output, "{}", InputError::TooManyMines)?;
                    self.mine_count(size)?
                }
                None => self.mine_count(size)?,
            };
            let mut board = Board::with_rng(size, mines, rng).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            let end = self.play_round(&mut board)?;
            info!(size, mines, ?end, revealed = board.revealed_count(), "round finished");
            if !self.play_again()? { return Ok(()); }
        }
    }
}

use std::io;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::Rng;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;
use tracing::debug;

use crate::cell::{Cell, HIDDEN_GLYPH, MINE_GLYPH};
use crate::engine::{Board, RevealOutcome};

struct Game {
    board: Board,
    cursor: (usize, usize),
    last: Option<RevealOutcome>,
}

impl Game {
    fn finished(&self) -> bool { self.last.is_some_and(RevealOutcome::is_terminal) }

    fn reveal(&mut self, row: usize, col: usize) {
        if self.finished() { return; }
        match self.board.reveal(row, col) {
            Ok(outcome) => self.last = Some(outcome),
            Err(e) => debug!(%e, "ignored reveal"),
        }
    }

    fn move_cursor(&mut self, drow: isize, dcol: isize) {
        let max = self.board.size() - 1;
        self.cursor.0 = self.cursor.0.saturating_add_signed(drow).min(max);
        self.cursor.1 = self.cursor.1.saturating_add_signed(dcol).min(max);
    }
}

pub fn run_tui<R: Rng + ?Sized>(size: usize, mines: usize, rng: &mut R) -> io::Result<()> {
    let new_board = |rng: &mut R| Board::with_rng(size, mines, rng).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e));
    let mut game = Game { board: new_board(&mut *rng)?, cursor: (0, 0), last: None };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let _guard = TermGuard;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let poll_rate = Duration::from_millis(250);
    let mut last_inner_board = Rect::default();
    let res = loop {
        terminal.draw(|f| { last_inner_board = ui(f, &game); })?;

        if !event::poll(poll_rate)? { continue; }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break Ok(()),
                KeyCode::Char('h') | KeyCode::Left => game.move_cursor(0, -1),
                KeyCode::Char('l') | KeyCode::Right => game.move_cursor(0, 1),
                KeyCode::Char('k') | KeyCode::Up => game.move_cursor(-1, 0),
                KeyCode::Char('j') | KeyCode::Down => game.move_cursor(1, 0),
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') => {
                    let (row, col) = game.cursor;
                    game.reveal(row, col);
                }
                KeyCode::Char('n') => game = Game { board: new_board(&mut *rng)?, cursor: game.cursor, last: None },
                _ => {}
            },
            Event::Mouse(m) => {
                if let MouseEventKind::Down(MouseButton::Left) = m.kind {
                    if let Some((row, col)) = pos_to_cell(m.column, m.row, last_inner_board, grid_side(&game.board)) {
                        game.cursor = (row, col);
                        game.reveal(row, col);
                    }
                }
            }
            _ => {}
        }
    };

    terminal.show_cursor()?;
    res
}

fn ui(f: &mut ratatui::Frame, game: &Game) -> Rect {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.size());

    let status = match game.last {
        Some(RevealOutcome::GameOver) => "You hit a mine! Game over. n for a new board, q to quit",
        Some(RevealOutcome::Win) => "Congratulations! You win! n for a new board, q to quit",
        Some(RevealOutcome::AlreadyRevealed) => "You've already looked there!",
        _ => "Arrows/HJKL move, Enter/Space or left click reveals, n new board, q quit",
    };
    let header = Paragraph::new(status)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Minesweeper"));
    f.render_widget(header, root[0]);

    let area = centered_grid_area(root[1], grid_side(&game.board));
    draw_board(f, game, area);

    let board = &game.board;
    let footer = Paragraph::new(format!(
        "Size: {0}x{0}  Mines: {1}  Revealed: {2}/{3}",
        board.size(), board.mines(), board.revealed_count(), board.safe_cells()
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, root[2]);
    Block::default().borders(Borders::ALL).inner(area)
}

fn grid_side(board: &Board) -> u16 { u16::try_from(board.size()).unwrap_or(u16::MAX) }

// two columns per cell, plus the border
fn centered_grid_area(parent: Rect, size: u16) -> Rect {
    let grid_w = size.saturating_mul(2).saturating_add(2);
    let grid_h = size.saturating_add(2);
    let x = parent.x.saturating_add(parent.width.saturating_sub(grid_w) / 2);
    let y = parent.y.saturating_add(parent.height.saturating_sub(grid_h) / 2);
    Rect { x, y, width: grid_w.min(parent.width), height: grid_h.min(parent.height) }
}

fn draw_board(f: &mut ratatui::Frame, game: &Game, area: Rect) {
    let reveal_all = game.finished();
    let size = game.board.size();
    let mut lines: Vec<Line> = Vec::with_capacity(size);
    for row in 0..size {
        let spans: Vec<Span> = (0..size)
            .filter_map(|col| game.board.cell(row, col).map(|c| (col, c)))
            .map(|(col, c)| {
                let mut style = cell_style(c, reveal_all);
                if game.cursor == (row, col) { style = style.add_modifier(Modifier::REVERSED); }
                Span::styled(format!("{} ", c.glyph(reveal_all)), style)
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let board_block = Block::default().borders(Borders::ALL).title("Board");
    f.render_widget(Paragraph::new(lines).block(board_block), area);
}

fn cell_style(c: &Cell, reveal_all: bool) -> Style {
    match c.glyph(reveal_all) {
        MINE_GLYPH => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        HIDDEN_GLYPH => Style::default().fg(Color::DarkGray),
        _ => number_style(c.adjacent()),
    }
}

fn number_style(n: u8) -> Style {
    match n {
        0 => Style::default().fg(Color::Gray),
        1 => Style::default().fg(Color::Blue),
        2 => Style::default().fg(Color::Green),
        3 => Style::default().fg(Color::Red),
        4 => Style::default().fg(Color::Magenta),
        5 => Style::default().fg(Color::Yellow),
        6 => Style::default().fg(Color::Cyan),
        _ => Style::default().fg(Color::White),
    }
}

fn pos_to_cell(mx: u16, my: u16, inner: Rect, size: u16) -> Option<(usize, usize)> {
    if mx < inner.x || my < inner.y { return None; }
    let col = (mx - inner.x) / 2;
    let row = my - inner.y;
    if col < size && row < size { Some((row as usize, col as usize)) } else { None }
}

struct TermGuard;
impl Drop for TermGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MAX_SIZE;

    #[test]
    fn largest_board_fits_the_grid_math() {
        let parent = Rect { x: 0, y: 0, width: 80, height: 24 };
        let side = u16::try_from(MAX_SIZE).unwrap();
        let area = centered_grid_area(parent, side);
        assert_eq!(area, parent);
        assert_eq!(centered_grid_area(parent, u16::MAX).width, 80);
    }

    #[test]
    fn grid_is_centered() {
        let parent = Rect { x: 0, y: 3, width: 40, height: 20 };
        assert_eq!(centered_grid_area(parent, 9), Rect { x: 10, y: 7, width: 20, height: 11 });
    }

    #[test]
    fn clicks_map_to_cells() {
        let inner = Rect { x: 11, y: 8, width: 18, height: 9 };
        assert_eq!(pos_to_cell(11, 8, inner, 9), Some((0, 0)));
        assert_eq!(pos_to_cell(14, 10, inner, 9), Some((2, 1)));
        assert_eq!(pos_to_cell(10, 8, inner, 9), None);
        assert_eq!(pos_to_cell(29, 8, inner, 9), None);
    }
}

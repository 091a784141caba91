pub mod cell;
pub mod engine;
pub mod error;
pub mod prompt;
pub mod tui;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use minefield::engine::max_mines;
use minefield::error::InputError;
use minefield::prompt::{self, Prompt, Settings};
use minefield::tui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const TUI_SIZE: usize = 9;
const TUI_MINES: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "minefield", about = "Terminal Minesweeper on a square board", version)]
struct Args {
    /// Launch the full-screen UI instead of the text prompts
    #[arg(long)]
    tui: bool,
    /// Side length of the board (asked for each round when omitted)
    #[arg(long, value_parser = size_arg)]
    size: Option<usize>,
    /// Number of mines (asked for each round when omitted)
    #[arg(long)]
    mines: Option<usize>,
    /// Seed for reproducible mine layouts
    #[arg(long)]
    seed: Option<u64>,
}

fn size_arg(s: &str) -> Result<usize, String> {
    prompt::parse_size(s).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let fixed_size = if args.tui { Some(args.size.unwrap_or(TUI_SIZE)) } else { args.size };
    if let (Some(size), Some(mines)) = (fixed_size, args.mines) {
        if mines > max_mines(size) {
            eprintln!("{}", InputError::TooManyMines);
            return ExitCode::FAILURE;
        }
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    debug!(?args, "starting");

    let res = if args.tui {
        let size = args.size.unwrap_or(TUI_SIZE);
        let mines = args.mines.unwrap_or_else(|| TUI_MINES.min(max_mines(size)));
        tui::run_tui(size, mines, &mut rng)
    } else {
        let settings = Settings { size: args.size, mines: args.mines };
        Prompt::new(io::stdin().lock(), io::stdout().lock()).run(settings, &mut rng)
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

use minefield::engine::Board;
use minefield::error::InputError;
use minefield::prompt::{parse_answer, parse_mines, parse_position, parse_size, Prompt, RoundEnd, Settings};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn run(script: &str, settings: Settings) -> String {
    let mut prompt = Prompt::new(script.as_bytes(), Vec::new());
    prompt.run(settings, &mut StdRng::seed_from_u64(1)).expect("session");
    String::from_utf8(prompt.into_output()).unwrap()
}

#[test]
fn parses_sizes() {
    assert_eq!(parse_size("10"), Ok(10));
    assert_eq!(parse_size(" 2 "), Ok(2));
    assert_eq!(parse_size("1"), Err(InputError::SizeTooSmall));
    assert_eq!(parse_size(""), Err(InputError::NotANumber));
    assert_eq!(parse_size("-3"), Err(InputError::NotANumber));
    assert_eq!(parse_size("+3"), Err(InputError::NotANumber));
    assert_eq!(parse_size("ten"), Err(InputError::NotANumber));
    assert_eq!(parse_size("100"), Ok(100));
    assert_eq!(parse_size("101"), Err(InputError::SizeTooLarge));
    assert_eq!(parse_size("4294967296"), Err(InputError::SizeTooLarge));
    assert_eq!(parse_size("99999999999999999999999999"), Err(InputError::SizeTooLarge));
}

#[test]
fn parses_mines() {
    assert_eq!(parse_mines("0", 3), Ok(0));
    assert_eq!(parse_mines("8", 3), Ok(8));
    assert_eq!(parse_mines("9", 3), Err(InputError::TooManyMines));
    assert_eq!(parse_mines("x", 3), Err(InputError::NotANumber));
}

#[test]
fn parses_positions() {
    assert_eq!(parse_position("2,3", 3), Ok((1, 2)));
    assert_eq!(parse_position("1, 1", 2), Ok((0, 0)));
    assert_eq!(parse_position("0,1", 3), Err(InputError::OffBoard));
    assert_eq!(parse_position("4,1", 3), Err(InputError::OffBoard));
    assert_eq!(parse_position("1 1", 3), Err(InputError::BadPosition));
    assert_eq!(parse_position("1,", 3), Err(InputError::BadPosition));
    assert_eq!(parse_position("a,b", 3), Err(InputError::BadPosition));
}

#[test]
fn parses_answers() {
    assert_eq!(parse_answer("y\n"), Ok(true));
    assert_eq!(parse_answer("n"), Ok(false));
    assert_eq!(parse_answer("yes"), Err(InputError::BadAnswer));
}

#[test]
fn round_with_repeat_and_win() {
    let mut board = Board::with_mines(3, [(0, 0)]).unwrap();
    let mut prompt = Prompt::new("1,2\n1,2\n3,3\n".as_bytes(), Vec::new());
    assert_eq!(prompt.play_round(&mut board).unwrap(), RoundEnd::Won);
    let out = String::from_utf8(prompt.into_output()).unwrap();
    assert!(out.contains("---\nXXX\nXXX\nXXX\n---"));
    assert!(out.contains("You've already looked there!"));
    assert!(out.contains("Congratulations! You win!\nM10\n110\n000"));
}

#[test]
fn round_lost_on_mine() {
    let mut board = Board::with_mines(3, [(0, 0)]).unwrap();
    let mut prompt = Prompt::new("1,1\n".as_bytes(), Vec::new());
    assert_eq!(prompt.play_round(&mut board).unwrap(), RoundEnd::Lost);
    let out = String::from_utf8(prompt.into_output()).unwrap();
    assert!(out.contains("You hit a mine! Game over!\nM10\n110\n000"));
}

#[test]
fn reprompts_on_bad_input() {
    let out = run("abc\n1\n2\n4\n0\n3,1\n1 1\n1, 2\nmaybe\nn\n", Settings::default());
    assert!(out.starts_with("Welcome to Minesweeper!"));
    for msg in [
        "You need to type a positive integer (e.g. 10):",
        "The board size needs to be at least 2.",
        "You need fewer mines than spaces on the board!",
        "Your values must be on the board",
        "Please type in a valid row,column pair",
        "Congratulations! You win!",
    ] {
        assert!(out.contains(msg), "missing {:?} in {}", msg, out);
    }
}

#[test]
fn play_again_repeats_question() {
    let out = run("2\n0\n1,1\nmaybe\nyes\nn\n", Settings::default());
    assert_eq!(out.matches("Would you like to play again? (y/n)").count(), 3);
    assert!(!out.contains("Please answer y or n"));
}

#[test]
fn huge_size_is_asked_again() {
    let out = run("4294967296\n2\n0\n1,1\nn\n", Settings::default());
    assert!(out.contains("The board size can be at most 100."));
    assert!(out.contains("Congratulations! You win!"));
}

#[test]
fn plays_again_with_fixed_settings() {
    let out = run("1,1\ny\n2,2\nn\n", Settings { size: Some(2), mines: Some(0) });
    assert_eq!(out.matches("Congratulations! You win!").count(), 2);
    assert!(!out.contains("Please enter the size"));
}

#[test]
fn fixed_mines_too_many_for_prompted_size() {
    let out = run("2\n0\n1,1\nn\n", Settings { size: None, mines: Some(20) });
    assert!(out.contains("You need fewer mines than spaces on the board!"));
    assert!(out.contains("Congratulations! You win!"));
}

#[test]
fn closed_input_ends_quietly() {
    let out = run("", Settings::default());
    assert!(out.starts_with("Welcome to Minesweeper!"));
    let out = run("3\n2\n", Settings::default());
    assert!(out.contains("Type a row and a column"));
}

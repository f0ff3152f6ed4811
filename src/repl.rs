//! Line-based driver: prints the board, asks for a column, repeats until the
//! game is decided or input runs out.

use std::io::{self, BufRead, Write};

use tracing::{info, warn};

use crate::game::{GameState, Outcome, COLS, INSTRUCTIONS};

/// Play one game over `input`/`output`, returning the final outcome.
///
/// End of input stops the loop early and yields [`Outcome::InProgress`].
pub fn run<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<Outcome> {
    let mut state = GameState::new();
    let mut line = Vec::new();

    writeln!(output, "{INSTRUCTIONS}")?;
    writeln!(output)?;

    while let Some(player) = state.current_player() {
        write!(output, "{}", state.render())?;
        write!(output, "{player} - Column? (1-{COLS}) ")?;
        output.flush()?;

        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            writeln!(output)?;
            info!(moves = state.move_count(), "input closed before the game ended");
            return Ok(Outcome::InProgress);
        }

        // Raw bytes, so a line that is not UTF-8 is just another bad entry.
        let parsed = std::str::from_utf8(&line)
            .ok()
            .and_then(|text| text.trim().parse::<i64>().ok());
        let column = match parsed {
            Some(column) => column,
            None => {
                writeln!(output, "Please enter a column number.")?;
                continue;
            }
        };

        if let Err(e) = state.apply_move(column) {
            warn!(%e, "move refused");
            writeln!(output, "Invalid move: {e}")?;
        }
    }

    let outcome = state.outcome();
    write!(output, "{}", state.render())?;
    writeln!(output, "{outcome}")?;
    info!(?outcome, moves = state.move_count(), "game finished");

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    fn transcript(input: &str) -> (Outcome, String) {
        let mut output = Vec::new();
        let outcome = run(input.as_bytes(), &mut output).unwrap();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_prints_instructions_and_empty_board() {
        let (outcome, out) = transcript("");
        assert_eq!(outcome, Outcome::InProgress);
        assert!(out.starts_with(INSTRUCTIONS));
        assert!(out.contains(&"|   |   |   |   |   |   |   |\n".repeat(6)));
        assert!(out.contains("Player 1 (X) - Column? (1-7) "));
    }

    #[test]
    fn test_player_one_wins_horizontally() {
        let (outcome, out) = transcript("1\n1\n2\n2\n3\n3\n4\n");
        assert_eq!(outcome, Outcome::Winner(Player::One));
        assert!(out.contains("| X | X | X | X |   |   |   |\n"));
        assert!(out.trim_end().ends_with("Player 1 (X) wins!"));
    }

    #[test]
    fn test_bad_input_reprompts_same_player() {
        let (_, out) = transcript("abc\n0\n8\n  5 \n");
        assert!(out.contains("Please enter a column number."));
        assert!(out.contains("Invalid move: column 0 is out of range"));
        assert!(out.contains("Invalid move: column 8 is out of range"));
        assert_eq!(out.matches("Player 1 (X) - Column?").count(), 4);
        assert_eq!(out.matches("Player 2 (O) - Column?").count(), 1);
        assert!(out.contains("|   |   |   |   | X |   |   |\n"));
    }

    #[test]
    fn test_non_utf8_line_reprompts() {
        let mut output = Vec::new();
        let outcome = run(&b"\xff\xfe\n1\n"[..], &mut output).unwrap();
        let out = String::from_utf8(output).unwrap();

        assert_eq!(outcome, Outcome::InProgress);
        assert!(out.contains("Please enter a column number."));
        assert_eq!(out.matches("Player 1 (X) - Column?").count(), 2);
        assert!(out.contains("| X |   |   |   |   |   |   |\n"));
        assert!(out.contains("Player 2 (O) - Column?"));
    }

    #[test]
    fn test_full_column_is_reported() {
        let (_, out) = transcript("2\n2\n2\n2\n2\n2\n2\n");
        assert!(out.contains("Invalid move: column 2 is full"));
    }

    #[test]
    fn test_tie_game() {
        let moves = [
            6, 4, 3, 4, 2, 6, 4, 2, 1, 2, 5, 2, 3, 6, 1, 6, 7, 7, 3, 1, 7, 1, 5, 3, 4, 1, 4, 5,
            3, 4, 3, 7, 2, 2, 6, 5, 7, 7, 1, 5, 5, 6,
        ];
        let input: String = moves.iter().map(|m| format!("{m}\n")).collect();
        let (outcome, out) = transcript(&input);
        assert_eq!(outcome, Outcome::Tie);
        assert!(out.trim_end().ends_with("It's a tie!"));
    }

    #[test]
    fn test_input_after_game_end_is_ignored() {
        let (outcome, out) = transcript("1\n2\n1\n2\n1\n2\n1\n7\n7\n");
        assert_eq!(outcome, Outcome::Winner(Player::One));
        assert_eq!(out.matches("Column?").count(), 7);
    }
}

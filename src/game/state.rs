use std::fmt;

use tracing::debug;

use super::{Board, Player, Run, COLS};
use crate::error::MoveError;

/// Status of the game, derived from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Tie,
    InProgress,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(player),
            Outcome::Tie | Outcome::InProgress => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{player} wins!"),
            Outcome::Tie => write!(f, "It's a tie!"),
            Outcome::InProgress => write!(f, "Game in progress"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    next_player: Player,
}

impl GameState {
    /// Create initial game state: empty board, player one to move.
    pub fn new() -> Self {
        GameState {
            board: Board::new(),
            next_player: Player::One,
        }
    }

    /// Player to move, or `None` once the game has been won or tied.
    pub fn current_player(&self) -> Option<Player> {
        if self.is_terminal() {
            return None;
        }
        Some(self.next_player)
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Derive the outcome from the current board.
    pub fn outcome(&self) -> Outcome {
        if let Some(run) = self.board.find_run() {
            Outcome::Winner(run.player)
        } else if self.board.is_full() {
            Outcome::Tie
        } else {
            Outcome::InProgress
        }
    }

    /// The line of tokens that won the game, if any.
    pub fn winning_run(&self) -> Option<Run> {
        self.board.find_run()
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// Number of tokens played so far.
    pub fn move_count(&self) -> usize {
        self.board.count_pieces()
    }

    /// 1-indexed columns that can still take a token.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..COLS)
            .filter(|&col| !self.board.is_column_full(col))
            .map(|col| col + 1)
            .collect()
    }

    /// Drop the current player's token into a 1-indexed column.
    ///
    /// Callers must check [`GameState::outcome`] first: moves are not refused
    /// after the game has ended. A failed move leaves the state untouched.
    pub fn apply_move(&mut self, column: i64) -> Result<(), MoveError> {
        if !(1..=COLS as i64).contains(&column) {
            debug!(column, "rejected move outside the board");
            return Err(MoveError::InvalidColumn(column));
        }

        let col = (column - 1) as usize;
        let player = self.next_player;
        let row = self
            .board
            .drop_piece(col, player.to_cell())
            .inspect_err(|_| debug!(column, "rejected move into full column"))?;

        debug!(player = player.name(), row, col, "token placed");
        self.next_player = player.other();

        Ok(())
    }

    /// Textual board, one line per row, top first.
    pub fn render(&self) -> String {
        self.board.to_string()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.board, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, ROWS};

    fn play(moves: &[i64]) -> GameState {
        let mut state = GameState::new();
        for &column in moves {
            state.apply_move(column).unwrap();
        }
        state
    }

    /// Full board, alternating turns, no four in a row.
    const TIE_GAME: [i64; 42] = [
        6, 4, 3, 4, 2, 6, 4, 2, 1, 2, 5, 2, 3, 6, 1, 6, 7, 7, 3, 1, 7, 1, 5, 3, 4, 1, 4, 5, 3,
        4, 3, 7, 2, 2, 6, 5, 7, 7, 1, 5, 5, 6,
    ];

    #[test]
    fn test_initial_state() {
        let state = GameState::new();
        assert_eq!(state.current_player(), Some(Player::One));
        assert_eq!(state.outcome(), Outcome::InProgress);
        assert_eq!(state.legal_columns(), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(state.move_count(), 0);
    }

    #[test]
    fn test_apply_move_lands_on_bottom_row() {
        for column in 1..=7 {
            let state = play(&[column]);
            let col = (column - 1) as usize;
            assert_eq!(state.board().get(ROWS - 1, col), Cell::X);

            let bottom = state.render().lines().last().unwrap().to_string();
            let expected: String = (0..COLS)
                .map(|c| if c == col { "| X " } else { "|   " })
                .chain(std::iter::once("|"))
                .collect();
            assert_eq!(bottom, expected);
        }
    }

    #[test]
    fn test_column_fills_bottom_up() {
        let mut state = GameState::new();
        for i in 0..ROWS {
            state.apply_move(4).unwrap();
            assert!(state.board().get(ROWS - 1 - i, 3).player().is_some());
        }
        assert_eq!(state.board().get(5, 3), Cell::X);
        assert_eq!(state.board().get(4, 3), Cell::O);
        assert_eq!(state.board().get(0, 3), Cell::O);

        assert_eq!(state.apply_move(4), Err(MoveError::ColumnFull(4)));
        // Same refusal regardless of whose turn it is.
        state.apply_move(1).unwrap();
        assert_eq!(state.apply_move(4), Err(MoveError::ColumnFull(4)));
        assert!(!state.legal_columns().contains(&4));
    }

    #[test]
    fn test_invalid_columns() {
        let mut states = vec![GameState::new(), play(&[1, 2, 3]), play(&TIE_GAME)];
        for state in &mut states {
            for column in [0, 8, -1, i64::MAX] {
                assert_eq!(
                    state.apply_move(column),
                    Err(MoveError::InvalidColumn(column))
                );
            }
        }
    }

    #[test]
    fn test_failed_move_is_a_no_op() {
        let mut state = play(&[4, 4, 4, 4, 4, 4, 1]);
        let before = state;

        assert!(state.apply_move(4).is_err());
        assert!(state.apply_move(0).is_err());
        assert_eq!(state, before);
        assert_eq!(state.current_player(), Some(Player::Two));
    }

    #[test]
    fn test_current_player_alternates() {
        let mut state = GameState::new();
        let mut expected = Player::One;
        for &column in &[1, 2, 3, 4, 5, 6, 7, 1, 2] {
            assert_eq!(state.current_player(), Some(expected));
            state.apply_move(column).unwrap();
            expected = expected.other();
        }
        assert_eq!(state.current_player(), Some(expected));
    }

    #[test]
    fn test_horizontal_win() {
        let state = play(&[1, 1, 2, 2, 3, 3, 4]);
        for col in 0..4 {
            assert_eq!(state.board().get(5, col), Cell::X);
        }
        assert_eq!(state.outcome(), Outcome::Winner(Player::One));
        assert_eq!(state.current_player(), None);
        assert_eq!(state.winning_run().unwrap().direction, Direction::Horizontal);
    }

    #[test]
    fn test_vertical_win() {
        let state = play(&[1, 2, 1, 2, 1, 2, 1]);
        assert_eq!(state.outcome(), Outcome::Winner(Player::One));
        assert_eq!(state.winning_run().unwrap().direction, Direction::Vertical);
    }

    #[test]
    fn test_rising_diagonal_win() {
        let state = play(&[1, 2, 2, 3, 4, 3, 3, 4, 5, 4, 4]);
        for (row, col) in [(5, 0), (4, 1), (3, 2), (2, 3)] {
            assert_eq!(state.board().get(row, col), Cell::X);
        }
        assert_eq!(state.outcome(), Outcome::Winner(Player::One));
        let run = state.winning_run().unwrap();
        assert_eq!(run.direction, Direction::DiagonalUp);
        assert_eq!(run.start, (5, 0));
    }

    #[test]
    fn test_falling_diagonal_win_for_second_player() {
        let state = play(&[6, 7, 5, 6, 4, 4, 5, 5, 1, 4, 2, 4]);
        assert_eq!(state.outcome(), Outcome::Winner(Player::Two));
        let run = state.winning_run().unwrap();
        assert_eq!(run.direction, Direction::DiagonalDown);
        assert_eq!(run.start, (2, 3));
        assert_eq!(state.current_player(), None);
    }

    #[test]
    fn test_tie() {
        let mut state = GameState::new();
        for &column in &TIE_GAME {
            assert_eq!(state.outcome(), Outcome::InProgress);
            state.apply_move(column).unwrap();
        }
        assert!(state.board().is_full());
        assert_eq!(state.outcome(), Outcome::Tie);
        assert_eq!(state.current_player(), None);
        assert!(state.legal_columns().is_empty());
        assert_eq!(state.winning_run(), None);
    }

    #[test]
    fn test_outcome_is_idempotent() {
        for state in [GameState::new(), play(&[1, 1, 2, 2, 3, 3, 4]), play(&TIE_GAME)] {
            let first = state.outcome();
            for _ in 0..5 {
                assert_eq!(state.outcome(), first);
            }
        }
    }

    #[test]
    fn test_moves_after_game_over_are_not_blocked() {
        let mut state = play(&[1, 1, 2, 2, 3, 3, 4]);
        assert!(state.is_terminal());
        state.apply_move(7).unwrap();
        assert_eq!(state.move_count(), 8);
        assert_eq!(state.outcome(), Outcome::Winner(Player::One));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Winner(Player::One).to_string(), "Player 1 (X) wins!");
        assert_eq!(Outcome::Tie.to_string(), "It's a tie!");
    }
}

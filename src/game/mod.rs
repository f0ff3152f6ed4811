//! Core Connect Four rules: board representation, players, and the game state
//! with move application and outcome detection.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, Direction, Run, COLS, CONNECT, ROWS};
pub use player::Player;
pub use state::{GameState, Outcome};

/// How to play, shown by the drivers before the first move.
pub const INSTRUCTIONS: &str = "\
Player 1 is X and goes first. Choose where to play by entering the number
of the column. Blank spaces are empty. The game ends when one player
connects four spaces with their token (X or O) in a row, in which that
player wins, or when the board is full, in which case the game ends in a tie.";

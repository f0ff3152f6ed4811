use std::fmt;

use super::Player;
use crate::error::MoveError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Minimum run length that wins the game.
pub const CONNECT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// The player owning this cell, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::One),
            Cell::O => Some(Player::Two),
        }
    }

    /// Character used in the textual board.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

/// Axis along which a run is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Along a row, column increasing.
    Horizontal,
    /// Along a column, row increasing.
    Vertical,
    /// Row increasing, column increasing (`\`).
    DiagonalDown,
    /// Row decreasing, column increasing (`/`).
    DiagonalUp,
}

impl Direction {
    /// Rows and columns are scanned before diagonals.
    pub const SCAN_ORDER: [[Direction; 2]; 2] = [
        [Direction::Horizontal, Direction::Vertical],
        [Direction::DiagonalDown, Direction::DiagonalUp],
    ];

    /// (row delta, column delta) of one step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (-1, 1),
        }
    }
}

/// A maximal line of identical tokens of length `CONNECT` or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub player: Player,
    pub start: (usize, usize),
    pub direction: Direction,
    pub len: usize,
}

impl Run {
    /// Cells covered by the run, starting at `start`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (dr, dc) = self.direction.delta();
        (0..self.len).map(move |i| {
            let i = i as isize;
            (
                (self.start.0 as isize + dr * i) as usize,
                (self.start.1 as isize + dc * i) as usize,
            )
        })
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells().any(|cell| cell == (row, col))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Lowest empty row of a column, or `None` if the column is full.
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Drop a piece in a 0-indexed column, returns the row where it landed.
    ///
    /// Errors carry the 1-indexed column number the players see.
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col as i64 + 1));
        }

        let row = self
            .lowest_empty_row(col)
            .ok_or(MoveError::ColumnFull(col + 1))?;
        self.cells[row][col] = cell;
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Number of occupied cells.
    pub fn count_pieces(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Find the first winning run on the board.
    ///
    /// Rows and columns are scanned before diagonals; within each pass anchors
    /// are visited top-to-bottom, left-to-right. Only the first cell of a
    /// maximal run is treated as its anchor, so the reported length is the
    /// full run.
    pub fn find_run(&self) -> Option<Run> {
        Direction::SCAN_ORDER.iter().find_map(|directions| {
            (0..ROWS).find_map(|row| {
                (0..COLS).find_map(|col| {
                    directions
                        .iter()
                        .find_map(|&direction| self.run_from(row, col, direction))
                })
            })
        })
    }

    /// Run anchored at (row, col) along `direction`, if it is long enough.
    fn run_from(&self, row: usize, col: usize, direction: Direction) -> Option<Run> {
        let cell = self.cells[row][col];
        let player = cell.player()?;

        let (dr, dc) = direction.delta();
        if let Some((r, c)) = step(row, col, -dr, -dc) {
            if self.cells[r][c] == cell {
                return None;
            }
        }

        let mut len = 1;
        let (mut r, mut c) = (row, col);
        while let Some(next) = step(r, c, dr, dc) {
            if self.cells[next.0][next.1] != cell {
                break;
            }
            (r, c) = next;
            len += 1;
        }

        (len >= CONNECT).then_some(Run {
            player,
            start: (row, col),
            direction,
            len,
        })
    }
}

/// Move one cell by (dr, dc), staying on the board.
fn step(row: usize, col: usize, dr: isize, dc: isize) -> Option<(usize, usize)> {
    let r = row.checked_add_signed(dr)?;
    let c = col.checked_add_signed(dc)?;
    (r < ROWS && c < COLS).then_some((r, c))
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// One line per row, top first: `| X |   | O |...|`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            write!(f, "|")?;
            for cell in row {
                write!(f, " {} |", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ops;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, in a fixed order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

/// Result of resolving a move: the successor board, whether any cell
/// changed, and the score gained from merges during this move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub board: Board,
    pub changed: bool,
    pub gained: u64,
}

/// Error produced when constructing a `Board` from malformed cells.
///
/// This is the engine's single failure mode: validation happens once at the
/// construction boundary and nowhere else.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidBoard {
    #[error("board must have exactly 16 cells, got {0}")]
    WrongLength(usize),
    #[error("cell {index} holds {value}, which is neither 0 nor a power of two >= 2")]
    BadCell { index: usize, value: u32 },
}

/// A 4x4 2048 board: 16 tile values in row-major order (`index = row*4 + col`).
///
/// 0 denotes an empty cell; every nonzero cell is a power of two (2, 4, 8, ...).
/// Boards are immutable values: every operation returns a new `Board` and
/// leaves its input untouched. The invariant is checked once in
/// `try_from_cells`, so operations on a constructed board never re-validate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "[u32; 16]")]
pub struct Board(pub(crate) [u32; 16]);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([0; 16]);

    /// Construct a `Board`, rejecting cells that are neither 0 nor a power
    /// of two of at least 2.
    ///
    /// ```
    /// use twenty48_engine::Board;
    /// let b = Board::try_from_cells([
    ///     2, 2, 0, 0,
    ///     0, 0, 0, 0,
    ///     0, 0, 0, 0,
    ///     0, 0, 0, 0,
    /// ]).unwrap();
    /// assert_eq!(b.count_empty(), 14);
    /// assert!(Board::try_from_cells([3; 16]).is_err());
    /// ```
    pub fn try_from_cells(cells: [u32; 16]) -> Result<Self, InvalidBoard> {
        for (index, &value) in cells.iter().enumerate() {
            if value != 0 && !(value >= 2 && value.is_power_of_two()) {
                return Err(InvalidBoard::BadCell { index, value });
            }
        }
        Ok(Board(cells))
    }

    /// Borrow the 16 cell values in row-major order.
    #[inline]
    pub fn cells(&self) -> &[u32; 16] {
        &self.0
    }

    /// Value at (row, col), with 0 meaning empty.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.0[row * 4 + col]
    }

    /// Iterate over tile values in row-major order.
    #[inline]
    pub fn tiles(self) -> std::array::IntoIter<u32, 16> {
        self.0.into_iter()
    }

    /// Slide and merge tiles toward `dir` (no random insert).
    ///
    /// ```
    /// use twenty48_engine::{Board, Move};
    /// let b = Board::try_from_cells([
    ///     2, 2, 0, 0,
    ///     0, 0, 0, 0,
    ///     0, 0, 0, 0,
    ///     0, 0, 0, 0,
    /// ]).unwrap();
    /// let r = b.resolve(Move::Left);
    /// assert!(r.changed);
    /// assert_eq!(r.gained, 4);
    /// assert_eq!(r.board.get(0, 0), 4);
    /// ```
    #[inline]
    pub fn resolve(self, dir: Move) -> MoveResult {
        ops::resolve(self, dir)
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a uniformly chosen empty
    /// cell, using the provided RNG. A full board is returned unchanged and
    /// consumes no draws.
    ///
    /// Deterministic example using a seeded RNG:
    /// ```
    /// use twenty48_engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        ops::spawn_random_tile(self, rng)
    }

    /// True if some move can still change the board: any empty cell, or any
    /// equal adjacent pair along a row or a column.
    #[inline]
    pub fn has_moves(self) -> bool {
        ops::has_available_move(self)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> usize {
        self.0.iter().filter(|&&v| v == 0).count()
    }

    /// Return the highest tile value (e.g., 2048) present on the board,
    /// or 0 for an empty board.
    #[inline]
    pub fn highest_tile(self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }
}

impl TryFrom<[u32; 16]> for Board {
    type Error = InvalidBoard;

    fn try_from(cells: [u32; 16]) -> Result<Self, Self::Error> {
        Board::try_from_cells(cells)
    }
}

impl TryFrom<&[u32]> for Board {
    type Error = InvalidBoard;

    fn try_from(cells: &[u32]) -> Result<Self, Self::Error> {
        let cells: [u32; 16] = cells
            .try_into()
            .map_err(|_| InvalidBoard::WrongLength(cells.len()))?;
        Board::try_from_cells(cells)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board: Vec<_> = self.0.iter().map(|&v| format_val(v)).collect();
        write!(
            f,
            "\n{}|{}|{}|{}\n--------------------------------\n{}|{}|{}|{}\n--------------------------------\n{}|{}|{}|{}\n--------------------------------\n{}|{}|{}|{}\n",
            board[0],
            board[1],
            board[2],
            board[3],
            board[4],
            board[5],
            board[6],
            board[7],
            board[8],
            board[9],
            board[10],
            board[11],
            board[12],
            board[13],
            board[14],
            board[15]
        )
    }
}

fn format_val(val: u32) -> String {
    match val {
        0 => String::from("       "),
        x => {
            let mut x = x.to_string();
            while x.len() < 7 {
                match x.len() {
                    6 => x = format!(" {}", x),
                    _ => x = format!(" {} ", x),
                }
            }
            x
        }
    }
}

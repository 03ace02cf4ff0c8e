//! Hex board geometry and cell storage
//!
//! The board is an N×N rhombus stored row-major: cell `(x, y)` lives at
//! index `x * N + y`. `x` is the row, `y` the column.

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::error::{HexError, MoveError, Result};

/// Hex adjacency offsets (dx, dy)
pub const DIRECTIONS: [(i64, i64); 6] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, 1),
    (1, -1),
];

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player identity
///
/// `X` moves first and connects the column edges (y = 0 to y = N-1).
/// `O` is the computer and connects the row edges (x = 0 to x = N-1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn mark(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mark())
    }
}

/// Contents of a single cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }

    pub fn mark(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_mark(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }
}

/// A board coordinate (row, column)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub x: usize,
    pub y: usize,
}

impl Move {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// N×N Hex board plus the player to move
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    current_player: Player,
}

impl Board {
    /// Create an empty board with `X` to move.
    ///
    /// A zero-sized board is representable (it is immediately full); use
    /// [`Board::try_new`] to reject it.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
            current_player: Player::X,
        }
    }

    pub fn try_new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(HexError::InvalidSize(size));
        }
        Ok(Self::new(size))
    }

    /// Parse rows of `.`, `X` and `O`; whitespace between marks is ignored.
    ///
    /// The player to move is `X` when both sides have the same number of
    /// stones and `O` otherwise.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let size = rows.len();
        let mut board = Self::try_new(size)?;

        for (x, row) in rows.iter().enumerate() {
            let marks: Vec<char> = row
                .as_ref()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            if marks.len() != size {
                return Err(HexError::RowWidth {
                    row: x,
                    expected: size,
                    found: marks.len(),
                });
            }
            for (y, c) in marks.into_iter().enumerate() {
                let cell = Cell::from_mark(c).ok_or(HexError::UnknownMark(c))?;
                board.set(Move::new(x, y), cell);
            }
        }

        board.current_player = if board.count(Player::X) == board.count(Player::O) {
            Player::X
        } else {
            Player::O
        };
        Ok(board)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn set_current_player(&mut self, player: Player) {
        self.current_player = player;
    }

    /// Cell at a possibly out-of-range coordinate
    pub fn get(&self, x: i64, y: i64) -> Option<Cell> {
        self.to_move(x, y).map(|mv| self.cell(mv))
    }

    /// Cell at an in-range coordinate
    ///
    /// Panics if `mv` lies outside the board.
    #[inline]
    pub fn cell(&self, mv: Move) -> Cell {
        self.cells[self.index(mv)]
    }

    /// Cells of row `x`, left to right
    pub fn row(&self, x: usize) -> &[Cell] {
        &self.cells[x * self.size..(x + 1) * self.size]
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    /// Number of stones owned by `player`
    pub fn count(&self, player: Player) -> usize {
        let target = player.cell();
        self.cells.iter().filter(|&&c| c == target).count()
    }

    /// Empty cells in row-major order (x ascending, then y ascending)
    pub fn empty_cells(&self) -> impl Iterator<Item = Move> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == Cell::Empty)
            .map(move |(i, _)| Move::new(i / self.size, i % self.size))
    }

    /// In-range neighbours of `mv` in [`DIRECTIONS`] order
    pub fn neighbors(&self, mv: Move) -> impl Iterator<Item = Move> + '_ {
        let (x, y) = (mv.x as i64, mv.y as i64);
        DIRECTIONS
            .iter()
            .filter_map(move |&(dx, dy)| self.to_move(x + dx, y + dy))
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// True iff `(x, y)` is on the board and empty
    pub fn is_valid_move(&self, x: i64, y: i64) -> bool {
        self.get(x, y) == Some(Cell::Empty)
    }

    /// Place the current player's stone and pass the turn.
    ///
    /// Returns `false` and leaves the board untouched when the move is invalid.
    pub fn make_move(&mut self, x: i64, y: i64) -> bool {
        self.try_move(x, y).is_ok()
    }

    /// Like [`Board::make_move`], but says why a move was rejected
    pub fn try_move(&mut self, x: i64, y: i64) -> std::result::Result<Move, MoveError> {
        let mv = self.to_move(x, y).ok_or(MoveError::OutOfBounds {
            x,
            y,
            size: self.size,
        })?;
        if self.cell(mv) != Cell::Empty {
            return Err(MoveError::Occupied { x: mv.x, y: mv.y });
        }

        self.set(mv, self.current_player.cell());
        self.current_player = self.current_player.opponent();
        Ok(mv)
    }

    /// Tentatively place `player`'s stone at `mv`.
    ///
    /// The stone is removed again when the returned guard is dropped. The
    /// turn state is not touched.
    pub fn place(&mut self, mv: Move, player: Player) -> Placement<'_> {
        debug_assert_eq!(self.cell(mv), Cell::Empty, "placing on occupied cell {mv}");
        self.set(mv, player.cell());
        Placement { board: self, mv }
    }

    pub(crate) fn set(&mut self, mv: Move, cell: Cell) {
        let idx = self.index(mv);
        self.cells[idx] = cell;
    }

    // ========================================================================
    // TRANSFORMS
    // ========================================================================

    /// Mirror across the main diagonal and swap the two players' marks.
    ///
    /// Maps an `X` chain between the column edges onto an `O` chain between
    /// the row edges and vice versa.
    pub fn transposed_swapped(&self) -> Self {
        let mut out = Self::new(self.size);
        for x in 0..self.size {
            for y in 0..self.size {
                let swapped = match self.cell(Move::new(x, y)) {
                    Cell::Empty => Cell::Empty,
                    Cell::X => Cell::O,
                    Cell::O => Cell::X,
                };
                out.set(Move::new(y, x), swapped);
            }
        }
        out.current_player = self.current_player.opponent();
        out
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    #[inline]
    fn index(&self, mv: Move) -> usize {
        mv.x * self.size + mv.y
    }

    fn to_move(&self, x: i64, y: i64) -> Option<Move> {
        let n = self.size as i64;
        if (0..n).contains(&x) && (0..n).contains(&y) {
            Some(Move::new(x as usize, y as usize))
        } else {
            None
        }
    }
}

// ============================================================================
// SCOPED PLACEMENT
// ============================================================================

/// A hypothetical stone that is taken back on drop
pub struct Placement<'a> {
    board: &'a mut Board,
    mv: Move,
}

impl Placement<'_> {
    pub fn mv(&self) -> Move {
        self.mv
    }
}

impl Deref for Placement<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placement<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placement<'_> {
    fn drop(&mut self) {
        self.board.set(self.mv, Cell::Empty);
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! The 3x3 board: grid state, win/tie detection, legal moves, snapshots.

use crate::coord::SIZE;
use crate::{BoardError, Move, Renderer, Side};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, instrument, trace};

const CELLS: usize = SIZE * SIZE;

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell holding a side's piece.
    Occupied(Side),
}

/// Cell contents, indexed `[row][col]`.
pub type Grid = [[Square; SIZE]; SIZE];

/// Whether the round on this board is still going.
///
/// The winner lives inside [`BoardState::Won`], so a board has a winner
/// exactly when it is won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BoardState {
    /// Moves can still be made.
    #[default]
    InPlay,
    /// A side holds a complete line.
    Won(Side),
    /// Every cell is occupied and nobody holds a line.
    Tied,
}

impl BoardState {
    /// True for won and tied boards.
    pub fn is_terminal(self) -> bool {
        !matches!(self, BoardState::InPlay)
    }

    /// The winning side, if any.
    pub fn winner(self) -> Option<Side> {
        match self {
            BoardState::Won(side) => Some(side),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    grid: Grid,
    occupied: usize,
    state: BoardState,
    last_moves: [Option<Move>; 2],
}

/// 3x3 tic-tac-toe board.
///
/// Search mutates a board in place with trial `place`/`remove` pairs and
/// brackets the whole pass with [`Board::snapshot`] and [`Board::restore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    occupied: usize,
    state: BoardState,
    last_moves: [Option<Move>; 2],
    snapshot: Option<Snapshot>,
}

impl Board {
    /// Creates an empty in-play board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `side` at `mv` if the cell is empty and the board is in play.
    ///
    /// Returns `false` and leaves the board untouched otherwise. A visible
    /// placement passes a renderer to be notified; trial placements pass
    /// `None`.
    pub fn place(&mut self, mv: Move, side: Side, renderer: Option<&mut dyn Renderer>) -> bool {
        if self.state.is_terminal() || self.get(mv) != Square::Empty {
            trace!(%mv, %side, state = ?self.state, "Placement rejected");
            return false;
        }

        self.grid[mv.row()][mv.col()] = Square::Occupied(side);
        self.occupied += 1;
        self.last_moves[side.index()] = Some(mv);

        if let Some(renderer) = renderer {
            renderer.piece_placed(mv, side);
        }
        true
    }

    /// [`Board::place`] with raw coordinates.
    pub fn place_at(
        &mut self,
        row: usize,
        col: usize,
        side: Side,
        renderer: Option<&mut dyn Renderer>,
    ) -> Result<bool, BoardError> {
        Ok(self.place(Move::new(row, col)?, side, renderer))
    }

    /// Clears `mv` unconditionally, undoing a trial placement.
    ///
    /// With `reset_state` the board returns to in-play, dropping any winner
    /// or tie the trial placement produced. If `mv` was its owner's last
    /// move, that side has no last move afterwards; earlier moves are not
    /// recovered, so [`Board::refresh_state`] for it fails until it places
    /// again.
    pub fn remove(&mut self, mv: Move, reset_state: bool) {
        if let Square::Occupied(owner) = self.get(mv) {
            self.occupied -= 1;
            let last = &mut self.last_moves[owner.index()];
            if *last == Some(mv) {
                *last = None;
            }
        }
        self.grid[mv.row()][mv.col()] = Square::Empty;
        if reset_state {
            self.state = BoardState::InPlay;
        }
    }

    /// [`Board::remove`] with raw coordinates.
    pub fn remove_at(&mut self, row: usize, col: usize, reset_state: bool) -> Result<(), BoardError> {
        self.remove(Move::new(row, col)?, reset_state);
        Ok(())
    }

    /// Empty cells in row-major order, or nothing once the round is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.state.is_terminal() {
            return Vec::new();
        }
        Move::ALL
            .iter()
            .copied()
            .filter(|&mv| self.get(mv) == Square::Empty)
            .collect()
    }

    /// Recomputes the state from the lines through `last_moved`'s last move.
    ///
    /// Only the row and column of that move are checked, plus both
    /// diagonals. A line held by one side wins; otherwise a full board ties.
    pub fn refresh_state(&mut self, last_moved: Side) -> Result<BoardState, BoardError> {
        let mv = self.last_moves[last_moved.index()]
            .ok_or(BoardError::NoLastMove { side: last_moved })?;
        let (r, c) = (mv.row(), mv.col());

        let winner = self
            .line_owner([(r, 0), (r, 1), (r, 2)])
            .or_else(|| self.line_owner([(0, c), (1, c), (2, c)]))
            .or_else(|| self.line_owner([(0, 0), (1, 1), (2, 2)]))
            .or_else(|| self.line_owner([(0, 2), (1, 1), (2, 0)]));

        self.state = match winner {
            Some(side) => BoardState::Won(side),
            None if self.occupied == CELLS => BoardState::Tied,
            None => BoardState::InPlay,
        };
        Ok(self.state)
    }

    /// Saves the full board so a search pass can be undone exactly.
    #[instrument(level = "debug", skip(self))]
    pub fn snapshot(&mut self) -> Result<(), BoardError> {
        if self.snapshot.is_some() {
            return Err(BoardError::SnapshotOutstanding);
        }
        self.snapshot = Some(Snapshot {
            grid: self.grid,
            occupied: self.occupied,
            state: self.state,
            last_moves: self.last_moves,
        });
        Ok(())
    }

    /// Replays the outstanding snapshot and discards it.
    #[instrument(level = "debug", skip(self))]
    pub fn restore(&mut self) -> Result<(), BoardError> {
        let saved = self.snapshot.take().ok_or(BoardError::NoSnapshot)?;
        self.grid = saved.grid;
        self.occupied = saved.occupied;
        self.state = saved.state;
        self.last_moves = saved.last_moves;
        Ok(())
    }

    /// Clears the board for a new round.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!("Resetting board");
        *self = Self::default();
    }

    /// Contents of a cell.
    pub fn get(&self, mv: Move) -> Square {
        self.grid[mv.row()][mv.col()]
    }

    /// Copy of every cell.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    /// Current state.
    pub fn state(&self) -> BoardState {
        self.state
    }

    /// The winner, set only when the board is won.
    pub fn winner(&self) -> Option<Side> {
        self.state.winner()
    }

    /// True when every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.occupied == CELLS
    }

    /// Most recent cell `side` placed on this board.
    pub fn last_move(&self, side: Side) -> Option<Move> {
        self.last_moves[side.index()]
    }

    /// True while a snapshot is outstanding.
    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    fn line_owner(&self, line: [(usize, usize); 3]) -> Option<Side> {
        let [(r0, c0), (r1, c1), (r2, c2)] = line;
        match self.grid[r0][c0] {
            Square::Occupied(side)
                if self.grid[r1][c1] == Square::Occupied(side)
                    && self.grid[r2][c2] == Square::Occupied(side) =>
            {
                Some(side)
            }
            _ => None,
        }
    }

    /// Full rescan of all eight lines, for boards built without move history.
    fn scan_state(&self) -> BoardState {
        let mut lines = Vec::with_capacity(8);
        for i in 0..SIZE {
            lines.push([(i, 0), (i, 1), (i, 2)]);
            lines.push([(0, i), (1, i), (2, i)]);
        }
        lines.push([(0, 0), (1, 1), (2, 2)]);
        lines.push([(0, 2), (1, 1), (2, 0)]);

        match lines.into_iter().find_map(|line| self.line_owner(line)) {
            Some(side) => BoardState::Won(side),
            None if self.occupied == CELLS => BoardState::Tied,
            None => BoardState::InPlay,
        }
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses nine cells in row-major order.
    ///
    /// `X`/`O` are pieces and `.`, `-`, `_` are empty. Whitespace, `|` and
    /// `/` are separators. The state comes from a full scan.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|' && *c != '/')
            .collect();
        if symbols.len() != CELLS {
            return Err(BoardError::Shape {
                found: symbols.len(),
            });
        }

        let mut board = Board::new();
        for (mv, symbol) in Move::ALL.iter().zip(symbols) {
            if matches!(symbol, '.' | '-' | '_') {
                continue;
            }
            let side = Side::from_symbol(symbol)?;
            board.grid[mv.row()][mv.col()] = Square::Occupied(side);
            board.occupied += 1;
        }
        board.state = board.scan_state();
        Ok(board)
    }
}

impl std::fmt::Display for Board {
    /// Empty cells show their keypad number.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, cells) in self.grid.iter().enumerate() {
            for (col, square) in cells.iter().enumerate() {
                match square {
                    Square::Empty => write!(f, "{}", row * SIZE + col + 1)?,
                    Square::Occupied(side) => write!(f, "{}", side.symbol())?,
                }
                if col < SIZE - 1 {
                    write!(f, "|")?;
                }
            }
            if row < SIZE - 1 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

use rand::Rng;
use std::fmt;

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in the order the game-over probe walks them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Short name used for the on-screen key echo.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }
}

/// Board side length. Fixed for the lifetime of a session.
pub const SIZE: usize = 4;

/// The result of applying one directional move to a board.
///
/// `board` is the post-move state, `moved` is true iff any tile slid or
/// merged, and `points` is the sum of the values produced by merges in this
/// move. Consumed immediately by the caller; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    pub moved: bool,
    pub points: u64,
}

/// A 4x4 2048 board holding tile values directly (0 = empty cell).
///
/// `Board` is `Copy`, so probing a move never aliases the live board: every
/// `shift` works on an independent copy and hands back a fresh state in its
/// [`MoveOutcome`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board([[u64; SIZE]; SIZE]);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    /// Construct a board from explicit rows. Handy in tests and examples.
    ///
    /// ```
    /// use twenty48::engine::Board;
    /// let b = Board::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
    /// assert_eq!(b.get(0, 0), 2);
    /// assert_eq!(b.count_empty(), 15);
    /// ```
    pub fn from_rows(rows: [[u64; SIZE]; SIZE]) -> Self {
        Board(rows)
    }

    /// The underlying rows, row-major.
    pub fn rows(&self) -> [[u64; SIZE]; SIZE] {
        self.0
    }

    /// Value at (row, col). Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.0[row][col]
    }

    /// Set the value at (row, col). Panics if either index is out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u64) {
        self.0[row][col] = value;
    }

    /// Iterate over every cell as (row, col, value), row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u64)> + '_ {
        (0..SIZE).flat_map(move |row| (0..SIZE).map(move |col| (row, col, self.0[row][col])))
    }

    /// Count the number of empty cells on the board.
    pub fn count_empty(&self) -> usize {
        self.cells().filter(|&(_, _, v)| v == 0).count()
    }

    /// Coordinates of every empty cell, row-major.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells()
            .filter(|&(_, _, v)| v == 0)
            .map(|(row, col, _)| (row, col))
            .collect()
    }

    /// The highest tile value present (0 on an empty board).
    pub fn highest_tile(&self) -> u64 {
        self.cells().map(|(_, _, v)| v).max().unwrap_or(0)
    }

    /// Sum of all tile values. Merges conserve this quantity.
    pub fn tile_sum(&self) -> u64 {
        self.cells().map(|(_, _, v)| v).sum()
    }

    /// Slide and merge every tile in `dir`, returning the move's outcome.
    ///
    /// Each of the four lanes (rows for Left/Right, columns for Up/Down) is
    /// read starting at the far edge, settled independently, and written
    /// back. Equal tiles merge at most once per destination per move; a
    /// merged tile never merges again in the same pass.
    ///
    /// ```
    /// use twenty48::engine::{Board, Direction};
    /// let b = Board::from_rows([[2, 0, 2, 2], [0; 4], [0; 4], [0; 4]]);
    /// let out = b.shift(Direction::Left);
    /// assert_eq!(out.board.rows()[0], [4, 2, 0, 0]);
    /// assert!(out.moved);
    /// assert_eq!(out.points, 4);
    /// ```
    pub fn shift(self, dir: Direction) -> MoveOutcome {
        let mut board = self;
        let mut points = 0;
        for lane in 0..SIZE {
            let mut cells = board.read_lane(dir, lane);
            points += slide_lane(&mut cells);
            board.write_lane(dir, lane, cells);
        }
        MoveOutcome {
            board,
            moved: board != self,
            points,
        }
    }

    /// True if no move in any direction would change the board.
    ///
    /// Probes each direction on a copy and short-circuits on the first one
    /// that reports movement. Never touches the board it is called on.
    ///
    /// ```
    /// use twenty48::engine::Board;
    /// // An empty board has nothing to slide, so no move is legal.
    /// assert!(Board::EMPTY.is_game_over());
    /// ```
    pub fn is_game_over(self) -> bool {
        Direction::ALL.iter().all(|&dir| !self.shift(dir).moved)
    }

    /// Place a 2 (95%) or 4 (5%) on a uniformly chosen empty cell.
    ///
    /// Returns `None` when the board is full; the session only spawns after
    /// a move that vacated a cell, so `None` signals a broken caller, not a
    /// game state.
    ///
    /// ```
    /// use twenty48::engine::Board;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).unwrap();
    /// assert_eq!(b.count_empty(), 15);
    /// ```
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Option<Self> {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return None;
        }
        let (row, col) = empty[rng.gen_range(0..empty.len())];
        let value = if rng.gen_range(0..100) < 95 { 2 } else { 4 };
        let mut board = self;
        board.set(row, col, value);
        Some(board)
    }

    /// Convenience: like `with_random_tile` but uses the thread-local RNG.
    pub fn with_random_tile_thread(self) -> Option<Self> {
        let mut rng = rand::thread_rng();
        self.with_random_tile(&mut rng)
    }

    // Lane index 0 is always the far edge: the side tiles travel toward.
    fn lane_cell(dir: Direction, lane: usize, idx: usize) -> (usize, usize) {
        match dir {
            Direction::Left => (lane, idx),
            Direction::Right => (lane, SIZE - 1 - idx),
            Direction::Up => (idx, lane),
            Direction::Down => (SIZE - 1 - idx, lane),
        }
    }

    fn read_lane(&self, dir: Direction, lane: usize) -> [u64; SIZE] {
        let mut cells = [0; SIZE];
        for (idx, cell) in cells.iter_mut().enumerate() {
            let (row, col) = Self::lane_cell(dir, lane, idx);
            *cell = self.0[row][col];
        }
        cells
    }

    fn write_lane(&mut self, dir: Direction, lane: usize, cells: [u64; SIZE]) {
        for (idx, &value) in cells.iter().enumerate() {
            let (row, col) = Self::lane_cell(dir, lane, idx);
            self.0[row][col] = value;
        }
    }
}

/// Settle one lane toward index 0, returning the points scored by merges.
fn slide_lane(lane: &mut [u64; SIZE]) -> u64 {
    let mut points = 0;
    for front in 0..SIZE {
        points += settle_front(&mut lane[front..]);
    }
    points
}

/// Pull the next tile into `cells[0]`, merging once if the following tile
/// matches it. Settling cells in final-position order is what rules out a
/// second merge into the same destination within one move.
fn settle_front(cells: &mut [u64]) -> u64 {
    let mut acc = 0;
    let mut points = 0;
    for idx in 0..cells.len() {
        let val = cells[idx];
        if acc != 0 && acc == val {
            cells[idx] = 0;
            acc *= 2;
            points = acc;
            break;
        } else if acc != 0 && val != 0 {
            break;
        } else if val != 0 {
            cells[idx] = 0;
            acc = val;
        }
    }
    cells[0] = acc;
    points
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&self.0).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            for &value in row {
                write!(f, "{:>6}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

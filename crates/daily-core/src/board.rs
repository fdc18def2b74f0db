//! Daily board generation
//!
//! Every player gets the same puzzle layout for a given day. The layout is
//! drawn from a PCG generator seeded with the day's [`GameDate`], so it can
//! be regenerated at any time instead of being stored.
//!
//! [`GameDate`]: crate::record::GameDate

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};

/// A single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    #[serde(rename = "🟣")]
    Purple,
    #[serde(rename = "🔵")]
    Blue,
    #[serde(rename = "🟢")]
    Green,
    #[serde(rename = "🔴")]
    Red,
    #[serde(rename = "🟡")]
    Yellow,
}

impl Piece {
    /// The alphabet boards are drawn from, in draw order
    pub const ALL: [Piece; 5] = [
        Piece::Purple,
        Piece::Blue,
        Piece::Green,
        Piece::Red,
        Piece::Yellow,
    ];

    /// Symbol shown to players
    pub fn symbol(self) -> &'static str {
        match self {
            Piece::Purple => "🟣",
            Piece::Blue => "🔵",
            Piece::Green => "🟢",
            Piece::Red => "🔴",
            Piece::Yellow => "🟡",
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Board dimensions
///
/// Both dimensions are non-zero; a `BoardSize` can only be built through
/// [`BoardSize::new`], which keeps board generation infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    rows: usize,
    cols: usize,
}

impl BoardSize {
    /// Default number of rows
    pub const DEFAULT_ROWS: usize = 12;
    /// Default number of columns
    pub const DEFAULT_COLS: usize = 12;

    /// Create a board size, rejecting empty boards
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::invalid_input(format!(
                "board must have at least one row and one column, got {rows}x{cols}"
            )));
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells
    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self {
            rows: Self::DEFAULT_ROWS,
            cols: Self::DEFAULT_COLS,
        }
    }
}

/// The puzzle layout for one day, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyBoard {
    size: BoardSize,
    cells: Vec<Piece>,
}

impl DailyBoard {
    /// Generate the board for `seed`
    ///
    /// Pure: the same seed and size always produce the same board.
    ///
    /// # Example
    ///
    /// ```rust
    /// use daily_core::board::{BoardSize, DailyBoard};
    ///
    /// let a = DailyBoard::generate(20240301, BoardSize::default());
    /// let b = DailyBoard::generate(20240301, BoardSize::default());
    /// assert_eq!(a, b);
    /// assert_eq!(a.len(), 144);
    /// ```
    pub fn generate(seed: u64, size: BoardSize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let cells = (0..size.cells())
            .map(|_| Piece::ALL[rng.random_range(0..Piece::ALL.len())])
            .collect();

        Self { size, cells }
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[Piece] {
        &self.cells
    }

    /// Iterate the board one row at a time
    pub fn rows(&self) -> impl Iterator<Item = &[Piece]> {
        self.cells.chunks(self.size.cols)
    }
}

impl Serialize for DailyBoard {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.cells)
    }
}

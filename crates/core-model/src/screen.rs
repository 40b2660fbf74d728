//! Snapshot of the rendered cell grid, used to diff one tick against the next.
//!
//! Invariants:
//! * `cells.len() == rows * cols`, row-major.
//! * Lookups outside the grid report "unchanged" rather than failing.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenSnapshot {
    rows: usize,
    cols: usize,
    cells: Vec<char>,
}

impl ScreenSnapshot {
    /// Blank grid.
    pub fn blank(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![' '; rows * cols],
        }
    }

    /// Grid filled from `symbol(row, col)`.
    pub fn capture(rows: usize, cols: usize, mut symbol: impl FnMut(usize, usize) -> char) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                cells.push(symbol(r, c));
            }
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    /// True when `symbol` differs from what was captured at `(row, col)`.
    pub fn differs(&self, row: usize, col: usize, symbol: char) -> bool {
        self.get(row, col).is_some_and(|prev| prev != symbol)
    }
}

//! The Sudoku board and its candidate engine.
//!
//! A [`SudokuBoard`] owns an NxN grid of cell values (0 meaning empty) and an
//! NxNxN candidate bitmask. Bit `(row, col, value)` is true while `value` does
//! not conflict with any filled peer of the cell in its row, column or block.
//!
//! The mask is computed once by a full constraint scan when the board is
//! built, and from then on maintained incrementally by [`SudokuBoard::set`],
//! which only ever *clears* bits. A cleared bit is never restored within the
//! lifetime of a board instance, so every search branch must work on its own
//! clone obtained at the fork point.

use bit_vec::BitVec;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt;

/// The values currently consistent with a single cell.
///
/// Inlined up to 16 entries, which covers boards up to 16x16 without a heap
/// allocation.
pub type CandidateList = SmallVec<[u8; 16]>;

/// An NxN Sudoku grid together with its candidate bitmask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SudokuBoard {
    /// Side length of the grid (N). Immutable after construction.
    field_size: usize,
    /// Side length of each sub-block (B). Immutable after construction.
    block_size: usize,
    /// Row-major cell values in `[0, N]`, 0 meaning unassigned.
    cells: Vec<u8>,
    /// Linearized NxNxN candidate bits; only meaningful for empty cells.
    candidates: BitVec,
}

impl SudokuBoard {
    /// Creates a board with every cell empty and every value a candidate
    /// everywhere.
    #[must_use]
    pub fn empty(field_size: usize, block_size: usize) -> Self {
        Self {
            field_size,
            block_size,
            cells: vec![0; field_size * field_size],
            candidates: BitVec::from_elem(field_size * field_size * field_size, true),
        }
    }

    /// Creates a board from row-major cell values and computes the initial
    /// candidate mask by a full constraint scan.
    ///
    /// This is the only place full constraint checking occurs; all later mask
    /// updates are incremental removals in [`SudokuBoard::set`].
    ///
    /// # Panics
    ///
    /// If `cells` does not contain exactly `field_size * field_size` values.
    #[must_use]
    pub fn from_cells(field_size: usize, block_size: usize, cells: Vec<u8>) -> Self {
        assert_eq!(
            cells.len(),
            field_size * field_size,
            "cell count does not match the field size"
        );

        let mut board = Self {
            field_size,
            block_size,
            cells,
            candidates: BitVec::from_elem(field_size * field_size * field_size, false),
        };
        board.compute_candidates();
        board
    }

    /// Side length of the grid.
    #[must_use]
    pub const fn field_size(&self) -> usize {
        self.field_size
    }

    /// Side length of each sub-block.
    #[must_use]
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns the current assignment of a cell, 0 if empty.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[self.cell_index(row, col)]
    }

    /// Assigns `value` to the cell and removes it from the candidate sets of
    /// every empty cell sharing the row, the column or the block.
    ///
    /// The caller is expected to pass a value whose candidate bit is currently
    /// true; the board does not re-validate (the search guarantees this by
    /// construction).
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        debug_assert!(value >= 1 && usize::from(value) <= self.field_size);

        let index = self.cell_index(row, col);
        self.cells[index] = value;

        for i in 0..self.field_size {
            if self.get(row, i) == 0 {
                self.clear_candidate(row, i, value);
            }
            if self.get(i, col) == 0 {
                self.clear_candidate(i, col, value);
            }
        }

        let block_row = row - row % self.block_size;
        let block_col = col - col % self.block_size;

        for r in block_row..block_row + self.block_size {
            for c in block_col..block_col + self.block_size {
                if self.get(r, c) == 0 {
                    self.clear_candidate(r, c, value);
                }
            }
        }
    }

    /// Returns whether `value` is currently a candidate for the cell. O(1).
    ///
    /// Only meaningful while the cell is empty.
    #[must_use]
    pub fn is_candidate(&self, row: usize, col: usize, value: u8) -> bool {
        self.candidates
            .get(self.mask_index(row, col, value))
            .unwrap_or(false)
    }

    /// Collects the values currently consistent with the cell, in ascending
    /// order.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn candidate_values(&self, row: usize, col: usize) -> CandidateList {
        (1..=self.field_size as u8)
            .filter(|&value| self.is_candidate(row, col, value))
            .collect()
    }

    /// Number of unassigned cells.
    #[must_use]
    pub fn empty_cell_count(&self) -> usize {
        self.cells.iter().filter(|&&value| value == 0).count()
    }

    /// Returns whether the filled cells are mutually consistent: no value
    /// occurs twice within a row, a column or a block.
    ///
    /// Empty cells are ignored, so a valid board may still be unsolvable.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let n = self.field_size;
        let b = self.block_size;

        let rows_ok = (0..n).all(|row| {
            (0..n)
                .map(|col| self.get(row, col))
                .filter(|&value| value != 0)
                .all_unique()
        });
        let cols_ok = (0..n).all(|col| {
            (0..n)
                .map(|row| self.get(row, col))
                .filter(|&value| value != 0)
                .all_unique()
        });
        let blocks_ok = (0..n).step_by(b).cartesian_product((0..n).step_by(b)).all(
            |(block_row, block_col)| {
                (block_row..block_row + b)
                    .cartesian_product(block_col..block_col + b)
                    .map(|(row, col)| self.get(row, col))
                    .filter(|&value| value != 0)
                    .all_unique()
            },
        );

        rows_ok && cols_ok && blocks_ok
    }

    /// Linear index of a cell in the row-major grid.
    const fn cell_index(&self, row: usize, col: usize) -> usize {
        self.field_size * row + col
    }

    /// Linear index of a candidate bit.
    const fn mask_index(&self, row: usize, col: usize, value: u8) -> usize {
        self.field_size * self.field_size * row + self.field_size * col + (value as usize - 1)
    }

    fn clear_candidate(&mut self, row: usize, col: usize, value: u8) {
        let index = self.mask_index(row, col, value);
        self.candidates.set(index, false);
    }

    /// Computes the candidate bit of every empty cell by scanning its full
    /// row, column and block.
    fn compute_candidates(&mut self) {
        #[allow(clippy::cast_possible_truncation)]
        for row in 0..self.field_size {
            for col in 0..self.field_size {
                if self.get(row, col) != 0 {
                    continue;
                }
                for value in 1..=self.field_size as u8 {
                    if self.fits(row, col, value) {
                        let index = self.mask_index(row, col, value);
                        self.candidates.set(index, true);
                    }
                }
            }
        }
    }

    /// Full-scan consistency test for a single placement: `value` must not
    /// already occur in the cell's row, column or block.
    fn fits(&self, row: usize, col: usize, value: u8) -> bool {
        for i in 0..self.field_size {
            if self.get(row, i) == value || self.get(i, col) == value {
                return false;
            }
        }

        let block_row = row - row % self.block_size;
        let block_col = col - col % self.block_size;

        for r in block_row..block_row + self.block_size {
            for c in block_col..block_col + self.block_size {
                if self.get(r, c) == value {
                    return false;
                }
            }
        }

        true
    }
}

impl fmt::Display for SudokuBoard {
    /// Renders the grid in fixed-width columns for human inspection.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.field_size {
            for col in 0..self.field_size {
                write!(f, "{:>3} ", self.get(row, col))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

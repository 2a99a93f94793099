//! Depth-first backtracking search with scoped task fan-out.
//!
//! A search walks the grid in row-major order (columns fastest), skipping
//! filled cells. At every open cell it branches on each remaining candidate
//! value; a branch receives its own clone of the board at the fork point and
//! owns it exclusively from then on, so the removal-only candidate engine
//! never needs to undo anything.
//!
//! The first `fork_depth` decision levels spawn genuinely concurrent tasks on
//! the enclosing [`rayon::Scope`]; deeper levels run inline on the worker
//! that reached them, which keeps task-creation overhead proportional to the
//! cost of the remaining sub-search. Exhausted candidate sets are a normal
//! dead end, not an error: the branch simply contributes nothing.

use crate::sudoku::board::SudokuBoard;
use log::trace;
use rayon::Scope;
use std::sync::atomic::{AtomicU64, Ordering};

/// One exhaustive search over a set of board snapshots.
///
/// The solution counter is the only state shared between branches; it is
/// created when the search is built and read only after every spawned task
/// has joined.
pub(crate) struct Search {
    /// Decision levels that may still spawn concurrent tasks.
    fork_depth: usize,
    /// Whether completed boards are printed as they are found.
    emit_solutions: bool,
    /// Number of complete, constraint-valid assignments found so far.
    solutions: AtomicU64,
}

impl Search {
    pub(crate) const fn new(fork_depth: usize, emit_solutions: bool) -> Self {
        Self {
            fork_depth,
            emit_solutions,
            solutions: AtomicU64::new(0),
        }
    }

    /// Final counter value. Only meaningful once the scope the search ran on
    /// has completed.
    pub(crate) fn solutions(&self) -> u64 {
        self.solutions.load(Ordering::Relaxed)
    }

    /// Explores every completion of `board` starting at `(row, col)`,
    /// spawning children on `scope` while `depth` is within the fork budget.
    pub(crate) fn explore<'scope>(
        &'scope self,
        row: usize,
        col: usize,
        board: SudokuBoard,
        depth: usize,
        scope: &Scope<'scope>,
    ) {
        let Some((row, col)) = next_open_cell(&board, row, col) else {
            self.record(&board);
            return;
        };

        for value in board.candidate_values(row, col) {
            let mut branch = board.clone();
            branch.set(row, col, value);

            if depth < self.fork_depth {
                scope.spawn(move |inner| self.explore(row, col + 1, branch, depth + 1, inner));
            } else {
                self.explore_inline(row, col + 1, branch);
            }
        }
    }

    /// Sequential tail of the search, used once the fork budget is spent.
    fn explore_inline(&self, row: usize, col: usize, board: SudokuBoard) {
        let Some((row, col)) = next_open_cell(&board, row, col) else {
            self.record(&board);
            return;
        };

        for value in board.candidate_values(row, col) {
            let mut branch = board.clone();
            branch.set(row, col, value);
            self.explore_inline(row, col + 1, branch);
        }
    }

    fn record(&self, board: &SudokuBoard) {
        self.solutions.fetch_add(1, Ordering::Relaxed);
        trace!("a branch completed a full assignment");

        if self.emit_solutions {
            // A single formatted write holds the stdout lock for the whole
            // board, so concurrent emissions cannot interleave.
            print!("The following is a valid solution:\n{board}\n");
        }
    }
}

/// Advances the traversal index to the next open cell, wrapping rows.
/// Returns `None` once the grid is exhausted, i.e. the board is complete.
fn next_open_cell(board: &SudokuBoard, row: usize, col: usize) -> Option<(usize, usize)> {
    let n = board.field_size();
    let (mut row, mut col) = (row, col);

    loop {
        if col == n {
            row += 1;
            col = 0;
        }
        if row == n {
            return None;
        }
        if board.get(row, col) == 0 {
            return Some((row, col));
        }
        col += 1;
    }
}

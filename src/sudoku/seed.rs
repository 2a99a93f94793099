//! Bounded-depth enumeration of partial solutions.
//!
//! Seeding walks the grid in row-major order (columns fastest) and, for each
//! of the first `depth_limit` open cells, branches on every value that is
//! still a candidate. Each complete prefix of `depth_limit` assignments
//! yields one cloned board; together the seeds partition the search space of
//! the template restricted to those first decisions, so they can be solved as
//! fully independent units of parallel work.

use crate::sudoku::board::SudokuBoard;

/// The number of open cells filled during seeding by default.
pub const DEFAULT_SEED_DEPTH: usize = 7;

/// Enumerates all consistent assignments of the first `depth_limit` open
/// cells of `board`, returning one independent board per assignment.
///
/// Cells already filled in the template are skipped without consuming the
/// depth budget. A path that exhausts the grid before reaching `depth_limit`
/// contributes no seed; templates with fewer open cells than the limit are
/// handled by the coordinator, which falls back to searching the template
/// directly.
#[must_use]
pub fn generate_seeds(board: &SudokuBoard, depth_limit: usize) -> Vec<SudokuBoard> {
    let mut seeds = Vec::new();
    expand(board, 0, 0, 0, depth_limit, &mut seeds);
    seeds
}

fn expand(
    board: &SudokuBoard,
    row: usize,
    col: usize,
    assigned: usize,
    depth_limit: usize,
    seeds: &mut Vec<SudokuBoard>,
) {
    if assigned >= depth_limit {
        seeds.push(board.clone());
        return;
    }

    let n = board.field_size();
    let (row, col) = if col == n { (row + 1, 0) } else { (row, col) };
    if row == n {
        // Grid exhausted before the depth budget; nothing to seed.
        return;
    }

    if board.get(row, col) != 0 {
        expand(board, row, col + 1, assigned, depth_limit, seeds);
        return;
    }

    for value in board.candidate_values(row, col) {
        let mut branch = board.clone();
        branch.set(row, col, value);
        expand(&branch, row, col + 1, assigned + 1, depth_limit, seeds);
    }
}

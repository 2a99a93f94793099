//! The coordinator driving a full enumeration run.
//!
//! A run seeds the template into independent partial boards, dispatches one
//! search per seed onto the shared rayon worker pool, waits for the whole
//! task tree to drain and reads the global solution counter. Seeds never
//! depend on each other, so they may execute on any worker in any order; the
//! end of the scope is the only fan-in barrier.

use crate::sudoku::board::SudokuBoard;
use crate::sudoku::search::Search;
use crate::sudoku::seed::{DEFAULT_SEED_DEPTH, generate_seeds};
use log::debug;

/// Decision levels below a seed that may spawn concurrent tasks by default.
///
/// Seeding already fans the run out into many independent tasks, so only a
/// couple of further levels are worth the spawning overhead.
pub const DEFAULT_FORK_DEPTH: usize = 2;

/// Configuration and entry point for an exhaustive solving run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solver {
    /// Number of open cells filled during seeding.
    pub seed_depth: usize,
    /// Decision levels below a seed that may spawn concurrent tasks; deeper
    /// levels run inline on the worker that reached them.
    pub fork_depth: usize,
    /// Whether every found solution is printed as it is discovered.
    pub print_solutions: bool,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            seed_depth: DEFAULT_SEED_DEPTH,
            fork_depth: DEFAULT_FORK_DEPTH,
            print_solutions: false,
        }
    }
}

impl Solver {
    /// Creates a solver with the default seeding and forking depths.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exhaustively counts the complete, constraint-valid assignments
    /// reachable from `template`.
    ///
    /// Runs on the global rayon pool and returns only after every spawned
    /// task has completed. The count is independent of the pool size and of
    /// the configured depths; those only shape the task tree.
    #[must_use]
    pub fn solve(&self, template: &SudokuBoard) -> u64 {
        if !template.is_valid() {
            debug!("template already violates a constraint; no solutions exist");
            return 0;
        }

        if template.empty_cell_count() == 0 {
            // Already solved and just shown to be consistent.
            return 1;
        }

        let search = Search::new(self.fork_depth, self.print_solutions);
        let seeds = generate_seeds(template, self.seed_depth);

        if seeds.is_empty() {
            // Fewer open cells than the seeding depth; search the template
            // as a single unit instead.
            debug!("seeding exhausted the grid; searching the template directly");
            rayon::scope(|scope| search.explore(0, 0, template.clone(), 0, scope));
        } else {
            debug!("seeding produced {} partial boards", seeds.len());
            rayon::scope(|scope| {
                let search = &search;
                for seed in seeds {
                    scope.spawn(move |inner| search.explore(0, 0, seed, 0, inner));
                }
            });
        }

        search.solutions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_4x4(rows: [[u8; 4]; 4]) -> SudokuBoard {
        SudokuBoard::from_cells(4, 2, rows.into_iter().flatten().collect())
    }

    /// A complete, valid 9x9 grid used as a fixture.
    fn solved_9x9() -> Vec<u8> {
        let mut cells = Vec::with_capacity(81);
        for row in 0..9u8 {
            for col in 0..9u8 {
                // Shifting each band keeps rows, columns and blocks valid.
                cells.push((row * 3 + row / 3 + col) % 9 + 1);
            }
        }
        cells
    }

    #[test]
    fn test_empty_4x4_has_288_solutions() {
        let count = Solver::new().solve(&SudokuBoard::empty(4, 2));
        assert_eq!(count, 288);
    }

    #[test]
    fn test_solved_template_counts_one_without_branching() {
        let board = board_4x4([[1, 2, 3, 4], [3, 4, 1, 2], [2, 1, 4, 3], [4, 3, 2, 1]]);
        assert_eq!(Solver::new().solve(&board), 1);
    }

    #[test]
    fn test_template_with_duplicate_counts_zero() {
        let board = board_4x4([[1, 0, 0, 1], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        assert_eq!(Solver::new().solve(&board), 0);
    }

    #[test]
    fn test_complete_but_invalid_template_counts_zero() {
        let board = board_4x4([[1, 2, 3, 4], [3, 4, 1, 2], [2, 1, 4, 3], [4, 3, 1, 2]]);
        assert_eq!(Solver::new().solve(&board), 0);
    }

    #[test]
    fn test_unsatisfiable_template_counts_zero() {
        // (0, 0) is empty but has no remaining candidate.
        let board = board_4x4([[0, 1, 2, 0], [3, 0, 0, 0], [4, 0, 0, 0], [0, 0, 0, 0]]);
        assert_eq!(Solver::new().solve(&board), 0);
    }

    #[test]
    fn test_fallback_when_seeding_exhausts_the_grid() {
        // Two open cells, well below the default seeding depth of 7.
        let board = board_4x4([[1, 2, 3, 4], [3, 4, 1, 2], [2, 1, 4, 3], [4, 3, 0, 0]]);
        assert_eq!(Solver::new().solve(&board), 1);
    }

    #[test]
    fn test_nine_by_nine_with_forced_cells() {
        let mut cells = solved_9x9();
        let board = SudokuBoard::from_cells(9, 3, cells.clone());
        assert!(board.is_valid());
        assert_eq!(Solver::new().solve(&board), 1);

        // Blanking two cells of one row leaves a single completion, forced
        // by the columns.
        cells[0] = 0;
        cells[1] = 0;
        let board = SudokuBoard::from_cells(9, 3, cells);
        assert_eq!(Solver::new().solve(&board), 1);
    }

    #[test]
    fn test_seed_partition_covers_the_search_space() {
        // Expanding every seed to exhaustion must revisit exactly the full
        // solution set: no overlap, no omission.
        let template = SudokuBoard::empty(4, 2);
        let seeds = generate_seeds(&template, 3);
        let per_seed = Solver {
            seed_depth: 0,
            ..Solver::default()
        };

        let total: u64 = seeds.iter().map(|seed| per_seed.solve(seed)).sum();
        assert_eq!(total, 288);
    }

    #[test]
    fn test_depth_settings_do_not_change_the_count() {
        for (seed_depth, fork_depth) in [(0, 0), (1, 4), (7, 0), (12, 2)] {
            let solver = Solver {
                seed_depth,
                fork_depth,
                print_solutions: false,
            };
            assert_eq!(solver.solve(&SudokuBoard::empty(4, 2)), 288);
        }
    }

    #[test]
    fn test_single_worker_matches_the_default_pool() {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap();

        let single = pool.install(|| Solver::new().solve(&SudokuBoard::empty(4, 2)));
        let parallel = Solver::new().solve(&SudokuBoard::empty(4, 2));

        assert_eq!(single, 288);
        assert_eq!(single, parallel);
    }

    #[test]
    fn test_runs_are_idempotent() {
        let board = board_4x4([[1, 0, 0, 0], [0, 0, 0, 2], [0, 3, 0, 0], [0, 0, 0, 0]]);
        let solver = Solver::new();

        assert_eq!(solver.solve(&board), solver.solve(&board));
    }
}

#![deny(missing_docs)]
//! This crate exhaustively enumerates the solutions of a generalized NxN Sudoku
//! puzzle (rows, columns and BxB blocks must each contain every symbol exactly
//! once) using parallel backtracking search over incrementally pruned
//! candidate sets.

/// The `sudoku` module contains the board representation, the template loader,
/// the partial-solution seeder and the parallel backtracking search.
pub mod sudoku;

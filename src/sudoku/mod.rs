#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Exhaustive enumeration of generalized NxN Sudoku solutions.
//!
//! The pipeline is: load a template ([`template`]), expand its first few open
//! cells into independent partial boards ([`seed`]), then run one backtracking
//! search per partial board on a shared worker pool and aggregate the counts
//! ([`solver`]).

/// The `board` module provides the grid and its candidate bitmask.
pub mod board;

/// The `seed` module enumerates bounded-depth partial solutions used as
/// independent units of parallel work.
pub mod seed;

pub(crate) mod search;

/// The `solver` module drives a full run: seeding, task fan-out and solution
/// counting.
pub mod solver;

/// The `template` module loads an initial grid from a textual source.
pub mod template;

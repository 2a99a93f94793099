//! # sudoku-solver
//!
//! A command-line tool that exhaustively enumerates all solutions of a
//! generalized NxN Sudoku puzzle using parallel backtracking search.
//!
//! ## Usage
//!
//! ```sh
//! sudoku-solver <FIELD_SIZE> <BLOCK_SIZE> <PATH> [OPTIONS]
//! ```
//!
//! The template file holds `FIELD_SIZE * FIELD_SIZE` whitespace-separated
//! integers in row-major order, 0 marking an empty cell. By default only the
//! solution count is reported; `--print-solutions` emits every solution as it
//! is discovered.
//!
//! ```sh
//! # Count the solutions of a classic 9x9 puzzle
//! sudoku-solver 9 3 puzzle.sudoku
//!
//! # Print every solution of a 4x4 puzzle, searching on two workers
//! sudoku-solver 4 2 small.sudoku --print-solutions --threads 2
//! ```
//!
//! Configuration errors (an impossible size pair) and load errors (missing or
//! short template file) are fatal and reported before any solving begins.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use sudoku_solver::sudoku::board::SudokuBoard;
use sudoku_solver::sudoku::seed::DEFAULT_SEED_DEPTH;
use sudoku_solver::sudoku::solver::{DEFAULT_FORK_DEPTH, Solver};
use sudoku_solver::sudoku::template::parse_template_file;
use tikv_jemalloc_ctl::{epoch, stats};

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface of the solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "sudoku_solver",
    version,
    about = "A parallel exhaustive Sudoku solver"
)]
struct Cli {
    /// Side length of the grid (e.g. 9 for a classic Sudoku).
    field_size: usize,

    /// Side length of each sub-block (e.g. 3 for a classic Sudoku).
    block_size: usize,

    /// Path to the template file: field_size^2 whitespace-separated values in
    /// row-major order, 0 for an empty cell.
    path: PathBuf,

    /// Print every solution as it is found instead of only the final count.
    #[arg(short, long, default_value_t = false)]
    print_solutions: bool,

    /// Number of cells pre-filled during seeding; each consistent filling of
    /// that many cells becomes an independent unit of parallel work.
    #[arg(long, default_value_t = DEFAULT_SEED_DEPTH)]
    seed_depth: usize,

    /// Decision levels below a seed that may still spawn concurrent tasks;
    /// deeper levels run sequentially on the worker that reached them.
    #[arg(long, default_value_t = DEFAULT_FORK_DEPTH)]
    fork_depth: usize,

    /// Number of worker threads (defaults to the number of logical CPUs).
    #[arg(long)]
    threads: Option<usize>,

    /// Enable printing of performance statistics after solving.
    #[arg(short, long, default_value_t = true)]
    stats: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(message) = run(&cli) {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

/// Validates the configuration, loads the template, runs the solver and
/// reports the results.
fn run(cli: &Cli) -> Result<(), String> {
    validate_sizes(cli.field_size, cli.block_size)?;

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| format!("Failed to configure the worker pool: {e}"))?;
    }

    let parse_start = std::time::Instant::now();
    let board = parse_template_file(&cli.path, cli.field_size, cli.block_size).map_err(|e| {
        format!(
            "There was an error reading a Sudoku template from {}: {e}",
            cli.path.display()
        )
    })?;
    let parse_time = parse_start.elapsed();

    println!("Given Sudoku template:\n{board}");

    let solver = Solver {
        seed_depth: cli.seed_depth,
        fork_depth: cli.fork_depth,
        print_solutions: cli.print_solutions,
    };

    epoch::advance().unwrap();

    let solve_start = std::time::Instant::now();
    let solutions = solver.solve(&board);
    let elapsed = solve_start.elapsed();

    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();

    #[allow(clippy::cast_precision_loss)]
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    #[allow(clippy::cast_precision_loss)]
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if cli.stats {
        print_stats(
            parse_time,
            elapsed,
            &board,
            solutions,
            allocated_mib,
            resident_mib,
        );
    }

    println!(
        "Parallel computation took {:.3} seconds ({} threads).\n",
        elapsed.as_secs_f64(),
        rayon::current_num_threads()
    );
    println!("Number of solutions found: {solutions}");

    Ok(())
}

/// Rejects size pairs that cannot describe a Sudoku grid: blocks must tile
/// the field exactly, and values must fit the cell representation.
fn validate_sizes(field_size: usize, block_size: usize) -> Result<(), String> {
    if field_size == 0 {
        return Err("The field size must be positive.".to_owned());
    }

    if block_size * block_size != field_size {
        return Err(format!(
            "A block size of {block_size} does not describe a field of size {field_size}: \
             the square of the block size must equal the field size."
        ));
    }

    if field_size > usize::from(u8::MAX) {
        return Err(format!(
            "A field size of {field_size} is not supported (maximum {}).",
            u8::MAX
        ));
    }

    Ok(())
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
#[allow(clippy::cast_precision_loss)]
fn stat_line_with_rate(label: &str, value: u64, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    board: &SudokuBoard,
    solutions: u64,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Field size", board.field_size());
    stat_line("Block size", board.block_size());
    stat_line("Empty cells", board.empty_cell_count());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Solutions", solutions, elapsed_secs);
    stat_line("Worker threads", rayon::current_num_threads());
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("Solve time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}

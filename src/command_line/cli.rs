#![allow(clippy::cast_precision_loss)]
//! Defines the command-line interface for the sudoku solver application.
//!
//! Uses `clap` for parsing arguments.

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use core::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use sudoku_solver::solver::engine::{Config, Engine, SolveStats};
use sudoku_solver::solver::grid::Grid;
use sudoku_solver::solver::order::{Ascending, DigitOrder, Shuffled};
use sudoku_solver::solver::parse;
use sudoku_solver::solver::selection::{CellSelection, FirstEmpty, MinimumRemaining};
use sudoku_solver::solver::trace::PrintTrace;
use sudoku_solver::solver::validate::is_valid_solution;
use tikv_jemalloc_ctl::{epoch, stats};

/// The command-line interface of the solver.
#[derive(Parser, Debug)]
#[command(name = "sudoku-solver", version, about = "A configurable Sudoku solver")]
pub struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `dir`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a puzzle file.
    File {
        /// Path to the puzzle file. See `solver::parse` for the format.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle provided as plain text (81 cells; `0`, `.` or `_`
    /// for empty, whitespace ignored).
    Text {
        /// The puzzle as a string.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.sudoku` file under a directory.
    Dir {
        /// Path to the directory to sweep.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Cell selection strategies exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SelectionChoice {
    /// Branch on the empty cell with the fewest candidates.
    #[default]
    MinimumRemaining,
    /// Branch on the first empty cell in row-major order.
    FirstEmpty,
}

impl fmt::Display for SelectionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinimumRemaining => write!(f, "minimum-remaining"),
            Self::FirstEmpty => write!(f, "first-empty"),
        }
    }
}

/// Digit trial orders exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OrderChoice {
    /// Try candidate digits in ascending order.
    #[default]
    Ascending,
    /// Try candidate digits in random order.
    Shuffled,
}

impl fmt::Display for OrderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "ascending"),
            Self::Shuffled => write!(f, "shuffled"),
        }
    }
}

/// Defines common command-line options shared across subcommands.
#[derive(Args, Debug, Default, Clone)]
pub struct CommonOptions {
    /// Print every deduction and branch decision while solving.
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,

    /// Run the independent validator on any solution found.
    #[arg(short, long, default_value_t = true)]
    pub verify: bool,

    /// Print solving statistics.
    #[arg(short, long, default_value_t = true)]
    pub stats: bool,

    /// Cell selection strategy for branching.
    #[arg(long, value_enum, default_value_t = SelectionChoice::MinimumRemaining)]
    pub selection: SelectionChoice,

    /// Order in which a branch cell's candidate digits are tried.
    #[arg(long, value_enum, default_value_t = OrderChoice::Ascending)]
    pub digit_order: OrderChoice,
}

/// Dispatches a parsed [`Cli`] to the matching command handler.
///
/// # Errors
///
/// Returns a message describing any parse or I/O failure.
pub fn run(cli: Cli) -> Result<(), String> {
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            return solve_file(&path, &cli.common);
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common),
        Some(Commands::Text { input, common }) => solve_text(&input, &common),
        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),
        Some(Commands::Completions { shell }) => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut io::stdout());
            Ok(())
        }
        None => Err("No command provided. Use --help for more information.".into()),
    }
}

/// Solves a puzzle file.
///
/// # Errors
///
/// If the file doesn't exist or doesn't hold a well-formed puzzle.
pub fn solve_file(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_file() {
        return Err(format!("Provided path is not a file: {}", path.display()));
    }

    let time = std::time::Instant::now();
    let puzzle = parse::parse_file(path)
        .map_err(|e| format!("Error parsing puzzle file {}: {e}", path.display()))?;
    let parse_time = time.elapsed();

    println!("Solving: {}", path.display());
    solve_and_report(&puzzle, parse_time, common)
}

/// Solves a puzzle given as plain text.
///
/// # Errors
///
/// If the text doesn't hold a well-formed puzzle.
pub fn solve_text(input: &str, common: &CommonOptions) -> Result<(), String> {
    let time = std::time::Instant::now();
    let puzzle = parse::parse_str(input).map_err(|e| format!("Error parsing puzzle: {e}"))?;
    let parse_time = time.elapsed();

    solve_and_report(&puzzle, parse_time, common)
}

/// Solves every `.sudoku` file under a directory.
///
/// # Errors
///
/// If the path is not a directory, or any puzzle file fails to parse.
pub fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("Provided path is not a directory: {}", path.display()));
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "sudoku") {
            eprintln!("Skipping non-puzzle file: {}", file_path.display());
            continue;
        }
        solve_file(file_path, common)?;
    }

    Ok(())
}

/// Solves a parsed puzzle and reports the result, statistics and memory
/// usage according to `common`.
fn solve_and_report(
    puzzle: &Grid,
    parse_time: Duration,
    common: &CommonOptions,
) -> Result<(), String> {
    println!("Parsed puzzle:\n{puzzle}");

    epoch::advance().unwrap();

    let time = std::time::Instant::now();
    let (solution, solve_stats) = run_engine(puzzle, common);
    let elapsed = time.elapsed();

    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify {
        verify_solution(solution.as_ref());
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            puzzle,
            solve_stats,
            allocated_mib,
            resident_mib,
            solution.is_some(),
        );
    }

    if let Some(solution) = solution {
        println!("Solution:\n{solution}");
    } else {
        println!("No solution found");
    }

    Ok(())
}

/// Runs the engine with the strategies selected on the command line.
fn run_engine(puzzle: &Grid, common: &CommonOptions) -> (Option<Grid>, SolveStats) {
    match (common.selection, common.digit_order) {
        (SelectionChoice::MinimumRemaining, OrderChoice::Ascending) => {
            run_with::<MinimumRemaining, Ascending>(puzzle, common.debug)
        }
        (SelectionChoice::MinimumRemaining, OrderChoice::Shuffled) => {
            run_with::<MinimumRemaining, Shuffled>(puzzle, common.debug)
        }
        (SelectionChoice::FirstEmpty, OrderChoice::Ascending) => {
            run_with::<FirstEmpty, Ascending>(puzzle, common.debug)
        }
        (SelectionChoice::FirstEmpty, OrderChoice::Shuffled) => {
            run_with::<FirstEmpty, Shuffled>(puzzle, common.debug)
        }
    }
}

fn run_with<S, O>(puzzle: &Grid, debug: bool) -> (Option<Grid>, SolveStats)
where
    S: CellSelection + fmt::Debug,
    O: DigitOrder + fmt::Debug,
{
    let mut engine =
        Engine::<Config<S, O, PrintTrace>>::from_parts(S::new(), O::new(), PrintTrace::new(debug));
    let solution = engine.solve(puzzle);
    (solution, engine.stats())
}

/// Checks a solution with the independent validator and reports the
/// outcome. Panics if a produced solution fails validation.
fn verify_solution(solution: Option<&Grid>) {
    if let Some(grid) = solution {
        let ok = is_valid_solution(grid);
        println!("Verified: {ok:?}");
        assert!(ok, "Solution failed verification!");
    } else {
        println!("UNSOLVABLE");
    }
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
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
    puzzle: &Grid,
    s: SolveStats,
    allocated: f64,
    resident: f64,
    solved: bool,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Givens", puzzle.given_count());
    stat_line("Empty cells", puzzle.empty_cells().count());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Passes", s.passes, elapsed_secs);
    stat_line_with_rate("Naked singles", s.naked_singles, elapsed_secs);
    stat_line_with_rate("Hidden singles", s.hidden_singles, elapsed_secs);
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if solved {
        println!("\nSOLVED");
    } else {
        println!("\nUNSOLVABLE");
    }
}

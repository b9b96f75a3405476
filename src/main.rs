//! Entry point for the `sudoku-solver` binary.
//!
//! Parses command-line arguments and hands them to `command_line::cli`.

use clap::Parser;
use command_line::cli::{run, Cli};

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// usage statistics the CLI reports.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

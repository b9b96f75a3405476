//! Command-line front end for the solver binary.

pub mod cli;

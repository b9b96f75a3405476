#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod candidate;
pub mod engine;
pub mod grid;
pub mod order;
pub mod parse;
pub mod propagation;
pub mod selection;
pub mod trace;
pub mod validate;

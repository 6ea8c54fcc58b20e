//! koplan Rank - Move ranking over an external damage formula
//!
//! This crate sits between a per-generation damage formula and the engine:
//! it asks the formula for each candidate move's distributions, stacks
//! multi-hit strikes, runs the kill search, and orders the moves.

pub mod formula;
pub mod ranking;

pub use formula::{DamageFormula, MoveTable, TableFormula};
pub use ranking::{compare_reports, compare_rankings, evaluate_move, rank_moves, MoveRanking};

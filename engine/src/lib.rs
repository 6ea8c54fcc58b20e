//! koplan Engine - Damage distributions and kill-turn search
//!
//! This crate contains the damage roll histogram type, the algebra used to
//! stack and partition rolls, and the search that turns a normal/crit pair of
//! distributions into a kill-turn report against a fixed HP pool.
//!
//! Everything here is a pure function over immutable values. Per-generation
//! damage formulas live outside the engine and only hand it distributions.

pub mod config;
pub mod distribution;
pub mod error;
pub mod report;
pub mod search;

pub use config::SearchConfig;
pub use distribution::{multi_hit, CombineRule, DamageRollDistribution};
pub use error::DistributionError;
pub use report::{Confidence, KillEntry, KillReport};
pub use search::{find_kill, find_kill_with_accuracy};

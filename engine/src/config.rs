//! Search configuration

use crate::distribution::CombineRule;
use serde::{Deserialize, Serialize};

/// Default number of attacks searched.
pub const DEFAULT_ATTACK_DEPTH: u32 = 8;

/// Default minimum confidence (percent) for an entry to be reported.
pub const DEFAULT_PERCENT_CUTOFF: f64 = 0.1;

/// Default maximum number of distinct damage values enumerated exactly.
pub const DEFAULT_WIDTH_LIMIT: usize = 40;

/// Cost and reporting controls for the kill search.
///
/// Deserializes from partial JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Largest attack count examined (>= 1)
    pub attack_depth: u32,
    /// Entries at or below this percentage are dropped
    pub percent_cutoff: f64,
    /// Normal distributions with more distinct values skip the exact scan
    pub width_limit: usize,
    /// Rule used to stack strikes of multi-hit moves
    pub multi_hit_rule: CombineRule,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            attack_depth: DEFAULT_ATTACK_DEPTH,
            percent_cutoff: DEFAULT_PERCENT_CUTOFF,
            width_limit: DEFAULT_WIDTH_LIMIT,
            multi_hit_rule: CombineRule::Legacy,
        }
    }
}

impl SearchConfig {
    pub fn with_attack_depth(mut self, attack_depth: u32) -> Self {
        self.attack_depth = attack_depth;
        self
    }

    pub fn with_percent_cutoff(mut self, percent_cutoff: f64) -> Self {
        self.percent_cutoff = percent_cutoff;
        self
    }
}

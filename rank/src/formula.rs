//! Damage formula provider interface
//!
//! Per-generation damage arithmetic lives outside this workspace. The ranking
//! code only needs it to hand back a normal and a crit distribution per move,
//! plus the move's crit rate, accuracy and strike count.

use koplan_engine::DamageRollDistribution;
use serde::{Deserialize, Serialize};

/// Damage formula provider trait
///
/// Implementations must be pure: identical inputs always yield identical
/// distributions. A move that deals no damage (zero power, type immunity)
/// returns `None`, never an empty distribution.
pub trait DamageFormula {
    type Attacker;
    type Move;
    type Defender;
    type Modifiers;

    /// Damage of a single strike, normal or critical.
    fn distribution(
        &self,
        attacker: &Self::Attacker,
        mv: &Self::Move,
        defender: &Self::Defender,
        modifiers: &Self::Modifiers,
        is_crit: bool,
    ) -> Option<DamageRollDistribution>;

    /// Probability that a strike is critical.
    fn crit_rate(&self, attacker: &Self::Attacker, mv: &Self::Move) -> f64;

    /// Probability that the move lands at all.
    fn accuracy(&self, _attacker: &Self::Attacker, _mv: &Self::Move) -> f64 {
        1.0
    }

    /// Number of strikes per use.
    fn hits(&self, _mv: &Self::Move) -> u32 {
        1
    }
}

/// A move with precomputed distributions, as stored in matchup files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveTable {
    pub name: String,
    /// `None` when the move deals no damage
    #[serde(default)]
    pub normal: Option<DamageRollDistribution>,
    /// Falls back to `normal` when absent
    #[serde(default)]
    pub crit: Option<DamageRollDistribution>,
    #[serde(default)]
    pub crit_chance: f64,
    #[serde(default = "full_accuracy")]
    pub accuracy: f64,
    #[serde(default = "single_hit")]
    pub hits: u32,
}

fn full_accuracy() -> f64 {
    1.0
}

fn single_hit() -> u32 {
    1
}

/// Replays the distributions recorded in [`MoveTable`]s.
///
/// Attacker, defender and modifiers are already folded into the tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableFormula;

impl DamageFormula for TableFormula {
    type Attacker = ();
    type Move = MoveTable;
    type Defender = ();
    type Modifiers = ();

    fn distribution(
        &self,
        _attacker: &(),
        mv: &MoveTable,
        _defender: &(),
        _modifiers: &(),
        is_crit: bool,
    ) -> Option<DamageRollDistribution> {
        if is_crit {
            mv.crit.clone().or_else(|| mv.normal.clone())
        } else {
            mv.normal.clone()
        }
    }

    fn crit_rate(&self, _attacker: &(), mv: &MoveTable) -> f64 {
        mv.crit_chance
    }

    fn accuracy(&self, _attacker: &(), mv: &MoveTable) -> f64 {
        mv.accuracy
    }

    fn hits(&self, mv: &MoveTable) -> u32 {
        mv.hits
    }
}

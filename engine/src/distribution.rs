//! Damage roll distributions
//!
//! A [`DamageRollDistribution`] is a non-normalized histogram over positive
//! damage values: each value maps to the number of equally likely underlying
//! roll outcomes that produce it. Probabilities are implicit, `count / size`.
//!
//! Distributions are immutable values. Combining or splitting them always
//! allocates a new value, and "no damage" is `None`, never an empty
//! histogram.

use crate::error::DistributionError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How multiplicities accumulate when two distributions are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineRule {
    /// Sum multiplicities (`c1 + c2`), see [`DamageRollDistribution::combine_legacy`]
    #[default]
    Legacy,
    /// Multiply multiplicities (`c1 * c2`), a standard convolution
    Independent,
}

/// Histogram of damage value → multiplicity with cached extrema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<u32, u64>", into = "BTreeMap<u32, u64>")]
pub struct DamageRollDistribution {
    values: BTreeMap<u32, u64>,
    min_damage: u32,
    max_damage: u32,
    size: u64,
}

impl DamageRollDistribution {
    /// Build a distribution from a damage → multiplicity map.
    ///
    /// Fails with [`DistributionError::Overflow`] when the multiplicities do
    /// not sum within a `u64`.
    pub fn new(values: BTreeMap<u32, u64>) -> Result<Self, DistributionError> {
        if values.contains_key(&0) {
            return Err(DistributionError::ZeroDamage);
        }
        if let Some((&damage, _)) = values.iter().find(|(_, &count)| count == 0) {
            return Err(DistributionError::ZeroMultiplicity { damage });
        }
        checked_size(&values)?;
        Self::from_map(values).ok_or(DistributionError::EmptyDistribution)
    }

    /// Build from `(damage, multiplicity)` pairs. Repeated damage values are merged.
    pub fn from_entries<I>(entries: I) -> Result<Self, DistributionError>
    where
        I: IntoIterator<Item = (u32, u64)>,
    {
        let mut values = BTreeMap::new();
        for (damage, count) in entries {
            if count == 0 {
                return Err(DistributionError::ZeroMultiplicity { damage });
            }
            let slot = values.entry(damage).or_insert(0u64);
            *slot = slot.checked_add(count).ok_or(DistributionError::Overflow)?;
        }
        Self::new(values)
    }

    /// Build from the damage of each equally likely roll (one count per roll).
    pub fn from_rolls(rolls: &[u32]) -> Result<Self, DistributionError> {
        Self::from_entries(rolls.iter().map(|&damage| (damage, 1)))
    }

    /// Wrap an already validated map whose size fits; `None` if it is empty.
    fn from_map(values: BTreeMap<u32, u64>) -> Option<Self> {
        let (&min_damage, _) = values.first_key_value()?;
        let (&max_damage, _) = values.last_key_value()?;
        let size = values.values().sum();
        Some(DamageRollDistribution {
            values,
            min_damage,
            max_damage,
            size,
        })
    }

    /// Smallest damage value
    pub fn min_damage(&self) -> u32 {
        self.min_damage
    }

    /// Largest damage value
    pub fn max_damage(&self) -> u32 {
        self.max_damage
    }

    /// Total number of underlying outcomes (sum of multiplicities)
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of distinct damage values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Multiplicity of a damage value (0 if absent)
    pub fn multiplicity(&self, damage: u32) -> u64 {
        self.values.get(&damage).copied().unwrap_or(0)
    }

    /// Iterate `(damage, multiplicity)` in ascending damage order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.values.iter().map(|(&damage, &count)| (damage, count))
    }

    /// Expected damage of one roll.
    pub fn mean(&self) -> f64 {
        let weighted: f64 = self.iter().map(|(d, c)| d as f64 * c as f64).sum();
        weighted / self.size as f64
    }

    /// Stack two attacks, summing multiplicities of every pair.
    ///
    /// For each `(v1, c1)` in `self` and `(v2, c2)` in `other` this adds
    /// `c1 + c2` at `v1 + v2`. This is NOT a probability-preserving
    /// convolution (that would be `c1 * c2`, see [`combine_independent`]);
    /// it reproduces the established multi-hit numbers and must only be
    /// replaced deliberately.
    ///
    /// Fails with [`DistributionError::Overflow`] when a damage sum leaves
    /// `u32` or a multiplicity leaves `u64`.
    ///
    /// [`combine_independent`]: Self::combine_independent
    pub fn combine_legacy(&self, other: &Self) -> Result<Self, DistributionError> {
        self.combine_with(other, u64::checked_add)
    }

    /// Stack two independent attacks (standard convolution, `c1 * c2`).
    ///
    /// The result's size is `self.size() * other.size()`.
    pub fn combine_independent(&self, other: &Self) -> Result<Self, DistributionError> {
        self.combine_with(other, u64::checked_mul)
    }

    /// Stack two attacks using the given rule.
    pub fn combine(&self, other: &Self, rule: CombineRule) -> Result<Self, DistributionError> {
        match rule {
            CombineRule::Legacy => self.combine_legacy(other),
            CombineRule::Independent => self.combine_independent(other),
        }
    }

    fn combine_with(
        &self,
        other: &Self,
        weight: impl Fn(u64, u64) -> Option<u64>,
    ) -> Result<Self, DistributionError> {
        let mut values = BTreeMap::new();
        for (v1, c1) in self.iter() {
            for (v2, c2) in other.iter() {
                let damage = v1.checked_add(v2).ok_or(DistributionError::Overflow)?;
                let count = weight(c1, c2).ok_or(DistributionError::Overflow)?;
                let slot = values.entry(damage).or_insert(0u64);
                *slot = slot.checked_add(count).ok_or(DistributionError::Overflow)?;
            }
        }
        let size = checked_size(&values)?;
        Ok(DamageRollDistribution {
            values,
            min_damage: self.min_damage + other.min_damage,
            max_damage: self.max_damage + other.max_damage,
            size,
        })
    }

    /// Partition into `(value >= threshold, value < threshold)`.
    ///
    /// Either side is `None` when no value falls into it.
    pub fn split(&self, threshold: u32) -> (Option<Self>, Option<Self>) {
        if threshold > self.max_damage {
            return (None, Some(self.clone()));
        }
        if threshold <= self.min_damage {
            return (Some(self.clone()), None);
        }
        let mut below = self.values.clone();
        let at_or_above = below.split_off(&threshold);
        (Self::from_map(at_or_above), Self::from_map(below))
    }

    /// Percent chance (0-100) that one roll deals at least `threshold` damage.
    pub fn chance_at_least(&self, threshold: u32) -> f64 {
        match self.split(threshold) {
            (Some(kill), _) => 100.0 * kill.size as f64 / self.size as f64,
            (None, _) => 0.0,
        }
    }
}

/// Damage of a `hits`-strike move, as `(normal_total, crit_total)`.
///
/// `normal_total` stacks `hits` normal rolls. `crit_total` stacks one crit
/// roll with `hits - 1` normal rolls: only one strike of the sequence may
/// crit.
pub fn multi_hit(
    normal: &DamageRollDistribution,
    crit: &DamageRollDistribution,
    hits: u32,
    rule: CombineRule,
) -> Result<(DamageRollDistribution, DamageRollDistribution), DistributionError> {
    debug_assert!(hits >= 1, "a move must strike at least once");
    let mut normal_total = normal.clone();
    let mut crit_total = crit.clone();
    for _ in 1..hits {
        normal_total = normal_total.combine(normal, rule)?;
        crit_total = crit_total.combine(normal, rule)?;
    }
    Ok((normal_total, crit_total))
}

fn checked_size(values: &BTreeMap<u32, u64>) -> Result<u64, DistributionError> {
    values
        .values()
        .try_fold(0u64, |acc, &count| acc.checked_add(count))
        .ok_or(DistributionError::Overflow)
}

impl TryFrom<BTreeMap<u32, u64>> for DamageRollDistribution {
    type Error = DistributionError;

    fn try_from(values: BTreeMap<u32, u64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<DamageRollDistribution> for BTreeMap<u32, u64> {
    fn from(dist: DamageRollDistribution) -> Self {
        dist.values
    }
}

/// Formats as `damage:count` pairs, e.g. `8:26,10:13`.
impl fmt::Display for DamageRollDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (damage, count)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{damage}:{count}")?;
        }
        Ok(())
    }
}

/// Parses `damage:count` pairs separated by commas. A bare `damage` counts once.
impl FromStr for DamageRollDistribution {
    type Err = DistributionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut entries = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (damage, count) = match part.split_once(':') {
                Some((d, c)) => (d.trim(), c.trim()),
                None => (part, "1"),
            };
            let damage = damage
                .parse::<u32>()
                .map_err(|e| DistributionError::Parse(format!("damage \"{damage}\": {e}")))?;
            let count = count
                .parse::<u64>()
                .map_err(|e| DistributionError::Parse(format!("count \"{count}\": {e}")))?;
            entries.push((damage, count));
        }
        Self::from_entries(entries)
    }
}

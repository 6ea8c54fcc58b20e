//! Kill-turn probability search
//!
//! For k = 1..=attack_depth repeated attacks against a fixed HP pool, computes
//! the probability that the running damage total reaches the target, mixing
//! a normal and a critical distribution with a per-attack crit chance.
//!
//! Each horizon first tries the cheap extrema bounds (kill impossible, kill
//! guaranteed). Only when a kill is possible but not certain does the search
//! enumerate roll outcomes, counting leaves exactly in `u128`. Subtrees are
//! pruned as soon as the remaining attacks either must or cannot reach the
//! target, and a per-call memo keyed on `(normal left, crits left, total)`
//! collapses repeated states. The memo is shared across horizons of one call
//! and dropped on return.

use crate::config::SearchConfig;
use crate::distribution::DamageRollDistribution;
use crate::report::{KillEntry, KillReport};
use log::{debug, trace, warn};
use std::collections::HashMap;

/// Totals this close to 100% end the scan.
const CERTAINTY_TOLERANCE: f64 = 1e-9;

/// Kill-turn report for repeated attacks that always hit.
///
/// Preconditions (not checked in release builds): `target_hp >= 1`,
/// `config.attack_depth >= 1`, `crit_chance` in `[0, 1]`.
pub fn find_kill(
    normal: &DamageRollDistribution,
    crit: &DamageRollDistribution,
    crit_chance: f64,
    target_hp: u32,
    config: &SearchConfig,
) -> KillReport {
    find_kill_with_accuracy(normal, crit, crit_chance, 1.0, target_hp, config)
}

/// Kill-turn report for repeated attacks that land with probability `accuracy`.
///
/// A miss is a zero-damage outcome. With `accuracy < 1` no horizon is
/// guaranteed by the extrema bound, so every possible horizon is enumerated
/// and no worst-case bound is appended. Such a report holds only percent
/// entries and is empty when none of them clears the cutoff.
pub fn find_kill_with_accuracy(
    normal: &DamageRollDistribution,
    crit: &DamageRollDistribution,
    crit_chance: f64,
    accuracy: f64,
    target_hp: u32,
    config: &SearchConfig,
) -> KillReport {
    debug_assert!(target_hp >= 1, "target HP must be positive");
    debug_assert!(config.attack_depth >= 1, "attack depth must be positive");
    debug_assert!((0.0..=1.0).contains(&crit_chance), "crit chance out of range");
    debug_assert!((0.0..=1.0).contains(&accuracy), "accuracy out of range");

    let mut report = KillReport::new();
    let mut search = KillSearch::new(normal, crit, target_hp);

    let mut exact = normal.len() <= config.width_limit;
    if !exact {
        debug!(
            "{} distinct damage values exceeds width limit {}, skipping exact scan",
            normal.len(),
            config.width_limit
        );
    }

    let hp = target_hp as u64;
    let lowest = normal.min_damage().min(crit.min_damage()) as u64;
    let highest = normal.max_damage().max(crit.max_damage()) as u64;
    let can_miss = accuracy < 1.0;

    for k in 1..=config.attack_depth {
        let min_possible = if can_miss { 0 } else { k as u64 * lowest };
        let max_possible = k as u64 * highest;

        if max_possible < hp {
            trace!("{k} attacks: at most {max_possible} damage, kill impossible");
            continue;
        }
        if min_possible >= hp {
            debug!("{k} attacks: at least {min_possible} damage, kill guaranteed");
            report.push(KillEntry::percent(k, 100.0));
            return report;
        }
        if !exact {
            continue;
        }
        if !search.fits(k) {
            warn!("leaf count for {k} attacks overflows u128, stopping exact scan");
            exact = false;
            continue;
        }

        let total = search.kill_chance(k, crit_chance, accuracy);
        trace!("{k} attacks: {total:.4}% kill chance");
        if total > config.percent_cutoff {
            report.push(KillEntry::percent(k, total.min(100.0)));
        }
        if total >= 100.0 - CERTAINTY_TOLERANCE {
            return report;
        }
    }

    // A miss deals nothing, so no turn count bounds the kill.
    if can_miss {
        debug!("attacks can miss, no worst-case bound");
        return report;
    }
    report.push(KillEntry::bound(target_hp.div_ceil(normal.min_damage())));
    report
}

/// Exact leaf counting over one `(normal, crit, target)` triple.
struct KillSearch<'a> {
    normal: &'a DamageRollDistribution,
    crit: &'a DamageRollDistribution,
    target_hp: u64,
    /// (normal attacks left, crit attacks left, damage so far) → killing leaves
    memo: HashMap<(u32, u32, u64), u128>,
}

impl<'a> KillSearch<'a> {
    fn new(
        normal: &'a DamageRollDistribution,
        crit: &'a DamageRollDistribution,
        target_hp: u32,
    ) -> Self {
        KillSearch {
            normal,
            crit,
            target_hp: target_hp as u64,
            memo: HashMap::new(),
        }
    }

    /// Whether every leaf count for `k` attacks fits in a `u128`.
    fn fits(&self, k: u32) -> bool {
        let widest = self.normal.size().max(self.crit.size()) as u128;
        widest.checked_pow(k).is_some()
    }

    /// Total leaves below a state: `normal.size^nc * crit.size^c`.
    fn leaves(&self, remaining_normal: u32, remaining_crit: u32) -> u128 {
        (self.normal.size() as u128).pow(remaining_normal)
            * (self.crit.size() as u128).pow(remaining_crit)
    }

    /// Percent chance that `k` attacks reach the target.
    ///
    /// Sums over miss counts and crit counts, each weighted binomially.
    fn kill_chance(&mut self, k: u32, crit_chance: f64, accuracy: f64) -> f64 {
        let mut total = 0.0;
        for misses in 0..=k {
            let hits = k - misses;
            let miss_weight = binomial(k, misses)
                * accuracy.powi(hits as i32)
                * (1.0 - accuracy).powi(misses as i32);
            if miss_weight == 0.0 {
                continue;
            }
            for crits in 0..=hits {
                let weight = miss_weight
                    * binomial(hits, crits)
                    * crit_chance.powi(crits as i32)
                    * (1.0 - crit_chance).powi((hits - crits) as i32);
                if weight == 0.0 {
                    continue;
                }
                let kills = self.exact_kill_count(hits - crits, crits, 0);
                let leaves = self.leaves(hits - crits, crits);
                total += weight * (kills as f64 / leaves as f64);
            }
        }
        100.0 * total
    }

    /// Leaves below this state whose damage total reaches the target.
    fn exact_kill_count(
        &mut self,
        remaining_normal: u32,
        remaining_crit: u32,
        total: u64,
    ) -> u128 {
        let min_remaining = remaining_normal as u64 * self.normal.min_damage() as u64
            + remaining_crit as u64 * self.crit.min_damage() as u64;
        if total + min_remaining >= self.target_hp {
            return self.leaves(remaining_normal, remaining_crit);
        }
        if remaining_normal == 0 && remaining_crit == 0 {
            return 0;
        }
        let max_remaining = remaining_normal as u64 * self.normal.max_damage() as u64
            + remaining_crit as u64 * self.crit.max_damage() as u64;
        if total + max_remaining < self.target_hp {
            return 0;
        }

        let key = (remaining_normal, remaining_crit, total);
        if let Some(&count) = self.memo.get(&key) {
            return count;
        }

        // Crit slots are consumed first.
        let (dist, next_normal, next_crit) = if remaining_crit > 0 {
            (self.crit, remaining_normal, remaining_crit - 1)
        } else {
            (self.normal, remaining_normal - 1, remaining_crit)
        };
        let mut count = 0u128;
        for (value, multiplicity) in dist.iter() {
            count += multiplicity as u128
                * self.exact_kill_count(next_normal, next_crit, total + value as u64);
        }

        self.memo.insert(key, count);
        count
    }
}

/// C(n, k) as a float.
fn binomial(n: u32, k: u32) -> f64 {
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

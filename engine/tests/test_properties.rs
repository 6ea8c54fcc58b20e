//! Property-based tests for distribution algebra and kill search.

use proptest::prelude::*;
use std::collections::BTreeMap;

use koplan_engine::{
    find_kill, find_kill_with_accuracy, DamageRollDistribution, KillEntry, SearchConfig,
};

/// Strategy: a small valid histogram (1-6 distinct values in 1..=30).
fn dist_strategy() -> impl Strategy<Value = DamageRollDistribution> {
    prop::collection::btree_map(1..=30u32, 1..=5u64, 1..=6)
        .prop_map(|m| DamageRollDistribution::new(m).unwrap())
}

/// Strategy: a crit chance, including both extremes.
fn crit_chance_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(1.0), 0.0..=1.0f64]
}

proptest! {
    // 1. Cached extrema and size agree with the entries
    #[test]
    fn histogram_invariant(m in prop::collection::btree_map(1..=500u32, 1..=40u64, 1..=20)) {
        let d = DamageRollDistribution::new(m.clone()).unwrap();
        prop_assert_eq!(d.min_damage(), *m.keys().next().unwrap());
        prop_assert_eq!(d.max_damage(), *m.keys().next_back().unwrap());
        prop_assert_eq!(d.size(), m.values().sum::<u64>());
        for (damage, count) in d.iter() {
            prop_assert!(damage >= d.min_damage() && damage <= d.max_damage());
            prop_assert_eq!(m[&damage], count);
        }
    }

    // 2. Combined extrema are the sums of the inputs' extrema
    #[test]
    fn combine_extrema(a in dist_strategy(), b in dist_strategy()) {
        for c in [a.combine_legacy(&b).unwrap(), a.combine_independent(&b).unwrap()] {
            prop_assert_eq!(c.min_damage(), a.min_damage() + b.min_damage());
            prop_assert_eq!(c.max_damage(), a.max_damage() + b.max_damage());
        }
    }

    // 3. Legacy combine accumulates c1 + c2 per pair, not c1 * c2
    #[test]
    fn combine_legacy_multiplicity(a in dist_strategy(), b in dist_strategy()) {
        let mut expected = BTreeMap::new();
        for (v1, c1) in a.iter() {
            for (v2, c2) in b.iter() {
                *expected.entry(v1 + v2).or_insert(0u64) += c1 + c2;
            }
        }
        let c = a.combine_legacy(&b).unwrap();
        prop_assert_eq!(c.size(), expected.values().sum::<u64>());
        prop_assert_eq!(
            c.size(),
            b.len() as u64 * a.size() + a.len() as u64 * b.size()
        );
        for (damage, count) in c.iter() {
            prop_assert_eq!(expected[&damage], count);
        }
    }

    // 4. Independent combine preserves probability mass
    #[test]
    fn combine_independent_size(a in dist_strategy(), b in dist_strategy()) {
        prop_assert_eq!(a.combine_independent(&b).unwrap().size(), a.size() * b.size());
    }

    // 5. Split conserves every outcome and respects the threshold
    #[test]
    fn split_conserves_size(d in dist_strategy(), threshold in 0..=35u32) {
        let (kill, rest) = d.split(threshold);
        let kill_size = kill.as_ref().map_or(0, |k| k.size());
        let rest_size = rest.as_ref().map_or(0, |r| r.size());
        prop_assert_eq!(kill_size + rest_size, d.size());
        if let Some(k) = kill {
            prop_assert!(k.min_damage() >= threshold);
        }
        if let Some(r) = rest {
            prop_assert!(r.max_damage() < threshold);
        }
    }

    // 6. Nothing follows a certain kill, reported entries clear the cutoff,
    //    and the report is never empty
    #[test]
    fn find_kill_report_laws(
        normal in dist_strategy(),
        crit in dist_strategy(),
        crit_chance in crit_chance_strategy(),
        target_hp in 1..=120u32,
        depth in 1..=4u32,
        cutoff in prop_oneof![Just(0.1), 0.0..50.0f64],
    ) {
        let config = SearchConfig::default()
            .with_attack_depth(depth)
            .with_percent_cutoff(cutoff);
        let report = find_kill(&normal, &crit, crit_chance, target_hp, &config);
        prop_assert!(!report.is_empty());

        let entries = report.entries();
        for (i, entry) in entries.iter().enumerate() {
            prop_assert!(entry.turns >= 1);
            match entry.confidence.percent() {
                Some(p) => {
                    prop_assert!(p > cutoff, "p={p} cutoff={cutoff}");
                    prop_assert!(p <= 100.0);
                    prop_assert!(entry.turns <= depth);
                    if p >= 100.0 - 1e-9 {
                        prop_assert_eq!(i, entries.len() - 1);
                    }
                }
                None => prop_assert_eq!(i, entries.len() - 1),
            }
        }
        for pair in entries.windows(2) {
            if !pair[1].confidence.is_bound() {
                prop_assert!(pair[0].turns < pair[1].turns);
            }
        }
    }

    // 7. Out-of-horizon targets yield exactly the worst-case bound
    #[test]
    fn find_kill_fallback(
        normal in dist_strategy(),
        crit_chance in crit_chance_strategy(),
        depth in 1..=8u32,
        extra in 1..=50u32,
    ) {
        let target_hp = depth * normal.max_damage() + extra;
        let config = SearchConfig::default().with_attack_depth(depth);
        let report = find_kill(&normal, &normal, crit_chance, target_hp, &config);
        prop_assert_eq!(
            report.entries(),
            &[KillEntry::bound(target_hp.div_ceil(normal.min_damage()))]
        );
    }

    // 8. Attacks that can miss get percent entries only, ascending by turns
    #[test]
    fn find_kill_with_misses_has_no_bound(
        normal in dist_strategy(),
        crit in dist_strategy(),
        crit_chance in crit_chance_strategy(),
        accuracy in 0.0..1.0f64,
        target_hp in 1..=60u32,
        depth in 1..=3u32,
    ) {
        let config = SearchConfig::default().with_attack_depth(depth);
        let report =
            find_kill_with_accuracy(&normal, &crit, crit_chance, accuracy, target_hp, &config);
        for entry in report.iter() {
            prop_assert!(!entry.confidence.is_bound());
            prop_assert!(entry.turns <= depth);
        }
        for pair in report.entries().windows(2) {
            prop_assert!(pair[0].turns < pair[1].turns);
        }
    }
}

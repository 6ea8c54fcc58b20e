//! Move ranking for a single matchup
//!
//! Every candidate move is evaluated independently: the provider's
//! distributions are stacked for multi-hit moves, then run through the kill
//! search. Moves share nothing but immutable inputs, so they are evaluated in
//! parallel with Rayon.

use crate::formula::DamageFormula;
use koplan_engine::{
    find_kill_with_accuracy, multi_hit, Confidence, DistributionError, KillReport, SearchConfig,
};
use log::debug;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;

/// Kill report of one candidate move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveRanking {
    /// Position of the move in the input slice
    pub index: usize,
    /// `None` when the move deals no damage
    pub report: Option<KillReport>,
}

/// Kill report for one move, or `None` if it deals no damage.
///
/// Fails when stacking a multi-hit move overflows the distribution counts.
pub fn evaluate_move<F: DamageFormula>(
    formula: &F,
    attacker: &F::Attacker,
    mv: &F::Move,
    defender: &F::Defender,
    modifiers: &F::Modifiers,
    target_hp: u32,
    config: &SearchConfig,
) -> Result<Option<KillReport>, DistributionError> {
    let Some(normal) = formula.distribution(attacker, mv, defender, modifiers, false) else {
        return Ok(None);
    };
    let crit = formula
        .distribution(attacker, mv, defender, modifiers, true)
        .unwrap_or_else(|| normal.clone());

    let hits = formula.hits(mv);
    let (normal, crit) = if hits > 1 {
        multi_hit(&normal, &crit, hits, config.multi_hit_rule)?
    } else {
        (normal, crit)
    };

    Ok(Some(find_kill_with_accuracy(
        &normal,
        &crit,
        formula.crit_rate(attacker, mv),
        formula.accuracy(attacker, mv),
        target_hp,
        config,
    )))
}

/// Evaluate every move and order them best first.
///
/// See [`compare_rankings`] for the order. Ties keep input order. Fails if
/// any move fails to evaluate.
pub fn rank_moves<F>(
    formula: &F,
    attacker: &F::Attacker,
    moves: &[F::Move],
    defender: &F::Defender,
    modifiers: &F::Modifiers,
    target_hp: u32,
    config: &SearchConfig,
) -> Result<Vec<MoveRanking>, DistributionError>
where
    F: DamageFormula + Sync,
    F::Attacker: Sync,
    F::Move: Sync,
    F::Defender: Sync,
    F::Modifiers: Sync,
{
    let mut rankings: Vec<MoveRanking> = moves
        .par_iter()
        .enumerate()
        .map(|(index, mv)| -> Result<MoveRanking, DistributionError> {
            let report =
                evaluate_move(formula, attacker, mv, defender, modifiers, target_hp, config)?;
            match &report {
                Some(r) => debug!("move {index}: {r}"),
                None => debug!("move {index}: no damage"),
            }
            Ok(MoveRanking { index, report })
        })
        .collect::<Result<_, _>>()?;

    rankings.sort_by(compare_rankings);
    Ok(rankings)
}

/// Moves with a report come before moves without one.
pub fn compare_rankings(a: &MoveRanking, b: &MoveRanking) -> Ordering {
    match (&a.report, &b.report) {
        (Some(ra), Some(rb)) => compare_reports(ra, rb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Entry by entry: fewer turns first, then higher confidence.
///
/// A worst-case bound ranks below any exact percentage. When one report is a
/// prefix of the other, the shorter one (it stopped at certainty) ranks first.
/// An empty report (no kill chance above the cutoff) ranks last.
pub fn compare_reports(a: &KillReport, b: &KillReport) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (false, true) => return Ordering::Less,
        (true, false) => return Ordering::Greater,
        _ => {}
    }
    for (ea, eb) in a.iter().zip(b.iter()) {
        let ord = ea
            .turns
            .cmp(&eb.turns)
            .then_with(|| compare_confidence(ea.confidence, eb.confidence));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

fn compare_confidence(a: Confidence, b: Confidence) -> Ordering {
    match (a, b) {
        (Confidence::Percent(pa), Confidence::Percent(pb)) => {
            pb.partial_cmp(&pa).unwrap_or(Ordering::Equal)
        }
        (Confidence::Percent(_), Confidence::WorstCaseBound) => Ordering::Less,
        (Confidence::WorstCaseBound, Confidence::Percent(_)) => Ordering::Greater,
        (Confidence::WorstCaseBound, Confidence::WorstCaseBound) => Ordering::Equal,
    }
}

//! koplan CLI - Command-line interface for the kill-turn planner
//!
//! This binary provides a harness over the engine and the ranking crate:
//! single kill searches, threshold splits, and whole-matchup move ranking.

mod config;
mod matchup;

use anyhow::{ensure, Context, Result};
use clap::{Args, Parser, Subcommand};
use koplan_engine::{
    find_kill_with_accuracy, multi_hit, DamageRollDistribution, KillReport, SearchConfig,
};
use koplan_rank::{rank_moves, TableFormula};
use log::info;
use matchup::Matchup;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "koplan", author, version, about = "Kill-turn planner", long_about = None)]
struct Cli {
    /// Path to a JSON search configuration
    #[arg(short, long, env = "KOPLAN_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Largest attack count searched (overrides config)
    #[arg(short, long)]
    depth: Option<u32>,

    /// Minimum reported confidence in percent (overrides config)
    #[arg(long)]
    cutoff: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Kill-turn report for one attack against a target HP pool
    Kill(KillArgs),
    /// Chance that one roll deals at least a threshold of damage
    Split {
        /// Damage distribution, e.g. "8:26,10:13"
        #[arg(long)]
        dist: DamageRollDistribution,
        /// Damage threshold
        #[arg(long)]
        threshold: u32,
    },
    /// Rank every move of a matchup file
    Matchup {
        /// Matchup JSON file
        file: PathBuf,
        /// Override the file's target HP
        #[arg(long)]
        hp: Option<u32>,
    },
}

#[derive(Args)]
struct KillArgs {
    /// Normal damage distribution, e.g. "8:26,10:13"
    #[arg(long)]
    normal: DamageRollDistribution,
    /// Critical damage distribution (defaults to the normal one)
    #[arg(long)]
    crit: Option<DamageRollDistribution>,
    /// Chance that a strike is critical
    #[arg(long, default_value_t = 0.0)]
    crit_chance: f64,
    /// Chance that the attack lands
    #[arg(long, default_value_t = 1.0)]
    accuracy: f64,
    /// Strikes per use
    #[arg(long, default_value_t = 1)]
    hits: u32,
    /// Target HP
    #[arg(long)]
    hp: u32,
}

#[derive(Serialize)]
struct SplitSummary {
    threshold: u32,
    percent: f64,
    at_or_above: Option<DamageRollDistribution>,
    below: Option<DamageRollDistribution>,
}

#[derive(Serialize)]
struct RankedMove<'a> {
    name: &'a str,
    report: Option<KillReport>,
}

/// Config file (or defaults) with command line overrides applied.
fn search_config(
    path: Option<&Path>,
    depth: Option<u32>,
    cutoff: Option<f64>,
) -> Result<SearchConfig> {
    let mut config = config::load(path)?;
    if let Some(depth) = depth {
        config.attack_depth = depth;
    }
    if let Some(cutoff) = cutoff {
        config.percent_cutoff = cutoff;
    }
    ensure!(config.attack_depth >= 1, "attack depth must be at least 1");
    Ok(config)
}

fn ensure_probability(name: &str, p: f64) -> Result<()> {
    ensure!((0.0..=1.0).contains(&p), "{name} must be within [0, 1], got {p}");
    Ok(())
}

fn kill_report(args: &KillArgs, config: &SearchConfig) -> Result<KillReport> {
    ensure!(args.hp >= 1, "target HP must be at least 1");
    ensure!(args.hits >= 1, "a move must strike at least once");
    ensure_probability("crit chance", args.crit_chance)?;
    ensure_probability("accuracy", args.accuracy)?;

    let crit = args.crit.as_ref().unwrap_or(&args.normal);
    let (normal, crit) = multi_hit(&args.normal, crit, args.hits, config.multi_hit_rule)
        .with_context(|| format!("failed to stack {} hits", args.hits))?;
    Ok(find_kill_with_accuracy(
        &normal,
        &crit,
        args.crit_chance,
        args.accuracy,
        args.hp,
        config,
    ))
}

fn split_summary(dist: &DamageRollDistribution, threshold: u32) -> SplitSummary {
    let (at_or_above, below) = dist.split(threshold);
    SplitSummary {
        threshold,
        percent: dist.chance_at_least(threshold),
        at_or_above,
        below,
    }
}

fn rank_matchup<'a>(
    matchup: &'a Matchup,
    hp: Option<u32>,
    config: &SearchConfig,
) -> Result<Vec<RankedMove<'a>>> {
    let target_hp = hp.unwrap_or(matchup.target_hp);
    ensure!(target_hp >= 1, "target HP must be at least 1");
    for mv in &matchup.moves {
        ensure!(mv.hits >= 1, "move {} must strike at least once", mv.name);
        ensure_probability(&format!("crit chance of {}", mv.name), mv.crit_chance)?;
        ensure_probability(&format!("accuracy of {}", mv.name), mv.accuracy)?;
    }

    info!(
        "Ranking {} moves against {} HP",
        matchup.moves.len(),
        target_hp
    );
    let rankings = rank_moves(
        &TableFormula,
        &(),
        &matchup.moves,
        &(),
        &(),
        target_hp,
        config,
    )
    .context("failed to rank matchup moves")?;
    Ok(rankings
        .into_iter()
        .map(|r| RankedMove {
            name: &matchup.moves[r.index].name,
            report: r.report,
        })
        .collect())
}

fn describe(report: &KillReport, config: &SearchConfig) -> String {
    if report.is_empty() {
        format!("no kill chance within {} attacks", config.attack_depth)
    } else {
        report.to_string()
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = search_config(cli.config.as_deref(), cli.depth, cli.cutoff)?;

    match &cli.command {
        Command::Kill(args) => {
            let report = kill_report(args, &config)?;
            if cli.json {
                print_json(&report)?;
            } else {
                println!("{}", describe(&report, &config));
            }
        }
        Command::Split { dist, threshold } => {
            let summary = split_summary(dist, *threshold);
            if cli.json {
                print_json(&summary)?;
            } else {
                println!(
                    "{:.1}% chance of at least {} damage",
                    summary.percent, summary.threshold
                );
            }
        }
        Command::Matchup { file, hp } => {
            let matchup = Matchup::load(file)?;
            let ranked = rank_matchup(&matchup, *hp, &config)?;

            if cli.json {
                print_json(&ranked)?;
            } else {
                for (place, mv) in ranked.iter().enumerate() {
                    match &mv.report {
                        Some(report) => println!(
                            "{:>2}. {:<20} {}",
                            place + 1,
                            mv.name,
                            describe(report, &config)
                        ),
                        None => println!("{:>2}. {:<20} no damage", place + 1, mv.name),
                    }
                }
            }
        }
    }

    Ok(())
}

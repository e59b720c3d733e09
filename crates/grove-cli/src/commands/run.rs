//! Play a match.

use anyhow::{Context, Result};
use colored::Colorize;
use grove::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::info;

use crate::config::Config;

pub struct RunArgs {
    pub rounds: Option<u64>,
    pub seed: Option<u64>,
    pub config: Option<String>,
    pub json: bool,
    pub verbose: bool,
}

pub fn run(args: RunArgs) -> Result<()> {
    let (mut config, source) = Config::load(args.config.as_deref().map(Path::new))?;
    if let Some(seed) = args.seed {
        config.game.seed = seed;
    }
    let game_config = config.game_config()?;
    let limit = args
        .rounds
        .map_or(game_config.max_rounds, |r| r.min(game_config.max_rounds));

    if !args.json {
        if let Some(path) = &source {
            println!("{} Using {}", "→".blue(), path.display());
        }
        println!(
            "{} Playing seed {} for up to {} rounds...",
            "→".blue(),
            game_config.seed.to_string().cyan(),
            limit.to_string().cyan()
        );
    }

    let mut game = Game::new(game_config).context("Failed to set up the match")?;

    let pb = if args.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(limit)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} rounds")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );

    let mut played = 0;
    while played < limit && game.outcome().is_none() {
        let events = game.round();
        played += 1;
        if args.verbose {
            for event in &events {
                if let GameEvent::Spawned { id, team, role, .. } = event {
                    pb.println(format!("  {team} {role} {id} joined"));
                }
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let stats = game.stats();
    info!(
        rounds = played,
        decided = stats.outcome.is_some(),
        alive = stats.agents_alive,
        "match finished"
    );

    if args.json {
        let json = serde_json::to_string_pretty(&stats).context("Failed to serialize stats")?;
        println!("{json}");
        return Ok(());
    }

    print_summary(&stats);
    Ok(())
}

fn print_summary(stats: &GameStats) {
    println!();
    match stats.outcome {
        Some(outcome) => {
            let verdict = match outcome.winner {
                Some(team) => format!("{team} wins"),
                None => "Draw".to_string(),
            };
            println!(
                "{} {} by {:?} in round {}",
                "✓".green().bold(),
                verdict.bold(),
                outcome.reason,
                outcome.round
            );
        }
        None => println!(
            "{} Undecided after {} rounds",
            "•".yellow(),
            stats.round
        ),
    }

    for (team, ledger) in &stats.ledgers {
        println!(
            "  {}: {} points, {} bullets, {} trees",
            team.to_string().bold(),
            ledger.score.to_string().green(),
            format!("{:.1}", ledger.bullets).yellow(),
            stats.trees.get(team).copied().unwrap_or(0)
        );
        if let Some(units) = stats.units.get(team) {
            let roster: Vec<String> = units
                .iter()
                .map(|(role, count)| format!("{count} {role}"))
                .collect();
            println!("    {}", roster.join(", "));
        }
    }
    println!(
        "  Agents: {} alive, {} spawned, {} yielded ticks",
        stats.agents_alive.to_string().cyan(),
        stats.total_spawned,
        stats.total_yields
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE;

    #[test]
    fn json_run_plays_a_short_match() {
        let scratch = tempfile::tempdir().unwrap();
        let path = scratch.path().join(CONFIG_FILE);
        Config::default().save(&path).unwrap();

        let args = RunArgs {
            rounds: Some(5),
            seed: Some(3),
            config: Some(path.display().to_string()),
            json: true,
            verbose: false,
        };
        run(args).unwrap();
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let scratch = tempfile::tempdir().unwrap();
        let args = RunArgs {
            rounds: Some(1),
            seed: None,
            config: Some(scratch.path().join("absent.toml").display().to_string()),
            json: true,
            verbose: false,
        };
        assert!(run(args).is_err());
    }
}

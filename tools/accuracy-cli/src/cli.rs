//! # Command Line Interface
//!
//! Argument parsing, configuration loading and the two report commands.

use crate::render;
use accuracy_engine::{
    current_week, AccuracyConfig, LeaderboardMode, PointsLeaderboard, SeasonReport, SeasonRun,
    WeekOutcome, WeekRange,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use player_registry::{NameResolver, PositionGroup};
use serde::{Deserialize, Serialize};
use stats_fetcher::{FetcherConfig, RankingsStore, SleeperFetcher};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Expert rankings accuracy reports
#[derive(Parser)]
#[command(name = "accuracy-cli")]
#[command(
    about = "Score weekly fantasy football rankings and love/hate calls against actual results"
)]
#[command(version = "0.1.0")]
pub struct Cli {
    /// TOML file with [accuracy] and [fetcher] tables
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log progress at info level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare weekly rankings and love/hate calls with actual results
    Analyze {
        /// Week or range of weeks ("5", "3-9"); empty analyzes every week so far
        #[arg(short, long, default_value = "")]
        weeks: String,

        /// Only print the cumulative results
        #[arg(long)]
        skip_to_cumulative: bool,

        /// Show each love/hate call with its points and percentile
        #[arg(long)]
        show_love_hate_players: bool,

        /// Print weekly outcomes and the season report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Season points leaders per position group
    Rankings {
        /// Week or range of weeks; empty includes every week so far
        #[arg(short, long, default_value = "")]
        weeks: String,

        /// Comma-separated groups (e.g. "qb,rb"); empty includes every group
        #[arg(short, long, default_value = "")]
        positions: String,

        /// Total points or per-game average
        #[arg(short, long, value_enum, default_value = "cumulative")]
        mode: Mode,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Cumulative,
    PerGame,
}

impl From<Mode> for LeaderboardMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Cumulative => LeaderboardMode::Cumulative,
            Mode::PerGame => LeaderboardMode::PerGame,
        }
    }
}

/// Contents of the `--config` file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub accuracy: AccuracyConfig,
    pub fetcher: FetcherConfig,
}

impl CliConfig {
    /// Load from an optional TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: CliConfig = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?
            }
            None => CliConfig::default(),
        };

        Ok(Self {
            accuracy: config.accuracy.with_env_overrides()?,
            fetcher: config.fetcher.with_env_overrides()?,
        })
    }
}

/// Parse a comma-separated list of groups; empty means all of them
pub fn parse_positions(text: &str) -> Result<Vec<PositionGroup>> {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Ok(PositionGroup::ALL.to_vec());
    }
    cleaned
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<PositionGroup>().with_context(|| format!("Unknown position '{s}'")))
        .collect()
}

#[derive(Serialize)]
struct AnalysisJson<'a> {
    weeks: &'a [WeekOutcome],
    report: &'a SeasonReport,
}

/// CLI handler
pub struct CliHandler {
    config: CliConfig,
}

impl CliHandler {
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        Ok(Self { config: CliConfig::load(config_path)? })
    }

    /// Handle CLI commands
    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Analyze { weeks, skip_to_cumulative, show_love_hate_players, json } => {
                self.analyze(&weeks, skip_to_cumulative, show_love_hate_players, json).await
            }
            Commands::Rankings { weeks, positions, mode } => {
                self.rankings(&weeks, &parse_positions(&positions)?, mode.into()).await
            }
        }
    }

    /// Weeks to process: parsed, then clamped to `first_week` and the current week
    fn week_range(&self, text: &str, first_week: u32) -> Result<WeekRange> {
        let accuracy = &self.config.accuracy;
        let today = chrono::Local::now().date_naive();
        let latest = current_week(accuracy.season_start, today).min(accuracy.last_week);

        let requested = WeekRange::parse(text, WeekRange::new(first_week, latest))?;
        Ok(requested.clamp(first_week, latest))
    }

    async fn analyze(
        &self,
        weeks: &str,
        skip_to_cumulative: bool,
        show_players: bool,
        json: bool,
    ) -> Result<()> {
        let range = self.week_range(weeks, self.config.accuracy.first_rankings_week)?;
        if range.is_empty() {
            println!("No weeks with rankings data to analyze yet.");
            return Ok(());
        }
        info!("Analyzing {}", range);

        let fetcher = SleeperFetcher::new(self.config.fetcher.clone())?;
        let directory = fetcher.fetch_directory().await?;
        let store = RankingsStore::new(self.config.accuracy.clone());
        let mut run = SeasonRun::new(self.config.accuracy.clone(), directory);

        let mut outcomes = Vec::new();
        for week in range.weeks() {
            let snapshot = match fetcher.fetch_week_snapshot(week, run.directory()).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    error!("Skipping week {}: {:#}", week, e);
                    continue;
                }
            };
            let inputs = store.load_week(week, run.resolver()).await;
            let outcome = run.process_week(&snapshot, inputs);

            if !skip_to_cumulative && !json {
                render::week_outcome(&outcome, show_players);
            }
            outcomes.push(outcome);
        }

        let report = run.reporter().build();
        if json {
            let body = AnalysisJson { weeks: &outcomes, report: &report };
            println!("{}", serde_json::to_string_pretty(&body)?);
        } else {
            render::season_report(&report, range);
        }
        Ok(())
    }

    async fn rankings(
        &self,
        weeks: &str,
        groups: &[PositionGroup],
        mode: LeaderboardMode,
    ) -> Result<()> {
        let accuracy = &self.config.accuracy;
        // Points exist before the first rankings week
        let range = self.week_range(weeks, 1)?;
        if range.is_empty() {
            println!("No weeks with stats yet.");
            return Ok(());
        }

        let fetcher = SleeperFetcher::new(self.config.fetcher.clone())?;
        let directory = fetcher.fetch_directory().await?;

        let mut boards: Vec<PointsLeaderboard> = groups
            .iter()
            .map(|&g| PointsLeaderboard::new(g, mode, accuracy.min_games_per_game))
            .collect();

        for week in range.weeks() {
            let snapshot = match fetcher.fetch_week_snapshot(week, &directory).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    error!("Skipping week {}: {:#}", week, e);
                    continue;
                }
            };
            for board in &mut boards {
                board.add_week(&snapshot);
            }
        }

        let resolver = NameResolver::new();
        for board in &boards {
            let rows = board.rows(&directory, &resolver, accuracy.leaderboard_size);
            render::leaderboard(board.group(), board.mode(), range, &rows);
        }
        Ok(())
    }
}

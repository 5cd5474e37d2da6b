//! # Configuration Management
//!
//! Season parameters and file locations for the accuracy engine.

use crate::error::{AccuracyError, Result};
use crate::models::Week;
use chrono::NaiveDate;
use player_registry::PositionGroup;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the accuracy engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccuracyConfig {
    /// Season year (e.g., 2019)
    pub season: i32,

    /// Sunday of week 1
    pub season_start: NaiveDate,

    /// Earliest week with rankings files
    pub first_rankings_week: Week,

    /// Last regular-season week
    pub last_week: Week,

    /// Directory holding `week{N}/{group}.txt` and `week{N}/love_hate.txt`
    pub rankings_dir: PathBuf,

    /// Groups that love/hate calls are made for
    pub love_hate_groups: Vec<PositionGroup>,

    /// Minimum games for the per-game leaderboard
    pub min_games_per_game: u32,

    /// Number of players on a points leaderboard
    pub leaderboard_size: usize,

    /// Number of most/least predictable players per group in the report
    pub report_top_n: usize,
}

impl Default for AccuracyConfig {
    fn default() -> Self {
        Self {
            season: 2019,
            season_start: NaiveDate::from_ymd_opt(2019, 9, 8).unwrap_or_default(),
            first_rankings_week: 3,
            last_week: 17,
            rankings_dir: PathBuf::from("."),
            love_hate_groups: vec![
                PositionGroup::QB,
                PositionGroup::RB,
                PositionGroup::WR,
                PositionGroup::TE,
            ],
            min_games_per_game: 3,
            leaderboard_size: 15,
            report_top_n: 3,
        }
    }
}

impl AccuracyConfig {
    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(season) = std::env::var("ACCURACY_SEASON") {
            self.season = season
                .parse()
                .map_err(|_| AccuracyError::config(format!("ACCURACY_SEASON={season}")))?;
        }

        if let Ok(start) = std::env::var("ACCURACY_SEASON_START") {
            self.season_start = NaiveDate::parse_from_str(&start, "%Y-%m-%d")
                .map_err(|_| AccuracyError::config(format!("ACCURACY_SEASON_START={start}")))?;
        }

        if let Ok(dir) = std::env::var("ACCURACY_RANKINGS_DIR") {
            self.rankings_dir = PathBuf::from(dir);
        }

        self.validate()?;
        Ok(self)
    }

    /// Check that the week bounds are consistent
    pub fn validate(&self) -> Result<()> {
        if self.first_rankings_week == 0 || self.first_rankings_week > self.last_week {
            return Err(AccuracyError::config(format!(
                "first_rankings_week {} must be between 1 and last_week {}",
                self.first_rankings_week, self.last_week
            )));
        }
        Ok(())
    }

    /// Path of a group's rankings file for a week
    pub fn rankings_path(&self, week: Week, group: PositionGroup) -> PathBuf {
        self.rankings_dir.join(format!("week{week}")).join(format!("{}.txt", group.file_stem()))
    }

    /// Path of the love/hate file for a week
    pub fn love_hate_path(&self, week: Week) -> PathBuf {
        self.rankings_dir.join(format!("week{week}")).join("love_hate.txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AccuracyConfig::default();
        assert_eq!(config.season, 2019);
        assert_eq!(config.season_start, NaiveDate::from_ymd_opt(2019, 9, 8).unwrap());
        assert_eq!(config.first_rankings_week, 3);
        assert_eq!(config.love_hate_groups.len(), 4);
        assert!(!config.love_hate_groups.contains(&PositionGroup::DEF));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AccuracyConfig = toml::from_str(
            r#"
            season = 2020
            season_start = "2020-09-13"
            rankings_dir = "data/2020"
            "#,
        )
        .unwrap();
        config.validate().unwrap();
        assert_eq!(config.season, 2020);
        assert_eq!(config.rankings_dir, PathBuf::from("data/2020"));
        assert_eq!(config.last_week, 17);
        assert_eq!(
            config.rankings_path(4, PositionGroup::DEF),
            PathBuf::from("data/2020/week4/def.txt")
        );
        assert_eq!(config.love_hate_path(4), PathBuf::from("data/2020/week4/love_hate.txt"));
    }

    #[test]
    fn test_invalid_weeks_rejected() {
        let late: AccuracyConfig = toml::from_str("first_rankings_week = 20").unwrap();
        assert!(late.validate().is_err());
        let zero = AccuracyConfig { first_rankings_week: 0, ..Default::default() };
        assert!(zero.validate().is_err());
        assert!(toml::from_str::<AccuracyConfig>("season = \"twenty\"").is_err());
    }
}

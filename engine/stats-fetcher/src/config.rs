use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the Sleeper stats fetcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Sleeper API base URL
    pub base_url: String,

    /// Season year used in stats URLs
    pub season: i32,

    /// Season type segment of the stats URL ("regular", "post")
    pub season_type: String,

    /// Local copy of the full players document
    pub players_cache_path: PathBuf,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.sleeper.app/v1".to_string(),
            season: 2019,
            season_type: "regular".to_string(),
            players_cache_path: PathBuf::from("players.json"),
            timeout_secs: 30,
        }
    }
}

impl FetcherConfig {
    /// Override fields with environment variables if present
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(base_url) = std::env::var("SLEEPER_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(season) = std::env::var("SLEEPER_SEASON") {
            self.season =
                season.parse().with_context(|| format!("Invalid SLEEPER_SEASON: {season}"))?;
        }

        if let Ok(path) = std::env::var("SLEEPER_PLAYERS_CACHE") {
            self.players_cache_path = PathBuf::from(path);
        }

        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// URL of the full players document
    pub fn players_url(&self) -> String {
        format!("{}/players/nfl", self.base_url.trim_end_matches('/'))
    }

    /// URL of one week's stats
    pub fn week_stats_url(&self, week: u32) -> String {
        format!(
            "{}/stats/nfl/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.season_type,
            self.season,
            week
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let config = FetcherConfig::default();
        assert_eq!(config.players_url(), "https://api.sleeper.app/v1/players/nfl");
        assert_eq!(
            config.week_stats_url(7),
            "https://api.sleeper.app/v1/stats/nfl/regular/2019/7"
        );

        let config = FetcherConfig {
            base_url: "http://localhost:8080/".to_string(),
            season: 2020,
            ..Default::default()
        };
        assert_eq!(config.week_stats_url(1), "http://localhost:8080/stats/nfl/regular/2020/1");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: FetcherConfig =
            toml::from_str("season = 2020\nplayers_cache_path = \"cache/players.json\"\n").unwrap();
        assert_eq!(config.season, 2020);
        assert_eq!(config.players_cache_path, PathBuf::from("cache/players.json"));
        assert_eq!(config.season_type, "regular");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }
}

use crate::config::FetcherConfig;
use crate::convert::{build_directory, build_snapshot, parse_keyed};
use crate::models::{SleeperPlayer, StatLine};
use accuracy_engine::WeekSnapshot;
use anyhow::{Context, Result};
use player_registry::EntityDirectory;
use reqwest::Client;
use tracing::{info, warn};

/// Sleeper API client
///
/// The players document is large and rarely changes, so it is kept on disk
/// and only downloaded when the cache file is missing.
pub struct SleeperFetcher {
    config: FetcherConfig,
    client: Client,
}

impl SleeperFetcher {
    /// Create a new fetcher instance
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response =
            self.client.get(url).send().await.with_context(|| format!("Failed to fetch {url}"))?;

        if !response.status().is_success() {
            anyhow::bail!("API request to {} failed with status: {}", url, response.status());
        }

        response.text().await.with_context(|| format!("Failed to read response body from {url}"))
    }

    /// Players document, from the cache file when present
    pub async fn fetch_players(&self) -> Result<Vec<(String, SleeperPlayer)>> {
        let path = &self.config.players_cache_path;

        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => {
                info!("Loading players from {}", path.display());
                text
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let url = self.config.players_url();
                info!("No players cache at {}; downloading from {}", path.display(), url);
                let text = self.get_text(&url).await?;
                if let Err(e) = tokio::fs::write(path, &text).await {
                    warn!("Failed to write players cache {}: {}", path.display(), e);
                }
                text
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read players cache {}", path.display()))
            }
        };

        let players = parse_keyed(&text)
            .with_context(|| format!("Players document {} is not valid", path.display()))?;
        info!("Loaded {} players", players.len());
        Ok(players)
    }

    /// Directory of every player at a scored position
    pub async fn fetch_directory(&self) -> Result<EntityDirectory> {
        let players = self.fetch_players().await?;
        Ok(build_directory(&players))
    }

    /// Raw stat lines for a week, in document order
    pub async fn fetch_week_stats(&self, week: u32) -> Result<Vec<(String, StatLine)>> {
        let url = self.config.week_stats_url(week);
        info!("Fetching stats for week {} from: {}", week, url);

        let text = self.get_text(&url).await?;
        let stats =
            parse_keyed(&text).with_context(|| format!("Failed to parse stats for week {week}"))?;

        info!("Successfully fetched {} stat lines for week {}", stats.len(), week);
        Ok(stats)
    }

    /// One fetch per week, shared by every group scored that week
    pub async fn fetch_week_snapshot(
        &self,
        week: u32,
        directory: &EntityDirectory,
    ) -> Result<WeekSnapshot> {
        let stats = self.fetch_week_stats(week).await?;
        Ok(build_snapshot(week, &stats, directory))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn offline_config(cache: PathBuf) -> FetcherConfig {
        // Nothing listens here, so any download attempt fails fast
        FetcherConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            players_cache_path: cache,
            timeout_secs: 2,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_players_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("players.json");
        tokio::fs::write(
            &cache,
            concat!(
                r#"{"2749":{"full_name":"Dak Prescott","position":"QB"},"#,
                r#""DAL":{"last_name":"Cowboys","position":"DEF"}}"#,
            ),
        )
        .await
        .unwrap();

        let fetcher = SleeperFetcher::new(offline_config(cache)).unwrap();
        let directory = fetcher.fetch_directory().await.unwrap();
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.get("DAL").unwrap().display_name, "Cowboys");
    }

    #[tokio::test]
    async fn test_corrupt_cache_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("players.json");
        tokio::fs::write(&cache, r#"{"2749": {"full_name": "Dak Prescott""#).await.unwrap();

        let fetcher = SleeperFetcher::new(offline_config(cache)).unwrap();
        assert!(fetcher.fetch_players().await.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_api() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = SleeperFetcher::new(offline_config(dir.path().join("missing.json"))).unwrap();
        assert!(fetcher.fetch_week_stats(3).await.is_err());
        assert!(fetcher.fetch_players().await.is_err());
    }
}

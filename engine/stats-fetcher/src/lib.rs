//! Sleeper Stats Fetcher
//!
//! Fetches the NFL players document and weekly fantasy points from the Sleeper
//! API and reads the weekly rankings files the accuracy engine scores.

pub mod config;
pub mod convert;
pub mod fetcher;
pub mod models;
pub mod rankings;

pub use config::FetcherConfig;
pub use convert::{build_directory, build_snapshot};
pub use fetcher::SleeperFetcher;
pub use models::*;
pub use rankings::{parse_love_hate, parse_rankings, RankingsStore};

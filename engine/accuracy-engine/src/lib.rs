//! # Accuracy Engine
//!
//! Scores weekly expert rankings against what players actually scored.
//!
//! For every (position group, week) the predicted order is aligned with the
//! observed order, producing an average rank difference and a Kendall rank
//! correlation. Love/hate calls are graded by the percentile of the player's
//! weekly points within their group. A season run accumulates both and the
//! cumulative reporter turns them into a season summary.

pub mod aggregator;
pub mod alignment;
pub mod config;
pub mod engine;
pub mod error;
pub mod leaderboard;
pub mod love_hate;
pub mod models;
pub mod percentile;
pub mod report;
pub mod schedule;
pub mod snapshot;
pub mod stats;


pub use aggregator::AccuracyAggregator;
pub use alignment::{align, AlignmentScore};
pub use config::AccuracyConfig;
pub use engine::{
    GroupWeekOutcome, GroupWeekStatus, LoveHateWeekOutcome, SeasonRun, WeekInputs, WeekOutcome,
};
pub use error::{AccuracyError, Result};
pub use leaderboard::{LeaderRow, LeaderboardMode, PointsLeaderboard};
pub use love_hate::{LoveHateScorer, HATE_PERCENTILE, LOVE_PERCENTILE};
pub use models::{
    AccuracyRecord, Direction, HitCounts, LoveHateCall, ObservedRanking, PredictedRanking,
    RankedEntity, RawLoveHateCall, SkipReason, SkippedCall, Week,
};
pub use percentile::{percentile, PointsDistribution};
pub use report::{CumulativeReporter, EntityConsistency, GroupSummary, SeasonReport};
pub use schedule::{current_week, WeekRange};
pub use snapshot::{WeekSnapshot, WeeklyPerformance};

/// Current version of the accuracy engine
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

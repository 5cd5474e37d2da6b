//! # Cumulative Report
//!
//! Read-only view over a finished season run.

use crate::aggregator::AccuracyAggregator;
use crate::love_hate::LoveHateScorer;
use crate::models::HitCounts;
use player_registry::PositionGroup;
use serde::{Deserialize, Serialize};

/// A player's average distance from their correct rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityConsistency {
    pub name: String,
    pub average_delta: f64,
}

/// Season summary for one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub group: PositionGroup,
    pub weeks_scored: usize,
    pub average_coefficient: Option<f64>,
    pub average_of_average_differences: Option<f64>,
    pub most_predictable: Vec<EntityConsistency>,
    pub least_predictable: Vec<EntityConsistency>,
}

/// Everything the cumulative report shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonReport {
    pub groups: Vec<GroupSummary>,
    /// Groups from most to least predictable (ascending average difference)
    pub predictability: Vec<(PositionGroup, f64)>,
    pub love_hate_by_group: Vec<(PositionGroup, HitCounts)>,
    pub love_hate_totals: HitCounts,
}

/// Builds season summaries without touching the aggregator
pub struct CumulativeReporter<'a> {
    aggregator: &'a AccuracyAggregator,
    love_hate: &'a LoveHateScorer,
    top_n: usize,
}

impl<'a> CumulativeReporter<'a> {
    pub fn new(
        aggregator: &'a AccuracyAggregator,
        love_hate: &'a LoveHateScorer,
        top_n: usize,
    ) -> Self {
        Self { aggregator, love_hate, top_n }
    }

    /// Groups ranked ascending by average of average differences
    pub fn rank_groups(&self) -> Vec<(PositionGroup, f64)> {
        let mut ranked: Vec<(PositionGroup, f64)> = self
            .aggregator
            .groups()
            .into_iter()
            .filter_map(|g| self.aggregator.average_of_average_differences(g).map(|avg| (g, avg)))
            .collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked
    }

    /// Players in a group ordered from most to least consistent
    fn consistency(&self, group: PositionGroup) -> Vec<EntityConsistency> {
        let mut entities: Vec<EntityConsistency> = self
            .aggregator
            .entity_averages(group)
            .into_iter()
            .map(|(name, average_delta)| EntityConsistency { name, average_delta })
            .collect();
        entities.sort_by(|a, b| a.average_delta.total_cmp(&b.average_delta));
        entities
    }

    /// Top N players with the smallest average rank delta
    pub fn most_predictable(&self, group: PositionGroup) -> Vec<EntityConsistency> {
        self.consistency(group).into_iter().take(self.top_n).collect()
    }

    /// Top N players with the largest average rank delta
    pub fn least_predictable(&self, group: PositionGroup) -> Vec<EntityConsistency> {
        self.consistency(group).into_iter().rev().take(self.top_n).collect()
    }

    /// Summary for one group
    pub fn group_summary(&self, group: PositionGroup) -> GroupSummary {
        GroupSummary {
            group,
            weeks_scored: self.aggregator.group_records(group).count(),
            average_coefficient: self.aggregator.average_coefficient(group),
            average_of_average_differences: self.aggregator.average_of_average_differences(group),
            most_predictable: self.most_predictable(group),
            least_predictable: self.least_predictable(group),
        }
    }

    /// Full season report
    pub fn build(&self) -> SeasonReport {
        SeasonReport {
            groups: self.aggregator.groups().into_iter().map(|g| self.group_summary(g)).collect(),
            predictability: self.rank_groups(),
            love_hate_by_group: self.love_hate.groups().collect(),
            love_hate_totals: self.love_hate.season_totals(),
        }
    }
}

use crate::models::{Direction, HitCounts};
use player_registry::PositionGroup;
use std::collections::BTreeMap;

/// A love is a hit at or above this percentile (top third)
pub const LOVE_PERCENTILE: u8 = 67;

/// A hate is a hit at or below this percentile (bottom third)
pub const HATE_PERCENTILE: u8 = 33;

/// Whether a directional call matched the player's percentile finish
pub fn is_correct(direction: Direction, percentile: u8) -> bool {
    match direction {
        Direction::Love => percentile >= LOVE_PERCENTILE,
        Direction::Hate => percentile <= HATE_PERCENTILE,
    }
}

/// Scores love/hate calls and keeps hit counters per group
#[derive(Debug, Default)]
pub struct LoveHateScorer {
    by_group: BTreeMap<PositionGroup, HitCounts>,
}

impl LoveHateScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one call and count it
    pub fn score(&mut self, group: PositionGroup, direction: Direction, percentile: u8) -> bool {
        let correct = is_correct(direction, percentile);
        self.by_group.entry(group).or_default().add(direction, correct);
        correct
    }

    /// Counters for one group across all scored weeks
    pub fn group_counts(&self, group: PositionGroup) -> HitCounts {
        self.by_group.get(&group).copied().unwrap_or_default()
    }

    /// Groups that received at least one call
    pub fn groups(&self) -> impl Iterator<Item = (PositionGroup, HitCounts)> + '_ {
        self.by_group.iter().map(|(g, c)| (*g, *c))
    }

    /// Season totals across all groups
    pub fn season_totals(&self) -> HitCounts {
        self.by_group.values().fold(HitCounts::default(), |mut totals, counts| {
            totals.merge(counts);
            totals
        })
    }
}

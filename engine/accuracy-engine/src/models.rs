use player_registry::PositionGroup;
use serde::{Deserialize, Serialize};
use std::fmt;

/// NFL regular-season week number (1-based)
pub type Week = u32;

/// Expert pre-game ranking for one group and week, best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedRanking {
    pub group: PositionGroup,
    pub week: Week,
    /// Canonical names in predicted order
    pub names: Vec<String>,
}

impl PredictedRanking {
    /// Create a new predicted ranking
    pub fn new(group: PositionGroup, week: Week, names: Vec<String>) -> Self {
        Self { group, week, names }
    }
}

/// One row of an observed ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntity {
    pub entity_id: String,
    pub name: String,
    pub points: f64,
}

/// Actual finishing order for one group and week, highest points first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedRanking {
    pub group: PositionGroup,
    pub week: Week,
    pub entries: Vec<RankedEntity>,
}

impl ObservedRanking {
    /// Canonical names in finishing order
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accuracy of one group's ranking in one week
///
/// Created once after scoring and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyRecord {
    pub group: PositionGroup,
    pub week: Week,
    /// |Kendall tau| over the common players; None when fewer than two are shared
    pub coefficient: Option<f64>,
    /// Rank distance sum divided by the squared common count
    pub avg_difference: f64,
    /// Number of players present in both rankings
    pub common_count: usize,
}

/// Direction of a love/hate call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Expect a top-third finish
    Love,
    /// Expect a bottom-third finish
    Hate,
}

impl Direction {
    /// Parse the single-letter marker used in love/hate files ("L" or "H")
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker.trim().to_uppercase().as_str() {
            "L" | "LOVE" => Some(Direction::Love),
            "H" | "HATE" => Some(Direction::Hate),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Love => f.write_str("love"),
            Direction::Hate => f.write_str("hate"),
        }
    }
}

/// A love/hate call as it appears in the weekly file, before scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLoveHateCall {
    pub group: PositionGroup,
    pub direction: Direction,
    /// Canonical player name
    pub name: String,
}

impl RawLoveHateCall {
    pub fn new(group: PositionGroup, direction: Direction, name: impl Into<String>) -> Self {
        Self { group, direction, name: name.into() }
    }
}

/// A scored love/hate call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoveHateCall {
    pub entity_id: String,
    pub name: String,
    pub group: PositionGroup,
    pub week: Week,
    pub direction: Direction,
    pub points: f64,
    pub percentile: u8,
    pub correct: bool,
}

/// Why a love/hate call was left out of the counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Name is not registered with the resolver
    UnresolvedEntity,
    /// Player has no points for the week
    NoPerformanceData,
    /// Player already has a call this week; the first call stands
    DuplicateCall,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnresolvedEntity => f.write_str("not found in registry"),
            SkipReason::NoPerformanceData => f.write_str("no stats for the week"),
            SkipReason::DuplicateCall => f.write_str("already called this week"),
        }
    }
}

/// A love/hate call that was skipped, with the reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedCall {
    pub call: RawLoveHateCall,
    pub week: Week,
    pub reason: SkipReason,
}

/// Love/hate hit counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitCounts {
    pub love_correct: u32,
    pub love_total: u32,
    pub hate_correct: u32,
    pub hate_total: u32,
}

impl HitCounts {
    /// Count one scored call
    pub fn add(&mut self, direction: Direction, correct: bool) {
        match direction {
            Direction::Love => {
                self.love_total += 1;
                if correct {
                    self.love_correct += 1;
                }
            }
            Direction::Hate => {
                self.hate_total += 1;
                if correct {
                    self.hate_correct += 1;
                }
            }
        }
    }

    /// Sum two sets of counters
    pub fn merge(&mut self, other: &HitCounts) {
        self.love_correct += other.love_correct;
        self.love_total += other.love_total;
        self.hate_correct += other.hate_correct;
        self.hate_total += other.hate_total;
    }

    pub fn total(&self) -> u32 {
        self.love_total + self.hate_total
    }

    pub fn correct(&self) -> u32 {
        self.love_correct + self.hate_correct
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Love hit rate in percent, None without any love calls
    pub fn love_pct(&self) -> Option<f64> {
        pct(self.love_correct, self.love_total)
    }

    /// Hate hit rate in percent, None without any hate calls
    pub fn hate_pct(&self) -> Option<f64> {
        pct(self.hate_correct, self.hate_total)
    }

    /// Combined hit rate in percent
    pub fn overall_pct(&self) -> Option<f64> {
        pct(self.correct(), self.total())
    }
}

fn pct(correct: u32, total: u32) -> Option<f64> {
    (total > 0).then(|| correct as f64 * 100.0 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_markers() {
        assert_eq!(Direction::from_marker("L"), Some(Direction::Love));
        assert_eq!(Direction::from_marker(" h "), Some(Direction::Hate));
        assert_eq!(Direction::from_marker("X"), None);
    }

    #[test]
    fn test_hit_counts() {
        let mut counts = HitCounts::default();
        assert!(counts.is_empty());
        assert_eq!(counts.love_pct(), None);

        counts.add(Direction::Love, true);
        counts.add(Direction::Love, false);
        counts.add(Direction::Hate, true);

        assert_eq!(counts.love_correct, 1);
        assert_eq!(counts.love_total, 2);
        assert_eq!(counts.hate_correct, 1);
        assert_eq!(counts.hate_total, 1);
        assert_eq!(counts.love_pct(), Some(50.0));
        assert_eq!(counts.hate_pct(), Some(100.0));

        let mut season = HitCounts::default();
        season.merge(&counts);
        season.merge(&counts);
        assert_eq!(season.total(), 6);
        assert_eq!(season.correct(), 4);
    }
}

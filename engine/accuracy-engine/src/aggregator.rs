//! # Weekly Accuracy Aggregation
//!
//! Holds every accuracy record and love/hate call produced during a season run.

use crate::error::{AccuracyError, Result};
use crate::models::{AccuracyRecord, HitCounts, LoveHateCall, Week};
use crate::stats::mean;
use player_registry::PositionGroup;
use std::collections::BTreeMap;
use tracing::debug;

/// Accumulates per-(group, week) accuracy and per-player rank deltas
///
/// Weeks without a rankings file are simply absent; averages run over the
/// weeks that exist and never count a missing week as zero.
#[derive(Debug, Default)]
pub struct AccuracyAggregator {
    records: BTreeMap<(PositionGroup, Week), AccuracyRecord>,
    entity_deltas: BTreeMap<(PositionGroup, String), BTreeMap<Week, usize>>,
    calls: Vec<LoveHateCall>,
}

impl AccuracyAggregator {
    /// Create new aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the accuracy record for a (group, week). Records are write-once.
    pub fn record(&mut self, record: AccuracyRecord) -> Result<()> {
        let key = (record.group, record.week);
        if self.records.contains_key(&key) {
            return Err(AccuracyError::RecordExists { group: record.group, week: record.week });
        }
        debug!(
            "Recorded {} week {}: coefficient {:?}, avg difference {:.4}",
            record.group, record.week, record.coefficient, record.avg_difference
        );
        self.records.insert(key, record);
        Ok(())
    }

    /// Store a player's rank delta for a week. The first delta for a week stands.
    pub fn record_entity_delta(
        &mut self,
        group: PositionGroup,
        entity: &str,
        week: Week,
        delta: usize,
    ) {
        self.entity_deltas
            .entry((group, entity.to_string()))
            .or_default()
            .entry(week)
            .or_insert(delta);
    }

    /// Store a scored love/hate call
    pub fn record_call(&mut self, call: LoveHateCall) {
        self.calls.push(call);
    }

    /// Whether a player already has a love/hate call in a week
    pub fn has_call(&self, entity_id: &str, week: Week) -> bool {
        self.calls.iter().any(|c| c.week == week && c.entity_id == entity_id)
    }

    /// Accuracy record for a (group, week), if that pair was scored
    pub fn get(&self, group: PositionGroup, week: Week) -> Option<&AccuracyRecord> {
        self.records.get(&(group, week))
    }

    /// All records of a group, ordered by week
    pub fn group_records(&self, group: PositionGroup) -> impl Iterator<Item = &AccuracyRecord> {
        self.records.range((group, Week::MIN)..=(group, Week::MAX)).map(|(_, r)| r)
    }

    /// Groups with at least one record, in `PositionGroup` order
    pub fn groups(&self) -> Vec<PositionGroup> {
        let mut groups: Vec<PositionGroup> = self.records.keys().map(|(g, _)| *g).collect();
        groups.dedup();
        groups
    }

    /// Mean coefficient over the group's weeks that have one
    pub fn average_coefficient(&self, group: PositionGroup) -> Option<f64> {
        let values: Vec<f64> = self.group_records(group).filter_map(|r| r.coefficient).collect();
        mean(&values)
    }

    /// Mean of the weekly average differences for a group
    pub fn average_of_average_differences(&self, group: PositionGroup) -> Option<f64> {
        let values: Vec<f64> = self.group_records(group).map(|r| r.avg_difference).collect();
        mean(&values)
    }

    /// Mean rank delta of one player over the weeks they were ranked
    pub fn entity_average_delta(&self, group: PositionGroup, entity: &str) -> Option<f64> {
        let weeks = self.entity_deltas.get(&(group, entity.to_string()))?;
        let values: Vec<f64> = weeks.values().map(|&d| d as f64).collect();
        mean(&values)
    }

    /// Average delta for every player tracked in a group, in name order
    pub fn entity_averages(&self, group: PositionGroup) -> Vec<(String, f64)> {
        self.entity_deltas
            .iter()
            .filter(|((g, _), _)| *g == group)
            .filter_map(|((_, name), weeks)| {
                let values: Vec<f64> = weeks.values().map(|&d| d as f64).collect();
                mean(&values).map(|avg| (name.clone(), avg))
            })
            .collect()
    }

    /// Scored love/hate calls in the order they were made
    pub fn calls(&self) -> &[LoveHateCall] {
        &self.calls
    }

    /// Love/hate counters for one group in one week
    pub fn week_counts(&self, group: PositionGroup, week: Week) -> HitCounts {
        let mut counts = HitCounts::default();
        for call in self.calls.iter().filter(|c| c.group == group && c.week == week) {
            counts.add(call.direction, call.correct);
        }
        counts
    }

    /// Love/hate counters across every group for one week
    pub fn week_totals(&self, week: Week) -> HitCounts {
        let mut counts = HitCounts::default();
        for call in self.calls.iter().filter(|c| c.week == week) {
            counts.add(call.direction, call.correct);
        }
        counts
    }

    /// Number of scored (group, week) pairs
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;

    fn record(
        group: PositionGroup,
        week: Week,
        coefficient: Option<f64>,
        avg_difference: f64,
    ) -> AccuracyRecord {
        AccuracyRecord { group, week, coefficient, avg_difference, common_count: 10 }
    }

    #[test]
    fn test_averages_skip_missing_weeks() {
        let mut agg = AccuracyAggregator::new();
        agg.record(record(PositionGroup::RB, 3, Some(0.4), 1.0)).unwrap();
        agg.record(record(PositionGroup::RB, 4, Some(0.6), 2.0)).unwrap();
        // No week 5 at all
        agg.record(record(PositionGroup::RB, 6, None, 3.0)).unwrap();
        agg.record(record(PositionGroup::QB, 3, Some(0.9), 0.2)).unwrap();

        assert!((agg.average_coefficient(PositionGroup::RB).unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(agg.average_of_average_differences(PositionGroup::RB), Some(2.0));
        assert_eq!(agg.average_coefficient(PositionGroup::TE), None);
        assert_eq!(agg.groups(), vec![PositionGroup::QB, PositionGroup::RB]);
        assert_eq!(agg.group_records(PositionGroup::RB).count(), 3);
    }

    #[test]
    fn test_records_are_write_once() {
        let mut agg = AccuracyAggregator::new();
        agg.record(record(PositionGroup::WR, 8, Some(0.3), 1.5)).unwrap();
        let err = agg.record(record(PositionGroup::WR, 8, Some(0.9), 0.1)).unwrap_err();
        assert_eq!(err, AccuracyError::RecordExists { group: PositionGroup::WR, week: 8 });
        assert_eq!(agg.get(PositionGroup::WR, 8).unwrap().coefficient, Some(0.3));
    }

    #[test]
    fn test_entity_deltas() {
        let mut agg = AccuracyAggregator::new();
        agg.record_entity_delta(PositionGroup::TE, "Travis Kelce", 3, 2);
        agg.record_entity_delta(PositionGroup::TE, "Travis Kelce", 4, 0);
        agg.record_entity_delta(PositionGroup::TE, "Travis Kelce", 4, 9);
        agg.record_entity_delta(PositionGroup::TE, "George Kittle", 3, 5);

        assert_eq!(agg.entity_average_delta(PositionGroup::TE, "Travis Kelce"), Some(1.0));
        assert_eq!(agg.entity_average_delta(PositionGroup::WR, "Travis Kelce"), None);
        assert_eq!(
            agg.entity_averages(PositionGroup::TE),
            vec![("George Kittle".to_string(), 5.0), ("Travis Kelce".to_string(), 1.0)]
        );
    }

    #[test]
    fn test_week_counts() {
        let mut agg = AccuracyAggregator::new();
        let call = |id: &str, group, week, direction, correct| LoveHateCall {
            entity_id: id.to_string(),
            name: id.to_string(),
            group,
            week,
            direction,
            points: 10.0,
            percentile: 50,
            correct,
        };
        agg.record_call(call("a", PositionGroup::QB, 3, Direction::Love, true));
        agg.record_call(call("b", PositionGroup::QB, 3, Direction::Hate, false));
        agg.record_call(call("c", PositionGroup::WR, 3, Direction::Love, false));
        agg.record_call(call("d", PositionGroup::WR, 4, Direction::Love, true));

        let qb = agg.week_counts(PositionGroup::QB, 3);
        assert_eq!((qb.love_correct, qb.love_total, qb.hate_correct, qb.hate_total), (1, 1, 0, 1));
        assert_eq!(agg.week_totals(3).total(), 3);
        assert!(agg.has_call("d", 4));
        assert!(!agg.has_call("d", 3));
    }
}

//! # Rank Alignment
//!
//! Lines up a predicted order against an observed order over canonical names
//! and measures how far apart they are.

use crate::error::{AccuracyError, Result};
use crate::models::{AccuracyRecord, PredictedRanking, Week};
use crate::stats::kendall_tau;
use player_registry::PositionGroup;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Result of aligning one predicted ranking with one observed ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentScore {
    pub group: PositionGroup,
    pub week: Week,
    /// Names in both rankings, in predicted order
    pub common: Vec<String>,
    /// Sum of |predicted rank - observed rank| over the full rankings
    pub rank_distance_sum: usize,
    /// `rank_distance_sum / |common|²`
    pub avg_difference: f64,
    /// |Kendall tau| over the common names; None below two names
    pub coefficient: Option<f64>,
    /// Per-player |index in predicted common - index in observed common|
    pub entity_deltas: Vec<(String, usize)>,
}

impl AlignmentScore {
    pub fn common_count(&self) -> usize {
        self.common.len()
    }

    /// Collapse into the record kept by the aggregator
    pub fn to_record(&self) -> AccuracyRecord {
        AccuracyRecord {
            group: self.group,
            week: self.week,
            coefficient: self.coefficient,
            avg_difference: self.avg_difference,
            common_count: self.common.len(),
        }
    }
}

/// Score a predicted ranking against the observed finishing order (both best first)
///
/// The coefficient is Kendall tau over rank positions: each common name
/// contributes the pair (index in predicted common, index in observed common),
/// never the name strings themselves.
///
/// Fails with `DuplicateName` when the prediction repeats a name and with
/// `EmptyCommonSet` when the two rankings share nobody.
pub fn align(predicted: &PredictedRanking, observed: &[String]) -> Result<AlignmentScore> {
    let (group, week) = (predicted.group, predicted.week);

    let mut predicted_index: HashMap<&str, usize> = HashMap::with_capacity(predicted.names.len());
    for (index, name) in predicted.names.iter().enumerate() {
        if predicted_index.insert(name.as_str(), index).is_some() {
            return Err(AccuracyError::DuplicateName { group, week, name: name.clone() });
        }
    }

    // Full-range distance: every observed finisher the expert ranked counts,
    // including players ranked far from where they finished.
    let rank_distance_sum: usize = observed
        .iter()
        .enumerate()
        .filter_map(|(rank, name)| predicted_index.get(name.as_str()).map(|&p| p.abs_diff(rank)))
        .sum();

    let observed_set: HashSet<&str> = observed.iter().map(String::as_str).collect();
    let common: Vec<String> = predicted
        .names
        .iter()
        .filter(|name| observed_set.contains(name.as_str()))
        .cloned()
        .collect();

    if common.is_empty() {
        return Err(AccuracyError::EmptyCommonSet { group, week });
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(common.len());
    let mut observed_common: Vec<&str> = Vec::with_capacity(common.len());
    for name in observed {
        if !predicted_index.contains_key(name.as_str()) {
            continue;
        }
        if seen.insert(name.as_str()) {
            observed_common.push(name.as_str());
        } else {
            warn!(
                "{} week {}: two finishers share the name '{}'; keeping the higher one",
                group, week, name
            );
        }
    }
    let observed_position: HashMap<&str, usize> =
        observed_common.iter().enumerate().map(|(i, name)| (*name, i)).collect();

    let n = common.len();
    let avg_difference = rank_distance_sum as f64 / (n * n) as f64;

    let mut entity_deltas = Vec::with_capacity(n);
    let mut predicted_ranks = Vec::with_capacity(n);
    let mut observed_ranks = Vec::with_capacity(n);
    for (i, name) in common.iter().enumerate() {
        let j = observed_position[name.as_str()];
        entity_deltas.push((name.clone(), i.abs_diff(j)));
        predicted_ranks.push(i as f64);
        observed_ranks.push(j as f64);
    }

    let coefficient = kendall_tau(&predicted_ranks, &observed_ranks).map(f64::abs);

    debug!(
        "{} week {}: {} common, distance sum {}, avg difference {:.4}, coefficient {:?}",
        group, week, n, rank_distance_sum, avg_difference, coefficient
    );

    Ok(AlignmentScore {
        group,
        week,
        common,
        rank_distance_sum,
        avg_difference,
        coefficient,
        entity_deltas,
    })
}

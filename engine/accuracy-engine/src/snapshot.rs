use crate::models::{ObservedRanking, RankedEntity, Week};
use crate::percentile::PointsDistribution;
use player_registry::{EntityDirectory, NameResolver, PositionGroup};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Points one player scored in one week, in the group's scoring format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPerformance {
    pub entity_id: String,
    pub group: PositionGroup,
    pub points: f64,
}

/// Everything the stats provider reported for one week
///
/// Built from a single fetch and shared by every group scored that week.
/// Performances keep the provider's enumeration order, which breaks ties
/// in observed rankings.
#[derive(Debug, Clone, Default)]
pub struct WeekSnapshot {
    week: Week,
    performances: Vec<WeeklyPerformance>,
    index: HashMap<String, usize>,
}

impl WeekSnapshot {
    /// Create an empty snapshot
    pub fn new(week: Week) -> Self {
        Self { week, performances: Vec::new(), index: HashMap::new() }
    }

    /// Record a performance. A second line for the same player is ignored.
    pub fn push(&mut self, performance: WeeklyPerformance) -> bool {
        if self.index.contains_key(&performance.entity_id) {
            return false;
        }
        self.index.insert(performance.entity_id.clone(), self.performances.len());
        self.performances.push(performance);
        true
    }

    pub fn week(&self) -> Week {
        self.week
    }

    /// Points a player scored this week, if any
    pub fn points_for(&self, entity_id: &str) -> Option<f64> {
        self.index.get(entity_id).map(|&i| self.performances[i].points)
    }

    /// Performances in provider order
    pub fn performances(&self) -> &[WeeklyPerformance] {
        &self.performances
    }

    /// Performances of one group in provider order
    pub fn group_performances(
        &self,
        group: PositionGroup,
    ) -> impl Iterator<Item = &WeeklyPerformance> {
        self.performances.iter().filter(move |p| p.group == group)
    }

    /// Actual finishing order for a group: points descending, provider order on ties
    pub fn observed_ranking(
        &self,
        group: PositionGroup,
        directory: &EntityDirectory,
        resolver: &NameResolver,
    ) -> ObservedRanking {
        let mut entries: Vec<RankedEntity> = self
            .group_performances(group)
            .filter_map(|p| {
                let entity = directory.get(&p.entity_id)?;
                Some(RankedEntity {
                    entity_id: p.entity_id.clone(),
                    name: resolver.canonical_name_for(entity),
                    points: p.points,
                })
            })
            .collect();

        // sort_by is stable, so exact ties keep provider order
        entries.sort_by(|a, b| b.points.total_cmp(&a.points));

        ObservedRanking { group, week: self.week, entries }
    }

    /// Sorted points of every player in the group this week
    pub fn distribution(&self, group: PositionGroup) -> PointsDistribution {
        let points = self.group_performances(group).map(|p| p.points).collect();
        PointsDistribution::from_unsorted(points)
    }

    pub fn len(&self) -> usize {
        self.performances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.performances.is_empty()
    }
}

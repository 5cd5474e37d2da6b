use crate::snapshot::WeekSnapshot;
use player_registry::{EntityDirectory, NameResolver, PositionGroup};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How season points are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaderboardMode {
    /// Total points across the range
    Cumulative,
    /// Average points per game played, subject to a minimum number of games
    PerGame,
}

/// One leaderboard line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderRow {
    pub entity_id: String,
    pub name: String,
    pub total_points: f64,
    pub games: u32,
    /// Total or per-game average depending on the mode
    pub value: f64,
}

/// Season points leaderboard for one position group
#[derive(Debug)]
pub struct PointsLeaderboard {
    group: PositionGroup,
    mode: LeaderboardMode,
    min_games: u32,
    totals: HashMap<String, (f64, u32)>,
    // first-seen order, used to break ties
    order: Vec<String>,
}

impl PointsLeaderboard {
    pub fn new(group: PositionGroup, mode: LeaderboardMode, min_games: u32) -> Self {
        Self { group, mode, min_games, totals: HashMap::new(), order: Vec::new() }
    }

    /// Add one week of points
    pub fn add_week(&mut self, snapshot: &WeekSnapshot) {
        for performance in snapshot.group_performances(self.group) {
            let entry = self.totals.entry(performance.entity_id.clone()).or_insert_with(|| {
                self.order.push(performance.entity_id.clone());
                (0.0, 0)
            });
            entry.0 += performance.points;
            entry.1 += 1;
        }
    }

    /// Best `limit` players, highest value first
    pub fn rows(
        &self,
        directory: &EntityDirectory,
        resolver: &NameResolver,
        limit: usize,
    ) -> Vec<LeaderRow> {
        let mut rows: Vec<LeaderRow> = self
            .order
            .iter()
            .filter_map(|entity_id| {
                let (total_points, games) = self.totals[entity_id];
                let value = match self.mode {
                    LeaderboardMode::Cumulative => total_points,
                    LeaderboardMode::PerGame if games >= self.min_games => {
                        total_points / games as f64
                    }
                    LeaderboardMode::PerGame => return None,
                };
                let name = directory
                    .get(entity_id)
                    .map(|e| resolver.canonical_name_for(e))
                    .unwrap_or_else(|| entity_id.clone());
                Some(LeaderRow { entity_id: entity_id.clone(), name, total_points, games, value })
            })
            .collect();

        rows.sort_by(|a, b| b.value.total_cmp(&a.value));
        rows.truncate(limit);
        rows
    }

    pub fn group(&self) -> PositionGroup {
        self.group
    }

    pub fn mode(&self) -> LeaderboardMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::WeeklyPerformance;
    use player_registry::Entity;

    fn week(week: u32, lines: &[(&str, f64)]) -> WeekSnapshot {
        let mut snapshot = WeekSnapshot::new(week);
        for (id, points) in lines {
            snapshot.push(WeeklyPerformance {
                entity_id: id.to_string(),
                group: PositionGroup::RB,
                points: *points,
            });
        }
        snapshot
    }

    fn directory() -> EntityDirectory {
        vec![
            Entity::new("a", "Derrick Henry", PositionGroup::RB),
            Entity::new("b", "Nick Chubb", PositionGroup::RB),
            Entity::new("c", "Aaron Jones", PositionGroup::RB),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_cumulative() {
        let mut board = PointsLeaderboard::new(PositionGroup::RB, LeaderboardMode::Cumulative, 3);
        board.add_week(&week(1, &[("a", 10.0), ("b", 20.0)]));
        board.add_week(&week(2, &[("a", 15.0), ("c", 40.0)]));

        let rows = board.rows(&directory(), &NameResolver::new(), 15);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Aaron Jones", "Derrick Henry", "Nick Chubb"]);
        assert_eq!(rows[1].games, 2);
        assert_eq!(rows[1].value, 25.0);
    }

    #[test]
    fn test_per_game_minimum() {
        let mut board = PointsLeaderboard::new(PositionGroup::RB, LeaderboardMode::PerGame, 3);
        board.add_week(&week(1, &[("a", 10.0), ("b", 30.0)]));
        board.add_week(&week(2, &[("a", 20.0), ("b", 30.0)]));
        board.add_week(&week(3, &[("a", 30.0)]));

        let rows = board.rows(&directory(), &NameResolver::new(), 15);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Derrick Henry");
        assert_eq!(rows[0].value, 20.0);
    }

    #[test]
    fn test_limit() {
        let mut board = PointsLeaderboard::new(PositionGroup::RB, LeaderboardMode::Cumulative, 0);
        board.add_week(&week(1, &[("a", 1.0), ("b", 2.0), ("c", 3.0)]));
        assert_eq!(board.rows(&directory(), &NameResolver::new(), 2).len(), 2);
    }
}

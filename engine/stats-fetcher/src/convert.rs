//! Turns Sleeper documents into the engine's directory and weekly snapshots.

use crate::models::{SleeperPlayer, StatLine};
use accuracy_engine::{WeekSnapshot, WeeklyPerformance};
use anyhow::{Context, Result};
use player_registry::{Entity, EntityDirectory};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Parse a JSON object keyed by player ID, keeping document order
///
/// Entries that do not match `T` are logged and skipped.
pub fn parse_keyed<T: DeserializeOwned>(text: &str) -> Result<Vec<(String, T)>> {
    let document: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(text).context("Expected a JSON object keyed by player ID")?;

    let mut entries = Vec::with_capacity(document.len());
    for (id, value) in document {
        match serde_json::from_value::<T>(value) {
            Ok(entry) => entries.push((id, entry)),
            Err(e) => warn!("Skipping malformed entry for {}: {}", id, e),
        }
    }
    Ok(entries)
}

/// Keep the players at scored positions that have a usable name
pub fn build_directory(players: &[(String, SleeperPlayer)]) -> EntityDirectory {
    let mut directory = EntityDirectory::new();
    for (id, player) in players {
        let (Some(group), Some(name)) = (player.group(), player.display_name()) else {
            continue;
        };
        directory.insert(Entity::new(id.as_str(), name, group));
    }
    debug!("Directory holds {} of {} players", directory.len(), players.len());
    directory
}

/// Build a week's snapshot from its stat lines
///
/// Players missing from the directory, or without points in their group's
/// format, are left out.
pub fn build_snapshot(
    week: u32,
    stats: &[(String, StatLine)],
    directory: &EntityDirectory,
) -> WeekSnapshot {
    let mut snapshot = WeekSnapshot::new(week);
    for (id, line) in stats {
        let Some(group) = directory.group_of(id) else {
            continue;
        };
        let Some(points) = line.points_for(group) else {
            continue;
        };
        if !snapshot.push(WeeklyPerformance { entity_id: id.clone(), group, points }) {
            warn!("Week {}: duplicate stat line for {}", week, id);
        }
    }
    debug!("Week {}: {} performances from {} stat lines", week, snapshot.len(), stats.len());
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use player_registry::PositionGroup;

    const PLAYERS: &str = r#"{
        "4881": {"full_name": "Lamar Jackson", "last_name": "Jackson", "position": "QB"},
        "SF": {"first_name": "San Francisco", "last_name": "49ers", "position": "DEF"},
        "17": {"full_name": "Justin Tucker", "position": "K"},
        "3198": {"full_name": "Derrick Henry", "position": "RB"},
        "bad": "not a player"
    }"#;

    const STATS: &str = r#"{
        "3198": {"pts_ppr": 18.5, "pts_std": 16.5},
        "17": {"pts_ppr": 12.0},
        "SF": {"pts_std": 14.0},
        "4881": {"pts_ppr": 18.5},
        "9999": {"pts_ppr": 3.0}
    }"#;

    #[test]
    fn test_directory_keeps_scored_positions() {
        let players: Vec<(String, SleeperPlayer)> = parse_keyed(PLAYERS).unwrap();
        assert_eq!(players.len(), 4);

        let directory = build_directory(&players);
        assert_eq!(directory.len(), 3);
        assert_eq!(directory.get("SF").unwrap().display_name, "49ers");
        assert_eq!(directory.group_of("17"), None);
    }

    #[test]
    fn test_snapshot_keeps_document_order() {
        let directory = build_directory(&parse_keyed(PLAYERS).unwrap());
        let stats: Vec<(String, StatLine)> = parse_keyed(STATS).unwrap();
        let snapshot = build_snapshot(6, &stats, &directory);

        assert_eq!(snapshot.len(), 3);
        let ids: Vec<&str> = snapshot.performances().iter().map(|p| p.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["3198", "SF", "4881"]);
        assert_eq!(snapshot.points_for("SF"), Some(14.0));
        assert_eq!(snapshot.group_performances(PositionGroup::QB).count(), 1);
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(parse_keyed::<StatLine>("[1, 2, 3]").is_err());
    }
}

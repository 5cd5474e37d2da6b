use player_registry::PositionGroup;
use serde::{Deserialize, Serialize};

/// One entry of the Sleeper players document
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SleeperPlayer {
    #[serde(default)]
    pub player_id: Option<String>,

    #[serde(default)]
    pub first_name: Option<String>,

    /// Team nickname for team defenses (e.g., "49ers")
    #[serde(default)]
    pub last_name: Option<String>,

    /// Absent for team defenses
    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub position: Option<String>,

    #[serde(default)]
    pub team: Option<String>,
}

impl SleeperPlayer {
    /// Position group, if the player plays a scored position
    pub fn group(&self) -> Option<PositionGroup> {
        self.position.as_deref()?.parse().ok()
    }

    /// Name the player goes by: full name, or the team nickname for defenses
    pub fn display_name(&self) -> Option<&str> {
        match self.group()? {
            PositionGroup::DEF => self.last_name.as_deref(),
            _ => self.full_name.as_deref(),
        }
    }
}

/// One player's stat line for a week. Only the fantasy point totals are kept.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq)]
pub struct StatLine {
    /// Points-per-reception scoring
    #[serde(default)]
    pub pts_ppr: Option<f64>,

    /// Standard scoring
    #[serde(default)]
    pub pts_std: Option<f64>,
}

impl StatLine {
    /// Points in the format a group is scored in: standard for defenses, PPR otherwise
    pub fn points_for(&self, group: PositionGroup) -> Option<f64> {
        match group {
            PositionGroup::DEF => self.pts_std,
            _ => self.pts_ppr,
        }
    }
}

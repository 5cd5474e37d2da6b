use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position groups that rankings are published for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionGroup {
    QB,
    RB,
    WR,
    TE,
    DEF,
}

impl PositionGroup {
    /// Every group, in the order reports walk them
    pub const ALL: [PositionGroup; 5] = [
        PositionGroup::QB,
        PositionGroup::RB,
        PositionGroup::WR,
        PositionGroup::TE,
        PositionGroup::DEF,
    ];

    /// Upper-case label (e.g., "QB")
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionGroup::QB => "QB",
            PositionGroup::RB => "RB",
            PositionGroup::WR => "WR",
            PositionGroup::TE => "TE",
            PositionGroup::DEF => "DEF",
        }
    }

    /// Lower-case file stem used by rankings files (e.g., "qb" for `week3/qb.txt`)
    pub fn file_stem(&self) -> String {
        self.as_str().to_lowercase()
    }

    /// Team defenses are scored in standard points and named by team
    pub fn is_team_defense(&self) -> bool {
        matches!(self, PositionGroup::DEF)
    }
}

impl fmt::Display for PositionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PositionGroup {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(PositionGroup::QB),
            "RB" => Ok(PositionGroup::RB),
            "WR" => Ok(PositionGroup::WR),
            "TE" => Ok(PositionGroup::TE),
            "DEF" | "DST" | "D/ST" => Ok(PositionGroup::DEF),
            other => Err(ResolveError::UnknownGroup(other.to_string())),
        }
    }
}

/// A player or team defense as reported by the stats provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Provider player ID (opaque, e.g. "4046" or "CHI")
    pub entity_id: String,

    /// Display name as the provider spells it (e.g., "DJ Moore")
    pub display_name: String,

    /// Position group
    pub group: PositionGroup,
}

impl Entity {
    /// Create a new entity
    pub fn new(
        entity_id: impl Into<String>,
        display_name: impl Into<String>,
        group: PositionGroup,
    ) -> Self {
        Self { entity_id: entity_id.into(), display_name: display_name.into(), group }
    }
}

/// Errors that can occur during name resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Name did not split into "first last" or "first last suffix"
    AmbiguousName { raw: String, tokens: usize },

    /// No player ID registered under this canonical name
    NotFound(String),

    /// Position label outside the known groups
    UnknownGroup(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::AmbiguousName { raw, tokens } => {
                write!(f, "Ambiguous player name '{raw}' ({tokens} tokens)")
            }
            ResolveError::NotFound(name) => {
                write!(f, "Player '{name}' not found in registry")
            }
            ResolveError::UnknownGroup(label) => {
                write!(f, "Unknown position group: {label}")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_parsing() {
        assert_eq!("qb".parse::<PositionGroup>().unwrap(), PositionGroup::QB);
        assert_eq!(" WR ".parse::<PositionGroup>().unwrap(), PositionGroup::WR);
        assert_eq!("D/ST".parse::<PositionGroup>().unwrap(), PositionGroup::DEF);
        assert!(matches!("K".parse::<PositionGroup>(), Err(ResolveError::UnknownGroup(_))));
    }

    #[test]
    fn test_group_serde_uses_upper_case() {
        let json = serde_json::to_string(&PositionGroup::TE).unwrap();
        assert_eq!(json, "\"TE\"");
        let back: PositionGroup = serde_json::from_str("\"DEF\"").unwrap();
        assert_eq!(back, PositionGroup::DEF);
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(PositionGroup::DEF.file_stem(), "def");
        assert!(PositionGroup::DEF.is_team_defense());
        assert!(!PositionGroup::RB.is_team_defense());
    }
}

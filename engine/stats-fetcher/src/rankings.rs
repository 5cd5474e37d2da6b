//! # Rankings Files
//!
//! Reads the weekly expert rankings and love/hate files from disk.
//!
//! A rankings file alternates a ranking line (`1. Lamar Jackson, BAL QB`) with a
//! detail line. A love/hate file has one `POS / L|H / Name` call per line.

use accuracy_engine::{AccuracyConfig, Direction, RawLoveHateCall, WeekInputs};
use anyhow::{Context, Result};
use player_registry::{NameResolver, PositionGroup};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, error, warn};

/// Rank number, then the name up to the last ", "
static RANKING_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]\. (.*), ").unwrap());

/// Suffix that team defenses carry in rankings
const DEFENSE_SUFFIX: &str = " D/ST";

/// Extract the predicted order from a rankings file
///
/// Only every other line carries a ranking; lines that do not match are ignored.
pub fn parse_rankings(text: &str, group: PositionGroup, resolver: &NameResolver) -> Vec<String> {
    text.lines()
        .step_by(2)
        .filter_map(|line| RANKING_LINE_RE.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| {
            if group.is_team_defense() {
                m.as_str().replace(DEFENSE_SUFFIX, "").trim().to_string()
            } else {
                resolver.canonicalize_or_verbatim(m.as_str())
            }
        })
        .collect()
}

/// Parse one `POS / L|H / Name` line
pub fn parse_love_hate_line(line: &str, resolver: &NameResolver) -> Option<RawLoveHateCall> {
    let parts: Vec<&str> = line.split('/').map(str::trim).collect();
    let [group, marker, name] = parts.as_slice() else {
        return None;
    };
    let group: PositionGroup = group.parse().ok()?;
    let direction = Direction::from_marker(marker)?;
    Some(RawLoveHateCall::new(group, direction, resolver.canonicalize_or_verbatim(name)))
}

/// Parse a love/hate file, skipping blank and malformed lines
pub fn parse_love_hate(text: &str, resolver: &NameResolver) -> Vec<RawLoveHateCall> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(i, line)| {
            let call = parse_love_hate_line(line, resolver);
            if call.is_none() {
                warn!("Ignoring malformed love/hate line {}: {:?}", i + 1, line);
            }
            call
        })
        .collect()
}

/// Read a file, treating a missing file as None
async fn read_optional(path: &Path) -> Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Rankings directory laid out as `week{N}/{group}.txt` and `week{N}/love_hate.txt`
pub struct RankingsStore {
    config: AccuracyConfig,
}

impl RankingsStore {
    pub fn new(config: AccuracyConfig) -> Self {
        Self { config }
    }

    /// Predicted order for a group, None when the week has no file for it
    pub async fn load_rankings(
        &self,
        week: u32,
        group: PositionGroup,
        resolver: &NameResolver,
    ) -> Result<Option<Vec<String>>> {
        let path = self.config.rankings_path(week, group);
        let Some(text) = read_optional(&path).await? else {
            return Ok(None);
        };
        let names = parse_rankings(&text, group, resolver);
        debug!("Read {} {} rankings from {}", names.len(), group, path.display());
        Ok(Some(names))
    }

    /// Love/hate calls for a week, None when the week has no file
    pub async fn load_love_hate(
        &self,
        week: u32,
        resolver: &NameResolver,
    ) -> Result<Option<Vec<RawLoveHateCall>>> {
        let path = self.config.love_hate_path(week);
        Ok(read_optional(&path).await?.map(|text| parse_love_hate(&text, resolver)))
    }

    /// Everything published for a week
    ///
    /// A file that exists but cannot be read is logged and left out; the
    /// other files of the week still load.
    pub async fn load_week(&self, week: u32, resolver: &NameResolver) -> WeekInputs {
        let mut predicted = BTreeMap::new();
        for group in PositionGroup::ALL {
            match self.load_rankings(week, group, resolver).await {
                Ok(Some(names)) => {
                    predicted.insert(group, names);
                }
                Ok(None) => {}
                Err(e) => error!("Ignoring {} rankings for week {}: {:#}", group, week, e),
            }
        }
        let love_hate = match self.load_love_hate(week, resolver).await {
            Ok(calls) => calls,
            Err(e) => {
                error!("Ignoring love/hate calls for week {}: {:#}", week, e);
                None
            }
        };
        WeekInputs { predicted, love_hate }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QB_FILE: &str = "\
1. Lamar Jackson, BAL QB
vs. CIN
2. DJ Moore, CAR WR
at SF
3. Mitchell Trubisky, CHI QB
vs. LAC
4. Odell Beckham Jr., CLE WR
at NE
not a ranking
";

    #[test]
    fn test_parse_rankings() {
        let names = parse_rankings(QB_FILE, PositionGroup::QB, &NameResolver::new());
        assert_eq!(names, vec!["Lamar Jackson", "D.J. Moore", "Mitch Trubisky", "Odell Beckham"]);
    }

    #[test]
    fn test_detail_lines_are_skipped() {
        // A ranking-looking detail line on an odd line is not read
        let text = "1. Derrick Henry, TEN RB\n2. Fake Player, XX RB\n3. Nick Chubb, CLE RB\n";
        let names = parse_rankings(text, PositionGroup::RB, &NameResolver::new());
        assert_eq!(names, vec!["Derrick Henry", "Nick Chubb"]);
    }

    #[test]
    fn test_defense_suffix() {
        let text = "1. 49ers D/ST, SF DST\nvs. ARI\n2. Patriots D/ST, NE DST\n";
        let names = parse_rankings(text, PositionGroup::DEF, &NameResolver::new());
        assert_eq!(names, vec!["49ers", "Patriots"]);
    }

    #[test]
    fn test_parse_love_hate() {
        let text = "QB / L / Lamar Jackson\n\nRB / H / DJ Chark\n\
                    WR / maybe / Someone Else\nTE/L/Travis Kelce\n";
        let calls = parse_love_hate(text, &NameResolver::new());
        assert_eq!(
            calls,
            vec![
                RawLoveHateCall::new(PositionGroup::QB, Direction::Love, "Lamar Jackson"),
                RawLoveHateCall::new(PositionGroup::RB, Direction::Hate, "D.J. Chark"),
                RawLoveHateCall::new(PositionGroup::TE, Direction::Love, "Travis Kelce"),
            ]
        );
    }

    #[tokio::test]
    async fn test_load_week() {
        let dir = tempfile::tempdir().unwrap();
        let week_dir = dir.path().join("week5");
        tokio::fs::create_dir_all(&week_dir).await.unwrap();
        tokio::fs::write(week_dir.join("qb.txt"), QB_FILE).await.unwrap();
        tokio::fs::write(week_dir.join("love_hate.txt"), "QB / H / Lamar Jackson\n").await.unwrap();

        let config =
            AccuracyConfig { rankings_dir: dir.path().to_path_buf(), ..Default::default() };
        let store = RankingsStore::new(config);
        let resolver = NameResolver::new();

        let inputs = store.load_week(5, &resolver).await;
        assert_eq!(inputs.predicted.len(), 1);
        assert_eq!(inputs.predicted[&PositionGroup::QB].len(), 4);
        assert_eq!(inputs.love_hate.unwrap().len(), 1);

        let empty = store.load_week(6, &resolver).await;
        assert!(empty.predicted.is_empty());
        assert!(empty.love_hate.is_none());
    }

    #[tokio::test]
    async fn test_unreadable_file_keeps_rest_of_week() {
        let dir = tempfile::tempdir().unwrap();
        let week_dir = dir.path().join("week5");
        tokio::fs::create_dir_all(&week_dir).await.unwrap();
        tokio::fs::write(week_dir.join("qb.txt"), QB_FILE).await.unwrap();
        tokio::fs::write(week_dir.join("love_hate.txt"), "QB / H / Lamar Jackson\n").await.unwrap();
        // cp1252 apostrophe, not valid UTF-8
        tokio::fs::write(week_dir.join("wr.txt"), b"1. Ja\x92Marr Chase, CIN WR\n").await.unwrap();

        let config =
            AccuracyConfig { rankings_dir: dir.path().to_path_buf(), ..Default::default() };
        let store = RankingsStore::new(config);
        let resolver = NameResolver::new();

        assert!(store.load_rankings(5, PositionGroup::WR, &resolver).await.is_err());

        let inputs = store.load_week(5, &resolver).await;
        assert_eq!(inputs.predicted.len(), 1);
        assert!(!inputs.predicted.contains_key(&PositionGroup::WR));
        assert_eq!(inputs.predicted[&PositionGroup::QB].len(), 4);
        assert_eq!(inputs.love_hate.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_love_hate_keeps_rankings() {
        let dir = tempfile::tempdir().unwrap();
        let week_dir = dir.path().join("week7");
        tokio::fs::create_dir_all(&week_dir).await.unwrap();
        tokio::fs::write(week_dir.join("qb.txt"), QB_FILE).await.unwrap();
        let bad_calls: &[u8] = b"QB / L / Dalvin\xffCook\n";
        tokio::fs::write(week_dir.join("love_hate.txt"), bad_calls).await.unwrap();

        let config =
            AccuracyConfig { rankings_dir: dir.path().to_path_buf(), ..Default::default() };
        let inputs = RankingsStore::new(config).load_week(7, &NameResolver::new()).await;
        assert_eq!(inputs.predicted[&PositionGroup::QB].len(), 4);
        assert!(inputs.love_hate.is_none());
    }
}

use crate::error::{AccuracyError, Result};
use crate::models::Week;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use tracing::warn;

/// Week of the season `today` falls in, given the Sunday of week 1
///
/// Days before the season start map to week 0.
pub fn current_week(season_start: NaiveDate, today: NaiveDate) -> Week {
    let days = (today - season_start).num_days();
    if days < 0 {
        return 0;
    }
    (days / 7 + 1) as Week
}

/// Inclusive range of weeks to analyze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRange {
    pub start: Week,
    pub end: Week,
}

impl WeekRange {
    pub fn new(start: Week, end: Week) -> Self {
        Self { start, end }
    }

    /// Parse "", "N" or "N-M". Whitespace is ignored; an empty string yields `default`.
    pub fn parse(text: &str, default: WeekRange) -> Result<Self> {
        let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if cleaned.is_empty() {
            return Ok(default);
        }

        let parse_week = |s: &str| {
            s.parse::<Week>().map_err(|_| AccuracyError::InvalidWeekRange(text.to_string()))
        };

        let range = match cleaned.split_once('-') {
            Some((start, end)) => Self::new(parse_week(start)?, parse_week(end)?),
            None => {
                let week = parse_week(&cleaned)?;
                Self::new(week, week)
            }
        };

        if range.start > range.end {
            return Err(AccuracyError::InvalidWeekRange(text.to_string()));
        }
        Ok(range)
    }

    /// Clamp to the weeks that have data, warning about every adjustment
    pub fn clamp(self, first_available: Week, last_available: Week) -> Self {
        let mut range = self;
        if range.start < first_available {
            warn!(
                "Changing the first week to {} because that's the earliest rankings data available",
                first_available
            );
            range.start = first_available;
        }
        if range.end > last_available {
            warn!(
                "Changing the last week to {} because that's the most recent week so far",
                last_available
            );
            range.end = last_available;
        }
        range
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn weeks(&self) -> RangeInclusive<Week> {
        self.start..=self.end
    }
}

impl fmt::Display for WeekRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "week {}", self.start)
        } else {
            write!(f, "weeks {}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_current_week() {
        let start = date(2019, 9, 8);
        assert_eq!(current_week(start, date(2019, 9, 8)), 1);
        assert_eq!(current_week(start, date(2019, 9, 14)), 1);
        assert_eq!(current_week(start, date(2019, 9, 15)), 2);
        assert_eq!(current_week(start, date(2019, 11, 3)), 9);
        assert_eq!(current_week(start, date(2019, 8, 1)), 0);
    }

    #[test]
    fn test_parse() {
        let default = WeekRange::new(3, 12);
        assert_eq!(WeekRange::parse("", default).unwrap(), default);
        assert_eq!(WeekRange::parse(" 5 ", default).unwrap(), WeekRange::new(5, 5));
        assert_eq!(WeekRange::parse("4 - 9", default).unwrap(), WeekRange::new(4, 9));
        assert!(WeekRange::parse("9-4", default).is_err());
        assert!(WeekRange::parse("four", default).is_err());
        assert!(WeekRange::parse("3-", default).is_err());
    }

    #[test]
    fn test_clamp_and_display() {
        let range = WeekRange::new(1, 20).clamp(3, 17);
        assert_eq!(range, WeekRange::new(3, 17));
        assert_eq!(range.weeks().count(), 15);
        assert_eq!(range.to_string(), "weeks 3-17");
        assert_eq!(WeekRange::new(6, 6).to_string(), "week 6");
        assert!(WeekRange::new(3, 9).clamp(3, 0).is_empty());
    }
}

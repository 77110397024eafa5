//! Season and week types.

use crate::error::{NflDataError, Result};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// First season with play-by-play era data in the upstream sources.
pub const FIRST_AVAILABLE_SEASON: u16 = 1999;

/// First season played with an 18-week regular season.
pub const FIRST_18_WEEK_SEASON: u16 = 2021;

/// Postseason rounds appended after the regular season (WC, DIV, CONF, SB).
pub const POSTSEASON_ROUNDS: u16 = 4;

/// Seasons start in June; dates from the month before onwards carry the new label.
const SEASON_START_MONTH: u32 = 6;

/// Type-safe wrapper for Season years
///
/// # Examples
///
/// ```rust
/// use nfl_data_loader::Season;
///
/// assert_eq!(Season::new(2020).regular_season_weeks(), 17);
/// assert_eq!(Season::new(2023).regular_season_weeks(), 18);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn as_i64(&self) -> i64 {
        self.0 as i64
    }

    /// The season a calendar date belongs to.
    ///
    /// Seasons are labelled by the year they kick off in; January through
    /// April still belong to the previous year's season.
    pub fn for_date(date: NaiveDate) -> Self {
        let year = date.year() as u16;
        if date.month() >= SEASON_START_MONTH - 1 {
            Self(year)
        } else {
            Self(year - 1)
        }
    }

    /// The season in progress today (UTC).
    pub fn current() -> Self {
        Self::for_date(Utc::now().date_naive())
    }

    pub fn previous(&self) -> Self {
        Self(self.0 - 1)
    }

    pub fn regular_season_weeks(&self) -> u16 {
        if self.0 >= FIRST_18_WEEK_SEASON {
            18
        } else {
            17
        }
    }

    /// Last week number including the postseason.
    pub fn max_week(&self) -> u16 {
        self.regular_season_weeks() + POSTSEASON_ROUNDS
    }

    /// Reject seasons the upstream sources do not cover.
    pub fn ensure_available(&self) -> Result<()> {
        if self.0 < FIRST_AVAILABLE_SEASON {
            return Err(NflDataError::InvalidSeason {
                season: self.as_i64(),
                reason: format!("data not available before {}", FIRST_AVAILABLE_SEASON),
            });
        }
        Ok(())
    }
}

impl Default for Season {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = NflDataError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Type-safe wrapper for Week numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Week(pub u16);

impl Week {
    pub fn new(week: u16) -> Self {
        Self(week)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn as_i64(&self) -> i64 {
        self.0 as i64
    }

    /// Check the week exists in the given season, postseason included.
    pub fn validate_for(&self, season: Season) -> Result<()> {
        if self.0 == 0 || self.0 > season.max_week() {
            return Err(NflDataError::InvalidWeek {
                week: self.as_i64(),
            });
        }
        Ok(())
    }

    pub fn is_postseason(&self, season: Season) -> bool {
        self.0 > season.regular_season_weeks()
    }
}

impl Default for Week {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Week {
    type Err = NflDataError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

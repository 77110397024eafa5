//! Filter enums accepted by the loaders.

use crate::error::NflDataError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Portion of the season a request covers.
///
/// The upstream files tag each game `REG` or `POST`; `All` disables the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SeasonType {
    #[default]
    Regular,
    Post,
    All,
}

impl SeasonType {
    /// Upstream code, `None` when every game qualifies.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            SeasonType::Regular => Some("REG"),
            SeasonType::Post => Some("POST"),
            SeasonType::All => None,
        }
    }

    pub fn matches(&self, code: &str) -> bool {
        match self.code() {
            Some(expected) => expected.eq_ignore_ascii_case(code),
            None => true,
        }
    }
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code().unwrap_or("ALL"))
    }
}

impl FromStr for SeasonType {
    type Err = NflDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "REG" | "REGULAR" => Ok(SeasonType::Regular),
            "POST" | "POSTSEASON" => Ok(SeasonType::Post),
            "ALL" => Ok(SeasonType::All),
            _ => Err(NflDataError::Config {
                message: format!("unknown season type '{}'", s),
            }),
        }
    }
}

/// Box score file families published by nflverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatGroup {
    #[default]
    Offense,
    Defense,
    Kicking,
}

impl StatGroup {
    /// Suffix appended to `player_stats` in the release asset name.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            StatGroup::Offense => "",
            StatGroup::Defense => "_def",
            StatGroup::Kicking => "_kicking",
        }
    }
}

impl fmt::Display for StatGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatGroup::Offense => "offense",
            StatGroup::Defense => "defense",
            StatGroup::Kicking => "kicking",
        };
        write!(f, "{}", s)
    }
}

/// Fantasy projection groups; each selects a stat column family and positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FantasyGroup {
    #[default]
    Offense,
    Defense,
    SpecialTeams,
    All,
}

impl FantasyGroup {
    /// Fantasy positions (ESPN labels) kept for this group.
    pub fn positions(&self) -> &'static [&'static str] {
        match self {
            FantasyGroup::Offense => &["QB", "RB", "WR", "TE"],
            FantasyGroup::Defense => &["D/ST"],
            FantasyGroup::SpecialTeams => &["K"],
            FantasyGroup::All => &["QB", "RB", "WR", "TE", "D/ST", "K"],
        }
    }
}

impl FromStr for FantasyGroup {
    type Err = NflDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "OFF" => Ok(FantasyGroup::Offense),
            "DEF" => Ok(FantasyGroup::Defense),
            "ST" => Ok(FantasyGroup::SpecialTeams),
            "ALL" => Ok(FantasyGroup::All),
            _ => Err(NflDataError::Config {
                message: format!("unknown fantasy group '{}'", s),
            }),
        }
    }
}

/// Weekly rows, or one summed row per player for the season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FantasyMode {
    #[default]
    Weekly,
    Season,
}

//! Identifier types for players, teams, games and venues.

use crate::error::{NflDataError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relocated or alternate franchise codes and the code they are stored under.
const TEAM_ALIASES: &[(&str, &str)] = &[
    ("OAK", "LV"),
    ("LVR", "LV"),
    ("SD", "LAC"),
    ("SDG", "LAC"),
    ("STL", "LA"),
    ("LAR", "LA"),
    ("JAC", "JAX"),
    ("WSH", "WAS"),
    ("ARZ", "ARI"),
    ("BLT", "BAL"),
    ("CLV", "CLE"),
    ("HST", "HOU"),
    ("GNB", "GB"),
    ("KAN", "KC"),
    ("NWE", "NE"),
    ("NOR", "NO"),
    ("SFO", "SF"),
    ("TAM", "TB"),
];

/// nflverse (gsis) player identifier, e.g. `00-0033873`.
///
/// This is the join key shared by rosters, box scores, injuries and ratings.
///
/// # Examples
///
/// ```rust
/// use nfl_data_loader::types::PlayerId;
///
/// let id = PlayerId::new("00-0033873");
/// assert_eq!(id.as_str(), "00-0033873");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ESPN player identifier used by the fantasy pumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EspnId(pub i64);

impl EspnId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for EspnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EspnId {
    type Err = NflDataError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Team abbreviation, normalized to the franchise's current code.
///
/// # Examples
///
/// ```rust
/// use nfl_data_loader::types::TeamId;
///
/// assert_eq!(TeamId::new("oak").as_str(), "LV");
/// assert_eq!(TeamId::new("KC").as_str(), "KC");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(String);

impl TeamId {
    pub fn new(code: &str) -> Self {
        Self(normalize_team_code(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Map any historical franchise code onto the current one.
pub fn normalize_team_code(code: &str) -> String {
    let upper = code.trim().to_uppercase();
    TEAM_ALIASES
        .iter()
        .find(|(alias, _)| *alias == upper)
        .map(|(_, current)| current.to_string())
        .unwrap_or(upper)
}

/// Game identifier in the `season_week_home_away` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameId(pub String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build the canonical id for a matchup.
    pub fn from_matchup(season: i64, week: i64, home: &TeamId, away: &TeamId) -> Self {
        Self(format!("{}_{}_{}_{}", season, week, home, away))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stadium identifier as published in the schedule (e.g. `KAN00`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VenueId(pub String);

impl VenueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_new() {
        let id = PlayerId::new("00-0033873");
        assert_eq!(id.as_str(), "00-0033873");
        assert_eq!(id.to_string(), "00-0033873");
    }

    #[test]
    fn test_player_id_serde() {
        let id = PlayerId::new("00-0033873");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00-0033873\"");
        let deserialized: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_espn_id_from_str() {
        let id: EspnId = "3139477".parse().unwrap();
        assert_eq!(id.as_i64(), 3139477);
        assert!("abc".parse::<EspnId>().is_err());
    }

    #[test]
    fn test_team_relocations_normalized() {
        assert_eq!(TeamId::new("OAK").as_str(), "LV");
        assert_eq!(TeamId::new("SD").as_str(), "LAC");
        assert_eq!(TeamId::new("STL").as_str(), "LA");
        assert_eq!(TeamId::new("LAR").as_str(), "LA");
        assert_eq!(TeamId::new("JAC").as_str(), "JAX");
        assert_eq!(TeamId::new("WSH").as_str(), "WAS");
    }

    #[test]
    fn test_team_code_case_and_whitespace() {
        assert_eq!(normalize_team_code(" kc "), "KC");
        assert_eq!(normalize_team_code("det"), "DET");
    }

    #[test]
    fn test_game_id_from_matchup() {
        let id = GameId::from_matchup(2023, 1, &TeamId::new("KC"), &TeamId::new("DET"));
        assert_eq!(id.as_str(), "2023_1_KC_DET");
    }
}

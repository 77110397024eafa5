//! Typed views of the core entities.
//!
//! Validated tables can be read into these with [`Table::to_typed`].
//!
//! [`Table::to_typed`]: crate::table::Table::to_typed

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub season: i64,
    pub team_id: String,
    pub name: String,
    pub nickname: String,
    pub conference: String,
    pub division: String,
    #[serde(default)]
    pub espn_team_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub season: i64,
    pub player_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub position_group: Option<String>,
    #[serde(default)]
    pub high_pos_group: Option<String>,
    #[serde(default)]
    pub latest_team: Option<String>,
    pub status_abbr: String,
    #[serde(default)]
    pub espn_id: Option<String>,
    #[serde(default)]
    pub pfr_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub season: i64,
    pub week: i64,
    pub game_id: String,
    pub game_type: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub home_score: Option<i64>,
    #[serde(default)]
    pub away_score: Option<i64>,
    #[serde(default)]
    pub venue_id: Option<String>,
    #[serde(default)]
    pub home_epa: Option<f64>,
    #[serde(default)]
    pub away_epa: Option<f64>,
    #[serde(default)]
    pub home_implied_win_prob: Option<f64>,
    #[serde(default)]
    pub away_implied_win_prob: Option<f64>,
}

impl Event {
    pub fn is_final(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }

    /// Home margin of victory, `None` before kickoff.
    pub fn home_margin(&self) -> Option<i64> {
        Some(self.home_score? - self.away_score?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub season: i64,
    pub venue_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub roof: Option<String>,
    #[serde(default)]
    pub surface: Option<String>,
    #[serde(default)]
    pub home_team: Option<String>,
    #[serde(default)]
    pub neutral_site: Option<bool>,
    pub games: i64,
}

//! Static franchise reference.

use crate::core::SourceClient;
use crate::error::Result;
use crate::schema::definitions::TEAM_SCHEMA;
use crate::schema::records::Team;
use crate::schema::Schema;
use crate::sources::{LoadRequest, Loader};
use crate::table::Table;
use crate::types::{normalize_team_code, Season};
use async_trait::async_trait;

/// ESPN encodes a team defense as `-16000 - espn_team_id`.
const DST_ID_BASE: i64 = -16000;

#[derive(Debug, Clone, Copy)]
pub struct Franchise {
    pub team_id: &'static str,
    pub name: &'static str,
    pub nickname: &'static str,
    pub conference: &'static str,
    pub division: &'static str,
    pub espn_team_id: i64,
}

const fn franchise(
    team_id: &'static str,
    name: &'static str,
    nickname: &'static str,
    conference: &'static str,
    division: &'static str,
    espn_team_id: i64,
) -> Franchise {
    Franchise {
        team_id,
        name,
        nickname,
        conference,
        division,
        espn_team_id,
    }
}

pub const FRANCHISES: [Franchise; 32] = [
    franchise("BUF", "Buffalo Bills", "Bills", "AFC", "East", 2),
    franchise("MIA", "Miami Dolphins", "Dolphins", "AFC", "East", 15),
    franchise("NE", "New England Patriots", "Patriots", "AFC", "East", 17),
    franchise("NYJ", "New York Jets", "Jets", "AFC", "East", 20),
    franchise("BAL", "Baltimore Ravens", "Ravens", "AFC", "North", 33),
    franchise("CIN", "Cincinnati Bengals", "Bengals", "AFC", "North", 4),
    franchise("CLE", "Cleveland Browns", "Browns", "AFC", "North", 5),
    franchise("PIT", "Pittsburgh Steelers", "Steelers", "AFC", "North", 23),
    franchise("HOU", "Houston Texans", "Texans", "AFC", "South", 34),
    franchise("IND", "Indianapolis Colts", "Colts", "AFC", "South", 11),
    franchise("JAX", "Jacksonville Jaguars", "Jaguars", "AFC", "South", 30),
    franchise("TEN", "Tennessee Titans", "Titans", "AFC", "South", 10),
    franchise("DEN", "Denver Broncos", "Broncos", "AFC", "West", 7),
    franchise("KC", "Kansas City Chiefs", "Chiefs", "AFC", "West", 12),
    franchise("LV", "Las Vegas Raiders", "Raiders", "AFC", "West", 13),
    franchise("LAC", "Los Angeles Chargers", "Chargers", "AFC", "West", 24),
    franchise("DAL", "Dallas Cowboys", "Cowboys", "NFC", "East", 6),
    franchise("NYG", "New York Giants", "Giants", "NFC", "East", 19),
    franchise("PHI", "Philadelphia Eagles", "Eagles", "NFC", "East", 21),
    franchise("WAS", "Washington Commanders", "Commanders", "NFC", "East", 28),
    franchise("CHI", "Chicago Bears", "Bears", "NFC", "North", 3),
    franchise("DET", "Detroit Lions", "Lions", "NFC", "North", 8),
    franchise("GB", "Green Bay Packers", "Packers", "NFC", "North", 9),
    franchise("MIN", "Minnesota Vikings", "Vikings", "NFC", "North", 16),
    franchise("ATL", "Atlanta Falcons", "Falcons", "NFC", "South", 1),
    franchise("CAR", "Carolina Panthers", "Panthers", "NFC", "South", 29),
    franchise("NO", "New Orleans Saints", "Saints", "NFC", "South", 18),
    franchise("TB", "Tampa Bay Buccaneers", "Buccaneers", "NFC", "South", 27),
    franchise("ARI", "Arizona Cardinals", "Cardinals", "NFC", "West", 22),
    franchise("LA", "Los Angeles Rams", "Rams", "NFC", "West", 14),
    franchise("SF", "San Francisco 49ers", "49ers", "NFC", "West", 25),
    franchise("SEA", "Seattle Seahawks", "Seahawks", "NFC", "West", 26),
];

/// Franchise by any current or historical code.
pub fn franchise_by_code(code: &str) -> Option<&'static Franchise> {
    let code = normalize_team_code(code);
    FRANCHISES.iter().find(|f| f.team_id == code)
}

/// Franchise by its full name, case-insensitive (`"kansas city chiefs"`).
pub fn franchise_by_name(name: &str) -> Option<&'static Franchise> {
    let wanted = name.trim();
    FRANCHISES
        .iter()
        .find(|f| f.name.eq_ignore_ascii_case(wanted))
}

/// ESPN player id of a team's D/ST unit.
pub fn dst_espn_id(team: &str) -> Option<i64> {
    franchise_by_code(team).map(|f| DST_ID_BASE - f.espn_team_id)
}

/// Team abbreviation for a D/ST ESPN id.
pub fn team_for_dst_espn_id(espn_id: i64) -> Option<&'static str> {
    let team_id = DST_ID_BASE - espn_id;
    FRANCHISES
        .iter()
        .find(|f| f.espn_team_id == team_id)
        .map(|f| f.team_id)
}

/// All 32 franchises labelled with one season.
pub fn collect_teams(season: Season) -> Result<Table> {
    let teams: Vec<Team> = FRANCHISES
        .iter()
        .map(|f| Team {
            season: season.as_i64(),
            team_id: f.team_id.to_string(),
            name: f.name.to_string(),
            nickname: f.nickname.to_string(),
            conference: f.conference.to_string(),
            division: f.division.to_string(),
            espn_team_id: Some(f.espn_team_id),
        })
        .collect();
    TEAM_SCHEMA.validate_table(&Table::from_serializable(&teams)?)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TeamLoader;

#[async_trait]
impl Loader for TeamLoader {
    fn name(&self) -> &'static str {
        "reference.teams"
    }

    fn schema(&self) -> &'static Schema {
        &TEAM_SCHEMA
    }

    async fn collect(&self, _client: &SourceClient, request: &LoadRequest) -> Result<Table> {
        collect_teams(request.season)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_reference_is_complete() {
        let codes: HashSet<&str> = FRANCHISES.iter().map(|f| f.team_id).collect();
        assert_eq!(codes.len(), 32);
        let espn: HashSet<i64> = FRANCHISES.iter().map(|f| f.espn_team_id).collect();
        assert_eq!(espn.len(), 32);
        for conf in ["AFC", "NFC"] {
            for div in ["East", "North", "South", "West"] {
                let n = FRANCHISES
                    .iter()
                    .filter(|f| f.conference == conf && f.division == div)
                    .count();
                assert_eq!(n, 4, "{} {}", conf, div);
            }
        }
    }

    #[test]
    fn test_lookup_by_historical_code() {
        assert_eq!(franchise_by_code("OAK").unwrap().team_id, "LV");
        assert_eq!(franchise_by_code("stl").unwrap().name, "Los Angeles Rams");
        assert!(franchise_by_code("XYZ").is_none());
        assert_eq!(franchise_by_name("kansas city chiefs").unwrap().team_id, "KC");
    }

    #[test]
    fn test_dst_ids() {
        assert_eq!(dst_espn_id("KC"), Some(-16012));
        assert_eq!(dst_espn_id("BAL"), Some(-16033));
        assert_eq!(team_for_dst_espn_id(-16012), Some("KC"));
        assert_eq!(team_for_dst_espn_id(3139477), None);
    }

    #[test]
    fn test_collect_teams_validates() {
        let table = collect_teams(Season::new(2023)).unwrap();
        assert_eq!(table.len(), 32);
        assert_eq!(table.columns()[0], "season");
        let teams: Vec<Team> = table.to_typed().unwrap();
        assert!(teams.iter().all(|t| t.season == 2023));
    }
}

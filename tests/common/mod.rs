//! Shared fixtures for the integration tests

#![allow(dead_code)]

use nfl_data_loader::table::codec::encode;
use nfl_data_loader::table::DataFormat;
use nfl_data_loader::Table;
use serde_json::{json, Value};

/// Three 2023 games in the upstream schedule layout; the Giants game has no
/// lines.
pub fn schedule() -> Table {
    let columns = [
        "game_id", "season", "game_type", "week", "gameday", "gametime", "away_team", "away_score",
        "home_team", "home_score", "location", "away_moneyline", "home_moneyline", "spread_line",
        "total_line", "roof", "surface", "stadium_id", "stadium", "espn",
    ];
    let game = |id: &str, week: i64, day: &str, away: &str, home: &str, ml: Option<(i64, i64)>, stadium: &str, espn: i64| {
        vec![
            json!(id),
            json!(2023),
            json!("REG"),
            json!(week),
            json!(day),
            json!("20:20"),
            json!(away),
            json!(20),
            json!(home),
            json!(21),
            json!("Home"),
            ml.map(|m| json!(m.0)).unwrap_or(Value::Null),
            ml.map(|m| json!(m.1)).unwrap_or(Value::Null),
            ml.map(|_| json!(-4.5)).unwrap_or(Value::Null),
            ml.map(|_| json!(47.5)).unwrap_or(Value::Null),
            json!("outdoors"),
            json!("grass"),
            json!(stadium),
            json!(format!("{} Stadium", stadium)),
            json!(espn),
        ]
    };
    Table::from_rows(
        columns.iter().map(|c| c.to_string()).collect(),
        vec![
            game("2023_01_DET_KC", 1, "2023-09-07", "DET", "KC", Some((180, -218)), "KAN00", 401547353),
            game("2023_01_DAL_NYG", 1, "2023-09-10", "DAL", "NYG", None, "NYC01", 401547398),
            game("2023_02_KC_JAX", 2, "2023-09-17", "KC", "JAX", Some((-142, 120)), "JAX00", 401547410),
        ],
    )
    .unwrap()
}

/// Offensive box scores across two seasons in the nflverse layout.
pub fn player_stats() -> Table {
    let line = |id: &str, name: &str, pos: &str, team: &str, season: i64, week: i64, epa: f64, yards: f64| {
        vec![
            json!(id),
            json!(name),
            json!(pos),
            json!(team),
            json!(season),
            json!(week),
            json!("REG"),
            json!(epa),
            json!(0.5),
            json!(yards),
        ]
    };
    Table::from_rows(
        vec![
            "player_id".into(),
            "player_display_name".into(),
            "position".into(),
            "recent_team".into(),
            "season".into(),
            "week".into(),
            "season_type".into(),
            "passing_epa".into(),
            "rushing_epa".into(),
            "passing_yards".into(),
        ],
        vec![
            line("00-0033873", "Patrick Mahomes", "QB", "KC", 2022, 18, 9.0, 202.0),
            line("00-0033873", "Patrick Mahomes", "QB", "KC", 2023, 1, 3.0, 226.0),
            line("00-0033873", "Patrick Mahomes", "QB", "KC", 2023, 2, 7.5, 305.0),
            line("00-0034855", "Jared Goff", "QB", "DET", 2023, 1, -1.0, 253.0),
            line("00-0036945", "Trevor Lawrence", "QB", "JAC", 2023, 2, -2.0, 216.0),
        ],
    )
    .unwrap()
}

/// Event pump participation rows; the last belongs to week two.
pub fn starters() -> Table {
    let row = |event: i64, team: &str, player: i64, starter: bool, dnp: bool| {
        vec![json!(event), json!(team), json!(player), json!(starter), json!(dnp), json!(0)]
    };
    Table::from_rows(
        vec![
            "event_id".into(),
            "team_abbr".into(),
            "player_id".into(),
            "starter".into(),
            "did_not_play".into(),
            "period".into(),
        ],
        vec![
            row(401547353, "KC", 3139477, true, false),
            row(401547353, "DET", 3046779, true, false),
            row(401547353, "DET", 4429084, false, true),
            row(401547410, "JAX", 4360310, true, false),
        ],
    )
    .unwrap()
}

pub fn csv_bytes(table: &Table) -> Vec<u8> {
    encode(table, DataFormat::Csv).unwrap()
}

pub fn parquet_bytes(table: &Table) -> Vec<u8> {
    encode(table, DataFormat::Parquet).unwrap()
}

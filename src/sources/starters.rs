//! Game participation (starters and inactives) from the event pump.

use crate::core::config::join_location;
use crate::core::SourceClient;
use crate::error::Result;
use crate::schema::definitions::STARTER;
use crate::schema::Schema;
use crate::sources::normalize::{drop_blank, normalize_teams, rename_if_absent};
use crate::sources::schedule::{events_from, fetch_schedule};
use crate::sources::{LoadRequest, Loader, EVENTS};
use crate::table::value::as_i64;
use crate::table::Table;
use crate::transforms::join::{merge_many_to_one, JoinSpec};
use crate::types::Season;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Pump bookkeeping columns with no meaning downstream.
const DROPPED: &[&str] = &["event_id", "period", "active", "team_id"];

pub fn starters_path(season: Season) -> String {
    format!("rosters/football/nfl/{}.parquet", season)
}

/// One row per team and game, keyed by the ESPN event id.
fn team_games(events: &Table) -> Result<Table> {
    events.require_column("espn_event_id", "starters")?;
    let mut rows = Vec::with_capacity(events.len() * 2);
    for row in events.iter() {
        for side in ["home_team", "away_team"] {
            rows.push(vec![
                row.get("game_id").clone(),
                row.get("season").clone(),
                row.get("game_type").clone(),
                row.get("week").clone(),
                row.get(side).clone(),
                row.get("espn_event_id").clone(),
            ]);
        }
    }
    Table::from_rows(
        ["game_id", "season", "game_type", "week", "team", "event_id"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        rows,
    )
}

/// Canonical text form of an ESPN id, `3139477.0` included.
fn espn_text(value: &Value) -> Value {
    match as_i64(value) {
        Some(id) => Value::String(id.to_string()),
        None => value.clone(),
    }
}

/// Starter shaping without the fetches.
///
/// Pump rows are matched to `events` on `(event_id, team)`; rows of games
/// outside `events` and rows without a player are dropped.
pub fn starters_from(raw: &Table, events: &Table) -> Result<Table> {
    let table = rename_if_absent(raw, "player_id", "espn_id");
    let table = normalize_teams(&rename_if_absent(&table, "team_abbr", "team"));
    // the schedule is authoritative for these
    let table = table.drop_columns(&["team_id", "season", "week", "game_id", "game_type"]);
    let table = drop_blank(&table, "espn_id").map_column("espn_id", espn_text)?;

    let games = team_games(events)?;
    let joined = merge_many_to_one(&table, &games, &JoinSpec::inner(&["event_id", "team"]))?;
    STARTER.validate_table(&joined.drop_columns(DROPPED))
}

pub async fn collect_starters(client: &SourceClient, request: &LoadRequest) -> Result<Table> {
    request.validate()?;
    let location = join_location(&client.config().event_base, &starters_path(request.season));
    let raw = client.fetch_table(EVENTS, &location).await?;
    let schedule = fetch_schedule(client, request).await?;
    let events = events_from(&schedule, request)?;
    let starters = starters_from(&raw, &events)?;
    debug!(
        season = %request.season,
        week = ?request.week,
        rows = starters.len(),
        starters = starters.iter().filter(|r| r.get("starter") == &serde_json::Value::Bool(true)).count(),
        "collected starters"
    );
    Ok(starters)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StarterLoader;

#[async_trait]
impl Loader for StarterLoader {
    fn name(&self) -> &'static str {
        "events.starters"
    }

    fn schema(&self) -> &'static Schema {
        &STARTER
    }

    async fn collect(&self, client: &SourceClient, request: &LoadRequest) -> Result<Table> {
        collect_starters(client, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NflDataError;
    use serde_json::json;

    fn events() -> Table {
        Table::from_rows(
            vec![
                "season".into(),
                "week".into(),
                "game_id".into(),
                "game_type".into(),
                "home_team".into(),
                "away_team".into(),
                "espn_event_id".into(),
            ],
            vec![
                vec![json!(2023), json!(1), json!("2023_1_KC_DET"), json!("REG"), json!("KC"), json!("DET"), json!("401547353")],
                vec![json!(2023), json!(1), json!("2023_1_NYG_DAL"), json!("REG"), json!("NYG"), json!("DAL"), json!(null)],
            ],
        )
        .unwrap()
    }

    fn raw() -> Table {
        let row = |event: i64, team: &str, player: Value, starter: bool, dnp: bool| {
            vec![json!(event), json!(team), player, json!(starter), json!(dnp), json!(0), json!(true), json!(12)]
        };
        Table::from_rows(
            vec![
                "event_id".into(),
                "team_abbr".into(),
                "player_id".into(),
                "starter".into(),
                "did_not_play".into(),
                "period".into(),
                "active".into(),
                "team_id".into(),
            ],
            vec![
                row(401547353, "KC", json!(3139477), true, false),
                row(401547353, "KC", json!(3046779.0), false, true),
                row(401547353, "DET", json!(3046779), true, false),
                row(401547353, "KC", json!(null), false, false),
                row(401547999, "BUF", json!(3918298), true, false),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_starters_joined_to_events() {
        let out = starters_from(&raw(), &events()).unwrap();
        assert_eq!(out.len(), 3);
        for dropped in DROPPED {
            assert!(!out.has_column(dropped));
        }

        let mahomes = out.row(0);
        assert_eq!(mahomes.get_str("espn_id"), Some("3139477"));
        assert_eq!(mahomes.get_str("game_id"), Some("2023_1_KC_DET"));
        assert_eq!(mahomes.get_i64("week"), Some(1));
        assert_eq!(mahomes.get("starter"), &json!(true));

        let inactive = out.row(1);
        assert_eq!(inactive.get_str("espn_id"), Some("3046779"));
        assert_eq!(inactive.get("did_not_play"), &json!(true));
        assert_eq!(out.row(2).get_str("team"), Some("DET"));
    }

    #[test]
    fn test_events_need_espn_ids() {
        let events = events().drop_columns(&["espn_event_id"]);
        assert!(matches!(
            starters_from(&raw(), &events),
            Err(NflDataError::MissingColumn { .. })
        ));
    }
}

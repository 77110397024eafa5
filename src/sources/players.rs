//! nflverse player directory.

use crate::core::config::join_location;
use crate::core::SourceClient;
use crate::error::Result;
use crate::schema::definitions::PLAYER;
use crate::schema::Schema;
use crate::sources::ids::{collect_player_ids, IdCrosswalk};
use crate::sources::normalize::{
    drop_blank, filter_position_group, normalize_teams, status_abbr, with_constant,
    with_position_groups,
};
use crate::sources::{LoadRequest, Loader, MISSING_DRAFT, NFLVERSE};
use crate::table::{Record, Table};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

pub const PLAYERS_PATH: &str = "players_components/players.parquet";

/// Columns filled from the manual draft file when the directory lacks them,
/// as `(directory column, draft file column)`.
const DRAFT_FILLS: &[(&str, &str)] = &[
    ("rookie_season", "rookie_year"),
    ("draft_pick", "draft_number"),
    ("draft_year", "entry_year"),
    ("birth_date", "birth_date"),
];

/// Directory shaping without the fetches.
///
/// `missing_draft` supplies draft details absent upstream (first row per
/// player wins); `ids` fills a missing `espn_id`.
pub fn players_from(
    raw: &Table,
    missing_draft: &Table,
    ids: &IdCrosswalk,
    request: &LoadRequest,
) -> Result<Table> {
    let table = normalize_teams(raw).rename(&[("display_name", "name"), ("gsis_id", "player_id")]);
    let table = drop_blank(&table, "player_id");
    let table = with_position_groups(&table, "position", true)
        .derive("status_abbr", |row| Value::from(status_abbr(row.get_str("status"))));

    let fills: HashMap<String, Record> = missing_draft
        .group_indices(&["player_id"])?
        .into_iter()
        .filter_map(|(_, rows)| {
            let record = missing_draft.row(rows[0]).to_record();
            let id = record.get("player_id")?.as_str()?.to_string();
            Some((id, record))
        })
        .collect();

    let mut table = table;
    for (column, source) in DRAFT_FILLS {
        table = table.derive(column, |row| {
            let current = row.get(column);
            if !current.is_null() {
                return current.clone();
            }
            row.get_str("player_id")
                .and_then(|id| fills.get(id))
                .and_then(|fill| fill.get(*source))
                .cloned()
                .unwrap_or(Value::Null)
        });
    }

    let table = table.derive("espn_id", |row| match row.get("espn_id") {
        Value::Null => row
            .get_str("player_id")
            .and_then(|id| ids.espn_for_gsis(id))
            .map(|espn| Value::String(espn.to_string()))
            .unwrap_or(Value::Null),
        other => other.clone(),
    });

    let table = with_constant(&table, "season", Value::from(request.season.as_i64()))?;
    let table = filter_position_group(&table, request.position_group);
    PLAYER.validate_table(&table)
}

pub async fn collect_players(client: &SourceClient, request: &LoadRequest) -> Result<Table> {
    let config = client.config();
    let location = join_location(&config.nflverse_base, PLAYERS_PATH);
    let raw = client.fetch_table(NFLVERSE, &location).await?;
    let missing_draft = client
        .fetch_table(MISSING_DRAFT, &config.missing_draft_url)
        .await?;
    let ids = IdCrosswalk::from_table(&collect_player_ids(client).await?);
    let players = players_from(&raw, &missing_draft, &ids, request)?;
    debug!(season = %request.season, rows = players.len(), "collected players");
    Ok(players)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerLoader;

#[async_trait]
impl Loader for PlayerLoader {
    fn name(&self) -> &'static str {
        "nflverse.players"
    }

    fn schema(&self) -> &'static Schema {
        &PLAYER
    }

    async fn collect(&self, client: &SourceClient, request: &LoadRequest) -> Result<Table> {
        collect_players(client, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PositionGroup, Season};
    use serde_json::json;

    fn raw() -> Table {
        Table::from_rows(
            vec![
                "gsis_id".into(),
                "display_name".into(),
                "position".into(),
                "latest_team".into(),
                "status".into(),
                "birth_date".into(),
                "rookie_season".into(),
                "draft_pick".into(),
                "draft_year".into(),
                "espn_id".into(),
            ],
            vec![
                vec![
                    json!("00-0033873"),
                    json!("Patrick Mahomes"),
                    json!("QB"),
                    json!("KC"),
                    json!("ACT"),
                    json!("1995-09-17"),
                    json!(2017),
                    json!(10),
                    json!(2017),
                    json!("3139477"),
                ],
                vec![
                    json!("00-0012345"),
                    json!("Old Timer"),
                    json!("WR"),
                    json!("OAK"),
                    json!("RET"),
                    json!(null),
                    json!(null),
                    json!(null),
                    json!(null),
                    json!(null),
                ],
                vec![
                    json!(null),
                    json!("No Id"),
                    json!("TE"),
                    json!("KC"),
                    json!(null),
                    json!(null),
                    json!(null),
                    json!(null),
                    json!(null),
                    json!(null),
                ],
            ],
        )
        .unwrap()
    }

    fn missing_draft() -> Table {
        Table::from_rows(
            vec![
                "player_id".into(),
                "rookie_year".into(),
                "draft_number".into(),
                "entry_year".into(),
                "birth_date".into(),
            ],
            vec![
                vec![json!("00-0012345"), json!(2001), json!(45), json!(2001), json!("1978-01-02")],
                vec![json!("00-0012345"), json!(1999), json!(99), json!(1999), json!("1970-01-01")],
                vec![json!("00-0033873"), json!(2000), json!(1), json!(2000), json!("1980-01-01")],
            ],
        )
        .unwrap()
    }

    fn ids() -> IdCrosswalk {
        IdCrosswalk::from_table(
            &Table::from_rows(
                vec!["gsis_id".into(), "espn_id".into()],
                vec![vec![json!("00-0012345"), json!(2976)]],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_players_shaping() {
        let req = LoadRequest::new(Season::new(2023));
        let players = players_from(&raw(), &missing_draft(), &ids(), &req).unwrap();
        assert_eq!(players.len(), 2);

        let mahomes = players.row(0);
        assert_eq!(mahomes.get_str("name"), Some("Patrick Mahomes"));
        assert_eq!(mahomes.get_str("position_group"), Some("quarterback"));
        assert_eq!(mahomes.get_str("high_pos_group"), Some("offense"));
        assert_eq!(mahomes.get_str("status_abbr"), Some("A"));
        assert_eq!(mahomes.get_i64("season"), Some(2023));
        // present values are never overwritten by the draft file
        assert_eq!(mahomes.get_i64("draft_pick"), Some(10));
        assert_eq!(mahomes.get_str("espn_id"), Some("3139477"));

        let old = players.row(1);
        assert_eq!(old.get_str("latest_team"), Some("LV"));
        assert_eq!(old.get_str("status_abbr"), Some("R"));
        assert_eq!(old.get_i64("draft_pick"), Some(45));
        assert_eq!(old.get_i64("rookie_season"), Some(2001));
        assert_eq!(old.get_str("birth_date"), Some("1978-01-02"));
        assert_eq!(old.get_str("espn_id"), Some("2976"));
    }

    #[test]
    fn test_position_group_filter() {
        let req = LoadRequest::new(Season::new(2023)).with_position_group(PositionGroup::WideReceiver);
        let players = players_from(&raw(), &missing_draft(), &ids(), &req).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players.row(0).get_str("player_id"), Some("00-0012345"));
    }

    #[test]
    fn test_unknown_position_rejected() {
        let raw = raw().map_column("position", |_| json!("XX")).unwrap();
        let req = LoadRequest::new(Season::new(2023));
        assert!(players_from(&raw, &missing_draft(), &ids(), &req).is_err());
    }
}

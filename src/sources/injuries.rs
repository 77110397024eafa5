//! Weekly injury reports.

use crate::core::config::join_location;
use crate::core::SourceClient;
use crate::error::Result;
use crate::schema::definitions::INJURY;
use crate::schema::Schema;
use crate::sources::normalize::{
    drop_blank, filter_position_group, normalize_teams, with_position_groups,
};
use crate::sources::{LoadRequest, Loader, NFLVERSE};
use crate::table::value::compare_values;
use crate::table::Table;
use crate::types::Season;
use async_trait::async_trait;
use tracing::debug;

pub fn injuries_path(season: Season) -> String {
    format!("injuries/injuries_{}.parquet", season)
}

/// Injury shaping without the fetch.
///
/// A player can be reported several times in one week; the most recently
/// modified report is kept.
pub fn injuries_from(raw: &Table, request: &LoadRequest) -> Result<Table> {
    let table = normalize_teams(raw).rename(&[("gsis_id", "player_id"), ("full_name", "name")]);
    let table = drop_blank(&table, "player_id");
    let table = with_position_groups(&table, "position", false);
    let table = match request.week {
        Some(week) => table.filter(|row| row.get_i64("week") == Some(week.as_i64())),
        None => table,
    };
    let table = filter_position_group(&table, request.position_group);

    let reported = table.len();
    let mut latest = Vec::new();
    for (_, rows) in table.group_indices(&["season", "week", "player_id"])? {
        let newest = rows.iter().copied().fold(rows[0], |best, i| {
            let a = table.row(i).get("date_modified");
            let b = table.row(best).get("date_modified");
            if !a.is_null() && (b.is_null() || compare_values(a, b).is_gt()) {
                i
            } else {
                best
            }
        });
        latest.push(newest);
    }
    latest.sort_unstable();
    let table = table.take(&latest);
    if table.len() < reported {
        debug!(
            reported,
            kept = table.len(),
            "kept the latest injury report per player and week"
        );
    }
    INJURY.validate_table(&table)
}

pub async fn collect_injuries(client: &SourceClient, request: &LoadRequest) -> Result<Table> {
    request.validate()?;
    let location = join_location(&client.config().nflverse_base, &injuries_path(request.season));
    let raw = client.fetch_table(NFLVERSE, &location).await?;
    injuries_from(&raw, request)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InjuryLoader;

#[async_trait]
impl Loader for InjuryLoader {
    fn name(&self) -> &'static str {
        "nflverse.injuries"
    }

    fn schema(&self) -> &'static Schema {
        &INJURY
    }

    async fn collect(&self, client: &SourceClient, request: &LoadRequest) -> Result<Table> {
        collect_injuries(client, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Week;
    use serde_json::json;

    fn raw() -> Table {
        Table::from_rows(
            vec![
                "season".into(),
                "game_type".into(),
                "team".into(),
                "week".into(),
                "gsis_id".into(),
                "position".into(),
                "full_name".into(),
                "report_status".into(),
                "date_modified".into(),
            ],
            vec![
                vec![json!(2023), json!("REG"), json!("KC"), json!(3), json!("00-0036212"), json!("TE"), json!("Travis Kelce"), json!("Questionable"), json!("2023-09-20 10:00:00")],
                vec![json!(2023), json!("REG"), json!("KC"), json!(3), json!("00-0036212"), json!("TE"), json!("Travis Kelce"), json!(null), json!("2023-09-22 16:00:00")],
                vec![json!(2023), json!("REG"), json!("OAK"), json!(3), json!("00-0031000"), json!("CB"), json!("Some Corner"), json!("Out"), json!(null)],
                vec![json!(2023), json!("REG"), json!("KC"), json!(4), json!("00-0036212"), json!("TE"), json!("Travis Kelce"), json!("Doubtful"), json!("2023-09-29 10:00:00")],
                vec![json!(2023), json!("REG"), json!("KC"), json!(4), json!(null), json!("TE"), json!("Unknown"), json!("Out"), json!(null)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_latest_report_wins() {
        let injuries = injuries_from(&raw(), &LoadRequest::new(Season::new(2023))).unwrap();
        assert_eq!(injuries.len(), 3);
        let kelce = injuries.row(0);
        assert_eq!(kelce.get_str("date_modified"), Some("2023-09-22 16:00:00"));
        assert_eq!(kelce.get_str("name"), Some("Travis Kelce"));
        assert_eq!(injuries.row(1).get_str("team"), Some("LV"));
        assert_eq!(injuries.row(1).get_str("position_group"), Some("d_field"));
    }

    #[test]
    fn test_week_filter() {
        let req = LoadRequest::new(Season::new(2023)).with_week(Week::new(4));
        let injuries = injuries_from(&raw(), &req).unwrap();
        assert_eq!(injuries.len(), 1);
        assert_eq!(injuries.row(0).get_str("report_status"), Some("Doubtful"));
    }
}

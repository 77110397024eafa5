//! Weekly depth charts.

use crate::core::config::join_location;
use crate::core::SourceClient;
use crate::error::Result;
use crate::schema::definitions::DEPTH_CHART;
use crate::schema::Schema;
use crate::sources::normalize::{filter_position_group, normalize_teams, with_position_groups};
use crate::sources::{LoadRequest, Loader, NFLVERSE};
use crate::table::Table;
use crate::types::Season;
use async_trait::async_trait;
use tracing::debug;

const COLUMNS: &[&str] = &[
    "season",
    "team",
    "week",
    "depth_team",
    "player_id",
    "position",
    "depth_chart_position",
];

pub fn depth_chart_path(season: Season) -> String {
    format!("depth_charts/depth_charts_{}.parquet", season)
}

/// Depth chart shaping without the fetch. Rows without a week are dropped.
pub fn depth_chart_from(raw: &Table, request: &LoadRequest) -> Result<Table> {
    let table = raw.rename(&[
        ("club_code", "team"),
        ("depth_position", "depth_chart_position"),
        ("gsis_id", "player_id"),
    ]);
    let table = normalize_teams(&table)
        .filter(|row| row.get_i64("week").is_some())
        .select_existing(COLUMNS);
    let table = with_position_groups(&table, "position", false);
    let table = match request.week {
        Some(week) => table.filter(|row| row.get_i64("week") == Some(week.as_i64())),
        None => table,
    };
    let table = filter_position_group(&table, request.position_group);
    DEPTH_CHART.validate_table(&table)
}

pub async fn collect_depth_chart(client: &SourceClient, request: &LoadRequest) -> Result<Table> {
    request.validate()?;
    let location = join_location(
        &client.config().nflverse_base,
        &depth_chart_path(request.season),
    );
    let raw = client.fetch_table(NFLVERSE, &location).await?;
    let chart = depth_chart_from(&raw, request)?;
    debug!(season = %request.season, rows = chart.len(), "collected depth chart");
    Ok(chart)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DepthChartLoader;

#[async_trait]
impl Loader for DepthChartLoader {
    fn name(&self) -> &'static str {
        "nflverse.depth_charts"
    }

    fn schema(&self) -> &'static Schema {
        &DEPTH_CHART
    }

    async fn collect(&self, client: &SourceClient, request: &LoadRequest) -> Result<Table> {
        collect_depth_chart(client, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NflDataError;
    use serde_json::json;

    fn raw() -> Table {
        Table::from_rows(
            vec![
                "season".into(),
                "club_code".into(),
                "week".into(),
                "game_type".into(),
                "depth_team".into(),
                "gsis_id".into(),
                "position".into(),
                "depth_position".into(),
            ],
            vec![
                vec![json!(2023), json!("KC"), json!(1.0), json!("REG"), json!("1"), json!("00-0033873"), json!("QB"), json!("QB")],
                vec![json!(2023), json!("OAK"), json!(1.0), json!("REG"), json!("2"), json!("00-0030001"), json!("WR"), json!("LWR")],
                vec![json!(2023), json!("KC"), json!(null), json!("REG"), json!("1"), json!("00-0033873"), json!("QB"), json!("QB")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_depth_chart_shaping() {
        let chart = depth_chart_from(&raw(), &LoadRequest::new(Season::new(2023))).unwrap();
        assert_eq!(chart.len(), 2);
        assert_eq!(chart.row(0).get_i64("week"), Some(1));
        assert_eq!(chart.row(0).get_i64("depth_team"), Some(1));
        assert_eq!(chart.row(1).get_str("team"), Some("LV"));
        assert_eq!(chart.row(1).get_str("depth_chart_position"), Some("LWR"));
        assert_eq!(chart.row(1).get_str("position_group"), Some("wide_receiver"));
        assert!(!chart.has_column("game_type"));
    }

    #[test]
    fn test_duplicate_slot_is_an_integrity_error() {
        let dup = Table::concat(&[raw(), raw().take(&[0])]);
        let err = depth_chart_from(&dup, &LoadRequest::new(Season::new(2023))).unwrap_err();
        assert!(matches!(err, NflDataError::DuplicateKey { .. }));
    }
}

//! Pro-Football-Reference approximate value.

use crate::core::config::join_location;
use crate::core::SourceClient;
use crate::error::Result;
use crate::schema::definitions::APPROXIMATE_VALUE;
use crate::schema::Schema;
use crate::sources::normalize::{drop_blank, normalize_teams, rename_if_absent, with_constant};
use crate::sources::{LoadRequest, Loader, MADDEN};
use crate::table::Table;
use crate::types::Season;
use async_trait::async_trait;
use serde_json::Value;

pub fn approximate_value_path(season: Season) -> String {
    format!("pfr/approximate_value/{}.csv", season)
}

/// AV shaping without the fetch. The export's short headers are mapped onto
/// the shared vocabulary and the season is stamped when the file omits it.
pub fn approximate_value_from(raw: &Table, season: Season) -> Result<Table> {
    let mut table = raw.clone();
    for (from, to) in [
        ("player", "name"),
        ("tm", "team"),
        ("pos", "position"),
        ("av", "approximate_value"),
    ] {
        table = rename_if_absent(&table, from, to);
    }
    if !table.has_column("season") {
        table = with_constant(&table, "season", Value::from(season.as_i64()))?;
    }
    let table = drop_blank(&normalize_teams(&table), "pfr_id");
    APPROXIMATE_VALUE.validate_table(&table)
}

pub async fn collect_approximate_value(client: &SourceClient, request: &LoadRequest) -> Result<Table> {
    let location = join_location(
        &client.config().madden_base,
        &approximate_value_path(request.season),
    );
    let raw = client.fetch_table(MADDEN, &location).await?;
    approximate_value_from(&raw, request.season)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateValueLoader;

#[async_trait]
impl Loader for ApproximateValueLoader {
    fn name(&self) -> &'static str {
        "pfr.approximate_value"
    }

    fn schema(&self) -> &'static Schema {
        &APPROXIMATE_VALUE
    }

    async fn collect(&self, client: &SourceClient, request: &LoadRequest) -> Result<Table> {
        collect_approximate_value(client, request).await
    }
}

//! Scouting combine measurements.

use crate::core::config::join_location;
use crate::core::SourceClient;
use crate::error::Result;
use crate::schema::definitions::COMBINE;
use crate::schema::Schema;
use crate::sources::normalize::{filter_position_group, normalize_teams, with_position_groups};
use crate::sources::{LoadRequest, Loader, NFLVERSE};
use crate::table::Table;
use async_trait::async_trait;

pub const COMBINE_PATH: &str = "combine/combine.parquet";

/// Combine shaping without the fetch.
///
/// The file spans every draft class; classes after the requested season are
/// dropped so a historical request never sees future prospects.
pub fn combine_from(raw: &Table, request: &LoadRequest) -> Result<Table> {
    let season = request.season.as_i64();
    let table = normalize_teams(raw)
        .rename(&[("player_name", "name")])
        .filter(|row| row.get_i64("season").map(|s| s <= season).unwrap_or(false));
    let table = with_position_groups(&table, "pos", false);
    let table = filter_position_group(&table, request.position_group);
    COMBINE.validate_table(&table)
}

pub async fn collect_combine(client: &SourceClient, request: &LoadRequest) -> Result<Table> {
    let location = join_location(&client.config().nflverse_base, COMBINE_PATH);
    let raw = client.fetch_table(NFLVERSE, &location).await?;
    combine_from(&raw, request)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CombineLoader;

#[async_trait]
impl Loader for CombineLoader {
    fn name(&self) -> &'static str {
        "nflverse.combine"
    }

    fn schema(&self) -> &'static Schema {
        &COMBINE
    }

    async fn collect(&self, client: &SourceClient, request: &LoadRequest) -> Result<Table> {
        collect_combine(client, request).await
    }
}

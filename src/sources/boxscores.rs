//! Weekly player box scores.

use crate::core::config::join_location;
use crate::core::SourceClient;
use crate::error::Result;
use crate::schema::definitions::WEEKLY_PLAYER_STATS;
use crate::schema::Schema;
use crate::sources::normalize::{
    drop_blank, filter_position_group, filter_season_type, normalize_teams, rename_if_absent,
    with_constant, with_position_groups,
};
use crate::sources::{LoadRequest, Loader, NFLVERSE};
use crate::table::Table;
use crate::types::StatGroup;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

pub fn player_stats_path(group: StatGroup) -> String {
    format!("player_stats/player_stats{}.parquet", group.file_suffix())
}

/// Box score shaping without the fetch.
///
/// The upstream file spans every season. With a week, rows up to and
/// including that week of the season are kept; without one, every row up to
/// the end of the season.
pub fn weekly_player_stats_from(raw: &Table, request: &LoadRequest) -> Result<Table> {
    let season = request.season.as_i64();
    let week = request.week.map(|w| w.as_i64());
    let table = raw.filter(|row| match (row.get_i64("season"), row.get_i64("week")) {
        (Some(s), _) if s < season => true,
        (Some(s), Some(w)) if s == season => week.map(|limit| w <= limit).unwrap_or(true),
        (Some(s), None) if s == season => week.is_none(),
        _ => false,
    });
    let table = filter_season_type(&table, request.season_type, "season_type");

    let table = rename_if_absent(&table, "recent_team", "team");
    let table = rename_if_absent(&table, "player_display_name", "name");
    let table = rename_if_absent(&table, "player_name", "name");
    let table = normalize_teams(&table);
    let table = drop_blank(&table, "player_id");
    let table = with_position_groups(&table, "position", true);
    let table = with_constant(&table, "status", Value::from("ACT"))?;
    let table = filter_position_group(&table, request.position_group);
    WEEKLY_PLAYER_STATS.validate_table(&table)
}

pub async fn collect_weekly_player_stats(
    client: &SourceClient,
    request: &LoadRequest,
    group: StatGroup,
) -> Result<Table> {
    request.validate()?;
    let location = join_location(&client.config().nflverse_base, &player_stats_path(group));
    let raw = client.fetch_table(NFLVERSE, &location).await?;
    let stats = weekly_player_stats_from(&raw, request)?;
    debug!(
        season = %request.season,
        week = ?request.week,
        %group,
        rows = stats.len(),
        "collected weekly player stats"
    );
    Ok(stats)
}

/// Box scores of one stat file.
#[derive(Debug, Clone, Copy)]
pub struct WeeklyStatsLoader {
    pub group: StatGroup,
}

impl Default for WeeklyStatsLoader {
    fn default() -> Self {
        Self {
            group: StatGroup::Offense,
        }
    }
}

#[async_trait]
impl Loader for WeeklyStatsLoader {
    fn name(&self) -> &'static str {
        match self.group {
            StatGroup::Offense => "nflverse.player_stats",
            StatGroup::Defense => "nflverse.player_stats_def",
            StatGroup::Kicking => "nflverse.player_stats_kicking",
        }
    }

    fn schema(&self) -> &'static Schema {
        &WEEKLY_PLAYER_STATS
    }

    async fn collect(&self, client: &SourceClient, request: &LoadRequest) -> Result<Table> {
        collect_weekly_player_stats(client, request, self.group).await
    }
}

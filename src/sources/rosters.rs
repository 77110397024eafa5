//! Weekly team rosters.

use crate::core::config::join_location;
use crate::core::SourceClient;
use crate::error::Result;
use crate::schema::definitions::ROSTER;
use crate::schema::Schema;
use crate::sources::normalize::{
    drop_blank, filter_position_group, jersey_digits, normalize_teams, status_abbr,
    with_constant, with_position_groups,
};
use crate::sources::players::collect_players;
use crate::sources::{LoadRequest, Loader, NFLVERSE};
use crate::table::Table;
use crate::types::Season;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

/// Before this season only season-level rosters exist upstream.
pub const FIRST_WEEKLY_ROSTER_SEASON: u16 = 2002;

/// From this season a missing weekly file falls back to the player directory.
pub const PLAYER_FALLBACK_SEASON: u16 = 2024;

/// Weeks a season-level roster is expanded to.
const EXPANDED_WEEKS: std::ops::RangeInclusive<i64> = 1..=21;

const COLUMNS: &[&str] = &[
    "season",
    "week",
    "team",
    "position",
    "depth_chart_position",
    "jersey_number",
    "birth_date",
    "status",
    "status_description_abbr",
    "gsis_id",
    "full_name",
    "years_exp",
];

pub fn season_roster_path(season: Season) -> String {
    format!("rosters/roster_{}.parquet", season)
}

pub fn weekly_roster_path(season: Season) -> String {
    format!("weekly_rosters/roster_weekly_{}.parquet", season)
}

/// A season-level roster repeated for every week; the status doubles as
/// the weekly status code.
pub fn expand_season_roster(roster: &Table) -> Result<Table> {
    let base = roster.derive("status_description_abbr", |row| row.get("status").clone());
    let weeks: Vec<Table> = EXPANDED_WEEKS
        .map(|week| with_constant(&base, "week", Value::from(week)))
        .collect::<Result<_>>()?;
    Ok(Table::concat(&weeks))
}

/// Week 1 roster rows built from the player directory.
pub fn roster_from_players(players: &Table, season: Season) -> Result<Table> {
    let table = players
        .select_existing(&[
            "player_id",
            "name",
            "birth_date",
            "position",
            "latest_team",
            "status_abbr",
            "status",
            "years_of_experience",
            "jersey_number",
        ])
        .rename(&[
            ("player_id", "gsis_id"),
            ("name", "full_name"),
            ("latest_team", "team"),
            ("years_of_experience", "years_exp"),
            ("status_abbr", "status_description_abbr"),
        ]);
    let table = with_constant(&table, "season", Value::from(season.as_i64()))?;
    with_constant(&table, "week", Value::from(1))
}

/// Roster shaping without the fetch.
pub fn rosters_from(raw: &Table, request: &LoadRequest) -> Result<Table> {
    let table = normalize_teams(raw)
        .select_existing(COLUMNS)
        .rename(&[("full_name", "name"), ("gsis_id", "player_id")]);
    let table = if table.has_column("jersey_number") {
        table.map_column("jersey_number", jersey_digits)?
    } else {
        table
    };
    let table = drop_blank(&drop_blank(&table, "player_id"), "birth_date").drop_columns(&["birth_date"]);
    let table = table
        .derive("status_abbr", |row| {
            Value::from(status_abbr(row.get_str("status_description_abbr")))
        })
        .drop_columns(&["status_description_abbr"]);
    let table = with_position_groups(&table, "position", true);
    let table = match request.week {
        Some(week) => table.filter(|row| row.get_i64("week") == Some(week.as_i64())),
        None => table,
    };
    let table = filter_position_group(&table, request.position_group);
    ROSTER.validate_table(&table)
}

pub async fn collect_roster(client: &SourceClient, request: &LoadRequest) -> Result<Table> {
    request.validate()?;
    let season = request.season;
    let base = client.config().nflverse_base.clone();

    let raw = if season.as_u16() < FIRST_WEEKLY_ROSTER_SEASON {
        let roster = client
            .fetch_table(NFLVERSE, &join_location(&base, &season_roster_path(season)))
            .await?;
        expand_season_roster(&roster)?
    } else {
        let location = join_location(&base, &weekly_roster_path(season));
        match client.fetch_table(NFLVERSE, &location).await {
            Ok(table) => table,
            Err(e) if e.is_source_unavailable() && season.as_u16() >= PLAYER_FALLBACK_SEASON => {
                warn!(
                    %season,
                    error = %e,
                    "weekly roster unavailable, using the player directory as week 1"
                );
                let players = collect_players(client, &LoadRequest::new(season)).await?;
                roster_from_players(&players, season)?
            }
            Err(e) => return Err(e),
        }
    };

    let roster = rosters_from(&raw, request)?;
    debug!(%season, rows = roster.len(), "collected roster");
    Ok(roster)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RosterLoader;

#[async_trait]
impl Loader for RosterLoader {
    fn name(&self) -> &'static str {
        "nflverse.rosters"
    }

    fn schema(&self) -> &'static Schema {
        &ROSTER
    }

    async fn collect(&self, client: &SourceClient, request: &LoadRequest) -> Result<Table> {
        collect_roster(client, request).await
    }
}

//! Event pipeline: schedule rows enriched with venues, lines and team EPA.

use crate::core::SourceClient;
use crate::error::Result;
use crate::format::{format_table, Formatted, OutputFormat};
use crate::schema::definitions::EVENT;
use crate::sources::boxscores::collect_weekly_player_stats;
use crate::sources::schedule::{events_from, fetch_schedule, vegas_lines_from, venues_from};
use crate::sources::LoadRequest;
use crate::table::Table;
use crate::transforms::events::{
    attach_implied_win_probability, attach_team_epa, attach_vegas_lines, attach_venues,
};
use crate::transforms::join::JoinHow;
use crate::types::{Season, StatGroup, Week};
use tracing::info;

/// Enrich events with venue attributes, lines (left join), implied win
/// probabilities and team EPA, validated against [`EVENT`].
pub fn events_with_context(events: &Table, venues: &Table, lines: &Table, stats: &Table) -> Result<Table> {
    let table = attach_venues(events, venues)?;
    let table = attach_vegas_lines(&table, lines, JoinHow::Left)?;
    let table = attach_implied_win_probability(&table)?;
    let table = attach_team_epa(&table, stats)?;
    EVENT.validate_table(&table)
}

/// Events of `season` (and `week`) with their context.
pub async fn make_events(
    client: &SourceClient,
    season: Season,
    week: Option<Week>,
    format: OutputFormat,
) -> Result<Formatted> {
    let request = LoadRequest {
        week,
        ..LoadRequest::new(season)
    };
    request.validate()?;
    let schedule = fetch_schedule(client, &request).await?;
    let events = events_from(&schedule, &request)?;
    let venues = venues_from(&schedule, &request)?;
    let lines = vegas_lines_from(&schedule, &request)?;
    let stats = collect_weekly_player_stats(client, &request, StatGroup::Offense).await?;

    let table = events_with_context(&events, &venues, &lines, &stats)?;
    info!(%season, week = ?week, events = table.len(), "built events");
    format_table(&table, None, format)
}

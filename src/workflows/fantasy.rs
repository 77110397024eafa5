//! Fantasy pipeline: projections joined with Watson projections and expert
//! rankings.

use crate::core::SourceClient;
use crate::error::Result;
use crate::format::{format_table, Formatted, OutputFormat};
use crate::sources::fantasy::{
    collect_fantasy_projections, collect_fantasypros_ecr, collect_watson_projections,
};
use crate::sources::LoadRequest;
use crate::table::Table;
use crate::transforms::fantasy::boom_bust_candidates;
use crate::transforms::join::{merge, JoinSpec};
use crate::types::{FantasyGroup, FantasyMode, Season, Week};
use tracing::info;

const PLAYER_WEEK: &[&str] = &["espn_id", "season", "week"];

/// Weekly projections with Watson projections and rankings left-joined by
/// `(espn_id, season, week)`. The projection's `player_id` is kept.
pub fn player_fantasy_from(projections: &Table, watson: &Table, ecr: &Table) -> Result<Table> {
    let table = merge(
        projections,
        &watson.drop_columns(&["player_id"]),
        &JoinSpec::left(PLAYER_WEEK),
    )?;
    merge(&table, &ecr.drop_columns(&["player_id"]), &JoinSpec::left(PLAYER_WEEK))
}

async fn player_fantasy_table(client: &SourceClient, seasons: &[Season]) -> Result<Table> {
    let mut projections = Vec::with_capacity(seasons.len());
    let mut watson = Vec::with_capacity(seasons.len());
    for season in seasons {
        let request = LoadRequest::new(*season);
        projections.push(
            collect_fantasy_projections(client, &request, FantasyMode::Weekly, FantasyGroup::All).await?,
        );
        watson.push(collect_watson_projections(client, &request).await?);
    }
    let ecr = collect_fantasypros_ecr(client, seasons).await?;
    let table = player_fantasy_from(&Table::concat(&projections), &Table::concat(&watson), &ecr)?;
    info!(seasons = seasons.len(), rows = table.len(), "built player fantasy table");
    Ok(table)
}

/// Weekly fantasy rows for every season in `seasons`.
pub async fn make_player_fantasy(
    client: &SourceClient,
    seasons: &[Season],
    format: OutputFormat,
) -> Result<Formatted> {
    let table = player_fantasy_table(client, seasons).await?;
    format_table(&table, None, format)
}

/// Boom and bust candidates for one week, formatted alike.
pub async fn make_boom_bust_candidates(
    client: &SourceClient,
    season: Season,
    week: Week,
    n: usize,
    format: OutputFormat,
) -> Result<(Formatted, Formatted)> {
    let table = player_fantasy_table(client, &[season]).await?;
    let candidates = boom_bust_candidates(&table, season, week, n)?;
    Ok((
        format_table(&candidates.boom, None, format)?,
        format_table(&candidates.bust, None, format)?,
    ))
}

//! Fantasy projections, Watson projections and FantasyPros expert rankings.

use crate::core::config::join_location;
use crate::core::SourceClient;
use crate::error::Result;
use crate::schema::definitions::{FANTASY_PROJECTION, FANTASY_RANKING, WATSON_PROJECTION};
use crate::schema::Schema;
use crate::sources::ids::IdCrosswalk;
use crate::sources::normalize::normalize_teams;
use crate::sources::schedule::{collect_schedules, week_at, week_windows_from, WeekWindow};
use crate::sources::teams::{dst_espn_id, franchise_by_code, franchise_by_name, team_for_dst_espn_id};
use crate::sources::{LoadRequest, Loader, FANTASY, FANTASYPROS};
use crate::table::value::{as_f64, as_i64, compare_values, float_opt};
use crate::table::{Record, Table};
use crate::types::{FantasyGroup, FantasyMode, Season, SeasonType};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

pub const OFFENSIVE_PROJECTIONS: &[&str] = &[
    "projected_rushing_attempts",
    "projected_rushing_yards",
    "projected_rushing_touchdowns",
    "projected_rushing2_pt_conversions",
    "projected_rushing40_plus_yard_td",
    "projected_rushing50_plus_yard_td",
    "projected_rushing100_to199_yard_game",
    "projected_rushing200_plus_yard_game",
    "projected_rushing_yards_per_attempt",
    "projected_receiving_yards",
    "projected_receiving_touchdowns",
    "projected_receiving2_pt_conversions",
    "projected_receiving40_plus_yard_td",
    "projected_receiving50_plus_yard_td",
    "projected_receiving_receptions",
    "projected_receiving100_to199_yard_game",
    "projected_receiving200_plus_yard_game",
    "projected_receiving_targets",
    "projected_receiving_yards_per_reception",
    "projected_2_pt_conversions",
    "projected_fumbles",
    "projected_lost_fumbles",
    "projected_turnovers",
    "projected_passing_attempts",
    "projected_passing_completions",
    "projected_passing_yards",
    "projected_passing_touchdowns",
    "projected_passing_interceptions",
    "projected_passing_completion_percentage",
];

pub const DEFENSIVE_PROJECTIONS: &[&str] = &[
    "projected_defensive_solo_tackles",
    "projected_defensive_total_tackles",
    "projected_defensive_interceptions",
    "projected_defensive_fumbles",
    "projected_defensive_blocked_kicks",
    "projected_defensive_safeties",
    "projected_defensive_sacks",
    "projected_defensive_touchdowns",
    "projected_defensive_forced_fumbles",
    "projected_defensive_passes_defensed",
    "projected_defensive_assisted_tackles",
    "projected_defensive_points_allowed",
    "projected_defensive_yards_allowed",
    "projected_defensive0_points_allowed",
    "projected_defensive1_to6_points_allowed",
    "projected_defensive7_to13_points_allowed",
    "projected_defensive14_to17_points_allowed",
    "projected_defensive18_to21_points_allowed",
    "projected_defensive22_to27_points_allowed",
    "projected_defensive28_to34_points_allowed",
    "projected_defensive35_to45_points_allowed",
    "projected_defensive45_plus_points_allowed",
    "projected_defensive100_to199_yards_allowed",
    "projected_defensive200_to299_yards_allowed",
    "projected_defensive300_to349_yards_allowed",
    "projected_defensive350_to399_yards_allowed",
    "projected_defensive400_to449_yards_allowed",
    "projected_defensive450_to499_yards_allowed",
    "projected_defensive500_to549_yards_allowed",
    "projected_defensive550_plus_yards_allowed",
];

pub const SPECIAL_TEAMS_PROJECTIONS: &[&str] = &[
    "projected_made_field_goals",
    "projected_attempted_field_goals",
    "projected_missed_field_goals",
    "projected_made_extra_points",
    "projected_attempted_extra_points",
    "projected_missed_extra_points",
    "projected_kickoff_return_touchdowns",
    "projected_kickoff_return_yards",
    "projected_punt_return_touchdowns",
    "projected_punt_return_yards",
    "projected_punts_returned",
    "projected_made_field_goals_from50_plus",
    "projected_attempted_field_goals_from50_plus",
    "projected_made_field_goals_from40_to49",
    "projected_attempted_field_goals_from40_to49",
    "projected_made_field_goals_from_under40",
    "projected_attempted_field_goals_from_under40",
];

const WEEKLY_META: &[&str] = &[
    "season",
    "week",
    "espn_id",
    "player_id",
    "name",
    "position",
    "team",
    "percent_owned",
    "percent_started",
    "projected_points",
];

const SEASON_META: &[&str] = &[
    "season",
    "espn_id",
    "player_id",
    "name",
    "position",
    "team",
    "percent_owned",
    "percent_started",
    "total_points",
    "projected_total_points",
    "avg_points",
    "projected_avg_points",
];

/// FantasyPros pages kept: preseason cheatsheets and rest-of-season ranks.
pub const ECR_PAGES: &[&str] = &[
    "/nfl/rankings/ppr-cheatsheets.php",
    "/nfl/rankings/ros-ppr-overall.php",
    "/nfl/rankings/idp-cheatsheets.php",
    "/nfl/rankings/ros-idp-overall.php",
];

pub fn projections_path(season: Season) -> String {
    format!("season/football/nfl/{}.parquet", season)
}

pub fn watson_path(season: Season) -> String {
    format!("football/nfl/watson/{}.parquet", season)
}

/// Projected stat columns a group may carry.
pub fn projection_columns(group: FantasyGroup) -> Vec<&'static str> {
    match group {
        FantasyGroup::Offense => OFFENSIVE_PROJECTIONS.to_vec(),
        FantasyGroup::Defense => DEFENSIVE_PROJECTIONS.to_vec(),
        FantasyGroup::SpecialTeams => SPECIAL_TEAMS_PROJECTIONS.to_vec(),
        FantasyGroup::All => OFFENSIVE_PROJECTIONS
            .iter()
            .chain(DEFENSIVE_PROJECTIONS)
            .chain(SPECIAL_TEAMS_PROJECTIONS)
            .copied()
            .collect(),
    }
}

/// gsis id for an ESPN id; D/ST units map to their team abbreviation.
fn resolve_player_id(ids: &IdCrosswalk, espn_id: Option<i64>) -> Value {
    let Some(espn) = espn_id else {
        return Value::Null;
    };
    ids.gsis_for_espn(espn)
        .or_else(|| team_for_dst_espn_id(espn))
        .map(Value::from)
        .unwrap_or(Value::Null)
}

/// The pump's `player_id` is the ESPN id; it moves to `espn_id` and
/// `player_id` becomes the gsis id.
fn with_espn_ids(raw: &Table, ids: &IdCrosswalk) -> Table {
    let table = normalize_teams(raw);
    let table = if table.has_column("espn_id") {
        table
    } else {
        table.rename(&[("player_id", "espn_id")])
    };
    table.derive("player_id", |row| resolve_player_id(ids, row.get_i64("espn_id")))
}

/// Projection shaping without the fetches.
pub fn fantasy_projections_from(
    raw: &Table,
    ids: &IdCrosswalk,
    request: &LoadRequest,
    mode: FantasyMode,
    group: FantasyGroup,
) -> Result<Table> {
    let positions = group.positions();
    let table = with_espn_ids(raw, ids)
        .filter(|row| row.get_str("position").map(|p| positions.iter().any(|x| *x == p)).unwrap_or(false));
    let stats: Vec<&str> = projection_columns(group)
        .into_iter()
        .filter(|c| table.has_column(c))
        .collect();

    let table = match mode {
        FantasyMode::Weekly => {
            let table = match request.week {
                Some(week) => table.filter(|row| row.get_i64("week") == Some(week.as_i64())),
                None => table,
            };
            let columns: Vec<&str> = WEEKLY_META.iter().copied().chain(stats).collect();
            table.select_existing(&columns)
        }
        FantasyMode::Season => season_totals(&table, &stats)?,
    };
    FANTASY_PROJECTION.validate_table(&table)
}

/// One row per ESPN id: the first row's metadata and the summed stats.
fn season_totals(table: &Table, stats: &[&str]) -> Result<Table> {
    let meta = table.select_existing(SEASON_META);
    let mut out = Table::new(
        meta.columns()
            .iter()
            .map(String::as_str)
            .chain(stats.iter().copied())
            .collect::<Vec<_>>(),
    );
    for (_, rows) in table.group_indices(&["espn_id"])? {
        let mut row: Vec<Value> = meta.row(rows[0]).values().to_vec();
        for stat in stats {
            let values: Vec<f64> = rows
                .iter()
                .filter_map(|&i| as_f64(table.row(i).get(stat)))
                .collect();
            row.push(if values.is_empty() {
                Value::Null
            } else {
                float_opt(Some(values.iter().sum()))
            });
        }
        out.push_row(row)?;
    }
    Ok(out)
}

pub async fn collect_fantasy_projections(
    client: &SourceClient,
    request: &LoadRequest,
    mode: FantasyMode,
    group: FantasyGroup,
) -> Result<Table> {
    request.validate()?;
    let location = join_location(&client.config().fantasy_base, &projections_path(request.season));
    let raw = client.fetch_table(FANTASY, &location).await?;
    let ids = IdCrosswalk::load(client).await?;
    let table = fantasy_projections_from(&raw, &ids, request, mode, group)?;
    debug!(season = %request.season, ?mode, ?group, rows = table.len(), "collected fantasy projections");
    Ok(table)
}

/// Watson shaping without the fetches. Repeated `(espn_id, season, week)`
/// rows keep the first occurrence.
pub fn watson_projections_from(raw: &Table, ids: &IdCrosswalk, request: &LoadRequest) -> Result<Table> {
    let table = with_espn_ids(raw, ids);
    let table = match request.week {
        Some(week) => table.filter(|row| row.get_i64("week") == Some(week.as_i64())),
        None => table,
    };
    let table = table.select_existing(&WATSON_PROJECTION.field_names());
    let before = table.len();
    let table = table.unique_by(&["espn_id", "season", "week"])?;
    if table.len() < before {
        debug!(
            dropped = before - table.len(),
            "dropped repeated watson projections"
        );
    }
    WATSON_PROJECTION.validate_table(&table)
}

pub async fn collect_watson_projections(client: &SourceClient, request: &LoadRequest) -> Result<Table> {
    request.validate()?;
    let location = join_location(&client.config().fantasy_base, &watson_path(request.season));
    let raw = client.fetch_table(FANTASY, &location).await?;
    let ids = IdCrosswalk::load(client).await?;
    watson_projections_from(&raw, &ids, request)
}

fn parse_day(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?;
    NaiveDate::parse_from_str(s.trim().get(..10)?, "%Y-%m-%d").ok()
}

/// Expert consensus ranking shaping without the fetches.
///
/// Each scrape is assigned the season of its date and the week whose window
/// contains it (0 before the first kickoff). Cheatsheets only count as week
/// 1 or the preseason (0), and only the latest preseason scrape per player
/// survives. Rest-of-season pages at week 0 are last season's leftovers and
/// are dropped. When a season has no weekly data the preseason ranking is
/// labelled week 1.
pub fn fantasypros_ecr_from(
    raw: &Table,
    ids: &IdCrosswalk,
    seasons: &[Season],
    windows: &HashMap<Season, Vec<WeekWindow>>,
) -> Result<Table> {
    for column in ["fp_page", "scrape_date", "id"] {
        raw.require_column(column, "fantasypros ecr")?;
    }

    let mut preseason: Vec<Record> = Vec::new();
    let mut weekly: Vec<Record> = Vec::new();
    for row in raw.iter() {
        let Some(page) = row.get_str("fp_page").filter(|p| ECR_PAGES.iter().any(|x| x == p)) else {
            continue;
        };
        let Some(date) = parse_day(row.get("scrape_date")) else {
            continue;
        };
        let season = Season::for_date(date);
        if !seasons.contains(&season) || (3..=5).contains(&date.month()) {
            continue;
        }
        let mut week = windows
            .get(&season)
            .map(|w| week_at(w, date.and_time(NaiveTime::MIN)))
            .unwrap_or(0);
        let cheatsheet = page.contains("cheatsheets");
        if cheatsheet && week != 1 {
            week = 0;
        }
        if page.contains("overall") && week == 0 {
            continue;
        }

        let mut record = row.to_record();
        record.insert("season".into(), Value::from(season.as_i64()));
        record.insert("week".into(), Value::from(week));
        record.insert(
            "scrape_date".into(),
            Value::String(date.format("%Y-%m-%d").to_string()),
        );
        if cheatsheet && week == 0 {
            preseason.push(record);
        } else {
            weekly.push(record);
        }
    }

    let mut latest: Vec<Record> = Vec::new();
    let mut slots: HashMap<(i64, String), usize> = HashMap::new();
    for record in preseason {
        let key = (
            record.get("season").and_then(Value::as_i64).unwrap_or_default(),
            record.get("id").map(|v| v.to_string()).unwrap_or_default(),
        );
        match slots.get(&key) {
            Some(&slot) => {
                let newer = compare_values(
                    record.get("scrape_date").unwrap_or(&Value::Null),
                    latest[slot].get("scrape_date").unwrap_or(&Value::Null),
                )
                .is_gt();
                if newer {
                    latest[slot] = record;
                }
            }
            None => {
                slots.insert(key, latest.len());
                latest.push(record);
            }
        }
    }

    let mut ranked: Vec<Record> = Vec::new();
    for mut record in latest.into_iter().chain(weekly) {
        let Some(fp_id) = record.get("id").and_then(as_i64) else {
            continue;
        };
        let (player_id, espn_id) = if record.get("pos").and_then(Value::as_str) == Some("DST") {
            let team = record
                .get("mergename")
                .and_then(Value::as_str)
                .and_then(franchise_by_name)
                .or_else(|| {
                    record
                        .get("team")
                        .and_then(Value::as_str)
                        .and_then(franchise_by_code)
                })
                .map(|f| f.team_id);
            (team.map(str::to_string), team.and_then(dst_espn_id))
        } else {
            match ids.for_fantasypros(fp_id) {
                Some((gsis, espn)) => (gsis.clone(), *espn),
                None => (None, None),
            }
        };
        let Some(espn_id) = espn_id else {
            continue;
        };
        record.insert("espn_id".into(), Value::from(espn_id));
        record.insert(
            "player_id".into(),
            player_id.map(Value::from).unwrap_or(Value::Null),
        );
        ranked.push(record);
    }

    ranked.sort_by(|a, b| {
        let get = |r: &Record, k: &str| r.get(k).cloned().unwrap_or(Value::Null);
        compare_values(&get(b, "fp_page"), &get(a, "fp_page"))
            .then_with(|| compare_values(&get(b, "season"), &get(a, "season")))
            .then_with(|| compare_values(&get(a, "ecr"), &get(b, "ecr")))
            .then_with(|| compare_values(&get(a, "week"), &get(b, "week")))
    });

    let mut table = if ranked.is_empty() {
        Table::new(FANTASY_RANKING.field_names())
    } else {
        Table::from_records(&ranked).unique_by(&["espn_id", "season", "week"])?
    };
    let max_week = table.iter().filter_map(|r| r.get_i64("week")).max();
    if max_week == Some(0) {
        table = table.map_column("week", |_| Value::from(1))?;
    }
    FANTASY_RANKING.validate_table(&table.select_existing(&FANTASY_RANKING.field_names()))
}

pub async fn collect_fantasypros_ecr(client: &SourceClient, seasons: &[Season]) -> Result<Table> {
    let location = client.config().fantasypros_ecr_url.clone();
    let raw = client.fetch_table(FANTASYPROS, &location).await?;
    let ids = IdCrosswalk::load(client).await?;
    let games = collect_schedules(client, seasons, SeasonType::All).await?;
    let mut windows = HashMap::new();
    for season in seasons {
        let season_games = games.filter(|r| r.get_i64("season") == Some(season.as_i64()));
        windows.insert(*season, week_windows_from(&season_games)?);
    }
    let table = fantasypros_ecr_from(&raw, &ids, seasons, &windows)?;
    debug!(seasons = ?seasons, rows = table.len(), "collected fantasypros rankings");
    Ok(table)
}

/// Projections for one mode and group.
#[derive(Debug, Clone, Copy, Default)]
pub struct FantasyProjectionLoader {
    pub mode: FantasyMode,
    pub group: FantasyGroup,
}

#[async_trait]
impl Loader for FantasyProjectionLoader {
    fn name(&self) -> &'static str {
        "fantasy.projections"
    }

    fn schema(&self) -> &'static Schema {
        &FANTASY_PROJECTION
    }

    async fn collect(&self, client: &SourceClient, request: &LoadRequest) -> Result<Table> {
        collect_fantasy_projections(client, request, self.mode, self.group).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WatsonLoader;

#[async_trait]
impl Loader for WatsonLoader {
    fn name(&self) -> &'static str {
        "fantasy.watson"
    }

    fn schema(&self) -> &'static Schema {
        &WATSON_PROJECTION
    }

    async fn collect(&self, client: &SourceClient, request: &LoadRequest) -> Result<Table> {
        collect_watson_projections(client, request).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FantasyRankingLoader;

#[async_trait]
impl Loader for FantasyRankingLoader {
    fn name(&self) -> &'static str {
        "fantasypros.ecr"
    }

    fn schema(&self) -> &'static Schema {
        &FANTASY_RANKING
    }

    async fn collect(&self, client: &SourceClient, request: &LoadRequest) -> Result<Table> {
        let table = collect_fantasypros_ecr(client, &[request.season]).await?;
        Ok(match request.week {
            Some(week) => table.filter(|row| row.get_i64("week") == Some(week.as_i64())),
            None => table,
        })
    }
}

#[cfg(test)]
mod tests;

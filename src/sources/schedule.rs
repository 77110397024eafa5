//! Games, events, Vegas lines and venues from the league schedule file.

use crate::core::SourceClient;
use crate::error::{NflDataError, Result};
use crate::schema::definitions::{EVENT, VEGAS_LINE, VENUE};
use crate::schema::Schema;
use crate::sources::normalize::normalize_teams;
use crate::sources::{LoadRequest, Loader, SCHEDULE};
use crate::table::{Record, RowView, Table};
use crate::types::{GameId, Season, SeasonType, TeamId};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Line columns carried from the schedule onto [`VEGAS_LINE`].
pub const LINE_COLUMNS: &[&str] = &[
    "spread_line",
    "total_line",
    "home_moneyline",
    "away_moneyline",
    "home_spread_odds",
    "away_spread_odds",
    "over_odds",
    "under_odds",
];

fn game_type_matches(season_type: SeasonType, game_type: Option<&str>) -> bool {
    match (season_type, game_type) {
        (SeasonType::All, _) => true,
        (SeasonType::Regular, Some(gt)) => gt == "REG",
        (SeasonType::Post, Some(gt)) => gt != "REG",
        (_, None) => false,
    }
}

fn is_neutral(location: Option<&str>) -> bool {
    location.map(|l| l.eq_ignore_ascii_case("neutral")).unwrap_or(false)
}

/// Games for the given seasons with normalized teams and canonical game ids.
///
/// The upstream id is kept as `nflverse_game_id`.
pub async fn collect_schedules(
    client: &SourceClient,
    seasons: &[Season],
    season_type: SeasonType,
) -> Result<Table> {
    for season in seasons {
        season.ensure_available()?;
    }
    let location = client.config().schedule_url.clone();
    let raw = client.fetch_table(SCHEDULE, &location).await?;
    schedules_from(&raw, seasons, season_type)
}

/// Schedule shaping without the fetch.
pub fn schedules_from(raw: &Table, seasons: &[Season], season_type: SeasonType) -> Result<Table> {
    for column in ["season", "week", "game_type", "home_team", "away_team"] {
        raw.require_column(column, "schedule")?;
    }
    let wanted: Vec<i64> = seasons.iter().map(Season::as_i64).collect();
    let games = raw.filter(|row| {
        row.get_i64("season").map(|s| wanted.contains(&s)).unwrap_or(false)
            && game_type_matches(season_type, row.get_str("game_type"))
    });
    let games = normalize_teams(&games).rename(&[("game_id", "nflverse_game_id")]);

    let mut ids = Vec::with_capacity(games.len());
    for row in games.iter() {
        let parts = (
            row.get_i64("season"),
            row.get_i64("week"),
            row.get_str("home_team"),
            row.get_str("away_team"),
        );
        match parts {
            (Some(season), Some(week), Some(home), Some(away)) => ids.push(Value::String(
                GameId::from_matchup(season, week, &TeamId::new(home), &TeamId::new(away))
                    .to_string(),
            )),
            _ => {
                return Err(NflDataError::integrity(format!(
                    "schedule row {} lacks season, week or teams",
                    row.index()
                )))
            }
        }
    }
    let games = games.with_column("game_id", ids)?;
    debug!(rows = games.len(), seasons = ?wanted, %season_type, "shaped schedule");
    Ok(games)
}

fn season_games(raw: &Table, request: &LoadRequest) -> Result<Table> {
    request.validate()?;
    let games = schedules_from(
        raw,
        &[request.season],
        request.season_type.unwrap_or(SeasonType::All),
    )?;
    Ok(match request.week {
        Some(week) => games.filter(|row| row.get_i64("week") == Some(week.as_i64())),
        None => games,
    })
}

/// Event rows for one season (and week) of a raw schedule.
pub fn events_from(raw: &Table, request: &LoadRequest) -> Result<Table> {
    let games = season_games(raw, request)?
        .rename(&[("stadium_id", "venue_id"), ("espn", "espn_event_id")])
        .derive("neutral_site", |row| Value::Bool(is_neutral(row.get_str("location"))));
    let fields = EVENT.field_names();
    EVENT.validate_table(&games.select_existing(&fields))
}

pub async fn collect_events(client: &SourceClient, request: &LoadRequest) -> Result<Table> {
    let raw = fetch_schedule(client, request).await?;
    events_from(&raw, request)
}

/// Lines for one season (and week); games without any line are absent.
pub fn vegas_lines_from(raw: &Table, request: &LoadRequest) -> Result<Table> {
    let games = season_games(raw, request)?;
    let priced = games.filter(|row| LINE_COLUMNS.iter().any(|c| !row.get(c).is_null()));
    let mut columns = vec!["season", "week", "game_id"];
    columns.extend_from_slice(LINE_COLUMNS);
    VEGAS_LINE.validate_table(&priced.select_existing(&columns))
}

pub async fn collect_vegas_lines(client: &SourceClient, request: &LoadRequest) -> Result<Table> {
    let raw = fetch_schedule(client, request).await?;
    vegas_lines_from(&raw, request)
}

/// One row per stadium used in the season.
///
/// A stadium seen with both `open` and `closed` roofs is `retractable`.
/// `home_team` is the team hosting the most non-neutral games there.
pub fn venues_from(raw: &Table, request: &LoadRequest) -> Result<Table> {
    let games = season_games(raw, &LoadRequest { week: None, ..*request })?;
    games.require_column("stadium_id", "schedule")?;
    let games = games.filter(|row| row.get_str("stadium_id").is_some());

    let mut venues = Vec::new();
    for (_, rows) in games.group_indices(&["stadium_id"])? {
        let view = |i: usize| games.row(i);
        let first = view(rows[0]);

        let roofs: Vec<&str> = rows.iter().filter_map(|&i| view(i).get_str("roof")).collect();
        let roof = if roofs.iter().any(|r| *r == "open" || *r == "closed") {
            Some("retractable")
        } else {
            roofs.first().copied()
        };
        let surface = rows
            .iter()
            .rev()
            .find_map(|&i| view(i).get_str("surface").filter(|s| !s.trim().is_empty()));

        let mut hosts: Vec<(&str, usize)> = Vec::new();
        for &i in &rows {
            let row = view(i);
            if is_neutral(row.get_str("location")) {
                continue;
            }
            if let Some(team) = row.get_str("home_team") {
                match hosts.iter_mut().find(|(t, _)| *t == team) {
                    Some((_, n)) => *n += 1,
                    None => hosts.push((team, 1)),
                }
            }
        }
        let home_team = hosts
            .iter()
            .fold(None::<(&str, usize)>, |best, &(t, n)| match best {
                Some((_, b)) if b >= n => best,
                _ => Some((t, n)),
            })
            .map(|(t, _)| t);

        let mut venue = Record::new();
        venue.insert("season".into(), Value::from(request.season.as_i64()));
        venue.insert("venue_id".into(), first.get("stadium_id").clone());
        venue.insert(
            "name".into(),
            rows.iter()
                .find_map(|&i| view(i).get_str("stadium"))
                .map(Value::from)
                .unwrap_or(Value::Null),
        );
        venue.insert("roof".into(), roof.map(Value::from).unwrap_or(Value::Null));
        venue.insert("surface".into(), surface.map(Value::from).unwrap_or(Value::Null));
        venue.insert("home_team".into(), home_team.map(Value::from).unwrap_or(Value::Null));
        venue.insert(
            "neutral_site".into(),
            Value::Bool(rows.iter().all(|&i| is_neutral(view(i).get_str("location")))),
        );
        venue.insert("games".into(), Value::from(rows.len()));
        venues.push(venue);
    }

    let mut table = Table::from_records(&venues);
    if table.is_empty() {
        table = Table::new(VENUE.field_names());
    }
    VENUE.validate_table(&table)
}

pub async fn collect_venues(client: &SourceClient, request: &LoadRequest) -> Result<Table> {
    let raw = fetch_schedule(client, request).await?;
    venues_from(&raw, request)
}

/// The raw schedule file, for callers shaping several tables from one fetch.
pub async fn fetch_schedule(client: &SourceClient, request: &LoadRequest) -> Result<Table> {
    request.season.ensure_available()?;
    let location = client.config().schedule_url.clone();
    client.fetch_table(SCHEDULE, &location).await
}

/// Kickoff of a week's first game through six days, 23:59:59 later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub week: u16,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl WeekWindow {
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }
}

fn kickoff(row: &RowView<'_>) -> Option<NaiveDateTime> {
    let day = row.get_str("gameday")?;
    let date = NaiveDate::parse_from_str(day.get(..10)?, "%Y-%m-%d").ok()?;
    let time = row
        .get_str("gametime")
        .and_then(|t| NaiveTime::parse_from_str(t.trim(), "%H:%M").ok())
        .unwrap_or(NaiveTime::MIN);
    Some(date.and_time(time))
}

/// Week windows of one season from a shaped schedule, ordered by week.
pub fn week_windows_from(games: &Table) -> Result<Vec<WeekWindow>> {
    let mut first: HashMap<u16, NaiveDateTime> = HashMap::new();
    for row in games.iter() {
        let (Some(week), Some(at)) = (row.get_i64("week"), kickoff(&row)) else {
            continue;
        };
        let week = u16::try_from(week).map_err(|_| NflDataError::InvalidWeek { week })?;
        first
            .entry(week)
            .and_modify(|t| {
                if at < *t {
                    *t = at
                }
            })
            .or_insert(at);
    }
    let span = Duration::days(6) + Duration::hours(23) + Duration::minutes(59) + Duration::seconds(59);
    let mut windows: Vec<WeekWindow> = first
        .into_iter()
        .map(|(week, start)| WeekWindow {
            week,
            start,
            end: start + span,
        })
        .collect();
    windows.sort_by_key(|w| w.week);
    Ok(windows)
}

pub async fn week_windows(client: &SourceClient, season: Season) -> Result<Vec<WeekWindow>> {
    let games = collect_schedules(client, &[season], SeasonType::All).await?;
    week_windows_from(&games)
}

/// Week whose window contains `at`, or 0 before the first kickoff.
pub fn week_at(windows: &[WeekWindow], at: NaiveDateTime) -> u16 {
    windows
        .iter()
        .find(|w| w.contains(at))
        .map(|w| w.week)
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EventLoader;

#[async_trait]
impl Loader for EventLoader {
    fn name(&self) -> &'static str {
        "schedule.events"
    }

    fn schema(&self) -> &'static Schema {
        &EVENT
    }

    async fn collect(&self, client: &SourceClient, request: &LoadRequest) -> Result<Table> {
        collect_events(client, request).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VegasLineLoader;

#[async_trait]
impl Loader for VegasLineLoader {
    fn name(&self) -> &'static str {
        "schedule.vegas_lines"
    }

    fn schema(&self) -> &'static Schema {
        &VEGAS_LINE
    }

    async fn collect(&self, client: &SourceClient, request: &LoadRequest) -> Result<Table> {
        collect_vegas_lines(client, request).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VenueLoader;

#[async_trait]
impl Loader for VenueLoader {
    fn name(&self) -> &'static str {
        "schedule.venues"
    }

    fn schema(&self) -> &'static Schema {
        &VENUE
    }

    async fn collect(&self, client: &SourceClient, request: &LoadRequest) -> Result<Table> {
        collect_venues(client, request).await
    }
}

//! Player-level transforms: static players, rookie flags and preseason
//! Madden adjustments.

use crate::error::Result;
use crate::schema::definitions::MADDEN_ATTRIBUTES;
use crate::table::value::{as_f64, as_i64, float, float_opt, KeyValue};
use crate::table::{RowView, Table};
use crate::types::Season;
use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Combine measurements carried onto a static player.
pub const COMBINE_MEASUREMENTS: &[&str] =
    &["forty", "bench", "vertical", "broad_jump", "cone", "shuttle"];

/// Directory columns that do not change week to week.
pub const STATIC_COLUMNS: &[&str] = &[
    "player_id",
    "name",
    "first_name",
    "last_name",
    "short_name",
    "pfr_id",
    "espn_id",
    "birth_date",
    "position_group",
    "height",
    "weight",
    "headshot",
    "college_name",
    "college_conference",
    "rookie_season",
    "draft_year",
    "draft_round",
    "draft_pick",
    "draft_team",
];

/// Ratings are bounded to this range after adjustment.
const RATING_FLOOR: f64 = 5.0;
const RATING_CEILING: f64 = 99.0;

/// Largest swing a preseason adjustment can make.
const MAX_ADJUSTMENT: f64 = 3.0;

/// Adjustment for veterans with no approximate value last season.
const MISSING_AV_ADJUSTMENT: f64 = -0.5;

fn measurements(row: &RowView<'_>) -> Vec<Value> {
    COMBINE_MEASUREMENTS
        .iter()
        .map(|c| row.get(c).clone())
        .collect()
}

fn name_key(row: &RowView<'_>) -> Option<(String, String)> {
    Some((
        row.get_str("name")?.to_string(),
        row.get_str("position_group")?.to_string(),
    ))
}

/// One row per player with their combine measurements.
///
/// Combine rows are matched by `pfr_id`; a row without one is matched by
/// `(name, position_group)` only when that pair names exactly one combine row
/// and exactly one player.
pub fn make_static_players(players: &Table, combine: &Table) -> Result<Table> {
    let players = players.unique_by(&["player_id"])?;

    let mut by_pfr: HashMap<String, Vec<Value>> = HashMap::new();
    let mut by_name: HashMap<(String, String), Vec<Vec<Value>>> = HashMap::new();
    for row in combine.iter() {
        match row.get_str("pfr_id") {
            Some(pfr) => {
                by_pfr.entry(pfr.to_string()).or_insert_with(|| measurements(&row));
            }
            None => {
                if let Some(key) = name_key(&row) {
                    by_name.entry(key).or_default().push(measurements(&row));
                }
            }
        }
    }

    let mut player_names: HashMap<(String, String), usize> = HashMap::new();
    for row in players.iter() {
        if let Some(key) = name_key(&row) {
            *player_names.entry(key).or_insert(0) += 1;
        }
    }

    let mut table = players.select_existing(STATIC_COLUMNS);
    let mut columns: Vec<Vec<Value>> = vec![Vec::with_capacity(players.len()); COMBINE_MEASUREMENTS.len()];
    let mut matched = 0usize;
    for row in players.iter() {
        let by_id = row.get_str("pfr_id").and_then(|pfr| by_pfr.get(pfr));
        let by_pair = || {
            let key = name_key(&row)?;
            let candidates = by_name.get(&key)?;
            let unique = candidates.len() == 1 && player_names.get(&key) == Some(&1);
            unique.then(|| &candidates[0])
        };
        let hit = by_id.or_else(by_pair);
        if hit.is_some() {
            matched += 1;
        }
        for (i, column) in columns.iter_mut().enumerate() {
            column.push(hit.map(|m| m[i].clone()).unwrap_or(Value::Null));
        }
    }
    for (name, values) in COMBINE_MEASUREMENTS.iter().zip(columns) {
        table.set_column(name, values)?;
    }
    debug!(players = table.len(), matched, "built static players");
    Ok(table)
}

/// Approximate value credited to a rookie from their draft slot.
///
/// The first five picks get 12, 11, 10.5, 9 and 8.5; later picks get
/// `(9 - round) * 0.5`. Undrafted players have none.
pub fn rookie_approximate_value(draft_pick: Option<i64>, draft_round: Option<i64>) -> Option<f64> {
    match draft_pick {
        Some(1) => Some(12.0),
        Some(2) => Some(11.0),
        Some(3) => Some(10.5),
        Some(4) => Some(9.0),
        Some(5) => Some(8.5),
        _ => draft_round.map(|round| (9 - round) as f64 * 0.5),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        other => as_i64(other) == Some(1),
    }
}

/// `is_rookie`: the player's first season is `season` with no accrued years.
pub fn with_rookie_flag(table: &Table, season: Season) -> Result<Table> {
    table.require_column("rookie_season", "rookie flag")?;
    table.require_column("years_exp", "rookie flag")?;
    let season = season.as_i64();
    Ok(table.derive("is_rookie", |row| {
        Value::Bool(row.get_i64("rookie_season") == Some(season) && row.get_i64("years_exp") == Some(0))
    }))
}

/// Whole years of age on September 1 of `season`.
pub fn with_age(table: &Table, season: Season) -> Result<Table> {
    table.require_column("birth_date", "age")?;
    let kickoff = NaiveDate::from_ymd_opt(i32::from(season.as_u16()), 9, 1);
    Ok(table.derive("age", |row| {
        let born = row
            .get_str("birth_date")
            .and_then(|s| NaiveDate::parse_from_str(s.get(..10).unwrap_or(s), "%Y-%m-%d").ok());
        match (born, kickoff) {
            (Some(born), Some(on)) => {
                let mut years = on.year() - born.year();
                if (on.month(), on.day()) < (born.month(), born.day()) {
                    years -= 1;
                }
                Value::from(years)
            }
            _ => Value::Null,
        }
    }))
}

/// Stack this season's and last season's ratings, one row per player.
///
/// The current season wins; for 2001 the previous season wins. Every row is
/// restamped with `season`.
pub fn merge_madden_seasons(current: &Table, previous: &Table, season: Season) -> Result<Table> {
    let stacked = Table::concat(&[current.clone(), previous.clone()]);
    if !stacked.has_column("player_id") {
        return Ok(Table::new(["season", "player_id"]));
    }
    let keep_last = season.as_u16() == 2001;
    let mut picks: Vec<usize> = stacked
        .group_indices(&["player_id"])?
        .into_iter()
        .filter(|(key, _)| !key.iter().any(KeyValue::is_null))
        .filter_map(|(_, rows)| if keep_last { rows.last().copied() } else { rows.first().copied() })
        .collect();
    picks.sort_unstable();
    stacked
        .take(&picks)
        .with_column("season", vec![Value::from(season.as_i64()); picks.len()])
}

/// Fill `last_season_av` from an approximate value table keyed by `pfr_id`.
/// Values already present are kept.
pub fn attach_last_season_av(players: &Table, av: &Table) -> Result<Table> {
    players.require_column("pfr_id", "last season approximate value")?;
    let lookup: HashMap<&str, f64> = av
        .iter()
        .filter_map(|row| Some((row.get_str("pfr_id")?, row.get_f64("approximate_value")?)))
        .collect();
    Ok(players.derive("last_season_av", |row| {
        let current = row.get("last_season_av");
        if !current.is_null() {
            return current.clone();
        }
        float_opt(row.get_str("pfr_id").and_then(|pfr| lookup.get(pfr).copied()))
    }))
}

/// Rookies without an approximate value get their draft-slot value.
pub fn fill_rookie_approximate_value(players: &Table) -> Result<Table> {
    players.require_column("is_rookie", "rookie approximate value")?;
    Ok(players.derive("last_season_av", |row| {
        let current = row.get("last_season_av");
        if !current.is_null() || !truthy(row.get("is_rookie")) {
            return current.clone();
        }
        float_opt(rookie_approximate_value(
            row.get_i64("draft_pick"),
            row.get_i64("draft_round"),
        ))
    }))
}

/// Min-max scale onto `[-3, 3]`; a flat range scales to zero.
fn scale(x: f64, min: f64, max: f64) -> f64 {
    if max > min {
        6.0 * (x - min) / (max - min) - 3.0
    } else {
        0.0
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Nudge Madden ratings toward last season's production.
///
/// Within each position group, veterans with a last-season approximate value
/// get `clip(scale(av) - scale(overall), -3, 3)` where both are min-max
/// scaled to `[-3, 3]` across those veterans. Veterans without one get -0.5
/// and rookies nothing. The adjustment is added to every Madden attribute
/// present and the result bounded to `[5, 99]`. Rows keep their order.
pub fn adjust_preseason_ratings(table: &Table) -> Result<Table> {
    let rookie_idx = table.require_column("is_rookie", "preseason adjustment")?;
    let av_idx = table.require_column("last_season_av", "preseason adjustment")?;
    let overall_idx = table.require_column("overallrating", "preseason adjustment")?;
    let rows = table.rows();

    let mut adjustments = vec![0.0; table.len()];
    for (_, members) in table.group_indices(&["position_group"])? {
        let fit: Vec<(usize, f64, f64)> = members
            .iter()
            .filter(|&&r| !truthy(&rows[r][rookie_idx]))
            .filter_map(|&r| Some((r, as_f64(&rows[r][av_idx])?, as_f64(&rows[r][overall_idx])?)))
            .collect();
        let av_range = bounds(fit.iter().map(|(_, av, _)| *av));
        let overall_range = bounds(fit.iter().map(|(_, _, o)| *o));

        for &r in &members {
            if truthy(&rows[r][rookie_idx]) {
                continue;
            }
            if as_f64(&rows[r][av_idx]).is_none() {
                adjustments[r] = MISSING_AV_ADJUSTMENT;
            }
        }
        if let (Some((av_lo, av_hi)), Some((ov_lo, ov_hi))) = (av_range, overall_range) {
            for (r, av, overall) in fit {
                adjustments[r] = (scale(av, av_lo, av_hi) - scale(overall, ov_lo, ov_hi))
                    .clamp(-MAX_ADJUSTMENT, MAX_ADJUSTMENT);
            }
        }
    }

    let mut out = table.clone();
    for attr in MADDEN_ATTRIBUTES.iter().filter(|a| table.has_column(a)) {
        let idx = table.require_column(attr, "preseason adjustment")?;
        let values = rows
            .iter()
            .zip(&adjustments)
            .map(|(row, adj)| match as_f64(&row[idx]) {
                Some(rating) => float((rating + adj).clamp(RATING_FLOOR, RATING_CEILING)),
                None => Value::Null,
            })
            .collect();
        out.set_column(attr, values)?;
    }
    debug!(rows = out.len(), "adjusted preseason ratings");
    Ok(out)
}

/// Append any of `columns` the table lacks as null columns.
pub fn ensure_columns(table: &Table, columns: &[&str]) -> Result<Table> {
    let mut out = table.clone();
    for column in columns.iter().filter(|c| !table.has_column(c)) {
        out.set_column(column, vec![Value::Null; table.len()])?;
    }
    Ok(out)
}

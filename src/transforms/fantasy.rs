//! Weekly boom and bust candidates from merged fantasy projections.

use crate::error::{NflDataError, Result};
use crate::table::value::compare_values;
use crate::table::Table;
use crate::types::{Season, Week};
use tracing::debug;

/// Projected-points floor per fantasy position, in report order.
pub const POSITION_FLOORS: &[(&str, f64)] = &[
    ("RB", 8.0),
    ("WR", 7.0),
    ("TE", 6.0),
    ("D/ST", 5.0),
    ("K", 5.0),
    ("QB", 10.0),
];

/// Rows with both likelihoods a week needs before candidates are reported.
pub const MIN_CANDIDATES: usize = 40;

const GENERAL_COLUMNS: &[&str] = &[
    "espn_id",
    "player_id",
    "name",
    "position",
    "ecr",
    "player_owned_avg",
    "projected_points",
];

const SUFFIX_COLUMNS: &[&str] = &["opponent_name", "opposition_rank", "data_timestamp"];

/// Candidate tables for one week.
#[derive(Debug, Clone, PartialEq)]
pub struct BoomBust {
    pub boom: Table,
    pub bust: Table,
}

fn report_columns(likelihood: &'static str, score: &'static str) -> Vec<&'static str> {
    GENERAL_COLUMNS
        .iter()
        .copied()
        .chain([likelihood, score])
        .chain(SUFFIX_COLUMNS.iter().copied())
        .collect()
}

fn top_by(week: &Table, likelihood: &str, columns: &[&str], n: usize) -> Result<Table> {
    let idx = week.require_column(likelihood, "boom/bust candidates")?;
    let mut parts = Vec::with_capacity(POSITION_FLOORS.len());
    for (position, floor) in POSITION_FLOORS {
        let eligible = week.filter(|row| {
            row.get_str("position") == Some(*position)
                && row.get_f64("projected_points").is_some_and(|p| p >= *floor)
        });
        let mut order: Vec<usize> = (0..eligible.len()).collect();
        let rows = eligible.rows();
        order.sort_by(|&a, &b| match (rows[a][idx].is_null(), rows[b][idx].is_null()) {
            (false, false) => compare_values(&rows[b][idx], &rows[a][idx]),
            (a_null, b_null) => a_null.cmp(&b_null),
        });
        order.truncate(n);
        parts.push(eligible.take(&order).select(columns)?);
    }
    Ok(Table::concat(&parts))
}

/// Top `n` breakout and bust candidates per position for one week.
///
/// A player qualifies when their projection clears the position's floor.
/// Boom rows are ranked by `breakout_likelihood`, bust rows by
/// `bust_likelihood`, both descending with nulls last. A week with fewer than
/// 40 rows carrying both likelihoods is `InsufficientData`.
pub fn boom_bust_candidates(table: &Table, season: Season, week: Week, n: usize) -> Result<BoomBust> {
    for column in ["season", "week", "position", "projected_points", "breakout_likelihood", "bust_likelihood"] {
        table.require_column(column, "boom/bust candidates")?;
    }
    let this_week = table.filter(|row| {
        row.get_i64("season") == Some(season.as_i64()) && row.get_i64("week") == Some(week.as_i64())
    });
    let scored = this_week
        .iter()
        .filter(|row| {
            !row.get("breakout_likelihood").is_null() && !row.get("bust_likelihood").is_null()
        })
        .count();
    if scored < MIN_CANDIDATES {
        return Err(NflDataError::InsufficientData {
            message: format!(
                "{} players with breakout and bust likelihoods for {} week {}; need {}",
                scored, season, week, MIN_CANDIDATES
            ),
        });
    }

    let boom = top_by(
        &this_week,
        "breakout_likelihood",
        &report_columns("breakout_likelihood", "projection_high_score"),
        n,
    )?;
    let bust = top_by(
        &this_week,
        "bust_likelihood",
        &report_columns("bust_likelihood", "projection_low_score"),
        n,
    )?;
    debug!(%season, %week, boom = boom.len(), bust = bust.len(), "selected boom/bust candidates");
    Ok(BoomBust { boom, bust })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn columns() -> Vec<String> {
        GENERAL_COLUMNS
            .iter()
            .chain(SUFFIX_COLUMNS)
            .chain(&[
                "season",
                "week",
                "breakout_likelihood",
                "bust_likelihood",
                "projection_high_score",
                "projection_low_score",
            ])
            .map(|c| c.to_string())
            .collect()
    }

    fn player(id: i64, position: &str, projected: f64, boom: Value, bust: Value) -> Vec<Value> {
        vec![
            json!(id),
            json!(format!("00-{id}")),
            json!(format!("Player {id}")),
            json!(position),
            json!(id),
            json!(50.0),
            json!(projected),
            json!("KC"),
            json!(3),
            json!("2023-09-10T12:00:00"),
            json!(2023),
            json!(1),
            boom,
            bust,
            json!(projected + 8.0),
            json!(projected - 5.0),
        ]
    }

    fn week_one() -> Table {
        let mut rows: Vec<Vec<Value>> = (0..40)
            .map(|i| player(100 + i, "WR", 12.0, json!(i as f64), json!(40.0 - i as f64)))
            .collect();
        rows.push(player(900, "WR", 6.5, json!(99.0), json!(99.0)));
        rows.push(player(901, "QB", 22.0, json!(null), json!(10.0)));
        rows.push(player(902, "QB", 19.0, json!(15.0), json!(5.0)));
        Table::from_rows(columns(), rows).unwrap()
    }

    #[test]
    fn test_candidates_ranked_within_position() {
        let out = boom_bust_candidates(&week_one(), Season::new(2023), Week::new(1), 3).unwrap();
        let boom_ids: Vec<i64> = out.boom.iter().filter_map(|r| r.get_i64("espn_id")).collect();
        assert_eq!(boom_ids, vec![139, 138, 137, 902, 901]);
        let bust_ids: Vec<i64> = out.bust.iter().filter_map(|r| r.get_i64("espn_id")).collect();
        assert_eq!(bust_ids, vec![100, 101, 102, 901, 902]);
        assert_eq!(out.boom.columns().len(), 12);
        assert!(out.boom.has_column("projection_high_score"));
        assert!(out.bust.has_column("projection_low_score"));
        assert!(!out.bust.has_column("breakout_likelihood"));
    }

    #[test]
    fn test_insufficient_data() {
        let thin = week_one().filter(|r| {
            !matches!(r.get_i64("espn_id"), Some(100) | Some(900) | Some(902))
        });
        assert!(matches!(
            boom_bust_candidates(&thin, Season::new(2023), Week::new(1), 3),
            Err(NflDataError::InsufficientData { .. })
        ));
        assert!(matches!(
            boom_bust_candidates(&week_one(), Season::new(2023), Week::new(2), 3),
            Err(NflDataError::InsufficientData { .. })
        ));
    }
}

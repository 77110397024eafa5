//! Event enrichment: lines, venues, implied probabilities and team EPA.

use crate::error::Result;
use crate::table::frame::{float_cells, indexed_frame, key_exprs, row_positions, ROW_INDEX};
use crate::table::value::float_opt;
use crate::table::Table;
use crate::transforms::join::{merge, merge_many_to_one, JoinHow, JoinSpec};
use polars::prelude::*;

const GAME_KEY: &[&str] = &["season", "week", "game_id"];

const TEAM_WEEK: &[&str] = &["season", "week", "team"];

/// Player EPA columns summed into a team total.
const EPA_PARTS: &[&str] = &["passing_epa", "rushing_epa"];

/// Venue columns as they land on an event.
const VENUE_COLUMNS: &[(&str, &str)] = &[
    ("name", "venue_name"),
    ("roof", "venue_roof"),
    ("surface", "venue_surface"),
    ("home_team", "venue_home_team"),
    ("neutral_site", "venue_neutral_site"),
    ("games", "venue_games"),
];

/// Join closing lines onto events by `(season, week, game_id)`.
pub fn attach_vegas_lines(events: &Table, lines: &Table, how: JoinHow) -> Result<Table> {
    merge(events, lines, &JoinSpec { on: GAME_KEY, how })
}

/// Left join venue attributes by `(season, venue_id)`, prefixed `venue_`.
pub fn attach_venues(events: &Table, venues: &Table) -> Result<Table> {
    let keep: Vec<&str> = ["season", "venue_id"]
        .into_iter()
        .chain(VENUE_COLUMNS.iter().map(|(from, _)| *from))
        .collect();
    let venues = venues.select_existing(&keep).rename(VENUE_COLUMNS);
    merge(events, &venues, &JoinSpec::left(&["season", "venue_id"]))
}

/// Win probability implied by American odds, vig included.
pub fn moneyline_probability(moneyline: f64) -> Option<f64> {
    if moneyline <= -100.0 {
        Some(-moneyline / (-moneyline + 100.0))
    } else if moneyline >= 100.0 {
        Some(100.0 / (moneyline + 100.0))
    } else {
        None
    }
}

/// Both sides' probabilities with the bookmaker margin removed.
pub fn no_vig_probabilities(home_moneyline: f64, away_moneyline: f64) -> Option<(f64, f64)> {
    let home = moneyline_probability(home_moneyline)?;
    let away = moneyline_probability(away_moneyline)?;
    let total = home + away;
    Some((home / total, away / total))
}

/// Fill `home_implied_win_prob` and `away_implied_win_prob` from the
/// moneylines; a missing or malformed line leaves both null.
pub fn attach_implied_win_probability(events: &Table) -> Result<Table> {
    events.require_column("home_moneyline", "implied win probability")?;
    events.require_column("away_moneyline", "implied win probability")?;
    let probs: Vec<Option<(f64, f64)>> = events
        .iter()
        .map(|row| match (row.get_f64("home_moneyline"), row.get_f64("away_moneyline")) {
            (Some(h), Some(a)) => no_vig_probabilities(h, a),
            _ => None,
        })
        .collect();
    let mut out = events.clone();
    out.set_column(
        "home_implied_win_prob",
        probs.iter().map(|p| float_opt(p.map(|(h, _)| h))).collect(),
    )?;
    out.set_column(
        "away_implied_win_prob",
        probs.iter().map(|p| float_opt(p.map(|(_, a)| a))).collect(),
    )?;
    Ok(out)
}

/// Passing plus rushing EPA per `(season, week, team)` from player lines,
/// as columns `season`, `week`, `team` and `epa`.
pub fn team_epa(stats: &Table) -> Result<Table> {
    for column in TEAM_WEEK {
        stats.require_column(column, "team epa")?;
    }
    let parts: Vec<&str> = EPA_PARTS.iter().copied().filter(|c| stats.has_column(c)).collect();
    let total = parts
        .iter()
        .fold(lit(0.0), |acc, c| acc + col(*c).fill_null(lit(0.0)));
    let totals = indexed_frame(stats, TEAM_WEEK, &parts)?
        .filter(col("team").is_not_null())
        .with_column(total.alias("epa"))
        .group_by_stable(key_exprs(TEAM_WEEK))
        .agg([col(ROW_INDEX).first(), col("epa").sum()])
        .collect()?;

    let firsts: Vec<usize> = row_positions(&totals, ROW_INDEX)?.into_iter().flatten().collect();
    let mut out = stats.select(TEAM_WEEK)?.take(&firsts);
    out.set_column("epa", float_cells(&totals, "epa")?)?;
    Ok(out)
}

/// Fill `home_epa` and `away_epa` from the weekly player stats. A team with
/// no player lines that week stays null.
pub fn attach_team_epa(events: &Table, stats: &Table) -> Result<Table> {
    let totals = team_epa(stats)?;
    let mut out = events.drop_columns(&["home_epa", "away_epa"]);
    for (side, column) in [("home_team", "home_epa"), ("away_team", "away_epa")] {
        let lookup = totals.rename(&[("team", side), ("epa", column)]);
        out = merge_many_to_one(&out, &lookup, &JoinSpec::left(&["season", "week", side]))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NflDataError;
    use serde_json::{json, Value};

    fn events() -> Table {
        Table::from_rows(
            vec![
                "season".into(),
                "week".into(),
                "game_id".into(),
                "home_team".into(),
                "away_team".into(),
                "venue_id".into(),
                "roof".into(),
            ],
            vec![
                vec![json!(2023), json!(1), json!("2023_01_KC_DET"), json!("KC"), json!("DET"), json!("KAN00"), json!("outdoors")],
                vec![json!(2023), json!(1), json!("2023_01_NYG_DAL"), json!("NYG"), json!("DAL"), json!("NYC01"), json!("outdoors")],
            ],
        )
        .unwrap()
    }

    fn lines() -> Table {
        Table::from_rows(
            vec![
                "season".into(),
                "week".into(),
                "game_id".into(),
                "home_moneyline".into(),
                "away_moneyline".into(),
            ],
            vec![vec![json!(2023), json!(1), json!("2023_01_KC_DET"), json!(-200), json!(170)]],
        )
        .unwrap()
    }

    #[test]
    fn test_missing_line_null_under_left_dropped_under_inner() {
        let left = attach_vegas_lines(&events(), &lines(), JoinHow::Left).unwrap();
        assert_eq!(left.len(), 2);
        assert_eq!(left.row(1).get("home_moneyline"), &Value::Null);
        let inner = attach_vegas_lines(&events(), &lines(), JoinHow::Inner).unwrap();
        assert_eq!(inner.len(), 1);
        assert_eq!(inner.row(0).get_str("game_id"), Some("2023_01_KC_DET"));
    }

    #[test]
    fn test_implied_probabilities_sum_to_one() {
        let with_lines = attach_vegas_lines(&events(), &lines(), JoinHow::Left).unwrap();
        let out = attach_implied_win_probability(&with_lines).unwrap();
        let home = out.row(0).get_f64("home_implied_win_prob").unwrap();
        let away = out.row(0).get_f64("away_implied_win_prob").unwrap();
        assert!((home + away - 1.0).abs() < 1e-9);
        assert!(home > 0.6 && home < 0.7);
        assert_eq!(out.row(1).get("home_implied_win_prob"), &Value::Null);

        assert!(matches!(
            attach_implied_win_probability(&events()),
            Err(NflDataError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_moneyline_probability() {
        assert_eq!(moneyline_probability(-300.0), Some(0.75));
        assert_eq!(moneyline_probability(300.0), Some(0.25));
        assert_eq!(moneyline_probability(50.0), None);
        let (h, a) = no_vig_probabilities(-110.0, -110.0).unwrap();
        assert!((h - 0.5).abs() < 1e-12 && (a - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_venues_are_prefixed() {
        let venues = Table::from_rows(
            vec![
                "season".into(),
                "venue_id".into(),
                "name".into(),
                "roof".into(),
                "games".into(),
            ],
            vec![vec![json!(2023), json!("KAN00"), json!("GEHA Field at Arrowhead Stadium"), json!("outdoors"), json!(10)]],
        )
        .unwrap();
        let out = attach_venues(&events(), &venues).unwrap();
        assert_eq!(out.row(0).get_str("venue_name"), Some("GEHA Field at Arrowhead Stadium"));
        assert_eq!(out.row(0).get_i64("venue_games"), Some(10));
        assert_eq!(out.row(0).get_str("roof"), Some("outdoors"));
        assert_eq!(out.row(1).get("venue_name"), &Value::Null);
    }

    #[test]
    fn test_team_epa() {
        let stats = Table::from_rows(
            vec![
                "season".into(),
                "week".into(),
                "team".into(),
                "passing_epa".into(),
                "rushing_epa".into(),
            ],
            vec![
                vec![json!(2023), json!(1), json!("KC"), json!(4.5), json!(-1.0)],
                vec![json!(2023), json!(1), json!("KC"), json!(null), json!(2.0)],
                vec![json!(2023), json!(1), json!("DET"), json!(-3.0), json!(0.5)],
                vec![json!(2023), json!(2), json!("KC"), json!(10.0), json!(0.0)],
            ],
        )
        .unwrap();
        let totals = team_epa(&stats).unwrap();
        assert_eq!(totals.columns(), ["season", "week", "team", "epa"]);
        assert_eq!(totals.len(), 3);
        assert_eq!(totals.row(2).get_f64("epa"), Some(10.0));

        let out = attach_team_epa(&events(), &stats).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out.row(0).get_f64("home_epa"), Some(5.5));
        assert_eq!(out.row(0).get_f64("away_epa"), Some(-2.5));
        assert_eq!(out.row(1).get("home_epa"), &Value::Null);
        assert_eq!(out.row(1).get_str("game_id"), Some("2023_01_NYG_DAL"));
    }
}

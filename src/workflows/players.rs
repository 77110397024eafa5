//! Player pipelines: box scores, weekly features and preseason ratings.

use crate::core::SourceClient;
use crate::error::Result;
use crate::format::{format_table, Formatted, OutputFormat};
use crate::schema::definitions::{MADDEN_ATTRIBUTES, PRESEASON_PLAYER, WEEKLY_PLAYER_STATS};
use crate::sources::av::collect_approximate_value;
use crate::sources::boxscores::collect_weekly_player_stats;
use crate::sources::combine::collect_combine;
use crate::sources::madden::collect_madden_ratings;
use crate::sources::players::collect_players;
use crate::sources::rosters::collect_roster;
use crate::sources::LoadRequest;
use crate::table::Table;
use crate::transforms::impute::impute_group_median;
use crate::transforms::join::{merge, JoinSpec};
use crate::transforms::players::{
    adjust_preseason_ratings, attach_last_season_av, ensure_columns, fill_rookie_approximate_value,
    make_static_players, merge_madden_seasons, with_age, with_rookie_flag, COMBINE_MEASUREMENTS,
};
use crate::transforms::rolling::{rolling_aggregate, window_features, RollingSpec, WindowMode};
use crate::types::{PositionGroup, Season, StatGroup, Week};
use crate::workflows::optional_source;
use serde_json::Value;
use tracing::info;

/// Offensive box score columns the weekly features are built over.
pub const OFFENSIVE_FEATURES: &[&str] = &[
    "completions",
    "attempts",
    "passing_yards",
    "passing_tds",
    "interceptions",
    "sacks",
    "passing_epa",
    "carries",
    "rushing_yards",
    "rushing_tds",
    "rushing_epa",
    "receptions",
    "targets",
    "receiving_yards",
    "receiving_tds",
    "receiving_epa",
    "fantasy_points_ppr",
];

/// Window families computed for every weekly feature.
pub const FEATURE_MODES: &[WindowMode] = &[WindowMode::SeasonAvg, WindowMode::Form, WindowMode::Last];

/// Efficiency columns that also get an exponentially weighted prior mean and
/// a trailing mean including the current game.
pub const EPA_FEATURES: &[&str] = &["passing_epa", "rushing_epa", "receiving_epa"];

/// Games in the trailing EPA mean.
pub const EPA_ROLLING_WINDOW: usize = 3;

const IDENTITY_COLUMNS: &[&str] = &[
    "season",
    "week",
    "season_type",
    "player_id",
    "name",
    "position",
    "position_group",
    "high_pos_group",
    "team",
    "opponent_team",
];

/// Static columns carried onto a preseason player.
const STATIC_CARRY: &[&str] = &[
    "pfr_id",
    "college_name",
    "birth_date",
    "height",
    "weight",
    "rookie_season",
    "draft_year",
    "draft_round",
    "draft_pick",
];

/// Madden columns that describe the player rather than rate them.
const MADDEN_IDENTITY: &[&str] = &["name", "position", "position_group", "high_pos_group", "team"];

/// Output columns of a preseason player, ratings appended.
const PRESEASON_COLUMNS: &[&str] = &[
    "season",
    "player_id",
    "pfr_id",
    "madden_id",
    "name",
    "team",
    "high_pos_group",
    "position_group",
    "position",
    "years_exp",
    "age",
    "is_rookie",
    "college_name",
    "last_season_av",
];

/// Categorical preseason columns filled with `unknown`.
const PRESEASON_CATEGORICAL: &[&str] = &["college_name"];

fn stats_request(season: Season, week: Option<Week>, group: Option<PositionGroup>) -> LoadRequest {
    LoadRequest {
        season,
        week,
        season_type: None,
        position_group: group,
    }
}

/// Weekly box scores through `season` (and `week`), career rows included.
pub async fn make_player_stats(
    client: &SourceClient,
    season: Season,
    week: Option<Week>,
    position_group: Option<PositionGroup>,
    format: OutputFormat,
) -> Result<Formatted> {
    let request = stats_request(season, week, position_group);
    let group = position_group.map(|g| g.stat_group()).unwrap_or(StatGroup::Offense);
    let stats = collect_weekly_player_stats(client, &request, group).await?;
    format_table(&stats, None, format)
}

/// Prior-game features for every row of `season`, computed over the whole
/// career in `stats`.
///
/// EPA columns also get `ewma_<attr>` over prior games and
/// `rolling3_mean_<attr>` over the last three games including the current
/// one.
pub fn weekly_player_features_from(stats: &Table, season: Season) -> Result<Table> {
    let attrs: Vec<&str> = OFFENSIVE_FEATURES
        .iter()
        .copied()
        .filter(|c| stats.has_column(c))
        .collect();
    let epa: Vec<&str> = EPA_FEATURES.iter().copied().filter(|c| attrs.contains(c)).collect();
    let keep: Vec<&str> = IDENTITY_COLUMNS.iter().copied().chain(attrs.iter().copied()).collect();
    let mut table = stats.select_existing(&keep);
    for mode in FEATURE_MODES {
        table = window_features(&table, &["player_id"], &attrs, *mode)?;
    }
    if !epa.is_empty() {
        table = window_features(&table, &["player_id"], &epa, WindowMode::Ewma)?;
        let spec = RollingSpec::mean(&["player_id"], &["season", "week"], EPA_ROLLING_WINDOW);
        table = rolling_aggregate(&table, &epa, &spec)?;
    }
    let season = season.as_i64();
    WEEKLY_PLAYER_STATS.validate_table(&table.filter(|row| row.get_i64("season") == Some(season)))
}

pub async fn make_weekly_player_features(
    client: &SourceClient,
    season: Season,
    week: Option<Week>,
    position_group: Option<PositionGroup>,
    format: OutputFormat,
) -> Result<Formatted> {
    let request = stats_request(season, week, position_group);
    let stats = collect_weekly_player_stats(client, &request, StatGroup::Offense).await?;
    let features = weekly_player_features_from(&stats, season)?;
    info!(%season, rows = features.len(), "built weekly player features");
    format_table(&features, None, format)
}

/// Tables a preseason player is assembled from.
#[derive(Debug, Clone, Default)]
pub struct PreseasonInputs {
    pub roster: Table,
    pub static_players: Table,
    pub madden_current: Table,
    pub madden_previous: Table,
    /// Approximate value of the previous season.
    pub approximate_value: Table,
}

/// Week-one roster joined with static players and Madden ratings, ratings
/// adjusted for last season.
///
/// Before the adjustment, missing combine measurements, approximate values
/// and Madden attributes take the median of the player's season and
/// position group, and a missing college becomes `unknown`.
///
/// A roster without week-one rows (the offseason pull) is treated as week
/// one.
pub fn preseason_players_from(inputs: &PreseasonInputs, season: Season) -> Result<Table> {
    let roster = &inputs.roster;
    let week_one = roster.filter(|row| row.get_i64("week") == Some(1));
    let week_one = if week_one.is_empty() {
        roster.with_column("week", vec![Value::from(1); roster.len()])?
    } else {
        week_one
    };
    let week_one = week_one.unique_by(&["player_id"])?;

    let carried: Vec<&str> = std::iter::once("player_id")
        .chain(
            STATIC_CARRY
                .iter()
                .chain(COMBINE_MEASUREMENTS)
                .copied()
                .filter(|c| !week_one.has_column(c)),
        )
        .collect();
    let static_players = ensure_columns(&inputs.static_players, &["player_id"])?.select_existing(&carried);
    let table = merge(&week_one, &static_players, &JoinSpec::left(&["player_id"]))?;
    let table = ensure_columns(
        &table,
        &["rookie_season", "years_exp", "birth_date", "pfr_id", "draft_pick", "draft_round"],
    )?;
    let table = with_age(&with_rookie_flag(&table, season)?, season)?;

    let madden = merge_madden_seasons(&inputs.madden_current, &inputs.madden_previous, season)?;
    let ratings: Vec<&str> = madden
        .columns()
        .iter()
        .map(String::as_str)
        .filter(|c| {
            matches!(*c, "season" | "player_id")
                || !(MADDEN_IDENTITY.contains(c) || table.has_column(c))
        })
        .collect();
    let madden = madden.select_existing(&ratings);
    let table = merge(&table, &madden, &JoinSpec::left(&["season", "player_id"]))?;

    let mut required: Vec<&str> = vec!["madden_id", "last_season_av"];
    required.extend_from_slice(MADDEN_ATTRIBUTES);
    required.extend_from_slice(COMBINE_MEASUREMENTS);
    required.extend_from_slice(PRESEASON_CATEGORICAL);
    let table = ensure_columns(&table, &required)?;
    let table = attach_last_season_av(&table, &inputs.approximate_value)?;
    let table = fill_rookie_approximate_value(&table)?;

    let numeric: Vec<&str> = COMBINE_MEASUREMENTS
        .iter()
        .chain(&["last_season_av"])
        .chain(MADDEN_ATTRIBUTES)
        .copied()
        .collect();
    let table = impute_group_median(&table, &numeric, PRESEASON_CATEGORICAL)?;
    let table = adjust_preseason_ratings(&table)?;

    let columns: Vec<&str> = PRESEASON_COLUMNS
        .iter()
        .chain(COMBINE_MEASUREMENTS)
        .chain(MADDEN_ATTRIBUTES)
        .copied()
        .collect();
    PRESEASON_PLAYER.validate_table(&table.select_existing(&columns))
}

/// Preseason baseline players for `season`.
///
/// Madden ratings and last season's approximate value are optional upstreams;
/// a season without them still produces players, adjusted as if no veteran
/// had a value.
pub async fn make_preseason_players(
    client: &SourceClient,
    season: Season,
    format: OutputFormat,
) -> Result<Formatted> {
    let request = LoadRequest::new(season);
    let previous = LoadRequest::new(season.previous());

    let roster = collect_roster(client, &request).await?;
    let players = collect_players(client, &request).await?;
    let combine = collect_combine(client, &request).await?;
    let inputs = PreseasonInputs {
        roster,
        static_players: make_static_players(&players, &combine)?,
        madden_current: optional_source(collect_madden_ratings(client, &request).await, "madden")?,
        madden_previous: optional_source(collect_madden_ratings(client, &previous).await, "madden")?,
        approximate_value: optional_source(
            collect_approximate_value(client, &previous).await,
            "approximate value",
        )?,
    };
    let preseason = preseason_players_from(&inputs, season)?;
    info!(%season, players = preseason.len(), "built preseason players");
    format_table(&preseason, None, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stats() -> Table {
        let row = |id: &str, season: i64, week: i64, yards: f64| {
            vec![json!(season), json!(week), json!("REG"), json!(id), json!("WR"), json!(yards), json!(1.5)]
        };
        Table::from_rows(
            vec![
                "season".into(),
                "week".into(),
                "season_type".into(),
                "player_id".into(),
                "position".into(),
                "receiving_yards".into(),
                "dakota".into(),
            ],
            vec![
                row("A", 2022, 17, 120.0),
                row("A", 2023, 1, 80.0),
                row("A", 2023, 2, 60.0),
                row("B", 2023, 1, 10.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_weekly_features_keep_requested_season() {
        let out = weekly_player_features_from(&stats(), Season::new(2023)).unwrap();
        assert_eq!(out.len(), 3);
        assert!(!out.has_column("dakota"));
        let a2 = out.row(1);
        assert_eq!(a2.get_f64("season_avg_receiving_yards"), Some(80.0));
        assert_eq!(a2.get_f64("form_receiving_yards"), Some(100.0));
        assert_eq!(a2.get_f64("last_receiving_yards"), Some(80.0));
        let a1 = out.row(0);
        assert_eq!(a1.get_f64("season_avg_receiving_yards"), Some(120.0));
        assert_eq!(out.row(2).get("last_receiving_yards"), &Value::Null);
    }

    fn inputs() -> PreseasonInputs {
        let roster = Table::from_rows(
            vec![
                "season".into(),
                "week".into(),
                "player_id".into(),
                "name".into(),
                "position".into(),
                "position_group".into(),
                "years_exp".into(),
                "birth_date".into(),
            ],
            vec![
                vec![json!(2023), json!(1), json!("V1"), json!("Vet One"), json!("QB"), json!("quarterback"), json!(6), json!("1995-09-17")],
                vec![json!(2023), json!(1), json!("V2"), json!("Vet Two"), json!("QB"), json!("quarterback"), json!(3), json!("1998-01-01")],
                vec![json!(2023), json!(1), json!("R1"), json!("Rookie"), json!("QB"), json!("quarterback"), json!(0), json!("2000-10-01")],
                vec![json!(2023), json!(2), json!("R1"), json!("Rookie"), json!("QB"), json!("quarterback"), json!(0), json!("2000-10-01")],
            ],
        )
        .unwrap();
        let static_players = Table::from_rows(
            vec![
                "player_id".into(),
                "pfr_id".into(),
                "birth_date".into(),
                "rookie_season".into(),
                "draft_round".into(),
                "draft_pick".into(),
                "forty".into(),
            ],
            vec![
                vec![json!("V1"), json!("V1pfr"), json!("1995-09-17"), json!(2017), json!(1), json!(10), json!(4.8)],
                vec![json!("V2"), json!("V2pfr"), json!("1998-01-01"), json!(2020), json!(3), json!(80), json!(null)],
                vec![json!("R1"), json!("R1pfr"), json!("2000-10-01"), json!(2023), json!(1), json!(1), json!(4.5)],
            ],
        )
        .unwrap();
        let madden = |season: i64, rows: Vec<(&str, i64, i64)>| {
            Table::from_rows(
                vec!["season".into(), "player_id".into(), "name".into(), "overallrating".into(), "speed".into()],
                rows.into_iter()
                    .map(|(id, ovr, spd)| vec![json!(season), json!(id), json!(id), json!(ovr), json!(spd)])
                    .collect(),
            )
            .unwrap()
        };
        let approximate_value = Table::from_rows(
            vec!["season".into(), "pfr_id".into(), "approximate_value".into()],
            vec![
                vec![json!(2022), json!("V1pfr"), json!(18.0)],
                vec![json!(2022), json!("V2pfr"), json!(4.0)],
            ],
        )
        .unwrap();
        PreseasonInputs {
            roster,
            static_players,
            madden_current: madden(2023, vec![("V1", 90, 70), ("R1", 70, 85)]),
            madden_previous: madden(2022, vec![("V1", 88, 71), ("V2", 80, 75)]),
            approximate_value,
        }
    }

    #[test]
    fn test_preseason_players() {
        let out = preseason_players_from(&inputs(), Season::new(2023)).unwrap();
        assert_eq!(out.len(), 3);
        let v1 = out.row(0);
        assert_eq!(v1.get_str("name"), Some("Vet One"));
        assert_eq!(v1.get("is_rookie"), &json!(false));
        assert_eq!(v1.get_f64("last_season_av"), Some(18.0));
        // best av and best overall cancel out
        assert_eq!(v1.get_f64("overallrating"), Some(90.0));
        assert_eq!(v1.get_i64("age"), Some(27));

        // last season's rating carried over
        let v2 = out.row(1);
        assert_eq!(v2.get_f64("overallrating"), Some(80.0));
        assert_eq!(v2.get_i64("season"), Some(2023));

        let r1 = out.row(2);
        assert_eq!(r1.get("is_rookie"), &json!(true));
        assert_eq!(r1.get_f64("last_season_av"), Some(12.0));
        assert_eq!(r1.get_f64("overallrating"), Some(70.0));
        assert!(out.has_column("kickpower"));
    }

    #[test]
    fn test_preseason_gaps_take_group_medians() {
        let mut inputs = inputs();
        let v3 = Table::from_rows(
            inputs.roster.columns().to_vec(),
            vec![vec![json!(2023), json!(1), json!("V3"), json!("Vet Three"), json!("QB"), json!("quarterback"), json!(4), json!("1996-05-05")]],
        )
        .unwrap();
        inputs.roster = Table::concat(&[inputs.roster.clone(), v3]);

        let out = preseason_players_from(&inputs, Season::new(2023)).unwrap();
        assert_eq!(out.len(), 4);
        let v3 = out.row(3);
        assert_eq!(v3.get_str("player_id"), Some("V3"));
        assert_eq!(v3.get_f64("last_season_av"), Some(12.0));
        // median 80, pushed up by the best av-to-rating gap and clamped
        assert_eq!(v3.get_f64("overallrating"), Some(83.0));
        assert_eq!(v3.get_f64("speed"), Some(78.0));
        assert!((v3.get_f64("forty").unwrap() - 4.65).abs() < 1e-9);
        assert_eq!(v3.get_str("college_name"), Some("unknown"));
        assert_eq!(v3.get_i64("age"), Some(27));

        assert_eq!(out.row(0).get_f64("overallrating"), Some(90.0));
        assert!((out.row(1).get_f64("forty").unwrap() - 4.65).abs() < 1e-9);
    }

    #[test]
    fn test_preseason_offseason_roster_and_missing_madden() {
        let mut inputs = inputs();
        inputs.roster = inputs.roster.filter(|r| r.get_i64("week") == Some(2));
        inputs.madden_current = Table::default();
        inputs.madden_previous = Table::default();
        let out = preseason_players_from(&inputs, Season::new(2023)).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.row(0).get_str("player_id"), Some("R1"));
        assert_eq!(out.row(0).get("overallrating"), &Value::Null);
    }
}

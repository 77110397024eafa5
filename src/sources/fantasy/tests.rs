//! Unit tests for projection and ranking shaping

use super::*;

mod fantasy_tests {
    use super::*;
    use crate::types::Week;
    use serde_json::json;

    fn crosswalk() -> IdCrosswalk {
        let table = Table::from_rows(
            vec!["gsis_id".into(), "espn_id".into(), "fantasypros_id".into()],
            vec![
                vec![json!("00-0033873"), json!(3139477), json!(17298)],
                vec![json!("00-0036223"), json!(4362628), json!(22902)],
                vec![json!(null), json!(4430807), json!(23000)],
            ],
        )
        .unwrap();
        IdCrosswalk::from_table(&table)
    }

    fn projections() -> Table {
        let row = |id: i64, name: &str, pos: &str, team: &str, week: i64, pts: f64, yds: Value, fg: Value| {
            vec![
                json!(2023),
                json!(week),
                json!(id),
                json!(name),
                json!(pos),
                json!(team),
                json!(99.5),
                json!(90.0),
                json!(pts),
                yds,
                fg,
            ]
        };
        Table::from_rows(
            vec![
                "season".into(),
                "week".into(),
                "player_id".into(),
                "name".into(),
                "position".into(),
                "team".into(),
                "percent_owned".into(),
                "percent_started".into(),
                "projected_points".into(),
                "projected_passing_yards".into(),
                "projected_made_field_goals".into(),
            ],
            vec![
                row(3139477, "Patrick Mahomes", "QB", "KC", 1, 24.1, json!(290.0), json!(null)),
                row(3139477, "Patrick Mahomes", "QB", "KC", 2, 22.3, json!(275.5), json!(null)),
                row(4362628, "Ja'Marr Chase", "WR", "CIN", 1, 17.8, json!(null), json!(null)),
                row(-16012, "Chiefs D/ST", "D/ST", "KC", 1, 7.0, json!(null), json!(null)),
                row(15683, "Harrison Butker", "K", "KC", 1, 8.5, json!(null), json!(2.1)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_weekly_offense_projections() {
        let req = LoadRequest::new(Season::new(2023)).with_week(Week::new(1));
        let table = fantasy_projections_from(
            &projections(),
            &crosswalk(),
            &req,
            FantasyMode::Weekly,
            FantasyGroup::Offense,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        let qb = table.row(0);
        assert_eq!(qb.get_i64("espn_id"), Some(3139477));
        assert_eq!(qb.get_str("player_id"), Some("00-0033873"));
        assert_eq!(qb.get_f64("projected_passing_yards"), Some(290.0));
        assert!(!table.has_column("projected_made_field_goals"));
    }

    #[test]
    fn test_dst_projection_maps_to_team() {
        let req = LoadRequest::new(Season::new(2023));
        let table = fantasy_projections_from(
            &projections(),
            &crosswalk(),
            &req,
            FantasyMode::Weekly,
            FantasyGroup::Defense,
        )
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.row(0).get_str("player_id"), Some("KC"));
        assert_eq!(table.row(0).get_i64("espn_id"), Some(-16012));
    }

    #[test]
    fn test_season_mode_sums_stats() {
        let req = LoadRequest::new(Season::new(2023));
        let table = fantasy_projections_from(
            &projections(),
            &crosswalk(),
            &req,
            FantasyMode::Season,
            FantasyGroup::All,
        )
        .unwrap();
        assert_eq!(table.len(), 4);
        let qb = table.row(0);
        assert_eq!(qb.get_i64("espn_id"), Some(3139477));
        assert_eq!(qb.get_f64("projected_passing_yards"), Some(565.5));
        assert_eq!(qb.get("week"), &Value::Null);
        assert_eq!(qb.get("projected_points"), &Value::Null);

        let wr = table.row(1);
        assert_eq!(wr.get("projected_passing_yards"), &Value::Null);
        let kicker = table.row(3);
        assert_eq!(kicker.get_f64("projected_made_field_goals"), Some(2.1));
        assert_eq!(kicker.get("player_id"), &Value::Null);
    }

    #[test]
    fn test_watson_keeps_first_repeat() {
        let raw = Table::from_rows(
            vec![
                "season".into(),
                "week".into(),
                "player_id".into(),
                "projection_score".into(),
                "is_on_bye".into(),
            ],
            vec![
                vec![json!(2023), json!(1), json!(3139477), json!(23.4), json!(false)],
                vec![json!(2023), json!(1), json!(3139477), json!(21.0), json!(false)],
                vec![json!(2023), json!(2), json!(3139477), json!(22.8), json!(false)],
            ],
        )
        .unwrap();
        let req = LoadRequest::new(Season::new(2023));
        let table = watson_projections_from(&raw, &crosswalk(), &req).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.row(0).get_f64("projection_score"), Some(23.4));
        assert_eq!(table.row(0).get_str("player_id"), Some("00-0033873"));

        let week_two = req.with_week(Week::new(2));
        assert_eq!(watson_projections_from(&raw, &crosswalk(), &week_two).unwrap().len(), 1);
    }

    fn windows() -> HashMap<Season, Vec<WeekWindow>> {
        let at = |d: u32| NaiveDate::from_ymd_opt(2023, 9, d).unwrap().and_hms_opt(20, 20, 0).unwrap();
        let window = |week: u16, d: u32| WeekWindow {
            week,
            start: at(d),
            end: at(d) + chrono::Duration::days(6) + chrono::Duration::hours(23),
        };
        HashMap::from([(Season::new(2023), vec![window(1, 7), window(2, 14), window(3, 21)])])
    }

    fn ecr_raw() -> Table {
        let row = |page: &str, date: &str, id: i64, name: &str, pos: &str, ecr: f64| {
            vec![json!(page), json!(date), json!(id), json!(name), json!(pos), json!(ecr)]
        };
        Table::from_rows(
            vec![
                "fp_page".into(),
                "scrape_date".into(),
                "id".into(),
                "mergename".into(),
                "pos".into(),
                "ecr".into(),
            ],
            vec![
                row("/nfl/rankings/ppr-cheatsheets.php", "2023-08-20", 17298, "patrick mahomes", "QB", 3.0),
                row("/nfl/rankings/ppr-cheatsheets.php", "2023-09-01", 17298, "patrick mahomes", "QB", 2.0),
                row("/nfl/rankings/ppr-cheatsheets.php", "2023-09-01", 8000, "Kansas City Chiefs", "DST", 60.0),
                row("/nfl/rankings/ros-ppr-overall.php", "2023-09-02", 17298, "patrick mahomes", "QB", 1.0),
                row("/nfl/rankings/ros-ppr-overall.php", "2023-09-15", 17298, "patrick mahomes", "QB", 4.0),
                row("/nfl/rankings/ros-ppr-overall.php", "2023-09-15", 22902, "jamarr chase", "WR", 5.0),
                row("/nfl/rankings/ros-ppr-overall.php", "2023-09-15", 99999, "nobody", "WR", 7.0),
                row("/nfl/rankings/ros-ppr-overall.php", "2023-04-15", 17298, "patrick mahomes", "QB", 9.0),
                row("/nfl/rankings/dynasty-overall.php", "2023-09-15", 17298, "patrick mahomes", "QB", 1.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_ecr_weeks_and_preseason() {
        let table =
            fantasypros_ecr_from(&ecr_raw(), &crosswalk(), &[Season::new(2023)], &windows()).unwrap();
        assert_eq!(table.len(), 4);

        let preseason: Vec<_> = table
            .iter()
            .filter(|r| r.get_i64("week") == Some(0))
            .collect();
        assert_eq!(preseason.len(), 2);
        let qb = preseason
            .iter()
            .find(|r| r.get_i64("espn_id") == Some(3139477))
            .unwrap();
        assert_eq!(qb.get_f64("ecr"), Some(2.0));
        assert_eq!(qb.get_str("scrape_date"), Some("2023-09-01"));

        let dst = preseason
            .iter()
            .find(|r| r.get_str("player_id") == Some("KC"))
            .unwrap();
        assert_eq!(dst.get_i64("espn_id"), Some(-16012));

        let week_two: Vec<_> = table
            .iter()
            .filter(|r| r.get_i64("week") == Some(2))
            .collect();
        assert_eq!(week_two.len(), 2);
        assert_eq!(week_two[0].get_str("fp_page"), Some("/nfl/rankings/ros-ppr-overall.php"));
    }

    #[test]
    fn test_ecr_preseason_only_becomes_week_one() {
        let raw = ecr_raw().filter(|r| r.get_str("fp_page") == Some("/nfl/rankings/ppr-cheatsheets.php"));
        let table = fantasypros_ecr_from(&raw, &crosswalk(), &[Season::new(2023)], &windows()).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.iter().all(|r| r.get_i64("week") == Some(1)));
    }

    #[test]
    fn test_ecr_other_seasons_skipped() {
        let table =
            fantasypros_ecr_from(&ecr_raw(), &crosswalk(), &[Season::new(2022)], &windows()).unwrap();
        assert!(table.is_empty());
        assert!(table.has_column("fp_page"));
    }

    #[test]
    fn test_ecr_requires_page_column() {
        let raw = ecr_raw().drop_columns(&["fp_page"]);
        assert!(fantasypros_ecr_from(&raw, &crosswalk(), &[Season::new(2023)], &windows()).is_err());
    }

    #[test]
    fn test_projection_columns_per_group() {
        assert_eq!(projection_columns(FantasyGroup::Offense).len(), 29);
        assert_eq!(projection_columns(FantasyGroup::Defense).len(), 30);
        assert_eq!(projection_columns(FantasyGroup::SpecialTeams).len(), 17);
        assert_eq!(projection_columns(FantasyGroup::All).len(), 76);
        assert_eq!(projections_path(Season::new(2023)), "season/football/nfl/2023.parquet");
    }
}

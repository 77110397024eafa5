//! Column normalization shared by the loaders.

use crate::error::Result;
use crate::table::Table;
use crate::types::position::{high_group_for, position_group_for};
use crate::types::{normalize_team_code, PositionGroup, SeasonType};
use serde_json::Value;

/// Columns that may hold a team abbreviation in upstream files.
pub const TEAM_COLUMNS: &[&str] = &[
    "team",
    "home_team",
    "away_team",
    "opponent_team",
    "recent_team",
    "latest_team",
    "draft_team",
    "club_code",
    "team_id",
];

fn is_team_code(s: &str) -> bool {
    let s = s.trim();
    (2..=3).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphabetic())
}

/// Map relocated and alternate franchise codes onto current ones.
///
/// Cells that are not two or three letter codes (full franchise names in
/// the combine file) are left alone.
pub fn normalize_teams(table: &Table) -> Table {
    TEAM_COLUMNS
        .iter()
        .filter(|c| table.has_column(c))
        .fold(table.clone(), |out, column| {
            out.derive(column, |row| match row.get(column) {
                Value::String(code) if is_team_code(code) => Value::String(normalize_team_code(code)),
                other => other.clone(),
            })
        })
}

/// Derive `position_group` (and optionally `high_pos_group`) from a position
/// column. Codes outside the enumeration map to null.
pub fn with_position_groups(table: &Table, position_column: &str, high: bool) -> Table {
    let grouped = table.derive("position_group", |row| {
        row.get_str(position_column)
            .and_then(position_group_for)
            .map(|g| Value::String(g.as_str().to_string()))
            .unwrap_or(Value::Null)
    });
    if !high {
        return grouped;
    }
    grouped.derive("high_pos_group", |row| {
        row.get_str("position_group")
            .and_then(high_group_for)
            .map(|g| Value::String(g.as_str().to_string()))
            .unwrap_or(Value::Null)
    })
}

/// First letter of a roster status; waived, exempt, inactive and missing
/// statuses all read as `N`.
pub fn status_abbr(status: Option<&str>) -> String {
    match status.and_then(|s| s.trim().chars().next()) {
        Some('W' | 'E' | 'I' | 'N') | None => "N".to_string(),
        Some(c) => c.to_string(),
    }
}

/// Keep the digits of a jersey number; anything without digits is null.
pub fn jersey_digits(value: &Value) -> Value {
    let raw = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(x) if x.fract() == 0.0 => format!("{}", x as i64),
            _ => n.to_string(),
        },
        _ => return Value::Null,
    };
    let digits: String = raw
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        Value::Null
    } else {
        Value::String(digits)
    }
}

/// Keep rows of one position group when a filter is given.
pub fn filter_position_group(table: &Table, group: Option<PositionGroup>) -> Table {
    match group {
        Some(g) => table.filter(|row| row.get_str("position_group") == Some(g.as_str())),
        None => table.clone(),
    }
}

/// Keep rows whose `column` matches the season type.
pub fn filter_season_type(table: &Table, season_type: Option<SeasonType>, column: &str) -> Table {
    match season_type {
        Some(st) => table.filter(|row| row.get_str(column).map(|c| st.matches(c)).unwrap_or(false)),
        None => table.clone(),
    }
}

/// Drop rows whose `column` is null or an empty string.
pub fn drop_blank(table: &Table, column: &str) -> Table {
    table.filter(|row| match row.get(column) {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    })
}

/// Rename `from` to `to` unless `to` is already present.
pub fn rename_if_absent(table: &Table, from: &str, to: &str) -> Table {
    if table.has_column(to) {
        table.clone()
    } else {
        table.rename(&[(from, to)])
    }
}

/// Constant column.
pub fn with_constant(table: &Table, name: &str, value: Value) -> Result<Table> {
    table.with_column(name, vec![value; table.len()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> Table {
        Table::from_rows(
            vec!["team".into(), "opponent_team".into(), "position".into()],
            vec![
                vec![json!("OAK"), json!("SD"), json!("QB")],
                vec![json!("KC"), json!("STL"), json!("ILB")],
                vec![json!(null), json!("JAC"), json!("XX")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_teams() {
        let t = normalize_teams(&table());
        assert_eq!(t.row(0).get_str("team"), Some("LV"));
        assert_eq!(t.row(0).get_str("opponent_team"), Some("LAC"));
        assert_eq!(t.row(1).get_str("opponent_team"), Some("LA"));
        assert_eq!(t.row(2).get("team"), &Value::Null);
        assert_eq!(t.row(2).get_str("opponent_team"), Some("JAX"));
        assert_eq!(t.columns(), table().columns());

        let names = Table::from_rows(vec!["draft_team".into()], vec![vec![json!("Kansas City Chiefs")]])
            .unwrap();
        assert_eq!(
            normalize_teams(&names).row(0).get_str("draft_team"),
            Some("Kansas City Chiefs")
        );
    }

    #[test]
    fn test_position_groups() {
        let t = with_position_groups(&table(), "position", true);
        assert_eq!(t.row(0).get_str("position_group"), Some("quarterback"));
        assert_eq!(t.row(0).get_str("high_pos_group"), Some("offense"));
        assert_eq!(t.row(1).get_str("position_group"), Some("linebacker"));
        assert_eq!(t.row(1).get_str("high_pos_group"), Some("defense"));
        assert_eq!(t.row(2).get("position_group"), &Value::Null);

        let only_group = with_position_groups(&table(), "position", false);
        assert!(!only_group.has_column("high_pos_group"));
    }

    #[test]
    fn test_status_abbr() {
        assert_eq!(status_abbr(Some("ACT")), "A");
        assert_eq!(status_abbr(Some("RES")), "R");
        assert_eq!(status_abbr(Some("INA")), "N");
        assert_eq!(status_abbr(Some("W03")), "N");
        assert_eq!(status_abbr(Some("E01")), "N");
        assert_eq!(status_abbr(Some("")), "N");
        assert_eq!(status_abbr(None), "N");
    }

    #[test]
    fn test_jersey_digits() {
        assert_eq!(jersey_digits(&json!("15")), json!("15"));
        assert_eq!(jersey_digits(&json!(87.0)), json!("87"));
        assert_eq!(jersey_digits(&json!("#9")), json!("9"));
        assert_eq!(jersey_digits(&json!("NA")), Value::Null);
        assert_eq!(jersey_digits(&Value::Null), Value::Null);
    }

    #[test]
    fn test_filters() {
        let t = with_position_groups(&table(), "position", false);
        let qbs = filter_position_group(&t, Some(PositionGroup::Quarterback));
        assert_eq!(qbs.len(), 1);
        assert_eq!(filter_position_group(&t, None).len(), 3);

        let games = Table::from_rows(
            vec!["season_type".into()],
            vec![vec![json!("REG")], vec![json!("POST")], vec![json!(null)]],
        )
        .unwrap();
        assert_eq!(filter_season_type(&games, Some(SeasonType::Post), "season_type").len(), 1);
        assert_eq!(filter_season_type(&games, Some(SeasonType::All), "season_type").len(), 2);
        assert_eq!(filter_season_type(&games, None, "season_type").len(), 3);
    }

    #[test]
    fn test_drop_blank() {
        let t = Table::from_rows(
            vec!["player_id".into()],
            vec![vec![json!("00-1")], vec![json!("")], vec![json!(null)]],
        )
        .unwrap();
        assert_eq!(drop_blank(&t, "player_id").len(), 1);
    }
}

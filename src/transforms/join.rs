//! Keyed joins between tables.

use crate::error::{NflDataError, Result};
use crate::table::frame::{frame_of, key_dtype, row_positions, ROW_INDEX};
use crate::table::value::display_key;
use crate::table::Table;
use polars::prelude::*;
use serde_json::Value;
use tracing::debug;

const LEFT_ROW: &str = "__left_row";
const RIGHT_ROW: &str = "__right_row";
const DUPLICATES: &str = "__rows";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinHow {
    /// Unmatched left rows are dropped.
    Inner,
    /// Unmatched left rows are kept with null right-hand columns.
    #[default]
    Left,
}

impl From<JoinHow> for JoinType {
    fn from(how: JoinHow) -> Self {
        match how {
            JoinHow::Inner => JoinType::Inner,
            JoinHow::Left => JoinType::Left,
        }
    }
}

/// Key columns and join type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinSpec<'a> {
    pub on: &'a [&'a str],
    pub how: JoinHow,
}

impl<'a> JoinSpec<'a> {
    pub fn left(on: &'a [&'a str]) -> Self {
        Self {
            on,
            how: JoinHow::Left,
        }
    }

    pub fn inner(on: &'a [&'a str]) -> Self {
        Self {
            on,
            how: JoinHow::Inner,
        }
    }
}

fn key_indices(table: &Table, keys: &[&str], name: &str) -> Result<Vec<usize>> {
    keys.iter()
        .map(|k| table.require_column(k, name))
        .collect()
}

/// Fail with `DuplicateKey` when two rows share a fully non-null key.
pub fn ensure_unique_keys(table: &Table, keys: &[&str], name: &str) -> Result<()> {
    let indices = key_indices(table, keys, name)?;
    let complete = keys
        .iter()
        .map(|k| col(*k).is_not_null())
        .reduce(|a, b| a.and(b))
        .unwrap_or_else(|| lit(true));
    let repeated = frame_of(table, keys, &[])?
        .lazy()
        .with_row_index(ROW_INDEX, None)
        .filter(complete)
        .group_by_stable(keys.iter().map(|k| col(*k)).collect::<Vec<_>>())
        .agg([col(ROW_INDEX).first(), len().alias(DUPLICATES)])
        .filter(col(DUPLICATES).gt(lit(1)))
        .limit(1)
        .collect()?;
    match row_positions(&repeated, ROW_INDEX)?.into_iter().flatten().next() {
        Some(row) => Err(NflDataError::DuplicateKey {
            table: name.to_string(),
            key: display_key(&table.key_of(row, &indices)),
        }),
        None => Ok(()),
    }
}

/// Matching `(left row, right row)` pairs in left order.
fn match_rows(left: &Table, right: &Table, spec: &JoinSpec<'_>) -> Result<Vec<(usize, Option<usize>)>> {
    let left_df = frame_of(left, spec.on, &[])?;
    let right_df = frame_of(right, spec.on, &[])?;

    let mut left_keys = vec![col(LEFT_ROW)];
    let mut right_keys = vec![col(RIGHT_ROW)];
    let mut on = Vec::with_capacity(spec.on.len());
    for (i, key) in spec.on.iter().enumerate() {
        let dtype = key_dtype(left_df.column(key)?.dtype(), right_df.column(key)?.dtype());
        let name = format!("__key{}", i);
        left_keys.push(col(*key).cast(dtype.clone()).alias(name.as_str()));
        right_keys.push(col(*key).cast(dtype).alias(name.as_str()));
        on.push(col(name.as_str()));
    }

    let matched = left_df
        .lazy()
        .with_row_index(LEFT_ROW, None)
        .select(left_keys)
        .join(
            right_df.lazy().with_row_index(RIGHT_ROW, None).select(right_keys),
            on.clone(),
            on,
            JoinArgs::new(spec.how.into()),
        )
        .sort_by_exprs([col(LEFT_ROW)], SortMultipleOptions::default())
        .select([col(LEFT_ROW), col(RIGHT_ROW)])
        .collect()?;

    let lefts = row_positions(&matched, LEFT_ROW)?;
    let rights = row_positions(&matched, RIGHT_ROW)?;
    Ok(lefts
        .into_iter()
        .zip(rights)
        .filter_map(|(l, r)| l.map(|l| (l, r)))
        .collect())
}

/// Join `right` onto `left`.
///
/// Both sides must be unique on the key. Output columns are the left
/// columns followed by the right's non-key columns, rows in left order.
/// A null key component never matches. A non-key column present on both
/// sides is an integrity error; callers drop or rename it first. Keys of
/// different types are compared as floats when both are numeric and as
/// text otherwise.
pub fn merge(left: &Table, right: &Table, spec: &JoinSpec<'_>) -> Result<Table> {
    ensure_unique_keys(left, spec.on, "left join input")?;
    join_onto(left, right, spec)
}

/// [`merge`] for a left side with repeated keys, e.g. player rows onto
/// their game. Only `right` must be unique on the key.
pub fn merge_many_to_one(left: &Table, right: &Table, spec: &JoinSpec<'_>) -> Result<Table> {
    key_indices(left, spec.on, "left join input")?;
    join_onto(left, right, spec)
}

fn join_onto(left: &Table, right: &Table, spec: &JoinSpec<'_>) -> Result<Table> {
    ensure_unique_keys(right, spec.on, "right join input")?;

    let right_keys = key_indices(right, spec.on, "right join input")?;
    let carried: Vec<(usize, &String)> = right
        .columns()
        .iter()
        .enumerate()
        .filter(|(i, _)| !right_keys.contains(i))
        .collect();
    if let Some((_, clash)) = carried.iter().find(|(_, c)| left.has_column(c)) {
        return Err(NflDataError::integrity(format!(
            "column '{}' is present on both sides of the join on {:?}",
            clash, spec.on
        )));
    }

    let pairs = match_rows(left, right, spec)?;
    let columns: Vec<String> = left
        .columns()
        .iter()
        .cloned()
        .chain(carried.iter().map(|(_, c)| (*c).clone()))
        .collect();
    let mut rows = Vec::with_capacity(pairs.len());
    let mut unmatched = 0usize;
    for (l, r) in pairs {
        let mut row = left.rows()[l].clone();
        match r {
            Some(r) => row.extend(carried.iter().map(|(idx, _)| right.rows()[r][*idx].clone())),
            None => {
                unmatched += 1;
                row.extend(std::iter::repeat(Value::Null).take(carried.len()));
            }
        }
        rows.push(row);
    }
    debug!(
        on = ?spec.on,
        how = ?spec.how,
        rows = rows.len(),
        unmatched,
        "merged tables"
    );
    Table::from_rows(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn events() -> Table {
        Table::from_rows(
            vec!["season".into(), "week".into(), "game_id".into(), "home_team".into()],
            vec![
                vec![json!(2023), json!(1), json!("2023_01_KC_DET"), json!("KC")],
                vec![json!(2023), json!(1), json!("2023_01_NYG_DAL"), json!("NYG")],
                vec![json!(2023), json!(1), json!(null), json!("BUF")],
            ],
        )
        .unwrap()
    }

    fn lines() -> Table {
        Table::from_rows(
            vec!["season".into(), "week".into(), "game_id".into(), "spread_line".into()],
            vec![vec![json!(2023), json!(1), json!("2023_01_KC_DET"), json!(4.5)]],
        )
        .unwrap()
    }

    const ON: &[&str] = &["season", "week", "game_id"];

    #[test]
    fn test_left_join_keeps_unmatched_with_nulls() {
        let merged = merge(&events(), &lines(), &JoinSpec::left(ON)).unwrap();
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.row(0).get_f64("spread_line"), Some(4.5));
        assert_eq!(merged.row(1).get("spread_line"), &Value::Null);
        assert_eq!(merged.row(2).get("spread_line"), &Value::Null);
        assert_eq!(
            merged.columns(),
            &["season", "week", "game_id", "home_team", "spread_line"]
        );
    }

    #[test]
    fn test_inner_join_drops_unmatched() {
        let merged = merge(&events(), &lines(), &JoinSpec::inner(ON)).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.row(0).get_str("home_team"), Some("KC"));
    }

    #[test]
    fn test_integral_float_keys_match() {
        let right = Table::from_rows(
            vec!["season".into(), "week".into(), "game_id".into(), "total_line".into()],
            vec![vec![json!(2023.0), json!(1.0), json!("2023_01_NYG_DAL"), json!(45.0)]],
        )
        .unwrap();
        let merged = merge(&events(), &right, &JoinSpec::inner(ON)).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.row(0).get_f64("total_line"), Some(45.0));
    }

    #[test]
    fn test_duplicate_keys_halt_the_merge() {
        let dupes = Table::concat(&[lines(), lines()]);
        let err = merge(&events(), &dupes, &JoinSpec::left(ON)).unwrap_err();
        assert!(matches!(err, NflDataError::DuplicateKey { .. }));

        let err = merge(&dupes, &lines(), &JoinSpec::left(ON)).unwrap_err();
        match err {
            NflDataError::DuplicateKey { table, key } => {
                assert_eq!(table, "left join input");
                assert_eq!(key, "(2023, 1, 2023_01_KC_DET)");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_overlapping_columns_rejected() {
        let right = lines().with_column("home_team", vec![json!("KC")]).unwrap();
        let err = merge(&events(), &right, &JoinSpec::left(ON)).unwrap_err();
        assert!(matches!(err, NflDataError::DataIntegrity { .. }));
    }

    #[test]
    fn test_missing_key_column() {
        let right = lines().drop_columns(&["week"]);
        assert!(matches!(
            merge(&events(), &right, &JoinSpec::left(ON)),
            Err(NflDataError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_null_keys_are_not_duplicates() {
        let t = Table::concat(&[events(), events().filter(|r| r.get("game_id").is_null())]);
        assert!(ensure_unique_keys(&t, ON, "events").is_ok());
    }

    #[test]
    fn test_many_to_one_keeps_repeated_left_keys() {
        let players = Table::from_rows(
            vec!["game_id".into(), "espn_id".into()],
            vec![
                vec![json!("2023_01_KC_DET"), json!("3139477")],
                vec![json!("2023_01_KC_DET"), json!("3046779")],
                vec![json!("2023_01_NYG_DAL"), json!("2577417")],
            ],
        )
        .unwrap();
        let games = Table::from_rows(
            vec!["game_id".into(), "week".into()],
            vec![vec![json!("2023_01_KC_DET"), json!(1)]],
        )
        .unwrap();

        let out = merge_many_to_one(&players, &games, &JoinSpec::inner(&["game_id"])).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.get_i64("week") == Some(1)));
        assert_eq!(out.row(1).get_str("espn_id"), Some("3046779"));

        assert!(matches!(
            merge(&players, &games, &JoinSpec::inner(&["game_id"])),
            Err(NflDataError::DuplicateKey { .. })
        ));
        let doubled = Table::concat(&[games.clone(), games]);
        assert!(matches!(
            merge_many_to_one(&players, &doubled, &JoinSpec::inner(&["game_id"])),
            Err(NflDataError::DuplicateKey { .. })
        ));
    }
}

//! Bridges between [`Table`] and polars frames for grouping, ordering, joins
//! and window computations.
//!
//! Only the columns an operation reads are handed to polars. Results come
//! back as row positions or float columns and are applied to the source
//! table, so untouched cells keep their original representation.

use crate::error::Result;
use crate::table::codec::table_to_dataframe;
use crate::table::value::{as_f64, float_opt};
use crate::table::Table;
use polars::prelude::*;
use serde_json::Value;

/// Row position column added to every frame built here.
pub(crate) const ROW_INDEX: &str = "__row";

/// Frame of `columns` (deduplicated, in order) with `numeric` read as
/// `Float64`.
pub(crate) fn frame_of(table: &Table, columns: &[&str], numeric: &[&str]) -> Result<DataFrame> {
    let mut names: Vec<&str> = Vec::with_capacity(columns.len() + numeric.len());
    for name in columns.iter().chain(numeric.iter()) {
        if !names.contains(name) {
            names.push(*name);
        }
    }
    let mut selected = table.select(&names)?;
    for name in numeric {
        selected = selected.map_column(name, |v| float_opt(as_f64(v)))?;
    }
    let mut df = table_to_dataframe(&selected)?;
    // all-null columns arrive untyped
    for name in numeric {
        let typed = df.column(name)?.cast(&DataType::Float64)?;
        df.with_column(typed)?;
    }
    Ok(df)
}

/// [`frame_of`] as a lazy frame carrying [`ROW_INDEX`].
pub(crate) fn indexed_frame(table: &Table, columns: &[&str], numeric: &[&str]) -> Result<LazyFrame> {
    Ok(frame_of(table, columns, numeric)?
        .lazy()
        .with_row_index(ROW_INDEX, None))
}

pub(crate) fn key_exprs(names: &[&str]) -> Vec<Expr> {
    names.iter().map(|n| col(*n)).collect()
}

/// Ascending, stable, nulls last.
pub(crate) fn ascending() -> SortMultipleOptions {
    SortMultipleOptions::default()
        .with_maintain_order(true)
        .with_nulls_last(true)
}

/// Row positions held in an index column; nulls mark unmatched rows.
pub(crate) fn row_positions(df: &DataFrame, name: &str) -> Result<Vec<Option<usize>>> {
    let series = df.column(name)?.as_materialized_series().cast(&DataType::Int64)?;
    Ok(series
        .i64()?
        .into_iter()
        .map(|v| v.and_then(|i| usize::try_from(i).ok()))
        .collect())
}

/// Float cells of one column.
pub(crate) fn float_cells(df: &DataFrame, name: &str) -> Result<Vec<Value>> {
    let series = df.column(name)?.as_materialized_series().cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().map(float_opt).collect())
}

/// Member rows of each group in a frame aggregated with
/// `agg([col(ROW_INDEX)])`.
pub(crate) fn group_members(df: &DataFrame) -> Result<Vec<Vec<usize>>> {
    let series = df.column(ROW_INDEX)?.as_materialized_series();
    let lists = series.list()?;
    let mut groups = Vec::with_capacity(lists.len());
    for members in lists.into_iter().flatten() {
        let members = members.cast(&DataType::Int64)?;
        groups.push(
            members
                .i64()?
                .into_iter()
                .flatten()
                .filter_map(|i| usize::try_from(i).ok())
                .collect(),
        );
    }
    Ok(groups)
}

/// Common type two join key columns are compared as.
pub(crate) fn key_dtype(left: &DataType, right: &DataType) -> DataType {
    let numeric = |d: &DataType| d.is_integer() || d.is_float();
    match (left, right) {
        (DataType::Null, DataType::Null) => DataType::String,
        (a, b) if a == b => a.clone(),
        (DataType::Null, other) | (other, DataType::Null) => other.clone(),
        (a, b) if numeric(a) && numeric(b) => DataType::Float64,
        _ => DataType::String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_dtype() {
        assert_eq!(key_dtype(&DataType::Int64, &DataType::Int64), DataType::Int64);
        assert_eq!(key_dtype(&DataType::Int64, &DataType::Float64), DataType::Float64);
        assert_eq!(key_dtype(&DataType::Null, &DataType::Int64), DataType::Int64);
        assert_eq!(key_dtype(&DataType::String, &DataType::Int64), DataType::String);
    }

    #[test]
    fn test_numeric_columns_read_as_floats() {
        let table = Table::from_rows(
            vec!["player_id".into(), "yards".into()],
            vec![vec![json!("A"), json!("12")], vec![json!("B"), json!(null)]],
        )
        .unwrap();
        let df = frame_of(&table, &["player_id"], &["yards"]).unwrap();
        assert_eq!(df.column("yards").unwrap().dtype(), &DataType::Float64);
        assert_eq!(float_cells(&df, "yards").unwrap(), vec![json!(12.0), Value::Null]);
    }
}

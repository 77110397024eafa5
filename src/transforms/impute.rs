//! Group-median imputation.

use crate::error::Result;
use crate::table::frame::{frame_of, float_cells, key_exprs};
use crate::table::value::as_f64;
use crate::table::Table;
use polars::prelude::*;
use serde_json::Value;
use tracing::debug;

/// Groups numeric gaps are filled within.
pub const IMPUTE_GROUP: &[&str] = &["season", "position_group"];

/// Fill value for missing categorical cells.
pub const UNKNOWN: &str = "unknown";

/// Median of a sample; an even count averages the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    Series::new(PlSmallStr::from_static("median"), values).median()
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Fill missing cells within each `(season, position_group)` group.
///
/// Null numeric cells take the median of the group's present values and
/// stay null when the group has none. Null or empty categorical cells become
/// `"unknown"`.
pub fn impute_group_median(table: &Table, numeric: &[&str], categorical: &[&str]) -> Result<Table> {
    impute_by(table, IMPUTE_GROUP, numeric, categorical)
}

/// [`impute_group_median`] over arbitrary group keys.
pub fn impute_by(
    table: &Table,
    group: &[&str],
    numeric: &[&str],
    categorical: &[&str],
) -> Result<Table> {
    for column in group.iter().chain(numeric).chain(categorical) {
        table.require_column(column, "imputation")?;
    }
    let mut out = table.clone();
    let mut filled = 0usize;

    if !numeric.is_empty() {
        let partition = key_exprs(group);
        let medians = frame_of(table, group, numeric)?
            .lazy()
            .select(
                numeric
                    .iter()
                    .map(|c| {
                        col(*c)
                            .fill_null(col(*c).median().over(&partition))
                            .alias(*c)
                    })
                    .collect::<Vec<_>>(),
            )
            .collect()?;
        for column in numeric {
            let idx = table.require_column(column, "imputation")?;
            let fills = float_cells(&medians, column)?;
            let values: Vec<Value> = table
                .rows()
                .iter()
                .zip(fills)
                .map(|(row, fill)| {
                    if as_f64(&row[idx]).is_some() {
                        row[idx].clone()
                    } else {
                        if !fill.is_null() {
                            filled += 1;
                        }
                        fill
                    }
                })
                .collect();
            out.set_column(column, values)?;
        }
    }

    for column in categorical {
        let idx = table.require_column(column, "imputation")?;
        let values: Vec<Value> = table
            .rows()
            .iter()
            .map(|r| {
                if is_blank(&r[idx]) {
                    filled += 1;
                    Value::String(UNKNOWN.to_string())
                } else {
                    r[idx].clone()
                }
            })
            .collect();
        out.set_column(column, values)?;
    }

    debug!(?group, filled, "imputed missing cells");
    Ok(out)
}

//! Parquet and CSV decoding/encoding through polars.

use crate::error::{NflDataError, Result};
use crate::table::value::float;
use crate::table::Table;
use polars::prelude::*;
use serde_json::Value;
use std::io::Cursor;

/// On-disk or on-the-wire encoding of a reference file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Parquet,
    Csv,
}

impl DataFormat {
    /// Pick the codec from a path or URL extension (query strings ignored).
    pub fn from_path(path: &str) -> Result<Self> {
        let clean = path.split('?').next().unwrap_or(path).to_lowercase();
        if clean.ends_with(".parquet") {
            Ok(DataFormat::Parquet)
        } else if clean.ends_with(".csv") {
            Ok(DataFormat::Csv)
        } else {
            Err(NflDataError::Config {
                message: format!("cannot infer file format from '{}'", path),
            })
        }
    }
}

pub fn decode(bytes: Vec<u8>, format: DataFormat) -> Result<Table> {
    let df = match format {
        DataFormat::Parquet => ParquetReader::new(Cursor::new(bytes)).finish()?,
        DataFormat::Csv => CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10_000))
            .map_parse_options(|opts| {
                opts.with_null_values(Some(NullValues::AllColumnsSingle("NA".into())))
            })
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?,
    };
    dataframe_to_table(&df)
}

pub fn dataframe_to_table(df: &DataFrame) -> Result<Table> {
    let columns: Vec<String> = df
        .get_columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    let height = df.height();
    let mut rows: Vec<Vec<Value>> = (0..height)
        .map(|_| Vec::with_capacity(columns.len()))
        .collect();

    for column in df.get_columns() {
        let series = column.as_materialized_series();
        let dtype = series.dtype();
        let series = if dtype.is_integer()
            || dtype.is_float()
            || matches!(dtype, DataType::Boolean | DataType::String | DataType::Null)
        {
            series.rechunk()
        } else {
            // dates, categoricals and the like are carried as their text form
            series.cast(&DataType::String)?.rechunk()
        };
        for (i, row) in rows.iter_mut().enumerate() {
            row.push(any_to_value(series.get(i)?));
        }
    }
    Table::from_rows(columns, rows)
}

fn any_to_value(av: AnyValue<'_>) -> Value {
    match av {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        AnyValue::Float32(x) => float(x as f64),
        AnyValue::Float64(x) => float(x),
        other => match other.extract::<i64>() {
            Some(i) => Value::from(i),
            None => Value::String(other.to_string()),
        },
    }
}

enum ColumnKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
}

fn column_kind(name: &str, cells: &[&Value]) -> Result<ColumnKind> {
    let mut kind = ColumnKind::Null;
    for cell in cells {
        let next = match cell {
            Value::Null => continue,
            Value::Bool(_) => ColumnKind::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => ColumnKind::Int,
            Value::Number(_) => ColumnKind::Float,
            Value::String(_) | Value::Array(_) | Value::Object(_) => ColumnKind::Str,
        };
        kind = match (kind, next) {
            (ColumnKind::Null, k) => k,
            (ColumnKind::Int, ColumnKind::Float) | (ColumnKind::Float, ColumnKind::Int) => {
                ColumnKind::Float
            }
            (ColumnKind::Int, ColumnKind::Int) => ColumnKind::Int,
            (ColumnKind::Float, ColumnKind::Float) => ColumnKind::Float,
            (ColumnKind::Bool, ColumnKind::Bool) => ColumnKind::Bool,
            (ColumnKind::Str, ColumnKind::Str) => ColumnKind::Str,
            _ => {
                return Err(NflDataError::integrity(format!(
                    "column '{}' mixes incompatible value types",
                    name
                )))
            }
        };
    }
    Ok(kind)
}

pub fn table_to_dataframe(table: &Table) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(table.columns().len());
    for (idx, name) in table.columns().iter().enumerate() {
        let cells: Vec<&Value> = table.rows().iter().map(|r| &r[idx]).collect();
        let pl_name: PlSmallStr = name.as_str().into();
        let series = match column_kind(name, &cells)? {
            ColumnKind::Null => Series::full_null(pl_name, cells.len(), &DataType::Null),
            ColumnKind::Bool => {
                let values: Vec<Option<bool>> = cells.iter().map(|v| v.as_bool()).collect();
                Series::new(pl_name, values)
            }
            ColumnKind::Int => {
                let values: Vec<Option<i64>> = cells.iter().map(|v| v.as_i64()).collect();
                Series::new(pl_name, values)
            }
            ColumnKind::Float => {
                let values: Vec<Option<f64>> = cells.iter().map(|v| v.as_f64()).collect();
                Series::new(pl_name, values)
            }
            ColumnKind::Str => {
                let values: Vec<Option<String>> = cells
                    .iter()
                    .map(|v| match v {
                        Value::Null => None,
                        Value::String(s) => Some(s.clone()),
                        other => Some(other.to_string()),
                    })
                    .collect();
                Series::new(pl_name, values)
            }
        };
        columns.push(series.into());
    }
    Ok(DataFrame::new(columns)?)
}

pub fn encode(table: &Table, format: DataFormat) -> Result<Vec<u8>> {
    let mut df = table_to_dataframe(table)?;
    let mut buf: Vec<u8> = Vec::new();
    match format {
        DataFormat::Parquet => {
            ParquetWriter::new(&mut buf).finish(&mut df)?;
        }
        DataFormat::Csv => {
            CsvWriter::new(&mut buf).include_header(true).finish(&mut df)?;
        }
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Table {
        Table::from_rows(
            vec!["player_id".into(), "week".into(), "epa".into(), "active".into()],
            vec![
                vec![json!("00-01"), json!(1), json!(0.5), json!(true)],
                vec![json!("00-02"), json!(2), Value::Null, json!(false)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DataFormat::from_path("players_components/players.parquet").unwrap(),
            DataFormat::Parquet
        );
        assert_eq!(
            DataFormat::from_path("http://example.com/games.csv?raw=1").unwrap(),
            DataFormat::Csv
        );
        assert!(DataFormat::from_path("notes.txt").is_err());
    }

    #[test]
    fn test_parquet_preserves_columns_and_nulls() {
        let table = sample();
        let bytes = encode(&table, DataFormat::Parquet).unwrap();
        let decoded = decode(bytes, DataFormat::Parquet).unwrap();
        assert_eq!(decoded.columns(), table.columns());
        assert_eq!(decoded.row(1).get("epa"), &Value::Null);
        assert_eq!(decoded.row(0).get_i64("week"), Some(1));
    }

    #[test]
    fn test_csv_decodes_na_as_null() {
        let csv = b"game_id,spread_line\n2023_01_DET_KC,NA\n2023_01_CAR_ATL,3.5\n".to_vec();
        let table = decode(csv, DataFormat::Csv).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.row(0).get("spread_line"), &Value::Null);
        assert_eq!(table.row(1).get_f64("spread_line"), Some(3.5));
    }

    #[test]
    fn test_mixed_string_and_number_column_rejected() {
        let table = Table::from_rows(
            vec!["x".into()],
            vec![vec![json!(1)], vec![json!("one")]],
        )
        .unwrap();
        assert!(matches!(
            table_to_dataframe(&table),
            Err(NflDataError::DataIntegrity { .. })
        ));
    }

    #[test]
    fn test_int_and_float_promote_to_float() {
        let table = Table::from_rows(
            vec!["x".into()],
            vec![vec![json!(1)], vec![json!(2.5)]],
        )
        .unwrap();
        let df = table_to_dataframe(&table).unwrap();
        assert_eq!(df.column("x").unwrap().dtype(), &DataType::Float64);
    }
}

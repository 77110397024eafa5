//! Output formats for finished tables.
//!
//! Formatting is pure serialization: column order and cell types come from
//! the transform stage unchanged. Requesting a column the table does not
//! have is an error rather than a silently added null column.

use crate::error::Result;
use crate::table::codec::{encode, table_to_dataframe};
use crate::table::{DataFormat, Record, Table};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The crate's own [`Table`].
    #[default]
    Table,
    /// A polars `DataFrame`.
    Frame,
    /// One JSON object per row.
    Records,
    /// A JSON array of row objects.
    Json,
    Csv,
    Parquet,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Table => "table",
            OutputFormat::Frame => "frame",
            OutputFormat::Records => "records",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "frame" | "dataframe" => Ok(OutputFormat::Frame),
            "records" => Ok(OutputFormat::Records),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "parquet" => Ok(OutputFormat::Parquet),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

/// A formatted table.
#[derive(Debug, Clone)]
pub enum Formatted {
    Table(Table),
    Frame(DataFrame),
    Records(Vec<Record>),
    Json(String),
    Csv(String),
    Parquet(Vec<u8>),
}

impl Formatted {
    /// The table, when formatted as [`OutputFormat::Table`].
    pub fn into_table(self) -> Option<Table> {
        match self {
            Formatted::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn into_records(self) -> Option<Vec<Record>> {
        match self {
            Formatted::Records(records) => Some(records),
            _ => None,
        }
    }
}

/// Serialize `table`, optionally projected onto `columns` in that order.
pub fn format_table(table: &Table, columns: Option<&[&str]>, format: OutputFormat) -> Result<Formatted> {
    let table = match columns {
        Some(columns) => table.select(columns)?,
        None => table.clone(),
    };
    Ok(match format {
        OutputFormat::Table => Formatted::Table(table),
        OutputFormat::Frame => Formatted::Frame(table_to_dataframe(&table)?),
        OutputFormat::Records => Formatted::Records(table.to_records()),
        OutputFormat::Json => Formatted::Json(serde_json::to_string(&table.to_records())?),
        OutputFormat::Csv => {
            let bytes = encode(&table, DataFormat::Csv)?;
            Formatted::Csv(String::from_utf8_lossy(&bytes).into_owned())
        }
        OutputFormat::Parquet => Formatted::Parquet(encode(&table, DataFormat::Parquet)?),
    })
}

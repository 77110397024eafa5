//! Column-ordered in-memory tables.
//!
//! Every loader returns a [`Table`] and every transform takes one and builds
//! a new one; nothing is mutated in place once a table leaves its producer.
//! Cells are `serde_json::Value` so nullability and mixed upstream types are
//! represented exactly.

pub mod codec;
pub(crate) mod frame;
pub mod value;


use crate::error::{NflDataError, Result};
use frame::{ascending, key_exprs, group_members, indexed_frame, row_positions, ROW_INDEX};
use polars::prelude::col;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use value::KeyValue;

pub use codec::DataFormat;

/// A single row keyed by column name, in column order.
pub type Record = Map<String, Value>;

static NULL: Value = Value::Null;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Borrowed view of one row.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> RowView<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cell by column name; absent columns read as null.
    pub fn get(&self, column: &str) -> &'a Value {
        match self.table.column_index(column) {
            Some(i) => &self.table.rows[self.index][i],
            None => &NULL,
        }
    }

    pub fn get_f64(&self, column: &str) -> Option<f64> {
        value::as_f64(self.get(column))
    }

    pub fn get_i64(&self, column: &str) -> Option<i64> {
        value::as_i64(self.get(column))
    }

    pub fn get_str(&self, column: &str) -> Option<&'a str> {
        value::as_str(self.get(column))
    }

    pub fn values(&self) -> &'a [Value] {
        &self.table.rows[self.index]
    }

    pub fn to_record(&self) -> Record {
        self.table
            .columns
            .iter()
            .cloned()
            .zip(self.values().iter().cloned())
            .collect()
    }
}

impl Table {
    /// Empty table with the given columns.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(NflDataError::integrity(format!(
                    "row {} has {} cells but the table has {} columns",
                    i,
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Build a table from records; columns appear in first-seen order and
    /// keys a record lacks become null.
    pub fn from_records(records: &[Record]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    /// Build a table from any serializable rows.
    pub fn from_serializable<T: serde::Serialize>(items: &[T]) -> Result<Self> {
        let mut records = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::to_value(item)? {
                Value::Object(map) => records.push(map),
                other => {
                    return Err(NflDataError::integrity(format!(
                        "expected an object row, got {}",
                        other
                    )))
                }
            }
        }
        Ok(Self::from_records(&records))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn require_column(&self, name: &str, context: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| NflDataError::missing_column(name, context))
    }

    pub fn row(&self, index: usize) -> RowView<'_> {
        RowView { table: self, index }
    }

    pub fn iter(&self) -> impl Iterator<Item = RowView<'_>> + '_ {
        (0..self.rows.len()).map(move |index| RowView { table: self, index })
    }

    /// All cells of one column.
    pub fn column(&self, name: &str) -> Result<Vec<&Value>> {
        let idx = self.require_column(name, "table")?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(NflDataError::integrity(format!(
                "row has {} cells but the table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn push_record(&mut self, record: &Record) {
        let row = self
            .columns
            .iter()
            .map(|c| record.get(c).cloned().unwrap_or(Value::Null))
            .collect();
        self.rows.push(row);
    }

    /// Project onto `columns` in the given order.
    pub fn select(&self, columns: &[&str]) -> Result<Table> {
        let indices = columns
            .iter()
            .map(|c| self.require_column(c, "table"))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.project(columns.iter().map(|c| c.to_string()).collect(), &indices))
    }

    /// Project onto the subset of `columns` that exist, keeping their order.
    pub fn select_existing(&self, columns: &[&str]) -> Table {
        let (names, indices): (Vec<String>, Vec<usize>) = columns
            .iter()
            .filter_map(|c| self.column_index(c).map(|i| (c.to_string(), i)))
            .unzip();
        self.project(names, &indices)
    }

    fn project(&self, names: Vec<String>, indices: &[usize]) -> Table {
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Table {
            columns: names,
            rows,
        }
    }

    /// Rename columns; pairs naming an absent column are ignored.
    pub fn rename(&self, pairs: &[(&str, &str)]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                pairs
                    .iter()
                    .find(|(from, _)| from == c)
                    .map(|(_, to)| to.to_string())
                    .unwrap_or_else(|| c.clone())
            })
            .collect();
        Table {
            columns,
            rows: self.rows.clone(),
        }
    }

    pub fn drop_columns(&self, columns: &[&str]) -> Table {
        let keep: Vec<&str> = self
            .columns
            .iter()
            .map(String::as_str)
            .filter(|c| !columns.contains(c))
            .collect();
        self.select_existing(&keep)
    }

    /// Replace `name` if present, otherwise append it.
    pub fn with_column(&self, name: &str, values: Vec<Value>) -> Result<Table> {
        let mut out = self.clone();
        out.set_column(name, values)?;
        Ok(out)
    }

    /// In-place form of [`Table::with_column`] for a table still being built.
    pub fn set_column(&mut self, name: &str, values: Vec<Value>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(NflDataError::integrity(format!(
                "column '{}' has {} values for {} rows",
                name,
                values.len(),
                self.rows.len()
            )));
        }
        match self.column_index(name) {
            Some(idx) => {
                for (row, v) in self.rows.iter_mut().zip(values) {
                    row[idx] = v;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, v) in self.rows.iter_mut().zip(values) {
                    row.push(v);
                }
            }
        }
        Ok(())
    }

    /// Compute a column from each row.
    pub fn derive<F>(&self, name: &str, f: F) -> Table
    where
        F: Fn(&RowView<'_>) -> Value,
    {
        let values: Vec<Value> = self.iter().map(|row| f(&row)).collect();
        let mut out = self.clone();
        match out.column_index(name) {
            Some(idx) => {
                for (row, v) in out.rows.iter_mut().zip(values) {
                    row[idx] = v;
                }
            }
            None => {
                out.columns.push(name.to_string());
                for (row, v) in out.rows.iter_mut().zip(values) {
                    row.push(v);
                }
            }
        }
        out
    }

    /// Apply `f` to every cell of an existing column.
    pub fn map_column<F>(&self, name: &str, f: F) -> Result<Table>
    where
        F: Fn(&Value) -> Value,
    {
        let idx = self.require_column(name, "table")?;
        let mut out = self.clone();
        for row in out.rows.iter_mut() {
            row[idx] = f(&row[idx]);
        }
        Ok(out)
    }

    pub fn filter<F>(&self, predicate: F) -> Table
    where
        F: Fn(&RowView<'_>) -> bool,
    {
        let rows = self
            .iter()
            .filter(|row| predicate(row))
            .map(|row| row.values().to_vec())
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Stable ascending sort on the given columns, nulls last.
    pub fn sort_by(&self, keys: &[&str]) -> Result<Table> {
        for key in keys {
            self.require_column(key, "sort keys")?;
        }
        let sorted = indexed_frame(self, keys, &[])?
            .sort_by_exprs(key_exprs(keys), ascending())
            .select([col(ROW_INDEX)])
            .collect()?;
        let order: Vec<usize> = row_positions(&sorted, ROW_INDEX)?.into_iter().flatten().collect();
        Ok(self.take(&order))
    }

    pub fn key_of(&self, row: usize, key_indices: &[usize]) -> Vec<KeyValue> {
        key_indices
            .iter()
            .map(|&i| KeyValue::from(&self.rows[row][i]))
            .collect()
    }

    /// Row indices per distinct key, groups in first-seen order.
    pub fn group_indices(&self, keys: &[&str]) -> Result<Vec<(Vec<KeyValue>, Vec<usize>)>> {
        let indices = keys
            .iter()
            .map(|k| self.require_column(k, "group keys"))
            .collect::<Result<Vec<_>>>()?;
        let grouped = indexed_frame(self, keys, &[])?
            .group_by_stable(key_exprs(keys))
            .agg([col(ROW_INDEX)])
            .collect()?;
        Ok(group_members(&grouped)?
            .into_iter()
            .filter(|rows| !rows.is_empty())
            .map(|rows| (self.key_of(rows[0], &indices), rows))
            .collect())
    }

    /// Keep the first row of every distinct key.
    pub fn unique_by(&self, keys: &[&str]) -> Result<Table> {
        let groups = self.group_indices(keys)?;
        let mut firsts: Vec<usize> = groups.iter().map(|(_, rows)| rows[0]).collect();
        firsts.sort_unstable();
        Ok(self.take(&firsts))
    }

    /// Rows at the given indices, in that order.
    pub fn take(&self, indices: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Stack tables vertically; the column set is the ordered union.
    pub fn concat(tables: &[Table]) -> Table {
        let mut columns: Vec<String> = Vec::new();
        for t in tables {
            for c in &t.columns {
                if !columns.contains(c) {
                    columns.push(c.clone());
                }
            }
        }
        let mut rows = Vec::new();
        for t in tables {
            let mapping: Vec<Option<usize>> = columns.iter().map(|c| t.column_index(c)).collect();
            for row in &t.rows {
                rows.push(
                    mapping
                        .iter()
                        .map(|m| m.map(|i| row[i].clone()).unwrap_or(Value::Null))
                        .collect(),
                );
            }
        }
        Table { columns, rows }
    }

    pub fn to_records(&self) -> Vec<Record> {
        self.iter().map(|row| row.to_record()).collect()
    }

    /// Deserialize every row into `T`.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.to_records()
            .into_iter()
            .map(|r| serde_json::from_value(Value::Object(r)).map_err(NflDataError::from))
            .collect()
    }
}

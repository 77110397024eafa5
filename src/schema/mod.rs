//! Declarative record schemas and their validation.
//!
//! A [`Schema`] is a static list of [`Field`] declarations. Validation coerces
//! loosely typed upstream cells into the declared type, fills declared
//! defaults and rejects anything it cannot reconcile with a
//! [`NflDataError::SchemaValidation`] naming the schema, field and row.

pub mod definitions;
pub mod records;


use crate::error::{NflDataError, Result};
use crate::table::{Record, Table};
use crate::transforms::join::ensure_unique_keys;
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Integer,
    Float,
    String,
    Boolean,
    /// Calendar date rendered as `YYYY-MM-DD`.
    Date,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
        };
        write!(f, "{}", s)
    }
}

/// Value substituted when a field is null or absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Int(i64),
    Float(f64),
    Str(&'static str),
    Bool(bool),
}

impl DefaultValue {
    fn to_value(self) -> Value {
        match self {
            DefaultValue::Int(i) => Value::from(i),
            DefaultValue::Float(x) => crate::table::value::float(x),
            DefaultValue::Str(s) => Value::String(s.to_string()),
            DefaultValue::Bool(b) => Value::Bool(b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub dtype: FieldType,
    pub required: bool,
    pub description: &'static str,
    pub allowed: Option<&'static [&'static str]>,
    pub range: Option<(f64, f64)>,
    pub default: Option<DefaultValue>,
}

impl Field {
    pub const fn required(name: &'static str, dtype: FieldType, description: &'static str) -> Self {
        Self {
            name,
            dtype,
            required: true,
            description,
            allowed: None,
            range: None,
            default: None,
        }
    }

    pub const fn optional(name: &'static str, dtype: FieldType, description: &'static str) -> Self {
        Self {
            name,
            dtype,
            required: false,
            description,
            allowed: None,
            range: None,
            default: None,
        }
    }

    pub const fn one_of(self, allowed: &'static [&'static str]) -> Self {
        Self {
            allowed: Some(allowed),
            ..self
        }
    }

    pub const fn within(self, min: f64, max: f64) -> Self {
        Self {
            range: Some((min, max)),
            ..self
        }
    }

    pub const fn or_default(self, default: DefaultValue) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    fn reject(&self, schema: &Schema, row: Option<usize>, detail: String) -> NflDataError {
        NflDataError::SchemaValidation {
            schema: schema.name.to_string(),
            field: self.name.to_string(),
            expected: self.dtype.to_string(),
            row,
            detail,
        }
    }

    /// Coerce and check one cell. Returns the canonical value.
    fn check(&self, schema: &Schema, row: Option<usize>, raw: Option<&Value>) -> Result<Value> {
        let present = match raw {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        };
        let value = match present {
            None => {
                if let Some(default) = self.default {
                    return Ok(default.to_value());
                }
                if self.required {
                    return Err(self.reject(schema, row, "required field is missing".to_string()));
                }
                return Ok(Value::Null);
            }
            Some(v) => v,
        };

        let coerced = coerce(self.dtype, value).ok_or_else(|| {
            self.reject(schema, row, format!("cannot read {} as {}", value, self.dtype))
        })?;

        if let (Some(allowed), Value::String(s)) = (self.allowed, &coerced) {
            if !allowed.contains(&s.as_str()) {
                return Err(self.reject(
                    schema,
                    row,
                    format!("value '{}' is not an allowed value", s),
                ));
            }
        }
        if let (Some((min, max)), Some(x)) = (self.range, coerced.as_f64()) {
            if x < min || x > max {
                return Err(self.reject(
                    schema,
                    row,
                    format!("value {} outside [{}, {}]", x, min, max),
                ));
            }
        }
        Ok(coerced)
    }
}

fn coerce(dtype: FieldType, value: &Value) -> Option<Value> {
    match dtype {
        FieldType::Integer => crate::table::value::as_i64(value).map(Value::from),
        FieldType::Float => match value {
            Value::Number(_) => Some(value.clone()),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .map(crate::table::value::float)
                .filter(|v| !v.is_null()),
            _ => None,
        },
        FieldType::String => match value {
            Value::String(_) => Some(value.clone()),
            Value::Number(n) => Some(Value::String(n.to_string())),
            _ => None,
        },
        FieldType::Boolean => match value {
            Value::Bool(_) => Some(value.clone()),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Some(Value::Bool(false)),
                Some(1) => Some(Value::Bool(true)),
                _ => None,
            },
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "1" => Some(Value::Bool(true)),
                "false" | "0" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        },
        FieldType::Date => match value {
            Value::String(s) => {
                let head = s.trim().get(..10)?;
                NaiveDate::parse_from_str(head, "%Y-%m-%d")
                    .ok()
                    .map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
            }
            _ => None,
        },
    }
}

/// A versioned record declaration.
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    /// Fields inherited ahead of this schema's own.
    pub base: Option<&'static Schema>,
    /// Columns that identify a row; must be unique within a table.
    pub key: &'static [&'static str],
    pub fields: &'static [Field],
}

impl Schema {
    /// Base fields first; a field redeclared here replaces the inherited one.
    pub fn all_fields(&self) -> Vec<&Field> {
        let mut fields: Vec<&Field> = match self.base {
            Some(base) => base.all_fields(),
            None => Vec::new(),
        };
        for field in self.fields {
            match fields.iter().position(|f| f.name == field.name) {
                Some(i) => fields[i] = field,
                None => fields.push(field),
            }
        }
        fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.all_fields().into_iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.all_fields().iter().map(|f| f.name).collect()
    }

    /// Validate one record.
    ///
    /// Declared fields are coerced in place and defaults filled; undeclared
    /// keys pass through untouched. An already canonical record comes back
    /// equal to the input.
    pub fn validate_record(&self, record: &Record) -> Result<Record> {
        let mut out = record.clone();
        for field in self.all_fields() {
            let value = field.check(self, None, record.get(field.name))?;
            if record.contains_key(field.name) || !value.is_null() {
                out.insert(field.name.to_string(), value);
            }
        }
        Ok(out)
    }

    /// Validate every row of a table and check key uniqueness.
    ///
    /// Declared fields absent from the table are appended (default or null)
    /// unless required, which fails before any row is read.
    pub fn validate_table(&self, table: &Table) -> Result<Table> {
        let fields = self.all_fields();
        for field in &fields {
            if field.required && field.default.is_none() && !table.has_column(field.name) {
                return Err(field.reject(self, None, "required column is missing".to_string()));
            }
        }

        let mut out = table.clone();
        for field in &fields {
            let values = match table.column_index(field.name) {
                Some(idx) => table
                    .rows()
                    .iter()
                    .enumerate()
                    .map(|(i, row)| field.check(self, Some(i), Some(&row[idx])))
                    .collect::<Result<Vec<Value>>>()?,
                None => (0..table.len())
                    .map(|i| field.check(self, Some(i), None))
                    .collect::<Result<Vec<Value>>>()?,
            };
            out.set_column(field.name, values)?;
        }

        self.check_unique_key(&out)?;
        Ok(out)
    }

    fn check_unique_key(&self, table: &Table) -> Result<()> {
        if self.key.is_empty() {
            return Ok(());
        }
        ensure_unique_keys(table, self.key, self.name)
    }

    /// Serializable description of the schema.
    pub fn describe(&self) -> SchemaDoc {
        SchemaDoc {
            name: self.name,
            version: self.version,
            description: self.description,
            extends: self.base.map(|b| b.name),
            key: self.key.to_vec(),
            fields: self
                .all_fields()
                .into_iter()
                .map(|f| FieldDoc {
                    name: f.name,
                    dtype: f.dtype,
                    required: f.required,
                    description: f.description,
                    allowed: f.allowed.map(|a| a.to_vec()),
                    range: f.range,
                    default: f.default,
                })
                .collect(),
        }
    }

    /// Render the schema as a markdown section.
    pub fn to_markdown(&self) -> String {
        let mut out = format!("## {} (v{})\n\n{}\n\n", self.name, self.version, self.description);
        if let Some(base) = self.base {
            out.push_str(&format!("Extends `{}`.\n\n", base.name));
        }
        if !self.key.is_empty() {
            out.push_str(&format!("Key: `{}`\n\n", self.key.join(", ")));
        }
        out.push_str("| field | type | required | description |\n");
        out.push_str("|---|---|---|---|\n");
        for f in self.all_fields() {
            let mut description = f.description.to_string();
            if let Some(allowed) = f.allowed {
                description.push_str(&format!(" One of: {}.", allowed.join(", ")));
            }
            if let Some((min, max)) = f.range {
                description.push_str(&format!(" Range [{}, {}].", min, max));
            }
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                f.name,
                f.dtype,
                if f.required { "yes" } else { "no" },
                description.trim()
            ));
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub struct SchemaDoc {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub extends: Option<&'static str>,
    pub key: Vec<&'static str>,
    pub fields: Vec<FieldDoc>,
}

#[derive(Debug, Serialize)]
pub struct FieldDoc {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub dtype: FieldType,
    pub required: bool,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
}

/// Render every registered schema as one markdown document.
pub fn catalogue_markdown() -> String {
    definitions::ALL
        .iter()
        .map(|s| s.to_markdown())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn schema_by_name(name: &str) -> Option<&'static Schema> {
    definitions::ALL.iter().copied().find(|s| s.name == name)
}

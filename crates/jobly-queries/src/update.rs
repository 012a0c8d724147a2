//! Partial update builder
//!
//! Turns the fields a caller actually supplied into a `SET` clause:
//!
//! ```text
//! {firstName: "Aliya", age: 32}  =>  "first_name"=$1, "age"=$2   ["Aliya", 32]
//! ```
//!
//! Placeholder positions follow insertion order, so `values[i]` is always
//! bound to `$i+1`.

use jobly_core::{JoblyError, JoblyResult};

use crate::value::SqlValue;

/// Logical field name to physical column name lookup.
///
/// Fields missing from the map are used as column names verbatim.
pub type ColumnMap<'a> = &'a [(&'a str, &'a str)];

/// Ordered set of field assignments for a partial update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSet {
    fields: Vec<(String, SqlValue)>,
}

impl UpdateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a field (builder pattern). Re-assigning a field keeps its
    /// original position and replaces the value.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Assign a field only when a value is present
    pub fn set_opt<T: Into<SqlValue>>(self, field: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(value) => self.set(field, value),
            None => self,
        }
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<SqlValue>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Output of [`build_set_clause`]
#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    /// Comma separated `"column"=$n` assignments
    pub set_cols: String,
    /// Values in placeholder order
    pub values: Vec<SqlValue>,
}

impl SetClause {
    /// Placeholder for the first parameter after the SET values,
    /// e.g. the key in `WHERE handle = $n`.
    pub fn next_placeholder(&self) -> String {
        format!("${}", self.values.len() + 1)
    }
}

/// Resolve a logical field name through the column map
pub fn resolve_column<'a>(field: &'a str, js_to_sql: ColumnMap<'a>) -> &'a str {
    js_to_sql
        .iter()
        .find(|(logical, _)| *logical == field)
        .map(|(_, column)| *column)
        .unwrap_or(field)
}

/// Build the `SET` clause for a partial update.
///
/// Fails with `BadRequest("No data")` when `updates` is empty.
pub fn build_set_clause(updates: &UpdateSet, js_to_sql: ColumnMap<'_>) -> JoblyResult<SetClause> {
    if updates.is_empty() {
        return Err(JoblyError::bad_request("No data"));
    }

    let mut cols = Vec::with_capacity(updates.len());
    let mut values = Vec::with_capacity(updates.len());

    for (idx, (field, value)) in updates.iter().enumerate() {
        cols.push(format!("\"{}\"=${}", resolve_column(field, js_to_sql), idx + 1));
        values.push(value.clone());
    }

    Ok(SetClause {
        set_cols: cols.join(", "),
        values,
    })
}

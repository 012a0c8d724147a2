//! Bound parameter values
//!
//! Values never appear inside generated SQL text; they travel alongside it
//! and are bound to `$n` placeholders by the executor.

use serde::Serialize;

/// Parameter for prepared statements
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Int(i32),
    BigInt(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Null,
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::BigInt(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(SqlValue::from(54), SqlValue::Int(54));
        assert_eq!(SqlValue::from(7_i64), SqlValue::BigInt(7));
        assert_eq!(SqlValue::from("bob"), SqlValue::Text("bob".into()));
        assert_eq!(SqlValue::from(None::<i32>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(0.5)), SqlValue::Float(0.5));
    }

    #[test]
    fn test_serializes_as_plain_json() {
        let values = vec![SqlValue::from(1), SqlValue::from("x"), SqlValue::Null];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[1,"x",null]"#);
    }
}

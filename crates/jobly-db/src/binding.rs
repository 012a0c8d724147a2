//! Binding builder output onto SQLx queries

use jobly_queries::SqlValue;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::{Query, QueryAs};

/// Bind [`SqlValue`]s to a query's placeholders in order
pub trait BindValues<'q>: Sized {
    fn bind_value(self, value: &'q SqlValue) -> Self;

    fn bind_values(self, values: &'q [SqlValue]) -> Self {
        values.iter().fold(self, Self::bind_value)
    }
}

impl<'q, O> BindValues<'q> for QueryAs<'q, Postgres, O, PgArguments> {
    fn bind_value(self, value: &'q SqlValue) -> Self {
        match value {
            SqlValue::Int(v) => self.bind(*v),
            SqlValue::BigInt(v) => self.bind(*v),
            SqlValue::Float(v) => self.bind(*v),
            SqlValue::Text(v) => self.bind(v.as_str()),
            SqlValue::Bool(v) => self.bind(*v),
            SqlValue::Null => self.bind(None::<String>),
        }
    }
}

impl<'q> BindValues<'q> for Query<'q, Postgres, PgArguments> {
    fn bind_value(self, value: &'q SqlValue) -> Self {
        match value {
            SqlValue::Int(v) => self.bind(*v),
            SqlValue::BigInt(v) => self.bind(*v),
            SqlValue::Float(v) => self.bind(*v),
            SqlValue::Text(v) => self.bind(v.as_str()),
            SqlValue::Bool(v) => self.bind(*v),
            SqlValue::Null => self.bind(None::<String>),
        }
    }
}

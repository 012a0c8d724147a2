//! # jobly-queries
//!
//! Query builders for Jobly.
//!
//! Everything in this crate is a pure transformation: optional fields go in,
//! a SQL string with positional placeholders and a parallel list of bound
//! values comes out. No I/O happens here; the repositories in `jobly-db`
//! execute the result.
//!
//! ## Structure
//!
//! - `value` - Bound parameter values
//! - `update` - `SET` clause builder for partial updates
//! - `filters` - Descriptor-driven `WHERE` clause builder
//! - `query` - Per-entity `SELECT` statements built on the filters
//! - `companies`, `jobs`, `users` - Entity descriptors and column maps
//!
//! ## Example
//!
//! ```
//! use jobly_queries::jobs::{self, JobFilter};
//! use jobly_queries::update::{build_set_clause, UpdateSet};
//!
//! let query = jobs::filtered_query(&JobFilter {
//!     min_salary: Some(30000),
//!     ..Default::default()
//! })
//! .unwrap();
//! assert!(query.sql.contains("WHERE salary >= $1"));
//!
//! let updates = UpdateSet::new().set("numEmployees", 54);
//! let clause = build_set_clause(&updates, &[("numEmployees", "num_employees")]).unwrap();
//! assert_eq!(clause.set_cols, r#""num_employees"=$1"#);
//! ```

pub mod companies;
pub mod filters;
pub mod jobs;
pub mod query;
pub mod update;
pub mod users;
pub mod value;

// Re-exports for convenience
pub use filters::{build_filter_clause, Criteria, FilterField, FilterOperator, FilterValue, WhereClause};
pub use query::{EntityQuery, SelectQuery};
pub use update::{build_set_clause, ColumnMap, SetClause, UpdateSet};
pub use value::SqlValue;

//! Entity SELECT statements
//!
//! Combines an entity's fixed projection with the filter clause builder.

use jobly_core::JoblyResult;

use crate::filters::{build_filter_clause, Criteria, FilterField};
use crate::value::SqlValue;

/// Static description of a searchable table
#[derive(Debug, Clone, Copy)]
pub struct EntityQuery {
    pub table: &'static str,
    /// Comma separated projection
    pub columns: &'static str,
    pub order_by: &'static str,
    pub filters: &'static [FilterField],
}

/// SQL text plus values for its placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

impl EntityQuery {
    /// Unfiltered listing with the fixed projection
    pub fn select_all(&self) -> SelectQuery {
        SelectQuery {
            sql: format!(
                "SELECT {} FROM {} ORDER BY {}",
                self.columns, self.table, self.order_by
            ),
            values: Vec::new(),
        }
    }

    /// Filtered listing, or `None` when no criterion applies
    pub fn select_filtered(&self, criteria: &Criteria) -> JoblyResult<Option<SelectQuery>> {
        let Some(clause) = build_filter_clause(self.filters, criteria)? else {
            return Ok(None);
        };

        Ok(Some(SelectQuery {
            sql: format!(
                "SELECT {} FROM {} WHERE {} ORDER BY {}",
                self.columns,
                self.table,
                clause.sql(),
                self.order_by
            ),
            values: clause.values,
        }))
    }

    /// Filtered listing falling back to the full scan
    pub fn select(&self, criteria: &Criteria) -> JoblyResult<SelectQuery> {
        Ok(self
            .select_filtered(criteria)?
            .unwrap_or_else(|| self.select_all()))
    }
}

//! Job search and update descriptors

use jobly_core::JoblyResult;

use crate::filters::{Criteria, FilterField};
use crate::query::{EntityQuery, SelectQuery};
use crate::update::ColumnMap;

pub const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

pub const JOB_FILTERS: &[FilterField] = &[
    FilterField::contains("title", "title"),
    FilterField::at_least("minSalary", "salary"),
    FilterField::positive("hasEquity", "equity"),
];

pub const JOBS: EntityQuery = EntityQuery {
    table: "jobs",
    columns: JOB_COLUMNS,
    order_by: "title",
    filters: JOB_FILTERS,
};

pub const JOB_COLUMN_MAP: ColumnMap<'static> = &[("companyHandle", "company_handle")];

/// Job search criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Case-insensitive substring of the job title
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    /// `Some(true)` limits results to jobs with non-zero equity;
    /// `Some(false)` and `None` do not filter
    pub has_equity: Option<bool>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.min_salary.is_none() && self.has_equity.is_none()
    }

    pub fn to_criteria(&self) -> Criteria {
        Criteria::new()
            .with_opt("title", self.title.clone())
            .with_opt("minSalary", self.min_salary)
            .with_opt("hasEquity", self.has_equity)
    }
}

/// Listing query for the given criteria (full scan when none apply)
pub fn filtered_query(filter: &JobFilter) -> JoblyResult<SelectQuery> {
    JOBS.select(&filter.to_criteria())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SqlValue;

    #[test]
    fn test_min_salary() {
        let query = filtered_query(&JobFilter {
            min_salary: Some(30000),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            query.sql,
            "SELECT id, title, salary, equity, company_handle FROM jobs \
             WHERE salary >= $1 ORDER BY title"
        );
        assert_eq!(query.values, vec![SqlValue::BigInt(30000)]);
    }

    #[test]
    fn test_has_equity_false_is_not_a_filter() {
        let query = filtered_query(&JobFilter {
            has_equity: Some(false),
            ..Default::default()
        })
        .unwrap();

        assert!(!query.sql.contains("WHERE"));
        assert!(!query.sql.contains("equity >"));
    }

    #[test]
    fn test_has_equity_true() {
        let query = filtered_query(&JobFilter {
            has_equity: Some(true),
            ..Default::default()
        })
        .unwrap();

        assert!(query.sql.contains("WHERE equity > 0 ORDER BY title"));
        assert!(query.values.is_empty());
    }

    #[test]
    fn test_title_and_min_salary() {
        let query = filtered_query(&JobFilter {
            title: Some("c2Job".into()),
            min_salary: Some(20000),
            has_equity: None,
        })
        .unwrap();

        assert!(query.sql.contains("WHERE title ILIKE $1 AND salary >= $2"));
        assert_eq!(
            query.values,
            vec![SqlValue::Text("%c2Job%".into()), SqlValue::BigInt(20000)]
        );
    }

    #[test]
    fn test_min_salary_and_has_equity() {
        let query = filtered_query(&JobFilter {
            title: None,
            min_salary: Some(130000),
            has_equity: Some(true),
        })
        .unwrap();

        assert!(query.sql.contains("WHERE salary >= $1 AND equity > 0"));
        assert_eq!(query.values, vec![SqlValue::BigInt(130000)]);
    }

    #[test]
    fn test_no_filter_is_full_scan() {
        let query = filtered_query(&JobFilter::default()).unwrap();
        assert_eq!(
            query.sql,
            "SELECT id, title, salary, equity, company_handle FROM jobs ORDER BY title"
        );
    }
}

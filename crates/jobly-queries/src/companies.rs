//! Company search and update descriptors

use jobly_core::{JoblyError, JoblyResult};

use crate::filters::{Criteria, FilterField};
use crate::query::{EntityQuery, SelectQuery};
use crate::update::ColumnMap;

pub const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

pub const COMPANY_FILTERS: &[FilterField] = &[
    FilterField::contains("name", "name"),
    FilterField::at_least("minEmployees", "num_employees"),
    FilterField::at_most("maxEmployees", "num_employees"),
];

pub const COMPANIES: EntityQuery = EntityQuery {
    table: "companies",
    columns: COMPANY_COLUMNS,
    order_by: "name",
    filters: COMPANY_FILTERS,
};

pub const COMPANY_COLUMN_MAP: ColumnMap<'static> =
    &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")];

/// Company search criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyFilter {
    /// Case-insensitive substring of the company name
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.min_employees.is_none() && self.max_employees.is_none()
    }

    /// Reject contradictory bounds
    pub fn validate(&self) -> JoblyResult<()> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(JoblyError::bad_request(
                    "minEmployees cannot be greater than maxEmployees",
                ));
            }
        }
        Ok(())
    }

    pub fn to_criteria(&self) -> Criteria {
        Criteria::new()
            .with_opt("name", self.name.clone())
            .with_opt("minEmployees", self.min_employees)
            .with_opt("maxEmployees", self.max_employees)
    }
}

/// Listing query for the given criteria (full scan when none are set)
pub fn filtered_query(filter: &CompanyFilter) -> JoblyResult<SelectQuery> {
    filter.validate()?;
    COMPANIES.select(&filter.to_criteria())
}

//! Filter clause builder
//!
//! Each searchable entity declares its criteria as a table of
//! [`FilterField`] descriptors. A search request supplies any subset of
//! those criteria; only the supplied ones contribute a condition, and the
//! conditions are combined with `AND` in descriptor order.
//!
//! All values are bound through `$n` placeholders.

use jobly_core::{JoblyError, JoblyResult};

use crate::value::SqlValue;

/// Comparison applied by a filter criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Case-insensitive substring match (`ILIKE '%value%'`)
    Contains,
    /// Lower bound (`>=`)
    AtLeast,
    /// Upper bound (`<=`)
    AtMost,
    /// Flag: when set, the column must be strictly positive (`> 0`)
    Positive,
}

/// Declarative description of one search criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    /// Criterion name as supplied by callers (e.g. `minEmployees`)
    pub key: &'static str,
    /// Column the condition applies to
    pub column: &'static str,
    pub operator: FilterOperator,
}

impl FilterField {
    pub const fn new(key: &'static str, column: &'static str, operator: FilterOperator) -> Self {
        Self {
            key,
            column,
            operator,
        }
    }

    pub const fn contains(key: &'static str, column: &'static str) -> Self {
        Self::new(key, column, FilterOperator::Contains)
    }

    pub const fn at_least(key: &'static str, column: &'static str) -> Self {
        Self::new(key, column, FilterOperator::AtLeast)
    }

    pub const fn at_most(key: &'static str, column: &'static str) -> Self {
        Self::new(key, column, FilterOperator::AtMost)
    }

    pub const fn positive(key: &'static str, column: &'static str) -> Self {
        Self::new(key, column, FilterOperator::Positive)
    }
}

/// A supplied criterion value
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Flag(bool),
}

impl FilterValue {
    fn kind(&self) -> &'static str {
        match self {
            FilterValue::Text(_) => "text",
            FilterValue::Integer(_) => "integer",
            FilterValue::Flag(_) => "boolean",
        }
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Integer(value.into())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Flag(value)
    }
}

/// The criteria supplied for one search. Absent criteria are simply not
/// in the set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    values: Vec<(String, FilterValue)>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a criterion (builder pattern)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a criterion only when present
    pub fn with_opt<T: Into<FilterValue>>(self, key: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        let key = key.into();
        let value = value.into();
        match self.values.iter_mut().find(|(name, _)| *name == key) {
            Some(entry) => entry.1 = value,
            None => self.values.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.values
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Conditions and their bound values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    pub conditions: Vec<String>,
    pub values: Vec<SqlValue>,
}

impl WhereClause {
    /// Conditions joined with `AND` (without the `WHERE` keyword)
    pub fn sql(&self) -> String {
        self.conditions.join(" AND ")
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    fn push_bound(&mut self, column: &str, operator: &str, value: SqlValue) {
        self.values.push(value);
        self.conditions
            .push(format!("{} {} ${}", column, operator, self.values.len()));
    }
}

/// Build the conditions for the supplied criteria.
///
/// Returns `Ok(None)` when no criterion contributes a condition, in which
/// case the caller should run its unfiltered query. Keys not described by
/// `fields` are ignored. A value of the wrong kind for its operator is a
/// `BadRequest`.
pub fn build_filter_clause(fields: &[FilterField], criteria: &Criteria) -> JoblyResult<Option<WhereClause>> {
    let mut clause = WhereClause::default();

    for field in fields {
        let Some(value) = criteria.get(field.key) else {
            continue;
        };

        match (field.operator, value) {
            (FilterOperator::Contains, FilterValue::Text(text)) => {
                clause.push_bound(field.column, "ILIKE", SqlValue::Text(format!("%{}%", escape_like(text))));
            }
            (FilterOperator::AtLeast, FilterValue::Integer(n)) => {
                clause.push_bound(field.column, ">=", SqlValue::BigInt(*n));
            }
            (FilterOperator::AtMost, FilterValue::Integer(n)) => {
                clause.push_bound(field.column, "<=", SqlValue::BigInt(*n));
            }
            (FilterOperator::Positive, FilterValue::Flag(true)) => {
                clause.conditions.push(format!("{} > 0", field.column));
            }
            (FilterOperator::Positive, FilterValue::Flag(false)) => {}
            (operator, value) => {
                return Err(JoblyError::bad_request(format!(
                    "{} does not accept a {} value for {:?}",
                    field.key,
                    value.kind(),
                    operator
                )));
            }
        }
    }

    if clause.is_empty() {
        Ok(None)
    } else {
        Ok(Some(clause))
    }
}

/// Escape string for LIKE patterns
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FilterField] = &[
        FilterField::contains("name", "name"),
        FilterField::at_least("minEmployees", "num_employees"),
        FilterField::at_most("maxEmployees", "num_employees"),
        FilterField::positive("hasEquity", "equity"),
    ];

    #[test]
    fn test_single_criterion_has_no_and() {
        let clause = build_filter_clause(FIELDS, &Criteria::new().with("name", "bob"))
            .unwrap()
            .unwrap();

        assert_eq!(clause.sql(), "name ILIKE $1");
        assert_eq!(clause.values, vec![SqlValue::Text("%bob%".into())]);
    }

    #[test]
    fn test_conditions_follow_descriptor_order() {
        let criteria = Criteria::new()
            .with("maxEmployees", 910)
            .with("minEmployees", 240)
            .with("name", "facebook");
        let clause = build_filter_clause(FIELDS, &criteria).unwrap().unwrap();

        assert_eq!(
            clause.sql(),
            "name ILIKE $1 AND num_employees >= $2 AND num_employees <= $3"
        );
        assert_eq!(
            clause.values,
            vec![
                SqlValue::Text("%facebook%".into()),
                SqlValue::BigInt(240),
                SqlValue::BigInt(910),
            ]
        );
    }

    #[test]
    fn test_two_criteria() {
        let criteria = Criteria::new().with("minEmployees", 60).with("maxEmployees", 900);
        let clause = build_filter_clause(FIELDS, &criteria).unwrap().unwrap();

        assert_eq!(clause.sql(), "num_employees >= $1 AND num_employees <= $2");
        assert_eq!(clause.conditions.len(), 2);
    }

    #[test]
    fn test_no_criteria_yields_none() {
        assert_eq!(build_filter_clause(FIELDS, &Criteria::new()).unwrap(), None);
    }

    #[test]
    fn test_flag_only_applies_when_true() {
        let off = Criteria::new().with("hasEquity", false);
        assert_eq!(build_filter_clause(FIELDS, &off).unwrap(), None);

        let on = Criteria::new().with("hasEquity", true);
        let clause = build_filter_clause(FIELDS, &on).unwrap().unwrap();
        assert_eq!(clause.sql(), "equity > 0");
        assert!(clause.values.is_empty());
    }

    #[test]
    fn test_flag_does_not_shift_placeholders() {
        let criteria = Criteria::new().with("hasEquity", true).with("minEmployees", 5);
        let clause = build_filter_clause(FIELDS, &criteria).unwrap().unwrap();

        assert_eq!(clause.sql(), "num_employees >= $1 AND equity > 0");
        assert_eq!(clause.values, vec![SqlValue::BigInt(5)]);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let criteria = Criteria::new().with("color", "blue");
        assert_eq!(build_filter_clause(FIELDS, &criteria).unwrap(), None);

        let criteria = Criteria::new().with("color", "blue").with("name", "net");
        let clause = build_filter_clause(FIELDS, &criteria).unwrap().unwrap();
        assert_eq!(clause.sql(), "name ILIKE $1");
    }

    #[test]
    fn test_wrong_value_kind_is_bad_request() {
        let criteria = Criteria::new().with("minEmployees", "many");
        let err = build_filter_clause(FIELDS, &criteria).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("minEmployees"));
    }

    #[test]
    fn test_text_is_bound_not_interpolated() {
        let criteria = Criteria::new().with("name", "x' OR '1'='1");
        let clause = build_filter_clause(FIELDS, &criteria).unwrap().unwrap();

        assert_eq!(clause.sql(), "name ILIKE $1");
        assert_eq!(clause.values, vec![SqlValue::Text("%x' OR '1'='1%".into())]);
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("test"), "test");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\dir"), "c:\\\\dir");
    }

    #[test]
    fn test_criteria_reinsert_replaces_value() {
        let criteria = Criteria::new().with("name", "a").with("name", "b");
        assert_eq!(criteria.len(), 1);
        assert_eq!(criteria.get("name"), Some(&FilterValue::Text("b".into())));
    }
}

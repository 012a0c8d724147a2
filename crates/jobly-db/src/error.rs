//! Integrity constraint violations
//!
//! Duplicate checks run before each insert, but a concurrent request can
//! still win the race. PostgreSQL then rejects the statement, and the
//! repositories turn that rejection back into a client error.

/// Constraint a statement ran into
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Violation {
    Unique { constraint: Option<String> },
    ForeignKey { constraint: Option<String> },
}

impl Violation {
    /// Classify a failed statement; `None` for anything that is not a
    /// unique or foreign key violation.
    pub(crate) fn of(err: &sqlx::Error) -> Option<Self> {
        let sqlx::Error::Database(db) = err else {
            return None;
        };
        let constraint = db.constraint().map(str::to_string);

        if db.is_unique_violation() {
            Some(Violation::Unique { constraint })
        } else if db.is_foreign_key_violation() {
            Some(Violation::ForeignKey { constraint })
        } else {
            None
        }
    }

    pub(crate) fn constraint(&self) -> Option<&str> {
        match self {
            Violation::Unique { constraint } | Violation::ForeignKey { constraint } => {
                constraint.as_deref()
            }
        }
    }
}

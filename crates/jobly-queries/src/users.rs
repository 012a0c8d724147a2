//! User update descriptors

use crate::update::ColumnMap;

/// Public user columns (the password hash is never selected here)
pub const USER_COLUMNS: &str = "username, first_name, last_name, email, is_admin";

pub const USER_COLUMN_MAP: ColumnMap<'static> = &[
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("isAdmin", "is_admin"),
];

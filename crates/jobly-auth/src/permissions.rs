//! Request identity and authorization guards

use jobly_core::{JoblyError, JoblyResult};

use crate::jwt::Claims;

/// The user a request is made on behalf of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: String,
    pub is_admin: bool,
}

impl CurrentUser {
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            username: username.into(),
            is_admin,
        }
    }

    /// Check if this user may act on `username`'s resources
    pub fn can_manage(&self, username: &str) -> bool {
        self.is_admin || self.username == username
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            is_admin: claims.is_admin,
        }
    }
}

/// Require any logged in user
pub fn ensure_logged_in(user: Option<&CurrentUser>) -> JoblyResult<&CurrentUser> {
    user.ok_or_else(|| JoblyError::unauthorized("Unauthorized"))
}

/// Require a logged in admin
pub fn ensure_admin(user: Option<&CurrentUser>) -> JoblyResult<&CurrentUser> {
    let user = ensure_logged_in(user)?;
    if user.is_admin {
        Ok(user)
    } else {
        Err(JoblyError::unauthorized("Unauthorized"))
    }
}

/// Require the user named in the route, or an admin
pub fn ensure_correct_user_or_admin<'a>(
    user: Option<&'a CurrentUser>,
    username: &str,
) -> JoblyResult<&'a CurrentUser> {
    let user = ensure_logged_in(user)?;
    if user.can_manage(username) {
        Ok(user)
    } else {
        Err(JoblyError::unauthorized("Unauthorized"))
    }
}

//! # jobly-auth
//!
//! Authentication and authorization for Jobly.
//!
//! ## Features
//!
//! - JWT issuing and validation
//! - Argon2 password hashing
//! - Current-user guards (logged in, admin, correct user or admin)

pub mod jwt;
pub mod password;
pub mod permissions;

pub use jwt::{extract_bearer_token, Claims, JwtError, JwtService};
pub use password::{hash_password, verify_password};
pub use permissions::CurrentUser;

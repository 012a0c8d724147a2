//! # jobly-api
//!
//! REST API handlers for Jobly.
//!
//! JSON in and out, camelCase field names, and a single error body shape:
//!
//! ```json
//! { "error": { "message": "No data", "status": 400 } }
//! ```

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use extractors::AppState;
pub use routes::router;

//! # jobly-db
//!
//! Database layer for Jobly.
//!
//! This crate provides PostgreSQL database access using SQLx, including:
//!
//! - Connection pool management and migrations
//! - Repositories for companies, jobs, and users
//! - Execution of the statements built by `jobly-queries`
//!
//! ## Example
//!
//! ```ignore
//! use jobly_core::config::AppConfig;
//! use jobly_db::{CompanyRepository, Database};
//! use jobly_queries::companies::CompanyFilter;
//!
//! let config = AppConfig::from_env()?;
//! let db = Database::connect(&config.database).await?;
//!
//! let repo = CompanyRepository::new(db.pool().clone());
//! let companies = repo.find_all(&CompanyFilter::default()).await?;
//! ```

pub mod binding;
pub mod companies;
mod error;
pub mod jobs;
pub mod pool;
pub mod users;

// Re-exports
pub use binding::BindValues;
pub use companies::{CompanyDetail, CompanyJob, CompanyRepository, CompanyRow, CompanyUpdate, NewCompany};
pub use jobs::{JobRepository, JobRow, JobUpdate, NewJob};
pub use pool::{Database, PoolStats};
pub use users::{NewUser, UserDetail, UserRepository, UserRow, UserUpdate};

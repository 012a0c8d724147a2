//! # jobly-core
//!
//! Core types and utilities for Jobly.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - The shared error type and result alias
//! - The job primary key type
//! - Configuration types

pub mod config;
pub mod error;
pub mod types;

pub use error::*;
pub use types::*;

//! Primary key types shared across crates

/// Job primary key (`jobs.id SERIAL`)
pub type JobId = i32;

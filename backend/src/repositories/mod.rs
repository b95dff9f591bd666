//! Persistence boundary for credential records.

pub mod user_repository;

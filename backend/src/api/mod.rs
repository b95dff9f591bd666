//! HTTP-facing helpers and non-auth routes.

pub mod common;
pub mod health;

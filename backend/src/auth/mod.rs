//! Authentication module for verifying credentials and issuing sessions.
//!
//! This module provides the public interface for login, the bearer-token
//! middleware consumed by protected routes, and the HTTP routes that expose
//! them.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

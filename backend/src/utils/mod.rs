//! Collection of cryptographic helpers shared by the authentication flow.

pub mod jwt;
pub mod password;

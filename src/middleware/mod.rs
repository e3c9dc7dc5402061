//! Axum extractors for authentication and role checks.

pub mod auth;
pub mod rbac;

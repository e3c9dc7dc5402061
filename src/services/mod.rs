//! Business logic services.

pub mod analytics;
pub mod application;
pub mod auth;
pub mod booking;
pub mod dashboard;
pub mod post;
pub mod tutor;

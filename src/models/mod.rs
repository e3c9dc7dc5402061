//! Database models and DTOs for all domain entities.

pub mod analytics;
pub mod application;
pub mod booking;
pub mod pagination;
pub mod post;
pub mod tutor;
pub mod user;

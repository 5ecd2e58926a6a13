//! Shared types, errors, and configuration for Kabadi.
//!
//! This crate provides common types used across all other crates:
//! - Rounding rules for amounts and percentages
//! - Typed IDs for type-safe entity references
//! - Pagination types for list operations
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

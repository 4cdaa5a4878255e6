//! Shared types, errors, and configuration for Daftar.
//!
//! This crate provides common types used across all other crates:
//! - `Fils` money type in integer minor units
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DatabaseConfig, LoggingConfig, ReportingConfig, ServerConfig};
pub use error::AppError;
pub use types::Fils;

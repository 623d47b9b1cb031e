//! Shared library for the Nimubot workspace.
//!
//! This crate provides common functionality used by the bot and its clients:
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;

/// Result type used across the shared crate
pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use config::Config;
pub use logging::LogConfig;

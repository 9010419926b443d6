//! VIP Go Common - Shared types and utilities
//!
//! This crate provides the error type and configuration structures
//! shared by the auth, files and gateway crates.

pub mod config;
pub mod error;

pub use config::{AuthConfig, Config, FilesConfig, LoggingConfig, ServerConfig, SiteConfig};
pub use error::{Error, Result};

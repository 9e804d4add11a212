//! # Engine Module
//!
//! Shared machinery for the bulk workflows built on top of [`crate::core`].
//!
//! - **Configuration** ([`config`]) - Rotation batch parameters, builder and TOML loading
//! - **Progress Monitoring** ([`progress`]) - Optional observer for long-running batches
//! - **Error Handling** ([`error`]) - Engine-level error type wrapping core and config errors

pub mod config;
pub mod error;
pub mod progress;

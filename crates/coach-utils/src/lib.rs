//! Shared utilities for coach-rs
//!
//! This crate provides common functionality used across the coach-rs
//! workspace, including logging setup and display formatting helpers.

pub mod format;
pub mod logging;

pub use format::{format_currency, format_percent, format_ratio};
pub use logging::{init_tracing, init_tracing_json};

//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified HTTP error handling (`AppError`)
//! - Configuration structures loaded from the environment

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};

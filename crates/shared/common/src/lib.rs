//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified error handling with HTTP mapping
//! - Deadline helper for bounding storage calls
//! - Configuration structures

pub mod config;
pub mod deadline;
pub mod error;

pub use config::*;
pub use deadline::with_deadline;
pub use error::{AppError, AppResult, OptionExt};

//! Structured logging facility for deepeq
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_divergence!`)
//! - Test capture mode for deterministic assertions
//!
//! Field keys and event names come from `deepeq_core_types::schema`.
//!
//! # Usage
//!
//! ```rust
//! use deepeq_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```
//!
//! # Logging Macros
//!
//! - `log_op_start!(op, ...)` - Log operation start
//! - `log_op_end!(op, duration_ms = ...)` - Log operation end
//! - `log_op_divergence!(op, divergence, duration_ms = ...)` - Log an unequal verdict

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

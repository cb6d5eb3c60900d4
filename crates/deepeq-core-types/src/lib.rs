//! Core types shared across deepeq crates
//!
//! This crate provides foundational types used by the comparator and its
//! logging facility:
//!
//! - **Schema constants**: canonical field keys, event and operation names
//! - **Sensitive data**: `Sensitive<T>` marker that is redacted in output and
//!   never inspected by the comparator

pub mod schema;
pub mod sensitive;

pub use sensitive::Sensitive;

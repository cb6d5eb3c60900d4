//! deepeq core - structural equality with explanations
//!
//! This crate compares two arbitrarily nested, possibly cyclic values and,
//! when they differ, reports where and why:
//! - `Reflect`: runtime introspection implemented for std types, JSON values
//!   and user types (via `reflect_record!` / `reflect_enum!`)
//! - `deep_equal`: the recursive comparator with cycle detection and NaN
//!   handling
//! - `Divergence`: a path-annotated report of the first mismatch
//! - `CompareOptions`: cycle policy and depth limit, loadable from TOML
//!
//! # Example
//!
//! ```
//! use deepeq_core::{deep_equal, DynValue};
//!
//! assert!(deep_equal(&DynValue::nil(), &DynValue::nil()).is_ok());
//!
//! let divergence = deep_equal(&vec![Some(1u8)], &vec![None::<u8>]).unwrap_err();
//! assert_eq!(divergence.path_string(), "[0]");
//! assert_eq!(divergence.code(), "DIV_NIL_MISMATCH");
//! ```

pub mod compare;
pub mod errors;
pub mod format;
pub mod logging_facility;
pub mod options;
pub mod reflect;

pub use deepeq_core_types as core_types;
#[doc(hidden)]
pub use tracing as __tracing;

// Re-export commonly used types
pub use compare::{deep_equal, deep_equal_with, is_deep_equal, Comparator};
pub use errors::{ConfigError, Divergence, DivergenceKind, PathSegment, Verdict};
pub use format::render;
pub use options::{CompareOptions, CyclePolicy};
pub use reflect::{DynValue, Kind, Reflect, Shape, TypeInfo};

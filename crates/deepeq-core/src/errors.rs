use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::reflect::Kind;

/// Outcome of a comparison: `Ok(())` when deeply equal, otherwise the first
/// divergence found
pub type Verdict = Result<(), Divergence>;

// ========== Divergence Kinds ==========

/// Stable classification of a divergence
///
/// Each kind maps to a stable code usable for programmatic handling, log
/// filtering and tests. The kind of a wrapped divergence is the kind of its
/// root cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DivergenceKind {
    TypeMismatch,
    KindMismatch,
    NilMismatch,
    LengthMismatch,
    VariantMismatch,
    MissingKey,
    Uncomparable,
    Inaccessible,
    ValueMismatch,
    CycleUnverified,
    DepthExceeded,
}

impl DivergenceKind {
    /// Get the stable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            DivergenceKind::TypeMismatch => "DIV_TYPE_MISMATCH",
            DivergenceKind::KindMismatch => "DIV_KIND_MISMATCH",
            DivergenceKind::NilMismatch => "DIV_NIL_MISMATCH",
            DivergenceKind::LengthMismatch => "DIV_LENGTH_MISMATCH",
            DivergenceKind::VariantMismatch => "DIV_VARIANT_MISMATCH",
            DivergenceKind::MissingKey => "DIV_MISSING_KEY",
            DivergenceKind::Uncomparable => "DIV_UNCOMPARABLE",
            DivergenceKind::Inaccessible => "DIV_INACCESSIBLE",
            DivergenceKind::ValueMismatch => "DIV_VALUE_MISMATCH",
            DivergenceKind::CycleUnverified => "DIV_CYCLE_UNVERIFIED",
            DivergenceKind::DepthExceeded => "DIV_DEPTH_EXCEEDED",
        }
    }
}

impl fmt::Display for DivergenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ========== Path ==========

/// One step from the compared roots down to a divergence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(&'static str),
    Index(usize),
    /// Rendered map key
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{}", name),
            PathSegment::Index(index) => write!(f, "[{}]", index),
            PathSegment::Key(key) => write!(f, "[{}]", key),
        }
    }
}

// ========== Divergence ==========

/// Explanation of why two values are not deeply equal
///
/// Leaf variants describe the mismatch itself. `Field`, `Element` and `Entry`
/// wrap a nested divergence with the location it was found at, so the
/// outermost value reads as a path from the roots to the first mismatch:
///
/// ```text
/// field hobbies: slice lengths differ: 1 vs 0
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Divergence {
    /// Exactly one of the top-level values is nil
    #[error("only one value is nil: {left} vs {right}")]
    OnlyOneNil { left: String, right: String },

    /// The values have different concrete types
    #[error("types do not match: {left_type} vs {right_type}")]
    TypeMismatch {
        left_type: &'static str,
        right_type: &'static str,
    },

    /// Same type, but the values reflect as different kinds
    #[error("kinds do not match: {left_kind} vs {right_kind}")]
    KindMismatch { left_kind: Kind, right_kind: Kind },

    /// Exactly one of two nullable values is nil
    #[error("only one {kind} is nil: {left} vs {right}")]
    NilMismatch {
        kind: Kind,
        left: String,
        right: String,
    },

    #[error("{kind} lengths differ: {left_len} vs {right_len}")]
    LengthMismatch {
        kind: Kind,
        left_len: usize,
        right_len: usize,
    },

    /// Enum values hold different variants
    #[error("variants differ: {left} vs {right}")]
    VariantMismatch {
        left: &'static str,
        right: &'static str,
    },

    /// A key of the left-hand map has no entry in the right-hand map
    #[error("missing from the right-hand map")]
    MissingKey,

    /// A non-nil function was compared
    #[error("cannot compare functions")]
    Uncomparable,

    /// Exactly one value could not be inspected
    #[error(
        "only one value is accessible (left accessible: {left_accessible}, right accessible: {right_accessible})"
    )]
    Inaccessible {
        left_accessible: bool,
        right_accessible: bool,
    },

    /// Primitive equality failed
    #[error("values differ: {left} vs {right}")]
    ValueMismatch {
        type_name: &'static str,
        left: String,
        right: String,
    },

    /// Strict cycle policy: a pair was revisited while still being compared
    #[error("cycle through {type_name} revisited before it was verified")]
    CycleUnverified { type_name: &'static str },

    #[error("maximum depth {max_depth} exceeded")]
    DepthExceeded { max_depth: usize },

    #[error("field {name}: {source}")]
    Field {
        name: &'static str,
        source: Box<Divergence>,
    },

    #[error("index {index}: {source}")]
    Element {
        index: usize,
        source: Box<Divergence>,
    },

    #[error("key {key}: {source}")]
    Entry { key: String, source: Box<Divergence> },
}

impl Divergence {
    /// Wrap with the record field the divergence was found in
    pub fn in_field(self, name: &'static str) -> Self {
        Divergence::Field {
            name,
            source: Box::new(self),
        }
    }

    /// Wrap with the sequence index the divergence was found at
    pub fn at_index(self, index: usize) -> Self {
        Divergence::Element {
            index,
            source: Box::new(self),
        }
    }

    /// Wrap with the rendered map key the divergence was found under
    pub fn at_key(self, key: impl Into<String>) -> Self {
        Divergence::Entry {
            key: key.into(),
            source: Box::new(self),
        }
    }

    /// The innermost divergence, with all location wrappers removed
    pub fn root_cause(&self) -> &Divergence {
        let mut current = self;
        while let Divergence::Field { source, .. }
        | Divergence::Element { source, .. }
        | Divergence::Entry { source, .. } = current
        {
            current = &**source;
        }
        current
    }

    /// Classification of the root cause
    pub fn kind(&self) -> DivergenceKind {
        match self.root_cause() {
            Divergence::OnlyOneNil { .. } | Divergence::NilMismatch { .. } => {
                DivergenceKind::NilMismatch
            }
            Divergence::TypeMismatch { .. } => DivergenceKind::TypeMismatch,
            Divergence::KindMismatch { .. } => DivergenceKind::KindMismatch,
            Divergence::LengthMismatch { .. } => DivergenceKind::LengthMismatch,
            Divergence::VariantMismatch { .. } => DivergenceKind::VariantMismatch,
            Divergence::MissingKey => DivergenceKind::MissingKey,
            Divergence::Uncomparable => DivergenceKind::Uncomparable,
            Divergence::Inaccessible { .. } => DivergenceKind::Inaccessible,
            Divergence::ValueMismatch { .. } => DivergenceKind::ValueMismatch,
            Divergence::CycleUnverified { .. } => DivergenceKind::CycleUnverified,
            Divergence::DepthExceeded { .. } => DivergenceKind::DepthExceeded,
            // root_cause never returns a wrapper
            Divergence::Field { .. } | Divergence::Element { .. } | Divergence::Entry { .. } => {
                DivergenceKind::ValueMismatch
            }
        }
    }

    /// Get the stable code of the root cause
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Location of the root cause, outermost segment first
    pub fn path(&self) -> Vec<PathSegment> {
        let mut segments = Vec::new();
        let mut current = self;
        loop {
            match current {
                Divergence::Field { name, source } => {
                    segments.push(PathSegment::Field(*name));
                    current = &**source;
                }
                Divergence::Element { index, source } => {
                    segments.push(PathSegment::Index(*index));
                    current = &**source;
                }
                Divergence::Entry { key, source } => {
                    segments.push(PathSegment::Key(key.clone()));
                    current = &**source;
                }
                _ => return segments,
            }
        }
    }

    /// The path in accessor notation, e.g. `.hobbies[0]["k"]`; empty when the
    /// roots themselves differ
    pub fn path_string(&self) -> String {
        self.path().iter().map(ToString::to_string).collect()
    }
}

// ========== Configuration Errors ==========

/// Failure to load [`CompareOptions`](crate::options::CompareOptions)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length_mismatch() -> Divergence {
        Divergence::LengthMismatch {
            kind: Kind::Slice,
            left_len: 1,
            right_len: 0,
        }
    }

    #[test]
    fn test_divergence_kind_codes() {
        assert_eq!(DivergenceKind::TypeMismatch.code(), "DIV_TYPE_MISMATCH");
        assert_eq!(DivergenceKind::MissingKey.code(), "DIV_MISSING_KEY");
        assert_eq!(DivergenceKind::DepthExceeded.code(), "DIV_DEPTH_EXCEEDED");
        assert_eq!(
            DivergenceKind::CycleUnverified.to_string(),
            "DIV_CYCLE_UNVERIFIED"
        );
    }

    #[test]
    fn test_wrapped_divergence_display() {
        let div = length_mismatch().in_field("hobbies");
        assert_eq!(div.to_string(), "field hobbies: slice lengths differ: 1 vs 0");
    }

    #[test]
    fn test_kind_follows_root_cause() {
        let div = length_mismatch().at_index(2).in_field("items");
        assert_eq!(div.kind(), DivergenceKind::LengthMismatch);
        assert_eq!(div.code(), "DIV_LENGTH_MISMATCH");
        assert_eq!(div.root_cause(), &length_mismatch());
    }

    #[test]
    fn test_only_one_nil_classifies_as_nil_mismatch() {
        let div = Divergence::OnlyOneNil {
            left: "<nil>".to_string(),
            right: "1".to_string(),
        };
        assert_eq!(div.kind(), DivergenceKind::NilMismatch);
        assert!(div.path().is_empty());
    }

    #[test]
    fn test_path_string_outermost_first() {
        let div = Divergence::MissingKey
            .at_key("\"k\"")
            .at_index(0)
            .in_field("hobbies");

        assert_eq!(
            div.path(),
            vec![
                PathSegment::Field("hobbies"),
                PathSegment::Index(0),
                PathSegment::Key("\"k\"".to_string()),
            ]
        );
        assert_eq!(div.path_string(), ".hobbies[0][\"k\"]");
    }

    #[test]
    fn test_root_divergence_has_empty_path() {
        assert_eq!(Divergence::Uncomparable.path_string(), "");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Io {
            path: PathBuf::from("/missing/deepeq.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read config /missing/deepeq.toml: no such file"
        );
    }
}

//! Rendering of reflected values for divergence reports
//!
//! The notation is compact and close to how values read in source: strings
//! and chars are quoted, sequences print as `[a b]`, records as `{a b}`
//! (prefixed with the variant for enums) and maps as `map[k:v]`. A pointer
//! prints as `&` followed by its target at the top level and as a bare
//! address anywhere below it, so rendering terminates on cyclic values.

use std::fmt;

use crate::reflect::{address, Reflect, Scalar, SequenceView, Shape};

/// Render a value to a string
pub fn render(value: &dyn Reflect) -> String {
    Rendered::new(value).to_string()
}

/// `Display` adapter for a reflected value
pub struct Rendered<'a> {
    value: &'a dyn Reflect,
    depth: usize,
}

impl<'a> Rendered<'a> {
    pub fn new(value: &'a dyn Reflect) -> Self {
        Self { value, depth: 0 }
    }

    fn child<'b>(&self, value: &'b dyn Reflect) -> Rendered<'b> {
        Rendered {
            value,
            depth: self.depth + 1,
        }
    }

    fn sequence(&self, f: &mut fmt::Formatter<'_>, seq: &dyn SequenceView) -> fmt::Result {
        f.write_str("[")?;
        for index in 0..seq.len() {
            if index > 0 {
                f.write_str(" ")?;
            }
            match seq.get(index) {
                Some(element) => write!(f, "{}", self.child(element))?,
                None => f.write_str("<opaque>")?,
            }
        }
        f.write_str("]")
    }
}

fn scalar(f: &mut fmt::Formatter<'_>, value: Scalar<'_>) -> fmt::Result {
    match value {
        Scalar::Bool(b) => write!(f, "{}", b),
        Scalar::Int(i) => write!(f, "{}", i),
        Scalar::Uint(u) => write!(f, "{}", u),
        Scalar::Float(x) => write!(f, "{}", x),
        Scalar::Char(c) => write!(f, "{:?}", c),
        Scalar::Str(s) => write!(f, "{:?}", s),
        Scalar::Unit => f.write_str("()"),
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.reflect() {
            Shape::Scalar(value) => scalar(f, value),
            Shape::Array(seq) | Shape::Slice(Some(seq)) => self.sequence(f, seq),
            Shape::Record(record) => {
                if let Some(variant) = record.variant() {
                    f.write_str(variant)?;
                }
                f.write_str("{")?;
                for (i, field) in record.fields().iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", self.child(field.value))?;
                }
                f.write_str("}")
            }
            Shape::Map(Some(map)) => {
                f.write_str("map[")?;
                for (i, entry) in map.entries().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}:{}", self.child(entry.key), self.child(entry.value))?;
                }
                f.write_str("]")
            }
            Shape::Pointer(Some(target)) => {
                if self.depth == 0 {
                    write!(f, "&{}", self.child(target))
                } else {
                    write!(f, "{:#x}", address(target))
                }
            }
            Shape::Interface(Some(inner)) => write!(
                f,
                "{}",
                Rendered {
                    value: inner,
                    depth: self.depth,
                }
            ),
            Shape::Slice(None)
            | Shape::Map(None)
            | Shape::Pointer(None)
            | Shape::Interface(None)
            | Shape::Func { nil: true } => f.write_str("<nil>"),
            Shape::Func { nil: false } => f.write_str("func"),
            Shape::Cell(cell) => {
                let mut result = Ok(());
                // the closure always reports success; only the fmt result matters
                let _ = cell.inspect(&mut |inner| {
                    result = match inner {
                        Some(value) => write!(
                            f,
                            "{}",
                            Rendered {
                                value,
                                depth: self.depth,
                            }
                        ),
                        None => f.write_str("<locked>"),
                    };
                    Ok(())
                });
                result
            }
            Shape::Opaque => f.write_str("<opaque>"),
        }
    }
}

//! Untyped dynamic values
//!
//! [`DynValue`] holds a value of any reflectable type, or nothing. It plays
//! two roles: as a field type it is a nullable interface whose concrete type
//! is only known at runtime, and at the top of a comparison a nil `DynValue`
//! is the absent value (`deep_equal(nil, nil)`).

use std::fmt;

use super::{Reflect, Shape};
use crate::format::render;

/// A nullable box around a value of any reflectable type
#[derive(Default)]
pub struct DynValue(Option<Box<dyn Reflect>>);

impl DynValue {
    pub fn new<T: Reflect>(value: T) -> Self {
        Self(Some(Box::new(value)))
    }

    /// The empty dynamic value
    pub fn nil() -> Self {
        Self(None)
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_none()
    }

    /// The held value, if any
    pub fn get(&self) -> Option<&dyn Reflect> {
        self.0.as_deref()
    }
}

impl Reflect for DynValue {
    fn reflect(&self) -> Shape<'_> {
        Shape::Interface(self.get())
    }
}

impl fmt::Debug for DynValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => write!(f, "DynValue({})", render(value)),
            None => f.write_str("DynValue(<nil>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::TypeInfo;

    #[test]
    fn test_nil_dyn_value() {
        let nil = DynValue::nil();
        assert!(nil.is_nil());
        assert!(matches!(nil.reflect(), Shape::Interface(None)));
        assert_eq!(format!("{:?}", nil), "DynValue(<nil>)");
    }

    #[test]
    fn test_held_value_keeps_its_type() {
        let value = DynValue::new(42u16);
        let inner = value.get().unwrap();
        assert_eq!(inner.type_info(), TypeInfo::of::<u16>());
        assert_eq!(value.type_info(), TypeInfo::of::<DynValue>());
        assert_eq!(format!("{:?}", value), "DynValue(42)");
    }
}

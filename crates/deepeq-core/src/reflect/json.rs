//! Reflection for `serde_json` documents
//!
//! `null` is a nil interface, numbers become the narrowest scalar that holds
//! them, arrays are slices and objects are maps keyed by `String`.

use std::any::Any;

use serde_json::{Map, Number, Value};

use super::{Entry, MapView, Reflect, Scalar, Shape};

fn number_scalar(number: &Number) -> Scalar<'static> {
    if let Some(i) = number.as_i64() {
        Scalar::Int(i128::from(i))
    } else if let Some(u) = number.as_u64() {
        Scalar::Uint(u128::from(u))
    } else {
        Scalar::Float(number.as_f64().unwrap_or(f64::NAN))
    }
}

impl Reflect for Value {
    fn reflect(&self) -> Shape<'_> {
        match self {
            Value::Null => Shape::Interface(None),
            Value::Bool(b) => Shape::Scalar(Scalar::Bool(*b)),
            Value::Number(n) => Shape::Scalar(number_scalar(n)),
            Value::String(s) => Shape::Scalar(Scalar::Str(s)),
            Value::Array(items) => items.reflect(),
            Value::Object(map) => map.reflect(),
        }
    }
}

impl Reflect for Map<String, Value> {
    fn reflect(&self) -> Shape<'_> {
        Shape::Map(Some(self as &dyn MapView))
    }
}

impl MapView for Map<String, Value> {
    fn len(&self) -> usize {
        Map::len(self)
    }

    fn storage(&self) -> usize {
        self as *const Self as usize
    }

    fn entries(&self) -> Box<dyn Iterator<Item = Entry<'_>> + '_> {
        Box::new(self.iter().map(|(k, v)| Entry {
            key: k as &dyn Reflect,
            key_any: k as &dyn Any,
            value: v as &dyn Reflect,
        }))
    }

    fn lookup(&self, key: &dyn Any) -> Option<&dyn Reflect> {
        let key = key.downcast_ref::<String>()?;
        self.get(key.as_str()).map(|v| v as &dyn Reflect)
    }
}

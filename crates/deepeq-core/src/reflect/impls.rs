//! `Reflect` implementations for std types
//!
//! | Rust type | Kind |
//! |---|---|
//! | integers, floats, `bool`, `char`, `String`, `&'static str`, `()` | scalar |
//! | `[T; N]` | array |
//! | `Vec<T>` | slice |
//! | tuples up to four elements | record (fields `0`, `1`, ...) |
//! | `HashMap`, `BTreeMap` | map |
//! | `Box<T>`, `Rc<T>`, `Arc<T>`, `&'static T` | pointer |
//! | `Option<T>` | interface (nullable) |
//! | `RefCell<T>`, `Mutex<T>`, `RwLock<T>` | cell |
//! | `fn(..) -> R` up to three arguments | func |
//! | `Sensitive<T>` | opaque |

use std::any::Any;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use std::sync::{Arc, Mutex, RwLock};

use deepeq_core_types::Sensitive;

use super::{CellView, Entry, Field, MapView, RecordView, Reflect, Scalar, SequenceView, Shape};
use crate::errors::Verdict;

// ========== Scalars ==========

macro_rules! reflect_signed {
    ($($ty:ty),*) => {
        $(impl Reflect for $ty {
            fn reflect(&self) -> Shape<'_> {
                Shape::Scalar(Scalar::Int(i128::from(*self)))
            }
        })*
    };
}

macro_rules! reflect_unsigned {
    ($($ty:ty),*) => {
        $(impl Reflect for $ty {
            fn reflect(&self) -> Shape<'_> {
                Shape::Scalar(Scalar::Uint(u128::from(*self)))
            }
        })*
    };
}

reflect_signed!(i8, i16, i32, i64, i128);
reflect_unsigned!(u8, u16, u32, u64, u128);

impl Reflect for isize {
    fn reflect(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Int(*self as i128))
    }
}

impl Reflect for usize {
    fn reflect(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Uint(*self as u128))
    }
}

impl Reflect for f32 {
    fn reflect(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Float(f64::from(*self)))
    }
}

impl Reflect for f64 {
    fn reflect(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Float(*self))
    }
}

impl Reflect for bool {
    fn reflect(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Bool(*self))
    }
}

impl Reflect for char {
    fn reflect(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Char(*self))
    }
}

impl Reflect for String {
    fn reflect(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(self.as_str()))
    }
}

impl Reflect for &'static str {
    fn reflect(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(self))
    }
}

impl Reflect for () {
    fn reflect(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Unit)
    }
}

// ========== Sequences ==========

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect(&self) -> Shape<'_> {
        Shape::Array(self)
    }
}

impl<T: Reflect, const N: usize> SequenceView for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|v| v as &dyn Reflect)
    }

    fn storage(&self) -> usize {
        self.as_ptr() as usize
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect(&self) -> Shape<'_> {
        Shape::Slice(Some(self as &dyn SequenceView))
    }
}

impl<T: Reflect> SequenceView for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|v| v as &dyn Reflect)
    }

    fn storage(&self) -> usize {
        self.as_ptr() as usize
    }
}

// ========== Tuples ==========

macro_rules! reflect_tuple {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: Reflect),+> Reflect for ($($name,)+) {
            fn reflect(&self) -> Shape<'_> {
                Shape::Record(self)
            }
        }

        impl<$($name: Reflect),+> RecordView for ($($name,)+) {
            fn fields(&self) -> Vec<Field<'_>> {
                vec![$(Field::new(stringify!($idx), &self.$idx)),+]
            }
        }
    };
}

reflect_tuple!(A: 0);
reflect_tuple!(A: 0, B: 1);
reflect_tuple!(A: 0, B: 1, C: 2);
reflect_tuple!(A: 0, B: 1, C: 2, D: 3);

// ========== Maps ==========

impl<K, V, S> Reflect for HashMap<K, V, S>
where
    K: Reflect + Eq + Hash,
    V: Reflect,
    S: BuildHasher + 'static,
{
    fn reflect(&self) -> Shape<'_> {
        Shape::Map(Some(self as &dyn MapView))
    }
}

impl<K, V, S> MapView for HashMap<K, V, S>
where
    K: Reflect + Eq + Hash,
    V: Reflect,
    S: BuildHasher + 'static,
{
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn storage(&self) -> usize {
        self as *const Self as usize
    }

    fn entries(&self) -> Box<dyn Iterator<Item = Entry<'_>> + '_> {
        Box::new(self.iter().map(|(k, v)| Entry {
            key: k,
            key_any: k,
            value: v,
        }))
    }

    fn lookup(&self, key: &dyn Any) -> Option<&dyn Reflect> {
        let key = key.downcast_ref::<K>()?;
        HashMap::get(self, key).map(|v| v as &dyn Reflect)
    }
}

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: Reflect + Ord,
    V: Reflect,
{
    fn reflect(&self) -> Shape<'_> {
        Shape::Map(Some(self as &dyn MapView))
    }
}

impl<K, V> MapView for BTreeMap<K, V>
where
    K: Reflect + Ord,
    V: Reflect,
{
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn storage(&self) -> usize {
        self as *const Self as usize
    }

    fn entries(&self) -> Box<dyn Iterator<Item = Entry<'_>> + '_> {
        Box::new(self.iter().map(|(k, v)| Entry {
            key: k,
            key_any: k,
            value: v,
        }))
    }

    fn lookup(&self, key: &dyn Any) -> Option<&dyn Reflect> {
        let key = key.downcast_ref::<K>()?;
        BTreeMap::get(self, key).map(|v| v as &dyn Reflect)
    }
}

// ========== Pointers and wrappers ==========

impl<T: Reflect> Reflect for Box<T> {
    fn reflect(&self) -> Shape<'_> {
        Shape::Pointer(Some(&**self as &dyn Reflect))
    }
}

impl<T: Reflect> Reflect for Rc<T> {
    fn reflect(&self) -> Shape<'_> {
        Shape::Pointer(Some(&**self as &dyn Reflect))
    }
}

impl<T: Reflect> Reflect for Arc<T> {
    fn reflect(&self) -> Shape<'_> {
        Shape::Pointer(Some(&**self as &dyn Reflect))
    }
}

impl<T: Reflect> Reflect for &'static T {
    fn reflect(&self) -> Shape<'_> {
        Shape::Pointer(Some(*self as &dyn Reflect))
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect(&self) -> Shape<'_> {
        Shape::Interface(self.as_ref().map(|v| v as &dyn Reflect))
    }
}

impl<T: 'static> Reflect for Sensitive<T> {
    fn reflect(&self) -> Shape<'_> {
        Shape::Opaque
    }
}

// ========== Cells ==========

impl<T: Reflect> Reflect for RefCell<T> {
    fn reflect(&self) -> Shape<'_> {
        Shape::Cell(self)
    }
}

impl<T: Reflect> CellView for RefCell<T> {
    fn inspect(&self, f: &mut dyn FnMut(Option<&dyn Reflect>) -> Verdict) -> Verdict {
        match self.try_borrow() {
            Ok(guard) => f(Some(&*guard as &dyn Reflect)),
            Err(_) => f(None),
        }
    }
}

impl<T: Reflect> Reflect for Mutex<T> {
    fn reflect(&self) -> Shape<'_> {
        Shape::Cell(self)
    }
}

impl<T: Reflect> CellView for Mutex<T> {
    fn inspect(&self, f: &mut dyn FnMut(Option<&dyn Reflect>) -> Verdict) -> Verdict {
        match self.try_lock() {
            Ok(guard) => f(Some(&*guard as &dyn Reflect)),
            Err(_) => f(None),
        }
    }
}

impl<T: Reflect> Reflect for RwLock<T> {
    fn reflect(&self) -> Shape<'_> {
        Shape::Cell(self)
    }
}

impl<T: Reflect> CellView for RwLock<T> {
    fn inspect(&self, f: &mut dyn FnMut(Option<&dyn Reflect>) -> Verdict) -> Verdict {
        match self.try_read() {
            Ok(guard) => f(Some(&*guard as &dyn Reflect)),
            Err(_) => f(None),
        }
    }
}

// ========== Functions ==========

macro_rules! reflect_fn {
    ($($arg:ident),*) => {
        impl<R: 'static, $($arg: 'static),*> Reflect for fn($($arg),*) -> R {
            fn reflect(&self) -> Shape<'_> {
                Shape::Func { nil: false }
            }
        }
    };
}

reflect_fn!();
reflect_fn!(A);
reflect_fn!(A, B);
reflect_fn!(A, B, C);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Kind;

    #[test]
    fn test_integer_widths_widen_losslessly() {
        assert_eq!(i8::MIN.reflect().kind(), Kind::Int);
        match u64::MAX.reflect() {
            Shape::Scalar(Scalar::Uint(v)) => assert_eq!(v, u128::from(u64::MAX)),
            other => panic!("unexpected shape {:?}", other),
        }
        match 1.5f32.reflect() {
            Shape::Scalar(Scalar::Float(v)) => assert_eq!(v, 1.5),
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_vec_is_slice_with_storage() {
        let v = vec![1u8, 2, 3];
        match v.reflect() {
            Shape::Slice(Some(seq)) => {
                assert_eq!(seq.len(), 3);
                assert_eq!(seq.storage(), v.as_ptr() as usize);
                assert!(seq.get(3).is_none());
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_tuple_fields_are_positional() {
        let t = (1u8, "x");
        match t.reflect() {
            Shape::Record(rec) => {
                let names: Vec<_> = rec.fields().iter().map(|f| f.name).collect();
                assert_eq!(names, vec!["0", "1"]);
                assert!(rec.variant().is_none());
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_map_lookup_uses_native_keys() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), 1u32);

        let key = "a".to_string();
        assert!(MapView::lookup(&map, &key).is_some());
        // a key of another type never matches
        assert!(MapView::lookup(&map, &1u32).is_none());
    }

    #[test]
    fn test_option_is_nullable_interface() {
        assert!(matches!(None::<u8>.reflect(), Shape::Interface(None)));
        assert!(matches!(Some(1u8).reflect(), Shape::Interface(Some(_))));
    }

    #[test]
    fn test_borrowed_refcell_is_unreadable() {
        let cell = RefCell::new(5u32);
        let _guard = cell.borrow_mut();
        let mut seen = None;
        CellView::inspect(&cell, &mut |inner| {
            seen = Some(inner.is_some());
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, Some(false));
    }

    #[test]
    fn test_sensitive_is_opaque() {
        let secret = Sensitive::new("token".to_string());
        assert_eq!(secret.reflect().kind(), Kind::Opaque);
    }
}

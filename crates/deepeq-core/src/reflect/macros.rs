//! Declarative `Reflect` implementations for user types
//!
//! Invoke these next to the type definition. The generated code reads the
//! fields directly, so private fields take part in the comparison.

/// Implement `Reflect` for a struct
///
/// Every field must be listed; the generated code matches the struct
/// without `..`, so a forgotten field is a compile error. Type parameters
/// are accepted and each one must implement `Reflect`. Lifetime and const
/// parameters are not supported.
///
/// ```
/// use deepeq_core::{deep_equal, reflect_record};
///
/// struct Named { id: u32, label: String }
/// struct Pair(u8, u8);
/// struct Marker;
/// struct Tagged<T> { tag: String, value: T }
///
/// reflect_record!(Named { id, label });
/// reflect_record!(Pair(0, 1));
/// reflect_record!(Marker);
/// reflect_record!(Tagged<T> { tag, value });
///
/// let a = Tagged { tag: "x".to_string(), value: vec![1u8] };
/// let b = Tagged { tag: "x".to_string(), value: vec![2u8] };
/// assert_eq!(deep_equal(&a, &b).unwrap_err().path_string(), ".value[0]");
/// ```
///
/// Leaving a field out does not compile:
///
/// ```compile_fail
/// use deepeq_core::reflect_record;
///
/// struct Account { name: String, hidden_field: i32 }
///
/// reflect_record!(Account { name });
/// ```
#[macro_export]
macro_rules! reflect_record {
    ($ty:ident $(< $($gen:ident),+ $(,)? >)? { $($field:ident),* $(,)? }) => {
        impl $(< $($gen: $crate::reflect::Reflect),+ >)? $crate::reflect::Reflect
            for $ty $(< $($gen),+ >)?
        {
            fn reflect(&self) -> $crate::reflect::Shape<'_> {
                $crate::reflect::Shape::Record(self)
            }
        }

        impl $(< $($gen: $crate::reflect::Reflect),+ >)? $crate::reflect::RecordView
            for $ty $(< $($gen),+ >)?
        {
            fn fields(&self) -> ::std::vec::Vec<$crate::reflect::Field<'_>> {
                let $ty { $($field: _),* } = self;
                ::std::vec![$($crate::reflect::Field::new(stringify!($field), &self.$field)),*]
            }
        }
    };
    ($ty:ident $(< $($gen:ident),+ $(,)? >)? ( $($idx:tt),* $(,)? )) => {
        impl $(< $($gen: $crate::reflect::Reflect),+ >)? $crate::reflect::Reflect
            for $ty $(< $($gen),+ >)?
        {
            fn reflect(&self) -> $crate::reflect::Shape<'_> {
                $crate::reflect::Shape::Record(self)
            }
        }

        impl $(< $($gen: $crate::reflect::Reflect),+ >)? $crate::reflect::RecordView
            for $ty $(< $($gen),+ >)?
        {
            fn fields(&self) -> ::std::vec::Vec<$crate::reflect::Field<'_>> {
                let $ty { $($idx: _),* } = self;
                ::std::vec![$($crate::reflect::Field::new(stringify!($idx), &self.$idx)),*]
            }
        }
    };
    ($ty:ident $(< $($gen:ident),+ $(,)? >)?) => {
        impl $(< $($gen: $crate::reflect::Reflect),+ >)? $crate::reflect::Reflect
            for $ty $(< $($gen),+ >)?
        {
            fn reflect(&self) -> $crate::reflect::Shape<'_> {
                $crate::reflect::Shape::Record(self)
            }
        }

        impl $(< $($gen: $crate::reflect::Reflect),+ >)? $crate::reflect::RecordView
            for $ty $(< $($gen),+ >)?
        {
            fn fields(&self) -> ::std::vec::Vec<$crate::reflect::Field<'_>> {
                let $ty {} = self;
                ::std::vec::Vec::new()
            }
        }
    };
}

/// Implement `Reflect` for an enum
///
/// Each variant is listed with its fields: struct variants by field name,
/// tuple variants by binding names (reported as `0`, `1`, ...), unit
/// variants bare. Variants and fields are matched exhaustively, and type
/// parameters are accepted as for [`reflect_record!`].
///
/// ```
/// use deepeq_core::{reflect_enum, deep_equal};
///
/// enum Shape2 {
///     Circle { radius: u32 },
///     Rect(u32, u32),
///     Empty,
/// }
///
/// reflect_enum!(Shape2 {
///     Circle { radius },
///     Rect(w, h),
///     Empty,
/// });
///
/// let err = deep_equal(&Shape2::Circle { radius: 1 }, &Shape2::Empty).unwrap_err();
/// assert_eq!(err.code(), "DIV_VARIANT_MISMATCH");
/// assert!(deep_equal(&Shape2::Rect(1, 2), &Shape2::Rect(1, 2)).is_ok());
/// ```
#[macro_export]
macro_rules! reflect_enum {
    ($ty:ident $(< $($gen:ident),+ $(,)? >)? { $($variant:ident $({ $($field:ident),* $(,)? })? $(( $($bind:ident),* $(,)? ))?),* $(,)? }) => {
        impl $(< $($gen: $crate::reflect::Reflect),+ >)? $crate::reflect::Reflect
            for $ty $(< $($gen),+ >)?
        {
            fn reflect(&self) -> $crate::reflect::Shape<'_> {
                $crate::reflect::Shape::Record(self)
            }
        }

        impl $(< $($gen: $crate::reflect::Reflect),+ >)? $crate::reflect::RecordView
            for $ty $(< $($gen),+ >)?
        {
            fn variant(&self) -> ::std::option::Option<&'static str> {
                match self {
                    $($ty::$variant { .. } => ::std::option::Option::Some(stringify!($variant)),)*
                }
            }

            #[allow(unused_variables)]
            fn fields(&self) -> ::std::vec::Vec<$crate::reflect::Field<'_>> {
                match self {
                    $(
                        $ty::$variant $({ $($field),* })? $(( $($bind),* ))? => {
                            let mut fields = ::std::vec::Vec::new();
                            $($(fields.push($crate::reflect::Field::new(stringify!($field), $field));)*)?
                            $($crate::__reflect_positional!(fields, 0usize, $($bind),*);)?
                            fields
                        }
                    )*
                }
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __reflect_positional {
    ($fields:ident, $pos:expr, ) => {};
    ($fields:ident, $pos:expr, $first:ident $(, $rest:ident)*) => {
        $fields.push($crate::reflect::Field::new(
            $crate::reflect::macros::POSITIONAL_NAMES[$pos],
            $first,
        ));
        $crate::__reflect_positional!($fields, $pos + 1, $($rest),*);
    };
}

/// Field names for positional fields of tuple variants
#[doc(hidden)]
pub const POSITIONAL_NAMES: [&str; 16] = [
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15",
];

#[cfg(test)]
mod tests {
    use crate::reflect::{Kind, RecordView, Reflect, Shape};

    struct Account {
        owner: String,
        balance: i64,
    }

    crate::reflect_record!(Account { owner, balance });

    struct Wrapper(u8, String);

    crate::reflect_record!(Wrapper(0, 1));

    enum Event {
        Opened { by: String },
        Moved(i32, i32),
        Closed,
    }

    crate::reflect_enum!(Event {
        Opened { by },
        Moved(x, y),
        Closed,
    });

    struct Labeled<T> {
        label: String,
        value: T,
    }

    crate::reflect_record!(Labeled<T> { label, value });

    enum Slot<T> {
        Full(T),
        Empty,
    }

    crate::reflect_enum!(Slot<T> { Full(item), Empty });

    fn field_names(value: &dyn RecordView) -> Vec<&'static str> {
        value.fields().iter().map(|f| f.name).collect()
    }

    #[test]
    fn test_record_fields_in_declaration_order() {
        let account = Account {
            owner: "x".into(),
            balance: 3,
        };
        assert_eq!(account.reflect().kind(), Kind::Record);
        assert_eq!(field_names(&account), vec!["owner", "balance"]);
        assert!(account.variant().is_none());
    }

    #[test]
    fn test_tuple_struct_fields() {
        let wrapper = Wrapper(1, "a".into());
        assert_eq!(field_names(&wrapper), vec!["0", "1"]);
    }

    #[test]
    fn test_enum_variants_and_fields() {
        let opened = Event::Opened { by: "ops".into() };
        let moved = Event::Moved(1, -1);
        let closed = Event::Closed;

        assert_eq!(opened.variant(), Some("Opened"));
        assert_eq!(field_names(&opened), vec!["by"]);
        assert_eq!(moved.variant(), Some("Moved"));
        assert_eq!(field_names(&moved), vec!["0", "1"]);
        assert_eq!(closed.variant(), Some("Closed"));
        assert!(field_names(&closed).is_empty());
        assert!(matches!(closed.reflect(), Shape::Record(_)));
    }

    #[test]
    fn test_generic_record() {
        let labeled = Labeled {
            label: "l".into(),
            value: vec![1u8],
        };
        assert_eq!(field_names(&labeled), vec!["label", "value"]);

        let other = Labeled {
            label: "l".into(),
            value: vec![2u8],
        };
        let div = crate::deep_equal(&labeled, &other).unwrap_err();
        assert_eq!(div.path_string(), ".value[0]");
    }

    #[test]
    fn test_generic_enum() {
        let full = Slot::Full(3u8);
        let empty: Slot<u8> = Slot::Empty;

        assert_eq!(full.variant(), Some("Full"));
        assert_eq!(field_names(&full), vec!["0"]);
        assert_eq!(empty.variant(), Some("Empty"));
        assert!(crate::deep_equal(&full, &Slot::Full(3u8)).is_ok());
        assert_eq!(
            crate::deep_equal(&full, &empty).unwrap_err().code(),
            "DIV_VARIANT_MISMATCH"
        );
    }
}

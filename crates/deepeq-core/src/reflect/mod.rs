//! Runtime introspection for deep comparison
//!
//! A value takes part in deep comparison by implementing [`Reflect`], which
//! exposes its [`Shape`]: the kind of the value plus borrowed views of its
//! structural children. Composite shapes carry trait-object views
//! ([`SequenceView`], [`RecordView`], [`MapView`], [`CellView`]) so the
//! comparator can walk any implementor generically.
//!
//! Implementations ship for std scalars and containers ([`impls`]),
//! `serde_json::Value`, the untyped [`DynValue`] wrapper, and
//! `Sensitive<T>`. User types opt in with [`reflect_record!`](crate::reflect_record)
//! and [`reflect_enum!`](crate::reflect_enum), invoked next to the type so
//! private fields are read within their own module.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::errors::Verdict;

pub mod dynamic;
pub mod impls;
mod json;
#[doc(hidden)]
pub mod macros;

pub use dynamic::DynValue;

/// Identity of a concrete type
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    /// Describe the type `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Human readable type name, for reports only
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A value whose structure can be inspected generically
///
/// # Example
///
/// ```
/// use deepeq_core::{reflect_record, deep_equal};
///
/// struct Person {
///     name: String,
///     age: u32,
///     hobbies: Vec<String>,
/// }
///
/// reflect_record!(Person { name, age, hobbies });
///
/// let a = Person { name: "A".into(), age: 22, hobbies: vec!["Surfing".into()] };
/// let b = Person { name: "A".into(), age: 22, hobbies: vec![] };
///
/// let divergence = deep_equal(&a, &b).unwrap_err();
/// assert_eq!(divergence.path_string(), ".hobbies");
/// ```
pub trait Reflect: 'static {
    /// The shape of this value and borrowed views of its children
    fn reflect(&self) -> Shape<'_>;

    /// The concrete type of this value
    fn type_info(&self) -> TypeInfo {
        TypeInfo::of::<Self>()
    }
}

/// The kind of a reflected value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int,
    Uint,
    Float,
    Char,
    Str,
    Unit,
    Array,
    Slice,
    Record,
    Map,
    Pointer,
    Interface,
    Func,
    Cell,
    Opaque,
}

impl Kind {
    /// Kinds that may close a reference cycle and are therefore tracked in
    /// the visited set
    pub fn is_reference_like(self) -> bool {
        matches!(
            self,
            Kind::Slice | Kind::Map | Kind::Pointer | Kind::Interface
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Char => "char",
            Kind::Str => "string",
            Kind::Unit => "unit",
            Kind::Array => "array",
            Kind::Slice => "slice",
            Kind::Record => "record",
            Kind::Map => "map",
            Kind::Pointer => "pointer",
            Kind::Interface => "interface",
            Kind::Func => "func",
            Kind::Cell => "cell",
            Kind::Opaque => "opaque",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive values compared with `==`
///
/// Every integer width widens losslessly into `Int`/`Uint` and `f32` widens
/// into `Float`, so the derived `PartialEq` is the primitive equality
/// operator of the comparator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Int(i128),
    Uint(u128),
    Float(f64),
    Char(char),
    Str(&'a str),
    Unit,
}

impl Scalar<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Scalar::Bool(_) => Kind::Bool,
            Scalar::Int(_) => Kind::Int,
            Scalar::Uint(_) => Kind::Uint,
            Scalar::Float(_) => Kind::Float,
            Scalar::Char(_) => Kind::Char,
            Scalar::Str(_) => Kind::Str,
            Scalar::Unit => Kind::Unit,
        }
    }
}

/// Structure of a reflected value
///
/// `None` in the nullable variants is the nil value of that kind.
#[derive(Clone, Copy)]
pub enum Shape<'a> {
    Scalar(Scalar<'a>),
    /// Fixed-length sequence
    Array(&'a dyn SequenceView),
    /// Dynamically sized sequence
    Slice(Option<&'a dyn SequenceView>),
    /// Struct, tuple or enum variant
    Record(&'a dyn RecordView),
    Map(Option<&'a dyn MapView>),
    /// Reference to a pointee; identity is the pointee's address
    Pointer(Option<&'a dyn Reflect>),
    /// Nullable wrapper around a value whose concrete type is only known at
    /// runtime
    Interface(Option<&'a dyn Reflect>),
    Func {
        nil: bool,
    },
    /// Interior-mutability container, read through [`CellView::inspect`]
    Cell(&'a dyn CellView),
    /// Not accessible for generic inspection
    Opaque,
}

impl Shape<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Shape::Scalar(scalar) => scalar.kind(),
            Shape::Array(_) => Kind::Array,
            Shape::Slice(_) => Kind::Slice,
            Shape::Record(_) => Kind::Record,
            Shape::Map(_) => Kind::Map,
            Shape::Pointer(_) => Kind::Pointer,
            Shape::Interface(_) => Kind::Interface,
            Shape::Func { .. } => Kind::Func,
            Shape::Cell(_) => Kind::Cell,
            Shape::Opaque => Kind::Opaque,
        }
    }
}

impl fmt::Debug for Shape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar(scalar) => f.debug_tuple("Scalar").field(scalar).finish(),
            other => f.debug_tuple("Shape").field(&other.kind()).finish(),
        }
    }
}

/// Indexed access to the elements of an array or slice
pub trait SequenceView {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`; `None` when the element cannot be inspected
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Address of the backing storage; equal addresses mean the same storage
    fn storage(&self) -> usize;
}

/// A named child of a record
#[derive(Clone, Copy)]
pub struct Field<'a> {
    pub name: &'static str,
    pub value: &'a dyn Reflect,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, value: &'a dyn Reflect) -> Self {
        Self { name, value }
    }
}

/// Field access for structs, tuples and enums
pub trait RecordView {
    /// Active variant for enums, `None` for structs and tuples
    fn variant(&self) -> Option<&'static str> {
        None
    }

    /// All fields in declaration order, private ones included
    fn fields(&self) -> Vec<Field<'_>>;
}

/// One key/value pair of a map
///
/// The key is offered twice: as [`Reflect`] for rendering and as [`Any`] so
/// the other map can downcast it for a native lookup.
#[derive(Clone, Copy)]
pub struct Entry<'a> {
    pub key: &'a dyn Reflect,
    pub key_any: &'a dyn Any,
    pub value: &'a dyn Reflect,
}

/// Key enumeration and lookup for associative containers
pub trait MapView {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Address of the map object; equal addresses mean the same map
    fn storage(&self) -> usize;

    /// Entries in the container's own iteration order
    fn entries(&self) -> Box<dyn Iterator<Item = Entry<'_>> + '_>;

    /// Look up a key using the container's native key equality
    ///
    /// Keys of a foreign type never match.
    fn lookup(&self, key: &dyn Any) -> Option<&dyn Reflect>;
}

/// Scoped read access to the value inside an interior-mutability container
pub trait CellView {
    /// Call `f` with the current value, or with `None` when the cell cannot
    /// be read right now (mutably borrowed, locked, or poisoned)
    fn inspect(&self, f: &mut dyn FnMut(Option<&dyn Reflect>) -> Verdict) -> Verdict;
}

/// Identity token of a borrowed value: its address
///
/// Stable for as long as the value stays borrowed, which covers a whole
/// comparison.
pub fn address(value: &dyn Reflect) -> usize {
    (value as *const dyn Reflect).cast::<()>() as usize
}

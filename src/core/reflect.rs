//! Type descriptors and field access for the object-graph walker.
//!
//! Rust has no runtime reflection, so every type the walker should look into
//! registers itself with [`reflect!`](crate::reflect). Registration yields:
//!
//! - a [`TypeDescriptor`], built once per type and cached for the process
//!   lifetime, listing every field (embedded base fields flattened in) as
//!   either a dictionary description field or a plain field;
//! - [`Reflect`], name-based access to those fields;
//! - [`Field`] for the type itself, so it can be nested in other types.
//!
//! Field values are seen by the walker as a [`Node`]. Containers expose their
//! elements, shared `Arc<Mutex<_>>` objects expose the handle itself so the
//! walker can detect cycles by identity before locking.

use std::{
    any::TypeId,
    collections::{BTreeMap, HashMap, VecDeque},
    hash::BuildHasher,
    marker::PhantomData,
    sync::{Arc, Mutex},
    time::{Duration, SystemTime},
};

use super::dictionary::Dictionary;

/// A reflected object behind a shared, lockable handle.
pub type SharedObject = Arc<Mutex<dyn Reflect>>;

/// Elements of a collection, or values of a map.
pub type Elements<'a> = Box<dyn Iterator<Item = Node<'a>> + 'a>;

/// Runtime view of a field value.
pub enum Node<'a> {
    /// Absent value (`None`).
    Null,
    /// String, number, boolean, time, dictionary item: never descended into.
    Primitive,
    Object(&'a mut dyn Reflect),
    Shared(SharedObject),
    Seq(Elements<'a>),
    Map(Elements<'a>),
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Null => f.write_str("Null"),
            Node::Primitive => f.write_str("Primitive"),
            Node::Object(object) => write!(f, "Object({})", object.descriptor().name()),
            Node::Shared(_) => f.write_str("Shared"),
            Node::Seq(_) => f.write_str("Seq"),
            Node::Map(_) => f.write_str("Map"),
        }
    }
}

/// Static shape of a field type, used to decide without an instance whether
/// a type can hold description fields.
#[derive(Clone, Copy)]
pub enum Shape {
    Primitive,
    Object(fn() -> &'static TypeDescriptor),
    Seq(fn() -> Shape),
    Map(fn() -> Shape),
    /// Trait objects: the concrete type is only known at runtime.
    Dynamic,
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Primitive => f.write_str("Primitive"),
            Shape::Object(descriptor) => write!(f, "Object({})", descriptor().name()),
            Shape::Seq(element) => write!(f, "Seq({:?})", element()),
            Shape::Map(value) => write!(f, "Map({:?})", value()),
            Shape::Dynamic => f.write_str("Dynamic"),
        }
    }
}

/// A value that can sit in a reflected field.
pub trait Field: Send {
    fn shape() -> Shape
    where
        Self: Sized;

    fn node(&mut self) -> Node<'_>;

    /// The value as a dictionary code, if it is string-like.
    fn as_text(&self) -> Option<&str> {
        None
    }

    /// Overwrite the value with `text`. Returns `false` if the type cannot
    /// hold text.
    fn set_text(&mut self, _text: String) -> bool {
        false
    }

    /// Build a value from `text`, for filling an empty `Option`.
    fn from_text(_text: String) -> Option<Self>
    where
        Self: Sized,
    {
        None
    }
}

/// Name-based field access for a registered type.
pub trait Reflect: Send + 'static {
    fn descriptor(&self) -> &'static TypeDescriptor;

    fn field(&self, name: &str) -> Option<&dyn Field>;

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Field>;
}

/// Access to a type's cached descriptor without an instance.
pub trait Describe {
    fn type_descriptor() -> &'static TypeDescriptor;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Receives the text for the code held in `companion` (or the field name
    /// minus the description suffix when `companion` is `None`).
    Description {
        namespace: &'static str,
        companion: Option<&'static str>,
    },
    Plain,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    name: &'static str,
    declared_in: &'static str,
    kind: FieldKind,
    shape: Shape,
}

impl FieldDescriptor {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the type that declares the field (differs for base fields).
    pub fn declared_in(&self) -> &'static str {
        self.declared_in
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn is_description(&self) -> bool {
        matches!(self.kind, FieldKind::Description { .. })
    }
}

#[derive(Debug)]
pub struct TypeDescriptor {
    name: &'static str,
    type_id: TypeId,
    fields: Vec<FieldDescriptor>,
    always_process: bool,
}

impl TypeDescriptor {
    pub fn of<T: 'static>(name: &'static str) -> DescriptorBuilder<T> {
        DescriptorBuilder {
            descriptor: TypeDescriptor {
                name,
                type_id: TypeId::of::<T>(),
                fields: Vec::new(),
                always_process: false,
            },
            _owner: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// All fields, base fields first.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Declared to hold description fields somewhere below, so the walker
    /// skips the structural scan.
    pub fn always_process(&self) -> bool {
        self.always_process
    }
}

pub struct DescriptorBuilder<T> {
    descriptor: TypeDescriptor,
    _owner: PhantomData<fn() -> T>,
}

impl<T: 'static> DescriptorBuilder<T> {
    /// Add a plain field. The accessor only pins the field's type.
    pub fn field<F: Field>(mut self, name: &'static str, _accessor: impl Fn(&T) -> &F) -> Self {
        self.push(name, FieldKind::Plain, F::shape());
        self
    }

    /// Add a description field filled from dictionary `D`.
    pub fn description<D: Dictionary>(
        mut self,
        name: &'static str,
        companion: Option<&'static str>,
    ) -> Self {
        let kind = FieldKind::Description {
            namespace: D::NAMESPACE,
            companion,
        };
        self.push(name, kind, Shape::Primitive);
        self
    }

    /// Flatten the fields of an embedded base struct into this type.
    pub fn extends<B: Describe>(mut self, _accessor: impl Fn(&T) -> &B) -> Self {
        let base = B::type_descriptor();
        self.descriptor.fields.extend(base.fields.iter().copied());
        self.descriptor.always_process |= base.always_process;
        self
    }

    pub fn always_process(mut self) -> Self {
        self.descriptor.always_process = true;
        self
    }

    pub fn build(self) -> TypeDescriptor {
        self.descriptor
    }

    fn push(&mut self, name: &'static str, kind: FieldKind, shape: Shape) {
        self.descriptor.fields.push(FieldDescriptor {
            name,
            declared_in: self.descriptor.name,
            kind,
            shape,
        });
    }
}

// ── Field implementations ──

impl Field for String {
    fn shape() -> Shape {
        Shape::Primitive
    }

    fn node(&mut self) -> Node<'_> {
        Node::Primitive
    }

    fn as_text(&self) -> Option<&str> {
        Some(self.as_str())
    }

    fn set_text(&mut self, text: String) -> bool {
        *self = text;
        true
    }

    fn from_text(text: String) -> Option<Self> {
        Some(text)
    }
}

impl Field for &'static str {
    fn shape() -> Shape {
        Shape::Primitive
    }

    fn node(&mut self) -> Node<'_> {
        Node::Primitive
    }

    fn as_text(&self) -> Option<&str> {
        Some(*self)
    }
}

macro_rules! primitive_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Field for $ty {
                fn shape() -> Shape {
                    Shape::Primitive
                }

                fn node(&mut self) -> Node<'_> {
                    Node::Primitive
                }
            }
        )*
    };
}

primitive_field!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, (),
    SystemTime, Duration,
);

impl<T: Field> Field for Option<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn node(&mut self) -> Node<'_> {
        match self {
            Some(value) => value.node(),
            None => Node::Null,
        }
    }

    fn as_text(&self) -> Option<&str> {
        self.as_ref().and_then(|value| value.as_text())
    }

    fn set_text(&mut self, text: String) -> bool {
        match self {
            Some(value) => value.set_text(text),
            None => match T::from_text(text) {
                Some(value) => {
                    *self = Some(value);
                    true
                }
                None => false,
            },
        }
    }
}

impl<T: Field> Field for Box<T> {
    fn shape() -> Shape {
        T::shape()
    }

    fn node(&mut self) -> Node<'_> {
        (**self).node()
    }

    fn as_text(&self) -> Option<&str> {
        (**self).as_text()
    }

    fn set_text(&mut self, text: String) -> bool {
        (**self).set_text(text)
    }

    fn from_text(text: String) -> Option<Self> {
        T::from_text(text).map(Box::new)
    }
}

impl Field for Box<dyn Reflect> {
    fn shape() -> Shape {
        Shape::Dynamic
    }

    fn node(&mut self) -> Node<'_> {
        Node::Object(&mut **self)
    }
}

impl<T: Reflect + Describe> Field for Arc<Mutex<T>> {
    fn shape() -> Shape {
        Shape::Object(T::type_descriptor)
    }

    fn node(&mut self) -> Node<'_> {
        let shared: SharedObject = self.clone();
        Node::Shared(shared)
    }
}

impl Field for SharedObject {
    fn shape() -> Shape {
        Shape::Dynamic
    }

    fn node(&mut self) -> Node<'_> {
        Node::Shared(Arc::clone(self))
    }
}

impl<T: Field> Field for Vec<T> {
    fn shape() -> Shape {
        Shape::Seq(T::shape)
    }

    fn node(&mut self) -> Node<'_> {
        Node::Seq(Box::new(self.iter_mut().map(|item| item.node())))
    }
}

impl<T: Field> Field for VecDeque<T> {
    fn shape() -> Shape {
        Shape::Seq(T::shape)
    }

    fn node(&mut self) -> Node<'_> {
        Node::Seq(Box::new(self.iter_mut().map(|item| item.node())))
    }
}

impl<K: Send, V: Field, S: BuildHasher + Send> Field for HashMap<K, V, S> {
    fn shape() -> Shape {
        Shape::Map(V::shape)
    }

    fn node(&mut self) -> Node<'_> {
        Node::Map(Box::new(self.values_mut().map(|value| value.node())))
    }
}

impl<K: Send, V: Field> Field for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::Map(V::shape)
    }

    fn node(&mut self) -> Node<'_> {
        Node::Map(Box::new(self.values_mut().map(|value| value.node())))
    }
}

/// Register a struct with the object-graph walker.
///
/// List every field the walker should see. Description fields name their
/// dictionary and, optionally, their companion code field; by default the
/// companion is the field name without the description suffix (`_desc`).
///
/// ```
/// use dictdesc::reflect;
///
/// dictdesc::dictionary! {
///     pub enum OrderStatus("order_status") {
///         Pending = "pending",
///     }
/// }
///
/// pub struct Audit {
///     pub created_by: String,
/// }
///
/// pub struct Order {
///     pub audit: Audit,
///     pub status: String,
///     pub status_desc: String,
///     pub state: Option<String>,
///     pub label: String,
///     pub lines: Vec<Order>,
/// }
///
/// reflect!(Audit { created_by });
///
/// reflect! {
///     #[always_process]
///     Order extends audit {
///         status,
///         status_desc: dict(OrderStatus),
///         state,
///         label: dict(OrderStatus, state),
///         lines,
///     }
/// }
/// ```
///
/// Only non-generic structs are supported.
#[macro_export]
macro_rules! reflect {
    (@flag $builder:ident, always_process) => {
        $builder.always_process()
    };

    (@field $builder:ident, $ty:ident, $field:ident) => {
        $builder.field(stringify!($field), |target: &$ty| &target.$field)
    };
    (@field $builder:ident, $ty:ident, $field:ident : dict($dict:path)) => {
        $builder.description::<$dict>(stringify!($field), None)
    };
    (@field $builder:ident, $ty:ident, $field:ident : dict($dict:path, $companion:ident)) => {
        $builder.description::<$dict>(stringify!($field), Some(stringify!($companion)))
    };

    (@base $target:ident, $name:ident) => {
        None
    };
    (@base $target:ident, $name:ident, $base:ident) => {
        $crate::core::reflect::Reflect::field(&$target.$base, $name)
    };

    (@base_mut $target:ident, $name:ident) => {
        None
    };
    (@base_mut $target:ident, $name:ident, $base:ident) => {
        $crate::core::reflect::Reflect::field_mut(&mut $target.$base, $name)
    };

    (
        $(#[$flag:ident])?
        $ty:ident $(extends $base:ident)? {
            $( $field:ident $(: dict($dict:path $(, $companion:ident)?))? ),* $(,)?
        }
    ) => {
        impl $crate::core::reflect::Describe for $ty {
            fn type_descriptor() -> &'static $crate::core::reflect::TypeDescriptor {
                static DESCRIPTOR: ::std::sync::OnceLock<$crate::core::reflect::TypeDescriptor> =
                    ::std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    let builder = $crate::core::reflect::TypeDescriptor::of::<$ty>(stringify!($ty));
                    $( let builder = builder.extends(|target: &$ty| &target.$base); )?
                    $( let builder = $crate::reflect!(@flag builder, $flag); )?
                    $(
                        let builder = $crate::reflect!(
                            @field builder, $ty, $field $(: dict($dict $(, $companion)?))?
                        );
                    )*
                    builder.build()
                })
            }
        }

        impl $crate::core::reflect::Reflect for $ty {
            fn descriptor(&self) -> &'static $crate::core::reflect::TypeDescriptor {
                <Self as $crate::core::reflect::Describe>::type_descriptor()
            }

            fn field(&self, name: &str) -> Option<&dyn $crate::core::reflect::Field> {
                match name {
                    $( stringify!($field) => Some(&self.$field as &dyn $crate::core::reflect::Field), )*
                    _ => $crate::reflect!(@base self, name $(, $base)?),
                }
            }

            fn field_mut(&mut self, name: &str) -> Option<&mut dyn $crate::core::reflect::Field> {
                match name {
                    $( stringify!($field) => Some(&mut self.$field as &mut dyn $crate::core::reflect::Field), )*
                    _ => $crate::reflect!(@base_mut self, name $(, $base)?),
                }
            }
        }

        impl $crate::core::reflect::Field for $ty {
            fn shape() -> $crate::core::reflect::Shape {
                $crate::core::reflect::Shape::Object(
                    <$ty as $crate::core::reflect::Describe>::type_descriptor,
                )
            }

            fn node(&mut self) -> $crate::core::reflect::Node<'_> {
                $crate::core::reflect::Node::Object(self)
            }
        }
    };
}

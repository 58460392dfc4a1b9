//! graphql::types
//!
//! Type descriptions that drive selection-set synthesis.
//!
//! # Design
//!
//! Every type that can appear in a result template implements
//! [`GraphQLType`], which describes the *declared* shape of the type without
//! looking at any value. Object types list their fields in declaration order,
//! containers describe their element type, and everything else is a scalar.
//!
//! Object types are normally declared through [`graphql_object!`], which
//! keeps the struct definition, its serde deserialization and its
//! [`GraphQLType`] description in one place. Hand-written implementations are
//! equally valid:
//!
//! ```
//! use nexaa::graphql::{FieldDescriptor, GraphQLType, TypeDescriptor};
//!
//! struct Registry {
//!     name: String,
//!     locked: bool,
//! }
//!
//! impl GraphQLType for Registry {
//!     fn describe() -> TypeDescriptor {
//!         TypeDescriptor::object([
//!             FieldDescriptor::new::<String>("name"),
//!             FieldDescriptor::new::<bool>("locked"),
//!         ])
//!     }
//! }
//!
//! assert_eq!(Registry::describe().fields().map(<[_]>::len), Some(2));
//! ```
//!
//! [`graphql_object!`]: crate::graphql_object

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;

/// A type whose declared shape can be turned into a selection set.
pub trait GraphQLType {
    /// Describe the declared shape of this type.
    fn describe() -> TypeDescriptor;
}

/// Declared shape of a type.
#[derive(Debug, Clone)]
pub enum TypeDescriptor {
    /// A leaf value: number, string, boolean, identifier, custom scalar.
    Scalar,
    /// A composite type with named fields, in declaration order.
    Object(Vec<FieldDescriptor>),
    /// An ordered repeated container of the element type.
    List(Box<TypeDescriptor>),
    /// A kind that has no GraphQL selection equivalent (maps, unit, ...).
    Unsupported(&'static str),
}

impl TypeDescriptor {
    /// Build an object description from its fields.
    pub fn object(fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        TypeDescriptor::Object(fields.into_iter().collect())
    }

    /// Build a list description whose element is `T`.
    pub fn list_of<T: GraphQLType + ?Sized>() -> Self {
        TypeDescriptor::List(Box::new(T::describe()))
    }

    /// Fields of an object description, `None` for any other kind.
    pub fn fields(&self) -> Option<&[FieldDescriptor]> {
        match self {
            TypeDescriptor::Object(fields) => Some(fields),
            _ => None,
        }
    }
}

/// One declared field of an object type.
///
/// The type description is held as a function pointer and evaluated on
/// demand, so self-referential types can be described without looping.
#[derive(Clone)]
pub struct FieldDescriptor {
    name: Cow<'static, str>,
    ty: fn() -> TypeDescriptor,
}

impl FieldDescriptor {
    /// Describe a field named `name` of type `T`.
    ///
    /// `name` is emitted verbatim, so it may carry arguments, e.g.
    /// `namespace(name: $name)`.
    pub fn new<T: GraphQLType + ?Sized>(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ty: T::describe,
        }
    }

    /// The wire name (with any argument pattern) of this field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the declared type of this field.
    pub fn type_descriptor(&self) -> TypeDescriptor {
        (self.ty)()
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Convert a Rust field identifier to its lowerCamelCase wire name.
///
/// Matches serde's `rename_all = "camelCase"` for snake_case identifiers, so
/// the selected field and the deserialized key always agree.
///
/// ```
/// use nexaa::graphql::camel_case;
///
/// assert_eq!(camel_case("created_at"), "createdAt");
/// assert_eq!(camel_case("r#type"), "type");
/// ```
pub fn camel_case(ident: &str) -> String {
    let ident = ident.strip_prefix("r#").unwrap_or(ident);
    let mut pascal = String::with_capacity(ident.len());
    let mut capitalize = true;
    for ch in ident.chars() {
        if ch == '_' {
            capitalize = true;
        } else if capitalize {
            pascal.push(ch.to_ascii_uppercase());
            capitalize = false;
        } else {
            pascal.push(ch);
        }
    }

    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Selection text for a field whose response key is `key`.
///
/// `selection` is used as is when its leading name already is `key`;
/// otherwise it is aliased as `key: selection` so the response comes back
/// under `key`.
///
/// ```
/// use nexaa::graphql::aliased_selection;
///
/// assert_eq!(aliased_selection("namespace", "namespace(name: $name)"), "namespace(name: $name)");
/// assert_eq!(aliased_selection("ns", "namespace(name: $name)"), "ns: namespace(name: $name)");
/// ```
pub fn aliased_selection(key: &str, selection: &'static str) -> Cow<'static, str> {
    let leading: &str = selection
        .trim_start()
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .next()
        .unwrap_or("");
    if leading == key {
        Cow::Borrowed(selection)
    } else {
        Cow::Owned(format!("{key}: {}", selection.trim_start()))
    }
}

macro_rules! scalar_types {
    ($($ty:ty),* $(,)?) => {
        $(
            impl GraphQLType for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::Scalar
                }
            }
        )*
    };
}

scalar_types!(
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    str,
    String,
    serde_json::Value,
);

impl<Tz: chrono::TimeZone> GraphQLType for chrono::DateTime<Tz> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Scalar
    }
}

impl<T: GraphQLType> GraphQLType for Option<T> {
    fn describe() -> TypeDescriptor {
        T::describe()
    }
}

impl<T: GraphQLType + ?Sized> GraphQLType for Box<T> {
    fn describe() -> TypeDescriptor {
        T::describe()
    }
}

impl<T: GraphQLType> GraphQLType for Vec<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::list_of::<T>()
    }
}

impl<T: GraphQLType> GraphQLType for VecDeque<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::list_of::<T>()
    }
}

impl<T: GraphQLType> GraphQLType for [T] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::list_of::<T>()
    }
}

impl<K, V, S> GraphQLType for HashMap<K, V, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Unsupported("map")
    }
}

impl<K, V> GraphQLType for BTreeMap<K, V> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Unsupported("map")
    }
}

impl GraphQLType for () {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Unsupported("unit")
    }
}

/// Declare a result-template struct together with its [`GraphQLType`]
/// description and serde deserialization.
///
/// Fields are selected in declaration order under their lowerCamelCase
/// name. A `#[graphql("...")]` annotation replaces the selected text, which
/// is how a root field binds arguments to document variables. When the
/// annotation selects a differently named field, it is aliased to the
/// camelCase field name (see [`aliased_selection`]).
///
/// serde is reached through this crate, so callers need no direct serde
/// dependency.
///
/// ```ignore
/// nexaa::graphql_object! {
///     #[derive(Debug, Default)]
///     pub struct NamespaceByName {
///         #[graphql("namespace(name: $name)")]
///         pub namespace: Namespace,
///     }
/// }
/// ```
///
/// [`GraphQLType`]: crate::graphql::GraphQLType
#[macro_export]
macro_rules! graphql_object {
    (@wire $field:ident) => {
        $crate::graphql::camel_case(::std::stringify!($field))
    };
    (@wire $field:ident, $wire:literal) => {
        $crate::graphql::aliased_selection(
            &$crate::graphql::camel_case(::std::stringify!($field)),
            $wire,
        )
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[graphql($wire:literal)])?
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive($crate::__private::serde::Deserialize)]
        #[serde(crate = "nexaa::__private::serde", rename_all = "camelCase")]
        $vis struct $name {
            $( $fvis $field: $ty, )*
        }

        impl $crate::graphql::GraphQLType for $name {
            fn describe() -> $crate::graphql::TypeDescriptor {
                let fields: ::std::vec::Vec<$crate::graphql::FieldDescriptor> = ::std::vec![
                    $(
                        $crate::graphql::FieldDescriptor::new::<$ty>(
                            $crate::graphql_object!(@wire $field $(, $wire)?)
                        ),
                    )*
                ];
                $crate::graphql::TypeDescriptor::Object(fields)
            }
        }
    };
}

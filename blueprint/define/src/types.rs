//! Core vocabulary for specification fields and endpoints.
//!
//! - [`Primitive`] - Built-in scalar types (`UUID`, `String`, `Int`, ...)
//! - [`TypeRef`] - A field's type: a primitive or a reference to an object/enum
//! - [`Modifier`] - Field modifiers (`Array`, `Nullable`)
//! - [`Operation`] - CRUD operations a resource or resource field supports
//! - [`HttpMethod`] - HTTP methods used by endpoints

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Built-in scalar types.
///
/// Names are matched case-sensitively, so `"string"` is not a primitive and
/// would be looked up as an object or enum name instead.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use blueprint_define::Primitive;
///
/// assert_eq!(Primitive::from_str("Timestamp").unwrap(), Primitive::Timestamp);
/// assert!(Primitive::Int.is_ordered());
/// assert!(!Primitive::Bool.is_ordered());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum Primitive {
    #[serde(rename = "UUID")]
    #[strum(serialize = "UUID")]
    Uuid,
    String,
    Int,
    Bool,
    Date,
    Timestamp,
}

impl Primitive {
    /// Returns true for types with a total order (usable in range filters).
    pub fn is_ordered(self) -> bool {
        matches!(self, Primitive::Int | Primitive::Date | Primitive::Timestamp)
    }

    /// Returns true for free-text types (usable in `like` filters).
    pub fn is_text(self) -> bool {
        matches!(self, Primitive::String)
    }
}

/// The type of a field.
///
/// Specification documents spell types as plain strings. During
/// deserialization a primitive name becomes [`TypeRef::Primitive`] and any
/// other name becomes [`TypeRef::Named`]. The resolution pass
/// ([`crate::resolve::resolve_types`]) turns every `Named` into either
/// [`TypeRef::Object`] or [`TypeRef::Enum`], so a resolved model never
/// contains `Named`.
///
/// ## Examples
///
/// ```
/// use blueprint_define::{Primitive, TypeRef};
///
/// let ty: TypeRef = "String".parse().unwrap();
/// assert_eq!(ty, TypeRef::Primitive(Primitive::String));
///
/// let ty: TypeRef = "Address".parse().unwrap();
/// assert_eq!(ty, TypeRef::Named("Address".to_string()));
/// assert_eq!(ty.name(), "Address");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A built-in scalar type.
    Primitive(Primitive),
    /// Reference to an [`Object`](crate::Object) by name.
    Object(String),
    /// Reference to an [`Enum`](crate::Enum) by name.
    Enum(String),
    /// A name that has not been resolved yet.
    Named(String),
}

impl TypeRef {
    pub fn object(name: impl Into<String>) -> Self {
        TypeRef::Object(name.into())
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        TypeRef::Enum(name.into())
    }

    /// Parses a type name: primitives are recognized, everything else is
    /// left as an unresolved [`TypeRef::Named`].
    pub fn from_name(name: &str) -> Self {
        match Primitive::from_str(name) {
            Ok(p) => TypeRef::Primitive(p),
            Err(_) => TypeRef::Named(name.to_string()),
        }
    }

    /// The type name as written in a specification document.
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Primitive(p) => (*p).into(),
            TypeRef::Object(name) | TypeRef::Enum(name) | TypeRef::Named(name) => name,
        }
    }

    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            TypeRef::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Name of the referenced object, if this is an object reference.
    pub fn object_name(&self) -> Option<&str> {
        match self {
            TypeRef::Object(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.primitive().is_some_and(Primitive::is_ordered)
    }

    pub fn is_text(&self) -> bool {
        self.primitive().is_some_and(Primitive::is_text)
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, TypeRef::Named(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TypeRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TypeRef::from_name(s))
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.trim().is_empty() {
            return Err(serde::de::Error::custom("field type cannot be empty"));
        }
        Ok(TypeRef::from_name(raw.trim()))
    }
}

impl JsonSchema for TypeRef {
    fn schema_name() -> Cow<'static, str> {
        "TypeRef".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "string",
            "minLength": 1,
            "description": "A primitive type (UUID, String, Int, Bool, Date, Timestamp) or the name of an object or enum declared in the same service"
        })
    }
}

/// Field modifiers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumIter,
    EnumString,
)]
pub enum Modifier {
    /// The field holds a list of values of its type.
    Array,
    /// The field may be omitted or null.
    Nullable,
}

/// CRUD operations.
///
/// Names are exact PascalCase: `"create"` is rejected at parse time.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use blueprint_define::Operation;
///
/// assert_eq!(Operation::from_str("Read").unwrap(), Operation::Read);
/// assert!(Operation::from_str("read").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumIter,
    EnumString,
)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

/// HTTP methods supported by endpoints.
///
/// Serialized and displayed in uppercase.
///
/// ```
/// use blueprint_define::HttpMethod;
///
/// assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
/// assert_eq!(HttpMethod::Patch.as_lowercase(), "patch");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Lowercase method name, as used for OpenAPI path item keys.
    pub fn as_lowercase(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }
}

//! Field definitions.
//!
//! A [`Field`] is the building block of objects, endpoint parameters, and
//! response bodies. A [`ResourceField`] adds the subset of CRUD operations the
//! field participates in.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::naming::to_camel_case;
use crate::types::{Modifier, Operation, TypeRef};

/// A named, typed field.
///
/// ## Required fields
///
/// A field is required iff it is not [`Modifier::Nullable`] and has no
/// (non-empty) default value.
///
/// ## Examples
///
/// ```
/// use blueprint_define::{Field, Modifier, Primitive, TypeRef};
///
/// let name = Field::new("firstName", TypeRef::Primitive(Primitive::String));
/// assert!(name.is_required());
///
/// let nickname = Field::new("nickname", TypeRef::Primitive(Primitive::String))
///     .with_modifier(Modifier::Nullable);
/// assert!(!nickname.is_required());
///
/// let limit = Field::new("limit", TypeRef::Primitive(Primitive::Int)).with_default("50");
/// assert!(!limit.is_required());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Default value, as written in the specification. Empty means none.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub example: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            ty,
            default: String::new(),
            example: String::new(),
            modifiers: Vec::new(),
        }
    }

    /// Adds a modifier unless the field already carries it.
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn is_nullable(&self) -> bool {
        self.has_modifier(Modifier::Nullable)
    }

    pub fn is_array(&self) -> bool {
        self.has_modifier(Modifier::Array)
    }

    pub fn has_default(&self) -> bool {
        !self.default.is_empty()
    }

    pub fn is_required(&self) -> bool {
        !self.is_nullable() && !self.has_default()
    }

    /// Whether the field supports containment predicates: strings
    /// (substring) and arrays (membership).
    pub fn is_containable(&self) -> bool {
        self.is_array() || self.ty.is_text()
    }

    /// The camelCase key used for this field in JSON payloads and paths.
    pub fn tag_name(&self) -> String {
        to_camel_case(&self.name)
    }
}

/// Tag names of the required fields, in declaration order.
///
/// ```
/// use blueprint_define::{Field, Modifier, Primitive, TypeRef};
/// use blueprint_define::field::required_field_names;
///
/// let fields = vec![
///     Field::new("ID", TypeRef::Primitive(Primitive::Uuid)),
///     Field::new("nickname", TypeRef::Primitive(Primitive::String)).with_modifier(Modifier::Nullable),
///     Field::new("firstName", TypeRef::Primitive(Primitive::String)),
/// ];
/// assert_eq!(required_field_names(&fields), vec!["id", "firstName"]);
/// ```
pub fn required_field_names(fields: &[Field]) -> Vec<String> {
    fields
        .iter()
        .filter(|f| f.is_required())
        .map(Field::tag_name)
        .collect()
}

/// A resource field: a [`Field`] plus the operations it participates in.
///
/// Serialized flat, so a resource field looks like a field with an extra
/// `operations` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceField {
    #[serde(flatten)]
    pub field: Field,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl ResourceField {
    pub fn new(field: Field, operations: impl IntoIterator<Item = Operation>) -> Self {
        Self {
            field,
            operations: operations.into_iter().collect(),
        }
    }

    pub fn has_operation(&self, operation: Operation) -> bool {
        self.operations.contains(&operation)
    }

    pub fn name(&self) -> &str {
        &self.field.name
    }
}

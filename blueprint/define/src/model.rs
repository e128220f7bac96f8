//! The specification model: services, enums, objects, and resources.
//!
//! A [`Service`] is the root of the entity graph. It is built once by the
//! parser, expanded by the overlays, and then handed to renderers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::field::{Field, ResourceField};
use crate::naming::{pluralize, to_kebab_case};
use crate::types::Operation;

/// Root of a specification.
///
/// ## Examples
///
/// ```
/// use blueprint_define::{Object, Service};
///
/// let mut service = Service::new("School API", "1.0.0");
/// service.objects.push(Object::new("Address"));
///
/// assert!(service.has_object("Address"));
/// assert!(service.find_enum("Address").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    #[serde(default)]
    pub enums: Vec<Enum>,
    #[serde(default)]
    pub objects: Vec<Object>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Service {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn find_object(&self, name: &str) -> Option<&Object> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn find_enum(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }

    pub fn find_resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }

    pub fn has_object(&self, name: &str) -> bool {
        self.find_object(name).is_some()
    }

    pub fn has_enum(&self, name: &str) -> bool {
        self.find_enum(name).is_some()
    }

    /// Counts objects with the given name. A well-formed service has at
    /// most one.
    pub fn count_objects(&self, name: &str) -> usize {
        self.objects.iter().filter(|o| o.name == name).count()
    }

    /// Every endpoint in the service, paired with its owning resource.
    pub fn endpoints(&self) -> impl Iterator<Item = (&Resource, &Endpoint)> {
        self.resources
            .iter()
            .flat_map(|r| r.endpoints.iter().map(move |e| (r, e)))
    }
}

/// A server the API is reachable at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// A named set of string values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enum {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub values: Vec<EnumValue>,
}

impl Enum {
    pub fn new(name: impl Into<String>, description: impl Into<String>, values: Vec<EnumValue>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            values,
        }
    }

    pub fn value_names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|v| v.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl EnumValue {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A reusable structural type.
///
/// Field order is significant: it is preserved by every transformation and
/// drives the order of properties in rendered output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Object {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Object {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            fields: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    pub fn find_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// An API resource with CRUD operations.
///
/// ## Examples
///
/// ```
/// use blueprint_define::{Operation, Resource};
///
/// let resource = Resource::new("StudentGroup", [Operation::Read]);
/// assert_eq!(resource.collection_path(), "/student-groups");
/// assert!(resource.has_operation(Operation::Read));
/// assert!(!resource.has_operation(Operation::Delete));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub fields: Vec<ResourceField>,
    /// Custom endpoints, and after the base overlay the standard ones too.
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    /// Skips the implicit `ID` and `Meta` columns.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skip_auto_columns: bool,
}

impl Resource {
    pub fn new(name: impl Into<String>, operations: impl IntoIterator<Item = Operation>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            operations: operations.into_iter().collect(),
            fields: Vec::new(),
            endpoints: Vec::new(),
            skip_auto_columns: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_fields(mut self, fields: Vec<ResourceField>) -> Self {
        self.fields = fields;
        self
    }

    pub fn has_operation(&self, operation: Operation) -> bool {
        self.operations.contains(&operation)
    }

    /// Fields participating in `operation`, in declaration order.
    pub fn fields_with(&self, operation: Operation) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(move |f| f.has_operation(operation))
            .map(|f| &f.field)
    }

    pub fn find_field(&self, name: &str) -> Option<&ResourceField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn find_endpoint(&self, name: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.name == name)
    }

    /// Base path of the resource: `/` followed by the kebab-cased plural name.
    pub fn collection_path(&self) -> String {
        format!("/{}", to_kebab_case(&pluralize(&self.name)))
    }

    /// Full path of one of this resource's endpoints.
    pub fn endpoint_path(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.collection_path(), endpoint.path)
    }
}

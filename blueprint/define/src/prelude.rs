//! Convenient re-exports for building and inspecting specifications.
//!
//! ```
//! use blueprint_define::prelude::*;
//!
//! let field = Field::new("ID", TypeRef::Primitive(Primitive::Uuid));
//! assert_eq!(field.tag_name(), "id");
//! ```

pub use crate::endpoint::{
    CONTENT_TYPE_JSON, Endpoint, EndpointRequest, EndpointResponse, ErrorResponse,
};
pub use crate::errors::{UnresolvedType, ValidationError, ValidationErrors};
pub use crate::field::{Field, ResourceField};
pub use crate::model::{Enum, EnumValue, Object, Resource, Server, Service};
pub use crate::types::{HttpMethod, Modifier, Operation, Primitive, TypeRef};
pub use crate::validation::{validate_and_resolve, validate_service};

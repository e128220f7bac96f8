//! Blueprint Definition Library
//!
//! This crate provides the specification model consumed by the blueprint
//! overlay engine: a minimal, declarative description of API resources that
//! the overlays expand into a complete API model.
//!
//! ## Core Types
//!
//! - [`Service`] - Root of a specification (enums, objects, resources)
//! - [`Resource`] - An API resource with its allowed CRUD [`Operation`]s
//! - [`ResourceField`] - A [`Field`] plus the operations it participates in
//! - [`Object`] - A reusable structural type
//! - [`Enum`] - A named set of values
//! - [`Endpoint`] - An endpoint with its [`EndpointRequest`] and [`EndpointResponse`]
//! - [`TypeRef`] - A field type: a [`Primitive`] or a reference to an object/enum
//!
//! ## Supporting Modules
//!
//! - [`naming`] - camelCase/kebab-case conversion and pluralization
//! - [`resolve`] - Resolves type names into typed references
//! - [`validation`] - Structural checks run before any overlay
//! - [`standard`] - Names of the entities the overlays synthesize
//!
//! ## Examples
//!
//! ```
//! use blueprint_define::prelude::*;
//!
//! let mut service = Service::new("School API", "1.0.0");
//! service.resources.push(
//!     Resource::new("Students", [Operation::Create, Operation::Read]).with_fields(vec![
//!         ResourceField::new(
//!             Field::new("firstName", TypeRef::Primitive(Primitive::String)),
//!             [Operation::Create, Operation::Read],
//!         ),
//!     ]),
//! );
//!
//! assert!(validate_service(&service).is_ok());
//! assert_eq!(service.resources[0].collection_path(), "/students");
//! ```

pub mod endpoint;
pub mod errors;
pub mod field;
pub mod model;
pub mod naming;
pub mod prelude;
pub mod resolve;
pub mod standard;
pub mod types;
pub mod validation;

// Re-export main types at crate root
pub use endpoint::{CONTENT_TYPE_JSON, Endpoint, EndpointRequest, EndpointResponse, ErrorResponse};
pub use errors::{UnresolvedType, ValidationError, ValidationErrors};
pub use field::{Field, ResourceField};
pub use model::{Enum, EnumValue, Object, Resource, Server, Service};
pub use types::{HttpMethod, Modifier, Operation, Primitive, TypeRef};

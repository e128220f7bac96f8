//! The base overlay.
//!
//! Turns a minimal specification into a complete CRUD API model:
//!
//! 1. Validates the input and resolves every field type
//! 2. Adds the standard enums and objects
//! 3. Prepends the `ID` and `Meta` columns to each resource
//! 4. Adds one body object per readable resource, then rejects objects
//!    squatting on another object's filter names
//! 5. Synthesizes the standard endpoints allowed by each resource
//! 6. Attaches the standard error responses to every endpoint
//! 7. Builds request-error objects for every endpoint with a body
//!
//! Every step checks names before adding anything, so applying the overlay
//! to its own output changes nothing.
//!
//! ## Examples
//!
//! ```
//! use blueprint_define::prelude::*;
//! use blueprint_overlay::apply_base_overlay;
//!
//! let mut service = Service::new("School", "1.0");
//! service.resources.push(
//!     Resource::new("Students", [Operation::Create, Operation::Read]).with_fields(vec![
//!         ResourceField::new(
//!             Field::new("firstName", TypeRef::Primitive(Primitive::String)),
//!             [Operation::Create, Operation::Read],
//!         ),
//!     ]),
//! );
//!
//! let expanded = apply_base_overlay(&service).unwrap();
//! let students = expanded.find_resource("Students").unwrap();
//! let endpoints: Vec<_> = students.endpoints.iter().map(|e| e.name.as_str()).collect();
//! assert_eq!(endpoints, vec!["Create", "Get", "List", "Search"]);
//! assert!(expanded.has_object("Students"));
//! assert!(expanded.has_object("StudentsCreateRequestError"));
//! ```

use blueprint_define::resolve::resolve_types;
use blueprint_define::standard::{ID_FIELD, META, META_FIELD};
use blueprint_define::validation::validate_service;
use blueprint_define::{Field, Object, Operation, Primitive, Resource, ResourceField, Service, TypeRef};
use tracing::{debug, info, instrument};

use crate::endpoints::{error_responses, standard_endpoints};
use crate::errors::OverlayError;
use crate::filter::check_filter_names;
use crate::request_error::RequestErrorBuilder;
use crate::standard::ensure_standard_entities;

/// Applies the base overlay, returning the expanded service.
///
/// The input is not modified.
///
/// ## Errors
///
/// - [`OverlayError::Invalid`] when the input fails structural validation,
///   or declares an object under another object's filter name
/// - [`OverlayError::Reference`] when a field type names an unknown object
///   or enum
#[instrument(skip_all, fields(service = %service.name))]
pub fn apply_base_overlay(service: &Service) -> Result<Service, OverlayError> {
    validate_service(service)?;

    let mut out = service.clone();
    resolve_types(&mut out).map_err(|unresolved| OverlayError::Reference { unresolved })?;

    ensure_standard_entities(&mut out);

    for resource in &mut out.resources {
        add_auto_columns(resource);
    }

    let body_objects: Vec<Object> = out
        .resources
        .iter()
        .filter(|r| r.has_operation(Operation::Read) && !out.has_object(&r.name))
        .map(resource_object)
        .collect();
    for object in &body_objects {
        debug!(name = %object.name, fields = object.fields.len(), "adding resource object");
    }
    out.objects.extend(body_objects);
    check_filter_names(&out)?;

    for resource in &mut out.resources {
        let added = standard_endpoints(resource);
        debug!(resource = %resource.name, endpoints = added.len(), "adding standard endpoints");

        // Standard endpoints lead, custom endpoints keep their relative order.
        let custom = std::mem::take(&mut resource.endpoints);
        resource.endpoints = added;
        resource.endpoints.extend(custom);

        for endpoint in &mut resource.endpoints {
            endpoint.error_responses = error_responses(endpoint.has_body());
        }
    }

    let request_errors = {
        let mut builder = RequestErrorBuilder::new(&out.objects);
        for resource in &out.resources {
            for endpoint in &resource.endpoints {
                builder.add_endpoint(resource, endpoint);
            }
        }
        builder.finish()
    };
    debug!(count = request_errors.len(), "adding request error objects");
    out.objects.extend(request_errors);

    info!(
        objects = out.objects.len(),
        enums = out.enums.len(),
        endpoints = out.endpoints().count(),
        "base overlay applied"
    );
    Ok(out)
}

/// Prepends `ID` and `Meta` unless the resource opts out or already has
/// them. The columns are read-only: they take part in `Read` when the
/// resource allows it, and in nothing otherwise.
fn add_auto_columns(resource: &mut Resource) {
    if resource.skip_auto_columns {
        return;
    }

    let operations: Vec<Operation> = if resource.has_operation(Operation::Read) {
        vec![Operation::Read]
    } else {
        Vec::new()
    };

    let mut columns = Vec::new();
    if resource.find_field(ID_FIELD).is_none() {
        columns.push(ResourceField::new(
            Field::new(ID_FIELD, TypeRef::Primitive(Primitive::Uuid))
                .with_description(format!("Unique identifier of the {}", resource.name)),
            operations.clone(),
        ));
    }
    if resource.find_field(META_FIELD).is_none() {
        columns.push(ResourceField::new(
            Field::new(META_FIELD, TypeRef::object(META))
                .with_description("Audit information maintained by the server"),
            operations,
        ));
    }

    if !columns.is_empty() {
        debug!(resource = %resource.name, count = columns.len(), "adding auto columns");
        resource.fields.splice(0..0, columns);
    }
}

/// The object a resource is read as: its `Read` fields in declaration order.
fn resource_object(resource: &Resource) -> Object {
    Object::new(resource.name.clone())
        .with_description(resource.description.clone())
        .with_fields(resource.fields_with(Operation::Read).cloned().collect())
}

//! Structural validation for specifications.
//!
//! Runs before any overlay, so the overlays can assume a well-formed model.
//! Problems serde cannot express (duplicate names, operation subsets,
//! conflicting response bodies) are collected here in one pass.
//!
//! ## Validation Checks
//!
//! - **Names**: non-empty, unique per kind, no object/enum clashes
//! - **Fields**: unique within objects and resources
//! - **Operations**: resource field operations are a subset of the resource's
//! - **Endpoints**: unique per resource, no response with both body styles
//! - **Enums**: at least one value
//!
//! ## Examples
//!
//! ```
//! use blueprint_define::{Object, Service};
//! use blueprint_define::validation::validate_service;
//!
//! let mut service = Service::new("School", "1.0");
//! service.objects.push(Object::new("Address"));
//! service.objects.push(Object::new("Address"));
//!
//! let errors = validate_service(&service).unwrap_err();
//! assert_eq!(errors.len(), 1);
//! ```

use std::collections::HashSet;

use crate::errors::{ValidationError, ValidationErrors};
use crate::model::Service;
use crate::resolve::resolve_types;

/// Checks a service for structural problems.
///
/// ## Errors
///
/// Returns every problem found, in declaration order.
pub fn validate_service(service: &Service) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    // Phase 1: per-entity checks.
    validate_enums(service, &mut errors);
    validate_objects(service, &mut errors);
    validate_resources(service, &mut errors);

    // Phase 2: service-wide name checks.
    validate_unique_names(service, &mut errors);

    ValidationErrors(errors).into_result()
}

/// Validates the structure, then resolves field types.
///
/// This is what a parser runs on freshly deserialized input.
pub fn validate_and_resolve(service: &mut Service) -> Result<(), ValidationErrors> {
    validate_service(service)?;
    resolve_types(service).map_err(ValidationErrors::from)
}

fn validate_enums(service: &Service, errors: &mut Vec<ValidationError>) {
    for e in &service.enums {
        if e.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName {
                location: "enums".to_string(),
            });
        }
        if e.values.is_empty() {
            errors.push(ValidationError::EmptyEnum { name: e.name.clone() });
        }
        push_duplicates(
            e.value_names(),
            |name| ValidationError::DuplicateName {
                kind: "enum value",
                name: format!("{}.{}", e.name, name),
            },
            errors,
        );
    }
}

fn validate_objects(service: &Service, errors: &mut Vec<ValidationError>) {
    for object in &service.objects {
        if object.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName {
                location: "objects".to_string(),
            });
        }
        for field in &object.fields {
            if field.name.trim().is_empty() {
                errors.push(ValidationError::EmptyName {
                    location: format!("objects.{}.fields", object.name),
                });
            }
        }
        push_duplicates(
            object.fields.iter().map(|f| f.name.as_str()),
            |field| ValidationError::DuplicateField {
                owner: format!("object '{}'", object.name),
                field: field.to_string(),
            },
            errors,
        );
    }
}

fn validate_resources(service: &Service, errors: &mut Vec<ValidationError>) {
    for resource in &service.resources {
        if resource.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName {
                location: "resources".to_string(),
            });
        }

        for rf in &resource.fields {
            if rf.field.name.trim().is_empty() {
                errors.push(ValidationError::EmptyName {
                    location: format!("resources.{}.fields", resource.name),
                });
            }
            for op in &rf.operations {
                if !resource.has_operation(*op) {
                    errors.push(ValidationError::OperationNotAllowed {
                        resource: resource.name.clone(),
                        field: rf.field.name.clone(),
                        operation: *op,
                    });
                }
            }
        }
        push_duplicates(
            resource.fields.iter().map(|f| f.name()),
            |field| ValidationError::DuplicateField {
                owner: format!("resource '{}'", resource.name),
                field: field.to_string(),
            },
            errors,
        );

        for endpoint in &resource.endpoints {
            if endpoint.name.trim().is_empty() {
                errors.push(ValidationError::EmptyName {
                    location: format!("resources.{}.endpoints", resource.name),
                });
            }
            if endpoint.response.body_object.is_some() && !endpoint.response.body_fields.is_empty() {
                errors.push(ValidationError::ConflictingResponseBody {
                    resource: resource.name.clone(),
                    endpoint: endpoint.name.clone(),
                });
            }
        }
        push_duplicates(
            resource.endpoints.iter().map(|e| e.name.as_str()),
            |endpoint| ValidationError::DuplicateEndpoint {
                resource: resource.name.clone(),
                endpoint: endpoint.to_string(),
            },
            errors,
        );
    }
}

fn validate_unique_names(service: &Service, errors: &mut Vec<ValidationError>) {
    push_duplicates(
        service.enums.iter().map(|e| e.name.as_str()),
        |name| ValidationError::DuplicateName {
            kind: "enum",
            name: name.to_string(),
        },
        errors,
    );
    push_duplicates(
        service.objects.iter().map(|o| o.name.as_str()),
        |name| ValidationError::DuplicateName {
            kind: "object",
            name: name.to_string(),
        },
        errors,
    );
    push_duplicates(
        service.resources.iter().map(|r| r.name.as_str()),
        |name| ValidationError::DuplicateName {
            kind: "resource",
            name: name.to_string(),
        },
        errors,
    );

    let enum_names: HashSet<&str> = service.enums.iter().map(|e| e.name.as_str()).collect();
    let mut reported = HashSet::new();
    for object in &service.objects {
        if enum_names.contains(object.name.as_str()) && reported.insert(object.name.as_str()) {
            errors.push(ValidationError::ObjectEnumClash {
                name: object.name.clone(),
            });
        }
    }
}

// Reports each repeated name once, at its second occurrence.
fn push_duplicates<'a>(
    names: impl Iterator<Item = &'a str>,
    make_error: impl Fn(&str) -> ValidationError,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for name in names {
        if !seen.insert(name) && reported.insert(name) {
            errors.push(make_error(name));
        }
    }
}

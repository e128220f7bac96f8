//! Shared vocabulary synthesized once per service.
//!
//! - Enums: `ErrorCode`, `ErrorFieldCode`
//! - Objects: `Error`, `ErrorField`, `Pagination`, `Meta`
//!
//! Entities are only added when no entity of the same name exists, so a
//! user-declared `Error` object wins over the standard one.

use blueprint_define::standard::{
    ERROR, ERROR_CODE, ERROR_FIELD, ERROR_FIELD_CODE, META, PAGINATION,
};
use blueprint_define::{Enum, EnumValue, Field, Modifier, Object, Primitive, Service, TypeRef};
use tracing::debug;

/// `ErrorCode` values with their HTTP status and description, in status order.
pub const ERROR_CODES: [(&str, u16, &str); 8] = [
    ("BadRequest", 400, "The request is malformed"),
    ("Unauthorized", 401, "Authentication is required"),
    ("Forbidden", 403, "The caller is not allowed to perform this action"),
    ("NotFound", 404, "The requested entity does not exist"),
    ("Conflict", 409, "The request conflicts with the current state"),
    ("UnprocessableEntity", 422, "The request body failed validation"),
    ("RateLimited", 429, "Too many requests"),
    ("Internal", 500, "An internal error occurred"),
];

const ERROR_FIELD_CODES: [(&str, &str); 4] = [
    ("AlreadyExists", "The value already exists"),
    ("Required", "The field is required"),
    ("NotFound", "The referenced entity does not exist"),
    ("InvalidValue", "The value is invalid"),
];

pub fn error_code_enum() -> Enum {
    Enum::new(
        ERROR_CODE,
        "Machine-readable error codes",
        ERROR_CODES
            .iter()
            .map(|(name, _, description)| EnumValue::new(*name, *description))
            .collect(),
    )
}

pub fn error_field_code_enum() -> Enum {
    Enum::new(
        ERROR_FIELD_CODE,
        "Machine-readable field validation codes",
        ERROR_FIELD_CODES
            .iter()
            .map(|(name, description)| EnumValue::new(*name, *description))
            .collect(),
    )
}

pub fn error_object() -> Object {
    Object::new(ERROR)
        .with_description("Error returned by every failing request")
        .with_fields(vec![
            Field::new("code", TypeRef::enumeration(ERROR_CODE)),
            Field::new("message", TypeRef::Primitive(Primitive::String))
                .with_description("Human-readable description of the error"),
        ])
}

pub fn error_field_object() -> Object {
    Object::new(ERROR_FIELD)
        .with_description("Validation error for a single request field")
        .with_fields(vec![
            Field::new("code", TypeRef::enumeration(ERROR_FIELD_CODE)),
            Field::new("message", TypeRef::Primitive(Primitive::String))
                .with_description("Human-readable description of the problem"),
        ])
}

pub fn pagination_object() -> Object {
    let int = || TypeRef::Primitive(Primitive::Int);
    Object::new(PAGINATION)
        .with_description("Position of a page within a result set")
        .with_fields(vec![
            Field::new("offset", int()).with_description("Number of skipped items"),
            Field::new("limit", int()).with_description("Maximum number of items in the page"),
            Field::new("total", int()).with_description("Total number of matching items"),
        ])
}

pub fn meta_object() -> Object {
    let timestamp = || TypeRef::Primitive(Primitive::Timestamp);
    let actor = || TypeRef::Primitive(Primitive::Uuid);
    Object::new(META)
        .with_description("Audit information maintained by the server")
        .with_fields(vec![
            Field::new("createdAt", timestamp()).with_description("When the entity was created"),
            Field::new("createdBy", actor())
                .with_description("Who created the entity")
                .with_modifier(Modifier::Nullable),
            Field::new("updatedAt", timestamp()).with_description("When the entity was last updated"),
            Field::new("updatedBy", actor())
                .with_description("Who last updated the entity")
                .with_modifier(Modifier::Nullable),
        ])
}

/// Adds the standard enums and objects that are missing from `service`.
pub fn ensure_standard_entities(service: &mut Service) {
    for e in [error_code_enum(), error_field_code_enum()] {
        if service.has_enum(&e.name) {
            debug!(name = %e.name, "keeping existing enum");
        } else {
            debug!(name = %e.name, "adding standard enum");
            service.enums.push(e);
        }
    }

    for object in [
        error_object(),
        error_field_object(),
        pagination_object(),
        meta_object(),
    ] {
        if service.has_object(&object.name) {
            debug!(name = %object.name, "keeping existing object");
        } else {
            debug!(name = %object.name, "adding standard object");
            service.objects.push(object);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_enum_has_eight_values_in_order() {
        let names: Vec<_> = error_code_enum().value_names().map(str::to_string).collect();
        assert_eq!(
            names,
            vec![
                "BadRequest",
                "Unauthorized",
                "Forbidden",
                "NotFound",
                "Conflict",
                "UnprocessableEntity",
                "RateLimited",
                "Internal",
            ]
        );
    }

    #[test]
    fn error_field_code_enum_values() {
        let names: Vec<_> = error_field_code_enum().value_names().map(str::to_string).collect();
        assert_eq!(names, vec!["AlreadyExists", "Required", "NotFound", "InvalidValue"]);
    }

    #[test]
    fn meta_actor_columns_are_nullable() {
        let meta = meta_object();
        assert_eq!(
            meta.field_names(),
            vec!["createdAt", "createdBy", "updatedAt", "updatedBy"]
        );
        assert!(!meta.fields[0].is_nullable());
        assert!(meta.fields[1].is_nullable());
        assert!(!meta.fields[2].is_nullable());
        assert!(meta.fields[3].is_nullable());
    }

    #[test]
    fn ensure_is_idempotent() {
        let mut service = Service::new("Test", "1");
        ensure_standard_entities(&mut service);
        ensure_standard_entities(&mut service);

        assert_eq!(service.enums.len(), 2);
        assert_eq!(service.objects.len(), 4);
    }

    #[test]
    fn user_declared_object_is_left_untouched() {
        let mut service = Service::new("Test", "1");
        let custom = Object::new("Pagination").with_fields(vec![Field::new(
            "cursor",
            TypeRef::Primitive(Primitive::String),
        )]);
        service.objects.push(custom.clone());

        ensure_standard_entities(&mut service);

        assert_eq!(service.count_objects("Pagination"), 1);
        assert_eq!(service.find_object("Pagination"), Some(&custom));
    }
}

//! Integration tests for the full expansion pipeline.
//!
//! These tests exercise `expand` on complete services and check the laws the
//! expanded model must satisfy, independent of any renderer.

use blueprint_define::field::required_field_names;
use blueprint_define::prelude::*;
use blueprint_overlay::{OverlayError, apply_base_overlay, apply_filter_overlay, expand};

/// The canonical school scenario: a CRUD `Students` resource with an enum.
fn students_service() -> Service {
    use Operation::*;

    let mut service = Service::new("School API", "1.0.0");
    service.enums.push(Enum::new(
        "StudentStatus",
        "Enrollment status",
        vec![
            EnumValue::new("Active", ""),
            EnumValue::new("Graduated", ""),
        ],
    ));
    service.resources.push(
        Resource::new("Students", [Create, Read, Update, Delete]).with_fields(vec![
            ResourceField::new(
                Field::new("firstName", TypeRef::Primitive(Primitive::String)),
                [Create, Read, Update],
            ),
            ResourceField::new(
                Field::new("status", TypeRef::from_name("StudentStatus")),
                [Create, Read, Update],
            ),
        ]),
    );
    service
}

fn contacts_service() -> Service {
    let mut service = Service::new("Contacts", "0.1.0");
    service.objects.push(Object::new("Contact").with_fields(vec![
        Field::new("email", TypeRef::Primitive(Primitive::String)),
        Field::new("nickname", TypeRef::Primitive(Primitive::String))
            .with_modifier(Modifier::Nullable),
        Field::new("tags", TypeRef::Primitive(Primitive::String)).with_modifier(Modifier::Array),
    ]));
    service
}

fn object<'a>(service: &'a Service, name: &str) -> &'a Object {
    service
        .find_object(name)
        .unwrap_or_else(|| panic!("missing object {name}"))
}

// === students scenario ===

#[test]
fn students_object_has_auto_columns_then_fields() {
    let expanded = expand(&students_service()).unwrap();
    assert_eq!(
        object(&expanded, "Students").field_names(),
        vec!["ID", "Meta", "firstName", "status"]
    );
}

#[test]
fn students_routes() {
    let expanded = expand(&students_service()).unwrap();
    let students = expanded.find_resource("Students").unwrap();

    let routes: Vec<_> = students
        .endpoints
        .iter()
        .map(|e| format!("{} {}", e.method, students.endpoint_path(e)))
        .collect();
    assert_eq!(
        routes,
        vec![
            "POST /students",
            "GET /students/{id}",
            "GET /students",
            "PATCH /students/{id}",
            "DELETE /students/{id}",
            "POST /students/_search",
        ]
    );
}

#[test]
fn students_create_request_error() {
    let expanded = expand(&students_service()).unwrap();
    let errors = object(&expanded, "StudentsCreateRequestError");

    assert_eq!(errors.field_names(), vec!["firstName", "status"]);
    for field in &errors.fields {
        assert_eq!(field.ty, TypeRef::object("ErrorField"));
        assert!(field.is_nullable());
    }
}

#[test]
fn students_filter_references_satellites() {
    let expanded = expand(&students_service()).unwrap();
    let filter = object(&expanded, "StudentsFilter");

    let pairs = [
        ("equals", "StudentsFilterEquals"),
        ("notEquals", "StudentsFilterEquals"),
        ("greaterThan", "StudentsFilterRange"),
        ("contains", "StudentsFilterContains"),
        ("like", "StudentsFilterLike"),
        ("notNull", "StudentsFilterNull"),
    ];
    for (field, target) in pairs {
        assert_eq!(filter.find_field(field).unwrap().ty, TypeRef::object(target));
        assert!(expanded.has_object(target));
    }
}

// === laws ===

#[test]
fn expansion_is_deterministic() {
    let service = students_service();
    let first = serde_json::to_string(&expand(&service).unwrap()).unwrap();
    let second = serde_json::to_string(&expand(&service).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn create_body_preserves_field_order() {
    let expanded = expand(&students_service()).unwrap();
    let create = expanded
        .find_resource("Students")
        .and_then(|r| r.find_endpoint("Create"))
        .unwrap();

    let names: Vec<_> = create.request.body_params.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["firstName", "status"]);
}

#[test]
fn required_law_holds_for_every_object() {
    let mut service = students_service();
    service.resources[0].fields.push(ResourceField::new(
        Field::new("nickname", TypeRef::Primitive(Primitive::String))
            .with_modifier(Modifier::Nullable),
        [Operation::Read],
    ));
    service.resources[0].fields.push(ResourceField::new(
        Field::new("grade", TypeRef::Primitive(Primitive::Int)).with_default("1"),
        [Operation::Read],
    ));

    let expanded = expand(&service).unwrap();
    assert_eq!(
        required_field_names(&object(&expanded, "Students").fields),
        vec!["id", "meta", "firstName", "status"]
    );
    for object in &expanded.objects {
        for field in &object.fields {
            assert_eq!(
                field.is_required(),
                !field.is_nullable() && field.default.is_empty(),
                "{}.{}",
                object.name,
                field.name
            );
        }
    }
}

#[test]
fn read_only_resource_has_no_write_endpoints() {
    let mut service = students_service();
    service.resources[0].operations = vec![Operation::Read];
    for field in &mut service.resources[0].fields {
        field.operations = vec![Operation::Read];
    }

    let expanded = expand(&service).unwrap();
    let names: Vec<_> = expanded.resources[0]
        .endpoints
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["Get", "List", "Search"]);
    assert!(!expanded.has_object("StudentsCreateRequestError"));
}

#[test]
fn unprocessable_entity_only_with_body() {
    let expanded = expand(&students_service()).unwrap();
    for (resource, endpoint) in expanded.endpoints() {
        let statuses = endpoint.status_codes();
        assert_eq!(
            statuses.contains(&422),
            !endpoint.request.body_params.is_empty(),
            "{}.{}",
            resource.name,
            endpoint.name
        );
        for status in [400, 401, 403, 404, 409, 429, 500] {
            assert!(statuses.contains(&status));
        }
    }
}

#[test]
fn every_object_gets_a_complete_filter_group() {
    let expanded = expand(&students_service()).unwrap();
    let sources: Vec<_> = expanded
        .objects
        .iter()
        .filter(|o| !o.name.contains("Filter"))
        .map(|o| o.name.clone())
        .collect();

    for source in sources {
        for name in blueprint_define::standard::filter_names(&source) {
            assert_eq!(expanded.count_objects(&name), 1, "{name}");
        }
    }
}

// === idempotence ===

#[test]
fn base_overlay_does_not_duplicate_standard_objects() {
    let once = apply_base_overlay(&students_service()).unwrap();
    let twice = apply_base_overlay(&once).unwrap();

    for name in ["Error", "ErrorField", "Pagination", "Meta", "Students"] {
        assert_eq!(twice.count_objects(name), 1, "{name}");
    }
    assert_eq!(once, twice);
}

#[test]
fn filter_overlay_is_idempotent() {
    let base = apply_base_overlay(&students_service()).unwrap();
    let once = apply_filter_overlay(&base);
    let twice = apply_filter_overlay(&once);
    assert_eq!(once, twice);
}

#[test]
fn expand_is_idempotent() {
    let once = expand(&students_service()).unwrap();
    let twice = expand(&once).unwrap();
    assert_eq!(once, twice);
}

// === edge cases ===

#[test]
fn contact_without_ordered_fields_has_empty_range() {
    let expanded = expand(&contacts_service()).unwrap();

    assert!(object(&expanded, "ContactFilterRange").fields.is_empty());
    assert_eq!(
        object(&expanded, "ContactFilterLike").field_names(),
        vec!["email", "nickname"]
    );
    assert_eq!(
        object(&expanded, "ContactFilterContains").field_names(),
        vec!["email", "nickname", "tags"]
    );
    assert_eq!(
        object(&expanded, "ContactFilterNull").field_names(),
        vec!["nickname"]
    );
}

#[test]
fn self_referential_body_object_terminates() {
    let mut service = Service::new("Org", "1.0.0");
    service.objects.push(Object::new("Employee").with_fields(vec![
        Field::new("name", TypeRef::Primitive(Primitive::String)),
        Field::new("reports", TypeRef::from_name("Employee")).with_modifier(Modifier::Array),
    ]));
    service.resources.push(
        Resource::new("Teams", [Operation::Create, Operation::Read]).with_fields(vec![
            ResourceField::new(
                Field::new("lead", TypeRef::from_name("Employee")),
                [Operation::Create, Operation::Read],
            ),
        ]),
    );

    let expanded = expand(&service).unwrap();
    let employee_errors = object(&expanded, "EmployeeRequestError");
    let reports = employee_errors.find_field("reports").unwrap();
    assert_eq!(reports.ty, TypeRef::object("EmployeeRequestError"));
    assert!(reports.is_array());
    assert!(reports.is_nullable());
    assert_eq!(expanded.count_objects("EmployeeRequestError"), 1);
}

#[test]
fn unknown_type_is_reported_with_location() {
    let mut service = students_service();
    service.resources[0].fields[1].field.ty = TypeRef::from_name("Grade");

    match expand(&service) {
        Err(OverlayError::Reference { unresolved }) => {
            assert_eq!(unresolved.len(), 1);
            assert_eq!(unresolved[0].location, "resources.Students.fields.status");
            assert_eq!(unresolved[0].type_name, "Grade");
        }
        other => panic!("expected a reference error, got {other:?}"),
    }
}

#[test]
fn custom_endpoint_referencing_unknown_object_fails() {
    let mut service = students_service();
    service.resources[0].endpoints.push(
        Endpoint::new("Transcript", HttpMethod::Get, "/{id}/transcript")
            .with_response(EndpointResponse::object(200, "Transcript")),
    );

    assert!(matches!(
        expand(&service),
        Err(OverlayError::UnknownBodyObject { .. })
    ));
}

#[test]
fn object_shadowing_a_filter_group_is_rejected() {
    let mut service = Service::new("Shop", "1.0.0");
    service.objects.push(Object::new("Price").with_fields(vec![Field::new(
        "amount",
        TypeRef::Primitive(Primitive::Int),
    )]));
    service.objects.push(Object::new("PriceFilter").with_fields(vec![Field::new(
        "currency",
        TypeRef::Primitive(Primitive::String),
    )]));

    match expand(&service) {
        Err(OverlayError::Invalid(errors)) => assert!(matches!(
            errors.errors(),
            [ValidationError::FilterNameClash { name, owner }]
                if name == "PriceFilter" && owner == "Price"
        )),
        other => panic!("expected a filter name clash, got {other:?}"),
    }
}

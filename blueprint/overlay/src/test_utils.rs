//! Shared fixtures for unit tests.

use blueprint_define::{
    Field, Modifier, Object, Operation, Primitive, Resource, ResourceField, Service, TypeRef,
};

pub(crate) fn string(name: &str) -> Field {
    Field::new(name, TypeRef::Primitive(Primitive::String))
}

/// A CRUD `Students` resource with a nested `Address` object.
pub(crate) fn school() -> Service {
    use Operation::*;

    let mut service = Service::new("School", "1.0.0");
    service.objects.push(Object::new("Address").with_fields(vec![
        string("street"),
        string("city"),
        string("zip").with_modifier(Modifier::Nullable),
    ]));
    service.resources.push(
        Resource::new("Students", [Create, Read, Update, Delete])
            .with_description("Students enrolled in the school")
            .with_fields(vec![
                ResourceField::new(string("firstName"), [Create, Read, Update]),
                ResourceField::new(
                    string("lastName").with_modifier(Modifier::Nullable),
                    [Create, Read, Update],
                ),
                ResourceField::new(string("email"), [Create]),
                ResourceField::new(
                    Field::new("address", TypeRef::from_name("Address")),
                    [Create, Read, Update],
                ),
            ]),
    );
    service
}

//! Request-error objects.
//!
//! A request-error object mirrors the shape of a request body field by
//! field, so a server can report which fields failed validation:
//!
//! - Leaf fields (primitives, enums, unknown objects) become a nullable
//!   `ErrorField`.
//! - Fields referencing an existing object become a nullable reference to
//!   that object's own `<Object>RequestError`, keeping the `Array` modifier.
//!
//! Nested request-error objects are built once per object name and are
//! emitted before the objects that reference them. Self-referential
//! objects terminate because a name is reserved before its fields are
//! mirrored.

use std::collections::{HashMap, HashSet};

use blueprint_define::standard::{ERROR_FIELD, request_error_name};
use blueprint_define::{Endpoint, Field, Modifier, Object, Resource, TypeRef};

pub(crate) struct RequestErrorBuilder<'a> {
    objects: HashMap<&'a str, &'a Object>,
    reserved: HashSet<String>,
    output: Vec<Object>,
}

impl<'a> RequestErrorBuilder<'a> {
    /// `objects` are the objects request bodies may reference. Any of them
    /// that already is a request-error object is never rebuilt.
    pub fn new(objects: &'a [Object]) -> Self {
        Self {
            objects: objects.iter().map(|o| (o.name.as_str(), o)).collect(),
            reserved: objects.iter().map(|o| o.name.clone()).collect(),
            output: Vec::new(),
        }
    }

    /// Builds `<Resource><Endpoint>RequestError` for an endpoint with a body.
    pub fn add_endpoint(&mut self, resource: &Resource, endpoint: &Endpoint) {
        if !endpoint.has_body() {
            return;
        }
        let name = request_error_name(&format!("{}{}", resource.name, endpoint.name));
        if !self.reserved.insert(name.clone()) {
            return;
        }

        let fields = self.mirror(&endpoint.request.body_params);
        self.output.push(
            Object::new(name)
                .with_description(format!(
                    "Validation errors for the {} {} request",
                    resource.name, endpoint.name
                ))
                .with_fields(fields),
        );
    }

    /// The generated objects, nested ones first.
    pub fn finish(self) -> Vec<Object> {
        self.output
    }

    fn mirror(&mut self, fields: &[Field]) -> Vec<Field> {
        fields.iter().map(|f| self.mirror_field(f)).collect()
    }

    fn mirror_field(&mut self, field: &Field) -> Field {
        let nested = field
            .ty
            .object_name()
            .and_then(|name| self.objects.get(name).copied());

        let mut mirrored = match nested {
            Some(object) => {
                let ty = TypeRef::object(self.object_errors(object));
                let mut f = Field::new(field.name.clone(), ty);
                if field.is_array() {
                    f = f.with_modifier(Modifier::Array);
                }
                f
            }
            None => Field::new(field.name.clone(), TypeRef::object(ERROR_FIELD)),
        };
        mirrored.description = field.description.clone();
        mirrored.with_modifier(Modifier::Nullable)
    }

    // Returns the name of `object`'s request-error object, building it on
    // first use.
    fn object_errors(&mut self, object: &'a Object) -> String {
        let name = request_error_name(&object.name);
        if self.reserved.insert(name.clone()) {
            let fields = self.mirror(&object.fields);
            self.output.push(
                Object::new(name.clone())
                    .with_description(format!("Validation errors for {}", object.name))
                    .with_fields(fields),
            );
        }
        name
    }
}

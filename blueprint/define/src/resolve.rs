//! Type resolution.
//!
//! Parsed documents carry field types as [`TypeRef::Named`] strings. The
//! resolution pass rewrites them once into [`TypeRef::Object`] or
//! [`TypeRef::Enum`] so later stages never compare type names again.
//!
//! Two indexes are available:
//!
//! - [`TypeIndex::declared`] - only what the service declares right now
//! - [`TypeIndex::expected`] - declared entities plus everything the overlays
//!   will synthesize (standard objects and enums, resource body objects, and
//!   filter objects), so input documents may reference them up front

use std::collections::HashSet;

use crate::errors::UnresolvedType;
use crate::field::Field;
use crate::model::Service;
use crate::standard::{STANDARD_ENUMS, STANDARD_OBJECTS, filter_names};
use crate::types::{Operation, TypeRef};

/// Known object and enum names.
#[derive(Debug, Clone, Default)]
pub struct TypeIndex {
    objects: HashSet<String>,
    enums: HashSet<String>,
}

impl TypeIndex {
    pub fn declared(service: &Service) -> Self {
        Self {
            objects: service.objects.iter().map(|o| o.name.clone()).collect(),
            enums: service.enums.iter().map(|e| e.name.clone()).collect(),
        }
    }

    pub fn expected(service: &Service) -> Self {
        let mut index = Self::declared(service);
        index.enums.extend(STANDARD_ENUMS.iter().map(|s| s.to_string()));
        index.objects.extend(STANDARD_OBJECTS.iter().map(|s| s.to_string()));
        index.objects.extend(
            service
                .resources
                .iter()
                .filter(|r| r.has_operation(Operation::Read))
                .map(|r| r.name.clone()),
        );

        let base: Vec<String> = index.objects.iter().cloned().collect();
        for name in &base {
            index.objects.extend(filter_names(name));
        }
        index
    }

    pub fn has_object(&self, name: &str) -> bool {
        self.objects.contains(name)
    }

    pub fn has_enum(&self, name: &str) -> bool {
        self.enums.contains(name)
    }

    /// Resolves a type reference against this index.
    ///
    /// Returns `None` when the referenced name is unknown, or when an
    /// already-resolved reference points at an entity of the wrong kind.
    pub fn resolve(&self, ty: &TypeRef) -> Option<TypeRef> {
        match ty {
            TypeRef::Primitive(_) => Some(ty.clone()),
            TypeRef::Object(name) => self.has_object(name).then(|| ty.clone()),
            TypeRef::Enum(name) => self.has_enum(name).then(|| ty.clone()),
            TypeRef::Named(name) if self.has_enum(name) => Some(TypeRef::Enum(name.clone())),
            TypeRef::Named(name) if self.has_object(name) => Some(TypeRef::Object(name.clone())),
            TypeRef::Named(_) => None,
        }
    }
}

/// Calls `f` with the dotted location and the field for every field in the
/// service: object fields, resource fields, and endpoint fields.
pub fn visit_fields<'a>(service: &'a Service, mut f: impl FnMut(String, &'a Field)) {
    for object in &service.objects {
        for field in &object.fields {
            f(format!("objects.{}.fields.{}", object.name, field.name), field);
        }
    }
    for resource in &service.resources {
        for rf in &resource.fields {
            f(
                format!("resources.{}.fields.{}", resource.name, rf.field.name),
                &rf.field,
            );
        }
        for endpoint in &resource.endpoints {
            for field in endpoint.fields() {
                f(
                    format!(
                        "resources.{}.endpoints.{}.{}",
                        resource.name, endpoint.name, field.name
                    ),
                    field,
                );
            }
        }
    }
}

/// Mutable counterpart of [`visit_fields`].
pub fn visit_fields_mut(service: &mut Service, mut f: impl FnMut(String, &mut Field)) {
    for object in &mut service.objects {
        for field in &mut object.fields {
            f(format!("objects.{}.fields.{}", object.name, field.name), field);
        }
    }
    for resource in &mut service.resources {
        for rf in &mut resource.fields {
            f(
                format!("resources.{}.fields.{}", resource.name, rf.field.name),
                &mut rf.field,
            );
        }
        for endpoint in &mut resource.endpoints {
            let prefix = format!("resources.{}.endpoints.{}", resource.name, endpoint.name);
            for field in endpoint.fields_mut() {
                f(format!("{prefix}.{}", field.name), field);
            }
        }
    }
}

/// Resolves every field type against [`TypeIndex::expected`].
///
/// On failure the service is left partially resolved and every unresolved
/// reference is returned, in traversal order.
///
/// ## Examples
///
/// ```
/// use blueprint_define::{Enum, EnumValue, Field, Object, Service, TypeRef};
/// use blueprint_define::resolve::resolve_types;
///
/// let mut service = Service::new("School", "1.0");
/// service.enums.push(Enum::new("Status", "", vec![EnumValue::new("Active", "")]));
/// service.objects.push(Object::new("Student").with_fields(vec![
///     Field::new("status", TypeRef::from_name("Status")),
/// ]));
///
/// resolve_types(&mut service).unwrap();
/// assert_eq!(service.objects[0].fields[0].ty, TypeRef::enumeration("Status"));
/// ```
pub fn resolve_types(service: &mut Service) -> Result<(), Vec<UnresolvedType>> {
    let index = TypeIndex::expected(service);
    resolve_types_with(service, &index)
}

/// Resolves every field type against a caller-provided index.
pub fn resolve_types_with(service: &mut Service, index: &TypeIndex) -> Result<(), Vec<UnresolvedType>> {
    let mut unresolved = Vec::new();

    visit_fields_mut(service, |location, field| match index.resolve(&field.ty) {
        Some(resolved) => field.ty = resolved,
        None => unresolved.push(UnresolvedType {
            location,
            type_name: field.ty.name().to_string(),
        }),
    });

    if unresolved.is_empty() {
        Ok(())
    } else {
        Err(unresolved)
    }
}

/// Lists every field whose type does not resolve against `index`, without
/// modifying the service. `Named` references always count as unresolved.
pub fn unresolved_types(service: &Service, index: &TypeIndex) -> Vec<UnresolvedType> {
    let mut unresolved = Vec::new();

    visit_fields(service, |location, field| {
        let ok = field.ty.is_resolved() && index.resolve(&field.ty).is_some();
        if !ok {
            unresolved.push(UnresolvedType {
                location,
                type_name: field.ty.name().to_string(),
            });
        }
    });

    unresolved
}

//! The filter overlay.
//!
//! For every object `X` it derives a query vocabulary of six objects:
//!
//! - `XFilterEquals`: every field, for (in)equality
//! - `XFilterRange`: non-array fields of ordered type (`Int`, `Date`, `Timestamp`)
//! - `XFilterContains`: strings and arrays, for containment
//! - `XFilterLike`: non-array strings, for pattern matching
//! - `XFilterNull`: one `Bool` per nullable field
//! - `XFilter`: the top-level filter combining the others, with
//!   `orCondition` and recursive `nestedFilters`
//!
//! Every satellite field is nullable, so clients only send the conditions
//! they need. Satellites are generated even when they end up empty.
//!
//! ## Examples
//!
//! ```
//! use blueprint_define::prelude::*;
//! use blueprint_overlay::apply_filter_overlay;
//!
//! let mut service = Service::new("Contacts", "1.0");
//! service.objects.push(Object::new("Contact").with_fields(vec![
//!     Field::new("email", TypeRef::Primitive(Primitive::String)),
//!     Field::new("nickname", TypeRef::Primitive(Primitive::String))
//!         .with_modifier(Modifier::Nullable),
//! ]));
//!
//! let filtered = apply_filter_overlay(&service);
//! let like = filtered.find_object("ContactFilterLike").unwrap();
//! assert_eq!(like.field_names(), vec!["email", "nickname"]);
//!
//! let null = filtered.find_object("ContactFilterNull").unwrap();
//! assert_eq!(null.field_names(), vec!["nickname"]);
//!
//! // No ordered fields, but the object still exists.
//! assert!(filtered.find_object("ContactFilterRange").unwrap().fields.is_empty());
//! ```

use std::collections::HashSet;

use blueprint_define::standard::{FILTER_SUFFIXES, filter_name, filter_names};
use blueprint_define::{
    Field, Modifier, Object, Primitive, Service, TypeRef, ValidationError, ValidationErrors,
};
use tracing::{debug, info, instrument};

/// One of the five per-field filter objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Satellite {
    Equals,
    Range,
    Contains,
    Like,
    Null,
}

impl Satellite {
    const ALL: [Satellite; 5] = [
        Satellite::Equals,
        Satellite::Range,
        Satellite::Contains,
        Satellite::Like,
        Satellite::Null,
    ];

    fn suffix(self) -> &'static str {
        match self {
            Satellite::Equals => FILTER_SUFFIXES[1],
            Satellite::Range => FILTER_SUFFIXES[2],
            Satellite::Contains => FILTER_SUFFIXES[3],
            Satellite::Like => FILTER_SUFFIXES[4],
            Satellite::Null => FILTER_SUFFIXES[5],
        }
    }

    fn name(self, object: &str) -> String {
        format!("{object}{}", self.suffix())
    }

    /// Fields of the top-level filter referencing this satellite.
    fn operators(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Satellite::Equals => &[
                ("equals", "Fields that must equal the given values"),
                ("notEquals", "Fields that must differ from the given values"),
            ],
            Satellite::Range => &[
                ("greaterThan", "Fields that must be greater than the given values"),
                ("smallerThan", "Fields that must be smaller than the given values"),
                ("greaterOrEqual", "Fields that must be greater than or equal to the given values"),
                ("smallerOrEqual", "Fields that must be smaller than or equal to the given values"),
            ],
            Satellite::Contains => &[
                ("contains", "Fields that must contain the given values"),
                ("notContains", "Fields that must not contain the given values"),
            ],
            Satellite::Like => &[
                ("like", "Fields that must match the given patterns"),
                ("notLike", "Fields that must not match the given patterns"),
            ],
            Satellite::Null => &[
                ("null", "Fields that must be null"),
                ("notNull", "Fields that must not be null"),
            ],
        }
    }

    /// The field this satellite carries for `field`, if any.
    fn project(self, field: &Field) -> Option<Field> {
        let projected = match self {
            Satellite::Equals => {
                let f = Field::new(field.name.clone(), field.ty.clone());
                if field.is_array() {
                    f.with_modifier(Modifier::Array)
                } else {
                    f
                }
            }
            Satellite::Range if !field.is_array() && field.ty.is_ordered() => {
                Field::new(field.name.clone(), field.ty.clone())
            }
            Satellite::Contains if field.is_containable() => {
                Field::new(field.name.clone(), field.ty.clone()).with_modifier(Modifier::Array)
            }
            Satellite::Like if !field.is_array() && field.ty.is_text() => {
                Field::new(field.name.clone(), field.ty.clone())
            }
            Satellite::Null if field.is_nullable() => {
                Field::new(field.name.clone(), TypeRef::Primitive(Primitive::Bool))
            }
            _ => return None,
        };

        Some(
            projected
                .with_description(field.description.clone())
                .with_modifier(Modifier::Nullable),
        )
    }

    fn build(self, object: &Object) -> Object {
        Object::new(self.name(&object.name))
            .with_description(format!("{:?} conditions on {}", self, object.name))
            .with_fields(object.fields.iter().filter_map(|f| self.project(f)).collect())
    }
}

/// Builds the six filter objects for `object`, in append order.
pub fn filter_objects(object: &Object) -> Vec<Object> {
    let mut objects = Vec::with_capacity(FILTER_SUFFIXES.len());
    objects.push(top_level_filter(&object.name));
    objects.extend(Satellite::ALL.iter().map(|s| s.build(object)));
    objects
}

fn top_level_filter(object: &str) -> Object {
    let mut fields = Vec::new();
    for satellite in Satellite::ALL {
        let ty = TypeRef::object(satellite.name(object));
        for (name, description) in satellite.operators() {
            fields.push(
                Field::new(*name, ty.clone())
                    .with_description(*description)
                    .with_modifier(Modifier::Nullable),
            );
        }
    }
    fields.push(
        Field::new("orCondition", TypeRef::Primitive(Primitive::Bool))
            .with_description("Combine the conditions with OR instead of AND"),
    );
    fields.push(
        Field::new("nestedFilters", TypeRef::object(filter_name(object)))
            .with_description("Filters evaluated as nested groups")
            .with_modifier(Modifier::Array),
    );

    Object::new(filter_name(object))
        .with_description(format!("Search filter for {object}"))
        .with_fields(fields)
}

/// Rejects objects that occupy another object's filter names.
///
/// An object named like one of `X`'s filter objects is accepted only when it
/// is exactly the object derived for `X`, as in a service that already went
/// through this overlay. Anything else would silently replace part of `X`'s
/// filter group.
///
/// ## Errors
///
/// One [`ValidationError::FilterNameClash`] per colliding object.
pub fn check_filter_names(service: &Service) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    for owner in &service.objects {
        for derived in filter_objects(owner) {
            match service.find_object(&derived.name) {
                Some(existing) if *existing != derived => {
                    errors.push(ValidationError::FilterNameClash {
                        name: derived.name,
                        owner: owner.name.clone(),
                    });
                }
                _ => {}
            }
        }
    }
    ValidationErrors(errors).into_result()
}

/// Applies the filter overlay, returning a new service.
///
/// Objects that are themselves filter objects of an earlier object are
/// skipped, as are filter objects that already exist, so applying the
/// overlay twice yields the same service.
#[instrument(skip_all, fields(service = %service.name))]
pub fn apply_filter_overlay(service: &Service) -> Service {
    let mut out = service.clone();
    let mut existing: HashSet<String> = service.objects.iter().map(|o| o.name.clone()).collect();
    let mut derived: HashSet<String> = HashSet::new();
    let mut generated = Vec::new();

    for object in &service.objects {
        if derived.contains(&object.name) {
            continue;
        }
        derived.extend(filter_names(&object.name));

        let mut added = 0;
        for filter in filter_objects(object) {
            if existing.insert(filter.name.clone()) {
                generated.push(filter);
                added += 1;
            }
        }
        debug!(object = %object.name, added, "derived filter objects");
    }

    info!(added = generated.len(), "filter overlay applied");
    out.objects.extend(generated);
    out
}

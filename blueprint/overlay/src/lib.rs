//! Blueprint Overlay Engine
//!
//! Expands a minimal blueprint specification into a complete API model in
//! two deterministic passes:
//!
//! - [`apply_base_overlay`] - standard entities, CRUD endpoints, error
//!   responses and request-error objects
//! - [`apply_filter_overlay`] - a filter vocabulary for every object
//!
//! [`expand`] runs both and then [`verify_references`] on the result. Each
//! pass takes the service by reference and returns a new one; applying a
//! pass to its own output changes nothing.
//!
//! ## Examples
//!
//! ```
//! use blueprint_define::prelude::*;
//! use blueprint_overlay::expand;
//!
//! let mut service = Service::new("School", "1.0");
//! service.enums.push(Enum::new(
//!     "StudentStatus",
//!     "",
//!     vec![EnumValue::new("Active", ""), EnumValue::new("Graduated", "")],
//! ));
//! service.resources.push(
//!     Resource::new("Students", [Operation::Create, Operation::Read]).with_fields(vec![
//!         ResourceField::new(
//!             Field::new("status", TypeRef::from_name("StudentStatus")),
//!             [Operation::Create, Operation::Read],
//!         ),
//!     ]),
//! );
//!
//! let expanded = expand(&service).unwrap();
//! let students = expanded.find_object("Students").unwrap();
//! assert_eq!(students.field_names(), vec!["ID", "Meta", "status"]);
//! assert!(expanded.has_object("StudentsFilterEquals"));
//! ```

pub mod base;
pub mod endpoints;
pub mod errors;
pub mod filter;
pub mod pipeline;
mod request_error;
pub mod standard;
pub mod verify;

#[cfg(test)]
mod test_utils;

pub use base::apply_base_overlay;
pub use errors::OverlayError;
pub use filter::apply_filter_overlay;
pub use pipeline::expand;
pub use verify::verify_references;

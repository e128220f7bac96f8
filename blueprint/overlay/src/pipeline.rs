//! The full expansion pipeline.

use blueprint_define::Service;
use tracing::{info, instrument};

use crate::base::apply_base_overlay;
use crate::errors::OverlayError;
use crate::filter::apply_filter_overlay;
use crate::verify::verify_references;

/// Expands a minimal specification into a complete API model: base
/// overlay, then filter overlay, then a final reference check.
///
/// ## Examples
///
/// ```
/// use blueprint_define::prelude::*;
/// use blueprint_overlay::expand;
///
/// let mut service = Service::new("School", "1.0");
/// service.resources.push(Resource::new("Students", [Operation::Read]));
///
/// let expanded = expand(&service).unwrap();
/// assert!(expanded.has_object("StudentsFilter"));
/// ```
///
/// ## Errors
///
/// Returns the first [`OverlayError`] raised by any stage.
#[instrument(skip_all, fields(service = %service.name))]
pub fn expand(service: &Service) -> Result<Service, OverlayError> {
    let base = apply_base_overlay(service)?;
    let filtered = apply_filter_overlay(&base);
    verify_references(&filtered)?;

    info!(
        objects = filtered.objects.len(),
        resources = filtered.resources.len(),
        "specification expanded"
    );
    Ok(filtered)
}

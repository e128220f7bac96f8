//! Final reference check over an expanded service.
//!
//! The base overlay resolves types against the names the overlays are
//! expected to synthesize. Once both passes have run, every reference must
//! point at something that actually exists.

use blueprint_define::Service;
use blueprint_define::resolve::{TypeIndex, unresolved_types};
use tracing::{debug, instrument};

use crate::errors::OverlayError;

/// Checks every field type and response body reference of `service`
/// against the objects and enums it declares.
///
/// ## Errors
///
/// - [`OverlayError::Reference`] for field types that do not resolve,
///   including any leftover unresolved names
/// - [`OverlayError::UnknownBodyObject`] for a response or error body naming
///   an unknown object
#[instrument(skip_all, fields(service = %service.name))]
pub fn verify_references(service: &Service) -> Result<(), OverlayError> {
    let index = TypeIndex::declared(service);

    let unresolved = unresolved_types(service, &index);
    if !unresolved.is_empty() {
        return Err(OverlayError::Reference { unresolved });
    }

    for (resource, endpoint) in service.endpoints() {
        let bodies = endpoint
            .response
            .body_object
            .iter()
            .map(|object| (object, "response body"))
            .chain(
                endpoint
                    .error_responses
                    .iter()
                    .map(|e| (&e.body_object, "error body")),
            );

        for (object, role) in bodies {
            if !index.has_object(object) {
                return Err(OverlayError::UnknownBodyObject {
                    resource: resource.name.clone(),
                    endpoint: endpoint.name.clone(),
                    object: object.clone(),
                    role,
                });
            }
        }
    }

    debug!("all references resolved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply_base_overlay;
    use crate::test_utils::school;
    use blueprint_define::resolve::resolve_types;
    use blueprint_define::{Endpoint, EndpointResponse, HttpMethod, TypeRef};

    fn resolved_school() -> Service {
        let mut service = school();
        resolve_types(&mut service).unwrap();
        service
    }

    #[test]
    fn base_overlay_alone_leaves_forward_filter_references() {
        let base = apply_base_overlay(&school()).unwrap();

        let err = verify_references(&base).unwrap_err();
        match err {
            OverlayError::Reference { unresolved } => {
                assert!(unresolved.iter().all(|u| u.type_name == "StudentsFilter"));
                assert_eq!(
                    unresolved[0].location,
                    "resources.Students.endpoints.Search.filter"
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn resolved_input_passes() {
        assert!(verify_references(&resolved_school()).is_ok());
    }

    #[test]
    fn unknown_response_body_object_is_reported() {
        let mut service = resolved_school();
        service.resources[0].endpoints.push(
            Endpoint::new("Export", HttpMethod::Get, "/export")
                .with_response(EndpointResponse::object(200, "Missing")),
        );

        let err = verify_references(&service).unwrap_err();
        assert!(matches!(
            err,
            OverlayError::UnknownBodyObject { ref object, role: "response body", .. } if object == "Missing"
        ));
    }

    #[test]
    fn named_references_are_unresolved() {
        let mut service = resolved_school();
        service.objects[0].fields[0].ty = TypeRef::Named("Address".to_string());
        assert!(matches!(
            verify_references(&service),
            Err(OverlayError::Reference { .. })
        ));
    }
}

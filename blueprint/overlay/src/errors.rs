//! Error types for the overlay engine.

use blueprint_define::{UnresolvedType, ValidationErrors};
use thiserror::Error;

/// Errors that stop an overlay pass.
///
/// Expansion is deterministic, so none of these are worth retrying: the
/// input specification has to be fixed.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// The input failed structural validation.
    #[error("invalid specification: {0}")]
    Invalid(#[from] ValidationErrors),

    /// Field types naming objects or enums that do not exist.
    #[error("unresolved type references: {}", join_unresolved(.unresolved))]
    Reference {
        /// Every unresolved reference, in traversal order.
        unresolved: Vec<UnresolvedType>,
    },

    /// An endpoint response names an object that does not exist.
    #[error(
        "endpoint '{endpoint}' of resource '{resource}' uses unknown object '{object}' as its {role}"
    )]
    UnknownBodyObject {
        resource: String,
        endpoint: String,
        object: String,
        /// Which body refers to the object (`"response body"` or `"error body"`).
        role: &'static str,
    },
}

fn join_unresolved(unresolved: &[UnresolvedType]) -> String {
    unresolved
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

//! Validation errors for specification models.

use std::fmt;

use thiserror::Error;

use crate::types::Operation;

/// A type name that could not be resolved to a primitive, object, or enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedType {
    /// Dotted path to the field, e.g. `resources.Students.fields.status`.
    pub location: String,
    pub type_name: String,
}

impl fmt::Display for UnresolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown type '{}' at {}", self.type_name, self.location)
    }
}

/// A structural problem in a specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Two entities of the same kind share a name.
    #[error("duplicate {kind} name '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    /// An object and an enum share a name, so references would be ambiguous.
    #[error("'{name}' is declared both as an object and as an enum")]
    ObjectEnumClash { name: String },

    /// A name is empty.
    #[error("empty name at {location}")]
    EmptyName { location: String },

    /// Two fields of the same owner share a name.
    #[error("duplicate field '{field}' in {owner}")]
    DuplicateField { owner: String, field: String },

    /// Two endpoints of the same resource share a name.
    #[error("duplicate endpoint '{endpoint}' in resource '{resource}'")]
    DuplicateEndpoint { resource: String, endpoint: String },

    /// A field type names neither a primitive nor a known object or enum.
    #[error("unknown type '{type_name}' at {location}")]
    UnknownType { location: String, type_name: String },

    /// A resource field declares an operation its resource does not allow.
    #[error(
        "field '{field}' of resource '{resource}' declares operation {operation}, which the resource does not allow"
    )]
    OperationNotAllowed {
        resource: String,
        field: String,
        operation: Operation,
    },

    /// An enum without values.
    #[error("enum '{name}' has no values")]
    EmptyEnum { name: String },

    /// A response that both references an object and declares inline fields.
    #[error(
        "endpoint '{endpoint}' of resource '{resource}' sets both bodyObject and bodyFields on its response"
    )]
    ConflictingResponseBody { resource: String, endpoint: String },

    /// A declared object takes the name of a filter object derived from
    /// another object, but not its shape.
    #[error("object '{name}' collides with a filter object derived from '{owner}'")]
    FilterNameClash { name: String, owner: String },
}

impl From<UnresolvedType> for ValidationError {
    fn from(u: UnresolvedType) -> Self {
        ValidationError::UnknownType {
            location: u.location,
            type_name: u.type_name,
        }
    }
}

/// Every validation error found in one pass, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when no errors were collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "{single}"),
            errors => {
                write!(f, "{} validation errors:", errors.len())?;
                for err in errors {
                    write!(f, "\n  - {err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<UnresolvedType>> for ValidationErrors {
    fn from(unresolved: Vec<UnresolvedType>) -> Self {
        ValidationErrors(unresolved.into_iter().map(ValidationError::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_error_displays_inline() {
        let errs = ValidationErrors(vec![ValidationError::EmptyEnum {
            name: "Status".to_string(),
        }]);
        assert_eq!(errs.to_string(), "enum 'Status' has no values");
    }

    #[test]
    fn multiple_errors_display_as_list() {
        let errs = ValidationErrors(vec![
            ValidationError::EmptyEnum {
                name: "Status".to_string(),
            },
            ValidationError::DuplicateName {
                kind: "object",
                name: "Address".to_string(),
            },
        ]);
        let msg = errs.to_string();
        assert!(msg.starts_with("2 validation errors:"));
        assert!(msg.contains("- enum 'Status' has no values"));
        assert!(msg.contains("- duplicate object name 'Address'"));
    }

    #[test]
    fn operation_error_is_actionable() {
        let err = ValidationError::OperationNotAllowed {
            resource: "Students".to_string(),
            field: "firstName".to_string(),
            operation: Operation::Delete,
        };
        let msg = err.to_string();
        assert!(msg.contains("firstName"));
        assert!(msg.contains("Students"));
        assert!(msg.contains("Delete"));
    }
}

//! Loading specification documents.
//!
//! Specifications are YAML or JSON documents deserialized straight into
//! [`Service`]. Serde rejects unknown operations, modifiers and methods and
//! missing required keys, with the line and column of the problem. The
//! structural checks serde cannot express run afterwards, followed by type
//! resolution.
//!
//! ## Examples
//!
//! ```
//! use blueprint_gen::parser::{SpecFormat, parse_service};
//!
//! let source = r#"
//! name: School API
//! version: 1.0.0
//! resources:
//!   - name: Students
//!     operations: [Read]
//!     fields:
//!       - name: firstName
//!         type: String
//!         operations: [Read]
//! "#;
//!
//! let service = parse_service(source, SpecFormat::Yaml, "school.yaml").unwrap();
//! assert_eq!(service.resources[0].fields[0].field.name, "firstName");
//! ```

use std::fs;
use std::path::Path;

use blueprint_define::Service;
use blueprint_define::validation::validate_and_resolve;
use tracing::{debug, instrument};

use crate::errors::ParseError;

/// Document format of a specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Yaml,
    Json,
}

impl SpecFormat {
    /// Detects the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(SpecFormat::Yaml),
            "json" => Some(SpecFormat::Json),
            _ => None,
        }
    }
}

/// Reads and parses the specification at `path`.
///
/// ## Errors
///
/// Returns a [`ParseError`] when the file cannot be read, has an unknown
/// extension, fails to deserialize, or fails validation.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_service(path: &Path) -> Result<Service, ParseError> {
    let origin = path.display().to_string();
    let format = SpecFormat::from_path(path).ok_or_else(|| ParseError::UnsupportedFormat {
        path: origin.clone(),
    })?;
    let source = fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: origin.clone(),
        source,
    })?;
    debug!(bytes = source.len(), ?format, "read specification");

    parse_service(&source, format, &origin)
}

/// Parses a specification from text. `origin` names the document in errors.
pub fn parse_service(source: &str, format: SpecFormat, origin: &str) -> Result<Service, ParseError> {
    let mut service: Service = match format {
        SpecFormat::Yaml => serde_yaml::from_str(source).map_err(|e| {
            let (line, column) = e
                .location()
                .map(|loc| (loc.line(), loc.column()))
                .unwrap_or((0, 0));
            ParseError::Syntax {
                path: origin.to_string(),
                line,
                column,
                message: e.to_string(),
            }
        })?,
        SpecFormat::Json => serde_json::from_str(source).map_err(|e| ParseError::Syntax {
            path: origin.to_string(),
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        })?,
    };

    validate_and_resolve(&mut service).map_err(|source| ParseError::Invalid {
        path: origin.to_string(),
        source,
    })?;

    debug!(
        service = %service.name,
        enums = service.enums.len(),
        objects = service.objects.len(),
        resources = service.resources.len(),
        "parsed specification"
    );
    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_define::{Modifier, Operation, TypeRef};

    const SCHOOL: &str = r#"
name: School API
version: 1.0.0
enums:
  - name: StudentStatus
    values:
      - name: Active
      - name: Graduated
resources:
  - name: Students
    operations: [Create, Read]
    fields:
      - name: firstName
        type: String
        operations: [Create, Read]
      - name: status
        type: StudentStatus
        modifiers: [Nullable]
        operations: [Read]
"#;

    #[test]
    fn format_from_extension() {
        assert_eq!(SpecFormat::from_path(Path::new("a.yaml")), Some(SpecFormat::Yaml));
        assert_eq!(SpecFormat::from_path(Path::new("a.YML")), Some(SpecFormat::Yaml));
        assert_eq!(SpecFormat::from_path(Path::new("a.json")), Some(SpecFormat::Json));
        assert_eq!(SpecFormat::from_path(Path::new("a.toml")), None);
        assert_eq!(SpecFormat::from_path(Path::new("spec")), None);
    }

    #[test]
    fn parses_and_resolves_yaml() {
        let service = parse_service(SCHOOL, SpecFormat::Yaml, "school.yaml").unwrap();
        let status = &service.resources[0].fields[1];
        assert_eq!(status.field.ty, TypeRef::enumeration("StudentStatus"));
        assert_eq!(status.field.modifiers, vec![Modifier::Nullable]);
        assert_eq!(status.operations, vec![Operation::Read]);
    }

    #[test]
    fn parses_json() {
        let source = r#"{
            "name": "School API",
            "version": "1.0.0",
            "objects": [{"name": "Address", "fields": [{"name": "street", "type": "String"}]}]
        }"#;
        let service = parse_service(source, SpecFormat::Json, "school.json").unwrap();
        assert_eq!(service.objects[0].fields[0].name, "street");
    }

    #[test]
    fn lowercase_operation_is_a_located_syntax_error() {
        let source = SCHOOL.replace("operations: [Create, Read]", "operations: [create, Read]");
        let err = parse_service(&source, SpecFormat::Yaml, "school.yaml").unwrap_err();
        match err {
            ParseError::Syntax { path, line, message, .. } => {
                assert_eq!(path, "school.yaml");
                assert!(line > 0);
                assert!(message.contains("create"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_modifier_is_rejected() {
        let source = SCHOOL.replace("modifiers: [Nullable]", "modifiers: [Optional]");
        assert!(matches!(
            parse_service(&source, SpecFormat::Yaml, "school.yaml"),
            Err(ParseError::Syntax { .. })
        ));
    }

    #[test]
    fn json_syntax_error_has_location() {
        let err = parse_service("{\n  \"name\": }", SpecFormat::Json, "bad.json").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 2, .. }));
    }

    #[test]
    fn unknown_type_is_invalid() {
        let source = SCHOOL.replace("type: StudentStatus", "type: Grade");
        let err = parse_service(&source, SpecFormat::Yaml, "school.yaml").unwrap_err();
        assert!(matches!(err, ParseError::Invalid { .. }));
        assert!(err.to_string().contains("Grade"));
    }

    #[test]
    fn operation_outside_resource_is_invalid() {
        let source = SCHOOL.replace("        operations: [Read]\n", "        operations: [Delete]\n");
        assert!(matches!(
            parse_service(&source, SpecFormat::Yaml, "school.yaml"),
            Err(ParseError::Invalid { .. })
        ));
    }
}

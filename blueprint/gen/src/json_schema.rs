//! JSON Schema of the specification format.
//!
//! Editors can use the schema to validate and complete specification
//! documents. It is derived from the model types, so it cannot drift from
//! what the parser accepts (beyond the structural checks run after parsing).

use blueprint_define::Service;
use schemars::schema_for;
use serde_json::Value;

/// JSON Schema (draft 2020-12) describing a specification document.
///
/// ## Examples
///
/// ```
/// use blueprint_gen::json_schema::specification_schema;
///
/// let schema = specification_schema();
/// assert!(schema["properties"]["resources"].is_object());
/// ```
pub fn specification_schema() -> Value {
    schema_for!(Service).to_value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn schema_describes_service() {
        let schema = specification_schema();
        assert_eq!(schema["title"], "Service");
        assert_eq!(schema["required"], json!(["name"]));
    }

    #[test]
    fn operations_are_pascal_case() {
        let schema = specification_schema();
        assert_eq!(
            schema["$defs"]["Operation"]["enum"],
            json!(["Create", "Read", "Update", "Delete"])
        );
    }

    #[test]
    fn field_types_are_strings() {
        let schema = specification_schema();
        assert_eq!(schema["$defs"]["TypeRef"]["type"], "string");
    }
}

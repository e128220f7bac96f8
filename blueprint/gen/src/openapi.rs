//! OpenAPI 3.1 rendering.
//!
//! Renders an expanded [`Service`] as an OpenAPI document. The renderer is a
//! straight projection of the model and adds nothing of its own: every
//! endpoint, error response and schema comes from the overlays.
//!
//! - Paths are keyed by the resource collection path plus the endpoint path,
//!   in declaration order
//! - Objects and enums become `components.schemas`; field types referencing
//!   them use `$ref`
//! - `required` lists follow the required-field law (not nullable, no default)
//! - `Nullable` fields accept `null` through `anyOf`
//!
//! ## Examples
//!
//! ```
//! use blueprint_define::prelude::*;
//! use blueprint_gen::openapi::render_openapi;
//! use blueprint_overlay::expand;
//!
//! let mut service = Service::new("School API", "1.0.0");
//! service.resources.push(Resource::new("Students", [Operation::Read]));
//!
//! let doc = render_openapi(&expand(&service).unwrap()).unwrap();
//! assert_eq!(doc["openapi"], "3.1.0");
//! assert!(doc["paths"]["/students/{id}"]["get"].is_object());
//! assert!(doc["components"]["schemas"]["Students"].is_object());
//! ```

use std::collections::HashSet;

use blueprint_define::field::required_field_names;
use blueprint_define::naming::to_camel_case;
use blueprint_define::{
    CONTENT_TYPE_JSON, Endpoint, EndpointResponse, Enum, Field, Object, Primitive, Resource,
    Service, TypeRef,
};
use serde_json::{Map, Value, json};
use tracing::{debug, instrument};

use crate::errors::GeneratorError;

pub const OPENAPI_VERSION: &str = "3.1.0";

const SCHEMA_PREFIX: &str = "#/components/schemas/";

/// Renders `service` as an OpenAPI 3.1 document.
///
/// ## Errors
///
/// Returns [`GeneratorError::NamingCollision`] when an object and an enum
/// share a name, since both would claim the same component schema.
#[instrument(skip_all, fields(service = %service.name))]
pub fn render_openapi(service: &Service) -> Result<Value, GeneratorError> {
    check_collisions(service)?;

    let mut doc = Map::new();
    doc.insert("openapi".into(), json!(OPENAPI_VERSION));
    doc.insert(
        "info".into(),
        json!({ "title": service.name, "version": service.version }),
    );
    if !service.servers.is_empty() {
        let servers: Vec<Value> = service
            .servers
            .iter()
            .map(|s| {
                let mut server = Map::new();
                server.insert("url".into(), json!(s.url));
                insert_text(&mut server, "description", &s.description);
                Value::Object(server)
            })
            .collect();
        doc.insert("servers".into(), Value::Array(servers));
    }
    doc.insert("paths".into(), Value::Object(render_paths(service)));

    let mut schemas = Map::new();
    for e in &service.enums {
        schemas.insert(e.name.clone(), enum_schema(e));
    }
    for object in &service.objects {
        schemas.insert(object.name.clone(), object_schema(object));
    }
    debug!(schemas = schemas.len(), "rendered component schemas");
    doc.insert("components".into(), json!({ "schemas": schemas }));

    Ok(Value::Object(doc))
}

/// Pretty-printed JSON with a trailing newline.
pub fn to_json_string(doc: &Value) -> Result<String, GeneratorError> {
    let mut text = serde_json::to_string_pretty(doc).map_err(|e| GeneratorError::Render {
        format: "JSON",
        message: e.to_string(),
    })?;
    text.push('\n');
    Ok(text)
}

pub fn to_yaml_string(doc: &Value) -> Result<String, GeneratorError> {
    serde_yaml::to_string(doc).map_err(|e| GeneratorError::Render {
        format: "YAML",
        message: e.to_string(),
    })
}

fn check_collisions(service: &Service) -> Result<(), GeneratorError> {
    let enums: HashSet<&str> = service.enums.iter().map(|e| e.name.as_str()).collect();
    match service.objects.iter().find(|o| enums.contains(o.name.as_str())) {
        Some(object) => Err(GeneratorError::NamingCollision {
            name: object.name.clone(),
        }),
        None => Ok(()),
    }
}

fn render_paths(service: &Service) -> Map<String, Value> {
    let mut paths = Map::new();
    for resource in &service.resources {
        for endpoint in &resource.endpoints {
            let item = paths
                .entry(resource.endpoint_path(endpoint))
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(item) = item {
                item.insert(
                    endpoint.method.as_lowercase().to_string(),
                    operation(resource, endpoint),
                );
            }
        }
    }
    paths
}

fn operation(resource: &Resource, endpoint: &Endpoint) -> Value {
    let mut op = Map::new();
    op.insert(
        "operationId".into(),
        json!(format!("{}{}", to_camel_case(&endpoint.name), resource.name)),
    );
    insert_text(&mut op, "summary", &endpoint.summary);
    insert_text(&mut op, "description", &endpoint.description);
    op.insert("tags".into(), json!([resource.name]));

    let request = &endpoint.request;
    let parameters: Vec<Value> = request
        .path_params
        .iter()
        .map(|f| parameter(f, "path"))
        .chain(request.query_params.iter().map(|f| parameter(f, "query")))
        .chain(request.headers.iter().map(|f| parameter(f, "header")))
        .collect();
    if !parameters.is_empty() {
        op.insert("parameters".into(), Value::Array(parameters));
    }

    if endpoint.has_body() {
        let content_type = non_empty(&request.content_type).unwrap_or(CONTENT_TYPE_JSON);
        op.insert(
            "requestBody".into(),
            json!({
                "required": true,
                "content": { content_type: { "schema": inline_schema(&request.body_params) } }
            }),
        );
    }

    let mut responses = Map::new();
    responses.insert(
        endpoint.response.status_code.to_string(),
        success_response(endpoint),
    );
    for error in &endpoint.error_responses {
        responses.insert(
            error.status_code.to_string(),
            json!({
                "description": error.description,
                "content": {
                    CONTENT_TYPE_JSON: { "schema": schema_ref(&error.body_object) }
                }
            }),
        );
    }
    op.insert("responses".into(), Value::Object(responses));

    Value::Object(op)
}

fn success_response(endpoint: &Endpoint) -> Value {
    let response: &EndpointResponse = &endpoint.response;
    let description = non_empty(&endpoint.summary).unwrap_or("Successful response");
    let mut out = Map::new();
    out.insert("description".into(), json!(description));

    if !response.headers.is_empty() {
        let headers: Map<String, Value> = response
            .headers
            .iter()
            .map(|h| (h.name.clone(), json!({ "schema": field_schema(h) })))
            .collect();
        out.insert("headers".into(), Value::Object(headers));
    }

    let schema = match &response.body_object {
        Some(object) => Some(schema_ref(object)),
        None if !response.body_fields.is_empty() => Some(inline_schema(&response.body_fields)),
        None => None,
    };
    if let Some(schema) = schema {
        let content_type = non_empty(&response.content_type).unwrap_or(CONTENT_TYPE_JSON);
        out.insert(
            "content".into(),
            json!({ content_type: { "schema": schema } }),
        );
    }
    Value::Object(out)
}

fn parameter(field: &Field, location: &str) -> Value {
    let mut param = Map::new();
    param.insert("name".into(), json!(field.tag_name()));
    param.insert("in".into(), json!(location));
    insert_text(&mut param, "description", &field.description);
    param.insert(
        "required".into(),
        json!(location == "path" || field.is_required()),
    );
    param.insert("schema".into(), field_schema(field));
    Value::Object(param)
}

fn enum_schema(e: &Enum) -> Value {
    let mut schema = Map::new();
    schema.insert("type".into(), json!("string"));
    insert_text(&mut schema, "description", &e.description);
    schema.insert("enum".into(), json!(e.value_names().collect::<Vec<_>>()));
    Value::Object(schema)
}

fn object_schema(object: &Object) -> Value {
    let mut schema = match inline_schema(&object.fields) {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if !object.description.is_empty() {
        schema.insert("description".into(), json!(object.description));
    }
    Value::Object(schema)
}

fn inline_schema(fields: &[Field]) -> Value {
    let properties: Map<String, Value> = fields
        .iter()
        .map(|f| (f.tag_name(), field_schema(f)))
        .collect();

    let mut schema = Map::new();
    schema.insert("type".into(), json!("object"));
    schema.insert("properties".into(), Value::Object(properties));
    let required = required_field_names(fields);
    if !required.is_empty() {
        schema.insert("required".into(), json!(required));
    }
    Value::Object(schema)
}

/// Schema of a single field, including its modifiers.
pub fn field_schema(field: &Field) -> Value {
    let base = type_schema(&field.ty);
    let schema = if field.is_array() {
        json!({ "type": "array", "items": base })
    } else {
        base
    };
    let schema = if field.is_nullable() {
        json!({ "anyOf": [schema, { "type": "null" }] })
    } else {
        schema
    };

    let mut schema = match schema {
        Value::Object(map) => map,
        other => return other,
    };
    insert_text(&mut schema, "description", &field.description);
    if field.has_default() {
        schema.insert("default".into(), literal(field, &field.default));
    }
    if !field.example.is_empty() {
        schema.insert("examples".into(), json!([literal(field, &field.example)]));
    }
    Value::Object(schema)
}

fn type_schema(ty: &TypeRef) -> Value {
    match ty {
        TypeRef::Primitive(p) => primitive_schema(*p),
        TypeRef::Object(name) | TypeRef::Enum(name) | TypeRef::Named(name) => schema_ref(name),
    }
}

fn primitive_schema(p: Primitive) -> Value {
    match p {
        Primitive::Uuid => json!({ "type": "string", "format": "uuid" }),
        Primitive::String => json!({ "type": "string" }),
        Primitive::Int => json!({ "type": "integer", "format": "int64" }),
        Primitive::Bool => json!({ "type": "boolean" }),
        Primitive::Date => json!({ "type": "string", "format": "date" }),
        Primitive::Timestamp => json!({ "type": "string", "format": "date-time" }),
    }
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("{SCHEMA_PREFIX}{name}") })
}

// Defaults and examples are stored as text; emit them with their field's
// JSON type when they parse as one.
fn literal(field: &Field, raw: &str) -> Value {
    match field.ty.primitive() {
        Some(Primitive::Int) if !field.is_array() => raw
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| json!(raw)),
        Some(Primitive::Bool) if !field.is_array() => raw
            .parse::<bool>()
            .map(Value::from)
            .unwrap_or_else(|_| json!(raw)),
        _ => json!(raw),
    }
}

fn insert_text(map: &mut Map<String, Value>, key: &str, text: &str) {
    if !text.is_empty() {
        map.insert(key.to_string(), json!(text));
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_define::{Modifier, Operation, ResourceField, Server};
    use blueprint_overlay::expand;

    fn school() -> Service {
        let mut service = Service::new("School API", "1.0.0");
        service.servers.push(Server {
            url: "https://api.school.test".to_string(),
            description: "Production".to_string(),
        });
        service.resources.push(
            Resource::new("Students", [Operation::Create, Operation::Read, Operation::Delete])
                .with_fields(vec![
                    ResourceField::new(
                        Field::new("firstName", TypeRef::Primitive(Primitive::String)),
                        [Operation::Create, Operation::Read],
                    ),
                    ResourceField::new(
                        Field::new("nickname", TypeRef::Primitive(Primitive::String))
                            .with_modifier(Modifier::Nullable),
                        [Operation::Create, Operation::Read],
                    ),
                ]),
        );
        expand(&service).unwrap()
    }

    // === document ===

    #[test]
    fn header_and_servers() {
        let doc = render_openapi(&school()).unwrap();
        assert_eq!(doc["openapi"], "3.1.0");
        assert_eq!(doc["info"]["title"], "School API");
        assert_eq!(doc["info"]["version"], "1.0.0");
        assert_eq!(doc["servers"][0]["url"], "https://api.school.test");
    }

    #[test]
    fn paths_follow_declaration_order() {
        let doc = render_openapi(&school()).unwrap();
        let paths: Vec<_> = doc["paths"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(paths, vec!["/students", "/students/{id}", "/students/_search"]);

        let methods: Vec<_> = doc["paths"]["/students"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(methods, vec!["post", "get"]);
    }

    // === operations ===

    #[test]
    fn create_operation() {
        let doc = render_openapi(&school()).unwrap();
        let create = &doc["paths"]["/students"]["post"];
        assert_eq!(create["operationId"], "createStudents");

        let body = &create["requestBody"]["content"]["application/json"]["schema"];
        assert_eq!(body["required"], json!(["firstName"]));
        assert_eq!(body["properties"]["nickname"]["anyOf"][1]["type"], "null");

        let created = &create["responses"]["201"]["content"]["application/json"]["schema"];
        assert_eq!(created["$ref"], "#/components/schemas/Students");
        assert_eq!(
            create["responses"]["422"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/Error"
        );
    }

    #[test]
    fn get_operation_has_required_path_param_and_no_422() {
        let doc = render_openapi(&school()).unwrap();
        let get = &doc["paths"]["/students/{id}"]["get"];
        assert_eq!(get["parameters"][0]["name"], "id");
        assert_eq!(get["parameters"][0]["in"], "path");
        assert_eq!(get["parameters"][0]["required"], true);
        assert_eq!(get["parameters"][0]["schema"]["format"], "uuid");
        assert!(get["responses"].get("422").is_none());
        assert!(get["responses"].get("404").is_some());
    }

    #[test]
    fn list_operation_has_typed_defaults_and_envelope() {
        let doc = render_openapi(&school()).unwrap();
        let list = &doc["paths"]["/students"]["get"];
        assert_eq!(list["parameters"][0]["name"], "limit");
        assert_eq!(list["parameters"][0]["required"], false);
        assert_eq!(list["parameters"][0]["schema"]["default"], 50);

        let envelope = &list["responses"]["200"]["content"]["application/json"]["schema"];
        assert_eq!(envelope["properties"]["data"]["type"], "array");
        assert_eq!(
            envelope["properties"]["data"]["items"]["$ref"],
            "#/components/schemas/Students"
        );
    }

    #[test]
    fn delete_operation_has_no_content() {
        let doc = render_openapi(&school()).unwrap();
        let deleted = &doc["paths"]["/students/{id}"]["delete"]["responses"]["204"];
        assert!(deleted.get("content").is_none());
    }

    // === schemas ===

    #[test]
    fn components_hold_enums_and_objects() {
        let doc = render_openapi(&school()).unwrap();
        let schemas = &doc["components"]["schemas"];
        assert_eq!(schemas["ErrorCode"]["enum"][0], "BadRequest");
        assert_eq!(
            schemas["Students"]["required"],
            json!(["id", "meta", "firstName"])
        );
        assert_eq!(
            schemas["Error"]["properties"]["code"]["$ref"],
            "#/components/schemas/ErrorCode"
        );
        assert!(schemas["StudentsFilterLike"].is_object());
        assert_eq!(
            schemas["StudentsFilter"]["required"],
            json!(["orCondition", "nestedFilters"])
        );
        assert_eq!(
            schemas["StudentsFilter"]["properties"]["nestedFilters"]["items"]["$ref"],
            "#/components/schemas/StudentsFilter"
        );
    }

    #[test]
    fn field_examples_use_the_field_type() {
        let age = Field::new("age", TypeRef::Primitive(Primitive::Int))
            .with_example("42")
            .with_default("18");
        let schema = field_schema(&age);
        assert_eq!(schema["examples"], json!([42]));
        assert_eq!(schema["default"], 18);

        let name = Field::new("name", TypeRef::Primitive(Primitive::String)).with_example("Ada");
        assert_eq!(field_schema(&name)["examples"], json!(["Ada"]));

        let tags = Field::new("tags", TypeRef::Primitive(Primitive::Int))
            .with_modifier(Modifier::Array)
            .with_example("[1, 2]");
        assert_eq!(field_schema(&tags)["examples"], json!(["[1, 2]"]));
    }

    #[test]
    fn object_enum_collision_is_rejected() {
        let mut service = school();
        service.objects.push(Object::new("ErrorCode"));
        assert!(matches!(
            render_openapi(&service),
            Err(GeneratorError::NamingCollision { name }) if name == "ErrorCode"
        ));
    }

    #[test]
    fn rendering_is_deterministic() {
        let service = school();
        let a = to_json_string(&render_openapi(&service).unwrap()).unwrap();
        let b = to_json_string(&render_openapi(&service).unwrap()).unwrap();
        assert_eq!(a, b);
        assert!(a.ends_with('\n'));
    }

    #[test]
    fn yaml_output() {
        let yaml = to_yaml_string(&render_openapi(&school()).unwrap()).unwrap();
        assert!(yaml.starts_with("openapi:"));
        assert!(yaml.contains("operationId: createStudents"));
    }
}

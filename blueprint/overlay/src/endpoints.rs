//! Standard endpoint synthesis.
//!
//! Each CRUD operation a resource allows maps to one or more endpoints:
//!
//! - Create: `Create` (POST, 201)
//! - Read: `Get` (GET `/{id}`), `List` (GET), `Search` (POST `/_search`)
//! - Update: `Update` (PATCH `/{id}`)
//! - Delete: `Delete` (DELETE `/{id}`, 204)
//!
//! Paths are relative to [`Resource::collection_path`].

use blueprint_define::naming::pluralize;
use blueprint_define::standard::{ERROR, PAGINATION, filter_name};
use blueprint_define::{
    CONTENT_TYPE_JSON, Endpoint, EndpointRequest, EndpointResponse, ErrorResponse, Field,
    HttpMethod, Modifier, Operation, Primitive, Resource, TypeRef,
};

use crate::standard::ERROR_CODES;

/// Default page size of List endpoints.
pub const DEFAULT_LIMIT: &str = "50";

/// Names of the standard endpoints, in the order they are synthesized.
pub const STANDARD_ENDPOINTS: [&str; 6] = ["Create", "Get", "List", "Update", "Delete", "Search"];

/// Builds the standard endpoints `resource` is entitled to, in
/// [`STANDARD_ENDPOINTS`] order.
///
/// Endpoints whose name the resource already uses are not rebuilt.
pub fn standard_endpoints(resource: &Resource) -> Vec<Endpoint> {
    let candidates = [
        (Operation::Create, create_endpoint as fn(&Resource) -> Endpoint),
        (Operation::Read, get_endpoint),
        (Operation::Read, list_endpoint),
        (Operation::Update, update_endpoint),
        (Operation::Delete, delete_endpoint),
        (Operation::Read, search_endpoint),
    ];

    candidates
        .iter()
        .filter(|(op, _)| resource.has_operation(*op))
        .map(|(_, build)| build(resource))
        .filter(|endpoint| resource.find_endpoint(&endpoint.name).is_none())
        .collect()
}

/// The `{id}` path parameter.
pub fn id_param(resource: &Resource) -> Field {
    Field::new("ID", TypeRef::Primitive(Primitive::Uuid))
        .with_description(format!("Unique identifier of the {}", resource.name))
}

fn item_path(resource: &Resource) -> String {
    format!("/{{{}}}", id_param(resource).tag_name())
}

// The resource body object only exists for readable resources.
fn entity_response(resource: &Resource, status_code: u16) -> EndpointResponse {
    if resource.has_operation(Operation::Read) {
        EndpointResponse::object(status_code, resource.name.clone())
    } else {
        EndpointResponse::empty(status_code)
    }
}

fn json_request(body_params: Vec<Field>) -> EndpointRequest {
    EndpointRequest {
        content_type: CONTENT_TYPE_JSON.to_string(),
        body_params,
        ..EndpointRequest::default()
    }
}

fn path_request(resource: &Resource) -> EndpointRequest {
    EndpointRequest {
        path_params: vec![id_param(resource)],
        ..EndpointRequest::default()
    }
}

pub fn create_endpoint(resource: &Resource) -> Endpoint {
    let name = &resource.name;
    Endpoint::new("Create", HttpMethod::Post, "")
        .with_title(format!("Create {name}"))
        .with_summary(format!("Create a new {name}"))
        .with_description(format!("Creates a new {name} and returns the stored entity."))
        .with_request(json_request(
            resource.fields_with(Operation::Create).cloned().collect(),
        ))
        .with_response(entity_response(resource, 201))
}

pub fn get_endpoint(resource: &Resource) -> Endpoint {
    let name = &resource.name;
    Endpoint::new("Get", HttpMethod::Get, item_path(resource))
        .with_title(format!("Get {name}"))
        .with_summary(format!("Get a single {name}"))
        .with_description(format!("Returns the {name} with the given identifier."))
        .with_request(path_request(resource))
        .with_response(EndpointResponse::object(200, name.clone()))
}

pub fn list_endpoint(resource: &Resource) -> Endpoint {
    let name = &resource.name;
    let plural = pluralize(name);
    let int = || TypeRef::Primitive(Primitive::Int);

    let request = EndpointRequest {
        query_params: vec![
            Field::new("limit", int())
                .with_description("Maximum number of items to return")
                .with_default(DEFAULT_LIMIT),
            Field::new("offset", int())
                .with_description("Number of items to skip")
                .with_default("0"),
        ],
        ..EndpointRequest::default()
    };

    Endpoint::new("List", HttpMethod::Get, "")
        .with_title(format!("List {plural}"))
        .with_summary(format!("List {plural}"))
        .with_description(format!("Returns a page of {plural}."))
        .with_request(request)
        .with_response(EndpointResponse::inline(200, page_envelope(resource)))
}

pub fn update_endpoint(resource: &Resource) -> Endpoint {
    let name = &resource.name;
    let request = EndpointRequest {
        path_params: vec![id_param(resource)],
        ..json_request(resource.fields_with(Operation::Update).cloned().collect())
    };

    Endpoint::new("Update", HttpMethod::Patch, item_path(resource))
        .with_title(format!("Update {name}"))
        .with_summary(format!("Update an existing {name}"))
        .with_description(format!("Updates the {name} with the given identifier."))
        .with_request(request)
        .with_response(entity_response(resource, 200))
}

pub fn delete_endpoint(resource: &Resource) -> Endpoint {
    let name = &resource.name;
    Endpoint::new("Delete", HttpMethod::Delete, item_path(resource))
        .with_title(format!("Delete {name}"))
        .with_summary(format!("Delete an existing {name}"))
        .with_description(format!("Deletes the {name} with the given identifier."))
        .with_request(path_request(resource))
        .with_response(EndpointResponse::empty(204))
}

pub fn search_endpoint(resource: &Resource) -> Endpoint {
    let name = &resource.name;
    let plural = pluralize(name);
    let filter = Field::new("filter", TypeRef::object(filter_name(name)))
        .with_description(format!("Conditions the returned {plural} must match"));

    Endpoint::new("Search", HttpMethod::Post, "/_search")
        .with_title(format!("Search {plural}"))
        .with_summary(format!("Search {plural}"))
        .with_description(format!("Returns a page of {plural} matching a filter."))
        .with_request(json_request(vec![filter]))
        .with_response(EndpointResponse::inline(200, page_envelope(resource)))
}

// `{data: array<R>, pagination: Pagination}`
fn page_envelope(resource: &Resource) -> Vec<Field> {
    vec![
        Field::new("data", TypeRef::object(resource.name.clone()))
            .with_description(format!("The {} in this page", pluralize(&resource.name)))
            .with_modifier(Modifier::Array),
        Field::new("pagination", TypeRef::object(PAGINATION)),
    ]
}

/// Standard error responses for an endpoint, ordered by status code.
///
/// 422 is only listed for endpoints that accept a request body.
pub fn error_responses(has_body: bool) -> Vec<ErrorResponse> {
    ERROR_CODES
        .iter()
        .filter(|(_, status, _)| has_body || *status != 422)
        .map(|(code, status, description)| ErrorResponse {
            status_code: *status,
            code: (*code).to_string(),
            description: (*description).to_string(),
            body_object: ERROR.to_string(),
        })
        .collect()
}

//! Endpoint definitions.
//!
//! Endpoints live on a [`Resource`](crate::Resource). Their `path` is
//! relative to the resource's collection path, so the collection itself is
//! the empty path and a single item is `/{id}`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::field::{Field, required_field_names};
use crate::types::HttpMethod;

/// Content type used for JSON request and response bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// A single API endpoint.
///
/// ## Examples
///
/// ```
/// use blueprint_define::{Endpoint, EndpointResponse, HttpMethod};
///
/// let endpoint = Endpoint::new("Archive", HttpMethod::Post, "/{id}/archive")
///     .with_response(EndpointResponse::object(200, "Students"));
///
/// assert_eq!(endpoint.response.status_code, 200);
/// assert!(!endpoint.has_body());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub method: HttpMethod,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub request: EndpointRequest,
    pub response: EndpointResponse,
    /// Standard error responses, filled in by the base overlay.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub error_responses: Vec<ErrorResponse>,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: String::new(),
            summary: String::new(),
            description: String::new(),
            method,
            path: path.into(),
            request: EndpointRequest::default(),
            response: EndpointResponse::empty(200),
            error_responses: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_request(mut self, request: EndpointRequest) -> Self {
        self.request = request;
        self
    }

    pub fn with_response(mut self, response: EndpointResponse) -> Self {
        self.response = response;
        self
    }

    pub fn has_body(&self) -> bool {
        !self.request.body_params.is_empty()
    }

    /// All fields carried by this endpoint: path, query, header and body
    /// params, then response headers and body fields.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.request
            .headers
            .iter()
            .chain(&self.request.path_params)
            .chain(&self.request.query_params)
            .chain(&self.request.body_params)
            .chain(&self.response.headers)
            .chain(&self.response.body_fields)
    }

    pub fn fields_mut(&mut self) -> impl Iterator<Item = &mut Field> {
        self.request
            .headers
            .iter_mut()
            .chain(&mut self.request.path_params)
            .chain(&mut self.request.query_params)
            .chain(&mut self.request.body_params)
            .chain(&mut self.response.headers)
            .chain(&mut self.response.body_fields)
    }

    pub fn status_codes(&self) -> Vec<u16> {
        std::iter::once(self.response.status_code)
            .chain(self.error_responses.iter().map(|e| e.status_code))
            .collect()
    }
}

/// Request shape of an endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRequest {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path_params: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query_params: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body_params: Vec<Field>,
}

impl EndpointRequest {
    /// Tag names of the body params a client must send.
    pub fn required_body_params(&self) -> Vec<String> {
        required_field_names(&self.body_params)
    }
}

/// Success response shape of an endpoint.
///
/// A response either references a named object (`body_object`) or describes
/// an inline body (`body_fields`), never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndpointResponse {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content_type: String,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body_fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_object: Option<String>,
}

impl EndpointResponse {
    /// A JSON response referencing a named object.
    pub fn object(status_code: u16, body_object: impl Into<String>) -> Self {
        Self {
            content_type: CONTENT_TYPE_JSON.to_string(),
            status_code,
            headers: Vec::new(),
            body_fields: Vec::new(),
            body_object: Some(body_object.into()),
        }
    }

    /// A JSON response with an inline body.
    pub fn inline(status_code: u16, body_fields: Vec<Field>) -> Self {
        Self {
            content_type: CONTENT_TYPE_JSON.to_string(),
            status_code,
            headers: Vec::new(),
            body_fields,
            body_object: None,
        }
    }

    /// A response without a body (e.g. `204 No Content`).
    pub fn empty(status_code: u16) -> Self {
        Self {
            content_type: String::new(),
            status_code,
            headers: Vec::new(),
            body_fields: Vec::new(),
            body_object: None,
        }
    }

    pub fn has_body(&self) -> bool {
        self.body_object.is_some() || !self.body_fields.is_empty()
    }
}

/// A standard error response attached to an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    /// The `ErrorCode` value reported in the body for this status.
    pub code: String,
    pub description: String,
    pub body_object: String,
}

//! Names of the entities the overlays synthesize.
//!
//! These are shared between the overlays (which create the entities) and the
//! resolver (which must accept references to them before they exist).

/// Shared error body: `{code: ErrorCode, message: String}`.
pub const ERROR: &str = "Error";
/// Field-level validation error: `{code: ErrorFieldCode, message: String}`.
pub const ERROR_FIELD: &str = "ErrorField";
/// Pagination envelope: `{offset, limit, total}`.
pub const PAGINATION: &str = "Pagination";
/// Audit columns attached to every standard resource.
pub const META: &str = "Meta";

pub const ERROR_CODE: &str = "ErrorCode";
pub const ERROR_FIELD_CODE: &str = "ErrorFieldCode";

/// Objects synthesized once per service, in insertion order.
pub const STANDARD_OBJECTS: [&str; 4] = [ERROR, ERROR_FIELD, PAGINATION, META];
/// Enums synthesized once per service, in insertion order.
pub const STANDARD_ENUMS: [&str; 2] = [ERROR_CODE, ERROR_FIELD_CODE];

/// Name of the implicit identifier column.
pub const ID_FIELD: &str = "ID";
/// Name of the implicit audit column.
pub const META_FIELD: &str = "Meta";

pub const REQUEST_ERROR_SUFFIX: &str = "RequestError";

/// Suffixes of the filter objects generated for each object, in the order
/// they are appended.
pub const FILTER_SUFFIXES: [&str; 6] = [
    "Filter",
    "FilterEquals",
    "FilterRange",
    "FilterContains",
    "FilterLike",
    "FilterNull",
];

/// Name of the top-level filter object for `object`.
///
/// ```
/// use blueprint_define::standard::filter_name;
///
/// assert_eq!(filter_name("Students"), "StudentsFilter");
/// ```
pub fn filter_name(object: &str) -> String {
    format!("{object}{}", FILTER_SUFFIXES[0])
}

/// All six filter object names derived from `object`.
pub fn filter_names(object: &str) -> impl Iterator<Item = String> + '_ {
    FILTER_SUFFIXES.iter().map(move |suffix| format!("{object}{suffix}"))
}

/// Name of the request-error object mirroring `prefix`'s shape.
///
/// ```
/// use blueprint_define::standard::request_error_name;
///
/// assert_eq!(request_error_name("StudentsCreate"), "StudentsCreateRequestError");
/// assert_eq!(request_error_name("Address"), "AddressRequestError");
/// ```
pub fn request_error_name(prefix: &str) -> String {
    format!("{prefix}{REQUEST_ERROR_SUFFIX}")
}

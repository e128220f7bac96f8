//! Blueprint generator library.
//!
//! This crate connects blueprint specifications to the outside world:
//!
//! - [`parser`] - Loads YAML/JSON specifications with located errors
//! - [`openapi`] - Renders an expanded service as an OpenAPI 3.1 document
//! - [`json_schema`] - JSON Schema of the specification format
//! - [`config`] - Job configuration (`blueprint.yaml`)
//! - [`runner`] - Runs jobs: load, expand, render, write
//! - [`output`] - Atomic file writing
//! - [`errors`] - Error types for the generator
//!
//! Expansion itself lives in `blueprint-overlay`.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use blueprint_gen::openapi::{render_openapi, to_json_string};
//! use blueprint_gen::runner::expand_file;
//!
//! let service = expand_file(Path::new("specs/school.yaml")).unwrap();
//! let doc = render_openapi(&service).unwrap();
//! println!("{}", to_json_string(&doc).unwrap());
//! ```

pub mod config;
pub mod errors;
pub mod json_schema;
pub mod openapi;
pub mod output;
pub mod parser;
pub mod runner;

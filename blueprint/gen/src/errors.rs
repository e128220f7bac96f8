//! Error types for the blueprint generator.

use blueprint_define::ValidationErrors;
use blueprint_overlay::OverlayError;
use thiserror::Error;

/// Errors raised while loading a specification document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document could not be read.
    #[error("Failed to read specification '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file extension is neither YAML nor JSON.
    #[error("Unsupported specification format '{path}': expected .yaml, .yml or .json")]
    UnsupportedFormat { path: String },

    /// The document is not valid YAML/JSON or does not match the model.
    ///
    /// Line and column are 1-based; both are 0 when the parser could not
    /// locate the problem.
    #[error("{path}:{line}:{column}: {message}")]
    Syntax {
        path: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// The document parsed but failed structural validation.
    #[error("Invalid specification '{path}': {source}")]
    Invalid {
        path: String,
        #[source]
        source: ValidationErrors,
    },
}

/// Errors that can occur while expanding and rendering specifications.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Failed to load a specification
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// An overlay pass rejected the specification
    #[error("Expansion failed: {0}")]
    Overlay(#[from] OverlayError),

    /// Failed to serialize a rendered document
    #[error("Failed to render {format}: {message}")]
    Render {
        format: &'static str,
        message: String,
    },

    /// Two schemas would share a component name in the rendered document.
    #[error(
        "Naming collision for schema '{name}': declared both as an object and as an enum. Suggestion: rename one of them"
    )]
    NamingCollision { name: String },

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read the configuration file
    #[error("Failed to read configuration '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

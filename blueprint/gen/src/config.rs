//! Job configuration.
//!
//! A configuration file lists generation jobs. Each job names one
//! specification and the outputs to produce from it:
//!
//! ```yaml
//! jobs:
//!   - specification: specs/school.yaml
//!     overlay: out/school.expanded.yaml
//!     openapiJson: out/school.openapi.json
//!     openapiYaml: out/school.openapi.yaml
//!     schema: out/blueprint.schema.json
//! ```
//!
//! Relative paths resolve against the directory holding the configuration
//! file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::errors::GeneratorError;

/// Configuration file looked up when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "blueprint.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    pub jobs: Vec<Job>,
}

/// One specification and the files generated from it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Job {
    pub specification: PathBuf,
    /// Expanded specification, as YAML or JSON depending on the extension.
    #[serde(default)]
    pub overlay: Option<PathBuf>,
    #[serde(default)]
    pub openapi_json: Option<PathBuf>,
    #[serde(default)]
    pub openapi_yaml: Option<PathBuf>,
    /// JSON Schema of the specification format.
    #[serde(default)]
    pub schema: Option<PathBuf>,
}

/// Kinds of files a job can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Overlay,
    OpenApiJson,
    OpenApiYaml,
    Schema,
}

impl Config {
    /// Reads the configuration at `path`.
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::ConfigRead`] when the file cannot be read
    /// and [`GeneratorError::ConfigError`] when it is malformed or a job has
    /// no outputs.
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let source = fs::read_to_string(path).map_err(|source| GeneratorError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or(Path::new(""));
        Self::from_yaml(&source, base_dir)
    }

    /// Parses a configuration, resolving relative paths against `base_dir`.
    pub fn from_yaml(source: &str, base_dir: &Path) -> Result<Self, GeneratorError> {
        let mut config: Config = serde_yaml::from_str(source)
            .map_err(|e| GeneratorError::ConfigError(e.to_string()))?;

        if config.jobs.is_empty() {
            return Err(GeneratorError::ConfigError("no jobs configured".to_string()));
        }
        for job in &mut config.jobs {
            if job.outputs().is_empty() {
                return Err(GeneratorError::ConfigError(format!(
                    "job for '{}' has no outputs",
                    job.specification.display()
                )));
            }
            job.resolve_paths(base_dir);
        }

        debug!(jobs = config.jobs.len(), "loaded configuration");
        Ok(config)
    }
}

impl Job {
    /// Requested outputs, in a fixed order.
    pub fn outputs(&self) -> Vec<(OutputKind, &Path)> {
        [
            (OutputKind::Overlay, &self.overlay),
            (OutputKind::OpenApiJson, &self.openapi_json),
            (OutputKind::OpenApiYaml, &self.openapi_yaml),
            (OutputKind::Schema, &self.schema),
        ]
        .into_iter()
        .filter_map(|(kind, path)| path.as_deref().map(|p| (kind, p)))
        .collect()
    }

    fn resolve_paths(&mut self, base_dir: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base_dir.join(&*p);
            }
        };
        resolve(&mut self.specification);
        for path in [
            &mut self.overlay,
            &mut self.openapi_json,
            &mut self.openapi_yaml,
            &mut self.schema,
        ]
        .into_iter()
        .flatten()
        {
            resolve(path);
        }
    }
}

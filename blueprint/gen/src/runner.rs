//! Running generation jobs.
//!
//! A job loads one specification, expands it once, and renders every
//! requested output from the expanded model. Jobs run in configuration
//! order and stop at the first error.

use std::path::{Path, PathBuf};

use blueprint_define::Service;
use blueprint_overlay::expand;
use tracing::{info, instrument};

use crate::config::{Config, Job, OutputKind};
use crate::errors::GeneratorError;
use crate::json_schema::specification_schema;
use crate::openapi::{render_openapi, to_json_string, to_yaml_string};
use crate::output::write_atomic;
use crate::parser::{SpecFormat, load_service};

/// Files written by one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub specification: PathBuf,
    pub written: Vec<PathBuf>,
}

/// Loads and expands the specification at `path`.
pub fn expand_file(path: &Path) -> Result<Service, GeneratorError> {
    let service = load_service(path)?;
    Ok(expand(&service)?)
}

/// Serializes an expanded service as YAML or JSON.
pub fn render_service(service: &Service, format: SpecFormat) -> Result<String, GeneratorError> {
    match format {
        SpecFormat::Yaml => serde_yaml::to_string(service).map_err(|e| GeneratorError::Render {
            format: "YAML",
            message: e.to_string(),
        }),
        SpecFormat::Json => serde_json::to_string_pretty(service)
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|e| GeneratorError::Render {
                format: "JSON",
                message: e.to_string(),
            }),
    }
}

/// Renders one output of an expanded service.
pub fn render_output(
    service: &Service,
    kind: OutputKind,
    path: &Path,
) -> Result<String, GeneratorError> {
    match kind {
        OutputKind::Overlay => {
            let format = SpecFormat::from_path(path).unwrap_or(SpecFormat::Yaml);
            render_service(service, format)
        }
        OutputKind::OpenApiJson => to_json_string(&render_openapi(service)?),
        OutputKind::OpenApiYaml => to_yaml_string(&render_openapi(service)?),
        OutputKind::Schema => to_json_string(&specification_schema()),
    }
}

/// Runs a single job.
#[instrument(skip_all, fields(specification = %job.specification.display()))]
pub fn run_job(job: &Job) -> Result<JobReport, GeneratorError> {
    let service = expand_file(&job.specification)?;

    let mut written = Vec::new();
    for (kind, path) in job.outputs() {
        let content = render_output(&service, kind, path)?;
        write_atomic(path, &content)?;
        info!(?kind, path = %path.display(), "wrote output");
        written.push(path.to_path_buf());
    }

    Ok(JobReport {
        specification: job.specification.clone(),
        written,
    })
}

/// Runs every job of `config`, in order.
pub fn run_config(config: &Config) -> Result<Vec<JobReport>, GeneratorError> {
    config.jobs.iter().map(run_job).collect()
}

//! Blueprint command line
//!
//! Expands blueprint specifications and renders them as OpenAPI documents.

use std::path::{Path, PathBuf};

use blueprint_gen::config::{Config, DEFAULT_CONFIG_FILE};
use blueprint_gen::json_schema::specification_schema;
use blueprint_gen::openapi::{render_openapi, to_json_string, to_yaml_string};
use blueprint_gen::output::write_atomic;
use blueprint_gen::parser::SpecFormat;
use blueprint_gen::runner::{expand_file, render_service, run_config};
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use colored::Colorize;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Blueprint - expands minimal API specifications into complete API models
#[derive(Parser, Debug)]
#[command(name = "blueprint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every job listed in a configuration file
    Run {
        /// Configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },

    /// Expand a specification and print or write the result
    Expand {
        /// Specification file (.yaml, .yml or .json)
        spec: PathBuf,

        /// Output format (defaults to the output extension, else YAML)
        #[arg(short, long, value_enum)]
        format: Option<Format>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render an expanded specification as an OpenAPI 3.1 document
    Openapi {
        /// Specification file (.yaml, .yml or .json)
        spec: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the JSON Schema of the specification format
    Schema {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

impl From<Format> for SpecFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => SpecFormat::Json,
            Format::Yaml => SpecFormat::Yaml,
        }
    }
}

/// Initialize tracing subscriber with verbosity-based filtering.
///
/// Logs go to stderr so stdout carries only rendered documents. `RUST_LOG`
/// overrides the verbosity flags.
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => return,
            1 => "warn,blueprint_gen=info,blueprint_overlay=info".to_string(),
            2 => "info,blueprint_gen=debug,blueprint_overlay=debug,blueprint_define=debug".to_string(),
            _ => "debug,blueprint_gen=trace,blueprint_overlay=trace,blueprint_define=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_file(verbose >= 4)
                .with_line_number(verbose >= 4)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            write_atomic(path, content)
                .wrap_err_with(|| format!("writing {}", path.display()))?;
            eprintln!("{} {}", "wrote".green().bold(), path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Run { config } => {
            let loaded = Config::load(&config)
                .wrap_err_with(|| format!("loading {}", config.display()))?;
            info!(jobs = loaded.jobs.len(), "running configuration");

            for report in run_config(&loaded)? {
                eprintln!(
                    "{} {}",
                    "expanded".cyan().bold(),
                    report.specification.display()
                );
                for path in &report.written {
                    eprintln!("  {} {}", "wrote".green().bold(), path.display());
                }
            }
        }
        Command::Expand { spec, format, output } => {
            let service = expand_file(&spec)?;
            let format = format
                .map(SpecFormat::from)
                .or_else(|| output.as_deref().and_then(SpecFormat::from_path))
                .unwrap_or(SpecFormat::Yaml);
            emit(&render_service(&service, format)?, output.as_deref())?;
        }
        Command::Openapi { spec, format, output } => {
            let service = expand_file(&spec)?;
            let doc = render_openapi(&service)?;
            let content = match format {
                Format::Json => to_json_string(&doc)?,
                Format::Yaml => to_yaml_string(&doc)?,
            };
            emit(&content, output.as_deref())?;
        }
        Command::Schema { output } => {
            emit(&to_json_string(&specification_schema())?, output.as_deref())?;
        }
    }

    Ok(())
}

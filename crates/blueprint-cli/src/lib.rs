//! Blueprint CLI library
//!
//! This module contains the core CLI logic for the Blueprint architecture
//! tool: batch export, DOT output for a single view, and the HTTP viewer.

pub mod error_adapter;
pub mod server;

mod args;
mod config;

pub use args::{Args, Command};
pub use config::ConfigError;

use std::{
    fs,
    io::{self, Write},
    net::SocketAddr,
    path::Path,
};

use log::{error, info, warn};
use thiserror::Error;

use blueprint::{Blueprint, BlueprintError, model::Model, view::ViewRef, views};

/// Errors reported by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Blueprint(#[from] BlueprintError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{failed} of {total} views failed to export")]
    ExportFailed { failed: usize, total: usize },

    #[error("HTTP server on {addr} failed: {source}")]
    Serve {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Run the Blueprint CLI application
///
/// # Errors
///
/// Returns `CliError` for:
/// - Configuration loading errors
/// - Project I/O errors
/// - Unknown views
/// - Views that failed to export
pub fn run(args: &Args) -> Result<(), CliError> {
    let app_config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Export { project, output } => {
            let blueprint = Blueprint::new(app_config);
            let model = load(&blueprint, project)?;
            export(&blueprint, &model, output)
        }
        Command::Dot {
            project,
            kind,
            name,
            output,
        } => {
            let blueprint = Blueprint::new(app_config);
            let model = load(&blueprint, project)?;
            let view = blueprint.view(&model, &ViewRef::new(*kind, name.clone()))?;
            let dot = blueprint.dot(&model, &view)?;

            match output {
                Some(path) => {
                    fs::write(path, dot)?;
                    info!(output_file:% = path.display(); "DOT written");
                }
                None => io::stdout().write_all(dot.as_bytes())?,
            }
            Ok(())
        }
        Command::Serve { project, http } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(project.clone(), app_config, *http))
        }
    }
}

/// Read the project and report its model diagnostics.
fn load(blueprint: &Blueprint, project: &Path) -> Result<Model, CliError> {
    info!(project:% = project.display(); "Reading project");
    let model = blueprint.load(project)?;

    for reportable in error_adapter::model_reportables(&model) {
        warn!("{}", error_adapter::render(&reportable));
    }
    Ok(model)
}

fn export(blueprint: &Blueprint, model: &Model, output: &Path) -> Result<(), CliError> {
    let total = views(model).len();
    let report = blueprint.export(model, output)?;

    for failure in report.failures() {
        error!(view:% = failure.view, err:% = failure.error; "View failed to export");
    }
    if !report.is_success() {
        return Err(CliError::ExportFailed {
            failed: report.failures().len(),
            total,
        });
    }

    info!(
        pages = report.written().len(),
        output_dir:% = output.display();
        "Views exported successfully"
    );
    Ok(())
}

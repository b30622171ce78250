//! Blueprint Project Reader
//!
//! Reads the plain-text architecture description of a project into a
//! [`Model`]. Every file below the project directory is a sequence of
//! definitions of the form `Key = field | field | ...`:
//!
//! ```text
//! Persona       = Customer | Buys things online | external
//! System        = Shop | Sells things | core
//! Container     = Shop | Web App | Serves the storefront | Rust, axum |
//! Relationship  = Customer | Browses products | HTTPS | Web App |
//! SystemContext = Shop | Payment Provider | Checkout | Paying for an order
//! ```
//!
//! A trailing backslash continues a definition on the next line.
//!
//! Malformed definitions never abort the read: they are recorded as
//! diagnostics on the model. Only I/O failures are returned as errors.

mod definitions;
mod reader;

pub use definitions::parse_tags;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, info};
use thiserror::Error;

use blueprint_core::{diagnostic::Location, model::Model};

/// Errors that stop a project from being read.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ParseError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read every file below `root` into a fresh [`Model`].
///
/// Files are visited in sorted path order so that repeated reads of the same
/// project produce identical models.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if a directory or file cannot be read.
pub fn parse_project(root: impl AsRef<Path>) -> Result<Model, ParseError> {
    let root = root.as_ref();
    info!(path:% = root.display(); "Parsing project");

    let mut files = Vec::new();
    collect_files(root, &mut files)?;

    let mut model = Model::new();
    for file in &files {
        let source = fs::read_to_string(file).map_err(|err| ParseError::io(file, err))?;
        parse_source(&mut model, file, &source);
    }

    info!(
        files = files.len(),
        systems = model.systems().len(),
        containers = model.containers().len(),
        components = model.components().len(),
        relationships = model.relationships().len(),
        diagnostics = model.errors().len();
        "Project parsed"
    );
    Ok(model)
}

/// Read the definitions in `source` into `model`.
///
/// `path` is only used to locate diagnostics.
pub fn parse_source(model: &mut Model, path: impl AsRef<Path>, source: &str) {
    let path = path.as_ref();
    debug!(path:% = path.display(); "Parsing file");

    for line in reader::logical_lines(source) {
        let location = Location::new(path, line.number);
        match reader::split_definition(&line.text) {
            Some((keyword, value)) => definitions::define(model, keyword, value, location),
            None => debug!(location:% = location; "Ignoring line without `=`"),
        }
    }
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ParseError> {
    let mut entries = fs::read_dir(dir)
        .map_err(|err| ParseError::io(dir, err))?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| ParseError::io(dir, err))?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

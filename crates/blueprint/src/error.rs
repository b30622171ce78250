//! Error types for Blueprint operations.
//!
//! This module provides the main error type [`BlueprintError`] which wraps
//! the error conditions that can occur while publishing views.

use std::io;

use thiserror::Error;

use blueprint_parser::ParseError;

use crate::{render::RenderError, view::ViewRef};

/// Errors raised while turning a project into published views.
///
/// Model problems are not errors at this level; they are collected as
/// diagnostics on the [`Model`](blueprint_core::model::Model).
#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("{0} not found")]
    ViewNotFound(ViewRef),

    #[error("{0} cannot be published: its name is not a valid file name")]
    Unpublishable(ViewRef),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("configuration error: {0}")]
    Config(String),
}

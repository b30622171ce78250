//! Publishing views: DOT emission, page wrapping and batch export.
//!
//! # Pipeline Position
//!
//! ```text
//! Project Directory
//!     ↓ parse
//! Model
//!     ↓ project
//! View
//!     ↓ encode
//! GraphDescription
//!     ↓ export (this module)
//! DOT text → layout command → HTML page
//! ```
//!
//! # Batch Export
//!
//! [`views`] lists every view a model publishes. A batch run records failing
//! views in an [`ExportReport`] instead of stopping, so one broken diagram
//! never hides the others.

pub mod dot;
pub mod page;

use std::path::PathBuf;

use blueprint_core::model::Model;

use crate::{error::BlueprintError, view::ViewRef};

/// A view that could not be published.
#[derive(Debug)]
pub struct ViewFailure {
    pub view: ViewRef,
    pub error: BlueprintError,
}

/// Outcome of a batch export.
#[derive(Debug, Default)]
pub struct ExportReport {
    written: Vec<PathBuf>,
    failures: Vec<ViewFailure>,
}

impl ExportReport {
    /// Pages written to disk, error pages included.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn failures(&self) -> &[ViewFailure] {
        &self.failures
    }

    /// Returns `true` if every view was published without error.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn record_written(&mut self, path: PathBuf) {
        self.written.push(path);
    }

    pub(crate) fn record_failure(&mut self, view: ViewRef, error: impl Into<BlueprintError>) {
        self.failures.push(ViewFailure {
            view,
            error: error.into(),
        });
    }
}

/// Every view published for `model`, most detailed first.
///
/// Component views come first, then container views, named context views
/// and finally the generic context view.
pub fn views(model: &Model) -> Vec<ViewRef> {
    let components = model.containers().keys().map(ViewRef::component);
    let containers = model.systems().keys().map(ViewRef::container);
    let contexts = model.system_contexts().keys().map(ViewRef::context);

    components
        .chain(containers)
        .chain(contexts)
        .chain(std::iter::once(ViewRef::generic()))
        .collect()
}

//! Blueprint - C4 architecture views rendered through Graphviz.
//!
//! Reads a plain-text architecture description (personas, systems,
//! containers, components and relationships), projects it into System
//! Context, Container and Component views, and renders each view through an
//! external layout engine into an HTML page.

pub mod config;
pub mod graph;
pub mod render;
pub mod view;

mod error;
mod export;

pub use blueprint_core::{color, diagnostic, model, text};

pub use error::BlueprintError;
pub use export::{
    ExportReport, ViewFailure,
    dot::{to_dot, to_graph},
    page::{PageContext, render_page},
    views,
};

use std::{fs, path::Path};

use log::{debug, info, warn};

use blueprint_core::model::Model;

use config::AppConfig;
use graph::{Encoder, GraphDescription};
use render::{RenderError, Renderer};
use view::{View, ViewRef};

/// A rendered view page.
#[derive(Debug)]
pub struct Page {
    /// The complete HTML document.
    pub html: String,
    /// Set when the layout engine failed; the page then explains why instead
    /// of showing a diagram.
    pub error: Option<RenderError>,
}

/// Builder for reading projects and publishing their views.
///
/// # Examples
///
/// ```rust,no_run
/// use blueprint::{Blueprint, config::AppConfig, view::ViewRef};
///
/// let blueprint = Blueprint::new(AppConfig::default());
///
/// // Read every definition below the project directory
/// let model = blueprint.load("architecture").expect("Failed to read project");
///
/// // Project and render the container view of a system
/// let view = blueprint
///     .view(&model, &ViewRef::container("Shop"))
///     .expect("Unknown system");
/// let page = blueprint.render_page(&model, &view).expect("Failed to render");
///
/// println!("{}", page.html);
/// ```
#[derive(Debug, Default)]
pub struct Blueprint {
    config: AppConfig,
}

impl Blueprint {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Read the project below `project` into a fresh model.
    ///
    /// Malformed definitions end up in [`Model::errors`]; only I/O failures
    /// are returned as errors.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::Parse`] if the project cannot be read.
    pub fn load(&self, project: impl AsRef<Path>) -> Result<Model, BlueprintError> {
        let model = blueprint_parser::parse_project(project)?;
        if !model.errors().is_empty() {
            warn!(diagnostics = model.errors().len(); "Project has model errors");
        }
        Ok(model)
    }

    /// Project the view addressed by `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::ViewNotFound`] if the focal entity does not exist.
    pub fn view(&self, model: &Model, reference: &ViewRef) -> Result<View, BlueprintError> {
        view::project(model, reference)
    }

    /// Encode `view` into a graph description.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::Config`] if the configured colors are invalid.
    pub fn graph(&self, model: &Model, view: &View) -> Result<GraphDescription, BlueprintError> {
        Ok(self.encoder()?.encode(model, view))
    }

    /// DOT text of `view`, as handed to the layout engine.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::Config`] if the configured colors are invalid.
    pub fn dot(&self, model: &Model, view: &View) -> Result<String, BlueprintError> {
        Ok(to_dot(&self.graph(model, view)?))
    }

    /// Run the layout engine on `view` and wrap the result in a page.
    ///
    /// A failing layout engine does not fail this call: the page is still
    /// produced, showing the failure, and the error is kept in [`Page::error`].
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::Config`] if the configured colors are invalid.
    pub fn render_page(&self, model: &Model, view: &View) -> Result<Page, BlueprintError> {
        let dot = self.dot(model, view)?;
        let renderer = Renderer::from_config(self.config.layout());

        info!(view:% = view.reference(); "Rendering view");
        let (rendered, error) = match renderer.render(&dot) {
            Ok(rendered) => (Some(rendered), None),
            Err(err) => {
                warn!(view:% = view.reference(), err:%; "Layout command failed");
                (None, Some(err))
            }
        };

        let html = render_page(&PageContext {
            title: view.title(),
            description: view.description(),
            model_errors: model.errors(),
            render_error: error.as_ref().map(ToString::to_string),
            render_warnings: rendered.as_ref().and_then(|r| r.warnings.as_deref()),
            svg: rendered.as_ref().map_or("", |r| r.output.as_str()),
        });

        Ok(Page { html, error })
    }

    /// Write the page of every view of `model` below `out_dir`.
    ///
    /// Pages land at [`ViewRef::output_path`], so drill-down links between
    /// them resolve. A view whose name has no output path is recorded as
    /// [`BlueprintError::Unpublishable`] and nothing is written for it. Views
    /// that fail are recorded in the report; the batch always runs to
    /// completion.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::Config`] if the configured colors are invalid,
    /// before any page is written.
    pub fn export(
        &self,
        model: &Model,
        out_dir: impl AsRef<Path>,
    ) -> Result<ExportReport, BlueprintError> {
        let out_dir = out_dir.as_ref();
        self.encoder()?;
        info!(out_dir:% = out_dir.display(); "Exporting views");

        let mut report = ExportReport::default();
        for reference in views(model) {
            let Some(output_path) = reference.output_path() else {
                warn!(view:% = reference; "View name is not a valid file name, skipping");
                report.record_failure(reference.clone(), BlueprintError::Unpublishable(reference));
                continue;
            };
            let view = match self.view(model, &reference) {
                Ok(view) => view,
                Err(err) => {
                    report.record_failure(reference, err);
                    continue;
                }
            };
            let page = match self.render_page(model, &view) {
                Ok(page) => page,
                Err(err) => {
                    report.record_failure(reference, err);
                    continue;
                }
            };

            let path = out_dir.join(output_path);
            let written = path
                .parent()
                .map_or(Ok(()), fs::create_dir_all)
                .and_then(|()| fs::write(&path, page.html));
            match written {
                Ok(()) => {
                    debug!(path:% = path.display(); "Page written");
                    report.record_written(path);
                }
                Err(err) => {
                    report.record_failure(reference, err);
                    continue;
                }
            }
            if let Some(err) = page.error {
                report.record_failure(reference, err);
            }
        }

        info!(
            written = report.written().len(),
            failed = report.failures().len();
            "Export finished"
        );
        Ok(report)
    }

    fn encoder(&self) -> Result<Encoder, BlueprintError> {
        let palette = self
            .config
            .style()
            .palette()
            .map_err(BlueprintError::Config)?;
        Ok(Encoder::new(palette, self.config.layout().line_limit()))
    }
}

//! Error adapter for converting CLI errors and model diagnostics to miette reports.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Model Diagnostics
//!
//! Diagnostics collected while reading a project carry a file and line. Each
//! one is rendered independently, with the offending line of its file shown
//! as a labelled snippet when the file can still be read.

use std::{fmt, fs};

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, NamedSource, Severity,
    SourceSpan,
};

use blueprint::{
    BlueprintError,
    diagnostic::{self, Diagnostic},
    model::Model,
};

use crate::{CliError, config::ConfigError};

/// Adapter for a single model diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// Source file of the diagnostic, when readable
    src: Option<NamedSource<String>>,
    /// Byte span of the reported line within `src`
    span: Option<SourceSpan>,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create an adapter for `diag` using `src` as the content of its file.
    pub fn new(diag: &'a Diagnostic, src: Option<String>) -> Self {
        let location = diag.location();
        let span = location
            .zip(src.as_deref())
            .and_then(|(location, src)| line_span(src, location.line()));
        let src = location.zip(src).map(|(location, src)| {
            NamedSource::new(location.file().display().to_string(), src)
        });
        Self { diag, src, span }
    }

    /// Create an adapter for `diag`, reading its source file from disk.
    pub fn load(diag: &'a Diagnostic) -> Self {
        let src = diag
            .location()
            .and_then(|location| fs::read_to_string(location.file()).ok());
        Self::new(diag, src)
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<Severity> {
        Some(match self.diag.severity() {
            diagnostic::Severity::Error => Severity::Error,
            diagnostic::Severity::Warning => Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if self.span.is_some() {
            return None;
        }
        // Without a snippet, point at the location in text.
        self.diag
            .location()
            .map(|location| Box::new(format!("defined at {location}")) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.src.as_ref().map(|src| src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        let message = self.diag.code().map(|code| code.description().to_string());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(message, span),
        )))
    }
}

/// Adapter for [`CliError`]s, which carry no source information.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Blueprint(err) => match err {
                BlueprintError::Io(_) => "blueprint::io",
                BlueprintError::Parse(_) => "blueprint::parse",
                BlueprintError::ViewNotFound(_) => "blueprint::view_not_found",
                BlueprintError::Unpublishable(_) => "blueprint::unpublishable",
                BlueprintError::Render(_) => "blueprint::render",
                BlueprintError::Config(_) => "blueprint::config",
            },
            CliError::Config(_) => "blueprint::config",
            CliError::ExportFailed { .. } => "blueprint::export",
            CliError::Serve { .. } => "blueprint::serve",
            CliError::Io(_) => "blueprint::io",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            CliError::Config(ConfigError::Validation(_)) => {
                "colors accept CSS notation such as \"#1168bd\" or \"steelblue\""
            }
            CliError::Blueprint(BlueprintError::Render(_)) => {
                "check that the layout command from the configuration is installed"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A model diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Byte span of the 1-based `line` of `src`, without its line terminator.
fn line_span(src: &str, line: usize) -> Option<SourceSpan> {
    let mut offset = 0;
    for (index, text) in src.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let len = text.trim_end_matches(['\r', '\n']).len();
            return Some(SourceSpan::new(offset.into(), len));
        }
        offset += text.len();
    }
    None
}

/// Convert a [`CliError`] into a list of reportable errors.
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    vec![Reportable::Error(ErrorAdapter(err))]
}

/// One reportable per diagnostic collected on `model`.
pub fn model_reportables(model: &Model) -> Vec<Reportable<'_>> {
    model
        .errors()
        .iter()
        .map(|d| Reportable::Diagnostic(DiagnosticAdapter::load(d)))
        .collect()
}

/// Render `reportable` the way the CLI prints it.
pub fn render(reportable: &Reportable<'_>) -> String {
    let mut writer = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut writer, reportable)
        .expect("Writing to String buffer is infallible");
    writer
}

//! Running the external layout engine.
//!
//! The engine is a child process that reads DOT text on stdin and writes the
//! rendered diagram on stdout. Anything it prints on stderr is kept: as
//! warnings when the run succeeds, as the failure reason otherwise.

use std::{
    io::{self, Write},
    process::{Command, ExitStatus, Stdio},
    thread,
};

use log::{debug, warn};
use thiserror::Error;

use crate::config::LayoutConfig;

/// Errors raised by a layout engine run.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to start layout command `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to communicate with layout command: {0}")]
    Io(#[from] io::Error),

    #[error("layout command exited with {status}: {diagnostics}")]
    Failed {
        status: ExitStatus,
        diagnostics: String,
    },

    #[error("layout command produced no output: {diagnostics}")]
    EmptyOutput { diagnostics: String },
}

impl RenderError {
    /// Text the engine printed on stderr, if the run got that far.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            Self::Failed { diagnostics, .. } | Self::EmptyOutput { diagnostics } => {
                Some(diagnostics)
            }
            Self::Spawn { .. } | Self::Io(_) => None,
        }
    }
}

/// A successful layout engine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The rendered diagram, usually SVG markup.
    pub output: String,
    /// Text printed on stderr by an otherwise successful run.
    pub warnings: Option<String>,
}

/// Handle to the external layout engine.
#[derive(Debug, Clone)]
pub struct Renderer {
    command: String,
    args: Vec<String>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl Renderer {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.command(), config.args().to_vec())
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Pipe `dot` through the engine and collect its output.
    ///
    /// # Errors
    ///
    /// - [`RenderError::Spawn`] if the command cannot be started.
    /// - [`RenderError::Failed`] if it exits unsuccessfully, even when it
    ///   printed something on stdout.
    /// - [`RenderError::EmptyOutput`] if it succeeds without printing anything.
    pub fn render(&self, dot: &str) -> Result<Rendered, RenderError> {
        debug!(command = self.command, args:? = self.args; "Running layout command");

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RenderError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        let stdin = child.stdin.take();
        // Stdin is written from its own thread while stdout and stderr drain.
        let output = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => match stdin.write_all(dot.as_bytes()) {
                    Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                    result => result,
                },
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            written.and(output)
        })?;

        let diagnostics = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(RenderError::Failed {
                status: output.status,
                diagnostics,
            });
        }
        if output.stdout.is_empty() {
            return Err(RenderError::EmptyOutput { diagnostics });
        }

        let warnings = if diagnostics.is_empty() {
            None
        } else {
            warn!(command = self.command, warnings = diagnostics; "Layout command reported warnings");
            Some(diagnostics)
        };
        Ok(Rendered {
            output: String::from_utf8_lossy(&output.stdout).into_owned(),
            warnings,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Renderer {
        Renderer::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[test]
    fn test_render_echoes_output() {
        let rendered = Renderer::new("cat", Vec::new()).render("digraph {}").unwrap();

        assert_eq!(rendered.output, "digraph {}");
        assert_eq!(rendered.warnings, None);
    }

    #[test]
    fn test_render_keeps_stderr_as_warnings() {
        let rendered = sh("echo careful >&2; cat").render("<svg/>").unwrap();

        assert_eq!(rendered.output, "<svg/>");
        assert_eq!(rendered.warnings.as_deref(), Some("careful"));
    }

    #[test]
    fn test_render_failure() {
        let err = sh("cat; echo broken >&2; exit 3").render("digraph {}").unwrap_err();

        assert!(matches!(err, RenderError::Failed { .. }));
        assert_eq!(err.diagnostics(), Some("broken"));
    }

    #[test]
    fn test_render_empty_output() {
        let err = sh("cat >/dev/null").render("digraph {}").unwrap_err();

        assert!(matches!(err, RenderError::EmptyOutput { .. }));
    }

    #[test]
    fn test_render_missing_command() {
        let err = Renderer::new("blueprint-no-such-command", Vec::new())
            .render("digraph {}")
            .unwrap_err();

        assert!(matches!(err, RenderError::Spawn { .. }));
        assert_eq!(err.diagnostics(), None);
    }

    #[test]
    fn test_render_tolerates_unread_stdin() {
        let dot = "x".repeat(1 << 20);

        let rendered = sh("echo done").render(&dot).unwrap();

        assert_eq!(rendered.output, "done\n");
    }
}

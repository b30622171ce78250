//! Configuration types for publishing Blueprint views.
//!
//! This module provides configuration structures that control how views are
//! laid out and styled. All types implement [`serde::Deserialize`] so they can
//! be loaded from a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining layout and style settings.
//! - [`LayoutConfig`] - The external layout command and the label width.
//! - [`StyleConfig`] - Node color overrides per entity kind.
//!
//! # Example
//!
//! ```
//! # use blueprint::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().command(), "dot");
//! assert!(config.style().palette().is_ok());
//! ```

use serde::Deserialize;

use blueprint_core::color::{Palette, Swatch};

use crate::graph::DEFAULT_LINE_LIMIT;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Settings of the external layout engine.
///
/// The command receives DOT text on stdin and must print the rendered
/// diagram on stdout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Program to run, looked up on `PATH` when not absolute.
    command: String,

    /// Arguments passed to the command.
    args: Vec<String>,

    /// Maximum number of characters per label line.
    line_limit: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            command: "dot".to_string(),
            args: vec!["-Tsvg".to_string()],
            line_limit: DEFAULT_LINE_LIMIT,
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    pub fn new(command: impl Into<String>, args: Vec<String>, line_limit: usize) -> Self {
        Self {
            command: command.into(),
            args,
            line_limit,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn line_limit(&self) -> usize {
        self.line_limit
    }
}

/// Fill and border color strings of one node kind.
#[derive(Debug, Clone, Deserialize)]
pub struct SwatchConfig {
    fill: String,
    border: String,
}

impl SwatchConfig {
    pub fn new(fill: impl Into<String>, border: impl Into<String>) -> Self {
        Self {
            fill: fill.into(),
            border: border.into(),
        }
    }

    fn swatch(&self, kind: &str) -> Result<Swatch, String> {
        Swatch::new(&self.fill, &self.border)
            .map_err(|err| format!("Invalid {kind} color in config: {err}"))
    }
}

/// Visual styling configuration for rendered views.
///
/// Kinds without an override keep the built-in colors.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    persona: Option<SwatchConfig>,

    #[serde(default)]
    system: Option<SwatchConfig>,

    #[serde(default)]
    container: Option<SwatchConfig>,

    #[serde(default)]
    component: Option<SwatchConfig>,
}

impl StyleConfig {
    /// Returns the built-in [`Palette`] with the configured overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured color string cannot be parsed.
    pub fn palette(&self) -> Result<Palette, String> {
        let mut palette = Palette::default();
        let overrides = [
            ("persona", &self.persona, &mut palette.persona),
            ("system", &self.system, &mut palette.system),
            ("container", &self.container, &mut palette.container),
            ("component", &self.component, &mut palette.component),
        ];
        for (kind, config, swatch) in overrides {
            if let Some(config) = config {
                *swatch = config.swatch(kind)?;
            }
        }
        Ok(palette)
    }

    /// Returns a copy of this style with the persona colors replaced.
    pub fn with_persona(mut self, swatch: SwatchConfig) -> Self {
        self.persona = Some(swatch);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = LayoutConfig::default();

        assert_eq!(layout.command(), "dot");
        assert_eq!(layout.args(), ["-Tsvg"]);
        assert_eq!(layout.line_limit(), 38);
    }

    #[test]
    fn test_palette_overrides_only_configured_kinds() {
        let style = StyleConfig::default().with_persona(SwatchConfig::new("red", "black"));

        let palette = style.palette().unwrap();

        assert_eq!(palette.persona.fill.to_hex(), "#ff0000");
        assert_eq!(palette.system, Palette::default().system);
    }

    #[test]
    fn test_palette_rejects_invalid_color() {
        let style = StyleConfig::default().with_persona(SwatchConfig::new("red", "not-a-color"));

        let err = style.palette().unwrap_err();

        assert!(err.starts_with("Invalid persona color in config"));
    }
}

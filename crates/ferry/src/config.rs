//! Configuration types for Ferry exports.
//!
//! This module provides configuration structures that control where and how
//! a diagram is saved. All types implement [`serde::Deserialize`] so they can
//! be loaded from a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining output and style settings.
//! - [`OutputConfig`] - Destination directory, file name, collision policy and format.
//! - [`StyleConfig`] - Stroke color and width of lifelines and method calls.
//!
//! # Example
//!
//! ```
//! # use ferry::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [output]
//!     directory = "out"
//!     overwrite = true
//!
//!     [style]
//!     line_color = "navy"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.output().name(), "SequenceDiagram");
//! assert!(config.output().overwrite());
//! assert!(config.style().line_color().is_ok());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use ferry_core::{color::Color, style::ConnectorStyle};

use crate::target::OutputFormat;

/// Base name of saved diagrams when none is configured.
pub const DEFAULT_FILE_NAME: &str = "SequenceDiagram";

/// Stroke width of connectors when none is configured.
pub const DEFAULT_LINE_WIDTH: f32 = 1.4;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns the output configuration for command-line overrides.
    pub fn output_mut(&mut self) -> &mut OutputConfig {
        &mut self.output
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Where saved diagrams go.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination directory; empty means the current directory.
    directory: PathBuf,
    name: String,
    overwrite: bool,
    format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            name: DEFAULT_FILE_NAME.to_string(),
            overwrite: false,
            format: OutputFormat::default(),
        }
    }
}

impl OutputConfig {
    /// Returns the destination directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.directory = directory.into();
    }

    /// Returns the base file name, without extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns whether an existing file with the same name is replaced.
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn set_overwrite(&mut self, overwrite: bool) {
        self.overwrite = overwrite;
    }

    /// Returns the file format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// Stroke settings of connectors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Connector color, as a CSS color string.
    line_color: Option<String>,
    line_width: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            line_color: None,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl StyleConfig {
    /// Returns the parsed connector [`Color`], black if none is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn line_color(&self) -> Result<Color, String> {
        self.line_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map(Option::unwrap_or_default)
            .map_err(|err| format!("Invalid line color in config: {err}"))
    }

    /// Returns the connector stroke width.
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Base connector style built from this section.
    ///
    /// # Errors
    ///
    /// Returns an error for an unparsable color or a width that is not a
    /// positive number.
    pub fn connector_style(&self) -> Result<ConnectorStyle, String> {
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(format!(
                "Invalid line width in config: {} is not a positive number",
                self.line_width
            ));
        }
        Ok(ConnectorStyle::new(self.line_color()?, self.line_width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.output().directory(), Path::new(""));
        assert_eq!(config.output().name(), DEFAULT_FILE_NAME);
        assert!(!config.output().overwrite());
        assert_eq!(config.output().format(), OutputFormat::Svg);

        let style = config.style().connector_style().unwrap();
        assert_eq!(style, ConnectorStyle::default());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.output().name(), DEFAULT_FILE_NAME);
        assert_eq!(config.style().line_width(), DEFAULT_LINE_WIDTH);
    }

    #[test]
    fn test_full_document() {
        let config: AppConfig = toml::from_str(
            r##"
            [output]
            directory = "out/diagrams"
            name = "Login"
            overwrite = true
            format = "svg"

            [style]
            line_color = "#336699"
            line_width = 2.0
            "##,
        )
        .unwrap();

        assert_eq!(config.output().directory(), Path::new("out/diagrams"));
        assert_eq!(config.output().name(), "Login");
        assert!(config.output().overwrite());

        let style = config.style().connector_style().unwrap();
        assert_eq!(style.width(), 2.0);
        assert_eq!(style.color(), Color::new("#336699").unwrap());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = toml::from_str::<AppConfig>("[output]\nformat = \"vsdx\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_style_values() {
        let config: AppConfig = toml::from_str("[style]\nline_color = \"nope\"\n").unwrap();
        assert!(config.style().line_color().is_err());

        let config: AppConfig = toml::from_str("[style]\nline_width = -1.0\n").unwrap();
        assert!(config.style().connector_style().is_err());
    }
}

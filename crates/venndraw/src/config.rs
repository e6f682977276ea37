//! Configuration types for Venndraw rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file by the CLI. Every field is optional; unset fields fall back to
//! the renderer defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining style and export settings.
//! - [`StyleConfig`] - Font family and background color.
//! - [`ExportConfig`] - Where temporary output files are created and how they are named.
//!
//! # Example
//!
//! ```
//! # use venndraw::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().unwrap().is_none());
//! assert!(config.export().temp_dir().is_none());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use venndraw_core::color::Color;

/// Prefix of output files when none is configured.
pub const DEFAULT_FILE_PREFIX: &str = "venn-";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(style: StyleConfig, export: ExportConfig) -> Self {
        Self { style, export }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn export(&self) -> &ExportConfig {
        &self.export
    }
}

/// Visual styling configuration for rendered diagrams.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Font family for every text element.
    #[serde(default)]
    font_family: Option<String>,

    /// Page background, as a color string. White when unset.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Creates a style section.
    ///
    /// # Arguments
    ///
    /// * `font_family` - Font family name, `None` for the renderer default.
    /// * `background_color` - CSS color string, `None` for white.
    pub fn new(font_family: Option<String>, background_color: Option<String>) -> Self {
        Self {
            font_family,
            background_color,
        }
    }

    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

/// Output file placement.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory for rendered files. The system temp directory when unset.
    #[serde(default)]
    temp_dir: Option<PathBuf>,

    /// File name prefix of rendered files.
    #[serde(default)]
    file_prefix: Option<String>,
}

impl ExportConfig {
    pub fn new(temp_dir: Option<PathBuf>, file_prefix: Option<String>) -> Self {
        Self {
            temp_dir,
            file_prefix,
        }
    }

    pub fn temp_dir(&self) -> Option<&Path> {
        self.temp_dir.as_deref()
    }

    /// Configured prefix or [`DEFAULT_FILE_PREFIX`].
    pub fn file_prefix(&self) -> &str {
        self.file_prefix.as_deref().unwrap_or(DEFAULT_FILE_PREFIX)
    }
}

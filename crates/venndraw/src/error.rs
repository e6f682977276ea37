//! Error types for Venndraw operations.
//!
//! This module provides the main error type [`VennError`] which wraps the
//! failures that can occur while validating a request, laying out the
//! diagram or writing the image.

use std::io;

use thiserror::Error;

/// The main error type for Venndraw operations.
///
/// A request either yields a complete image or one of these errors; no
/// partial output is left behind.
#[derive(Debug, Error)]
pub enum VennError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A parameter value outside its declared choices or range.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The layout engine could not produce the requested topology.
    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for VennError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

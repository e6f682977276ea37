//! Writing a finished canvas to an image file.
//!
//! The [`Exporter`] allocates a uniquely named file, renders the canvas to
//! SVG, hands the document to the [`Encoder`] of the requested format and
//! writes the bytes. The file is kept only when every step succeeds.

pub mod png;
pub mod svg;

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use log::{debug, error, info};
use ::svg::Document;
use thiserror::Error;

use venndraw_core::color::Color;

use crate::{
    canvas::Canvas,
    config::DEFAULT_FILE_PREFIX,
    request::{ExportFormat, RenderedDiagram, Resolution},
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse rendered SVG: {0}")]
    SvgParse(#[from] usvg::Error),

    #[error("failed to allocate a {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },

    #[error("failed to encode PNG: {0}")]
    PngEncode(#[from] ::png::EncodingError),

    #[error("failed to keep output file: {0}")]
    Persist(#[from] tempfile::PathPersistError),
}

/// Turns a rendered SVG document into the bytes of one file format.
pub trait Encoder {
    fn format(&self) -> ExportFormat;

    fn encode(&self, document: &Document) -> Result<Vec<u8>, Error>;
}

/// Writes canvases to fresh files.
#[derive(Debug, Clone)]
pub struct Exporter {
    background: Color,
    temp_dir: Option<PathBuf>,
    file_prefix: String,
}

impl Exporter {
    /// Creates an exporter writing to the system temp directory on the
    /// given background.
    pub fn new(background: Color) -> Self {
        Self {
            background,
            temp_dir: None,
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }

    /// Set the directory new files are created in
    pub fn with_temp_dir(mut self, dir: Option<&Path>) -> Self {
        self.temp_dir = dir.map(Path::to_path_buf);
        self
    }

    /// Set the file name prefix
    pub fn with_file_prefix(mut self, prefix: &str) -> Self {
        self.file_prefix = prefix.to_string();
        self
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Renders `canvas` to a new file in `format`.
    ///
    /// The canvas is consumed and released before this returns. On failure
    /// the partially written file is removed.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the file cannot be created or written, or
    /// when encoding fails.
    pub fn export(
        &self,
        canvas: Canvas,
        format: ExportFormat,
        resolution: Resolution,
    ) -> Result<RenderedDiagram, Error> {
        let temp_path = self.allocate(format)?;
        info!(path:? = temp_path, format:% = format; "Exporting diagram");

        let document = canvas.render_svg(self.background);
        drop(canvas);
        debug!("SVG document rendered");

        let encoder: Box<dyn Encoder> = match format {
            ExportFormat::Svg => Box::new(svg::SvgEncoder),
            ExportFormat::Png => Box::new(png::PngEncoder::new(resolution, self.background)),
        };
        let bytes = encoder.encode(&document)?;

        // Dropping `temp_path` on an early return deletes the file
        if let Err(err) = fs::write(&temp_path, &bytes) {
            error!(path:? = temp_path, err:err; "Failed to write output file");
            return Err(Error::Io(err));
        }

        let path = temp_path.keep()?;
        info!(path:?, bytes = bytes.len(); "Diagram written");

        let resolution = match encoder.format() {
            ExportFormat::Png => Some(resolution),
            ExportFormat::Svg => None,
        };
        Ok(RenderedDiagram::new(path, format, resolution))
    }

    fn allocate(&self, format: ExportFormat) -> Result<tempfile::TempPath, Error> {
        let suffix = format!(".{}", format.extension());
        let mut builder = tempfile::Builder::new();
        builder.prefix(&self.file_prefix).suffix(&suffix);

        let file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .inspect_err(|err| error!(err:% = err; "Failed to create output file"))?;

        Ok(file.into_temp_path())
    }
}

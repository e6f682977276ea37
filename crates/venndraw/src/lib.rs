//! Venndraw - labelled 2- and 3-circle Venn diagrams.
//!
//! Set labels and free-text term lists per region go in; an SVG or PNG file
//! comes out. Each region shows its terms one per line, truncated to a fixed
//! number of lines with a `+N more` summary.
//!
//! The [`VennRenderer`] dispatches a [`DiagramRequest`] to the pipeline of
//! its circle count, which lays out the diagram, formats the regions and
//! exports the result to a fresh temporary file owned by the caller.

pub mod canvas;
pub mod config;
pub mod export;
pub mod format;
pub mod layout;
pub mod params;
pub mod pipeline;
pub mod request;
pub mod terms;

mod error;

pub use venndraw_core::{color, draw, geometry};

pub use error::VennError;
pub use params::RequestParams;
pub use request::{CircleCount, DiagramRequest, ExportFormat, RenderedDiagram, Region, Resolution};

use log::{debug, info};

use config::AppConfig;
use export::Exporter;
use layout::VennLayoutEngine;
use pipeline::{Pipeline, Topology};

/// Renders diagram requests to image files.
///
/// # Examples
///
/// ```rust,no_run
/// use venndraw::{RequestParams, VennRenderer, config::AppConfig};
///
/// let request = RequestParams {
///     mode: "2".into(),
///     left_only_2: "apples, pears".into(),
///     both: "fruit".into(),
///     export_format: "svg".into(),
///     ..RequestParams::default()
/// }
/// .into_request()
/// .expect("valid parameters");
///
/// let renderer = VennRenderer::new(AppConfig::default());
/// let rendered = renderer.render(&request).expect("Failed to render");
/// println!("{}", rendered.path().display());
/// ```
#[derive(Default)]
pub struct VennRenderer {
    config: AppConfig,
    engine: VennLayoutEngine,
}

impl VennRenderer {
    /// Create a new renderer with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Style and export settings
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            engine: VennLayoutEngine::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Render a request to a new image file.
    ///
    /// The returned file is not deleted by the renderer.
    ///
    /// # Errors
    ///
    /// Returns [`VennError::Config`] for an invalid configured background,
    /// [`VennError::Layout`] when the layout does not match the requested
    /// topology and [`VennError::Export`] when the file cannot be written.
    pub fn render(&self, request: &DiagramRequest) -> Result<RenderedDiagram, VennError> {
        info!(
            circles = request.circle_count().count(),
            format:% = request.export_format();
            "Rendering Venn diagram"
        );

        let exporter = self.exporter()?;
        let rendered = self.pipeline(request.circle_count()).run(request, &exporter)?;

        info!(path:? = rendered.path(); "Venn diagram rendered");
        Ok(rendered)
    }

    /// Lay out and style a request without exporting it.
    ///
    /// # Errors
    ///
    /// Returns [`VennError::Layout`] when the layout does not match the
    /// requested topology.
    pub fn assemble(&self, request: &DiagramRequest) -> Result<canvas::Canvas, VennError> {
        self.pipeline(request.circle_count()).assemble(request)
    }

    fn pipeline(&self, circle_count: CircleCount) -> Pipeline<'_> {
        let topology = Topology::for_circle_count(circle_count);
        debug!(circles = topology.circle_count().count(); "Pipeline selected");
        Pipeline::new(topology, &self.engine).with_font_family(self.config.style().font_family())
    }

    fn exporter(&self) -> Result<Exporter, VennError> {
        let background = self
            .config
            .style()
            .background_color()
            .map_err(VennError::Config)?
            .unwrap_or_else(|| color::Color::new("white").unwrap_or_default());

        let export = self.config.export();
        Ok(Exporter::new(background)
            .with_temp_dir(export.temp_dir())
            .with_file_prefix(export.file_prefix()))
    }
}

//! Per-mode diagram assembly.
//!
//! A [`Topology`] holds everything that differs between the 2-circle and
//! 3-circle diagrams: placeholder labels, palette, region capacity, fonts,
//! title and figure size. A [`Pipeline`] runs one request through layout,
//! styling and region formatting for its topology, then hands the canvas to
//! the exporter.

use log::{debug, info};

use venndraw_core::{
    color::Color,
    draw::{FontWeight, TextDefinition},
    geometry::Size,
};

use crate::{
    VennError,
    canvas::{Canvas, POINTS_PER_INCH},
    export::Exporter,
    format::RegionFormatter,
    layout::{LayoutEngine, LayoutRequest},
    request::{CircleCount, DiagramRequest, RenderedDiagram},
};

/// Opacity of every region patch.
pub const REGION_ALPHA: f32 = 0.4;

const SET_LABEL_FONT_SIZE: u16 = 16;
const TITLE_FONT_SIZE: u16 = 18;
/// Gap between the title and the diagram area, in points.
const TITLE_PAD: f32 = 20.0;

/// Mode-specific constants of a diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Topology {
    circle_count: CircleCount,
    default_labels: &'static [&'static str],
    palette: &'static [&'static str],
    max_visible_terms: usize,
    region_font_size: u16,
    title: &'static str,
    figure_inches: (f32, f32),
}

pub const TWO_CIRCLES: Topology = Topology {
    circle_count: CircleCount::Two,
    default_labels: &["Set A", "Set B"],
    palette: &["#ff9999", "#99ccff", "#ffcccc"],
    max_visible_terms: 7,
    region_font_size: 10,
    title: "Venn Diagram (2 Circles)",
    figure_inches: (10.0, 8.0),
};

pub const THREE_CIRCLES: Topology = Topology {
    circle_count: CircleCount::Three,
    default_labels: &["Set A", "Set B", "Set C"],
    palette: &[
        "#ff9999", "#99ccff", "#99ff99", "#ffcccc", "#ccddff", "#ccffcc", "#ffffcc",
    ],
    max_visible_terms: 5,
    region_font_size: 9,
    title: "Venn Diagram (3 Circles)",
    figure_inches: (12.0, 10.0),
};

impl Topology {
    pub fn for_circle_count(circle_count: CircleCount) -> &'static Topology {
        match circle_count {
            CircleCount::Two => &TWO_CIRCLES,
            CircleCount::Three => &THREE_CIRCLES,
        }
    }

    pub fn circle_count(&self) -> CircleCount {
        self.circle_count
    }

    pub fn palette(&self) -> &'static [&'static str] {
        self.palette
    }

    pub fn max_visible_terms(&self) -> usize {
        self.max_visible_terms
    }

    pub fn region_font_size(&self) -> u16 {
        self.region_font_size
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Figure size in points.
    pub fn figure_size(&self) -> Size {
        let (width, height) = self.figure_inches;
        Size::new(width * POINTS_PER_INCH, height * POINTS_PER_INCH)
    }

    /// Set labels with empty entries replaced by "Set A", "Set B", ...
    pub fn labels_with_defaults(&self, labels: &[String]) -> Vec<String> {
        self.default_labels
            .iter()
            .enumerate()
            .map(|(index, fallback)| match labels.get(index) {
                Some(label) if !label.is_empty() => label.clone(),
                _ => fallback.to_string(),
            })
            .collect()
    }
}

/// Runs requests of one topology through a layout engine.
pub struct Pipeline<'a> {
    topology: &'static Topology,
    engine: &'a dyn LayoutEngine,
    font_family: Option<&'a str>,
}

impl<'a> Pipeline<'a> {
    pub fn new(topology: &'static Topology, engine: &'a dyn LayoutEngine) -> Self {
        Self {
            topology,
            engine,
            font_family: None,
        }
    }

    /// Use `family` for every text element instead of the engine default
    pub fn with_font_family(mut self, family: Option<&'a str>) -> Self {
        self.font_family = family;
        self
    }

    pub fn topology(&self) -> &'static Topology {
        self.topology
    }

    /// Lays out and styles the diagram of `request`.
    ///
    /// # Errors
    ///
    /// Returns [`VennError::Config`] when the request belongs to another
    /// topology and [`VennError::Layout`] when the engine fails or returns a
    /// canvas whose slots do not match the topology.
    pub fn assemble(&self, request: &DiagramRequest) -> Result<Canvas, VennError> {
        let topology = self.topology;
        if request.circle_count() != topology.circle_count {
            return Err(VennError::Config(format!(
                "{}-circle request sent to the {}-circle pipeline",
                request.circle_count(),
                topology.circle_count
            )));
        }

        let labels = topology.labels_with_defaults(request.set_labels());
        let regions = topology.circle_count.regions();
        let subset_sizes = vec![1.0f32; regions.len()];

        info!(circles = topology.circle_count.count(); "Laying out diagram");
        let layout_request =
            LayoutRequest::new(topology.circle_count, &subset_sizes, &labels, topology.figure_size());
        let mut canvas = self.engine.layout(&layout_request)?;
        self.check_slots(&canvas)?;

        self.style_patches(&mut canvas)?;
        self.style_set_labels(&mut canvas);

        let formatter =
            RegionFormatter::new(topology.max_visible_terms, topology.region_font_size);
        let filled = formatter.apply(
            canvas.region_labels_mut(),
            &request.terms_in_canonical_order(),
        );
        debug!(filled, regions = regions.len(); "Region text applied");

        let mut title = TextDefinition::new();
        title.set_font_size(TITLE_FONT_SIZE);
        title.set_font_weight(FontWeight::Bold);
        canvas.set_title(topology.title, title, TITLE_PAD);

        if let Some(family) = self.font_family {
            for handle in canvas.text_handles_mut() {
                handle.definition_mut().set_font_family(family);
            }
        }

        Ok(canvas)
    }

    /// Assembles the diagram and exports it.
    ///
    /// # Errors
    ///
    /// Any error of [`Pipeline::assemble`], plus [`VennError::Export`] when
    /// the file cannot be written.
    pub fn run(&self, request: &DiagramRequest, exporter: &Exporter) -> Result<RenderedDiagram, VennError> {
        let canvas = self.assemble(request)?;
        let rendered = exporter.export(canvas, request.export_format(), request.resolution())?;
        Ok(rendered)
    }

    fn check_slots(&self, canvas: &Canvas) -> Result<(), VennError> {
        let expected_regions = self.topology.circle_count.regions().len();
        let expected_sets = self.topology.circle_count.count();

        if canvas.region_count() != expected_regions
            || canvas.region_labels().len() != expected_regions
            || canvas.set_labels().len() != expected_sets
        {
            return Err(VennError::Layout(format!(
                "layout returned {} regions and {} set labels, expected {expected_regions} and {expected_sets}",
                canvas.region_count(),
                canvas.set_labels().len()
            )));
        }
        Ok(())
    }

    /// Palette color by ordinal and a uniform alpha on every patch.
    ///
    /// Patches beyond the palette keep the engine's color.
    fn style_patches(&self, canvas: &mut Canvas) -> Result<(), VennError> {
        let palette = self
            .topology
            .palette
            .iter()
            .map(|hex| Color::new(hex))
            .collect::<Result<Vec<_>, _>>()
            .map_err(VennError::Config)?;

        for (ordinal, patch) in canvas.patches_mut().iter_mut().enumerate() {
            let Some(patch) = patch else {
                continue;
            };
            patch.set_alpha(REGION_ALPHA);
            if let Some(color) = palette.get(ordinal) {
                patch.set_fill_color(*color);
            }
        }
        Ok(())
    }

    fn style_set_labels(&self, canvas: &mut Canvas) {
        for handle in canvas.set_labels_mut().iter_mut().flatten() {
            let definition = handle.definition_mut();
            definition.set_font_size(SET_LABEL_FONT_SIZE);
            definition.set_font_weight(FontWeight::Bold);
        }
    }
}

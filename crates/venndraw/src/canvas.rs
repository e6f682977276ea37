//! The in-memory drawing a layout engine produces.
//!
//! A [`Canvas`] owns the circles, the region patches and every text handle
//! of one diagram. Pipelines restyle it in place; the exporter consumes it
//! and renders it to an SVG document cropped to its content.

use log::trace;
use svg::{Document, node::element as svg_element};

use venndraw_core::{
    color::Color,
    draw::{Drawable, LayeredOutput, RegionShape, RenderLayer, Text, TextDefinition, VerticalAlign},
    geometry::{Bounds, Circle, Insets, Point, Size},
};

/// Points per inch of the figure coordinate system.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Padding around the content when cropping, in points (0.1 inch).
pub const TIGHT_PADDING: f32 = 7.2;

/// Mutable text anchored at a fixed point.
///
/// ```
/// # use venndraw::canvas::TextHandle;
/// # use venndraw_core::{draw::TextDefinition, geometry::Point};
/// let mut handle = TextHandle::new("1", Point::new(10.0, 10.0), TextDefinition::new());
/// handle.set_text("alpha\nbeta");
/// assert_eq!(handle.text(), "alpha\nbeta");
/// handle.clear();
/// assert!(handle.is_blank());
/// ```
#[derive(Debug, Clone)]
pub struct TextHandle {
    content: String,
    anchor: Point,
    definition: TextDefinition,
}

impl TextHandle {
    pub fn new(content: impl Into<String>, anchor: Point, definition: TextDefinition) -> Self {
        Self {
            content: content.into(),
            anchor,
            definition,
        }
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn set_text(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Removes the text so nothing is drawn at the anchor.
    pub fn clear(&mut self) {
        self.content.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.content.is_empty()
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn definition(&self) -> &TextDefinition {
        &self.definition
    }

    pub fn definition_mut(&mut self) -> &mut TextDefinition {
        &mut self.definition
    }

    fn drawable(&self) -> Text<'_> {
        Text::new(&self.definition, &self.content)
    }

    fn render_to_layers(&self) -> LayeredOutput {
        self.drawable().render_to_layers(self.anchor)
    }

    fn bounds(&self) -> Option<Bounds> {
        self.drawable().bounds_at(self.anchor)
    }
}

/// A laid out diagram: circles, region patches and text, in figure points.
///
/// Region patches and region labels are indexed by region ordinal, set
/// labels by circle index. A `None` slot means the engine produced no
/// element for it.
#[derive(Debug)]
pub struct Canvas {
    figure_size: Size,
    axes: Bounds,
    circles: Vec<Circle>,
    patches: Vec<Option<RegionShape>>,
    region_labels: Vec<Option<TextHandle>>,
    set_labels: Vec<Option<TextHandle>>,
    title: Option<TextHandle>,
}

impl Canvas {
    /// Creates an empty canvas for a figure of `figure_size` points whose
    /// diagram area is `axes`.
    pub fn new(figure_size: Size, axes: Bounds) -> Self {
        Self {
            figure_size,
            axes,
            circles: Vec::new(),
            patches: Vec::new(),
            region_labels: Vec::new(),
            set_labels: Vec::new(),
            title: None,
        }
    }

    pub fn figure_size(&self) -> Size {
        self.figure_size
    }

    pub fn axes(&self) -> Bounds {
        self.axes
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn add_circle(&mut self, circle: Circle) {
        self.circles.push(circle);
    }

    /// Appends the patch and label of the next region ordinal.
    pub fn push_region(&mut self, patch: Option<RegionShape>, label: Option<TextHandle>) {
        self.patches.push(patch);
        self.region_labels.push(label);
    }

    pub fn push_set_label(&mut self, label: Option<TextHandle>) {
        self.set_labels.push(label);
    }

    /// Number of region slots.
    pub fn region_count(&self) -> usize {
        self.patches.len()
    }

    pub fn patches(&self) -> &[Option<RegionShape>] {
        &self.patches
    }

    pub fn patches_mut(&mut self) -> &mut [Option<RegionShape>] {
        &mut self.patches
    }

    pub fn region_labels(&self) -> &[Option<TextHandle>] {
        &self.region_labels
    }

    pub fn region_labels_mut(&mut self) -> &mut [Option<TextHandle>] {
        &mut self.region_labels
    }

    pub fn set_labels(&self) -> &[Option<TextHandle>] {
        &self.set_labels
    }

    pub fn set_labels_mut(&mut self) -> &mut [Option<TextHandle>] {
        &mut self.set_labels
    }

    pub fn title(&self) -> Option<&TextHandle> {
        self.title.as_ref()
    }

    /// Places a title centered `pad` points above the diagram area.
    pub fn set_title(&mut self, content: &str, mut definition: TextDefinition, pad: f32) {
        definition.set_vertical_align(VerticalAlign::Bottom);
        let anchor = Point::new(self.axes.center().x(), self.axes.min_y() - pad);
        self.title = Some(TextHandle::new(content, anchor, definition));
    }

    /// Iterates over every text handle present on the canvas.
    pub fn text_handles_mut(&mut self) -> impl Iterator<Item = &mut TextHandle> {
        self.region_labels
            .iter_mut()
            .chain(self.set_labels.iter_mut())
            .chain(std::iter::once(&mut self.title))
            .flatten()
    }

    /// Bounds of everything drawn, before padding.
    pub fn content_bounds(&self) -> Option<Bounds> {
        let patch_bounds = self
            .patches
            .iter()
            .flatten()
            .filter_map(|patch| patch.bounds_at(Point::default()));
        let text_bounds = self.texts().filter_map(TextHandle::bounds);

        patch_bounds
            .chain(text_bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// Renders the canvas to an SVG document cropped to its content.
    ///
    /// The document size is given in points with a matching `viewBox`, and
    /// a `background` rectangle fills the cropped area. An empty canvas
    /// keeps the full figure.
    pub fn render_svg(&self, background: Color) -> Document {
        let view = self
            .content_bounds()
            .map(|bounds| bounds.add_padding(Insets::uniform(TIGHT_PADDING)))
            .unwrap_or_else(|| Bounds::new_from_top_left(Point::default(), self.figure_size));
        trace!(
            min_x = view.min_x(), min_y = view.min_y(),
            width = view.width(), height = view.height();
            "Canvas view box"
        );

        let mut output = LayeredOutput::new();
        let backdrop = svg_element::Rectangle::new()
            .set("x", view.min_x())
            .set("y", view.min_y())
            .set("width", view.width())
            .set("height", view.height())
            .set("fill", &background)
            .set("fill-opacity", background.alpha());
        output.add_to_layer(RenderLayer::Background, Box::new(backdrop));

        for patch in self.patches.iter().flatten() {
            output.merge(patch.render_to_layers(Point::default()));
        }
        for text in self.texts() {
            output.merge(text.render_to_layers());
        }

        output.render().into_iter().fold(
            Document::new()
                .set("width", format!("{}pt", view.width()))
                .set("height", format!("{}pt", view.height()))
                .set(
                    "viewBox",
                    (view.min_x(), view.min_y(), view.width(), view.height()),
                ),
            |document, node| document.add(node),
        )
    }

    fn texts(&self) -> impl Iterator<Item = &TextHandle> {
        self.region_labels
            .iter()
            .chain(self.set_labels.iter())
            .chain(std::iter::once(&self.title))
            .flatten()
    }
}

impl Drop for Canvas {
    fn drop(&mut self) {
        trace!(regions = self.patches.len(); "Canvas released");
    }
}

#[cfg(test)]
mod tests {
    use venndraw_core::draw::{ArcSegment, RegionPath};

    use super::*;

    fn square_patch(min: f32, side: f32) -> RegionShape {
        let outline = vec![
            Point::new(min, min),
            Point::new(min + side, min),
            Point::new(min + side, min + side),
            Point::new(min, min + side),
        ];
        let path = RegionPath::new(
            outline[0],
            vec![ArcSegment::new(side, outline[2], false, true)],
            outline,
        );
        RegionShape::new(path, Color::new("#ff9999").unwrap())
    }

    fn canvas() -> Canvas {
        let figure = Size::new(720.0, 576.0);
        let axes = Bounds::new_from_top_left(Point::new(90.0, 69.12), Size::new(558.0, 443.52));
        Canvas::new(figure, axes)
    }

    #[test]
    fn test_text_handle_clear_and_set() {
        let mut handle = TextHandle::new("1", Point::new(0.0, 0.0), TextDefinition::new());
        assert!(!handle.is_blank());
        assert!(handle.bounds().is_some());

        handle.clear();
        assert!(handle.is_blank());
        assert!(handle.bounds().is_none());
        assert!(handle.render_to_layers().is_empty());

        handle.set_text("x\ny");
        assert_eq!(handle.text(), "x\ny");
    }

    #[test]
    fn test_region_slots_stay_parallel() {
        let mut canvas = canvas();
        canvas.push_region(Some(square_patch(100.0, 50.0)), None);
        canvas.push_region(None, Some(TextHandle::new("1", Point::new(1.0, 1.0), TextDefinition::new())));

        assert_eq!(canvas.region_count(), 2);
        assert_eq!(canvas.region_labels().len(), 2);
        assert!(canvas.patches()[1].is_none());
        assert!(canvas.region_labels()[0].is_none());
    }

    #[test]
    fn test_title_sits_above_axes() {
        let mut canvas = canvas();
        canvas.set_title("Title", TextDefinition::new(), 20.0);
        let title = canvas.title().unwrap();
        assert_eq!(title.anchor().y(), canvas.axes().min_y() - 20.0);
        assert_eq!(title.definition().vertical_align(), VerticalAlign::Bottom);
    }

    #[test]
    fn test_text_handles_mut_visits_everything() {
        let mut canvas = canvas();
        let handle = || Some(TextHandle::new("t", Point::default(), TextDefinition::new()));
        canvas.push_region(None, handle());
        canvas.push_region(None, None);
        canvas.push_set_label(handle());
        canvas.set_title("T", TextDefinition::new(), 20.0);

        for text in canvas.text_handles_mut() {
            text.definition_mut().set_font_family("DejaVu Sans");
        }
        assert_eq!(canvas.text_handles_mut().count(), 3);
        assert!(
            canvas
                .texts()
                .all(|text| text.definition().font_family() == "DejaVu Sans")
        );
    }

    #[test]
    fn test_render_crops_to_content() {
        let mut canvas = canvas();
        canvas.push_region(Some(square_patch(100.0, 50.0)), None);

        let content = canvas.content_bounds().unwrap();
        assert_eq!(content.min_x(), 100.0);
        assert_eq!(content.max_y(), 150.0);

        let view = content.add_padding(Insets::uniform(TIGHT_PADDING));
        let document = canvas.render_svg(Color::new("white").unwrap()).to_string();
        assert!(document.contains(&format!("width=\"{}pt\"", view.width())));
        assert!(document.contains(&format!(
            "viewBox=\"{} {} {} {}\"",
            view.min_x(),
            view.min_y(),
            view.width(),
            view.height()
        )));
        assert!(document.contains("data-layer=\"background\""));
        assert!(document.contains("fill=\"#ffffff\""));
        assert!(document.contains("fill=\"#ff9999\""));
    }

    #[test]
    fn test_render_ignores_cleared_text() {
        let mut canvas = canvas();
        canvas.push_region(
            Some(square_patch(100.0, 50.0)),
            Some(TextHandle::new("", Point::new(2000.0, 2000.0), TextDefinition::new())),
        );
        let content = canvas.content_bounds().unwrap();
        assert!(content.max_x() < 200.0);
        let document = canvas.render_svg(Color::new("white").unwrap()).to_string();
        assert!(!document.contains("<text"));
    }

    #[test]
    fn test_empty_canvas_keeps_figure() {
        let canvas = canvas();
        let document = canvas.render_svg(Color::new("white").unwrap()).to_string();
        assert!(document.contains("viewBox=\"0 0 720 576\""));
    }
}

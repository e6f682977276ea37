//! Text rendering definitions for set labels, region terms and titles.
//!
//! # Overview
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`Text`] - A renderable text element combining content with a [`TextDefinition`]
//!
//! Text is horizontally centered on its anchor. [`VerticalAlign`] decides
//! whether the anchor sits at the top, middle or bottom of the text block,
//! which is how set labels are kept clear of their circles.
//!
//! All sizes are in points, the unit of the diagram canvas.
//!
//! # Quick Start
//!
//! ```
//! # use venndraw_core::draw::{FontWeight, Text, TextDefinition};
//! let mut style = TextDefinition::new();
//! style.set_font_size(16);
//! style.set_font_weight(FontWeight::Bold);
//!
//! let text = Text::new(&style, "Set A");
//! let size = text.calculate_size();
//! assert!(size.width() > 0.0);
//! ```

use std::sync::{Mutex, OnceLock, PoisonError};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, Weight};
use log::info;
use svg::{self, node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Bounds, Point, Size},
};

/// Line height as a multiple of the font size.
const LINE_SPACING: f32 = 1.2;

/// Average glyph advance as a multiple of the font size, used when no font
/// can shape the text.
const FALLBACK_ADVANCE: f32 = 0.55;

/// Font weight of a text element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Font style of a text element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Where the anchor point sits relative to the text block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerticalAlign {
    /// Anchor at the top edge; text hangs below it
    Top,
    /// Anchor at the vertical center
    #[default]
    Center,
    /// Anchor at the bottom edge; text sits above it
    Bottom,
}

/// Defines the visual style for text elements in diagrams.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"sans-serif"` |
/// | Font size | `12` |
/// | Weight | Normal |
/// | Style | Normal |
/// | Text color | `None` (SVG default, black) |
/// | Vertical alignment | Center |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    font_weight: FontWeight,
    font_style: FontStyle,
    color: Option<Color>,
    vertical_align: VerticalAlign,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets the font family for the text.
    ///
    /// # Arguments
    ///
    /// * `family` - The font family name (e.g., "DejaVu Sans", "sans-serif")
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.font_weight = weight;
    }

    pub fn set_font_style(&mut self, style: FontStyle) {
        self.font_style = style;
    }

    /// Sets the text color. `None` leaves the SVG default (black).
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn set_vertical_align(&mut self, align: VerticalAlign) {
        self.vertical_align = align;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_weight(&self) -> FontWeight {
        self.font_weight
    }

    pub fn font_style(&self) -> FontStyle {
        self.font_style
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    pub fn vertical_align(&self) -> VerticalAlign {
        self.vertical_align
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 12,
            font_weight: FontWeight::default(),
            font_style: FontStyle::default(),
            color: None,
            vertical_align: VerticalAlign::default(),
        }
    }
}

/// A renderable text element combining content with styling.
///
/// Multi-line content is split on `\n` and rendered one `<tspan>` per line.
///
/// # Examples
///
/// ```
/// # use venndraw_core::draw::{Text, TextDefinition};
/// let style = TextDefinition::new();
/// let single = Text::new(&style, "alpha");
/// let double = Text::new(&style, "alpha\nbeta");
///
/// assert!(double.calculate_size().height() > single.calculate_size().height());
/// assert_eq!(double.content(), "alpha\nbeta");
/// ```
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    /// Creates a new text element with the given definition and content.
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    /// Returns the text content of this element.
    pub fn content(&self) -> &str {
        self.content
    }

    /// Calculate the size required to display this text content.
    pub fn calculate_size(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(self.content, self.definition)
    }

    /// Top edge of the text block for the given anchor.
    fn top_y(&self, anchor: Point, height: f32) -> f32 {
        match self.definition.vertical_align() {
            VerticalAlign::Top => anchor.y(),
            VerticalAlign::Center => anchor.y() - height / 2.0,
            VerticalAlign::Bottom => anchor.y() - height,
        }
    }
}

impl<'a> Drawable for Text<'a> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        if self.content.is_empty() {
            return output;
        }

        let lines: Vec<&str> = self.content.lines().collect();
        let text_size = self.calculate_size();
        let line_height = text_size.height() / lines.len().max(1) as f32;

        // The first tspan advances by one line height; start half a line
        // above the top edge so every line is centered in its slot.
        let top = self.top_y(position, text_size.height());
        let start_y = top - line_height / 2.0;

        let mut rendered_text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", start_y)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size());

        if self.definition.font_weight() == FontWeight::Bold {
            rendered_text = rendered_text.set("font-weight", "bold");
        }
        if self.definition.font_style() == FontStyle::Italic {
            rendered_text = rendered_text.set("font-style", "italic");
        }
        if let Some(color) = self.definition.color() {
            rendered_text = rendered_text
                .set("fill", color)
                .set("fill-opacity", color.alpha());
        }

        for line in lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("dy", line_height)
                .add(SvgText::new(line));
            rendered_text = rendered_text.add(tspan);
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn bounds_at(&self, position: Point) -> Option<Bounds> {
        if self.content.is_empty() {
            return None;
        }
        let size = self.calculate_size();
        let top_left = Point::new(
            position.x() - size.width() / 2.0,
            self.top_y(position, size.height()),
        );
        Some(Bounds::new_from_top_left(top_left, size))
    }
}

/// TextManager handles text measurement and font operations
/// It keeps a single FontSystem for the whole process since loading system
/// fonts is expensive.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Calculate the size of text in points using cosmic-text shaping.
    ///
    /// Falls back to an estimate from character counts when no installed
    /// font produces glyphs.
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let font_size = f32::from(text_def.font_size());
        let metrics = Metrics::new(font_size, font_size * LINE_SPACING);
        let line_count = text.lines().count().max(1);

        let mut font_system = self
            .font_system
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let weight = match text_def.font_weight() {
            FontWeight::Normal => Weight::NORMAL,
            FontWeight::Bold => Weight::BOLD,
        };
        let style = match text_def.font_style() {
            FontStyle::Normal => Style::Normal,
            FontStyle::Italic => Style::Italic,
        };
        let attrs = Attrs::new()
            .family(Family::Name(text_def.font_family()))
            .weight(weight)
            .style(style);

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let max_width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|glyph| glyph.x + glyph.w))
            .fold(0.0f32, f32::max);

        let width = if max_width > 0.0 {
            max_width
        } else {
            let longest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
            longest as f32 * font_size * FALLBACK_ADVANCE
        };

        Size::new(width, line_count as f32 * metrics.line_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

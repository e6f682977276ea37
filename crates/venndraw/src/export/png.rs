//! PNG output: the SVG document rasterised with resvg.
//!
//! The document is rendered at `dpi / 72` pixels per point onto a pixmap
//! pre-filled with the background color, then encoded with the `png` crate
//! so the resolution is recorded in the `pHYs` chunk.

use std::sync::{Arc, OnceLock};

use log::{debug, info};
use png::{BitDepth, ColorType, PixelDimensions, Unit};
use svg::Document;
use usvg::fontdb;

use venndraw_core::color::Color;

use crate::{
    canvas::POINTS_PER_INCH,
    export,
    request::{ExportFormat, Resolution},
};

const METERS_PER_INCH: f64 = 0.0254;

/// CSS pixels per inch, the unit usvg measures documents in.
const CSS_PIXELS_PER_INCH: f32 = 96.0;

/// System fonts for rasterisation, loaded once per process.
static FONT_DATABASE: OnceLock<Arc<fontdb::Database>> = OnceLock::new();

fn font_database() -> Arc<fontdb::Database> {
    Arc::clone(FONT_DATABASE.get_or_init(|| {
        info!("Loading system fonts for rasterization");
        let mut database = fontdb::Database::new();
        database.load_system_fonts();
        Arc::new(database)
    }))
}

/// Pixels per meter for a resolution in dots per inch.
fn pixels_per_meter(resolution: Resolution) -> u32 {
    (f64::from(resolution.dpi()) / METERS_PER_INCH).round() as u32
}

/// Rounds a pixel extent up, ignoring float noise from the unit conversion.
fn to_pixels(extent: f32) -> u32 {
    (extent - 1e-3).ceil().max(1.0) as u32
}

/// Rasterises documents at a fixed resolution.
#[derive(Debug, Clone, Copy)]
pub struct PngEncoder {
    resolution: Resolution,
    background: Color,
}

impl PngEncoder {
    pub fn new(resolution: Resolution, background: Color) -> Self {
        Self {
            resolution,
            background,
        }
    }

    fn rasterize(&self, document: &Document) -> Result<tiny_skia::Pixmap, export::Error> {
        let mut options = usvg::Options::default();
        options.fontdb = font_database();

        let tree = usvg::Tree::from_str(&document.to_string(), &options)?;

        // usvg reports the size in CSS pixels; the document is sized in points
        let points_to_pixels = f32::from(self.resolution.dpi()) / POINTS_PER_INCH;
        let css_size = tree.size();
        let width_pt = css_size.width() * POINTS_PER_INCH / CSS_PIXELS_PER_INCH;
        let height_pt = css_size.height() * POINTS_PER_INCH / CSS_PIXELS_PER_INCH;

        let width = to_pixels(width_pt * points_to_pixels);
        let height = to_pixels(height_pt * points_to_pixels);
        debug!(width, height, dpi = self.resolution.dpi(); "Rasterizing");

        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or(export::Error::PixmapAlloc { width, height })?;

        let [r, g, b, a] = self.background.to_rgba8();
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));

        let transform = tiny_skia::Transform::from_scale(
            width as f32 / css_size.width(),
            height as f32 / css_size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        Ok(pixmap)
    }
}

impl export::Encoder for PngEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Png
    }

    fn encode(&self, document: &Document) -> Result<Vec<u8>, export::Error> {
        let pixmap = self.rasterize(document)?;

        let data: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let color = pixel.demultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            })
            .collect();

        let ppm = pixels_per_meter(self.resolution);
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, pixmap.width(), pixmap.height());
            encoder.set_color(ColorType::Rgba);
            encoder.set_depth(BitDepth::Eight);
            encoder.set_pixel_dims(Some(PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;
            writer.write_image_data(&data)?;
            writer.finish()?;
        }

        Ok(bytes)
    }
}

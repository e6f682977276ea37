//! Color handling for Venndraw diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Region fills carry their transparency in the alpha
//! channel and are emitted to SVG as a `#rrggbb` fill plus a separate opacity.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff9999", "rgb(255, 0, 0)", "white", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use venndraw_core::color::Color;
    ///
    /// let pink = Color::new("#ff9999").unwrap();
    /// let white = Color::new("white").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Examples
    ///
    /// ```
    /// use venndraw_core::color::Color;
    ///
    /// let fill = Color::new("#99ccff").unwrap().with_alpha(0.4);
    /// assert!((fill.alpha() - 0.4).abs() < 1e-6);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha (transparency) component of this color, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the opaque sRGB part of this color as `#rrggbb`.
    ///
    /// The alpha channel is dropped; pair it with [`Color::alpha`] as an
    /// opacity attribute.
    ///
    /// ```
    /// use venndraw_core::color::Color;
    ///
    /// let color = Color::new("#FFCCCC").unwrap().with_alpha(0.4);
    /// assert_eq!(color.to_hex_rgb(), "#ffcccc");
    /// ```
    pub fn to_hex_rgb(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Returns the color as 8-bit sRGB channels plus alpha.
    ///
    /// ```
    /// use venndraw_core::color::Color;
    ///
    /// let color = Color::new("white").unwrap();
    /// assert_eq!(color.to_rgba8(), [255, 255, 255, 255]);
    /// ```
    pub fn to_rgba8(self) -> [u8; 4] {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        [rgba.r, rgba.g, rgba.b, rgba.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_hex_rgb())
    }
}

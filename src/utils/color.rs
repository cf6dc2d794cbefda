//! A structured RGBA color for the Sankey payload.

use color_eyre::eyre::{eyre, Report, Result};
use color_eyre::Help;

/// An 8-bit RGB color with a fractional alpha channel.
///
/// Rendered as the CSS-style string plotting libraries accept:
///
/// ```rust
/// use combgc::utils::color::Rgba;
///
/// let color = Rgba::new(255, 0, 255, 0.8);
/// assert_eq!(color.to_string(), "rgba(255, 0, 255, 0.8)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Rgba { r, g, b, a }
    }

    /// The same color at a different opacity.
    pub const fn with_alpha(self, a: f32) -> Self {
        Rgba { a, ..self }
    }

    /// Convert a point on the hue wheel to a color.
    ///
    /// `h`, `s`, and `v` are all in `[0, 1]`; `h` wraps around.
    pub fn from_hsv(h: f64, s: f64, v: f64, a: f32) -> Self {
        let h = (h.rem_euclid(1.0)) * 6.0;
        let f = h.fract();
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match h as u8 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        let channel = |x: f64| (x * 255.0).round() as u8;
        Rgba::new(channel(r), channel(g), channel(b), a)
    }

    /// Resolve a named color to its RGBA equivalent, fully opaque.
    pub fn from_name(name: &str) -> Result<Self, Report> {
        let (r, g, b) = match name.to_lowercase().as_str() {
            "black" => (0, 0, 0),
            "blue" => (0, 0, 255),
            "green" => (0, 128, 0),
            "magenta" => (255, 0, 255),
            "red" => (255, 0, 0),
            "white" => (255, 255, 255),
            _ => {
                return Err(eyre!("Unknown color name: {name:?}")
                    .suggestion("Options: black, blue, green, magenta, red, or white"))
            }
        };
        Ok(Rgba::new(r, g, b, 1.0))
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Serialized as its display string, ready for a renderer.
impl serde::Serialize for Rgba {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

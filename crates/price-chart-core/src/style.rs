// File: crates/price-chart-core/src/style.rs
// Summary: RGBA colour type (CSS parsing/printing) and the fixed price-series palette.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use skia_safe as skia;
use thiserror::Error;

/// Straight (non-premultiplied) RGBA colour; alpha in `0.0..=1.0` as in CSS.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported colour syntax: {0}")]
pub struct ColorParseError(pub String);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    pub fn to_skia(self) -> skia::Color {
        let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        skia::Color::from_argb(a, self.r, self.g, self.b)
    }

    /// CSS text: `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Accepts `#rgb`, `#rrggbb`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let t = s.trim();
        if let Some(hex) = t.strip_prefix('#') {
            let nibble = |c: u8| (c as char).to_digit(16).map(|d| d as u8);
            let bytes = hex.as_bytes();
            return match bytes.len() {
                3 => {
                    let mut out = [0u8; 3];
                    for (o, &c) in out.iter_mut().zip(bytes) {
                        let d = nibble(c).ok_or_else(err)?;
                        *o = d * 17;
                    }
                    Ok(Color::rgb(out[0], out[1], out[2]))
                }
                6 => {
                    let mut out = [0u8; 3];
                    for (o, pair) in out.iter_mut().zip(bytes.chunks_exact(2)) {
                        let hi = nibble(pair[0]).ok_or_else(err)?;
                        let lo = nibble(pair[1]).ok_or_else(err)?;
                        *o = hi * 16 + lo;
                    }
                    Ok(Color::rgb(out[0], out[1], out[2]))
                }
                _ => Err(err()),
            };
        }
        let (inner, with_alpha) = if let Some(rest) = t.strip_prefix("rgba(") {
            (rest.strip_suffix(')').ok_or_else(err)?, true)
        } else if let Some(rest) = t.strip_prefix("rgb(") {
            (rest.strip_suffix(')').ok_or_else(err)?, false)
        } else {
            return Err(err());
        };
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let expected = if with_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(err());
        }
        let channel = |p: &str| p.parse::<u8>().map_err(|_| err());
        let r = channel(parts[0])?;
        let g = channel(parts[1])?;
        let b = channel(parts[2])?;
        let a = if with_alpha {
            let a = parts[3].parse::<f32>().map_err(|_| err())?;
            if !(0.0..=1.0).contains(&a) {
                return Err(err());
            }
            a
        } else {
            1.0
        };
        Ok(Color::rgba(r, g, b, a))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

// Price series palette (Bootstrap primary blue).
pub const PRIMARY_BLUE: Color = Color::rgb(13, 110, 253);
pub const PRIMARY_BLUE_FILL: Color = Color::rgba(13, 110, 253, 0.1);
pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const GRID_FAINT: Color = Color::rgba(0, 0, 0, 0.05);

pub const BORDER_WIDTH: f32 = 2.0;
pub const TENSION: f32 = 0.4;
pub const POINT_RADIUS: f32 = 3.0;
pub const POINT_HOVER_RADIUS: f32 = 6.0;
pub const POINT_BORDER_WIDTH: f32 = 2.0;
pub const X_TICK_ROTATION: f32 = 45.0;
pub const X_MAX_TICKS: usize = 15;

/// Colours the raster engine uses for chrome that the configuration does not cover.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub axis_line: Color,
    pub tick_label: Color,
    pub tooltip_background: Color,
    pub tooltip_text: Color,
}

impl Theme {
    /// Light page chrome, close to a Bootstrap card.
    pub fn light() -> Self {
        Self {
            name: "light",
            background: WHITE,
            axis_line: Color::rgba(0, 0, 0, 0.1),
            tick_label: Color::rgb(0x66, 0x66, 0x66),
            tooltip_background: Color::rgba(0, 0, 0, 0.8),
            tooltip_text: WHITE,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::rgb(18, 18, 20),
            axis_line: Color::rgb(180, 180, 190),
            tick_label: Color::rgb(210, 210, 220),
            tooltip_background: Color::rgba(235, 235, 245, 0.9),
            tooltip_text: Color::rgb(18, 18, 20),
        }
    }
}

/// Built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name)).unwrap_or_else(Theme::light)
}

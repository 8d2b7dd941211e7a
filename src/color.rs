//! RGBA color values
//!
//! Channels are normalized floats (0.0-1.0). Colors serialize as hex strings
//! (`#rrggbb` or `#rrggbbaa`) so style files stay readable.

use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An RGBA color with normalized float channels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Error returned when a hex color string cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid hex color: {0:?} (expected #rrggbb or #rrggbbaa)")]
pub struct ParseColorError(pub String);

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const CLEAR: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    /// Create a color from float channels
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from float channels
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a color from 8-bit channels
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Create an opaque color from 8-bit channels
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Clamp every channel (alpha included) to `[0, 1]`
    pub fn clamp01(self) -> Self {
        Self::new(
            clamp_channel(self.r),
            clamp_channel(self.g),
            clamp_channel(self.b),
            clamp_channel(self.a),
        )
    }

    /// Linear interpolation toward `other` by `t`, unclamped
    pub fn lerp(self, other: Color, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Channels as 8-bit values (clamped, rounded)
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = self.clamp01();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            (c.a * 255.0).round() as u8,
        ]
    }

    /// Hex string `#rrggbbaa`
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }

    /// CSS `rgba(...)` string, used by the SVG preview
    pub fn to_css(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("rgba({r}, {g}, {b}, {:.3})", clamp_channel(self.a))
    }
}

fn clamp_channel(v: f32) -> f32 {
    // NaN maps to 0
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(
            self.r + rhs.r,
            self.g + rhs.g,
            self.b + rhs.b,
            self.a + rhs.a,
        )
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, rhs: Color) -> Color {
        Color::new(
            self.r - rhs.r,
            self.g - rhs.g,
            self.b - rhs.b,
            self.a - rhs.a,
        )
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Color {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(err());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Color::from_rgba8(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> String {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex_as_opaque() {
        let c: Color = "#ff8000".parse().unwrap();
        assert_eq!(c.to_rgba8(), [255, 128, 0, 255]);
    }

    #[test]
    fn parses_eight_digit_hex_with_alpha() {
        let c: Color = "#0000004d".parse().unwrap();
        assert_eq!(c.to_rgba8(), [0, 0, 0, 77]);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!("ff8000".parse::<Color>().is_err());
        assert!("#ff80".parse::<Color>().is_err());
        assert!("#gg8000".parse::<Color>().is_err());
    }

    #[test]
    fn hex_round_trips_8bit_colors() {
        let c = Color::from_rgba8(12, 34, 56, 78);
        assert_eq!(c.to_hex(), "#0c22384e");
        let back: Color = c.to_hex().parse().unwrap();
        assert_eq!(back.to_rgba8(), [12, 34, 56, 78]);
    }

    #[test]
    fn clamp01_bounds_every_channel() {
        let c = Color::new(-0.5, 1.5, f32::NAN, 2.0).clamp01();
        assert_eq!(c, Color::new(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn lerp_halfway_to_white() {
        let c = Color::rgb(0.0, 0.5, 1.0).lerp(Color::WHITE, 0.5);
        assert_eq!(c, Color::rgb(0.5, 0.75, 1.0));
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::BLACK).unwrap();
        assert_eq!(json, "\"#000000ff\"");
        let back: Color = serde_json::from_str("\"#ffffff\"").unwrap();
        assert_eq!(back, Color::WHITE);
    }
}

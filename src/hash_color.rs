//! Deterministic hash-based colors
//!
//! Maps arbitrary string keys (entity names, relation tags, type names) to
//! colors from a fixed palette. The mapping is a pure function of the key's
//! md5 digest: identical keys give identical colors in every process, with no
//! seed and no stored state.
//!
//! Two palettes exist. Which one applies is decided by the host's dark mode
//! flag, see [`Palette::from_dark_mode`].

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Upper bound (exclusive) of the hash fraction used by [`shade_for_key`]
pub const MAX_SHADE: f32 = 0.75;

/// Number of entries in each palette
pub const PALETTE_SIZE: usize = 11;

const LIGHT_PALETTE: [Color; PALETTE_SIZE] = [
    Color::rgb(0.78, 0.12, 0.22),
    Color::rgb(0.10, 0.73, 0.08),
    Color::rgb(0.60, 0.37, 0.08),
    Color::rgb(0.86, 0.31, 0.07),
    Color::rgb(0.68, 0.20, 0.20),
    Color::rgb(0.63, 0.30, 0.81),
    Color::rgb(0.77, 0.64, 0.06),
    Color::rgb(0.06, 0.73, 0.34),
    Color::rgb(0.59, 0.36, 0.30),
    Color::rgb(0.16, 0.48, 0.59),
    Color::rgb(0.79, 0.20, 0.65),
];

const DARK_PALETTE: [Color; PALETTE_SIZE] = [
    Color::rgb(0.78, 0.12, 0.22),
    Color::rgb(0.11, 0.60, 0.10),
    Color::rgb(0.60, 0.37, 0.08),
    Color::rgb(0.18, 0.20, 0.56),
    Color::rgb(0.68, 0.20, 0.20),
    Color::rgb(0.63, 0.30, 0.81),
    Color::rgb(0.60, 0.49, 0.05),
    Color::rgb(0.10, 0.59, 0.31),
    Color::rgb(0.59, 0.36, 0.30),
    Color::rgb(0.16, 0.48, 0.59),
    Color::rgb(0.66, 0.13, 0.54),
];

/// Palette variant, selected by the host's dark mode flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    #[default]
    Light,
    Dark,
}

impl Palette {
    /// Pick the palette matching the host's skin
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Palette::Dark
        } else {
            Palette::Light
        }
    }

    /// The fixed color table of this palette
    pub fn colors(self) -> &'static [Color; PALETTE_SIZE] {
        match self {
            Palette::Light => &LIGHT_PALETTE,
            Palette::Dark => &DARK_PALETTE,
        }
    }

    /// See [`color_for_key`]
    pub fn color_for_key(self, key: &str) -> Color {
        color_for_key(key, self)
    }

    /// See [`shade_for_key`]
    pub fn shade_for_key(self, key: &str, base: Color) -> Color {
        shade_for_key(key, base, self)
    }
}

/// First four bytes of the md5 digest of `key`'s UTF-8 bytes, little endian
pub fn hash_u32(key: &str) -> u32 {
    let digest = Md5::digest(key.as_bytes());
    u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Hash `key` into the integer range `[min, max)`.
///
/// An empty or inverted range yields `min`.
pub fn hash_in_range(key: &str, min: i32, max: i32) -> i32 {
    let span = i64::from(max) - i64::from(min);
    if span <= 0 {
        return min;
    }
    (i64::from(min) + i64::from(hash_u32(key)) % span) as i32
}

/// Hash `key` into the float range `[min, max)`.
///
/// Uses the floating remainder of the hash cast to `f32`, so large hashes
/// land on coarse steps of the range. An empty, inverted or non-finite range
/// yields `min`.
pub fn hash_in_range_f32(key: &str, min: f32, max: f32) -> f32 {
    let span = max - min;
    if !(span > 0.0) || !span.is_finite() {
        return min;
    }
    min + (hash_u32(key) as f32 % span)
}

/// Palette color for `key`
pub fn color_for_key(key: &str, palette: Palette) -> Color {
    let colors = palette.colors();
    colors[hash_in_range(key, 0, colors.len() as i32) as usize]
}

/// Shade `base` by a hash fraction of `key` in `[0, MAX_SHADE)`.
///
/// Light palette shades move toward white, dark palette shades toward zero.
/// The dark shade scales alpha down with the color channels, so dark shades
/// turn translucent instead of approaching opaque black. Every channel of the
/// result, alpha included, is clamped to `[0, 1]`.
pub fn shade_for_key(key: &str, base: Color, palette: Palette) -> Color {
    let toward = match palette {
        Palette::Light => Color::WHITE - base,
        Palette::Dark => base * -1.0,
    };
    let shade = hash_in_range_f32(key, 0.0, MAX_SHADE);
    (base + toward * shade).clamp01()
}

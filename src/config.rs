//! Settings files
//!
//! Hosts and the CLI describe their look in a YAML or JSON settings file.
//! Every field is optional; the format is picked from the file extension.
//!
//! ```yaml
//! dark_mode: true
//! widget_type: circle
//! relation_colors:
//!   mode: hashed
//! style:
//!   highlight_color: "#ff9900"
//!   padding: { x: 6, y: 3 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::RelationColoring;
use crate::color::Color;
use crate::hash_color::Palette;
use crate::measure::FixedWidthMeasure;
use crate::style::{StyleBundle, WidgetType};

/// Errors that can occur while loading settings
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is not a settings format
    #[error("unsupported settings format: {0}")]
    UnsupportedFormat(String),

    /// The path has no extension to pick a format from
    #[error("could not determine settings format from path: {0}")]
    UnknownExtension(String),
}

/// Result type for settings operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// How relation tags are colored, as written in a settings file
///
/// Unlike [`RelationColoring`], the hashed mode names no palette. It takes
/// the one matching `dark_mode`, so a file cannot pair a dark style with
/// light relation colors. [`Settings::relation_coloring`] resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RelationColors {
    /// One color for every relation
    Uniform { color: Color },
    /// Palette color hashed from the tag, in the palette matching `dark_mode`
    Hashed,
}

impl Default for RelationColors {
    fn default() -> Self {
        RelationColors::Uniform {
            color: Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dark_mode: bool,
    /// `rect` or `circle`; anything else means `rect`
    pub widget_type: WidgetType,
    /// Explicit style. Without one, the light or dark default is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleBundle>,
    pub relation_colors: RelationColors,
    pub measure: FixedWidthMeasure,
}

impl Settings {
    /// Load settings from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ConfigError::UnknownExtension(path.display().to_string()))?
            .to_ascii_lowercase();

        let settings = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml(&std::fs::read_to_string(path)?)?,
            "json" => Self::from_json(&std::fs::read_to_string(path)?)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        tracing::debug!(path = %path.display(), dark_mode = settings.dark_mode, "loaded settings");
        Ok(settings)
    }

    pub fn from_yaml(text: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json(text: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn palette(&self) -> Palette {
        Palette::from_dark_mode(self.dark_mode)
    }

    /// The explicit style, or the default for the current mode
    pub fn style_bundle(&self) -> StyleBundle {
        self.style
            .clone()
            .unwrap_or_else(|| StyleBundle::for_dark_mode(self.dark_mode))
    }

    pub fn relation_coloring(&self) -> RelationColoring {
        match self.relation_colors {
            RelationColors::Uniform { color } => RelationColoring::Uniform { color },
            RelationColors::Hashed => RelationColoring::Hashed {
                palette: self.palette(),
            },
        }
    }
}

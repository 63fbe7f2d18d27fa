//! Render configuration for glpaint
//!
//! Provides configuration file handling and validation for the values that
//! shape generated geometry:
//! - Arc settings (chord tolerance, angular epsilon, validation policy)
//! - Path settings (arc fractionization, approach fraction, highlight color)
//! - Toolpath palette (colors per motion mode and the alpha policy)
//!
//! Supports JSON and TOML file formats, chosen by file extension.

use glpaint_core::constants::{
    APPROACH_FRACTION, ARC_ANGULAR_TRAVEL_EPSILON, ARC_CCW_RGB, ARC_CW_RGB, ARC_MAX_SEGMENTS,
    ARC_TOLERANCE,
    HIGHLIGHT_COLOR, LINEAR_RGB, RAPID_RGB, UNKNOWN_RGB,
};
use glpaint_core::{MotionMode, Rgb, Rgba};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// What to do when an arc's endpoints are not on its circle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcValidation {
    /// Fractionize whatever the caller supplies
    #[default]
    Off,
    /// Log a warning and fractionize anyway
    Warn,
    /// Reject the arc
    Strict,
}

impl std::fmt::Display for ArcValidation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Warn => write!(f, "warn"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

/// Arc approximation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcSettings {
    /// Maximum chord deviation from the true arc
    pub tolerance: f64,
    /// Angular travel treated as zero when resolving full circles
    pub angular_epsilon: f64,
    /// Consistency check policy
    pub validation: ArcValidation,
    /// Most chords a single arc may be split into
    pub max_segments: usize,
}

impl Default for ArcSettings {
    fn default() -> Self {
        Self {
            tolerance: ARC_TOLERANCE,
            angular_epsilon: ARC_ANGULAR_TRAVEL_EPSILON,
            validation: ArcValidation::Off,
            max_segments: ARC_MAX_SEGMENTS,
        }
    }
}

/// Toolpath generation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Break G2/G3 arcs into line segments
    pub fractionize_arcs: bool,
    /// Fraction of each move by which the leading vertex is pulled forward
    pub approach_fraction: f64,
    /// Color substituted for highlighted lines
    pub highlight_color: Rgba,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            fractionize_arcs: true,
            approach_fraction: APPROACH_FRACTION,
            highlight_color: HIGHLIGHT_COLOR,
        }
    }
}

/// Toolpath colors per motion mode and the alpha policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathPalette {
    pub rapid: Rgb,
    pub linear: Rgb,
    pub arc_cw: Rgb,
    pub arc_ccw: Rgb,
    /// Used when no motion mode is active
    pub unknown: Rgb,
    /// Trailing alpha of straight moves without spindle speed
    pub trailing_alpha: f32,
    /// Leading alpha of the 1st, 3rd, ... arc
    pub arc_alternate_alpha: f32,
    /// Trailing alpha of arcs that were not split by this library
    pub arc_trailing_alpha: f32,
}

impl Default for PathPalette {
    fn default() -> Self {
        Self {
            rapid: RAPID_RGB,
            linear: LINEAR_RGB,
            arc_cw: ARC_CW_RGB,
            arc_ccw: ARC_CCW_RGB,
            unknown: UNKNOWN_RGB,
            trailing_alpha: 0.3,
            arc_alternate_alpha: 0.8,
            arc_trailing_alpha: 0.5,
        }
    }
}

impl PathPalette {
    /// Base color for a motion mode; `None` maps to the unknown color
    pub fn base(&self, mode: Option<MotionMode>) -> Rgb {
        match mode {
            Some(MotionMode::Rapid) => self.rapid,
            Some(MotionMode::Linear) => self.linear,
            Some(MotionMode::ArcCw) => self.arc_cw,
            Some(MotionMode::ArcCcw) => self.arc_ccw,
            None => self.unknown,
        }
    }

    fn channels(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        let named = [
            ("palette.rapid", self.rapid),
            ("palette.linear", self.linear),
            ("palette.arc_cw", self.arc_cw),
            ("palette.arc_ccw", self.arc_ccw),
            ("palette.unknown", self.unknown),
        ];
        named
            .into_iter()
            .flat_map(|(key, rgb)| rgb.into_iter().map(move |c| (key, c)))
            .chain([
                ("palette.trailing_alpha", self.trailing_alpha),
                ("palette.arc_alternate_alpha", self.arc_alternate_alpha),
                ("palette.arc_trailing_alpha", self.arc_trailing_alpha),
            ])
    }
}

/// Complete render configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub arc: ArcSettings,
    pub path: PathSettings,
    pub palette: PathPalette,
}

impl RenderConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded render config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        debug!("Saved render config to {}", path.display());
        Ok(())
    }

    /// Load from `path` if it exists, otherwise return defaults
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.arc.tolerance.is_finite() && self.arc.tolerance > 0.0) {
            return Err(out_of_range("arc.tolerance", self.arc.tolerance));
        }

        if !(self.arc.angular_epsilon.is_finite() && self.arc.angular_epsilon >= 0.0) {
            return Err(out_of_range("arc.angular_epsilon", self.arc.angular_epsilon));
        }

        if self.arc.max_segments == 0 {
            return Err(out_of_range("arc.max_segments", 0));
        }

        if !(0.0..1.0).contains(&self.path.approach_fraction) {
            return Err(out_of_range(
                "path.approach_fraction",
                self.path.approach_fraction,
            ));
        }

        if let Some(c) = self
            .path
            .highlight_color
            .iter()
            .find(|c| !(0.0..=1.0).contains(*c))
        {
            return Err(out_of_range("path.highlight_color", c));
        }

        if let Some((key, c)) = self
            .palette
            .channels()
            .find(|(_, c)| !(0.0..=1.0).contains(c))
        {
            return Err(out_of_range(key, c));
        }

        Ok(())
    }
}

/// `<config dir>/glpaint/config.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("glpaint").join("config.toml"))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

fn out_of_range(key: &str, value: impl std::fmt::Display) -> ConfigError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.arc.tolerance, 0.004);
        assert_eq!(config.arc.angular_epsilon, 5e-7);
        assert!(config.path.fractionize_arcs);
    }

    #[test]
    fn test_palette_base_colors() {
        let palette = PathPalette::default();
        assert_eq!(palette.base(Some(MotionMode::Rapid)), [0.5, 0.5, 0.5]);
        assert_eq!(palette.base(Some(MotionMode::Linear)), [0.7, 0.7, 1.0]);
        assert_eq!(palette.base(Some(MotionMode::ArcCw)), [0.8, 0.7, 1.0]);
        assert_eq!(palette.base(Some(MotionMode::ArcCcw)), [0.7, 0.8, 1.0]);
        assert_eq!(palette.base(None), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = RenderConfig::default();
        config.arc.tolerance = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange { ref key, .. }) if key == "arc.tolerance"
        ));

        let mut config = RenderConfig::default();
        config.arc.max_segments = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange { ref key, .. }) if key == "arc.max_segments"
        ));

        let mut config = RenderConfig::default();
        config.path.approach_fraction = 1.0;
        assert!(config.validate().is_err());

        let mut config = RenderConfig::default();
        config.palette.arc_cw = [0.8, 1.5, 1.0];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange { ref key, .. }) if key == "palette.arc_cw"
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: RenderConfig = toml::from_str(
            r#"
            [arc]
            tolerance = 0.01
            validation = "warn"
            "#,
        )
        .expect("parse partial config");
        assert_eq!(config.arc.tolerance, 0.01);
        assert_eq!(config.arc.validation, ArcValidation::Warn);
        assert_eq!(config.arc.angular_epsilon, ARC_ANGULAR_TRAVEL_EPSILON);
        assert_eq!(config.arc.max_segments, ARC_MAX_SEGMENTS);
        assert_eq!(config.palette, PathPalette::default());
    }
}

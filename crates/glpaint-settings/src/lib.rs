//! glpaint Settings Crate
//!
//! Handles render configuration (arc tolerances, toolpath palette, path
//! options) and its persistence as TOML or JSON.

pub mod config;
pub mod error;

pub use config::{default_config_path, ArcSettings, ArcValidation, PathPalette, PathSettings, RenderConfig};
pub use error::{ConfigError, SettingsError, SettingsResult};

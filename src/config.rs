//! Project configuration module.
//!
//! Handles loading, validating and merging `asset-prep.toml`. Stock defaults
//! describe the ShortcutCycle documentation assets; a config file at the
//! project root overrides any subset of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! output_dir = "docs/assets/images"          # Relative to the project root
//! project_markers = ["docs", "ShortcutCycle"] # Directories expected at the root
//!
//! [output]
//! quality = 80              # Lossy WebP quality (1-100)
//!
//! [screenshots]
//! dir = "ShortcutCycle/App Store Connect Assets/Screenshots"
//! primary_variant = "large" # Variant written without a -label suffix
//!
//! [[screenshots.variants]]
//! label = "large"
//! width = 1800
//!
//! [[screenshots.variants]]
//! label = "small"
//! width = 900
//!
//! [[screenshots.files]]
//! source = "HUD Light.png"
//! name = "hud-light"        # Optional, derived from `source` when omitted
//!
//! [icon]
//! source = "ShortcutCycle/ShortcutCycle/Assets.xcassets/AppIcon.appiconset/1024.png"
//! name = "app-icon"
//! max_size = 160
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Tables merge key by key; arrays (`variants`,
//! `files`, `project_markers`) replace the stock list as a whole:
//!
//! ```toml
//! [output]
//! quality = 70
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::naming::{asset_filename, derive_base_name, variant_filename};
use crate::types::{SourceSpec, WidthTarget};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the project root.
pub const CONFIG_FILE: &str = "asset-prep.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration loaded from `asset-prep.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Output directory, relative to the project root.
    pub output_dir: String,
    /// Directories whose absence suggests the tool runs outside the project root.
    pub project_markers: Vec<String>,
    /// Encoding settings.
    pub output: OutputConfig,
    /// Screenshot sources and their width variants.
    pub screenshots: ScreenshotsConfig,
    /// The app icon.
    pub icon: IconSourceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: "docs/assets/images".to_string(),
            project_markers: vec!["docs".to_string(), "ShortcutCycle".to_string()],
            output: OutputConfig::default(),
            screenshots: ScreenshotsConfig::default(),
            icon: IconSourceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.quality == 0 || self.output.quality > 100 {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }

        let variants = &self.screenshots.variants;
        if variants.is_empty() {
            return Err(ConfigError::Validation(
                "screenshots.variants must not be empty".into(),
            ));
        }
        let mut labels = HashSet::new();
        for variant in variants {
            if variant.label.is_empty() {
                return Err(ConfigError::Validation(
                    "screenshots.variants labels must not be empty".into(),
                ));
            }
            if variant.width == 0 {
                return Err(ConfigError::Validation(format!(
                    "screenshots.variants width for '{}' must be non-zero",
                    variant.label
                )));
            }
            if !labels.insert(variant.label.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate screenshots.variants label '{}'",
                    variant.label
                )));
            }
        }
        if !labels.contains(self.screenshots.primary_variant.as_str()) {
            return Err(ConfigError::Validation(format!(
                "screenshots.primary_variant '{}' is not one of the variants",
                self.screenshots.primary_variant
            )));
        }

        if self.icon.max_size == 0 {
            return Err(ConfigError::Validation(
                "icon.max_size must be non-zero".into(),
            ));
        }

        // Distinct base names can still collide once variant suffixes are
        // added ("hud" + small vs "hud-small" + large), so compare file names.
        let sources = self.screenshots.sources();
        if sources.iter().any(|s| s.name.is_empty()) || self.icon.name.is_empty() {
            return Err(ConfigError::Validation(
                "output names must not be empty".into(),
            ));
        }
        let mut filenames = HashSet::new();
        let outputs = sources
            .iter()
            .flat_map(|source| {
                variants.iter().map(move |variant| {
                    variant_filename(
                        &source.name,
                        &variant.label,
                        &self.screenshots.primary_variant,
                        variants.len(),
                    )
                })
            })
            .chain(std::iter::once(asset_filename(&self.icon.name)));
        for filename in outputs {
            if !filenames.insert(filename.clone()) {
                return Err(ConfigError::Validation(format!(
                    "two outputs would both be written to '{filename}'"
                )));
            }
        }
        Ok(())
    }
}

/// Encoding settings shared by every output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Lossy WebP quality (1 = smallest, 100 = best).
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { quality: 80 }
    }
}

/// Screenshot sources and the widths each one is rendered at.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreenshotsConfig {
    /// Source directory, relative to the project root.
    pub dir: String,
    /// Label of the variant written as `{name}.webp`.
    pub primary_variant: String,
    pub variants: Vec<WidthTarget>,
    pub files: Vec<ScreenshotFile>,
}

impl Default for ScreenshotsConfig {
    fn default() -> Self {
        let files = [
            ("HUD Light.png", "hud-light"),
            ("HUD-Grid Light.png", "hud-grid-light"),
            ("HUD Dark.png", "hud-dark"),
            ("HUD-Grid Dark.png", "hud-grid-dark"),
            ("General Light.png", "general-light"),
            ("General Dark.png", "general-dark"),
            ("Group Dark.png", "group-dark"),
            ("Menubar and languages.png", "menubar-languages"),
            ("Automatic Backups.png", "automatic-backups"),
        ]
        .into_iter()
        .map(|(source, name)| ScreenshotFile {
            source: source.to_string(),
            name: Some(name.to_string()),
        })
        .collect();

        Self {
            dir: "ShortcutCycle/App Store Connect Assets/Screenshots".to_string(),
            primary_variant: "large".to_string(),
            // large: retina quality for a 900px content column
            variants: vec![WidthTarget::new("large", 1800), WidthTarget::new("small", 900)],
            files,
        }
    }
}

impl ScreenshotsConfig {
    /// Resolve file entries into source specs, deriving missing names.
    pub fn sources(&self) -> Vec<SourceSpec> {
        self.files
            .iter()
            .map(|f| {
                let name = f
                    .name
                    .clone()
                    .unwrap_or_else(|| derive_base_name(&f.source));
                SourceSpec::new(f.source.clone(), name)
            })
            .collect()
    }
}

/// One `[[screenshots.files]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScreenshotFile {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The app icon source and its output size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconSourceConfig {
    /// Source path, relative to the project root.
    pub source: String,
    pub name: String,
    /// Icons wider than this become exact `max_size × max_size` squares.
    pub max_size: u32,
}

impl Default for IconSourceConfig {
    fn default() -> Self {
        Self {
            source: "ShortcutCycle/ShortcutCycle/Assets.xcassets/AppIcon.appiconset/1024.png"
                .to_string(),
            name: "app-icon".to_string(),
            // 4x a 40px display size
            max_size: 160,
        }
    }
}

/// Project markers from `markers` that do not exist as directories under `root`.
pub fn missing_project_markers(root: &Path, markers: &[String]) -> Vec<String> {
    markers
        .iter()
        .filter(|m| !root.join(m).is_dir())
        .cloned()
        .collect()
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AppConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `asset-prep.toml` from the project root, falling back to stock
/// defaults when there is none.
pub fn load_config(root: &Path) -> Result<AppConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(&root.join(CONFIG_FILE))?)
}

/// Load an explicitly named config file. Unlike [`load_config`], a missing
/// file is an error.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    resolve_config(stock_defaults_value(), Some(overlay))
}

/// Returns a fully-commented stock `asset-prep.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# asset-prep configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at the project root as asset-prep.toml.
# Tables merge key by key over the defaults; arrays replace them whole.
# Unknown keys will cause an error.

# Output directory for generated WebP files, relative to the project root.
output_dir = "docs/assets/images"

# Directories expected at the project root. Missing ones produce a warning.
project_markers = ["docs", "ShortcutCycle"]

# ---------------------------------------------------------------------------
# Encoding
# ---------------------------------------------------------------------------
[output]
# Lossy WebP quality (1 = smallest, 100 = best).
quality = 80

# ---------------------------------------------------------------------------
# Screenshots
# ---------------------------------------------------------------------------
[screenshots]
# Source directory, relative to the project root.
dir = "ShortcutCycle/App Store Connect Assets/Screenshots"

# Variant written as <name>.webp; every other variant is <name>-<label>.webp.
primary_variant = "large"

# Target widths. Sources at or below a width keep their size for that variant.
[[screenshots.variants]]
label = "large"
width = 1800

[[screenshots.variants]]
label = "small"
width = 900

# Source files, processed in this order. `name` is the output base name and
# defaults to the lowercased, dash-separated source file stem.
[[screenshots.files]]
source = "HUD Light.png"
name = "hud-light"

[[screenshots.files]]
source = "HUD-Grid Light.png"
name = "hud-grid-light"

[[screenshots.files]]
source = "HUD Dark.png"
name = "hud-dark"

[[screenshots.files]]
source = "HUD-Grid Dark.png"
name = "hud-grid-dark"

[[screenshots.files]]
source = "General Light.png"
name = "general-light"

[[screenshots.files]]
source = "General Dark.png"
name = "general-dark"

[[screenshots.files]]
source = "Group Dark.png"
name = "group-dark"

[[screenshots.files]]
source = "Menubar and languages.png"
name = "menubar-languages"

[[screenshots.files]]
source = "Automatic Backups.png"
name = "automatic-backups"

# ---------------------------------------------------------------------------
# App icon
# ---------------------------------------------------------------------------
[icon]
# Source path, relative to the project root.
source = "ShortcutCycle/ShortcutCycle/Assets.xcassets/AppIcon.appiconset/1024.png"

# Output base name.
name = "app-icon"

# Icons wider than this are scaled to an exact max_size x max_size square.
max_size = 160
"##
}

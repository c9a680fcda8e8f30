//! Configuration schema types for `sitekit.toml`
//!
//! Defines the structure and validation rules for sitekit project configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required)
    pub name: String,
    /// Project version
    #[serde(default = "default_version")]
    pub version: String,
    /// Build output directory
    #[serde(default = "default_out")]
    pub out: PathBuf,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_out() -> PathBuf {
    PathBuf::from("build")
}

/// Glob patterns for the local asset categories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Glob for SCSS style sources
    #[serde(default = "default_styles")]
    pub styles: String,
    /// Glob for local script sources
    #[serde(default = "default_scripts")]
    pub scripts: String,
    /// Glob for local font files
    #[serde(default = "default_fonts")]
    pub fonts: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            styles: default_styles(),
            scripts: default_scripts(),
            fonts: default_fonts(),
        }
    }
}

fn default_styles() -> String {
    "site/assets/scss/**/*.scss".to_string()
}

fn default_scripts() -> String {
    "site/assets/js/**/*.js".to_string()
}

fn default_fonts() -> String {
    "site/assets/fonts/**/*".to_string()
}

/// Vendored UI framework assets used as build inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorConfig {
    /// Root directory of the vendored framework
    #[serde(default = "default_vendor_dir")]
    pub dir: PathBuf,
    /// Vendor script files bundled before local scripts, in this order.
    /// Order is significant: later entries may expect globals from earlier ones.
    #[serde(default = "default_vendor_scripts")]
    pub scripts: Vec<PathBuf>,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            dir: default_vendor_dir(),
            scripts: default_vendor_scripts(),
        }
    }
}

fn default_vendor_dir() -> PathBuf {
    PathBuf::from("node_modules/bootstrap")
}

fn default_vendor_scripts() -> Vec<PathBuf> {
    [
        "node_modules/tether/dist/js/tether.min.js",
        "node_modules/bootstrap/dist/js/bootstrap.js",
        "node_modules/isotope-layout/dist/isotope.pkgd.js",
        "node_modules/imagesloaded/imagesloaded.js",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

/// Watch mode configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Debounce delay in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,
    /// Clear terminal between rebuilds
    #[serde(default = "default_true")]
    pub clear_screen: bool,
}

fn default_debounce_ms() -> u32 {
    100
}

fn default_true() -> bool {
    true
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            clear_screen: true,
        }
    }
}

/// Complete sitekit.toml configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Project metadata (required)
    pub project: ProjectConfig,
    /// Asset source patterns
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Vendored framework assets
    #[serde(default)]
    pub vendor: VendorConfig,
    /// Watch mode settings
    #[serde(default)]
    pub watch: WatchConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "assets.styles")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sitekit.toml: '{}' {}", self.field, self.message)
    }
}

impl SiteConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.project.name.is_empty() {
            errors.push(ConfigValidationError {
                field: "project.name".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        for (field, pattern) in [
            ("assets.styles", &self.assets.styles),
            ("assets.scripts", &self.assets.scripts),
            ("assets.fonts", &self.assets.fonts),
        ] {
            if pattern.is_empty() {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must be a non-empty glob pattern".to_string(),
                });
            }
        }

        for (i, script) in self.vendor.scripts.iter().enumerate() {
            if script.as_os_str().is_empty() {
                errors.push(ConfigValidationError {
                    field: format!("vendor.scripts[{}]", i),
                    message: "must be a non-empty path".to_string(),
                });
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

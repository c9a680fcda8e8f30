//! Build context containing configuration and state for a build.

use crate::config::SiteConfig;
use std::path::{Path, PathBuf};

/// Build context containing configuration and paths for a build operation.
///
/// The context provides access to all information needed to execute a
/// task, including the configuration, project root, and output
/// directories. Every task takes the context explicitly; there is no
/// global path registry.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// The loaded configuration
    config: SiteConfig,
    /// Project root directory (where sitekit.toml is located)
    project_root: PathBuf,
    /// Whether to run in verbose mode
    verbose: bool,
}

impl BuildContext {
    /// Create a new build context.
    ///
    /// # Arguments
    /// - `config` - The loaded configuration
    /// - `project_root` - The project root directory
    pub fn new(config: SiteConfig, project_root: PathBuf) -> Self {
        Self { config, project_root, verbose: false }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Get the project root directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Whether verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Set verbose mode.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Resolve a path relative to the project root.
    ///
    /// If the path is absolute, returns it unchanged.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    /// Resolve a glob pattern relative to the project root.
    pub fn resolve_pattern(&self, pattern: &str) -> String {
        let p = Path::new(pattern);
        if p.is_absolute() {
            pattern.to_string()
        } else {
            self.project_root.join(pattern).to_string_lossy().into_owned()
        }
    }

    /// Get the output root directory (resolved to absolute path).
    pub fn out_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.project.out)
    }

    /// Output directory for compiled CSS.
    pub fn css_dir(&self) -> PathBuf {
        self.out_dir().join("css")
    }

    /// Output directory for the script bundle.
    pub fn js_dir(&self) -> PathBuf {
        self.out_dir().join("js")
    }

    /// Output directory for copied fonts.
    pub fn fonts_dir(&self) -> PathBuf {
        self.out_dir().join("fonts")
    }

    /// Resolved glob pattern for style sources.
    pub fn styles_pattern(&self) -> String {
        self.resolve_pattern(&self.config.assets.styles)
    }

    /// Resolved glob pattern for local script sources.
    pub fn scripts_pattern(&self) -> String {
        self.resolve_pattern(&self.config.assets.scripts)
    }

    /// Resolved glob pattern for local font files.
    pub fn fonts_pattern(&self) -> String {
        self.resolve_pattern(&self.config.assets.fonts)
    }

    /// Root of the vendored UI framework.
    pub fn vendor_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.vendor.dir)
    }

    /// The vendored framework's SCSS directory, used as an include path
    /// so sources can import framework partials without relative traversal.
    pub fn vendor_style_dir(&self) -> PathBuf {
        self.vendor_dir().join("scss")
    }

    /// The vendored framework's font directory.
    pub fn vendor_fonts_dir(&self) -> PathBuf {
        self.vendor_dir().join("fonts")
    }

    /// Resolved glob pattern for the vendored framework's fonts.
    pub fn vendor_fonts_pattern(&self) -> String {
        self.vendor_fonts_dir().join("**/*").to_string_lossy().into_owned()
    }

    /// Vendor script files in bundle order, resolved to absolute paths.
    pub fn vendor_scripts(&self) -> Vec<PathBuf> {
        self.config.vendor.scripts.iter().map(|p| self.resolve_path(p)).collect()
    }

    /// Include search paths for SCSS compilation: the project root first,
    /// then the vendored framework's style directory.
    pub fn style_include_paths(&self) -> Vec<PathBuf> {
        vec![self.project_root.clone(), self.vendor_style_dir()]
    }
}

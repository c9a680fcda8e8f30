//! Source file discovery for the build tasks.
//!
//! Resolves the configured glob patterns into concrete, ordered source
//! lists per asset category.

use crate::build::BuildContext;
use glob::glob;
use std::path::{Component, Path, PathBuf};

/// Error during source discovery.
#[derive(Debug)]
pub enum DiscoveryError {
    /// Invalid glob pattern
    InvalidPattern(String, glob::PatternError),
    /// IO error during file enumeration
    Io(std::io::Error),
}

impl std::fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryError::InvalidPattern(pattern, err) => {
                write!(f, "Invalid glob pattern '{}': {}", pattern, err)
            }
            DiscoveryError::Io(err) => write!(f, "IO error during discovery: {}", err),
        }
    }
}

impl std::error::Error for DiscoveryError {}

impl From<std::io::Error> for DiscoveryError {
    fn from(err: std::io::Error) -> Self {
        DiscoveryError::Io(err)
    }
}

/// Discover files matching a resolved glob pattern.
///
/// Returns matching file paths in sorted order. Directories are skipped.
pub fn discover_files(pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let paths = glob(pattern).map_err(|e| DiscoveryError::InvalidPattern(pattern.to_string(), e))?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    files.push(path);
                }
            }
            Err(e) => {
                // Log but continue on glob errors
                eprintln!("Warning: error reading path: {}", e);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Check if a path is a Sass partial (underscore-prefixed file name).
///
/// Partials are imported by other stylesheets and compile to nothing on
/// their own, so they are excluded from the per-file compile list.
pub fn is_partial(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('_'))
        .unwrap_or(false)
}

/// Style sources: the configured styles glob, minus partials.
pub fn style_sources(ctx: &BuildContext) -> Result<Vec<PathBuf>, DiscoveryError> {
    let files = discover_files(&ctx.styles_pattern())?;
    Ok(files.into_iter().filter(|p| !is_partial(p)).collect())
}

/// Script sources in bundle order: the configured vendor scripts verbatim,
/// followed by the sorted local script glob matches.
///
/// Vendor entries are returned whether or not they exist on disk; the
/// scripts task fails on a missing input rather than silently dropping it.
pub fn script_sources(ctx: &BuildContext) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut sources = ctx.vendor_scripts();
    sources.extend(discover_files(&ctx.scripts_pattern())?);
    Ok(sources)
}

/// A group of font files and the base directory their relative layout is
/// preserved from.
#[derive(Debug)]
pub struct FontGroup {
    /// Directory the copied layout is relative to
    pub base: PathBuf,
    /// Matched font files under `base`
    pub files: Vec<PathBuf>,
}

/// Font sources: the local fonts glob plus the vendored framework's fonts.
pub fn font_sources(ctx: &BuildContext) -> Result<Vec<FontGroup>, DiscoveryError> {
    let local_pattern = ctx.fonts_pattern();
    let local = FontGroup {
        base: glob_base(&local_pattern),
        files: discover_files(&local_pattern)?,
    };
    let vendor = FontGroup {
        base: ctx.vendor_fonts_dir(),
        files: discover_files(&ctx.vendor_fonts_pattern())?,
    };
    Ok(vec![local, vendor])
}

/// The literal directory prefix of a glob pattern: every leading path
/// component up to the first one containing a wildcard.
///
/// Used by the watcher to know which directory to observe.
pub fn glob_base(pattern: &str) -> PathBuf {
    let mut base = PathBuf::new();
    for component in Path::new(pattern).components() {
        if let Component::Normal(part) = component {
            let part_str = part.to_string_lossy();
            if part_str.contains('*') || part_str.contains('?') || part_str.contains('[') {
                break;
            }
        }
        base.push(component.as_os_str());
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(&path).unwrap().write_all(b"x").unwrap();
        path
    }

    fn context_in(temp: &TempDir) -> BuildContext {
        BuildContext::new(default_config(), temp.path().to_path_buf())
    }

    #[test]
    fn test_discover_files_simple() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "main.scss");
        create_test_file(temp.path(), "notes.txt");

        let pattern = temp.path().join("*.scss").to_string_lossy().into_owned();
        let files = discover_files(&pattern).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("main.scss"));
    }

    #[test]
    fn test_discover_files_recursive_and_sorted() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "z.scss");
        create_test_file(temp.path(), "sub/a.scss");
        create_test_file(temp.path(), "sub/deep/m.scss");

        let pattern = temp.path().join("**/*.scss").to_string_lossy().into_owned();
        let files = discover_files(&pattern).unwrap();
        assert_eq!(files.len(), 3);
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn test_discover_files_no_match() {
        let temp = TempDir::new().unwrap();
        let pattern = temp.path().join("*.scss").to_string_lossy().into_owned();
        let files = discover_files(&pattern).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_discover_files_invalid_pattern() {
        let result = discover_files("[");
        assert!(matches!(result, Err(DiscoveryError::InvalidPattern(_, _))));
    }

    #[test]
    fn test_is_partial() {
        assert!(is_partial(Path::new("scss/_variables.scss")));
        assert!(!is_partial(Path::new("scss/main.scss")));
        assert!(!is_partial(Path::new("scss/underscore_dir/main.scss")));
    }

    #[test]
    fn test_style_sources_skip_partials() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "site/assets/scss/main.scss");
        create_test_file(temp.path(), "site/assets/scss/_variables.scss");

        let ctx = context_in(&temp);
        let sources = style_sources(&ctx).unwrap();
        assert_eq!(sources.len(), 1);
        assert!(sources[0].ends_with("main.scss"));
    }

    #[test]
    fn test_script_sources_vendor_first() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "site/assets/js/site.js");

        let mut config = default_config();
        config.vendor.scripts = vec![PathBuf::from("vendor/widget.js")];
        let ctx = BuildContext::new(config, temp.path().to_path_buf());

        let sources = script_sources(&ctx).unwrap();
        assert_eq!(sources.len(), 2);
        assert!(sources[0].ends_with("vendor/widget.js"));
        assert!(sources[1].ends_with("site.js"));
    }

    #[test]
    fn test_font_sources_groups() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "site/assets/fonts/body.woff");
        create_test_file(temp.path(), "node_modules/bootstrap/fonts/glyphs.woff");

        let ctx = context_in(&temp);
        let groups = font_sources(&ctx).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].files.len(), 1);
        assert_eq!(groups[1].files.len(), 1);
        assert!(groups[1].base.ends_with("node_modules/bootstrap/fonts"));
    }

    #[test]
    fn test_glob_base() {
        assert_eq!(glob_base("site/assets/scss/**/*.scss"), PathBuf::from("site/assets/scss"));
        assert_eq!(glob_base("site/assets/fonts/**/*"), PathBuf::from("site/assets/fonts"));
        assert_eq!(glob_base("/abs/js/*.js"), PathBuf::from("/abs/js"));
        assert_eq!(glob_base("plain/dir"), PathBuf::from("plain/dir"));
    }
}

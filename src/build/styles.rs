//! Styles tasks: SCSS compilation and in-place minification.
//!
//! Compilation runs per source file behind an error boundary: a file that
//! fails to compile is reported and skipped, and its siblings still
//! produce output. Every other failure mode aborts the task.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::build::{discovery, BuildContext, TaskKind, TaskResult};
use crate::css;

/// Compile all style sources into the output CSS directory.
///
/// Each compilable source produces exactly one `.css` file named after
/// its stem. Compilation resolves imports against the project root and
/// the vendored framework's style directory, so sources can pull in
/// framework partials without relative-path traversal.
pub fn compile_styles(ctx: &BuildContext) -> TaskResult {
    let start = Instant::now();

    let sources = match discovery::style_sources(ctx) {
        Ok(sources) => sources,
        Err(e) => return TaskResult::failed(TaskKind::Styles, e.to_string(), start.elapsed()),
    };

    let css_dir = ctx.css_dir();
    if let Err(e) = fs::create_dir_all(&css_dir) {
        return TaskResult::failed(
            TaskKind::Styles,
            format!("Failed to create {}: {}", css_dir.display(), e),
            start.elapsed(),
        );
    }

    let mut options = grass::Options::default().style(grass::OutputStyle::Expanded);
    for path in ctx.style_include_paths() {
        options = options.load_path(path);
    }

    let mut outputs = Vec::new();
    let mut bytes_written: u64 = 0;

    for source in &sources {
        if ctx.is_verbose() {
            println!("Compiling: {}", source.display());
        }

        let compiled = match grass::from_path(source, &options) {
            Ok(compiled) => compiled,
            Err(e) => {
                // Error boundary: one broken stylesheet must not take the
                // rest of the batch down with it.
                eprintln!("{}", e);
                continue;
            }
        };

        let processed = match css::process(&compiled, false) {
            Ok(processed) => processed,
            Err(e) => {
                eprintln!("{}: {}", source.display(), e);
                continue;
            }
        };

        let dest = match output_path(&css_dir, source) {
            Some(dest) => dest,
            None => {
                eprintln!("Skipping source with no file stem: {}", source.display());
                continue;
            }
        };

        if let Err(e) = fs::write(&dest, &processed) {
            return TaskResult::failed(
                TaskKind::Styles,
                format!("Failed to write {}: {}", dest.display(), e),
                start.elapsed(),
            );
        }

        bytes_written += processed.len() as u64;
        outputs.push(dest);
    }

    TaskResult::success(TaskKind::Styles, outputs, bytes_written, start.elapsed())
}

/// Minify the given CSS files in place.
///
/// Used by the build aggregate with the styles task's explicit output
/// list; the failure policy here is the default abort-on-error.
pub fn minify_styles(ctx: &BuildContext, files: &[PathBuf]) -> TaskResult {
    let start = Instant::now();
    let mut outputs = Vec::new();
    let mut bytes_written: u64 = 0;

    for file in files {
        if ctx.is_verbose() {
            println!("Minifying: {}", file.display());
        }

        let content = match fs::read_to_string(file) {
            Ok(content) => content,
            Err(e) => {
                return TaskResult::failed(
                    TaskKind::StylesMin,
                    format!("Failed to read {}: {}", file.display(), e),
                    start.elapsed(),
                );
            }
        };

        let minified = match css::minify(&content) {
            Ok(minified) => minified,
            Err(e) => {
                return TaskResult::failed(
                    TaskKind::StylesMin,
                    format!("{}: {}", file.display(), e),
                    start.elapsed(),
                );
            }
        };

        if let Err(e) = fs::write(file, &minified) {
            return TaskResult::failed(
                TaskKind::StylesMin,
                format!("Failed to write {}: {}", file.display(), e),
                start.elapsed(),
            );
        }

        bytes_written += minified.len() as u64;
        outputs.push(file.clone());
    }

    TaskResult::success(TaskKind::StylesMin, outputs, bytes_written, start.elapsed())
}

/// Minify whatever CSS the output directory currently holds.
///
/// Entry point for the standalone `styles:min` command, which has no
/// in-memory hand-off from a preceding styles run.
pub fn minify_output_dir(ctx: &BuildContext) -> TaskResult {
    let pattern = ctx.css_dir().join("*.css").to_string_lossy().into_owned();
    match discovery::discover_files(&pattern) {
        Ok(files) => minify_styles(ctx, &files),
        Err(e) => TaskResult::failed(TaskKind::StylesMin, e.to_string(), std::time::Duration::ZERO),
    }
}

/// Output path for a compiled source: `<css_dir>/<stem>.css`.
fn output_path(css_dir: &Path, source: &Path) -> Option<PathBuf> {
    let stem = source.file_stem()?.to_str()?;
    Some(css_dir.join(format!("{}.css", stem)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::TaskStatus;
    use crate::config::default_config;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(&path).unwrap().write_all(content.as_bytes()).unwrap();
        path
    }

    fn context_in(temp: &TempDir) -> BuildContext {
        BuildContext::new(default_config(), temp.path().to_path_buf())
    }

    #[test]
    fn test_compile_styles_one_output_per_source() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "site/assets/scss/a.scss", "a { color: red; }");
        create_test_file(temp.path(), "site/assets/scss/b.scss", "b { color: blue; }");

        let result = compile_styles(&context_in(&temp));
        assert!(result.is_success());
        assert_eq!(result.outputs.len(), 2);
        assert!(temp.path().join("build/css/a.css").exists());
        assert!(temp.path().join("build/css/b.css").exists());
        assert!(result.bytes_written > 0);
    }

    #[test]
    fn test_compile_styles_skips_malformed_input() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "site/assets/scss/good.scss", "a { color: red; }");
        create_test_file(temp.path(), "site/assets/scss/broken.scss", "a { color: $undefined; }");

        let result = compile_styles(&context_in(&temp));
        assert!(result.is_success(), "a broken sibling must not fail the task");
        assert_eq!(result.outputs.len(), 1);
        assert!(temp.path().join("build/css/good.css").exists());
        assert!(!temp.path().join("build/css/broken.css").exists());
    }

    #[test]
    fn test_compile_styles_resolves_partials_from_project_root() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "site/assets/scss/_shared.scss", "$accent: #ff0000;");
        create_test_file(
            temp.path(),
            "site/assets/scss/main.scss",
            "@use \"site/assets/scss/shared\";\na { color: shared.$accent; }",
        );

        let result = compile_styles(&context_in(&temp));
        assert!(result.is_success());
        // The partial itself produces no output file
        assert_eq!(result.outputs.len(), 1);
        let out = fs::read_to_string(temp.path().join("build/css/main.css")).unwrap();
        assert!(out.contains("red") || out.contains("#ff0000") || out.contains("#f00"));
    }

    #[test]
    fn test_compile_styles_empty_sources() {
        let temp = TempDir::new().unwrap();
        let result = compile_styles(&context_in(&temp));
        assert!(result.is_success());
        assert!(result.outputs.is_empty());
        assert_eq!(result.bytes_written, 0);
    }

    #[test]
    fn test_minify_styles_in_place() {
        let temp = TempDir::new().unwrap();
        let css = create_test_file(temp.path(), "build/css/a.css", "a {\n  color: red;\n}\n");

        let result = minify_styles(&context_in(&temp), &[css.clone()]);
        assert!(result.is_success());
        let minified = fs::read_to_string(&css).unwrap();
        assert!(!minified.contains('\n'));
        assert_eq!(result.bytes_written, minified.len() as u64);
    }

    #[test]
    fn test_minify_styles_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("build/css/nope.css");

        let result = minify_styles(&context_in(&temp), &[missing]);
        assert!(matches!(result.status, TaskStatus::Failed(_)));
    }

    #[test]
    fn test_minify_output_dir_picks_up_compiled_css() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "build/css/a.css", "a {\n  color: red;\n}\n");
        create_test_file(temp.path(), "build/css/b.css", "b {\n  color: blue;\n}\n");

        let result = minify_output_dir(&context_in(&temp));
        assert!(result.is_success());
        assert_eq!(result.outputs.len(), 2);
    }

    #[test]
    fn test_output_path() {
        let dest = output_path(Path::new("/out/css"), Path::new("site/scss/main.scss")).unwrap();
        assert_eq!(dest, PathBuf::from("/out/css/main.css"));
    }
}

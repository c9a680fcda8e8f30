//! Scripts task: minify and concatenate vendor plus local scripts.
//!
//! Input order is contractual. Vendor scripts are listed before local
//! sources and concatenation preserves the list exactly, so a widget
//! library that expects a DOM helper's global still finds it.

use std::fs;
use std::time::Instant;

use crate::build::{discovery, BuildContext, TaskKind, TaskResult};

/// Name of the single bundle the task writes.
pub const BUNDLE_NAME: &str = "app.js";

/// Bundle all script sources into `<out>/js/app.js`.
///
/// Any missing or unreadable input fails the whole task; there is no
/// error boundary here.
pub fn bundle_scripts(ctx: &BuildContext) -> TaskResult {
    let start = Instant::now();

    let sources = match discovery::script_sources(ctx) {
        Ok(sources) => sources,
        Err(e) => return TaskResult::failed(TaskKind::Scripts, e.to_string(), start.elapsed()),
    };

    let mut bundle = String::new();
    for source in &sources {
        if ctx.is_verbose() {
            println!("Bundling: {}", source.display());
        }

        let code = match fs::read_to_string(source) {
            Ok(code) => code,
            Err(e) => {
                return TaskResult::failed(
                    TaskKind::Scripts,
                    format!("Script source not found or unreadable: {}: {}", source.display(), e),
                    start.elapsed(),
                );
            }
        };

        if !bundle.is_empty() {
            bundle.push('\n');
        }
        bundle.push_str(&minify_script(&code));
    }

    let js_dir = ctx.js_dir();
    if let Err(e) = fs::create_dir_all(&js_dir) {
        return TaskResult::failed(
            TaskKind::Scripts,
            format!("Failed to create {}: {}", js_dir.display(), e),
            start.elapsed(),
        );
    }

    let dest = js_dir.join(BUNDLE_NAME);
    if let Err(e) = fs::write(&dest, &bundle) {
        return TaskResult::failed(
            TaskKind::Scripts,
            format!("Failed to write {}: {}", dest.display(), e),
            start.elapsed(),
        );
    }

    TaskResult::success(TaskKind::Scripts, vec![dest], bundle.len() as u64, start.elapsed())
}

/// Minify a single script, keeping its license comment blocks on top.
fn minify_script(code: &str) -> String {
    let licenses = extract_license_comments(code);
    let minified = minifier::js::minify(code).to_string();

    if licenses.is_empty() {
        minified
    } else {
        let mut out = licenses.join("\n");
        out.push('\n');
        out.push_str(&minified);
        out
    }
}

/// Collect block comments that are license notices: `/*!`-style banners
/// and blocks carrying an `@license` or `@preserve` tag.
fn extract_license_comments(code: &str) -> Vec<String> {
    let bytes = code.as_bytes();
    let mut comments = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            // Skip string and template literals so comment markers inside
            // them are not picked up
            b'"' | b'\'' | b'`' => {
                let quote = bytes[i];
                i += 1;
                while i < bytes.len() {
                    if bytes[i] == b'\\' {
                        i += 2;
                        continue;
                    }
                    if bytes[i] == quote {
                        i += 1;
                        break;
                    }
                    i += 1;
                }
            }
            b'/' if i + 1 < bytes.len() && bytes[i + 1] == b'/' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if i + 1 < bytes.len() && bytes[i + 1] == b'*' => {
                let comment_start = i;
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i = (i + 2).min(bytes.len());
                let comment = &code[comment_start..i];
                if is_license_comment(comment) {
                    comments.push(comment.to_string());
                }
            }
            _ => i += 1,
        }
    }

    comments
}

fn is_license_comment(comment: &str) -> bool {
    comment.starts_with("/*!") || comment.contains("@license") || comment.contains("@preserve")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::TaskStatus;
    use crate::config::default_config;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::File::create(&path).unwrap().write_all(content.as_bytes()).unwrap();
        path
    }

    fn context_with_vendor(temp: &TempDir, vendor: Vec<PathBuf>) -> BuildContext {
        let mut config = default_config();
        config.vendor.scripts = vendor;
        BuildContext::new(config, temp.path().to_path_buf())
    }

    #[test]
    fn test_bundle_preserves_declared_order() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "vendor/helper.js", "var marker = \"FIRST_VENDOR\";");
        create_test_file(temp.path(), "site/assets/js/widget.js", "var marker2 = \"SECOND_LOCAL\";");

        let ctx = context_with_vendor(&temp, vec![PathBuf::from("vendor/helper.js")]);
        let result = bundle_scripts(&ctx);
        assert!(result.is_success());

        let bundle = fs::read_to_string(temp.path().join("build/js/app.js")).unwrap();
        let first = bundle.find("FIRST_VENDOR").expect("vendor code present");
        let second = bundle.find("SECOND_LOCAL").expect("local code present");
        assert!(first < second, "vendor code must precede local code");
    }

    #[test]
    fn test_bundle_orders_local_files_lexicographically() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "site/assets/js/c.js", "var c = \"MARK_C\";");
        create_test_file(temp.path(), "site/assets/js/a.js", "var a = \"MARK_A\";");
        create_test_file(temp.path(), "site/assets/js/b.js", "var b = \"MARK_B\";");

        let ctx = context_with_vendor(&temp, vec![]);
        let result = bundle_scripts(&ctx);
        assert!(result.is_success());

        let bundle = fs::read_to_string(temp.path().join("build/js/app.js")).unwrap();
        let a = bundle.find("MARK_A").unwrap();
        let b = bundle.find("MARK_B").unwrap();
        let c = bundle.find("MARK_C").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_bundle_missing_vendor_input_fails() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "site/assets/js/site.js", "var x = 1;");

        let ctx = context_with_vendor(&temp, vec![PathBuf::from("vendor/not-there.js")]);
        let result = bundle_scripts(&ctx);
        assert!(matches!(result.status, TaskStatus::Failed(_)));
        assert!(!temp.path().join("build/js/app.js").exists());
    }

    #[test]
    fn test_bundle_reports_size() {
        let temp = TempDir::new().unwrap();
        create_test_file(temp.path(), "site/assets/js/site.js", "var answer = 42;");

        let ctx = context_with_vendor(&temp, vec![]);
        let result = bundle_scripts(&ctx);
        assert!(result.is_success());

        let bundle = fs::read_to_string(temp.path().join("build/js/app.js")).unwrap();
        assert_eq!(result.bytes_written, bundle.len() as u64);
    }

    #[test]
    fn test_minify_script_keeps_license_banner() {
        let code = "/*! widget.js v1.0 | MIT */\nvar widget = { name: \"w\" };\n";
        let out = minify_script(code);
        assert!(out.starts_with("/*! widget.js v1.0 | MIT */"));
        assert!(out.contains("widget"));
    }

    #[test]
    fn test_extract_license_comments() {
        let code = r#"
/*! banner */
/* plain comment */
/* @license MIT */
var s = "/*! not a comment */";
// /* @preserve also not a block */
"#;
        let comments = extract_license_comments(code);
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0], "/*! banner */");
        assert_eq!(comments[1], "/* @license MIT */");
    }

    #[test]
    fn test_extract_license_comments_skips_strings() {
        let code = "var a = '/*! nope */'; var b = `/* @license nope */`;";
        assert!(extract_license_comments(code).is_empty());
    }

    #[test]
    fn test_is_license_comment() {
        assert!(is_license_comment("/*! banner */"));
        assert!(is_license_comment("/* @license MIT */"));
        assert!(is_license_comment("/* @preserve */"));
        assert!(!is_license_comment("/* ordinary */"));
    }
}

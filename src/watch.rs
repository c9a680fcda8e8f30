//! Watch mode for automatic rebuilds on file changes
//!
//! Observes the style and script source trees with a debounced watcher
//! and re-runs the matching task when files change. Fonts are not
//! watched.

use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::build::{discovery, scripts, styles, BuildContext, TaskResult, TaskStatus};
use crate::report::{clear_screen, format_duration, timestamp};

/// Error during watch mode
#[derive(Debug)]
pub enum WatchError {
    /// Failed to initialize file watcher
    WatcherInit(notify::Error),
    /// Failed to add watch path
    WatchPath(notify::Error),
    /// Channel receive error
    ChannelError(String),
    /// Source directory not found
    SourceNotFound(PathBuf),
}

impl std::fmt::Display for WatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatchError::WatcherInit(e) => write!(f, "Failed to initialize file watcher: {}", e),
            WatchError::WatchPath(e) => write!(f, "Failed to watch path: {}", e),
            WatchError::ChannelError(msg) => write!(f, "Watch channel error: {}", msg),
            WatchError::SourceNotFound(path) => {
                write!(f, "Source directory not found: {}", path.display())
            }
        }
    }
}

impl std::error::Error for WatchError {}

/// Which task a changed file feeds into.
///
/// Variant order is the rebuild/report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeKind {
    /// Style source changed; re-run the styles task
    Styles,
    /// Script source changed; re-run the scripts task
    Scripts,
}

/// Classify a changed path by extension.
///
/// Anything that is neither a style nor a script source is ignored;
/// fonts in particular do not trigger rebuilds.
pub fn classify(path: &Path) -> Option<ChangeKind> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "scss" | "sass" | "css" => Some(ChangeKind::Styles),
        "js" | "mjs" => Some(ChangeKind::Scripts),
        _ => None,
    }
}

/// Directories the watcher observes: the literal base of the style and
/// script source globs, deduplicated.
pub fn watch_roots(ctx: &BuildContext) -> Vec<PathBuf> {
    let roots: BTreeSet<PathBuf> = [
        discovery::glob_base(&ctx.styles_pattern()),
        discovery::glob_base(&ctx.scripts_pattern()),
    ]
    .into_iter()
    .collect();
    roots.into_iter().collect()
}

/// Watch for file changes and rebuild automatically.
///
/// Runs an initial styles + scripts pass, then blocks until interrupted
/// (Ctrl+C). Task failures are reported and the loop keeps watching.
pub fn watch_and_rebuild(ctx: BuildContext) -> Result<(), WatchError> {
    let roots = watch_roots(&ctx);
    for root in &roots {
        if !root.exists() {
            return Err(WatchError::SourceNotFound(root.clone()));
        }
    }

    let watch_config = ctx.config().watch.clone();
    let clear = watch_config.clear_screen && atty::is(atty::Stream::Stdout);

    let (tx, rx) = channel();
    let debounce_duration = Duration::from_millis(watch_config.debounce_ms as u64);
    let mut debouncer = new_debouncer(debounce_duration, tx).map_err(WatchError::WatcherInit)?;

    for root in &roots {
        debouncer
            .watcher()
            .watch(root, RecursiveMode::Recursive)
            .map_err(WatchError::WatchPath)?;
    }

    // Initial build of both watched categories
    if clear {
        clear_screen();
    }
    println!("[{}] Building...", timestamp());
    print_task_result(&styles::compile_styles(&ctx));
    print_task_result(&scripts::bundle_scripts(&ctx));
    print_watching(&roots);

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let mut changes: BTreeSet<ChangeKind> = BTreeSet::new();
                for event in
                    events.iter().filter(|e| matches!(e.kind, DebouncedEventKind::Any))
                {
                    if let Some(kind) = classify(&event.path) {
                        if let Some(name) = event.path.file_name() {
                            println!("[{}] Changed: {}", timestamp(), name.to_string_lossy());
                        }
                        changes.insert(kind);
                    }
                }

                if changes.is_empty() {
                    continue;
                }

                if clear {
                    clear_screen();
                }
                println!("[{}] Building...", timestamp());
                if changes.contains(&ChangeKind::Styles) {
                    print_task_result(&styles::compile_styles(&ctx));
                }
                if changes.contains(&ChangeKind::Scripts) {
                    print_task_result(&scripts::bundle_scripts(&ctx));
                }
                print_watching(&roots);
            }
            Ok(Err(error)) => {
                // Watch error (non-fatal) - log but continue watching
                eprintln!("[{}] Watch error: {:?}", timestamp(), error);
                eprintln!("[{}] Continuing to watch...", timestamp());
            }
            Err(e) => {
                return Err(WatchError::ChannelError(e.to_string()));
            }
        }
    }
}

fn print_watching(roots: &[PathBuf]) {
    let listed: Vec<_> = roots.iter().map(|r| r.display().to_string()).collect();
    println!("[{}] Watching {} for changes...", timestamp(), listed.join(", "));
}

/// Print a task result to the console.
fn print_task_result(result: &TaskResult) {
    match &result.status {
        TaskStatus::Failed(err) => {
            eprintln!("[{}] {} failed: {}", timestamp(), result.kind, err);
        }
        _ => {
            println!(
                "[{}] {} ({})",
                timestamp(),
                result.notification(),
                format_duration(result.duration)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;
    use tempfile::TempDir;

    #[test]
    fn test_classify_style_files() {
        assert_eq!(classify(Path::new("main.scss")), Some(ChangeKind::Styles));
        assert_eq!(classify(Path::new("legacy.sass")), Some(ChangeKind::Styles));
        assert_eq!(classify(Path::new("vendor.css")), Some(ChangeKind::Styles));
    }

    #[test]
    fn test_classify_script_files() {
        assert_eq!(classify(Path::new("site.js")), Some(ChangeKind::Scripts));
        assert_eq!(classify(Path::new("module.mjs")), Some(ChangeKind::Scripts));
    }

    #[test]
    fn test_classify_ignores_other_files() {
        assert_eq!(classify(Path::new("body.woff")), None);
        assert_eq!(classify(Path::new("readme.md")), None);
        assert_eq!(classify(Path::new("noextension")), None);
    }

    #[test]
    fn test_watch_roots_from_patterns() {
        let temp = TempDir::new().unwrap();
        let ctx = BuildContext::new(default_config(), temp.path().to_path_buf());

        let roots = watch_roots(&ctx);
        assert_eq!(roots.len(), 2);
        assert!(roots.iter().any(|r| r.ends_with("site/assets/scss")));
        assert!(roots.iter().any(|r| r.ends_with("site/assets/js")));
    }

    #[test]
    fn test_watch_error_source_not_found() {
        let temp = TempDir::new().unwrap();
        let ctx = BuildContext::new(default_config(), temp.path().to_path_buf());

        let result = watch_and_rebuild(ctx);
        assert!(matches!(result, Err(WatchError::SourceNotFound(_))));
    }

    #[test]
    fn test_change_kind_order_styles_first() {
        let mut set = BTreeSet::new();
        set.insert(ChangeKind::Scripts);
        set.insert(ChangeKind::Styles);
        let ordered: Vec<_> = set.into_iter().collect();
        assert_eq!(ordered, vec![ChangeKind::Styles, ChangeKind::Scripts]);
    }
}

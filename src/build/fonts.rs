//! Fonts task: copy local and vendored font files into the output tree.

use std::fs;
use std::time::Instant;

use crate::build::{discovery, BuildContext, TaskKind, TaskResult};

/// Copy matched font files verbatim into `<out>/fonts/`, preserving each
/// file's layout relative to its glob base. No transformation, no
/// ordering significance.
pub fn copy_fonts(ctx: &BuildContext) -> TaskResult {
    let start = Instant::now();

    let groups = match discovery::font_sources(ctx) {
        Ok(groups) => groups,
        Err(e) => return TaskResult::failed(TaskKind::Fonts, e.to_string(), start.elapsed()),
    };

    let fonts_dir = ctx.fonts_dir();
    if let Err(e) = fs::create_dir_all(&fonts_dir) {
        return TaskResult::failed(
            TaskKind::Fonts,
            format!("Failed to create {}: {}", fonts_dir.display(), e),
            start.elapsed(),
        );
    }

    let mut outputs = Vec::new();
    let mut bytes_written: u64 = 0;

    for group in &groups {
        for source in &group.files {
            if ctx.is_verbose() {
                println!("Copying: {}", source.display());
            }

            let relative = source.strip_prefix(&group.base).unwrap_or(source.as_path());
            let dest = fonts_dir.join(relative);

            if let Some(parent) = dest.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    return TaskResult::failed(
                        TaskKind::Fonts,
                        format!("Failed to create {}: {}", parent.display(), e),
                        start.elapsed(),
                    );
                }
            }

            match fs::copy(source, &dest) {
                Ok(copied) => {
                    bytes_written += copied;
                    outputs.push(dest);
                }
                Err(e) => {
                    return TaskResult::failed(
                        TaskKind::Fonts,
                        format!("Failed to copy {}: {}", source.display(), e),
                        start.elapsed(),
                    );
                }
            }
        }
    }

    TaskResult::success(TaskKind::Fonts, outputs, bytes_written, start.elapsed())
}

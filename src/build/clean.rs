//! Clean task: delete the build output tree.

use std::fs;
use std::io;
use std::time::Instant;

use crate::build::{BuildContext, TaskKind, TaskResult};

/// Delete the output directory recursively.
///
/// An absent directory is a no-op reported as skipped; everything a full
/// build writes is regenerated from sources, so nothing is preserved.
pub fn clean(ctx: &BuildContext) -> TaskResult {
    let start = Instant::now();
    let out = ctx.out_dir();

    if ctx.is_verbose() {
        println!("Removing {}", out.display());
    }

    match fs::remove_dir_all(&out) {
        Ok(()) => TaskResult::success(TaskKind::Clean, vec![], 0, start.elapsed()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => TaskResult::skipped(TaskKind::Clean),
        Err(e) => TaskResult::failed(
            TaskKind::Clean,
            format!("Failed to remove {}: {}", out.display(), e),
            start.elapsed(),
        ),
    }
}

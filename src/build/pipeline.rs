//! Aggregate task orchestration.
//!
//! Two entry points compose the tasks:
//!
//! - [`run_default`] - styles, scripts, and fonts with no ordering
//!   constraint between them (they are independent and write to disjoint
//!   subdirectories), overlapping on scoped threads.
//! - [`run_build`] - the full production sequence: clean, styles,
//!   styles:min, scripts, fonts, strictly in that order. The minify pass
//!   consumes the styles pass's output list directly instead of relying
//!   on an unstated "runs after" assumption.

use std::thread::ScopedJoinHandle;
use std::time::{Duration, Instant};

use crate::build::{clean, fonts, scripts, styles, BuildContext, PipelineResult, TaskKind, TaskResult};

/// Run the development aggregate: styles, scripts, and fonts concurrently.
///
/// No clean, no minify. Results are reported in declaration order
/// regardless of which task finishes first.
pub fn run_default(ctx: &BuildContext) -> PipelineResult {
    let start = Instant::now();
    let mut result = PipelineResult::new();

    std::thread::scope(|s| {
        let styles_task = s.spawn(|| styles::compile_styles(ctx));
        let scripts_task = s.spawn(|| scripts::bundle_scripts(ctx));
        let fonts_task = s.spawn(|| fonts::copy_fonts(ctx));

        result.add(join_task(styles_task, TaskKind::Styles));
        result.add(join_task(scripts_task, TaskKind::Scripts));
        result.add(join_task(fonts_task, TaskKind::Fonts));
    });

    result.with_duration(start.elapsed())
}

/// Run the full production build sequence.
///
/// The first failed task aborts the sequence; its result is recorded and
/// the remaining tasks do not run. Scripts and fonts have no data
/// dependency on styles but keep their position so completion
/// notifications arrive in the same order on every run.
pub fn run_build(ctx: &BuildContext) -> PipelineResult {
    let start = Instant::now();
    let mut result = PipelineResult::new();

    let cleaned = clean::clean(ctx);
    if !push_and_continue(&mut result, cleaned) {
        return result.with_duration(start.elapsed());
    }

    let compiled = styles::compile_styles(ctx);
    let compiled_outputs = compiled.outputs.clone();
    if !push_and_continue(&mut result, compiled) {
        return result.with_duration(start.elapsed());
    }

    // Explicit hand-off: minify exactly what the styles task wrote
    let minified = styles::minify_styles(ctx, &compiled_outputs);
    if !push_and_continue(&mut result, minified) {
        return result.with_duration(start.elapsed());
    }

    let bundled = scripts::bundle_scripts(ctx);
    if !push_and_continue(&mut result, bundled) {
        return result.with_duration(start.elapsed());
    }

    let copied = fonts::copy_fonts(ctx);
    result.add(copied);

    result.with_duration(start.elapsed())
}

/// Record a task result, returning whether the sequence should continue.
fn push_and_continue(result: &mut PipelineResult, task: TaskResult) -> bool {
    let ok = task.is_success();
    result.add(task);
    ok
}

fn join_task(handle: ScopedJoinHandle<'_, TaskResult>, kind: TaskKind) -> TaskResult {
    handle
        .join()
        .unwrap_or_else(|_| TaskResult::failed(kind, "task panicked".to_string(), Duration::ZERO))
}

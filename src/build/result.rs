//! Task result types.
//!
//! Every task returns an explicit [`TaskResult`] the orchestrator and the
//! tests can observe; completion notifications are derived from it rather
//! than emitted as a side effect mid-pipeline.

use std::path::PathBuf;
use std::time::Duration;

use crate::report::human_size;

/// The named tasks of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Delete the output directory
    Clean,
    /// Compile SCSS to prefixed, media-merged CSS
    Styles,
    /// Minify compiled CSS in place
    StylesMin,
    /// Bundle vendor and local scripts
    Scripts,
    /// Copy font files
    Fonts,
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TaskKind::Clean => "clean",
            TaskKind::Styles => "styles",
            TaskKind::StylesMin => "styles:min",
            TaskKind::Scripts => "scripts",
            TaskKind::Fonts => "fonts",
        };
        write!(f, "{}", name)
    }
}

/// Status of a single task run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// Task succeeded
    Success,
    /// Task had nothing to do (e.g. clean with no output directory)
    Skipped,
    /// Task failed with error
    Failed(String),
}

impl TaskStatus {
    /// Check if the status indicates success.
    pub fn is_success(&self) -> bool {
        matches!(self, TaskStatus::Success | TaskStatus::Skipped)
    }

    /// Check if the status indicates failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, TaskStatus::Failed(_))
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Success => write!(f, "success"),
            TaskStatus::Skipped => write!(f, "skipped"),
            TaskStatus::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

/// Result of running a single task.
#[derive(Debug, Clone)]
pub struct TaskResult {
    /// Which task ran
    pub kind: TaskKind,
    /// Task status
    pub status: TaskStatus,
    /// Output files produced
    pub outputs: Vec<PathBuf>,
    /// Total bytes written to the output tree
    pub bytes_written: u64,
    /// Task duration
    pub duration: Duration,
}

impl TaskResult {
    /// Create a successful result.
    pub fn success(
        kind: TaskKind,
        outputs: Vec<PathBuf>,
        bytes_written: u64,
        duration: Duration,
    ) -> Self {
        Self { kind, status: TaskStatus::Success, outputs, bytes_written, duration }
    }

    /// Create a skipped result.
    pub fn skipped(kind: TaskKind) -> Self {
        Self {
            kind,
            status: TaskStatus::Skipped,
            outputs: vec![],
            bytes_written: 0,
            duration: Duration::ZERO,
        }
    }

    /// Create a failed result.
    pub fn failed(kind: TaskKind, error: String, duration: Duration) -> Self {
        Self { kind, status: TaskStatus::Failed(error), outputs: vec![], bytes_written: 0, duration }
    }

    /// Check if this result is successful.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Human-readable completion notification for this task.
    ///
    /// Size-bearing for the tasks that write measurable output.
    pub fn notification(&self) -> String {
        match self.kind {
            TaskKind::Clean => "Output directory removed".to_string(),
            TaskKind::Styles => format!("Styles compiled ({})", human_size(self.bytes_written)),
            TaskKind::StylesMin => format!("Styles minified ({})", human_size(self.bytes_written)),
            TaskKind::Scripts => format!("Scripts bundled ({})", human_size(self.bytes_written)),
            TaskKind::Fonts => format!("Fonts copied ({} files)", self.outputs.len()),
        }
    }
}

/// Result of an aggregate run (one or more tasks).
#[derive(Debug, Default)]
pub struct PipelineResult {
    /// Results for each task, in completion-report order
    pub tasks: Vec<TaskResult>,
    /// Total wall-clock duration
    pub total_duration: Duration,
}

impl PipelineResult {
    /// Create a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task result.
    pub fn add(&mut self, result: TaskResult) {
        self.tasks.push(result);
    }

    /// Set the total duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.total_duration = duration;
        self
    }

    /// Get the number of successful tasks.
    pub fn success_count(&self) -> usize {
        self.tasks.iter().filter(|r| matches!(r.status, TaskStatus::Success)).count()
    }

    /// Get the number of skipped tasks.
    pub fn skipped_count(&self) -> usize {
        self.tasks.iter().filter(|r| matches!(r.status, TaskStatus::Skipped)).count()
    }

    /// Get the number of failed tasks.
    pub fn failed_count(&self) -> usize {
        self.tasks.iter().filter(|r| r.status.is_failure()).count()
    }

    /// Check if the overall run succeeded (no failures).
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    /// Get failed task results.
    pub fn failures(&self) -> Vec<&TaskResult> {
        self.tasks.iter().filter(|r| r.status.is_failure()).collect()
    }

    /// Get all outputs produced.
    pub fn all_outputs(&self) -> Vec<&PathBuf> {
        self.tasks.iter().flat_map(|r| r.outputs.iter()).collect()
    }

    /// Format a summary of the run.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        let success = self.success_count();
        let skipped = self.skipped_count();
        let failed = self.failed_count();
        let total = self.tasks.len();

        if failed > 0 {
            lines.push(format!(
                "Build failed: {} succeeded, {} skipped, {} failed ({} total)",
                success, skipped, failed, total
            ));
            for task in self.failures() {
                lines.push(format!("  - {}: {}", task.kind, task.status));
            }
        } else {
            lines.push(format!(
                "Build succeeded: {} run, {} skipped ({} total) in {:?}",
                success, skipped, total, self.total_duration
            ));
        }

        lines.join("\n")
    }

    /// Machine-readable summary of the run.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "success": self.is_success(),
            "duration_ms": self.total_duration.as_millis() as u64,
            "tasks": self.tasks.iter().map(|t| serde_json::json!({
                "task": t.kind.to_string(),
                "status": t.status.to_string(),
                "bytes_written": t.bytes_written,
                "duration_ms": t.duration.as_millis() as u64,
                "outputs": t.outputs.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
            })).collect::<Vec<_>>(),
        })
    }
}

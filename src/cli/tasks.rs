//! Task command implementations.
//!
//! Each command loads configuration, builds a [`BuildContext`], runs the
//! requested task(s), and reports each returned result.

use std::path::PathBuf;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::build::{clean, fonts, pipeline, scripts, styles, BuildContext, PipelineResult, TaskResult, TaskStatus};
use crate::config::loader::{find_config, load_config, merge_cli_overrides, CliOverrides};

/// Options shared by every command invocation.
#[derive(Debug, Default)]
pub struct Invocation {
    /// Explicit config file path
    pub config: Option<PathBuf>,
    /// Output directory override
    pub out: Option<PathBuf>,
    /// Verbose output
    pub verbose: bool,
    /// JSON summary output
    pub json: bool,
}

pub fn run_clean(invocation: &Invocation) -> ExitCode {
    run_single(invocation, clean::clean)
}

pub fn run_styles(invocation: &Invocation) -> ExitCode {
    run_single(invocation, styles::compile_styles)
}

pub fn run_styles_min(invocation: &Invocation) -> ExitCode {
    run_single(invocation, styles::minify_output_dir)
}

pub fn run_scripts(invocation: &Invocation) -> ExitCode {
    run_single(invocation, scripts::bundle_scripts)
}

pub fn run_fonts(invocation: &Invocation) -> ExitCode {
    run_single(invocation, fonts::copy_fonts)
}

pub fn run_default(invocation: &Invocation) -> ExitCode {
    match load_context(invocation) {
        Ok(ctx) => finish(invocation, pipeline::run_default(&ctx)),
        Err(message) => fail(message),
    }
}

pub fn run_build(invocation: &Invocation) -> ExitCode {
    match load_context(invocation) {
        Ok(ctx) => finish(invocation, pipeline::run_build(&ctx)),
        Err(message) => fail(message),
    }
}

pub fn run_watch(invocation: &Invocation) -> ExitCode {
    let ctx = match load_context(invocation) {
        Ok(ctx) => ctx,
        Err(message) => return fail(message),
    };

    println!("Starting watch mode...");
    println!("Press Ctrl+C to stop");
    println!();

    match crate::watch::watch_and_rebuild(ctx) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Watch error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Run one task and report its result.
fn run_single(invocation: &Invocation, task: impl FnOnce(&BuildContext) -> TaskResult) -> ExitCode {
    let ctx = match load_context(invocation) {
        Ok(ctx) => ctx,
        Err(message) => return fail(message),
    };

    let mut result = PipelineResult::new();
    let task_result = task(&ctx);
    result.total_duration = task_result.duration;
    result.add(task_result);
    finish(invocation, result)
}

/// Locate and load configuration, apply overrides, and build the context.
fn load_context(invocation: &Invocation) -> Result<BuildContext, String> {
    let (mut config, project_root) = match &invocation.config {
        Some(config_path) => {
            let config = load_config(Some(config_path)).map_err(|e| e.to_string())?;
            let root = config_path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
            (config, root)
        }
        None => match find_config() {
            Some(config_path) => {
                if invocation.verbose {
                    println!("Using config: {}", config_path.display());
                }
                let config = load_config(Some(&config_path)).map_err(|e| e.to_string())?;
                let root = config_path
                    .parent()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
                (config, root)
            }
            None => {
                if invocation.verbose {
                    println!("No sitekit.toml found, using defaults");
                }
                let root = std::env::current_dir().unwrap_or_default();
                (crate::config::default_config(), root)
            }
        },
    };

    let overrides = CliOverrides { out: invocation.out.clone() };
    merge_cli_overrides(&mut config, &overrides);

    Ok(BuildContext::new(config, project_root).with_verbose(invocation.verbose))
}

/// Report results and derive the exit code.
fn finish(invocation: &Invocation, result: PipelineResult) -> ExitCode {
    if invocation.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result.to_json()).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        for task in &result.tasks {
            match &task.status {
                TaskStatus::Failed(err) => eprintln!("{} failed: {}", task.kind, err),
                _ => println!("{}", task.notification()),
            }
        }
        if !result.is_success() {
            eprintln!("{}", result.summary());
        } else if invocation.verbose {
            println!("{}", result.summary());
        }
    }

    if result.is_success() {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

fn fail(message: String) -> ExitCode {
    eprintln!("Error: {}", message);
    ExitCode::from(EXIT_ERROR)
}

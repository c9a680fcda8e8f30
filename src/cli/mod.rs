//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to the task
//! runner for specific command implementations.

mod tasks;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;

/// Sitekit - build styles, scripts, and fonts for a static site
#[derive(Parser)]
#[command(name = "sitekit")]
#[command(about = "Sitekit - build styles, scripts, and fonts for a static site")]
#[command(version)]
pub struct Cli {
    /// Path to sitekit.toml (default: walk up from the current directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the output directory
    #[arg(long, global = true, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print a JSON summary instead of notifications
    #[arg(long, global = true)]
    pub json: bool,

    /// Task to run (omit for styles + scripts + fonts)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Delete the build output directory
    Clean,
    /// Compile SCSS to prefixed, media-merged CSS
    Styles,
    /// Minify previously compiled CSS in place
    #[command(name = "styles:min", alias = "styles-min")]
    StylesMin,
    /// Bundle vendor and local scripts into a single file
    Scripts,
    /// Copy local and vendored fonts into the output tree
    Fonts,
    /// Watch style and script sources and rebuild on change
    Watch,
    /// Full production build: clean, styles, styles:min, scripts, fonts
    Build,
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let invocation = tasks::Invocation {
        config: cli.config,
        out: cli.out,
        verbose: cli.verbose,
        json: cli.json,
    };

    match cli.command {
        Some(Commands::Clean) => tasks::run_clean(&invocation),
        Some(Commands::Styles) => tasks::run_styles(&invocation),
        Some(Commands::StylesMin) => tasks::run_styles_min(&invocation),
        Some(Commands::Scripts) => tasks::run_scripts(&invocation),
        Some(Commands::Fonts) => tasks::run_fonts(&invocation),
        Some(Commands::Watch) => tasks::run_watch(&invocation),
        Some(Commands::Build) => tasks::run_build(&invocation),
        None => tasks::run_default(&invocation),
    }
}

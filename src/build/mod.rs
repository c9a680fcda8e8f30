//! Build tasks and orchestration for the asset pipeline.
//!
//! Each task is an independent "discover -> transform -> write" pipeline
//! over one asset category (styles, scripts, fonts). Tasks share no
//! in-memory state; everything flows through the filesystem and the
//! [`TaskResult`] each task returns.
//!
//! # Overview
//!
//! - **Discovery**: resolve glob patterns from config into source lists
//! - **Tasks**: clean, styles, styles:min, scripts, fonts
//! - **Aggregates**: `default` (concurrent) and `build` (sequenced) in
//!   [`pipeline`]
//!
//! # Example
//!
//! ```ignore
//! use sitekit::build::{pipeline, BuildContext};
//! use sitekit::config::load_config;
//!
//! let config = load_config(None)?;
//! let context = BuildContext::new(config, project_root);
//! let result = pipeline::run_build(&context);
//! println!("{}", result.summary());
//! ```

pub mod clean;
pub mod context;
pub mod discovery;
pub mod fonts;
pub mod pipeline;
pub mod result;
pub mod scripts;
pub mod styles;

pub use context::*;
pub use discovery::*;
pub use result::*;

//! Sitekit - Library for building a static site's front-end assets
//!
//! This library provides functionality to:
//! - Compile SCSS sources to vendor-prefixed, media-merged CSS
//! - Bundle vendor and local scripts into a single minified file
//! - Copy local and vendored font files into the build tree
//! - Watch source directories and rebuild on change

pub mod build;
pub mod cli;
pub mod config;
pub mod css;
pub mod report;
pub mod watch;

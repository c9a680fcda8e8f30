//! CSS post-processing built on lightningcss.
//!
//! Compiled stylesheets pass through here for media-query merging, vendor
//! prefixing against the fixed browser targets, and minification.

use std::collections::HashMap;

use lightningcss::rules::CssRule;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use lightningcss::traits::ToCss;
use thiserror::Error;

/// Error type for CSS processing failures
#[derive(Debug, Clone, Error)]
pub enum CssError {
    /// Stylesheet failed to parse
    #[error("CSS parse error: {0}")]
    Parse(String),
    /// Prefixing or structural minification failed
    #[error("CSS transform error: {0}")]
    Transform(String),
    /// Serialization failed
    #[error("CSS print error: {0}")]
    Print(String),
}

/// Browser/version combinations the compiled CSS is prefixed for.
///
/// This is the support matrix the site ships with. Where the matrix lists
/// two bounds for one browser (Android 2.3 and Android >= 4), the lower
/// bound wins.
pub fn browser_targets() -> Browsers {
    Browsers {
        android: Some(version(2, 3, 0)),
        chrome: Some(version(20, 0, 0)),
        firefox: Some(version(24, 0, 0)),
        ie: Some(version(8, 0, 0)),
        ios_saf: Some(version(6, 0, 0)),
        opera: Some(version(12, 0, 0)),
        safari: Some(version(6, 0, 0)),
        ..Browsers::default()
    }
}

/// Encode a browser version the way lightningcss expects.
fn version(major: u32, minor: u32, patch: u32) -> u32 {
    (major << 16) | (minor << 8) | patch
}

fn targets() -> Targets {
    Targets {
        browsers: Some(browser_targets()),
        ..Targets::default()
    }
}

/// Process a compiled stylesheet: merge media-query blocks with identical
/// conditions, apply vendor prefixes for [`browser_targets`], and
/// optionally minify.
///
/// Merging keeps blocks in first-encountered order; the whole operation is
/// idempotent.
pub fn process(css: &str, minify: bool) -> Result<String, CssError> {
    let mut sheet =
        StyleSheet::parse(css, ParserOptions::default()).map_err(|e| CssError::Parse(e.to_string()))?;

    merge_media_queries(&mut sheet.rules.0)?;

    sheet
        .minify(MinifyOptions { targets: targets(), ..MinifyOptions::default() })
        .map_err(|e| CssError::Transform(e.to_string()))?;

    let out = sheet
        .to_css(PrinterOptions { minify, targets: targets(), ..PrinterOptions::default() })
        .map_err(|e| CssError::Print(e.to_string()))?;

    Ok(out.code)
}

/// Minify a stylesheet in compact form. Idempotent.
pub fn minify(css: &str) -> Result<String, CssError> {
    process(css, true)
}

/// Merge media rules with identical conditions into the first occurrence.
///
/// Later blocks keep their internal order and are appended to the block
/// where the condition was first seen.
fn merge_media_queries<'i>(rules: &mut Vec<CssRule<'i>>) -> Result<(), CssError> {
    let mut merged: Vec<CssRule<'i>> = Vec::with_capacity(rules.len());
    let mut first_seen: HashMap<String, usize> = HashMap::new();

    for rule in rules.drain(..) {
        match rule {
            CssRule::Media(media) => {
                let condition = media
                    .query
                    .to_css_string(PrinterOptions::default())
                    .map_err(|e| CssError::Print(e.to_string()))?;

                match first_seen.get(&condition) {
                    Some(&at) => {
                        if let CssRule::Media(first) = &mut merged[at] {
                            first.rules.0.extend(media.rules.0);
                        }
                    }
                    None => {
                        first_seen.insert(condition, merged.len());
                        merged.push(CssRule::Media(media));
                    }
                }
            }
            other => merged.push(other),
        }
    }

    *rules = merged;
    Ok(())
}

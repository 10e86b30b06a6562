//! Per-language repackaging pipeline.
//!
//! For each requested layout: build the generic keyboard, clone it into
//! `<lang>-keyboard`, render icons, rewrite the manifest and inject the shim.
//! Languages are independent: a failure aborts the language it happened in
//! and the run moves on to the next one.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{error, info, info_span, warn};

use crate::config::RepackConfig;
use crate::gaia;
use crate::services::{bundle, layouts};
use crate::webapp;

/// Outcome of a multi-language run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepackSummary {
    /// Languages repacked, with their bundle directory
    pub succeeded: Vec<(String, PathBuf)>,
    /// Languages that failed, with the error chain rendered as text
    pub failed: Vec<(String, String)>,
}

impl RepackSummary {
    /// Whether every language was repacked.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs the whole pipeline for one layout.
///
/// Returns the bundle directory.
pub fn repack_language(config: &RepackConfig, lang: &str) -> Result<PathBuf> {
    layouts::validate_language(lang)?;

    let build = gaia::build_keyboard(config, lang)?;
    info!(
        "Built keyboard for '{}' in {} ({} line(s) of build output)",
        build.layout,
        build.output_dir.display(),
        build.stdout_lines
    );

    let bundle_dir = bundle::duplicate_bundle(config, lang)?;

    let icons = webapp::generate_icons(config, &bundle_dir)
        .with_context(|| format!("Failed to generate icons for '{lang}'"))?;

    webapp::rewrite_manifest(config, lang, icons.as_ref())
        .with_context(|| format!("Failed to rewrite manifest for '{lang}'"))?;

    let shim = webapp::inject_shim(config, &bundle_dir)
        .with_context(|| format!("Failed to inject shim for '{lang}'"))?;
    if let Some(report) = shim {
        info!(
            "Injected {} into {} file(s)",
            report.script.display(),
            report.patched.len()
        );
        if !report.untouched.is_empty() {
            warn!(
                "{} HTML file(s) of '{}' do not load the shim",
                report.untouched.len(),
                lang
            );
        }
    }

    Ok(bundle_dir)
}

/// Repacks every layout in order.
pub fn repack_all(config: &RepackConfig, languages: &[String]) -> RepackSummary {
    let mut summary = RepackSummary::default();

    for lang in languages {
        let _span = info_span!("repack", lang = %lang).entered();

        match repack_language(config, lang) {
            Ok(bundle_dir) => {
                info!("Repacked '{}' into {}", lang, bundle_dir.display());
                summary.succeeded.push((lang.clone(), bundle_dir));
            }
            Err(e) => {
                error!("Repacking '{}' failed: {:#}", lang, e);
                summary.failed.push((lang.clone(), format!("{e:#}")));
            }
        }
    }

    summary
}

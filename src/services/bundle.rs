//! Per-language bundle duplication.
//!
//! The Gaia build always writes the generic keyboard to `<build>/keyboard`.
//! Each language gets a fresh copy of it under `<build>/<lang>-keyboard`;
//! any earlier copy is discarded first.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::RepackConfig;

/// Removes a bundle directory.
///
/// A directory that does not exist is not an error. Any other failure is.
///
/// # Returns
///
/// * `Ok(true)` - The directory existed and was removed
/// * `Ok(false)` - Nothing to remove
pub fn remove_bundle(path: &Path) -> Result<bool> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => {
            Err(e).with_context(|| format!("Failed to remove bundle: {}", path.display()))
        }
    }
}

/// Recursively copies `src` to `dst`.
///
/// `dst` must not exist yet. Symlinks are followed.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_dir() {
        bail!("Build output directory not found: {}", src.display());
    }
    if dst.exists() {
        bail!("Destination already exists: {}", dst.display());
    }

    for entry in WalkDir::new(src).follow_links(true) {
        let entry =
            entry.with_context(|| format!("Failed to walk directory: {}", src.display()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .context("Walked entry outside source directory")?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
        }
    }

    Ok(())
}

/// Replaces `<lang>-keyboard` with a fresh copy of the generic build output.
///
/// Returns the path of the new bundle.
pub fn duplicate_bundle(config: &RepackConfig, lang: &str) -> Result<PathBuf> {
    let bundle_dir = config.bundle_dir(lang);

    if remove_bundle(&bundle_dir)? {
        debug!("Removed previous bundle {}", bundle_dir.display());
    }

    copy_tree(&config.build_output_dir(), &bundle_dir)?;
    info!("Copied keyboard build to {}", bundle_dir.display());

    Ok(bundle_dir)
}

//! Open Web App bundle rewriting.
//!
//! This module edits a copied keyboard bundle in place: the `manifest.webapp`
//! metadata, the optional icon set and the optional mozSettings shim.

pub mod icons;
pub mod manifest;
pub mod shim;

pub use icons::{generate_icons, IconSet};
pub use manifest::{rewrite_manifest, ManifestTexts, WebappManifest};
pub use shim::{inject_shim, insert_before_first_script, ShimReport};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Writes `content` to `path` through a temp file + rename so the target is
/// never observed half-written.
pub(crate) fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let temp_path = temp_path_for(path);

    std::fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write to temporary file: {}", temp_path.display()))?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temporary file to: {}", path.display()))?;

    Ok(())
}

/// `index.html` -> `index.html.tmp`, in the same directory.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

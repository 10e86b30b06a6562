//! Icon set generation.
//!
//! A single source image is rasterized at every size in [`ICON_SIZES`] by an
//! ImageMagick-compatible `convert` program.

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

use crate::config::RepackConfig;
use crate::constants::{ICONS_DIR, ICON_SIZES};

/// Pixel size to bundle-relative PNG path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IconSet {
    icons: BTreeMap<u32, String>,
}

impl IconSet {
    /// Builds the icon map for the given sizes.
    pub fn for_sizes(sizes: &[u32]) -> Self {
        Self {
            icons: sizes.iter().map(|&size| (size, icon_path(size))).collect(),
        }
    }

    fn len(&self) -> usize {
        self.icons.len()
    }

    #[cfg(test)]
    fn get(&self, size: u32) -> Option<&str> {
        self.icons.get(&size).map(String::as_str)
    }

    /// Manifest `icons` value: `{"<size>": "<path>"}`.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .icons
            .iter()
            .map(|(size, path)| (size.to_string(), Value::String(path.clone())))
            .collect();
        Value::Object(map)
    }
}

/// Bundle-relative path of the icon of a size.
fn icon_path(size: u32) -> String {
    format!("{ICONS_DIR}/{size}.png")
}

/// Density passed to the converter so vector sources are rasterized above
/// the target size before being resized.
fn density_for(size: u32) -> u32 {
    size * 4
}

/// Builds the converter invocation for one icon size.
fn convert_command(program: &str, source: &Path, target: &Path, size: u32) -> Command {
    let mut cmd = Command::new(program);
    cmd.arg("-background")
        .arg("none")
        .arg("-density")
        .arg(density_for(size).to_string())
        .arg("-resize")
        .arg(format!("{size}x{size}"))
        .arg(source)
        .arg(target);
    cmd
}

/// Generates the icon set for a bundle.
///
/// # Returns
///
/// * `Ok(None)` - No icon source configured, or the source does not exist
/// * `Ok(Some(IconSet))` - All sizes rendered under `<bundle>/icons/`
/// * `Err(...)` - Directory creation or a conversion failed
pub fn generate_icons(config: &RepackConfig, bundle_dir: &Path) -> Result<Option<IconSet>> {
    let Some(source) = config.icon_source.as_deref() else {
        return Ok(None);
    };

    if !source.exists() {
        warn!(
            "Icon source {} does not exist, keeping the build's icons",
            source.display()
        );
        return Ok(None);
    }

    let icons_dir: PathBuf = bundle_dir.join(ICONS_DIR);
    fs::create_dir_all(&icons_dir)
        .with_context(|| format!("Failed to create icons directory: {}", icons_dir.display()))?;

    for size in ICON_SIZES {
        let target = bundle_dir.join(icon_path(size));
        debug!("Rendering {}px icon to {}", size, target.display());

        let output = convert_command(&config.tools.convert, source, &target, size)
            .output()
            .with_context(|| {
                format!(
                    "Failed to execute image converter: {}",
                    config.tools.convert
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "Icon conversion to {size}px failed: {}",
                stderr.trim()
            );
        }
    }

    let icons = IconSet::for_sizes(&ICON_SIZES);
    info!("Generated {} icons in {}", icons.len(), icons_dir.display());
    Ok(Some(icons))
}

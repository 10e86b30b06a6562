//! mozSettings shim injection.
//!
//! Third party keyboards lose access to `navigator.mozSettings`. The shim
//! emulates it on top of `localStorage`, and has to be loaded before any other
//! script of the keyboard's HTML entry points.

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

use super::atomic_write;
use crate::config::RepackConfig;
use crate::constants::{SHIM_FILE_NAME, SHIM_HTML_FILES, SHIM_VENDOR_DIR};

/// Matches a line opening a `<script` tag and captures its indentation.
fn script_line_regex() -> &'static Regex {
    static SCRIPT_LINE: OnceLock<Regex> = OnceLock::new();
    SCRIPT_LINE.get_or_init(|| {
        Regex::new(r"^([ \t]*)<script\b").expect("script line pattern is valid")
    })
}

/// The inclusion tag for the copied shim.
pub fn shim_tag() -> String {
    format!(r#"<script defer src="{SHIM_VENDOR_DIR}/{SHIM_FILE_NAME}"></script>"#)
}

/// Outcome of injecting the shim into a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimReport {
    /// Where the shim script was copied
    pub script: PathBuf,
    /// HTML files that received the tag
    pub patched: Vec<PathBuf>,
    /// HTML files without any `<script>` line, left as they were
    pub untouched: Vec<PathBuf>,
}

/// Inserts the shim tag on its own line right before the first `<script`
/// line, with the same indentation.
///
/// Returns the new content and whether an insertion happened. Everything
/// else, line endings included, is preserved byte for byte.
pub fn insert_before_first_script(content: &str) -> (String, bool) {
    let regex = script_line_regex();
    let mut output = String::with_capacity(content.len() + 80);
    let mut inserted = false;

    for line in content.split_inclusive('\n') {
        if !inserted {
            if let Some(caps) = regex.captures(line) {
                let indent = caps.get(1).map_or("", |m| m.as_str());
                let ending = if line.ends_with("\r\n") {
                    "\r\n"
                } else {
                    "\n"
                };
                output.push_str(indent);
                output.push_str(&shim_tag());
                output.push_str(ending);
                inserted = true;
            }
        }
        output.push_str(line);
    }

    (output, inserted)
}

/// Injects the shim tag into one HTML file.
///
/// The file is always rewritten, even when no `<script>` line was found.
pub fn inject_into_html(path: &Path) -> Result<bool> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read HTML file: {}", path.display()))?;

    let (patched, inserted) = insert_before_first_script(&content);
    atomic_write(path, &patched)?;

    Ok(inserted)
}

/// Copies the shim into the bundle and references it from the HTML entry
/// points.
///
/// # Returns
///
/// * `Ok(None)` - No shim configured
/// * `Ok(Some(ShimReport))` - Shim copied and HTML files processed
/// * `Err(...)` - Shim directory already present, or an I/O failure
pub fn inject_shim(config: &RepackConfig, bundle_dir: &Path) -> Result<Option<ShimReport>> {
    let Some(source) = config.shim_source.as_deref() else {
        return Ok(None);
    };

    let vendor_dir = bundle_dir.join(SHIM_VENDOR_DIR);
    if let Some(parent) = vendor_dir.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    if vendor_dir.exists() {
        bail!("Shim directory already exists: {}", vendor_dir.display());
    }
    fs::create_dir(&vendor_dir)
        .with_context(|| format!("Failed to create directory: {}", vendor_dir.display()))?;

    let script = vendor_dir.join(SHIM_FILE_NAME);
    fs::copy(source, &script).with_context(|| {
        format!(
            "Failed to copy shim {} to {}",
            source.display(),
            script.display()
        )
    })?;
    debug!("Copied shim to {}", script.display());

    let mut report = ShimReport {
        script,
        patched: Vec::new(),
        untouched: Vec::new(),
    };

    for name in SHIM_HTML_FILES {
        let html = bundle_dir.join(name);
        if inject_into_html(&html)? {
            report.patched.push(html);
        } else {
            warn!("No <script> tag in {}, shim not referenced", html.display());
            report.untouched.push(html);
        }
    }

    Ok(Some(report))
}

//! Gaia keyboard build invocation.
//!
//! Runs `make` in the Gaia checkout with the layout selected through
//! `GAIA_KEYBOARD_LAYOUTS`. Output is captured and forwarded to the log, and
//! the exit status is checked before the pipeline touches the build output.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tracing::{debug, error, info, warn};

use crate::config::RepackConfig;
use crate::constants::{APP_ENV, KEYBOARD_APP, LAYOUTS_ENV};

/// Result of a successful keyboard build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Layout the build was run for
    pub layout: String,
    /// Generic keyboard bundle written by the build
    pub output_dir: PathBuf,
    /// Number of stdout lines produced by the build
    pub stdout_lines: usize,
}

/// Severity of a captured build output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineLevel {
    /// Ordinary progress output
    Info,
    /// Compiler or make warning
    Warning,
    /// Error reported by the build
    Error,
}

impl LineLevel {
    /// Classifies a build output line.
    pub fn classify(line: &str) -> Self {
        if line.contains("error") || line.contains("Error") {
            LineLevel::Error
        } else if line.contains("warning") || line.contains("Warning") {
            LineLevel::Warning
        } else {
            LineLevel::Info
        }
    }
}

/// Builds the Gaia keyboard app for a single layout.
///
/// # Errors
///
/// Fails if the build program cannot be started, exits with a non-zero
/// status, or does not leave a keyboard bundle in the build directory.
pub fn build_keyboard(config: &RepackConfig, lang: &str) -> Result<BuildOutcome> {
    info!(
        "Running: {}={} {}={} {}",
        LAYOUTS_ENV, lang, APP_ENV, KEYBOARD_APP, config.tools.make
    );

    let output = Command::new(&config.tools.make)
        .current_dir(&config.gaia_path)
        .env(LAYOUTS_ENV, lang)
        .env(APP_ENV, KEYBOARD_APP)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .with_context(|| format!("Failed to execute build command: {}", config.tools.make))?;

    let stdout_lines = forward_output(&output);

    if !output.status.success() {
        let code = output
            .status
            .code()
            .map_or_else(|| "signal".to_string(), |c| c.to_string());
        bail!("Keyboard build for '{lang}' failed (exit status: {code})");
    }

    let output_dir = config.build_output_dir();
    if !output_dir.is_dir() {
        bail!(
            "Keyboard build for '{lang}' produced no output at {}",
            output_dir.display()
        );
    }

    Ok(BuildOutcome {
        layout: lang.to_string(),
        output_dir,
        stdout_lines,
    })
}

/// Sends captured build output to the log. Returns the stdout line count.
fn forward_output(output: &Output) -> usize {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    let mut count = 0;
    for line in stdout.lines() {
        count += 1;
        match LineLevel::classify(line) {
            LineLevel::Error => error!(target: "gaia::make", "{line}"),
            LineLevel::Warning => warn!(target: "gaia::make", "{line}"),
            LineLevel::Info => debug!(target: "gaia::make", "{line}"),
        }
    }

    // stderr is usually errors
    for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
        warn!(target: "gaia::make", "{line}");
    }

    count
}

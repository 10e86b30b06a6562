//! The repack command: list layouts or build per-language keyboards.

use crate::cli::common::{CliError, CliResult};
use crate::config::{FileConfig, Overrides, RepackConfig};
use crate::services::{available_languages, repack_all, validate_language};
use clap::Args;
use std::path::PathBuf;

/// Build 3rd party keyboards for Gaia keyboard layouts
#[derive(Debug, Clone, Args)]
pub struct RepackArgs {
    /// Path to Gaia
    #[arg(long, value_name = "PATH")]
    pub gaia: Option<PathBuf>,

    /// Path to build directory, relative to Gaia
    #[arg(long, value_name = "PATH")]
    pub build: Option<PathBuf>,

    /// List of languages to build
    #[arg(
        short,
        long,
        value_name = "LANG",
        num_args = 1..,
        default_value = "en"
    )]
    pub languages: Vec<String>,

    /// List available languages
    #[arg(long)]
    pub list: bool,

    /// Developer name written into the manifest
    #[arg(long, value_name = "NAME")]
    pub developer_name: Option<String>,

    /// Developer URL written into the manifest
    #[arg(long, value_name = "URL")]
    pub developer_url: Option<String>,

    /// Source image for the icon set
    #[arg(long, value_name = "FILE")]
    pub icon: Option<PathBuf>,

    /// Official build: Gaia team as developer and "Official" wording
    #[arg(long)]
    pub official: bool,

    /// Name apps as isolated keyboards
    #[arg(long)]
    pub isolated: bool,

    /// mozSettings shim script to inject into the HTML entry points
    #[arg(long, value_name = "FILE")]
    pub shim: Option<PathBuf>,

    /// Program running the Gaia build
    #[arg(long, value_name = "PROGRAM")]
    pub make: Option<String>,

    /// Image converter used for icons
    #[arg(long, value_name = "PROGRAM")]
    pub convert: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl RepackArgs {
    /// Resolves the run configuration from the config file and flags.
    pub fn resolve_config(&self) -> CliResult<RepackConfig> {
        let file = FileConfig::load(self.config.as_deref())
            .map_err(|e| CliError::validation(format!("Failed to load config: {e:#}")))?;

        let overrides = Overrides {
            gaia: self.gaia.clone(),
            build: self.build.clone(),
            developer_name: self.developer_name.clone(),
            developer_url: self.developer_url.clone(),
            icon_source: self.icon.clone(),
            shim_source: self.shim.clone(),
            make: self.make.clone(),
            convert: self.convert.clone(),
            official: self.official,
            isolated: self.isolated,
        };

        Ok(RepackConfig::resolve(file, overrides))
    }

    /// Execute the repack command
    pub fn execute(&self) -> CliResult<()> {
        let config = self.resolve_config()?;

        if self.list {
            let languages = available_languages(&config)
                .map_err(|e| CliError::io(format!("Failed to list languages: {e:#}")))?;
            for lang in &languages {
                println!("- {lang}");
            }
            return Ok(());
        }

        for lang in &self.languages {
            validate_language(lang).map_err(|e| CliError::validation(e.to_string()))?;
        }

        if let Some(shim) = &config.shim_source {
            if !shim.is_file() {
                return Err(CliError::validation(format!(
                    "Shim script not found: {}",
                    shim.display()
                )));
            }
        }

        let summary = repack_all(&config, &self.languages);

        for (lang, path) in &summary.succeeded {
            println!("✓ {} -> {}", lang, path.display());
        }

        if summary.is_success() {
            return Ok(());
        }

        for (lang, error) in &summary.failed {
            eprintln!("✗ {lang}: {error}");
        }
        Err(CliError::build(format!(
            "{} of {} language(s) failed",
            summary.failed.len(),
            self.languages.len()
        )))
    }
}

//! Configuration management for the repackaging pipeline.
//!
//! Settings come from two layers: an optional TOML file and the command line.
//! Both are resolved once into an immutable [`RepackConfig`] which is then
//! passed by reference to every pipeline step.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    BUNDLE_DIR_SUFFIX, KEYBOARD_APP, LAYOUTS_DIR, MANIFEST_FILE, OFFICIAL_DEVELOPER_NAME,
    OFFICIAL_DEVELOPER_URL, PLACEHOLDER_DEVELOPER_NAME, PLACEHOLDER_DEVELOPER_URL,
};

/// Default Gaia checkout path.
pub const DEFAULT_GAIA_PATH: &str = ".";

/// Default build output path, relative to the Gaia checkout.
pub const DEFAULT_BUILD_PATH: &str = "build_stage";

/// Whether the bundle is published as an official Gaia keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    /// Official build: organisational identity and "Official" wording
    Official,
    /// Anything else
    #[default]
    Unofficial,
}

/// App naming scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Naming {
    /// `<Layout> Keyboard`
    #[default]
    Standard,
    /// `<Layout> Keyboard (isolated)`, for bundles installed next to the stock keyboard
    Isolated,
}

/// Developer identity written into the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeveloperIdentity {
    /// Developer display name
    pub name: String,
    /// Developer homepage
    pub url: String,
}

impl DeveloperIdentity {
    /// The fixed identity used for official builds.
    pub fn official() -> Self {
        Self {
            name: OFFICIAL_DEVELOPER_NAME.to_string(),
            url: OFFICIAL_DEVELOPER_URL.to_string(),
        }
    }

    /// Placeholder identity used when nothing is configured.
    pub fn placeholder() -> Self {
        Self {
            name: PLACEHOLDER_DEVELOPER_NAME.to_string(),
            url: PLACEHOLDER_DEVELOPER_URL.to_string(),
        }
    }
}

/// External programs invoked by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Program running the Gaia build
    pub make: String,
    /// ImageMagick-compatible converter used for icons
    pub convert: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            make: "make".to_string(),
            convert: "convert".to_string(),
        }
    }
}

/// `[paths]` section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct FilePaths {
    /// Gaia checkout
    pub gaia: Option<PathBuf>,
    /// Build output directory, relative to Gaia
    pub build: Option<PathBuf>,
}

/// `[developer]` section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct FileDeveloper {
    /// Developer display name
    pub name: Option<String>,
    /// Developer homepage
    pub url: Option<String>,
}

/// `[icons]` section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct FileIcons {
    /// Source image rasterized into the icon set
    pub source: Option<PathBuf>,
}

/// `[shim]` section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct FileShim {
    /// mozSettings shim script to inject
    pub source: Option<PathBuf>,
}

/// `[tools]` section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct FileTools {
    /// Build program
    pub make: Option<String>,
    /// Image converter
    pub convert: Option<String>,
}

/// On-disk configuration file.
///
/// # File Location
///
/// - Linux: `~/.config/KeyboardRepack/config.toml`
/// - macOS: `~/Library/Application Support/KeyboardRepack/config.toml`
/// - Windows: `%APPDATA%\KeyboardRepack\config.toml`
///
/// Every key is optional; command line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// File system paths
    pub paths: FilePaths,
    /// Developer identity
    pub developer: FileDeveloper,
    /// Icon generation
    pub icons: FileIcons,
    /// Shim injection
    pub shim: FileShim,
    /// External programs
    pub tools: FileTools,
}

impl FileConfig {
    /// Gets the platform-specific config directory.
    pub fn config_dir() -> Result<PathBuf> {
        let base = dirs::config_dir().context("Failed to determine config directory")?;
        Ok(base.join("KeyboardRepack"))
    }

    /// Gets the default config file path.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Parses a config file from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config TOML")
    }

    /// Loads the config file from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Loads the config file.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// when present and an empty config otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match Self::default_path() {
            Ok(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Values supplied on the command line, layered over [`FileConfig`].
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--gaia`
    pub gaia: Option<PathBuf>,
    /// `--build`
    pub build: Option<PathBuf>,
    /// `--developer-name`
    pub developer_name: Option<String>,
    /// `--developer-url`
    pub developer_url: Option<String>,
    /// `--icon`
    pub icon_source: Option<PathBuf>,
    /// `--shim`
    pub shim_source: Option<PathBuf>,
    /// `--make`
    pub make: Option<String>,
    /// `--convert`
    pub convert: Option<String>,
    /// `--official`
    pub official: bool,
    /// `--isolated`
    pub isolated: bool,
}

/// Resolved, immutable configuration of one repackaging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepackConfig {
    /// Gaia checkout root
    pub gaia_path: PathBuf,
    /// Build output directory, relative to `gaia_path`
    pub build_path: PathBuf,
    /// Developer written into manifests
    pub developer: DeveloperIdentity,
    /// Official or unofficial wording
    pub mode: BuildMode,
    /// App naming scheme
    pub naming: Naming,
    /// Source image for the icon set
    pub icon_source: Option<PathBuf>,
    /// Shim script to inject, if any
    pub shim_source: Option<PathBuf>,
    /// External programs
    pub tools: ToolConfig,
}

impl Default for RepackConfig {
    fn default() -> Self {
        Self::resolve(FileConfig::default(), Overrides::default())
    }
}

impl RepackConfig {
    /// Merges command line overrides over the file config.
    ///
    /// An official build always uses the official developer identity,
    /// whatever else was configured.
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Self {
        let mode = if overrides.official {
            BuildMode::Official
        } else {
            BuildMode::Unofficial
        };

        let developer = if mode == BuildMode::Official {
            DeveloperIdentity::official()
        } else {
            let placeholder = DeveloperIdentity::placeholder();
            DeveloperIdentity {
                name: overrides
                    .developer_name
                    .or(file.developer.name)
                    .unwrap_or(placeholder.name),
                url: overrides
                    .developer_url
                    .or(file.developer.url)
                    .unwrap_or(placeholder.url),
            }
        };

        let default_tools = ToolConfig::default();

        Self {
            gaia_path: overrides
                .gaia
                .or(file.paths.gaia)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_GAIA_PATH)),
            build_path: overrides
                .build
                .or(file.paths.build)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_PATH)),
            developer,
            mode,
            naming: if overrides.isolated {
                Naming::Isolated
            } else {
                Naming::Standard
            },
            icon_source: overrides.icon_source.or(file.icons.source),
            shim_source: overrides.shim_source.or(file.shim.source),
            tools: ToolConfig {
                make: overrides.make.or(file.tools.make).unwrap_or(default_tools.make),
                convert: overrides
                    .convert
                    .or(file.tools.convert)
                    .unwrap_or(default_tools.convert),
            },
        }
    }

    /// Directory containing layout definitions.
    pub fn layouts_dir(&self) -> PathBuf {
        self.gaia_path.join(LAYOUTS_DIR)
    }

    /// Root of the build output.
    pub fn build_root(&self) -> PathBuf {
        self.gaia_path.join(&self.build_path)
    }

    /// Generic keyboard bundle produced by the Gaia build.
    pub fn build_output_dir(&self) -> PathBuf {
        self.build_root().join(KEYBOARD_APP)
    }

    /// Per-language bundle directory (`<build>/<lang>-keyboard`).
    pub fn bundle_dir(&self, lang: &str) -> PathBuf {
        self.build_root().join(format!("{lang}{BUNDLE_DIR_SUFFIX}"))
    }

    /// Manifest of a per-language bundle.
    pub fn manifest_path(&self, lang: &str) -> PathBuf {
        self.bundle_dir(lang).join(MANIFEST_FILE)
    }
}

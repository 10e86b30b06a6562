//! `manifest.webapp` rewriting.
//!
//! The generic keyboard manifest describes every layout compiled into the
//! build. A per-language bundle keeps the manifest's structure but gets its
//! own name, developer, locale and permissions, and loses the entries that
//! only make sense for the stock keyboard (`inputs.number` and the
//! `settings` permission).
//!
//! The manifest is handled as a JSON object rather than a fixed struct so
//! fields this tool does not know about survive the rewrite untouched.

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::atomic_write;
use super::icons::IconSet;
use crate::config::{BuildMode, DeveloperIdentity, Naming, RepackConfig};
use crate::constants::{APP_TYPE, DEFAULT_LOCALE, INPUT_PERMISSION_DESCRIPTION};

/// Input method that is never shipped with a per-language keyboard.
const NUMBER_INPUT: &str = "number";

/// Permission that per-language keyboards do not request.
const SETTINGS_PERMISSION: &str = "settings";

/// `developer` entry of the manifest.
#[derive(Debug, Clone, Serialize)]
struct DeveloperEntry<'a> {
    name: &'a str,
    url: &'a str,
}

/// One entry of the `locales` map.
#[derive(Debug, Clone, Serialize)]
struct LocaleEntry<'a> {
    name: &'a str,
    description: &'a str,
}

/// Name and description of a repacked keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestTexts {
    /// App name
    pub name: String,
    /// App description
    pub description: String,
}

impl ManifestTexts {
    /// Composes the app texts for a layout display name.
    pub fn compose(layout_name: &str, mode: BuildMode, naming: Naming) -> Self {
        let description = match mode {
            BuildMode::Official => format!("{layout_name} Gaia Official Keyboard"),
            BuildMode::Unofficial => format!("{layout_name} Gaia Keyboard (unofficial build)"),
        };
        let name = match naming {
            Naming::Standard => format!("{layout_name} Keyboard"),
            Naming::Isolated => format!("{layout_name} Keyboard (isolated)"),
        };

        Self { name, description }
    }
}

/// A decoded `manifest.webapp`.
#[derive(Debug, Clone, PartialEq)]
pub struct WebappManifest {
    root: Map<String, Value>,
}

impl WebappManifest {
    /// Parses manifest JSON. The document must be an object.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).context("Failed to parse manifest JSON")?;
        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(anyhow!("Manifest root is not a JSON object")),
        }
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Invalid manifest: {}", path.display()))
    }

    /// Serializes the manifest as indented JSON with sorted keys.
    pub fn to_json_string(&self) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(&self.root).context("Failed to serialize manifest")?;
        json.push('\n');
        Ok(json)
    }

    /// Writes the manifest back to disk atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        atomic_write(path, &self.to_json_string()?)
    }

    #[cfg(test)]
    fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Human readable name of a layout, from `inputs.<lang>.name`.
    pub fn layout_name(&self, lang: &str) -> Result<String> {
        self.root
            .get("inputs")
            .and_then(|inputs| inputs.get(lang))
            .and_then(|input| input.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Manifest has no inputs.{lang}.name entry"))
    }

    /// Applies the per-language rewrite.
    ///
    /// `icons`, when given, replaces any icon map the generic build had.
    pub fn rewrite(
        &mut self,
        texts: &ManifestTexts,
        developer: &DeveloperIdentity,
        icons: Option<&IconSet>,
    ) -> Result<()> {
        self.root
            .insert("name".to_string(), Value::String(texts.name.clone()));
        self.root.insert(
            "description".to_string(),
            Value::String(texts.description.clone()),
        );
        self.root.insert(
            "developer".to_string(),
            serde_json::to_value(DeveloperEntry {
                name: &developer.name,
                url: &developer.url,
            })?,
        );

        let mut locales = Map::new();
        locales.insert(
            DEFAULT_LOCALE.to_string(),
            serde_json::to_value(LocaleEntry {
                name: &texts.name,
                description: &texts.description,
            })?,
        );
        self.root
            .insert("locales".to_string(), Value::Object(locales));

        self.root
            .insert("type".to_string(), Value::String(APP_TYPE.to_string()));

        let permissions = object_entry(&mut self.root, "permissions");
        let input = object_entry(permissions, "input");
        input.insert(
            "description".to_string(),
            Value::String(INPUT_PERMISSION_DESCRIPTION.to_string()),
        );
        permissions.remove(SETTINGS_PERMISSION);

        if let Some(Value::Object(inputs)) = self.root.get_mut("inputs") {
            inputs.remove(NUMBER_INPUT);
        }

        if let Some(icons) = icons {
            self.root.insert("icons".to_string(), icons.to_json());
        }

        Ok(())
    }
}

/// Gets `map[key]` as an object, replacing it with an empty one when absent
/// or of another type.
fn object_entry<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    match entry {
        Value::Object(object) => object,
        _ => unreachable!("entry was just made an object"),
    }
}

/// Rewrites the manifest of `<lang>-keyboard` in place.
///
/// # Errors
///
/// Fails when the manifest is missing or malformed, or when it does not
/// describe `lang` in its `inputs` map.
pub fn rewrite_manifest(
    config: &RepackConfig,
    lang: &str,
    icons: Option<&IconSet>,
) -> Result<ManifestTexts> {
    let path = config.manifest_path(lang);
    let mut manifest = WebappManifest::load(&path)?;

    let layout_name = manifest.layout_name(lang)?;
    debug!("Layout '{}' is named '{}'", lang, layout_name);

    let texts = ManifestTexts::compose(&layout_name, config.mode, config.naming);
    manifest.rewrite(&texts, &config.developer, icons)?;
    manifest.save(&path)?;

    info!("Rewrote {} as '{}'", path.display(), texts.name);
    Ok(texts)
}

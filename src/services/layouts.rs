//! Layout discovery service.
//!
//! Gaia ships one JavaScript file per keyboard layout under
//! `apps/keyboard/js/layouts`. The file stem is the layout identifier that the
//! build and the manifest's `inputs` map both use.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Component, Path};
use tracing::debug;

use crate::config::RepackConfig;
use crate::constants::LAYOUT_FILE_SUFFIX;

/// Lists the layout identifiers available in the configured Gaia checkout.
///
/// Every entry of the layouts directory is returned with the `.js` suffix
/// stripped. No check is made that a layout actually builds.
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Identifiers sorted alphabetically
/// * `Err(...)` - Layouts directory missing or unreadable
///
/// # Examples
///
/// ```no_run
/// use keyboard_repack::config::RepackConfig;
/// use keyboard_repack::services::layouts::available_languages;
///
/// for lang in available_languages(&RepackConfig::default())? {
///     println!("- {lang}");
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn available_languages(config: &RepackConfig) -> Result<Vec<String>> {
    let layouts_dir = config.layouts_dir();
    debug!("Scanning layouts in {}", layouts_dir.display());

    let entries = fs::read_dir(&layouts_dir).with_context(|| {
        format!(
            "Failed to read layouts directory: {}",
            layouts_dir.display()
        )
    })?;

    let mut languages = Vec::new();
    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        languages.push(layout_id(&file_name).to_string());
    }

    languages.sort();
    Ok(languages)
}

/// Checks that a layout identifier is a plain file name.
///
/// Identifiers end up in `<build>/<lang>-keyboard`, which gets deleted and
/// recreated, so separators, `.`/`..` and empty names are refused.
pub fn validate_language(lang: &str) -> Result<()> {
    let mut components = Path::new(lang).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    if lang.is_empty() || lang.contains(['/', '\\']) || !single_normal {
        bail!("Invalid layout identifier '{lang}': expected a plain name such as 'fr'");
    }

    Ok(())
}

/// Derives a layout identifier from a layout file name.
fn layout_id(file_name: &str) -> &str {
    file_name
        .strip_suffix(LAYOUT_FILE_SUFFIX)
        .unwrap_or(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FileConfig, Overrides};
    use tempfile::TempDir;

    fn config_for(root: &std::path::Path) -> RepackConfig {
        RepackConfig::resolve(
            FileConfig::default(),
            Overrides {
                gaia: Some(root.to_path_buf()),
                ..Overrides::default()
            },
        )
    }

    #[test]
    fn test_layout_id() {
        assert_eq!(layout_id("fr.js"), "fr");
        assert_eq!(layout_id("en-Dvorak.js"), "en-Dvorak");
        assert_eq!(layout_id("README"), "README");
    }

    #[test]
    fn test_validate_language_accepts_layout_names() {
        for lang in ["fr", "en-Dvorak", "pt-BR", "zh-Hans-Pinyin"] {
            assert!(validate_language(lang).is_ok(), "{lang} should be accepted");
        }
    }

    #[test]
    fn test_validate_language_rejects_paths() {
        for lang in ["", ".", "..", "../victim", "fr/../..", "/tmp/x", "a\\b", "sub/fr"] {
            let err = validate_language(lang).unwrap_err();
            assert!(
                err.to_string().contains("Invalid layout identifier"),
                "{lang:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_available_languages_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_for(temp_dir.path());
        let layouts = config.layouts_dir();
        fs::create_dir_all(&layouts).unwrap();
        for name in ["pt-BR.js", "en.js", "fr.js"] {
            fs::write(layouts.join(name), "Keyboards = {};").unwrap();
        }

        let languages = available_languages(&config).unwrap();
        assert_eq!(languages, vec!["en", "fr", "pt-BR"]);
    }

    #[test]
    fn test_available_languages_empty_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_for(temp_dir.path());
        fs::create_dir_all(config.layouts_dir()).unwrap();

        assert!(available_languages(&config).unwrap().is_empty());
    }

    #[test]
    fn test_available_languages_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_for(temp_dir.path());

        let err = available_languages(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to read layouts directory"));
    }
}

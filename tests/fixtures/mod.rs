//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Path to the keyboard-repack binary
pub fn repack_bin() -> &'static str {
    env!("CARGO_BIN_EXE_keyboard-repack")
}

/// Manifest produced by the fake Gaia build.
pub const GENERIC_MANIFEST: &str = r#"{
  "name": "Built-in Keyboard",
  "description": "Built-in Keyboard",
  "type": "certified",
  "role": "input",
  "launch_path": "/index.html",
  "developer": {
    "name": "The Gaia Team",
    "url": "https://github.com/mozilla-b2g/gaia"
  },
  "permissions": {
    "input": {},
    "settings": { "access": "readonly" },
    "audio-channel-notification": {}
  },
  "locales": {
    "en-US": { "name": "Built-in Keyboard", "description": "Built-in Keyboard" },
    "fr": { "name": "Clavier", "description": "Clavier" }
  },
  "icons": {
    "128": "/style/icons/keyboard_128.png"
  },
  "inputs": {
    "en": { "launch_path": "/index.html#en", "name": "English", "types": ["text", "url"] },
    "fr": { "launch_path": "/index.html#fr", "name": "Français", "types": ["text", "url"] },
    "el": { "launch_path": "/index.html#el", "name": "Ελληνικά", "types": ["text", "url"] },
    "number": { "launch_path": "/index.html#numberLayout", "name": "Number", "types": ["number"] }
  }
}
"#;

/// `index.html` produced by the fake Gaia build.
pub const INDEX_HTML: &str = concat!(
    "<!DOCTYPE html>\n",
    "<html>\n",
    "  <head>\n",
    "    <meta charset=\"utf-8\">\n",
    "    <link rel=\"stylesheet\" href=\"style/keyboard.css\">\n",
    "    <script defer src=\"js/keyboard/layout_loader.js\"></script>\n",
    "    <script defer src=\"js/keyboard/render.js\"></script>\n",
    "  </head>\n",
    "  <body></body>\n",
    "</html>\n",
);

/// `settings.html` produced by the fake Gaia build.
pub const SETTINGS_HTML: &str = concat!(
    "<!DOCTYPE html>\n",
    "<html>\n",
    "\t<head>\n",
    "\t\t<script defer src=\"js/settings/settings.js\"></script>\n",
    "\t</head>\n",
    "</html>\n",
);

/// Layouts present in the fake Gaia tree.
pub const LAYOUTS: [&str; 4] = ["el", "en", "fr", "number"];

/// A fake Gaia checkout with scripted `make` and `convert`.
pub struct FakeGaia {
    /// Keeps the tree alive for the duration of the test
    pub temp: TempDir,
}

impl FakeGaia {
    /// Root of the Gaia checkout.
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Path to the scripted build program.
    pub fn make(&self) -> PathBuf {
        self.root().join("tools/fake-make")
    }

    /// Path to the scripted image converter.
    pub fn convert(&self) -> PathBuf {
        self.root().join("tools/fake-convert")
    }

    /// File recording every layout the fake build was invoked with.
    pub fn build_log(&self) -> PathBuf {
        self.root().join("make.log")
    }

    /// Per-language bundle directory.
    pub fn bundle(&self, lang: &str) -> PathBuf {
        self.root().join("build_stage").join(format!("{lang}-keyboard"))
    }

    /// Parsed manifest of a per-language bundle.
    pub fn manifest(&self, lang: &str) -> serde_json::Value {
        let content = fs::read_to_string(self.bundle(lang).join("manifest.webapp"))
            .expect("manifest should exist");
        serde_json::from_str(&content).expect("manifest should be valid JSON")
    }

    /// Writes a shim script and returns its path.
    pub fn write_shim(&self) -> PathBuf {
        let path = self.root().join("shim_mozSettings.js");
        fs::write(&path, "(function () { 'use strict'; })();\n").unwrap();
        path
    }

    /// Writes an icon source and returns its path.
    pub fn write_icon(&self) -> PathBuf {
        let path = self.root().join("keyboard.svg");
        fs::write(&path, "<svg xmlns=\"http://www.w3.org/2000/svg\"/>").unwrap();
        path
    }

    /// Base arguments pointing the CLI at this tree.
    pub fn base_args(&self) -> Vec<String> {
        vec![
            "--gaia".to_string(),
            self.root().to_string_lossy().into_owned(),
            "--make".to_string(),
            self.make().to_string_lossy().into_owned(),
            "--convert".to_string(),
            self.convert().to_string_lossy().into_owned(),
            "--config".to_string(),
            self.root().join("repack.toml").to_string_lossy().into_owned(),
        ]
    }
}

#[cfg(unix)]
fn write_executable(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, body).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Creates a fake Gaia tree.
///
/// `make` appends the requested layout to `make.log` and copies `template/`
/// to `build_stage/keyboard`; it exits with status 2 for the `broken` layout.
/// `convert` writes a placeholder PNG to its last argument.
#[cfg(unix)]
pub fn fake_gaia() -> FakeGaia {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let root = temp.path();

    let layouts = root.join("apps/keyboard/js/layouts");
    fs::create_dir_all(&layouts).unwrap();
    for lang in LAYOUTS {
        fs::write(layouts.join(format!("{lang}.js")), "Keyboards = {};\n").unwrap();
    }

    let template = root.join("template");
    fs::create_dir_all(template.join("js/keyboard")).unwrap();
    fs::write(template.join("manifest.webapp"), GENERIC_MANIFEST).unwrap();
    fs::write(template.join("index.html"), INDEX_HTML).unwrap();
    fs::write(template.join("settings.html"), SETTINGS_HTML).unwrap();
    fs::write(template.join("js/keyboard/render.js"), "// render\n").unwrap();

    fs::create_dir_all(root.join("tools")).unwrap();
    write_executable(
        &root.join("tools/fake-make"),
        "#!/bin/sh\n\
         echo \"$GAIA_KEYBOARD_LAYOUTS $APP\" >> make.log\n\
         if [ \"$GAIA_KEYBOARD_LAYOUTS\" = broken ]; then\n\
         echo 'warning: layout broken is deprecated'\n\
         echo 'error: layout broken does not exist'\n\
         echo 'make: *** [keyboard] Error 2' >&2\n\
         exit 2\n\
         fi\n\
         rm -rf build_stage/keyboard\n\
         mkdir -p build_stage\n\
         cp -R template build_stage/keyboard\n",
    );
    write_executable(
        &root.join("tools/fake-convert"),
        "#!/bin/sh\nfor last; do :; done\nprintf 'PNG' > \"$last\"\n",
    );

    fs::write(root.join("repack.toml"), "").unwrap();

    FakeGaia { temp }
}

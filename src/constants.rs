//! Application-wide constants.
//!
//! Fixed names of the Gaia tree, the generated bundles and the external tools
//! that the repackaging pipeline relies on.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Keyboard Repack";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "keyboard-repack";

/// Directory holding layout definitions, relative to the Gaia root.
pub const LAYOUTS_DIR: &str = "apps/keyboard/js/layouts";

/// Suffix stripped from layout file names to obtain layout identifiers.
pub const LAYOUT_FILE_SUFFIX: &str = ".js";

/// Gaia app that gets built and then cloned per language.
pub const KEYBOARD_APP: &str = "keyboard";

/// Suffix appended to a layout identifier to name its bundle directory.
pub const BUNDLE_DIR_SUFFIX: &str = "-keyboard";

/// Manifest file name inside a bundle.
pub const MANIFEST_FILE: &str = "manifest.webapp";

/// Environment variable read by the Gaia build to select layouts.
pub const LAYOUTS_ENV: &str = "GAIA_KEYBOARD_LAYOUTS";

/// Environment variable read by the Gaia build to select the app.
pub const APP_ENV: &str = "APP";

/// Pixel sizes of the generated icon set.
pub const ICON_SIZES: [u32; 6] = [32, 60, 90, 120, 128, 256];

/// Icon directory inside a bundle.
pub const ICONS_DIR: &str = "icons";

/// Vendor directory receiving the mozSettings shim, relative to the bundle.
pub const SHIM_VENDOR_DIR: &str = "js/vendor/shimmozsettings";

/// File name of the shim once copied into the bundle.
pub const SHIM_FILE_NAME: &str = "shim_mozSettings.js";

/// HTML entry points that get the shim `<script>` tag.
pub const SHIM_HTML_FILES: [&str; 2] = ["index.html", "settings.html"];

/// Description given to the `input` permission of every repacked keyboard.
pub const INPUT_PERMISSION_DESCRIPTION: &str = "Required to act as an input method";

/// Locale written into the rewritten manifest.
pub const DEFAULT_LOCALE: &str = "en-US";

/// App type required for 3rd party keyboards.
pub const APP_TYPE: &str = "privileged";

/// Developer identity used for official builds.
pub const OFFICIAL_DEVELOPER_NAME: &str = "The Gaia Team";

/// Developer URL used for official builds.
pub const OFFICIAL_DEVELOPER_URL: &str = "https://github.com/mozilla-b2g/gaia";

/// Placeholder developer name when none is configured.
pub const PLACEHOLDER_DEVELOPER_NAME: &str = "Unknown";

/// Placeholder developer URL when none is configured.
pub const PLACEHOLDER_DEVELOPER_URL: &str = "https://example.org";

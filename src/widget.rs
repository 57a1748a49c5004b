// ABOUTME: The embedded version-picker web component and its asset sync.
// ABOUTME: Uploads and scaffolds always ship the widget bundled with this binary.

use std::path::Path;

use crate::config::Config;
use crate::error::Result;

const VERSION_PICKER_SRC: &str = include_str!("../web/version-picker.js");

const PROVENANCE_HEADER: &str = "\
// AUTO-GENERATED by stratus — do not edit.
// Source: https://github.com/stratus-deploy/stratus/blob/main/web/version-picker.js

";

/// The version-picker component as written into worker assets.
pub fn version_picker_js() -> String {
    format!("{PROVENANCE_HEADER}{VERSION_PICKER_SRC}")
}

/// Write the widget into the worker's assets dir so deployed apps always
/// carry the version bundled with this binary.
pub fn sync_web_assets(config: &Config) -> Result<()> {
    write_into(&config.assets_dir)
}

/// Write the widget into an arbitrary assets dir (used by scaffolding).
pub fn write_into(assets_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(assets_dir)?;
    std::fs::write(assets_dir.join("version-picker.js"), version_picker_js())?;
    Ok(())
}

use crate::draw::settings::OverlaySettings;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

pub const OVERLAY_SETTINGS_FILE_NAME: &str = "overlay_settings.json";

pub fn settings_path_from_exe_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(OVERLAY_SETTINGS_FILE_NAME))
}

pub fn resolve_settings_path() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    settings_path_from_exe_path(&exe_path)
}

pub fn load() -> Result<OverlaySettings> {
    load_from_path(&resolve_settings_path()?)
}

pub fn save(settings: &OverlaySettings) -> Result<PathBuf> {
    let path = resolve_settings_path()?;
    save_to_path(&path, settings)?;
    Ok(path)
}

/// Reads settings from `path`. A missing or blank file yields the defaults.
pub fn load_from_path(path: &Path) -> Result<OverlaySettings> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "overlay settings file missing, using defaults");
        return Ok(OverlaySettings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read overlay settings file {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(OverlaySettings::default());
    }

    let mut loaded: OverlaySettings = serde_json::from_str(&content)
        .with_context(|| format!("deserialize overlay settings file {}", path.display()))?;
    loaded.sanitize();
    Ok(loaded)
}

/// Like [`load`], but falls back to defaults. The load error is handed back instead
/// of logged, so it can be reported once logging is configured from the result.
pub fn load_or_default() -> (OverlaySettings, Option<anyhow::Error>) {
    match resolve_settings_path() {
        Ok(path) => load_or_default_from(&path),
        Err(err) => (OverlaySettings::default(), Some(err)),
    }
}

pub fn load_or_default_from(path: &Path) -> (OverlaySettings, Option<anyhow::Error>) {
    match load_from_path(path) {
        Ok(settings) => (settings, None),
        Err(err) => (OverlaySettings::default(), Some(err)),
    }
}

pub fn save_to_path(path: &Path, settings: &OverlaySettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create overlay settings folder {}", parent.display()))?;
    }

    let mut sanitized = settings.clone();
    sanitized.sanitize();
    let json = serde_json::to_string_pretty(&sanitized).context("serialize overlay settings")?;
    std::fs::write(path, json)
        .with_context(|| format!("write overlay settings file {}", path.display()))
}

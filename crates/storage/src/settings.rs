use std::path::Path;

use anyhow::Context as _;
use catalog_core::{Settings, Theme};
use tracing::warn;

pub const ENV_DATA: &str = "CATALOG_DATA";
pub const ENV_THEME: &str = "CATALOG_THEME";
pub const ENV_PAGE_SIZE: &str = "CATALOG_PAGE_SIZE";

/// Loads settings from `path`, falling back to defaults when the file is absent.
pub fn load_settings(path: impl AsRef<Path>) -> anyhow::Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Settings::default());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read settings {}", path.display()))?;
    let mut settings: Settings = serde_json::from_str(&json)
        .with_context(|| format!("parse settings {}", path.display()))?;
    settings.normalize();
    Ok(settings)
}

/// Applies `CATALOG_*` overrides read through `lookup`.
pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(path) = lookup(ENV_DATA) {
        settings.data_path = Some(path);
    }

    if let Some(value) = lookup(ENV_THEME) {
        match value.parse::<Theme>() {
            Ok(theme) => settings.theme = Some(theme),
            Err(err) => warn!(value = %value, "ignoring {ENV_THEME}: {err}"),
        }
    }

    if let Some(value) = lookup(ENV_PAGE_SIZE) {
        match value.trim().parse::<usize>() {
            Ok(size) => settings.page_size = Some(size),
            Err(err) => warn!(value = %value, "ignoring {ENV_PAGE_SIZE}: {err}"),
        }
    }

    settings.normalize();
}

/// Terminal color-scheme preference from a `COLORFGBG` value (`fg;bg` or
/// `fg;default;bg`). Dark backgrounds map to night.
pub fn detect_system_theme(colorfgbg: Option<&str>) -> Theme {
    let Some(bg) = colorfgbg
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
    else {
        return Theme::Day;
    };

    match bg {
        0..=6 | 8 => Theme::Night,
        _ => Theme::Day,
    }
}

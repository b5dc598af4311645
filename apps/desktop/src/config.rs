use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "registry.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_filter: String,
    pub browser_command: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            browser_command: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    log_filter: Option<String>,
    browser_command: Option<String>,
}

/// Defaults, then the TOML file, then `APP__*` environment variables.
///
/// An explicit `path` must exist and parse. The default `registry.toml` is optional and
/// ignored when unreadable or malformed.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

fn load_settings_with(
    path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let file_cfg = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?;
            parse_file_settings(&raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?
        }
        None => fs::read_to_string(DEFAULT_CONFIG_FILE)
            .ok()
            .and_then(|raw| parse_file_settings(&raw).ok())
            .unwrap_or_default(),
    };

    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    if let Some(v) = file_cfg.browser_command {
        settings.browser_command = Some(v);
    }

    apply_env_overrides(&mut settings, lookup);
    Ok(settings)
}

fn parse_file_settings(raw: &str) -> Result<FileSettings, toml::de::Error> {
    toml::from_str(raw)
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__BROWSER_COMMAND") {
        settings.browser_command = Some(v);
    }
}

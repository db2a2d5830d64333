use std::{collections::HashMap, fs};

use anyhow::{Context, Result};
use client_core::DEFAULT_ENDPOINT;

pub const SETTINGS_FILE: &str = "contacts.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_endpoint: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_ENDPOINT.into(),
            log_filter: "info".into(),
        }
    }
}

/// Defaults, then `contacts.toml`, then environment. Later sources win.
///
/// A missing file is fine; a file that does not parse is an error.
pub fn load_settings() -> Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse '{SETTINGS_FILE}'"))?;
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, String>>(raw)?;
    if let Some(v) = file_cfg.get("api_endpoint") {
        settings.api_endpoint = v.clone();
    }
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("CONTACTS_API_ENDPOINT") {
        settings.api_endpoint = v;
    }
    if let Some(v) = lookup("APP__API_ENDPOINT") {
        settings.api_endpoint = v;
    }

    if let Some(v) = lookup("CONTACTS_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

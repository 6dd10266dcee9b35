use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.nytimes.com/svc/books/v3";
pub const DEFAULT_CONFIG_FILE: &str = "bestsellers.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.into(),
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// `None` disables the per-request timeout.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(DEFAULT_CONFIG_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then `config_path` (if readable), then environment overrides.
pub fn load_settings_from(config_path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        apply_file_overrides(&mut settings, &raw);
    }

    if let Some(v) = env("NYT_API_KEY") {
        settings.api_key = v;
    }
    if let Some(v) = env("APP__API_KEY") {
        settings.api_key = v;
    }

    if let Some(v) = env("APP__BASE_URL") {
        settings.base_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        tracing::warn!("ignoring unparseable settings file");
        return;
    };

    if let Some(v) = file_cfg.get("api_key").and_then(toml::Value::as_str) {
        settings.api_key = v.to_string();
    }
    if let Some(v) = file_cfg.get("base_url").and_then(toml::Value::as_str) {
        settings.base_url = v.to_string();
    }
    match file_cfg.get("request_timeout_secs") {
        Some(toml::Value::Integer(v)) if *v >= 0 => settings.request_timeout_secs = *v as u64,
        Some(toml::Value::String(v)) => {
            if let Ok(parsed) = v.trim().parse::<u64>() {
                settings.request_timeout_secs = parsed;
            }
        }
        _ => {}
    }
}

/// Trims trailing slashes so endpoint paths can be appended with a single `/`.
pub fn normalize_base_url(raw_base_url: &str) -> anyhow::Result<String> {
    let trimmed = raw_base_url.trim();
    let base_url = if trimmed.is_empty() {
        DEFAULT_BASE_URL
    } else {
        trimmed
    };

    let parsed =
        Url::parse(base_url).with_context(|| format!("invalid catalog base url '{base_url}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("catalog base url must be http(s), got '{base_url}'");
    }

    Ok(base_url.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

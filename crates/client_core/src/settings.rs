use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use shared::domain::Validator;
use thiserror::Error;

pub const DEFAULT_SETTINGS_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub default_port: u16,
    pub round_status_poll_secs: u64,
    pub request_timeout_secs: u64,
    pub validators: Vec<Validator>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/".into(),
            default_port: 5001,
            round_status_poll_secs: 5,
            request_timeout_secs: 30,
            validators: vec![Validator {
                agent_name: "Local Agent".into(),
                agent_ip: "127.0.0.1".into(),
            }],
        }
    }
}

impl Settings {
    pub fn round_status_period(&self) -> Duration {
        Duration::from_secs(self.round_status_poll_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    base_url: Option<String>,
    default_port: Option<u16>,
    round_status_poll_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
    validators: Option<Vec<FileValidator>>,
}

#[derive(Debug, Deserialize)]
struct FileValidator {
    name: String,
    ip: String,
}

/// Defaults, then the TOML file, then `APP__*` environment overrides.
///
/// An explicit `path` must exist; the default `dashboard.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();

    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
    };

    match fs::read_to_string(&path) {
        Ok(raw) => {
            let file_cfg: FileSettings =
                toml::from_str(&raw).map_err(|source| SettingsError::Parse {
                    path: path.clone(),
                    source,
                })?;
            apply_file(&mut settings, file_cfg);
        }
        Err(err) if required || err.kind() != std::io::ErrorKind::NotFound => {
            return Err(SettingsError::Read { path, source: err });
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings.base_url = normalize_base_url(&settings.base_url);
    Ok(settings)
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.base_url {
        settings.base_url = v;
    }
    if let Some(v) = file_cfg.default_port {
        settings.default_port = v;
    }
    if let Some(v) = file_cfg.round_status_poll_secs {
        settings.round_status_poll_secs = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(validators) = file_cfg.validators {
        settings.validators = validators
            .into_iter()
            .map(|v| Validator {
                agent_name: v.name,
                agent_ip: v.ip,
            })
            .collect();
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("DASHBOARD_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = var("APP__BASE_URL") {
        settings.base_url = v;
    }

    if let Some(v) = var("APP__DEFAULT_PORT") {
        if let Ok(parsed) = v.parse::<u16>() {
            settings.default_port = parsed;
        }
    }

    if let Some(v) = var("APP__ROUND_STATUS_POLL_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.round_status_poll_secs = parsed;
        }
    }

    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }
}

/// Routes are joined onto the base, so it must end in `/`.
pub fn normalize_base_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return Settings::default().base_url;
    }
    if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_ENV_PREFIX: &str = "VIDSTREAM";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_toast_ttl", with = "humantime_serde")]
    pub toast_ttl: Duration,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            toast_ttl: default_toast_ttl(),
        }
    }
}

fn default_theme() -> String {
    "dark".into()
}

fn default_toast_ttl() -> Duration {
    Duration::from_secs(4)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    #[serde(default = "default_recommended_limit")]
    pub recommended_limit: usize,
    #[serde(default = "default_shuffle_recommended")]
    pub shuffle_recommended: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            recommended_limit: default_recommended_limit(),
            shuffle_recommended: default_shuffle_recommended(),
        }
    }
}

fn default_recommended_limit() -> usize {
    5
}

fn default_shuffle_recommended() -> bool {
    true
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub config_file: Option<PathBuf>,
    pub env_prefix: Option<String>,
}

pub fn load(options: LoadOptions) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(path) = options.config_file.as_ref() {
        if path.exists() {
            let from_file = read_config_file(path)?;
            cfg = merge_config(cfg, from_file);
        }
    } else if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            let from_file = read_config_file(&default_path)?;
            cfg = merge_config(cfg, from_file);
        }
    }

    let prefix = options.env_prefix.as_deref().unwrap_or(DEFAULT_ENV_PREFIX);
    apply_env(&mut cfg, prefix);

    Ok(cfg)
}

fn read_config_file(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&data)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;
    Ok(config)
}

fn merge_config(mut base: Config, other: Config) -> Config {
    if !other.ui.theme.is_empty() {
        base.ui.theme = other.ui.theme;
    }
    base.ui.toast_ttl = other.ui.toast_ttl;

    if other.storage.path.is_some() {
        base.storage.path = other.storage.path;
    }

    if other.catalog.recommended_limit != 0 {
        base.catalog.recommended_limit = other.catalog.recommended_limit;
    }
    base.catalog.shuffle_recommended = other.catalog.shuffle_recommended;

    base
}

// Environment values are applied in place so an unset variable never
// clobbers a file-provided value with a default.
fn apply_env(cfg: &mut Config, prefix: &str) {
    let mut map: HashMap<String, String> = HashMap::new();
    let upper_prefix = format!("{}_", prefix.to_uppercase());

    for (key, value) in env::vars() {
        if let Some(stripped) = key.strip_prefix(&upper_prefix) {
            let normalized = stripped.to_ascii_lowercase().replace("__", ".");
            map.insert(normalized, value);
        }
    }

    for (key, value) in map {
        apply_env_value(cfg, &key, value);
    }
}

fn apply_env_value(cfg: &mut Config, key: &str, value: String) {
    match key {
        "ui.theme" => cfg.ui.theme = value,
        "ui.toast_ttl" => {
            if let Ok(duration) = humantime::parse_duration(&value) {
                cfg.ui.toast_ttl = duration;
            }
        }
        "storage.path" => cfg.storage.path = Some(PathBuf::from(value)),
        "catalog.recommended_limit" => {
            if let Ok(parsed) = value.parse::<usize>() {
                cfg.catalog.recommended_limit = parsed;
            }
        }
        "catalog.shuffle_recommended" => {
            cfg.catalog.shuffle_recommended = matches!(value.as_str(), "1" | "true" | "TRUE" | "True");
        }
        _ => {}
    }
}

pub fn default_path() -> Option<PathBuf> {
    default_config_path()
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vidstream").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::tempdir;

    #[test]
    fn load_defaults_without_files() {
        let cfg = load(LoadOptions {
            config_file: Some(PathBuf::from("/nonexistent/config.yaml")),
            env_prefix: Some("VIDSTREAM_TEST_UNSET".into()),
        })
        .unwrap();
        assert_eq!(cfg.ui.theme, "dark");
        assert_eq!(cfg.ui.toast_ttl, Duration::from_secs(4));
        assert_eq!(cfg.catalog.recommended_limit, 5);
        assert!(cfg.catalog.shuffle_recommended);
    }

    #[test]
    fn load_reads_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "ui:\n  theme: plain\n  toast_ttl: 10s\ncatalog:\n  recommended_limit: 3\n",
        )
        .unwrap();

        let cfg = load(LoadOptions {
            config_file: Some(path),
            env_prefix: Some("VIDSTREAM_TEST_UNSET".into()),
        })
        .unwrap();
        assert_eq!(cfg.ui.theme, "plain");
        assert_eq!(cfg.ui.toast_ttl, Duration::from_secs(10));
        assert_eq!(cfg.catalog.recommended_limit, 3);
    }

    #[test]
    fn env_overrides() {
        env::set_var("VIDSTREAM_UI__THEME", "plain");
        env::set_var("VIDSTREAM_UI__TOAST_TTL", "2s");
        let cfg = load(LoadOptions::default()).unwrap();
        assert_eq!(cfg.ui.theme, "plain");
        assert_eq!(cfg.ui.toast_ttl, Duration::from_secs(2));
        env::remove_var("VIDSTREAM_UI__THEME");
        env::remove_var("VIDSTREAM_UI__TOAST_TTL");
    }
}

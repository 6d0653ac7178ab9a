use anyhow::{Context, Result};
use figment::{Figment, providers::{Env, Format, Json, Serialized, Toml, Yaml}};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;

use super::SiftConfig;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

impl SiftConfig {
    /// Load configuration, optionally from one explicit file, with CLI overrides on top
    ///
    /// Priority, lowest first: embedded defaults, user config, project config
    /// (or only `custom_config` when given), `RUNSIFT_*` environment variables,
    /// then `overrides`.
    pub fn load_with_overrides<T: Serialize>(custom_config: Option<&str>, overrides: &T) -> Result<Self> {
        Self::figment(custom_config)
            .merge(Serialized::defaults(overrides))
            .extract()
            .context("Failed to load runsift configuration")
    }

    fn figment(custom_config: Option<&str>) -> Figment {
        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG));  // Embedded defaults

        if let Some(custom_path) = custom_config {
            figment = match custom_path.rsplit('.').next() {
                Some("json") => figment.merge(Json::file(custom_path)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(custom_path)),
                _ => figment.merge(Toml::file(custom_path)),
            };
        } else {
            let user = Self::user_config_path();
            figment = figment
                // User config - support multiple formats
                .merge(Toml::file(user.join("config.toml")))
                .merge(Json::file(user.join("config.json")))
                .merge(Yaml::file(user.join("config.yaml")))
                // Project config - support multiple formats
                .merge(Toml::file("runsift.toml"))
                .merge(Json::file("runsift.json"))
                .merge(Yaml::file("runsift.yaml"));
        }

        // Environment variables always have highest priority
        figment.merge(Env::prefixed("RUNSIFT_").split("__"))
    }

    /// Render the merged configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    fn user_config_path() -> PathBuf {
        match std::env::var("HOME") {
            Ok(home) => PathBuf::from(home).join(".config").join("runsift"),
            Err(_) => PathBuf::from("~/.config/runsift"),
        }
    }
}

/// Sparse `section.key` overrides collected from command-line flags
///
/// Only flags the user actually passed are present, so everything else keeps
/// its configured value.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct CliOverrides(Map<String, Value>);

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<V: Into<Value>>(mut self, section: &str, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let entry = self
                .0
                .entry(section.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(map) = entry {
                map.insert(key.to_string(), value.into());
            }
        }
        self
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_loads_defaults() {
        let config = SiftConfig::load_with_overrides(Some("non_existent.toml"), &CliOverrides::new())
            .expect("Should load default config");

        assert_eq!(config.crash.folder_prefix, "mac_sch");
        assert_eq!(config.crash.log_glob, "*.log");
        assert_eq!(config.crash.events_path, PathBuf::from("docker_logs/events.1.txt"));
        assert_eq!(config.crash.keywords.len(), 3);
        assert_eq!(config.crash.connection_marker, "1/2 UE connected to eNB/gNB");
        assert_eq!(config.marker.target, "[M] TX --> RRC Setup");
        assert_eq!(config.marker.evidence_name, "events.1.txt");
        assert_eq!(config.sweep.binary_extension, "pcapng");
        assert_eq!(config.sweep.preview_limit, 10);
        assert_eq!(config.names.label, "文件夹名称:");
    }

    #[test]
    fn test_custom_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        std::fs::write(&path, "[marker]\ntarget = \"RRC Reconfiguration\"\n").unwrap();

        let config = SiftConfig::load_with_overrides(path.to_str(), &CliOverrides::new()).unwrap();
        assert_eq!(config.marker.target, "RRC Reconfiguration");
        // Untouched sections keep their defaults
        assert_eq!(config.crash.folder_prefix, "mac_sch");
    }

    #[test]
    fn test_custom_yaml_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.yaml");
        std::fs::write(&path, "sweep:\n  preview_limit: 3\n").unwrap();

        let config = SiftConfig::load_with_overrides(path.to_str(), &CliOverrides::new()).unwrap();
        assert_eq!(config.sweep.preview_limit, 3);
    }

    #[test]
    fn test_cli_overrides_win() {
        let overrides = CliOverrides::new()
            .set("marker", "target", Some("custom marker"))
            .set("crash", "folder_prefix", None::<String>);
        let config = SiftConfig::load_with_overrides(Some("non_existent.toml"), &overrides).unwrap();
        assert_eq!(config.marker.target, "custom marker");
        assert_eq!(config.marker.evidence_name, "events.1.txt");
        assert_eq!(config.crash.folder_prefix, "mac_sch");
    }

    #[test]
    fn test_config_round_trips_to_toml() {
        let config = SiftConfig::load_with_overrides(Some("non_existent.toml"), &CliOverrides::new()).unwrap();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("folder_prefix = \"mac_sch\""));
    }
}

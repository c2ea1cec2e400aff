//! Client settings

use serde::{Deserialize, Serialize};

/// Connection and upload settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Catalog service host name
    pub host: String,
    /// Catalog service port
    pub port: u16,
    /// Written into the `author` field of uploads
    pub author: String,
    /// Number of opened object ids kept for supersystem navigation
    pub history_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8000,
            author: String::new(),
            history_capacity: 64,
        }
    }
}

impl Settings {
    /// Load settings from file, or return default if not found.
    /// `PLM_HOST` and `PLM_PORT` override the stored values.
    pub fn load() -> Self {
        let mut settings = Self::config_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|json| match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    tracing::warn!("Ignoring malformed settings file: {e}");
                    None
                }
            })
            .unwrap_or_default();
        settings.apply_overrides(|key| std::env::var(key).ok());
        settings
    }

    /// Save settings to file
    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            return;
        };
        if let Some(dir) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::warn!("Cannot create config dir {}: {e}", dir.display());
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    tracing::warn!("Failed to write settings: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize settings: {e}"),
        }
    }

    /// `http://host:port`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "plm", "plm-bridge")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(host) = var("PLM_HOST").filter(|h| !h.is_empty()) {
            self.host = host;
        }
        if let Some(port) = var("PLM_PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PLM_PORT={port}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.base_url(), "http://localhost:8000");
        assert_eq!(s.history_capacity, 64);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let s: Settings = serde_json::from_str(r#"{"port": 9100}"#).unwrap();
        assert_eq!(s.port, 9100);
        assert_eq!(s.host, "localhost");
    }

    #[test]
    fn test_env_overrides() {
        let mut s = Settings::default();
        s.apply_overrides(|key| match key {
            "PLM_HOST" => Some("catalog.local".to_string()),
            "PLM_PORT" => Some("not-a-port".to_string()),
            _ => None,
        });
        assert_eq!(s.host, "catalog.local");
        assert_eq!(s.port, 8000);
    }
}

//! Application settings

use plm_client::Settings;
use serde::{Deserialize, Serialize};

use crate::i18n::Lang;

/// Interface settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub language: Lang,
    /// Base font size in points
    pub font_size: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            language: Lang::Ru,
            font_size: 14.0,
        }
    }
}

/// Everything the panel persists: the client's connection settings plus the
/// interface settings, each in its own file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppSettings {
    pub client: Settings,
    pub ui: UiSettings,
}

impl AppSettings {
    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        let mut ui = UiSettings::default();
        if let Some(dirs) = directories::ProjectDirs::from("com", "plm", "plm-bridge") {
            let config_path = dirs.config_dir().join("gui.json");
            if let Ok(json) = std::fs::read_to_string(&config_path) {
                match serde_json::from_str(&json) {
                    Ok(loaded) => ui = loaded,
                    Err(e) => tracing::warn!("Ignoring malformed {}: {e}", config_path.display()),
                }
            }
        }
        Self {
            client: Settings::load(),
            ui,
        }
    }

    /// Save settings to file
    pub fn save(&self) {
        self.client.save();
        if let Some(dirs) = directories::ProjectDirs::from("com", "plm", "plm-bridge") {
            let config_dir = dirs.config_dir();
            if std::fs::create_dir_all(config_dir).is_ok() {
                let config_path = config_dir.join("gui.json");
                if let Ok(json) = serde_json::to_string_pretty(&self.ui) {
                    if let Err(e) = std::fs::write(config_path, json) {
                        tracing::warn!("Failed to write interface settings: {e}");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_settings_partial_json() {
        let ui: UiSettings = serde_json::from_str(r#"{"language": "En"}"#).unwrap();
        assert_eq!(ui.language, Lang::En);
        assert_eq!(ui.font_size, 14.0);
    }
}

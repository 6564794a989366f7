use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "deckpilot";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Auto-play advance interval in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,

    /// "first", "last", or a slide number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_mode: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `deckpilot config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents =
            format!("# Deckpilot configuration \u{2014} https://github.com/deckpilot/deckpilot\n{yaml}");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "defaults.interval" => {
                let seconds: u32 = value.parse().map_err(|_| {
                    anyhow::anyhow!("Invalid interval: {value}. Must be a whole number of seconds.")
                })?;
                if seconds == 0 {
                    anyhow::bail!("Invalid interval: {value}. Must be at least 1 second.");
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .interval = Some(seconds);
            }
            "defaults.start_mode" => {
                if value != "first" && value != "last" && value.parse::<usize>().is_err() {
                    anyhow::bail!(
                        "Invalid start_mode: {value}. Must be 'first', 'last', or a slide number."
                    );
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .start_mode = Some(value.to_string());
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.theme, defaults.interval, defaults.start_mode"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_validates_theme() {
        let mut config = Config::default();
        assert!(config.set("defaults.theme", "dark").is_ok());
        assert!(config.set("defaults.theme", "sepia").is_err());
        assert_eq!(
            config.defaults.as_ref().and_then(|d| d.theme.as_deref()),
            Some("dark")
        );
    }

    #[test]
    fn set_rejects_zero_interval() {
        let mut config = Config::default();
        assert!(config.set("defaults.interval", "0").is_err());
        assert!(config.set("defaults.interval", "five").is_err());
        assert!(config.set("defaults.interval", "8").is_ok());
        assert_eq!(
            config.defaults.as_ref().and_then(|d| d.interval),
            Some(8)
        );
    }

    #[test]
    fn set_rejects_unknown_keys() {
        let mut config = Config::default();
        assert!(config.set("defaults.volume", "11").is_err());
    }

    #[test]
    fn start_mode_accepts_slide_numbers() {
        let mut config = Config::default();
        assert!(config.set("defaults.start_mode", "7").is_ok());
        assert!(config.set("defaults.start_mode", "last").is_ok());
        assert!(config.set("defaults.start_mode", "overview").is_err());
    }
}

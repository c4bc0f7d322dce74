use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name shown in the chat header and composer placeholder
    pub assistant_name: String,

    /// Delay before the canned reply appears, in milliseconds
    pub reply_delay_ms: u64,

    /// Oldest messages are dropped past this count
    pub max_messages: usize,

    /// Default tracing filter, overridden by RUST_LOG
    pub log_level: String,

    /// Log file location; defaults to ~/.research-chat/logs/research-chat.log
    pub log_file: Option<PathBuf>,

    /// UI preferences
    pub ui: UiConfig,

    /// Directory the config was loaded from
    #[serde(skip)]
    pub home: PathBuf,
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub sidebar_width: u16,
    pub show_timestamps: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            sidebar_width: 38,
            show_timestamps: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            assistant_name: "Research Chatbot".to_string(),
            reply_delay_ms: 1000,
            max_messages: 200,
            log_level: "info".to_string(),
            log_file: None,
            ui: UiConfig::default(),
            home: default_home(),
        }
    }
}

/// ~/.research-chat
pub fn default_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".research-chat")
}

impl Config {
    /// Load configuration from `path`, or from ~/.research-chat/config.toml
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => default_home().join("config.toml"),
        };
        let home = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(default_home);

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
            toml::from_str::<Config>(&content)
                .with_context(|| format!("Failed to parse config file {}", config_path.display()))?
        } else {
            Config::default()
        };

        config.home = home;
        Ok(config)
    }

    /// Save configuration to <home>/config.toml
    pub fn save(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.home)
            .context("Failed to create config directory")?;
        let config_path = self.home.join("config.toml");
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(&config_path, content)
            .context("Failed to write config file")?;
        Ok(config_path)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.home.join("logs").join("research-chat.log"))
    }

    /// Lines shown by the /settings command
    pub fn describe(&self) -> String {
        format!(
            "Settings:\n  assistant: {}\n  reply delay: {} ms\n  max messages: {}\n  log level: {}\n  log file: {}\n  config: {}",
            self.assistant_name,
            self.reply_delay_ms,
            self.max_messages,
            self.log_level,
            self.log_path().display(),
            self.home.join("config.toml").display(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_mockup() {
        let config = Config::default();
        assert_eq!(config.assistant_name, "Research Chatbot");
        assert_eq!(config.reply_delay(), Duration::from_secs(1));
        assert!(config.log_path().ends_with("logs/research-chat.log"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.reply_delay_ms, 1000);
        assert_eq!(config.home, dir.path());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "reply_delay_ms = 250\n\n[ui]\nshow_timestamps = false\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.reply_delay_ms, 250);
        assert!(!config.ui.show_timestamps);
        assert_eq!(config.ui.sidebar_width, UiConfig::default().sidebar_width);
        assert_eq!(config.assistant_name, "Research Chatbot");
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.home = dir.path().to_path_buf();
        config.assistant_name = "Lab Assistant".to_string();
        config.max_messages = 10;

        let path = config.save().unwrap();
        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn malformed_file_reports_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "reply_delay_ms = \"soon\"").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}

//! User configuration.
//!
//! Settings live in a TOML file, by default
//! `<config dir>/summarist/config.toml`. Every key is optional.
//!
//! ```toml
//! show_on_frontend = false
//! chat_url = "https://chat.openai.com/"
//! url_cap = 1200
//! ```
//!
//! # Example
//!
//! ```rust
//! use summarist_core::Config;
//!
//! let config = Config::builder().url_cap(1200).show_on_frontend(false).build();
//! assert_eq!(config.url_cap, 1200);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fetch::FetchConfig;
use crate::page::PageKind;
use crate::sanitize::{CLIPBOARD_CAP, SanitizeProfile, URL_CAP};
use crate::{Result, SummaristError};

/// Runtime settings for a summarization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Offer the summarizer on public pages (editor screens are unaffected).
    pub show_on_frontend: bool,

    /// Chat service the prompt is sent to.
    pub chat_url: String,

    /// Leading phrase of every prompt.
    pub instruction: String,

    /// Character cap for text embedded in the chat URL.
    pub url_cap: usize,

    /// Character cap for text written to the clipboard.
    pub clipboard_cap: usize,

    /// Time budget for content resolution, in milliseconds.
    pub deadline_ms: u64,

    /// Pause before the trigger control is restored, in milliseconds.
    pub reset_delay_ms: u64,

    /// HTTP timeout in seconds.
    pub fetch_timeout: u64,

    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        let fetch = FetchConfig::default();
        Self {
            show_on_frontend: true,
            chat_url: "https://chat.openai.com/".to_string(),
            instruction: "Summarize this article".to_string(),
            url_cap: URL_CAP,
            clipboard_cap: CLIPBOARD_CAP,
            deadline_ms: 5000,
            reset_delay_ms: 1500,
            fetch_timeout: fetch.timeout,
            user_agent: fetch.user_agent,
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// `<config dir>/summarist/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("summarist").join("config.toml"))
    }

    /// Loads from `path`, or from the default location when `path` is `None`.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SummaristError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| SummaristError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Whether the summarizer is offered on this kind of page.
    pub fn should_inject(&self, kind: PageKind) -> bool {
        match kind {
            PageKind::Editor => true,
            PageKind::Frontend => self.show_on_frontend,
        }
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }

    pub fn url_profile(&self) -> SanitizeProfile {
        SanitizeProfile::url(self.url_cap)
    }

    pub fn clipboard_profile(&self) -> SanitizeProfile {
        SanitizeProfile::clipboard(self.clipboard_cap)
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig { timeout: self.fetch_timeout, user_agent: self.user_agent.clone() }
    }
}

/// Builder for [`Config`].
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self { config: Config::default() }
    }

    /// Starts from an existing configuration, e.g. one loaded from disk.
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub fn show_on_frontend(mut self, value: bool) -> Self {
        self.config.show_on_frontend = value;
        self
    }

    pub fn chat_url(mut self, value: impl Into<String>) -> Self {
        self.config.chat_url = value.into();
        self
    }

    pub fn instruction(mut self, value: impl Into<String>) -> Self {
        self.config.instruction = value.into();
        self
    }

    pub fn url_cap(mut self, value: usize) -> Self {
        self.config.url_cap = value;
        self
    }

    pub fn clipboard_cap(mut self, value: usize) -> Self {
        self.config.clipboard_cap = value;
        self
    }

    pub fn deadline_ms(mut self, value: u64) -> Self {
        self.config.deadline_ms = value;
        self
    }

    pub fn reset_delay_ms(mut self, value: u64) -> Self {
        self.config.reset_delay_ms = value;
        self
    }

    pub fn fetch_timeout(mut self, value: u64) -> Self {
        self.config.fetch_timeout = value;
        self
    }

    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.user_agent = value.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Configuration management
//!
//! Settings are resolved in this order:
//! 1. Environment variables
//! 2. `gh-relay.toml` config file
//! 3. Defaults
//!
//! Upper-case `${VAR_NAME}` inside the config file is expanded from the
//! environment; lower-case `${name}` template placeholders are left alone.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "gh-relay.toml";

/// Main configuration for gh-relay
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub REST API settings
    pub github: GitHubConfig,

    /// Date rendering
    pub date: DateConfig,

    /// Message templates
    pub message: MessageConfig,

    /// Join-below thresholds per command
    pub threshold: ThresholdConfig,

    /// Item counts
    pub limits: LimitsConfig,

    /// URL shortening services
    pub shorturl: ShortUrlConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Personal access token, passed through as a bearer token
    pub token: Option<String>,

    /// API base URL
    pub base_url: String,

    /// User-Agent header (required by GitHub)
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: default_github_url(),
            user_agent: default_user_agent(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DateConfig {
    /// POSIX locale name such as `fi_FI`; empty disables localization
    pub locale: String,

    /// strftime format
    pub format: String,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            locale: String::new(),
            format: default_date_format(),
        }
    }
}

/// Message templates, see [`crate::template::render`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// Vars: url, date, description, files
    pub gist: String,
    /// Vars: login, url
    pub member: String,
    /// Vars: name, full_name, forks, watchers, stars, url
    pub repo: String,
    /// Vars: event, date, actor, repo, type
    pub activity: String,
    /// Vars: target
    pub empty: String,
    /// Vars: error
    pub error: String,
    /// Joins items posted as a single message
    pub separator: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            gist: "${url} - ${date} - ${description}".to_string(),
            member: "${login}".to_string(),
            repo: "${name} - ${forks} forks - ${watchers} watchers - ${url}".to_string(),
            activity: "${event}".to_string(),
            empty: "Nothing found for ${target}".to_string(),
            error: "Oh noes, error - ${error}".to_string(),
            separator: " | ".to_string(),
        }
    }
}

/// Result lists shorter than the threshold are posted as one joined line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub gist: usize,
    pub members: usize,
    pub repos: usize,
    pub activity: usize,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            gist: 0,
            members: 30,
            repos: 5,
            activity: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Item count when a command is given none
    pub default_count: usize,
    /// Upper bound for a requested item count
    pub max_count: usize,
    /// `per_page` for full listings (members, repositories)
    pub list_page_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            default_count: 1,
            max_count: 30,
            list_page_size: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortUrlConfig {
    /// Service names in fallback order
    pub services: Vec<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Token for bit.ly; the service is skipped without one
    pub bitly_token: Option<String>,
}

impl Default for ShortUrlConfig {
    fn default() -> Self {
        Self {
            services: default_services(),
            timeout_secs: 10,
            bitly_token: None,
        }
    }
}

fn default_github_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    format!("gh-relay/{}", env!("CARGO_PKG_VERSION"))
}

pub(crate) fn default_date_format() -> String {
    "%-d.%-m.%Y %H:%M:%S".to_string()
}

fn is_env_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

fn default_services() -> Vec<String> {
    vec!["is.gd".to_string(), "v.gd".to_string(), "tinyurl".to_string()]
}

impl Config {
    /// Expand `${VAR_NAME}` from the environment
    ///
    /// Only upper-case names are expanded, so the lower-case placeholders of
    /// message templates survive. Missing variables expand to an empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    var_name.push(c);
                }

                if closed && is_env_name(&var_name) {
                    if let Ok(env_value) = std::env::var(&var_name) {
                        result.push_str(&env_value);
                    }
                } else if !var_name.is_empty() || !closed {
                    result.push_str("${");
                    result.push_str(&var_name);
                    if closed {
                        result.push('}');
                    }
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Parse configuration from TOML text
    ///
    /// Environment variables are expanded, but env overrides are not applied.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config = Self::parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    fn parse_toml(content: &str) -> Result<Self> {
        let expanded = Self::expand_env_vars(content);
        Ok(toml::from_str(&expanded)?)
    }

    /// Load configuration from a TOML file, then apply env overrides
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::parse_toml(&content)?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from the default location
    ///
    /// Uses `./gh-relay.toml` if it exists, else defaults plus environment.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load `path` if it exists, else defaults plus environment
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_toml_file(path);
        }

        Self::from_env()
    }

    /// Defaults with environment overrides
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Override settings from environment variables
    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.is_empty() {
                self.github.token = Some(token);
            }
        }
        if let Ok(url) = std::env::var("GITHUB_API_URL") {
            if !url.is_empty() {
                self.github.base_url = url;
            }
        }

        if let Ok(locale) = std::env::var("GH_RELAY_DATE_LOCALE") {
            self.date.locale = locale;
        }
        if let Ok(format) = std::env::var("GH_RELAY_DATE_FORMAT") {
            if !format.is_empty() {
                self.date.format = format;
            }
        }

        if let Ok(services) = std::env::var("SHORTURL_SERVICES") {
            self.shorturl.services = services
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(token) = std::env::var("BITLY_TOKEN") {
            if !token.is_empty() {
                self.shorturl.bitly_token = Some(token);
            }
        }
    }

    /// Reject settings no command can work with
    fn validate(&self) -> Result<()> {
        if self.limits.max_count == 0 {
            return Err(Error::Config("limits.max_count must be at least 1".to_string()));
        }
        if self.limits.list_page_size == 0 || self.limits.list_page_size > 100 {
            return Err(Error::Config(
                "limits.list_page_size must be between 1 and 100".to_string(),
            ));
        }
        if self.github.base_url.is_empty() {
            return Err(Error::Config("github.base_url is empty".to_string()));
        }
        Ok(())
    }
}

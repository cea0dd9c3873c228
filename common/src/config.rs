//! # Settings
//!
//! Everything a session needs to reach the catalog. Built once, from the
//! environment and per-invocation overrides, then handed to the session by
//! value.

use std::time::Duration;

use crate::error::{BamError, Result};
use crate::network::range::{self, AddressRange};

pub const ENV_HOST: &str = "BAM_HOST";
pub const ENV_USER: &str = "BAM_USER";
pub const ENV_PASSWORD: &str = "BAM_PASSWORD";
pub const ENV_CONFIG: &str = "BAM_CONFIG";
pub const ENV_VIEW: &str = "BAM_VIEW";
pub const ENV_VERIFY_TLS: &str = "BAM_VERIFY_TLS";
pub const ENV_CHANGE_COMMENT: &str = "BAM_CHANGE_COMMENT";
pub const ENV_BLOCKS: &str = "BAM_BLOCKS";
pub const ENV_TIMEOUT: &str = "BAM_TIMEOUT";

pub const DEFAULT_VIEW: &str = "external";
pub const DEFAULT_CHANGE_COMMENT: &str = "change by bamctl";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Base URL or bare hostname of the Address Manager.
    pub host: String,
    pub user: String,
    pub password: String,
    /// Configuration name every lookup is scoped to.
    pub configuration: String,
    /// DNS view zones are resolved in.
    pub view: String,
    pub verify_tls: bool,
    /// Sent with every mutation as the change-control comment.
    pub change_comment: String,
    /// Candidate parent blocks for new networks.
    pub blocks: Vec<AddressRange>,
    /// Applies to each remote call on its own.
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: String::new(),
            user: String::new(),
            password: String::new(),
            configuration: String::new(),
            view: DEFAULT_VIEW.to_string(),
            verify_tls: true,
            change_comment: DEFAULT_CHANGE_COMMENT.to_string(),
            blocks: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Per-invocation replacements; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub host: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub configuration: Option<String>,
    pub view: Option<String>,
    pub verify_tls: Option<bool>,
    pub change_comment: Option<String>,
    pub blocks: Option<Vec<AddressRange>>,
    pub timeout: Option<Duration>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &str| -> Option<String> {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let verify_tls: bool = match read(ENV_VERIFY_TLS) {
            Some(value) => !matches!(value.to_ascii_lowercase().as_str(), "false" | "0" | "no"),
            None => defaults.verify_tls,
        };

        let timeout: Duration = match read(ENV_TIMEOUT) {
            Some(value) => value
                .parse::<f64>()
                .ok()
                .filter(|secs| secs.is_finite() && *secs > 0.0)
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                .ok_or_else(|| BamError::validation(format!("Invalid {ENV_TIMEOUT} '{value}'")))?,
            None => defaults.timeout,
        };

        let blocks: Vec<AddressRange> = match read(ENV_BLOCKS) {
            Some(value) => range::parse_list(&value)?,
            None => Vec::new(),
        };

        Ok(Self {
            host: read(ENV_HOST).unwrap_or_default(),
            user: read(ENV_USER).unwrap_or_default(),
            // Passwords are taken verbatim.
            password: lookup(ENV_PASSWORD).unwrap_or_default(),
            configuration: read(ENV_CONFIG).unwrap_or_default(),
            view: read(ENV_VIEW).unwrap_or(defaults.view),
            verify_tls,
            change_comment: read(ENV_CHANGE_COMMENT).unwrap_or(defaults.change_comment),
            blocks,
            timeout,
        })
    }

    pub fn with_overrides(self, overrides: SettingsOverrides) -> Self {
        Self {
            host: overrides.host.unwrap_or(self.host),
            user: overrides.user.unwrap_or(self.user),
            password: overrides.password.unwrap_or(self.password),
            configuration: overrides.configuration.unwrap_or(self.configuration),
            view: overrides.view.unwrap_or(self.view),
            verify_tls: overrides.verify_tls.unwrap_or(self.verify_tls),
            change_comment: overrides.change_comment.unwrap_or(self.change_comment),
            blocks: overrides.blocks.unwrap_or(self.blocks),
            timeout: overrides.timeout.unwrap_or(self.timeout),
        }
    }

    /// Checks that a session can be opened with these settings.
    pub fn validate(&self) -> Result<()> {
        if self.password.is_empty() {
            return Err(BamError::validation(format!(
                "BAM password missing (set {ENV_PASSWORD} or pass --password)"
            )));
        }
        if self.host.is_empty() || self.user.is_empty() || self.configuration.is_empty() {
            return Err(BamError::validation(
                "BAM settings incomplete (need host, user and configuration)",
            ));
        }
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

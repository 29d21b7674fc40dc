//! Settings types for the configuration aggregator.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{
    DEFAULT_COMPONENT_NAMES_SEPARATOR, DEFAULT_ENV_PATH, DEFAULT_FILE_POST_FIX, DEFAULT_ROOT_PATH,
    DEFAULT_TIMEOUT_SECS,
};

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Global settings shared by every load of an aggregator.
///
/// Settings are assembled once (usually through
/// [`SettingsLoader`](crate::SettingsLoader)) and are read-only afterwards:
/// the aggregator takes ownership of them at construction time, so nothing
/// can change them once a load has started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorSettings {
    /// Prefix of every document URL, e.g. `https://cfg.example.com/configurations/`.
    pub root_path: String,
    /// Overlay directory below `root_path`, e.g. `env/`.
    pub env_path: String,
    /// Suffix of every document URL, e.g. `.json`.
    pub file_post_fix: String,
    /// Separator for delimited component name lists.
    pub component_names_separator: String,
    /// Use the host identifier as the environment name.
    pub use_hostname_as_environment: bool,
    /// Whether environment overlays are fetched at all.
    pub load_env_config: bool,
    /// Configured environment name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Explicit host identifier. When unset the host of `root_path` (or
    /// `server_url`) is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Server URL that relative document URLs are resolved against.
    ///
    /// Only needed when `root_path` is relative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    /// Request timeout applied by the HTTP fetcher.
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            root_path: DEFAULT_ROOT_PATH.to_string(),
            env_path: DEFAULT_ENV_PATH.to_string(),
            file_post_fix: DEFAULT_FILE_POST_FIX.to_string(),
            component_names_separator: DEFAULT_COMPONENT_NAMES_SEPARATOR.to_string(),
            use_hostname_as_environment: false,
            load_env_config: true,
            environment: None,
            hostname: None,
            server_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AggregatorSettings {
    /// URL of the base document for `component`.
    ///
    /// `{root_path}{component}{file_post_fix}`
    pub fn base_url(&self, component: &str) -> String {
        format!("{}{}{}", self.root_path, component, self.file_post_fix)
    }

    /// URL of the overlay document for `component` in `environment`.
    ///
    /// `{root_path}{env_path}{environment}/{component}{file_post_fix}`
    pub fn environment_url(&self, environment: &str, component: &str) -> String {
        format!(
            "{}{}{}/{}{}",
            self.root_path, self.env_path, environment, component, self.file_post_fix
        )
    }

    /// Host identifier used when `use_hostname_as_environment` is set.
    ///
    /// An explicit `hostname` wins; otherwise the host of `root_path` is used
    /// when it is an absolute URL, then the host of `server_url`.
    pub fn resolve_hostname(&self) -> Option<String> {
        if let Some(host) = self.hostname.as_deref().map(str::trim)
            && !host.is_empty()
        {
            return Some(host.to_string());
        }

        let host_of = |url: &str| {
            url::Url::parse(url)
                .ok()
                .and_then(|url| url.host_str().map(str::to_string))
                .filter(|host| !host.is_empty())
        };

        host_of(&self.root_path).or_else(|| self.server_url.as_deref().and_then(host_of))
    }

    /// Environment name whose overlay should be merged, if any.
    ///
    /// Returns `None` when overlays are disabled or when no non-empty
    /// environment name can be determined.
    pub fn resolve_environment(&self) -> Option<String> {
        if !self.load_env_config {
            return None;
        }

        if self.use_hostname_as_environment {
            self.resolve_hostname()
        } else {
            self.environment
                .as_deref()
                .map(str::trim)
                .filter(|env| !env.is_empty())
                .map(str::to_string)
        }
    }
}

/// Partial settings as stored in a JSON settings file.
///
/// Every field is optional; only present fields override the loader state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsFile {
    pub root_path: Option<String>,
    pub env_path: Option<String>,
    pub file_post_fix: Option<String>,
    pub component_names_separator: Option<String>,
    pub use_hostname_as_environment: Option<bool>,
    pub load_env_config: Option<bool>,
    pub environment: Option<String>,
    pub hostname: Option<String>,
    pub server_url: Option<String>,
    /// Timeout in seconds.
    pub timeout: Option<u64>,
}

//! Environment configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use comment_api::url::DEFAULT_BASE_URL;
use comment_api::CommentApiConfig;
use thiserror::Error;

pub const ENV_BASE_URL: &str = "CODE_COMMENTER_BASE_URL";
pub const ENV_TIMEOUT_SEC: &str = "CODE_COMMENTER_TIMEOUT_SEC";
pub const ENV_LOG: &str = "CODE_COMMENTER_LOG";
pub const ENV_LOG_FILE: &str = "CODE_COMMENTER_LOG_FILE";
pub const ENV_DEBUG: &str = "CODE_COMMENTER_DEBUG";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a positive number of seconds, got '{value}'")]
    InvalidTimeout { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub log_filter: Option<String>,
    pub log_file: Option<PathBuf>,
    pub debug: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            log_filter: None,
            log_file: None,
            debug: false,
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string_opt = |key: &str| {
            lookup(key).and_then(|value| {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
        };

        let timeout = match string_opt(ENV_TIMEOUT_SEC) {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };

        Ok(Self {
            base_url: string_opt(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout,
            log_filter: string_opt(ENV_LOG),
            log_file: string_opt(ENV_LOG_FILE).map(PathBuf::from),
            debug: lookup(ENV_DEBUG).is_some_and(|value| value == "1"),
        })
    }

    /// The tracing filter directive: explicit filter, else `debug` when the debug
    /// flag is set, else `warn`.
    pub fn effective_log_filter(&self) -> &str {
        match (&self.log_filter, self.debug) {
            (Some(filter), _) => filter.as_str(),
            (None, true) => "debug",
            (None, false) => "warn",
        }
    }

    pub fn api_config(&self) -> CommentApiConfig {
        let config = CommentApiConfig::new(&self.base_url);
        match self.timeout {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            key: ENV_TIMEOUT_SEC,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, OnceLock};

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = EnvConfig::from_lookup(lookup_from(&[])).expect("config");
        assert_eq!(config, EnvConfig::default());
        assert_eq!(config.effective_log_filter(), "warn");
        assert!(config.api_config().timeout.is_none());
    }

    #[test]
    fn values_are_read_and_trimmed() {
        let config = EnvConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, " http://comments.local:9000 "),
            (ENV_TIMEOUT_SEC, "45"),
            (ENV_LOG, "code_commenter=trace"),
            (ENV_LOG_FILE, "/tmp/commenter.log"),
            (ENV_DEBUG, "1"),
        ]))
        .expect("config");

        assert_eq!(config.base_url, "http://comments.local:9000");
        assert_eq!(config.timeout, Some(Duration::from_secs(45)));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/commenter.log")));
        assert!(config.debug);
        assert_eq!(config.effective_log_filter(), "code_commenter=trace");

        let api = config.api_config();
        assert_eq!(api.base_url, "http://comments.local:9000");
        assert_eq!(api.timeout, Some(Duration::from_secs(45)));
    }

    #[test]
    fn debug_flag_raises_default_filter() {
        let config = EnvConfig::from_lookup(lookup_from(&[(ENV_DEBUG, "1")])).expect("config");
        assert_eq!(config.effective_log_filter(), "debug");
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = EnvConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "   "),
            (ENV_TIMEOUT_SEC, ""),
            (ENV_LOG_FILE, ""),
        ]))
        .expect("config");
        assert_eq!(config, EnvConfig::default());
    }

    #[test]
    fn invalid_timeouts_are_rejected() {
        for raw in ["0", "-3", "soon", "1.5"] {
            let error = EnvConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SEC, raw)]))
                .expect_err("timeout should be rejected");
            assert_eq!(
                error,
                ConfigError::InvalidTimeout {
                    key: ENV_TIMEOUT_SEC,
                    value: raw.to_string(),
                }
            );
        }
    }

    #[test]
    fn from_env_reads_process_environment() {
        let _lock = env_lock();
        let _g1 = set_env_guard(ENV_BASE_URL, Some("http://from-env:1234"));
        let _g2 = set_env_guard(ENV_TIMEOUT_SEC, None);
        let _g3 = set_env_guard(ENV_DEBUG, Some("0"));

        let config = EnvConfig::from_env().expect("config");
        assert_eq!(config.base_url, "http://from-env:1234");
        assert!(config.timeout.is_none());
        assert!(!config.debug);
    }
}

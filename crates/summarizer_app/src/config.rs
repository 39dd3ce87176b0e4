//! Client configuration read from an optional RON file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use summarizer_core::SubmissionPolicy;
use summarizer_engine::ExecutorSettings;
use summarizer_logging::{summarizer_debug, summarizer_info};

pub const DEFAULT_CONFIG_FILENAME: &str = "summarizer.ron";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub service_url: String,
    pub text_timeout_ms: u64,
    pub file_timeout_ms: u64,
    pub connect_timeout_ms: u64,
    pub max_file_bytes: u64,
    pub max_response_bytes: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let policy = SubmissionPolicy::default();
        let settings = ExecutorSettings::default();
        Self {
            service_url: policy.service_url,
            text_timeout_ms: millis(policy.text_timeout),
            file_timeout_ms: millis(policy.file_timeout),
            connect_timeout_ms: millis(settings.connect_timeout),
            max_file_bytes: policy.max_file_bytes,
            max_response_bytes: settings.max_response_bytes,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("config field {field} must be greater than zero")]
    Zero { field: &'static str },
}

impl ClientConfig {
    pub fn policy(&self) -> SubmissionPolicy {
        SubmissionPolicy {
            service_url: self.service_url.clone(),
            text_timeout: Duration::from_millis(self.text_timeout_ms),
            file_timeout: Duration::from_millis(self.file_timeout_ms),
            max_file_bytes: self.max_file_bytes,
        }
    }

    pub fn executor_settings(&self) -> ExecutorSettings {
        ExecutorSettings {
            base_url: self.service_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            max_response_bytes: self.max_response_bytes,
        }
    }

    fn check(self) -> Result<Self, ConfigError> {
        let fields = [
            ("text_timeout_ms", self.text_timeout_ms),
            ("file_timeout_ms", self.file_timeout_ms),
            ("connect_timeout_ms", self.connect_timeout_ms),
            ("max_file_bytes", self.max_file_bytes),
            ("max_response_bytes", self.max_response_bytes),
        ];
        match fields.into_iter().find(|(_, value)| *value == 0) {
            Some((field, _)) => Err(ConfigError::Zero { field }),
            None => Ok(self),
        }
    }
}

/// Load the config at `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            summarizer_debug!("No config at {:?}; using defaults", path);
            return Ok(ClientConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config: ClientConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    summarizer_info!("Loaded config from {:?}", path);
    config.check()
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir.path().join(DEFAULT_CONFIG_FILENAME)).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.policy(), SubmissionPolicy::default());
    }

    #[test]
    fn defaults_match_service_contract() {
        let config = ClientConfig::default();
        assert_eq!(config.service_url, "http://localhost:5000");
        assert_eq!(config.text_timeout_ms, 60_000);
        assert_eq!(config.file_timeout_ms, 120_000);
        assert_eq!(config.max_file_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_config(r#"(service_url: "http://summaries:8080", text_timeout_ms: 5000)"#);
        let config = load(file.path()).unwrap();

        assert_eq!(config.service_url, "http://summaries:8080");
        assert_eq!(config.text_timeout_ms, 5000);
        assert_eq!(config.file_timeout_ms, 120_000);

        let policy = config.policy();
        assert_eq!(policy.text_timeout, Duration::from_secs(5));
        assert_eq!(config.executor_settings().base_url, "http://summaries:8080");
    }

    #[test]
    fn unparsable_file_is_reported() {
        let file = write_config("(service_url: 42");
        assert!(matches!(load(file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let file = write_config("(file_timeout_ms: 0)");
        assert!(matches!(
            load(file.path()),
            Err(ConfigError::Zero {
                field: "file_timeout_ms"
            })
        ));
    }

    #[test]
    fn directory_path_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load(dir.path()), Err(ConfigError::Read { .. })));
    }
}

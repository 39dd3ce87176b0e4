use std::time::Duration;

use crate::{ErrorClassifier, FileValidator, InputMode, MAX_FILE_BYTES};

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5000";
pub const TEXT_TIMEOUT: Duration = Duration::from_millis(60_000);
pub const FILE_TIMEOUT: Duration = Duration::from_millis(120_000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPolicy {
    pub service_url: String,
    pub text_timeout: Duration,
    pub file_timeout: Duration,
    pub max_file_bytes: u64,
}

impl Default for SubmissionPolicy {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            text_timeout: TEXT_TIMEOUT,
            file_timeout: FILE_TIMEOUT,
            max_file_bytes: MAX_FILE_BYTES,
        }
    }
}

impl SubmissionPolicy {
    pub fn timeout_for(&self, mode: InputMode) -> Duration {
        match mode {
            InputMode::Text => self.text_timeout,
            InputMode::File => self.file_timeout,
        }
    }

    pub fn validator(&self) -> FileValidator {
        FileValidator::new(self.max_file_bytes)
    }

    pub fn classifier(&self) -> ErrorClassifier {
        ErrorClassifier::new(self.service_url.clone(), self.max_file_bytes)
    }
}

use crate::{FailureCause, InputMode, ValidationFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation(ValidationFailure),
    Timeout,
    Connectivity,
    ServerReported,
    Cancelled,
    /// Fallback for causes with no dedicated category.
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: ErrorCategory,
    pub message: String,
}

impl Classification {
    fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

/// Turns raw failures into a category plus a message fit for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorClassifier {
    service_url: String,
    max_file_bytes: u64,
}

impl ErrorClassifier {
    pub fn new(service_url: impl Into<String>, max_file_bytes: u64) -> Self {
        Self {
            service_url: service_url.into(),
            max_file_bytes,
        }
    }

    pub fn classify(&self, cause: &FailureCause, mode: InputMode) -> Classification {
        match cause {
            FailureCause::Timeout => Classification::new(
                ErrorCategory::Timeout,
                match mode {
                    InputMode::Text => {
                        "Request timed out. Please try with shorter text or try again later."
                    }
                    InputMode::File => {
                        "Request timed out. Large files or complex documents may take longer \
                         to process. Please try again or use a smaller file."
                    }
                },
            ),
            FailureCause::Network => Classification::new(
                ErrorCategory::Connectivity,
                format!(
                    "Cannot connect to server. Please make sure the service is reachable at {}",
                    self.service_url
                ),
            ),
            FailureCause::ConnectionLost => Classification::new(
                ErrorCategory::Connectivity,
                "Network error. Please check your connection and try again.",
            ),
            FailureCause::ServerError { code, message } => {
                let message = message.trim();
                if message.is_empty() {
                    Classification::new(ErrorCategory::ServerReported, format!("Server error: {code}"))
                } else {
                    Classification::new(ErrorCategory::ServerReported, message)
                }
            }
            FailureCause::MalformedResponse => Classification::new(
                ErrorCategory::ServerReported,
                "The server returned a response that could not be processed. Please try again.",
            ),
            FailureCause::Cancelled => {
                Classification::new(ErrorCategory::Cancelled, "The request was cancelled.")
            }
            FailureCause::Other(_) => Classification::new(
                ErrorCategory::Unexpected,
                match mode {
                    InputMode::Text => "An error occurred while processing text",
                    InputMode::File => "An error occurred while processing the file",
                },
            ),
        }
    }

    pub fn classify_validation(&self, failure: ValidationFailure) -> Classification {
        let message = match failure {
            ValidationFailure::Oversized => format!(
                "File too large. Maximum size is {}.",
                format_limit(self.max_file_bytes)
            ),
            ValidationFailure::UnsupportedType => {
                "Only .docx and .pdf files are supported".to_string()
            }
            ValidationFailure::Empty => {
                "File appears to be empty. Please select a valid file.".to_string()
            }
            ValidationFailure::Rejected => "File rejected. Please try another file.".to_string(),
        };
        Classification::new(ErrorCategory::Validation(failure), message)
    }
}

fn format_limit(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}

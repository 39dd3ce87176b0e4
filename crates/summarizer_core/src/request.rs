use std::time::Duration;

use crate::{FileDescriptor, InputMode};

pub type SubmissionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Generate,
    Upload,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Generate => "/api/generate",
            Endpoint::Upload => "/api/upload",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    File(FileDescriptor),
}

/// One outbound exchange: where it goes, what it carries, and how long it may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub endpoint: Endpoint,
    pub payload: Payload,
    pub timeout: Duration,
}

impl SubmissionRequest {
    pub fn text(text: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: Endpoint::Generate,
            payload: Payload::Text(text.into()),
            timeout,
        }
    }

    pub fn file(file: FileDescriptor, timeout: Duration) -> Self {
        Self {
            endpoint: Endpoint::Upload,
            payload: Payload::File(file),
            timeout,
        }
    }

    pub fn mode(&self) -> InputMode {
        match self.payload {
            Payload::Text(_) => InputMode::Text,
            Payload::File(_) => InputMode::File,
        }
    }
}

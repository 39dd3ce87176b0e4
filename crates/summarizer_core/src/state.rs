use std::time::Instant;

use crate::view_model::{AppViewModel, FileSummary};
use crate::{
    ErrorCategory, ErrorClassifier, FileDescriptor, InputMode, ResultData, SubmissionId,
    SubmissionPolicy,
};

/// Where the single submission currently stands. Terminal states persist until
/// a new submission supersedes them or the state is cleared.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LifecycleState {
    #[default]
    Idle,
    Validating {
        submission_id: SubmissionId,
    },
    Submitting {
        submission_id: SubmissionId,
        mode: InputMode,
        started_at: Instant,
        deadline: Instant,
    },
    Succeeded(ResultData),
    Failed {
        category: ErrorCategory,
        message: String,
    },
}

impl LifecycleState {
    /// Id of the in-flight submission, if any.
    pub fn active_submission(&self) -> Option<SubmissionId> {
        match self {
            LifecycleState::Validating { submission_id }
            | LifecycleState::Submitting { submission_id, .. } => Some(*submission_id),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active_submission().is_some()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LifecycleState::Succeeded(_) | LifecycleState::Failed { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    policy: SubmissionPolicy,
    classifier: ErrorClassifier,
    mode: InputMode,
    lifecycle: LifecycleState,
    current_file: Option<FileDescriptor>,
    last_submission_id: SubmissionId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SubmissionPolicy::default())
    }
}

impl AppState {
    pub fn new(policy: SubmissionPolicy) -> Self {
        Self {
            classifier: policy.classifier(),
            policy,
            mode: InputMode::default(),
            lifecycle: LifecycleState::Idle,
            current_file: None,
            last_submission_id: 0,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            mode: self.mode,
            lifecycle: self.lifecycle.clone(),
            current_file: self.current_file.as_ref().map(|file| FileSummary {
                name: file.name.clone(),
                size_bytes: file.size_bytes,
            }),
            busy: self.lifecycle.is_active(),
            dirty: self.dirty,
        }
    }

    pub fn lifecycle(&self) -> &LifecycleState {
        &self.lifecycle
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn current_file(&self) -> Option<&FileDescriptor> {
        self.current_file.as_ref()
    }

    pub fn policy(&self) -> &SubmissionPolicy {
        &self.policy
    }

    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn next_submission_id(&mut self) -> SubmissionId {
        self.last_submission_id += 1;
        self.last_submission_id
    }

    pub(crate) fn set_lifecycle(&mut self, lifecycle: LifecycleState) {
        if self.lifecycle != lifecycle {
            self.lifecycle = lifecycle;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_mode(&mut self, mode: InputMode) {
        if self.mode != mode {
            self.mode = mode;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_current_file(&mut self, file: Option<FileDescriptor>) {
        if self.current_file != file {
            self.current_file = file;
            self.mark_dirty();
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User asked to summarize the given input.
    Submit {
        input: crate::SubmissionInput,
        at: Instant,
    },
    /// Result of the local file check for a submission.
    FileValidated {
        submission_id: crate::SubmissionId,
        result: crate::ValidationResult,
        at: Instant,
    },
    /// The exchange for a submission finished, one way or another.
    RequestSettled {
        submission_id: crate::SubmissionId,
        outcome: crate::RequestOutcome,
    },
    /// User switched between text and file input.
    ModeSelected(crate::InputMode),
    /// User picked a file; it replaces any previous one.
    FileSelected(crate::FileDescriptor),
    /// User removed the current file.
    FileRemoved,
    /// Abort whatever is in flight and go back to idle.
    CancelActive,
    /// Dismiss the result or error and forget the current file.
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ValidateFile {
        submission_id: crate::SubmissionId,
        file: crate::FileDescriptor,
    },
    Execute {
        submission_id: crate::SubmissionId,
        request: crate::SubmissionRequest,
    },
    Cancel {
        submission_id: crate::SubmissionId,
    },
}

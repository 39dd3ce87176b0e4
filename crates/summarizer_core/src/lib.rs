//! Summarizer core: pure submission state machine, file validation and error classification.
mod classify;
mod effect;
mod input;
mod msg;
mod outcome;
mod policy;
mod request;
mod state;
mod update;
mod validate;
mod view_model;

pub use classify::{Classification, ErrorCategory, ErrorClassifier};
pub use effect::Effect;
pub use input::{extension_of, mime_for_extension, FileDescriptor, InputMode, SubmissionInput};
pub use msg::Msg;
pub use outcome::{FailureCause, RequestOutcome, ResultData};
pub use policy::{SubmissionPolicy, DEFAULT_SERVICE_URL, FILE_TIMEOUT, TEXT_TIMEOUT};
pub use request::{Endpoint, Payload, SubmissionId, SubmissionRequest};
pub use state::{AppState, LifecycleState};
pub use update::update;
pub use validate::{
    FileValidator, ValidationFailure, ValidationResult, ALLOWED_EXTENSIONS, MAX_FILE_BYTES,
};
pub use view_model::{AppViewModel, FileSummary};

//! Summarizer engine: HTTP exchange with the summarization service and the
//! controller that runs core effects.
mod controller;
mod executor;
mod wire;

pub use controller::{ControllerError, SubmissionController};
pub use executor::{Executor, ExecutorError, ExecutorSettings, ReqwestExecutor};

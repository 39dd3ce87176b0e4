use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use summarizer_core::{
    update, AppState, AppViewModel, Effect, FileDescriptor, FileValidator, InputMode,
    LifecycleState, Msg, Payload, SubmissionId, SubmissionInput, SubmissionPolicy,
    SubmissionRequest,
};
use summarizer_logging::{log_preview, summarizer_debug, summarizer_info, summarizer_warn};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{Executor, ExecutorError, ExecutorSettings, ReqwestExecutor};

const LOG_PREVIEW_CHARS: usize = 48;

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("a tokio runtime is required to drive submissions")]
    NoRuntime,
    #[error("no file selected")]
    NoFileSelected,
    #[error(transparent)]
    Executor(#[from] ExecutorError),
}

struct ActiveExchange {
    submission_id: SubmissionId,
    cancel: CancellationToken,
}

struct Shared {
    executor: Arc<dyn Executor>,
    validator: FileValidator,
    runtime: Handle,
    state: Mutex<AppState>,
    active: Mutex<Option<ActiveExchange>>,
    lifecycle_tx: watch::Sender<LifecycleState>,
}

/// Owns the lifecycle of the single submission and drives it through the executor.
///
/// Cloning yields another handle to the same controller. The presentation layer
/// reads state through [`SubmissionController::view`] or
/// [`SubmissionController::subscribe`] and never mutates it directly.
#[derive(Clone)]
pub struct SubmissionController {
    shared: Arc<Shared>,
}

impl SubmissionController {
    /// Must be called from within a Tokio runtime; exchanges are spawned onto it.
    pub fn new(
        executor: Arc<dyn Executor>,
        policy: SubmissionPolicy,
    ) -> Result<Self, ControllerError> {
        let runtime = Handle::try_current().map_err(|_| ControllerError::NoRuntime)?;
        let (lifecycle_tx, _) = watch::channel(LifecycleState::Idle);
        Ok(Self {
            shared: Arc::new(Shared {
                executor,
                validator: policy.validator(),
                runtime,
                state: Mutex::new(AppState::new(policy)),
                active: Mutex::new(None),
                lifecycle_tx,
            }),
        })
    }

    /// Controller talking HTTP to the service named in `settings`.
    pub fn with_reqwest(
        settings: ExecutorSettings,
        policy: SubmissionPolicy,
    ) -> Result<Self, ControllerError> {
        let executor = ReqwestExecutor::new(settings)?;
        Self::new(Arc::new(executor), policy)
    }

    pub fn submit(&self, input: SubmissionInput) {
        self.shared.dispatch(Msg::Submit {
            input,
            at: Instant::now(),
        });
    }

    pub fn submit_text(&self, text: impl Into<String>) {
        self.submit(SubmissionInput::Text(text.into()));
    }

    pub fn submit_current_file(&self) -> Result<(), ControllerError> {
        let file = lock(&self.shared.state)
            .current_file()
            .cloned()
            .ok_or(ControllerError::NoFileSelected)?;
        self.submit(SubmissionInput::File(file));
        Ok(())
    }

    pub fn select_mode(&self, mode: InputMode) {
        self.shared.dispatch(Msg::ModeSelected(mode));
    }

    pub fn select_file(&self, file: FileDescriptor) {
        self.shared.dispatch(Msg::FileSelected(file));
    }

    pub fn remove_file(&self) {
        self.shared.dispatch(Msg::FileRemoved);
    }

    pub fn cancel_active(&self) {
        self.shared.dispatch(Msg::CancelActive);
    }

    pub fn clear(&self) {
        self.shared.dispatch(Msg::Clear);
    }

    pub fn lifecycle(&self) -> LifecycleState {
        lock(&self.shared.state).lifecycle().clone()
    }

    pub fn view(&self) -> AppViewModel {
        lock(&self.shared.state).view()
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.shared.lifecycle_tx.subscribe()
    }

    /// Whether an exchange is still registered as running.
    pub fn has_exchange_in_flight(&self) -> bool {
        lock(&self.shared.active).is_some()
    }

    /// Waits until no submission is validating or submitting, and returns that state.
    pub async fn settled(&self) -> LifecycleState {
        let mut rx = self.subscribe();
        loop {
            let current = rx.borrow_and_update().clone();
            if !current.is_active() {
                return current;
            }
            if rx.changed().await.is_err() {
                return self.lifecycle();
            }
        }
    }
}

impl Shared {
    fn dispatch(self: &Arc<Self>, msg: Msg) {
        let effects = {
            let mut guard = lock(&self.state);
            let state = std::mem::take(&mut *guard);
            let (mut state, effects) = update(state, msg);
            if state.consume_dirty() {
                let lifecycle = state.lifecycle();
                self.lifecycle_tx.send_if_modified(|published| {
                    if *published == *lifecycle {
                        false
                    } else {
                        *published = lifecycle.clone();
                        true
                    }
                });
            }
            *guard = state;
            effects
        };

        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(self: &Arc<Self>, effect: Effect) {
        match effect {
            Effect::ValidateFile {
                submission_id,
                file,
            } => {
                let result = self.validator.validate(&file);
                match &result {
                    Ok(()) => summarizer_debug!(
                        "Submission {} file {:?} ({} bytes) passed validation",
                        submission_id,
                        file.name,
                        file.size_bytes
                    ),
                    Err(failure) => summarizer_warn!(
                        "Submission {} file {:?} ({} bytes) rejected: {}",
                        submission_id,
                        file.name,
                        file.size_bytes,
                        failure
                    ),
                }
                self.dispatch(Msg::FileValidated {
                    submission_id,
                    result,
                    at: Instant::now(),
                });
            }
            Effect::Execute {
                submission_id,
                request,
            } => self.start_exchange(submission_id, request),
            Effect::Cancel { submission_id } => self.cancel_exchange(submission_id),
        }
    }

    fn start_exchange(self: &Arc<Self>, submission_id: SubmissionId, request: SubmissionRequest) {
        let cancel = CancellationToken::new();
        {
            // Effects of concurrent dispatches may run out of order. Checking the
            // state while holding `active` keeps a superseded submission from
            // registering after its successor or after a cancel.
            let mut active = lock(&self.active);
            let current = lock(&self.state).lifecycle().active_submission();
            if current != Some(submission_id) {
                summarizer_debug!(
                    "Submission {} superseded before its exchange started",
                    submission_id
                );
                return;
            }
            let replaced = active.replace(ActiveExchange {
                submission_id,
                cancel: cancel.clone(),
            });
            if let Some(previous) = replaced {
                // Only ever an older submission, given the check above.
                previous.cancel.cancel();
            }
        }

        match &request.payload {
            Payload::Text(text) => summarizer_info!(
                "Submission {} -> {} text={:?} timeout={:?}",
                submission_id,
                request.endpoint.path(),
                log_preview(text, LOG_PREVIEW_CHARS),
                request.timeout
            ),
            Payload::File(file) => summarizer_info!(
                "Submission {} -> {} file={:?} bytes={} timeout={:?}",
                submission_id,
                request.endpoint.path(),
                file.name,
                file.size_bytes,
                request.timeout
            ),
        }

        let shared = Arc::clone(self);
        self.runtime.spawn(async move {
            let outcome = shared.executor.execute(&request, cancel).await;
            shared.finish_exchange(submission_id);
            if let Err(cause) = &outcome {
                summarizer_info!("Submission {} settled with {}", submission_id, cause);
            }
            if lock(&shared.state).lifecycle().active_submission() != Some(submission_id) {
                summarizer_debug!("Submission {} outcome arrived late; discarding", submission_id);
            }
            shared.dispatch(Msg::RequestSettled {
                submission_id,
                outcome,
            });
        });
    }

    fn cancel_exchange(&self, submission_id: SubmissionId) {
        let mut active = lock(&self.active);
        match active.as_ref() {
            Some(exchange) if exchange.submission_id == submission_id => {
                exchange.cancel.cancel();
                *active = None;
                summarizer_info!("Submission {} cancelled", submission_id);
            }
            _ => summarizer_debug!(
                "Submission {} had no exchange to cancel",
                submission_id
            ),
        }
    }

    fn finish_exchange(&self, submission_id: SubmissionId) {
        let mut active = lock(&self.active);
        if active
            .as_ref()
            .is_some_and(|exchange| exchange.submission_id == submission_id)
        {
            *active = None;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

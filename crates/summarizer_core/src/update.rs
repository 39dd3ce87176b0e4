use std::time::Instant;

use crate::{
    AppState, Effect, InputMode, LifecycleState, Msg, RequestOutcome,
    SubmissionId, SubmissionInput, SubmissionRequest, ValidationResult,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Submit { input, at } => submit(&mut state, input, at),
        Msg::FileValidated {
            submission_id,
            result,
            at,
        } => file_validated(&mut state, submission_id, result, at),
        Msg::RequestSettled {
            submission_id,
            outcome,
        } => {
            request_settled(&mut state, submission_id, outcome);
            Vec::new()
        }
        Msg::ModeSelected(mode) => {
            if mode == state.mode() {
                return (state, Vec::new());
            }
            let effects = reset_to_idle(&mut state);
            if mode == InputMode::Text {
                state.set_current_file(None);
            }
            state.set_mode(mode);
            effects
        }
        Msg::FileSelected(file) => {
            // A new file replaces the old one entirely, including any submission made with it.
            let effects = if state.mode() != InputMode::File || state.lifecycle().is_active() {
                reset_to_idle(&mut state)
            } else {
                Vec::new()
            };
            state.set_mode(InputMode::File);
            state.set_current_file(Some(file));
            effects
        }
        Msg::FileRemoved => {
            let effects = if state.lifecycle().is_active() && state.mode() == InputMode::File {
                reset_to_idle(&mut state)
            } else {
                Vec::new()
            };
            state.set_current_file(None);
            effects
        }
        Msg::CancelActive => reset_to_idle(&mut state),
        Msg::Clear => {
            let effects = reset_to_idle(&mut state);
            state.set_current_file(None);
            effects
        }
    };

    (state, effects)
}

fn submit(state: &mut AppState, input: SubmissionInput, at: Instant) -> Vec<Effect> {
    if let SubmissionInput::Text(text) = &input {
        if text.trim().is_empty() {
            return Vec::new();
        }
    }

    // Only one submission may be in flight: the previous one is cancelled first.
    let mut effects = Vec::with_capacity(2);
    if let Some(previous) = state.lifecycle().active_submission() {
        effects.push(Effect::Cancel {
            submission_id: previous,
        });
    }

    let submission_id = state.next_submission_id();
    state.set_mode(input.mode());
    match input {
        SubmissionInput::Text(text) => {
            // Text mode never keeps a file around, however it was entered.
            state.set_current_file(None);
            let timeout = state.policy().text_timeout;
            effects.push(start_exchange(
                state,
                submission_id,
                SubmissionRequest::text(text, timeout),
                at,
            ));
        }
        SubmissionInput::File(file) => {
            state.set_current_file(Some(file.clone()));
            state.set_lifecycle(LifecycleState::Validating { submission_id });
            effects.push(Effect::ValidateFile {
                submission_id,
                file,
            });
        }
    }
    effects
}

fn file_validated(
    state: &mut AppState,
    submission_id: SubmissionId,
    result: ValidationResult,
    at: Instant,
) -> Vec<Effect> {
    let is_current = matches!(
        state.lifecycle(),
        LifecycleState::Validating { submission_id: current } if *current == submission_id
    );
    if !is_current {
        return Vec::new();
    }

    match result {
        Ok(()) => {
            let Some(file) = state.current_file().cloned() else {
                state.set_lifecycle(LifecycleState::Idle);
                return Vec::new();
            };
            let timeout = state.policy().file_timeout;
            vec![start_exchange(
                state,
                submission_id,
                SubmissionRequest::file(file, timeout),
                at,
            )]
        }
        Err(failure) => {
            let classification = state.classifier().classify_validation(failure);
            state.set_lifecycle(LifecycleState::Failed {
                category: classification.category,
                message: classification.message,
            });
            Vec::new()
        }
    }
}

fn request_settled(state: &mut AppState, submission_id: SubmissionId, outcome: RequestOutcome) {
    let mode = match state.lifecycle() {
        LifecycleState::Submitting {
            submission_id: current,
            mode,
            ..
        } if *current == submission_id => *mode,
        // Late outcome of a superseded or cancelled submission.
        _ => return,
    };

    match outcome {
        Ok(data) => state.set_lifecycle(LifecycleState::Succeeded(data)),
        Err(cause) => {
            let classification = state.classifier().classify(&cause, mode);
            state.set_lifecycle(LifecycleState::Failed {
                category: classification.category,
                message: classification.message,
            });
        }
    }
}

fn reset_to_idle(state: &mut AppState) -> Vec<Effect> {
    let effects = match state.lifecycle().active_submission() {
        Some(submission_id) => vec![Effect::Cancel { submission_id }],
        None => Vec::new(),
    };
    state.set_lifecycle(LifecycleState::Idle);
    effects
}

fn start_exchange(
    state: &mut AppState,
    submission_id: SubmissionId,
    request: SubmissionRequest,
    at: Instant,
) -> Effect {
    state.set_lifecycle(LifecycleState::Submitting {
        submission_id,
        mode: request.mode(),
        started_at: at,
        deadline: at + request.timeout,
    });
    Effect::Execute {
        submission_id,
        request,
    }
}

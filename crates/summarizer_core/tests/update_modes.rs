use std::time::Instant;

use summarizer_core::{
    update, AppState, Effect, FailureCause, FileDescriptor, FileSummary, InputMode,
    LifecycleState, Msg, SubmissionInput,
};

fn submit_text(state: AppState, text: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::Submit {
            input: SubmissionInput::Text(text.to_string()),
            at: Instant::now(),
        },
    )
}

fn failed_text_state() -> AppState {
    let (state, _) = submit_text(AppState::default(), "hello");
    let (state, _) = update(
        state,
        Msg::RequestSettled {
            submission_id: 1,
            outcome: Err(FailureCause::Network),
        },
    );
    assert!(state.lifecycle().is_terminal());
    state
}

#[test]
fn cancel_active_returns_to_idle_and_cancels_exchange() {
    let (state, _) = submit_text(AppState::default(), "hello");
    let (state, effects) = update(state, Msg::CancelActive);

    assert_eq!(state.lifecycle(), &LifecycleState::Idle);
    assert_eq!(effects, vec![Effect::Cancel { submission_id: 1 }]);

    // The cancelled exchange reporting back later changes nothing.
    let (state, _) = update(
        state,
        Msg::RequestSettled {
            submission_id: 1,
            outcome: Err(FailureCause::Cancelled),
        },
    );
    assert_eq!(state.lifecycle(), &LifecycleState::Idle);
}

#[test]
fn cancel_active_from_terminal_state_goes_idle_without_effects() {
    let (state, effects) = update(failed_text_state(), Msg::CancelActive);
    assert_eq!(state.lifecycle(), &LifecycleState::Idle);
    assert!(effects.is_empty());
}

#[test]
fn switching_mode_discards_terminal_state() {
    let (mut state, effects) = update(failed_text_state(), Msg::ModeSelected(InputMode::File));

    assert_eq!(state.mode(), InputMode::File);
    assert_eq!(state.lifecycle(), &LifecycleState::Idle);
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
}

#[test]
fn switching_mode_cancels_in_flight_submission() {
    let (state, _) = submit_text(AppState::default(), "hello");
    let (state, effects) = update(state, Msg::ModeSelected(InputMode::File));

    assert_eq!(state.lifecycle(), &LifecycleState::Idle);
    assert_eq!(effects, vec![Effect::Cancel { submission_id: 1 }]);
}

#[test]
fn selecting_the_active_mode_keeps_state() {
    let state = failed_text_state();
    let before = state.lifecycle().clone();
    let (mut state, effects) = update(state, Msg::ModeSelected(InputMode::Text));

    assert_eq!(state.lifecycle(), &before);
    assert!(effects.is_empty());
    state.consume_dirty();
    assert!(!state.consume_dirty());
}

#[test]
fn selected_file_replaces_previous_one() {
    let (state, _) = update(
        AppState::default(),
        Msg::FileSelected(FileDescriptor::metadata_only("first.pdf", 10)),
    );
    let (state, _) = update(
        state,
        Msg::FileSelected(FileDescriptor::metadata_only("second.docx", 20)),
    );

    assert_eq!(state.mode(), InputMode::File);
    assert_eq!(
        state.view().current_file,
        Some(FileSummary {
            name: "second.docx".to_string(),
            size_bytes: 20,
        })
    );
}

#[test]
fn switching_to_text_forgets_the_current_file() {
    let (state, _) = update(
        AppState::default(),
        Msg::FileSelected(FileDescriptor::metadata_only("paper.pdf", 10)),
    );
    let (state, _) = update(state, Msg::ModeSelected(InputMode::Text));
    assert!(state.current_file().is_none());
}

#[test]
fn submitting_text_from_file_mode_forgets_the_current_file() {
    let (state, _) = update(
        AppState::default(),
        Msg::FileSelected(FileDescriptor::metadata_only("paper.pdf", 10)),
    );
    assert_eq!(state.mode(), InputMode::File);

    let (state, effects) = submit_text(state, "pasted article");

    assert_eq!(state.mode(), InputMode::Text);
    assert!(state.current_file().is_none());
    assert!(state.view().current_file.is_none());
    assert!(matches!(
        effects.as_slice(),
        [Effect::Execute {
            submission_id: 1,
            ..
        }]
    ));
}

#[test]
fn selecting_a_file_while_uploading_cancels_the_upload() {
    let file = FileDescriptor::metadata_only("paper.pdf", 10);
    let (state, _) = update(
        AppState::default(),
        Msg::Submit {
            input: SubmissionInput::File(file),
            at: Instant::now(),
        },
    );
    let (state, effects) = update(
        state,
        Msg::FileSelected(FileDescriptor::metadata_only("other.pdf", 10)),
    );

    assert_eq!(effects, vec![Effect::Cancel { submission_id: 1 }]);
    assert_eq!(state.lifecycle(), &LifecycleState::Idle);
    assert_eq!(state.current_file().map(|f| f.name.as_str()), Some("other.pdf"));
}

#[test]
fn clear_resets_lifecycle_and_file() {
    let (state, _) = update(
        AppState::default(),
        Msg::FileSelected(FileDescriptor::metadata_only("paper.pdf", 10)),
    );
    let (state, _) = update(
        state,
        Msg::Submit {
            input: SubmissionInput::File(FileDescriptor::metadata_only("paper.pdf", 10)),
            at: Instant::now(),
        },
    );
    let (state, effects) = update(state, Msg::Clear);

    assert_eq!(effects, vec![Effect::Cancel { submission_id: 1 }]);
    assert_eq!(state.lifecycle(), &LifecycleState::Idle);
    assert!(state.current_file().is_none());
    assert!(!state.view().busy);
}

#[test]
fn removing_the_file_stays_in_file_mode() {
    let (state, _) = update(
        AppState::default(),
        Msg::FileSelected(FileDescriptor::metadata_only("paper.pdf", 10)),
    );
    let (state, effects) = update(state, Msg::FileRemoved);
    assert!(effects.is_empty());
    assert!(state.current_file().is_none());
    assert_eq!(state.mode(), InputMode::File);
}

use crate::{InputMode, LifecycleState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub name: String,
    pub size_bytes: u64,
}

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub mode: InputMode,
    pub lifecycle: LifecycleState,
    pub current_file: Option<FileSummary>,
    pub busy: bool,
    pub dirty: bool,
}

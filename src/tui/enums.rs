//! Enumerations for TUI state management.

/// Application state for the terminal user interface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    TaskList,
    AddTask,
    EditTask,
    Filters,
    Help,
    Confirm,
}

/// Input mode for text entry fields.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    None,
    Text,
}

/// A destructive action waiting for confirmation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ConfirmAction {
    DeleteTask { id: u64, title: String },
    DeleteAll,
}

impl ConfirmAction {
    /// Heading for the confirmation dialog.
    pub fn title(&self) -> &'static str {
        match self {
            ConfirmAction::DeleteTask { .. } => "Delete task?",
            ConfirmAction::DeleteAll => "Delete all tasks?",
        }
    }

    /// Body text for the confirmation dialog.
    pub fn description(&self) -> String {
        match self {
            ConfirmAction::DeleteTask { title, .. } => format!("This will permanently delete \"{title}\"."),
            ConfirmAction::DeleteAll => {
                "This action cannot be undone. This will permanently delete all your tasks.".to_string()
            }
        }
    }
}

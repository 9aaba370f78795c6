//! Task form handling for the terminal user interface.
//!
//! This module provides the `TaskForm` used by both the create and the edit
//! dialog. Fields are visited in a fixed order; the priority field is a
//! selector cycled with the arrow keys rather than a text input.

use crate::{
    fields::Priority,
    task::{split_tags, Task, TaskInput},
    tui::input::InputField
};

/// Field order inside the task dialog.
pub const TITLE_ORDER: usize = 0;
pub const DESCRIPTION_ORDER: usize = 1;
pub const ASSIGNEE_ORDER: usize = 2;
pub const PRIORITY_ORDER: usize = 3;
pub const LOCATION_ORDER: usize = 4;
pub const TAGS_ORDER: usize = 5;

const FIELD_COUNT: usize = 6;

/// Task form for creating and editing tasks
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub assignee: InputField,
    pub location: InputField,
    pub tags: InputField,
    /// Index into `priorities`.
    pub priority: usize,
    pub priorities: Vec<Option<Priority>>,
    pub current_field: usize,
    /// Validation message shown under the title field.
    pub error: Option<String>,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskForm {
    /// Create an empty form with the title field focused.
    pub fn new() -> Self {
        let mut form = Self {
            title: InputField::new(),
            description: InputField::new(),
            assignee: InputField::new(),
            location: InputField::new(),
            tags: InputField::new(),
            priority: 0, // None
            priorities: vec![None, Some(Priority::Low), Some(Priority::Medium), Some(Priority::High)],
            current_field: TITLE_ORDER,
            error: None,
        };
        form.update_active_field();
        form
    }

    /// Create a form prefilled from an existing task.
    pub fn from_task(task: &Task) -> Self {
        let mut form = Self::new();
        form.title = InputField::with_value(&task.title);
        form.description = InputField::with_value(task.description.as_deref().unwrap_or_default());
        form.assignee = InputField::with_value(task.assignee.as_deref().unwrap_or_default());
        form.location = InputField::with_value(task.location.as_deref().unwrap_or_default());
        form.tags = InputField::with_value(&task.tags.join(", "));
        form.priority = form.priorities.iter().position(|&p| p == task.priority).unwrap_or(0);
        form.update_active_field();
        form
    }

    /// Collect the form into store input. Blank optional fields become absent.
    pub fn to_input(&self) -> TaskInput {
        TaskInput {
            title: self.title.value.trim().to_string(),
            description: self.description.optional(),
            assignee: self.assignee.optional(),
            priority: self.selected_priority(),
            location: self.location.optional(),
            tags: split_tags(&self.tags.value),
        }
    }

    pub fn selected_priority(&self) -> Option<Priority> {
        self.priorities.get(self.priority).copied().flatten()
    }

    /// The text input under focus, if the focused field is not a selector.
    fn current_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_ORDER => Some(&mut self.title),
            DESCRIPTION_ORDER => Some(&mut self.description),
            ASSIGNEE_ORDER => Some(&mut self.assignee),
            LOCATION_ORDER => Some(&mut self.location),
            TAGS_ORDER => Some(&mut self.tags),
            _ => None,
        }
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Mark only the focused text input as active.
    pub fn update_active_field(&mut self) {
        for field in [
            &mut self.title,
            &mut self.description,
            &mut self.assignee,
            &mut self.location,
            &mut self.tags,
        ] {
            field.active = false;
        }
        if let Some(field) = self.current_input() {
            field.active = true;
        }
    }

    /// Handle character input for the focused field.
    pub fn handle_char(&mut self, c: char) {
        if let Some(field) = self.current_input() {
            field.handle_char(c);
        }
        if self.current_field == TITLE_ORDER {
            self.error = None;
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(field) = self.current_input() {
            field.handle_backspace();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(field) = self.current_input() {
            field.handle_delete();
        }
    }

    /// Move the cursor, or cycle the priority selector.
    pub fn handle_left_right(&mut self, right: bool) {
        if self.current_field == PRIORITY_ORDER {
            let n = self.priorities.len();
            self.priority = if right { (self.priority + 1) % n } else { (self.priority + n - 1) % n };
            return;
        }
        if let Some(field) = self.current_input() {
            if right {
                field.move_cursor_right();
            } else {
                field.move_cursor_left();
            }
        }
    }

    /// Jump the cursor to the start or end of the focused text field.
    pub fn handle_home_end(&mut self, end: bool) {
        if let Some(field) = self.current_input() {
            if end {
                field.move_end();
            } else {
                field.move_home();
            }
        }
    }

    /// Validate before submission. On failure the title field is focused and
    /// `error` is set.
    pub fn validate(&mut self) -> bool {
        if self.title.value.trim().is_empty() {
            self.error = Some("Title is required".to_string());
            self.current_field = TITLE_ORDER;
            self.update_active_field();
            false
        } else {
            self.error = None;
            true
        }
    }
}

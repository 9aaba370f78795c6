//! Filter engine: derives the visible subset of tasks from filter criteria.

use crate::fields::{PriorityFilter, StatusFilter};
use crate::task::Task;

/// Active filter state. The default value matches every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the title.
    pub search: String,
    pub priority: PriorityFilter,
    /// Case-insensitive substring of the assignee; empty means no constraint.
    pub assignee: String,
    /// Case-insensitive substring of the location; empty means no constraint.
    pub location: String,
    pub completed: StatusFilter,
}

impl FilterCriteria {
    /// Whether any constraint differs from the default.
    pub fn is_active(&self) -> bool {
        *self != FilterCriteria::default()
    }

    /// Reset every constraint.
    pub fn clear(&mut self) {
        *self = FilterCriteria::default();
    }

    /// Whether a single task passes every constraint.
    pub fn matches(&self, task: &Task) -> bool {
        let search = self.search.to_lowercase();
        if !task.title.to_lowercase().contains(&search) {
            return false;
        }
        if let Some(p) = self.priority.priority() {
            if task.priority != Some(p) {
                return false;
            }
        }
        if !contains_ci(task.assignee.as_deref(), &self.assignee) {
            return false;
        }
        if !contains_ci(task.location.as_deref(), &self.location) {
            return false;
        }
        self.completed.matches(task.completed)
    }

    /// One-line description of the active constraints, e.g. `priority=high status=pending`.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.search.is_empty() {
            parts.push(format!("search='{}'", self.search));
        }
        if let Some(p) = self.priority.priority() {
            parts.push(format!("priority={p}"));
        }
        match self.completed {
            StatusFilter::All => {}
            StatusFilter::Completed => parts.push("status=completed".to_string()),
            StatusFilter::Pending => parts.push("status=pending".to_string()),
        }
        if !self.assignee.is_empty() {
            parts.push(format!("assignee='{}'", self.assignee));
        }
        if !self.location.is_empty() {
            parts.push(format!("location='{}'", self.location));
        }
        parts.join(" ")
    }
}

/// An empty needle always matches; otherwise the field must exist and contain it.
fn contains_ci(field: Option<&str>, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    field.is_some_and(|f| f.to_lowercase().contains(&needle.to_lowercase()))
}

/// Tasks passing `criteria`, in collection order.
pub fn apply<'a>(tasks: &'a [Task], criteria: &FilterCriteria) -> Vec<&'a Task> {
    tasks.iter().filter(|t| criteria.matches(t)).collect()
}

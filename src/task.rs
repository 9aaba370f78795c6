//! Task data structure and related functionality.
//!
//! This module defines the `Task` struct persisted in the store, the
//! `TaskInput` collected by create/edit forms, and the helpers that turn raw
//! form text into task fields.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::fields::{deserialize_priority, Priority};

/// Display format of [`Task::date`], e.g. `Oct 16, 2026`.
pub const DATE_FORMAT: &str = "%b %-d, %Y";

/// A single to-do item.
///
/// Field names match the persisted record; optional fields are omitted when
/// absent so the stored JSON stays compact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    pub date: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_priority"
    )]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub comments: u32,
    #[serde(default)]
    pub attachments: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// User-editable task fields, as entered in a create or edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub priority: Option<Priority>,
    pub location: Option<String>,
    pub tags: Vec<String>,
}

impl TaskInput {
    /// Create input with just a title.
    pub fn titled(title: &str) -> Self {
        TaskInput {
            title: title.to_string(),
            ..TaskInput::default()
        }
    }

    /// Prefill input from an existing task, for editing.
    pub fn from_task(task: &Task) -> Self {
        TaskInput {
            title: task.title.clone(),
            description: task.description.clone(),
            assignee: task.assignee.clone(),
            priority: task.priority,
            location: task.location.clone(),
            tags: task.tags.clone(),
        }
    }

    /// Trimmed title, or `None` when it is blank.
    pub fn valid_title(&self) -> Option<&str> {
        let t = self.title.trim();
        if t.is_empty() {
            None
        } else {
            Some(t)
        }
    }
}

impl Task {
    /// The built-in task a fresh store starts with.
    pub fn welcome(id: u64, date: String) -> Self {
        Task {
            id,
            title: "Welcome to your Todo List!".to_string(),
            description: Some(
                "Click 'New Task' to add more tasks, or 'Edit' to modify this one.".to_string(),
            ),
            assignee: None,
            date,
            priority: Some(Priority::Medium),
            location: None,
            comments: 0,
            attachments: 0,
            completed: false,
            tags: vec!["example".to_string()],
        }
    }

    /// Build a new, pending task from form input.
    ///
    /// The caller is responsible for validating the title first.
    pub fn from_input(id: u64, date: String, input: &TaskInput) -> Self {
        Task {
            id,
            title: input.title.trim().to_string(),
            description: non_empty(input.description.as_deref()),
            assignee: non_empty(input.assignee.as_deref()),
            date,
            priority: input.priority,
            location: non_empty(input.location.as_deref()),
            comments: 0,
            attachments: 0,
            completed: false,
            tags: input.tags.clone(),
        }
    }

    /// Replace the editable fields with `input`, keeping identity, counters and
    /// completion state, and stamping the edit date.
    pub fn apply_input(&mut self, date: String, input: &TaskInput) {
        self.title = input.title.trim().to_string();
        self.description = non_empty(input.description.as_deref());
        self.assignee = non_empty(input.assignee.as_deref());
        self.priority = input.priority;
        self.location = non_empty(input.location.as_deref());
        self.tags = input.tags.clone();
        self.date = date;
    }
}

/// Trim optional text, mapping blank values to `None`.
pub fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Split a comma-separated tag string, trimming pieces and dropping empty ones.
///
/// Order and case are preserved.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Format a timestamp the way tasks record their date.
pub fn format_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(DATE_FORMAT).to_string()
}

/// Today's date in task format.
pub fn today() -> String {
    format_date(&Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags("work, home ,, urgent"), vec!["work", "home", "urgent"]);
        assert_eq!(split_tags("  "), Vec::<String>::new());
        assert_eq!(split_tags(""), Vec::<String>::new());
        assert_eq!(split_tags("B,a,B"), vec!["B", "a", "B"]);
    }

    #[test]
    fn test_format_date() {
        let at = Utc.with_ymd_and_hms(2026, 3, 7, 12, 0, 0).unwrap();
        assert_eq!(format_date(&at), "Mar 7, 2026");
    }

    #[test]
    fn test_from_input_normalises_blank_fields() {
        let input = TaskInput {
            title: "  Buy milk ".to_string(),
            description: Some("   ".to_string()),
            assignee: Some(" Sam ".to_string()),
            priority: Some(Priority::High),
            location: None,
            tags: split_tags("shop, food"),
        };
        let task = Task::from_input(7, "Jan 1, 2026".to_string(), &input);
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, None);
        assert_eq!(task.assignee.as_deref(), Some("Sam"));
        assert!(!task.completed);
        assert_eq!(task.tags, vec!["shop", "food"]);
    }

    #[test]
    fn test_apply_input_keeps_identity_and_counters() {
        let mut task = Task::welcome(3, "Jan 1, 2026".to_string());
        task.comments = 4;
        task.attachments = 2;
        task.completed = true;
        task.apply_input("Feb 2, 2026".to_string(), &TaskInput::titled("Renamed"));
        assert_eq!(task.id, 3);
        assert_eq!(task.title, "Renamed");
        assert_eq!(task.comments, 4);
        assert_eq!(task.attachments, 2);
        assert!(task.completed);
        assert_eq!(task.priority, None);
        assert!(task.tags.is_empty());
        assert_eq!(task.date, "Feb 2, 2026");
    }

    #[test]
    fn test_serialisation_omits_absent_fields() {
        let task = Task::from_input(1, "Jan 1, 2026".to_string(), &TaskInput::titled("x"));
        let json = serde_json::to_value(&task).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("description"));
        assert!(!obj.contains_key("priority"));
        assert_eq!(obj["comments"], 0);
        assert_eq!(obj["tags"], serde_json::json!([]));
    }

    #[test]
    fn test_reads_records_from_older_front_end() {
        let raw = r#"[{
            "id": 1729080000000,
            "title": "Legacy",
            "description": "",
            "assignee": "",
            "date": "Oct 16, 2024",
            "priority": "",
            "location": "",
            "comments": 0,
            "attachments": 0,
            "completed": true,
            "tags": []
        }]"#;
        let tasks: Vec<Task> = serde_json::from_str(raw).unwrap();
        assert_eq!(tasks[0].id, 1729080000000);
        assert_eq!(tasks[0].priority, None);
        assert!(tasks[0].completed);
    }

    #[test]
    fn test_rejects_unknown_priority() {
        let raw = r#"{"id": 1, "title": "x", "date": "d", "priority": "urgent"}"#;
        assert!(serde_json::from_str::<Task>(raw).is_err());
    }

    #[test]
    fn test_round_trip() {
        let mut a = Task::welcome(1, "Jan 1, 2026".to_string());
        a.location = Some("Office".to_string());
        let b = Task::from_input(2, "Jan 2, 2026".to_string(), &TaskInput::titled("second"));
        let tasks = vec![a, b];
        let json = serde_json::to_string(&tasks).unwrap();
        let back: Vec<Task> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tasks);
    }
}

//! Enumerations and field types for tasks and filters.
//!
//! This module defines the priority scale attached to tasks and the selector
//! values the filter engine understands for priority and completion status.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

/// Priority classification for a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    #[serde(alias = "Low")]
    Low,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "High")]
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Lowercase name as stored and accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority selector for filtering: everything, or one exact priority.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Low,
    Medium,
    High,
}

impl PriorityFilter {
    /// The exact priority this selector requires, if any.
    pub fn priority(self) -> Option<Priority> {
        match self {
            PriorityFilter::All => None,
            PriorityFilter::Low => Some(Priority::Low),
            PriorityFilter::Medium => Some(Priority::Medium),
            PriorityFilter::High => Some(Priority::High),
        }
    }
}

impl From<Priority> for PriorityFilter {
    fn from(p: Priority) -> Self {
        match p {
            Priority::Low => PriorityFilter::Low,
            Priority::Medium => PriorityFilter::Medium,
            Priority::High => PriorityFilter::High,
        }
    }
}

/// Completion-status selector for filtering.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Completed, StatusFilter::Pending];

    /// Whether a task with the given completion flag passes this selector.
    pub fn matches(self, completed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => completed,
            StatusFilter::Pending => !completed,
        }
    }
}

/// Deserialise an optional priority, reading an empty string as absent.
///
/// Records written by older front-ends store an unset priority as `""`.
pub fn deserialize_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_priority(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::unknown_variant(s, &["low", "medium", "high"])),
    }
}

/// Parse a priority name case-insensitively.
pub fn parse_priority(s: &str) -> Option<Priority> {
    match s.trim().to_lowercase().as_str() {
        "low" => Some(Priority::Low),
        "medium" => Some(Priority::Medium),
        "high" => Some(Priority::High),
        _ => None,
    }
}

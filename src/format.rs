//! Display helpers shared by the CLI and the terminal UI.

use crate::fields::Priority;
use crate::task::Task;

/// Format an optional priority for display.
pub fn format_priority(p: Option<Priority>) -> &'static str {
    match p {
        Some(Priority::High) => "High",
        Some(Priority::Medium) => "Medium",
        Some(Priority::Low) => "Low",
        None => "-",
    }
}

/// Checkbox marker for a completion flag.
pub fn format_checkbox(completed: bool) -> &'static str {
    if completed {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Tags rendered as `@a @b`.
pub fn format_tags(tags: &[String]) -> String {
    tags.iter().map(|t| format!("@{t}")).collect::<Vec<_>>().join(" ")
}

/// `1 task total` / `3 tasks total`.
pub fn format_total(n: usize) -> String {
    format!("{} {} total", n, if n == 1 { "task" } else { "tasks" })
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[&Task]) {
    println!(
        "{:<6} {:<4} {:<7} {:<14} {:<13} {:<14} {}",
        "ID", "Done", "Pri", "Assignee", "Date", "Location", "Title [tags]"
    );
    for t in tasks {
        let tags = if t.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", format_tags(&t.tags))
        };
        println!(
            "{:<6} {:<4} {:<7} {:<14} {:<13} {:<14} {}{}",
            t.id,
            format_checkbox(t.completed),
            format_priority(t.priority),
            truncate(t.assignee.as_deref().unwrap_or("-"), 14),
            t.date,
            truncate(t.location.as_deref().unwrap_or("-"), 14),
            t.title,
            tags
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("a longer string", 6), "a lon…");
    }

    #[test]
    fn test_format_total() {
        assert_eq!(format_total(0), "0 tasks total");
        assert_eq!(format_total(1), "1 task total");
        assert_eq!(format_total(2), "2 tasks total");
    }

    #[test]
    fn test_format_tags() {
        assert_eq!(format_tags(&["a".to_string(), "b c".to_string()]), "@a @b c");
        assert_eq!(format_tags(&[]), "");
    }
}

//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Priority;

/// Used for high priority badges
pub const HIGH_RED: Color = Color::Rgb(239, 68, 68);
/// Used for medium priority badges
pub const MEDIUM_YELLOW: Color = Color::Rgb(234, 179, 8);
/// Used for low priority badges
pub const LOW_GREEN: Color = Color::Rgb(34, 197, 94);
/// Focused borders and the header
pub const ACCENT: Color = Color::Rgb(99, 102, 241);
/// Destructive notices and dialogs
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);

/// Badge colour for a priority.
pub fn priority_color(p: Option<Priority>) -> Color {
    match p {
        Some(Priority::High) => HIGH_RED,
        Some(Priority::Medium) => MEDIUM_YELLOW,
        Some(Priority::Low) => LOW_GREEN,
        None => Color::Gray,
    }
}

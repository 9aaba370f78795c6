//! Filter panel state.

use crate::{
    fields::{Priority, PriorityFilter, StatusFilter},
    filter::FilterCriteria,
    tui::input::InputField
};

pub const SEARCH_ORDER: usize = 0;
pub const PRIORITY_ORDER: usize = 1;
pub const STATUS_ORDER: usize = 2;
pub const ASSIGNEE_ORDER: usize = 3;
pub const LOCATION_ORDER: usize = 4;

const FIELD_COUNT: usize = 5;

const PRIORITY_CHOICES: [PriorityFilter; 4] = [
    PriorityFilter::All,
    PriorityFilter::Low,
    PriorityFilter::Medium,
    PriorityFilter::High,
];

#[derive(Debug, Clone, Default)]
pub struct FilterForm {
    pub search: InputField,
    pub assignee: InputField,
    pub location: InputField,
    pub priority: usize,
    pub status: usize,
    pub current_field: usize,
}

impl FilterForm {
    /// Load the form from the criteria currently in force.
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        let mut form = Self {
            search: InputField::with_value(&criteria.search),
            assignee: InputField::with_value(&criteria.assignee),
            location: InputField::with_value(&criteria.location),
            priority: PRIORITY_CHOICES.iter().position(|&p| p == criteria.priority).unwrap_or(0),
            status: StatusFilter::ALL.iter().position(|&s| s == criteria.completed).unwrap_or(0),
            current_field: SEARCH_ORDER,
        };
        form.update_active_field();
        form
    }

    /// Text fields are taken verbatim so partial input filters as it is typed.
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search: self.search.value.clone(),
            priority: PRIORITY_CHOICES[self.priority % PRIORITY_CHOICES.len()],
            assignee: self.assignee.value.clone(),
            location: self.location.value.clone(),
            completed: StatusFilter::ALL[self.status % StatusFilter::ALL.len()],
        }
    }

    pub fn priority_label(&self) -> &'static str {
        PRIORITY_CHOICES[self.priority % PRIORITY_CHOICES.len()]
            .priority()
            .map(Priority::as_str)
            .unwrap_or("all")
    }

    pub fn status_label(&self) -> &'static str {
        match StatusFilter::ALL[self.status % StatusFilter::ALL.len()] {
            StatusFilter::All => "all",
            StatusFilter::Completed => "completed",
            StatusFilter::Pending => "pending",
        }
    }

    fn current_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            SEARCH_ORDER => Some(&mut self.search),
            ASSIGNEE_ORDER => Some(&mut self.assignee),
            LOCATION_ORDER => Some(&mut self.location),
            _ => None,
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
        self.update_active_field();
    }

    fn update_active_field(&mut self) {
        self.search.active = false;
        self.assignee.active = false;
        self.location.active = false;
        if let Some(field) = self.current_input() {
            field.active = true;
        }
    }

    pub fn handle_char(&mut self, c: char) {
        if let Some(field) = self.current_input() {
            field.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(field) = self.current_input() {
            field.handle_backspace();
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

    /// Move the cursor, or cycle the focused selector.
    pub fn handle_left_right(&mut self, right: bool) {
        let step = |i: usize, n: usize| if right { (i + 1) % n } else { (i + n - 1) % n };
        match self.current_field {
            PRIORITY_ORDER => self.priority = step(self.priority, PRIORITY_CHOICES.len()),
            STATUS_ORDER => self.status = step(self.status, StatusFilter::ALL.len()),
            _ => {
                if let Some(field) = self.current_input() {
                    if right {
                        field.move_cursor_right();
                    } else {
                        field.move_cursor_left();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_round_trip() {
        let criteria = FilterCriteria {
            search: "milk".to_string(),
            priority: PriorityFilter::Medium,
            assignee: "al".to_string(),
            location: String::new(),
            completed: StatusFilter::Pending,
        };
        let form = FilterForm::from_criteria(&criteria);
        assert_eq!(form.priority_label(), "medium");
        assert_eq!(form.status_label(), "pending");
        assert_eq!(form.to_criteria(), criteria);
    }

    #[test]
    fn test_default_form_is_inactive() {
        let form = FilterForm::from_criteria(&FilterCriteria::default());
        assert!(!form.to_criteria().is_active());
        assert!(form.search.active);
    }

    #[test]
    fn test_selectors_cycle() {
        let mut form = FilterForm::default();
        form.current_field = STATUS_ORDER;
        form.handle_left_right(true);
        assert_eq!(form.to_criteria().completed, StatusFilter::Completed);
        form.prev_field();
        form.handle_left_right(false);
        assert_eq!(form.to_criteria().priority, PriorityFilter::High);
        form.handle_char('z');
        assert!(form.to_criteria().search.is_empty());
    }

    #[test]
    fn test_end_after_home() {
        let mut form = FilterForm::from_criteria(&FilterCriteria::default());
        form.handle_char('b');
        form.handle_home_end(false);
        form.handle_char('a');
        form.handle_home_end(true);
        form.handle_char('c');
        assert_eq!(form.to_criteria().search, "abc");
    }
}

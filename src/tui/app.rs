//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the task store and the
//! active filter, handles key presses, and renders the single-page layout:
//! a header with totals, the task table, and popups for the task form, the
//! filter panel, help and confirmation.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use tracing::debug;

use crate::{
    filter::{self, FilterCriteria},
    format::{format_checkbox, format_priority, format_tags, format_total},
    storage::KeyValueStore,
    store::{Effect, Notice, NoticeKind, Outcome, TaskStore},
    task::Task,
    tui::{
        colors::{priority_color, ACCENT, DARK_RED, MEDIUM_YELLOW},
        enums::{AppState, ConfirmAction, InputMode},
        filter_form::{self, FilterForm},
        input::InputField,
        task_form::{self, TaskForm},
        utils::centered_rect,
    },
};

/// Main application state for the terminal user interface.
pub struct App<S: KeyValueStore> {
    state: AppState,
    store: TaskStore<S>,
    criteria: FilterCriteria,
    task_list_state: TableState,
    /// Ids of the tasks passing `criteria`, in display order.
    filtered_tasks: Vec<u64>,
    /// Task being edited; `None` while creating.
    editing: Option<u64>,
    task_form: TaskForm,
    filter_form: FilterForm,
    input_mode: InputMode,
    notice: Option<Notice>,
    status_message: String,
    confirm_action: Option<ConfirmAction>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: TaskStore<S>) -> Self {
        let mut app = App {
            state: AppState::TaskList,
            store,
            criteria: FilterCriteria::default(),
            task_list_state: TableState::default(),
            filtered_tasks: Vec::new(),
            editing: None,
            task_form: TaskForm::new(),
            filter_form: FilterForm::default(),
            input_mode: InputMode::None,
            notice: None,
            status_message: String::new(),
            confirm_action: None,
        };
        app.notice = app.store.startup_notice();
        app.update_filtered_tasks();
        app
    }

    /// Recompute the visible rows, keeping the selection on the same task
    /// when it is still visible.
    fn update_filtered_tasks(&mut self) {
        let old_id = self.selected_task_id();
        let old_idx = self.task_list_state.selected();

        self.filtered_tasks = filter::apply(self.store.tasks(), &self.criteria)
            .iter()
            .map(|t| t.id)
            .collect();

        let selected = if self.filtered_tasks.is_empty() {
            None
        } else {
            old_id
                .and_then(|id| self.filtered_tasks.iter().position(|&x| x == id))
                .or_else(|| old_idx.map(|i| i.min(self.filtered_tasks.len() - 1)))
                .or(Some(0))
        };
        self.task_list_state.select(selected);
    }

    fn selected_task_id(&self) -> Option<u64> {
        self.task_list_state
            .selected()
            .and_then(|idx| self.filtered_tasks.get(idx))
            .copied()
    }

    fn selected_task(&self) -> Option<&Task> {
        self.selected_task_id().and_then(|id| self.store.get(id))
    }

    fn select_task(&mut self, id: u64) {
        if let Some(idx) = self.filtered_tasks.iter().position(|&x| x == id) {
            self.task_list_state.select(Some(idx));
        }
    }

    fn show_outcome(&mut self, outcome: Outcome) {
        debug!(effect = ?outcome.effect, "tui applied command");
        self.notice = Some(outcome.notice);
        self.update_filtered_tasks();
    }

    /// Copy the filter form into the active criteria and refresh the rows.
    fn apply_filter_form(&mut self) {
        self.criteria = self.filter_form.to_criteria();
        self.update_filtered_tasks();
    }

    /// Handle keyboard input in the task list view.
    ///
    /// Returns true if the application should quit.
    fn handle_task_list_input(&mut self, key: KeyCode, _modifiers: KeyModifiers) -> io::Result<bool> {
        if self.input_mode == InputMode::Text {
            match key {
                KeyCode::Esc => {
                    self.filter_form.search.clear();
                    self.input_mode = InputMode::None;
                    self.apply_filter_form();
                }
                KeyCode::Enter => {
                    self.input_mode = InputMode::None;
                    if !self.criteria.search.is_empty() {
                        self.status_message = format!(
                            "Search '{}' matches {} tasks",
                            self.criteria.search,
                            self.filtered_tasks.len()
                        );
                    }
                }
                KeyCode::Backspace => {
                    self.filter_form.search.handle_backspace();
                    self.apply_filter_form();
                }
                KeyCode::Left => self.filter_form.search.move_cursor_left(),
                KeyCode::Right => self.filter_form.search.move_cursor_right(),
                KeyCode::Home => self.filter_form.search.move_home(),
                KeyCode::End => self.filter_form.search.move_end(),
                KeyCode::Char(c) => {
                    self.filter_form.search.handle_char(c);
                    self.apply_filter_form();
                }
                _ => {}
            }
            return Ok(false);
        }

        match key {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Esc => {
                if self.criteria.is_active() {
                    self.criteria.clear();
                    self.update_filtered_tasks();
                    self.status_message = "Filters cleared".to_string();
                } else {
                    return Ok(true);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(selected) = self.task_list_state.selected() {
                    if selected > 0 {
                        self.task_list_state.select(Some(selected - 1));
                    }
                } else if !self.filtered_tasks.is_empty() {
                    self.task_list_state.select(Some(0));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(selected) = self.task_list_state.selected() {
                    if selected + 1 < self.filtered_tasks.len() {
                        self.task_list_state.select(Some(selected + 1));
                    }
                } else if !self.filtered_tasks.is_empty() {
                    self.task_list_state.select(Some(0));
                }
            }
            KeyCode::Char('n') => {
                self.task_form = TaskForm::new();
                self.editing = None;
                self.state = AppState::AddTask;
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some((form, id)) = self.selected_task().map(|t| (TaskForm::from_task(t), t.id)) {
                    self.task_form = form;
                    self.editing = Some(id);
                    self.state = AppState::EditTask;
                }
            }
            KeyCode::Char(' ') | KeyCode::Char('x') => {
                if let Some(id) = self.selected_task_id() {
                    let outcome = self.store.toggle_completion(id);
                    self.show_outcome(outcome);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let action = self.selected_task().map(|t| ConfirmAction::DeleteTask {
                    id: t.id,
                    title: t.title.clone(),
                });
                if action.is_some() {
                    self.confirm_action = action;
                    self.state = AppState::Confirm;
                }
            }
            KeyCode::Char('A') => {
                if self.store.is_empty() {
                    self.status_message = "No tasks to complete".to_string();
                } else {
                    let outcome = self.store.mark_all_completed();
                    self.show_outcome(outcome);
                }
            }
            KeyCode::Char('D') => {
                if self.store.is_empty() {
                    self.status_message = "No tasks to delete".to_string();
                } else {
                    self.confirm_action = Some(ConfirmAction::DeleteAll);
                    self.state = AppState::Confirm;
                }
            }
            KeyCode::Char('/') => {
                self.filter_form = FilterForm::from_criteria(&self.criteria);
                self.input_mode = InputMode::Text;
            }
            KeyCode::Char('f') => {
                self.filter_form = FilterForm::from_criteria(&self.criteria);
                self.state = AppState::Filters;
            }
            KeyCode::Char('c') => {
                if self.criteria.is_active() {
                    self.criteria.clear();
                    self.update_filtered_tasks();
                    self.status_message = "Filters cleared".to_string();
                }
            }
            KeyCode::Char('h') | KeyCode::F(1) => self.state = AppState::Help,
            _ => {}
        }
        Ok(false)
    }

    /// Handle keyboard input in the create and edit dialogs.
    fn handle_form_input(&mut self, key: KeyCode, _modifiers: KeyModifiers) -> io::Result<bool> {
        match key {
            KeyCode::Esc => {
                self.state = AppState::TaskList;
                self.editing = None;
            }
            KeyCode::Enter => self.submit_task_form(),
            KeyCode::Tab | KeyCode::Down => self.task_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.task_form.prev_field(),
            KeyCode::Left => self.task_form.handle_left_right(false),
            KeyCode::Right => self.task_form.handle_left_right(true),
            KeyCode::Home => self.task_form.handle_home_end(false),
            KeyCode::End => self.task_form.handle_home_end(true),
            KeyCode::Backspace => self.task_form.handle_backspace(),
            KeyCode::Delete => self.task_form.handle_delete(),
            KeyCode::Char(c) => self.task_form.handle_char(c),
            _ => {}
        }
        Ok(false)
    }

    /// Create or update from the form. A failed validation keeps the dialog open.
    fn submit_task_form(&mut self) {
        if !self.task_form.validate() {
            return;
        }
        let input = self.task_form.to_input();
        let result = match self.editing {
            Some(id) => self.store.update(id, &input),
            None => self.store.create(&input),
        };
        match result {
            Ok(outcome) => {
                let created = match outcome.effect {
                    Effect::Created { id } => Some(id),
                    _ => None,
                };
                self.show_outcome(outcome);
                if let Some(id) = created {
                    self.select_task(id);
                }
                self.state = AppState::TaskList;
                self.editing = None;
            }
            Err(e) => self.task_form.error = Some(e.to_string()),
        }
    }

    /// Handle keyboard input in the filter panel. Every change applies at once.
    fn handle_filter_input(&mut self, key: KeyCode, _modifiers: KeyModifiers) -> io::Result<bool> {
        match key {
            KeyCode::Esc | KeyCode::Enter => {
                self.state = AppState::TaskList;
                return Ok(false);
            }
            KeyCode::Tab | KeyCode::Down => self.filter_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.filter_form.prev_field(),
            KeyCode::Left => self.filter_form.handle_left_right(false),
            KeyCode::Right => self.filter_form.handle_left_right(true),
            KeyCode::Home => self.filter_form.handle_home_end(false),
            KeyCode::End => self.filter_form.handle_home_end(true),
            KeyCode::Backspace => self.filter_form.handle_backspace(),
            KeyCode::Char(c) => self.filter_form.handle_char(c),
            _ => {}
        }
        self.apply_filter_form();
        Ok(false)
    }

    fn handle_confirm_input(&mut self, key: KeyCode, _modifiers: KeyModifiers) -> io::Result<bool> {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if let Some(action) = self.confirm_action.take() {
                    let outcome = match action {
                        ConfirmAction::DeleteTask { id, .. } => self.store.delete(id),
                        ConfirmAction::DeleteAll => self.store.delete_all(),
                    };
                    self.show_outcome(outcome);
                }
                self.state = AppState::TaskList;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.state = AppState::TaskList;
                self.confirm_action = None;
                self.status_message = "Cancelled".to_string();
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_help_input(&mut self, _key: KeyCode, _modifiers: KeyModifiers) -> io::Result<bool> {
        self.state = AppState::TaskList;
        Ok(false)
    }

    /// Route one key press to the handler for the current screen.
    ///
    /// Returns true if the application should quit.
    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> io::Result<bool> {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }
        self.notice = None;
        self.status_message.clear();

        match self.state {
            AppState::TaskList => self.handle_task_list_input(key, modifiers),
            AppState::AddTask | AppState::EditTask => self.handle_form_input(key, modifiers),
            AppState::Filters => self.handle_filter_input(key, modifiers),
            AppState::Help => self.handle_help_input(key, modifiers),
            AppState::Confirm => self.handle_confirm_input(key, modifiers),
        }
    }

    /// Poll for and handle one keyboard event.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return self.handle_key(key.code, key.modifiers);
                }
            }
        }
        Ok(false)
    }

    /// Render the header, the task table and the details of the selected task.
    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let search_height = if self.input_mode == InputMode::Text { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(search_height),
                Constraint::Min(0),
                Constraint::Length(4),
            ])
            .split(area);

        let mut header = vec![
            Span::styled("TODO LIST", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::raw(format_total(self.store.len())),
        ];
        if self.criteria.is_active() {
            header.push(Span::raw(" | "));
            header.push(Span::styled(
                format!("{} shown", self.filtered_tasks.len()),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ));
            header.push(Span::raw(" | "));
            header.push(Span::styled(
                self.criteria.summary(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ));
        }
        let header_block = Paragraph::new(Line::from(header))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header_block, chunks[0]);

        if search_height > 0 {
            render_input(f, chunks[1], "Search (Enter to keep, Esc to clear)", &self.filter_form.search);
        }

        if self.filtered_tasks.is_empty() {
            self.render_empty_state(f, chunks[2]);
            return;
        }

        let header_cells = ["", "Title", "Priority", "Assignee", "Date", "Location", "Tags"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells)
            .style(Style::default().bg(ACCENT).fg(Color::White))
            .height(1);

        let rows: Vec<Row> = self
            .filtered_tasks
            .iter()
            .filter_map(|&id| self.store.get(id))
            .map(|task| {
                let base = if task.completed {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::White)
                };
                let title_style = if task.completed {
                    base.add_modifier(Modifier::CROSSED_OUT)
                } else {
                    base.add_modifier(Modifier::BOLD)
                };
                let priority_style = if task.completed {
                    base
                } else {
                    Style::default().fg(priority_color(task.priority))
                };
                Row::new(vec![
                    Cell::from(format_checkbox(task.completed)),
                    Cell::from(task.title.clone()).style(title_style),
                    Cell::from(format_priority(task.priority)).style(priority_style),
                    Cell::from(task.assignee.clone().unwrap_or_default()),
                    Cell::from(task.date.clone()),
                    Cell::from(task.location.clone().unwrap_or_default()),
                    Cell::from(format_tags(&task.tags)),
                ])
                .style(base)
            })
            .collect();

        let widths = [
            Constraint::Length(3),  // Checkbox
            Constraint::Min(24),    // Title
            Constraint::Length(8),  // Priority
            Constraint::Length(14), // Assignee
            Constraint::Length(13), // Date
            Constraint::Length(14), // Location
            Constraint::Length(20), // Tags
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Tasks ({}/{}) - Press 'h' for help",
                self.filtered_tasks.len(),
                self.store.len()
            )))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, chunks[2], &mut self.task_list_state);

        let details = match self.selected_task() {
            Some(task) => vec![
                Line::from(task.description.clone().unwrap_or_else(|| "No description".to_string())),
                Line::from(Span::styled(
                    format!("{} comments  {} attachments", task.comments, task.attachments),
                    Style::default().fg(Color::DarkGray),
                )),
            ],
            None => Vec::new(),
        };
        let details = Paragraph::new(details)
            .block(Block::default().borders(Borders::ALL).title("Details"))
            .wrap(Wrap { trim: true });
        f.render_widget(details, chunks[3]);
    }

    fn render_empty_state(&self, f: &mut Frame, area: Rect) {
        let (headline, hint) = if self.store.is_empty() {
            ("No tasks yet", "Press 'n' to create your first task")
        } else {
            ("No matching tasks", "Try adjusting your filters, or press 'c' to clear them")
        };
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(headline, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        ];
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Tasks"))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }

    /// Render the create or edit dialog over the task list.
    fn render_task_form(&mut self, f: &mut Frame, area: Rect, is_edit: bool) {
        let popup = centered_rect(70, 80, area);
        f.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(if is_edit { "Edit Task" } else { "New Task" })
            .border_style(Style::default().fg(ACCENT));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Description
                Constraint::Length(3), // Assignee
                Constraint::Length(3), // Priority
                Constraint::Length(3), // Location
                Constraint::Length(3), // Tags
                Constraint::Length(1), // Validation
                Constraint::Min(1),    // Instructions
            ])
            .split(inner);

        let form = &self.task_form;
        let current = form.current_field;
        render_input(f, chunks[0], "Title *", &form.title);
        render_input(f, chunks[1], "Description", &form.description);
        render_input(f, chunks[2], "Assignee", &form.assignee);
        let priority = match form.selected_priority() {
            None => "None",
            p => format_priority(p),
        };
        render_selector(f, chunks[3], "Priority", priority, current == task_form::PRIORITY_ORDER);
        render_input(f, chunks[4], "Location", &form.location);
        render_input(f, chunks[5], "Tags (comma separated)", &form.tags);

        if let Some(error) = &form.error {
            f.render_widget(
                Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
                chunks[6],
            );
        }

        let instructions = Paragraph::new(format!(
            "Tab/Up/Down move between fields  Left/Right change priority  Enter {}  Esc cancel",
            if is_edit { "save" } else { "create" }
        ))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(instructions, chunks[7]);
    }

    /// Render the filter panel over the task list.
    fn render_filters(&mut self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(50, 70, area);
        f.render_widget(Clear, popup);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(
                "Filters - {} of {} shown",
                self.filtered_tasks.len(),
                self.store.len()
            ))
            .border_style(Style::default().fg(ACCENT));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .split(inner);

        let form = &self.filter_form;
        let current = form.current_field;
        render_input(f, chunks[0], "Search title", &form.search);
        render_selector(f, chunks[1], "Priority", form.priority_label(), current == filter_form::PRIORITY_ORDER);
        render_selector(f, chunks[2], "Status", form.status_label(), current == filter_form::STATUS_ORDER);
        render_input(f, chunks[3], "Assignee", &form.assignee);
        render_input(f, chunks[4], "Location", &form.location);

        let instructions = Paragraph::new("Filters apply as you type  Tab move  Left/Right change  Esc/Enter close")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(instructions, chunks[5]);
    }

    fn render_help(&mut self, f: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Line::from(Span::styled("Todo List Help", bold)),
            Line::from(""),
            Line::from(Span::styled("Task List:", bold)),
            Line::from("  Up/Down, k/j   Select task"),
            Line::from("  n              New task"),
            Line::from("  e/Enter        Edit selected task"),
            Line::from("  Space/x        Toggle completion"),
            Line::from("  d              Delete selected task"),
            Line::from("  A              Mark all tasks completed"),
            Line::from("  D              Delete all tasks"),
            Line::from("  /              Search titles"),
            Line::from("  f              Open filters"),
            Line::from("  c              Clear filters"),
            Line::from("  h/F1           Show this help"),
            Line::from("  q/Ctrl+C       Quit"),
            Line::from(""),
            Line::from(Span::styled("Forms:", bold)),
            Line::from("  Tab/Up/Down    Move between fields"),
            Line::from("  Left/Right     Change selectors"),
            Line::from("  Home/End       Jump to start/end of text"),
            Line::from("  Enter          Save"),
            Line::from("  Esc            Cancel"),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help - Press any key to return"),
            )
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    /// Render a confirmation dialog for destructive actions.
    fn render_confirm(&mut self, f: &mut Frame, area: Rect) {
        let Some(action) = &self.confirm_action else {
            return;
        };
        let block = Block::default()
            .title(action.title())
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 25, area);
        f.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(action.title(), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(action.description()),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    /// Render the status bar: the last notice, a status message, or a hint.
    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let accent = Style::default().bg(ACCENT).fg(Color::White);
        let (text, style) = if let Some(notice) = &self.notice {
            if let Some(warning) = &notice.warning {
                (
                    format!("{}. {}", notice.message, warning),
                    Style::default().bg(MEDIUM_YELLOW).fg(Color::Black),
                )
            } else if notice.kind == NoticeKind::Destructive {
                (notice.message.clone(), Style::default().bg(DARK_RED).fg(Color::White))
            } else {
                (notice.message.clone(), accent)
            }
        } else if !self.status_message.is_empty() {
            (self.status_message.clone(), accent)
        } else {
            let hint = match self.state {
                AppState::TaskList => {
                    "n new | e edit | Space toggle | d delete | / search | f filters | h help | q quit".to_string()
                }
                AppState::AddTask => "New Task".to_string(),
                AppState::EditTask => "Edit Task".to_string(),
                AppState::Filters => "Filters".to_string(),
                AppState::Help => "Help".to_string(),
                AppState::Confirm => "Confirm Action".to_string(),
            };
            (hint, accent)
        };

        let status = Paragraph::new(text).style(style).alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to appropriate view renderers.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        match self.state {
            AppState::TaskList => self.render_task_list(f, chunks[0]),
            AppState::AddTask => {
                self.render_task_list(f, chunks[0]);
                self.render_task_form(f, chunks[0], false);
            }
            AppState::EditTask => {
                self.render_task_list(f, chunks[0]);
                self.render_task_form(f, chunks[0], true);
            }
            AppState::Filters => {
                self.render_task_list(f, chunks[0]);
                self.render_filters(f, chunks[0]);
            }
            AppState::Help => self.render_help(f, chunks[0]),
            AppState::Confirm => {
                self.render_task_list(f, chunks[0]);
                self.render_confirm(f, chunks[0]);
            }
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// Bordered single-line text input. The active input gets the cursor.
fn render_input(f: &mut Frame, area: Rect, label: &str, field: &InputField) {
    let border = if field.active { Style::default().fg(ACCENT) } else { Style::default() };
    let widget = Paragraph::new(field.value.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(label)
            .border_style(border),
    );
    f.render_widget(widget, area);
    if field.active {
        let offset = (field.cursor as u16).min(area.width.saturating_sub(2));
        f.set_cursor_position((area.x + 1 + offset, area.y + 1));
    }
}

/// Bordered selector cycled with the arrow keys.
fn render_selector(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let (border, text) = if focused {
        (Style::default().fg(ACCENT), format!("< {value} >"))
    } else {
        (Style::default(), value.to_string())
    };
    let widget = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(label)
            .border_style(border),
    );
    f.render_widget(widget, area);
}

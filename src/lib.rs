//! # todo - File-backed to-do list
//!
//! A small task list with a scriptable CLI and an optional terminal user
//! interface (TUI).
//!
//! ## Key Features
//!
//! - **Quick Capture**: title, description, assignee, priority, location and tags
//! - **Filtering**: search titles and narrow by priority, status, assignee and location
//! - **Bulk Actions**: mark everything done or clear the list in one step
//! - **Local File Storage**: one JSON record, rewritten after every change
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the interactive UI
//! todo ui
//!
//! # Add a task
//! todo add "Buy milk" --priority high --tags "shopping, home"
//!
//! # List pending high-priority tasks
//! todo list --status pending --priority high
//!
//! # Complete it
//! todo toggle 2
//! ```
//!
//! Data is stored in `~/.todo/todo-tasks.json` unless `--dir` points elsewhere.
//! Set `RUST_LOG=debug` to see storage activity on stderr.

pub mod cli;
pub mod cmd;
pub mod error;
pub mod fields;
pub mod filter;
pub mod format;
pub mod storage;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod filter_form;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

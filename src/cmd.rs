//! Command implementations for the CLI interface.
//!
//! Each handler maps one subcommand onto the task store or the filter engine
//! and reports the store's notice on stdout.

use std::io::{self, Write};
use std::path::Path;

use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::error::{exit_codes, Error};
use crate::fields::{Priority, PriorityFilter, StatusFilter};
use crate::filter::{self, FilterCriteria};
use crate::format::{format_checkbox, format_priority, format_tags, format_total, print_table};
use crate::storage::FileStore;
use crate::store::{Notice, Outcome, TaskStore};
use crate::task::{split_tags, TaskInput};
use crate::tui::run::run_tui;

/// The store as used by the binary.
pub type Store = TaskStore<FileStore>;

/// CLI subcommands.
///
/// Commands that take a task id exit with status 2 when no task has that id.
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI interface.
    Ui,

    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
        /// Person responsible for the task.
        #[arg(long)]
        assignee: Option<String>,
        /// Priority: low | medium | high.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Where the task happens.
        #[arg(long)]
        location: Option<String>,
        /// Comma-separated tags.
        #[arg(long)]
        tags: Option<String>,
    },

    /// Edit a task. Omitted fields keep their value; an empty value clears a field.
    Edit {
        /// Task ID to edit.
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        assignee: Option<String>,
        /// Priority: low | medium | high.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Remove the priority.
        #[arg(long, conflicts_with = "priority")]
        clear_priority: bool,
        #[arg(long)]
        location: Option<String>,
        /// Comma-separated tags, replacing the current ones.
        #[arg(long)]
        tags: Option<String>,
    },

    /// List tasks with optional filters.
    List {
        /// Case-insensitive text to look for in titles.
        #[arg(long, default_value = "")]
        search: String,
        /// Priority filter.
        #[arg(long, value_enum, default_value_t = PriorityFilter::All)]
        priority: PriorityFilter,
        /// Completion filter.
        #[arg(long, value_enum, default_value_t = StatusFilter::All)]
        status: StatusFilter,
        /// Case-insensitive assignee substring.
        #[arg(long, default_value = "")]
        assignee: String,
        /// Case-insensitive location substring.
        #[arg(long, default_value = "")]
        location: String,
    },

    /// View a single task.
    View {
        /// Task ID to view.
        id: u64,
    },

    /// Toggle a task between completed and pending.
    Toggle {
        /// Task ID to toggle.
        id: u64,
    },

    /// Delete a task.
    Delete {
        /// Task ID to delete.
        id: u64,
        /// Do not ask for confirmation.
        #[arg(long, short)]
        yes: bool,
    },

    /// Mark every task completed.
    DoneAll,

    /// Delete every task.
    Clear {
        /// Do not ask for confirmation.
        #[arg(long, short)]
        yes: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Print a store notice, sending any persistence warning to stderr.
fn report(notice: &Notice) {
    println!("{}", notice.message);
    if let Some(warning) = &notice.warning {
        eprintln!("Warning: {warning}");
    }
}

/// Report an outcome. An unknown id goes to stderr and exits as a user error.
fn report_outcome(outcome: &Outcome) {
    if outcome.changed() {
        report(&outcome.notice);
        return;
    }
    eprintln!("{}", outcome.notice.message);
    if let Some(warning) = &outcome.notice.warning {
        eprintln!("Warning: {warning}");
    }
    std::process::exit(exit_codes::USER_ERROR);
}

/// Tell the user about anything that went wrong while loading the store.
pub fn report_startup(store: &Store) {
    if let Some(notice) = store.startup_notice() {
        eprintln!("{}", notice.message);
        if let Some(warning) = &notice.warning {
            eprintln!("Warning: {warning}");
        }
    }
}

fn fail(err: Error) -> ! {
    eprintln!("{err}");
    std::process::exit(err.exit_code());
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` is a no.
fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N]: ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut response = String::new();
    if io::stdin().read_line(&mut response).is_err() {
        return false;
    }
    matches!(response.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Launch the terminal user interface.
pub fn cmd_ui(dir: &Path) {
    if let Err(e) = run_tui(dir) {
        eprintln!("UI error: {e}");
        std::process::exit(e.exit_code());
    }
}

/// Add a new task.
pub fn cmd_add(
    store: &mut Store,
    title: String,
    desc: Option<String>,
    assignee: Option<String>,
    priority: Option<Priority>,
    location: Option<String>,
    tags: Option<String>,
) {
    let input = TaskInput {
        title,
        description: desc,
        assignee,
        priority,
        location,
        tags: tags.as_deref().map(split_tags).unwrap_or_default(),
    };
    match store.create(&input) {
        Ok(outcome) => {
            report(&outcome.notice);
            if let Some(task) = store.tasks().first() {
                println!("ID: {}", task.id);
            }
        }
        Err(e) => fail(e),
    }
}

/// Edit an existing task's fields.
pub fn cmd_edit(
    store: &mut Store,
    id: u64,
    title: Option<String>,
    desc: Option<String>,
    assignee: Option<String>,
    priority: Option<Priority>,
    clear_priority: bool,
    location: Option<String>,
    tags: Option<String>,
) {
    let Some(task) = store.get(id) else {
        eprintln!("No task with id {id}");
        std::process::exit(exit_codes::USER_ERROR);
    };
    let mut input = TaskInput::from_task(task);
    if let Some(t) = title {
        input.title = t;
    }
    if let Some(d) = desc {
        input.description = Some(d);
    }
    if let Some(a) = assignee {
        input.assignee = Some(a);
    }
    if clear_priority {
        input.priority = None;
    } else if priority.is_some() {
        input.priority = priority;
    }
    if let Some(l) = location {
        input.location = Some(l);
    }
    if let Some(t) = tags {
        input.tags = split_tags(&t);
    }
    match store.update(id, &input) {
        Ok(outcome) => report_outcome(&outcome),
        Err(e) => fail(e),
    }
}

/// List tasks matching the given filters.
pub fn cmd_list(store: &Store, criteria: &FilterCriteria) {
    if store.is_empty() {
        println!("No tasks yet");
        println!("Run `todo add <title>` to get started");
        return;
    }

    let visible = filter::apply(store.tasks(), criteria);
    if visible.is_empty() {
        println!("No matching tasks");
        println!("Try adjusting your filters");
    } else {
        print_table(&visible);
    }

    println!();
    if criteria.is_active() {
        println!("{} | {} shown | {}", format_total(store.len()), visible.len(), criteria.summary());
    } else {
        println!("{}", format_total(store.len()));
    }
}

/// View detailed information about a specific task.
pub fn cmd_view(store: &Store, id: u64) {
    let Some(task) = store.get(id) else {
        eprintln!("No task with id {id}");
        std::process::exit(exit_codes::USER_ERROR);
    };
    println!("ID:           {}", task.id);
    println!("Title:        {}", task.title);
    println!("Done:         {}", format_checkbox(task.completed));
    println!("Priority:     {}", format_priority(task.priority));
    println!("Assignee:     {}", task.assignee.as_deref().unwrap_or("-"));
    println!("Location:     {}", task.location.as_deref().unwrap_or("-"));
    println!("Date:         {}", task.date);
    println!("Tags:         {}", if task.tags.is_empty() { "-".into() } else { format_tags(&task.tags) });
    println!("Comments:     {}", task.comments);
    println!("Attachments:  {}", task.attachments);
    println!("Description:\n{}", task.description.as_deref().unwrap_or("-"));
}

/// Flip a task's completion state.
pub fn cmd_toggle(store: &mut Store, id: u64) {
    let outcome = store.toggle_completion(id);
    report_outcome(&outcome);
}

/// Delete a single task after confirmation.
pub fn cmd_delete(store: &mut Store, id: u64, yes: bool) {
    // Unknown ids skip the prompt and are reported by the store.
    if let Some(task) = store.get(id).filter(|_| !yes) {
        if !confirm(&format!("Delete task \"{}\"? This cannot be undone.", task.title)) {
            println!("Cancelled.");
            return;
        }
    }
    let outcome = store.delete(id);
    report_outcome(&outcome);
}

/// Mark every task completed.
pub fn cmd_done_all(store: &mut Store) {
    let outcome = store.mark_all_completed();
    report(&outcome.notice);
}

/// Delete every task after confirmation.
pub fn cmd_clear(store: &mut Store, yes: bool) {
    if !yes && !confirm(&format!("Delete all {} task(s)? This cannot be undone.", store.len())) {
        println!("Cancelled.");
        return;
    }
    let outcome = store.delete_all();
    report(&outcome.notice);
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

//! `todo` binary: parses the command line and dispatches to the handlers in
//! `todo_list::cmd`.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use todo_list::cli::Cli;
use todo_list::cmd::*;
use todo_list::error::Error;
use todo_list::filter::FilterCriteria;
use todo_list::storage::FileStore;

/// Install the log subscriber. Logging is opt-in via RUST_LOG and goes to stderr.
fn init_tracing() {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Default data directory: `$HOME/.todo`.
fn default_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".todo")
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let dir = cli.dir.clone().unwrap_or_else(default_dir);

    // Commands that don't need the store
    match &cli.command {
        Commands::Completions { shell } => {
            cmd_completions(*shell);
            return;
        }
        Commands::Ui => {
            cmd_ui(&dir);
            return;
        }
        _ => {}
    }

    let storage = match FileStore::open(&dir) {
        Ok(s) => s,
        Err(e) => {
            let err = Error::from(e);
            eprintln!("Failed to create data directory {}: {}", dir.display(), err);
            std::process::exit(err.exit_code());
        }
    };
    let mut store = Store::open(storage);
    report_startup(&store);

    match cli.command {
        Commands::Ui => unreachable!("UI command handled above"),
        Commands::Completions { .. } => unreachable!("Completions handled above"),

        Commands::Add { title, desc, assignee, priority, location, tags } =>
            cmd_add(&mut store, title, desc, assignee, priority, location, tags),

        Commands::Edit { id, title, desc, assignee, priority, clear_priority, location, tags } =>
            cmd_edit(&mut store, id, title, desc, assignee, priority, clear_priority, location, tags),

        Commands::List { search, priority, status, assignee, location } => {
            let criteria = FilterCriteria { search, priority, assignee, location, completed: status };
            cmd_list(&store, &criteria)
        }

        Commands::View { id } => cmd_view(&store, id),

        Commands::Toggle { id } => cmd_toggle(&mut store, id),

        Commands::Delete { id, yes } => cmd_delete(&mut store, id, yes),

        Commands::DoneAll => cmd_done_all(&mut store),

        Commands::Clear { yes } => cmd_clear(&mut store, yes),
    }
}

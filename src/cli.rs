use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// File-backed to-do list.
/// Tasks are stored in ~/.todo/todo-tasks.json or under the directory passed via --dir.
#[derive(Parser)]
#[command(name = "todo", version, about = "Organize your tasks efficiently")]
pub struct Cli {
    /// Directory holding the task record.
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

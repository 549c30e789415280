use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "td", about = concat!("todos v", env!("CARGO_PKG_VERSION"), " - a task list that remembers"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Data directory (default: $TODOS_DIR, then the platform data dir)
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Route to open: "#/", "#/active" or "#/completed"
    #[arg(long, global = true, default_value = "#/")]
    pub route: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks for the current route
    List,
    /// Add a task
    Add(AddArgs),
    /// Flip a task between active and completed
    Toggle(KeyArgs),
    /// Rename a task (empty text deletes it)
    Edit(EditArgs),
    /// Delete a task
    Rm(KeyArgs),
    /// Delete every completed task
    ClearCompleted,
    /// Mark every task completed (or active with --uncheck)
    ToggleAll(ToggleAllArgs),
    /// Show the "items left" count
    Count,
    /// Print the rendered page as HTML
    Render,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct KeyArgs {
    /// Task key, e.g. key-todo-3
    pub key: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task key, e.g. key-todo-3
    pub key: String,
    /// New text; omit to delete the task
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct ToggleAllArgs {
    /// Mark everything active instead
    #[arg(long)]
    pub uncheck: bool,
}

use std::path::Path;

use crate::app::App;
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{read_config, resolve_data_dir};
use crate::io::persist::Persistence;
use crate::io::storage::FileStorage;
use crate::model::task::TaskKey;
use crate::ops::dispatch::{Command, EventInput, translate};
use crate::ops::router::fragment;
use crate::ops::store::TaskStore;
use crate::view::node::Action;
use crate::view::port::Target;
use crate::view::surface::Surface;

type CliApp = App<FileStorage, Surface>;
type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let Some(cmd) = cli.command else {
        return Err("no subcommand given (run `td` alone for the terminal UI)".into());
    };
    let mut app = open_app(cli.data_dir.as_deref(), &cli.route)?;

    match cmd {
        // Read commands
        Commands::List => cmd_list(&app, json),
        Commands::Count => cmd_count(&app, json),
        Commands::Render => {
            println!("{}", app.port().to_html());
            Ok(())
        }

        // Write commands
        Commands::Add(args) => cmd_add(&mut app, args, json),
        Commands::Toggle(args) => cmd_toggle(&mut app, args, json),
        Commands::Edit(args) => cmd_edit(&mut app, args, json),
        Commands::Rm(args) => cmd_rm(&mut app, args, json),
        Commands::ClearCompleted => cmd_clear_completed(&mut app, json),
        Commands::ToggleAll(args) => cmd_toggle_all(&mut app, args, json),
    }
}

/// Open the store in the resolved data dir and render the requested route
fn open_app(data_dir: Option<&Path>, route: &str) -> Result<CliApp, Box<dyn std::error::Error>> {
    let dir = resolve_data_dir(data_dir);
    let config = read_config(&dir)?;
    let persistence = Persistence::new(FileStorage::new(dir), config.storage.slot);
    tracing::debug!(
        dir = %persistence.storage().dir().display(),
        slot = persistence.slot(),
        "opening task store"
    );
    Ok(App::open(TaskStore::open(persistence), Surface::new(), route)?)
}

fn print_change(json: bool, change: ChangeJson, human: String) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string(&change)?);
    } else {
        println!("{}", human);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(app: &CliApp, json: bool) -> CmdResult {
    let filter = app.filter();
    let tasks = app.store().list(filter);
    if json {
        let out = TaskListJson {
            route: fragment(filter),
            filter,
            active_count: app.store().active_count(),
            tasks,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let count = app.port().text_of(&Target::Class("todo-count"));
        for line in format_listing(&tasks, &count) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_count(app: &CliApp, json: bool) -> CmdResult {
    if json {
        let store = app.store();
        let out = CountJson {
            active: store.active_count(),
            completed: store.completed_count(),
            total: store.len(),
        };
        println!("{}", serde_json::to_string(&out)?);
    } else {
        println!("{}", app.port().text_of(&Target::Class("todo-count")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(app: &mut CliApp, args: AddArgs, json: bool) -> CmdResult {
    let text = args.text.join(" ");
    // Same path as pressing Enter in the new-task field
    let input = EventInput::key_down("Enter", &text);
    let command = translate(&Action::NewTaskIfEnter, &input).ok_or("task text is empty")?;
    let before = app.store().len();
    app.apply(command)?;
    if app.store().len() == before {
        return Err("task text is empty".into());
    }
    let key = app
        .store()
        .tasks()
        .last()
        .map(|t| t.key.to_string())
        .unwrap_or_default();
    print_change(
        json,
        ChangeJson {
            action: "added",
            key: Some(key.clone()),
            count: None,
        },
        key,
    )
}

fn cmd_toggle(app: &mut CliApp, args: KeyArgs, json: bool) -> CmdResult {
    let key = TaskKey::new(args.key);
    app.apply(Command::ToggleCompleted(key.clone()))?;
    let done = app.store().get(&key).is_some_and(|t| t.completed);
    let action = if done { "completed" } else { "reopened" };
    print_change(
        json,
        ChangeJson {
            action,
            key: Some(key.to_string()),
            count: None,
        },
        format!("{} {}", action, key),
    )
}

fn cmd_edit(app: &mut CliApp, args: EditArgs, json: bool) -> CmdResult {
    let key = TaskKey::new(args.key);
    app.apply(Command::BeginEdit(key.clone()))?;
    let value = args.text.join(" ");
    app.apply(Command::SaveEdit(key.clone(), value.trim().to_string()))?;
    let action = if app.store().get(&key).is_some() {
        "renamed"
    } else {
        "deleted"
    };
    print_change(
        json,
        ChangeJson {
            action,
            key: Some(key.to_string()),
            count: None,
        },
        format!("{} {}", action, key),
    )
}

fn cmd_rm(app: &mut CliApp, args: KeyArgs, json: bool) -> CmdResult {
    let key = TaskKey::new(args.key);
    app.apply(Command::Remove(key.clone()))?;
    print_change(
        json,
        ChangeJson {
            action: "deleted",
            key: Some(key.to_string()),
            count: None,
        },
        format!("deleted {}", key),
    )
}

fn cmd_clear_completed(app: &mut CliApp, json: bool) -> CmdResult {
    let before = app.store().len();
    app.apply(Command::ClearCompleted)?;
    let removed = before - app.store().len();
    print_change(
        json,
        ChangeJson {
            action: "cleared",
            key: None,
            count: Some(removed),
        },
        format!("cleared {} completed", removed),
    )
}

fn cmd_toggle_all(app: &mut CliApp, args: ToggleAllArgs, json: bool) -> CmdResult {
    let checked = !args.uncheck;
    let command = translate(&Action::ToggleAll, &EventInput::checkbox(checked))
        .ok_or("toggle-all needs a checkbox state")?;
    app.apply(command)?;
    let action = if checked { "completed" } else { "reopened" };
    print_change(
        json,
        ChangeJson {
            action,
            key: None,
            count: Some(app.store().len()),
        },
        format!("{} {} tasks", action, app.store().len()),
    )
}

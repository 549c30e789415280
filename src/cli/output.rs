use serde::Serialize;

use crate::model::task::{Filter, Task};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskListJson<'a> {
    pub route: &'static str,
    pub filter: Filter,
    pub active_count: usize,
    pub tasks: Vec<&'a Task>,
}

#[derive(Serialize)]
pub struct CountJson {
    pub active: usize,
    pub completed: usize,
    pub total: usize,
}

#[derive(Serialize)]
pub struct ChangeJson {
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn checkbox(task: &Task) -> &'static str {
    if task.completed { "[x]" } else { "[ ]" }
}

/// `[x] key-todo-1  Walk dog`
pub fn format_task_line(task: &Task) -> String {
    format!("{} {}  {}", checkbox(task), task.key, task.text)
}

pub fn format_listing(tasks: &[&Task], count_text: &str) -> Vec<String> {
    let mut lines: Vec<String> = tasks.iter().map(|t| format_task_line(t)).collect();
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(count_text.to_string());
    lines
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, stable identifier of a task (`key-todo-3`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn new(key: impl Into<String>) -> Self {
        TaskKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskKey {
    fn from(s: &str) -> Self {
        TaskKey(s.to_string())
    }
}

/// A single to-do entry. This is the shape written to the durable slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique key, generated once at creation
    pub key: TaskKey,
    /// Label text
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    /// Set while the task is being edited inline
    #[serde(default)]
    pub editing: bool,
}

impl Task {
    /// Create a fresh task: not completed, not editing
    pub fn new(key: TaskKey, text: String) -> Self {
        Task {
            key,
            text,
            completed: false,
            editing: false,
        }
    }

    /// CSS state class of the list item. Editing wins over completed.
    pub fn state_class(&self) -> &'static str {
        if self.editing {
            "editing"
        } else if self.completed {
            "completed"
        } else {
            "active"
        }
    }
}

/// Which derived projection of the store is displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    /// Label shown in the filters list
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    pub fn parse_filter(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Filter::All),
            "active" => Some(Filter::Active),
            "completed" => Some(Filter::Completed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(completed: bool, editing: bool) -> Task {
        Task {
            key: "key-todo-0".into(),
            text: "Buy milk".into(),
            completed,
            editing,
        }
    }

    #[test]
    fn state_class_precedence() {
        assert_eq!(task(false, false).state_class(), "active");
        assert_eq!(task(true, false).state_class(), "completed");
        assert_eq!(task(false, true).state_class(), "editing");
        assert_eq!(task(true, true).state_class(), "editing");
    }

    #[test]
    fn serializes_to_slot_shape() {
        let json = serde_json::to_string(&task(true, false)).unwrap();
        assert_eq!(
            json,
            r#"{"key":"key-todo-0","text":"Buy milk","completed":true,"editing":false}"#
        );
    }

    #[test]
    fn flags_default_when_missing() {
        let t: Task = serde_json::from_str(r#"{"key":"k","text":"x"}"#).unwrap();
        assert!(!t.completed);
        assert!(!t.editing);
    }

    #[test]
    fn filter_matches() {
        let done = task(true, false);
        let open = task(false, false);
        assert!(Filter::All.matches(&done) && Filter::All.matches(&open));
        assert!(Filter::Active.matches(&open) && !Filter::Active.matches(&done));
        assert!(Filter::Completed.matches(&done) && !Filter::Completed.matches(&open));
    }

    #[test]
    fn filter_parse() {
        for f in Filter::ALL {
            assert_eq!(Filter::parse_filter(f.as_str()), Some(f));
        }
        assert_eq!(Filter::parse_filter("done"), None);
    }
}

use crate::io::storage::{Storage, StorageError};
use crate::model::task::Task;

/// Slot name used when the config does not override it
pub const DEFAULT_SLOT: &str = "todos";

/// Reads and writes the whole task list to one durable slot as a JSON array.
#[derive(Debug, Clone)]
pub struct Persistence<S> {
    storage: S,
    slot: String,
}

impl<S: Storage> Persistence<S> {
    pub fn new(storage: S, slot: impl Into<String>) -> Self {
        Persistence {
            storage,
            slot: slot.into(),
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the saved list. Missing, `null` or malformed data yields an empty list.
    pub fn load(&self) -> Vec<Task> {
        let content = match self.storage.get_item(&self.slot) {
            Ok(Some(content)) => content,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(slot = %self.slot, "could not read task slot: {}", e);
                return Vec::new();
            }
        };
        match serde_json::from_str::<Option<Vec<Task>>>(&content) {
            Ok(tasks) => tasks.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(slot = %self.slot, "discarding malformed task slot: {}", e);
                Vec::new()
            }
        }
    }

    /// Replace the slot's content with the given tasks
    pub fn save<'a>(
        &mut self,
        tasks: impl IntoIterator<Item = &'a Task>,
    ) -> Result<(), StorageError> {
        let tasks: Vec<&Task> = tasks.into_iter().collect();
        let content = serde_json::to_string(&tasks)?;
        self.storage.set_item(&self.slot, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStorage;
    use crate::model::task::TaskKey;

    fn sample() -> Vec<Task> {
        vec![
            Task::new(TaskKey::new("key-todo-0"), "Buy milk".into()),
            Task {
                key: TaskKey::new("key-todo-1"),
                text: "Walk dog".into(),
                completed: true,
                editing: false,
            },
            Task {
                key: TaskKey::new("key-todo-2"),
                text: "Mid-edit".into(),
                completed: false,
                editing: true,
            },
        ]
    }

    #[test]
    fn load_empty_slot() {
        let p = Persistence::new(MemoryStorage::new(), DEFAULT_SLOT);
        assert!(p.load().is_empty());
    }

    #[test]
    fn load_null_slot() {
        let p = Persistence::new(MemoryStorage::new().with_item("todos", "null"), "todos");
        assert!(p.load().is_empty());
    }

    #[test]
    fn load_malformed_slot() {
        let p = Persistence::new(
            MemoryStorage::new().with_item("todos", "not json {{{"),
            "todos",
        );
        assert!(p.load().is_empty());
    }

    #[test]
    fn load_wrong_shape() {
        let p = Persistence::new(
            MemoryStorage::new().with_item("todos", r#"{"key":"a"}"#),
            "todos",
        );
        assert!(p.load().is_empty());
    }

    #[test]
    fn save_then_load() {
        let mut p = Persistence::new(MemoryStorage::new(), "todos");
        let tasks = sample();
        p.save(&tasks).unwrap();
        assert_eq!(p.load(), tasks);
    }

    #[test]
    fn save_replaces_previous_list() {
        let mut p = Persistence::new(MemoryStorage::new(), "todos");
        let tasks = sample();
        p.save(&tasks).unwrap();
        p.save(&tasks[..1]).unwrap();
        assert_eq!(p.load(), tasks[..1].to_vec());
    }

    #[test]
    fn slots_do_not_collide() {
        let mut p = Persistence::new(MemoryStorage::new(), "work");
        p.save(&sample()).unwrap();
        let other = Persistence::new(p.storage().clone(), "home");
        assert!(other.load().is_empty());
    }
}

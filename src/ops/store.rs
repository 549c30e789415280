use indexmap::IndexMap;

use crate::io::persist::Persistence;
use crate::io::storage::{Storage, StorageError};
use crate::model::task::{Filter, Task, TaskKey};

const KEY_PREFIX: &str = "key-todo-";

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task not found: {0}")]
    NotFound(TaskKey),
    #[error("could not persist tasks: {0}")]
    Persist(#[from] StorageError),
    #[error("no task keys left to hand out")]
    KeysExhausted,
}

/// What `save_edit` did with the task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The task was not being edited; nothing changed
    Unchanged,
    /// New text stored, editing finished
    Saved,
    /// Empty text: the task was deleted
    Removed,
}

/// Monotonic key generator (`key-todo-0`, `key-todo-1`, ...)
#[derive(Debug, Clone)]
pub struct KeyGen {
    /// `None` once the counter has run past `u64::MAX`
    next: Option<u64>,
}


impl KeyGen {
    /// Start after the highest `key-todo-N` among existing tasks so keys
    /// from an earlier session are never handed out again.
    pub fn after<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let next = tasks
            .into_iter()
            .filter_map(|t| t.key.as_str().strip_prefix(KEY_PREFIX)?.parse::<u64>().ok())
            .max()
            .map_or(Some(0), |n| n.checked_add(1));
        KeyGen { next }
    }

    /// The next key, or `None` when the counter is exhausted
    pub fn next_key(&mut self) -> Option<TaskKey> {
        let n = self.next?;
        self.next = n.checked_add(1);
        Some(TaskKey::new(format!("{}{}", KEY_PREFIX, n)))
    }
}

/// The canonical, ordered task list. Every mutation is written through to
/// the durable slot before the call returns.
pub struct TaskStore<S> {
    tasks: IndexMap<TaskKey, Task>,
    keys: KeyGen,
    persistence: Persistence<S>,
}

impl<S: Storage> TaskStore<S> {
    /// Build the store from whatever the slot holds (or empty).
    pub fn open(persistence: Persistence<S>) -> Self {
        let mut tasks = IndexMap::new();
        for task in persistence.load() {
            if tasks.contains_key(&task.key) {
                tracing::warn!(key = %task.key, "dropping task with duplicate key");
                continue;
            }
            tasks.insert(task.key.clone(), task);
        }
        let keys = KeyGen::after(tasks.values());
        TaskStore {
            tasks,
            keys,
            persistence,
        }
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn get(&self, key: &TaskKey) -> Option<&Task> {
        self.tasks.get(key)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All tasks in store order
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Derived read-only projection, in store order
    pub fn list(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.values().filter(|t| filter.matches(t)).collect()
    }

    pub fn active_count(&self) -> usize {
        self.tasks.values().filter(|t| !t.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.len() - self.active_count()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append a task. Empty text is ignored and returns `None`.
    pub fn add(&mut self, text: &str) -> Result<Option<TaskKey>, StoreError> {
        if text.is_empty() {
            return Ok(None);
        }
        // Skip keys a foreign writer already claimed; never overwrite
        let key = loop {
            let key = self.keys.next_key().ok_or(StoreError::KeysExhausted)?;
            if !self.tasks.contains_key(&key) {
                break key;
            }
        };
        self.tasks
            .insert(key.clone(), Task::new(key.clone(), text.to_string()));
        self.persist()?;
        Ok(Some(key))
    }

    /// Flip the completed flag; returns the new value.
    pub fn toggle_completed(&mut self, key: &TaskKey) -> Result<bool, StoreError> {
        let task = self.task_mut(key)?;
        task.completed = !task.completed;
        let completed = task.completed;
        self.persist()?;
        Ok(completed)
    }

    /// Put a task in edit mode. Any other task still editing is taken out of
    /// edit mode (its text untouched); their keys are returned.
    pub fn begin_edit(&mut self, key: &TaskKey) -> Result<Vec<TaskKey>, StoreError> {
        if !self.tasks.contains_key(key) {
            return Err(StoreError::NotFound(key.clone()));
        }
        let mut cleared = Vec::new();
        for task in self.tasks.values_mut() {
            if &task.key == key {
                task.editing = true;
            } else if task.editing {
                task.editing = false;
                cleared.push(task.key.clone());
            }
        }
        self.persist()?;
        Ok(cleared)
    }

    /// Finish an edit. Empty text deletes the task.
    pub fn save_edit(&mut self, key: &TaskKey, text: &str) -> Result<EditOutcome, StoreError> {
        let task = self.task_mut(key)?;
        if !task.editing {
            return Ok(EditOutcome::Unchanged);
        }
        if text.is_empty() {
            self.tasks.shift_remove(key);
            self.persist()?;
            return Ok(EditOutcome::Removed);
        }
        task.text = text.to_string();
        task.editing = false;
        self.persist()?;
        Ok(EditOutcome::Saved)
    }

    pub fn remove(&mut self, key: &TaskKey) -> Result<Task, StoreError> {
        let task = self
            .tasks
            .shift_remove(key)
            .ok_or_else(|| StoreError::NotFound(key.clone()))?;
        self.persist()?;
        Ok(task)
    }

    /// Drop every completed task in one write; returns how many went.
    pub fn clear_completed(&mut self) -> Result<usize, StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|_, t| !t.completed);
        self.persist()?;
        Ok(before - self.tasks.len())
    }

    pub fn toggle_all(&mut self, completed: bool) -> Result<(), StoreError> {
        for task in self.tasks.values_mut() {
            task.completed = completed;
        }
        self.persist()
    }

    fn task_mut(&mut self, key: &TaskKey) -> Result<&mut Task, StoreError> {
        self.tasks
            .get_mut(key)
            .ok_or_else(|| StoreError::NotFound(key.clone()))
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        self.persistence.save(self.tasks.values())?;
        Ok(())
    }
}

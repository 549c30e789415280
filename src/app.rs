//! The controller: owns the store, the router and the render port, and
//! runs the update cycle (gesture → command → store → slot → re-render).

use crate::io::storage::Storage;
use crate::model::task::{Filter, TaskKey};
use crate::ops::dispatch::{Command, EventInput, translate};
use crate::ops::router::Router;
use crate::ops::store::{EditOutcome, StoreError, TaskStore};
use crate::view::node::Action;
use crate::view::port::{Display, RenderError, RenderOptions, RenderPort, Target};
use crate::view::render::{
    render_app, render_count, render_filters, render_task, render_task_list,
};

/// Error type for the update cycle
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

pub struct App<S, P> {
    store: TaskStore<S>,
    router: Router,
    port: P,
}

impl<S: Storage, P: RenderPort> App<S, P> {
    /// Render the page scaffold, then show the route named by `fragment`.
    pub fn open(store: TaskStore<S>, mut port: P, fragment: &str) -> Result<Self, AppError> {
        port.render(render_app(), &Target::Root, RenderOptions::default())?;
        let mut app = App {
            store,
            router: Router::from_fragment(fragment),
            port,
        };
        app.show_route()?;
        Ok(app)
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn filter(&self) -> Filter {
        self.router.filter()
    }

    /// Entry point for bound gestures
    pub fn handle(&mut self, action: &Action, input: &EventInput) {
        if let Some(command) = translate(action, input) {
            self.execute(command);
        }
    }

    /// Apply a command; failures are logged, never propagated.
    pub fn execute(&mut self, command: Command) {
        if let Err(e) = self.apply(command) {
            report(&e);
        }
    }

    /// Fragment-change handler
    pub fn navigate(&mut self, fragment: &str) {
        self.router.navigate(fragment);
        if let Err(e) = self.show_route() {
            report(&e);
        }
    }

    /// Apply a command and return what went wrong. A failed slot write
    /// still leaves memory mutated, so the display is brought in line
    /// before the error is returned.
    pub fn apply(&mut self, command: Command) -> Result<(), AppError> {
        let begun = match &command {
            Command::BeginEdit(key) => Some(key.clone()),
            _ => None,
        };
        match self.run(command) {
            Err(AppError::Store(StoreError::Persist(e))) => {
                self.update_list()?;
                // The item now shows its edit field; it still takes focus
                let editing = begun
                    .and_then(|key| self.store.get(&key).map(|t| t.editing))
                    .unwrap_or(false);
                if editing {
                    self.port.focus(&Target::Class("edit"))?;
                }
                Err(StoreError::Persist(e).into())
            }
            other => other,
        }
    }

    fn run(&mut self, command: Command) -> Result<(), AppError> {
        match command {
            Command::Add(text) => {
                if self.store.add(&text)?.is_some() {
                    self.update_list()?;
                }
                self.port.set_value(&Target::Class("new-todo"), "")?;
            }
            Command::ToggleCompleted(key) => {
                self.store.toggle_completed(&key)?;
                self.update_task(&key)?;
            }
            Command::BeginEdit(key) => {
                for other in self.store.begin_edit(&key)? {
                    self.update_task(&other)?;
                }
                self.update_task(&key)?;
                self.port.focus(&Target::Class("edit"))?;
            }
            Command::SaveEdit(key, text) => match self.store.save_edit(&key, &text)? {
                EditOutcome::Unchanged => {}
                EditOutcome::Saved => self.update_task(&key)?,
                EditOutcome::Removed => self.update_list()?,
            },
            Command::Remove(key) => {
                self.store.remove(&key)?;
                self.update_list()?;
            }
            Command::ClearCompleted => {
                self.store.clear_completed()?;
                self.update_list()?;
            }
            Command::ToggleAll(completed) => {
                self.store.toggle_all(completed)?;
                self.update_list()?;
            }
        }
        Ok(())
    }

    fn show_route(&mut self) -> Result<(), AppError> {
        self.port.render(
            render_filters(self.router.filter()),
            &Target::Class("filters"),
            RenderOptions::REPLACE,
        )?;
        self.update_list()
    }

    /// List region, then count, then section visibility
    fn update_list(&mut self) -> Result<(), AppError> {
        let filter = self.router.filter();
        self.port.render(
            render_task_list(&self.store.list(filter)),
            &Target::Class("todo-list"),
            RenderOptions::default(),
        )?;
        self.update_count()?;
        let main = if self.store.is_empty() {
            Display::None
        } else {
            Display::Block
        };
        self.port.set_display(&Target::Class("main"), main)?;
        Ok(())
    }

    /// Re-render one item in place. Under a filter the item may have left
    /// (or joined) the projection, so the whole list is redrawn instead.
    fn update_task(&mut self, key: &TaskKey) -> Result<(), AppError> {
        match self.store.get(key) {
            Some(task) if self.router.filter() == Filter::All => {
                self.port.render(
                    render_task(task),
                    &Target::Key(key.clone()),
                    RenderOptions::REPLACE,
                )?;
                self.update_count()
            }
            _ => self.update_list(),
        }
    }

    fn update_count(&mut self) -> Result<(), AppError> {
        self.port.render(
            render_count(self.store.active_count()),
            &Target::Class("todo-count"),
            RenderOptions::REPLACE,
        )?;
        let clear = if self.store.completed_count() > 0 {
            Display::Inline
        } else {
            Display::None
        };
        self.port.set_display(&Target::Class("clear-completed"), clear)?;
        Ok(())
    }
}

fn report(err: &AppError) {
    match err {
        AppError::Store(StoreError::NotFound(key)) => {
            tracing::warn!(%key, "ignoring command for unknown task");
        }
        other => tracing::error!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::persist::Persistence;
    use crate::io::storage::{MemoryStorage, StorageError};
    use crate::view::node::EventKind;
    use crate::view::surface::Surface;

    type TestApp = App<MemoryStorage, Surface>;

    fn open_with(storage: MemoryStorage, fragment: &str) -> TestApp {
        let store = TaskStore::open(Persistence::new(storage, "todos"));
        App::open(store, Surface::new(), fragment).unwrap()
    }

    fn open_empty() -> TestApp {
        open_with(MemoryStorage::new(), "")
    }

    /// Two tasks: "Buy milk" (active), "Walk dog" (completed)
    fn two_tasks(fragment: &str) -> TestApp {
        open_with(
            MemoryStorage::new().with_item(
                "todos",
                r#"[{"key":"key-todo-0","text":"Buy milk","completed":false,"editing":false},
                    {"key":"key-todo-1","text":"Walk dog","completed":true,"editing":false}]"#,
            ),
            fragment,
        )
    }

    fn shown_texts(app: &TestApp) -> Vec<String> {
        app.port()
            .list_items()
            .iter()
            .map(|li| li.text_content())
            .collect()
    }

    fn count_text(app: &TestApp) -> String {
        app.port().text_of(&Target::Class("todo-count"))
    }

    fn type_new_task(app: &mut TestApp, text: &str) {
        app.handle(&Action::NewTaskIfEnter, &EventInput::key_down("Enter", text));
    }

    /// Fire the binding on `inner` inside the item for `key`
    fn gesture(
        app: &mut TestApp,
        key: &str,
        inner: &'static str,
        event: EventKind,
        input: EventInput,
    ) {
        let action = app
            .port()
            .action(&Target::Key(TaskKey::new(key)), &Target::Class(inner), event)
            .unwrap_or_else(|| panic!("no {:?} binding on .{} of {}", event, inner, key));
        app.handle(&action, &input);
    }

    #[test]
    fn opens_empty() {
        let app = open_empty();
        assert!(shown_texts(&app).is_empty());
        assert_eq!(count_text(&app), "0 items left");
        assert!(!app.port().is_displayed(&Target::Class("main")));
        assert!(!app.port().is_displayed(&Target::Class("clear-completed")));
    }

    #[test]
    fn add_first_task() {
        let mut app = open_empty();
        type_new_task(&mut app, "Buy milk");
        assert_eq!(app.store().len(), 1);
        let task = app.store().tasks().next().unwrap();
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert_eq!(shown_texts(&app), ["Buy milk"]);
        assert_eq!(count_text(&app), "1 items left");
        assert!(app.port().is_displayed(&Target::Class("main")));
        let field = app.port().find(&Target::Class("new-todo")).unwrap();
        assert_eq!(field.get_attr("value"), Some(""));
    }

    #[test]
    fn blank_submission_creates_nothing() {
        let mut app = open_empty();
        type_new_task(&mut app, "   ");
        assert!(app.store().is_empty());
        assert!(!app.port().is_displayed(&Target::Class("main")));
    }

    #[test]
    fn routes_filter_the_list() {
        let mut app = two_tasks("#/");
        assert_eq!(shown_texts(&app), ["Buy milk", "Walk dog"]);
        app.navigate("#/active");
        assert_eq!(app.filter(), Filter::Active);
        assert_eq!(shown_texts(&app), ["Buy milk"]);
        app.navigate("#/completed");
        assert_eq!(shown_texts(&app), ["Walk dog"]);
        app.navigate("#/bogus");
        assert_eq!(shown_texts(&app), ["Buy milk", "Walk dog"]);
    }

    #[test]
    fn initial_fragment_selects_route() {
        let app = two_tasks("#/completed");
        assert_eq!(shown_texts(&app), ["Walk dog"]);
        let selected = app.port().find(&Target::Class("selected")).unwrap();
        assert_eq!(selected.get_attr("href"), Some("#/completed"));
    }

    #[test]
    fn toggle_all_then_clear_visible() {
        let mut app = open_empty();
        type_new_task(&mut app, "Only");
        app.handle(&Action::ToggleAll, &EventInput::checkbox(true));
        assert!(app.store().tasks().all(|t| t.completed));
        assert!(app.port().is_displayed(&Target::Class("clear-completed")));
        assert_eq!(count_text(&app), "0 items left");
    }

    #[test]
    fn checkbox_toggles_in_place() {
        let mut app = two_tasks("#/");
        gesture(&mut app, "key-todo-0", "toggle", EventKind::Click, EventInput::click());
        let li = app.port().find(&Target::Key(TaskKey::new("key-todo-0"))).unwrap();
        assert_eq!(li.get_attr("class"), Some("completed"));
        assert_eq!(count_text(&app), "0 items left");
        assert_eq!(shown_texts(&app).len(), 2);
    }

    #[test]
    fn toggle_under_filter_drops_item() {
        let mut app = two_tasks("#/active");
        gesture(&mut app, "key-todo-0", "toggle", EventKind::Click, EventInput::click());
        assert!(shown_texts(&app).is_empty());
        // The section stays visible: the store is not empty
        assert!(app.port().is_displayed(&Target::Class("main")));
    }

    #[test]
    fn edit_cycle() {
        let mut app = two_tasks("#/");
        let key = TaskKey::new("key-todo-0");
        // The label carries no class; reach it through the item's .view
        let label_action = app
            .port()
            .find_in(&Target::Key(key.clone()), &Target::Class("view"))
            .and_then(|view| view.child_elements().find(|c| c.tag == "label"))
            .and_then(|label| label.binding(EventKind::DblClick).cloned())
            .unwrap();
        app.handle(&label_action, &EventInput::click());
        let focused = app.port().focused().unwrap();
        assert!(focused.has_class("edit"));
        assert_eq!(focused.get_attr("value"), Some("Buy milk"));
        let li = app.port().find(&Target::Key(key.clone())).unwrap();
        assert_eq!(li.get_attr("class"), Some("editing"));

        gesture(
            &mut app,
            "key-todo-0",
            "edit",
            EventKind::KeyDown,
            EventInput::key_down("Enter", "Buy oat milk"),
        );
        assert_eq!(app.store().get(&key).unwrap().text, "Buy oat milk");
        assert_eq!(shown_texts(&app), ["Buy oat milk", "Walk dog"]);
        assert!(app.port().find(&Target::Class("edit")).is_none());
    }

    #[test]
    fn second_edit_closes_first() {
        let mut app = two_tasks("#/");
        app.execute(Command::BeginEdit(TaskKey::new("key-todo-0")));
        app.execute(Command::BeginEdit(TaskKey::new("key-todo-1")));
        let edits: Vec<_> = app
            .port()
            .list_items()
            .iter()
            .filter(|li| li.has_class("editing"))
            .map(|li| li.get_attr("data-key").unwrap().to_string())
            .collect();
        assert_eq!(edits, ["key-todo-1"]);
    }

    #[test]
    fn blur_with_empty_text_deletes() {
        let mut app = two_tasks("#/");
        app.execute(Command::BeginEdit(TaskKey::new("key-todo-1")));
        gesture(&mut app, "key-todo-1", "edit", EventKind::Blur, EventInput::blur(""));
        assert_eq!(app.store().len(), 1);
        assert_eq!(shown_texts(&app), ["Buy milk"]);
        assert!(!app.port().is_displayed(&Target::Class("clear-completed")));
    }

    #[test]
    fn destroy_and_clear_completed() {
        let mut app = two_tasks("#/");
        gesture(&mut app, "key-todo-0", "destroy", EventKind::Click, EventInput::click());
        assert_eq!(shown_texts(&app), ["Walk dog"]);
        app.handle(&Action::ClearCompleted, &EventInput::click());
        assert!(app.store().is_empty());
        assert!(!app.port().is_displayed(&Target::Class("main")));
    }

    #[test]
    fn unknown_key_is_ignored() {
        let mut app = two_tasks("#/");
        let before = app.port().to_html();
        app.execute(Command::ToggleCompleted(TaskKey::new("missing")));
        app.execute(Command::Remove(TaskKey::new("missing")));
        assert_eq!(app.port().to_html(), before);
        assert!(matches!(
            app.apply(Command::BeginEdit(TaskKey::new("missing"))),
            Err(AppError::Store(StoreError::NotFound(_)))
        ));
    }

    #[test]
    fn display_matches_slot_after_each_command() {
        let mut app = open_empty();
        type_new_task(&mut app, "one");
        type_new_task(&mut app, "two");
        app.execute(Command::ToggleCompleted(TaskKey::new("key-todo-0")));
        let saved = app.store().persistence().load();
        let shown: Vec<String> = app
            .port()
            .list_items()
            .iter()
            .map(|li| li.get_attr("data-key").unwrap().to_string())
            .collect();
        let saved_keys: Vec<String> = saved.iter().map(|t| t.key.to_string()).collect();
        assert_eq!(shown, saved_keys);
        assert!(saved[0].completed);
    }

    /// Reads serve the seeded slot, every write fails
    struct ReadOnlyStorage(Option<&'static str>);

    impl Storage for ReadOnlyStorage {
        fn get_item(&self, _name: &str) -> Result<Option<String>, StorageError> {
            Ok(self.0.map(String::from))
        }

        fn set_item(&mut self, name: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::WriteError {
                path: name.into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn failed_write_still_updates_display() {
        let store = TaskStore::open(Persistence::new(ReadOnlyStorage(None), "todos"));
        let mut app = App::open(store, Surface::new(), "").unwrap();
        let result = app.apply(Command::Add("kept in memory".into()));
        assert!(matches!(
            result,
            Err(AppError::Store(StoreError::Persist(_)))
        ));
        assert_eq!(app.store().len(), 1);
        assert_eq!(app.port().list_items().len(), 1);
        assert_eq!(app.port().text_of(&Target::Class("todo-count")), "1 items left");
    }

    #[test]
    fn failed_write_still_focuses_edit_field() {
        let seed = r#"[{"key":"key-todo-0","text":"Buy milk","completed":false,"editing":false}]"#;
        let store = TaskStore::open(Persistence::new(ReadOnlyStorage(Some(seed)), "todos"));
        let mut app = App::open(store, Surface::new(), "").unwrap();
        let key = TaskKey::new("key-todo-0");

        let result = app.apply(Command::BeginEdit(key.clone()));
        assert!(matches!(
            result,
            Err(AppError::Store(StoreError::Persist(_)))
        ));
        assert!(app.store().get(&key).unwrap().editing);
        let focused = app.port().focused().unwrap();
        assert!(focused.has_class("edit"));
        assert_eq!(focused.get_attr("value"), Some("Buy milk"));
    }
}

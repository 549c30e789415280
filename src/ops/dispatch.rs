use crate::model::task::TaskKey;
use crate::view::node::Action;

/// A store operation requested by a gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    ToggleCompleted(TaskKey),
    BeginEdit(TaskKey),
    SaveEdit(TaskKey, String),
    Remove(TaskKey),
    ClearCompleted,
    ToggleAll(bool),
}

/// What the host knows about a gesture at the moment it fires
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventInput {
    /// Key name for key presses (`"Enter"`, `"a"`, ...)
    pub key: Option<String>,
    /// Current value of the input the gesture happened in
    pub value: Option<String>,
    /// Checkbox state after a click
    pub checked: Option<bool>,
}

impl EventInput {
    pub fn click() -> Self {
        EventInput::default()
    }

    pub fn key_down(key: &str, value: &str) -> Self {
        EventInput {
            key: Some(key.to_string()),
            value: Some(value.to_string()),
            checked: None,
        }
    }

    pub fn blur(value: &str) -> Self {
        EventInput {
            value: Some(value.to_string()),
            ..EventInput::default()
        }
    }

    pub fn checkbox(checked: bool) -> Self {
        EventInput {
            checked: Some(checked),
            ..EventInput::default()
        }
    }

    fn is_enter(&self) -> bool {
        self.key.as_deref() == Some("Enter")
    }

    fn trimmed_value(&self) -> &str {
        self.value.as_deref().unwrap_or("").trim()
    }
}

/// Turn a bound action plus the gesture details into a command.
/// `None` means the gesture does nothing (wrong key, blank input).
pub fn translate(action: &Action, input: &EventInput) -> Option<Command> {
    match action {
        Action::NewTaskIfEnter => {
            let text = input.trimmed_value();
            (input.is_enter() && !text.is_empty()).then(|| Command::Add(text.to_string()))
        }
        Action::ToggleCompleted(key) => Some(Command::ToggleCompleted(key.clone())),
        Action::BeginEdit(key) => Some(Command::BeginEdit(key.clone())),
        Action::SaveEditIfEnter(key) => input
            .is_enter()
            .then(|| Command::SaveEdit(key.clone(), input.trimmed_value().to_string())),
        Action::SaveEdit(key) => Some(Command::SaveEdit(
            key.clone(),
            input.trimmed_value().to_string(),
        )),
        Action::Remove(key) => Some(Command::Remove(key.clone())),
        Action::ClearCompleted => Some(Command::ClearCompleted),
        Action::ToggleAll => Some(Command::ToggleAll(input.checked.unwrap_or(false))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> TaskKey {
        TaskKey::new("key-todo-1")
    }

    #[test]
    fn enter_in_new_field_adds_trimmed() {
        assert_eq!(
            translate(&Action::NewTaskIfEnter, &EventInput::key_down("Enter", "  Buy milk ")),
            Some(Command::Add("Buy milk".into()))
        );
    }

    #[test]
    fn other_keys_in_new_field_do_nothing() {
        assert_eq!(
            translate(&Action::NewTaskIfEnter, &EventInput::key_down("a", "Buy milk")),
            None
        );
    }

    #[test]
    fn blank_new_task_ignored() {
        for value in ["", "   ", "\t"] {
            assert_eq!(
                translate(&Action::NewTaskIfEnter, &EventInput::key_down("Enter", value)),
                None
            );
        }
    }

    #[test]
    fn clicks_map_to_task_commands() {
        let click = EventInput::click();
        assert_eq!(
            translate(&Action::ToggleCompleted(key()), &click),
            Some(Command::ToggleCompleted(key()))
        );
        assert_eq!(
            translate(&Action::BeginEdit(key()), &click),
            Some(Command::BeginEdit(key()))
        );
        assert_eq!(
            translate(&Action::Remove(key()), &click),
            Some(Command::Remove(key()))
        );
        assert_eq!(
            translate(&Action::ClearCompleted, &click),
            Some(Command::ClearCompleted)
        );
    }

    #[test]
    fn enter_in_edit_field_saves() {
        assert_eq!(
            translate(&Action::SaveEditIfEnter(key()), &EventInput::key_down("Enter", " new ")),
            Some(Command::SaveEdit(key(), "new".into()))
        );
        assert_eq!(
            translate(&Action::SaveEditIfEnter(key()), &EventInput::key_down("x", "new")),
            None
        );
    }

    #[test]
    fn blur_saves_even_when_blank() {
        assert_eq!(
            translate(&Action::SaveEdit(key()), &EventInput::blur("  ")),
            Some(Command::SaveEdit(key(), String::new()))
        );
    }

    #[test]
    fn toggle_all_uses_checkbox_state() {
        assert_eq!(
            translate(&Action::ToggleAll, &EventInput::checkbox(true)),
            Some(Command::ToggleAll(true))
        );
        assert_eq!(
            translate(&Action::ToggleAll, &EventInput::checkbox(false)),
            Some(Command::ToggleAll(false))
        );
    }
}

use crossterm::event::{KeyCode, KeyEvent};

use crate::io::storage::Storage;
use crate::model::task::TaskKey;
use crate::ops::dispatch::EventInput;
use crate::view::node::EventKind;
use crate::view::port::Target;

use crate::tui::app::{Mode, TuiApp};

use super::fire;

pub(super) fn handle_navigate<S: Storage>(tui: &mut TuiApp<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => tui.should_quit = true,

        // Cursor
        KeyCode::Char('j') | KeyCode::Down => {
            tui.cursor = tui.cursor.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            tui.cursor = tui.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => tui.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            tui.cursor = tui.visible_count().saturating_sub(1);
        }

        // Item gestures
        KeyCode::Char(' ') | KeyCode::Char('x') => {
            if let Some(task) = tui.selected_key() {
                fire(
                    tui,
                    &Target::Key(task),
                    &Target::Class("toggle"),
                    EventKind::Click,
                    EventInput::click(),
                );
            }
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(task) = tui.selected_key() {
                begin_edit(tui, task);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(task) = tui.selected_key() {
                fire(
                    tui,
                    &Target::Key(task),
                    &Target::Class("destroy"),
                    EventKind::Click,
                    EventInput::click(),
                );
            }
        }

        // Page-level gestures
        KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Char('n') => {
            tui.input.clear();
            tui.mode = Mode::NewTask;
        }
        KeyCode::Char('c') => {
            if tui.surface().is_displayed(&Target::Class("clear-completed")) {
                fire(
                    tui,
                    &Target::Root,
                    &Target::Class("clear-completed"),
                    EventKind::Click,
                    EventInput::click(),
                );
            }
        }
        KeyCode::Char('t') => {
            if tui.surface().is_displayed(&Target::Class("toggle-all")) {
                // The checkbox reads as checked once nothing is left active
                let checked = tui.app.store().active_count() > 0;
                fire(
                    tui,
                    &Target::Root,
                    &Target::Class("toggle-all"),
                    EventKind::Click,
                    EventInput::checkbox(checked),
                );
            }
        }

        // Routes
        KeyCode::Char('1') => tui.app.navigate("#/"),
        KeyCode::Char('2') => tui.app.navigate("#/active"),
        KeyCode::Char('3') => tui.app.navigate("#/completed"),

        _ => {}
    }
}

/// Double-click the item's label, then take over the edit field it opens
fn begin_edit<S: Storage>(tui: &mut TuiApp<S>, task: TaskKey) {
    let action = tui
        .surface()
        .find_in(&Target::Key(task.clone()), &Target::Class("view"))
        .and_then(|view| view.child_elements().find(|c| c.tag == "label"))
        .and_then(|label| label.binding(EventKind::DblClick).cloned());
    let Some(action) = action else {
        return;
    };
    tui.app.handle(&action, &EventInput::click());

    let value = tui
        .surface()
        .focused()
        .filter(|el| el.has_class("edit"))
        .map(|el| el.get_attr("value").unwrap_or_default().to_string());
    if let Some(value) = value {
        tui.input = value;
        tui.mode = Mode::Edit(task);
    }
}

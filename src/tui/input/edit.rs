use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::storage::Storage;
use crate::model::task::TaskKey;
use crate::ops::dispatch::EventInput;
use crate::util::unicode::pop_grapheme;
use crate::view::node::EventKind;
use crate::view::port::Target;

use crate::tui::app::{Mode, TuiApp};

use super::fire;

/// Shared line-editing keys. Returns true if the key was consumed.
fn edit_buffer(input: &mut String, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Backspace => {
            pop_grapheme(input);
            true
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            input.push(c);
            true
        }
        _ => false,
    }
}

/// The new-task field: Enter submits and keeps the field open, Esc leaves
pub(super) fn handle_new_task<S: Storage>(tui: &mut TuiApp<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            tui.input.clear();
            tui.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            let before = tui.app.store().len();
            let input = EventInput::key_down("Enter", &tui.input);
            fire(
                tui,
                &Target::Root,
                &Target::Class("new-todo"),
                EventKind::KeyDown,
                input,
            );
            // The controller clears the field after an add; a rejected
            // submission keeps what was typed
            if tui.app.store().len() > before {
                tui.input = tui
                    .surface()
                    .find(&Target::Class("new-todo"))
                    .and_then(|el| el.get_attr("value"))
                    .unwrap_or_default()
                    .to_string();
                tui.cursor = tui.visible_count().saturating_sub(1);
            }
        }
        _ => {
            edit_buffer(&mut tui.input, key);
        }
    }
}

/// An item's edit field: Enter saves, Esc blurs (which also saves)
pub(super) fn handle_edit<S: Storage>(tui: &mut TuiApp<S>, task: TaskKey, key: KeyEvent) {
    let (event, input) = match key.code {
        KeyCode::Enter => (EventKind::KeyDown, EventInput::key_down("Enter", &tui.input)),
        KeyCode::Esc => (EventKind::Blur, EventInput::blur(&tui.input)),
        _ => {
            edit_buffer(&mut tui.input, key);
            return;
        }
    };
    fire(
        tui,
        &Target::Key(task),
        &Target::Class("edit"),
        event,
        input,
    );
    tui.input.clear();
    tui.mode = Mode::Navigate;
}

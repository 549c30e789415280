mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::storage::Storage;
use crate::ops::dispatch::EventInput;
use crate::view::node::EventKind;
use crate::view::port::Target;

use super::app::{Mode, TuiApp};

use edit::{handle_edit, handle_new_task};
use navigate::handle_navigate;

/// Handle a key event in the current mode
pub fn handle_key<S: Storage>(tui: &mut TuiApp<S>, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        tui.should_quit = true;
        return;
    }

    match tui.mode.clone() {
        Mode::Navigate => handle_navigate(tui, key),
        Mode::NewTask => handle_new_task(tui, key),
        Mode::Edit(task) => handle_edit(tui, task, key),
    }
    tui.clamp_cursor();
}

/// Handle a bracketed paste. Only text-entry modes take it, and line
/// breaks become spaces since both fields are single-line.
pub fn handle_paste<S: Storage>(tui: &mut TuiApp<S>, text: &str) {
    if tui.mode == Mode::Navigate || text.is_empty() {
        return;
    }
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    tui.input.push_str(&flat);
}

/// Fire whatever `inner` (inside `outer`) has bound to `event`.
/// Returns false if nothing on the surface answers.
fn fire<S: Storage>(
    tui: &mut TuiApp<S>,
    outer: &Target,
    inner: &Target,
    event: EventKind,
    input: EventInput,
) -> bool {
    match tui.surface().action(outer, inner, event) {
        Some(action) => {
            tui.app.handle(&action, &input);
            true
        }
        None => {
            tracing::debug!(%outer, %inner, ?event, "no binding");
            false
        }
    }
}

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::app::App;
use crate::io::persist::Persistence;
use crate::io::storage::MemoryStorage;
use crate::model::UiConfig;
use crate::ops::store::TaskStore;
use crate::tui::app::TuiApp;
use crate::view::surface::Surface;

pub const TERM_W: u16 = 60;
pub const TERM_H: u16 = 12;

/// Render the whole screen into an in-memory buffer and return plain text
/// (no styles).
pub fn render_to_string(w: u16, h: u16, tui: &TuiApp<MemoryStorage>) -> String {
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| super::render(frame, tui))
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// A TUI over an in-memory slot holding `json`, opened at `fragment`
pub fn tui_with(json: &str, fragment: &str) -> TuiApp<MemoryStorage> {
    let storage = MemoryStorage::new().with_item("todos", json);
    let store = TaskStore::open(Persistence::new(storage, "todos"));
    let app = App::open(store, Surface::new(), fragment).unwrap();
    TuiApp::new(app, &UiConfig::default())
}

/// "Buy milk" (active) and "Walk dog" (completed)
pub const TWO_TASKS: &str = r#"[
    {"key":"key-todo-0","text":"Buy milk","completed":false,"editing":false},
    {"key":"key-todo-1","text":"Walk dog","completed":true,"editing":false}
]"#;

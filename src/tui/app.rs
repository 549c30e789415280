use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::app::App;
use crate::io::config_io::read_config;
use crate::io::persist::Persistence;
use crate::io::storage::{FileStorage, Storage};
use crate::model::UiConfig;
use crate::model::task::TaskKey;
use crate::ops::store::TaskStore;
use crate::view::surface::Surface;

use super::input;
use super::render;
use super::theme::Theme;

/// What keystrokes currently drive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Moving the cursor and firing item gestures
    Navigate,
    /// Typing into the new-task field
    NewTask,
    /// Typing into the edit field of one item
    Edit(TaskKey),
}

/// Terminal state layered over the controller. Everything drawn comes
/// from the controller's surface; only the cursor and the text being
/// typed live here.
pub struct TuiApp<S: Storage> {
    pub app: App<S, Surface>,
    pub mode: Mode,
    /// Index into the visible list items
    pub cursor: usize,
    /// Text of the focused input field
    pub input: String,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub should_quit: bool,
}

impl<S: Storage> TuiApp<S> {
    pub fn new(app: App<S, Surface>, ui: &UiConfig) -> Self {
        TuiApp {
            app,
            mode: Mode::Navigate,
            cursor: 0,
            input: String::new(),
            theme: Theme::from_config(ui),
            show_key_hints: ui.show_key_hints,
            should_quit: false,
        }
    }

    pub fn surface(&self) -> &Surface {
        self.app.port()
    }

    pub fn visible_count(&self) -> usize {
        self.surface().list_items().len()
    }

    /// Key of the item under the cursor
    pub fn selected_key(&self) -> Option<TaskKey> {
        self.surface()
            .list_items()
            .get(self.cursor)
            .and_then(|li| li.get_attr("data-key"))
            .map(TaskKey::from)
    }

    /// Keep the cursor on a visible item after the list changes
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_count();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

pub fn run(data_dir: &Path, route: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = read_config(data_dir)?;
    let persistence = Persistence::new(FileStorage::new(data_dir), config.storage.slot.clone());
    let app = App::open(TaskStore::open(persistence), Surface::new(), route)?;
    let mut tui = TuiApp::new(app, &config.ui);
    tracing::info!(dir = %data_dir.display(), route, "terminal UI started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut tui);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop<S: Storage>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    tui: &mut TuiApp<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, tui))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(tui, key);
                }
                Event::Paste(text) => input::handle_paste(tui, &text),
                _ => {}
            }
        }

        if tui.should_quit {
            break;
        }
    }
    Ok(())
}

pub mod footer;
pub mod header;
pub mod status_row;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::io::storage::Storage;

use super::app::TuiApp;

/// Main render function: lays out the page regions and draws each one
/// from the controller's surface.
pub fn render<S: Storage>(frame: &mut Frame, tui: &TuiApp<S>) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(tui.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let hint_rows = if tui.show_key_hints { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),         // title + new-task field + gap
            Constraint::Min(1),            // task list
            Constraint::Length(1),         // count, filters, clear
            Constraint::Length(hint_rows), // key hints
        ])
        .split(area);

    header::render_header(frame, tui, chunks[0]);
    task_list::render_task_list(frame, tui, chunks[1]);
    footer::render_footer(frame, tui, chunks[2]);
    if tui.show_key_hints {
        status_row::render_status_row(frame, tui, chunks[3]);
    }
}

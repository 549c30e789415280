use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::Storage;
use crate::tui::app::{Mode, TuiApp};
use crate::util::unicode::truncate_to_width;

/// Render the key hint row (bottom of screen)
pub fn render_status_row<S: Storage>(frame: &mut Frame, tui: &TuiApp<S>, area: Rect) {
    let bg = tui.theme.background;
    let hint = match tui.mode {
        Mode::Navigate => {
            " a add  space toggle  e edit  d delete  t toggle all  c clear  1/2/3 route  q quit"
        }
        Mode::NewTask => " Enter add  Esc done",
        Mode::Edit(_) => " Enter save  Esc save & close",
    };
    let line = Line::from(Span::styled(
        truncate_to_width(hint, area.width as usize),
        Style::default().fg(tui.theme.dim).bg(bg),
    ));
    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

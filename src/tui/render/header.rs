use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::Storage;
use crate::tui::app::{Mode, TuiApp};
use crate::util::unicode::tail_to_width;
use crate::view::port::Target;

const PROMPT: &str = " \u{203A} "; // ›

/// Page title, then the new-task field
pub fn render_header<S: Storage>(frame: &mut Frame, tui: &TuiApp<S>, area: Rect) {
    let theme = &tui.theme;
    let bg = theme.background;
    let surface = tui.surface();

    let title = surface
        .find(&Target::Class("header"))
        .and_then(|h| h.child_elements().find(|c| c.tag == "h1"))
        .map(|h1| h1.text_content())
        .unwrap_or_default();
    let title_line = Line::from(Span::styled(
        title,
        Style::default()
            .fg(theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ))
    .centered();

    let mut field = vec![Span::styled(PROMPT, Style::default().fg(theme.dim).bg(bg))];
    if tui.mode == Mode::NewTask {
        // Leave room for the prompt and the cursor cell
        let room = (area.width as usize).saturating_sub(PROMPT.chars().count() + 1);
        field.push(Span::styled(
            tail_to_width(&tui.input, room).to_string(),
            Style::default().fg(theme.text_bright).bg(bg),
        ));
        field.push(Span::styled(
            "\u{258C}", // ▌ cursor
            Style::default().fg(theme.highlight).bg(bg),
        ));
    } else {
        let placeholder = surface
            .find(&Target::Class("new-todo"))
            .and_then(|el| el.get_attr("placeholder"))
            .unwrap_or_default()
            .to_string();
        field.push(Span::styled(
            placeholder,
            Style::default()
                .fg(theme.dim)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    let paragraph =
        Paragraph::new(vec![title_line, Line::from(field)]).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

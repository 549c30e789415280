use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::Storage;
use crate::tui::app::TuiApp;
use crate::view::port::Target;

/// Count, route links and the clear-completed button
pub fn render_footer<S: Storage>(frame: &mut Frame, tui: &TuiApp<S>, area: Rect) {
    let theme = &tui.theme;
    let bg = theme.background;
    let surface = tui.surface();
    if !surface.is_displayed(&Target::Class("footer")) {
        return;
    }

    let mut spans = vec![Span::styled(
        format!(" {}", surface.text_of(&Target::Class("todo-count"))),
        Style::default().fg(theme.text).bg(bg),
    )];

    let links = surface
        .find(&Target::Class("filters"))
        .into_iter()
        .flat_map(|ul| ul.child_elements())
        .flat_map(|li| li.child_elements());
    for (i, link) in links.enumerate() {
        let sep = if i == 0 { "   " } else { "  " };
        spans.push(Span::styled(sep, Style::default().bg(bg)));
        let style = if link.has_class("selected") {
            Style::default()
                .fg(theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim).bg(bg)
        };
        spans.push(Span::styled(link.text_content(), style));
    }

    if surface.is_displayed(&Target::Class("clear-completed")) {
        spans.push(Span::styled("   ", Style::default().bg(bg)));
        spans.push(Span::styled(
            surface.text_of(&Target::Class("clear-completed")),
            Style::default().fg(theme.text).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::Storage;
use crate::tui::app::{Mode, TuiApp};
use crate::util::unicode::{display_width, tail_to_width, truncate_to_width};
use crate::view::node::Element;
use crate::view::port::Target;

/// Cursor marker, space, checkbox, space
const ROW_PREFIX_WIDTH: usize = 6;

/// Whether the item's checkbox is ticked. The item class can read
/// `editing` for a completed task, so the checkbox is the source here.
fn is_checked(li: &Element) -> bool {
    li.child_elements()
        .find(|c| c.has_class("view"))
        .and_then(|view| view.child_elements().find(|c| c.has_class("toggle")))
        .is_some_and(|toggle| toggle.get_attr("checked").is_some())
}

/// Render the `.todo-list` region, one row per item
pub fn render_task_list<S: Storage>(frame: &mut Frame, tui: &TuiApp<S>, area: Rect) {
    let theme = &tui.theme;
    let bg = theme.background;
    let surface = tui.surface();

    // The whole main section is hidden while there are no tasks
    if !surface.is_displayed(&Target::Class("main")) {
        return;
    }

    let items = surface.list_items();
    if items.is_empty() {
        let empty = Paragraph::new(" No tasks").style(Style::default().fg(theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width as usize;
    let visible_height = (area.height as usize).max(1);
    let cursor = tui.cursor.min(items.len() - 1);
    let scroll = cursor.saturating_sub(visible_height - 1);
    let end = items.len().min(scroll + visible_height);
    let text_room = width.saturating_sub(ROW_PREFIX_WIDTH);

    let mut lines: Vec<Line> = Vec::with_capacity(end - scroll);
    for (li, row) in items[scroll..end].iter().zip(scroll..end) {
        let is_cursor = row == cursor;
        let checked = is_checked(li);
        let row_bg = if is_cursor { theme.selection_bg } else { bg };
        let editing_here = match &tui.mode {
            Mode::Edit(task) => li.get_attr("data-key") == Some(task.as_str()),
            _ => false,
        };

        let marker = if is_cursor { "\u{258C}" } else { " " }; // ▌
        let mut spans = vec![
            Span::styled(marker, Style::default().fg(theme.highlight).bg(row_bg)),
            Span::styled(" ", Style::default().bg(row_bg)),
            Span::styled(
                if checked { "[x]" } else { "[ ]" },
                Style::default()
                    .fg(if checked { theme.green } else { theme.text })
                    .bg(row_bg),
            ),
            Span::styled(" ", Style::default().bg(row_bg)),
        ];

        if editing_here {
            spans.push(Span::styled(
                tail_to_width(&tui.input, text_room.saturating_sub(1)).to_string(),
                Style::default().fg(theme.text_bright).bg(row_bg),
            ));
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(theme.highlight).bg(row_bg),
            ));
        } else {
            let mut style = Style::default().bg(row_bg);
            style = if checked {
                style.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT)
            } else if is_cursor {
                style.fg(theme.text_bright)
            } else {
                style.fg(theme.text)
            };
            spans.push(Span::styled(
                truncate_to_width(&li.text_content(), text_room),
                style,
            ));
        }

        // Fill the rest of the cursor row
        if is_cursor {
            let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
            if used < width {
                spans.push(Span::styled(
                    " ".repeat(width - used),
                    Style::default().bg(row_bg),
                ));
            }
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

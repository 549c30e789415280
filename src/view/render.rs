use crate::model::task::{Filter, Task};
use crate::ops::router::fragment;

use super::node::{Action, Element, EventKind, View};

/// One keyed list item per task
pub fn render_task_list(tasks: &[&Task]) -> View {
    View::Fragment(tasks.iter().map(|t| render_task(t)).collect())
}

/// A single list item. The edit field only exists while editing.
pub fn render_task(task: &Task) -> View {
    let mut toggle = Element::new("input").class("toggle").attr("type", "checkbox");
    if task.completed {
        toggle = toggle.flag("checked");
    }
    let toggle = toggle.on(EventKind::Click, Action::ToggleCompleted(task.key.clone()));

    let view = Element::new("div")
        .class("view")
        .child(toggle)
        .child(
            Element::new("label")
                .on(EventKind::DblClick, Action::BeginEdit(task.key.clone()))
                .text(task.text.clone()),
        )
        .child(
            Element::new("button")
                .class("destroy")
                .on(EventKind::Click, Action::Remove(task.key.clone())),
        );

    let mut item = Element::new("li")
        .keyed(task.key.clone())
        .attr("data-key", task.key.as_str())
        .class(task.state_class())
        .child(view);

    if task.editing {
        item = item.child(
            Element::new("input")
                .class("edit")
                .attr("value", task.text.clone())
                .on(EventKind::KeyDown, Action::SaveEditIfEnter(task.key.clone()))
                .on(EventKind::Blur, Action::SaveEdit(task.key.clone())),
        );
    }
    item.into()
}

/// The "N items left" region. The wording does not pluralize.
pub fn render_count(active_count: usize) -> View {
    Element::new("span")
        .class("todo-count")
        .child(Element::new("strong").text(active_count.to_string()))
        .text(" items left")
        .into()
}

/// Route links, with the current one marked `selected`
pub fn render_filters(current: Filter) -> View {
    let items = Filter::ALL.iter().map(|&f| {
        let mut link = Element::new("a").attr("href", fragment(f));
        if f == current {
            link = link.class("selected");
        }
        View::from(Element::new("li").child(link.text(f.label())))
    });
    Element::new("ul").class("filters").children(items).into()
}

/// Full page scaffold, rendered once into the root. Regions inside it are
/// replaced in place afterwards.
pub fn render_app() -> View {
    let header = Element::new("header")
        .class("header")
        .child(Element::new("h1").text("todos"))
        .child(
            Element::new("input")
                .class("new-todo")
                .attr("placeholder", "What needs to be done?")
                .flag("autofocus")
                .on(EventKind::KeyDown, Action::NewTaskIfEnter),
        );

    let footer = Element::new("footer")
        .class("footer")
        .child(Element::new("span").class("todo-count"))
        .child(render_filters(Filter::All))
        .child(
            Element::new("button")
                .class("clear-completed")
                .on(EventKind::Click, Action::ClearCompleted)
                .text("Clear completed"),
        );

    let main = Element::new("section")
        .attr("style", "display:none")
        .class("main")
        .child(
            Element::new("input")
                .attr("id", "toggle-all")
                .class("toggle-all")
                .attr("type", "checkbox")
                .on(EventKind::Click, Action::ToggleAll),
        )
        .child(
            Element::new("label")
                .attr("for", "toggle-all")
                .text("Mark all as complete"),
        )
        .child(Element::new("ul").class("todo-list"))
        .child(footer);

    View::Fragment(vec![header.into(), main.into()])
}

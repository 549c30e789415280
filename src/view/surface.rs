use super::html::element_to_html;
use super::node::{Action, Element, EventKind, View};
use super::port::{Display, RenderError, RenderOptions, RenderPort, Target};

/// An in-memory display surface: a retained element tree that render
/// calls mutate. The terminal UI draws from it and tests inspect it.
#[derive(Debug, Clone)]
pub struct Surface {
    root: Element,
    focus: Option<Target>,
}

impl Default for Surface {
    fn default() -> Self {
        Surface::new()
    }
}

impl Surface {
    /// An empty `<section class="todoapp">` root
    pub fn new() -> Self {
        Surface {
            root: Element::new("section").class("todoapp"),
            focus: None,
        }
    }

    pub fn find(&self, target: &Target) -> Option<&Element> {
        match target {
            Target::Root => Some(&self.root),
            _ => find(&self.root, target),
        }
    }

    /// Find `inner` among the descendants of `outer`
    pub fn find_in(&self, outer: &Target, inner: &Target) -> Option<&Element> {
        let outer = self.find(outer)?;
        outer
            .child_elements()
            .find_map(|c| if inner.matches(c) { Some(c) } else { find(c, inner) })
    }

    /// The action bound to `event` on `inner` inside `outer`
    pub fn action(&self, outer: &Target, inner: &Target, event: EventKind) -> Option<Action> {
        self.find_in(outer, inner)?.binding(event).cloned()
    }

    /// True when the target exists and neither it nor an ancestor is hidden
    pub fn is_displayed(&self, target: &Target) -> bool {
        if hidden(&self.root) {
            return false;
        }
        match target {
            Target::Root => true,
            _ => displayed(&self.root, target).unwrap_or(false),
        }
    }

    /// Current children of the `.todo-list` region
    pub fn list_items(&self) -> Vec<&Element> {
        self.find(&Target::Class("todo-list"))
            .map(|list| list.child_elements().collect())
            .unwrap_or_default()
    }

    /// Text of a region, or empty if it does not exist
    pub fn text_of(&self, target: &Target) -> String {
        self.find(target)
            .map(Element::text_content)
            .unwrap_or_default()
    }

    /// The focused element, if it still exists
    pub fn focused(&self) -> Option<&Element> {
        self.find(self.focus.as_ref()?)
    }

    pub fn to_html(&self) -> String {
        element_to_html(&self.root)
    }

    fn find_mut(&mut self, target: &Target) -> Result<&mut Element, RenderError> {
        let found = match target {
            Target::Root => Some(&mut self.root),
            _ => find_mut(&mut self.root, target),
        };
        found.ok_or_else(|| RenderError::NoTarget(target.clone()))
    }
}

impl RenderPort for Surface {
    fn render(
        &mut self,
        view: View,
        target: &Target,
        options: RenderOptions,
    ) -> Result<(), RenderError> {
        if options.replace && *target != Target::Root {
            let mut nodes = Some(view.into_nodes());
            if replace_in(&mut self.root, target, &mut nodes) {
                return Ok(());
            }
            return Err(RenderError::NoTarget(target.clone()));
        }
        let el = self.find_mut(target)?;
        el.children = view.into_nodes();
        Ok(())
    }

    fn set_display(&mut self, target: &Target, display: Display) -> Result<(), RenderError> {
        self.find_mut(target)?.set_attr("style", display.style());
        Ok(())
    }

    fn set_value(&mut self, target: &Target, value: &str) -> Result<(), RenderError> {
        self.find_mut(target)?.set_attr("value", value);
        Ok(())
    }

    fn focus(&mut self, target: &Target) -> Result<(), RenderError> {
        self.find_mut(target)?;
        self.focus = Some(target.clone());
        Ok(())
    }
}

fn hidden(el: &Element) -> bool {
    el.get_attr("style") == Some(Display::None.style())
}

/// Depth-first, document order
fn find<'a>(el: &'a Element, target: &Target) -> Option<&'a Element> {
    for child in el.child_elements() {
        if target.matches(child) {
            return Some(child);
        }
        if let Some(found) = find(child, target) {
            return Some(found);
        }
    }
    None
}

fn find_mut<'a>(el: &'a mut Element, target: &Target) -> Option<&'a mut Element> {
    for child in el.children.iter_mut() {
        if let View::Element(child) = child {
            if target.matches(child) {
                return Some(child);
            }
            if let Some(found) = find_mut(child, target) {
                return Some(found);
            }
        }
    }
    None
}

/// `Some(visible)` once the target is found below `el`
fn displayed(el: &Element, target: &Target) -> Option<bool> {
    for child in el.child_elements() {
        if target.matches(child) {
            return Some(!hidden(child));
        }
        if let Some(visible) = displayed(child, target) {
            return Some(visible && !hidden(child));
        }
    }
    None
}

/// Splice `nodes` in place of the first element matching `target`
fn replace_in(el: &mut Element, target: &Target, nodes: &mut Option<Vec<View>>) -> bool {
    let pos = el
        .children
        .iter()
        .position(|c| matches!(c, View::Element(child) if target.matches(child)));
    if let Some(pos) = pos {
        let tail = el.children.split_off(pos + 1);
        el.children.pop();
        el.children.extend(nodes.take().unwrap_or_default());
        el.children.extend(tail);
        return true;
    }
    for child in el.children.iter_mut() {
        if let View::Element(child) = child
            && replace_in(child, target, nodes)
        {
            return true;
        }
    }
    false
}

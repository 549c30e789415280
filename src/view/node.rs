//! Declarative view descriptions.
//!
//! A [`View`] says what should be on screen: elements with attributes,
//! event bindings and children. It never touches a display surface
//! itself; a [`RenderPort`](super::port::RenderPort) reconciles it.

use crate::model::task::TaskKey;

/// Gesture kinds a binding can listen for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    DblClick,
    KeyDown,
    Blur,
}

/// What a bound gesture means. Carries the task key instead of closing over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Key press in the new-task field
    NewTaskIfEnter,
    ToggleCompleted(TaskKey),
    BeginEdit(TaskKey),
    /// Key press in a task's edit field
    SaveEditIfEnter(TaskKey),
    /// Edit field lost focus
    SaveEdit(TaskKey),
    Remove(TaskKey),
    ClearCompleted,
    ToggleAll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub event: EventKind,
    pub action: Action,
}

/// An attribute. `value: None` is a bare boolean attribute (`checked`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: &'static str,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<Attr>,
    pub bindings: Vec<Binding>,
    pub children: Vec<View>,
    /// Reconciliation key: lets a reconciler match this node across renders
    pub key: Option<TaskKey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Element(Element),
    Text(String),
    /// Several sibling nodes without a wrapper
    Fragment(Vec<View>),
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Element {
            tag,
            attrs: Vec::new(),
            bindings: Vec::new(),
            children: Vec::new(),
            key: None,
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push(Attr {
            name,
            value: Some(value.into()),
        });
        self
    }

    pub fn flag(mut self, name: &'static str) -> Self {
        self.attrs.push(Attr { name, value: None });
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn on(mut self, event: EventKind, action: Action) -> Self {
        self.bindings.push(Binding { event, action });
        self
    }

    pub fn child(mut self, child: impl Into<View>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = View>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(View::Text(text.into()))
    }

    pub fn keyed(mut self, key: TaskKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Attribute value; `Some("")` for a bare boolean attribute
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    /// Set or replace an attribute, keeping its position if present
    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        let value = Some(value.into());
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => self.attrs.push(Attr { name, value }),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    pub fn binding(&self, event: EventKind) -> Option<&Action> {
        self.bindings
            .iter()
            .find(|b| b.event == event)
            .map(|b| &b.action)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Direct element children (text nodes skipped)
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            View::Element(el) => Some(el),
            _ => None,
        })
    }
}

impl View {
    /// The nodes this view contributes to a parent (fragments are flattened)
    pub fn into_nodes(self) -> Vec<View> {
        match self {
            View::Fragment(nodes) => nodes.into_iter().flat_map(View::into_nodes).collect(),
            other => vec![other],
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            View::Text(t) => out.push_str(t),
            View::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
            View::Fragment(nodes) => {
                for n in nodes {
                    n.collect_text(out);
                }
            }
        }
    }
}

impl From<Element> for View {
    fn from(el: Element) -> Self {
        View::Element(el)
    }
}

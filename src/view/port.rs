use std::fmt;

use crate::model::task::TaskKey;

use super::node::{Element, View};

/// Where a render call lands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The application root container
    Root,
    /// First element (document order) carrying this class
    Class(&'static str),
    /// The list item whose `data-key` equals the key
    Key(TaskKey),
}

impl Target {
    pub fn matches(&self, el: &Element) -> bool {
        match self {
            Target::Root => false,
            Target::Class(class) => el.has_class(class),
            Target::Key(key) => el.get_attr("data-key") == Some(key.as_str()),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Root => write!(f, "root"),
            Target::Class(class) => write!(f, ".{}", class),
            Target::Key(key) => write!(f, "[data-key=\"{}\"]", key),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Replace the target node itself instead of its contents
    pub replace: bool,
}

impl RenderOptions {
    pub const REPLACE: RenderOptions = RenderOptions { replace: true };
}

/// Values of the inline `display` style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    None,
    Block,
    Inline,
}

impl Display {
    pub fn style(self) -> &'static str {
        match self {
            Display::None => "display:none",
            Display::Block => "display:block",
            Display::Inline => "display:inline",
        }
    }
}

/// Error type for render port calls
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no element matches {0}")]
    NoTarget(Target),
}

/// The reconciler seam. Implementations turn view descriptions into
/// whatever the display surface is; the core only ever talks to this.
pub trait RenderPort {
    /// Render `view` into (or, with `replace`, in place of) the target
    fn render(
        &mut self,
        view: View,
        target: &Target,
        options: RenderOptions,
    ) -> Result<(), RenderError>;

    /// Show or hide a region through its inline style
    fn set_display(&mut self, target: &Target, display: Display) -> Result<(), RenderError>;

    /// Set the current value of an input
    fn set_value(&mut self, target: &Target, value: &str) -> Result<(), RenderError>;

    /// Move input focus to the target
    fn focus(&mut self, target: &Target) -> Result<(), RenderError>;
}

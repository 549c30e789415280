pub mod html;
pub mod node;
pub mod port;
pub mod render;
pub mod surface;

pub use node::{Action, Element, EventKind, View};
pub use port::{Display, RenderError, RenderOptions, RenderPort, Target};
pub use surface::Surface;

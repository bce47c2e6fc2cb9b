//! Rendering seam between the toast manager and whatever draws the toasts.
//!
//! A host is a DOM-like surface: it can tell whether an element id exists,
//! create the container, inject a style block, mount toast elements and
//! toggle classes on them. All calls are synchronous and infallible; a host
//! that cannot honour one degrades silently.

mod console;
mod memory;

pub use console::ConsoleHost;
pub use memory::MemoryHost;

use serde::Serialize;

use crate::toast::ToastView;
use crate::types::Position;

/// Class toggled on a toast element while it is on screen.
pub const SHOW_CLASS: &str = "show";

/// Description of the single container element.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ContainerSpec {
    pub element_id: String,
    pub classes: Vec<String>,
    pub position: Position,
}

impl ContainerSpec {
    #[must_use]
    pub fn new(element_id: impl Into<String>, position: Position) -> Self {
        Self {
            element_id: element_id.into(),
            classes: ["toster-wrapper", "fixed", "z-50", "overflow-hidden"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            position,
        }
    }
}

pub trait PresentationHost: Send + Sync + 'static {
    /// Whether any element (container, style block or toast) has this id.
    fn contains(&self, element_id: &str) -> bool;

    /// Remove an element and its children. Returns `false` if it was absent.
    fn remove(&self, element_id: &str) -> bool;

    fn create_container(&self, container: &ContainerSpec);

    fn inject_style(&self, style_id: &str, css: &str);

    /// Append a toast to the end of the container.
    fn mount_toast(&self, container_id: &str, view: &ToastView);

    fn set_class(&self, element_id: &str, class: &str, enabled: bool);
}

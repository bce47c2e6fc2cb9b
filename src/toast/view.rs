use serde::Serialize;

use crate::types::{Position, Theme};

use super::ToastConfig;
use super::message::trim_message;

pub const BORDER_FALLBACK: &str = "#3b82f6";
pub const CLOSE_LABEL: &str = "\u{d7}";

/// Style rules injected once per host under the manager's style id.
pub const STYLESHEET: &str = r".toster-wrapper { width: max-content; }
.toster-toast {
  transform: translateX(600px);
  transition: transform 1s ease-in-out;
  width: 20rem;
  height: 5rem;
  padding: 0.5rem 0 0.5rem 1.25rem;
  background-color: white;
  border-radius: 0.5rem;
  display: grid;
  grid-template-columns: 1.2fr 6fr 0.5fr;
  align-content: space-around;
  position: relative;
  border-left: 8px solid #3b82f6;
  margin-bottom: 0.5rem;
}
.toster-toast.show { transform: translateX(0); }
.toster-toast .toster-icon, .toster-toast .toster-content { align-self: center; }
.toster-toast .toster-title { color: #111827; font-weight: 600; font-size: 0.875rem; margin: 0; }
.toster-toast .toster-message { color: #6b7280; font-weight: 200; font-size: 0.75rem; margin: 0; }
.toster-toast .toster-close {
  align-self: start;
  background: transparent;
  font-size: 1.5rem;
  line-height: 1;
  color: #6b7280;
  cursor: pointer;
  border: 0;
  padding: 0;
}
.toster-toast .toster-close:hover { color: #374151; }
.toster-toast.dark { background-color: #1f2937; }
.toster-toast.dark .toster-title { color: #f9fafb; }
.toster-toast.dark .toster-message { color: #d1d5db; }
.toster-toast.dark .toster-close { color: #9ca3af; }
.toster-toast.dark .toster-close:hover { color: #d1d5db; }
";

/// Map a border colour class to its hex value.
#[must_use]
pub fn border_hex(class: &str) -> &'static str {
    match class {
        "border-blue-500" => "#3b82f6",
        "border-green-500" => "#10b981",
        "border-red-500" => "#ef4444",
        "border-yellow-500" => "#f59e0b",
        "border-purple-500" => "#8b5cf6",
        "border-gray-500" => "#6b7280",
        _ => BORDER_FALLBACK,
    }
}

/// Everything a host needs to render one toast element.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ToastView {
    pub element_id: String,
    pub classes: Vec<String>,
    pub border_style: String,
    pub icon_class: String,
    /// The icon is decorative; screen readers should skip it.
    pub icon_aria_hidden: bool,
    pub title: String,
    pub message_html: String,
    pub close_label: &'static str,
    pub position: Position,
}

impl ToastView {
    #[must_use]
    pub fn build(element_id: String, config: &ToastConfig, max_message_len: usize) -> Self {
        let mut classes = vec!["toster-toast".to_string()];
        if config.theme == Theme::Dark {
            classes.push("dark".to_string());
        }

        Self {
            element_id,
            classes,
            border_style: format!("8px solid {}", border_hex(&config.border_color)),
            icon_class: format!("fa {} text-4xl {}", config.icon, config.icon_color),
            icon_aria_hidden: true,
            title: config.title.clone(),
            message_html: trim_message(&config.message, max_message_len),
            close_label: CLOSE_LABEL,
            position: config.position,
        }
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

//! Toast configuration and its merge rules.
//!
//! A [`ToastConfig`] is always complete. Callers describe what they want with
//! a partial [`ToastOptions`]; [`ToastConfig::merge`] lays those options over
//! the manager defaults one field at a time, the caller's value winning.

mod message;
mod view;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DurationMilliSeconds, PickFirst, serde_as};

use crate::config::HumantimeDuration;
use crate::types::{Position, Severity, Theme};

pub use message::{ELLIPSIS, strip_markup, trim_message};
pub use view::{BORDER_FALLBACK, CLOSE_LABEL, STYLESHEET, ToastView, border_hex};

pub const DEFAULT_AUTO_CLOSE_DELAY: Duration = Duration::from_millis(8_000);

#[serde_as]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ToastConfig {
    pub icon: String,
    pub icon_color: String,
    pub border_color: String,
    pub title: String,
    pub message: String,
    pub auto_close: bool,
    #[serde_as(as = "HumantimeDuration")]
    pub auto_close_delay: Duration,
    pub theme: Theme,
    pub position: Position,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            icon: "fa-info-circle".to_string(),
            icon_color: "text-blue-500".to_string(),
            border_color: "border-blue-500".to_string(),
            title: "Notification".to_string(),
            message: "This is a notification message".to_string(),
            auto_close: true,
            auto_close_delay: DEFAULT_AUTO_CLOSE_DELAY,
            theme: Theme::Light,
            position: Position::BottomRight,
        }
    }
}

impl ToastConfig {
    /// Shallow merge: every field set in `options` replaces the default,
    /// every other field keeps it.
    #[must_use]
    pub fn merge(&self, options: ToastOptions) -> Self {
        let base = self.clone();
        Self {
            icon: options.icon.unwrap_or(base.icon),
            icon_color: options.icon_color.unwrap_or(base.icon_color),
            border_color: options.border_color.unwrap_or(base.border_color),
            title: options.title.unwrap_or(base.title),
            message: options.message.unwrap_or(base.message),
            auto_close: options.auto_close.unwrap_or(base.auto_close),
            auto_close_delay: options.auto_close_delay.unwrap_or(base.auto_close_delay),
            theme: options.theme.unwrap_or(base.theme),
            position: options.position.unwrap_or(base.position),
        }
    }
}

/// Partial toast description supplied by callers.
///
/// Deserializes from both snake_case and the camelCase names used by browser
/// callers. Unknown fields are ignored, and so is any field of the wrong type:
/// it falls back to the default instead of failing the whole object.
/// `auto_close_delay` takes either a humantime string (`"3s"`) or an integer
/// number of milliseconds.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct ToastOptions {
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub icon: Option<String>,
    #[serde(default, alias = "iconColor")]
    #[serde_as(as = "DefaultOnError")]
    pub icon_color: Option<String>,
    #[serde(default, alias = "borderColor")]
    #[serde_as(as = "DefaultOnError")]
    pub border_color: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub title: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub message: Option<String>,
    #[serde(default, alias = "autoClose")]
    #[serde_as(as = "DefaultOnError")]
    pub auto_close: Option<bool>,
    #[serde(default, alias = "autoCloseDelay")]
    #[serde_as(
        as = "DefaultOnError<Option<PickFirst<(HumantimeDuration, DurationMilliSeconds<u64>)>>>"
    )]
    pub auto_close_delay: Option<Duration>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub theme: Option<Theme>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub position: Option<Position>,
}

impl ToastOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying a severity's icon, colours and default title.
    #[must_use]
    pub fn for_severity(severity: Severity) -> Self {
        let preset = severity.preset();
        Self {
            icon: Some(preset.icon.to_string()),
            icon_color: Some(preset.icon_color.to_string()),
            border_color: Some(preset.border_color.to_string()),
            title: Some(preset.title.to_string()),
            ..Self::default()
        }
    }

    /// Lay `over` on top of `self`; fields set in `over` win.
    #[must_use]
    pub fn overlay(self, over: Self) -> Self {
        Self {
            icon: over.icon.or(self.icon),
            icon_color: over.icon_color.or(self.icon_color),
            border_color: over.border_color.or(self.border_color),
            title: over.title.or(self.title),
            message: over.message.or(self.message),
            auto_close: over.auto_close.or(self.auto_close),
            auto_close_delay: over.auto_close_delay.or(self.auto_close_delay),
            theme: over.theme.or(self.theme),
            position: over.position.or(self.position),
        }
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn icon_color(mut self, color: impl Into<String>) -> Self {
        self.icon_color = Some(color.into());
        self
    }

    #[must_use]
    pub fn border_color(mut self, color: impl Into<String>) -> Self {
        self.border_color = Some(color.into());
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub const fn auto_close(mut self, enabled: bool) -> Self {
        self.auto_close = Some(enabled);
        self
    }

    #[must_use]
    pub const fn auto_close_delay(mut self, delay: Duration) -> Self {
        self.auto_close_delay = Some(delay);
        self
    }

    #[must_use]
    pub const fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    #[must_use]
    pub const fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Colour scheme of a toast. Unknown names fall back to [`Theme::Light`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Self::Dark,
            _ => Self::Light,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl From<String> for Theme {
    fn from(value: String) -> Self {
        Self::parse_lossy(&value)
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screen corner a toast stacks from. Unknown names fall back to
/// [`Position::BottomRight`].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum Position {
    TopRight,
    TopLeft,
    #[default]
    BottomRight,
    BottomLeft,
}

impl Position {
    #[must_use]
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "top-right" => Self::TopRight,
            "top-left" => Self::TopLeft,
            "bottom-left" => Self::BottomLeft,
            _ => Self::BottomRight,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopRight => "top-right",
            Self::TopLeft => "top-left",
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
        }
    }
}

impl From<String> for Position {
    fn from(value: String) -> Self {
        Self::parse_lossy(&value)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

/// Fixed styling and default title attached to a [`Severity`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SeverityPreset {
    pub icon: &'static str,
    pub icon_color: &'static str,
    pub border_color: &'static str,
    pub title: &'static str,
}

impl Severity {
    pub const ALL: [Self; 4] = [Self::Success, Self::Error, Self::Warning, Self::Info];

    #[must_use]
    pub const fn preset(self) -> SeverityPreset {
        match self {
            Self::Success => SeverityPreset {
                icon: "fa-check-circle",
                icon_color: "text-green-500",
                border_color: "border-green-500",
                title: "Success!",
            },
            Self::Error => SeverityPreset {
                icon: "fa-exclamation-triangle",
                icon_color: "text-red-500",
                border_color: "border-red-500",
                title: "Error!",
            },
            Self::Warning => SeverityPreset {
                icon: "fa-exclamation-circle",
                icon_color: "text-yellow-500",
                border_color: "border-yellow-500",
                title: "Warning!",
            },
            Self::Info => SeverityPreset {
                icon: "fa-info-circle",
                icon_color: "text-blue-500",
                border_color: "border-blue-500",
                title: "Info",
            },
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "success" | "ok" => Ok(Self::Success),
            "error" | "err" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warning),
            "info" | "information" => Ok(Self::Info),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

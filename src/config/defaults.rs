use std::time::Duration;

use crate::assets::{
    DEFAULT_ICON_FONT_URL, DEFAULT_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL, DEFAULT_UTILITY_CSS_URL,
};
use crate::manager::{DEFAULT_CONTAINER_ID, DEFAULT_MAX_MESSAGE_LEN, DEFAULT_STYLE_ID};
use crate::toast::DEFAULT_AUTO_CLOSE_DELAY;

pub(super) fn default_icon() -> String {
    "fa-info-circle".to_string()
}

pub(super) fn default_icon_color() -> String {
    "text-blue-500".to_string()
}

pub(super) fn default_border_color() -> String {
    "border-blue-500".to_string()
}

pub(super) fn default_title() -> String {
    "Notification".to_string()
}

pub(super) fn default_message() -> String {
    "This is a notification message".to_string()
}

pub(super) const fn default_auto_close() -> bool {
    true
}

pub(super) const fn default_auto_close_delay() -> Duration {
    DEFAULT_AUTO_CLOSE_DELAY
}

pub(super) fn default_theme() -> String {
    "light".to_string()
}

pub(super) fn default_position() -> String {
    "bottom-right".to_string()
}

pub(super) fn default_container_id() -> String {
    DEFAULT_CONTAINER_ID.to_string()
}

pub(super) fn default_style_id() -> String {
    DEFAULT_STYLE_ID.to_string()
}

pub(super) const fn default_max_message_len() -> usize {
    DEFAULT_MAX_MESSAGE_LEN
}

pub(super) const fn default_assets_enabled() -> bool {
    true
}

pub(super) fn default_icon_font_url() -> String {
    DEFAULT_ICON_FONT_URL.to_string()
}

pub(super) fn default_utility_css_url() -> String {
    DEFAULT_UTILITY_CSS_URL.to_string()
}

pub(super) const fn default_poll_attempts() -> u32 {
    DEFAULT_POLL_ATTEMPTS
}

pub(super) const fn default_poll_interval() -> Duration {
    DEFAULT_POLL_INTERVAL
}

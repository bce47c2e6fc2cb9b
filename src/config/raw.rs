use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;
use url::Url;

use crate::Result;
use crate::assets::AssetSettings;
use crate::error::ConfigError;
use crate::manager::ManagerSettings;
use crate::toast::{ELLIPSIS, ToastConfig};
use crate::types::{Position, Theme};

use super::defaults::{
    default_assets_enabled, default_auto_close, default_auto_close_delay, default_border_color,
    default_container_id, default_icon, default_icon_color, default_icon_font_url,
    default_max_message_len, default_message, default_poll_attempts, default_poll_interval,
    default_position, default_style_id, default_theme, default_title, default_utility_css_url,
};
use super::env::{env_bool, env_duration, env_parse, env_string};
use super::{Config, HumantimeDuration};

pub(super) fn load(path: impl AsRef<Path>) -> std::result::Result<RawConfig, ConfigError> {
    let mut builder = ::config::Config::builder();
    let path = path.as_ref();
    builder = builder.add_source(::config::File::from(path).required(false));
    builder = builder.add_source(
        ::config::Environment::with_prefix("TOASTER")
            .separator("__")
            .try_parsing(true),
    );

    builder
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) toast: RawToast,
    #[serde(default)]
    pub(super) manager: RawManager,
    #[serde(default)]
    pub(super) assets: RawAssets,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawToast {
    #[serde(default = "default_icon")]
    pub(super) icon: String,
    #[serde(default = "default_icon_color")]
    pub(super) icon_color: String,
    #[serde(default = "default_border_color")]
    pub(super) border_color: String,
    #[serde(default = "default_title")]
    pub(super) title: String,
    #[serde(default = "default_message")]
    pub(super) message: String,
    #[serde(default = "default_auto_close")]
    pub(super) auto_close: bool,
    #[serde(default = "default_auto_close_delay")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) auto_close_delay: Duration,
    #[serde(default = "default_theme")]
    pub(super) theme: String,
    #[serde(default = "default_position")]
    pub(super) position: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawManager {
    #[serde(default = "default_container_id")]
    pub(super) container_id: String,
    #[serde(default = "default_style_id")]
    pub(super) style_id: String,
    #[serde(default = "default_max_message_len")]
    pub(super) max_message_len: usize,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawAssets {
    #[serde(default = "default_assets_enabled")]
    pub(super) enabled: bool,
    #[serde(default = "default_icon_font_url")]
    pub(super) icon_font_url: String,
    #[serde(default = "default_utility_css_url")]
    pub(super) utility_css_url: String,
    #[serde(default = "default_poll_attempts")]
    pub(super) poll_attempts: u32,
    #[serde(default = "default_poll_interval")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) poll_interval: Duration,
}

impl RawConfig {
    pub(super) fn apply_env_overrides(&mut self) -> std::result::Result<(), ConfigError> {
        if let Some(theme) = env_string("TOAST_THEME")? {
            self.toast.theme = theme;
        }
        if let Some(position) = env_string("TOAST_POSITION")? {
            self.toast.position = position;
        }
        if let Some(auto_close) = env_bool("TOAST_AUTO_CLOSE")? {
            self.toast.auto_close = auto_close;
        }
        if let Some(delay) = env_duration("TOAST_AUTO_CLOSE_DELAY")? {
            self.toast.auto_close_delay = delay;
        }
        if let Some(max_len) = env_parse::<usize>("TOAST_MAX_MESSAGE_LEN")? {
            self.manager.max_message_len = max_len;
        }
        if let Some(enabled) = env_bool("ASSETS_ENABLED")? {
            self.assets.enabled = enabled;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        let min_len = ELLIPSIS.len() + 1;
        if self.manager.max_message_len < min_len {
            return Err(ConfigError::InvalidField {
                field: "manager.max_message_len",
                message: format!(
                    "must leave room for the ellipsis (at least {min_len}), got {}",
                    self.manager.max_message_len
                ),
            }
            .into());
        }
        if self.manager.container_id.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                field: "manager.container_id",
                message: "element id cannot be empty".to_string(),
            }
            .into());
        }
        if self.manager.style_id.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                field: "manager.style_id",
                message: "element id cannot be empty".to_string(),
            }
            .into());
        }
        if self.manager.container_id == self.manager.style_id {
            return Err(ConfigError::InvalidField {
                field: "manager.style_id",
                message: "must differ from manager.container_id".to_string(),
            }
            .into());
        }
        if self.assets.poll_attempts == 0 {
            return Err(ConfigError::InvalidField {
                field: "assets.poll_attempts",
                message: "at least one attempt is required".to_string(),
            }
            .into());
        }
        if self.assets.poll_interval.is_zero() {
            return Err(ConfigError::InvalidField {
                field: "assets.poll_interval",
                message: "poll interval must be greater than zero".to_string(),
            }
            .into());
        }
        let icon_font_url = parse_asset_url("assets.icon_font_url", &self.assets.icon_font_url)?;
        let utility_css_url =
            parse_asset_url("assets.utility_css_url", &self.assets.utility_css_url)?;

        Ok(Config {
            defaults: ToastConfig {
                icon: self.toast.icon,
                icon_color: self.toast.icon_color,
                border_color: self.toast.border_color,
                title: self.toast.title,
                message: self.toast.message,
                auto_close: self.toast.auto_close,
                auto_close_delay: self.toast.auto_close_delay,
                theme: Theme::parse_lossy(&self.toast.theme),
                position: Position::parse_lossy(&self.toast.position),
            },
            manager: ManagerSettings {
                container_id: self.manager.container_id,
                style_id: self.manager.style_id,
                max_message_len: self.manager.max_message_len,
            },
            assets: AssetSettings {
                enabled: self.assets.enabled,
                icon_font_url,
                utility_css_url,
                poll_attempts: self.assets.poll_attempts,
                poll_interval: self.assets.poll_interval,
            },
        })
    }
}

fn parse_asset_url(field: &'static str, raw: &str) -> std::result::Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|err| ConfigError::InvalidField {
        field,
        message: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidField {
            field,
            message: format!("unsupported scheme {:?}", url.scheme()),
        });
    }
    Ok(url)
}

impl Default for RawToast {
    fn default() -> Self {
        Self {
            icon: default_icon(),
            icon_color: default_icon_color(),
            border_color: default_border_color(),
            title: default_title(),
            message: default_message(),
            auto_close: default_auto_close(),
            auto_close_delay: default_auto_close_delay(),
            theme: default_theme(),
            position: default_position(),
        }
    }
}

impl Default for RawManager {
    fn default() -> Self {
        Self {
            container_id: default_container_id(),
            style_id: default_style_id(),
            max_message_len: default_max_message_len(),
        }
    }
}

impl Default for RawAssets {
    fn default() -> Self {
        Self {
            enabled: default_assets_enabled(),
            icon_font_url: default_icon_font_url(),
            utility_css_url: default_utility_css_url(),
            poll_attempts: default_poll_attempts(),
            poll_interval: default_poll_interval(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RawConfig;
    use crate::error::{ConfigError, Error};
    use crate::toast::ToastConfig;
    use std::time::Duration;

    #[test]
    fn defaults_build_the_browser_defaults() {
        let config = match RawConfig::default().validate_and_build() {
            Ok(config) => config,
            Err(err) => panic!("defaults should validate: {err}"),
        };
        assert_eq!(config.defaults, ToastConfig::default());
        assert_eq!(config.manager.max_message_len, 80);
        assert_eq!(config.assets.poll_attempts, 50);
        assert_eq!(config.assets.poll_interval, Duration::from_millis(100));
    }

    #[test]
    fn rejects_limit_without_room_for_ellipsis() {
        let mut raw = RawConfig::default();
        raw.manager.max_message_len = 3;
        match raw.validate_and_build() {
            Err(Error::Config(ConfigError::InvalidField { field, .. })) => {
                assert_eq!(field, "manager.max_message_len");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_http_asset_urls() {
        let mut raw = RawConfig::default();
        raw.assets.utility_css_url = "file:///tmp/tailwind.js".to_string();
        assert!(raw.validate_and_build().is_err());
    }

    #[test]
    fn unknown_theme_is_not_an_error() {
        let mut raw = RawConfig::default();
        raw.toast.theme = "neon".to_string();
        raw.toast.position = "middle".to_string();
        let config = match raw.validate_and_build() {
            Ok(config) => config,
            Err(err) => panic!("lossy fields should validate: {err}"),
        };
        assert_eq!(config.defaults, ToastConfig::default());
    }
}

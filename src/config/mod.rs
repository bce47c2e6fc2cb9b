use std::path::Path;

use crate::Result;
use crate::assets::AssetSettings;
use crate::error::Error as ToasterError;
use crate::manager::ManagerSettings;
use crate::toast::ToastConfig;

mod defaults;
mod env;
mod raw;
mod serde;

pub(crate) use self::serde::HumantimeDuration;

#[derive(Debug, Clone)]
pub struct Config {
    pub defaults: ToastConfig,
    pub manager: ManagerSettings,
    pub assets: AssetSettings,
}

impl Config {
    /// Load configuration from an optional TOML file and the environment.
    ///
    /// Sources, lowest precedence first: built-in defaults, the file,
    /// `TOASTER__SECTION__KEY` variables, then the flat `TOAST_*` and
    /// `ASSETS_ENABLED` overrides.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be parsed, when an environment
    /// override is malformed, or when the resulting values fail validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path).map_err(ToasterError::from)?;
        raw.apply_env_overrides().map_err(ToasterError::from)?;
        raw.validate_and_build()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: ToastConfig::default(),
            manager: ManagerSettings::default(),
            assets: AssetSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::types::{Position, Theme};
    use std::time::Duration;

    #[test]
    fn loads_sections_from_toml_file() {
        let path = std::env::temp_dir().join(format!("toaster-{}.toml", uuid::Uuid::new_v4()));
        let written = std::fs::write(
            &path,
            r#"
[toast]
title = "Heads up"
theme = "dark"
position = "top-left"
auto_close_delay = "3s"

[manager]
max_message_len = 40

[assets]
enabled = false
poll_interval = "250ms"
"#,
        );
        if let Err(err) = written {
            panic!("failed to write temp config: {err}");
        }

        let loaded = Config::from_env_and_file(&path);
        let _ = std::fs::remove_file(&path);
        let config = match loaded {
            Ok(config) => config,
            Err(err) => panic!("config should load: {err}"),
        };

        assert_eq!(config.defaults.title, "Heads up");
        assert_eq!(config.defaults.theme, Theme::Dark);
        assert_eq!(config.defaults.position, Position::TopLeft);
        assert_eq!(config.defaults.auto_close_delay, Duration::from_secs(3));
        assert_eq!(config.defaults.icon, "fa-info-circle");
        assert_eq!(config.manager.max_message_len, 40);
        assert!(!config.assets.enabled);
        assert_eq!(config.assets.poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("toaster-absent-{}.toml", uuid::Uuid::new_v4()));
        let config = match Config::from_env_and_file(&path) {
            Ok(config) => config,
            Err(err) => panic!("missing file is optional: {err}"),
        };
        assert_eq!(config.manager.container_id, "toster-container");
    }
}

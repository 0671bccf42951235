use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use countdown_core::{CountdownPolicy, TimeError};
use countdown_render::RenderStyle;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// GIF frame delays below this are clamped by most viewers anyway.
const MIN_FRAME_DELAY_MS: u32 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Target(#[from] TimeError),

    #[error("{field} must be at least {min}, got {value}")]
    TooSmall {
        field: &'static str,
        min: u32,
        value: u32,
    },
}

/// Service configuration. Every field can be set from an environment
/// variable of the same name in upper case; nested style fields use `__`,
/// e.g. `STYLE__LABELS__DAYS=JOURS`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// RFC 3339, or `YYYY-MM-DDTHH:MM:SS` read as UTC.
    pub target_date: String,
    pub countdown_policy: CountdownPolicy,
    pub frame_count: u32,
    /// Ignored under `real_countdown`, which always steps once per second.
    pub frame_delay_ms: u32,
    pub expired_frame_count: u32,
    /// GIF palette speed, 1 (best) to 30 (fastest).
    pub gif_speed: i32,
    pub style: RenderStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            target_date: "2025-11-28T00:00:00Z".to_string(),
            countdown_policy: CountdownPolicy::CosmeticLoop,
            frame_count: 30,
            frame_delay_ms: 100,
            expired_frame_count: 20,
            gif_speed: 10,
            style: RenderStyle::default(),
        }
    }
}

impl Config {
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Checks the values that would otherwise only fail at request time.
    ///
    /// # Errors
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        countdown_core::parse_target(&self.target_date)?;

        for (field, min, value) in [
            ("frame_count", 1, self.frame_count),
            ("expired_frame_count", 1, self.expired_frame_count),
            ("frame_delay_ms", MIN_FRAME_DELAY_MS, self.frame_delay_ms),
        ] {
            if value < min {
                return Err(ConfigError::TooSmall { field, min, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        Jail::expect_with(|jail| {
            jail.set_env("PORT", "8080");
            jail.set_env("TARGET_DATE", "2026-01-01T00:00:00");
            jail.set_env("COUNTDOWN_POLICY", "real_countdown");
            jail.set_env("FRAME_DELAY_MS", "1000");
            jail.set_env("STYLE__BOX_SHADOW", "false");
            jail.set_env("STYLE__LABELS__DAYS", "JOURS");

            let config: Config = countdown_app::load_config()?;

            assert_eq!(config.port, 8080);
            assert_eq!(config.target_date, "2026-01-01T00:00:00");
            assert_eq!(config.countdown_policy, CountdownPolicy::RealCountdown);
            assert_eq!(config.frame_delay_ms, 1000);
            assert!(!config.style.box_shadow);
            assert_eq!(config.style.labels.days, "JOURS");
            assert_eq!(config.style.labels.hours, "HOURS");
            assert_eq!(config.frame_count, 30);
            Ok(())
        });
    }

    #[test]
    fn test_rejects_bad_target() {
        let config = Config {
            target_date: "soon".to_string(),
            ..Config::default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::Target(_))));
    }

    #[test]
    fn test_rejects_zero_frames() {
        let config = Config {
            frame_count: 0,
            ..Config::default()
        };

        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "frame_count must be at least 1, got 0");
    }

    #[test]
    fn test_rejects_tiny_delay() {
        let config = Config {
            frame_delay_ms: 5,
            ..Config::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooSmall {
                field: "frame_delay_ms",
                ..
            })
        ));
    }
}

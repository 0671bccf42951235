use std::sync::Arc;

use chrono::{DateTime, Utc};
use countdown_core::{Clock, SystemClock};
use countdown_render::Renderer;

use crate::config::{Config, ConfigError};

/// Process-wide, read-only request context. Built once at startup and shared
/// behind an `Arc`; nothing in it changes afterwards.
#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub target: DateTime<Utc>,
    pub renderer: Renderer,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// # Errors
    /// If the configuration does not validate.
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;
        let target = countdown_core::parse_target(&config.target_date)?;

        Ok(Self {
            renderer: Renderer::new(config.style.clone()),
            config,
            target,
            clock,
        })
    }

    /// Seconds left until the target, measured now.
    #[must_use]
    pub fn remaining(&self) -> i64 {
        countdown_core::compute_remaining(self.clock.now(), self.target)
    }
}

impl countdown_app::ContextProvider<Config> for AppContext {
    type Error = ConfigError;

    async fn new(config: Config) -> Result<Self, Self::Error> {
        let context = Self::with_clock(config, Arc::new(SystemClock))?;

        tracing::info!(
            target_date = %context.target,
            policy = ?context.config.countdown_policy,
            frame_count = context.config.frame_count,
            frame_delay_ms = context.config.frame_delay_ms,
            "countdown configured"
        );

        Ok(context)
    }
}

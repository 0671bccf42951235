use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator for nested keys in environment variables, so
/// `STYLE__BOX_SHADOW=false` sets `style.box_shadow`.
const ENV_NESTING: &str = "__";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] figment::Error),

    #[error("invalid configuration: {0}")]
    Context(Box<dyn std::error::Error + Send + Sync>),
}

pub trait ContextProvider<Config>: Sized {
    type Error: std::error::Error + Send + Sync + 'static;

    fn new(config: Config) -> impl Future<Output = Result<Self, Self::Error>>;
}

/// Installs the global tracing subscriber.
///
/// The level comes from `RUST_LOG`, defaulting to `info`. Set `LOG_FORMAT=json` for one JSON
/// object per line; anything else gives the compact human format.
pub fn init_tracing() {
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };

    let result = if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter())
            // this needs to be set to remove duplicated information in the log.
            .with_current_span(false)
            .with_ansi(false)
            .with_target(false)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .compact()
            .with_env_filter(filter())
            .try_init()
    };

    // a subscriber installed earlier (by a test harness, say) wins
    if let Err(e) = result {
        tracing::debug!("tracing subscriber already installed: {e}");
    }
}

/// Builds the configuration from `Config::default()` overlaid with
/// environment variables.
///
/// # Errors
/// If an environment variable cannot be converted to the field it targets.
pub fn load_config<Config>() -> Result<Config, figment::Error>
where
    Config: Serialize + for<'de> Deserialize<'de> + Default,
{
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Env::raw().split(ENV_NESTING))
        .extract()
}

/// Initialize the application context with configuration from environment
/// variables.
///
/// # Returns
/// The application context built by [`ContextProvider::new`].
///
/// # Errors
/// If the configuration cannot be extracted from the environment variables
/// or the context rejects it.
pub async fn create_app_context<A, Config>() -> Result<A, AppError>
where
    A: ContextProvider<Config>,
    Config: Serialize + for<'de> Deserialize<'de> + Default,
{
    init_tracing();

    let config: Config = load_config()?;

    A::new(config)
        .await
        .map_err(|e| AppError::Context(Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    struct Nested {
        enabled: bool,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    struct TestConfig {
        listen_port: u16,
        service_name: String,
        nested: Nested,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                listen_port: 3000,
                service_name: "countdown".to_string(),
                nested: Nested::default(),
            }
        }
    }

    #[derive(Debug, Error)]
    #[error("port must not be zero")]
    struct ZeroPort;

    struct TestContext {
        port: u16,
    }

    impl ContextProvider<TestConfig> for TestContext {
        type Error = ZeroPort;

        async fn new(config: TestConfig) -> Result<Self, Self::Error> {
            if config.listen_port == 0 {
                return Err(ZeroPort);
            }
            Ok(Self {
                port: config.listen_port,
            })
        }
    }

    #[test]
    fn test_defaults_apply_without_env() {
        Jail::expect_with(|_| {
            let config: TestConfig = load_config()?;
            assert_eq!(config, TestConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_and_nesting() {
        Jail::expect_with(|jail| {
            jail.set_env("LISTEN_PORT", "8080");
            jail.set_env("NESTED__ENABLED", "true");

            let config: TestConfig = load_config()?;
            assert_eq!(config.listen_port, 8080);
            assert!(config.nested.enabled);
            assert_eq!(config.service_name, "countdown");
            Ok(())
        });
    }

    #[test]
    fn test_bad_env_value_is_an_error() {
        Jail::expect_with(|jail| {
            jail.set_env("LISTEN_PORT", "not-a-port");
            assert!(load_config::<TestConfig>().is_err());
            Ok(())
        });
    }

    #[tokio::test]
    async fn test_context_provider_validates() {
        let result = TestContext::new(TestConfig {
            listen_port: 0,
            ..TestConfig::default()
        })
        .await;
        assert!(result.is_err());

        let context = TestContext::new(TestConfig::default()).await.unwrap();
        assert_eq!(context.port, 3000);
    }
}

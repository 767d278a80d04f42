use reqwest::Url;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Placeholder relay target used outside production when `WEBHOOK_URL` is unset.
pub const DEVELOPMENT_WEBHOOK_URL: &str = "http://127.0.0.1:8787/webhooks/inquiries";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub webhook: WebhookConfig,
    pub content: ContentConfig,
    pub site: SiteConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let webhook_url = match non_empty_var("WEBHOOK_URL") {
            Some(url) => url,
            None if environment == AppEnvironment::Production => {
                return Err(ConfigError::Missing { name: "WEBHOOK_URL" })
            }
            None => DEVELOPMENT_WEBHOOK_URL.to_string(),
        };
        let webhook_url = parse_url("WEBHOOK_URL", &webhook_url)?;

        let content_url = non_empty_var("CONTENT_API_URL")
            .unwrap_or_else(|| "http://localhost:8055".to_string());
        let content_url = parse_url("CONTENT_API_URL", &content_url)?;
        let access_token = non_empty_var("CONTENT_API_TOKEN");

        let public_api_url = non_empty_var("PUBLIC_API_URL")
            .unwrap_or_else(|| format!("http://{host}:{port}"));
        let public_api_url = parse_url("PUBLIC_API_URL", &public_api_url)?;
        let public_dir = PathBuf::from(
            non_empty_var("PUBLIC_DIR").unwrap_or_else(|| "public".to_string()),
        );

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            webhook: WebhookConfig { url: webhook_url },
            content: ContentConfig {
                base_url: content_url,
                access_token,
            },
            site: SiteConfig {
                public_api_url,
                public_dir,
            },
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|err| ConfigError::InvalidUrl {
        name,
        reason: err.to_string(),
    })
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    /// Colored output; only enabled for local development.
    pub ansi: bool,
}

/// The single downstream endpoint every inquiry is relayed to.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: Url,
}

/// Headless content store connection.
#[derive(Debug, Clone)]
pub struct ContentConfig {
    pub base_url: Url,
    pub access_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub public_api_url: Url,
    pub public_dir: PathBuf,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidUrl {
        name: &'static str,
        reason: String,
    },
    Missing {
        name: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidUrl { name, reason } => {
                write!(f, "{name} must be an absolute URL ({reason})")
            }
            ConfigError::Missing { name } => {
                write!(f, "{name} must be set in production")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidUrl { .. }
            | ConfigError::Missing { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for name in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "WEBHOOK_URL",
            "CONTENT_API_URL",
            "CONTENT_API_TOKEN",
            "PUBLIC_API_URL",
            "PUBLIC_DIR",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.webhook.url.as_str(), DEVELOPMENT_WEBHOOK_URL);
        assert_eq!(config.content.base_url.as_str(), "http://localhost:8055/");
        assert!(config.content.access_token.is_none());
        assert_eq!(config.site.public_api_url.as_str(), "http://127.0.0.1:3000/");
        assert_eq!(config.site.public_dir, PathBuf::from("public"));
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn production_requires_webhook_url() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        let err = AppConfig::load().expect_err("webhook url is mandatory");
        assert!(matches!(err, ConfigError::Missing { name: "WEBHOOK_URL" }));

        env::set_var("WEBHOOK_URL", "https://hooks.example.com/inquiries");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(
            config.webhook.url.as_str(),
            "https://hooks.example.com/inquiries"
        );
        reset_env();
    }

    #[test]
    fn rejects_relative_content_url() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CONTENT_API_URL", "cms.local/api");
        let err = AppConfig::load().expect_err("relative url rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidUrl {
                name: "CONTENT_API_URL",
                ..
            }
        ));
        reset_env();
    }
}

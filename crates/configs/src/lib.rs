//! # configs
//!
//! Process-wide settings, loaded once at start-up and then passed by
//! reference to whoever needs them. Nothing reads the environment after
//! [`Settings::load`] returns.
//!
//! Sources, lowest priority first:
//! 1. built-in defaults
//! 2. `config/default.toml`, `config/local.toml` (both optional)
//! 3. `BLOG__SECTION__KEY` environment variables (`.env` honoured)
//! 4. the flat legacy variables `DATABASE_URL`, `SECRET_KEY`, `ALGORITHM`,
//!    `ACCESS_TOKEN_EXPIRES_MINUTES`

use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File, FileFormat};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

/// Used when no secret is configured. Fine for a laptop, never for a server.
pub const DEFAULT_SECRET_KEY: &str = "DEFAULT_ALT_FOR_SECRET_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize)]
pub struct AuthSettings {
    pub secret_key: SecretString,
    pub algorithm: String,
    pub access_token_expires_minutes: i64,
    /// Adds the `Secure` attribute to the session cookie.
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl AuthSettings {
    pub fn secret(&self) -> &str {
        self.secret_key.expose_secret()
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret() == DEFAULT_SECRET_KEY
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("database.url", "sqlite://blog_platform_api.db")?
        .set_default("database.max_connections", 5)?
        .set_default("auth.secret_key", DEFAULT_SECRET_KEY)?
        .set_default("auth.algorithm", "HS256")?
        .set_default("auth.access_token_expires_minutes", 60)?
        .set_default("auth.cookie_secure", false)?
        .set_default("log.level", "info")?
        .set_default("log.format", "pretty")?)
}

impl Settings {
    /// Reads `.env`, config files and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let legacy = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        let builder = defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("BLOG").separator("__").try_parsing(true))
            .set_override_option("database.url", legacy("DATABASE_URL"))?
            .set_override_option("auth.secret_key", legacy("SECRET_KEY"))?
            .set_override_option("auth.algorithm", legacy("ALGORITHM"))?
            .set_override_option(
                "auth.access_token_expires_minutes",
                legacy("ACCESS_TOKEN_EXPIRES_MINUTES"),
            )?;

        Self::build(builder)
    }

    /// Defaults overlaid with a TOML document; no environment involved.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::build(defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.auth.algorithm.as_str(), "HS256" | "HS384" | "HS512") {
            return Err(ConfigError::Invalid {
                key: "auth.algorithm",
                reason: format!("{} is not an HMAC algorithm", self.auth.algorithm),
            });
        }
        if self.auth.access_token_expires_minutes <= 0 {
            return Err(ConfigError::Invalid {
                key: "auth.access_token_expires_minutes",
                reason: "must be positive".into(),
            });
        }
        if self.auth.secret().is_empty() {
            return Err(ConfigError::Invalid { key: "auth.secret_key", reason: "cannot be empty".into() });
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "database.max_connections",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

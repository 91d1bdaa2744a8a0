//! [`Config`]-related definitions.

use std::{env, path::PathBuf, time};

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Name of the environment variable overriding the [`Api::url`].
pub const API_URL_ENV: &str = "NEXT_PUBLIC_API_URL";

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Backend API configuration.
    #[serde(default)]
    pub api: Api,

    /// Session configuration.
    #[serde(default)]
    pub session: Session,

    /// Service configuration.
    #[serde(default)]
    pub service: Service,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - overriding the [`Api::url`] with the [`API_URL_ENV`] variable (if
    ///   set);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        Self::load(path, env::var(API_URL_ENV).ok())
    }

    /// Creates a new [`Config`] the same way as [`Config::new()`] does, but
    /// with the explicitly provided [`Api::url`] override.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn load(
        path: impl AsRef<str>,
        api_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .set_override_option("api.url", api_url.filter(|u| !u.is_empty()))?
            .build()?
            .try_deserialize()
    }
}

/// Backend API configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Api {
    /// Base URL of the backend, without the `/api` prefix.
    #[default("http://localhost:8080".to_owned())]
    pub url: String,

    /// Timeout of a single request.
    #[serde(with = "humantime_serde")]
    pub timeout: Option<time::Duration>,
}

impl From<Api> for service::infra::rest::Config {
    fn from(value: Api) -> Self {
        let Api { url, timeout } = value;
        Self {
            base_url: url,
            timeout,
        }
    }
}

/// Session configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Session {
    /// Path to the file keeping the authenticated session.
    #[default(PathBuf::from(".proptech/session.json"))]
    pub file: PathBuf,
}

/// Service configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// Number of items per listed page.
    #[default(10)]
    pub page_size: usize,

    /// Indicator whether agents, properties and available slots should fall
    /// back to sample data when the backend fails.
    pub demo_fallback: bool,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            page_size,
            demo_fallback,
        } = value;
        Self {
            page_size,
            demo_fallback,
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    Info,

    /// Designates hazardous situations.
    #[default]
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

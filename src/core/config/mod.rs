//! Application configuration.
//!
//! Values are layered: built-in defaults, then an optional `learnserver.toml`,
//! then `LEARN_*` environment variables (`LEARN_SERVER__PORT=9000` sets
//! `server.port`). `DATABASE_URL` is honoured when no database URL was set
//! through the other layers.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "learnserver.toml";
pub const ENV_PREFIX: &str = "LEARN_";
pub const DEFAULT_JWT_SECRET: &str = "change-me";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub llm: LlmConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// When unset the server runs against the in-memory store.
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret shared with the identity provider that issues tokens.
    pub jwt_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
        }
    }
}

/// OpenAI-compatible completion endpoint. Generation stays on the template
/// path unless `base_url` is set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LlmConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
        }
    }
}

impl AppConfig {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, anyhow::Error> {
        let mut config: AppConfig = figment.extract()?;
        if config.database.url.is_none() {
            config.database.url = std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());
        }
        Ok(config)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::from_figment(&Self::figment())
    }

    pub fn uses_default_jwt_secret(&self) -> bool {
        self.auth.jwt_secret == DEFAULT_JWT_SECRET
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm
            .base_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

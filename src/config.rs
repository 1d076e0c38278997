use bambooflow_session::{Credential, CredentialBook, LineSettings};
use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub tracing: TracingConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub registration: RegistrationConfig,
    pub credentials: CredentialBook,
    #[serde(default)]
    pub line: LineSettings,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Longest session a cookie may carry.
pub const MAX_SESSION_DAYS: u64 = 365;

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiration_days: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TracingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResolverConfig {
    /// Seconds the loading page waits before resolving the entry url.
    #[serde(default = "default_loading_delay_secs")]
    pub loading_delay_secs: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            loading_delay_secs: default_loading_delay_secs(),
        }
    }
}

fn default_loading_delay_secs() -> u64 {
    1
}

#[derive(Debug, Deserialize, Clone)]
pub struct RegistrationConfig {
    /// Approve new farmers on submit instead of waiting for an admin.
    #[serde(default = "default_true")]
    pub auto_approve: bool,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self { auto_approve: true }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    /// Active bookings accepted per kind and day.
    #[serde(default = "default_daily_capacity")]
    pub daily_capacity: usize,
    #[serde(default = "default_true")]
    pub seed_demo: bool,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            daily_capacity: default_daily_capacity(),
            seed_demo: true,
        }
    }
}

fn default_daily_capacity() -> usize {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct I18nConfig {
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
        }
    }
}

fn default_language() -> String {
    "th".to_owned()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (BAMBOOFLOW__DATABASE__URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "sqlite:bambooflow.db")?
            .set_default("database.max_connections", 5)?
            .set_default("jwt.issuer", "bambooflow")?
            .set_default("jwt.audience", "bambooflow")?
            .set_default("jwt.expiration_days", 7)?
            .set_default("credentials.factory.username", "factory")?
            .set_default("credentials.factory.password", "factory1234")?
            .set_default("credentials.admin.username", "admin")?
            .set_default("credentials.admin.password", "admin1234")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_owned());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("BAMBOOFLOW")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }
        if let Ok(jwt_secret) = env::var("JWT_SECRET") {
            builder = builder.set_override("jwt.secret", jwt_secret)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.jwt.secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long".to_owned());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_owned());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_owned());
        }
        if !(1..=MAX_SESSION_DAYS).contains(&self.jwt.expiration_days) {
            return Err(format!(
                "JWT expiration_days must be between 1 and {MAX_SESSION_DAYS}"
            ));
        }
        if self.booking.daily_capacity < 1 {
            return Err("Booking daily_capacity must be at least 1".to_owned());
        }

        for (role, credential) in [
            ("factory", &self.credentials.factory),
            ("admin", &self.credentials.admin),
        ] {
            if credential.username.trim().is_empty() || credential.password.is_empty() {
                return Err(format!("Credentials for {role} must not be empty"));
            }
        }

        Ok(())
    }

    /// Settings usable by tests and tools without a config file.
    pub fn for_tests(database_url: impl Into<String>) -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_owned(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: database_url.into(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: "test_secret_key_minimum_32_characters_long".to_owned(),
                issuer: "bambooflow".to_owned(),
                audience: "bambooflow".to_owned(),
                expiration_days: 7,
            },
            tracing: TracingConfig::default(),
            resolver: ResolverConfig::default(),
            registration: RegistrationConfig::default(),
            credentials: CredentialBook {
                factory: Credential {
                    username: "factory".to_owned(),
                    password: "factory1234".to_owned(),
                },
                admin: Credential {
                    username: "admin".to_owned(),
                    password: "admin1234".to_owned(),
                },
            },
            line: LineSettings::default(),
            booking: BookingConfig::default(),
            i18n: I18nConfig::default(),
        }
    }
}

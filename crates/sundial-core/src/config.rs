use anyhow::Result;
use config::Config;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub web_dir: String,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the server address as a string in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub file: String,
    pub max_connections: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Plaintext sign-in password. Ignored when `password_hash` is set.
    pub password: Option<String>,
    /// Argon2 PHC string for the sign-in password.
    pub password_hash: Option<String>,
    /// Extra material mixed into issued tokens.
    pub token_secret: String,
}

impl AuthConfig {
    /// Whether sign-in is configured at all. With neither a password nor a
    /// password hash set, the API is open and sign-in is rejected.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.password.is_some() || self.password_hash.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `config.toml` values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 7540)?
            .set_default("server.web_dir", "./web")?
            .set_default("database.file", "scheduler.db")?
            .set_default("database.max_connections", 4)?
            .set_default("auth.token_secret", "sundial")?
            .set_default("logging.level", "info")?
            // Env vars: TODO__SERVER__PORT, TODO__DATABASE__FILE, TODO__AUTH__PASSWORD, ...
            .add_source(
                config::Environment::with_prefix("TODO")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

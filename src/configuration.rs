use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Value of `OPENAI_API_KEY` that means "no key configured".
pub const MOCK_API_KEY: &str = "MOCK_KEY";
pub const DEFAULT_APP_PORT: u16 = 8000;
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "FATAL ERROR: The DATABASE_URL environment variable is missing. \
         This deployment requires a full connection URL."
    )]
    MissingDatabaseUrl,
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

#[derive(Clone, Deserialize)]
pub struct Settings {
    pub app_host: String,
    pub app_port: u16,
    pub database: DatabaseSettings,
    pub generator: GeneratorSettings,
}

#[derive(Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub url: Option<String>,
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
    #[serde(default)]
    pub require_url: bool,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Clone, Deserialize)]
pub struct GeneratorSettings {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl DatabaseSettings {
    // Connection string: DATABASE_URL as given, otherwise
    // postgresql://<username>:<password>@<host>:<port>/<database_name>
    pub fn connection_string(&self) -> String {
        match self.url.as_deref() {
            Some(url) => url.to_string(),
            None => format!(
                "{}/{}",
                self.connection_string_without_db(),
                self.database_name
            ),
        }
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}",
            self.username,
            urlencoding::encode(&self.password),
            self.host,
            self.port,
        )
    }
}

impl GeneratorSettings {
    /// False when the key is blank or still the mock sentinel.
    pub fn has_api_key(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != MOCK_API_KEY
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("app_host", &self.app_host)
            .field("app_port", &self.app_port)
            .field("database", &self.database)
            .field("generator", &self.generator)
            .finish()
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_name", &self.database_name)
            .field("require_url", &self.require_url)
            .field("max_connections", &self.max_connections)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for GeneratorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorSettings")
            .field("has_api_key", &self.has_api_key())
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Copy of the process environment taken once at startup.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Trimmed value of `key`, or `None` when it is unset or the literal "none".
    pub fn lookup(&self, key: &str) -> Option<String> {
        let value = self.vars.get(key)?.trim();
        if value.eq_ignore_ascii_case("none") {
            return None;
        }
        Some(value.to_string())
    }

    pub fn get(&self, key: &str, default: &str) -> String {
        self.lookup(key).unwrap_or_else(|| default.to_string())
    }

    fn parse<T: std::str::FromStr>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        match self.lookup(key) {
            None => Ok(None),
            Some(value) => value
                .parse::<T>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value,
                }),
        }
    }

    fn flag(&self, key: &str) -> Result<Option<bool>, ConfigError> {
        match self.lookup(key) {
            None => Ok(None),
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(Some(true)),
                "0" | "false" | "no" | "off" | "" => Ok(Some(false)),
                _ => Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value,
                }),
            },
        }
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    resolve(&EnvSnapshot::capture(), Some("configuration"))
}

/// Builds settings from defaults, an optional config file and the environment,
/// in increasing order of precedence.
pub fn resolve(env: &EnvSnapshot, file: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = config::Config::builder()
        .set_default("app_host", "127.0.0.1")?
        .set_default("app_port", DEFAULT_APP_PORT as i64)?
        .set_default("database.username", "user")?
        .set_default("database.password", "password")?
        .set_default("database.host", "localhost")?
        .set_default("database.port", 5432_i64)?
        .set_default("database.database_name", "ai_db")?
        .set_default("database.require_url", false)?
        .set_default("database.max_connections", 5_i64)?
        .set_default("database.acquire_timeout_secs", 30_i64)?
        .set_default("generator.api_key", MOCK_API_KEY)?
        .set_default("generator.endpoint", DEFAULT_OPENAI_URL)?
        .set_default("generator.model", "gpt-4o-mini")?
        .set_default("generator.timeout_secs", 60_i64)?;

    if let Some(name) = file {
        builder = builder.add_source(config::File::with_name(name).required(false));
    }

    let strings = [
        ("BACKEND_HOST", "app_host"),
        ("POSTGRES_USER", "database.username"),
        ("POSTGRES_PASSWORD", "database.password"),
        ("POSTGRES_HOST", "database.host"),
        ("POSTGRES_DB", "database.database_name"),
        ("OPENAI_API_KEY", "generator.api_key"),
        ("OPENAI_API_URL", "generator.endpoint"),
        ("OPENAI_MODEL", "generator.model"),
    ];
    for (var, key) in strings {
        if let Some(value) = env.lookup(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    if let Some(url) = env.lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
        builder = builder.set_override("database.url", url)?;
    }
    if let Some(port) = env.parse::<u16>("BACKEND_PORT")? {
        builder = builder.set_override("app_port", port as i64)?;
    }
    if let Some(port) = env.parse::<u16>("POSTGRES_PORT")? {
        builder = builder.set_override("database.port", port as i64)?;
    }
    if let Some(required) = env.flag("REQUIRE_DATABASE_URL")? {
        builder = builder.set_override("database.require_url", required)?;
    }

    let settings: Settings = builder.build()?.try_deserialize()?;

    if settings.database.require_url && settings.database.url.is_none() {
        return Err(ConfigError::MissingDatabaseUrl);
    }

    Ok(settings)
}

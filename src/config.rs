use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub generation: GenerationConfig,
    pub translator: TranslatorConfig,
}

/// Database connection pool configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

/// Flashcard generation limits
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Daily allowance of sentences per user. The quota check is advisory:
    /// two concurrent requests can both pass and push usage past the limit.
    pub daily_limit: i64,
    /// Maximum sentences accepted in a single generate request
    pub max_sentences_per_request: usize,
}

/// Translation provider (OpenRouter-compatible chat completions API)
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    pub api_url: String,
    /// Missing key disables POST /api/generate with a 500
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            database: DatabaseConfig::from_env()?,
            generation: GenerationConfig::from_env(),
            translator: TranslatorConfig::from_env()?,
        })
    }
}

impl GenerationConfig {
    /// Load generation limits from environment variables
    pub fn from_env() -> Self {
        Self {
            daily_limit: env::var("DAILY_GENERATION_LIMIT")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap_or(100),
            max_sentences_per_request: env::var("MAX_SENTENCES_PER_REQUEST")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap_or(100),
        }
    }
}

impl TranslatorConfig {
    /// Load translator configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = env::var("TRANSLATOR_API_URL")
            .unwrap_or_else(|_| "https://openrouter.ai/api/v1/chat/completions".to_string());

        let parsed = url::Url::parse(&api_url).map_err(|_| ConfigError::InvalidTranslatorUrl)?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::InvalidTranslatorUrl);
        }

        Ok(Self {
            api_url,
            api_key: env::var("TRANSLATOR_API_KEY").ok(),
            model: env::var("TRANSLATOR_MODEL")
                .unwrap_or_else(|_| "openai/gpt-4o-mini".to_string()),
            timeout: Duration::from_secs(
                env::var("TRANSLATOR_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .unwrap_or(30),
            ),
        })
    }
}

impl DatabaseConfig {
    /// Load database configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        Ok(Self {
            url,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .unwrap_or(1),
            acquire_timeout: Duration::from_secs(
                env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .unwrap_or(5),
            ),
            idle_timeout: Duration::from_secs(
                env::var("DATABASE_IDLE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "600".to_string())
                    .parse()
                    .unwrap_or(600),
            ),
            max_lifetime: Duration::from_secs(
                env::var("DATABASE_MAX_LIFETIME_SECS")
                    .unwrap_or_else(|_| "1800".to_string())
                    .parse()
                    .unwrap_or(1800),
            ),
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    MissingDatabaseUrl,
    InvalidTranslatorUrl,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "PORT must be a valid number"),
            ConfigError::MissingDatabaseUrl => {
                write!(f, "DATABASE_URL environment variable is required")
            }
            ConfigError::InvalidTranslatorUrl => {
                write!(f, "TRANSLATOR_API_URL must be a valid http(s) URL")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("Invalid database URL format. Must start with 'https://' or 'postgresql://'")]
    UnsupportedScheme,
}

#[derive(Clone)]
pub struct WebhookConfig {
    pub url: String,
    pub secret: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub cors_origins: Vec<String>,
    /// `None` unless both the webhook URL and secret are set.
    pub webhook: Option<WebhookConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Ok(Self::from_lookup(|key| std::env::var(key).ok())?)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "127.0.0.1".into());
        let port = var("PORT")
            .unwrap_or_else(|| "8080".into())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidPort(e.to_string()))?;

        let raw_url = var("DATABASE_URL")
            .or_else(|| var("SUPABASE_URL"))
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let service_key = var("SUPABASE_SERVICE_ROLE_KEY");
        let database_url = derive_connection_string(&raw_url, service_key.as_deref())?;

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let webhook = match (var("N8N_WEBHOOK_URL"), var("N8N_WEBHOOK_SECRET")) {
            (Some(url), Some(secret)) => Some(WebhookConfig { url, secret }),
            _ => None,
        };

        Ok(Self {
            host,
            port,
            database_url,
            cors_origins,
            webhook,
        })
    }
}

/// Turns the configured database URL into a PostgreSQL connection string.
///
/// `postgres://` and `postgresql://` URLs pass through. An `https://` project
/// URL is rewritten to `postgresql://postgres:<key>@<host>/postgres`, which
/// needs the service key.
pub fn derive_connection_string(
    url: &str,
    service_key: Option<&str>,
) -> Result<String, ConfigError> {
    if url.starts_with("postgresql://") || url.starts_with("postgres://") {
        return Ok(url.to_string());
    }

    if let Some(host) = url.strip_prefix("https://") {
        let key = service_key.ok_or(ConfigError::Missing("SUPABASE_SERVICE_ROLE_KEY"))?;
        return Ok(format!("postgresql://postgres:{key}@{host}/postgres"));
    }

    Err(ConfigError::UnsupportedScheme)
}

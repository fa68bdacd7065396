use anyhow::{bail, Context, Result};

/// Default search index bases per environment. The development cluster
/// serves a self-signed certificate, so TLS verification is off there
/// and on everywhere else.
const DEV_SEARCH_BASE_URL: &str = "https://search-dev.empleabot.cl";
const PROD_SEARCH_BASE_URL: &str = "https://search.empleabot.cl";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            other => bail!("APP_ENV must be 'development' or 'production', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Built once in `main` and handed to each HTTP adapter at construction;
/// nothing reads the environment mid-request.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    /// Base URL of the chat/extraction microservice.
    pub chat_service_url: String,
    /// Base URL of the job filtering/scoring microservice.
    pub filter_service_url: String,
    /// Base URL of the job search index. Explicit `SEARCH_BASE_URL`
    /// overrides the environment-selected default.
    pub search_base_url: String,
    /// Index name interpolated into `/api/v3/<index>/_search`.
    pub search_index: String,
    /// TLS certificate verification for the search index. Disabled only
    /// in development.
    pub verify_tls: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let environment = Environment::parse(
            &std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        )?;

        let search_base_url = std::env::var("SEARCH_BASE_URL")
            .unwrap_or_else(|_| default_search_base(environment).to_string());

        Ok(Config {
            environment,
            chat_service_url: require_env("CHAT_SERVICE_URL")?,
            filter_service_url: require_env("FILTER_SERVICE_URL")?,
            search_base_url,
            search_index: std::env::var("SEARCH_INDEX").unwrap_or_else(|_| "empleos".to_string()),
            verify_tls: environment == Environment::Production,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn default_search_base(environment: Environment) -> &'static str {
    match environment {
        Environment::Development => DEV_SEARCH_BASE_URL,
        Environment::Production => PROD_SEARCH_BASE_URL,
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!(
            Environment::parse("development").unwrap(),
            Environment::Development
        );
        assert_eq!(
            Environment::parse("production").unwrap(),
            Environment::Production
        );
        assert!(Environment::parse("staging").is_err());
    }

    #[test]
    fn test_search_base_selected_by_environment() {
        assert_eq!(
            default_search_base(Environment::Development),
            DEV_SEARCH_BASE_URL
        );
        assert_eq!(
            default_search_base(Environment::Production),
            PROD_SEARCH_BASE_URL
        );
    }
}

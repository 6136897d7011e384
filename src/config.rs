use std::env;

use axum::http::HeaderValue;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    /// Postgres connection string. Orders are kept in memory when unset.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    /// Origin of a separately hosted dashboard allowed through CORS.
    pub dashboard_origin: Option<HeaderValue>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            database_url: non_empty_var("DATABASE_URL"),
            db_max_connections: parse_or_default("DB_MAX_CONNECTIONS", 5)?,
            dashboard_origin: non_empty_var("DASHBOARD_ORIGIN")
                .map(|raw| parse_value("DASHBOARD_ORIGIN", &raw))
                .transpose()?,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|raw| !raw.trim().is_empty())
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|err| AppError::Config(format!("invalid {key}: {err}")))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::parse_value;
    use crate::error::AppError;

    #[test]
    fn parses_trimmed_port() {
        let port: u16 = parse_value("HTTP_PORT", " 8080 ").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn malformed_number_is_config_error() {
        let err = parse_value::<u16>("HTTP_PORT", "eighty").unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("HTTP_PORT")));
    }

    #[test]
    fn parses_dashboard_origin() {
        let origin: HeaderValue = parse_value("DASHBOARD_ORIGIN", "http://localhost:5173").unwrap();
        assert_eq!(origin, "http://localhost:5173");
    }
}

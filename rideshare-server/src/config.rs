//! Server configuration from the environment.

use crate::oracle::OracleConfig;

/// Origin allowed when `CORS_ORIGINS` is unset.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8000;

/// Error loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("GOOGLE_API_KEY is not set")]
    MissingApiKey,

    #[error("invalid PORT: {0:?}")]
    InvalidPort(String),
}

/// Settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Distance Matrix API key.
    pub api_key: String,

    /// Origins allowed by CORS. `*` allows any origin.
    pub cors_origins: Vec<String>,

    /// Port to listen on.
    pub port: u16,

    /// Override for the Distance Matrix endpoint.
    pub distance_matrix_url: Option<String>,
}

impl ServerConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to read each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("GOOGLE_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()]);

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let distance_matrix_url = lookup("DISTANCE_MATRIX_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        Ok(Self {
            api_key,
            cors_origins,
            port,
            distance_matrix_url,
        })
    }

    /// Oracle client settings derived from this configuration.
    pub fn oracle_config(&self) -> OracleConfig {
        let config = OracleConfig::new(&self.api_key);
        match &self.distance_matrix_url {
            Some(url) => config.with_base_url(url),
            None => config,
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[("GOOGLE_API_KEY", "secret")]).unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.distance_matrix_url, None);
    }

    #[test]
    fn missing_or_blank_key() {
        assert_eq!(load(&[]), Err(ConfigError::MissingApiKey));
        assert_eq!(
            load(&[("GOOGLE_API_KEY", "  ")]),
            Err(ConfigError::MissingApiKey)
        );
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        let config = load(&[
            ("GOOGLE_API_KEY", "k"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,,"),
        ])
        .unwrap();

        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn empty_origin_list_falls_back_to_default() {
        let config = load(&[("GOOGLE_API_KEY", "k"), ("CORS_ORIGINS", " , ")]).unwrap();
        assert_eq!(config.cors_origins, vec![DEFAULT_CORS_ORIGIN]);
    }

    #[test]
    fn port_parsing() {
        let config = load(&[("GOOGLE_API_KEY", "k"), ("PORT", "9001")]).unwrap();
        assert_eq!(config.port, 9001);

        assert_eq!(
            load(&[("GOOGLE_API_KEY", "k"), ("PORT", "eighty")]),
            Err(ConfigError::InvalidPort("eighty".to_string()))
        );
        assert_eq!(
            load(&[("GOOGLE_API_KEY", "k"), ("PORT", "70000")]),
            Err(ConfigError::InvalidPort("70000".to_string()))
        );
    }

    #[test]
    fn oracle_config_uses_override() {
        let config = load(&[
            ("GOOGLE_API_KEY", "k"),
            ("DISTANCE_MATRIX_URL", "http://localhost:9999/matrix"),
        ])
        .unwrap();

        let oracle = config.oracle_config();
        assert_eq!(oracle.api_key, "k");
        assert_eq!(oracle.base_url, "http://localhost:9999/matrix");
    }

    #[test]
    fn oracle_config_default_url() {
        let config = load(&[("GOOGLE_API_KEY", "k")]).unwrap();
        assert_eq!(
            config.oracle_config().base_url,
            crate::oracle::DEFAULT_BASE_URL
        );
    }
}

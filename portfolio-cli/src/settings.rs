use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use portfolio_client::ClientConfig;

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_SESSION_DIR: &str = ".portfolio_session";

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub auth_url: Option<String>,
    pub http_timeout_secs: Option<u64>,
    pub session_dir: PathBuf,
    pub log_level: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = get_optional(&lookup, "PORTFOLIO_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let auth_url = get_optional(&lookup, "PORTFOLIO_AUTH_URL");
        let http_timeout_secs = match get_optional(&lookup, "PORTFOLIO_HTTP_TIMEOUT_SECS") {
            Some(raw) => Some(parse_positive_u64("PORTFOLIO_HTTP_TIMEOUT_SECS", &raw)?),
            None => None,
        };
        let session_dir = get_optional(&lookup, "PORTFOLIO_SESSION_DIR")
            .unwrap_or_else(|| DEFAULT_SESSION_DIR.to_string())
            .into();
        let log_level = get_optional(&lookup, "LOG_LEVEL")
            .or_else(|| get_optional(&lookup, "RUST_LOG"))
            .unwrap_or_else(|| "warn".to_string());

        Ok(Self {
            api_url,
            auth_url,
            http_timeout_secs,
            session_dir,
            log_level,
        })
    }

    /// `server` из командной строки имеет приоритет над `PORTFOLIO_API_URL`.
    pub fn client_config(&self, server: Option<String>) -> ClientConfig {
        let api_url = normalize_server(server.unwrap_or_else(|| self.api_url.clone()));
        let mut config = ClientConfig::new(api_url);
        if let Some(auth_url) = &self.auth_url {
            config = config.with_auth_url(auth_url.clone());
        }
        if let Some(secs) = self.http_timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

fn get_optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_positive_u64(key: &str, raw: &str) -> Result<u64> {
    let value = raw
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

pub fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Result<Settings> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let settings = settings_from(&[]).expect("defaults are valid");
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.session_dir, PathBuf::from(DEFAULT_SESSION_DIR));
        assert_eq!(settings.log_level, "warn");
        assert!(settings.http_timeout_secs.is_none());
    }

    #[test]
    fn log_level_falls_back_to_rust_log() {
        let settings = settings_from(&[("RUST_LOG", "debug")]).expect("valid");
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn log_level_wins_over_rust_log() {
        let settings =
            settings_from(&[("LOG_LEVEL", "info"), ("RUST_LOG", "trace")]).expect("valid");
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = settings_from(&[("PORTFOLIO_HTTP_TIMEOUT_SECS", "0")])
            .expect_err("zero timeout must fail");
        assert!(err.to_string().contains("must be > 0"));
    }

    #[test]
    fn garbage_timeout_is_rejected() {
        assert!(settings_from(&[("PORTFOLIO_HTTP_TIMEOUT_SECS", "soon")]).is_err());
    }

    #[test]
    fn server_flag_overrides_env_and_gets_scheme() {
        let settings =
            settings_from(&[("PORTFOLIO_API_URL", "https://cms.example.com/api")]).expect("valid");
        let config = settings.client_config(Some("127.0.0.1:8000/api".to_string()));
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000/api");
        assert_eq!(config.token_url(), "http://127.0.0.1:8000/api-token-auth/");
    }

    #[test]
    fn timeout_and_auth_url_reach_client_config() {
        let settings = settings_from(&[
            ("PORTFOLIO_AUTH_URL", "https://auth.example.com/token/"),
            ("PORTFOLIO_HTTP_TIMEOUT_SECS", "7"),
        ])
        .expect("valid");
        let config = settings.client_config(None);
        assert_eq!(config.timeout, Some(Duration::from_secs(7)));
        assert_eq!(config.token_url(), "https://auth.example.com/token/");
    }

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8080/api".to_string());
        assert_eq!(s, "https://example.com:8080/api");
    }
}

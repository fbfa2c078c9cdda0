use std::time::Duration;

const AUTH_PATH: &str = "api-token-auth/";

#[derive(Debug, Clone)]
/// Настройки подключения к content API.
pub struct ClientConfig {
    /// Базовый URL API, например `http://localhost:8000/api`.
    pub api_base_url: String,
    /// Явный URL endpoint'а токенов. Если не задан, вычисляется из `api_base_url`.
    pub auth_url: Option<String>,
    /// Таймаут запроса. По умолчанию отсутствует.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Конфигурация с базовым URL и остальными полями по умолчанию.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            auth_url: None,
            timeout: None,
        }
    }

    /// Переопределяет URL endpoint'а токенов.
    pub fn with_auth_url(mut self, auth_url: impl Into<String>) -> Self {
        self.auth_url = Some(auth_url.into());
        self
    }

    /// Включает таймаут запроса.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// URL endpoint'а токенов.
    ///
    /// Endpoint лежит рядом с корнем API, а не внутри него: завершающий
    /// сегмент `/api` отбрасывается и добавляется `/api-token-auth/`.
    pub fn token_url(&self) -> String {
        if let Some(url) = &self.auth_url {
            return url.clone();
        }

        let base = self.api_base_url.trim_end_matches('/');
        let root = base.strip_suffix("/api").unwrap_or(base);
        format!("{root}/{AUTH_PATH}")
    }
}

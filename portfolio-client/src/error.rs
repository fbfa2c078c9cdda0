use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `portfolio-client`.
pub enum PortfolioClientError {
    /// Сервер отклонил учётные данные, либо операция требует сессию,
    /// а токен не сохранён.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Запрошенный ресурс не найден (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Любой другой неуспешный HTTP-статус.
    #[error("api error: {status} {status_text}")]
    Api {
        /// Код HTTP-статуса.
        status: u16,
        /// Текстовое описание статуса, например `Internal Server Error`.
        status_text: String,
        /// Сообщение backend из поля `detail`, если оно было в теле ответа.
        detail: Option<String>,
    },

    /// Сетевая ошибка до получения статуса (DNS, отказ в соединении, таймаут).
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Успешный ответ, тело которого не соответствует ожидаемому типу.
    #[error("decode error: {0}")]
    Decode(String),

    /// Запрос не удалось собрать локально.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Ошибка хранилища сессии.
    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Результат операций `portfolio-client`.
pub type PortfolioClientResult<T> = Result<T, PortfolioClientError>;

impl PortfolioClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, detail: Option<String>) -> Self {
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            _ => Self::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
                detail,
            },
        }
    }

    /// Ошибки `send`/`bytes`. Статус ответа проверяется отдельно в
    /// `HttpClient::execute`, сюда попадают только локальные и сетевые сбои.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return Self::InvalidRequest(err.to_string());
        }
        Self::Transport(err)
    }

    /// HTTP-статус ответа, если ошибка его содержит.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound => Some(404),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

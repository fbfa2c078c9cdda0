//! Клиентская библиотека content API сайта-портфолио.
//!
//! Предоставляет единый API (`PortfolioClient`) над REST-ресурсами:
//! посты блога, проекты, фотоальбомы, фотографии, сертификаты и заявки
//! формы обратной связи, а также вход администратора и цитату дня.
//!
//! Токен сессии хранится в переданном [`SessionContext`] и автоматически
//! подставляется в заголовок `Authorization: Token <value>`.
#![warn(missing_docs)]

mod config;
mod error;
mod http_client;
mod models;
mod resource;
mod resources;
mod session;
mod storage;
mod upload;

pub use config::ClientConfig;
pub use error::{PortfolioClientError, PortfolioClientResult};
pub use http_client::RequestBody;
pub use models::{
    Album, BlogPost, BlogPostPatch, Certificate, CertificateKind, ContactMessage, ContactReceipt,
    ContactSubmission, NewBlogPost, NewProject, Photo, Project, ProjectPatch, Quote,
};
pub use resource::{
    Creatable, Deletable, Featurable, IntoRequestBody, Listable, Resource, ResourceClient,
    Retrievable, Updatable,
};
pub use resources::{Albums, Blogs, Certificates, Contacts, Photos, Projects};
pub use session::{SessionContext, SessionToken, SessionUser};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use upload::{ImageUpload, NewAlbum, NewCertificate, NewPhoto};

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use http_client::HttpClient;

const QUOTE_PATH: &str = "quote/";

#[derive(Debug, Serialize)]
struct LoginRequestDto<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponseDto {
    token: String,
}

#[derive(Debug, Clone)]
/// Клиент content API портфолио.
pub struct PortfolioClient {
    pub(crate) http: HttpClient,
    token_url: String,
    session: SessionContext,
}

impl PortfolioClient {
    /// Создаёт клиент с конфигурацией и контекстом сессии.
    pub fn new(config: ClientConfig, session: SessionContext) -> PortfolioClientResult<Self> {
        let http = HttpClient::new(&config)?;
        Ok(Self {
            http,
            token_url: config.token_url(),
            session,
        })
    }

    /// Контекст сессии клиента.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Клиент произвольного ресурса.
    pub fn resource<R: Resource>(&self) -> ResourceClient<'_, R> {
        ResourceClient::new(self)
    }

    /// Посты блога.
    pub fn blogs(&self) -> ResourceClient<'_, Blogs> {
        self.resource()
    }

    /// Проекты.
    pub fn projects(&self) -> ResourceClient<'_, Projects> {
        self.resource()
    }

    /// Фотоальбомы.
    pub fn albums(&self) -> ResourceClient<'_, Albums> {
        self.resource()
    }

    /// Фотографии.
    pub fn photos(&self) -> ResourceClient<'_, Photos> {
        self.resource()
    }

    /// Сертификаты.
    pub fn certificates(&self) -> ResourceClient<'_, Certificates> {
        self.resource()
    }

    /// Заявки формы обратной связи.
    pub fn contacts(&self) -> ResourceClient<'_, Contacts> {
        self.resource()
    }

    /// Выполняет вход администратора и сохраняет токен в контексте сессии.
    ///
    /// Любой неуспешный статус endpoint'а токенов означает
    /// [`PortfolioClientError::Auth`]; в этом случае сессия не меняется.
    pub async fn login(&self, username: &str, password: &str) -> PortfolioClientResult<SessionToken> {
        let payload = RequestBody::json(&LoginRequestDto { username, password })?;
        let response = self
            .http
            .dispatch(Method::POST, &self.token_url, Some(payload), None)
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = HttpClient::error_detail(response).await;
            let message = match detail {
                Some(detail) => format!("{detail} (status {})", status.as_u16()),
                None => format!("invalid credentials (status {})", status.as_u16()),
            };
            warn!(username, status = status.as_u16(), "login rejected");
            return Err(PortfolioClientError::Auth(message));
        }

        let dto: TokenResponseDto = HttpClient::decode_json(response)
            .await
            .inspect_err(|err| warn!(username, error = %err, "unexpected token response"))?;
        let token = dto.token.trim();
        if token.is_empty() {
            let err = PortfolioClientError::Decode(
                "token endpoint returned an empty token".to_string(),
            );
            warn!(username, error = %err, "unexpected token response");
            return Err(err);
        }

        let token = SessionToken::new(token);
        self.session
            .persist(
                &token,
                &SessionUser {
                    username: username.to_string(),
                },
            )
            .inspect_err(|err| warn!(username, error = %err, "failed to persist session"))?;
        info!(username, "logged in");
        Ok(token)
    }

    /// Удаляет сохранённую сессию. Сетевых запросов не выполняет.
    pub fn logout(&self) -> PortfolioClientResult<()> {
        self.session.clear()?;
        info!("logged out");
        Ok(())
    }

    /// Возвращает цитату дня.
    pub async fn daily_quote(&self) -> PortfolioClientResult<Quote> {
        let token = self.session_token("quote", "get", false)?;
        self.http
            .execute_json(Method::GET, QUOTE_PATH, None, token.as_ref())
            .await
    }

    pub(crate) fn session_token(
        &self,
        resource: &'static str,
        operation: &'static str,
        required: bool,
    ) -> PortfolioClientResult<Option<SessionToken>> {
        let token = self.session.token()?;
        if required && token.is_none() {
            warn!(resource, operation, "operation requires a session");
            return Err(PortfolioClientError::Auth(format!(
                "{operation} on {resource} requires a session token"
            )));
        }
        Ok(token)
    }
}

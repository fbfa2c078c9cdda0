use reqwest::header::AUTHORIZATION;
use reqwest::multipart::Form;
use reqwest::{Client, Method, Response};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{PortfolioClientError, PortfolioClientResult};
use crate::session::SessionToken;

/// Тело исходящего запроса.
pub enum RequestBody {
    /// JSON-документ.
    Json(serde_json::Value),
    /// Форма `multipart/form-data`.
    Multipart(Form),
}

impl RequestBody {
    pub(crate) fn json<T: serde::Serialize>(payload: &T) -> PortfolioClientResult<Self> {
        serde_json::to_value(payload)
            .map(Self::Json)
            .map_err(|err| PortfolioClientError::InvalidRequest(format!("unserializable payload: {err}")))
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Json(_) => "json",
            Self::Multipart(_) => "multipart",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    detail: Option<String>,
    non_field_errors: Option<Vec<String>>,
}

impl ErrorResponseDto {
    fn into_message(self) -> Option<String> {
        self.detail.or_else(|| {
            self.non_field_errors
                .filter(|errors| !errors.is_empty())
                .map(|errors| errors.join("; "))
        })
    }
}

#[derive(Debug, Clone)]
/// HTTP-транспорт поверх `reqwest` для REST API портфолио.
pub(crate) struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    pub(crate) fn new(config: &ClientConfig) -> PortfolioClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(PortfolioClientError::from_reqwest)?;

        Ok(Self {
            base_url: config.api_base_url.clone(),
            client,
        })
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) async fn decode_error(response: Response) -> PortfolioClientError {
        let status = response.status();
        let detail = Self::error_detail(response).await;
        PortfolioClientError::from_http_status(status, detail)
    }

    pub(crate) async fn error_detail(response: Response) -> Option<String> {
        let raw = response.bytes().await.ok()?;
        serde_json::from_slice::<ErrorResponseDto>(&raw)
            .ok()
            .and_then(ErrorResponseDto::into_message)
    }

    pub(crate) async fn decode_json<T: DeserializeOwned>(response: Response) -> PortfolioClientResult<T> {
        let raw = response
            .bytes()
            .await
            .map_err(PortfolioClientError::from_reqwest)?;
        serde_json::from_slice::<T>(&raw).map_err(|err| PortfolioClientError::Decode(err.to_string()))
    }

    /// Отправляет запрос на абсолютный URL без проверки статуса.
    pub(crate) async fn dispatch(
        &self,
        method: Method,
        url: &str,
        body: Option<RequestBody>,
        token: Option<&SessionToken>,
    ) -> PortfolioClientResult<Response> {
        debug!(
            %method,
            url,
            body = body.as_ref().map(RequestBody::kind),
            authorized = token.is_some(),
            "sending request"
        );

        let mut request = self.client.request(method.clone(), url);
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Token {}", token.as_str()));
        }
        request = match body {
            Some(RequestBody::Json(value)) => request.json(&value),
            Some(RequestBody::Multipart(form)) => request.multipart(form),
            None => request,
        };

        request.send().await.map_err(|err| {
            let err = PortfolioClientError::from_reqwest(err);
            warn!(%method, url, error = %err, "request failed before a response was received");
            err
        })
    }

    /// Отправляет запрос на путь относительно базового URL и проверяет статус.
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
        token: Option<&SessionToken>,
    ) -> PortfolioClientResult<Response> {
        let url = self.endpoint(path);
        let response = self.dispatch(method.clone(), &url, body, token).await?;

        if !response.status().is_success() {
            let err = Self::decode_error(response).await;
            warn!(%method, %url, error = %err, "request rejected by server");
            return Err(err);
        }
        Ok(response)
    }

    pub(crate) async fn execute_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
        token: Option<&SessionToken>,
    ) -> PortfolioClientResult<T> {
        let response = self.execute(method.clone(), path, body, token).await?;
        Self::decode_json(response).await.inspect_err(|err| {
            warn!(%method, path, error = %err, "unexpected response body");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpClient {
        HttpClient::new(&ClientConfig::new(base)).expect("client builds")
    }

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = client("http://localhost:8000/api/");
        assert_eq!(client.endpoint("/blogs/"), "http://localhost:8000/api/blogs/");
    }

    #[test]
    fn endpoint_keeps_trailing_slash_of_path() {
        let client = client("http://localhost:8000/api");
        assert_eq!(client.endpoint("blogs/5/"), "http://localhost:8000/api/blogs/5/");
    }

    #[test]
    fn error_detail_prefers_detail_field() {
        let dto: ErrorResponseDto =
            serde_json::from_str(r#"{"detail":"Not authorized","non_field_errors":["x"]}"#)
                .expect("dto parses");
        assert_eq!(dto.into_message().as_deref(), Some("Not authorized"));
    }

    #[test]
    fn error_detail_joins_non_field_errors() {
        let dto: ErrorResponseDto = serde_json::from_str(
            r#"{"non_field_errors":["Unable to log in.","Try again."]}"#,
        )
        .expect("dto parses");
        assert_eq!(
            dto.into_message().as_deref(),
            Some("Unable to log in.; Try again.")
        );
    }

    #[test]
    fn json_body_is_built_from_payload() {
        let body = RequestBody::json(&serde_json::json!({"title": "X"})).expect("body builds");
        assert_eq!(body.kind(), "json");
    }
}

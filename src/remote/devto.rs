//! remote::devto
//!
//! Publisher implementation for a dev.to-style articles REST API.
//!
//! # Design
//!
//! This module implements the [`Publisher`] trait over plain REST:
//!
//! - `POST   {base}/articles`        - create
//! - `PUT    {base}/articles/{id}`   - update
//! - `GET    {base}/articles/{id}`   - lookup
//! - `GET    {base}/articles/me/all` - list the authenticated user's articles
//!
//! Payloads are wrapped in an `{"article": {...}}` envelope as the API
//! requires. Authentication is an `api-key` header.
//!
//! # Rate Limiting
//!
//! The API is rate limited. This implementation returns
//! [`PublishError::RateLimited`] when limits are hit and does not retry;
//! the executor processes documents sequentially precisely to keep request
//! patterns gentle.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::traits::{
    ArticlePayload, CreatedArticle, PublishError, Publisher, RemoteArticle, UpdatedArticle,
};
use async_trait::async_trait;

/// Default articles API base URL.
const DEFAULT_API_BASE: &str = "https://dev.to/api";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "inkpress-cli";

/// Publisher implementation backed by the dev.to articles API.
pub struct DevtoClient {
    /// HTTP client for making requests
    client: Client,
    /// API key sent in the `api-key` header
    api_key: String,
    /// API base URL (configurable for self-hosted Forem instances)
    api_base: String,
}

// Custom Debug to avoid exposing the API key.
impl std::fmt::Debug for DevtoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevtoClient")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl DevtoClient {
    /// Create a client against the default API base.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_api_base(api_key, DEFAULT_API_BASE)
    }

    /// Create a client against a custom API base (self-hosted instances,
    /// test servers).
    pub fn with_api_base(api_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, PublishError> {
        if self.api_key.trim().is_empty() {
            return Err(PublishError::AuthRequired);
        }
        let mut headers = HeaderMap::new();
        headers.insert(
            "api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|_| PublishError::AuthFailed("API key is not a valid header value".into()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }

    /// Handle an API response, mapping errors appropriately.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: Response,
    ) -> Result<T, PublishError> {
        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(|e| PublishError::ApiError {
                status: status.as_u16(),
                message: format!("failed to parse response: {e}"),
            })
        } else {
            Err(Self::error_from(status, response).await)
        }
    }

    /// Map an error response to a typed error.
    async fn error_from(status: StatusCode, response: Response) -> PublishError {
        let message = match response.json::<ApiErrorResponse>().await {
            Ok(err) => err.error,
            Err(_) => "unknown error".to_string(),
        };
        match status {
            StatusCode::UNAUTHORIZED => PublishError::AuthFailed("invalid or missing API key".into()),
            StatusCode::FORBIDDEN => PublishError::AuthFailed(message),
            StatusCode::NOT_FOUND => PublishError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => PublishError::RateLimited,
            _ => PublishError::ApiError {
                status: status.as_u16(),
                message,
            },
        }
    }

    fn articles_url(&self, path: &str) -> String {
        if path.is_empty() {
            format!("{}/articles", self.api_base)
        } else {
            format!("{}/articles/{}", self.api_base, path)
        }
    }
}

#[async_trait]
impl Publisher for DevtoClient {
    fn name(&self) -> &'static str {
        "devto"
    }

    async fn create(&self, payload: &ArticlePayload) -> Result<CreatedArticle, PublishError> {
        let headers = self.headers()?;
        let response = self
            .client
            .post(self.articles_url(""))
            .headers(headers)
            .json(&ArticleEnvelope { article: payload })
            .send()
            .await
            .map_err(|e| PublishError::NetworkError(e.to_string()))?;

        let dto: ArticleDto = self.handle_response(response).await?;
        Ok(CreatedArticle {
            id: dto.id,
            url: dto.url,
        })
    }

    async fn update(
        &self,
        id: u64,
        payload: &ArticlePayload,
    ) -> Result<UpdatedArticle, PublishError> {
        let headers = self.headers()?;
        let response = self
            .client
            .put(self.articles_url(&id.to_string()))
            .headers(headers)
            .json(&ArticleEnvelope { article: payload })
            .send()
            .await
            .map_err(|e| PublishError::NetworkError(e.to_string()))?;

        let dto: ArticleDto = self.handle_response(response).await?;
        Ok(UpdatedArticle { url: dto.url })
    }

    async fn get_by_id(&self, id: u64) -> Result<RemoteArticle, PublishError> {
        let headers = self.headers()?;
        let response = self
            .client
            .get(self.articles_url(&id.to_string()))
            .headers(headers)
            .send()
            .await
            .map_err(|e| PublishError::NetworkError(e.to_string()))?;

        let dto: ArticleDto = self.handle_response(response).await?;
        Ok(dto.into())
    }

    async fn list_mine(&self) -> Result<Vec<RemoteArticle>, PublishError> {
        let headers = self.headers()?;
        let response = self
            .client
            .get(self.articles_url("me/all"))
            .headers(headers)
            .send()
            .await
            .map_err(|e| PublishError::NetworkError(e.to_string()))?;

        let dtos: Vec<ArticleDto> = self.handle_response(response).await?;
        Ok(dtos.into_iter().map(RemoteArticle::from).collect())
    }
}

/// Request envelope required by the API.
#[derive(Serialize)]
struct ArticleEnvelope<'a> {
    article: &'a ArticlePayload,
}

/// Wire representation of an article.
#[derive(Debug, Deserialize)]
struct ArticleDto {
    id: u64,
    #[serde(default)]
    title: String,
    url: String,
    #[serde(default)]
    published: bool,
}

impl From<ArticleDto> for RemoteArticle {
    fn from(dto: ArticleDto) -> Self {
        RemoteArticle {
            id: dto.id,
            title: dto.title,
            url: dto.url,
            published: dto.published,
        }
    }
}

/// Error body shape returned by the API.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default = "unknown_error")]
    error: String,
}

fn unknown_error() -> String {
    "unknown error".to_string()
}

//! remote::traits
//!
//! Publisher trait definition for the remote articles service.
//!
//! # Design
//!
//! The `Publisher` trait is async because every operation involves network
//! I/O. All methods return `Result` so API errors can be handled per
//! document: the executor records a failure outcome and continues, it never
//! aborts the batch.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Errors from publisher operations.
///
/// These map to the common failure modes of a hosted articles API.
#[derive(Debug, Clone, Error)]
pub enum PublishError {
    /// No API key is configured.
    #[error("authentication required")]
    AuthRequired,

    /// The API key was rejected.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested article was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),
}

/// Outbound article payload, assembled from a document's header and its
/// publish-ready (image-rewritten) body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ArticlePayload {
    /// Article title (required).
    pub title: String,
    /// Markdown body with image references rewritten for publication.
    pub body_markdown: String,
    /// Whether the article is published or a draft.
    pub published: bool,
    /// Tags; empty when the header has none.
    pub tags: Vec<String>,
    /// Series name, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    /// Cover image URL, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
    /// Canonical URL, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    /// Description; empty string when unset.
    pub description: String,
    /// Organization to publish under, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<u64>,
}

/// Result of a successful create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedArticle {
    /// Identifier assigned by the service.
    pub id: u64,
    /// Web URL of the article.
    pub url: String,
}

/// Result of a successful update call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedArticle {
    /// Web URL of the article.
    pub url: String,
}

/// A remote article as returned by lookup operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteArticle {
    /// Identifier assigned by the service.
    pub id: u64,
    /// Article title.
    pub title: String,
    /// Web URL of the article.
    pub url: String,
    /// Whether the article is published.
    pub published: bool,
}

/// The Publisher trait for the remote articles service.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, PublishError>`. The executor treats any
/// error as terminal for that document's transaction; no retries happen at
/// this layer.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Get the publisher name (e.g., "devto").
    fn name(&self) -> &'static str;

    /// Create a new article.
    ///
    /// # Errors
    ///
    /// - `AuthFailed` if the API key is invalid
    /// - `ApiError` with status 422 if the payload fails validation
    async fn create(&self, payload: &ArticlePayload) -> Result<CreatedArticle, PublishError>;

    /// Update an existing article by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no article with `id` exists
    async fn update(&self, id: u64, payload: &ArticlePayload)
        -> Result<UpdatedArticle, PublishError>;

    /// Get an article by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no article with `id` exists
    async fn get_by_id(&self, id: u64) -> Result<RemoteArticle, PublishError>;

    /// List the authenticated user's articles.
    async fn list_mine(&self) -> Result<Vec<RemoteArticle>, PublishError>;
}

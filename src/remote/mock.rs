//! remote::mock
//!
//! Mock publisher implementation for deterministic testing.
//!
//! # Design
//!
//! The mock publisher stores articles in memory, assigns sequential ids,
//! and allows configuring failure scenarios, so executor tests can exercise
//! every terminal state without a network.
//!
//! # Example
//!
//! ```
//! use inkpress::remote::mock::MockPublisher;
//! use inkpress::remote::{ArticlePayload, Publisher};
//!
//! # tokio_test::block_on(async {
//! let publisher = MockPublisher::new();
//! let created = publisher
//!     .create(&ArticlePayload {
//!         title: "A".into(),
//!         body_markdown: "body".into(),
//!         published: false,
//!         tags: vec![],
//!         series: None,
//!         main_image: None,
//!         canonical_url: None,
//!         description: String::new(),
//!         organization_id: None,
//!     })
//!     .await
//!     .unwrap();
//! assert_eq!(created.id, 1);
//!
//! let fetched = publisher.get_by_id(1).await.unwrap();
//! assert_eq!(fetched.title, "A");
//! # });
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::{
    ArticlePayload, CreatedArticle, PublishError, Publisher, RemoteArticle, UpdatedArticle,
};

/// Mock publisher for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockPublisher {
    inner: Arc<Mutex<MockPublisherInner>>,
}

#[derive(Debug, Default)]
struct MockPublisherInner {
    /// Stored articles by id.
    articles: BTreeMap<u64, RemoteArticle>,
    /// Next id to assign.
    next_id: u64,
    /// Method to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail create with the given error.
    Create(PublishError),
    /// Fail update with the given error.
    Update(PublishError),
    /// Fail get_by_id with the given error.
    GetById(PublishError),
    /// Fail list_mine with the given error.
    ListMine(PublishError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone)]
pub enum MockOperation {
    Create { title: String, published: bool },
    Update { id: u64, title: String },
    GetById { id: u64 },
    ListMine,
}

impl MockPublisher {
    /// Create an empty mock publisher.
    pub fn new() -> Self {
        let mock = Self::default();
        mock.inner.lock().unwrap().next_id = 1;
        mock
    }

    /// Seed an existing remote article.
    pub fn with_article(self, id: u64, title: impl Into<String>) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.articles.insert(
                id,
                RemoteArticle {
                    id,
                    title: title.into(),
                    url: format!("https://dev.to/mock/article-{id}"),
                    published: true,
                },
            );
            inner.next_id = inner.next_id.max(id + 1);
        }
        self
    }

    /// Configure an operation to fail.
    pub fn set_fail_on(&self, fail: FailOn) {
        self.inner.lock().unwrap().fail_on = Some(fail);
    }

    /// All recorded operations, in order.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.inner.lock().unwrap().operations.clone()
    }

    /// Number of create calls recorded.
    pub fn create_count(&self) -> usize {
        self.operations()
            .iter()
            .filter(|op| matches!(op, MockOperation::Create { .. }))
            .count()
    }

    /// Number of update calls recorded.
    pub fn update_count(&self) -> usize {
        self.operations()
            .iter()
            .filter(|op| matches!(op, MockOperation::Update { .. }))
            .count()
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn create(&self, payload: &ArticlePayload) -> Result<CreatedArticle, PublishError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::Create {
            title: payload.title.clone(),
            published: payload.published,
        });
        if let Some(FailOn::Create(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        let id = inner.next_id;
        inner.next_id += 1;
        let url = format!("https://dev.to/mock/article-{id}");
        inner.articles.insert(
            id,
            RemoteArticle {
                id,
                title: payload.title.clone(),
                url: url.clone(),
                published: payload.published,
            },
        );
        Ok(CreatedArticle { id, url })
    }

    async fn update(
        &self,
        id: u64,
        payload: &ArticlePayload,
    ) -> Result<UpdatedArticle, PublishError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::Update {
            id,
            title: payload.title.clone(),
        });
        if let Some(FailOn::Update(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        match inner.articles.get_mut(&id) {
            Some(article) => {
                article.title = payload.title.clone();
                article.published = payload.published;
                Ok(UpdatedArticle {
                    url: article.url.clone(),
                })
            }
            None => Err(PublishError::NotFound(format!("article {id}"))),
        }
    }

    async fn get_by_id(&self, id: u64) -> Result<RemoteArticle, PublishError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::GetById { id });
        if let Some(FailOn::GetById(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        inner
            .articles
            .get(&id)
            .cloned()
            .ok_or_else(|| PublishError::NotFound(format!("article {id}")))
    }

    async fn list_mine(&self) -> Result<Vec<RemoteArticle>, PublishError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::ListMine);
        if let Some(FailOn::ListMine(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        Ok(inner.articles.values().cloned().collect())
    }
}

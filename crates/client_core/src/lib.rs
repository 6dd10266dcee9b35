use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{Book, Genre, Review},
    error::ServiceErrorBody,
    protocol::{BestSellerListResponse, ReviewsResponse},
};
use tracing::debug;

pub mod config;
mod coordinator;
pub mod error;
pub mod session;

pub use config::{load_settings, Settings};
pub use coordinator::{Coordinator, ListOutcome, ReviewOutcome, SessionEvent};
pub use error::{FetchError, FetchErrorKind};
pub use session::{ReviewView, SessionState, TitleEntry};
pub use tokio_util::sync::CancellationToken;

/// The external catalog the fetchers talk to.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Current best-seller list for `genre`.
    ///
    /// `Ok(None)` means the response carried no list container. Implementations
    /// must resolve to a [`FetchErrorKind::Cancelled`] error once `cancel` fires.
    async fn best_sellers(
        &self,
        genre: Genre,
        cancel: CancellationToken,
    ) -> Result<Option<Vec<Book>>, FetchError>;

    async fn reviews(&self, title: &str) -> Result<Vec<Review>, FetchError>;
}

pub struct HttpCatalogClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl HttpCatalogClient {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config::normalize_base_url(&settings.base_url)?,
            api_key: settings.api_key.clone(),
        })
    }

    fn best_sellers_url(&self, genre: Genre) -> String {
        format!(
            "{}/lists/current/{}.json?api-key={}",
            self.base_url,
            urlencoding::encode(genre.as_str()),
            urlencoding::encode(&self.api_key)
        )
    }

    fn reviews_url(&self, title: &str) -> String {
        format!(
            "{}/reviews.json?title={}&api-key={}",
            self.base_url,
            urlencoding::encode(title.trim()),
            urlencoding::encode(&self.api_key)
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        let res = self.http.get(url).send().await?;
        let res = ensure_success(res).await?;
        let body = res.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

async fn ensure_success(res: Response) -> Result<Response, FetchError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let detail = res
        .text()
        .await
        .ok()
        .and_then(|body| ServiceErrorBody::parse(&body))
        .and_then(|body| body.message());
    Err(FetchError::status(status.as_u16(), detail))
}

#[async_trait]
impl CatalogService for HttpCatalogClient {
    async fn best_sellers(
        &self,
        genre: Genre,
        cancel: CancellationToken,
    ) -> Result<Option<Vec<Book>>, FetchError> {
        let request = self.get_json::<BestSellerListResponse>(self.best_sellers_url(genre));
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(genre = genre.as_str(), "best-seller request aborted");
                Err(FetchError::cancelled())
            }
            body = request => Ok(body?.into_books()),
        }
    }

    async fn reviews(&self, title: &str) -> Result<Vec<Review>, FetchError> {
        let body: ReviewsResponse = self.get_json(self.reviews_url(title)).await?;
        Ok(body.into_reviews())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

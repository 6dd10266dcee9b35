use serde::{Deserialize, Serialize};

use crate::domain::{Book, Review};

/// `GET lists/current/{genre}.json` response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BestSellerListResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub num_results: Option<u32>,
    #[serde(default)]
    pub results: Option<BestSellerListResults>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BestSellerListResults {
    #[serde(default)]
    pub list_name: Option<String>,
    #[serde(default)]
    pub books: Option<Vec<Book>>,
}

impl BestSellerListResponse {
    /// `None` when the list container is missing, which callers report as "no results"
    /// rather than as a failure. An explicit empty array stays `Some(vec![])`.
    pub fn into_books(self) -> Option<Vec<Book>> {
        self.results.and_then(|results| results.books)
    }
}

/// `GET reviews.json` response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewsResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub num_results: Option<u32>,
    #[serde(default)]
    pub results: Option<Vec<Review>>,
}

impl ReviewsResponse {
    pub fn into_reviews(self) -> Vec<Review> {
        self.results.unwrap_or_default()
    }
}

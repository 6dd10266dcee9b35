//! Session aggregate shared by the list and review fetchers.
//!
//! All mutation goes through the entry points below; the coordinator applies
//! each one under its lock, so observers only ever see whole transitions.

use std::collections::HashMap;

use shared::domain::{Book, Genre, Review};

pub const NO_RESULTS_MESSAGE: &str = "No best sellers found for this genre.";
pub const REVIEWS_ERROR_MESSAGE: &str = "Error fetching reviews.";

pub fn list_failure_message(detail: &str) -> String {
    format!("Failed to fetch best sellers: {detail}")
}

/// Review bookkeeping for one title.
///
/// `reviews` is `None` until a fetch for the title completes successfully, so
/// "queried with zero results" (`Some(vec![])`) never collides with "not asked".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleEntry {
    pub reviews: Option<Vec<Review>>,
    pub in_flight: bool,
}

impl TitleEntry {
    pub fn queried(&self) -> bool {
        self.reviews.is_some()
    }
}

/// What the presentation layer should render under a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewView<'a> {
    NotQueried,
    NoReviews,
    Reviews(&'a [Review]),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    selected_genre: Option<Genre>,
    books: Vec<Book>,
    titles: HashMap<String, TitleEntry>,
    global_error: Option<String>,
    genre_fetch_in_flight: bool,
}

impl SessionState {
    pub fn selected_genre(&self) -> Option<Genre> {
        self.selected_genre
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn global_error(&self) -> Option<&str> {
        self.global_error.as_deref()
    }

    pub fn is_genre_fetch_in_flight(&self) -> bool {
        self.genre_fetch_in_flight
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.books.iter().any(|book| book.title == title)
    }

    pub fn title_entry(&self, title: &str) -> Option<&TitleEntry> {
        self.titles.get(title)
    }

    pub fn reviews_for(&self, title: &str) -> Option<&[Review]> {
        self.titles
            .get(title)
            .and_then(|entry| entry.reviews.as_deref())
    }

    pub fn is_queried(&self, title: &str) -> bool {
        self.titles.get(title).is_some_and(TitleEntry::queried)
    }

    pub fn is_review_in_flight(&self, title: &str) -> bool {
        self.titles.get(title).is_some_and(|entry| entry.in_flight)
    }

    pub fn queried_titles(&self) -> impl Iterator<Item = &str> {
        self.titles
            .iter()
            .filter(|(_, entry)| entry.queried())
            .map(|(title, _)| title.as_str())
    }

    pub fn review_view(&self, title: &str) -> ReviewView<'_> {
        match self.reviews_for(title) {
            None => ReviewView::NotQueried,
            Some([]) => ReviewView::NoReviews,
            Some(reviews) => ReviewView::Reviews(reviews),
        }
    }

    /// Resets list and review data ahead of a new list request.
    ///
    /// In-flight review flags survive the reset: only their own completion may clear them.
    pub fn begin_list_fetch(&mut self, genre: Genre) {
        self.selected_genre = Some(genre);
        self.books.clear();
        self.global_error = None;
        self.titles.retain(|_, entry| entry.in_flight);
        for entry in self.titles.values_mut() {
            entry.reviews = None;
        }
        self.genre_fetch_in_flight = true;
    }

    pub fn apply_book_list(&mut self, books: Vec<Book>) {
        self.books = books;
    }

    pub fn record_list_failure(&mut self, message: impl Into<String>) {
        self.books.clear();
        self.global_error = Some(message.into());
    }

    pub fn finish_list_fetch(&mut self) {
        self.genre_fetch_in_flight = false;
    }

    pub fn begin_review_fetch(&mut self, title: &str) {
        self.titles.entry(title.to_string()).or_default().in_flight = true;
    }

    /// Records a successful review fetch; an empty `reviews` still marks the title as queried.
    pub fn apply_reviews(&mut self, title: &str, reviews: Vec<Review>) {
        let entry = self.titles.entry(title.to_string()).or_default();
        entry.reviews = Some(reviews);
        entry.in_flight = false;
    }

    /// Leaves the title's review data untouched so a failure never reads as "no reviews".
    pub fn record_review_failure(&mut self, title: &str, message: impl Into<String>) {
        self.global_error = Some(message.into());
        if let Some(entry) = self.titles.get_mut(title) {
            entry.in_flight = false;
            if entry.reviews.is_none() {
                self.titles.remove(title);
            }
        }
    }
}

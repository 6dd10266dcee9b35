//! Orchestrates the list and review fetch flows over one [`SessionState`].
//!
//! List fetches are generation-scoped: every `select_genre` call bumps the
//! generation and cancels the previous token, and a completion only touches the
//! session when its generation is still the active one. Review fetches are
//! keyed by title and never cancel each other.

use std::sync::Arc;

use shared::domain::Genre;
use tokio::sync::{broadcast, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    session::{list_failure_message, SessionState, NO_RESULTS_MESSAGE, REVIEWS_ERROR_MESSAGE},
    CatalogService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutcome {
    Loaded(usize),
    NoResults,
    Failed,
    /// A newer request took over, or the request was cancelled; nothing was applied.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    Loaded(usize),
    Failed,
    /// The title is not part of the current list; no request was issued.
    UnknownTitle,
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    Updated(SessionState),
    ListSettled { genre: Genre, outcome: ListOutcome },
    ReviewsSettled { title: String, outcome: ReviewOutcome },
}

#[derive(Clone)]
struct ListTicket {
    generation: u64,
    token: CancellationToken,
}

#[derive(Default)]
struct CoordinatorState {
    session: SessionState,
    generation: u64,
    active_list: Option<ListTicket>,
}

impl CoordinatorState {
    fn is_current(&self, generation: u64) -> bool {
        self.active_list
            .as_ref()
            .is_some_and(|ticket| ticket.generation == generation)
    }
}

pub struct Coordinator {
    service: Arc<dyn CatalogService>,
    inner: Mutex<CoordinatorState>,
    events: broadcast::Sender<SessionEvent>,
}

impl Coordinator {
    pub fn new(service: Arc<dyn CatalogService>) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            service,
            inner: Mutex::new(CoordinatorState::default()),
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> SessionState {
        self.inner.lock().await.session.clone()
    }

    fn publish(&self, session: &SessionState) {
        let _ = self.events.send(SessionEvent::Updated(session.clone()));
    }

    /// Replaces the current list with `genre`'s best sellers.
    pub async fn select_genre(&self, genre: Genre) -> ListOutcome {
        let ticket = {
            let mut guard = self.inner.lock().await;
            if let Some(previous) = guard.active_list.take() {
                previous.token.cancel();
                debug!(
                    generation = previous.generation,
                    "cancelled superseded best-seller request"
                );
            }
            guard.generation += 1;
            let ticket = ListTicket {
                generation: guard.generation,
                token: CancellationToken::new(),
            };
            guard.active_list = Some(ticket.clone());
            guard.session.begin_list_fetch(genre);
            self.publish(&guard.session);
            ticket
        };

        info!(
            genre = genre.as_str(),
            generation = ticket.generation,
            "requesting best-seller list"
        );
        let result = self
            .service
            .best_sellers(genre, ticket.token.clone())
            .await;

        let mut guard = self.inner.lock().await;
        if !guard.is_current(ticket.generation) {
            debug!(
                genre = genre.as_str(),
                generation = ticket.generation,
                "discarding superseded best-seller completion"
            );
            return ListOutcome::Superseded;
        }

        let outcome = match result {
            Ok(Some(books)) => {
                let count = books.len();
                guard.session.apply_book_list(books);
                ListOutcome::Loaded(count)
            }
            Ok(None) => {
                guard.session.record_list_failure(NO_RESULTS_MESSAGE);
                ListOutcome::NoResults
            }
            Err(err) if err.is_cancelled() => ListOutcome::Superseded,
            Err(err) => {
                warn!(genre = genre.as_str(), error = %err, "best-seller request failed");
                guard
                    .session
                    .record_list_failure(list_failure_message(err.message()));
                ListOutcome::Failed
            }
        };

        guard.active_list = None;
        guard.session.finish_list_fetch();
        self.publish(&guard.session);
        drop(guard);

        info!(genre = genre.as_str(), ?outcome, "best-seller request settled");
        let _ = self
            .events
            .send(SessionEvent::ListSettled { genre, outcome });
        outcome
    }

    /// Fetches reviews for one title of the current list.
    pub async fn fetch_reviews(&self, title: &str) -> ReviewOutcome {
        {
            let mut guard = self.inner.lock().await;
            if !guard.session.contains_title(title) {
                debug!(title, "ignoring review request for a title outside the current list");
                return ReviewOutcome::UnknownTitle;
            }
            guard.session.begin_review_fetch(title);
            self.publish(&guard.session);
        }

        info!(title, "requesting reviews");
        let result = self.service.reviews(title).await;

        let outcome = {
            let mut guard = self.inner.lock().await;
            let outcome = match result {
                Ok(reviews) => {
                    let count = reviews.len();
                    guard.session.apply_reviews(title, reviews);
                    ReviewOutcome::Loaded(count)
                }
                Err(err) => {
                    warn!(title, error = %err, "review request failed");
                    guard
                        .session
                        .record_review_failure(title, REVIEWS_ERROR_MESSAGE);
                    ReviewOutcome::Failed
                }
            };
            self.publish(&guard.session);
            outcome
        };

        info!(title, ?outcome, "review request settled");
        let _ = self.events.send(SessionEvent::ReviewsSettled {
            title: title.to_string(),
            outcome,
        });
        outcome
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;

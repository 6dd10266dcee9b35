//! Backend commands queued from UI to backend worker.

use shared::domain::Genre;

#[derive(Debug)]
pub enum BackendCommand {
    SelectGenre { genre: Genre },
    FetchReviews { title: String },
}

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use client_core::{
    config::{load_settings_from, DEFAULT_CONFIG_FILE},
    Coordinator, HttpCatalogClient, ListOutcome, ReviewView, SessionState,
};
use futures::future::join_all;
use shared::domain::Genre;
use tracing_subscriber::EnvFilter;

/// Print the current best sellers for a genre, optionally with reviews.
#[derive(Parser, Debug)]
struct Args {
    /// fiction, nonfiction or science
    #[arg(long)]
    genre: Genre,
    /// Fetch reviews for this title (repeatable).
    #[arg(long = "reviews-for", value_name = "TITLE")]
    reviews_for: Vec<String>,
    /// Fetch reviews for every listed title.
    #[arg(long, conflicts_with = "reviews_for")]
    all_reviews: bool,
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[arg(long)]
    api_key: Option<String>,
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings_from(&args.config, |name| std::env::var(name).ok());
    if let Some(api_key) = args.api_key {
        settings.api_key = api_key;
    }
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if !settings.has_api_key() {
        tracing::warn!("no API key configured; the catalog service will likely reject requests");
    }

    let coordinator = Coordinator::new(Arc::new(HttpCatalogClient::new(&settings)?));
    let outcome = coordinator.select_genre(args.genre).await;

    if matches!(outcome, ListOutcome::Loaded(_)) {
        let titles: Vec<String> = if args.all_reviews {
            let state = coordinator.snapshot().await;
            state.books().iter().map(|b| b.title.clone()).collect()
        } else {
            args.reviews_for
        };
        join_all(titles.iter().map(|title| coordinator.fetch_reviews(title))).await;
    }

    print_session(&coordinator.snapshot().await);
    Ok(())
}

fn print_session(state: &SessionState) {
    if let Some(genre) = state.selected_genre() {
        println!("== {} ==", genre.label());
    }
    if let Some(message) = state.global_error() {
        println!("! {message}");
    }

    for (index, book) in state.books().iter().enumerate() {
        match &book.author {
            Some(author) => println!("{:>2}. {} ({author})", index + 1, book.title),
            None => println!("{:>2}. {}", index + 1, book.title),
        }
        if !book.description.is_empty() {
            println!("    {}", book.description);
        }
        match state.review_view(&book.title) {
            ReviewView::NotQueried => {}
            ReviewView::NoReviews => println!("    No reviews found for this book."),
            ReviewView::Reviews(reviews) => {
                for review in reviews {
                    println!("    - {}", review.summary);
                    println!("      {}", review.url);
                }
            }
        }
    }
}

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use client_core::{ListOutcome, ReviewOutcome, ReviewView, SessionState};
use shared::domain::{Book, Genre};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

const LOADING_LIST_TEXT: &str = "Loading best sellers...";
const NO_REVIEWS_TEXT: &str = "No reviews found for this book.";

pub struct BestSellersApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    session: SessionState,
    status: String,
    status_banner: Option<UiError>,
}

impl BestSellersApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            session: SessionState::default(),
            status: "Starting...".to_string(),
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Session(state) => {
                    self.session = state;
                }
                UiEvent::ListSettled { genre, outcome } => {
                    if let Some(status) = list_status(genre, outcome) {
                        self.status = status;
                    }
                }
                UiEvent::ReviewsSettled { title, outcome } => {
                    self.status = review_status(&title, outcome);
                }
                UiEvent::Error(err) => {
                    self.status = err.banner_text();
                    self.status_banner = Some(err);
                }
            }
        }
    }

    fn select_genre(&mut self, genre: Genre) {
        self.status = format!("Requesting {} best sellers", genre.label());
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::SelectGenre { genre },
            &mut self.status,
        );
    }

    fn request_reviews(&mut self, title: String) {
        self.status = format!("Requesting reviews for \"{title}\"");
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::FetchReviews { title },
            &mut self.status,
        );
    }

    fn show_genre_bar(&mut self, ui: &mut egui::Ui) {
        let enabled = genre_buttons_enabled(&self.session);
        let mut clicked = None;
        ui.horizontal_wrapped(|ui| {
            for genre in Genre::ALL.iter().copied() {
                let selected = self.session.selected_genre() == Some(genre);
                let text = if selected {
                    egui::RichText::new(genre.label()).strong()
                } else {
                    egui::RichText::new(genre.label())
                };
                if ui
                    .add_enabled(enabled, egui::Button::new(text).selected(selected))
                    .clicked()
                {
                    clicked = Some(genre);
                }
            }
        });
        if let Some(genre) = clicked {
            self.select_genre(genre);
        }
    }

    fn show_list_banner(&self, ui: &mut egui::Ui) {
        if self.session.is_genre_fetch_in_flight() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(LOADING_LIST_TEXT);
            });
        }
        if let Some(message) = self.session.global_error() {
            let err = UiError::from_session_error(message);
            let color = if err.is_advisory() {
                ui.visuals().warn_fg_color
            } else {
                ui.visuals().error_fg_color
            };
            ui.colored_label(color, err.banner_text());
        }
        if let Some(err) = &self.status_banner {
            ui.colored_label(ui.visuals().error_fg_color, err.banner_text());
        }
    }

    fn show_book_list(&mut self, ui: &mut egui::Ui) {
        let mut requested = None;
        egui::ScrollArea::vertical()
            .id_salt("book_list_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (index, book) in self.session.books().iter().enumerate() {
                    if show_book_card(ui, &self.session, index, book) {
                        requested = Some(book.title.clone());
                    }
                    ui.add_space(6.0);
                }
            });
        if let Some(title) = requested {
            self.request_reviews(title);
        }
    }
}

/// Renders one book and its reviews; returns true when reviews were requested.
fn show_book_card(ui: &mut egui::Ui, session: &SessionState, index: usize, book: &Book) -> bool {
    let mut requested = false;
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(book_heading(index, book)).strong().size(16.0));
            if !book.description.is_empty() {
                ui.label(&book.description);
            }

            let in_flight = session.is_review_in_flight(&book.title);
            if ui
                .add_enabled(
                    !in_flight,
                    egui::Button::new(review_button_label(session, &book.title)),
                )
                .clicked()
            {
                requested = true;
            }

            match session.review_view(&book.title) {
                ReviewView::NotQueried => {}
                ReviewView::NoReviews => {
                    ui.label(egui::RichText::new(NO_REVIEWS_TEXT).italics());
                }
                ReviewView::Reviews(reviews) => {
                    for review in reviews {
                        ui.separator();
                        if let Some(byline) = &review.byline {
                            ui.label(egui::RichText::new(byline).small().weak());
                        }
                        ui.label(&review.summary);
                        if !review.url.is_empty() {
                            ui.hyperlink_to("Read Full Review", &review.url);
                        }
                    }
                }
            }
        });
    requested
}

fn book_heading(index: usize, book: &Book) -> String {
    let rank = book.rank.map_or(index + 1, |rank| rank as usize);
    match &book.author {
        Some(author) if !author.is_empty() => format!("{rank}. {} by {author}", book.title),
        _ => format!("{rank}. {}", book.title),
    }
}

fn genre_buttons_enabled(session: &SessionState) -> bool {
    !session.is_genre_fetch_in_flight()
}

fn review_button_label(session: &SessionState, title: &str) -> &'static str {
    if session.is_review_in_flight(title) {
        "Loading Reviews..."
    } else {
        "Get Reviews"
    }
}

fn list_status(genre: Genre, outcome: ListOutcome) -> Option<String> {
    match outcome {
        ListOutcome::Loaded(count) => Some(format!("Loaded {count} {} best sellers", genre.label())),
        ListOutcome::NoResults => Some(format!("No {} best sellers available", genre.label())),
        ListOutcome::Failed => Some(format!("Could not load {} best sellers", genre.label())),
        ListOutcome::Superseded => None,
    }
}

fn review_status(title: &str, outcome: ReviewOutcome) -> String {
    match outcome {
        ReviewOutcome::Loaded(0) => format!("No reviews for \"{title}\""),
        ReviewOutcome::Loaded(1) => format!("Loaded 1 review for \"{title}\""),
        ReviewOutcome::Loaded(count) => format!("Loaded {count} reviews for \"{title}\""),
        ReviewOutcome::Failed => format!("Could not load reviews for \"{title}\""),
        ReviewOutcome::UnknownTitle => format!("\"{title}\" is no longer listed"),
    }
}

impl eframe::App for BestSellersApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("genre_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("Best Sellers");
            self.show_genre_bar(ui);
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&self.status).small());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_list_banner(ui);
            self.show_book_list(ui);
        });

        let busy = self.session.is_genre_fetch_in_flight()
            || self
                .session
                .books()
                .iter()
                .any(|book| self.session.is_review_in_flight(&book.title));
        let repaint_after = if busy { 16 } else { 100 };
        ctx.request_repaint_after(std::time::Duration::from_millis(repaint_after));
    }
}

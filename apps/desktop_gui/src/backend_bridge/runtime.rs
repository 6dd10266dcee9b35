//! Runtime bridge between UI command queue and the best-seller coordinator.

use std::{sync::Arc, thread, time::Duration};

use client_core::{Coordinator, HttpCatalogClient, SessionEvent, Settings};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

const RESYNC_RETRY: Duration = Duration::from_millis(50);

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = match HttpCatalogClient::new(&settings) {
                Ok(client) => client,
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: {err:#}"),
                    )));
                    tracing::error!("failed to build catalog client: {err:#}");
                    return;
                }
            };
            let coordinator = Coordinator::new(Arc::new(client));

            let events = coordinator.subscribe();
            tokio::spawn(forward_events(
                Arc::clone(&coordinator),
                events,
                ui_tx.clone(),
            ));

            let ready = if settings.has_api_key() {
                "Ready. Choose a genre.".to_string()
            } else {
                "No API key configured; requests will likely be rejected".to_string()
            };
            let _ = ui_tx.try_send(UiEvent::Info(ready));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::SelectGenre { genre } => {
                        let coordinator = Arc::clone(&coordinator);
                        tokio::spawn(async move {
                            coordinator.select_genre(genre).await;
                        });
                    }
                    BackendCommand::FetchReviews { title } => {
                        let coordinator = Arc::clone(&coordinator);
                        tokio::spawn(async move {
                            coordinator.fetch_reviews(&title).await;
                        });
                    }
                }
            }
            tracing::info!("ui command channel closed; backend worker exiting");
        });
    });
}

enum Forwarded {
    Sent,
    Dropped,
    Closed,
}

/// Relays coordinator events to the UI queue.
///
/// Any dropped or lagged event leaves the UI on an old snapshot, so the
/// forwarder keeps offering the current snapshot until one gets through.
async fn forward_events(
    coordinator: Arc<Coordinator>,
    mut events: broadcast::Receiver<SessionEvent>,
    ui_tx: Sender<UiEvent>,
) {
    let mut resync = false;
    loop {
        let received = if resync {
            tokio::select! {
                received = events.recv() => received,
                _ = tokio::time::sleep(RESYNC_RETRY) => {
                    let latest = coordinator.snapshot().await;
                    match ui_tx.try_send(UiEvent::Session(latest)) {
                        Ok(()) => {
                            tracing::debug!("resent latest session snapshot to ui");
                            resync = false;
                        }
                        Err(TrySendError::Full(_)) => {}
                        Err(TrySendError::Disconnected(_)) => break,
                    }
                    continue;
                }
            }
        } else {
            events.recv().await
        };

        match received {
            Ok(event) => match forward_event(&ui_tx, event) {
                Forwarded::Sent => {}
                Forwarded::Dropped => resync = true,
                Forwarded::Closed => break,
            },
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "ui event forwarder lagged behind coordinator");
                resync = true;
            }
            Err(RecvError::Closed) => break,
        }
    }
}

fn forward_event(ui_tx: &Sender<UiEvent>, event: SessionEvent) -> Forwarded {
    let ui_event = match event {
        SessionEvent::Updated(state) => UiEvent::Session(state),
        SessionEvent::ListSettled { genre, outcome } => UiEvent::ListSettled { genre, outcome },
        SessionEvent::ReviewsSettled { title, outcome } => {
            UiEvent::ReviewsSettled { title, outcome }
        }
    };
    match ui_tx.try_send(ui_event) {
        Ok(()) => Forwarded::Sent,
        Err(TrySendError::Full(_)) => {
            tracing::warn!("ui event queue full; dropping coordinator event");
            Forwarded::Dropped
        }
        Err(TrySendError::Disconnected(_)) => Forwarded::Closed,
    }
}

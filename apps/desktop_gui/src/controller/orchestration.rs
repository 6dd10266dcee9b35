//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::SelectGenre { .. } => "select_genre",
        BackendCommand::FetchReviews { .. } => "fetch_reviews",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::domain::Genre;

    #[test]
    fn queues_command_without_touching_status() {
        let (tx, rx) = bounded(1);
        let mut status = String::from("idle");
        dispatch_backend_command(
            &tx,
            BackendCommand::SelectGenre {
                genre: Genre::Fiction,
            },
            &mut status,
        );
        assert_eq!(status, "idle");
        assert!(matches!(
            rx.try_recv(),
            Ok(BackendCommand::SelectGenre {
                genre: Genre::Fiction
            })
        ));
    }

    #[test]
    fn reports_full_and_disconnected_queues() {
        let (tx, rx) = bounded(1);
        let mut status = String::new();
        dispatch_backend_command(
            &tx,
            BackendCommand::FetchReviews {
                title: "Book A".into(),
            },
            &mut status,
        );
        dispatch_backend_command(
            &tx,
            BackendCommand::FetchReviews {
                title: "Book B".into(),
            },
            &mut status,
        );
        assert!(status.contains("full"));

        drop(rx);
        dispatch_backend_command(
            &tx,
            BackendCommand::SelectGenre {
                genre: Genre::Science,
            },
            &mut status,
        );
        assert!(status.contains("disconnected"));
    }
}

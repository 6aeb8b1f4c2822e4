use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use pharmavigil_client::{ApiClient, Language};

use crate::action::Command;
use crate::tui_event::{BackendEvent, HistoryOrigin};

/// Fetch the history once at startup.
///
/// Failures are soft: logged and reported with `Startup` origin, which the
/// controller ignores, so the dashboard starts empty.
pub fn spawn_startup_fetch(
    client: Arc<ApiClient>,
    tx: mpsc::UnboundedSender<BackendEvent>,
    cancel: CancellationToken,
) {
    tokio::spawn(async move {
        let entries = tokio::select! {
            _ = cancel.cancelled() => return,
            res = client.fetch_reports() => res,
        };
        let event = match entries {
            Ok(entries) => BackendEvent::HistoryLoaded {
                origin: HistoryOrigin::Startup,
                entries,
            },
            Err(err) => {
                log::warn!("initial history load failed: {err}");
                BackendEvent::HistoryFailed {
                    origin: HistoryOrigin::Startup,
                    error: err.to_string(),
                }
            }
        };
        let _ = tx.send(event);
    });
}

/// Execute a controller command as a detached task reporting over `tx`.
pub fn dispatch(
    command: Command,
    client: &Arc<ApiClient>,
    tx: &mpsc::UnboundedSender<BackendEvent>,
    cancel: &CancellationToken,
) {
    let client = client.clone();
    let tx = tx.clone();
    let cancel = cancel.clone();
    match command {
        Command::ProcessReport { report } => {
            tokio::spawn(async move {
                run_process(client, report, tx, cancel).await;
            });
        }
        Command::Translate { outcome, language } => {
            tokio::spawn(async move {
                run_translate(client, outcome, language, tx, cancel).await;
            });
        }
    }
}

/// Submit the report, then refresh the history.
///
/// The refresh is issued only after the process response arrives; both
/// results are delivered as separate events so the controller can release
/// the processing guard once the whole cycle settles.
async fn run_process(
    client: Arc<ApiClient>,
    report: String,
    tx: mpsc::UnboundedSender<BackendEvent>,
    cancel: CancellationToken,
) {
    let result = tokio::select! {
        _ = cancel.cancelled() => return,
        res = client.process_report(&report) => res,
    };

    match result {
        Ok(result) => {
            let _ = tx.send(BackendEvent::ProcessCompleted { result });
        }
        Err(err) => {
            let _ = tx.send(BackendEvent::ProcessFailed {
                error: err.to_string(),
            });
            return;
        }
    }

    let refreshed = tokio::select! {
        _ = cancel.cancelled() => return,
        res = client.fetch_reports() => res,
    };

    let event = match refreshed {
        Ok(entries) => BackendEvent::HistoryLoaded {
            origin: HistoryOrigin::AfterProcess,
            entries,
        },
        Err(err) => BackendEvent::HistoryFailed {
            origin: HistoryOrigin::AfterProcess,
            error: err.to_string(),
        },
    };
    let _ = tx.send(event);
}

async fn run_translate(
    client: Arc<ApiClient>,
    outcome: String,
    language: Language,
    tx: mpsc::UnboundedSender<BackendEvent>,
    cancel: CancellationToken,
) {
    let result = tokio::select! {
        _ = cancel.cancelled() => return,
        res = client.translate(&outcome, language) => res,
    };

    let event = match result {
        Ok(translation) => BackendEvent::TranslateCompleted { translation },
        Err(err) => BackendEvent::TranslateFailed {
            error: err.to_string(),
        },
    };
    let _ = tx.send(event);
}

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::{TaskContext, assets};
use crate::pipeline::TaskError;
use crate::ui;

/// Quiet period after a change before acting on it. Editors often write a
/// file in several steps.
pub const DEBOUNCE: Duration = Duration::from_millis(100);

/// A notify watcher whose events are forwarded to a tokio channel.
///
/// Dropping the watcher stops the events.
pub fn channel_watcher() -> Result<(RecommendedWatcher, mpsc::Receiver<notify::Event>), notify::Error>
{
    let (tx, rx) = mpsc::channel(64);
    let watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                let _ = tx.blocking_send(event);
            }
            Err(e) => warn!(event = "build.watch.notify_error", error = %e),
        },
        notify::Config::default(),
    )?;
    Ok((watcher, rx))
}

/// Only file additions and content changes trigger work.
pub fn is_add_or_change(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
}

/// Whether `event` is an add or change of exactly `target`.
pub fn touches(event: &notify::Event, target: &Path) -> bool {
    is_add_or_change(&event.kind) && event.paths.iter().any(|p| same_file(p, target))
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Start watching `source` and copy it into `dest_dir` on every change.
///
/// Returns once the watcher is running; the watch loop is parked on the
/// context and lives until the runner exits.
pub fn start(ctx: &TaskContext, source: PathBuf, dest_dir: PathBuf) -> Result<(), TaskError> {
    let watch_dir = source
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let (mut watcher, mut rx) = channel_watcher().map_err(|e| TaskError::WatchFailed {
        path: source.clone(),
        message: e.to_string(),
    })?;
    watcher
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .map_err(|e| TaskError::WatchFailed {
            path: watch_dir.clone(),
            message: e.to_string(),
        })?;

    info!(event = "build.watch.started", path = %source.display());
    ui::info(&format!("watching {}", source.display()));

    let handle = tokio::spawn(async move {
        // Moved in so the watcher lives as long as the loop.
        let _watcher = watcher;
        while let Some(event) = rx.recv().await {
            if !touches(&event, &source) {
                continue;
            }
            tokio::time::sleep(DEBOUNCE).await;
            while rx.try_recv().is_ok() {}

            match assets::copy_into(&source, &dest_dir).await {
                Ok(dest) => {
                    info!(event = "build.watch.recopied", path = %dest.display());
                    ui::info(&format!("copied {}", dest.display()));
                }
                Err(e) => {
                    warn!(event = "build.watch.copy_failed", error = %e);
                    ui::warn(&e.to_string());
                }
            }
        }
    });
    ctx.keep_alive(handle);

    Ok(())
}

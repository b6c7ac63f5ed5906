//! Loopback live-reload dev server (the `sync` task).
//!
//! Serves `<out>/client/` over HTTP, watches it for added or changed
//! markup, stylesheets and scripts, and tells connected browsers to reload
//! over a WebSocket.

pub mod reload;

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use notify::{RecursiveMode, Watcher};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use crate::pipeline::TaskError;
use crate::tasks::TaskContext;
use crate::tasks::watch::{DEBOUNCE, channel_watcher, is_add_or_change};
use crate::ui;

pub use reload::{ReloadFilter, router};

/// How many ports past the preferred one are tried.
const PORT_ATTEMPTS: u16 = 100;

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub root: PathBuf,
    pub ip: IpAddr,
    pub port: u16,
}

/// Schedule the dev server to start after the configured delay.
///
/// Returns immediately; the server runs in the background until the runner
/// exits.
pub fn start(ctx: &TaskContext) -> Result<(), TaskError> {
    let serve = &ctx.config().serve;
    let ip = serve.ip().map_err(|e| TaskError::ServeConfigInvalid {
        message: e.to_string(),
    })?;
    if !ip.is_loopback() {
        return Err(TaskError::ServeConfigInvalid {
            message: format!("host '{}' is not a loopback address", serve.host),
        });
    }

    let settings = ServerSettings {
        root: ctx.client_out_dir(),
        ip,
        port: serve.port,
    };
    let delay = serve.start_delay();

    info!(
        event = "build.serve.scheduled",
        delay_ms = delay.as_millis() as u64,
        root = %settings.root.display()
    );

    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Err(e) = run(settings).await {
            error!(event = "build.serve.failed", error = %e);
            ui::task_failed("sync", &e.to_string());
        }
    });
    ctx.keep_alive(handle);

    Ok(())
}

/// Bind, start watching and serve until the process ends.
pub async fn run(settings: ServerSettings) -> Result<(), TaskError> {
    let listener = bind_available(settings.ip, settings.port).await?;
    let addr = listener
        .local_addr()
        .map_err(|e| TaskError::ServeFailed {
            message: e.to_string(),
        })?;

    tokio::fs::create_dir_all(&settings.root)
        .await
        .map_err(|source| TaskError::CreateDirFailed {
            path: settings.root.clone(),
            source,
        })?;

    let (reload_tx, _) = broadcast::channel(16);
    // Held for the lifetime of the server.
    let _watcher = watch_assets(&settings.root, reload_tx.clone())?;

    info!(event = "build.serve.started", addr = %addr, root = %settings.root.display());
    ui::info(&format!(
        "serving {} at http://{}",
        settings.root.display(),
        addr
    ));

    axum::serve(listener, router(settings.root, reload_tx))
        .await
        .map_err(|e| TaskError::ServeFailed {
            message: e.to_string(),
        })
}

/// Bind `ip:port`, moving to the next port while the current one is taken.
pub async fn bind_available(ip: IpAddr, port: u16) -> Result<TcpListener, TaskError> {
    let mut last_error = None;
    for offset in 0..PORT_ATTEMPTS {
        let Some(candidate) = port.checked_add(offset) else {
            break;
        };
        let addr = SocketAddr::new(ip, candidate);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                if candidate != port {
                    warn!(
                        event = "build.serve.port_busy",
                        preferred = port,
                        port = candidate
                    );
                }
                return Ok(listener);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => continue,
            Err(source) => {
                last_error = Some(TaskError::BindFailed { addr, source });
                break;
            }
        }
    }
    Err(last_error.unwrap_or(TaskError::NoFreePort { port }))
}

fn watch_assets(
    root: &Path,
    reload: broadcast::Sender<()>,
) -> Result<notify::RecommendedWatcher, TaskError> {
    let filter = ReloadFilter::new(root)?;
    let (mut watcher, mut rx) = channel_watcher().map_err(|e| TaskError::WatchFailed {
        path: root.to_path_buf(),
        message: e.to_string(),
    })?;
    watcher
        .watch(root, RecursiveMode::Recursive)
        .map_err(|e| TaskError::WatchFailed {
            path: root.to_path_buf(),
            message: e.to_string(),
        })?;

    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if !is_add_or_change(&event.kind) || !event.paths.iter().any(|p| filter.matches(p)) {
                continue;
            }
            tokio::time::sleep(DEBOUNCE).await;
            while rx.try_recv().is_ok() {}

            let clients = reload.send(()).unwrap_or(0);
            info!(event = "build.serve.reload_sent", clients = clients);
        }
    });

    Ok(watcher)
}

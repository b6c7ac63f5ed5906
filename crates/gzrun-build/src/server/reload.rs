use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use glob::{MatchOptions, Pattern};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tower_http::services::ServeDir;
use tracing::{debug, warn};

use crate::pipeline::TaskError;

pub const RELOAD_PATH: &str = "/__gzrun/livereload";
pub const RELOAD_MESSAGE: &str = "reload";
pub const INDEX_FILE: &str = "index.html";

/// Served files whose addition or change reloads the browser.
pub const RELOAD_PATTERNS: &[&str] = &["**/*.html", "**/*.css", "**/*.js"];

const RELOAD_CLIENT: &str = concat!(
    "<script>(function(){",
    "var ws=new WebSocket((location.protocol==='https:'?'wss://':'ws://')+location.host+'/__gzrun/livereload');",
    "ws.onmessage=function(){location.reload();};",
    "})();</script>"
);

#[derive(Clone)]
struct ServerState {
    root: Arc<PathBuf>,
    reload: broadcast::Sender<()>,
}

/// Routes of the dev server.
///
/// The index page gets the reload client injected; everything else is served
/// as-is from `root` without directory listings.
pub fn router(root: PathBuf, reload: broadcast::Sender<()>) -> Router {
    let state = ServerState {
        root: Arc::new(root.clone()),
        reload,
    };

    Router::new()
        .route("/", get(index))
        .route("/index.html", get(index))
        .route(RELOAD_PATH, get(livereload))
        .fallback_service(ServeDir::new(root))
        .with_state(state)
}

/// Insert the reload client before the closing body tag, or append it.
pub fn inject_reload_client(html: &str) -> String {
    let lower = html.to_ascii_lowercase();
    match lower.rfind("</body>") {
        Some(at) => {
            let mut out = String::with_capacity(html.len() + RELOAD_CLIENT.len());
            out.push_str(&html[..at]);
            out.push_str(RELOAD_CLIENT);
            out.push_str(&html[at..]);
            out
        }
        None => format!("{html}{RELOAD_CLIENT}"),
    }
}

async fn index(State(state): State<ServerState>) -> Response {
    let path = state.root.join(INDEX_FILE);
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(inject_reload_client(&html)).into_response(),
        Err(e) => {
            debug!(event = "build.serve.index_missing", path = %path.display(), error = %e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

async fn livereload(ws: WebSocketUpgrade, State(state): State<ServerState>) -> Response {
    let rx = state.reload.subscribe();
    ws.on_upgrade(move |socket| push_reloads(socket, rx))
}

async fn push_reloads(mut socket: WebSocket, mut rx: broadcast::Receiver<()>) {
    debug!(event = "build.serve.client_connected");
    loop {
        tokio::select! {
            signal = rx.recv() => match signal {
                Ok(()) | Err(RecvError::Lagged(_)) => {
                    if socket.send(Message::Text(RELOAD_MESSAGE.to_string().into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }
    debug!(event = "build.serve.client_disconnected");
}

/// Compiled [`RELOAD_PATTERNS`], matched against paths relative to the served root.
#[derive(Debug, Clone)]
pub struct ReloadFilter {
    roots: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl ReloadFilter {
    pub fn new(root: &Path) -> Result<Self, TaskError> {
        let patterns = RELOAD_PATTERNS
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| TaskError::InvalidPattern {
                    pattern: p.to_string(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Events report canonical paths on some platforms.
        let mut roots = vec![root.to_path_buf()];
        match root.canonicalize() {
            Ok(canonical) if canonical != root => roots.push(canonical),
            Ok(_) => {}
            Err(e) => {
                warn!(event = "build.serve.canonicalize_failed", path = %root.display(), error = %e)
            }
        }

        Ok(Self { roots, patterns })
    }

    pub fn matches(&self, path: &Path) -> bool {
        let Some(relative) = self
            .roots
            .iter()
            .find_map(|root| path.strip_prefix(root).ok())
        else {
            return false;
        };
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::new()
        };
        self.patterns
            .iter()
            .any(|p| p.matches_path_with(relative, options))
    }
}

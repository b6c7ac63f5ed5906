//! The concrete build tasks and the graph that wires them together.
//!
//! | Task | Depends on |
//! |---|---|
//! | `clean` | |
//! | `scaffolding`, `client@html`, `client@css`, `client@ts`, `backend@ts` | `clean` |
//! | `client@html:watch` | `client@html` |
//! | `client@css:watch` | `client@css` |
//! | `client@ts:watch`, `backend@ts:watch` | `clean` |
//! | `sync` | |
//! | `default`, `watch`, `serve` | groups |

pub mod assets;
pub mod clean;
pub mod compiler;
pub mod scaffolding;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

use crate::config::BuildConfig;
use crate::pipeline::{PipelineError, TaskDef, TaskGraph};
use crate::server;

pub const DEFAULT_TARGET: &str = "default";
pub const WATCH_TARGET: &str = "watch";
pub const SERVE_TARGET: &str = "serve";

const CLIENT_LABEL: &str = "CLIENT";
const BACKEND_LABEL: &str = "BACKEND";

/// Shared state of one runner invocation.
///
/// Watchers and the dev server outlive the task that started them; their
/// handles are parked here so the runner can keep the process alive.
#[derive(Debug)]
pub struct TaskContext {
    root: PathBuf,
    config: BuildConfig,
    background: Mutex<Vec<JoinHandle<()>>>,
}

impl TaskContext {
    pub fn new(root: PathBuf, config: BuildConfig) -> Self {
        Self {
            root,
            config,
            background: Mutex::new(Vec::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn out_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.out_dir)
    }

    /// `<out>/client/`: the copied assets, compiled client and served tree.
    pub fn client_out_dir(&self) -> PathBuf {
        self.out_dir().join("client")
    }

    pub fn client_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.client_dir)
    }

    pub fn backend_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.backend_dir)
    }

    pub fn markup_source(&self) -> PathBuf {
        self.client_dir().join(&self.config.paths.markup)
    }

    pub fn stylesheet_source(&self) -> PathBuf {
        self.client_dir().join(&self.config.paths.stylesheet)
    }

    pub fn manifest_source(&self) -> PathBuf {
        self.root.join(scaffolding::MANIFEST_FILE)
    }

    pub fn keep_alive(&self, handle: JoinHandle<()>) {
        self.background
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(handle);
    }

    pub fn take_background(&self) -> Vec<JoinHandle<()>> {
        std::mem::take(
            &mut *self
                .background
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

/// Build the full task graph for a project.
pub fn build_graph(ctx: Arc<TaskContext>) -> Result<TaskGraph, PipelineError> {
    let mut graph = TaskGraph::new();

    let c = ctx.clone();
    graph.add(TaskDef::action("clean", &[], move || {
        let c = c.clone();
        async move { clean::run(&c.out_dir()).await }
    }))?;

    let c = ctx.clone();
    graph.add(TaskDef::action("scaffolding", &["clean"], move || {
        let c = c.clone();
        async move {
            scaffolding::run(&c.manifest_source(), &c.out_dir(), &c.config().manifest).await
        }
    }))?;

    let c = ctx.clone();
    graph.add(TaskDef::action("client@html", &["clean"], move || {
        let c = c.clone();
        async move {
            assets::copy_into(&c.markup_source(), &c.client_out_dir())
                .await
                .map(|_| ())
        }
    }))?;

    let c = ctx.clone();
    graph.add(TaskDef::action("client@css", &["clean"], move || {
        let c = c.clone();
        async move {
            assets::copy_into(&c.stylesheet_source(), &c.client_out_dir())
                .await
                .map(|_| ())
        }
    }))?;

    let c = ctx.clone();
    graph.add(TaskDef::action("client@html:watch", &["client@html"], move || {
        let c = c.clone();
        async move { watch::start(&c, c.markup_source(), c.client_out_dir()) }
    }))?;

    let c = ctx.clone();
    graph.add(TaskDef::action("client@css:watch", &["client@css"], move || {
        let c = c.clone();
        async move { watch::start(&c, c.stylesheet_source(), c.client_out_dir()) }
    }))?;

    for (name, label, project, watching) in [
        ("client@ts", CLIENT_LABEL, ctx.client_dir(), false),
        ("backend@ts", BACKEND_LABEL, ctx.backend_dir(), false),
        ("client@ts:watch", CLIENT_LABEL, ctx.client_dir(), true),
        ("backend@ts:watch", BACKEND_LABEL, ctx.backend_dir(), true),
    ] {
        let c = ctx.clone();
        graph.add(TaskDef::action(name, &["clean"], move || {
            let c = c.clone();
            let project = project.clone();
            async move {
                let invocation = compiler::Invocation::new(label, &project, watching);
                compiler::run(c.root(), &c.config().compiler, &invocation).await
            }
        }))?;
    }

    let c = ctx.clone();
    graph.add(TaskDef::action("sync", &[], move || {
        let c = c.clone();
        async move { server::start(&c) }
    }))?;

    graph.add(TaskDef::group(
        DEFAULT_TARGET,
        &[
            "scaffolding",
            "backend@ts",
            "client@html",
            "client@css",
            "client@ts",
        ],
    ))?;
    graph.add(TaskDef::group(
        WATCH_TARGET,
        &[
            "scaffolding",
            "backend@ts:watch",
            "client@html:watch",
            "client@css:watch",
            "client@ts:watch",
        ],
    ))?;
    graph.add(TaskDef::group(SERVE_TARGET, &[WATCH_TARGET, "sync"]))?;

    graph.validate()?;
    Ok(graph)
}

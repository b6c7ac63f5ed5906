use std::path::PathBuf;
use std::sync::Arc;

use clap::ArgMatches;
use clap_complete::Shell;
use gzrun_core::events;
use tracing::{error, info};

use crate::app::build_cli;
use crate::config::BuildConfig;
use crate::pipeline::{self, TaskGraph};
use crate::tasks::{self, DEFAULT_TARGET, SERVE_TARGET, TaskContext, WATCH_TARGET};
use crate::ui;

const APP_NAME: &str = "gzrun-build";

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup(APP_NAME);

    let result = match matches.subcommand() {
        None | Some(("build", _)) => handle_run_command(matches, DEFAULT_TARGET),
        Some(("watch", _)) => handle_run_command(matches, WATCH_TARGET),
        Some(("serve", _)) => handle_run_command(matches, SERVE_TARGET),
        Some(("clean", _)) => handle_run_command(matches, "clean"),
        Some(("run", sub_matches)) => {
            let task = sub_matches
                .get_one::<String>("task")
                .ok_or("Task argument is required")?;
            handle_run_command(matches, task)
        }
        Some(("tasks", _)) => handle_tasks_command(matches),
        Some(("completions", sub_matches)) => handle_completions_command(sub_matches),
        _ => {
            error!(event = "build.command_unknown");
            Err("Unknown command".into())
        }
    };

    match &result {
        Ok(()) => events::log_app_shutdown(APP_NAME),
        Err(e) => events::log_app_error(e.as_ref()),
    }
    result
}

/// Project root and settings from the global `--root` and `--config` flags.
fn load_context(matches: &ArgMatches) -> Result<TaskContext, Box<dyn std::error::Error>> {
    let root = match matches.get_one::<String>("root") {
        Some(root) => PathBuf::from(root),
        None => std::env::current_dir()?,
    };
    let explicit = matches.get_one::<String>("config").map(PathBuf::from);
    let config = BuildConfig::load(&root, explicit.as_deref())?;

    info!(event = "build.context.loaded", root = %root.display());
    Ok(TaskContext::new(root, config))
}

fn handle_run_command(
    matches: &ArgMatches,
    target: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Arc::new(load_context(matches)?);
    let graph = tasks::build_graph(ctx.clone())?;

    // Reject unknown targets before starting a runtime
    graph.plan(target)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_target(&graph, &ctx, target))
}

async fn run_target(
    graph: &TaskGraph,
    ctx: &TaskContext,
    target: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    ui::banner(target);

    tokio::select! {
        result = pipeline::run(graph, target) => {
            let report = result?;
            ui::info(&format!(
                "{} finished {} tasks in {}",
                target,
                report.completed.len(),
                ui::format_elapsed(report.elapsed)
            ));

            let background = ctx.take_background();
            if background.is_empty() {
                return Ok(());
            }

            ui::info("watching for changes, press Ctrl-C to stop");
            let _ = tokio::signal::ctrl_c().await;
            for handle in background {
                handle.abort();
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!(event = "build.run.interrupted", target = target);
        }
    }

    println!();
    ui::info("shutting down...");
    Ok(())
}

fn handle_tasks_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Arc::new(load_context(matches)?);
    let graph = tasks::build_graph(ctx)?;

    let width = graph
        .tasks()
        .iter()
        .map(|t| t.name().len())
        .max()
        .unwrap_or(0);

    for task in graph.tasks() {
        let deps = if task.deps().is_empty() {
            "-".to_string()
        } else {
            task.deps().join(", ")
        };
        let kind = if task.is_group() { "group" } else { "task" };
        println!("{:<width$}  {:<5}  {}", task.name(), kind, deps, width = width);
    }

    Ok(())
}

fn handle_completions_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let shell = matches
        .get_one::<Shell>("shell")
        .ok_or("Shell argument is required")?;

    let mut cmd = build_cli();
    clap_complete::generate(*shell, &mut cmd, APP_NAME, &mut std::io::stdout());

    Ok(())
}

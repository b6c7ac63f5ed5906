use std::collections::{HashMap, VecDeque};
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};

use futures::FutureExt;
use tokio::task::JoinSet;
use tracing::{error, info};

use super::errors::{PipelineError, TaskError};
use super::graph::TaskGraph;
use crate::ui;

/// What a successful run did.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Tasks in completion order.
    pub completed: Vec<String>,
    pub elapsed: Duration,
}

struct Finished {
    name: String,
    result: Result<(), TaskError>,
    elapsed: Duration,
}

/// Run `target` and everything it depends on.
///
/// Each task in the closure runs once, starting as soon as all of its
/// dependencies have succeeded; tasks whose dependencies are satisfied run
/// concurrently. The first failure stops scheduling, aborts the tasks still
/// running and fails the run.
pub async fn run(graph: &TaskGraph, target: &str) -> Result<RunReport, PipelineError> {
    let started = Instant::now();
    let plan = graph.plan(target)?;

    info!(
        event = "build.pipeline.run_started",
        target = target,
        tasks = plan.len()
    );

    let mut waiting_on: HashMap<&str, usize> = HashMap::new();
    let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut ready: VecDeque<&str> = VecDeque::new();

    for name in &plan {
        let Some(task) = graph.get(name) else {
            return Err(PipelineError::UnknownTask { name: name.clone() });
        };
        waiting_on.insert(name.as_str(), task.deps().len());
        for dep in task.deps() {
            dependents.entry(dep.as_str()).or_default().push(name.as_str());
        }
        if task.deps().is_empty() {
            ready.push_back(name.as_str());
        }
    }

    let mut running: JoinSet<Finished> = JoinSet::new();
    let mut completed = Vec::with_capacity(plan.len());

    loop {
        while let Some(name) = ready.pop_front() {
            let Some(task) = graph.get(name) else {
                continue;
            };
            let task_name = name.to_string();

            match task.start() {
                Some(future) => {
                    info!(event = "build.task.started", task = name);
                    ui::task_started(name);
                    running.spawn(async move {
                        let begun = Instant::now();
                        let result = match AssertUnwindSafe(future).catch_unwind().await {
                            Ok(result) => result,
                            Err(panic) => Err(TaskError::Panicked {
                                message: panic_message(panic.as_ref()),
                            }),
                        };
                        Finished {
                            name: task_name,
                            result,
                            elapsed: begun.elapsed(),
                        }
                    });
                }
                None => {
                    running.spawn(async move {
                        Finished {
                            name: task_name,
                            result: Ok(()),
                            elapsed: Duration::ZERO,
                        }
                    });
                }
            }
        }

        let Some(joined) = running.join_next().await else {
            break;
        };

        let finished = joined.map_err(|e| PipelineError::Join {
            message: e.to_string(),
        })?;

        match finished.result {
            Ok(()) => {
                if !graph.get(&finished.name).is_some_and(|t| t.is_group()) {
                    info!(
                        event = "build.task.completed",
                        task = %finished.name,
                        elapsed_ms = finished.elapsed.as_millis() as u64
                    );
                    ui::task_finished(&finished.name, finished.elapsed);
                }

                if let Some(next) = dependents.get(finished.name.as_str()) {
                    for &dependent in next {
                        if let Some(count) = waiting_on.get_mut(dependent) {
                            *count -= 1;
                            if *count == 0 {
                                ready.push_back(dependent);
                            }
                        }
                    }
                }
                completed.push(finished.name);
            }
            Err(source) => {
                error!(
                    event = "build.task.failed",
                    task = %finished.name,
                    error = %source
                );
                ui::task_failed(&finished.name, &source.to_string());
                running.abort_all();
                return Err(PipelineError::TaskFailed {
                    task: finished.name,
                    source,
                });
            }
        }
    }

    let elapsed = started.elapsed();
    info!(
        event = "build.pipeline.run_completed",
        target = target,
        tasks = completed.len(),
        elapsed_ms = elapsed.as_millis() as u64
    );

    Ok(RunReport { completed, elapsed })
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::errors::{PipelineError, TaskError};

pub type TaskFuture = Pin<Box<dyn Future<Output = Result<(), TaskError>> + Send + 'static>>;

/// Produces a fresh future each time the task runs.
pub type TaskAction = Arc<dyn Fn() -> TaskFuture + Send + Sync + 'static>;

/// One named node of the graph.
///
/// A task without an action is a group: it succeeds as soon as its
/// dependencies have.
#[derive(Clone)]
pub struct TaskDef {
    name: String,
    deps: Vec<String>,
    action: Option<TaskAction>,
}

impl TaskDef {
    pub fn action<F, Fut>(name: &str, deps: &[&str], action: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        Self {
            name: name.to_string(),
            deps: deps.iter().map(|d| d.to_string()).collect(),
            action: Some(Arc::new(move || Box::pin(action()) as TaskFuture)),
        }
    }

    pub fn group(name: &str, deps: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            deps: deps.iter().map(|d| d.to_string()).collect(),
            action: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn deps(&self) -> &[String] {
        &self.deps
    }

    pub fn is_group(&self) -> bool {
        self.action.is_none()
    }

    pub(crate) fn start(&self) -> Option<TaskFuture> {
        self.action.as_ref().map(|action| action())
    }
}

impl std::fmt::Debug for TaskDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskDef")
            .field("name", &self.name)
            .field("deps", &self.deps)
            .field("group", &self.is_group())
            .finish()
    }
}

/// Named tasks and their dependency edges, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    tasks: Vec<TaskDef>,
    index: HashMap<String, usize>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, task: TaskDef) -> Result<(), PipelineError> {
        if self.index.contains_key(&task.name) {
            return Err(PipelineError::DuplicateTask { name: task.name });
        }
        self.index.insert(task.name.clone(), self.tasks.len());
        self.tasks.push(task);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TaskDef> {
        self.index.get(name).map(|&i| &self.tasks[i])
    }

    pub fn tasks(&self) -> &[TaskDef] {
        &self.tasks
    }

    /// Check every edge of the whole graph: unknown dependencies and cycles.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let mut marks = HashMap::new();
        let mut order = Vec::new();
        for task in &self.tasks {
            self.visit(&task.name, &mut marks, &mut Vec::new(), &mut order)?;
        }
        Ok(())
    }

    /// Transitive closure of `target`, dependencies before dependents.
    ///
    /// Fails on an unknown target, an unknown dependency or a cycle reachable
    /// from the target.
    pub fn plan(&self, target: &str) -> Result<Vec<String>, PipelineError> {
        if !self.index.contains_key(target) {
            return Err(PipelineError::UnknownTask {
                name: target.to_string(),
            });
        }
        let mut marks = HashMap::new();
        let mut order = Vec::new();
        self.visit(target, &mut marks, &mut Vec::new(), &mut order)?;
        Ok(order)
    }

    fn visit(
        &self,
        name: &str,
        marks: &mut HashMap<String, Mark>,
        stack: &mut Vec<String>,
        order: &mut Vec<String>,
    ) -> Result<(), PipelineError> {
        match marks.get(name) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = stack.iter().position(|n| n == name).unwrap_or(0);
                let mut path = stack[start..].to_vec();
                path.push(name.to_string());
                return Err(PipelineError::Cycle { path });
            }
            None => {}
        }

        let Some(task) = self.get(name) else {
            return Err(PipelineError::UnknownTask {
                name: name.to_string(),
            });
        };

        marks.insert(name.to_string(), Mark::Visiting);
        stack.push(name.to_string());

        for dep in &task.deps {
            if !self.index.contains_key(dep) {
                return Err(PipelineError::UnknownDependency {
                    task: name.to_string(),
                    dependency: dep.clone(),
                });
            }
            self.visit(dep, marks, stack, order)?;
        }

        stack.pop();
        marks.insert(name.to_string(), Mark::Done);
        order.push(name.to_string());
        Ok(())
    }
}

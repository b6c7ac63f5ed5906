//! Task graph and scheduler.
//!
//! Tasks are registered by name with their dependencies in a [`TaskGraph`];
//! [`scheduler::run`] executes the transitive closure of a target on a tokio
//! `JoinSet`, starting each task once all of its dependencies succeeded.

pub mod errors;
pub mod graph;
pub mod scheduler;

pub use errors::{PipelineError, TaskError};
pub use graph::{TaskDef, TaskGraph};
pub use scheduler::run;

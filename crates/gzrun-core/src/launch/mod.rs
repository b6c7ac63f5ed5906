//! Launching the selected program.
//!
//! [`LaunchPlan::build`] turns the current selection into a program path and
//! argument list; [`spawn`] runs it and streams its stdout back as chunks.

pub mod args;
pub mod errors;
pub mod process;

pub use args::LaunchPlan;
pub use errors::LaunchError;
pub use process::{LaunchHandle, spawn};

//! Console output handling for launched programs.
//!
//! - [`classify`] - literal-prefix rules mapping an output chunk to a style
//! - [`log`] - the in-memory list of rendered rows
//! - [`scroll`] - the autoscroll-unless-scrolled-up rule

pub mod classify;
pub mod log;
pub mod scroll;

pub use classify::{MessageKind, MessageStyle, PREFIX_RULES, classify};
pub use log::{ConsoleLog, ConsoleRow};
pub use scroll::{AUTOSCROLL_THRESHOLD_PX, ScrollMetrics};

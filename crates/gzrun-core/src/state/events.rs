use std::path::PathBuf;

use crate::pickers::PickerKind;

/// Everything that can happen to a launcher session.
///
/// Dialog results and output chunks arrive asynchronously; they are applied
/// on the thread owning the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LauncherEvent {
    /// A picker's dialog was opened.
    SelectionStarted { picker: PickerKind },
    /// A picker's dialog returned one or more paths, in dialog order.
    SelectionCompleted {
        picker: PickerKind,
        paths: Vec<PathBuf>,
    },
    /// A picker's dialog was dismissed without a selection.
    SelectionCancelled { picker: PickerKind },
    /// The launched program wrote a chunk to its stdout.
    OutputChunkReceived { text: String },
}

impl LauncherEvent {
    /// Map a dialog result to the matching event. No paths counts as a cancel.
    pub fn from_dialog(picker: PickerKind, paths: Option<Vec<PathBuf>>) -> Self {
        match paths {
            Some(paths) if !paths.is_empty() => LauncherEvent::SelectionCompleted { picker, paths },
            _ => LauncherEvent::SelectionCancelled { picker },
        }
    }

    pub fn picker(&self) -> Option<PickerKind> {
        match self {
            LauncherEvent::SelectionStarted { picker }
            | LauncherEvent::SelectionCompleted { picker, .. }
            | LauncherEvent::SelectionCancelled { picker } => Some(*picker),
            LauncherEvent::OutputChunkReceived { .. } => None,
        }
    }
}

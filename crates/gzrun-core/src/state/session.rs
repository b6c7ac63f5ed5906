use std::path::PathBuf;

use tracing::{debug, info, warn};

use super::events::LauncherEvent;
use crate::config::LaunchConfig;
use crate::console::{ConsoleLog, ConsoleRow};
use crate::pickers::PickerKind;

/// State of one launcher window.
///
/// All fields are private; mutation goes through [`LauncherState::apply`] so
/// the launch-enable rule is recomputed after every event.
#[derive(Debug, Clone)]
pub struct LauncherState {
    config: LaunchConfig,

    /// Indexed by [`PickerKind::index`]. Only required pickers are ever set.
    required_missing: [bool; 3],

    /// Indexed by [`PickerKind::index`]. Set while that picker's dialog is open.
    in_flight: [bool; 3],

    console: ConsoleLog,
}

impl Default for LauncherState {
    fn default() -> Self {
        Self::new()
    }
}

impl LauncherState {
    /// Fresh session: empty selection, both required pickers flagged.
    pub fn new() -> Self {
        let mut required_missing = [false; 3];
        for picker in PickerKind::ALL {
            required_missing[picker.index()] = picker.is_required();
        }

        Self {
            config: LaunchConfig::new(),
            required_missing,
            in_flight: [false; 3],
            console: ConsoleLog::new(),
        }
    }

    /// Try to open `picker`'s dialog.
    ///
    /// Returns `false` when that picker already has a dialog open; the caller
    /// must not open a second one.
    pub fn begin_selection(&mut self, picker: PickerKind) -> bool {
        self.apply(LauncherEvent::SelectionStarted { picker })
    }

    /// Apply one event. Returns `false` if the event was ignored.
    pub fn apply(&mut self, event: LauncherEvent) -> bool {
        match event {
            LauncherEvent::SelectionStarted { picker } => {
                if self.in_flight[picker.index()] {
                    debug!(
                        event = "core.state.selection_ignored",
                        picker = %picker,
                        "Dialog already open"
                    );
                    return false;
                }
                self.in_flight[picker.index()] = true;
                debug!(event = "core.state.selection_started", picker = %picker);
                true
            }
            LauncherEvent::SelectionCompleted { picker, paths } => {
                self.finish_selection(picker);
                if paths.is_empty() {
                    self.cancel(picker);
                } else {
                    self.complete(picker, paths);
                }
                true
            }
            LauncherEvent::SelectionCancelled { picker } => {
                self.finish_selection(picker);
                self.cancel(picker);
                true
            }
            LauncherEvent::OutputChunkReceived { text } => {
                self.console.push_chunk(text);
                true
            }
        }
    }

    fn finish_selection(&mut self, picker: PickerKind) {
        if !self.in_flight[picker.index()] {
            warn!(
                event = "core.state.selection_not_in_flight",
                picker = %picker,
                "Dialog result arrived without a matching start"
            );
        }
        self.in_flight[picker.index()] = false;
    }

    fn complete(&mut self, picker: PickerKind, paths: Vec<PathBuf>) {
        let count = paths.len();
        match picker {
            PickerKind::Executable => self.config.executable_path = paths.into_iter().next(),
            PickerKind::BaseData => self.config.base_path = paths.into_iter().next(),
            PickerKind::Overlays => self.config.overlay_paths.extend(paths),
        }
        self.required_missing[picker.index()] = false;

        info!(
            event = "core.state.selection_completed",
            picker = %picker,
            count = count,
            launchable = self.can_launch()
        );
    }

    fn cancel(&mut self, picker: PickerKind) {
        match picker {
            PickerKind::Executable => self.config.executable_path = None,
            PickerKind::BaseData => self.config.base_path = None,
            PickerKind::Overlays => self.config.overlay_paths.clear(),
        }
        self.required_missing[picker.index()] = picker.is_required();

        info!(
            event = "core.state.selection_cancelled",
            picker = %picker,
            launchable = self.can_launch()
        );
    }

    /// Launch is enabled exactly when both required paths are set.
    pub fn can_launch(&self) -> bool {
        self.config.is_launchable()
    }

    pub fn is_required_missing(&self, picker: PickerKind) -> bool {
        self.required_missing[picker.index()]
    }

    pub fn is_in_flight(&self, picker: PickerKind) -> bool {
        self.in_flight[picker.index()]
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    pub fn console(&self) -> &ConsoleLog {
        &self.console
    }

    pub fn last_row(&self) -> Option<&ConsoleRow> {
        self.console.rows().last()
    }

    /// Label shown next to a single-path picker. `None` while unset.
    pub fn selected_label(&self, picker: PickerKind) -> Option<String> {
        let path = match picker {
            PickerKind::Executable => self.config.executable_path(),
            PickerKind::BaseData => self.config.base_path(),
            PickerKind::Overlays => return None,
        };
        path.map(|p| p.display().to_string())
    }

    /// One display row per overlay, duplicates included.
    pub fn overlay_rows(&self) -> Vec<String> {
        self.config
            .overlay_paths()
            .iter()
            .map(|p| p.display().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::MessageKind;

    fn pick(state: &mut LauncherState, picker: PickerKind, paths: &[&str]) {
        assert!(state.begin_selection(picker));
        state.apply(LauncherEvent::SelectionCompleted {
            picker,
            paths: paths.iter().map(PathBuf::from).collect(),
        });
    }

    fn cancel(state: &mut LauncherState, picker: PickerKind) {
        assert!(state.begin_selection(picker));
        state.apply(LauncherEvent::SelectionCancelled { picker });
    }

    #[test]
    fn test_new_session_flags_required_pickers() {
        let state = LauncherState::new();
        assert!(state.is_required_missing(PickerKind::Executable));
        assert!(state.is_required_missing(PickerKind::BaseData));
        assert!(!state.is_required_missing(PickerKind::Overlays));
        assert!(!state.can_launch());
    }

    #[test]
    fn test_launch_enabled_only_with_both_required() {
        let mut state = LauncherState::new();

        pick(&mut state, PickerKind::Executable, &["/bin/game"]);
        assert!(!state.can_launch());

        pick(&mut state, PickerKind::Overlays, &["a.wad"]);
        assert!(!state.can_launch());

        pick(&mut state, PickerKind::BaseData, &["IWAD.WAD"]);
        assert!(state.can_launch());

        cancel(&mut state, PickerKind::Executable);
        assert!(!state.can_launch());

        pick(&mut state, PickerKind::Executable, &["/bin/game"]);
        assert!(state.can_launch());

        cancel(&mut state, PickerKind::Overlays);
        assert!(state.can_launch());
    }

    #[test]
    fn test_launch_rule_holds_for_every_event_sequence() {
        // Every sequence of 4 pick/cancel events over the two required pickers.
        let moves = [
            (PickerKind::Executable, true),
            (PickerKind::Executable, false),
            (PickerKind::BaseData, true),
            (PickerKind::BaseData, false),
        ];
        for a in moves {
            for b in moves {
                for c in moves {
                    for d in moves {
                        let mut state = LauncherState::new();
                        for (picker, picked) in [a, b, c, d] {
                            if picked {
                                pick(&mut state, picker, &["x"]);
                            } else {
                                cancel(&mut state, picker);
                            }
                            let config = state.config();
                            assert_eq!(
                                state.can_launch(),
                                config.executable_path.is_some() && config.base_path.is_some()
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_cancel_resets_field_and_flag() {
        let mut state = LauncherState::new();
        pick(&mut state, PickerKind::BaseData, &["doom2.wad"]);
        assert!(!state.is_required_missing(PickerKind::BaseData));
        assert_eq!(
            state.selected_label(PickerKind::BaseData).as_deref(),
            Some("doom2.wad")
        );

        cancel(&mut state, PickerKind::BaseData);
        assert!(state.config().base_path.is_none());
        assert!(state.is_required_missing(PickerKind::BaseData));
        assert!(state.selected_label(PickerKind::BaseData).is_none());
    }

    #[test]
    fn test_cancel_clears_overlays_without_flag() {
        let mut state = LauncherState::new();
        pick(&mut state, PickerKind::Overlays, &["a.wad", "b.pk3"]);
        cancel(&mut state, PickerKind::Overlays);

        assert!(state.overlay_rows().is_empty());
        assert!(!state.is_required_missing(PickerKind::Overlays));
    }

    #[test]
    fn test_empty_completion_counts_as_cancel() {
        let mut state = LauncherState::new();
        pick(&mut state, PickerKind::Executable, &["/bin/game"]);
        pick(&mut state, PickerKind::Executable, &[]);

        assert!(state.config().executable_path.is_none());
        assert!(state.is_required_missing(PickerKind::Executable));
    }

    #[test]
    fn test_same_overlay_twice_gives_two_rows() {
        let mut state = LauncherState::new();
        pick(&mut state, PickerKind::Overlays, &["a.wad"]);
        pick(&mut state, PickerKind::Overlays, &["a.wad"]);

        assert_eq!(state.overlay_rows(), vec!["a.wad", "a.wad"]);
        assert_eq!(state.config().overlay_paths.len(), 2);
    }

    #[test]
    fn test_overlays_append_in_dialog_order() {
        let mut state = LauncherState::new();
        pick(&mut state, PickerKind::Overlays, &["b.pk3", "a.wad"]);
        pick(&mut state, PickerKind::Overlays, &["c.wad"]);

        assert_eq!(state.overlay_rows(), vec!["b.pk3", "a.wad", "c.wad"]);
    }

    #[test]
    fn test_second_click_while_open_is_ignored() {
        let mut state = LauncherState::new();
        assert!(state.begin_selection(PickerKind::Overlays));
        assert!(state.is_in_flight(PickerKind::Overlays));
        assert!(!state.begin_selection(PickerKind::Overlays));

        // Other pickers are independent
        assert!(state.begin_selection(PickerKind::BaseData));

        state.apply(LauncherEvent::SelectionCompleted {
            picker: PickerKind::Overlays,
            paths: vec![PathBuf::from("a.wad")],
        });
        assert!(!state.is_in_flight(PickerKind::Overlays));
        assert!(state.begin_selection(PickerKind::Overlays));
        assert_eq!(state.overlay_rows().len(), 1);
    }

    #[test]
    fn test_output_chunks_land_in_console() {
        let mut state = LauncherState::new();
        state.apply(LauncherEvent::OutputChunkReceived {
            text: "Picked up a medikit.".to_string(),
        });
        state.apply(LauncherEvent::OutputChunkReceived {
            text: "MAP01 - Entryway".to_string(),
        });

        assert_eq!(state.console().len(), 2);
        assert_eq!(state.console().rows()[0].kind, MessageKind::Pickup);
        assert_eq!(state.last_row().map(|r| r.kind), Some(MessageKind::Plain));
    }
}

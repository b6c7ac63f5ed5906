use std::path::{Path, PathBuf};

use gzrun_core::{
    ConsoleRow, LaunchConfig, LauncherEvent, LauncherSettings, LauncherState, PickerKind,
};

/// Main application state.
///
/// All fields are private - access state through the facade methods below.
pub struct AppState {
    /// Selection, picker flags and console rows.
    launcher: LauncherState,

    /// Loaded once at start-up and never changed.
    settings: LauncherSettings,

    /// Errors shown in the dismissible banner (settings, save, launch).
    banner_errors: Vec<String>,

    /// Where the selection was last saved.
    last_saved: Option<PathBuf>,
}

impl AppState {
    pub fn new(settings: LauncherSettings, startup_errors: Vec<String>) -> Self {
        Self {
            launcher: LauncherState::new(),
            settings,
            banner_errors: startup_errors,
            last_saved: None,
        }
    }

    /// Mark `picker`'s dialog as open. `false` if it already was.
    pub fn begin_selection(&mut self, picker: PickerKind) -> bool {
        self.launcher.begin_selection(picker)
    }

    /// Record what a picker's dialog returned.
    pub fn finish_selection(&mut self, picker: PickerKind, paths: Option<Vec<PathBuf>>) {
        self.launcher.apply(LauncherEvent::from_dialog(picker, paths));
    }

    pub fn push_output(&mut self, text: String) {
        self.launcher.apply(LauncherEvent::OutputChunkReceived { text });
    }

    pub fn can_launch(&self) -> bool {
        self.launcher.can_launch()
    }

    pub fn is_required_missing(&self, picker: PickerKind) -> bool {
        self.launcher.is_required_missing(picker)
    }

    pub fn is_picking(&self, picker: PickerKind) -> bool {
        self.launcher.is_in_flight(picker)
    }

    pub fn selected_label(&self, picker: PickerKind) -> Option<String> {
        self.launcher.selected_label(picker)
    }

    pub fn overlay_rows(&self) -> Vec<String> {
        self.launcher.overlay_rows()
    }

    pub fn console_rows(&self) -> &[ConsoleRow] {
        self.launcher.console().rows()
    }

    pub fn config(&self) -> &LaunchConfig {
        self.launcher.config()
    }

    pub fn settings(&self) -> &LauncherSettings {
        &self.settings
    }

    pub fn autoscroll_threshold(&self) -> f32 {
        self.settings.autoscroll_threshold()
    }

    pub fn push_error(&mut self, message: String) {
        self.banner_errors.push(message);
    }

    pub fn has_banner_errors(&self) -> bool {
        !self.banner_errors.is_empty()
    }

    pub fn banner_errors(&self) -> &[String] {
        &self.banner_errors
    }

    pub fn dismiss_errors(&mut self) {
        self.banner_errors.clear();
    }

    pub fn set_last_saved(&mut self, path: PathBuf) {
        self.last_saved = Some(path);
    }

    pub fn last_saved(&self) -> Option<&Path> {
        self.last_saved.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gzrun_core::MessageKind;

    fn state() -> AppState {
        AppState::new(LauncherSettings::default(), Vec::new())
    }

    fn pick(state: &mut AppState, picker: PickerKind, paths: &[&str]) {
        assert!(state.begin_selection(picker));
        state.finish_selection(picker, Some(paths.iter().map(PathBuf::from).collect()));
    }

    #[test]
    fn test_new_state_blocks_launch() {
        let state = state();
        assert!(!state.can_launch());
        assert!(state.is_required_missing(PickerKind::Executable));
        assert!(state.is_required_missing(PickerKind::BaseData));
        assert!(!state.is_required_missing(PickerKind::Overlays));
    }

    #[test]
    fn test_picking_both_required_files_enables_launch() {
        let mut state = state();
        pick(&mut state, PickerKind::Executable, &["/usr/games/gzdoom"]);
        assert!(!state.can_launch());
        pick(&mut state, PickerKind::BaseData, &["DOOM2.WAD"]);
        assert!(state.can_launch());
        assert_eq!(
            state.selected_label(PickerKind::BaseData).as_deref(),
            Some("DOOM2.WAD")
        );
    }

    #[test]
    fn test_dismissed_dialog_clears_field() {
        let mut state = state();
        pick(&mut state, PickerKind::Executable, &["/usr/games/gzdoom"]);
        pick(&mut state, PickerKind::BaseData, &["DOOM2.WAD"]);

        assert!(state.begin_selection(PickerKind::BaseData));
        state.finish_selection(PickerKind::BaseData, None);

        assert!(!state.can_launch());
        assert!(state.is_required_missing(PickerKind::BaseData));
        assert_eq!(state.selected_label(PickerKind::BaseData), None);
    }

    #[test]
    fn test_second_click_while_picking_is_ignored() {
        let mut state = state();
        assert!(state.begin_selection(PickerKind::Overlays));
        assert!(state.is_picking(PickerKind::Overlays));
        assert!(!state.begin_selection(PickerKind::Overlays));

        state.finish_selection(PickerKind::Overlays, Some(vec![PathBuf::from("a.wad")]));
        assert!(!state.is_picking(PickerKind::Overlays));
        assert!(state.begin_selection(PickerKind::Overlays));
    }

    #[test]
    fn test_same_overlay_twice_gives_two_rows() {
        let mut state = state();
        pick(&mut state, PickerKind::Overlays, &["brutal.pk3"]);
        pick(&mut state, PickerKind::Overlays, &["brutal.pk3"]);

        assert_eq!(state.overlay_rows(), vec!["brutal.pk3", "brutal.pk3"]);
        assert_eq!(state.config().overlay_paths().len(), 2);
    }

    #[test]
    fn test_output_rows_are_classified() {
        let mut state = state();
        state.push_output("map01 - Entryway".to_string());
        state.push_output("Picked up a clip.".to_string());

        let kinds: Vec<MessageKind> = state.console_rows().iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![MessageKind::Map, MessageKind::Pickup]);
    }

    #[test]
    fn test_banner_errors() {
        let mut state = AppState::new(
            LauncherSettings::default(),
            vec!["Settings not loaded".to_string()],
        );
        assert!(state.has_banner_errors());

        state.push_error("Failed to start '/bin/game'".to_string());
        assert_eq!(state.banner_errors().len(), 2);

        state.dismiss_errors();
        assert!(!state.has_banner_errors());
    }

    #[test]
    fn test_last_saved() {
        let mut state = state();
        assert_eq!(state.last_saved(), None);
        state.set_last_saved(PathBuf::from("gzrun-config.json"));
        assert_eq!(state.last_saved(), Some(Path::new("gzrun-config.json")));
    }
}

//! Native file dialogs for the three pickers.

use std::path::PathBuf;

use gzrun_core::{FileFilter, PickerKind, PickerSpec};
use rfd::AsyncFileDialog;

/// Filters handed to the platform dialog.
///
/// A picker whose only filter is the wildcard opens an unfiltered dialog, so
/// files without an extension stay visible.
pub fn dialog_filters(spec: &PickerSpec) -> &'static [FileFilter] {
    match spec.filters {
        [only] if only.extensions == ["*"] => &[],
        filters => filters,
    }
}

fn build_dialog(spec: &PickerSpec) -> AsyncFileDialog {
    dialog_filters(spec)
        .iter()
        .fold(AsyncFileDialog::new().set_title(spec.title), |dialog, filter| {
            dialog.add_filter(filter.name, filter.extensions)
        })
}

/// Open `picker`'s dialog and wait for the user.
///
/// `None` when the dialog was dismissed. Multi-select pickers return every
/// chosen path in dialog order.
pub async fn pick_paths(picker: PickerKind) -> Option<Vec<PathBuf>> {
    let spec = picker.spec();
    let dialog = build_dialog(&spec);

    let handles = if spec.multiple {
        dialog.pick_files().await
    } else {
        dialog.pick_file().await.map(|handle| vec![handle])
    };

    handles.map(|handles| {
        handles
            .into_iter()
            .map(|handle| handle.path().to_path_buf())
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gzrun_core::pickers::{ALL_FILES, OVERLAY_FILES, WAD_FILES};

    #[test]
    fn test_executable_picker_is_unfiltered() {
        assert!(dialog_filters(&PickerKind::Executable.spec()).is_empty());
    }

    #[test]
    fn test_data_pickers_keep_their_filters() {
        assert_eq!(
            dialog_filters(&PickerKind::BaseData.spec()),
            &[WAD_FILES, ALL_FILES]
        );
        assert_eq!(
            dialog_filters(&PickerKind::Overlays.spec()),
            &[OVERLAY_FILES, ALL_FILES]
        );
    }
}

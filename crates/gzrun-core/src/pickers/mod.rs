//! Native file picker definitions.
//!
//! Each selection control opens a file chooser with a fixed filter set. The
//! UI turns a [`PickerSpec`] into a platform dialog; everything about which
//! files are offered is decided here.

use std::fmt;

/// A named extension filter offered by a file chooser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    /// Extensions without the leading dot. `*` matches any file.
    pub extensions: &'static [&'static str],
}

pub const ALL_FILES: FileFilter = FileFilter {
    name: "All Files",
    extensions: &["*"],
};

pub const WAD_FILES: FileFilter = FileFilter {
    name: "WAD",
    extensions: &["wad"],
};

pub const OVERLAY_FILES: FileFilter = FileFilter {
    name: "WAD, pk3",
    extensions: &["wad", "pk3"],
};

/// The three selection controls of the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PickerKind {
    Executable,
    BaseData,
    Overlays,
}

/// How a picker's dialog is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerSpec {
    pub title: &'static str,
    pub filters: &'static [FileFilter],
    pub multiple: bool,
}

impl PickerKind {
    pub const ALL: [PickerKind; 3] = [
        PickerKind::Executable,
        PickerKind::BaseData,
        PickerKind::Overlays,
    ];

    pub fn spec(self) -> PickerSpec {
        match self {
            PickerKind::Executable => PickerSpec {
                title: "Select engine executable",
                filters: &[ALL_FILES],
                multiple: false,
            },
            PickerKind::BaseData => PickerSpec {
                title: "Select IWAD",
                filters: &[WAD_FILES, ALL_FILES],
                multiple: false,
            },
            PickerKind::Overlays => PickerSpec {
                title: "Add external files",
                filters: &[OVERLAY_FILES, ALL_FILES],
                multiple: true,
            },
        }
    }

    /// Required pickers block launching while empty and carry a
    /// "required missing" flag.
    pub fn is_required(self) -> bool {
        matches!(self, PickerKind::Executable | PickerKind::BaseData)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PickerKind::Executable => "executable",
            PickerKind::BaseData => "base_data",
            PickerKind::Overlays => "overlays",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            PickerKind::Executable => 0,
            PickerKind::BaseData => 1,
            PickerKind::Overlays => 2,
        }
    }
}

impl fmt::Display for PickerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

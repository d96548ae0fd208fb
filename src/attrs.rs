//! Hidden/system classification of source entries.
//!
//! The rules differ per platform:
//!
//! | Platform | Hidden | System |
//! |----------|--------|--------|
//! | Windows | `FILE_ATTRIBUTE_HIDDEN` | `FILE_ATTRIBUTE_SYSTEM` |
//! | macOS | `UF_HIDDEN` flag, or dotfile name | special file |
//! | Other Unix | dotfile name | special file |
//!
//! Special files are FIFOs, sockets and device nodes. They are not
//! directories or regular files, so there is nothing sensible to mirror.
//! The dotfile convention can be turned off with
//! [`ReplicateOptions::without_dotfile_hiding`](crate::ReplicateOptions::without_dotfile_hiding).

use std::fs::Metadata;
use std::path::Path;

/// Flags of one entry relevant to filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryAttributes {
    pub hidden: bool,
    pub system: bool,
}

impl EntryAttributes {
    /// Whether the entry takes part in the skeleton.
    #[inline]
    pub fn is_qualifying(self) -> bool {
        !self.hidden && !self.system
    }
}

/// Predicate over entry metadata deciding what is hidden or system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeFilter {
    /// Treat dotfiles as hidden where the platform has no hidden bit
    pub dotfiles_hidden: bool,
}

impl Default for AttributeFilter {
    fn default() -> Self {
        Self {
            dotfiles_hidden: true,
        }
    }
}

impl AttributeFilter {
    pub fn new(dotfiles_hidden: bool) -> Self {
        Self { dotfiles_hidden }
    }

    /// Classify an entry from its path and (unfollowed) metadata.
    pub fn classify(&self, path: &Path, meta: &Metadata) -> EntryAttributes {
        platform::classify(self, path, meta)
    }

    /// Shorthand for `classify(..).is_qualifying()`.
    pub fn accepts(&self, path: &Path, meta: &Metadata) -> bool {
        self.classify(path, meta).is_qualifying()
    }
}

#[cfg(windows)]
mod platform {
    use super::{AttributeFilter, EntryAttributes};
    use crate::win_attrs;
    use std::fs::Metadata;
    use std::path::Path;

    pub(super) fn classify(_filter: &AttributeFilter, _path: &Path, meta: &Metadata) -> EntryAttributes {
        let attrs = win_attrs::attributes_of(meta);
        EntryAttributes {
            hidden: win_attrs::is_hidden(attrs),
            system: win_attrs::is_system(attrs),
        }
    }
}

#[cfg(not(windows))]
mod platform {
    use super::{AttributeFilter, EntryAttributes};
    use crate::utils::path::is_dotfile;
    use std::fs::Metadata;
    use std::path::Path;

    #[cfg(target_os = "macos")]
    fn has_hidden_flag(meta: &Metadata) -> bool {
        use std::os::macos::fs::MetadataExt;
        // UF_HIDDEN from <sys/stat.h>
        const UF_HIDDEN: u32 = 0x0000_8000;
        meta.st_flags() & UF_HIDDEN != 0
    }

    #[cfg(not(target_os = "macos"))]
    fn has_hidden_flag(_meta: &Metadata) -> bool {
        false
    }

    pub(super) fn classify(filter: &AttributeFilter, path: &Path, meta: &Metadata) -> EntryAttributes {
        let ft = meta.file_type();
        let special = !ft.is_dir() && !ft.is_file() && !ft.is_symlink();
        let dotfile = filter.dotfiles_hidden && path.file_name().is_some_and(is_dotfile);
        EntryAttributes {
            hidden: dotfile || has_hidden_flag(meta),
            system: special,
        }
    }
}

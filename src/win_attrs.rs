//! Windows file attribute inspection.
//!
//! On Windows, files carry attribute bits beyond POSIX permissions:
//! - Hidden (FILE_ATTRIBUTE_HIDDEN)
//! - System (FILE_ATTRIBUTE_SYSTEM)
//! - Archive, Readonly, etc.
//!
//! Only the hidden and system bits matter here: an entry carrying either one
//! is left out of the skeleton together with everything beneath it.

use std::fs::Metadata;
use std::os::windows::fs::MetadataExt;

use windows::Win32::Storage::FileSystem::{FILE_ATTRIBUTE_HIDDEN, FILE_ATTRIBUTE_SYSTEM};

/// Raw `DWORD` attribute value of an entry.
///
/// `DirEntry::metadata` fills this from the directory listing itself, so
/// no extra system call is made per entry.
#[inline]
pub(crate) fn attributes_of(meta: &Metadata) -> u32 {
    meta.file_attributes()
}

#[inline]
pub(crate) fn is_hidden(attrs: u32) -> bool {
    attrs & FILE_ATTRIBUTE_HIDDEN.0 != 0
}

#[inline]
pub(crate) fn is_system(attrs: u32) -> bool {
    attrs & FILE_ATTRIBUTE_SYSTEM.0 != 0
}

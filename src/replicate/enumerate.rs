//! Source tree enumeration.
//!
//! Each pass walks the whole source tree on its own and materializes every
//! qualifying entry of one kind before anything is created, so the pass
//! knows its total up front.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::attrs::AttributeFilter;
use crate::error::{EntryOperation, Error, Result};
use crate::options::{OnEntryError, ReplicateOptions};
use crate::utils::path::relative_to;

use super::TreeRoots;
use super::utils::{absorb, get_dir_key};

/// What an enumeration collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntryKind {
    Directory,
    File,
}

/// A qualifying source entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Absolute path under the source root
    pub path: PathBuf,
    /// Path relative to the source root
    pub relative: PathBuf,
}

/// Result of one full walk.
#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    /// Qualifying entries in walk order
    pub entries: Vec<SourceEntry>,
    /// Entries of the walked kind skipped as hidden or system
    pub excluded: u64,
    /// Entries that could not be read and were skipped
    ///
    /// Under [`OnEntryError::Continue`] only the file walk counts and warns
    /// about these, so a run reports each failure once.
    pub unreadable: u64,
}

/// Walk the source root and collect every qualifying entry of `kind`.
///
/// Hidden and system directories are not descended into. The destination
/// root is skipped when it lies inside the source root.
///
/// # Errors
///
/// - The source root itself cannot be listed ([`Error::EntryAccess`])
/// - Under [`OnEntryError::Abort`](crate::OnEntryError::Abort): any entry
///   that cannot be read, a symlink loop, or a depth overrun
pub fn enumerate(
    roots: &TreeRoots,
    kind: EntryKind,
    options: &ReplicateOptions,
) -> Result<Enumeration> {
    let mut walker = Walker {
        roots,
        kind,
        options,
        filter: AttributeFilter::new(options.dotfiles_hidden),
        visited: HashSet::new(),
        out: Enumeration::default(),
    };
    if walker.first_visit(&roots.source)? {
        walker.walk(&roots.source, 0)?;
    }
    Ok(walker.out)
}

struct Walker<'a> {
    roots: &'a TreeRoots,
    kind: EntryKind,
    options: &'a ReplicateOptions,
    filter: AttributeFilter,
    // (dev, ino) of directories entered, only tracked when following links
    visited: HashSet<(u64, u64)>,
    out: Enumeration,
}

impl Walker<'_> {
    fn walk(&mut self, dir: &Path, depth: usize) -> Result<()> {
        if let Some(max_depth) = self.options.max_depth {
            if depth > max_depth {
                return self.skip(Error::MaxDepthExceeded {
                    path: dir.to_path_buf(),
                    max_depth,
                });
            }
        }

        let listing = match fs::read_dir(dir) {
            Ok(listing) => listing,
            // Nothing can be done without the root
            Err(e) if depth == 0 => return Err(Error::entry(dir, EntryOperation::ReadDir, e)),
            Err(e) => return self.skip(Error::entry(dir, EntryOperation::ReadDir, e)),
        };

        for entry in listing {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.skip(Error::entry(dir, EntryOperation::ReadDir, e))?;
                    continue;
                }
            };
            let path = entry.path();

            // Not followed: symlinks are classified by the link itself
            let meta = match entry.metadata() {
                Ok(meta) => meta,
                Err(e) => {
                    self.skip(Error::entry(&path, EntryOperation::ReadMetadata, e))?;
                    continue;
                }
            };

            if path == self.roots.destination {
                self.options
                    .verbose(&format!("skipping destination root {}", path.display()));
                continue;
            }

            let file_type = meta.file_type();

            if !self.filter.accepts(&path, &meta) {
                if file_type.is_dir() == (self.kind == EntryKind::Directory) {
                    self.out.excluded += 1;
                    self.options
                        .verbose(&format!("excluded {}", path.display()));
                }
                continue;
            }

            if file_type.is_symlink() {
                self.visit_symlink(&path, depth)?;
            } else if file_type.is_dir() {
                if self.first_visit(&path)? {
                    self.collect(EntryKind::Directory, &path);
                    self.walk(&path, depth + 1)?;
                }
            } else if file_type.is_file() {
                self.collect(EntryKind::File, &path);
            } else if self.kind == EntryKind::File {
                self.options
                    .verbose(&format!("skipping special file {}", path.display()));
            }
        }

        Ok(())
    }

    fn visit_symlink(&mut self, path: &Path, depth: usize) -> Result<()> {
        match fs::metadata(path) {
            Ok(target) if target.is_dir() => {
                if self.options.follow_symlinks {
                    if self.first_visit(path)? {
                        self.collect(EntryKind::Directory, path);
                        self.walk(path, depth + 1)?;
                    }
                    Ok(())
                } else {
                    if self.kind == EntryKind::Directory {
                        self.options.verbose(&format!(
                            "not following symlinked directory {}",
                            path.display()
                        ));
                    }
                    Ok(())
                }
            }
            Ok(target) if target.is_file() => {
                self.collect(EntryKind::File, path);
                Ok(())
            }
            Ok(_) => Ok(()),
            Err(e) => {
                // Both walks see it; warn once
                if self.kind == EntryKind::File {
                    self.options.warn(&format!(
                        "Skipping broken symlink {}: {}",
                        path.display(),
                        e
                    ));
                }
                Ok(())
            }
        }
    }

    /// Record a directory about to be entered. Only tracked when following
    /// links; a directory seen before is a loop and is not collected.
    fn first_visit(&mut self, dir: &Path) -> Result<bool> {
        if !self.options.follow_symlinks {
            return Ok(true);
        }
        let error = match get_dir_key(dir) {
            Ok(key) if self.visited.insert(key) => return Ok(true),
            Ok(_) => Error::SymlinkLoop(dir.to_path_buf()),
            Err(e) => Error::entry(dir, EntryOperation::ReadMetadata, e),
        };
        self.skip(error)?;
        Ok(false)
    }

    fn collect(&mut self, kind: EntryKind, path: &Path) {
        if kind != self.kind {
            return;
        }
        if let Some(relative) = relative_to(&self.roots.source, path) {
            self.out.entries.push(SourceEntry {
                path: path.to_path_buf(),
                relative: relative.to_path_buf(),
            });
        }
    }

    fn skip(&mut self, error: Error) -> Result<()> {
        // Both walks hit the same failures; the file walk reports them
        if self.kind == EntryKind::Directory && self.options.on_error == OnEntryError::Continue {
            return Ok(());
        }
        absorb(self.options, error)?;
        self.out.unreadable += 1;
        Ok(())
    }
}

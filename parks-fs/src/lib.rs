//! Capability-scoped file access for park data inputs and store artefacts.
//!
//! Every helper resolves an ambient directory for the path it is given and
//! then operates relative to that directory handle, so callers never touch
//! `std::fs` directly.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;
use std::path::Component;

/// What a path points at, as seen through a directory capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// Anything else (sockets, devices, dangling links).
    Other,
}

/// Open a file for reading.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Classify the entry at `path` without following it into a read.
///
/// Missing entries surface as [`io::ErrorKind::NotFound`].
pub fn inspect_path(path: &Utf8Path) -> io::Result<PathKind> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let Some(name) = path.file_name() else {
        return Ok(PathKind::Directory);
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    let metadata = dir.metadata(name)?;
    let kind = if metadata.is_file() {
        PathKind::File
    } else if metadata.is_dir() {
        PathKind::Directory
    } else {
        PathKind::Other
    };
    Ok(kind)
}

/// Create every missing directory above `path`.
///
/// Paths without a parent, or whose parent is the filesystem root, need no
/// work.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (anchor, relative) = split_anchor(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?.create_dir_all(&relative)
}

/// Split `path` into an anchor directory that can be opened with ambient
/// authority and the remainder relative to it.
///
/// Absolute paths anchor at their root (or drive prefix on Windows); relative
/// paths anchor at the current directory.
pub fn split_anchor(path: &Utf8Path) -> io::Result<(Utf8PathBuf, Utf8PathBuf)> {
    let std_path = path.as_std_path();
    let mut components = std_path.components();
    let anchor = match components.next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            // Drive prefixes are followed by the root separator.
            if matches!(components.next(), Some(Component::RootDir)) {
                Utf8PathBuf::from(format!("{prefix}{}", std::path::MAIN_SEPARATOR))
            } else {
                Utf8PathBuf::from(prefix)
            }
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string()),
        _ => return Ok((Utf8PathBuf::from("."), path.to_path_buf())),
    };

    let relative = path
        .strip_prefix(&anchor)
        .map_err(|_| io::Error::other("failed to strip anchor from absolute path"))?
        .to_path_buf();
    Ok((anchor, relative))
}

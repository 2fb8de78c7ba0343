//! Capability-based UTF-8 file helpers for littlebound, built on `cap-std`
//! and `camino`.
//!
//! Every helper resolves the path's parent with ambient authority once and
//! performs the operation relative to that directory handle.
#![forbid(unsafe_code)]

use std::io;
use std::path::MAIN_SEPARATOR_STR;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open the parent directory of `path` and return it with the file name.
///
/// # Errors
/// Fails when `path` has no file name or its parent cannot be opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Read a whole UTF-8 file.
///
/// # Errors
/// Propagates IO failures, including invalid UTF-8 content.
pub fn read_utf8_file(path: &Utf8Path) -> io::Result<String> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.read_to_string(name.as_str())
}

/// Write `contents` to `path`, creating missing parent directories and
/// replacing any existing file.
///
/// # Errors
/// Propagates IO failures.
pub fn write_utf8_file(path: &Utf8Path, contents: &str) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_dir_and_file(path)?;
    dir.write(name.as_str(), contents)
}

/// Ensure the parent directory for `path` exists.
///
/// # Errors
/// Propagates IO failures from directory creation.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => ensure_dir(parent).map(drop),
        _ => Ok(()),
    }
}

/// Create `path` and its ancestors if needed and open it as a capability.
///
/// # Errors
/// Propagates IO failures from creating or opening the directory.
pub fn ensure_dir(path: &Utf8Path) -> io::Result<fs_utf8::Dir> {
    let (base, relative) = anchor(path)?;
    if relative.as_str().is_empty() {
        return Ok(base);
    }
    base.create_dir_all(&relative)?;
    base.open_dir(&relative)
}

/// Return whether `path` is a regular file.
///
/// # Errors
/// Fails with [`io::ErrorKind::NotFound`] when nothing exists at `path`, and
/// with other IO errors when its metadata cannot be read.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Split `path` into an ambient base directory and the remainder relative
/// to it: the filesystem root (with any Windows drive or UNC prefix) for
/// absolute paths, the current directory otherwise.
fn anchor(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let mut components = path.components();
    let base = match components.next() {
        Some(Utf8Component::Prefix(prefix)) => {
            let mut base = Utf8PathBuf::from(prefix.as_str());
            if components.clone().next() == Some(Utf8Component::RootDir) {
                components.next();
                base.push(MAIN_SEPARATOR_STR);
            }
            base
        }
        Some(Utf8Component::RootDir) => Utf8PathBuf::from(MAIN_SEPARATOR_STR),
        _ => {
            components = path.components();
            Utf8PathBuf::from(".")
        }
    };
    let relative = components.as_path().to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    Ok((dir, relative))
}

//! Raw OS primitives behind a [`FileSystem`](crate::FileSystem)
//!
//! A [`Backend`] does exactly what it is told and applies no overwrite
//! policy of its own. Policy (the overwrite matrix, post-delete checks)
//! lives in `FileSystem`, so a test double only needs to reproduce the
//! primitives.

use crate::io::{self, WriteOptions};
use crate::{Error, Kind, Location, Result};
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::Path as StdPath;
use std::time::SystemTime;
use walkdir::WalkDir;

/// Size and modification time, either of which the OS may not report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Attributes {
    pub len: Option<u64>,
    pub modified: Option<SystemTime>,
}

/// OS file-system primitives.
pub trait Backend: Send + Sync + std::fmt::Debug {
    /// Classify a location, following symlinks.
    fn kind(&self, location: &Location) -> Kind;

    /// Attributes of whatever is at the location.
    fn attributes(&self, location: &Location) -> Result<Attributes>;

    /// Create a file that must not already exist.
    fn create_new(&self, location: &Location, data: &[u8], options: &WriteOptions) -> Result<()>;

    /// Write a file, replacing any file already there.
    fn replace(&self, location: &Location, data: &[u8], options: &WriteOptions) -> Result<()>;

    fn create_dir_all(&self, location: &Location) -> Result<()>;

    fn remove_file(&self, location: &Location) -> Result<()>;

    fn remove_dir_all(&self, location: &Location) -> Result<()>;

    fn rename(&self, from: &Location, to: &Location) -> Result<()>;

    fn copy_file(&self, from: &Location, to: &Location) -> Result<()>;

    /// Recursively copy a directory tree to a location that does not exist.
    ///
    /// Symlinks inside the tree are recreated as links, not followed. On
    /// failure nothing is left at `to`.
    fn copy_dir_all(&self, from: &Location, to: &Location) -> Result<()>;

    /// Create a symbolic link at `at` pointing to `target`.
    fn symlink(&self, at: &Location, target: &Location) -> Result<()>;

    /// Immediate children of a directory, in no particular order.
    fn read_dir(&self, location: &Location) -> Result<Vec<Location>>;

    fn open_read(&self, location: &Location) -> Result<Box<dyn Read + Send>>;

    /// Open a file for writing, truncating unless `append` is set.
    fn open_write(&self, location: &Location, append: bool) -> Result<Box<dyn Write + Send>>;

    /// Resolve symlinks and relative components.
    fn canonicalize(&self, location: &Location) -> Result<Location>;

    /// True if the location itself is a symlink, dangling or not.
    fn is_symlink(&self, location: &Location) -> bool;
}

/// The real filesystem through `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalBackend;

impl Backend for LocalBackend {
    fn kind(&self, location: &Location) -> Kind {
        match fs::metadata(location.to_native()) {
            Ok(meta) if meta.is_dir() => Kind::Directory,
            Ok(_) => Kind::File,
            Err(_) => Kind::None,
        }
    }

    fn attributes(&self, location: &Location) -> Result<Attributes> {
        let meta = fs::metadata(location.to_native()).map_err(|e| Error::from_os(location, e))?;
        Ok(Attributes {
            len: Some(meta.len()),
            modified: meta.modified().ok(),
        })
    }

    fn create_new(&self, location: &Location, data: &[u8], options: &WriteOptions) -> Result<()> {
        io::write_new(location, data, options)
    }

    fn replace(&self, location: &Location, data: &[u8], options: &WriteOptions) -> Result<()> {
        io::write_atomic(location, data, options)
    }

    fn create_dir_all(&self, location: &Location) -> Result<()> {
        fs::create_dir_all(location.to_native()).map_err(|e| Error::from_os(location, e))
    }

    fn remove_file(&self, location: &Location) -> Result<()> {
        fs::remove_file(location.to_native()).map_err(|e| Error::from_os(location, e))
    }

    fn remove_dir_all(&self, location: &Location) -> Result<()> {
        fs::remove_dir_all(location.to_native()).map_err(|e| Error::from_os(location, e))
    }

    fn rename(&self, from: &Location, to: &Location) -> Result<()> {
        fs::rename(from.to_native(), to.to_native()).map_err(|e| Error::from_os(to, e))
    }

    fn copy_file(&self, from: &Location, to: &Location) -> Result<()> {
        fs::copy(from.to_native(), to.to_native())
            .map(|_| ())
            .map_err(|e| Error::from_os(to, e))
    }

    fn copy_dir_all(&self, from: &Location, to: &Location) -> Result<()> {
        let existed = fs::symlink_metadata(to.to_native()).is_ok();
        let result = copy_tree(from, to);
        if result.is_err() && !existed {
            let _ = fs::remove_dir_all(to.to_native());
        }
        result
    }

    fn symlink(&self, at: &Location, target: &Location) -> Result<()> {
        #[cfg(unix)]
        let result = std::os::unix::fs::symlink(target.to_native(), at.to_native());
        #[cfg(windows)]
        let result = std::os::windows::fs::symlink_file(target.to_native(), at.to_native());
        result.map_err(|e| Error::from_os(at, e))
    }

    fn read_dir(&self, location: &Location) -> Result<Vec<Location>> {
        let entries = fs::read_dir(location.to_native()).map_err(|e| Error::from_os(location, e))?;
        let mut children = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => children.push(Location::new(entry.path())),
                Err(e) => {
                    tracing::warn!(%location, error = %e, "Skipping unreadable directory entry");
                }
            }
        }
        Ok(children)
    }

    fn open_read(&self, location: &Location) -> Result<Box<dyn Read + Send>> {
        let file = fs::File::open(location.to_native()).map_err(|e| Error::from_os(location, e))?;
        Ok(Box::new(file))
    }

    fn open_write(&self, location: &Location, append: bool) -> Result<Box<dyn Write + Send>> {
        let file = OpenOptions::new()
            .write(true)
            .append(append)
            .truncate(!append)
            .open(location.to_native())
            .map_err(|e| Error::from_os(location, e))?;
        Ok(Box::new(file))
    }

    fn canonicalize(&self, location: &Location) -> Result<Location> {
        dunce::canonicalize(location.to_native())
            .map(Location::new)
            .map_err(|e| Error::from_os(location, e))
    }

    fn is_symlink(&self, location: &Location) -> bool {
        fs::symlink_metadata(location.to_native()).is_ok_and(|meta| meta.file_type().is_symlink())
    }
}

fn copy_tree(from: &Location, to: &Location) -> Result<()> {
    let root = from.to_native();
    let dest = to.to_native();
    for entry in WalkDir::new(&root).follow_links(false) {
        let entry = entry.map_err(|e| {
            let location = e.path().map(Location::new).unwrap_or_else(|| from.clone());
            Error::io(location, e.into())
        })?;
        let relative = entry
            .path()
            .strip_prefix(&root)
            .map_err(|e| Error::io(from, std::io::Error::other(e)))?;
        let target = dest.join(relative);

        // The root itself is always traversed, even when it is a link
        let result = if entry.depth() > 0 && entry.path_is_symlink() {
            copy_link(entry.path(), &target)
        } else if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
        } else {
            fs::copy(entry.path(), &target).map(|_| ())
        };
        result.map_err(|e| Error::from_os(target.as_path(), e))?;
    }
    Ok(())
}

/// Recreate the link at `source` at `link`, with the same target.
fn copy_link(source: &StdPath, link: &StdPath) -> std::io::Result<()> {
    let original = fs::read_link(source)?;
    #[cfg(unix)]
    let result = std::os::unix::fs::symlink(&original, link);
    #[cfg(windows)]
    let result = if fs::metadata(source).is_ok_and(|meta| meta.is_dir()) {
        std::os::windows::fs::symlink_dir(&original, link)
    } else {
        std::os::windows::fs::symlink_file(&original, link)
    };
    result
}

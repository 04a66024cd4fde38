//! Type-state path values
//!
//! A [`Path`] knows only its location. Classifying it yields a
//! [`Classified`] value whose variant decides which operations are
//! reachable: file operations live on [`FilePath`], directory operations on
//! [`DirectoryPath`]. Typed values are snapshots. They go stale as soon as
//! something else changes the filesystem, and [`Classified::revalidate`]
//! style calls re-query the OS to get a fresh one.

use crate::io::WriteOptions;
use crate::{DirectoryPath, FilePath, FileSystem, Kind, Location, Result};
use chrono::{DateTime, Utc};

/// A location bound to a [`FileSystem`], with no claim about what exists.
#[derive(Clone, Debug)]
pub struct Path {
    fs: FileSystem,
    location: Location,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location
    }
}

impl Eq for Path {}

impl Path {
    pub fn new(fs: FileSystem, location: impl Into<Location>) -> Self {
        Self {
            fs,
            location: location.into(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn file_system(&self) -> &FileSystem {
        &self.fs
    }

    /// Last component, extension included.
    pub fn name(&self) -> Option<&str> {
        self.location.file_name()
    }

    /// Last component without its extension.
    pub fn basename(&self) -> Option<&str> {
        self.location.file_stem()
    }

    pub fn extension(&self) -> Option<&str> {
        self.location.extension()
    }

    pub fn parent(&self) -> Option<Path> {
        self.location.parent().map(|parent| self.sibling(parent))
    }

    pub fn without_last_component(&self) -> Path {
        self.sibling(self.location.without_last_component())
    }

    pub fn with_extension(&self, extension: &str) -> Path {
        self.sibling(self.location.with_extension(extension))
    }

    pub fn join(&self, segment: &str) -> Path {
        self.sibling(self.location.join(segment))
    }

    /// Current kind at this location.
    pub fn kind(&self) -> Kind {
        self.fs.classify(&self.location)
    }

    pub fn exists(&self) -> bool {
        self.kind().exists()
    }

    /// Classify against the live filesystem.
    pub fn classify(&self) -> Classified {
        self.fs.typed(self.location.clone(), self.kind())
    }

    /// The file at this location, if a file is there right now.
    pub fn file(&self) -> Option<FilePath> {
        self.classify().into_file()
    }

    /// The directory at this location, if a directory is there right now.
    pub fn directory(&self) -> Option<DirectoryPath> {
        self.classify().into_directory()
    }

    /// Whatever exists at this location right now.
    pub fn existing(&self) -> Option<ExistingPath> {
        self.classify().into_existing()
    }

    /// This location, if nothing exists there right now.
    pub fn non_existing(&self) -> Option<NonExistingPath> {
        self.classify().into_non_existing()
    }

    /// A path with symlinks and relative components resolved.
    pub fn resolved(&self) -> Result<Path> {
        let location = self.fs.backend().canonicalize(&self.location)?;
        Ok(self.sibling(location))
    }

    fn sibling(&self, location: Location) -> Path {
        Path {
            fs: self.fs.clone(),
            location,
        }
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.location)
    }
}

/// The outcome of classifying a location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classified {
    File(FilePath),
    Directory(DirectoryPath),
    None(NonExistingPath),
}

impl Classified {
    pub fn kind(&self) -> Kind {
        match self {
            Self::File(_) => Kind::File,
            Self::Directory(_) => Kind::Directory,
            Self::None(_) => Kind::None,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::File(file) => file.path(),
            Self::Directory(dir) => dir.path(),
            Self::None(missing) => missing.path(),
        }
    }

    pub fn location(&self) -> &Location {
        self.path().location()
    }

    pub fn into_file(self) -> Option<FilePath> {
        match self {
            Self::File(file) => Some(file),
            _ => None,
        }
    }

    pub fn into_directory(self) -> Option<DirectoryPath> {
        match self {
            Self::Directory(dir) => Some(dir),
            _ => None,
        }
    }

    pub fn into_existing(self) -> Option<ExistingPath> {
        match self {
            Self::File(file) => Some(ExistingPath::File(file)),
            Self::Directory(dir) => Some(ExistingPath::Directory(dir)),
            Self::None(_) => None,
        }
    }

    pub fn into_non_existing(self) -> Option<NonExistingPath> {
        match self {
            Self::None(missing) => Some(missing),
            _ => None,
        }
    }
}

/// A file or directory that existed when it was classified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExistingPath {
    File(FilePath),
    Directory(DirectoryPath),
}

impl ExistingPath {
    pub fn kind(&self) -> Kind {
        match self {
            Self::File(_) => Kind::File,
            Self::Directory(_) => Kind::Directory,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::File(file) => file.path(),
            Self::Directory(dir) => dir.path(),
        }
    }

    pub fn location(&self) -> &Location {
        self.path().location()
    }

    pub fn as_file(&self) -> Option<&FilePath> {
        match self {
            Self::File(file) => Some(file),
            Self::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&DirectoryPath> {
        match self {
            Self::Directory(dir) => Some(dir),
            Self::File(_) => None,
        }
    }

    /// Delete this item, recursively for directories.
    pub fn delete(&self) -> Result<NonExistingPath> {
        self.fs().delete_item(self.location())
    }

    pub fn move_to(&self, to: impl Into<Location>, can_overwrite: bool) -> Result<ExistingPath> {
        self.fs()
            .move_item(self.location(), &to.into(), can_overwrite)
    }

    pub fn copy_to(&self, to: impl Into<Location>, can_overwrite: bool) -> Result<ExistingPath> {
        self.fs()
            .copy_item(self.location(), &to.into(), can_overwrite)
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.fs().last_modified(self.location())
    }

    pub fn size(&self) -> u64 {
        self.fs().size(self.location())
    }

    pub fn revalidate(&self) -> Classified {
        self.path().classify()
    }

    fn fs(&self) -> &FileSystem {
        self.path().file_system()
    }
}

/// A location at which nothing existed when it was classified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NonExistingPath {
    path: Path,
}

impl NonExistingPath {
    pub(crate) fn assume(fs: FileSystem, location: Location) -> Self {
        Self {
            path: Path::new(fs, location),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a file here. Fails with `AlreadyExists` if something has
    /// appeared since classification.
    pub fn create_file(&self, data: &[u8], options: &WriteOptions) -> Result<FilePath> {
        self.path
            .file_system()
            .create_file(self.path.location(), data, false, options)
    }

    pub fn create_directory(&self) -> Result<DirectoryPath> {
        self.path
            .file_system()
            .create_directory_if_not_exists(self.path.location())
    }

    pub fn revalidate(&self) -> Classified {
        self.path.classify()
    }
}

impl std::ops::Deref for NonExistingPath {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.path
    }
}

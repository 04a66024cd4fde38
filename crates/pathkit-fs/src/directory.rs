//! Operations that only make sense on directories

use crate::io::WriteOptions;
use crate::{
    Classified, Error, ExistingPath, FilePath, FileSystem, Kind, Location, NonExistingPath, Path,
    Result,
};
use chrono::{DateTime, Utc};

/// A location that held a directory when it was classified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryPath {
    path: Path,
}

impl DirectoryPath {
    pub(crate) fn assume(fs: FileSystem, location: Location) -> Self {
        Self {
            path: Path::new(fs, location),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Immediate children, sorted by location.
    pub fn contents(&self) -> Result<Vec<ExistingPath>> {
        self.fs().contents_of_directory(self.location())
    }

    /// Create a file directly inside this directory.
    pub fn add_file(
        &self,
        name: &str,
        data: &[u8],
        can_overwrite: bool,
        options: &WriteOptions,
    ) -> Result<FilePath> {
        let at = self.child(name)?;
        self.fs().create_file(&at, data, can_overwrite, options)
    }

    /// Create a symlink directly inside this directory pointing at `to`.
    pub fn add_link(&self, name: &str, to: &FilePath, can_overwrite: bool) -> Result<FilePath> {
        let at = self.child(name)?;
        self.fs().create_link(&at, to.location(), can_overwrite)
    }

    /// The named subdirectory, created if it does not exist yet.
    pub fn subdirectory(&self, name: &str) -> Result<DirectoryPath> {
        let at = self.child(name)?;
        self.fs().create_directory_if_not_exists(&at)
    }

    /// A kind-unknown path for `name` inside this directory. No OS call.
    pub fn file_named(&self, name: &str) -> Path {
        self.path.join(name)
    }

    /// A kind-unknown path for a nested `sub_path` like `a/b/c.txt`.
    ///
    /// Every intermediate directory is created, so the returned path can be
    /// written to directly.
    pub fn file_at_sub_path(&self, sub_path: &str) -> Result<Path> {
        let target = self.path.join(sub_path);
        if let Some(parent) = target.location().parent() {
            if parent != *self.location() {
                self.fs().create_directory_if_not_exists(&parent)?;
            }
        }
        Ok(target)
    }

    pub fn size(&self) -> u64 {
        self.fs().size(self.location())
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.fs().last_modified(self.location())
    }

    pub fn delete(&self) -> Result<NonExistingPath> {
        self.fs().delete_item(self.location())
    }

    pub fn move_to(&self, to: impl Into<Location>, can_overwrite: bool) -> Result<DirectoryPath> {
        let moved = self
            .fs()
            .move_item(self.location(), &to.into(), can_overwrite)?;
        expect_directory(moved)
    }

    pub fn copy_to(&self, to: impl Into<Location>, can_overwrite: bool) -> Result<DirectoryPath> {
        let copied = self
            .fs()
            .copy_item(self.location(), &to.into(), can_overwrite)?;
        expect_directory(copied)
    }

    pub fn revalidate(&self) -> Classified {
        self.path.classify()
    }

    pub fn into_existing(self) -> ExistingPath {
        ExistingPath::Directory(self)
    }

    /// Location of a direct child. `name` must be a single component.
    fn child(&self, name: &str) -> Result<Location> {
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\');
        if invalid {
            return Err(Error::InvalidName {
                location: self.location().clone(),
                name: name.to_string(),
            });
        }
        Ok(self.location().join(name))
    }

    fn fs(&self) -> &FileSystem {
        self.path.file_system()
    }
}

impl std::ops::Deref for DirectoryPath {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.path
    }
}

fn expect_directory(existing: ExistingPath) -> Result<DirectoryPath> {
    match existing {
        ExistingPath::Directory(dir) => Ok(dir),
        ExistingPath::File(file) => Err(Error::WrongKind {
            location: file.location().clone(),
            expected: Kind::Directory,
            found: Kind::File,
        }),
    }
}

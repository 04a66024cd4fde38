//! The classification authority and its policy-checked operations
//!
//! [`FileSystem`] is the only thing that produces typed path values. Each
//! mutating operation applies the same overwrite matrix to its destination:
//!
//! | existing kind at target | `can_overwrite` | result              |
//! |-------------------------|-----------------|---------------------|
//! | none                    | any             | proceed             |
//! | same kind as written    | `false`         | `AlreadyExists`     |
//! | same kind as written    | `true`          | remove, then proceed|
//! | opposite kind           | any             | `WrongKind`         |

use crate::backend::{Backend, LocalBackend};
use crate::io::WriteOptions;
use crate::{
    Classified, DirectoryPath, Error, ExistingPath, FilePath, Kind, Location, NonExistingPath,
    Path, Result,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A cheap, cloneable handle to a [`Backend`].
///
/// Every path value carries one, so all OS queries for a path go through
/// the same authority. Tests substitute their own backend with
/// [`FileSystem::with_backend`].
#[derive(Clone, Debug)]
pub struct FileSystem {
    backend: Arc<dyn Backend>,
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::local()
    }
}

impl FileSystem {
    /// The real filesystem.
    pub fn local() -> Self {
        Self::with_backend(LocalBackend)
    }

    pub fn with_backend(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// What occupies `location` right now. No side effects.
    pub fn classify(&self, location: &Location) -> Kind {
        self.backend.kind(location)
    }

    /// A kind-unknown path bound to this filesystem. No OS call.
    pub fn path(&self, location: impl Into<Location>) -> Path {
        Path::new(self.clone(), location.into())
    }

    /// Classify `location` into a typed value.
    pub fn resolve(&self, location: impl Into<Location>) -> Classified {
        let location = location.into();
        let kind = self.classify(&location);
        self.typed(location, kind)
    }

    /// Create a file holding `data`.
    ///
    /// Intermediate directories are created as needed. When nothing is at
    /// `at`, the file is created exclusively, so a concurrent creator
    /// surfaces as `AlreadyExists` rather than being clobbered.
    pub fn create_file(
        &self,
        at: &Location,
        data: &[u8],
        can_overwrite: bool,
        options: &WriteOptions,
    ) -> Result<FilePath> {
        tracing::debug!(location = %at, can_overwrite, bytes = data.len(), "Creating file");
        let replacing = self.check_destination(at, Kind::File, can_overwrite)?;

        if !replacing {
            self.clear_dangling_link(at, can_overwrite)?;
            self.backend.create_new(at, data, options)?;
        } else if options.atomic {
            // Rename over the old file; there is no window with nothing there
            self.backend.replace(at, data, options)?;
        } else {
            self.backend.remove_file(at)?;
            self.backend.create_new(at, data, options)?;
        }

        Ok(FilePath::assume(self.clone(), at.clone()))
    }

    /// Create a symbolic link at `at` pointing to the file at `to`.
    ///
    /// `to` is stored verbatim as the link target.
    pub fn create_link(
        &self,
        at: &Location,
        to: &Location,
        can_overwrite: bool,
    ) -> Result<FilePath> {
        tracing::debug!(location = %at, target = %to, can_overwrite, "Creating link");
        match self.classify(to) {
            Kind::None => {
                return Err(Error::DestinationMissing {
                    location: to.clone(),
                });
            }
            Kind::Directory => {
                return Err(Error::DestinationIsDirectory {
                    location: to.clone(),
                });
            }
            Kind::File => {}
        }

        self.prepare_destination(at, Kind::File, can_overwrite)?;
        if let Some(parent) = at.parent() {
            self.backend.create_dir_all(&parent)?;
        }
        self.backend.symlink(at, to)?;

        Ok(FilePath::assume(self.clone(), at.clone()))
    }

    /// Move a file or directory tree from `at` to `to`.
    ///
    /// Moving an item onto itself, under any spelling of its location, is a
    /// no-op.
    pub fn move_item(
        &self,
        at: &Location,
        to: &Location,
        can_overwrite: bool,
    ) -> Result<ExistingPath> {
        tracing::debug!(from = %at, to = %to, can_overwrite, "Moving item");
        let kind = self.require_existing(at)?;
        if self.is_same_item(at, to) {
            return Ok(self.existing(to.clone(), kind));
        }

        self.prepare_destination(to, kind, can_overwrite)?;
        self.backend.rename(at, to)?;

        Ok(self.existing(to.clone(), kind))
    }

    /// Copy a file or directory tree from `at` to `to`.
    ///
    /// Copying an item onto itself leaves it untouched, or fails with
    /// `AlreadyExists` when overwriting is not allowed.
    pub fn copy_item(
        &self,
        at: &Location,
        to: &Location,
        can_overwrite: bool,
    ) -> Result<ExistingPath> {
        tracing::debug!(from = %at, to = %to, can_overwrite, "Copying item");
        let kind = self.require_existing(at)?;
        if self.is_same_item(at, to) {
            return match can_overwrite {
                true => Ok(self.existing(to.clone(), kind)),
                false => Err(Error::AlreadyExists {
                    location: to.clone(),
                }),
            };
        }

        self.prepare_destination(to, kind, can_overwrite)?;
        match kind {
            Kind::Directory => self.backend.copy_dir_all(at, to)?,
            _ => self.backend.copy_file(at, to)?,
        }

        Ok(self.existing(to.clone(), kind))
    }

    /// Make sure a directory exists at `at`, creating intermediates.
    ///
    /// Succeeds without touching anything if the directory is already there.
    pub fn create_directory_if_not_exists(&self, at: &Location) -> Result<DirectoryPath> {
        match self.classify(at) {
            Kind::Directory => {}
            Kind::File => {
                return Err(Error::WrongKind {
                    location: at.clone(),
                    expected: Kind::Directory,
                    found: Kind::File,
                });
            }
            Kind::None => {
                tracing::debug!(location = %at, "Creating directory");
                self.backend.create_dir_all(at)?;
            }
        }
        Ok(DirectoryPath::assume(self.clone(), at.clone()))
    }

    /// Delete whatever is at `at`, recursively for directories.
    ///
    /// The location is classified again afterwards; if the OS reported
    /// success but the item is still there, this fails with `StillExists`.
    pub fn delete_item(&self, at: &Location) -> Result<NonExistingPath> {
        tracing::debug!(location = %at, "Deleting item");
        let kind = self.require_existing(at)?;
        self.remove(at, kind)?;

        if self.classify(at).exists() {
            return Err(Error::StillExists {
                location: at.clone(),
            });
        }
        Ok(NonExistingPath::assume(self.clone(), at.clone()))
    }

    /// One-level listing of a directory, sorted by location.
    ///
    /// Entries that vanish or cannot be classified between listing and
    /// classification are skipped.
    pub fn contents_of_directory(&self, at: &Location) -> Result<Vec<ExistingPath>> {
        match self.classify(at) {
            Kind::Directory => {}
            Kind::None => {
                return Err(Error::NotFound {
                    location: at.clone(),
                });
            }
            Kind::File => {
                return Err(Error::WrongKind {
                    location: at.clone(),
                    expected: Kind::Directory,
                    found: Kind::File,
                });
            }
        }

        let mut children = self.backend.read_dir(at)?;
        children.sort();

        let listing = children
            .into_iter()
            .filter_map(|child| match self.classify(&child) {
                Kind::None => {
                    tracing::warn!(location = %child, "Skipping unclassifiable entry");
                    None
                }
                kind => Some(self.existing(child, kind)),
            })
            .collect();
        Ok(listing)
    }

    /// Modification time, or the current time if the OS does not report one.
    pub fn last_modified(&self, at: &Location) -> DateTime<Utc> {
        self.backend
            .attributes(at)
            .ok()
            .and_then(|attrs| attrs.modified)
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(Utc::now)
    }

    /// Size in bytes, or 0 if the OS does not report one.
    pub fn size(&self, at: &Location) -> u64 {
        self.backend
            .attributes(at)
            .ok()
            .and_then(|attrs| attrs.len)
            .unwrap_or(0)
    }

    /// Apply the overwrite matrix. Returns `true` when an item of the same
    /// kind is present and may be replaced.
    fn check_destination(
        &self,
        at: &Location,
        writing: Kind,
        can_overwrite: bool,
    ) -> Result<bool> {
        match self.classify(at) {
            Kind::None => Ok(false),
            found if found == writing => {
                if can_overwrite {
                    Ok(true)
                } else {
                    Err(Error::AlreadyExists {
                        location: at.clone(),
                    })
                }
            }
            found => Err(Error::WrongKind {
                location: at.clone(),
                expected: writing,
                found,
            }),
        }
    }

    /// Apply the overwrite matrix and clear whatever may be replaced.
    fn prepare_destination(&self, at: &Location, writing: Kind, can_overwrite: bool) -> Result<()> {
        if self.check_destination(at, writing, can_overwrite)? {
            self.remove(at, writing)
        } else {
            self.clear_dangling_link(at, can_overwrite)
        }
    }

    /// A dangling symlink classifies as nothing but still occupies its name.
    fn clear_dangling_link(&self, at: &Location, can_overwrite: bool) -> Result<()> {
        if !self.backend.is_symlink(at) {
            return Ok(());
        }
        if !can_overwrite {
            return Err(Error::AlreadyExists {
                location: at.clone(),
            });
        }
        tracing::debug!(location = %at, "Removing dangling link");
        self.backend.remove_file(at)
    }

    /// Whether two locations name the same item, however they are spelled.
    fn is_same_item(&self, at: &Location, to: &Location) -> bool {
        if at == to {
            return true;
        }
        if !self.classify(to).exists() {
            return false;
        }
        match (self.backend.canonicalize(at), self.backend.canonicalize(to)) {
            (Ok(ours), Ok(theirs)) => ours == theirs,
            _ => false,
        }
    }

    fn require_existing(&self, at: &Location) -> Result<Kind> {
        match self.classify(at) {
            Kind::None => Err(Error::NotFound {
                location: at.clone(),
            }),
            kind => Ok(kind),
        }
    }

    fn remove(&self, at: &Location, kind: Kind) -> Result<()> {
        match kind {
            Kind::Directory => self.backend.remove_dir_all(at),
            _ => self.backend.remove_file(at),
        }
    }

    pub(crate) fn typed(&self, location: Location, kind: Kind) -> Classified {
        match kind {
            Kind::File => Classified::File(FilePath::assume(self.clone(), location)),
            Kind::Directory => Classified::Directory(DirectoryPath::assume(self.clone(), location)),
            Kind::None => Classified::None(NonExistingPath::assume(self.clone(), location)),
        }
    }

    fn existing(&self, location: Location, kind: Kind) -> ExistingPath {
        match kind {
            Kind::Directory => {
                ExistingPath::Directory(DirectoryPath::assume(self.clone(), location))
            }
            _ => ExistingPath::File(FilePath::assume(self.clone(), location)),
        }
    }
}

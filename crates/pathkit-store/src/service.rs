//! One ordered collection mirrored by one archive file

use crate::{Error, Identifiable, Persistable, Result, StoreConfig};
use pathkit_archive::{ArchiveCodec, DecodeContext, Origin, Purpose};
use pathkit_fs::{Classified, DirectoryPath, FilePath, Kind, Path, WriteOptions};

/// Loads, holds and saves a `Vec<T>` as a single archive in a directory.
///
/// The archive is `<lowercased type name>s.plist` inside the directory.
/// Between [`reload`](Self::reload) and [`save`](Self::save) the in-memory
/// collection is the only working copy; nothing is written implicitly
/// except by the [`Identifiable`] helpers.
///
/// Two services over the same directory do not coordinate. The last save
/// wins.
#[derive(Debug)]
pub struct PersistenceService<T: Persistable> {
    directory: DirectoryPath,
    archive: Path,
    codec: ArchiveCodec,
    write: WriteOptions,
    items: Vec<T>,
}

impl<T: Persistable> PersistenceService<T> {
    /// Open the collection stored in `directory`, loading it immediately.
    pub fn open(directory: DirectoryPath) -> Result<Self> {
        Self::with_config(directory, &StoreConfig::default())
    }

    pub fn with_config(directory: DirectoryPath, config: &StoreConfig) -> Result<Self> {
        Self::build(directory, config.codec(), config.write, &config.file_extension)
    }

    /// Open with a custom codec, typically one carrying an encrypting
    /// transform.
    pub fn with_codec(directory: DirectoryPath, codec: ArchiveCodec) -> Result<Self> {
        let config = StoreConfig::default();
        Self::build(directory, codec, config.write, &config.file_extension)
    }

    fn build(
        directory: DirectoryPath,
        codec: ArchiveCodec,
        write: WriteOptions,
        extension: &str,
    ) -> Result<Self> {
        let archive = directory.file_named(&T::archive_file_name(extension));
        let mut service = Self {
            directory,
            archive,
            codec,
            write,
            items: Vec::new(),
        };
        service.reload()?;
        Ok(service)
    }

    /// Replace the in-memory collection with the archive's contents.
    ///
    /// A missing archive yields an empty collection. A corrupt archive is an
    /// error and leaves the collection untouched.
    pub fn reload(&mut self) -> Result<()> {
        let file = match self.archive.classify() {
            Classified::None(_) => {
                tracing::debug!(archive = %self.archive, "No archive yet, starting empty");
                self.items.clear();
                return Ok(());
            }
            Classified::Directory(_) => {
                return Err(pathkit_fs::Error::WrongKind {
                    location: self.archive.location().clone(),
                    expected: Kind::File,
                    found: Kind::Directory,
                }
                .into());
            }
            Classified::File(file) => file,
        };

        let bytes = file.contents()?;
        let context = DecodeContext::new(Purpose::Replace, Origin::Local);
        let items: Vec<T> = self
            .codec
            .decode(&bytes, context)
            .map_err(|e| Error::archive(file.location(), e))?;

        tracing::debug!(archive = %self.archive, count = items.len(), "Reloaded collection");
        self.items = items;
        Ok(())
    }

    /// Write the whole collection, replacing any existing archive.
    pub fn save(&self) -> Result<FilePath> {
        let location = self.archive.location();
        let bytes = self
            .codec
            .encode(&self.items)
            .map_err(|e| Error::archive(location, e))?;

        let file = self
            .archive
            .file_system()
            .create_file(location, &bytes, true, &self.write)?;
        tracing::debug!(archive = %location, count = self.items.len(), "Saved collection");
        Ok(file)
    }

    pub fn directory(&self) -> &DirectoryPath {
        &self.directory
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Persistable + Identifiable> PersistenceService<T> {
    pub fn find(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == *id)
    }

    /// Replace the item with the same id in place, or append; then save.
    pub fn add(&mut self, item: T) -> Result<()> {
        let id = item.id();
        match self.items.iter().position(|existing| existing.id() == id) {
            Some(index) => self.items[index] = item,
            None => self.items.push(item),
        }
        self.save()?;
        Ok(())
    }

    /// Remove the item with `id` and save. Nothing is written if no item
    /// matches.
    pub fn delete(&mut self, id: &T::Id) -> Result<Option<T>> {
        let Some(index) = self.items.iter().position(|item| item.id() == *id) else {
            return Ok(None);
        };
        let removed = self.items.remove(index);
        self.save()?;
        Ok(Some(removed))
    }
}

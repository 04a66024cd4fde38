//! Operations that only make sense on files

use crate::checksum;
use crate::io::WriteOptions;
use crate::records::{Lines, Records};
use crate::{
    Classified, DirectoryPath, Error, ExistingPath, FileSystem, Kind, Location, NonExistingPath,
    Path, Result,
};
use chrono::{DateTime, Utc};
use std::io::{BufReader, Read, Write};

/// Chunk size used when comparing file contents.
pub const COMPARE_CHUNK_SIZE: usize = 16_000;

/// A location that held a file when it was classified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePath {
    path: Path,
}

impl FilePath {
    pub(crate) fn assume(fs: FileSystem, location: Location) -> Self {
        Self {
            path: Path::new(fs, location),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The whole file as bytes.
    pub fn contents(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.reader()?
            .read_to_end(&mut buffer)
            .map_err(|e| Error::io(self.location(), e))?;
        Ok(buffer)
    }

    /// The whole file as UTF-8 text.
    pub fn string(&self) -> Result<String> {
        String::from_utf8(self.contents()?).map_err(|e| {
            Error::io(
                self.location(),
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })
    }

    /// Stream the file as records separated by `delimiter`.
    pub fn records(
        &self,
        delimiter: impl AsRef<[u8]>,
    ) -> Result<Records<BufReader<Box<dyn Read + Send>>>> {
        Ok(Records::new(
            BufReader::new(self.reader()?),
            delimiter,
            self.location().clone(),
        ))
    }

    /// Stream the file as UTF-8 lines.
    pub fn lines(&self) -> Result<Lines<BufReader<Box<dyn Read + Send>>>> {
        Ok(Lines::new(
            BufReader::new(self.reader()?),
            self.location().clone(),
        ))
    }

    /// Raw read handle.
    pub fn reader(&self) -> Result<Box<dyn Read + Send>> {
        self.fs().backend().open_read(self.location())
    }

    /// Raw write handle; truncates the file.
    pub fn writer(&self) -> Result<Box<dyn Write + Send>> {
        self.fs().backend().open_write(self.location(), false)
    }

    /// Raw write handle positioned at the end of the file.
    pub fn appender(&self) -> Result<Box<dyn Write + Send>> {
        self.fs().backend().open_write(self.location(), true)
    }

    /// Replace the file's contents.
    pub fn write(&self, data: &[u8], options: &WriteOptions) -> Result<FilePath> {
        self.fs().create_file(self.location(), data, true, options)
    }

    /// Byte-for-byte comparison with another file.
    ///
    /// Files of different sizes are never identical. Otherwise both are read
    /// in [`COMPARE_CHUNK_SIZE`] chunks, stopping at the first mismatch.
    pub fn is_identical(&self, other: &FilePath) -> Result<bool> {
        if self.location() == other.location() {
            return Ok(true);
        }

        let backend = self.fs().backend();
        let ours = backend.attributes(self.location())?.len;
        let theirs = other.fs().backend().attributes(other.location())?.len;
        if let (Some(a), Some(b)) = (ours, theirs) {
            if a != b {
                return Ok(false);
            }
        }

        let mut left = self.reader()?;
        let mut right = other.reader()?;
        let mut left_buf = vec![0u8; COMPARE_CHUNK_SIZE];
        let mut right_buf = vec![0u8; COMPARE_CHUNK_SIZE];

        loop {
            let l = fill(&mut left, &mut left_buf).map_err(|e| Error::io(self.location(), e))?;
            let r = fill(&mut right, &mut right_buf).map_err(|e| Error::io(other.location(), e))?;
            if l != r || left_buf[..l] != right_buf[..r] {
                return Ok(false);
            }
            if l == 0 {
                return Ok(true);
            }
        }
    }

    /// SHA-256 of the contents as `sha256:<hex>`.
    pub fn checksum(&self) -> Result<String> {
        checksum::checksum_reader(self.reader()?).map_err(|e| Error::io(self.location(), e))
    }

    pub fn size(&self) -> u64 {
        self.fs().size(self.location())
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.fs().last_modified(self.location())
    }

    /// The directory containing this file.
    pub fn parent_directory(&self) -> Option<DirectoryPath> {
        self.path.parent()?.directory()
    }

    pub fn delete(&self) -> Result<NonExistingPath> {
        self.fs().delete_item(self.location())
    }

    pub fn move_to(&self, to: impl Into<Location>, can_overwrite: bool) -> Result<FilePath> {
        let moved = self
            .fs()
            .move_item(self.location(), &to.into(), can_overwrite)?;
        expect_file(moved)
    }

    pub fn copy_to(&self, to: impl Into<Location>, can_overwrite: bool) -> Result<FilePath> {
        let copied = self
            .fs()
            .copy_item(self.location(), &to.into(), can_overwrite)?;
        expect_file(copied)
    }

    pub fn revalidate(&self) -> Classified {
        self.path.classify()
    }

    pub fn into_existing(self) -> ExistingPath {
        ExistingPath::File(self)
    }

    fn fs(&self) -> &FileSystem {
        self.path.file_system()
    }
}

impl std::ops::Deref for FilePath {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.path
    }
}

fn expect_file(existing: ExistingPath) -> Result<FilePath> {
    match existing {
        ExistingPath::File(file) => Ok(file),
        ExistingPath::Directory(dir) => Err(Error::WrongKind {
            location: dir.location().clone(),
            expected: Kind::File,
            found: Kind::Directory,
        }),
    }
}

/// Read until `buf` is full or the stream ends.
fn fill(reader: &mut dyn Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

//! Low-level write primitives: exclusive create and atomic replace

use crate::{Error, Location, Result};
use backoff::ExponentialBackoff;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Options controlling how file contents are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Replace existing files through a temp file and rename.
    pub atomic: bool,
    /// Flush file contents to disk before returning.
    pub fsync: bool,
    /// How long to keep retrying the advisory lock on the temp file.
    #[serde(rename = "lock_timeout_ms", with = "millis")]
    pub lock_timeout: Duration,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            fsync: true,
            lock_timeout: Duration::from_secs(5),
        }
    }
}

impl WriteOptions {
    /// Plain in-place writes with no fsync; useful for scratch data.
    pub fn fast() -> Self {
        Self {
            atomic: false,
            fsync: false,
            ..Self::default()
        }
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

/// Create a file that must not exist yet.
///
/// Uses the OS exclusive-create primitive, so a file created by someone
/// else after the caller's last classification fails with `AlreadyExists`
/// instead of being overwritten.
pub fn write_new(location: &Location, content: &[u8], options: &WriteOptions) -> Result<()> {
    let native_path = location.to_native();
    ensure_parent(location)?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&native_path)
        .map_err(|e| Error::from_os(location, e))?;

    file.write_all(content).map_err(|e| Error::io(location, e))?;
    if options.fsync {
        file.sync_all().map_err(|e| Error::io(location, e))?;
    }
    Ok(())
}

/// Write content to a file, replacing whatever file is there.
///
/// With `options.atomic` set, writes to a sibling temp file under an
/// exclusive advisory lock and renames it over the target, so readers see
/// either the old or the new content and never a partial write.
pub fn write_atomic(location: &Location, content: &[u8], options: &WriteOptions) -> Result<()> {
    let native_path = location.to_native();
    ensure_parent(location)?;

    if !options.atomic {
        let mut file = File::create(&native_path).map_err(|e| Error::from_os(location, e))?;
        file.write_all(content).map_err(|e| Error::io(location, e))?;
        if options.fsync {
            file.sync_all().map_err(|e| Error::io(location, e))?;
        }
        return Ok(());
    }

    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.{}.tmp",
        location.file_name().unwrap_or_default(),
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    );
    let temp_path = native_path.with_file_name(&temp_name);
    let temp_location = Location::new(&temp_path);

    let result = write_locked(&temp_location, location, content, options)
        .and_then(|()| fs::rename(&temp_path, &native_path).map_err(|e| Error::io(location, e)));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_locked(
    temp: &Location,
    target: &Location,
    content: &[u8],
    options: &WriteOptions,
) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp.to_native())
        .map_err(|e| Error::io(temp, e))?;

    lock_exclusive(&temp_file, target, options.lock_timeout)?;

    temp_file.write_all(content).map_err(|e| Error::io(temp, e))?;
    if options.fsync {
        temp_file.sync_all().map_err(|e| Error::io(temp, e))?;
    }

    FileExt::unlock(&temp_file).map_err(|_| Error::LockFailed {
        location: target.clone(),
    })
}

fn lock_exclusive(file: &File, target: &Location, timeout: Duration) -> Result<()> {
    let policy = ExponentialBackoff {
        initial_interval: Duration::from_millis(5),
        max_interval: Duration::from_millis(100),
        max_elapsed_time: Some(timeout),
        ..ExponentialBackoff::default()
    };

    backoff::retry(policy, || {
        FileExt::try_lock_exclusive(file).map_err(backoff::Error::transient)
    })
    .map_err(|_| Error::LockFailed {
        location: target.clone(),
    })
}

fn ensure_parent(location: &Location) -> Result<()> {
    if let Some(parent) = location.parent() {
        fs::create_dir_all(parent.to_native()).map_err(|e| Error::from_os(&parent, e))?;
    }
    Ok(())
}

//! Traits describing what a [`PersistenceService`](crate::PersistenceService) can hold

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A value stored as one element of a persisted collection.
pub trait Persistable: Serialize + DeserializeOwned {
    /// The name the archive file is derived from, e.g. `"Point"`.
    ///
    /// Part of the on-disk format: renaming the Rust type must not move
    /// the archive, so this is declared rather than derived.
    const TYPE_NAME: &'static str;

    /// `"<lowercased type name>s.<extension>"`, e.g. `points.plist`.
    fn archive_file_name(extension: &str) -> String {
        let stem = format!("{}s", Self::TYPE_NAME.to_lowercase());
        if extension.is_empty() {
            stem
        } else {
            format!("{stem}.{}", extension.trim_start_matches('.'))
        }
    }
}

/// A value with a stable identity, for replace-or-append semantics.
pub trait Identifiable {
    type Id: PartialEq;

    fn id(&self) -> Self::Id;
}

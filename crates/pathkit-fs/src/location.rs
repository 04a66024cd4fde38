//! OS-addressable locations, independent of what currently exists there

use serde::{Deserialize, Serialize};
use std::path::{Path as StdPath, PathBuf};

/// An OS-addressable path, normalized to forward slashes internally.
///
/// A `Location` says nothing about what exists on disk. Every accessor here
/// is pure string manipulation; conversion to a platform-native `PathBuf`
/// happens only at I/O boundaries via [`Location::to_native`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl Location {
    /// Create a new Location from any path-like input.
    ///
    /// Converts backslashes to forward slashes, collapses repeated
    /// separators and drops trailing slashes (except for the root itself).
    /// A leading `//` is kept for UNC paths.
    pub fn new(path: impl AsRef<StdPath>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let forward = path_str.replace('\\', "/");
        let prefix = if forward.starts_with("//") {
            "//"
        } else if forward.starts_with('/') {
            "/"
        } else {
            ""
        };
        let components = collapse_separators(&forward);
        let normalized = if components.is_empty() && !prefix.is_empty() {
            "/".to_string()
        } else {
            format!("{prefix}{components}")
        };
        Self { inner: normalized }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this location with a (possibly multi-component) segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment = collapse_separators(&segment.replace('\\', "/"));
        if segment.is_empty() {
            return self.clone();
        }
        let joined = if self.inner.is_empty() {
            segment
        } else if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self { inner: joined }
    }

    /// Get the parent location, if there is one.
    pub fn parent(&self) -> Option<Self> {
        match self.inner.rfind('/') {
            Some(0) if self.inner.len() > 1 => Some(Self {
                inner: "/".to_string(),
            }),
            Some(0) => None,
            Some(idx) => Some(Self {
                inner: self.inner[..idx].to_string(),
            }),
            None => None,
        }
    }

    /// The parent location, or `.` for a bare relative name, or the root
    /// itself for `/`.
    pub fn without_last_component(&self) -> Self {
        self.parent().unwrap_or_else(|| {
            if self.inner.starts_with('/') {
                Self {
                    inner: "/".to_string(),
                }
            } else {
                Self {
                    inner: ".".to_string(),
                }
            }
        })
    }

    /// The last component, including any extension.
    pub fn file_name(&self) -> Option<&str> {
        let name = self.inner.rsplit('/').next()?;
        if name.is_empty() || name == "." || name == ".." {
            None
        } else {
            Some(name)
        }
    }

    /// The last component without its extension.
    pub fn file_stem(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[..idx]),
            _ => Some(name),
        }
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Replace (or add) the extension of the last component.
    ///
    /// An empty extension removes it.
    pub fn with_extension(&self, extension: &str) -> Self {
        let Some(stem) = self.file_stem() else {
            return self.clone();
        };
        let name = if extension.is_empty() {
            stem.to_string()
        } else {
            format!("{}.{}", stem, extension.trim_start_matches('.'))
        };
        match self.parent() {
            Some(parent) => parent.join(&name),
            None => Self { inner: name },
        }
    }
}

/// Non-empty components of a forward-slash path, rejoined with single slashes.
fn collapse_separators(path: &str) -> String {
    path.split('/')
        .filter(|component| !component.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

impl AsRef<StdPath> for Location {
    fn as_ref(&self) -> &StdPath {
        StdPath::new(&self.inner)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for Location {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Location {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for Location {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&PathBuf> for Location {
    fn from(p: &PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&StdPath> for Location {
    fn from(p: &StdPath) -> Self {
        Self::new(p)
    }
}

impl From<&Location> for Location {
    fn from(l: &Location) -> Self {
        l.clone()
    }
}

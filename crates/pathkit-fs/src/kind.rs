//! What occupies a location at the moment it is classified.

/// The result of classifying a location against the live filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Nothing exists at the location (including dangling symlinks).
    None,
    /// A regular file, or a symlink resolving to one.
    File,
    /// A directory, or a symlink resolving to one.
    Directory,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "nothing",
            Self::File => "file",
            Self::Directory => "directory",
        }
    }

    pub fn exists(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

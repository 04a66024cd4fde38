//! Typed filesystem paths backed by live OS classification
//!
//! [`FileSystem`] classifies locations and performs every mutation under a
//! single overwrite policy. Classification yields type-state values
//! ([`FilePath`], [`DirectoryPath`], [`NonExistingPath`]) whose methods are
//! exactly the operations valid for that kind. None of them cache OS state:
//! anything that reports on the filesystem asks the OS again.

pub mod backend;
pub mod checksum;
pub mod directory;
pub mod error;
pub mod file;
pub mod filesystem;
pub mod io;
pub mod kind;
pub mod location;
pub mod path;
pub mod records;

pub use backend::{Attributes, Backend, LocalBackend};
pub use directory::DirectoryPath;
pub use error::{Error, Result};
pub use file::{COMPARE_CHUNK_SIZE, FilePath};
pub use filesystem::FileSystem;
pub use io::WriteOptions;
pub use kind::Kind;
pub use location::Location;
pub use path::{Classified, ExistingPath, NonExistingPath, Path};
pub use records::{Lines, Records};

//! Whole-collection persistence for pathkit
//!
//! A [`PersistenceService`] keeps one `Vec<T>` in memory and mirrors it to a
//! single archive file inside a [`DirectoryPath`](pathkit_fs::DirectoryPath),
//! encoded through [`pathkit_archive::ArchiveCodec`].
//!
//! ```rust,no_run
//! use pathkit_fs::{FileSystem, Location};
//! use pathkit_store::{Persistable, PersistenceService};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Point { x: i32, y: i32 }
//! impl Persistable for Point {
//!     const TYPE_NAME: &'static str = "Point";
//! }
//!
//! # fn main() -> pathkit_store::Result<()> {
//! let fs = FileSystem::local();
//! let dir = fs.create_directory_if_not_exists(&Location::new("/tmp/points"))?;
//! let mut points = PersistenceService::<Point>::open(dir)?;
//! points.push(Point { x: 1, y: 2 });
//! points.save()?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
pub mod logging;
mod persistable;
mod service;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use persistable::{Identifiable, Persistable};
pub use service::PersistenceService;

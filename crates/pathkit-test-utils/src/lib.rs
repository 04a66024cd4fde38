//! Shared test fixtures for the pathkit workspace.
//!
//! This crate is a dev-dependency only and is never published. It depends
//! on nothing but `tempfile`, so any pathkit crate can use it without
//! pulling a second copy of itself into its own test build.
//!
//! # Modules
//!
//! - [`dir`] — [`TestDir`] builder for on-disk scenarios

pub mod dir;

pub use dir::TestDir;

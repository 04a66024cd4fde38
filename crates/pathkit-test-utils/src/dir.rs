//! [`TestDir`] builder for filesystem test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory with helpers for seeding and asserting on content.
///
/// # Example
///
/// ```rust,no_run
/// use pathkit_test_utils::TestDir;
///
/// let dir = TestDir::new().with_file("x.txt", "hi").with_dir("sub");
/// dir.assert_file_eq("x.txt", "hi");
/// dir.assert_is_dir("sub");
/// ```
pub struct TestDir {
    temp_dir: TempDir,
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the root.
    pub fn join(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write a file (creating parents) and return `self` for chaining.
    pub fn with_file(self, relative: &str, content: impl AsRef<[u8]>) -> Self {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        self
    }

    /// Create a directory (and parents) and return `self` for chaining.
    pub fn with_dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.join(relative)).unwrap();
        self
    }

    /// Read a file inside the root as bytes.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, relative: &str) -> Vec<u8> {
        let path = self.join(relative);
        fs::read(&path).unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that the file at `relative` holds exactly `expected`.
    pub fn assert_file_eq(&self, relative: &str, expected: impl AsRef<[u8]>) {
        let actual = self.read(relative);
        assert_eq!(
            actual,
            expected.as_ref(),
            "File {} does not hold the expected bytes.\nActual (lossy): {}",
            relative,
            String::from_utf8_lossy(&actual)
        );
    }

    /// Assert that `relative` is a directory.
    pub fn assert_is_dir(&self, relative: &str) {
        let path = self.join(relative);
        assert!(path.is_dir(), "Expected directory: {}", path.display());
    }

    /// Assert that nothing exists at `relative` (a dangling symlink counts
    /// as nothing).
    pub fn assert_missing(&self, relative: &str) {
        let path = self.join(relative);
        assert!(!path.exists(), "Expected nothing at: {}", path.display());
    }

    /// Names of the immediate children, sorted.
    pub fn entries(&self, relative: &str) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.join(relative))
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

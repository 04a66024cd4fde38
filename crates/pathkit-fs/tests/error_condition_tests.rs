//! Tests for error handling under adverse filesystem conditions

use pathkit_fs::{Error, FileSystem, Location, WriteOptions};
use tempfile::tempdir;

#[test]
fn reading_a_deleted_file_fails_with_not_found() {
    let dir = tempdir().unwrap();
    let fs = FileSystem::local();
    let file = fs
        .create_file(
            &Location::new(dir.path().join("soon_gone.txt")),
            b"x",
            false,
            &WriteOptions::default(),
        )
        .unwrap();

    std::fs::remove_file(file.location().to_native()).unwrap();

    // The typed value is stale; the OS is the authority
    assert!(matches!(file.contents(), Err(Error::NotFound { .. })));
    assert!(file.file().is_none());
}

#[test]
fn create_file_through_missing_parents_succeeds() {
    let dir = tempdir().unwrap();
    let fs = FileSystem::local();
    let location = Location::new(dir.path().join("a").join("b").join("c.txt"));

    let file = fs
        .create_file(&location, b"deep content", false, &WriteOptions::default())
        .unwrap();

    assert_eq!(file.string().unwrap(), "deep content");
}

#[test]
fn create_file_under_a_file_fails() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("blocker"), "x").unwrap();
    let fs = FileSystem::local();

    let result = fs.create_file(
        &Location::new(dir.path().join("blocker").join("child.txt")),
        b"x",
        false,
        &WriteOptions::default(),
    );

    assert!(result.is_err());
}

#[test]
fn errors_name_the_attempted_location() {
    let dir = tempdir().unwrap();
    let fs = FileSystem::local();
    let location = Location::new(dir.path().join("missing.txt"));

    let err = fs.delete_item(&location).unwrap_err();

    assert_eq!(err.location(), &location);
    assert!(err.to_string().contains("missing.txt"));
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use std::fs::{self, Permissions};
    use std::os::unix::fs::PermissionsExt;

    fn is_root() -> bool {
        match std::process::Command::new("id").arg("-u").output() {
            Ok(output) => String::from_utf8_lossy(&output.stdout).trim() == "0",
            Err(_) => false,
        }
    }

    #[test]
    fn atomic_overwrite_in_readonly_directory_preserves_original() {
        if is_root() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }
        let dir = tempdir().unwrap();
        let parent = dir.path().join("parent");
        fs::create_dir(&parent).unwrap();
        let file_path = parent.join("existing.txt");
        fs::write(&file_path, "original").unwrap();
        fs::set_permissions(&parent, Permissions::from_mode(0o555)).unwrap();

        let result = FileSystem::local().create_file(
            &Location::new(&file_path),
            b"new content",
            true,
            &WriteOptions::default(),
        );

        let _ = fs::set_permissions(&parent, Permissions::from_mode(0o755));

        assert!(result.is_err(), "Writing when parent is read-only should fail");
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "original");
    }

    #[test]
    fn unreadable_file_reports_io_error() {
        if is_root() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("secret.txt");
        fs::write(&file_path, "secret content").unwrap();
        fs::set_permissions(&file_path, Permissions::from_mode(0o000)).unwrap();

        let file = FileSystem::local().path(&file_path).file().unwrap();
        let result = file.contents();

        let _ = fs::set_permissions(&file_path, Permissions::from_mode(0o644));

        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn failed_directory_copy_leaves_no_partial_destination() {
        if is_root() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }
        let dir = tempdir().unwrap();
        let source = dir.path().join("src");
        fs::create_dir_all(source.join("nested")).unwrap();
        fs::write(source.join("a.txt"), "a").unwrap();
        let locked = source.join("nested/locked.txt");
        fs::write(&locked, "locked").unwrap();
        fs::set_permissions(&locked, Permissions::from_mode(0o000)).unwrap();
        let destination = dir.path().join("dst");

        let result = FileSystem::local().copy_item(
            &Location::new(&source),
            &Location::new(&destination),
            false,
        );

        let _ = fs::set_permissions(&locked, Permissions::from_mode(0o644));

        assert!(matches!(result, Err(Error::Io { .. })));
        assert!(!destination.exists());
    }
}

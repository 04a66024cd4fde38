//! End-to-end flow across the pathkit crates
//!
//! Typed paths lay out a project directory, a persistence service stores a
//! collection inside it, and the archive is then backed up, compared and
//! moved using the same typed paths.

use pathkit_archive::{ArchiveCodec, FnTransform};
use pathkit_fs::{Classified, FileSystem, Kind, Location, WriteOptions};
use pathkit_store::{Identifiable, Persistable, PersistenceService};
use pathkit_test_utils::TestDir;
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Remote {
    id: Uuid,
    name: String,
    url: String,
}

impl Persistable for Remote {
    const TYPE_NAME: &'static str = "Remote";
}

impl Identifiable for Remote {
    type Id = Uuid;

    fn id(&self) -> Uuid {
        self.id
    }
}

fn remote(name: &str) -> Remote {
    Remote {
        id: Uuid::new_v4(),
        name: name.to_string(),
        url: format!("https://example.com/{name}.git"),
    }
}

#[test]
fn store_backup_and_restore() {
    let temp = TestDir::new();
    let fs = FileSystem::local();
    let root = fs
        .create_directory_if_not_exists(&Location::new(temp.root()))
        .unwrap();

    let state = root.subdirectory("state").unwrap();
    let mut remotes = PersistenceService::<Remote>::open(state.clone()).unwrap();
    let origin = remote("origin");
    remotes.add(origin.clone()).unwrap();
    remotes.add(remote("upstream")).unwrap();

    let archive = remotes.archive_path().file().expect("archive was saved");
    assert_eq!(archive.name(), Some("remotes.plist"));

    let backup_dir = root.subdirectory("backup").unwrap();
    let backup = archive
        .copy_to(backup_dir.file_named("remotes.plist").location(), false)
        .unwrap();
    assert!(archive.is_identical(&backup).unwrap());
    assert_eq!(archive.checksum().unwrap(), backup.checksum().unwrap());

    remotes.delete(&origin.id).unwrap();
    assert!(!archive.is_identical(&backup).unwrap());

    backup.move_to(archive.location(), true).unwrap();
    assert_eq!(backup.revalidate().kind(), Kind::None);

    remotes.reload().unwrap();
    assert_eq!(remotes.len(), 2);
    assert_eq!(remotes.find(&origin.id), Some(&origin));
}

#[test]
fn listing_reflects_stored_collections() {
    let temp = TestDir::new().with_file("notes.txt", "unrelated");
    let fs = FileSystem::local();
    let root = fs.path(temp.root()).directory().unwrap();

    let mut remotes = PersistenceService::<Remote>::open(root.clone()).unwrap();
    remotes.push(remote("origin"));
    remotes.save().unwrap();

    let names: Vec<String> = root
        .contents()
        .unwrap()
        .iter()
        .filter_map(|entry| entry.path().name().map(str::to_string))
        .collect();
    assert_eq!(names, vec!["notes.txt", "remotes.plist"]);
}

#[test]
fn encrypted_archive_moves_like_any_file() {
    let temp = TestDir::new();
    let fs = FileSystem::local();
    let codec = ArchiveCodec::default().with_transform(FnTransform::new(
        |b| b.into_iter().rev().collect(),
        |b| b.into_iter().rev().collect(),
    ));

    let first = fs.create_directory_if_not_exists(&Location::new(temp.join("a"))).unwrap();
    let mut remotes =
        PersistenceService::<Remote>::with_codec(first.clone(), codec.clone()).unwrap();
    remotes.push(remote("origin"));
    remotes.save().unwrap();

    let second = first.move_to(temp.join("b"), false).unwrap();
    assert!(matches!(fs.resolve(temp.join("a")), Classified::None(_)));

    let moved = PersistenceService::<Remote>::with_codec(second, codec).unwrap();
    assert_eq!(moved.items(), remotes.items());
}

#[test]
fn archive_written_fast_reads_back() {
    let temp = TestDir::new();
    let fs = FileSystem::local();
    let dir = fs.path(temp.root()).directory().unwrap();
    let config = pathkit_store::StoreConfig {
        write: WriteOptions::fast(),
        ..Default::default()
    };

    let mut remotes = PersistenceService::<Remote>::with_config(dir.clone(), &config).unwrap();
    remotes.set_items(vec![remote("a"), remote("b"), remote("c")]);
    remotes.save().unwrap();

    let again = PersistenceService::<Remote>::with_config(dir, &config).unwrap();
    assert_eq!(again.items(), remotes.items());
}

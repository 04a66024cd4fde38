//! Walkthroughs of the documented behaviour of files and persisted collections

use pathkit_fs::{Error, FileSystem, Location, WriteOptions};
use pathkit_store::{Persistable, PersistenceService};
use pathkit_test_utils::TestDir;
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};

#[test]
fn add_file_then_overwrite() {
    let temp = TestDir::new();
    let fs = FileSystem::local();
    let tmp = fs.path(temp.root()).directory().unwrap();
    let options = WriteOptions::default();

    let x = tmp.add_file("x.txt", b"hi", false, &options).unwrap();
    assert_eq!(x.string().unwrap(), "hi");

    let err = tmp.add_file("x.txt", b"bye", false, &options).unwrap_err();
    assert!(matches!(err, Error::AlreadyExists { .. }));
    assert_eq!(x.string().unwrap(), "hi");

    let x = tmp.add_file("x.txt", b"bye", true, &options).unwrap();
    assert_eq!(x.string().unwrap(), "bye");
}

#[test]
fn move_onto_existing_file() {
    let temp = TestDir::new().with_file("a", "A").with_file("b", "B");
    let fs = FileSystem::local();
    let a = Location::new(temp.join("a"));
    let b = Location::new(temp.join("b"));

    let err = fs.move_item(&a, &b, false).unwrap_err();
    assert!(matches!(err, Error::AlreadyExists { .. }));
    temp.assert_file_eq("a", "A");
    temp.assert_file_eq("b", "B");

    fs.move_item(&a, &b, true).unwrap();
    temp.assert_file_eq("b", "A");
    temp.assert_missing("a");
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Point {
    x: i32,
    y: i32,
}

impl Persistable for Point {
    const TYPE_NAME: &'static str = "Point";
}

#[test]
fn fresh_service_then_new_instance() {
    let temp = TestDir::new();
    let fs = FileSystem::local();
    let dir = fs
        .create_directory_if_not_exists(&Location::new(temp.root()))
        .unwrap();

    let mut service = PersistenceService::<Point>::open(dir.clone()).unwrap();
    assert!(service.is_empty());

    service.push(Point { x: 1, y: 1 });
    service.push(Point { x: 2, y: 3 });
    service.save().unwrap();

    let fresh = PersistenceService::<Point>::open(dir).unwrap();
    assert_eq!(fresh.items(), &[Point { x: 1, y: 1 }, Point { x: 2, y: 3 }]);
}

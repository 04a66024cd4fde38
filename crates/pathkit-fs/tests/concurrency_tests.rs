//! Racing callers against the same location
//!
//! Classification and action are separate syscalls, so two callers can both
//! see "nothing there". Exclusive creation makes exactly one of them win.

use pathkit_fs::{Error, FileSystem, Location, WriteOptions};
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::tempdir;

#[test]
fn test_racing_exclusive_creates_have_one_winner() {
    let dir = tempdir().unwrap();
    let location = Arc::new(Location::new(dir.path().join("contended.txt")));
    let fs = FileSystem::local();

    let num_threads = 8;
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let location = Arc::clone(&location);
            let barrier = Arc::clone(&barrier);
            let fs = fs.clone();

            thread::spawn(move || {
                barrier.wait();
                let content = format!("thread{}", thread_id);
                fs.create_file(&location, content.as_bytes(), false, &WriteOptions::default())
                    .map(|_| ())
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("Thread should not panic"))
        .collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "Exactly one create should succeed: {results:?}");
    for result in results.iter().filter(|r| r.is_err()) {
        assert!(
            matches!(result, Err(Error::AlreadyExists { .. })),
            "Losers should see AlreadyExists, got {result:?}"
        );
    }

    let content = std::fs::read_to_string(location.to_native()).unwrap();
    assert!(content.starts_with("thread"));
}

#[test]
fn test_concurrent_overwrites_never_interleave() {
    let dir = tempdir().unwrap();
    let location = Arc::new(Location::new(dir.path().join("concurrent.txt")));
    let fs = FileSystem::local();
    fs.create_file(&location, b"seed", false, &WriteOptions::default())
        .unwrap();

    let num_threads = 6;
    let writes_per_thread = 10;
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let location = Arc::clone(&location);
            let barrier = Arc::clone(&barrier);
            let fs = fs.clone();

            thread::spawn(move || {
                barrier.wait();
                for i in 0..writes_per_thread {
                    let content = format!("thread{}:write{}\n", thread_id, i);
                    // A racing remove-then-create may lose; only whole writes matter
                    let _ = fs.create_file(
                        &location,
                        content.as_bytes(),
                        true,
                        &WriteOptions::default(),
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread should not panic");
    }

    let content = std::fs::read_to_string(location.to_native()).unwrap();
    assert!(
        content.starts_with("thread") && content.matches("thread").count() == 1,
        "Content should be exactly one complete write, got: {content:?}"
    );
}

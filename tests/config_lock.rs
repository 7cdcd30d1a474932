//! Concurrent writes serialized.

mod common;

use hostsman::config::{AppPaths, Config};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn concurrent_writes_serialized() {
    let dir = common::temp_home();
    let paths = AppPaths::for_test(dir.path());
    hostsman::store::ensure_dirs(&paths).unwrap();

    let barrier = Arc::new(Barrier::new(3));
    let paths1 = paths.clone();
    let paths2 = paths.clone();
    let b1 = Arc::clone(&barrier);
    let b2 = Arc::clone(&barrier);

    let t1 = thread::spawn(move || {
        b1.wait();
        let config = Config {
            max_backups: 5,
            ..Config::default()
        };
        config.save(&paths1).unwrap();
    });

    let t2 = thread::spawn(move || {
        b2.wait();
        let config = Config {
            max_backups: 7,
            ..Config::default()
        };
        config.save(&paths2).unwrap();
    });

    barrier.wait();
    t1.join().unwrap();
    t2.join().unwrap();

    let loaded = Config::load(&paths).unwrap();
    assert!(loaded.max_backups == 5 || loaded.max_backups == 7);
}

//! Independent archives can be rewritten from several threads at once.

use crate::common::*;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn parallel_removals_on_distinct_archives() {
    const THREADS: usize = 8;
    let repo = Arc::new(TestRepo::new());
    for i in 0..THREADS {
        repo.put_archive(
            &format!("batch/{}.tar.gz", i),
            &[("keep", b"k"), ("drop", b"d"), ("also-keep", b"kk")],
        );
    }

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let repo = Arc::clone(&repo);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                repo.remove(&format!("batch/{}.tar.gz", i), "drop")
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    for i in 0..THREADS {
        assert_eq!(
            names(&repo.inspect(&format!("batch/{}.tar.gz", i))),
            vec!["keep", "also-keep"]
        );
    }
    assert!(repo.staging_leftovers().is_empty());
}

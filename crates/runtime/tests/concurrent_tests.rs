//! Concurrent/Multi-threaded Tests for dynrpc-runtime
//!
//! These tests exercise `DelegateCell` under real thread interleavings:
//!
//! 1. **Linearizability** - a read that starts after `activate` returns never
//!    observes an older delegate
//! 2. **Racing activation** - readers racing a single activation only see the
//!    old delegate, the new delegate, or Unavailable
//! 3. **Non-blocking delegate calls** - a slow delegate call holds no lock
//!
//! ## Running These Tests
//!
//! ```bash
//! cargo test -p dynrpc-runtime --test concurrent_tests
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use dynrpc_runtime::{Code, DelegateCell};

// ============================================================================
// Test Helpers
// ============================================================================

trait Generation: Send + Sync {
    fn generation(&self) -> u64;
}

struct Tagged(u64);

impl Generation for Tagged {
    fn generation(&self) -> u64 {
        self.0
    }
}

fn tagged(generation: u64) -> Option<Arc<dyn Generation>> {
    Some(Arc::new(Tagged(generation)))
}

// ============================================================================
// SECTION 1: Linearizability
// ============================================================================

mod linearizability {
    use super::*;

    /// A single writer installs generations 1..=N in order and publishes each
    /// generation only after `activate` returned. Every reader snapshots the
    /// published generation first, then reads the cell: the delegate it sees
    /// must be at least that new.
    #[test]
    fn test_reads_after_activate_never_go_backwards() {
        const GENERATIONS: u64 = 2_000;
        const READERS: usize = 8;

        let cell: Arc<DelegateCell<dyn Generation>> = Arc::new(DelegateCell::new("Generation"));
        let published = Arc::new(AtomicU64::new(0));
        let done = Arc::new(AtomicBool::new(false));
        let barrier = Arc::new(Barrier::new(READERS + 1));

        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                let cell = Arc::clone(&cell);
                let published = Arc::clone(&published);
                let done = Arc::clone(&done);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let mut reads = 0u64;
                    while !done.load(Ordering::Acquire) {
                        let floor = published.load(Ordering::Acquire);
                        let seen = match cell.get() {
                            Ok(delegate) => delegate.generation(),
                            Err(status) => {
                                assert_eq!(status.code(), Code::Unavailable);
                                0
                            }
                        };
                        assert!(
                            seen >= floor,
                            "observed generation {} after {} was published",
                            seen,
                            floor
                        );
                        reads += 1;
                    }
                    reads
                })
            })
            .collect();

        barrier.wait();
        for generation in 1..=GENERATIONS {
            cell.activate(tagged(generation));
            published.store(generation, Ordering::Release);
        }
        done.store(true, Ordering::Release);

        let total: u64 = readers.into_iter().map(|h| h.join().unwrap()).sum();
        assert!(total > 0);
        assert_eq!(cell.get().ok().unwrap().generation(), GENERATIONS);
    }
}

// ============================================================================
// SECTION 2: Racing Activation
// ============================================================================

mod racing_activation {
    use super::*;

    /// N readers race the first-ever activation: each sees Unavailable or the
    /// installed delegate, nothing else.
    #[test]
    fn test_first_activation_race() {
        const READERS: usize = 16;

        let cell: Arc<DelegateCell<dyn Generation>> = Arc::new(DelegateCell::new("Generation"));
        let barrier = Arc::new(Barrier::new(READERS + 1));
        let unavailable = Arc::new(AtomicUsize::new(0));
        let bound = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..READERS)
            .map(|_| {
                let cell = Arc::clone(&cell);
                let barrier = Arc::clone(&barrier);
                let unavailable = Arc::clone(&unavailable);
                let bound = Arc::clone(&bound);
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..500 {
                        match cell.get() {
                            Ok(delegate) => {
                                assert_eq!(delegate.generation(), 7);
                                bound.fetch_add(1, Ordering::Relaxed);
                            }
                            Err(status) => {
                                assert!(status.is_stub_unavailable());
                                unavailable.fetch_add(1, Ordering::Relaxed);
                            }
                        }
                    }
                })
            })
            .collect();

        barrier.wait();
        cell.activate(tagged(7));

        for handle in handles {
            handle.join().unwrap();
        }

        let total = unavailable.load(Ordering::Relaxed) + bound.load(Ordering::Relaxed);
        assert_eq!(total, READERS * 500);
        assert_eq!(cell.get().ok().unwrap().generation(), 7);
    }

    /// Readers racing a swap from generation 1 to generation 2 only ever see
    /// one of the two.
    #[test]
    fn test_swap_race_sees_old_or_new() {
        const READERS: usize = 16;

        let cell: Arc<DelegateCell<dyn Generation>> = Arc::new(DelegateCell::new("Generation"));
        cell.activate(tagged(1));
        let barrier = Arc::new(Barrier::new(READERS + 1));

        let handles: Vec<_> = (0..READERS)
            .map(|_| {
                let cell = Arc::clone(&cell);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..500 {
                        let generation = cell.get().ok().unwrap().generation();
                        assert!(generation == 1 || generation == 2);
                    }
                })
            })
            .collect();

        barrier.wait();
        cell.activate(tagged(2));

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cell.get().ok().unwrap().generation(), 2);
    }
}

// ============================================================================
// SECTION 3: Delegate Calls Hold No Lock
// ============================================================================

mod lock_scope {
    use super::*;

    trait Blocking: Send + Sync {
        fn call(&self);
    }

    struct Gate {
        entered: mpsc::SyncSender<()>,
        release: parking_lot::Mutex<mpsc::Receiver<()>>,
    }

    impl Blocking for Gate {
        fn call(&self) {
            self.entered.send(()).unwrap();
            self.release.lock().recv().unwrap();
        }
    }

    struct Noop;

    impl Blocking for Noop {
        fn call(&self) {}
    }

    /// While one call is parked inside the delegate, activation and other
    /// reads still complete.
    #[test]
    fn test_slow_delegate_does_not_block_activation() {
        let (entered_tx, entered_rx) = mpsc::sync_channel(1);
        let (release_tx, release_rx) = mpsc::channel();

        let cell: Arc<DelegateCell<dyn Blocking>> = Arc::new(DelegateCell::new("Blocking"));
        cell.activate(Some(Arc::new(Gate {
            entered: entered_tx,
            release: parking_lot::Mutex::new(release_rx),
        })));

        let caller = {
            let cell = Arc::clone(&cell);
            thread::spawn(move || cell.get().ok().unwrap().call())
        };
        entered_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("delegate was never entered");

        // The parked call holds no lock, so these complete immediately.
        cell.activate(Some(Arc::new(Noop)));
        assert!(cell.is_bound());
        cell.get().ok().unwrap().call();

        release_tx.send(()).unwrap();
        caller.join().unwrap();
    }
}

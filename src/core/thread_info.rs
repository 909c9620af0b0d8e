//! Per-thread and process-wide facts stamped onto every event.
//!
//! Thread ids are small integers handed out on first use, so they stay
//! stable for the lifetime of a thread and readable in log output.

use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

static NEXT_THREAD_ID: AtomicU32 = AtomicU32::new(1);
static PROCESS_START: OnceLock<Instant> = OnceLock::new();

const UNNAMED_THREAD: &str = "unnamed";

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: Cell<u32> = const { Cell::new(0) };
    static THREAD_NAME_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static FIBER_ID: Cell<u32> = const { Cell::new(0) };
}

/// Numeric id of the calling thread, assigned on first access
pub fn thread_id() -> u32 {
    THREAD_ID_CACHE.with(|cache| {
        if cache.get() == 0 {
            cache.set(NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed));
        }
        cache.get()
    })
}

/// Name of the calling thread, or `"unnamed"`
pub fn thread_name() -> String {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| {
                std::thread::current()
                    .name()
                    .unwrap_or(UNNAMED_THREAD)
                    .to_string()
            })
            .clone()
    })
}

/// Fiber (task) id of the calling thread; 0 unless a scheduler set one
pub fn fiber_id() -> u32 {
    FIBER_ID.with(Cell::get)
}

/// Record the fiber (task) currently running on this thread
pub fn set_fiber_id(id: u32) {
    FIBER_ID.with(|cell| cell.set(id));
}

/// Milliseconds since the logging subsystem was first used
pub fn elapsed_millis() -> u64 {
    let start = PROCESS_START.get_or_init(Instant::now);
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Pin the elapsed-time origin to now, if nothing has pinned it yet
pub(crate) fn mark_start() {
    PROCESS_START.get_or_init(Instant::now);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_id_is_stable_per_thread() {
        let first = thread_id();
        assert_ne!(first, 0);
        assert_eq!(first, thread_id());

        let other = std::thread::spawn(thread_id).join().expect("thread panicked");
        assert_ne!(first, other);
    }

    #[test]
    fn test_thread_name() {
        let name = std::thread::Builder::new()
            .name("worker-7".to_string())
            .spawn(thread_name)
            .expect("spawn")
            .join()
            .expect("thread panicked");
        assert_eq!(name, "worker-7");
    }

    #[test]
    fn test_fiber_id_is_thread_local() {
        set_fiber_id(42);
        assert_eq!(fiber_id(), 42);

        let other = std::thread::spawn(fiber_id).join().expect("thread panicked");
        assert_eq!(other, 0);
    }

    #[test]
    fn test_elapsed_is_monotonic() {
        let a = elapsed_millis();
        let b = elapsed_millis();
        assert!(b >= a);
    }
}

//! Per-thread state that can be reset for every thread at once
//!
//! Platform thread-locals cannot be reset from another thread, and visiting
//! live threads misses the ones that already exited. `ThreadScoped` instead
//! keeps one slot per `ThreadId` in a sharded map, tagged with the generation
//! it was initialised in. Resetting for all threads swaps the initializer and
//! bumps the generation; any slot from an older generation is re-initialised
//! on its next access.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, ThreadId};

use dashmap::DashMap;
use parking_lot::RwLock;

type Initializer<T> = Arc<dyn Fn() -> T + Send + Sync>;

struct Slot<T> {
    generation: u64,
    value: T,
}

pub(crate) struct ThreadScoped<T> {
    slots: DashMap<ThreadId, Slot<T>>,
    init: RwLock<Initializer<T>>,
    generation: AtomicU64,
}

impl<T: Send + 'static> ThreadScoped<T> {
    pub(crate) fn new(init: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            slots: DashMap::new(),
            init: RwLock::new(Arc::new(init)),
            generation: AtomicU64::new(0),
        }
    }

    /// Run `f` against the calling thread's value, initialising it if needed
    ///
    /// `f` must not re-enter this same `ThreadScoped`.
    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        // Generation is read before the initializer; reset_all writes them in
        // the opposite order, so a stale pairing is always re-initialised.
        let generation = self.generation.load(Ordering::Acquire);
        let init = self.init.read().clone();

        let mut slot = self
            .slots
            .entry(thread::current().id())
            .or_insert_with(|| Slot {
                generation,
                value: init(),
            });
        if slot.generation != generation {
            slot.generation = generation;
            slot.value = init();
        }
        f(&mut slot.value)
    }

    /// Clone of the calling thread's value
    ///
    /// A current slot is read under a shared guard; only a missing or stale
    /// slot takes the write path.
    pub(crate) fn get(&self) -> T
    where
        T: Clone,
    {
        let generation = self.generation.load(Ordering::Acquire);
        if let Some(slot) = self.slots.get(&thread::current().id()) {
            if slot.generation == generation {
                return slot.value.clone();
            }
        }
        self.with(|value| value.clone())
    }

    pub(crate) fn set(&self, value: T) {
        self.with(|slot| *slot = value);
    }

    /// Drop the calling thread's value; the next access re-initialises it
    pub(crate) fn remove(&self) {
        self.slots.remove(&thread::current().id());
    }

    /// Reset every thread, alive or not, to the current initializer
    pub(crate) fn reset_all(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.slots.clear();
    }

    /// Replace the initializer and reset every thread to it
    pub(crate) fn reset_all_with(&self, init: impl Fn() -> T + Send + Sync + 'static) {
        *self.init.write() = Arc::new(init);
        self.reset_all();
    }

    #[cfg(test)]
    fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_init_per_thread() {
        let scoped = ThreadScoped::new(Vec::<u32>::new);
        scoped.with(|v| v.push(1));
        assert_eq!(scoped.get(), vec![1]);

        let other = thread::scope(|s| s.spawn(|| scoped.get()).join().unwrap());
        assert!(other.is_empty());
        assert_eq!(scoped.get(), vec![1]);
    }

    #[test]
    fn test_remove_only_affects_current_thread() {
        let scoped = ThreadScoped::new(|| 0u32);
        scoped.set(5);

        thread::scope(|s| {
            s.spawn(|| {
                scoped.set(7);
                scoped.remove();
                assert_eq!(scoped.get(), 0);
            })
            .join()
            .unwrap();
        });

        assert_eq!(scoped.get(), 5);
    }

    #[test]
    fn test_reset_all_reaches_exited_threads() {
        let scoped = ThreadScoped::new(|| 0u32);
        thread::scope(|s| {
            s.spawn(|| scoped.set(9)).join().unwrap();
        });
        scoped.set(3);
        assert_eq!(scoped.slot_count(), 2);

        scoped.reset_all();

        assert_eq!(scoped.slot_count(), 0);
        assert_eq!(scoped.get(), 0);
    }

    #[test]
    fn test_reset_all_with_changes_default() {
        let scoped = ThreadScoped::new(|| 'a');
        scoped.set('z');
        scoped.reset_all_with(|| 'b');
        assert_eq!(scoped.get(), 'b');

        scoped.set('c');
        scoped.remove();
        assert_eq!(scoped.get(), 'b');

        let other = thread::scope(|s| s.spawn(|| scoped.get()).join().unwrap());
        assert_eq!(other, 'b');
    }

    #[test]
    fn test_concurrent_reads_and_writes_stay_per_thread() {
        let scoped = ThreadScoped::new(Vec::<usize>::new);
        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for i in 0..200 {
                        scoped.with(|v| v.push(i));
                        assert_eq!(scoped.get().len(), i + 1);
                    }
                });
            }
        });
        assert_eq!(scoped.slot_count(), 8);
        assert!(scoped.get().is_empty());
    }

    #[test]
    fn test_get_reuses_current_slot() {
        let scoped = ThreadScoped::new(|| 0u32);
        scoped.set(4);
        assert_eq!(scoped.get(), 4);
        assert_eq!(scoped.get(), 4);
        assert_eq!(scoped.slot_count(), 1);
    }

    #[test]
    fn test_stale_generation_is_reinitialised() {
        let scoped = ThreadScoped::new(|| 1u32);
        scoped.set(10);
        // Simulate a slot written by a thread that raced with reset_all.
        scoped.generation.fetch_add(1, Ordering::AcqRel);
        assert_eq!(scoped.get(), 1);
    }
}

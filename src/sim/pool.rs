//! Fixed-capacity projectile pool
//!
//! Projectiles spawn and despawn every frame during play; pooling keeps
//! allocation off that path and bounds worst-case entity counts. The backing
//! storage is created once at construction and never grows or shrinks.

/// Types that can be recycled through a [`Pool`]
pub trait Poolable: Default {
    /// Restore the instance to its freshly-constructed value
    fn reset(&mut self);
}

#[derive(Debug, Clone)]
struct Slot<T> {
    item: T,
    active: bool,
}

/// Pool of exactly `capacity` reusable instances tagged active/inactive
///
/// Iteration only ever visits active slots, in ascending slot order, so
/// update/collision/render passes see a deterministic sequence within a
/// frame. A released slot keeps its stale contents until the next `acquire`
/// re-applies [`Poolable::reset`].
#[derive(Debug, Clone)]
pub struct Pool<T: Poolable> {
    slots: Vec<Slot<T>>,
}

impl<T: Poolable> Pool<T> {
    /// Allocate `capacity` default-constructed instances, all inactive
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity)
                .map(|_| Slot {
                    item: T::default(),
                    active: false,
                })
                .collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    /// Claim an inactive slot, reset it, and hand it out
    ///
    /// Returns `None` when every slot is active. Callers treat that as
    /// "cannot spawn now" and skip the spawn; it is never an error.
    pub fn acquire(&mut self) -> Option<&mut T> {
        let slot = self.slots.iter_mut().find(|s| !s.active)?;
        slot.active = true;
        slot.item.reset();
        Some(&mut slot.item)
    }

    /// Return a slot to the pool; its contents are left as-is until reuse
    pub fn release(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.active = false;
        }
    }

    /// Active item at `index`, if any
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots
            .get(index)
            .filter(|s| s.active)
            .map(|s| &s.item)
    }

    /// Active entries with their slot indices, in slot order
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, s)| (i, &s.item))
    }

    /// Mutable view over active entries, in slot order
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.active)
            .map(|(i, s)| (i, &mut s.item))
    }

    /// Deactivate every slot (teardown / level reset)
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Probe {
        value: u32,
    }

    impl Default for Probe {
        fn default() -> Self {
            Self { value: 7 }
        }
    }

    impl Poolable for Probe {
        fn reset(&mut self) {
            self.value = 7;
        }
    }

    #[test]
    fn acquire_up_to_capacity_then_fails() {
        let mut pool: Pool<Probe> = Pool::new(5);
        for i in 0..5 {
            let probe = pool.acquire().expect("slot available");
            probe.value = i;
        }
        assert_eq!(pool.active_count(), 5);
        assert!(pool.acquire().is_none());
        // The failed acquire must not have touched any live entry
        let values: Vec<u32> = pool.iter_active().map(|(_, p)| p.value).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn release_then_acquire_yields_reset_values() {
        let mut pool: Pool<Probe> = Pool::new(2);
        pool.acquire().unwrap().value = 99;
        pool.release(0);
        let probe = pool.acquire().unwrap();
        assert_eq!(*probe, Probe::default());
    }

    #[test]
    fn iteration_skips_inactive_and_stays_in_slot_order() {
        let mut pool: Pool<Probe> = Pool::new(4);
        for i in 0..4 {
            pool.acquire().unwrap().value = i;
        }
        pool.release(1);
        pool.release(3);
        let indices: Vec<usize> = pool.iter_active().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn release_out_of_range_is_a_no_op() {
        let mut pool: Pool<Probe> = Pool::new(1);
        pool.acquire().unwrap();
        pool.release(10);
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn clear_deactivates_everything() {
        let mut pool: Pool<Probe> = Pool::new(3);
        pool.acquire().unwrap();
        pool.acquire().unwrap();
        pool.clear();
        assert_eq!(pool.active_count(), 0);
        assert!(pool.iter_active().next().is_none());
    }

    proptest! {
        /// Under any interleaving of acquires and releases the active count
        /// never exceeds capacity and the capacity never changes.
        #[test]
        fn active_count_is_bounded(ops in proptest::collection::vec(0usize..12, 0..128)) {
            let mut pool: Pool<Probe> = Pool::new(6);
            for op in ops {
                if op < 6 {
                    pool.release(op);
                } else {
                    let _ = pool.acquire();
                }
                prop_assert!(pool.active_count() <= pool.capacity());
                prop_assert_eq!(pool.capacity(), 6);
            }
        }
    }
}

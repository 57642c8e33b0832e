use std::rc::Rc;
use tracing::trace;

/// Single-slot cache: keeps the last value and the inputs it was built from.
///
/// A lookup with equal inputs hands back the cached `Rc`; anything else
/// recomputes and replaces the slot.
#[derive(Debug)]
pub struct Memo<K, V> {
    name: &'static str,
    slot: Option<(K, Rc<V>)>,
    misses: u64,
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: None,
            misses: 0,
        }
    }

    pub fn get_or_compute<F>(&mut self, key: K, compute: F) -> Rc<V>
    where
        F: FnOnce() -> V,
    {
        if let Some((cached, value)) = &self.slot {
            if *cached == key {
                return Rc::clone(value);
            }
        }
        self.misses += 1;
        trace!(selector = self.name, misses = self.misses, "recompute");
        let value = Rc::new(compute());
        self.slot = Some((key, Rc::clone(&value)));
        value
    }

    /// How many times the value had to be recomputed.
    #[cfg(test)]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

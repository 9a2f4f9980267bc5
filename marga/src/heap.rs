//! Fixed-capacity binary min-heap with decrease-key.
//!
//! Elements are `(id, key)` pairs. `id` is a dense identity in
//! `0..capacity` (the planner uses cell indices); `slot_of[id]` tracks where
//! each member currently sits in the heap so membership tests and key updates
//! need no search.

const NOT_QUEUED: usize = usize::MAX;

/// Indexed priority queue: smallest key first.
#[derive(Clone, Debug)]
pub struct IndexedPriorityQueue<K> {
    heap: Vec<(usize, K)>,
    slot_of: Vec<usize>,
}

impl<K: Ord + Copy> IndexedPriorityQueue<K> {
    /// Create a queue for ids in `0..capacity`
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            slot_of: vec![NOT_QUEUED; capacity],
        }
    }

    /// Maximum number of distinct ids
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slot_of.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Is `id` currently queued?
    #[inline]
    pub fn contains(&self, id: usize) -> bool {
        self.slot_of.get(id).is_some_and(|&s| s != NOT_QUEUED)
    }

    /// Current key of a queued id
    #[inline]
    pub fn key_of(&self, id: usize) -> Option<K> {
        if self.contains(id) {
            Some(self.heap[self.slot_of[id]].1)
        } else {
            None
        }
    }

    /// Smallest element without removing it
    #[inline]
    pub fn peek_min(&self) -> Option<(usize, K)> {
        self.heap.first().copied()
    }

    /// Add a new element.
    ///
    /// # Panics
    /// If `id >= capacity()` or `id` is already queued.
    pub fn insert(&mut self, id: usize, key: K) {
        assert!(
            id < self.capacity(),
            "heap capacity exceeded: id {} >= capacity {}",
            id,
            self.capacity()
        );
        assert!(!self.contains(id), "id {} is already queued", id);

        let slot = self.heap.len();
        self.heap.push((id, key));
        self.slot_of[id] = slot;
        self.sift_up(slot);
    }

    /// Remove and return the element with the smallest key
    pub fn extract_min(&mut self) -> Option<(usize, K)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let (id, key) = self.heap.pop()?;
        self.slot_of[id] = NOT_QUEUED;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((id, key))
    }

    /// Lower the key of a queued element.
    ///
    /// # Panics
    /// If `id` is not queued. A key larger than the current one is a caller
    /// bug caught in debug builds.
    pub fn decrease_key(&mut self, id: usize, key: K) {
        assert!(self.contains(id), "decrease_key on id {} which is not queued", id);
        let slot = self.slot_of[id];
        debug_assert!(key <= self.heap[slot].1, "decrease_key raised the key of {}", id);
        self.heap[slot].1 = key;
        self.sift_up(slot);
    }

    /// Remove every element, keeping the allocation
    pub fn clear(&mut self) {
        for &(id, _) in &self.heap {
            self.slot_of[id] = NOT_QUEUED;
        }
        self.heap.clear();
    }

    /// Check the heap order and the slot table. Test helper.
    pub fn is_consistent(&self) -> bool {
        let ordered = (1..self.heap.len()).all(|i| self.heap[(i - 1) / 2].1 <= self.heap[i].1);
        let slots = self
            .heap
            .iter()
            .enumerate()
            .all(|(slot, &(id, _))| self.slot_of[id] == slot);
        let members = self.slot_of.iter().filter(|&&s| s != NOT_QUEUED).count();
        ordered && slots && members == self.heap.len()
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slot_of[self.heap[a].0] = a;
        self.slot_of[self.heap[b].0] = b;
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].1 >= self.heap[parent].1 {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.heap[right].1 < self.heap[left].1 {
                right
            } else {
                left
            };
            if self.heap[child].1 >= self.heap[slot].1 {
                break;
            }
            self.swap(slot, child);
            slot = child;
        }
    }
}

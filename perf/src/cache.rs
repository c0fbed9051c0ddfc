use std::collections::HashMap;
use std::collections::VecDeque;
use std::hash::Hash;

/// Bounded cache with first-in-first-out eviction.
///
/// Eviction is by insertion order, not access order: a recently read
/// entry is still evicted if it is the oldest insert. Downstream
/// behavior depends on this exact (weaker-than-LRU) policy; do not
/// "fix" it to LRU.
pub struct FifoCache<K, V> {
    capacity: usize,
    map: HashMap<K, V>,
    order: VecDeque<K>,
    hits: u64,
    misses: u64,
}

impl<K: Eq + Hash + Clone, V> FifoCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            map: HashMap::new(),
            order: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Lookup; counts a hit or miss but never touches recency.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.map.get(key) {
            Some(v) => {
                self.hits += 1;
                Some(v)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Insert, evicting the single oldest entry first when at capacity.
    /// Re-inserting an existing key replaces the value in place and
    /// keeps its original insertion position.
    pub fn insert(&mut self, key: K, value: V) -> Option<K> {
        if self.map.contains_key(&key) {
            self.map.insert(key, value);
            return None;
        }
        let evicted = if self.map.len() >= self.capacity {
            self.order.pop_front().map(|oldest| {
                self.map.remove(&oldest);
                oldest
            })
        } else {
            None
        };
        self.order.push_back(key.clone());
        self.map.insert(key, value);
        evicted
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }
}

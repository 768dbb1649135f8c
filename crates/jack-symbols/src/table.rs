//! Open-addressing hash table with linear probing.
//!
//! Entries are never removed, so a probe that reaches an empty slot proves
//! the key is absent and no tombstones are needed. The table grows before it
//! can fill up, which keeps every probe sequence finite.

/// Capacity of a freshly created table. Prime, to spread the weak hash.
pub const INITIAL_CAPACITY: usize = 523;

/// Polynomial string hash: seed 7, multiplier 31, over the bytes of `name`,
/// in wrapping 32-bit signed arithmetic, made non-negative at the end.
pub fn hash_name(name: &str) -> usize {
    let mut hash: i32 = 7;
    for b in name.bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(b as i8));
    }
    hash.unsigned_abs() as usize
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

fn next_prime(mut n: usize) -> usize {
    while !is_prime(n) {
        n += 1;
    }
    n
}

/// Name-keyed map; re-inserting a key overwrites its value.
#[derive(Debug, Clone)]
pub struct ProbeTable<V> {
    slots: Vec<Option<(String, V)>>,
    len: usize,
}

impl<V> Default for ProbeTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ProbeTable<V> {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            len: 0,
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// First slot probed for `name`.
    pub fn home_slot(&self, name: &str) -> usize {
        hash_name(name) % self.capacity()
    }

    /// Walks from the home slot until an empty slot or one keyed by `name`.
    fn probe(&self, name: &str) -> usize {
        let mut i = self.home_slot(name);
        while let Some((key, _)) = &self.slots[i] {
            if key == name {
                break;
            }
            i = (i + 1) % self.capacity();
        }
        i
    }

    /// Slot currently holding `name`, if present.
    pub fn slot_of(&self, name: &str) -> Option<usize> {
        let i = self.probe(name);
        self.slots[i].as_ref().map(|_| i)
    }

    /// Inserts or overwrites; returns the previous value for `name`.
    pub fn insert(&mut self, name: &str, value: V) -> Option<V> {
        let i = self.probe(name);
        if let Some((_, old)) = &mut self.slots[i] {
            return Some(std::mem::replace(old, value));
        }
        if (self.len + 1) * 4 > self.capacity() * 3 {
            self.grow();
            let i = self.probe(name);
            self.slots[i] = Some((name.to_string(), value));
        } else {
            self.slots[i] = Some((name.to_string(), value));
        }
        self.len += 1;
        None
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        let i = self.probe(name);
        self.slots[i].as_ref().map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.slots
            .iter()
            .filter_map(|s| s.as_ref().map(|(k, v)| (k.as_str(), v)))
    }

    fn grow(&mut self) {
        let capacity = next_prime(self.capacity() * 2);
        let old = std::mem::replace(&mut self.slots, (0..capacity).map(|_| None).collect());
        for (key, value) in old.into_iter().flatten() {
            let i = self.probe(&key);
            self.slots[i] = Some((key, value));
        }
    }
}

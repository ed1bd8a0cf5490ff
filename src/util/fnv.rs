// Basic FNV-1a hash as described:
// https://en.wikipedia.org/wiki/Fowler%E2%80%93Noll%E2%80%93Vo_hash_function
//
// Subset construction hashes a great many small state sets. The default
// SipHash is noticeably slower for that workload, and none of the keys come
// from untrusted input.

use std::collections::HashMap as StdHashMap;
use std::hash::{self, BuildHasherDefault};

const PRIME: u64 = 1099511628211;
const INIT: u64 = 14695981039346656037;

pub(crate) type HashMap<K, V> = StdHashMap<K, V, BuildHasherDefault<Hasher>>;

/// Creates a new empty FNV keyed hash map.
pub(crate) fn new_map<K, V>() -> HashMap<K, V> {
    HashMap::default()
}

#[derive(Debug)]
pub(crate) struct Hasher(u64);

impl Default for Hasher {
    fn default() -> Hasher {
        Hasher(INIT)
    }
}

impl hash::Hasher for Hasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter() {
            self.0 ^= *byte as u64;
            self.0 = self.0.wrapping_mul(PRIME);
        }
    }

    fn write_u64(&mut self, n: u64) {
        self.write(&n.to_le_bytes());
    }

    fn write_usize(&mut self, n: usize) {
        self.write_u64(n as u64);
    }
}

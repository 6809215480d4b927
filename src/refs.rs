//! Link-reference table.
//!
//! A fixed 8-bucket chained hash keyed by a 32-bit fingerprint of the
//! lowercased label. Collisions are resolved by walking the chain and
//! comparing fingerprints only — no re-comparison of the label bytes. This
//! is a deliberate, bug-compatible port of the source behavior: colliding
//! labels alias each other's definition.

const BUCKETS: usize = 8;

/// A single `[label]: url "title"` definition.
#[derive(Debug, Clone)]
pub struct Reference {
    pub fingerprint: u32,
    pub url: Vec<u8>,
    pub title: Option<Vec<u8>>,
}

#[derive(Debug, Default)]
pub struct RefTable {
    buckets: [Vec<Reference>; BUCKETS],
}

/// `hash = (hash << 6) + (hash << 16) - hash + lower(b)`, the polynomial
/// rolling hash used to fingerprint a label.
pub fn fingerprint(label: &[u8]) -> u32 {
    let mut hash: u32 = 0;
    for &b in label {
        let lower = b.to_ascii_lowercase() as u32;
        hash = hash
            .wrapping_shl(6)
            .wrapping_add(hash.wrapping_shl(16))
            .wrapping_sub(hash)
            .wrapping_add(lower);
    }
    hash
}

impl RefTable {
    pub fn new() -> RefTable {
        RefTable {
            buckets: Default::default(),
        }
    }

    fn bucket_index(fp: u32) -> usize {
        (fp as usize) & (BUCKETS - 1)
    }

    /// Insert a reference, at the head of its bucket's chain (so the most
    /// recently defined label for a colliding fingerprint wins lookups,
    /// matching the source's insert-at-head behavior).
    pub fn insert(&mut self, label: &[u8], url: Vec<u8>, title: Option<Vec<u8>>) {
        let fp = fingerprint(label);
        let idx = Self::bucket_index(fp);
        if self.buckets[idx].iter().any(|r| r.fingerprint == fp) {
            log::debug!(
                "reference fingerprint {:#x} collides with an existing entry; \
                 chain walk compares fingerprints only",
                fp
            );
        }
        self.buckets[idx].insert(
            0,
            Reference {
                fingerprint: fp,
                url,
                title,
            },
        );
    }

    /// Look up a label, comparing fingerprints only.
    pub fn get(&self, label: &[u8]) -> Option<&Reference> {
        let fp = fingerprint(label);
        let idx = Self::bucket_index(fp);
        self.buckets[idx].iter().find(|r| r.fingerprint == fp)
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup() {
        let mut table = RefTable::new();
        table.insert(b"foo", b"http://example.com".to_vec(), Some(b"title".to_vec()));

        let found = table.get(b"FOO").expect("lookup is case-insensitive");
        assert_eq!(found.url, b"http://example.com");
        assert_eq!(found.title.as_deref(), Some(&b"title"[..]));
    }

    #[test]
    fn missing_label_returns_none() {
        let table = RefTable::new();
        assert!(table.get(b"nope").is_none());
    }

    #[test]
    fn clear_empties_all_buckets() {
        let mut table = RefTable::new();
        table.insert(b"a", b"u".to_vec(), None);
        table.clear();
        assert!(table.get(b"a").is_none());
    }
}

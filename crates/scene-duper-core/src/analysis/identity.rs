use ahash::AHashMap;

/// Outcome of showing a key to an [`IdentityIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation<V> {
    /// Key was new; the value is now its first-seen entry.
    First,
    /// Key was already indexed; carries the first-seen entry.
    Repeat(V),
}

/// Maps a key to the first value observed with it. Later observations of the
/// same key never replace the entry, so every repeat is paired against the
/// same original.
#[derive(Debug)]
pub struct IdentityIndex<V> {
    first_seen: AHashMap<String, V>,
}

impl<V: Copy> IdentityIndex<V> {
    pub fn new() -> Self {
        Self {
            first_seen: AHashMap::new(),
        }
    }

    pub fn observe(&mut self, key: &str, value: V) -> Observation<V> {
        if let Some(existing) = self.first_seen.get(key) {
            return Observation::Repeat(*existing);
        }
        self.first_seen.insert(key.to_string(), value);
        Observation::First
    }

    pub(crate) fn len(&self) -> usize {
        self.first_seen.len()
    }
}

impl<V: Copy> Default for IdentityIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Position of a file within the scanned snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRef {
    pub scene: usize,
    pub file: usize,
}

/// Fingerprint value → first file carrying it.
pub type ContentIndex = IdentityIndex<FileRef>;

/// Non-empty title → index of the first scene carrying it.
pub type TitleIndex = IdentityIndex<usize>;

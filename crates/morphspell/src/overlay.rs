// Runtime dictionary: session-scoped additions and removals
//
// The overlay never changes the base dictionary. An added entry either
// introduces a new stem or contributes extra flags to a base stem; a
// tombstone hides a word (and, for a stem, every form derived from it).

use hashbrown::HashMap;
use morphspell_aff::flags::FlagSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEntry {
    /// Accepted as written. `flags` are empty for a plain addition and
    /// copied from the example otherwise.
    Added { flags: FlagSet },
    Tombstone,
}

#[derive(Debug, Clone, Default)]
pub struct Overlay {
    entries: HashMap<String, OverlayEntry>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, word: &str) -> Option<&OverlayEntry> {
        self.entries.get(word)
    }

    /// Entry and its stored key.
    pub fn get_key_value(&self, word: &str) -> Option<(&str, &OverlayEntry)> {
        self.entries
            .get_key_value(word)
            .map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn is_tombstoned(&self, word: &str) -> bool {
        matches!(self.entries.get(word), Some(OverlayEntry::Tombstone))
    }

    /// Insert a plain addition, replacing a tombstone if there is one.
    pub fn add_plain(&mut self, word: &str) {
        self.entries.insert(
            word.to_string(),
            OverlayEntry::Added {
                flags: FlagSet::new(),
            },
        );
    }

    /// Insert or overwrite an addition carrying `flags`.
    pub fn add_with_flags(&mut self, word: &str, flags: FlagSet) {
        self.entries
            .insert(word.to_string(), OverlayEntry::Added { flags });
    }

    /// Drop an addition. Returns `false` if `word` has none.
    pub fn remove_added(&mut self, word: &str) -> bool {
        match self.entries.get(word) {
            Some(OverlayEntry::Added { .. }) => {
                self.entries.remove(word);
                true
            }
            _ => false,
        }
    }

    pub fn tombstone(&mut self, word: &str) {
        self.entries.insert(word.to_string(), OverlayEntry::Tombstone);
    }

    /// Added stems with their flags, sorted by stem.
    pub fn added(&self) -> Vec<(&str, &FlagSet)> {
        let mut added: Vec<(&str, &FlagSet)> = self
            .entries
            .iter()
            .filter_map(|(word, entry)| match entry {
                OverlayEntry::Added { flags, .. } => Some((word.as_str(), flags)),
                OverlayEntry::Tombstone => None,
            })
            .collect();
        added.sort_unstable_by(|a, b| a.0.cmp(b.0));
        added
    }

    /// Number of additions and tombstones.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

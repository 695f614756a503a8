// Hash-slot cache of accepted words

use std::hash::BuildHasher;

use hashbrown::DefaultHashBuilder;
use morphspell_core::enums::SpellResult;
use parking_lot::Mutex;

use crate::speller::Speller;

/// Number of slots before `size_param` scaling.
const BASE_SLOTS: usize = 1024;

/// Larger size parameters are clamped to this.
const MAX_SIZE_PARAM: usize = 10;

/// Longer words are looked up every time.
const MAX_CACHED_WORD_CHARS: usize = 32;

/// A fixed-size cache of spell results.
///
/// Only `SpellResult::Ok` is cached. Collisions overwrite the slot; there is
/// no chaining or LRU. The cache must be cleared whenever the runtime
/// dictionary changes.
pub struct SpellerCache {
    size_param: usize,
    hasher: DefaultHashBuilder,
    slots: Vec<Option<String>>,
}

impl SpellerCache {
    /// Create a cache with `1024 << size_param` slots.
    pub fn new(size_param: usize) -> Self {
        let size_param = size_param.min(MAX_SIZE_PARAM);
        Self {
            size_param,
            hasher: DefaultHashBuilder::default(),
            slots: vec![None; BASE_SLOTS << size_param],
        }
    }

    pub fn size_param(&self) -> usize {
        self.size_param
    }

    fn slot(&self, word: &str) -> usize {
        (self.hasher.hash_one(word) as usize) % self.slots.len()
    }

    fn cacheable(word: &str) -> bool {
        !word.is_empty() && word.chars().count() <= MAX_CACHED_WORD_CHARS
    }

    /// Cached result for `word`, if any.
    pub fn get(&self, word: &str) -> Option<SpellResult> {
        if !Self::cacheable(word) {
            return None;
        }
        match &self.slots[self.slot(word)] {
            Some(cached) if cached == word => Some(SpellResult::Ok),
            _ => None,
        }
    }

    /// Store a result. Anything other than `Ok` is ignored.
    pub fn set(&mut self, word: &str, result: SpellResult) {
        if result != SpellResult::Ok || !Self::cacheable(word) {
            return;
        }
        let slot = self.slot(word);
        self.slots[slot] = Some(word.to_string());
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }
}

/// Look up a word in the shared cache, calling the speller on a miss.
///
/// The lock is held for the read and the store only, so lookups on other
/// threads run while this one spells. Callers hold the overlay read lock
/// across the call, which keeps a mutation from clearing the cache between
/// the two.
pub fn spell_with_cache(
    cache: &Mutex<SpellerCache>,
    word: &str,
    speller: &dyn Speller,
) -> SpellResult {
    if let Some(result) = cache.lock().get(word) {
        return result;
    }
    let result = speller.spell(word);
    cache.lock().set(word, result);
    result
}

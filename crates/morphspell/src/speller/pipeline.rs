// Top-level spell check pipeline
//
//   length check -> exact lookup (cached) -> case-folded retries
//
// A forbidden result at any step is final.

use morphspell_core::case::case_variants;
use morphspell_core::enums::{MAX_WORD_CHARS, SpellResult};
use parking_lot::Mutex;

use crate::speller::Speller;
use crate::speller::cache::{SpellerCache, spell_with_cache};

/// Spell check options.
#[derive(Debug, Clone)]
pub struct SpellOptions {
    /// Longer words are always incorrect.
    pub max_word_chars: usize,
    /// Size parameter of the spell cache (`1024 << cache_size` slots).
    pub cache_size: usize,
}

impl Default for SpellOptions {
    fn default() -> Self {
        Self {
            max_word_chars: MAX_WORD_CHARS,
            cache_size: 0,
        }
    }
}

impl SpellOptions {
    /// Non-empty and at most `max_word_chars` long.
    pub fn accepts_length(&self, word: &str) -> bool {
        let nchars = word.chars().count();
        nchars > 0 && nchars <= self.max_word_chars
    }
}

/// Retry `word` in its case-folded variants after an exact lookup failed.
fn folded_spell(speller: &dyn Speller, word: &str) -> SpellResult {
    for variant in case_variants(word) {
        match speller.spell_folded(&variant) {
            SpellResult::Failed => {}
            result => return result,
        }
    }
    SpellResult::Failed
}

/// Top-level spell check entry point.
pub fn spell_check(
    word: &str,
    speller: &dyn Speller,
    cache: Option<&Mutex<SpellerCache>>,
    options: &SpellOptions,
) -> bool {
    if !options.accepts_length(word) {
        return false;
    }
    let exact = match cache {
        Some(cache) => spell_with_cache(cache, word, speller),
        None => speller.spell(word),
    };
    match exact {
        SpellResult::Ok => true,
        SpellResult::Forbidden => false,
        SpellResult::Failed => folded_spell(speller, word) == SpellResult::Ok,
    }
}

/// A speller that applies the case-folding retries of [`spell_check`].
///
/// Suggestion candidates are run through this so that "Walkd" can be
/// corrected to "Walked".
pub struct CaseFoldingSpeller<'a> {
    inner: &'a dyn Speller,
}

impl<'a> CaseFoldingSpeller<'a> {
    pub fn new(inner: &'a dyn Speller) -> Self {
        Self { inner }
    }
}

impl Speller for CaseFoldingSpeller<'_> {
    fn spell(&self, word: &str) -> SpellResult {
        match self.inner.spell(word) {
            SpellResult::Failed => folded_spell(self.inner, word),
            result => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    use crate::morphology::Lexicon;
    use crate::morphology::lexicon::tests::fixture;
    use crate::overlay::Overlay;
    use crate::speller::adapter::LexiconSpeller;

    /// Accepts "walk" exactly, forbids "wrong", keeps "NASA" case-sensitive.
    struct MockSpeller;

    impl Speller for MockSpeller {
        fn spell(&self, word: &str) -> SpellResult {
            match word {
                "walk" | "NASA" => SpellResult::Ok,
                "wrong" => SpellResult::Forbidden,
                _ => SpellResult::Failed,
            }
        }

        fn spell_folded(&self, word: &str) -> SpellResult {
            match word {
                "NASA" => SpellResult::Failed,
                _ => self.spell(word),
            }
        }
    }

    fn check(word: &str) -> bool {
        spell_check(word, &MockSpeller, None, &SpellOptions::default())
    }

    #[test]
    fn exact_and_folded() {
        assert!(check("walk"));
        assert!(check("Walk"));
        assert!(check("WALK"));
        assert!(check("NASA"));
        assert!(!check("Nasa"));
        assert!(!check("wALK"));
    }

    #[test]
    fn empty_and_over_long_words() {
        assert!(!check(""));
        let options = SpellOptions {
            max_word_chars: 3,
            ..SpellOptions::default()
        };
        assert!(!spell_check("walk", &MockSpeller, None, &options));
        let long = "a".repeat(MAX_WORD_CHARS + 1);
        assert!(!check(&long));
    }

    #[test]
    fn forbidden_is_final() {
        assert!(!check("wrong"));
        assert!(!check("Wrong"));
    }

    #[test]
    fn cache_is_consulted() {
        let cache = Mutex::new(SpellerCache::new(0));
        let options = SpellOptions::default();
        assert!(spell_check("walk", &MockSpeller, Some(&cache), &options));
        assert_eq!(cache.lock().get("walk"), Some(SpellResult::Ok));
        assert!(!spell_check("walkk", &MockSpeller, Some(&cache), &options));
        assert_eq!(cache.lock().get("walkk"), None);
    }

    /// Blocks in `spell` until `peers` calls are in flight at once, or gives
    /// up after a timeout.
    struct RendezvousSpeller {
        peers: usize,
        in_flight: AtomicUsize,
        most: AtomicUsize,
    }

    impl Speller for RendezvousSpeller {
        fn spell(&self, _word: &str) -> SpellResult {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.most.fetch_max(now, Ordering::SeqCst);
            let deadline = Instant::now() + Duration::from_secs(5);
            while self.most.load(Ordering::SeqCst) < self.peers && Instant::now() < deadline {
                std::thread::yield_now();
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            SpellResult::Failed
        }
    }

    #[test]
    fn cached_lookups_run_in_parallel() {
        let cache = Mutex::new(SpellerCache::new(0));
        let speller = RendezvousSpeller {
            peers: 4,
            in_flight: AtomicUsize::new(0),
            most: AtomicUsize::new(0),
        };
        let options = SpellOptions::default();
        std::thread::scope(|scope| {
            for _ in 0..speller.peers {
                scope.spawn(|| spell_check("walkk", &speller, Some(&cache), &options));
            }
        });
        assert_eq!(speller.most.load(Ordering::SeqCst), speller.peers);
    }

    #[test]
    fn case_folding_speller() {
        let folding = CaseFoldingSpeller::new(&MockSpeller);
        assert_eq!(folding.spell("Walk"), SpellResult::Ok);
        assert_eq!(folding.spell("Wrong"), SpellResult::Forbidden);
        assert_eq!(folding.spell("Nasa"), SpellResult::Failed);
    }

    #[test]
    fn lexicon_pipeline() {
        let (table, dic) = fixture();
        let overlay = Overlay::new();
        let speller = LexiconSpeller::new(Lexicon::new(&table, &dic, &overlay));
        let options = SpellOptions::default();
        for word in ["walked", "Walked", "WALKED", "Baking", "UNWALKING", "ok"] {
            assert!(spell_check(word, &speller, None, &options), "{word}");
        }
        for word in ["walkked", "OK", "Ok", "wrong", "Wrong", "pseudo", "piece"] {
            assert!(!spell_check(word, &speller, None, &options), "{word}");
        }
    }
}

// MorphspellHandle: top-level integration point.
//
// Owns the affix table, the base dictionary, the runtime overlay and the
// suggestion strategy. Lightweight views (Lexicon, LexiconSpeller) are
// built per call while the overlay lock is held, so the handle never
// borrows from itself.
//
// Lock order: overlay, then speller cache.

use std::path::Path;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use morphspell_aff::aff::AffixTable;
use morphspell_aff::dic::Dictionary;
use morphspell_aff::flags::FlagSet;
use morphspell_aff::{LoadError, LoadedDictionary, UnknownFlagError};
use morphspell_core::analysis::Analysis;
use morphspell_core::enums::{DEFAULT_MAX_SUGGESTIONS, OverlayStatus};

use crate::morphology::analyzer::stems;
use crate::morphology::generate::generate;
use crate::morphology::{Analyzer, Lexicon};
use crate::overlay::Overlay;
use crate::speller::adapter::LexiconSpeller;
use crate::speller::cache::SpellerCache;
use crate::speller::pipeline::{CaseFoldingSpeller, SpellOptions, spell_check};
use crate::suggestion::near_miss::FormSource;
use crate::suggestion::status::SuggestionStatus;
use crate::suggestion::strategy::{DEFAULT_MAX_COST, SuggestionStrategy, strategy_for_table};

/// Error type for MorphspellHandle construction failures.
#[derive(Debug, thiserror::Error)]
pub enum MorphspellError {
    /// The affix or dictionary file could not be read or parsed.
    #[error("failed to load dictionary: {0}")]
    Load(#[from] LoadError),
}

/// Top-level handle that owns a loaded dictionary and its runtime overlay.
///
/// All queries take `&self` and may run concurrently; overlay mutations
/// serialize behind a write lock.
pub struct MorphspellHandle {
    table: AffixTable,
    dictionary: Dictionary,

    /// Session additions and removals.
    overlay: RwLock<Overlay>,

    /// Exact-case results of `spell`. Cleared on every overlay mutation.
    speller_cache: Mutex<SpellerCache>,

    strategy: SuggestionStrategy,

    // -- Options --
    spell_options: SpellOptions,
    max_suggestions: usize,

    /// Dictionary lines skipped during loading.
    warnings: Vec<UnknownFlagError>,
}

impl MorphspellHandle {
    /// Load a `.dic` / `.aff` pair from disk.
    pub fn from_files(
        dic_path: impl AsRef<Path>,
        aff_path: impl AsRef<Path>,
    ) -> Result<Self, MorphspellError> {
        let loaded = morphspell_aff::load_from_files(dic_path, aff_path)?;
        Ok(Self::from_loaded(loaded))
    }

    /// Load a dictionary from the raw bytes of its `.dic` and `.aff` files.
    pub fn from_bytes(dic: &[u8], aff: &[u8]) -> Result<Self, MorphspellError> {
        let loaded = morphspell_aff::load_from_bytes(dic, aff)?;
        Ok(Self::from_loaded(loaded))
    }

    fn from_loaded(loaded: LoadedDictionary) -> Self {
        let LoadedDictionary {
            table,
            dictionary,
            warnings,
        } = loaded;
        let strategy = strategy_for_table(&table, &dictionary, DEFAULT_MAX_COST);
        let spell_options = SpellOptions::default();
        debug!(
            stems = dictionary.len(),
            generators = strategy.generator_count(),
            skipped = warnings.len(),
            "dictionary ready"
        );
        Self {
            speller_cache: Mutex::new(SpellerCache::new(spell_options.cache_size)),
            table,
            dictionary,
            overlay: RwLock::new(Overlay::new()),
            strategy,
            spell_options,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            warnings,
        }
    }

    fn lexicon<'a>(&'a self, overlay: &'a Overlay) -> Lexicon<'a> {
        Lexicon::new(&self.table, &self.dictionary, overlay)
    }

    /// Uncached spell check against `overlay`, used by the mutations.
    fn is_correct(&self, overlay: &Overlay, word: &str) -> bool {
        let speller = LexiconSpeller::new(self.lexicon(overlay));
        spell_check(word, &speller, None, &self.spell_options)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Encoding label declared by the affix file (`SET`), or the default
    /// `ISO8859-1` when it declares none.
    pub fn dictionary_encoding(&self) -> &str {
        &self.table.encoding
    }

    /// Check whether a word is correctly spelled.
    pub fn spell(&self, word: &str) -> bool {
        let word = self.table.strip_ignored(word);
        let overlay = self.overlay.read();
        let speller = LexiconSpeller::new(self.lexicon(&overlay));
        spell_check(&word, &speller, Some(&self.speller_cache), &self.spell_options)
    }

    /// Spelling suggestions for `word`, best first.
    ///
    /// Every suggestion is accepted by `spell`, differs from `word` and is
    /// at most two edits away from it.
    pub fn suggest(&self, word: &str) -> Vec<String> {
        let word = self.table.strip_ignored(word);
        if !self.spell_options.accepts_length(&word) {
            return Vec::new();
        }
        let word_chars: Vec<char> = word.chars().collect();

        let overlay = self.overlay.read();
        let lexicon = self.lexicon(&overlay);
        let base = LexiconSpeller::for_suggestions(lexicon);
        let speller = CaseFoldingSpeller::new(&base);

        // Collect 3x candidates, sort, then truncate.
        let mut status =
            SuggestionStatus::new(&word_chars, self.max_suggestions.saturating_mul(3));
        self.strategy
            .generate(&speller, Some(&lexicon as &dyn FormSource), &mut status);
        status.sort_suggestions();

        status
            .into_suggestions()
            .into_iter()
            .take(self.max_suggestions)
            .map(|s| s.word)
            .collect()
    }

    /// Morphological descriptions of `word`, one per derivation.
    pub fn analyze(&self, word: &str) -> Vec<String> {
        self.analyses(word)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Structured form of [`MorphspellHandle::analyze`].
    pub fn analyses(&self, word: &str) -> Vec<Analysis> {
        let word = self.table.strip_ignored(word);
        let overlay = self.overlay.read();
        self.lexicon(&overlay).analyze(&word)
    }

    /// Distinct stems of `word`.
    pub fn stem(&self, word: &str) -> Vec<String> {
        let word = self.table.strip_ignored(word);
        let overlay = self.overlay.read();
        stems(&self.lexicon(&overlay), &word)
    }

    /// Forms of `word`'s stems inflected like `example`.
    pub fn generate(&self, word: &str, example: &str) -> Vec<String> {
        let word = self.table.strip_ignored(word);
        let example = self.table.strip_ignored(example);
        let overlay = self.overlay.read();
        generate(&self.lexicon(&overlay), &word, &example)
    }

    // =========================================================================
    // Runtime dictionary
    // =========================================================================

    /// Accept `word` as written for the rest of the session.
    ///
    /// Empty words and words `spell` would reject for their length are
    /// refused with `NotFound`.
    pub fn add(&self, word: &str) -> OverlayStatus {
        let word = self.table.strip_ignored(word);
        if !self.spell_options.accepts_length(&word) {
            return OverlayStatus::NotFound;
        }
        let mut overlay = self.overlay.write();
        if self.is_correct(&overlay, &word) {
            return OverlayStatus::AlreadyPresent;
        }
        overlay.add_plain(&word);
        self.speller_cache.lock().clear();
        debug!(word = %word, overlay = overlay.len(), "added");
        OverlayStatus::Ok
    }

    /// Add `word` with the affix flags of `example`, so that it inflects
    /// the same way.
    pub fn add_with_affix(&self, word: &str, example: &str) -> OverlayStatus {
        let word = self.table.strip_ignored(word);
        let example = self.table.strip_ignored(example);
        if !self.spell_options.accepts_length(&word) {
            return OverlayStatus::NotFound;
        }
        let mut overlay = self.overlay.write();
        let Some(flags) = self.example_flags(&overlay, &example) else {
            return OverlayStatus::ExampleNotFound;
        };
        overlay.add_with_flags(&word, flags);
        self.speller_cache.lock().clear();
        debug!(word = %word, example = %example, overlay = overlay.len(), "added with affix");
        OverlayStatus::Ok
    }

    /// Flags of `example`'s exact homonym, or the union over the stems it
    /// resolves to.
    fn example_flags(&self, overlay: &Overlay, example: &str) -> Option<FlagSet> {
        let lexicon = self.lexicon(overlay);
        if let Some(homonym) = lexicon.homonym(example) {
            return Some(homonym.flags.into_owned());
        }
        let mut flags: Option<FlagSet> = None;
        for stem in stems(&lexicon, example) {
            if let Some(homonym) = lexicon.homonym(&stem) {
                flags
                    .get_or_insert_with(FlagSet::new)
                    .union_with(&homonym.flags);
            }
        }
        flags
    }

    /// Stop accepting `word` for the rest of the session.
    ///
    /// Only the spelling given is hidden: removing "Walk" while "walk" is
    /// stored leaves "walk" and "WALK" correct.
    pub fn remove(&self, word: &str) -> OverlayStatus {
        let word = self.table.strip_ignored(word);
        let mut overlay = self.overlay.write();
        if !self.is_correct(&overlay, &word) {
            return OverlayStatus::NotFound;
        }
        overlay.remove_added(&word);
        if self.is_correct(&overlay, &word) {
            overlay.tombstone(&word);
        }
        self.speller_cache.lock().clear();
        debug!(word = %word, overlay = overlay.len(), "removed");
        OverlayStatus::Ok
    }

    // =========================================================================
    // Options and metadata
    // =========================================================================

    /// Dictionary lines skipped during loading.
    pub fn load_warnings(&self) -> &[UnknownFlagError] {
        &self.warnings
    }

    /// Set the maximum number of suggestions to return.
    pub fn set_max_suggestions(&mut self, value: usize) {
        self.max_suggestions = value;
    }

    /// Set the spell-check budget of the edit generators.
    pub fn set_max_suggestion_cost(&mut self, value: usize) {
        self.strategy.set_max_cost(value);
    }

    /// Set the speller cache size (0 = default 1024 slots, each step
    /// doubles). Resets the cache.
    pub fn set_speller_cache_size(&mut self, size: usize) {
        self.spell_options.cache_size = size;
        *self.speller_cache.get_mut() = SpellerCache::new(size);
    }

    /// Library version string.
    pub fn get_version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

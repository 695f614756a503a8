// Spell checking module

pub mod adapter;
pub mod cache;
pub mod pipeline;

use morphspell_core::enums::SpellResult;

/// Trait for spell checkers.
///
/// `spell` tests the word exactly as written. `spell_folded` is used for
/// case-changed variants of the input and may reject entries that only
/// match in their original case.
pub trait Speller {
    fn spell(&self, word: &str) -> SpellResult;

    fn spell_folded(&self, word: &str) -> SpellResult {
        self.spell(word)
    }
}

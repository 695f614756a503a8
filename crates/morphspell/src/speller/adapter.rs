// Bridges the lexicon to the Speller interface

use morphspell_core::enums::SpellResult;

use crate::morphology::{Lexicon, LookupMode};
use crate::speller::Speller;

/// Spell checks by lexicon lookup.
///
/// With `suggesting` set, stems marked NOSUGGEST do not count, so the same
/// adapter serves as the candidate filter of the suggestion generators.
pub struct LexiconSpeller<'a> {
    lexicon: Lexicon<'a>,
    suggesting: bool,
}

impl<'a> LexiconSpeller<'a> {
    pub fn new(lexicon: Lexicon<'a>) -> Self {
        Self {
            lexicon,
            suggesting: false,
        }
    }

    /// Adapter that rejects NOSUGGEST stems.
    pub fn for_suggestions(lexicon: Lexicon<'a>) -> Self {
        Self {
            lexicon,
            suggesting: true,
        }
    }

    fn mode(&self, case_folded: bool) -> LookupMode {
        LookupMode {
            case_folded,
            suggesting: self.suggesting,
        }
    }
}

impl Speller for LexiconSpeller<'_> {
    fn spell(&self, word: &str) -> SpellResult {
        self.lexicon.lookup(word, self.mode(false))
    }

    fn spell_folded(&self, word: &str) -> SpellResult {
        self.lexicon.lookup(word, self.mode(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::lexicon::tests::fixture;
    use crate::overlay::Overlay;

    #[test]
    fn exact_lookup() {
        let (table, dic) = fixture();
        let overlay = Overlay::new();
        let speller = LexiconSpeller::new(Lexicon::new(&table, &dic, &overlay));
        assert_eq!(speller.spell("walked"), SpellResult::Ok);
        assert_eq!(speller.spell("Walked"), SpellResult::Failed);
        assert_eq!(speller.spell("wrong"), SpellResult::Forbidden);
        assert_eq!(speller.spell("walkk"), SpellResult::Failed);
    }

    #[test]
    fn folded_lookup_rejects_keep_case() {
        let (table, dic) = fixture();
        let overlay = Overlay::new();
        let speller = LexiconSpeller::new(Lexicon::new(&table, &dic, &overlay));
        assert_eq!(speller.spell("ok"), SpellResult::Ok);
        assert_eq!(speller.spell_folded("ok"), SpellResult::Failed);
        assert_eq!(speller.spell_folded("walk"), SpellResult::Ok);
    }

    #[test]
    fn suggestion_adapter_skips_no_suggest() {
        let (table, dic) = fixture();
        let overlay = Overlay::new();
        let lexicon = Lexicon::new(&table, &dic, &overlay);
        assert_eq!(LexiconSpeller::new(lexicon).spell("rare"), SpellResult::Ok);
        assert_eq!(
            LexiconSpeller::for_suggestions(lexicon).spell("rare"),
            SpellResult::Failed
        );
    }
}

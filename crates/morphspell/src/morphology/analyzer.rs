// Morphological analysis and stemming over lexicon derivations

use morphspell_aff::affix::AffixRef;
use morphspell_core::analysis::{Analysis, TAG_PART, TAG_PREFIX, TAG_STEM, TAG_SUFFIX};

use super::lexicon::Lexicon;
use super::{Analyzer, Derivation};

impl Analyzer for Lexicon<'_> {
    fn analyze(&self, word: &str) -> Vec<Analysis> {
        self.resolve(word)
            .iter()
            .map(|derivation| describe(self, derivation))
            .collect()
    }
}

/// Distinct stems of `word`, in derivation order.
pub fn stems(lexicon: &Lexicon<'_>, word: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for derivation in lexicon.resolve(word) {
        if !out.contains(&derivation.stem) {
            out.push(derivation.stem);
        }
    }
    out
}

fn describe(lexicon: &Lexicon<'_>, derivation: &Derivation) -> Analysis {
    let mut analysis = Analysis::new();
    if derivation.is_compound() {
        for part in &derivation.parts {
            analysis.push(TAG_PART, part.surface.as_str());
            analysis.append(describe(lexicon, part));
        }
        return analysis;
    }
    analysis.push(TAG_STEM, derivation.stem.as_str());
    analysis.extend_raw(derivation.morph.iter().map(String::as_str));
    push_affix(lexicon, &mut analysis, TAG_PREFIX, derivation.prefix);
    push_affix(lexicon, &mut analysis, TAG_SUFFIX, derivation.suffix);
    analysis
}

fn push_affix(lexicon: &Lexicon<'_>, analysis: &mut Analysis, tag: &str, aref: Option<AffixRef>) {
    let Some(aref) = aref else {
        return;
    };
    let table = lexicon.table();
    let (rule, entry) = table.entry(aref);
    analysis.push(tag, table.format_flag(rule.flag));
    analysis.extend_raw(entry.morph.iter().map(String::as_str));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::lexicon::tests::fixture;
    use crate::overlay::Overlay;
    use morphspell_aff::aff::AffixTable;
    use morphspell_aff::dic::Dictionary;

    fn rendered(lexicon: &Lexicon<'_>, word: &str) -> Vec<String> {
        lexicon
            .analyze(word)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn affixed_word() {
        let (table, dic) = fixture();
        let overlay = Overlay::new();
        let lex = Lexicon::new(&table, &dic, &overlay);
        assert_eq!(rendered(&lex, "walk"), vec!["st:walk po:verb"]);
        assert_eq!(rendered(&lex, "unwalked"), vec!["st:walk po:verb pfx:U sfx:V"]);
        let analyses = lex.analyze("walking");
        assert_eq!(analyses[0].stem(), Some("walk"));
        assert_eq!(analyses[0].get(TAG_SUFFIX), Some("V"));
    }

    #[test]
    fn affix_fields_follow_flag() {
        let aff = "SFX S Y 1\nSFX S 0 s . is:plural\n";
        let table = AffixTable::parse(aff).unwrap();
        let (dic, _) = Dictionary::parse("1\ncat/S po:noun\n", &table).unwrap();
        let overlay = Overlay::new();
        let lex = Lexicon::new(&table, &dic, &overlay);
        assert_eq!(rendered(&lex, "cats"), vec!["st:cat po:noun sfx:S is:plural"]);
    }

    #[test]
    fn compound_parts() {
        let aff = "COMPOUNDFLAG Y\nSFX S Y 1\nSFX S 0 s .\n";
        let table = AffixTable::parse(aff).unwrap();
        let (dic, _) = Dictionary::parse("2\nfoot/Y po:noun\nball/YS\n", &table).unwrap();
        let overlay = Overlay::new();
        let lex = Lexicon::new(&table, &dic, &overlay);
        assert_eq!(
            rendered(&lex, "footballs"),
            vec!["pa:foot st:foot po:noun pa:balls st:ball sfx:S"]
        );
        assert_eq!(stems(&lex, "footballs"), vec!["football"]);
    }

    #[test]
    fn stems_are_distinct_and_case_folded() {
        let (table, dic) = fixture();
        let overlay = Overlay::new();
        let lex = Lexicon::new(&table, &dic, &overlay);
        assert_eq!(stems(&lex, "Walking"), vec!["walk"]);
        assert_eq!(stems(&lex, "baking"), vec!["bake"]);
        assert!(stems(&lex, "walkk").is_empty());
        assert!(lex.analyze("wrong").is_empty());
    }
}

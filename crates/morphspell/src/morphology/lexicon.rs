// Word lookup: reverse affix search over base stems and overlay entries
//
// A word is derived from a stem by at most one prefix and one suffix:
//   bare         walk
//   suffix       walk + ed
//   prefix       un + walk
//   both         un + walk + ed   (both rules must allow cross products)
// Compounds are only tried when none of these match.

use std::borrow::Cow;

use morphspell_aff::aff::{AffixTable, SpecialFlags};
use morphspell_aff::affix::{AffixKind, AffixRef};
use morphspell_aff::dic::Dictionary;
use morphspell_aff::flags::FlagSet;
use morphspell_core::case::case_variants;
use morphspell_core::enums::SpellResult;

use super::expand::expand;
use super::{Derivation, char_boundaries, compound};
use crate::overlay::{Overlay, OverlayEntry};

/// A stem as seen through the overlay: base entry flags plus any flags an
/// overlay addition contributes.
#[derive(Debug, Clone)]
pub struct Homonym<'a> {
    pub stem: &'a str,
    pub flags: Cow<'a, FlagSet>,
    pub morph: &'a [String],
}

impl Homonym<'_> {
    pub fn is_forbidden(&self, special: &SpecialFlags) -> bool {
        self.flags.contains_opt(special.forbidden)
    }

    /// The stem is a word on its own.
    pub fn licenses_bare(&self, special: &SpecialFlags) -> bool {
        !self.is_forbidden(special)
            && !self.flags.contains_opt(special.need_affix)
            && !self.flags.contains_opt(special.only_in_compound)
    }

    /// Affixed forms of the stem are words.
    pub fn licenses_derived(&self, special: &SpecialFlags) -> bool {
        !self.is_forbidden(special) && !self.flags.contains_opt(special.only_in_compound)
    }
}

/// Restrictions applied on top of plain membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupMode {
    /// The word was obtained by changing the case of the input, so stems
    /// marked KEEPCASE do not count.
    pub case_folded: bool,
    /// Candidate check for suggestions: NOSUGGEST stems do not count.
    pub suggesting: bool,
}

impl LookupMode {
    fn accepts(self, derivation: &Derivation, special: &SpecialFlags) -> bool {
        !(self.case_folded && derivation.flags.contains_opt(special.keep_case))
            && !(self.suggesting && derivation.flags.contains_opt(special.no_suggest))
    }
}

/// Read-only view combining the affix table, the base dictionary and the
/// overlay. Cheap to copy; callers build one per query while holding the
/// overlay lock.
#[derive(Debug, Clone, Copy)]
pub struct Lexicon<'a> {
    table: &'a AffixTable,
    dictionary: &'a Dictionary,
    overlay: &'a Overlay,
}

impl<'a> Lexicon<'a> {
    pub fn new(table: &'a AffixTable, dictionary: &'a Dictionary, overlay: &'a Overlay) -> Self {
        Self {
            table,
            dictionary,
            overlay,
        }
    }

    pub fn table(&self) -> &'a AffixTable {
        self.table
    }

    pub fn dictionary(&self) -> &'a Dictionary {
        self.dictionary
    }

    pub fn overlay(&self) -> &'a Overlay {
        self.overlay
    }

    /// The stem `stem` with overlay changes applied. `None` if it is unknown
    /// or tombstoned.
    pub fn homonym(&self, stem: &str) -> Option<Homonym<'a>> {
        let base = self.dictionary.get(stem);
        match self.overlay.get_key_value(stem) {
            Some((_, OverlayEntry::Tombstone)) => None,
            Some((key, OverlayEntry::Added { flags, .. })) => Some(match base {
                Some(entry) => {
                    let mut merged = entry.flags.clone();
                    merged.union_with(flags);
                    Homonym {
                        stem: &entry.stem,
                        flags: Cow::Owned(merged),
                        morph: &entry.morph,
                    }
                }
                None => Homonym {
                    stem: key,
                    flags: Cow::Borrowed(flags),
                    morph: &[],
                },
            }),
            None => base.map(|entry| Homonym {
                stem: &entry.stem,
                flags: Cow::Borrowed(&entry.flags),
                morph: &entry.morph,
            }),
        }
    }

    /// `true` if the word itself is tombstoned or a forbidden stem.
    pub fn is_blocked(&self, word: &str) -> bool {
        self.overlay.is_tombstoned(word)
            || self
                .homonym(word)
                .is_some_and(|h| h.is_forbidden(&self.table.special))
    }

    /// Exact-case membership test.
    pub fn lookup(&self, word: &str, mode: LookupMode) -> SpellResult {
        match self.overlay.get(word) {
            Some(OverlayEntry::Added { .. }) => return SpellResult::Ok,
            Some(OverlayEntry::Tombstone) if mode.case_folded => return SpellResult::Failed,
            Some(OverlayEntry::Tombstone) => return SpellResult::Forbidden,
            None => {}
        }
        let special = &self.table.special;
        if self.homonym(word).is_some_and(|h| h.is_forbidden(special)) {
            return SpellResult::Forbidden;
        }
        if self
            .derivations(word)
            .iter()
            .any(|d| mode.accepts(d, special))
        {
            SpellResult::Ok
        } else {
            SpellResult::Failed
        }
    }

    /// All derivations of `word` in its exact case.
    pub fn derivations(&self, word: &str) -> Vec<Derivation> {
        let found = self.simple_derivations(word);
        if found.is_empty() && self.table.has_compounding() {
            return compound::split(self, word);
        }
        found
    }

    /// Derivations of `word`, retrying case-folded variants when the exact
    /// case has none. Stems marked KEEPCASE never match a folded variant.
    pub fn resolve(&self, word: &str) -> Vec<Derivation> {
        self.resolve_cased(word).0
    }

    /// [`Lexicon::resolve`], also telling whether the derivations belong to
    /// a case-folded variant rather than to `word` as written.
    ///
    /// A tombstone hides only its own spelling: the retry moves on to the
    /// next variant. A forbidden stem ends it.
    pub fn resolve_cased(&self, word: &str) -> (Vec<Derivation>, bool) {
        if self.is_blocked(word) {
            return (Vec::new(), false);
        }
        let exact = self.derivations(word);
        if !exact.is_empty() {
            return (exact, false);
        }
        let keep_case = self.table.special.keep_case;
        for variant in case_variants(word) {
            if self.overlay.is_tombstoned(&variant) {
                continue;
            }
            if self.is_blocked(&variant) {
                break;
            }
            let found: Vec<Derivation> = self
                .derivations(&variant)
                .into_iter()
                .filter(|d| !d.flags.contains_opt(keep_case))
                .collect();
            if !found.is_empty() {
                return (found, true);
            }
        }
        (Vec::new(), false)
    }

    /// Bare, suffix-only, prefix-only and prefix+suffix derivations, in that
    /// order.
    pub fn simple_derivations(&self, word: &str) -> Vec<Derivation> {
        let special = &self.table.special;
        let mut found = Vec::new();
        if word.is_empty() {
            return found;
        }
        if let Some(h) = self.homonym(word) {
            if h.licenses_bare(special) {
                found.push(Derivation::from_homonym(word, &h, None, None));
            }
        }
        found.extend(self.single_affix(word, AffixKind::Suffix, false));
        found.extend(self.single_affix(word, AffixKind::Prefix, false));

        for (middle, pref) in self.affix_candidates(AffixKind::Prefix, word) {
            let (prule, pentry) = self.table.entry(pref);
            if !prule.cross_product {
                continue;
            }
            for (stem, sref) in self.affix_candidates(AffixKind::Suffix, &middle) {
                let (srule, sentry) = self.table.entry(sref);
                if !srule.cross_product {
                    continue;
                }
                if pentry.cont_flags.contains_opt(special.circumfix)
                    != sentry.cont_flags.contains_opt(special.circumfix)
                {
                    continue;
                }
                let Some(h) = self.homonym(&stem) else {
                    continue;
                };
                if !h.licenses_derived(special) || !h.flags.contains(srule.flag) {
                    continue;
                }
                if !h.flags.contains(prule.flag) && !sentry.cont_flags.contains(prule.flag) {
                    continue;
                }
                found.push(Derivation::from_homonym(word, &h, Some(pref), Some(sref)));
            }
        }
        found
    }

    /// Derivations using exactly one affix of `kind`. Inside compounds,
    /// ONLYINCOMPOUND stems are allowed.
    pub(crate) fn single_affix(
        &self,
        word: &str,
        kind: AffixKind,
        in_compound: bool,
    ) -> Vec<Derivation> {
        let special = &self.table.special;
        let mut found = Vec::new();
        for (stem, aref) in self.affix_candidates(kind, word) {
            let (rule, entry) = self.table.entry(aref);
            if entry.cont_flags.contains_opt(special.circumfix)
                || entry.cont_flags.contains_opt(special.need_affix)
            {
                continue;
            }
            let Some(h) = self.homonym(&stem) else {
                continue;
            };
            let licensed = if in_compound {
                !h.is_forbidden(special)
            } else {
                h.licenses_derived(special)
            };
            if !licensed || !h.flags.contains(rule.flag) {
                continue;
            }
            let (prefix, suffix) = match kind {
                AffixKind::Prefix => (Some(aref), None),
                AffixKind::Suffix => (None, Some(aref)),
            };
            found.push(Derivation::from_homonym(word, &h, prefix, suffix));
        }
        found
    }

    /// Every (stem, entry) pair such that the entry could have produced
    /// `word` from the stem. Only entries whose add string actually occurs
    /// at the matching end of `word` are examined.
    fn affix_candidates(&self, kind: AffixKind, word: &str) -> Vec<(String, AffixRef)> {
        let bounds = char_boundaries(word);
        let chars = bounds.len() - 1;
        let longest = self.table.max_add_chars(kind).min(chars);
        let mut out = Vec::new();
        for len in 0..=longest {
            let add = match kind {
                AffixKind::Suffix => &word[bounds[chars - len]..],
                AffixKind::Prefix => &word[..bounds[len]],
            };
            for &aref in self.table.entries_adding(kind, add) {
                let (_, entry) = self.table.entry(aref);
                if let Some(stem) = entry.unapply(kind, word, self.table.full_strip) {
                    out.push((stem, aref));
                }
            }
        }
        out
    }

    /// Visit every surface form of every suggestible stem whose length
    /// allows a form within `slack` characters of `length`. Base stems come
    /// first in file order, then overlay additions sorted by stem.
    pub fn for_each_form_near(&self, length: usize, slack: usize, visit: &mut dyn FnMut(&str)) {
        let special = &self.table.special;
        let longest_add = self.table.max_affix_chars();
        let longest_strip = 2 * self.table.max_strip_chars();
        let near = |stem: &str| {
            let n = stem.chars().count();
            n + longest_add + slack >= length && n <= length + slack + longest_strip
        };
        let mut emit = |h: &Homonym<'_>| {
            if h.flags.contains_opt(special.no_suggest) || !near(h.stem) {
                return;
            }
            for expansion in expand(self.table, h.stem, &h.flags) {
                visit(&expansion.form);
            }
        };

        for entry in self.dictionary.entries() {
            if self.overlay.get(&entry.stem).is_some() {
                continue;
            }
            emit(&Homonym {
                stem: &entry.stem,
                flags: Cow::Borrowed(&entry.flags),
                morph: &entry.morph,
            });
        }
        for (stem, _) in self.overlay.added() {
            if let Some(h) = self.homonym(stem) {
                emit(&h);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use morphspell_aff::flags::Flag;

    pub(crate) const AFF: &str = "\
SET UTF-8
NEEDAFFIX X
KEEPCASE K
FORBIDDENWORD F
ONLYINCOMPOUND O
NOSUGGEST N
CIRCUMFIX C

SFX V Y 4
SFX V 0 ed [^e]
SFX V 0 d e
SFX V 0 ing [^e]
SFX V e ing e

PFX U Y 1
PFX U 0 un .

SFX G Y 1
SFX G 0 ung/C .

PFX H Y 1
PFX H 0 ge/C .
";

    pub(crate) const DIC: &str = "\
9
walk/VU po:verb
bake/V
do/U
pseudo/XV
wrong/F
piece/O
rare/N
ok/K
lach/GH
";

    pub(crate) fn fixture() -> (AffixTable, Dictionary) {
        let table = AffixTable::parse(AFF).unwrap();
        let (dictionary, warnings) = Dictionary::parse(DIC, &table).unwrap();
        assert!(warnings.is_empty());
        (table, dictionary)
    }

    fn plain() -> LookupMode {
        LookupMode::default()
    }

    #[test]
    fn bare_and_affixed_forms() {
        let (table, dic) = fixture();
        let overlay = Overlay::new();
        let lex = Lexicon::new(&table, &dic, &overlay);
        for word in ["walk", "walked", "walking", "baked", "baking", "undo", "unwalk", "unwalked"] {
            assert_eq!(lex.lookup(word, plain()), SpellResult::Ok, "{word}");
        }
        for word in ["walkked", "bakeing", "undone", "unbake", "walkd"] {
            assert_eq!(lex.lookup(word, plain()), SpellResult::Failed, "{word}");
        }
    }

    #[test]
    fn derivation_order_and_shape() {
        let (table, dic) = fixture();
        let overlay = Overlay::new();
        let lex = Lexicon::new(&table, &dic, &overlay);
        let found = lex.derivations("unwalked");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].stem, "walk");
        assert!(found[0].prefix.is_some() && found[0].suffix.is_some());
        assert_eq!(found[0].morph, vec!["po:verb"]);

        let found = lex.derivations("walk");
        assert_eq!(found.len(), 1);
        assert!(found[0].is_bare());
    }

    #[test]
    fn need_affix_stem() {
        let (table, dic) = fixture();
        let overlay = Overlay::new();
        let lex = Lexicon::new(&table, &dic, &overlay);
        assert_eq!(lex.lookup("pseudo", plain()), SpellResult::Failed);
        assert_eq!(lex.lookup("pseudoed", plain()), SpellResult::Ok);
    }

    #[test]
    fn forbidden_and_compound_only_stems() {
        let (table, dic) = fixture();
        let overlay = Overlay::new();
        let lex = Lexicon::new(&table, &dic, &overlay);
        assert_eq!(lex.lookup("wrong", plain()), SpellResult::Forbidden);
        assert!(lex.is_blocked("wrong"));
        assert_eq!(lex.lookup("piece", plain()), SpellResult::Failed);
    }

    #[test]
    fn no_suggest_only_hides_candidates() {
        let (table, dic) = fixture();
        let overlay = Overlay::new();
        let lex = Lexicon::new(&table, &dic, &overlay);
        assert_eq!(lex.lookup("rare", plain()), SpellResult::Ok);
        let suggesting = LookupMode {
            suggesting: true,
            ..LookupMode::default()
        };
        assert_eq!(lex.lookup("rare", suggesting), SpellResult::Failed);
    }

    #[test]
    fn keep_case_rejects_folded_matches() {
        let (table, dic) = fixture();
        let overlay = Overlay::new();
        let lex = Lexicon::new(&table, &dic, &overlay);
        assert_eq!(lex.lookup("ok", plain()), SpellResult::Ok);
        let folded = LookupMode {
            case_folded: true,
            ..LookupMode::default()
        };
        assert_eq!(lex.lookup("ok", folded), SpellResult::Failed);
        assert!(lex.resolve("OK").is_empty());
        assert_eq!(lex.resolve("Walked")[0].stem, "walk");
    }

    #[test]
    fn circumfix_needs_both_sides() {
        let (table, dic) = fixture();
        let overlay = Overlay::new();
        let lex = Lexicon::new(&table, &dic, &overlay);
        assert_eq!(lex.lookup("gelachung", plain()), SpellResult::Ok);
        assert_eq!(lex.lookup("lachung", plain()), SpellResult::Failed);
        assert_eq!(lex.lookup("gelach", plain()), SpellResult::Failed);
    }

    #[test]
    fn overlay_tombstone_hides_stem_and_forms() {
        let (table, dic) = fixture();
        let mut overlay = Overlay::new();
        overlay.tombstone("walk");
        let lex = Lexicon::new(&table, &dic, &overlay);
        assert_eq!(lex.lookup("walk", plain()), SpellResult::Forbidden);
        assert_eq!(lex.lookup("walked", plain()), SpellResult::Failed);
        assert!(lex.resolve("walking").is_empty());
    }

    #[test]
    fn tombstoned_case_variant_is_skipped() {
        let (table, dic) = fixture();
        let mut overlay = Overlay::new();
        overlay.tombstone("Walk");
        let lex = Lexicon::new(&table, &dic, &overlay);
        let folded = LookupMode {
            case_folded: true,
            ..LookupMode::default()
        };
        assert_eq!(lex.lookup("Walk", plain()), SpellResult::Forbidden);
        assert_eq!(lex.lookup("Walk", folded), SpellResult::Failed);
        assert!(lex.resolve("Walk").is_empty());
        let (found, folded) = lex.resolve_cased("WALK");
        assert_eq!(found[0].stem, "walk");
        assert!(folded);
    }

    #[test]
    fn resolve_cased_reports_folding() {
        let (table, dic) = fixture();
        let overlay = Overlay::new();
        let lex = Lexicon::new(&table, &dic, &overlay);
        assert!(!lex.resolve_cased("walked").1);
        assert!(lex.resolve_cased("Walked").1);
        assert!(!lex.resolve_cased("xyzzy").1);
    }

    #[test]
    fn overlay_additions() {
        let (table, dic) = fixture();
        let mut overlay = Overlay::new();
        overlay.add_plain("blorf");
        let flags: FlagSet = [Flag('U' as u32)].into_iter().collect();
        overlay.add_with_flags("bake", flags);
        let lex = Lexicon::new(&table, &dic, &overlay);
        assert_eq!(lex.lookup("blorf", plain()), SpellResult::Ok);
        assert!(lex.derivations("blorf")[0].is_bare());
        // Base flags survive next to the added ones.
        assert_eq!(lex.lookup("unbake", plain()), SpellResult::Ok);
        assert_eq!(lex.lookup("baked", plain()), SpellResult::Ok);
    }

    #[test]
    fn forms_near_a_length() {
        let (table, dic) = fixture();
        let overlay = Overlay::new();
        let lex = Lexicon::new(&table, &dic, &overlay);
        let mut forms = Vec::new();
        lex.for_each_form_near(5, 2, &mut |form| forms.push(form.to_string()));
        assert!(forms.contains(&"walked".to_string()));
        assert!(!forms.iter().any(|f| f == "rare"));
        assert!(!forms.iter().any(|f| f == "wrong"));
    }
}

// Form generation: inflect one word like another
//
// generate("bake", "walked") resolves "walked" to the chain (-, SFX V "ed")
// and re-applies every entry of rule V carrying the same morphological
// fields as "ed" to the stem "bake", giving "baked".

use morphspell_aff::aff::AffixTable;
use morphspell_aff::affix::{AffixEntry, AffixKind, AffixRef};
use morphspell_core::case::{detect_case, set_case};

use super::lexicon::Lexicon;

type Chain = (Option<AffixRef>, Option<AffixRef>);

/// Surface forms of `source`'s stems inflected the way `example` is.
///
/// Empty if either word has no simple derivation. When `source` is only
/// known in another case ("Walked"), the forms take its case pattern.
pub fn generate(lexicon: &Lexicon<'_>, source: &str, example: &str) -> Vec<String> {
    let (derivations, folded) = lexicon.resolve_cased(source);
    let recase = folded.then(|| detect_case(source));
    let mut stems: Vec<String> = Vec::new();
    for derivation in derivations {
        if !derivation.is_compound() && !stems.contains(&derivation.stem) {
            stems.push(derivation.stem);
        }
    }
    let mut chains: Vec<Chain> = Vec::new();
    for derivation in lexicon.resolve(example) {
        let chain = (derivation.prefix, derivation.suffix);
        if !derivation.is_compound() && !chains.contains(&chain) {
            chains.push(chain);
        }
    }

    let table = lexicon.table();
    let mut out: Vec<String> = Vec::new();
    for stem in &stems {
        for &(prefix, suffix) in &chains {
            let suffixed = match suffix {
                Some(sref) => apply_like(table, sref, AffixKind::Suffix, stem),
                None => vec![stem.clone()],
            };
            let forms = match prefix {
                Some(pref) => suffixed
                    .iter()
                    .flat_map(|form| apply_like(table, pref, AffixKind::Prefix, form))
                    .collect(),
                None => suffixed,
            };
            for form in forms {
                let form = match recase {
                    Some(case) => set_case(&form, case),
                    None => form,
                };
                if !form.is_empty() && !out.contains(&form) {
                    out.push(form);
                }
            }
        }
    }
    out
}

/// Apply every entry of `aref`'s rule whose fields equal those of `aref`.
fn apply_like(table: &AffixTable, aref: AffixRef, kind: AffixKind, word: &str) -> Vec<String> {
    let (rule, applied) = table.entry(aref);
    rule.entries
        .iter()
        .filter(|entry: &&AffixEntry| entry.morph == applied.morph)
        .filter_map(|entry| entry.apply(kind, word, table.full_strip))
        .collect()
}

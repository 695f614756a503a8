// Compound word splitting
//
// Two mechanisms, both optional:
//   flags  COMPOUNDFLAG / COMPOUNDBEGIN / COMPOUNDMIDDLE / COMPOUNDEND mark
//          stems allowed at each position; the last part may carry a suffix.
//   rules  COMPOUNDRULE patterns over the flags of bare parts.
// The search is depth-first over split points and stops after a fixed number
// of steps or results.

use morphspell_aff::affix::AffixKind;
use morphspell_aff::flags::{Flag, FlagSet};

use super::lexicon::Lexicon;
use super::{Derivation, char_boundaries};

const STEP_BUDGET: usize = 10_000;
const MAX_RESULTS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Begin,
    Middle,
    End,
}

struct Search<'l, 'a> {
    lexicon: &'l Lexicon<'a>,
    word: &'l str,
    bounds: Vec<usize>,
    min_part: usize,
    max_parts: usize,
    steps: usize,
    results: Vec<Derivation>,
}

/// Compound derivations of `word`.
pub(crate) fn split(lexicon: &Lexicon<'_>, word: &str) -> Vec<Derivation> {
    let config = &lexicon.table().compound;
    let bounds = char_boundaries(word);
    let chars = bounds.len() - 1;
    let min_part = config.min_length.max(1);
    if chars < 2 * min_part {
        return Vec::new();
    }
    let mut search = Search {
        lexicon,
        word,
        bounds,
        min_part,
        max_parts: config.max_words.unwrap_or(chars / min_part),
        steps: 0,
        results: Vec::new(),
    };
    if search.max_parts < 2 {
        return Vec::new();
    }

    let special = &lexicon.table().special;
    let uses_flags = special.compound_flag.is_some()
        || special.compound_begin.is_some()
        || special.compound_middle.is_some()
        || special.compound_end.is_some();
    if uses_flags {
        search.by_flags(0, &mut Vec::new());
    }
    if !config.rules.is_empty() {
        search.by_rules(0, &mut Vec::new());
    }
    search.results
}

impl Search<'_, '_> {
    fn chars(&self) -> usize {
        self.bounds.len() - 1
    }

    fn slice(&self, start: usize, end: usize) -> &str {
        &self.word[self.bounds[start]..self.bounds[end]]
    }

    fn exhausted(&mut self) -> bool {
        self.steps += 1;
        self.steps > STEP_BUDGET || self.results.len() >= MAX_RESULTS
    }

    fn position_flags(&self, position: Position) -> [Option<Flag>; 2] {
        let special = &self.lexicon.table().special;
        let specific = match position {
            Position::Begin => special.compound_begin,
            Position::Middle => special.compound_middle,
            Position::End => special.compound_end,
        };
        [special.compound_flag, specific]
    }

    fn allowed_at(&self, flags: &FlagSet, position: Position) -> bool {
        self.position_flags(position)
            .into_iter()
            .any(|flag| flags.contains_opt(flag))
    }

    fn bare_part(&self, text: &str, position: Position) -> Option<Derivation> {
        let special = &self.lexicon.table().special;
        let homonym = self.lexicon.homonym(text)?;
        if homonym.is_forbidden(special)
            || homonym.flags.contains_opt(special.need_affix)
            || !self.allowed_at(&homonym.flags, position)
        {
            return None;
        }
        Some(Derivation::from_homonym(text, &homonym, None, None))
    }

    fn last_parts(&self, text: &str) -> Vec<Derivation> {
        let mut parts: Vec<Derivation> = self.bare_part(text, Position::End).into_iter().collect();
        parts.extend(
            self.lexicon
                .single_affix(text, AffixKind::Suffix, true)
                .into_iter()
                .filter(|d| self.allowed_at(&d.flags, Position::End)),
        );
        parts
    }

    fn by_flags(&mut self, start: usize, parts: &mut Vec<Derivation>) {
        if self.exhausted() {
            return;
        }
        let chars = self.chars();
        if !parts.is_empty() && chars - start >= self.min_part {
            let text = self.slice(start, chars).to_string();
            for last in self.last_parts(&text) {
                if self.results.len() >= MAX_RESULTS {
                    return;
                }
                let mut all = parts.clone();
                all.push(last);
                self.results.push(combine(self.word, all));
            }
        }
        if parts.len() + 2 > self.max_parts || chars - start < 2 * self.min_part {
            return;
        }
        let position = if parts.is_empty() {
            Position::Begin
        } else {
            Position::Middle
        };
        for end in (start + self.min_part)..=(chars - self.min_part) {
            let text = self.slice(start, end).to_string();
            if let Some(part) = self.bare_part(&text, position) {
                parts.push(part);
                self.by_flags(end, parts);
                parts.pop();
            }
            if self.steps > STEP_BUDGET || self.results.len() >= MAX_RESULTS {
                return;
            }
        }
    }

    fn by_rules(&mut self, start: usize, parts: &mut Vec<Derivation>) {
        if self.exhausted() {
            return;
        }
        let chars = self.chars();
        if start == chars {
            let rules = &self.lexicon.table().compound.rules;
            let flag_sets: Vec<&FlagSet> = parts.iter().map(|p| &p.flags).collect();
            if parts.len() >= 2 && rules.iter().any(|rule| rule.matches(&flag_sets)) {
                self.results.push(combine(self.word, parts.clone()));
            }
            return;
        }
        if parts.len() >= self.max_parts {
            return;
        }
        for end in (start + self.min_part)..=chars {
            if end < chars && chars - end < self.min_part {
                continue;
            }
            let text = self.slice(start, end).to_string();
            if let Some(part) = self.rule_part(&text) {
                parts.push(part);
                self.by_rules(end, parts);
                parts.pop();
            }
            if self.steps > STEP_BUDGET || self.results.len() >= MAX_RESULTS {
                return;
            }
        }
    }

    fn rule_part(&self, text: &str) -> Option<Derivation> {
        let table = self.lexicon.table();
        let homonym = self.lexicon.homonym(text)?;
        if homonym.is_forbidden(&table.special) {
            return None;
        }
        let mentioned = table
            .compound
            .rules
            .iter()
            .any(|rule| rule.flags().any(|flag| homonym.flags.contains(flag)));
        mentioned.then(|| Derivation::from_homonym(text, &homonym, None, None))
    }
}

/// Join parts into one compound derivation. The compound stem is the
/// surface of the leading parts followed by the stem of the last part.
fn combine(word: &str, parts: Vec<Derivation>) -> Derivation {
    let mut stem = String::new();
    let mut flags = FlagSet::new();
    for (i, part) in parts.iter().enumerate() {
        stem.push_str(if i + 1 == parts.len() {
            &part.stem
        } else {
            &part.surface
        });
        flags.union_with(&part.flags);
    }
    Derivation {
        surface: word.to_string(),
        stem,
        prefix: None,
        suffix: None,
        flags,
        morph: Vec::new(),
        parts,
    }
}

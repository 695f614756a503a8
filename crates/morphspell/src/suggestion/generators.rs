// Candidate generators. Each one knows a single kind of typo and proposes
// the words it would have produced; `suggest_word` decides what is kept.

use morphspell_aff::replacement::ReplacementTable;
use morphspell_core::character::{simple_lower, simple_upper, to_lower, to_title, to_upper};
use morphspell_core::enums::SpellResult;

use super::status::SuggestionStatus;
use crate::speller::Speller;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// One kind of candidate edit.
///
/// Implementations push candidates through [`suggest_word`], which spends
/// the cost budget and records the accepted ones in the status.
pub trait SuggestionGenerator: Send + Sync {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>);
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Check a candidate and, if every space-separated part of it spells
/// correctly, add it to the status.
///
/// Candidates already examined or too far from the input are dropped
/// before any spell check is made.
pub fn suggest_word(speller: &dyn Speller, status: &mut SuggestionStatus<'_>, candidate: &str) {
    if status.should_abort() {
        return;
    }
    let Some(distance) = status.consider(candidate) else {
        return;
    };
    let mut accepted = true;
    for part in candidate.split(' ') {
        status.charge();
        if part.is_empty() || speller.spell(part) != SpellResult::Ok {
            accepted = false;
            break;
        }
    }
    if accepted {
        status.add_suggestion(candidate.to_string(), distance);
    }
}

/// [`suggest_word`] for a character buffer.
pub fn suggest_for_buffer(speller: &dyn Speller, status: &mut SuggestionStatus<'_>, buffer: &[char]) {
    let candidate: String = buffer.iter().collect();
    suggest_word(speller, status, &candidate);
}

// =========================================================================
// Individual generators
// =========================================================================

// ---------------------------------------------------------------------------
// CaseChange
// ---------------------------------------------------------------------------

/// Try the word in lower, title and upper case.
///
/// This is a primary generator: it is cheap (three spell checks) and catches
/// a word typed with one or two wrongly capitalized letters.
pub struct CaseChange;

impl SuggestionGenerator for CaseChange {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        let input = status.input().to_string();
        for candidate in [to_lower(&input), to_title(&input), to_upper(&input)] {
            suggest_word(speller, status, &candidate);
        }
    }
}

// ---------------------------------------------------------------------------
// Replacements
// ---------------------------------------------------------------------------

/// Apply the `REP` table of the affix file.
pub struct Replacements {
    pub table: ReplacementTable,
}

impl SuggestionGenerator for Replacements {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        if self.table.is_empty() {
            return;
        }
        let input = status.input().to_string();
        for candidate in self.table.candidates(&input) {
            if status.should_abort() {
                break;
            }
            suggest_word(speller, status, &candidate);
        }
    }
}

// ---------------------------------------------------------------------------
// MapRelated
// ---------------------------------------------------------------------------

/// Replace one character (or `MAP` group item) by a related one from the
/// same `MAP` group, e.g. `a` by `á`.
pub struct MapRelated {
    pub groups: Vec<Vec<String>>,
}

impl SuggestionGenerator for MapRelated {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        if self.groups.is_empty() {
            return;
        }
        let input = status.input().to_string();
        for (pos, _) in input.char_indices() {
            let rest = &input[pos..];
            for group in &self.groups {
                for item in group.iter().filter(|item| rest.starts_with(item.as_str())) {
                    for related in group.iter().filter(|related| *related != item) {
                        if status.should_abort() {
                            return;
                        }
                        let candidate =
                            format!("{}{}{}", &input[..pos], related, &rest[item.len()..]);
                        suggest_word(speller, status, &candidate);
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// KeyAdjacency
// ---------------------------------------------------------------------------

/// Replace a character by its neighbours on the keyboard.
///
/// Rows come from the `KEY` directive: `qwertyuiop|asdfghjkl|zxcvbnm`.
/// Neighbours are the characters directly left and right in the same row.
pub struct KeyAdjacency {
    rows: Vec<Vec<char>>,
}

impl KeyAdjacency {
    pub fn new(key: &str) -> Self {
        Self {
            rows: key
                .split('|')
                .map(|row| row.chars().collect::<Vec<char>>())
                .filter(|row| !row.is_empty())
                .collect(),
        }
    }

    fn neighbours(&self, c: char) -> Vec<char> {
        let lower = simple_lower(c);
        let mut out = Vec::new();
        for row in &self.rows {
            for (i, &key) in row.iter().enumerate() {
                if key != lower {
                    continue;
                }
                if i > 0 {
                    out.push(row[i - 1]);
                }
                if i + 1 < row.len() {
                    out.push(row[i + 1]);
                }
            }
        }
        out
    }
}

impl SuggestionGenerator for KeyAdjacency {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        let word = status.word().to_vec();
        let mut buffer = word.clone();
        for i in 0..word.len() {
            for neighbour in self.neighbours(word[i]) {
                if status.should_abort() {
                    return;
                }
                buffer[i] = if word[i] == simple_lower(word[i]) {
                    neighbour
                } else {
                    simple_upper(neighbour)
                };
                suggest_for_buffer(speller, status, &buffer);
            }
            buffer[i] = word[i];
        }
    }
}

// ---------------------------------------------------------------------------
// Swap
// ---------------------------------------------------------------------------

/// Try swapping two characters.
///
/// Adjacent swaps are the common typo; swaps further apart are bounded by a
/// window that shrinks for long words.
pub struct Swap;

impl SuggestionGenerator for Swap {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        let word = status.word().to_vec();
        let wlen = word.len();
        if wlen < 2 {
            return;
        }
        let max_distance = if wlen <= 8 { 10 } else { 50 / wlen };
        if max_distance == 0 {
            return;
        }
        let mut buffer = word.clone();

        for i in 0..wlen {
            for j in (i + 1)..wlen {
                if status.should_abort() {
                    return;
                }
                if j - i > max_distance {
                    break;
                }
                if word[i] == word[j] {
                    continue;
                }
                buffer[i] = word[j];
                buffer[j] = word[i];
                suggest_for_buffer(speller, status, &buffer);
                buffer[i] = word[i];
                buffer[j] = word[j];
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

/// Drop one character.
///
/// Skips positions where the deleted character equals its predecessor,
/// since that would produce the same candidate as the previous iteration.
pub struct Deletion;

impl SuggestionGenerator for Deletion {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        let word = status.word().to_vec();
        let wlen = word.len();
        if wlen < 2 {
            return;
        }
        let mut buffer = Vec::with_capacity(wlen - 1);

        for i in 0..wlen {
            if status.should_abort() {
                break;
            }
            if i > 0 && word[i] == word[i - 1] {
                continue;
            }
            buffer.clear();
            buffer.extend_from_slice(&word[..i]);
            buffer.extend_from_slice(&word[i + 1..]);
            suggest_for_buffer(speller, status, &buffer);
        }
    }
}

// ---------------------------------------------------------------------------
// Substitution
// ---------------------------------------------------------------------------

/// Try replacing each character by each character of a set.
///
/// The set comes from `TRY` (or the dictionary's letters by frequency),
/// so likely letters are tested first.
pub struct Substitution {
    pub characters: Vec<char>,
}

impl SuggestionGenerator for Substitution {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        let word = status.word().to_vec();
        let mut buffer = word.clone();
        for &sub in &self.characters {
            for i in 0..word.len() {
                if status.should_abort() {
                    return;
                }
                if simple_lower(word[i]) == sub {
                    continue;
                }
                buffer[i] = sub;
                suggest_for_buffer(speller, status, &buffer);
                buffer[i] = word[i];
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Insertion
// ---------------------------------------------------------------------------

/// Insert one character from a fixed set, at every position.
pub struct Insertion {
    pub characters: Vec<char>,
}

impl SuggestionGenerator for Insertion {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        let word = status.word().to_vec();
        let wlen = word.len();
        if wlen == 0 {
            return;
        }
        let mut buffer = Vec::with_capacity(wlen + 1);

        for &ins in &self.characters {
            for j in 0..=wlen {
                if status.should_abort() {
                    return;
                }
                // Inserting next to the same character gives the same word
                // at two positions; only the first is tried.
                if j > 0 && simple_lower(word[j - 1]) == ins {
                    continue;
                }
                buffer.clear();
                buffer.extend_from_slice(&word[..j]);
                buffer.push(ins);
                buffer.extend_from_slice(&word[j..]);
                suggest_for_buffer(speller, status, &buffer);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// SplitWord
// ---------------------------------------------------------------------------

/// Split into two words at every inner position.
///
/// Both parts must pass spell check.
pub struct SplitWord;

impl SuggestionGenerator for SplitWord {
    fn generate(&self, speller: &dyn Speller, status: &mut SuggestionStatus<'_>) {
        let word = status.word().to_vec();
        let wlen = word.len();
        if wlen < 2 {
            return;
        }
        let mut buffer = Vec::with_capacity(wlen + 1);
        for split in 1..wlen {
            if status.should_abort() {
                return;
            }
            if word[split - 1] == ' ' || word[split] == ' ' {
                continue;
            }
            buffer.clear();
            buffer.extend_from_slice(&word[..split]);
            buffer.push(' ');
            buffer.extend_from_slice(&word[split..]);
            suggest_for_buffer(speller, status, &buffer);
        }
    }
}

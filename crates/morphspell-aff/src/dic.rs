// Dictionary loader: stems with flags and morphological fields
//
// File layout:
//   3                       approximate entry count
//   walk/V po:verb          stem, flags after '/', morph fields after whitespace
//   and\/or                 `\/` is a literal slash
//   <TAB>free text          comment

use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::aff::AffixTable;
use crate::flags::FlagSet;
use crate::{DictionaryFormatError, UnknownFlagError};

/// One stem of the base dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictEntry {
    pub stem: String,
    pub flags: FlagSet,
    /// Morphological fields (`po:verb`), after AM alias resolution.
    pub morph: Vec<String>,
}

/// The base dictionary, immutable after loading.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<DictEntry>,
    index: HashMap<String, usize>,
    declared_count: usize,
}

/// Split `head` at the first unescaped slash into the stem and flag text.
/// A slash in first position belongs to the stem.
fn split_flags(head: &str) -> (String, Option<&str>) {
    let bytes = head.as_bytes();
    let mut split = None;
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'/' && i > 0 && bytes[i - 1] != b'\\' {
            split = Some(i);
            break;
        }
    }
    match split {
        Some(i) => (head[..i].replace("\\/", "/"), Some(&head[i + 1..])),
        None => (head.replace("\\/", "/"), None),
    }
}

impl Dictionary {
    /// Parse dictionary text against a compiled affix table.
    ///
    /// Lines with undeclared flags are skipped and returned as warnings.
    pub fn parse(
        text: &str,
        table: &AffixTable,
    ) -> Result<(Self, Vec<UnknownFlagError>), DictionaryFormatError> {
        let mut lines = text.lines().enumerate();
        let header = lines
            .by_ref()
            .find(|(_, line)| !line.trim().is_empty())
            .map(|(_, line)| line.trim())
            .ok_or(DictionaryFormatError::Empty)?;
        let count_text = header.split_whitespace().next().unwrap_or_default();
        let declared_count = count_text
            .parse::<usize>()
            .map_err(|_| DictionaryFormatError::BadHeader(header.to_string()))?;

        let mut dictionary = Dictionary {
            entries: Vec::with_capacity(declared_count),
            index: HashMap::with_capacity(declared_count),
            declared_count,
        };
        let mut warnings = Vec::new();

        for (i, line) in lines {
            if line.starts_with('\t') || line.trim().is_empty() {
                continue;
            }
            let line_number = i + 1;
            let mut tokens = line.split_whitespace();
            let Some(head) = tokens.next() else {
                continue;
            };
            let (word, flag_text) = split_flags(head);

            let flags = match flag_text {
                Some(text) => match table.resolve_flags(text) {
                    Ok(flags) => flags,
                    Err(_) => {
                        warnings.push(unknown_flag(line_number, &word, text));
                        continue;
                    }
                },
                None => FlagSet::new(),
            };
            if let Some(flag) = flags.iter().find(|&f| !table.is_declared(f)) {
                warnings.push(unknown_flag(line_number, &word, &table.format_flag(flag)));
                continue;
            }

            let stem = table.strip_ignored(&word).into_owned();
            if stem.is_empty() {
                continue;
            }
            let morph_tokens: Vec<&str> = tokens.collect();
            let morph = table.resolve_morph(&morph_tokens);
            dictionary.insert(stem, flags, morph);
        }

        if dictionary.entries.len() != declared_count {
            debug!(
                declared = declared_count,
                actual = dictionary.entries.len(),
                "dictionary header count differs from entry count"
            );
        }
        Ok((dictionary, warnings))
    }

    fn insert(&mut self, stem: String, flags: FlagSet, morph: Vec<String>) {
        if let Some(&idx) = self.index.get(&stem) {
            let existing = &mut self.entries[idx];
            existing.flags.union_with(&flags);
            if !morph.is_empty() {
                existing.morph = morph;
            }
            return;
        }
        self.index.insert(stem.clone(), self.entries.len());
        self.entries.push(DictEntry { stem, flags, morph });
    }

    pub fn get(&self, stem: &str) -> Option<&DictEntry> {
        self.index.get(stem).map(|&i| &self.entries[i])
    }

    /// Entries in file order.
    pub fn entries(&self) -> &[DictEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count from the header line.
    pub fn declared_count(&self) -> usize {
        self.declared_count
    }

    /// Letters used by the stems, most frequent first. Ties keep the order
    /// of first appearance.
    pub fn char_frequency_alphabet(&self) -> Vec<char> {
        let mut counts: HashMap<char, (usize, usize)> = HashMap::new();
        let mut seen = 0;
        for entry in &self.entries {
            for c in entry.stem.chars().filter(|c| c.is_alphabetic()) {
                let slot = counts.entry(c).or_insert_with(|| {
                    seen += 1;
                    (0, seen)
                });
                slot.0 += 1;
            }
        }
        let mut alphabet: Vec<(char, (usize, usize))> = counts.into_iter().collect();
        alphabet.sort_by(|a, b| b.1.0.cmp(&a.1.0).then(a.1.1.cmp(&b.1.1)));
        alphabet.into_iter().map(|(c, _)| c).collect()
    }
}

fn unknown_flag(line: usize, word: &str, flag: &str) -> UnknownFlagError {
    warn!(line, word, flag, "skipping dictionary entry with undeclared flag");
    UnknownFlagError {
        line,
        word: word.to_string(),
        flag: flag.to_string(),
    }
}

// Compounding configuration and COMPOUNDRULE patterns
//
// COMPOUNDRULE lines are regular expressions over flags: each element names a
// flag that one compound part must carry, optionally followed by `*` (zero or
// more parts) or `?` (zero or one part). With `FLAG long` or `FLAG num` the
// flags are written in parentheses: `(aa)(bb)*`, `(101)(102)?`.

use crate::flags::{Flag, FlagError, FlagSet, FlagType};

/// Default minimum length of a compound part (`COMPOUNDMIN`).
pub const DEFAULT_COMPOUND_MIN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    One,
    Optional,
    Star,
}

/// A compiled COMPOUNDRULE pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundRule {
    elements: Vec<(Flag, Quantifier)>,
}

impl CompoundRule {
    pub fn parse(pattern: &str, flag_type: FlagType) -> Result<Self, FlagError> {
        let mut elements: Vec<(Flag, Quantifier)> = Vec::new();
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            let flag = match c {
                '*' | '?' => {
                    let quantifier = if c == '*' {
                        Quantifier::Star
                    } else {
                        Quantifier::Optional
                    };
                    match elements.last_mut() {
                        Some(last) if last.1 == Quantifier::One => last.1 = quantifier,
                        _ => return Err(FlagError::OutOfRange(pattern.to_string())),
                    }
                    continue;
                }
                '(' => {
                    let group: String = chars.by_ref().take_while(|&g| g != ')').collect();
                    flag_type.parse_one(&group)?
                }
                _ => match flag_type {
                    FlagType::Short | FlagType::Utf8 => Flag(c as u32),
                    FlagType::Long | FlagType::Numeric => {
                        return Err(FlagError::OutOfRange(pattern.to_string()));
                    }
                },
            };
            elements.push((flag, Quantifier::One));
        }
        if elements.is_empty() {
            return Err(FlagError::Empty);
        }
        Ok(Self { elements })
    }

    /// Flags referenced by the pattern.
    pub fn flags(&self) -> impl Iterator<Item = Flag> + '_ {
        self.elements.iter().map(|(flag, _)| *flag)
    }

    /// Check whether a sequence of compound parts (given by their flag sets)
    /// matches the pattern.
    pub fn matches(&self, parts: &[&FlagSet]) -> bool {
        self.match_from(0, parts)
    }

    fn match_from(&self, element: usize, parts: &[&FlagSet]) -> bool {
        let Some(&(flag, quantifier)) = self.elements.get(element) else {
            return parts.is_empty();
        };
        let head_matches = parts.first().is_some_and(|p| p.contains(flag));
        match quantifier {
            Quantifier::One => head_matches && self.match_from(element + 1, &parts[1..]),
            Quantifier::Optional => {
                self.match_from(element + 1, parts)
                    || (head_matches && self.match_from(element + 1, &parts[1..]))
            }
            Quantifier::Star => {
                self.match_from(element + 1, parts)
                    || (head_matches && self.match_from(element, &parts[1..]))
            }
        }
    }
}

/// Compounding settings collected from the affix file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundConfig {
    /// Minimum characters per part.
    pub min_length: usize,
    /// Maximum number of parts; `None` means unbounded.
    pub max_words: Option<usize>,
    pub rules: Vec<CompoundRule>,
}

impl Default for CompoundConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_COMPOUND_MIN,
            max_words: None,
            rules: Vec::new(),
        }
    }
}

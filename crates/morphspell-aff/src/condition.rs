// Affix conditions: a restricted regular-expression dialect
//
// A condition is a sequence of units, each matching exactly one character:
//   .         any character
//   x         the literal character x
//   [abc]     one of a, b, c
//   [^abc]    anything except a, b, c
// A suffix condition is anchored at the end of the stem, a prefix condition
// at its start. The lone pattern "." means "no condition".

use std::fmt;

/// Error produced while compiling a condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    #[error("empty condition")]
    Empty,
    #[error("unclosed character class")]
    UnclosedClass,
    #[error("empty character class")]
    EmptyClass,
    #[error("unexpected `]`")]
    UnopenedClass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Unit {
    Any,
    Char(char),
    Class { negated: bool, chars: Vec<char> },
}

impl Unit {
    fn accepts(&self, c: char) -> bool {
        match self {
            Unit::Any => true,
            Unit::Char(expected) => *expected == c,
            Unit::Class { negated, chars } => chars.contains(&c) != *negated,
        }
    }
}

/// A compiled affix condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    units: Vec<Unit>,
    source: String,
}

impl Condition {
    /// A condition that accepts every stem.
    pub fn always() -> Self {
        Self {
            units: Vec::new(),
            source: ".".to_string(),
        }
    }

    /// Compile a condition pattern.
    pub fn parse(pattern: &str) -> Result<Self, ConditionError> {
        if pattern.is_empty() {
            return Err(ConditionError::Empty);
        }
        if pattern == "." {
            return Ok(Self::always());
        }

        let mut units = Vec::new();
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            match c {
                '.' => units.push(Unit::Any),
                ']' => return Err(ConditionError::UnopenedClass),
                '[' => {
                    let mut negated = false;
                    let mut members = Vec::new();
                    let mut closed = false;
                    for (i, m) in chars.by_ref().enumerate() {
                        match m {
                            '^' if i == 0 => negated = true,
                            ']' => {
                                closed = true;
                                break;
                            }
                            _ => members.push(m),
                        }
                    }
                    if !closed {
                        return Err(ConditionError::UnclosedClass);
                    }
                    if members.is_empty() {
                        return Err(ConditionError::EmptyClass);
                    }
                    units.push(Unit::Class {
                        negated,
                        chars: members,
                    });
                }
                _ => units.push(Unit::Char(c)),
            }
        }

        Ok(Self {
            units,
            source: pattern.to_string(),
        })
    }

    /// Number of characters the condition inspects.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// `true` if the condition accepts every stem.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match the condition against the end of `word` (suffix rules).
    pub fn matches_end(&self, word: &str) -> bool {
        let mut chars = word.chars().rev();
        self.units
            .iter()
            .rev()
            .all(|unit| chars.next().is_some_and(|c| unit.accepts(c)))
    }

    /// Match the condition against the start of `word` (prefix rules).
    pub fn matches_start(&self, word: &str) -> bool {
        let mut chars = word.chars();
        self.units
            .iter()
            .all(|unit| chars.next().is_some_and(|c| unit.accepts(c)))
    }

    /// Check that the trailing units accept the trailing characters of
    /// `strip`. A suffix rule whose strip string violates its own condition
    /// can never apply.
    pub fn accepts_strip_suffix(&self, strip: &str) -> bool {
        self.units
            .iter()
            .rev()
            .zip(strip.chars().rev())
            .all(|(unit, c)| unit.accepts(c))
    }

    /// Prefix-side counterpart of [`Condition::accepts_strip_suffix`].
    pub fn accepts_strip_prefix(&self, strip: &str) -> bool {
        self.units
            .iter()
            .zip(strip.chars())
            .all(|(unit, c)| unit.accepts(c))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

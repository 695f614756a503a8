// REP table: common misspelling substitutions used by suggestions
//
// `REP ph f` proposes replacing "ph" by "f" anywhere in a word. A leading `^`
// anchors the pattern at the word start, a trailing `$` at the word end, and
// `_` stands for a space (so "alot" can become "a lot").

/// One `REP pattern replacement` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub pattern: String,
    pub replacement: String,
    pub anchored_start: bool,
    pub anchored_end: bool,
}

impl Replacement {
    /// Build a replacement from the raw fields of a REP line.
    pub fn new(pattern: &str, replacement: &str) -> Self {
        let (anchored_start, pattern) = match pattern.strip_prefix('^') {
            Some(rest) => (true, rest),
            None => (false, pattern),
        };
        let (anchored_end, pattern) = match pattern.strip_suffix('$') {
            Some(rest) => (true, rest),
            None => (false, pattern),
        };
        Self {
            pattern: pattern.replace('_', " "),
            replacement: replacement.replace('_', " "),
            anchored_start,
            anchored_end,
        }
    }

    /// Every word obtained by replacing one occurrence of the pattern.
    pub fn apply(&self, word: &str) -> Vec<String> {
        if self.pattern.is_empty() {
            return Vec::new();
        }
        match (self.anchored_start, self.anchored_end) {
            (true, true) => {
                if word == self.pattern {
                    vec![self.replacement.clone()]
                } else {
                    Vec::new()
                }
            }
            (true, false) => word
                .strip_prefix(self.pattern.as_str())
                .map(|rest| vec![format!("{}{rest}", self.replacement)])
                .unwrap_or_default(),
            (false, true) => word
                .strip_suffix(self.pattern.as_str())
                .map(|rest| vec![format!("{rest}{}", self.replacement)])
                .unwrap_or_default(),
            (false, false) => word
                .match_indices(self.pattern.as_str())
                .map(|(pos, matched)| {
                    format!(
                        "{}{}{}",
                        &word[..pos],
                        self.replacement,
                        &word[pos + matched.len()..]
                    )
                })
                .collect(),
        }
    }
}

/// Ordered list of replacements, in affix-file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementTable {
    entries: Vec<Replacement>,
}

impl ReplacementTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, replacement: Replacement) {
        self.entries.push(replacement);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Replacement> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Candidates for `word`, table order first, then position order.
    pub fn candidates(&self, word: &str) -> Vec<String> {
        self.entries.iter().flat_map(|r| r.apply(word)).collect()
    }
}

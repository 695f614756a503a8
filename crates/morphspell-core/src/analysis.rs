// Morphological analysis result type
//
// Dictionaries annotate stems and affix entries with free-form fields such as
// `po:verb` or `is:past`. An analysis is the ordered list of those fields for
// one way of deriving a word, rendered as a space-separated descriptor.

use std::fmt;

// ---------------------------------------------------------------------------
// Field tags
// ---------------------------------------------------------------------------

/// Stem of the derivation.
pub const TAG_STEM: &str = "st";
/// Surface form of one compound part.
pub const TAG_PART: &str = "pa";
/// Flag of the applied prefix rule.
pub const TAG_PREFIX: &str = "pfx";
/// Flag of the applied suffix rule.
pub const TAG_SUFFIX: &str = "sfx";
/// Part of speech.
pub const TAG_PART_OF_SPEECH: &str = "po";
/// Inflectional suffix description.
pub const TAG_INFLECTION: &str = "is";

/// One `tag:value` field. Tokens without a colon keep an empty tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MorphField {
    pub tag: String,
    pub value: String,
}

impl MorphField {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }

    /// Parse a `tag:value` token as it appears in dictionary or affix files.
    pub fn parse(token: &str) -> Self {
        match token.split_once(':') {
            Some((tag, value)) => Self::new(tag, value),
            None => Self::new("", token),
        }
    }
}

impl fmt::Display for MorphField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tag.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{}:{}", self.tag, self.value)
        }
    }
}

/// Result of morphological analysis: an ordered sequence of fields.
///
/// Field order is significant (compound parts and affix fields follow the
/// stem they belong to), so fields are stored in a `Vec` rather than a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    fields: Vec<MorphField>,
}

impl Analysis {
    /// Create a new empty analysis.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field.
    pub fn push(&mut self, tag: impl Into<String>, value: impl Into<String>) {
        self.fields.push(MorphField::new(tag, value));
    }

    /// Append raw annotation tokens (`po:verb`, `is:past`, ...).
    pub fn extend_raw<'a>(&mut self, tokens: impl IntoIterator<Item = &'a str>) {
        self.fields.extend(tokens.into_iter().map(MorphField::parse));
    }

    /// Append every field of another analysis.
    pub fn append(&mut self, other: Analysis) {
        self.fields.extend(other.fields);
    }

    /// First value carrying `tag`.
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.tag == tag)
            .map(|f| f.value.as_str())
    }

    /// All values carrying `tag`, in order.
    pub fn get_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |f| f.tag == tag)
            .map(|f| f.value.as_str())
    }

    /// The `st:` field.
    pub fn stem(&self) -> Option<&str> {
        self.get(TAG_STEM)
    }

    pub fn fields(&self) -> &[MorphField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}
